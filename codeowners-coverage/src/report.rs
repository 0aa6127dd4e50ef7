use log::{debug, info};

use crate::{context::PullRequest, error::TransportError, github::GitHubClient};

pub const COMMENT_HEADER: &str = "The following files do not have CODEOWNER";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReportOptions {
    pub post_comment: bool,
}

/// Render the pull request comment: the header followed by one Markdown list
/// item per uncovered file.
pub fn format_comment(uncovered: &[String]) -> String {
    let mut body = String::from(COMMENT_HEADER);
    for path in uncovered {
        body.push_str("\n- ");
        body.push_str(path);
    }
    body
}

/// Comment on the pull request listing the uncovered files. Nothing is sent
/// when every file is covered or commenting is disabled. Returns whether a
/// comment was posted; request failures are returned unchanged.
pub async fn post_comment(
    client: &GitHubClient,
    pull_request: &PullRequest,
    uncovered: &[String],
    options: &ReportOptions,
) -> Result<bool, TransportError> {
    if uncovered.is_empty() {
        return Ok(false);
    }
    if !options.post_comment {
        debug!("comment posting disabled");
        return Ok(false);
    }

    client
        .create_issue_comment(
            &pull_request.owner,
            &pull_request.repo,
            pull_request.number,
            &format_comment(uncovered),
        )
        .await?;
    info!(
        "commented on {}/{}#{}",
        pull_request.owner, pull_request.repo, pull_request.number
    );
    Ok(true)
}
