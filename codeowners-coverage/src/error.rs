use std::{io, path::PathBuf};

use thiserror::Error;

/// Missing or unusable inputs. Any of these halts the check before a single
/// path is matched.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("CODEOWNERS file {} not exist.", .path.display())]
    MissingCodeowners { path: PathBuf },

    #[error("failed to read CODEOWNERS file {}: {source}", .path.display())]
    ReadCodeowners {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to read GITHUB_TOKEN")]
    MissingToken,

    #[error("GITHUB_EVENT_PATH is not set; not running inside a pull request workflow?")]
    MissingEventPath,

    #[error("failed to read event payload {}: {reason}", .path.display())]
    ReadEvent { path: PathBuf, reason: String },

    #[error("event payload has no pull request number; the check must run on a pull_request event")]
    MissingPullRequestNumber,

    #[error("failed to determine the repository owner and name")]
    MissingRepository,
}

/// Failures talking to the GitHub API.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    #[error("token contains characters that are not valid in an HTTP header")]
    InvalidToken,

    #[error(transparent)]
    Request(#[from] reqwest::Error),

    #[error("GitHub API responded with {status}: {body}")]
    Status { status: u16, body: String },
}

