//! Minimal GitHub REST client covering the two calls the check makes.

use log::debug;
use reqwest::{
    header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION},
    Response,
};
use serde::{Deserialize, Serialize};

use crate::error::TransportError;

pub const DEFAULT_API_URL: &str = "https://api.github.com";

const USER_AGENT: &str = concat!("codeowners-coverage/", env!("CARGO_PKG_VERSION"));
const API_VERSION: &str = "2022-11-28";
const FILES_PER_PAGE: usize = 100;

#[derive(Debug, Clone)]
pub struct GitHubClient {
    http: reqwest::Client,
    base_url: String,
}

#[derive(Debug, Serialize)]
struct CommentRequest<'a> {
    body: &'a str,
}

#[derive(Debug, Deserialize)]
struct PullRequestFile {
    filename: String,
}

impl GitHubClient {
    /// Create a client authenticating with `token` against `base_url`
    /// (normally [`DEFAULT_API_URL`]).
    pub fn new(token: &str, base_url: &str) -> Result<Self, TransportError> {
        let mut auth = HeaderValue::from_str(&format!("Bearer {token}"))
            .map_err(|_| TransportError::InvalidToken)?;
        auth.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, auth);
        headers.insert(
            ACCEPT,
            HeaderValue::from_static("application/vnd.github+json"),
        );
        headers.insert("x-github-api-version", HeaderValue::from_static(API_VERSION));

        let http = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .default_headers(headers)
            .build()
            .map_err(TransportError::Client)?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_owned(),
        })
    }

    /// Post a comment on an issue or pull request.
    pub async fn create_issue_comment(
        &self,
        owner: &str,
        repo: &str,
        number: u64,
        body: &str,
    ) -> Result<(), TransportError> {
        let url = format!(
            "{}/repos/{owner}/{repo}/issues/{number}/comments",
            self.base_url
        );
        debug!("POST {url}");
        let response = self
            .http
            .post(&url)
            .json(&CommentRequest { body })
            .send()
            .await?;
        error_for_status(response).await?;
        Ok(())
    }

    /// Names of every file changed by a pull request, following pagination.
    pub async fn list_pull_request_files(
        &self,
        owner: &str,
        repo: &str,
        number: u64,
    ) -> Result<Vec<String>, TransportError> {
        let mut files = Vec::new();
        for page in 1.. {
            let url = format!(
                "{}/repos/{owner}/{repo}/pulls/{number}/files?per_page={FILES_PER_PAGE}&page={page}",
                self.base_url
            );
            debug!("GET {url}");
            let response = error_for_status(self.http.get(&url).send().await?).await?;
            let entries: Vec<PullRequestFile> = response.json().await?;

            let last_page = entries.len() < FILES_PER_PAGE;
            files.extend(entries.into_iter().map(|file| file.filename));
            if last_page {
                break;
            }
        }
        Ok(files)
    }
}

async fn error_for_status(response: Response) -> Result<Response, TransportError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(TransportError::Status {
        status: status.as_u16(),
        body,
    })
}
