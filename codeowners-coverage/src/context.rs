//! Reads what the check needs from the GitHub Actions environment: the API
//! token, the pull request number from the event payload, and the repository
//! the pull request belongs to.

use std::{collections::HashMap, fs, path::PathBuf};

use serde_json::Value;

use crate::error::ConfigError;

/// Source of environment variables. Lets the readers below run against a
/// plain map in tests instead of the process environment.
pub trait Environment {
    fn var(&self, key: &str) -> Option<String>;
}

/// The real process environment.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl Environment for ProcessEnv {
    fn var(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }
}

impl Environment for HashMap<String, String> {
    fn var(&self, key: &str) -> Option<String> {
        self.get(key).cloned()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequiredContext {
    pub token: String,
    pub pr_number: u64,
}

/// Coordinates of the pull request under check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PullRequest {
    pub owner: String,
    pub repo: String,
    pub number: u64,
}

fn read_event(env: &impl Environment) -> Result<Value, ConfigError> {
    let path = env
        .var("GITHUB_EVENT_PATH")
        .filter(|path| !path.is_empty())
        .map(PathBuf::from)
        .ok_or(ConfigError::MissingEventPath)?;

    let contents = fs::read_to_string(&path).map_err(|err| ConfigError::ReadEvent {
        path: path.clone(),
        reason: err.to_string(),
    })?;
    serde_json::from_str(&contents).map_err(|err| ConfigError::ReadEvent {
        path,
        reason: err.to_string(),
    })
}

fn read_token(env: &impl Environment) -> Result<String, ConfigError> {
    env.var("GITHUB_TOKEN")
        .filter(|token| !token.is_empty())
        .ok_or(ConfigError::MissingToken)
}

/// Read the API token from `GITHUB_TOKEN` and the pull request number from the
/// event payload at `GITHUB_EVENT_PATH`.
pub fn read_required_context(env: &impl Environment) -> Result<RequiredContext, ConfigError> {
    let token = read_token(env)?;
    let pr_number = read_event(env)?
        .get("number")
        .and_then(Value::as_u64)
        .ok_or(ConfigError::MissingPullRequestNumber)?;
    Ok(RequiredContext { token, pr_number })
}

/// Owner and name of the repository, from `GITHUB_REPOSITORY` (`owner/repo`)
/// or, failing that, from the event payload.
pub fn read_repository(env: &impl Environment) -> Result<(String, String), ConfigError> {
    let from_var = env.var("GITHUB_REPOSITORY").and_then(|full_name| {
        let (owner, repo) = full_name.split_once('/')?;
        if owner.is_empty() || repo.is_empty() || repo.contains('/') {
            return None;
        }
        Some((owner.to_owned(), repo.to_owned()))
    });
    if let Some(repository) = from_var {
        return Ok(repository);
    }

    let event = read_event(env).map_err(|_| ConfigError::MissingRepository)?;
    let field = |pointer: &str| {
        event
            .pointer(pointer)
            .and_then(Value::as_str)
            .filter(|value| !value.is_empty())
            .map(str::to_owned)
    };
    match (field("/repository/owner/login"), field("/repository/name")) {
        (Some(owner), Some(repo)) => Ok((owner, repo)),
        _ => Err(ConfigError::MissingRepository),
    }
}

/// Everything needed to talk to the pull request: the token plus its
/// coordinates.
pub fn read_pull_request(
    env: &impl Environment,
) -> Result<(RequiredContext, PullRequest), ConfigError> {
    let context = read_required_context(env)?;
    let (owner, repo) = read_repository(env)?;
    let pull_request = PullRequest {
        owner,
        repo,
        number: context.pr_number,
    };
    Ok((context, pull_request))
}
