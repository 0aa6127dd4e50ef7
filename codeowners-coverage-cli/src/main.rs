use std::{
    convert::Infallible,
    path::{Component, Path, PathBuf},
    process::ExitCode,
};

use anyhow::{bail, Context, Result};
use clap::{ArgAction, Parser};
use codeowners_coverage::{
    check_coverage_report,
    context::{Environment, ProcessEnv},
    github::DEFAULT_API_URL,
    load_rules,
    patternset::Builder,
    post_comment, read_pull_request, CoverageReport, GitHubClient, LoadOptions, ReportOptions,
};
use log::{error, info, warn};

/// Fail when files changed by a pull request have no CODEOWNERS rule.
///
/// Without PATHS the changed files of the pull request in the GitHub Actions
/// event are checked. With PATHS, those files (and everything below those
/// directories) are checked locally instead.
#[derive(Parser)]
#[command(version)]
struct Cli {
    /// Files or directories to check instead of the pull request's changes,
    /// relative to the repository root
    paths: Vec<PathBuf>,

    /// CODEOWNERS file [default: .github/CODEOWNERS]
    #[arg(short = 'f', long = "file", env = "INPUT_FILE")]
    codeowners_file: Option<PathBuf>,

    /// Ignore bare `*` rules, so a catch-all owner doesn't cover everything
    #[arg(
        long,
        env = "INPUT_SKIP_ASTERISK",
        action = ArgAction::Set,
        value_parser = parse_input_flag,
        default_value = "false"
    )]
    skip_asterisk: bool,

    /// Comment on the pull request listing uncovered files
    #[arg(
        long,
        env = "INPUT_POST_COMMENT",
        action = ArgAction::Set,
        value_parser = parse_input_flag,
        default_value = "false"
    )]
    post_comment: bool,

    /// GitHub REST API base URL
    #[arg(long, env = "GITHUB_API_URL", default_value = DEFAULT_API_URL)]
    api_url: String,

    #[arg(short, long)]
    verbose: bool,
}

// Action inputs are strings; only "true" switches a flag on.
fn parse_input_flag(value: &str) -> Result<bool, Infallible> {
    Ok(value.trim() == "true")
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Outcome {
    Covered,
    Uncovered,
}

// 0 when every file is covered, 1 when some are not, 2 for any error.
fn exit_status(result: &Result<Outcome>) -> u8 {
    match result {
        Ok(Outcome::Covered) => 0,
        Ok(Outcome::Uncovered) => 1,
        Err(_) => 2,
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    let result = run(&cli, &ProcessEnv).await;
    if let Err(err) = &result {
        error!("{err:#}");
    }
    ExitCode::from(exit_status(&result))
}

async fn run(cli: &Cli, env: &impl Environment) -> Result<Outcome> {
    let options = LoadOptions {
        skip_asterisk: cli.skip_asterisk,
    };
    let mut builder = Builder::new();
    let added = load_rules(&mut builder, cli.codeowners_file.as_deref(), &options)?;
    info!("loaded {added} CODEOWNERS patterns");
    let matcher = builder.build();

    if !cli.paths.is_empty() {
        let base = std::env::current_dir().context("failed to read the current directory")?;
        let paths = local_paths(&cli.paths, &base)?;
        let report = check_coverage_report(&matcher, &paths);
        print_report(&report);
        return Ok(outcome(&report));
    }

    let (context, pull_request) = read_pull_request(env)?;
    let client = GitHubClient::new(&context.token, &cli.api_url)?;
    let files = client
        .list_pull_request_files(&pull_request.owner, &pull_request.repo, pull_request.number)
        .await
        .context("failed to list pull request files")?;

    let report = check_coverage_report(&matcher, &files);
    print_report(&report);

    let report_options = ReportOptions {
        post_comment: cli.post_comment,
    };
    post_comment(&client, &pull_request, &report.uncovered, &report_options)
        .await
        .context("failed to comment on the pull request")?;

    Ok(outcome(&report))
}

fn outcome(report: &CoverageReport) -> Outcome {
    if report.is_covered() {
        Outcome::Covered
    } else {
        Outcome::Uncovered
    }
}

fn print_report(report: &CoverageReport) {
    if report.is_covered() {
        info!("all {} files are covered by CODEOWNERS", report.checked);
        return;
    }

    warn!(
        "{} of {} files do not have CODEOWNER",
        report.uncovered.len(),
        report.checked
    );
    for path in &report.uncovered {
        println!("{path}");
    }
}

/// Repository-relative paths of the given files, and of every file below the
/// given directories. Relative arguments are taken relative to `base`.
fn local_paths(roots: &[PathBuf], base: &Path) -> Result<Vec<String>> {
    let mut paths = Vec::new();
    for root in roots {
        if !root.exists() {
            bail!("path does not exist: {}", root.display());
        }

        if root.is_dir() {
            for entry in walk_files(root) {
                let entry = entry.with_context(|| format!("failed to walk {}", root.display()))?;
                paths.push(repo_path(entry.path(), base)?);
            }
        } else {
            paths.push(repo_path(root, base)?);
        }
    }
    Ok(paths)
}

fn walk_files(root: &Path) -> impl Iterator<Item = walkdir::Result<walkdir::DirEntry>> {
    walkdir::WalkDir::new(root)
        .min_depth(1)
        .into_iter()
        .filter_entry(|entry| entry.file_name() != ".git")
        .filter(|entry| {
            entry
                .as_ref()
                .map_or(true, |entry| !entry.file_type().is_dir())
        })
}

// CODEOWNERS patterns always use `/`, whatever the platform separator is.
fn repo_path(path: &Path, base: &Path) -> Result<String> {
    let relative = if path.is_absolute() {
        path.strip_prefix(base).with_context(|| {
            format!("{} is outside {}", path.display(), base.display())
        })?
    } else {
        path
    };

    let mut segments = Vec::new();
    for component in relative.components() {
        match component {
            Component::Normal(segment) => segments.push(segment.to_string_lossy()),
            Component::CurDir => {}
            Component::ParentDir if segments.pop().is_some() => {}
            _ => bail!("{} is outside {}", path.display(), base.display()),
        }
    }
    Ok(segments.join("/"))
}
