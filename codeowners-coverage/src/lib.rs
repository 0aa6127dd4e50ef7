pub mod context;
pub mod coverage;
pub mod error;
pub mod github;
pub mod loader;
pub mod parser;
pub mod patternset;
pub mod report;

pub use context::{read_pull_request, read_required_context, PullRequest, RequiredContext};
pub use coverage::{check_coverage, check_coverage_report, CoverageReport};
pub use error::{ConfigError, TransportError};
pub use github::GitHubClient;
pub use loader::{load_rules, LoadOptions, DEFAULT_CODEOWNERS_PATH};
pub use report::{post_comment, ReportOptions};
