//! Where pull-request records come from.

pub mod snapshot;

use std::path::PathBuf;

use crate::github::PullRequestRecord;

pub use snapshot::{load_records, save_records};

#[derive(thiserror::Error, Debug)]
pub enum SourceError {
    #[error("GitHub API error: {0}")]
    GitHub(#[from] octocrab::Error),

    #[error("pull request #{number} is missing `{field}`")]
    MissingField { number: u64, field: &'static str },

    #[error("failed to access snapshot {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid snapshot {}: {source}", path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Supplies every pull request the reports should cover.
#[allow(async_fn_in_trait)]
pub trait DataSource {
    async fn pull_requests(&self) -> Result<Vec<PullRequestRecord>, SourceError>;
}

impl DataSource for Vec<PullRequestRecord> {
    async fn pull_requests(&self) -> Result<Vec<PullRequestRecord>, SourceError> {
        Ok(self.clone())
    }
}
