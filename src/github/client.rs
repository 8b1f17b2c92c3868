use octocrab::models;
use octocrab::params;
use octocrab::Octocrab;
use tokio::sync::OnceCell;
use tracing::{debug, info};

use super::types::PullRequestRecord;
use crate::source::{DataSource, SourceError};

pub struct GitHubClient {
    client: Octocrab,
    owner: String,
    repo: String,
    pull_requests: OnceCell<Vec<PullRequestRecord>>,
}

impl GitHubClient {
    pub fn new(
        token: Option<String>,
        base_uri: Option<String>,
        owner: String,
        repo: String,
    ) -> Result<Self, SourceError> {
        let mut builder = Octocrab::builder();
        if let Some(token) = token {
            builder = builder.personal_token(token);
        }
        if let Some(base_uri) = base_uri {
            builder = builder.base_uri(base_uri)?;
        }
        let client = builder.build()?;

        Ok(Self {
            client,
            owner,
            repo,
            pull_requests: OnceCell::new(),
        })
    }

    async fn fetch_pull_requests(&self) -> Result<Vec<PullRequestRecord>, SourceError> {
        info!(owner = %self.owner, repo = %self.repo, "Fetching pull requests");

        let first_page = self
            .client
            .pulls(&self.owner, &self.repo)
            .list()
            .state(params::State::All)
            .per_page(100)
            .send()
            .await?;

        let pulls = self.client.all_pages(first_page).await?;
        debug!(count = pulls.len(), "Fetched all pages");

        pulls.into_iter().map(into_record).collect()
    }
}

impl DataSource for GitHubClient {
    async fn pull_requests(&self) -> Result<Vec<PullRequestRecord>, SourceError> {
        let records = self
            .pull_requests
            .get_or_try_init(|| self.fetch_pull_requests())
            .await?;
        Ok(records.clone())
    }
}

fn into_record(pr: models::pulls::PullRequest) -> Result<PullRequestRecord, SourceError> {
    let created_at = pr.created_at.ok_or(SourceError::MissingField {
        number: pr.number,
        field: "created_at",
    })?;

    Ok(PullRequestRecord {
        number: pr.number,
        title: pr.title.unwrap_or_default(),
        author: pr.user.map(|user| user.login),
        html_url: pr.html_url.map(|url| url.to_string()),
        created_at,
        merged_at: pr.merged_at,
        closed_at: pr.closed_at,
    })
}
