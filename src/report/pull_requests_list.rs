use serde_json::json;
use tracing::debug;

use super::{Report, ReportContext, ReportError};
use crate::source::DataSource;

/// Every pull request, exactly as the data source returns it.
pub struct PullRequestsListReport<'a, D> {
    source: &'a D,
}

impl<'a, D: DataSource> PullRequestsListReport<'a, D> {
    pub fn new(source: &'a D) -> Self {
        Self { source }
    }
}

impl<D: DataSource> Report for PullRequestsListReport<'_, D> {
    const TEMPLATE: &'static str = "pull_requests_list.html";
    const OUTPUT_FILENAME: &'static str = "pull_requests_list_report.html";

    fn name(&self) -> &'static str {
        "pull_requests_list"
    }

    async fn context(&self) -> Result<ReportContext, ReportError> {
        let pull_requests = self.source.pull_requests().await?;
        debug!(count = pull_requests.len(), "Building pull request list context");

        Ok(json!({
            "pull_requests": pull_requests,
        }))
    }
}
