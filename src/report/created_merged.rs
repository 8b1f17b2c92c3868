use serde_json::json;

use super::{Report, ReportContext, ReportError};
use crate::aggregator::{format_data, StatsAggregator};
use crate::source::DataSource;

/// Opened and merged pull requests per day, as two chart series.
pub struct CreatedMergedPrsReport<'a, D> {
    aggregator: StatsAggregator<'a, D>,
}

impl<'a, D: DataSource> CreatedMergedPrsReport<'a, D> {
    pub fn new(source: &'a D) -> Self {
        Self {
            aggregator: StatsAggregator::new(source),
        }
    }
}

impl<D: DataSource> Report for CreatedMergedPrsReport<'_, D> {
    const TEMPLATE: &'static str = "created_merged_prs.html";
    const OUTPUT_FILENAME: &'static str = "created_merged_prs_report.html";

    fn name(&self) -> &'static str {
        "created_merged_prs"
    }

    async fn context(&self) -> Result<ReportContext, ReportError> {
        let created_prs = format_data(&self.aggregator.prs_opened_by_day().await?);
        let merged_prs = format_data(&self.aggregator.prs_merged_by_day().await?);

        Ok(json!({
            "created_prs": created_prs,
            "merged_prs": merged_prs,
        }))
    }
}
