use chrono::NaiveDate;
use std::collections::BTreeMap;
use tracing::debug;

use crate::source::{DataSource, SourceError};

/// Number of pull requests per calendar day. Days without activity are absent.
pub type DayCount = BTreeMap<NaiveDate, u64>;

pub struct StatsAggregator<'a, D> {
    source: &'a D,
}

impl<'a, D: DataSource> StatsAggregator<'a, D> {
    pub fn new(source: &'a D) -> Self {
        Self { source }
    }

    /// Pull requests grouped by the (UTC) day they were opened.
    pub async fn prs_opened_by_day(&self) -> Result<DayCount, SourceError> {
        let prs = self.source.pull_requests().await?;
        let counts = count_by_day(prs.iter().map(|pr| pr.created_at.date_naive()));
        debug!(records = prs.len(), days = counts.len(), "Grouped opened pull requests");
        Ok(counts)
    }

    /// Pull requests grouped by the (UTC) day they were merged. Unmerged ones are skipped.
    pub async fn prs_merged_by_day(&self) -> Result<DayCount, SourceError> {
        let prs = self.source.pull_requests().await?;
        let counts = count_by_day(prs.iter().filter_map(|pr| pr.merged_at).map(|at| at.date_naive()));
        debug!(records = prs.len(), days = counts.len(), "Grouped merged pull requests");
        Ok(counts)
    }
}

pub fn count_by_day(days: impl IntoIterator<Item = NaiveDate>) -> DayCount {
    let mut counts = DayCount::new();
    for day in days {
        *counts.entry(day).or_insert(0) += 1;
    }
    counts
}
