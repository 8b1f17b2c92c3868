use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The facts about a single pull request that the reports care about.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PullRequestRecord {
    pub number: u64,
    pub title: String,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub html_url: Option<String>,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub merged_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub closed_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PullRequestStatus {
    Open,
    Closed,
    Merged,
}

impl PullRequestRecord {
    pub fn status(&self) -> PullRequestStatus {
        if self.merged_at.is_some() {
            PullRequestStatus::Merged
        } else if self.closed_at.is_some() {
            PullRequestStatus::Closed
        } else {
            PullRequestStatus::Open
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn record(merged: bool, closed: bool) -> PullRequestRecord {
        let at = Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap();
        PullRequestRecord {
            number: 1,
            title: "Add widget".to_string(),
            author: None,
            html_url: None,
            created_at: at,
            merged_at: merged.then_some(at),
            closed_at: closed.then_some(at),
        }
    }

    #[test]
    fn merged_wins_over_closed() {
        assert_eq!(record(true, true).status(), PullRequestStatus::Merged);
        assert_eq!(record(false, true).status(), PullRequestStatus::Closed);
        assert_eq!(record(false, false).status(), PullRequestStatus::Open);
    }

    #[test]
    fn optional_fields_default_when_absent() {
        let record: PullRequestRecord = serde_json::from_str(
            r#"{"number": 7, "title": "Docs", "created_at": "2024-01-02T03:04:05Z"}"#,
        )
        .unwrap();

        assert_eq!(record.number, 7);
        assert!(record.merged_at.is_none());
        assert!(record.author.is_none());
        assert_eq!(record.status(), PullRequestStatus::Open);
    }
}
