use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::Suggestion;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SuggestionStatus {
    Pending,
    Implemented,
    Dismissed,
}

/// A suggestion as handed to storage. Status belongs to the caller; the
/// engine never reads or writes it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredSuggestion {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub status: SuggestionStatus,
    pub implemented_at: Option<DateTime<Utc>>,
    #[serde(flatten)]
    pub suggestion: Suggestion,
}

impl StoredSuggestion {
    pub fn pending(suggestion: Suggestion, created_at: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            created_at,
            status: SuggestionStatus::Pending,
            implemented_at: None,
            suggestion,
        }
    }

    pub fn set_status(&mut self, status: SuggestionStatus, at: DateTime<Utc>) {
        self.implemented_at = match status {
            SuggestionStatus::Implemented => Some(at),
            _ => None,
        };
        self.status = status;
    }
}

pub fn pending(records: &[StoredSuggestion]) -> impl Iterator<Item = &StoredSuggestion> {
    records
        .iter()
        .filter(|record| record.status == SuggestionStatus::Pending)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Priority, SuggestionKind};
    use chrono::Duration;

    fn stored(id: &str) -> StoredSuggestion {
        let suggestion = Suggestion::for_video(
            id,
            SuggestionKind::Thumbnail,
            Priority::Urgent,
            "Add a custom thumbnail",
            "Auto-generated thumbnails perform poorly",
        );
        StoredSuggestion::pending(suggestion, Utc::now())
    }

    #[test]
    fn new_records_start_pending() {
        let record = stored("v1");
        assert_eq!(record.status, SuggestionStatus::Pending);
        assert!(record.implemented_at.is_none());
        assert_ne!(record.id, stored("v1").id);
    }

    #[test]
    fn implementing_stamps_and_reverting_clears() {
        let mut record = stored("v1");
        let at = Utc::now() + Duration::days(2);

        record.set_status(SuggestionStatus::Implemented, at);
        assert_eq!(record.implemented_at, Some(at));

        record.set_status(SuggestionStatus::Dismissed, at);
        assert_eq!(record.status, SuggestionStatus::Dismissed);
        assert!(record.implemented_at.is_none());
    }

    #[test]
    fn pending_filter_skips_resolved_records() {
        let mut records = vec![stored("a"), stored("b"), stored("c")];
        records[1].set_status(SuggestionStatus::Dismissed, Utc::now());

        let ids: Vec<&str> = pending(&records)
            .filter_map(|record| record.suggestion.video_id.as_deref())
            .collect();
        assert_eq!(ids, vec!["a", "c"]);
    }

    #[test]
    fn serializes_flat_with_status() {
        let value = serde_json::to_value(stored("v9")).unwrap();
        assert_eq!(value["status"], "pending");
        assert_eq!(value["type"], "thumbnail");
        assert_eq!(value["video_id"], "v9");
    }
}
