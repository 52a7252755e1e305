//! Epic records: the items a backlog forecast is computed over.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::sizing::{PointMap, TShirtSize};

/// Delivery status of an epic.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum EpicStatus {
    Backlog,
    InProgress,
    Completed,
}

/// Where an epic came from.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum EpicSource {
    Jira,
    Trello,
    Template,
}

/// A prioritized unit of work sized with a T-shirt label.
///
/// `original_size` is a snapshot of the first estimate and never changes
/// after creation; the working estimate lives in `current_size`. The two
/// diverging is what the UI surfaces as a "modified" marker, and
/// [`Epic::reset_size`] collapses them again.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Epic {
    pub id: String,
    pub team_id: String,
    /// Id in the external tracker for Jira/Trello imports.
    pub external_id: Option<String>,
    pub title: String,
    pub description: String,
    pub original_size: TShirtSize,
    pub current_size: TShirtSize,
    pub status: EpicStatus,
    pub source: EpicSource,
    pub is_template: bool,
    /// Backlog rank; lower sorts earlier. Ties break by id.
    pub priority: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Epic {
    /// Whether the working estimate differs from the original one.
    pub fn is_modified(&self) -> bool {
        self.current_size != self.original_size
    }

    /// Restore the working estimate to the original snapshot.
    pub fn reset_size(&mut self) {
        self.current_size = self.original_size;
    }

    /// Story points for the current size under the given mapping.
    pub fn points(&self, points: &PointMap) -> i64 {
        points.points_for(self.current_size) as i64
    }
}

/// Partial update for a stored epic, `None` fields left untouched.
///
/// `original_size` is deliberately absent: the first estimate is immutable.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EpicUpdate {
    pub title: Option<String>,
    pub description: Option<String>,
    pub current_size: Option<TShirtSize>,
    pub status: Option<EpicStatus>,
    pub priority: Option<i64>,
}

/// A not-yet-persisted epic, as produced by manual entry or CSV import.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EpicDraft {
    pub title: String,
    pub description: String,
    pub size: TShirtSize,
    pub source: EpicSource,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn epic(original: TShirtSize, current: TShirtSize) -> Epic {
        Epic {
            id: "e1".to_string(),
            team_id: "team-1".to_string(),
            external_id: None,
            title: "SSO Implementation".to_string(),
            description: "Integrate with Okta".to_string(),
            original_size: original,
            current_size: current,
            status: EpicStatus::Backlog,
            source: EpicSource::Jira,
            is_template: false,
            priority: 0,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn modified_tracks_size_divergence() {
        let mut epic = epic(TShirtSize::M, TShirtSize::L);
        assert!(epic.is_modified());
        epic.reset_size();
        assert!(!epic.is_modified());
        assert_eq!(epic.current_size, TShirtSize::M);
    }

    #[test]
    fn status_serializes_kebab_case() {
        let json = serde_json::to_string(&EpicStatus::InProgress).unwrap();
        assert_eq!(json, "\"in-progress\"");
    }

    #[test]
    fn points_use_current_size() {
        let map = PointMap::from_mappings(&crate::sizing::default_mappings());
        let epic = epic(TShirtSize::M, TShirtSize::S);
        assert_eq!(epic.points(&map), 20);
    }
}
