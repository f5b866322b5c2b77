//! Assignment activities: the evidence-gated checklist steps
//!
//! An activity belongs to exactly one assignment. It completes exactly
//! once, at which point it locks: no field of a locked activity may
//! change again.

use crate::UserId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Unique identifier for an assignment activity
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ActivityId(pub String);

impl ActivityId {
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }
}

impl std::fmt::Display for ActivityId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// What kind of evidence an activity demands before completion
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum EvidenceType {
    /// A file must be uploaded before the activity can be completed
    File,
    /// Non-blank report text must accompany (or precede) completion
    Report,
}

/// Status of an activity. Completes exactly once, no reversal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum ActivityStatus {
    #[default]
    Pending,
    Completed,
}

/// One checklist step belonging to an assignment
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AssignmentActivity {
    pub id: ActivityId,
    pub title: String,
    pub description: String,
    /// Position within the assignment's ordered checklist
    pub order_index: u32,
    pub evidence_type: EvidenceType,
    pub status: ActivityStatus,
    /// Once true, every further write is rejected
    pub locked: bool,
    pub evidence_submitted: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub evidence_report: Option<String>,
    /// Opaque reference into the evidence blob store
    #[serde(skip_serializing_if = "Option::is_none")]
    pub evidence_file_path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub evidence_submitted_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub evidence_submitted_by: Option<UserId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed_by: Option<UserId>,
    pub created_at: DateTime<Utc>,
}

impl AssignmentActivity {
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        evidence_type: EvidenceType,
        order_index: u32,
    ) -> Self {
        Self {
            id: ActivityId::generate(),
            title: title.into(),
            description: description.into(),
            order_index,
            evidence_type,
            status: ActivityStatus::Pending,
            locked: false,
            evidence_submitted: false,
            evidence_report: None,
            evidence_file_path: None,
            evidence_submitted_at: None,
            evidence_submitted_by: None,
            completed_at: None,
            completed_by: None,
            created_at: Utc::now(),
        }
    }

    pub fn is_completed(&self) -> bool {
        self.status == ActivityStatus::Completed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_activity_defaults() {
        let activity = AssignmentActivity::new("Collect invoices", "", EvidenceType::File, 1);
        assert_eq!(activity.status, ActivityStatus::Pending);
        assert!(!activity.locked);
        assert!(!activity.evidence_submitted);
        assert!(!activity.is_completed());
        assert_eq!(activity.order_index, 1);
    }
}
