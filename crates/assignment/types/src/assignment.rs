//! Assignments: units of delegated work
//!
//! An Assignment is the aggregate root of the workflow: the status state
//! machine, the bounded progress percentage, the activity checklist, and
//! the optional final report all live and are mutated together.

use crate::{ActivityId, AssignmentActivity, AssignmentFinalReport, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Unique identifier for an assignment
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AssignmentId(pub String);

impl AssignmentId {
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn short(&self) -> &str {
        &self.0[..8.min(self.0.len())]
    }
}

impl std::fmt::Display for AssignmentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Priority of an assignment, set by the assigner at creation
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
    Urgent,
}

/// The lifecycle status of an assignment
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum AssignmentStatus {
    /// Created, no work recorded yet
    #[default]
    Pending,
    /// Work underway (also the state after a rejection or reopen)
    InProgress,
    /// Final report submitted, awaiting the assigner's review
    UnderReview,
    /// Approved, or manually driven to 100% progress
    Completed,
    /// Past its due date without completion (overlay on in-progress work)
    Overdue,
    /// Terminal; cancelled by an authorized caller
    Cancelled,
}

impl AssignmentStatus {
    /// Whether the checklist may still be extended or worked on
    pub fn allows_activity_changes(&self) -> bool {
        !matches!(self, Self::Completed | Self::Cancelled)
    }

    /// Cancellation is reachable from every state except the two below
    pub fn is_cancellable(&self) -> bool {
        !matches!(self, Self::Completed | Self::Cancelled)
    }

    /// Whether the overdue sweep may claim this assignment
    pub fn is_sweepable(&self) -> bool {
        !matches!(self, Self::Completed | Self::Cancelled | Self::Overdue)
    }
}

/// A unit of delegated work: the workflow aggregate root
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Assignment {
    pub id: AssignmentId,
    pub title: String,
    pub description: String,
    pub priority: Priority,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<DateTime<Utc>>,
    pub status: AssignmentStatus,
    /// Always within 0..=100; values >= 90 belong to the review path
    pub progress_percentage: u8,
    /// When false, progress is derived from activities and manual
    /// updates are rejected
    pub manual_progress_allowed: bool,
    /// Owner of the work
    pub assignee: UserId,
    /// Creator and reviewer
    pub assigner: UserId,
    /// Ordered checklist, sorted by `order_index`
    pub activities: Vec<AssignmentActivity>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub final_report: Option<AssignmentFinalReport>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed_date: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub review_started_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub approved_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rejected_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Optimistic-concurrency token, bumped by the store on every commit
    pub version: u64,
}

impl Assignment {
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        assignee: UserId,
        assigner: UserId,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: AssignmentId::generate(),
            title: title.into(),
            description: description.into(),
            priority: Priority::default(),
            due_date: None,
            status: AssignmentStatus::Pending,
            progress_percentage: 0,
            manual_progress_allowed: false,
            assignee,
            assigner,
            activities: Vec::new(),
            final_report: None,
            completed_date: None,
            review_started_at: None,
            approved_at: None,
            rejected_at: None,
            created_at: now,
            updated_at: now,
            version: 1,
        }
    }

    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    pub fn with_due_date(mut self, due_date: DateTime<Utc>) -> Self {
        self.due_date = Some(due_date);
        self
    }

    pub fn with_manual_progress(mut self, allowed: bool) -> Self {
        self.manual_progress_allowed = allowed;
        self
    }

    // ── Query methods ────────────────────────────────────────────────

    /// Whether the actor is one of the two parties to this assignment
    pub fn is_party(&self, actor: &UserId) -> bool {
        actor == &self.assignee || actor == &self.assigner
    }

    /// Both parties, deduplicated (self-assignment is legal)
    pub fn parties(&self) -> Vec<UserId> {
        if self.assignee == self.assigner {
            vec![self.assignee.clone()]
        } else {
            vec![self.assignee.clone(), self.assigner.clone()]
        }
    }

    pub fn activity(&self, id: &ActivityId) -> Option<&AssignmentActivity> {
        self.activities.iter().find(|a| &a.id == id)
    }

    pub fn activity_mut(&mut self, id: &ActivityId) -> Option<&mut AssignmentActivity> {
        self.activities.iter_mut().find(|a| &a.id == id)
    }

    pub fn total_activities(&self) -> usize {
        self.activities.len()
    }

    pub fn completed_activities(&self) -> usize {
        self.activities.iter().filter(|a| a.is_completed()).count()
    }

    /// Vacuously true when the checklist is empty
    pub fn all_activities_completed(&self) -> bool {
        self.activities.iter().all(|a| a.is_completed())
    }

    /// Order index for a newly added activity when the caller gave none:
    /// max(existing) + 1, or 1 for the first activity
    pub fn next_order_index(&self) -> u32 {
        self.activities
            .iter()
            .map(|a| a.order_index)
            .max()
            .map(|m| m + 1)
            .unwrap_or(1)
    }

    /// Insert an activity keeping the checklist sorted by order index
    pub fn push_activity(&mut self, activity: AssignmentActivity) {
        self.activities.push(activity);
        self.activities.sort_by_key(|a| a.order_index);
    }

    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::EvidenceType;

    fn make_assignment() -> Assignment {
        Assignment::new(
            "Quarterly stock count",
            "Count warehouse A",
            UserId::new("assignee"),
            UserId::new("assigner"),
        )
    }

    #[test]
    fn test_new_assignment_defaults() {
        let a = make_assignment();
        assert_eq!(a.status, AssignmentStatus::Pending);
        assert_eq!(a.progress_percentage, 0);
        assert_eq!(a.version, 1);
        assert!(a.final_report.is_none());
        assert!(a.all_activities_completed());
    }

    #[test]
    fn test_party_checks() {
        let a = make_assignment();
        assert!(a.is_party(&UserId::new("assignee")));
        assert!(a.is_party(&UserId::new("assigner")));
        assert!(!a.is_party(&UserId::new("stranger")));
        assert_eq!(a.parties().len(), 2);

        let self_assigned = Assignment::new("t", "", UserId::new("u"), UserId::new("u"));
        assert_eq!(self_assigned.parties().len(), 1);
    }

    #[test]
    fn test_order_index_tie_break() {
        let mut a = make_assignment();
        assert_eq!(a.next_order_index(), 1);

        a.push_activity(AssignmentActivity::new("one", "", EvidenceType::Report, 5));
        assert_eq!(a.next_order_index(), 6);

        a.push_activity(AssignmentActivity::new("two", "", EvidenceType::Report, 2));
        // Checklist stays sorted by order index
        assert_eq!(a.activities[0].order_index, 2);
        assert_eq!(a.activities[1].order_index, 5);
    }

    #[test]
    fn test_status_gates() {
        assert!(AssignmentStatus::Pending.allows_activity_changes());
        assert!(AssignmentStatus::Overdue.allows_activity_changes());
        assert!(!AssignmentStatus::Completed.allows_activity_changes());
        assert!(!AssignmentStatus::Cancelled.allows_activity_changes());

        assert!(AssignmentStatus::InProgress.is_sweepable());
        assert!(!AssignmentStatus::Overdue.is_sweepable());
        assert!(!AssignmentStatus::Completed.is_cancellable());
    }

    #[test]
    fn test_completion_counts() {
        let mut a = make_assignment();
        a.push_activity(AssignmentActivity::new("one", "", EvidenceType::Report, 1));
        a.push_activity(AssignmentActivity::new("two", "", EvidenceType::Report, 2));
        assert_eq!(a.total_activities(), 2);
        assert_eq!(a.completed_activities(), 0);
        assert!(!a.all_activities_completed());

        let id = a.activities[0].id.clone();
        a.activity_mut(&id).unwrap().status = crate::ActivityStatus::Completed;
        assert_eq!(a.completed_activities(), 1);
    }
}
