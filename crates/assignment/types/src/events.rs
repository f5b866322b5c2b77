//! Semantic workflow events
//!
//! Every successful transition emits exactly one event per semantic
//! action to the audit and notification channels. The set is closed so
//! downstream consumers can match exhaustively.

use serde::{Deserialize, Serialize};

/// The closed set of semantic actions an assignment can go through
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WorkflowEvent {
    /// Assignment created by the assigner
    Created,
    /// First work recorded; Pending promoted to InProgress
    Started,
    /// One checklist activity completed and locked
    ActivityCompleted,
    /// Evidence attached to an activity for the first time
    EvidenceSubmitted,
    /// Progress percentage changed (manual or derived)
    ProgressUpdated,
    /// Final report submitted; assignment moved under review
    FinalReportSubmitted,
    /// Reviewer accepted the final report
    Approved,
    /// Reviewer rejected the final report (returned or resubmittable)
    Rejected,
    /// Completed assignment reopened for more work
    Reopened,
    /// Assignment cancelled
    Cancelled,
    /// Due date passed without completion
    Overdue,
}

impl WorkflowEvent {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Created => "assignment_created",
            Self::Started => "assignment_started",
            Self::ActivityCompleted => "activity_completed",
            Self::EvidenceSubmitted => "evidence_submitted",
            Self::ProgressUpdated => "progress_updated",
            Self::FinalReportSubmitted => "final_report_submitted",
            Self::Approved => "assignment_approved",
            Self::Rejected => "assignment_rejected",
            Self::Reopened => "assignment_reopened",
            Self::Cancelled => "assignment_cancelled",
            Self::Overdue => "assignment_overdue",
        }
    }
}

impl std::fmt::Display for WorkflowEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_names_are_distinct() {
        let all = [
            WorkflowEvent::Created,
            WorkflowEvent::Started,
            WorkflowEvent::ActivityCompleted,
            WorkflowEvent::EvidenceSubmitted,
            WorkflowEvent::ProgressUpdated,
            WorkflowEvent::FinalReportSubmitted,
            WorkflowEvent::Approved,
            WorkflowEvent::Rejected,
            WorkflowEvent::Reopened,
            WorkflowEvent::Cancelled,
            WorkflowEvent::Overdue,
        ];
        let names: std::collections::HashSet<_> = all.iter().map(|e| e.as_str()).collect();
        assert_eq!(names.len(), all.len());
    }
}
