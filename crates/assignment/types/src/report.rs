//! Final reports: the review artifact closing out an assignment
//!
//! A final report is one-to-one with its assignment and is created on
//! first submission. It cannot exist unless every sibling activity is
//! completed; the engine enforces that gate.

use crate::UserId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Review status of a final report
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum ReportStatus {
    /// Submitted and awaiting review
    #[default]
    Submitted,
    /// Rejected and returned for rework
    Returned,
    /// Accepted by the reviewer
    Approved,
}

/// The final report submitted for an assignment
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AssignmentFinalReport {
    pub report_text: String,
    /// Opaque reference into the evidence blob store, if a file was attached
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_path: Option<String>,
    pub status: ReportStatus,
    pub submitted_by: UserId,
    pub submitted_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reviewed_by: Option<UserId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reviewed_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reviewer_comments: Option<String>,
}

impl AssignmentFinalReport {
    pub fn new(
        report_text: impl Into<String>,
        file_path: Option<String>,
        submitted_by: UserId,
    ) -> Self {
        Self {
            report_text: report_text.into(),
            file_path,
            status: ReportStatus::Submitted,
            submitted_by,
            submitted_at: Utc::now(),
            reviewed_by: None,
            reviewed_at: None,
            reviewer_comments: None,
        }
    }

    /// Overwrite the submission content on a resubmission. Review fields
    /// are reset so the new revision goes back through the cycle.
    pub fn resubmit(&mut self, report_text: impl Into<String>, file_path: Option<String>, by: UserId) {
        self.report_text = report_text.into();
        if file_path.is_some() {
            self.file_path = file_path;
        }
        self.status = ReportStatus::Submitted;
        self.submitted_by = by;
        self.submitted_at = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_report() {
        let report = AssignmentFinalReport::new("all done", None, UserId::new("u-1"));
        assert_eq!(report.status, ReportStatus::Submitted);
        assert!(report.reviewed_by.is_none());
    }

    #[test]
    fn test_resubmit_resets_review_cycle() {
        let mut report = AssignmentFinalReport::new("v1", None, UserId::new("u-1"));
        report.status = ReportStatus::Returned;
        report.reviewer_comments = Some("needs more detail".into());

        report.resubmit("v2", Some("evidence://ref".into()), UserId::new("u-1"));
        assert_eq!(report.status, ReportStatus::Submitted);
        assert_eq!(report.report_text, "v2");
        assert_eq!(report.file_path.as_deref(), Some("evidence://ref"));
    }

    #[test]
    fn test_resubmit_keeps_existing_attachment() {
        let mut report =
            AssignmentFinalReport::new("v1", Some("evidence://first".into()), UserId::new("u-1"));
        report.resubmit("v2", None, UserId::new("u-1"));
        assert_eq!(report.file_path.as_deref(), Some("evidence://first"));
    }
}
