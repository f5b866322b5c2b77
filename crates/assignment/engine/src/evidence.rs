//! Activity evidence and completion rules.
//!
//! Owns the one-way lock: a completed activity locks immediately, and a
//! locked activity rejects every further write. Evidence requirements
//! depend on the activity's evidence type: a file must already be
//! uploaded, a report needs non-blank text (inline or pre-submitted).

use assignment_types::{
    ActivityStatus, AssignmentActivity, EvidenceType, UserId, WorkflowError, WorkflowResult,
};
use chrono::Utc;

/// What a completion call actually did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CompletionOutcome {
    /// The activity transitioned Pending -> Completed and locked.
    Completed,
    /// The activity was already completed; nothing changed and no
    /// events should be re-emitted.
    AlreadyCompleted,
}

/// Validates and records evidence submission and completion for one
/// activity.
pub struct ActivityEvidenceManager;

impl ActivityEvidenceManager {
    /// Complete an activity. Idempotent on repeat calls; otherwise the
    /// evidence gate for the activity's type must hold.
    pub fn complete(
        activity: &mut AssignmentActivity,
        actor: &UserId,
        report_text: Option<&str>,
    ) -> WorkflowResult<CompletionOutcome> {
        if activity.status == ActivityStatus::Completed {
            return Ok(CompletionOutcome::AlreadyCompleted);
        }
        if activity.locked {
            return Err(WorkflowError::ActivityLocked(activity.id.clone()));
        }

        match activity.evidence_type {
            EvidenceType::Report => match report_text {
                Some(text) if !text.trim().is_empty() => {
                    activity.evidence_report = Some(text.to_string());
                    if !activity.evidence_submitted {
                        activity.evidence_submitted_at = Some(Utc::now());
                        activity.evidence_submitted_by = Some(actor.clone());
                    }
                    activity.evidence_submitted = true;
                }
                // no new text: fall back to a previously submitted report
                _ if activity.evidence_submitted && activity.evidence_report.is_some() => {}
                _ => {
                    return Err(WorkflowError::Validation(
                        "completing a report activity requires non-blank report text".to_string(),
                    ));
                }
            },
            EvidenceType::File => {
                if !activity.evidence_submitted {
                    return Err(WorkflowError::InvalidState(
                        "a file must be uploaded before this activity can be completed"
                            .to_string(),
                    ));
                }
            }
        }

        activity.status = ActivityStatus::Completed;
        activity.completed_at = Some(Utc::now());
        activity.completed_by = Some(actor.clone());
        activity.locked = true;
        Ok(CompletionOutcome::Completed)
    }

    /// Record report text outside of completion. Returns true when this
    /// is the activity's first evidence submission, which is the only
    /// time an evidence event fires.
    pub fn submit_report(
        activity: &mut AssignmentActivity,
        actor: &UserId,
        text: &str,
    ) -> WorkflowResult<bool> {
        if activity.locked {
            return Err(WorkflowError::ActivityLocked(activity.id.clone()));
        }
        if activity.evidence_type != EvidenceType::Report {
            return Err(WorkflowError::InvalidState(
                "activity does not take report evidence".to_string(),
            ));
        }
        if text.trim().is_empty() {
            return Err(WorkflowError::Validation(
                "report text must not be blank".to_string(),
            ));
        }

        let first_submission = !activity.evidence_submitted;
        activity.evidence_report = Some(text.to_string());
        activity.evidence_submitted = true;
        activity.evidence_submitted_at = Some(Utc::now());
        activity.evidence_submitted_by = Some(actor.clone());
        Ok(first_submission)
    }

    /// Validation half of [`Self::attach_file`], with no writes. Callers
    /// can run it before the upload itself happens.
    pub fn ensure_file_attachable(activity: &AssignmentActivity) -> WorkflowResult<()> {
        if activity.locked {
            return Err(WorkflowError::ActivityLocked(activity.id.clone()));
        }
        if activity.evidence_type != EvidenceType::File {
            return Err(WorkflowError::InvalidState(
                "activity does not take file evidence".to_string(),
            ));
        }
        Ok(())
    }

    /// Record an uploaded file reference. Re-uploads before locking
    /// overwrite the reference. Returns true on the first submission.
    pub fn attach_file(
        activity: &mut AssignmentActivity,
        actor: &UserId,
        reference: String,
    ) -> WorkflowResult<bool> {
        Self::ensure_file_attachable(activity)?;

        let first_submission = !activity.evidence_submitted;
        activity.evidence_file_path = Some(reference);
        activity.evidence_submitted = true;
        activity.evidence_submitted_at = Some(Utc::now());
        activity.evidence_submitted_by = Some(actor.clone());
        Ok(first_submission)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report_activity() -> AssignmentActivity {
        AssignmentActivity::new("write summary", "", EvidenceType::Report, 1)
    }

    fn file_activity() -> AssignmentActivity {
        AssignmentActivity::new("upload photo", "", EvidenceType::File, 1)
    }

    fn actor() -> UserId {
        UserId::new("assignee")
    }

    #[test]
    fn test_report_completion_requires_text() {
        let mut activity = report_activity();
        let result = ActivityEvidenceManager::complete(&mut activity, &actor(), Some("  "));
        assert!(matches!(result, Err(WorkflowError::Validation(_))));
        assert_eq!(activity.status, ActivityStatus::Pending);

        let outcome =
            ActivityEvidenceManager::complete(&mut activity, &actor(), Some("done")).unwrap();
        assert_eq!(outcome, CompletionOutcome::Completed);
        assert!(activity.locked);
        assert_eq!(activity.evidence_report.as_deref(), Some("done"));
        assert!(activity.completed_by.is_some());
    }

    #[test]
    fn test_report_completion_falls_back_to_submitted_text() {
        let mut activity = report_activity();
        let first = ActivityEvidenceManager::submit_report(&mut activity, &actor(), "findings")
            .unwrap();
        assert!(first);

        let outcome = ActivityEvidenceManager::complete(&mut activity, &actor(), None).unwrap();
        assert_eq!(outcome, CompletionOutcome::Completed);
        assert_eq!(activity.evidence_report.as_deref(), Some("findings"));
    }

    #[test]
    fn test_file_completion_requires_prior_upload() {
        let mut activity = file_activity();
        let result = ActivityEvidenceManager::complete(&mut activity, &actor(), None);
        assert!(matches!(result, Err(WorkflowError::InvalidState(_))));

        let first =
            ActivityEvidenceManager::attach_file(&mut activity, &actor(), "evidence://x/a.jpg".into())
                .unwrap();
        assert!(first);

        let outcome = ActivityEvidenceManager::complete(&mut activity, &actor(), None).unwrap();
        assert_eq!(outcome, CompletionOutcome::Completed);
    }

    #[test]
    fn test_repeat_completion_is_idempotent() {
        let mut activity = report_activity();
        ActivityEvidenceManager::complete(&mut activity, &actor(), Some("done")).unwrap();
        let completed_at = activity.completed_at;

        let outcome = ActivityEvidenceManager::complete(&mut activity, &actor(), Some("again"))
            .unwrap();
        assert_eq!(outcome, CompletionOutcome::AlreadyCompleted);
        // nothing changed on the repeat call
        assert_eq!(activity.completed_at, completed_at);
        assert_eq!(activity.evidence_report.as_deref(), Some("done"));
    }

    #[test]
    fn test_locked_activity_rejects_all_writes() {
        let mut activity = report_activity();
        ActivityEvidenceManager::complete(&mut activity, &actor(), Some("done")).unwrap();

        assert!(matches!(
            ActivityEvidenceManager::submit_report(&mut activity, &actor(), "more"),
            Err(WorkflowError::ActivityLocked(_))
        ));

        let mut file = file_activity();
        ActivityEvidenceManager::attach_file(&mut file, &actor(), "evidence://x/a".into()).unwrap();
        ActivityEvidenceManager::complete(&mut file, &actor(), None).unwrap();
        assert!(matches!(
            ActivityEvidenceManager::attach_file(&mut file, &actor(), "evidence://x/b".into()),
            Err(WorkflowError::ActivityLocked(_))
        ));
        assert!(matches!(
            ActivityEvidenceManager::ensure_file_attachable(&file),
            Err(WorkflowError::ActivityLocked(_))
        ));
    }

    #[test]
    fn test_reupload_overwrites_reference_until_locked() {
        let mut activity = file_activity();
        let first =
            ActivityEvidenceManager::attach_file(&mut activity, &actor(), "evidence://1".into())
                .unwrap();
        let second =
            ActivityEvidenceManager::attach_file(&mut activity, &actor(), "evidence://2".into())
                .unwrap();
        assert!(first);
        assert!(!second);
        assert_eq!(activity.evidence_file_path.as_deref(), Some("evidence://2"));
    }

    #[test]
    fn test_evidence_type_mismatch() {
        let mut report = report_activity();
        assert!(matches!(
            ActivityEvidenceManager::attach_file(&mut report, &actor(), "evidence://x".into()),
            Err(WorkflowError::InvalidState(_))
        ));

        let mut file = file_activity();
        assert!(matches!(
            ActivityEvidenceManager::submit_report(&mut file, &actor(), "text"),
            Err(WorkflowError::InvalidState(_))
        ));
    }
}
