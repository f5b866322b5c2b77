//! The assignment workflow engine: the main entry point
//!
//! Every operation takes an actor identity and a target id, loads the
//! aggregate, validates the transition, mutates state, recalculates
//! progress, and emits audit + notification side effects after the
//! commit succeeds.
//!
//! Writes are serialized per aggregate through the store's optimistic
//! version check: on a conflict the engine re-reads and replays the
//! mutation, so two concurrent activity completions never lose each
//! other's recalculated progress.

use crate::adapters::{EvidenceStore, IdentityResolver};
use crate::evidence::{ActivityEvidenceManager, CompletionOutcome};
use crate::outbox::{Outbox, SideEffect};
use crate::progress;
use assignment_types::{
    ActivityId, Assignment, AssignmentActivity, AssignmentFinalReport, AssignmentId,
    AssignmentStatus, EvidenceType, Priority, ReportStatus, User, UserId, WorkflowError,
    WorkflowEvent, WorkflowResult,
};
use assignment_store::{AssignmentStore, QueryWindow, StoreError};
use chrono::{DateTime, Utc};
use serde_json::json;
use std::sync::Arc;

/// Bounded retry budget for optimistic-concurrency conflicts.
const MAX_COMMIT_ATTEMPTS: usize = 4;

/// Request to create an assignment.
#[derive(Clone, Debug)]
pub struct NewAssignment {
    pub title: String,
    pub description: String,
    pub priority: Priority,
    pub due_date: Option<DateTime<Utc>>,
    pub assignee: UserId,
    pub assigner: UserId,
    pub manual_progress_allowed: bool,
}

impl NewAssignment {
    pub fn new(title: impl Into<String>, assignee: UserId, assigner: UserId) -> Self {
        Self {
            title: title.into(),
            description: String::new(),
            priority: Priority::default(),
            due_date: None,
            assignee,
            assigner,
            manual_progress_allowed: false,
        }
    }
}

/// Request to add an activity to an assignment's checklist.
#[derive(Clone, Debug)]
pub struct NewActivity {
    pub title: String,
    pub description: String,
    pub evidence_type: EvidenceType,
    /// Explicit position; defaults to max(existing) + 1
    pub order_index: Option<u32>,
}

impl NewActivity {
    pub fn new(title: impl Into<String>, evidence_type: EvidenceType) -> Self {
        Self {
            title: title.into(),
            description: String::new(),
            evidence_type,
            order_index: None,
        }
    }
}

/// The Assignment Workflow Engine owns the status state machine and
/// composes evidence handling, progress aggregation, and the
/// best-effort side-effect boundary.
#[derive(Clone)]
pub struct AssignmentWorkflowEngine {
    store: Arc<dyn AssignmentStore>,
    identity: Arc<dyn IdentityResolver>,
    evidence: Arc<dyn EvidenceStore>,
    outbox: Outbox,
}

impl AssignmentWorkflowEngine {
    pub fn new(
        store: Arc<dyn AssignmentStore>,
        identity: Arc<dyn IdentityResolver>,
        evidence: Arc<dyn EvidenceStore>,
        outbox: Outbox,
    ) -> Self {
        Self {
            store,
            identity,
            evidence,
            outbox,
        }
    }

    // ── Assignment lifecycle ─────────────────────────────────────────

    /// Create an assignment in Pending with zero progress. Both party
    /// identities must resolve in the directory.
    pub async fn create_assignment(&self, request: NewAssignment) -> WorkflowResult<Assignment> {
        if request.title.trim().is_empty() {
            return Err(WorkflowError::Validation(
                "assignment title must not be blank".to_string(),
            ));
        }
        self.resolve_user(&request.assignee).await?;
        self.resolve_user(&request.assigner).await?;

        let mut assignment = Assignment::new(
            request.title,
            request.description,
            request.assignee,
            request.assigner.clone(),
        )
        .with_priority(request.priority)
        .with_manual_progress(request.manual_progress_allowed);
        if let Some(due) = request.due_date {
            assignment = assignment.with_due_date(due);
        }

        self.store.insert(assignment.clone()).await?;

        tracing::info!(assignment_id = %assignment.id, "Assignment created");
        self.outbox
            .emit(
                &assignment.id,
                vec![
                    SideEffect::audit(
                        WorkflowEvent::Created,
                        &request.assigner,
                        json!({ "status": assignment.status, "progress": 0 }),
                    ),
                    SideEffect::notify(
                        WorkflowEvent::Created,
                        assignment.parties(),
                        json!({ "title": assignment.title }),
                    ),
                ],
            )
            .await;

        Ok(assignment)
    }

    pub async fn get_assignment(&self, id: &AssignmentId) -> WorkflowResult<Assignment> {
        self.store
            .get(id)
            .await?
            .ok_or_else(|| WorkflowError::AssignmentNotFound(id.clone()))
    }

    pub async fn list_assignments(&self, window: QueryWindow) -> WorkflowResult<Vec<Assignment>> {
        Ok(self.store.list(window).await?)
    }

    // ── Activities ───────────────────────────────────────────────────

    /// Add a checklist activity. First activity on a Pending assignment
    /// starts the work.
    pub async fn add_activity(
        &self,
        id: &AssignmentId,
        actor: &UserId,
        request: NewActivity,
    ) -> WorkflowResult<Assignment> {
        if request.title.trim().is_empty() {
            return Err(WorkflowError::Validation(
                "activity title must not be blank".to_string(),
            ));
        }
        self.resolve_user(actor).await?;

        self.commit(id, |assignment| {
            ensure_party(assignment, actor)?;
            if !assignment.status.allows_activity_changes() {
                return Err(WorkflowError::InvalidState(format!(
                    "cannot add activities to a {:?} assignment",
                    assignment.status
                )));
            }

            let order_index = request
                .order_index
                .unwrap_or_else(|| assignment.next_order_index());
            assignment.push_activity(AssignmentActivity::new(
                request.title.clone(),
                request.description.clone(),
                request.evidence_type,
                order_index,
            ));

            let mut effects = Vec::new();
            promote_pending(assignment, actor, &mut effects);
            apply_derived_progress(assignment, actor, &mut effects);
            Ok(Some(effects))
        })
        .await
    }

    /// Complete an activity, enforcing its evidence gate, then derive
    /// the assignment's new progress. Idempotent on repeat calls.
    pub async fn complete_activity(
        &self,
        id: &AssignmentId,
        activity_id: &ActivityId,
        actor: &UserId,
        report_text: Option<String>,
    ) -> WorkflowResult<Assignment> {
        self.resolve_user(actor).await?;

        self.commit(id, |assignment| {
            ensure_party(assignment, actor)?;
            let activity = assignment
                .activity_mut(activity_id)
                .ok_or_else(|| WorkflowError::ActivityNotFound(activity_id.clone()))?;

            match ActivityEvidenceManager::complete(activity, actor, report_text.as_deref())? {
                CompletionOutcome::AlreadyCompleted => Ok(None),
                CompletionOutcome::Completed => {
                    let mut effects = vec![
                        SideEffect::audit(
                            WorkflowEvent::ActivityCompleted,
                            actor,
                            json!({ "activity_id": activity_id }),
                        ),
                        SideEffect::notify(
                            WorkflowEvent::ActivityCompleted,
                            assignment.parties(),
                            json!({ "activity_id": activity_id }),
                        ),
                    ];
                    promote_pending(assignment, actor, &mut effects);
                    apply_derived_progress(assignment, actor, &mut effects);
                    Ok(Some(effects))
                }
            }
        })
        .await
    }

    /// Store an evidence file and attach its reference to an activity.
    /// The upload is validated against a fresh read first so a rejected
    /// call leaves no orphaned blob behind.
    pub async fn upload_activity_evidence(
        &self,
        id: &AssignmentId,
        activity_id: &ActivityId,
        actor: &UserId,
        bytes: &[u8],
        file_name: &str,
    ) -> WorkflowResult<Assignment> {
        self.resolve_user(actor).await?;

        let preflight = self.get_assignment(id).await?;
        ensure_party(&preflight, actor)?;
        let target = preflight
            .activity(activity_id)
            .ok_or_else(|| WorkflowError::ActivityNotFound(activity_id.clone()))?;
        ActivityEvidenceManager::ensure_file_attachable(target)?;

        let reference = self
            .evidence
            .store(bytes, file_name)
            .await
            .map_err(|e| WorkflowError::Storage(e.to_string()))?;

        self.commit(id, |assignment| {
            ensure_party(assignment, actor)?;
            let activity = assignment
                .activity_mut(activity_id)
                .ok_or_else(|| WorkflowError::ActivityNotFound(activity_id.clone()))?;

            let first = ActivityEvidenceManager::attach_file(activity, actor, reference.clone())?;
            Ok(Some(evidence_effects(first, assignment, activity_id, actor)))
        })
        .await
    }

    /// Record report text as evidence for an activity, outside of
    /// completion.
    pub async fn submit_activity_report(
        &self,
        id: &AssignmentId,
        activity_id: &ActivityId,
        actor: &UserId,
        text: &str,
    ) -> WorkflowResult<Assignment> {
        self.resolve_user(actor).await?;

        self.commit(id, |assignment| {
            ensure_party(assignment, actor)?;
            let activity = assignment
                .activity_mut(activity_id)
                .ok_or_else(|| WorkflowError::ActivityNotFound(activity_id.clone()))?;

            let first = ActivityEvidenceManager::submit_report(activity, actor, text)?;
            Ok(Some(evidence_effects(first, assignment, activity_id, actor)))
        })
        .await
    }

    // ── Progress ─────────────────────────────────────────────────────

    /// Manually set the progress percentage. Manual updates require the
    /// flag or an activity-free assignment, and are rejected outright in
    /// UnderReview and the terminal states, where progress is owned by
    /// the review cycle.
    pub async fn update_progress(
        &self,
        id: &AssignmentId,
        actor: &UserId,
        value: u8,
    ) -> WorkflowResult<Assignment> {
        if value > progress::MAX_PROGRESS {
            return Err(WorkflowError::Validation(format!(
                "progress must be within 0..=100, got {}",
                value
            )));
        }
        self.resolve_user(actor).await?;

        self.commit(id, |assignment| {
            ensure_party(assignment, actor)?;
            if assignment.status == AssignmentStatus::UnderReview
                || !assignment.status.allows_activity_changes()
            {
                return Err(WorkflowError::InvalidState(format!(
                    "progress of a {:?} assignment cannot be set manually",
                    assignment.status
                )));
            }
            let manual_allowed =
                assignment.manual_progress_allowed || assignment.activities.is_empty();
            if !manual_allowed {
                return Err(WorkflowError::InvalidState(
                    "progress is workflow-managed for this assignment".to_string(),
                ));
            }

            let previous = assignment.progress_percentage;
            if previous == value {
                return Ok(None);
            }
            assignment.progress_percentage = value;

            let mut effects = Vec::new();
            if value == progress::MAX_PROGRESS {
                assignment.status = AssignmentStatus::Completed;
                assignment.completed_date = Some(Utc::now());
            } else if value > 0 {
                promote_pending(assignment, actor, &mut effects);
            }
            effects.push(SideEffect::audit(
                WorkflowEvent::ProgressUpdated,
                actor,
                json!({
                    "previous_progress": previous,
                    "new_progress": value,
                    "status": assignment.status,
                    "manual": true,
                }),
            ));
            Ok(Some(effects))
        })
        .await
    }

    // ── Final report review cycle ────────────────────────────────────

    /// Submit (or resubmit) the final report. Requires every activity
    /// completed; floors progress at the review threshold and moves the
    /// assignment under review.
    pub async fn submit_final_report(
        &self,
        id: &AssignmentId,
        actor: &UserId,
        report_text: &str,
        attachment: Option<(&[u8], &str)>,
    ) -> WorkflowResult<Assignment> {
        if report_text.trim().is_empty() {
            return Err(WorkflowError::Validation(
                "final report text must not be blank".to_string(),
            ));
        }
        self.resolve_user(actor).await?;

        let file_path = match attachment {
            Some((bytes, name)) => Some(
                self.evidence
                    .store(bytes, name)
                    .await
                    .map_err(|e| WorkflowError::Storage(e.to_string()))?,
            ),
            None => None,
        };

        self.commit(id, |assignment| {
            if actor != &assignment.assignee {
                return Err(WorkflowError::Unauthorized {
                    actor: actor.clone(),
                    assignment: assignment.id.clone(),
                });
            }
            if !assignment.status.allows_activity_changes() {
                return Err(WorkflowError::InvalidState(format!(
                    "cannot submit a final report for a {:?} assignment",
                    assignment.status
                )));
            }
            if !assignment.all_activities_completed() {
                return Err(WorkflowError::InvalidState(
                    "all activities must be completed before the final report".to_string(),
                ));
            }

            let previous_status = assignment.status;
            let previous_progress = assignment.progress_percentage;

            match assignment.final_report.as_mut() {
                Some(report) => report.resubmit(report_text, file_path.clone(), actor.clone()),
                None => {
                    assignment.final_report = Some(AssignmentFinalReport::new(
                        report_text,
                        file_path.clone(),
                        actor.clone(),
                    ));
                }
            }

            assignment.status = AssignmentStatus::UnderReview;
            assignment.review_started_at = Some(Utc::now());
            if assignment.progress_percentage < progress::REVIEW_PROGRESS_FLOOR {
                assignment.progress_percentage = progress::REVIEW_PROGRESS_FLOOR;
            }

            Ok(Some(vec![
                SideEffect::audit(
                    WorkflowEvent::FinalReportSubmitted,
                    actor,
                    transition_meta(
                        previous_status,
                        previous_progress,
                        assignment.status,
                        assignment.progress_percentage,
                    ),
                ),
                SideEffect::notify(
                    WorkflowEvent::FinalReportSubmitted,
                    assignment.parties(),
                    json!({}),
                ),
            ]))
        })
        .await
    }

    /// Approve an under-review assignment: progress 100, completed.
    pub async fn approve(
        &self,
        id: &AssignmentId,
        reviewer: &UserId,
        comments: Option<String>,
    ) -> WorkflowResult<Assignment> {
        self.resolve_user(reviewer).await?;

        self.commit(id, |assignment| {
            ensure_reviewer(assignment, reviewer)?;
            if assignment.status != AssignmentStatus::UnderReview {
                return Err(WorkflowError::InvalidState(
                    "only an under-review assignment can be approved".to_string(),
                ));
            }
            let previous_progress = assignment.progress_percentage;
            let report = assignment
                .final_report
                .as_mut()
                .ok_or_else(|| WorkflowError::ReportNotFound(id.clone()))?;

            let now = Utc::now();
            report.status = ReportStatus::Approved;
            report.reviewed_by = Some(reviewer.clone());
            report.reviewed_at = Some(now);
            report.reviewer_comments = comments.clone();

            assignment.status = AssignmentStatus::Completed;
            assignment.progress_percentage = progress::MAX_PROGRESS;
            assignment.approved_at = Some(now);
            assignment.completed_date = Some(now);

            Ok(Some(vec![
                SideEffect::audit(
                    WorkflowEvent::Approved,
                    reviewer,
                    transition_meta(
                        AssignmentStatus::UnderReview,
                        previous_progress,
                        AssignmentStatus::Completed,
                        progress::MAX_PROGRESS,
                    ),
                ),
                SideEffect::notify(WorkflowEvent::Approved, assignment.parties(), json!({})),
            ]))
        })
        .await
    }

    /// Reject an under-review assignment. With `return_for_rework` the
    /// report is marked Returned, otherwise it stays Submitted awaiting
    /// a corrected revision. Progress lands in the rework band.
    pub async fn reject(
        &self,
        id: &AssignmentId,
        reviewer: &UserId,
        comments: &str,
        return_for_rework: bool,
    ) -> WorkflowResult<Assignment> {
        self.resolve_user(reviewer).await?;

        self.commit(id, |assignment| {
            ensure_reviewer(assignment, reviewer)?;
            if assignment.status != AssignmentStatus::UnderReview {
                return Err(WorkflowError::InvalidState(
                    "only an under-review assignment can be rejected".to_string(),
                ));
            }
            let previous_progress = assignment.progress_percentage;
            let report = assignment
                .final_report
                .as_mut()
                .ok_or_else(|| WorkflowError::ReportNotFound(id.clone()))?;

            let now = Utc::now();
            report.status = if return_for_rework {
                ReportStatus::Returned
            } else {
                ReportStatus::Submitted
            };
            report.reviewed_by = Some(reviewer.clone());
            report.reviewed_at = Some(now);
            report.reviewer_comments = Some(comments.to_string());

            assignment.rejected_at = Some(now);
            assignment.status = AssignmentStatus::InProgress;
            assignment.progress_percentage = progress::rework_clamp(previous_progress);

            let mut metadata = transition_meta(
                AssignmentStatus::UnderReview,
                previous_progress,
                assignment.status,
                assignment.progress_percentage,
            );
            metadata["return_for_rework"] = json!(return_for_rework);

            Ok(Some(vec![
                SideEffect::audit(WorkflowEvent::Rejected, reviewer, metadata),
                SideEffect::notify(WorkflowEvent::Rejected, assignment.parties(), json!({})),
            ]))
        })
        .await
    }

    /// Reopen a completed assignment for further work. The only
    /// backward edge out of Completed.
    pub async fn reopen(&self, id: &AssignmentId, actor: &UserId) -> WorkflowResult<Assignment> {
        self.resolve_user(actor).await?;

        self.commit(id, |assignment| {
            ensure_party(assignment, actor)?;
            if assignment.status != AssignmentStatus::Completed {
                return Err(WorkflowError::InvalidState(
                    "only a completed assignment can be reopened".to_string(),
                ));
            }

            let previous_progress = assignment.progress_percentage;
            assignment.approved_at = None;
            assignment.rejected_at = None;
            assignment.completed_date = None;
            assignment.status = AssignmentStatus::InProgress;
            assignment.progress_percentage =
                previous_progress.min(progress::REVIEW_PROGRESS_FLOOR);

            Ok(Some(vec![
                SideEffect::audit(
                    WorkflowEvent::Reopened,
                    actor,
                    transition_meta(
                        AssignmentStatus::Completed,
                        previous_progress,
                        AssignmentStatus::InProgress,
                        assignment.progress_percentage,
                    ),
                ),
                SideEffect::notify(WorkflowEvent::Reopened, assignment.parties(), json!({})),
            ]))
        })
        .await
    }

    /// Cancel an assignment. Terminal; reachable from any state except
    /// Completed and Cancelled itself.
    pub async fn cancel(
        &self,
        id: &AssignmentId,
        actor: &UserId,
        reason: Option<String>,
    ) -> WorkflowResult<Assignment> {
        self.resolve_user(actor).await?;

        self.commit(id, |assignment| {
            ensure_party(assignment, actor)?;
            if !assignment.status.is_cancellable() {
                return Err(WorkflowError::InvalidState(format!(
                    "cannot cancel a {:?} assignment",
                    assignment.status
                )));
            }
            let previous_status = assignment.status;
            assignment.status = AssignmentStatus::Cancelled;

            Ok(Some(vec![
                SideEffect::audit(
                    WorkflowEvent::Cancelled,
                    actor,
                    json!({ "previous_status": previous_status, "reason": reason }),
                ),
                SideEffect::notify(WorkflowEvent::Cancelled, assignment.parties(), json!({})),
            ]))
        })
        .await
    }

    // ── Overdue reconciliation ───────────────────────────────────────

    /// Batch-transition every assignment past its due date into Overdue.
    /// Idempotent: already-overdue items are skipped and fire no second
    /// notification. Per-item failures are logged, never propagated, so
    /// one bad aggregate cannot stall the sweep.
    pub async fn mark_overdue(&self, now: DateTime<Utc>) -> WorkflowResult<Vec<AssignmentId>> {
        let candidates = self.store.list_due_before(now).await?;
        let mut flagged = Vec::new();

        for candidate in candidates {
            if !candidate.status.is_sweepable() {
                continue;
            }
            let id = candidate.id.clone();
            let actor = UserId::system();

            let result = self
                .commit(&id, |assignment| {
                    // state may have moved since the listing; re-check
                    if !assignment.status.is_sweepable() {
                        return Ok(None);
                    }
                    let previous_status = assignment.status;
                    assignment.status = AssignmentStatus::Overdue;

                    Ok(Some(vec![
                        SideEffect::audit(
                            WorkflowEvent::Overdue,
                            &actor,
                            json!({
                                "previous_status": previous_status,
                                "due_date": assignment.due_date,
                            }),
                        ),
                        SideEffect::notify(
                            WorkflowEvent::Overdue,
                            assignment.parties(),
                            json!({ "due_date": assignment.due_date }),
                        ),
                    ]))
                })
                .await;

            match result {
                Ok(swept) if swept.status == AssignmentStatus::Overdue => flagged.push(id),
                Ok(_) => {}
                Err(err) => {
                    tracing::error!(assignment_id = %id, error = %err, "Overdue sweep item failed");
                }
            }
        }

        if !flagged.is_empty() {
            tracing::info!(count = flagged.len(), "Assignments marked overdue");
        }
        Ok(flagged)
    }

    // ── Internal ─────────────────────────────────────────────────────

    async fn resolve_user(&self, id: &UserId) -> WorkflowResult<User> {
        self.identity
            .find_user(id)
            .await
            .map_err(|e| WorkflowError::Storage(e.to_string()))?
            .ok_or_else(|| WorkflowError::UserNotFound(id.clone()))
    }

    /// Atomic read-modify-write of one aggregate. The mutation closure
    /// runs against a fresh read on every attempt; side effects it
    /// returns are emitted only after the commit lands. Returning `None`
    /// marks the call a no-op: the stored aggregate, its version, and
    /// `updated_at` all stay untouched and nothing is emitted.
    async fn commit<F>(&self, id: &AssignmentId, mut mutate: F) -> WorkflowResult<Assignment>
    where
        F: FnMut(&mut Assignment) -> WorkflowResult<Option<Vec<SideEffect>>>,
    {
        for attempt in 0..MAX_COMMIT_ATTEMPTS {
            let mut assignment = self.get_assignment(id).await?;
            let expected_version = assignment.version;

            let effects = match mutate(&mut assignment)? {
                Some(effects) => effects,
                None => return Ok(assignment),
            };
            assignment.touch();

            match self.store.update(assignment, expected_version).await {
                Ok(stored) => {
                    self.outbox.emit(id, effects).await;
                    return Ok(stored);
                }
                Err(StoreError::VersionConflict { .. }) if attempt + 1 < MAX_COMMIT_ATTEMPTS => {
                    tracing::debug!(
                        assignment_id = %id,
                        attempt = attempt + 1,
                        "Commit conflict, retrying from fresh read"
                    );
                }
                Err(err) => return Err(err.into()),
            }
        }
        Err(WorkflowError::Conflict(id.clone()))
    }
}

// ── Transition helpers ───────────────────────────────────────────────

fn ensure_party(assignment: &Assignment, actor: &UserId) -> WorkflowResult<()> {
    if assignment.is_party(actor) {
        Ok(())
    } else {
        Err(WorkflowError::Unauthorized {
            actor: actor.clone(),
            assignment: assignment.id.clone(),
        })
    }
}

fn ensure_reviewer(assignment: &Assignment, actor: &UserId) -> WorkflowResult<()> {
    if actor == &assignment.assigner {
        Ok(())
    } else {
        Err(WorkflowError::Unauthorized {
            actor: actor.clone(),
            assignment: assignment.id.clone(),
        })
    }
}

/// Pending promotes to InProgress the first time work is recorded;
/// audited and notified exactly once.
fn promote_pending(assignment: &mut Assignment, actor: &UserId, effects: &mut Vec<SideEffect>) {
    if assignment.status != AssignmentStatus::Pending {
        return;
    }
    assignment.status = AssignmentStatus::InProgress;
    effects.push(SideEffect::audit(
        WorkflowEvent::Started,
        actor,
        transition_meta(
            AssignmentStatus::Pending,
            assignment.progress_percentage,
            AssignmentStatus::InProgress,
            assignment.progress_percentage,
        ),
    ));
    effects.push(SideEffect::notify(
        WorkflowEvent::Started,
        assignment.parties(),
        json!({}),
    ));
}

/// Recompute activity-derived progress and record the change.
fn apply_derived_progress(
    assignment: &mut Assignment,
    actor: &UserId,
    effects: &mut Vec<SideEffect>,
) {
    let completed = assignment.completed_activities();
    let total = assignment.total_activities();
    if let Some(next) = progress::recalculated(assignment.progress_percentage, completed, total) {
        let previous = assignment.progress_percentage;
        assignment.progress_percentage = next;
        effects.push(SideEffect::audit(
            WorkflowEvent::ProgressUpdated,
            actor,
            json!({
                "previous_progress": previous,
                "new_progress": next,
                "manual": false,
            }),
        ));
    }
}

fn evidence_effects(
    first_submission: bool,
    assignment: &Assignment,
    activity_id: &ActivityId,
    actor: &UserId,
) -> Vec<SideEffect> {
    if !first_submission {
        return Vec::new();
    }
    vec![
        SideEffect::audit(
            WorkflowEvent::EvidenceSubmitted,
            actor,
            json!({ "activity_id": activity_id }),
        ),
        SideEffect::notify(
            WorkflowEvent::EvidenceSubmitted,
            assignment.parties(),
            json!({ "activity_id": activity_id }),
        ),
    ]
}

fn transition_meta(
    previous_status: AssignmentStatus,
    previous_progress: u8,
    new_status: AssignmentStatus,
    new_progress: u8,
) -> serde_json::Value {
    json!({
        "previous_status": previous_status,
        "new_status": new_status,
        "previous_progress": previous_progress,
        "new_progress": new_progress,
    })
}
