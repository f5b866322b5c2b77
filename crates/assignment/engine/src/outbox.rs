//! Best-effort side-effect boundary.
//!
//! Transition functions return the side effects they produced; the
//! outbox emits them strictly after the aggregate commit. An emission
//! failure is logged and dropped; it never rolls back or retries the
//! workflow transition.

use crate::adapters::{AuditRecorder, NotificationDispatcher};
use assignment_types::{AssignmentId, UserId, WorkflowEvent};
use std::sync::Arc;

/// One deferred audit or notification emission.
#[derive(Clone, Debug)]
pub enum SideEffect {
    Audit {
        event: WorkflowEvent,
        actor: UserId,
        metadata: serde_json::Value,
    },
    Notify {
        event: WorkflowEvent,
        recipients: Vec<UserId>,
        payload: serde_json::Value,
    },
}

impl SideEffect {
    pub fn audit(event: WorkflowEvent, actor: &UserId, metadata: serde_json::Value) -> Self {
        Self::Audit {
            event,
            actor: actor.clone(),
            metadata,
        }
    }

    pub fn notify(event: WorkflowEvent, recipients: Vec<UserId>, payload: serde_json::Value) -> Self {
        Self::Notify {
            event,
            recipients,
            payload,
        }
    }
}

/// Fire-and-forget emitter over the audit and notification adapters.
#[derive(Clone)]
pub struct Outbox {
    audit: Arc<dyn AuditRecorder>,
    notifier: Arc<dyn NotificationDispatcher>,
}

impl Outbox {
    pub fn new(audit: Arc<dyn AuditRecorder>, notifier: Arc<dyn NotificationDispatcher>) -> Self {
        Self { audit, notifier }
    }

    /// Emit every effect in order. Failures are logged, never surfaced.
    pub async fn emit(&self, assignment_id: &AssignmentId, effects: Vec<SideEffect>) {
        for effect in effects {
            match effect {
                SideEffect::Audit {
                    event,
                    actor,
                    metadata,
                } => {
                    if let Err(err) = self
                        .audit
                        .record(event, assignment_id, &actor, metadata)
                        .await
                    {
                        tracing::warn!(
                            assignment_id = %assignment_id,
                            event = %event,
                            error = %err,
                            "Audit emission failed"
                        );
                    }
                }
                SideEffect::Notify {
                    event,
                    recipients,
                    payload,
                } => {
                    if let Err(err) = self
                        .notifier
                        .publish(event, assignment_id, &recipients, payload)
                        .await
                    {
                        tracing::warn!(
                            assignment_id = %assignment_id,
                            event = %event,
                            error = %err,
                            "Notification emission failed"
                        );
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::{AdapterError, RecordingAuditLog, RecordingNotifier};
    use async_trait::async_trait;
    use serde_json::json;

    struct FailingAudit;

    #[async_trait]
    impl AuditRecorder for FailingAudit {
        async fn record(
            &self,
            _event: WorkflowEvent,
            _assignment_id: &AssignmentId,
            _actor: &UserId,
            _metadata: serde_json::Value,
        ) -> Result<(), AdapterError> {
            Err(AdapterError("sink offline".to_string()))
        }
    }

    #[tokio::test]
    async fn test_emit_in_order() {
        let audit = Arc::new(RecordingAuditLog::new());
        let notifier = Arc::new(RecordingNotifier::new());
        let outbox = Outbox::new(audit.clone(), notifier.clone());

        let id = AssignmentId::new("a-1");
        let actor = UserId::new("u-1");
        outbox
            .emit(
                &id,
                vec![
                    SideEffect::audit(WorkflowEvent::Created, &actor, json!({})),
                    SideEffect::notify(WorkflowEvent::Created, vec![actor.clone()], json!({})),
                ],
            )
            .await;

        assert_eq!(audit.entries().len(), 1);
        assert_eq!(notifier.published().len(), 1);
        assert_eq!(notifier.published()[0].recipients, vec![actor]);
    }

    #[tokio::test]
    async fn test_audit_failure_does_not_block_notification() {
        let notifier = Arc::new(RecordingNotifier::new());
        let outbox = Outbox::new(Arc::new(FailingAudit), notifier.clone());

        let id = AssignmentId::new("a-1");
        let actor = UserId::new("u-1");
        outbox
            .emit(
                &id,
                vec![
                    SideEffect::audit(WorkflowEvent::Approved, &actor, json!({})),
                    SideEffect::notify(WorkflowEvent::Approved, vec![actor], json!({})),
                ],
            )
            .await;

        assert_eq!(notifier.count_of(WorkflowEvent::Approved), 1);
    }
}
