//! Assignment Workflow Engine
//!
//! The engine owns the assignment status state machine, the activity
//! lifecycle, the final-report review cycle, and the authorization rules
//! across every transition.
//!
//! # Key Principle
//!
//! **Side effects never gate transitions.** The engine mutates the
//! aggregate first, commits it through the store's optimistic version
//! check, and only then emits audit/notification events. Emission
//! failures are logged and swallowed; they never roll back or fail the
//! workflow operation.
//!
//! # Architecture
//!
//! [`AssignmentWorkflowEngine`] composes specialized components:
//!
//! - [`ActivityEvidenceManager`]: validates evidence and owns the
//!   one-way activity lock
//! - [`progress`]: pure activity-ratio-to-percentage aggregation with
//!   the 90% ceiling reserved for review/approval
//! - [`Outbox`]: best-effort audit/notification boundary
//! - [`OverdueSweeper`]: periodic, idempotent due-date reconciliation
//!
//! External collaborators (blob storage, audit sink, notification
//! publisher, user directory) are consumed through the narrow traits in
//! [`adapters`].

#![deny(unsafe_code)]

pub mod adapters;
pub mod engine;
pub mod evidence;
pub mod outbox;
pub mod progress;
pub mod sweeper;

pub use adapters::{
    AdapterError, AuditRecorder, EvidenceStore, IdentityResolver, NotificationDispatcher,
};
pub use engine::{AssignmentWorkflowEngine, NewActivity, NewAssignment};
pub use evidence::{ActivityEvidenceManager, CompletionOutcome};
pub use outbox::{Outbox, SideEffect};
pub use sweeper::OverdueSweeper;
