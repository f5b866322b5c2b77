//! Error taxonomy for assignment workflow operations
//!
//! All four caller-visible kinds (`NotFound`-style lookups,
//! `Unauthorized`, `InvalidState`, `Validation`) abort the transition
//! with no partial state change. Audit/notification failures never
//! appear here; they are logged at the emission boundary instead.

use crate::{ActivityId, AssignmentId, UserId};

/// Errors that can occur in workflow operations
#[derive(Debug, thiserror::Error)]
pub enum WorkflowError {
    #[error("assignment not found: {0}")]
    AssignmentNotFound(AssignmentId),

    #[error("activity not found: {0}")]
    ActivityNotFound(ActivityId),

    #[error("no final report exists for assignment {0}")]
    ReportNotFound(AssignmentId),

    #[error("user not found: {0}")]
    UserNotFound(UserId),

    #[error("actor {actor} is not a party to assignment {assignment}")]
    Unauthorized {
        actor: UserId,
        assignment: AssignmentId,
    },

    #[error("invalid state: {0}")]
    InvalidState(String),

    #[error("activity is locked: {0}")]
    ActivityLocked(ActivityId),

    #[error("validation failed: {0}")]
    Validation(String),

    #[error("concurrent update conflict on assignment {0}")]
    Conflict(AssignmentId),

    #[error("storage error: {0}")]
    Storage(String),
}

/// Result type alias for workflow operations
pub type WorkflowResult<T> = Result<T, WorkflowError>;
