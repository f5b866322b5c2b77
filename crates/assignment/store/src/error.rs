use assignment_types::{AssignmentId, WorkflowError};
use thiserror::Error;

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Storage-layer errors.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("assignment not found: {0}")]
    NotFound(AssignmentId),

    #[error("assignment already exists: {0}")]
    AlreadyExists(AssignmentId),

    #[error("version conflict on assignment {id}: expected {expected}, found {found}")]
    VersionConflict {
        id: AssignmentId,
        expected: u64,
        found: u64,
    },

    #[error("backend error: {0}")]
    Backend(String),
}

impl From<StoreError> for WorkflowError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(id) => WorkflowError::AssignmentNotFound(id),
            StoreError::VersionConflict { id, .. } => WorkflowError::Conflict(id),
            other => WorkflowError::Storage(other.to_string()),
        }
    }
}
