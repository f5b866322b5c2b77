use crate::StoreResult;
use assignment_types::{Assignment, AssignmentId};
use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// Generic query window for paged reads.
#[derive(Debug, Clone, Copy, Default)]
pub struct QueryWindow {
    /// Maximum rows to return; 0 means unbounded
    pub limit: usize,
    pub offset: usize,
}

/// Storage interface for assignment aggregates.
///
/// The aggregate (assignment + activities + final report) is read and
/// written as a whole. Partial writes are not expressible through this
/// interface.
#[async_trait]
pub trait AssignmentStore: Send + Sync {
    /// Insert a newly created assignment.
    async fn insert(&self, assignment: Assignment) -> StoreResult<()>;

    /// Fetch one aggregate by id.
    async fn get(&self, id: &AssignmentId) -> StoreResult<Option<Assignment>>;

    /// Commit a mutated aggregate. Succeeds only when the stored version
    /// equals `expected_version`; the committed copy gets the next
    /// version number and is returned.
    async fn update(&self, assignment: Assignment, expected_version: u64)
        -> StoreResult<Assignment>;

    /// List aggregates newest-first.
    async fn list(&self, window: QueryWindow) -> StoreResult<Vec<Assignment>>;

    /// Candidates for the overdue sweep: every aggregate whose due date
    /// lies strictly before `cutoff`. Status filtering is the engine's
    /// concern.
    async fn list_due_before(&self, cutoff: DateTime<Utc>) -> StoreResult<Vec<Assignment>>;
}
