//! Storage abstraction for assignment aggregates.
//!
//! The assignment, its activities, and its final report form one unit of
//! mutual exclusion: every mutation is a single atomic read-modify-write
//! of the full aggregate. The contract enforces that with an optimistic
//! version token; `update` only commits when the caller saw the current
//! version, otherwise it fails with [`StoreError::VersionConflict`] and
//! the caller retries from a fresh read.
//!
//! Design stance:
//! - A transactional backend remains the source of truth in production.
//! - The in-memory adapter here is deterministic and test-friendly.

#![deny(unsafe_code)]

mod error;
pub mod memory;
mod traits;

pub use error::{StoreError, StoreResult};
pub use memory::InMemoryAssignmentStore;
pub use traits::{AssignmentStore, QueryWindow};
