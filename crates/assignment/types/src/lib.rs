//! Assignment Workflow Domain Types
//!
//! An **Assignment** is a unit of delegated work handed from an assigner
//! to an assignee. Progress is driven by an ordered checklist of
//! **activities**, each of which demands evidence (an uploaded file or a
//! written report) before it can be completed. Once every activity is
//! done, the assignee submits a **final report** that the assigner
//! reviews: approving it completes the assignment, rejecting it sends
//! the work back.
//!
//! # Key Concepts
//!
//! - **Assignment**: The aggregate root. Carries the status state
//!   machine, the bounded progress percentage, and both party identities.
//! - **AssignmentActivity**: One checklist step. Transitions
//!   `Pending → Completed` exactly once and locks irreversibly.
//! - **AssignmentFinalReport**: One-to-one with the assignment; only
//!   exists once every activity is completed.
//! - **WorkflowEvent**: The closed set of semantic actions emitted to the
//!   audit and notification channels.
//!
//! # Design Principles
//!
//! 1. Statuses and evidence kinds are closed enums, matched exhaustively
//!    in every transition function.
//! 2. A locked activity never changes again. There is no "uncomplete".
//! 3. Progress above 90 belongs to the review/approval path and is never
//!    overwritten by activity recalculation.

#![deny(unsafe_code)]

mod activity;
mod assignment;
mod errors;
mod events;
mod report;
mod user;

pub use activity::*;
pub use assignment::*;
pub use errors::*;
pub use events::*;
pub use report::*;
pub use user::*;
