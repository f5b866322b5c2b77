//! Overdue reconciliation loop.
//!
//! Stateless and idempotent: each pass re-derives its candidate set from
//! the current clock, so a missed run is compensated by the next one.
//! The loop runs on its own timer, disjoint from request handling.

use crate::engine::AssignmentWorkflowEngine;
use chrono::Utc;
use std::sync::Arc;
use tokio::time::{interval, Duration};

/// Default sweep cadence.
pub const DEFAULT_SWEEP_INTERVAL_SECS: u64 = 3600;

/// Periodic job transitioning past-due assignments into Overdue.
pub struct OverdueSweeper {
    engine: Arc<AssignmentWorkflowEngine>,
    interval_secs: u64,
}

impl OverdueSweeper {
    pub fn new(engine: Arc<AssignmentWorkflowEngine>) -> Self {
        Self {
            engine,
            interval_secs: DEFAULT_SWEEP_INTERVAL_SECS,
        }
    }

    pub fn with_interval_secs(mut self, interval_secs: u64) -> Self {
        self.interval_secs = interval_secs;
        self
    }

    /// One sweep pass against the current clock. Also the entry point
    /// for externally triggered sweeps.
    pub async fn sweep_once(&self) -> usize {
        match self.engine.mark_overdue(Utc::now()).await {
            Ok(flagged) => flagged.len(),
            Err(err) => {
                tracing::error!(error = %err, "Overdue sweep pass failed");
                0
            }
        }
    }

    /// Run the sweep on a timer until the task is dropped.
    pub async fn run(self) {
        let mut ticker = interval(Duration::from_secs(self.interval_secs));
        tracing::info!(interval_secs = self.interval_secs, "Overdue sweeper started");

        loop {
            ticker.tick().await;
            self.sweep_once().await;
        }
    }
}
