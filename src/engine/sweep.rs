//! Startup sweep: one concurrent evaluation pass logged per leaf.

use std::time::Duration;

use crate::engine::concurrent::{evaluate_concurrently, EvaluateError};
use crate::engine::flatten::{flatten, overall_status};
use crate::tree::CheckNode;

/// Run one evaluation at startup and log each leaf's status and latency.
pub fn log_startup_sweep(root: &CheckNode, timeout: Duration) -> Result<(), EvaluateError> {
    let tree = evaluate_concurrently(root, timeout)?;
    let entries = flatten(&tree);
    for entry in &entries {
        tracing::info!(
            path = %entry.path,
            status = %entry.status,
            latency_ms = entry.latency.as_millis() as u64,
            "health check"
        );
    }
    tracing::info!(
        status = %overall_status(&entries),
        checks = entries.len(),
        "startup health sweep complete"
    );
    Ok(())
}
