//! Bounded-parallel evaluation with a shared timeout budget.
//!
//! # Responsibilities
//! - Flatten the tree into independent leaf units
//! - Run units on a fixed pool of worker threads
//! - Enforce one deadline across the whole pass
//! - Re-attach results and roll up, matching the sequential evaluator
//!
//! # Design Decisions
//! - Fixed pool pulling from a shared queue; no per-leaf thread spawning
//! - A unit that misses the deadline is abandoned, not interrupted: the
//!   worker may still be blocked on its resource, but its result is no
//!   longer awaited and the slot is recorded as DOWN/Timeout
//! - A slow or failing probe never delays or aborts its siblings' results

use std::collections::VecDeque;
use std::num::NonZeroUsize;
use std::sync::mpsc::{self, RecvTimeoutError};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::{Duration, Instant};

use thiserror::Error;

use crate::engine::sequential::run_probe;
use crate::probe::Probe;
use crate::tree::{CheckNode, CheckResult, EvaluationTree};

/// Fatal conditions for a concurrent pass. Probe failures are not errors;
/// they are DOWN results.
#[derive(Debug, Error)]
pub enum EvaluateError {
    #[error("failed to provision worker pool: {0}")]
    WorkerPool(#[from] std::io::Error),
}

/// Evaluate with the default worker count: available parallelism clamped
/// to at least 2 workers and at most one per leaf.
pub fn evaluate_concurrently(
    root: &CheckNode,
    timeout: Duration,
) -> Result<EvaluationTree, EvaluateError> {
    let leaves = root.leaves().len();
    evaluate_concurrently_with(root, timeout, default_worker_count(leaves))
}

/// Evaluate with an explicit worker count (still capped at one per leaf).
pub fn evaluate_concurrently_with(
    root: &CheckNode,
    timeout: Duration,
    max_workers: usize,
) -> Result<EvaluationTree, EvaluateError> {
    let leaves = root.leaves();
    if leaves.is_empty() {
        let mut empty = VecDeque::new();
        return Ok(rebuild(root, &mut empty, timeout));
    }

    let workers = max_workers.clamp(1, leaves.len());
    let paths: Vec<String> = leaves.iter().map(|(p, _)| p.clone()).collect();
    let deadline = Instant::now() + timeout;

    let queue: Arc<Mutex<VecDeque<(usize, Arc<dyn Probe>)>>> = Arc::new(Mutex::new(
        leaves
            .into_iter()
            .enumerate()
            .map(|(i, (_, probe))| (i, probe))
            .collect(),
    ));
    let (tx, rx) = mpsc::channel::<(usize, CheckResult)>();

    tracing::debug!(
        leaves = paths.len(),
        workers,
        timeout_ms = timeout.as_millis() as u64,
        "starting concurrent health evaluation"
    );

    for i in 0..workers {
        let queue = Arc::clone(&queue);
        let tx = tx.clone();
        // Detached on purpose: a worker stuck in an abandoned probe must
        // not block the evaluation's return.
        thread::Builder::new()
            .name(format!("health-worker-{i}"))
            .spawn(move || loop {
                let unit = queue.lock().ok().and_then(|mut q| q.pop_front());
                let Some((index, probe)) = unit else { break };
                let result = run_probe(&probe);
                if tx.send((index, result)).is_err() {
                    break;
                }
            })
            .map_err(EvaluateError::WorkerPool)?;
    }
    drop(tx);

    let mut results: Vec<Option<CheckResult>> = (0..paths.len()).map(|_| None).collect();
    let mut outstanding = paths.len();
    while outstanding > 0 {
        let budget = deadline.saturating_duration_since(Instant::now());
        if budget.is_zero() {
            break;
        }
        match rx.recv_timeout(budget) {
            Ok((index, result)) => {
                if results[index].replace(result).is_none() {
                    outstanding -= 1;
                }
            }
            Err(RecvTimeoutError::Timeout) | Err(RecvTimeoutError::Disconnected) => break,
        }
    }

    let mut ordered = VecDeque::with_capacity(results.len());
    for (index, slot) in results.into_iter().enumerate() {
        match slot {
            Some(result) => ordered.push_back(result),
            None => {
                tracing::warn!(
                    path = %paths[index],
                    timeout_ms = timeout.as_millis() as u64,
                    "health check abandoned at deadline"
                );
                ordered.push_back(CheckResult::timed_out(timeout));
            }
        }
    }

    Ok(rebuild(root, &mut ordered, timeout))
}

fn default_worker_count(leaves: usize) -> usize {
    let available = thread::available_parallelism()
        .map(NonZeroUsize::get)
        .unwrap_or(2);
    // Never fewer than 2 workers, never more than one per leaf.
    available.clamp(2, leaves.max(2))
}

/// Re-attach leaf results in traversal order and roll composites back up.
fn rebuild(
    node: &CheckNode,
    results: &mut VecDeque<CheckResult>,
    timeout: Duration,
) -> EvaluationTree {
    match node {
        CheckNode::Leaf { name, .. } => EvaluationTree::Leaf {
            name: name.clone(),
            result: results
                .pop_front()
                .unwrap_or_else(|| CheckResult::timed_out(timeout)),
        },
        CheckNode::Composite { name, children } => {
            let children = children
                .iter()
                .map(|child| rebuild(child, results, timeout))
                .collect();
            EvaluationTree::composite(name.clone(), children)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::probe::Details;
    use crate::status::Status;

    #[test]
    fn worker_count_is_clamped() {
        assert!(default_worker_count(0) >= 2);
        assert!(default_worker_count(1) >= 2);
        let ten = default_worker_count(10);
        assert!((2..=10).contains(&ten));
    }

    #[test]
    fn empty_composite_evaluates_up() {
        let root = CheckNode::composite("custom", vec![]).unwrap();
        let tree = evaluate_concurrently(&root, Duration::from_secs(1)).unwrap();
        assert_eq!(tree.status(), Status::Up);
    }

    #[test]
    fn single_leaf_still_gets_a_result() {
        let root = CheckNode::leaf("db", Arc::new(|| Ok(Details::new())));
        let tree = evaluate_concurrently(&root, Duration::from_secs(1)).unwrap();
        assert_eq!(tree.status(), Status::Up);
    }
}
