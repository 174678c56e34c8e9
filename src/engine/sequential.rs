//! Synchronous depth-first evaluation.
//!
//! The baseline contract: every leaf probe is invoked exactly once, latency
//! is measured around the call, failures become DOWN results with
//! `errorKind` / `error` details, and composites roll up the worst child
//! status. The concurrent evaluator must match this output shape.

use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;
use std::time::Instant;

use crate::probe::{Probe, ProbeFailure};
use crate::tree::{CheckNode, CheckResult, EvaluationTree};

/// Evaluate the whole tree in the calling thread.
pub fn evaluate(root: &CheckNode) -> EvaluationTree {
    match root {
        CheckNode::Leaf { name, probe } => EvaluationTree::Leaf {
            name: name.clone(),
            result: run_probe(probe),
        },
        CheckNode::Composite { name, children } => {
            let children = children.iter().map(evaluate).collect();
            EvaluationTree::composite(name.clone(), children)
        }
    }
}

/// Invoke one probe, containing errors and panics at the leaf boundary.
pub(crate) fn run_probe(probe: &Arc<dyn Probe>) -> CheckResult {
    let start = Instant::now();
    let outcome = catch_unwind(AssertUnwindSafe(|| probe.check()));
    let latency = start.elapsed();
    match outcome {
        Ok(Ok(details)) => CheckResult::up(details, latency),
        Ok(Err(failure)) => CheckResult::down(failure, latency),
        Err(panic) => CheckResult::down(
            ProbeFailure::new("Panic", panic_message(&panic)),
            latency,
        ),
    }
}

fn panic_message(panic: &Box<dyn std::any::Any + Send>) -> String {
    if let Some(s) = panic.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else {
        "probe panicked".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::probe::Details;
    use crate::status::Status;

    fn leaf_up(name: &str) -> CheckNode {
        CheckNode::leaf(
            name,
            Arc::new(|| {
                let mut d = Details::new();
                d.insert("component".into(), "test".into());
                Ok(d)
            }),
        )
    }

    fn leaf_down(name: &str, message: &'static str) -> CheckNode {
        CheckNode::leaf(
            name,
            Arc::new(move || Err(ProbeFailure::unreachable(message))),
        )
    }

    #[test]
    fn mixed_tree_rolls_up_down() {
        let external =
            CheckNode::composite("external", vec![leaf_down("svcA", "refused")]).unwrap();
        let root = CheckNode::composite("custom", vec![leaf_up("db"), external]).unwrap();

        let tree = evaluate(&root);
        assert_eq!(tree.status(), Status::Down);

        let EvaluationTree::Composite { children, .. } = &tree else {
            panic!("expected composite root");
        };
        assert_eq!(children[0].status(), Status::Up);
        assert_eq!(children[1].status(), Status::Down);
        assert_eq!(children[1].name(), "external");
    }

    #[test]
    fn probe_panic_becomes_down() {
        let root = CheckNode::composite(
            "custom",
            vec![CheckNode::leaf(
                "bad",
                Arc::new(|| -> Result<Details, ProbeFailure> { panic!("boom") }),
            )],
        )
        .unwrap();

        let tree = evaluate(&root);
        assert_eq!(tree.status(), Status::Down);
        let EvaluationTree::Composite { children, .. } = &tree else {
            panic!("expected composite root");
        };
        let EvaluationTree::Leaf { result, .. } = &children[0] else {
            panic!("expected leaf");
        };
        assert_eq!(result.details["errorKind"], "Panic");
        assert_eq!(result.details["error"], "boom");
    }

    #[test]
    fn failure_detail_order_and_content() {
        let root = leaf_down("db", "connection refused");
        let tree = evaluate(&root);
        let EvaluationTree::Leaf { result, .. } = &tree else {
            panic!("expected leaf");
        };
        assert_eq!(result.status, Status::Down);
        assert_eq!(result.details["errorKind"], "Unreachable");
        assert_eq!(result.details["error"], "connection refused");
    }
}
