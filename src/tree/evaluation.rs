//! Evaluation output: per-leaf results and the rolled-up tree.

use std::time::Duration;

use crate::probe::{Details, ProbeFailure};
use crate::status::{worse_of, Status};

/// Immutable outcome of one leaf probe invocation.
#[derive(Debug, Clone)]
pub struct CheckResult {
    pub status: Status,
    pub latency: Duration,
    pub details: Details,
}

impl CheckResult {
    pub fn up(details: Details, latency: Duration) -> Self {
        Self {
            status: Status::Up,
            latency,
            details,
        }
    }

    /// DOWN result from a probe failure, preserving the failure's own
    /// details and appending `errorKind` / `error`.
    pub fn down(failure: ProbeFailure, latency: Duration) -> Self {
        let mut details = failure.details;
        details.insert("errorKind".into(), failure.kind.into());
        details.insert("error".into(), failure.message.into());
        Self {
            status: Status::Down,
            latency,
            details,
        }
    }

    /// DOWN result for a unit abandoned at its deadline.
    pub fn timed_out(budget: Duration) -> Self {
        let mut details = Details::new();
        details.insert("errorKind".into(), "Timeout".into());
        details.insert(
            "error".into(),
            format!("no response within {}ms", budget.as_millis()).into(),
        );
        Self {
            status: Status::Down,
            latency: budget,
            details,
        }
    }
}

/// Output of one evaluation pass; mirrors the shape of the source tree but
/// carries results instead of probes. Produced fresh per pass.
#[derive(Debug, Clone)]
pub enum EvaluationTree {
    Leaf {
        name: String,
        result: CheckResult,
    },
    Composite {
        name: String,
        status: Status,
        children: Vec<EvaluationTree>,
    },
}

impl EvaluationTree {
    pub fn name(&self) -> &str {
        match self {
            EvaluationTree::Leaf { name, .. } => name,
            EvaluationTree::Composite { name, .. } => name,
        }
    }

    pub fn status(&self) -> Status {
        match self {
            EvaluationTree::Leaf { result, .. } => result.status,
            EvaluationTree::Composite { status, .. } => *status,
        }
    }

    /// Composite constructor; rolls up the worst child status, UP when
    /// there are no children.
    pub fn composite(name: impl Into<String>, children: Vec<EvaluationTree>) -> Self {
        let status = children
            .iter()
            .fold(Status::Up, |acc, child| worse_of(acc, child.status()));
        EvaluationTree::Composite {
            name: name.into(),
            status,
            children,
        }
    }
}
