//! Flat summary view over an evaluation tree.
//!
//! Produces one entry per leaf regardless of nesting depth, with a fixed
//! subset of details, plus the overall worst status computed over the list
//! with `worse_of`. The overall status always agrees with the tree's own
//! root roll-up for the same evaluation.

use std::time::Duration;

use crate::probe::Details;
use crate::status::{worse_of, Status};
use crate::tree::EvaluationTree;

/// Detail keys copied into flat entries; everything else is dropped from
/// the compact view.
const SELECTED_DETAILS: &[&str] = &["type", "route", "nodeCount", "firstCollection", "error"];

/// One leaf in the flat summary.
#[derive(Debug, Clone)]
pub struct FlatEntry {
    pub path: String,
    pub status: Status,
    pub latency: Duration,
    pub details: Details,
}

/// Ordered flat list of all leaf results.
pub fn flatten(tree: &EvaluationTree) -> Vec<FlatEntry> {
    let mut out = Vec::new();
    match tree {
        EvaluationTree::Composite { children, .. } => {
            for child in children {
                collect(child.name().to_string(), child, &mut out);
            }
        }
        EvaluationTree::Leaf { name, .. } => collect(name.clone(), tree, &mut out),
    }
    out
}

/// Worst status across the flattened list; UP for an empty list.
pub fn overall_status(entries: &[FlatEntry]) -> Status {
    entries
        .iter()
        .fold(Status::Up, |acc, entry| worse_of(acc, entry.status))
}

fn collect(path: String, tree: &EvaluationTree, out: &mut Vec<FlatEntry>) {
    match tree {
        EvaluationTree::Leaf { result, .. } => {
            let mut details = Details::new();
            for key in SELECTED_DETAILS {
                if let Some(value) = result.details.get(*key) {
                    details.insert((*key).to_string(), value.clone());
                }
            }
            out.push(FlatEntry {
                path,
                status: result.status,
                latency: result.latency,
                details,
            });
        }
        EvaluationTree::Composite { children, .. } => {
            for child in children {
                collect(format!("{}.{}", path, child.name()), child, out);
            }
        }
    }
}
