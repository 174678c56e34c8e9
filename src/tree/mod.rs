//! Check tree model and evaluation output.
//!
//! # Data Flow
//! ```text
//! startup wiring
//!     → node.rs (leaf probes + named composites, built once, immutable)
//!     → engine (sequential or concurrent walk)
//!     → evaluation.rs (fresh EvaluationTree per pass)
//!     → rendering / flat summary
//! ```
//!
//! # Design Decisions
//! - Nodes are a tagged variant, not a trait hierarchy; traversal and
//!   rendering are exhaustive matches
//! - Composites own their children; single-owner, acyclic by construction
//! - The tree is never mutated after construction, so concurrent evaluation
//!   passes share it without locking

pub mod evaluation;
pub mod node;

pub use evaluation::{CheckResult, EvaluationTree};
pub use node::{CheckNode, TreeError};
