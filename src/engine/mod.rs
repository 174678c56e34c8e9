//! Evaluation engine.
//!
//! # Data Flow
//! ```text
//! Sequential (sequential.rs):
//!     depth-first walk
//!     → invoke each leaf probe once, measuring latency
//!     → roll up composite statuses
//!
//! Concurrent (concurrent.rs):
//!     flatten tree into (path, probe) units
//!     → bounded worker pool runs units in parallel
//!     → shared deadline; overdue units abandoned as DOWN/Timeout
//!     → results re-attached in tree order, identical roll-up
//!
//! Flat summary (flatten.rs):
//!     EvaluationTree → ordered FlatEntry list + overall worst status
//! ```
//!
//! # Design Decisions
//! - Probe failures are contained at the leaf boundary; only worker pool
//!   provisioning can fail the concurrent call
//! - Both evaluators produce structurally identical trees for the same
//!   probe outcomes

pub mod concurrent;
pub mod flatten;
pub mod sequential;
pub mod sweep;

pub use concurrent::{evaluate_concurrently, evaluate_concurrently_with, EvaluateError};
pub use flatten::{flatten, overall_status, FlatEntry};
pub use sequential::evaluate;
pub use sweep::log_startup_sweep;
