//! Health aggregation engine.
//!
//! Evaluates the operational health of a running service by walking a tree
//! of named checks, running leaf probes with bounded concurrency and a
//! shared timeout, and rolling up a single worst-case status.
//!
//! # Architecture Overview
//!
//! ```text
//!   startup wiring                     health request / startup sweep
//!        │                                        │
//!        ▼                                        ▼
//!   ┌──────────┐   build once   ┌────────┐  flatten+pool  ┌────────────┐
//!   │ registry │───────────────▶│  tree  │───────────────▶│   engine   │
//!   │ (config) │                │ (nodes)│                │ seq / conc │
//!   └──────────┘                └────────┘                └─────┬──────┘
//!                                                               │
//!                                    EvaluationTree per pass    ▼
//!                               ┌──────────┐   JSON    ┌───────────────┐
//!                               │  server  │◀──────────│ flat summary  │
//!                               │ (axum)   │           │ + roll-up     │
//!                               └──────────┘           └───────────────┘
//! ```
//!
//! Leaf probes are synchronous; the concurrent evaluator supplies bounded
//! parallelism and deadline enforcement, and the axum layer is the only
//! async surface.

// Core engine
pub mod engine;
pub mod status;
pub mod tree;

// Checks
pub mod probe;

// Wiring and surfaces
pub mod config;
pub mod registry;
pub mod server;

pub use config::HealthConfig;
pub use engine::{evaluate, evaluate_concurrently, flatten, overall_status};
pub use registry::HealthRegistry;
pub use status::{worse_of, Status};
pub use tree::{CheckNode, CheckResult, EvaluationTree};
