//! Probe abstractions and built-in check implementations.
//!
//! # Responsibilities
//! - Define the `Probe` capability: synchronously attempt one health check
//! - Contain per-resource probe implementations (HTTP, external, endpoints)
//! - Carry typed failure information back to the evaluator
//!
//! # Design Decisions
//! - Probes are synchronous; the concurrent evaluator supplies parallelism
//! - Resource acquisition (pools, clients) is the caller's concern; the
//!   crate ships probe logic and the detail schema only
//! - Failures carry a `kind` and message plus optional extra details so a
//!   DOWN result keeps diagnostic context (route, observed status code)

pub mod details;
pub mod endpoints;
pub mod external;
pub mod http;

pub use external::ExternalServiceCheck;
pub use endpoints::{EndpointsCheck, RouteDescriptor};
pub use http::{HttpProber, ProbeError, ProbeMethod, ProbeOutcome};

use serde_json::Map;
use thiserror::Error;

/// Ordered detail map attached to check results (`component`, `type`,
/// `latencyMs`, `route`, `nodeCount`, `firstCollection`, `error`, ...).
pub type Details = Map<String, serde_json::Value>;

/// A synchronous health check against one external resource.
///
/// Implementations either return a detail mapping describing the healthy
/// resource or fail with a [`ProbeFailure`]. Closures work directly:
///
/// ```
/// use app_health::probe::{Details, Probe};
///
/// let always_up = || Ok(Details::new());
/// let _: &dyn Probe = &always_up;
/// ```
pub trait Probe: Send + Sync {
    fn check(&self) -> Result<Details, ProbeFailure>;
}

impl<F> Probe for F
where
    F: Fn() -> Result<Details, ProbeFailure> + Send + Sync,
{
    fn check(&self) -> Result<Details, ProbeFailure> {
        self()
    }
}

/// Failure of a single probe invocation.
///
/// `kind` becomes the `errorKind` detail of the resulting DOWN entry and
/// `message` the `error` detail; `details` is merged in first so checks can
/// preserve context gathered before the failure.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct ProbeFailure {
    pub kind: String,
    pub message: String,
    pub details: Details,
}

impl ProbeFailure {
    pub fn new(kind: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            message: message.into(),
            details: Details::new(),
        }
    }

    /// Resource did not answer (connection refused, DNS, socket errors).
    pub fn unreachable(message: impl Into<String>) -> Self {
        Self::new("Unreachable", message)
    }

    /// Resource answered with something the check cannot accept.
    pub fn invalid_response(message: impl Into<String>) -> Self {
        Self::new("InvalidResponse", message)
    }

    /// Attach extra details preserved on the DOWN result.
    pub fn with_details(mut self, details: Details) -> Self {
        self.details = details;
        self
    }
}

impl From<ProbeError> for ProbeFailure {
    fn from(err: ProbeError) -> Self {
        let kind = err.kind().to_string();
        Self {
            kind,
            message: err.to_string(),
            details: Details::new(),
        }
    }
}
