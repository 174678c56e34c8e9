//! Endpoints check: route inventory plus allow-listed availability probes.
//!
//! Summarizes the application's own routes (supplied by the embedding
//! application) and optionally probes a safe allow-list of paths against a
//! configured base URL. Fast and side-effect free by design: only HEAD /
//! GET / OPTIONS, only paths the operator listed.

use std::sync::Arc;
use std::time::Instant;

use serde::Serialize;
use serde_json::json;
use url::Url;

use crate::probe::http::HttpProber;
use crate::probe::{Details, Probe, ProbeFailure};

/// One dispatchable route of the embedding application.
#[derive(Debug, Clone, Serialize)]
pub struct RouteDescriptor {
    pub pattern: String,
    pub methods: Vec<String>,
    pub handler: String,
}

pub struct EndpointsCheck {
    base_url: Option<Url>,
    probe_paths: Vec<String>,
    routes: Vec<RouteDescriptor>,
    max_list: usize,
    prober: Arc<HttpProber>,
}

impl EndpointsCheck {
    pub fn new(
        base_url: Option<Url>,
        probe_paths: Vec<String>,
        routes: Vec<RouteDescriptor>,
        max_list: usize,
        prober: Arc<HttpProber>,
    ) -> Self {
        Self {
            base_url,
            probe_paths,
            routes,
            max_list,
            prober,
        }
    }

    /// Probe one allow-listed path; returns the result entry and whether
    /// the path counts as reachable.
    fn probe_one(&self, base: &Url, raw: &str) -> (serde_json::Value, bool) {
        let path = normalize_path(raw);
        let started = Instant::now();
        let target = join_path(base, &path);
        match target.and_then(|uri| self.prober.probe(&uri).map_err(ProbeFailure::from)) {
            Ok(outcome) => (
                json!({
                    "path": path,
                    "status": outcome.status,
                    "method": outcome.method.as_str(),
                    "latencyMs": started.elapsed().as_millis() as u64,
                }),
                outcome.is_success(),
            ),
            Err(failure) => (
                json!({
                    "path": path,
                    "error": failure.message,
                    "errorKind": failure.kind,
                    "latencyMs": started.elapsed().as_millis() as u64,
                }),
                false,
            ),
        }
    }
}

impl Probe for EndpointsCheck {
    fn check(&self) -> Result<Details, ProbeFailure> {
        let mut details = Details::new();
        details.insert("component".into(), "endpoints".into());
        details.insert("type".into(), "endpoints".into());
        details.insert("count".into(), self.routes.len().into());
        let limited: Vec<&RouteDescriptor> = self.routes.iter().take(self.max_list).collect();
        details.insert(
            "items".into(),
            serde_json::to_value(&limited).unwrap_or_default(),
        );

        let mut probe_failed = false;
        if let Some(base) = self.base_url.as_ref().filter(|_| !self.probe_paths.is_empty()) {
            let mut results = Vec::with_capacity(self.probe_paths.len());
            for raw in &self.probe_paths {
                let (entry, reachable) = self.probe_one(base, raw);
                probe_failed |= !reachable;
                results.push(entry);
            }
            details.insert("probes".into(), results.into());
        }

        if probe_failed {
            Err(
                ProbeFailure::new("ProbeFailed", "one or more endpoint probes failed")
                    .with_details(details),
            )
        } else {
            Ok(details)
        }
    }
}

/// Blank paths probe the root; a missing leading slash is added.
fn normalize_path(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return "/".to_string();
    }
    if trimmed.starts_with('/') {
        trimmed.to_string()
    } else {
        format!("/{trimmed}")
    }
}

/// Append `path` to the base URL, keeping any base path prefix.
fn join_path(base: &Url, path: &str) -> Result<Url, ProbeFailure> {
    let joined = format!("{}{}", base.as_str().trim_end_matches('/'), path);
    Url::parse(&joined)
        .map_err(|e| ProbeFailure::invalid_response(format!("invalid probe URL '{joined}': {e}")))
}
