//! Config-gated wiring of checks into the root composite.
//!
//! # Responsibilities
//! - Assemble the `custom` check tree from config plus caller-supplied
//!   probes (database, document store, broker)
//! - Build the shared HTTP prober for external/endpoint checks
//! - Skip disabled categories; warn and skip misconfigured externals
//!
//! # Design Decisions
//! - The tree is an explicitly constructed value handed to the caller, not
//!   ambient global state; the engine stays testable with synthetic probes
//! - Resource clients never appear here: callers wrap them in `Probe`
//!   closures, the registry only gates and names them

use std::str::FromStr;
use std::sync::Arc;

use thiserror::Error;
use url::Url;

use crate::config::HealthConfig;
use crate::probe::http::UnsupportedMethod;
use crate::probe::{
    EndpointsCheck, ExternalServiceCheck, HttpProber, Probe, ProbeMethod, RouteDescriptor,
};
use crate::tree::{CheckNode, TreeError};

/// Construction-time wiring failures.
#[derive(Debug, Error)]
pub enum RegistryError {
    #[error(transparent)]
    Method(#[from] UnsupportedMethod),

    #[error("failed to build HTTP prober: {0}")]
    Client(#[from] reqwest::Error),

    #[error(transparent)]
    Tree(#[from] TreeError),
}

/// Builder for the root check tree.
pub struct HealthRegistry {
    config: HealthConfig,
    db: Option<Arc<dyn Probe>>,
    mongo: Option<Arc<dyn Probe>>,
    kafka: Option<Arc<dyn Probe>>,
    routes: Vec<RouteDescriptor>,
    extra: Vec<CheckNode>,
}

impl HealthRegistry {
    pub fn new(config: HealthConfig) -> Self {
        Self {
            config,
            db: None,
            mongo: None,
            kafka: None,
            routes: Vec::new(),
            extra: Vec::new(),
        }
    }

    /// Database probe; wired as the `db` child when `db.enabled`.
    pub fn database(mut self, probe: Arc<dyn Probe>) -> Self {
        self.db = Some(probe);
        self
    }

    /// Document store probe; wired as the `mongo` child when `mongo.enabled`.
    pub fn mongo(mut self, probe: Arc<dyn Probe>) -> Self {
        self.mongo = Some(probe);
        self
    }

    /// Broker probe; wired as the `kafka` child when `kafka.enabled`.
    pub fn kafka(mut self, probe: Arc<dyn Probe>) -> Self {
        self.kafka = Some(probe);
        self
    }

    /// Route inventory reported by the `endpoints` check.
    pub fn routes(mut self, routes: Vec<RouteDescriptor>) -> Self {
        self.routes = routes;
        self
    }

    /// Additional caller-defined check appended after the built-ins.
    pub fn register(mut self, node: CheckNode) -> Self {
        self.extra.push(node);
        self
    }

    /// Assemble the root composite (named `custom`).
    pub fn build(self) -> Result<CheckNode, RegistryError> {
        let endpoints = &self.config.endpoints;
        let preferred = ProbeMethod::from_str(&endpoints.probe_method)?;
        let prober = Arc::new(HttpProber::new(
            preferred,
            endpoints.allow_get_fallback,
            endpoints.allow_options_fallback,
            self.config.probe_timeout(),
        )?);

        let mut components = Vec::new();

        if self.config.db.enabled {
            if let Some(probe) = self.db {
                components.push(CheckNode::leaf("db", probe));
            }
        }
        if self.config.mongo.enabled {
            if let Some(probe) = self.mongo {
                components.push(CheckNode::leaf("mongo", probe));
            }
        }
        if self.config.kafka.enabled {
            if let Some(probe) = self.kafka {
                components.push(CheckNode::leaf("kafka", probe));
            }
        }

        let mut external = Vec::new();
        for svc in &self.config.external.services {
            if !svc.enabled || svc.name.trim().is_empty() {
                continue;
            }
            match Url::parse(&svc.url) {
                Ok(url) => {
                    let check =
                        ExternalServiceCheck::new(svc.name.clone(), url, Arc::clone(&prober));
                    external.push(CheckNode::leaf(svc.name.clone(), Arc::new(check)));
                }
                Err(e) => {
                    tracing::warn!(
                        service = %svc.name,
                        url = %svc.url,
                        error = %e,
                        "external service not wired"
                    );
                }
            }
        }
        if !external.is_empty() {
            components.push(CheckNode::composite("external", external)?);
        }

        if endpoints.enabled {
            let base_url = endpoints
                .probe_base_url
                .as_deref()
                .and_then(|raw| Url::parse(raw).ok());
            let check = EndpointsCheck::new(
                base_url,
                endpoints.probe_paths.clone(),
                self.routes,
                endpoints.max_list,
                Arc::clone(&prober),
            );
            components.push(CheckNode::leaf("endpoints", Arc::new(check)));
        }

        components.extend(self.extra);

        Ok(CheckNode::composite("custom", components)?)
    }
}
