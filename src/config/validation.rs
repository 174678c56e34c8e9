//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Reject unsupported probe methods before any check is built
//! - Catch duplicate external service names (would collide in the tree)
//! - Validate value ranges (timeouts > 0) and required pairings
//!
//! # Design Decisions
//! - Returns all validation errors, not just the first
//! - Runs before the config is accepted into the system; evaluation never
//!   sees an invalid config

use std::str::FromStr;

use thiserror::Error;
use url::Url;

use crate::config::schema::HealthConfig;
use crate::probe::ProbeMethod;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("unsupported probe method '{0}' (expected HEAD, GET or OPTIONS)")]
    UnsupportedProbeMethod(String),

    #[error("duplicate external service name '{0}'")]
    DuplicateExternalService(String),

    #[error("external service '{name}' has an invalid url '{url}'")]
    InvalidExternalUrl { name: String, url: String },

    #[error("endpoints.probe_paths configured but endpoints.probe_base_url is missing")]
    ProbePathsWithoutBaseUrl,

    #[error("endpoints.probe_base_url '{0}' is not a valid URL")]
    InvalidProbeBaseUrl(String),

    #[error("{0} must be greater than zero")]
    ZeroTimeout(&'static str),
}

/// Check semantic constraints; returns every violation found.
pub fn validate_config(config: &HealthConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.evaluation_timeout_ms == 0 {
        errors.push(ValidationError::ZeroTimeout("evaluation_timeout_ms"));
    }
    if config.probe_timeout_ms == 0 {
        errors.push(ValidationError::ZeroTimeout("probe_timeout_ms"));
    }

    if ProbeMethod::from_str(&config.endpoints.probe_method).is_err() {
        errors.push(ValidationError::UnsupportedProbeMethod(
            config.endpoints.probe_method.clone(),
        ));
    }

    for (i, svc) in config.external.services.iter().enumerate() {
        if config.external.services[..i]
            .iter()
            .any(|other| other.name == svc.name)
        {
            errors.push(ValidationError::DuplicateExternalService(svc.name.clone()));
        }
        if svc.enabled && Url::parse(&svc.url).is_err() {
            errors.push(ValidationError::InvalidExternalUrl {
                name: svc.name.clone(),
                url: svc.url.clone(),
            });
        }
    }

    if config.endpoints.enabled {
        match &config.endpoints.probe_base_url {
            Some(base) => {
                if Url::parse(base).is_err() {
                    errors.push(ValidationError::InvalidProbeBaseUrl(base.clone()));
                }
            }
            None => {
                if !config.endpoints.probe_paths.is_empty() {
                    errors.push(ValidationError::ProbePathsWithoutBaseUrl);
                }
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::schema::ExternalServiceConfig;

    #[test]
    fn default_config_is_valid() {
        assert!(validate_config(&HealthConfig::default()).is_ok());
    }

    #[test]
    fn unsupported_probe_method_is_rejected() {
        let mut config = HealthConfig::default();
        config.endpoints.probe_method = "PATCH".to_string();
        let errors = validate_config(&config).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| matches!(e, ValidationError::UnsupportedProbeMethod(_))));
    }

    #[test]
    fn duplicate_external_names_are_rejected() {
        let mut config = HealthConfig::default();
        for _ in 0..2 {
            config.external.services.push(ExternalServiceConfig {
                name: "svcA".to_string(),
                enabled: true,
                url: "http://localhost:8090/".to_string(),
            });
        }
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(
            errors,
            vec![ValidationError::DuplicateExternalService("svcA".to_string())]
        );
    }

    #[test]
    fn all_errors_are_reported() {
        let mut config = HealthConfig::default();
        config.evaluation_timeout_ms = 0;
        config.endpoints.probe_method = "TRACE".to_string();
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 2);
    }

    #[test]
    fn probe_paths_require_base_url() {
        let mut config = HealthConfig::default();
        config.endpoints.enabled = true;
        config.endpoints.probe_paths = vec!["/demo".to_string()];
        let errors = validate_config(&config).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| matches!(e, ValidationError::ProbePathsWithoutBaseUrl)));
    }
}
