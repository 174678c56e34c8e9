//! External service check: one fixed URI probed for reachability.

use std::sync::Arc;

use url::Url;

use crate::probe::http::HttpProber;
use crate::probe::{Details, Probe, ProbeFailure};

/// Named check against a dependent service's URL. Reachable means the
/// final probed verb answered 2xx.
pub struct ExternalServiceCheck {
    name: String,
    url: Url,
    prober: Arc<HttpProber>,
}

impl ExternalServiceCheck {
    pub fn new(name: impl Into<String>, url: Url, prober: Arc<HttpProber>) -> Self {
        Self {
            name: name.into(),
            url,
            prober,
        }
    }
}

impl Probe for ExternalServiceCheck {
    fn check(&self) -> Result<Details, ProbeFailure> {
        let mut details = Details::new();
        details.insert("component".into(), format!("external:{}", self.name).into());
        details.insert("type".into(), "external".into());
        details.insert("route".into(), self.url.to_string().into());

        match self.prober.probe(&self.url) {
            Ok(outcome) => {
                details.insert("status".into(), outcome.status.into());
                if outcome.is_success() {
                    Ok(details)
                } else {
                    Err(ProbeFailure::invalid_response(format!(
                        "unexpected status {}",
                        outcome.status
                    ))
                    .with_details(details))
                }
            }
            Err(err) => Err(ProbeFailure::from(err).with_details(details)),
        }
    }
}
