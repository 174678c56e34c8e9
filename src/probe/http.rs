//! HTTP fallback prober.
//!
//! Probes a single resource with the cheapest verb first and adapts to
//! servers that reject it:
//!
//! ```text
//! preferred (default HEAD)
//!     → 405 and GET fallback allowed?      retry with GET
//!     → 405 and OPTIONS fallback allowed?  retry with OPTIONS
//! ```
//!
//! Only a 405 triggers fallback. Any other status, including a terminal 405
//! with no fallback left, is returned as the observed outcome; the prober
//! reports what it saw and leaves the health judgement to the caller.
//! Transport failures (DNS, connect, timeout) surface immediately.

use std::str::FromStr;
use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::Method;
use thiserror::Error;
use url::Url;

/// Verbs the prober knows how to issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProbeMethod {
    Head,
    Get,
    Options,
}

impl ProbeMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProbeMethod::Head => "HEAD",
            ProbeMethod::Get => "GET",
            ProbeMethod::Options => "OPTIONS",
        }
    }

    fn to_reqwest(self) -> Method {
        match self {
            ProbeMethod::Head => Method::HEAD,
            ProbeMethod::Get => Method::GET,
            ProbeMethod::Options => Method::OPTIONS,
        }
    }
}

impl std::fmt::Display for ProbeMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raised at configuration time for verbs the prober does not support.
#[derive(Debug, Error)]
#[error("unsupported probe method: {0}")]
pub struct UnsupportedMethod(pub String);

impl FromStr for ProbeMethod {
    type Err = UnsupportedMethod;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "HEAD" => Ok(ProbeMethod::Head),
            "GET" => Ok(ProbeMethod::Get),
            "OPTIONS" => Ok(ProbeMethod::Options),
            _ => Err(UnsupportedMethod(s.to_string())),
        }
    }
}

/// What one probe actually observed: the final status code and the verb
/// that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProbeOutcome {
    pub status: u16,
    pub method: ProbeMethod,
}

impl ProbeOutcome {
    /// The caller-side definition of "reachable".
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Transport-level probe failure; never triggers fallback.
#[derive(Debug, Error)]
#[error("probe {method} {uri} failed: {source}")]
pub struct ProbeError {
    pub uri: String,
    pub method: ProbeMethod,
    #[source]
    pub source: reqwest::Error,
}

impl ProbeError {
    /// Failure category used as the `errorKind` detail.
    pub fn kind(&self) -> &'static str {
        if self.source.is_timeout() {
            "Timeout"
        } else if self.source.is_connect() {
            "Connect"
        } else {
            "Transport"
        }
    }
}

const METHOD_NOT_ALLOWED: u16 = 405;

/// Method-negotiating prober shared by endpoint and external checks.
pub struct HttpProber {
    client: Client,
    preferred: ProbeMethod,
    allow_get_fallback: bool,
    allow_options_fallback: bool,
}

impl HttpProber {
    pub fn new(
        preferred: ProbeMethod,
        allow_get_fallback: bool,
        allow_options_fallback: bool,
        request_timeout: Duration,
    ) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(request_timeout).build()?;
        Ok(Self {
            client,
            preferred,
            allow_get_fallback,
            allow_options_fallback,
        })
    }

    /// Probe `uri`, applying the 405 fallback chain.
    pub fn probe(&self, uri: &Url) -> Result<ProbeOutcome, ProbeError> {
        let mut outcome = self.attempt(self.preferred, uri)?;

        if outcome.status == METHOD_NOT_ALLOWED
            && self.allow_get_fallback
            && self.preferred != ProbeMethod::Get
        {
            outcome = self.attempt(ProbeMethod::Get, uri)?;
        }

        if outcome.status == METHOD_NOT_ALLOWED
            && self.allow_options_fallback
            && self.preferred != ProbeMethod::Options
        {
            outcome = self.attempt(ProbeMethod::Options, uri)?;
        }

        Ok(outcome)
    }

    fn attempt(&self, method: ProbeMethod, uri: &Url) -> Result<ProbeOutcome, ProbeError> {
        let response = self
            .client
            .request(method.to_reqwest(), uri.clone())
            .send()
            .map_err(|source| ProbeError {
                uri: uri.to_string(),
                method,
                source,
            })?;

        Ok(ProbeOutcome {
            status: response.status().as_u16(),
            method,
        })
    }
}
