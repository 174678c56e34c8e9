//! HTTP fallback prober tests against scripted mock backends.

use std::time::Duration;

use app_health::probe::{HttpProber, ProbeMethod};

mod common;
use common::MethodBackend;

fn prober(preferred: ProbeMethod, get_fallback: bool, options_fallback: bool) -> HttpProber {
    HttpProber::new(
        preferred,
        get_fallback,
        options_fallback,
        Duration::from_secs(2),
    )
    .expect("build prober")
}

#[test]
fn head_rejected_falls_back_to_get() {
    let backend = MethodBackend::start(&[("HEAD", 405), ("GET", 200)]);
    let outcome = prober(ProbeMethod::Head, true, true)
        .probe(&backend.url("/demo"))
        .unwrap();

    assert_eq!(outcome.method, ProbeMethod::Get);
    assert_eq!(outcome.status, 200);
    assert_eq!(backend.seen_methods(), vec!["HEAD", "GET"]);
}

#[test]
fn non_405_failure_does_not_trigger_fallback() {
    let backend = MethodBackend::start(&[("HEAD", 500), ("GET", 200)]);
    let outcome = prober(ProbeMethod::Head, true, true)
        .probe(&backend.url("/demo"))
        .unwrap();

    assert_eq!(outcome.method, ProbeMethod::Head);
    assert_eq!(outcome.status, 500);
    assert_eq!(backend.seen_methods(), vec!["HEAD"]);
}

#[test]
fn double_405_falls_back_to_options() {
    let backend = MethodBackend::start(&[("HEAD", 405), ("GET", 405), ("OPTIONS", 200)]);
    let outcome = prober(ProbeMethod::Head, true, true)
        .probe(&backend.url("/demo"))
        .unwrap();

    assert_eq!(outcome.method, ProbeMethod::Options);
    assert_eq!(outcome.status, 200);
    assert_eq!(backend.seen_methods(), vec!["HEAD", "GET", "OPTIONS"]);
}

#[test]
fn get_fallback_can_be_disabled() {
    let backend = MethodBackend::start(&[("HEAD", 405), ("GET", 200), ("OPTIONS", 204)]);
    let outcome = prober(ProbeMethod::Head, false, true)
        .probe(&backend.url("/demo"))
        .unwrap();

    assert_eq!(outcome.method, ProbeMethod::Options);
    assert_eq!(outcome.status, 204);
    assert_eq!(backend.seen_methods(), vec!["HEAD", "OPTIONS"]);
}

#[test]
fn terminal_405_is_an_outcome_not_an_error() {
    let backend = MethodBackend::start(&[("HEAD", 405)]);
    let outcome = prober(ProbeMethod::Head, false, false)
        .probe(&backend.url("/demo"))
        .unwrap();

    assert_eq!(outcome.method, ProbeMethod::Head);
    assert_eq!(outcome.status, 405);
    assert!(!outcome.is_success());
}

#[test]
fn preferred_get_skips_get_fallback() {
    let backend = MethodBackend::start(&[("GET", 405), ("OPTIONS", 200)]);
    let outcome = prober(ProbeMethod::Get, true, true)
        .probe(&backend.url("/demo"))
        .unwrap();

    assert_eq!(outcome.method, ProbeMethod::Options);
    assert_eq!(backend.seen_methods(), vec!["GET", "OPTIONS"]);
}

#[test]
fn transport_failure_surfaces_immediately() {
    let addr = common::unreachable_addr();
    let url = url::Url::parse(&format!("http://{addr}/demo")).unwrap();
    let err = prober(ProbeMethod::Head, true, true).probe(&url).unwrap_err();

    assert_eq!(err.method, ProbeMethod::Head);
    assert_eq!(err.kind(), "Connect");
    assert!(err.uri.contains("/demo"));
}
