//! Health endpoint daemon: load config, wire the check tree, run the
//! startup sweep, serve the diagnostics endpoint.

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use app_health::config::{load_config, HealthConfig};
use app_health::engine::log_startup_sweep;
use app_health::probe::RouteDescriptor;
use app_health::registry::HealthRegistry;
use app_health::server::{serve, AppState};

#[derive(Parser, Debug)]
#[command(name = "app-health", about = "Service health aggregation endpoint")]
struct Args {
    /// Path to the TOML configuration file.
    #[arg(long, default_value = "health.toml")]
    config: PathBuf,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "app_health=debug,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();
    let config = if args.config.exists() {
        load_config(&args.config)?
    } else {
        tracing::warn!(path = %args.config.display(), "config file not found, using defaults");
        HealthConfig {
            enabled: true,
            ..HealthConfig::default()
        }
    };

    if !config.enabled {
        tracing::info!("health subsystem disabled, nothing to do");
        return Ok(());
    }

    tracing::info!(
        bind_address = %config.server.bind_address,
        evaluation_timeout_ms = config.evaluation_timeout_ms,
        "configuration loaded"
    );

    // The daemon's own dispatchable routes, reported by the endpoints check.
    let routes = vec![
        RouteDescriptor {
            pattern: "/health/custom".to_string(),
            methods: vec!["GET".to_string()],
            handler: "server::custom_health".to_string(),
        },
        RouteDescriptor {
            pattern: "/app-health/custom".to_string(),
            methods: vec!["GET".to_string()],
            handler: "server::custom_health".to_string(),
        },
    ];

    // The blocking HTTP client must be built outside the async runtime.
    let root = Arc::new(HealthRegistry::new(config.clone()).routes(routes).build()?);

    if config.startup_log {
        log_startup_sweep(&root, config.evaluation_timeout())?;
    }

    let state = AppState {
        root,
        evaluation_timeout: config.evaluation_timeout(),
    };

    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(async move {
        let listener = tokio::net::TcpListener::bind(&config.server.bind_address).await?;
        serve(listener, state).await
    })?;

    tracing::info!("shutdown complete");
    Ok(())
}
