//! Presence demo entry point
//!
//! Run with:
//! ```bash
//! REDIS_URL=redis://127.0.0.1:6379/15 cargo run -p presence-demo
//! ```
//!
//! Configuration is loaded from environment variables.

use presence_common::{try_init_tracing_with_config, AppConfig, TracingConfig};
use tracing::{error, info};

#[tokio::main]
async fn main() {
    let config = AppConfig::from_env();

    let tracing_config = config.as_ref().map_or_else(
        |_| TracingConfig::default(),
        |c| TracingConfig::for_environment(c.app.env),
    );
    if let Err(e) = try_init_tracing_with_config(&tracing_config) {
        eprintln!("Warning: Failed to initialize tracing: {e}");
    }

    let config = match config {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, "Failed to load configuration");
            std::process::exit(1);
        }
    };

    info!(
        env = ?config.app.env,
        key = %config.presence.key,
        ttl_ms = config.presence.ttl_ms,
        "Configuration loaded"
    );

    match presence_demo::run(config).await {
        Ok(report) if report.passed() => {
            info!(online = report.online, "Presence demo finished");
        }
        Ok(report) => {
            error!(
                online = report.online,
                expected = report.expected_online,
                "Online count does not match the expected value"
            );
            std::process::exit(1);
        }
        Err(e) => {
            error!(error = %e, "Presence demo failed");
            std::process::exit(1);
        }
    }
}
