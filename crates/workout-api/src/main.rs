//! Workout API server entry point
//!
//! Run with:
//! ```bash
//! cargo run -p workout-api
//! ```
//!
//! Configuration is read from environment variables, after loading a `.env`
//! file from the working directory when one exists.

use tracing::{error, info};
use workout_common::{try_init_tracing_with_config, AppConfig, TracingConfig};

#[tokio::main]
async fn main() {
    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    if let Err(e) = try_init_tracing_with_config(&TracingConfig::for_environment(config.app.env)) {
        eprintln!("Warning: Failed to initialize tracing: {e}");
    }

    info!(
        env = ?config.app.env,
        address = %config.api.address(),
        "Starting Workout API Server"
    );

    if let Err(e) = workout_api::run(config).await {
        error!(error = %e, "Server failed to start");
        std::process::exit(1);
    }
}
