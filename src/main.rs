use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use patientor_core::{
    config::{rest_addr_from_env_value, seed_file_from_env_value},
    constants::{REST_ADDR_ENV, SEED_FILE_ENV},
    CoreConfig, PatientService,
};

/// Main entry point for the patientor application
///
/// Resolves configuration once, builds the in-memory patient store (seeded from
/// `PATIENTOR_SEED_FILE` when set) and serves the REST API.
///
/// # Environment Variables
/// - `PATIENTOR_REST_ADDR`: REST server address (default: "0.0.0.0:3001")
/// - `PATIENTOR_SEED_FILE`: JSON seed file with diagnoses and patients (optional)
/// - `RUST_LOG`: log filter, added to the default `info` directives for the patientor crates
///
/// # Errors
/// Returns an error if:
/// - the logging configuration cannot be initialised,
/// - the configuration or seed file is invalid,
/// - the server address cannot be bound, or
/// - the HTTP server fails while running.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("patientor_run=info".parse()?)
                .add_directive("api_rest=info".parse()?)
                .add_directive("patientor_core=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cfg = CoreConfig::new(
        rest_addr_from_env_value(std::env::var(REST_ADDR_ENV).ok()),
        seed_file_from_env_value(std::env::var(SEED_FILE_ENV).ok()),
    )?;

    let patient_service = PatientService::from_config(&cfg)?;
    let app = api_rest::router(patient_service);

    tracing::info!("++ Starting patientor REST on {}", cfg.rest_addr());

    let listener = tokio::net::TcpListener::bind(cfg.rest_addr()).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
