use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use api_rest::{router, AppState};
use mtrh_core::{
    config::{database_path_from_env_value, resolve_clinic_catalogue},
    CoreConfig, PatientRegistry,
};

/// Main entry point for the MTRH registry
///
/// Resolves configuration once, opens the patient database (creating the schema if needed) and
/// serves the registry forms over HTTP. The registry owns the only database connection; it is
/// dropped, closing the file, once Ctrl+C or SIGTERM has stopped the server.
///
/// # Environment Variables
/// - `MTRH_REST_ADDR`: form server address (default: "127.0.0.1:3000")
/// - `MTRH_DB_PATH`: SQLite database file (default: "mtrh.db")
/// - `MTRH_CLINICS_FILE`: optional YAML clinic catalogue
///
/// # Errors
/// Returns an error if configuration is invalid, the database cannot be opened, or the server
/// cannot bind its address.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("mtrh_run=info".parse()?)
                .add_directive("mtrh_core=info".parse()?)
                .add_directive("api_rest=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let addr = std::env::var("MTRH_REST_ADDR").unwrap_or_else(|_| "127.0.0.1:3000".into());
    let database_path = database_path_from_env_value(std::env::var("MTRH_DB_PATH").ok());
    let clinics = resolve_clinic_catalogue(std::env::var("MTRH_CLINICS_FILE").ok().map(PathBuf::from))?;

    let cfg = Arc::new(CoreConfig::new(database_path, clinics)?);
    let registry = PatientRegistry::open(cfg)?;

    tracing::info!("++ Starting MTRH registry on http://{}", addr);

    let app = router(AppState::new(registry));
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("-- MTRH registry stopped");
    Ok(())
}

/// Resolves on Ctrl+C or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("failed to install Ctrl+C handler: {e}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("failed to install SIGTERM handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    tracing::info!("shutdown signal received");
}
