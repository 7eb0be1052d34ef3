//! # Paddock Storefront Server
//!
//! ## Startup Sequence
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Server Startup                                   │
//! │                                                                         │
//! │  1. init_tracing()          RUST_LOG or the default filter             │
//! │  2. StorefrontConfig::load  defaults → paddock.toml → PADDOCK_* env    │
//! │  3. Database::open          open/create horses.db, run migrations      │
//! │  4. ImageStore::ensure_dir  create static/uploads if missing           │
//! │  5. router(state)           routes + tower-http layers                 │
//! │  6. axum::serve             until Ctrl+C / SIGTERM                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use anyhow::Context;
use tokio::net::TcpListener;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use paddock_db::{Database, DbConfig};
use storefront::{router, AppState, StorefrontConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    info!("Starting Paddock storefront...");

    let config = StorefrontConfig::load(None).context("Failed to load configuration")?;
    info!(
        addr = %config.bind_address(),
        db = %config.storage.database_path.display(),
        uploads = %config.storage.upload_dir.display(),
        max_upload_bytes = config.storage.max_upload_bytes,
        "Configuration loaded"
    );
    if config.uses_dev_secret() {
        warn!("Using the development secret key; set PADDOCK_SECRET_KEY in production");
    }

    if let Some(parent) = config.storage.database_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
    }

    let db = Database::open(DbConfig::new(&config.storage.database_path))
        .await
        .context("Failed to open database")?;

    let state = AppState::new(config, db.clone())?;
    state
        .uploads
        .ensure_dir()
        .await
        .with_context(|| format!("Failed to create {}", state.uploads.dir().display()))?;

    let addr = state.config.bind_address();
    let app = router(state);

    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind to {addr}"))?;
    info!(%addr, "Listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    db.close().await;
    info!("Server shutdown complete");
    Ok(())
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=storefront=trace` - Trace the web layer only
/// - Default: INFO, DEBUG for paddock crates
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new("info,paddock_core=debug,paddock_db=debug,storefront=debug,sqlx=warn")
    });

    tracing_subscriber::fmt().with_env_filter(filter).init();
}

/// Graceful shutdown signal handler.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(error = %e, "Failed to install Ctrl+C handler");
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
                error!(error = %e, "Failed to install SIGTERM handler");
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

    info!("Shutdown signal received, starting graceful shutdown...");
}
