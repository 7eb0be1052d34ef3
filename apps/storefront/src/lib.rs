//! # Paddock Storefront
//!
//! Web frontend for listing horses, editing them, and keeping a cart.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Storefront Request Flow                         │
//! │                                                                         │
//! │  Browser                                                               │
//! │     │  GET /  POST /add  GET /cart ...                                  │
//! │     ▼                                                                   │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │ tower-http: TraceLayer ─► RequestBodyLimit (413)                  │  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! │     │                                                                   │
//! │     ▼                                                                   │
//! │  routes.rs ──► handlers::horses / handlers::cart                       │
//! │                    │            │             │                         │
//! │                    ▼            ▼             ▼                         │
//! │               paddock-db    ImageStore     Views + Flash               │
//! │               (SQLite)      (uploads/)     (tera, cookie)              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration
//! See [`config`]. Everything a handler needs travels in [`AppState`].

pub mod config;
pub mod error;
pub mod extract;
pub mod flash;
pub mod forms;
pub mod handlers;
pub mod routes;
pub mod uploads;
pub mod views;

use std::sync::Arc;

use axum::extract::FromRef;

use paddock_db::Database;

pub use config::StorefrontConfig;
pub use error::{AppError, AppResult};
pub use routes::router;

use crate::flash::FlashSigner;
use crate::uploads::ImageStore;
use crate::views::Views;

/// URL prefix the upload directory is served under.
pub const UPLOADS_URL: &str = "/static/uploads";

/// Shared application state, cloned into every handler.
#[derive(Debug, Clone)]
pub struct AppState {
    pub db: Database,
    pub uploads: Arc<ImageStore>,
    pub views: Arc<Views>,
    pub flash: Arc<FlashSigner>,
    pub config: Arc<StorefrontConfig>,
}

impl AppState {
    /// Builds the state from a loaded config and an open database.
    ///
    /// Parses the templates and keys the flash signer. Does not touch the
    /// filesystem: call `uploads.ensure_dir()` before serving.
    pub fn new(config: StorefrontConfig, db: Database) -> Result<Self, AppError> {
        let views = Views::new()?;
        let flash = FlashSigner::new(config.security.secret_key.as_bytes())
            .map_err(|e| AppError::Internal(format!("Invalid flash key: {e}")))?;
        let uploads = ImageStore::new(config.storage.upload_dir.clone());

        Ok(AppState {
            db,
            uploads: Arc::new(uploads),
            views: Arc::new(views),
            flash: Arc::new(flash),
            config: Arc::new(config),
        })
    }
}

impl FromRef<AppState> for Arc<FlashSigner> {
    fn from_ref(state: &AppState) -> Self {
        state.flash.clone()
    }
}
