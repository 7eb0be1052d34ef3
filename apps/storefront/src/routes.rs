//! # Routes
//!
//! | Method   | Path                     | Handler                     |
//! |----------|--------------------------|-----------------------------|
//! | GET      | `/`                      | `horses::index`             |
//! | GET/POST | `/add`                   | `horses::add_form`/`create` |
//! | GET/POST | `/edit/{id}`             | `horses::edit_form`/`update`|
//! | GET      | `/delete/{id}`           | `horses::delete`            |
//! | GET      | `/add_to_cart/{id}`      | `cart::add`                 |
//! | GET      | `/cart`                  | `cart::view`                |
//! | GET      | `/remove_from_cart/{id}` | `cart::remove`              |
//! | GET      | `/static/uploads/*`      | `ServeDir` on the upload dir|
//!
//! Mutations stay reachable through plain GET links so the pages work
//! without JavaScript.

use axum::extract::DefaultBodyLimit;
use axum::routing::get;
use axum::Router;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::handlers::{cart, horses};
use crate::{AppState, UPLOADS_URL};

/// Builds the application router.
pub fn router(state: AppState) -> Router {
    let max_body = state.config.storage.max_upload_bytes;
    let uploads = ServeDir::new(state.uploads.dir());

    Router::new()
        .route("/", get(horses::index))
        .route("/add", get(horses::add_form).post(horses::create))
        .route("/edit/{id}", get(horses::edit_form).post(horses::update))
        .route("/delete/{id}", get(horses::delete))
        .route("/add_to_cart/{id}", get(cart::add))
        .route("/cart", get(cart::view))
        .route("/remove_from_cart/{id}", get(cart::remove))
        .nest_service(UPLOADS_URL, uploads)
        // Multipart bodies are capped by axum's own default (2 MB) unless raised
        .layer(DefaultBodyLimit::max(max_body))
        .layer(RequestBodyLimitLayer::new(max_body))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
