//! # HTTP Error Mapping
//!
//! Every handler returns `Result<_, AppError>`. Lower-layer errors convert
//! with `?` and end up as a status code and a short HTML page.
//!
//! ```text
//! ValidationError ─┐
//! DbError ─────────┤
//! MultipartError ──┼──► AppError ──► IntoResponse
//! tera::Error ─────┤                   404 NotFound / UnknownPath
//! io::Error ───────┘                   400 BadRequest
//!                                      413 PayloadTooLarge
//!                                      500 everything else (logged)
//! ```
//!
//! Recoverable validation failures (empty filename, blank name) never get
//! here: `handlers::back_to_form` turns them into a flash message and a
//! redirect. Only a price that does not parse arrives as `BadRequest`.

use axum::extract::multipart::MultipartError;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use thiserror::Error;
use tracing::{debug, error};

use paddock_core::ValidationError;
use paddock_db::DbError;

/// Storefront request errors.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("{entity} {id} does not exist")]
    NotFound { entity: &'static str, id: i64 },

    #[error("No page at {0}")]
    UnknownPath(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Payload too large: {0}")]
    PayloadTooLarge(String),

    #[error("Database error: {0}")]
    Database(DbError),

    #[error("Template error: {0}")]
    Template(#[from] tera::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// HTTP status for this error.
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::NotFound { .. } | AppError::UnknownPath(_) => StatusCode::NOT_FOUND,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            AppError::Database(_)
            | AppError::Template(_)
            | AppError::Io(_)
            | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<DbError> for AppError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::NotFound { entity, id } => AppError::NotFound { entity, id },
            DbError::UnknownHorse { horse_id } => AppError::NotFound {
                entity: "Horse",
                id: horse_id,
            },
            other => AppError::Database(other),
        }
    }
}

impl From<ValidationError> for AppError {
    fn from(err: ValidationError) -> Self {
        AppError::BadRequest(err.to_string())
    }
}

impl From<MultipartError> for AppError {
    fn from(err: MultipartError) -> Self {
        if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
            AppError::PayloadTooLarge(err.body_text())
        } else {
            AppError::BadRequest(err.body_text())
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        let detail = if status.is_server_error() {
            error!(error = %self, "Request failed");
            "Something went wrong on our side.".to_string()
        } else {
            debug!(error = %self, status = status.as_u16(), "Request rejected");
            self.to_string()
        };

        let title = status.canonical_reason().unwrap_or("Error");
        let body = format!(
            "<!doctype html>\n<html><head><title>{code} {title}</title></head>\
             <body><h1>{title}</h1><p>{detail}</p><p><a href=\"/\">Back to the horses</a></p></body></html>\n",
            code = status.as_u16(),
            title = title,
            detail = tera::escape_html(&detail),
        );

        (status, Html(body)).into_response()
    }
}

/// Result type for handlers.
pub type AppResult<T> = Result<T, AppError>;
