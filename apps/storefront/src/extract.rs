//! Path extractors.

use axum::extract::{FromRequestParts, Path};
use axum::http::request::Parts;
use tracing::debug;

use crate::error::AppError;

/// Integer id taken from the single path parameter.
///
/// Anything that is not an integer (`/edit/abc`) answers 404, as if no route
/// had matched, rather than axum's default 400.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IdParam(pub i64);

impl<S> FromRequestParts<S> for IdParam
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match Path::<i64>::from_request_parts(parts, state).await {
            Ok(Path(id)) => Ok(IdParam(id)),
            Err(rejection) => {
                debug!(path = %parts.uri.path(), %rejection, "Path id is not an integer");
                Err(AppError::UnknownPath(parts.uri.path().to_string()))
            }
        }
    }
}
