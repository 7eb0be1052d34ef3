//! Cart handlers.

use axum::extract::State;
use axum::response::{Html, Redirect};
use tracing::info;

use crate::error::AppResult;
use crate::extract::IdParam;
use crate::flash::Flash;
use crate::AppState;

/// `GET /add_to_cart/{id}`
///
/// The id is a horse id. An unknown horse fails the foreign key and answers
/// 404 without touching the cart.
pub async fn add(
    State(state): State<AppState>,
    IdParam(horse_id): IdParam,
    flash: Flash,
) -> AppResult<(Flash, Redirect)> {
    let entry = state.db.cart().add(horse_id).await?;

    info!(entry_id = entry.id, horse_id = horse_id, "Horse added to cart");
    Ok((flash.push("Horse added to cart!"), Redirect::to("/")))
}

/// `GET /cart`
pub async fn view(
    State(state): State<AppState>,
    mut flash: Flash,
) -> AppResult<(Flash, Html<String>)> {
    let lines = state.db.cart().list_lines().await?;
    let page = state.views.cart(&lines, &flash.take())?;
    Ok((flash, Html(page)))
}

/// `GET /remove_from_cart/{id}`
///
/// The id is a cart entry id, not a horse id.
pub async fn remove(
    State(state): State<AppState>,
    IdParam(entry_id): IdParam,
    flash: Flash,
) -> AppResult<(Flash, Redirect)> {
    state.db.cart().remove(entry_id).await?;

    info!(entry_id = entry_id, "Horse removed from cart");
    Ok((flash.push("Horse removed from cart!"), Redirect::to("/cart")))
}
