//! Horse list and create/edit/delete handlers.
//!
//! ## Create Flow
//! ```text
//! POST /add (multipart)
//!   │
//!   ├─ name/description/price sent?     no ──► 400
//!   ├─ price parses as a number?        no ──► 400
//!   ├─ file part present?               no ──► flash "No file part"      → /add
//!   ├─ filename non-empty and usable?   no ──► flash "No selected file"  → /add
//!   ├─ name and description non-blank?  no ──► flash "name is required"  → /add
//!   │
//!   ├─ write image to the upload dir
//!   ├─ insert horse
//!   └─ flash "Horse added successfully!" → /
//! ```
//!
//! Edit runs the same checks after looking the horse up (404 first), except
//! that a missing or empty file keeps the current image.

use axum::extract::{Multipart, State};
use axum::response::{Html, Redirect};
use tracing::info;

use paddock_core::validation::{parse_price, validate_horse_fields};
use paddock_core::{Horse, NewHorse, ValidationError};

use super::back_to_form;
use crate::error::{AppError, AppResult};
use crate::extract::IdParam;
use crate::flash::Flash;
use crate::forms::HorseForm;
use crate::AppState;

/// `GET /`
pub async fn index(
    State(state): State<AppState>,
    mut flash: Flash,
) -> AppResult<(Flash, Html<String>)> {
    let horses = state.db.horses().list_all().await?;
    let page = state.views.index(&horses, &flash.take())?;
    Ok((flash, Html(page)))
}

/// `GET /add`
pub async fn add_form(
    State(state): State<AppState>,
    mut flash: Flash,
) -> AppResult<(Flash, Html<String>)> {
    let page = state.views.add_horse(&flash.take())?;
    Ok((flash, Html(page)))
}

/// `POST /add`
pub async fn create(
    State(state): State<AppState>,
    flash: Flash,
    multipart: Multipart,
) -> AppResult<(Flash, Redirect)> {
    let form = HorseForm::from_multipart(multipart).await?;
    let price = match parse_price(&form.price) {
        Ok(price) => price,
        Err(e) => return back_to_form(flash, e, "/add"),
    };

    let Some(image) = form.image else {
        return back_to_form(flash, ValidationError::MissingFilePart, "/add");
    };

    let stored_name = match image.stored_name() {
        Ok(name) => name,
        Err(e) => return back_to_form(flash, e, "/add"),
    };

    let fields = match validate_horse_fields(&form.name, &form.description, price) {
        Ok(fields) => fields,
        Err(e) => return back_to_form(flash, e, "/add"),
    };

    state.uploads.save(&stored_name, &image.bytes).await?;
    let horse = state
        .db
        .horses()
        .insert(&NewHorse::new(fields, stored_name))
        .await?;

    info!(id = horse.id, name = %horse.name, "Horse added");
    Ok((flash.push("Horse added successfully!"), Redirect::to("/")))
}

/// `GET /edit/{id}`
pub async fn edit_form(
    State(state): State<AppState>,
    IdParam(id): IdParam,
    mut flash: Flash,
) -> AppResult<(Flash, Html<String>)> {
    let horse = find_horse(&state, id).await?;
    let page = state.views.edit_horse(&horse, &flash.take())?;
    Ok((flash, Html(page)))
}

/// `POST /edit/{id}`
pub async fn update(
    State(state): State<AppState>,
    IdParam(id): IdParam,
    flash: Flash,
    multipart: Multipart,
) -> AppResult<(Flash, Redirect)> {
    let mut horse = find_horse(&state, id).await?;
    let form = HorseForm::from_multipart(multipart).await?;
    let edit_url = format!("/edit/{id}");
    let price = match parse_price(&form.price) {
        Ok(price) => price,
        Err(e) => return back_to_form(flash, e, &edit_url),
    };

    // An empty filename is how browsers send "no file chosen"
    let replacement = match form.image.filter(|image| !image.file_name.is_empty()) {
        Some(image) => match image.stored_name() {
            Ok(name) => Some((name, image)),
            Err(e) => return back_to_form(flash, e, &edit_url),
        },
        None => None,
    };

    let fields = match validate_horse_fields(&form.name, &form.description, price) {
        Ok(fields) => fields,
        Err(e) => return back_to_form(flash, e, &edit_url),
    };

    let new_image = match replacement {
        Some((name, image)) => {
            state.uploads.save(&name, &image.bytes).await?;
            Some(name)
        }
        None => None,
    };

    horse.apply(fields, new_image);
    state.db.horses().update(&horse).await?;

    info!(id = horse.id, name = %horse.name, "Horse updated");
    Ok((flash.push("Horse updated successfully!"), Redirect::to("/")))
}

/// `GET /delete/{id}`
///
/// Cart entries for the horse go with it. The image file stays on disk.
pub async fn delete(
    State(state): State<AppState>,
    IdParam(id): IdParam,
    flash: Flash,
) -> AppResult<(Flash, Redirect)> {
    let cart_entries = state.db.horses().delete(id).await?;

    info!(id = id, cart_entries = cart_entries, "Horse deleted");
    Ok((flash.push("Horse deleted successfully!"), Redirect::to("/")))
}

async fn find_horse(state: &AppState, id: i64) -> AppResult<Horse> {
    let horse = state
        .db
        .horses()
        .get_by_id(id)
        .await?
        .ok_or(AppError::NotFound {
            entity: "Horse",
            id,
        })?;
    Ok(horse)
}
