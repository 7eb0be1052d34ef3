//! Request handlers, one module per resource.
//!
//! Mutating handlers end in a redirect carrying exactly one flash message.
//! A recoverable form problem redirects back to the form instead, with the
//! problem as the message and nothing written.

pub mod cart;
pub mod horses;

use axum::response::Redirect;
use tracing::debug;

use paddock_core::ValidationError;

use crate::error::{AppError, AppResult};
use crate::flash::Flash;

/// Sends the user back to `form` with the validation problem flashed.
///
/// Problems the user cannot fix from the form (a price that is not a number)
/// fail the request with 400 instead.
pub(crate) fn back_to_form(
    flash: Flash,
    err: ValidationError,
    form: &str,
) -> AppResult<(Flash, Redirect)> {
    if !err.is_recoverable() {
        return Err(AppError::from(err));
    }

    debug!(error = %err, form = %form, "Form rejected");
    Ok((flash.push(err.to_string()), Redirect::to(form)))
}
