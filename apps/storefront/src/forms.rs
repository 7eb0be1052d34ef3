//! Multipart form parsing for the add and edit horse forms.

use axum::extract::Multipart;
use tracing::debug;

use crate::error::{AppError, AppResult};
use crate::uploads::UploadedImage;

/// Raw fields of the horse form.
///
/// Nothing is validated here except that the text fields were sent.
#[derive(Debug)]
pub struct HorseForm {
    pub name: String,
    pub description: String,
    /// Unparsed price text.
    pub price: String,
    /// `None` when the form had no file part at all.
    pub image: Option<UploadedImage>,
}

impl HorseForm {
    /// Reads every part of the request.
    ///
    /// A part named `image` only counts as a file part when its
    /// Content-Disposition carries a `filename` (possibly empty). Parts with
    /// other names are ignored.
    ///
    /// ## Errors
    /// * `400` - a text field is missing, or the body is not valid multipart
    /// * `413` - the body went over the size limit while streaming
    pub async fn from_multipart(mut multipart: Multipart) -> AppResult<Self> {
        let mut name = None;
        let mut description = None;
        let mut price = None;
        let mut image = None;

        while let Some(field) = multipart.next_field().await? {
            let field_name = field.name().unwrap_or_default().to_string();

            match field_name.as_str() {
                "name" => name = Some(field.text().await?),
                "description" => description = Some(field.text().await?),
                "price" => price = Some(field.text().await?),
                "image" => {
                    let file_name = field.file_name().map(str::to_string);
                    let bytes = field.bytes().await?;
                    if let Some(file_name) = file_name {
                        image = Some(UploadedImage { file_name, bytes });
                    }
                }
                other => debug!(field = %other, "Ignoring unknown form field"),
            }
        }

        Ok(HorseForm {
            name: name.ok_or_else(|| missing("name"))?,
            description: description.ok_or_else(|| missing("description"))?,
            price: price.ok_or_else(|| missing("price"))?,
            image,
        })
    }
}

fn missing(field: &str) -> AppError {
    AppError::BadRequest(format!("Missing form field: {field}"))
}
