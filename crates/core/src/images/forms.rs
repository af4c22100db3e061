use serde::{Deserialize, Serialize};
use url::Url;

use crate::serde::deserialize_trimmed_string;

use super::error::ImageFormError;

/// Maximum title length accepted by the create form.
pub const MAX_TITLE_LENGTH: usize = 200;

/// File extensions accepted for bookmarked images.
pub const VALID_IMAGE_EXTENSIONS: [&str; 2] = ["jpg", "jpeg"];

/// Raw data submitted to the image create form.
///
/// Every field is optional so the same type can be bound from the
/// bookmarklet's query string and from a POSTed form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageForm {
    #[serde(default, deserialize_with = "deserialize_trimmed_string")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "deserialize_trimmed_string")]
    pub url: Option<String>,
    #[serde(default, deserialize_with = "deserialize_trimmed_string")]
    pub description: Option<String>,
}

/// Cleaned form data, ready to be turned into an `Image`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidImageForm {
    pub title: String,
    pub url: String,
    pub description: Option<String>,
}

/// Per-field validation errors of the create form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImageFormErrors {
    pub title: Option<ImageFormError>,
    pub url: Option<ImageFormError>,
}

impl ImageFormErrors {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.url.is_none()
    }
}

impl ImageForm {
    /// Validates the form, returning the cleaned values or every field error.
    pub fn validate(&self) -> Result<ValidImageForm, ImageFormErrors> {
        let mut errors = ImageFormErrors::default();

        let title = match self.title.as_deref().map(str::trim) {
            None | Some("") => {
                errors.title = Some(ImageFormError::Required("title"));
                None
            }
            Some(t) if t.chars().count() > MAX_TITLE_LENGTH => {
                errors.title = Some(ImageFormError::TooLong {
                    field: "title",
                    max: MAX_TITLE_LENGTH,
                });
                None
            }
            Some(t) => Some(t.to_string()),
        };

        let url = match self.url.as_deref().map(str::trim) {
            None | Some("") => {
                errors.url = Some(ImageFormError::Required("url"));
                None
            }
            Some(u) => match validate_image_url(u) {
                Ok(()) => Some(u.to_string()),
                Err(e) => {
                    errors.url = Some(e);
                    None
                }
            },
        };

        match (title, url) {
            (Some(title), Some(url)) if errors.is_empty() => Ok(ValidImageForm {
                title,
                url,
                description: self
                    .description
                    .as_deref()
                    .map(str::trim)
                    .filter(|d| !d.is_empty())
                    .map(String::from),
            }),
            _ => Err(errors),
        }
    }
}

/// Checks that `value` is an absolute http(s) URL pointing at a JPEG file.
pub fn validate_image_url(value: &str) -> Result<(), ImageFormError> {
    let parsed = Url::parse(value).map_err(|_| ImageFormError::InvalidUrl)?;

    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(ImageFormError::InvalidUrl);
    }

    let extension = parsed
        .path()
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_lowercase())
        .unwrap_or_default();

    if VALID_IMAGE_EXTENSIONS.contains(&extension.as_str()) {
        Ok(())
    } else {
        Err(ImageFormError::InvalidExtension)
    }
}
