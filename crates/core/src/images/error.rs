use thiserror::Error;

/// Validation errors for a single field of the image create form.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ImageFormError {
    #[error("This field is required.")]
    Required(&'static str),
    #[error("Ensure {field} has at most {max} characters.")]
    TooLong { field: &'static str, max: usize },
    #[error("Enter a valid URL.")]
    InvalidUrl,
    #[error("The given URL does not match valid image extensions.")]
    InvalidExtension,
}
