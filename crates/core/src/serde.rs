//! Serde helpers for HTML form and query-string fields.

use serde::{Deserialize, Deserializer};

/// Reads an optional text field, trimming it and mapping blank input to `None`.
///
/// Browsers submit every input of a form, so an untouched field arrives as
/// `""` rather than being absent.
pub fn deserialize_trimmed_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(raw.and_then(|value| {
        let trimmed = value.trim();
        (!trimmed.is_empty()).then(|| trimmed.to_string())
    }))
}
