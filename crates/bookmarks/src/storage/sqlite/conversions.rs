//! SQLite row conversion functions.
//!
//! Pure functions between SQLite rows and domain types, testable without
//! a database.

use bookmarks_core::images::{Action, Image, User};
use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};
use rusqlite::Row;
use uuid::Uuid;

/// Convert a SQLite row to a User.
///
/// Expected columns: id, username, created_at
pub fn row_to_user(row: &Row) -> rusqlite::Result<User> {
    let id: String = row.get(0)?;
    let username: String = row.get(1)?;
    let created_at: String = row.get(2)?;

    Ok(User {
        id: parse_uuid(&id)?,
        username,
        created_at: parse_datetime(&created_at)?,
    })
}

/// Convert a SQLite row to an Image.
///
/// Expected columns: id, user_id, title, slug, url, description, created, created_at
pub fn row_to_image(row: &Row) -> rusqlite::Result<Image> {
    let id: String = row.get(0)?;
    let user_id: String = row.get(1)?;
    let title: String = row.get(2)?;
    let slug: String = row.get(3)?;
    let url: String = row.get(4)?;
    let description: Option<String> = row.get(5)?;
    let created: String = row.get(6)?;
    let created_at: String = row.get(7)?;

    Ok(Image {
        id: parse_uuid(&id)?,
        user_id: parse_uuid(&user_id)?,
        title,
        slug,
        url,
        description,
        created: parse_date(&created)?,
        created_at: parse_datetime(&created_at)?,
    })
}

/// Convert a SQLite row to an Action.
///
/// Expected columns: id, user_id, verb, target_id, created_at
pub fn row_to_action(row: &Row) -> rusqlite::Result<Action> {
    let id: String = row.get(0)?;
    let user_id: String = row.get(1)?;
    let verb: String = row.get(2)?;
    let target_id: Option<String> = row.get(3)?;
    let created_at: String = row.get(4)?;

    Ok(Action {
        id: parse_uuid(&id)?,
        user_id: parse_uuid(&user_id)?,
        verb,
        target_id: target_id.as_deref().map(parse_uuid).transpose()?,
        created_at: parse_datetime(&created_at)?,
    })
}

fn conversion_error(e: impl std::error::Error + Send + Sync + 'static) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(0, rusqlite::types::Type::Text, Box::new(e))
}

fn parse_uuid(s: &str) -> rusqlite::Result<Uuid> {
    Uuid::parse_str(s).map_err(conversion_error)
}

fn parse_date(s: &str) -> rusqlite::Result<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(conversion_error)
}

fn parse_datetime(s: &str) -> rusqlite::Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(conversion_error)
}

/// Format a DateTime<Utc> for storage.
///
/// Always microsecond precision with a `Z` suffix, so strings sort in time order.
pub fn format_datetime(dt: &DateTime<Utc>) -> String {
    dt.to_rfc3339_opts(SecondsFormat::Micros, true)
}

/// Format a NaiveDate for storage (YYYY-MM-DD).
pub fn format_date(date: &NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}
