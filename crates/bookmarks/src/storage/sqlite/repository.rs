//! SQLite repository implementation.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio_rusqlite::Connection;
use uuid::Uuid;

use bookmarks_core::images::{Action, Image, User};
use bookmarks_core::storage::{
    ActionRepository, ImageRepository, LikeRepository, RepositoryError, Result, UserRepository,
};

use super::conversions::{format_date, format_datetime, row_to_action, row_to_image, row_to_user};
use super::error::map_tokio_rusqlite_error;
use super::schema;

/// Helper to wrap rusqlite errors for tokio_rusqlite closures.
fn wrap_err(e: rusqlite::Error) -> tokio_rusqlite::Error {
    tokio_rusqlite::Error::Rusqlite(e)
}

/// SQLite-based repository for images, users, likes and actions.
pub struct SqliteRepository {
    conn: Connection,
}

impl SqliteRepository {
    /// Opens (or creates) a file-based database and ensures the schema exists.
    pub async fn new(path: &str) -> Result<Self> {
        let conn = Connection::open(path)
            .await
            .map_err(|e| RepositoryError::ConnectionFailed(e.to_string()))?;

        Self::init_schema(&conn).await?;

        Ok(Self { conn })
    }

    /// Creates a repository backed by an in-memory database.
    pub async fn new_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()
            .await
            .map_err(|e| RepositoryError::ConnectionFailed(e.to_string()))?;

        Self::init_schema(&conn).await?;

        Ok(Self { conn })
    }

    async fn init_schema(conn: &Connection) -> Result<()> {
        conn.call(|conn| {
            conn.execute_batch(schema::CREATE_TABLES)
                .map_err(wrap_err)?;
            Ok(())
        })
        .await
        .map_err(|e| RepositoryError::QueryFailed(e.to_string()))
    }
}

#[async_trait]
impl ImageRepository for SqliteRepository {
    async fn get_image(&self, id: Uuid) -> Result<Option<Image>> {
        let id_str = id.to_string();

        self.conn
            .call(move |conn| {
                let mut stmt = conn.prepare(schema::SELECT_IMAGE_BY_ID).map_err(wrap_err)?;
                match stmt.query_row([&id_str], row_to_image) {
                    Ok(image) => Ok(Some(image)),
                    Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                    Err(e) => Err(wrap_err(e)),
                }
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, "Image", id.to_string()))
    }

    async fn get_image_by_id_and_slug(&self, id: Uuid, slug: &str) -> Result<Option<Image>> {
        let id_str = id.to_string();
        let slug = slug.to_string();

        self.conn
            .call(move |conn| {
                let mut stmt = conn
                    .prepare(schema::SELECT_IMAGE_BY_ID_AND_SLUG)
                    .map_err(wrap_err)?;
                match stmt.query_row([&id_str, &slug], row_to_image) {
                    Ok(image) => Ok(Some(image)),
                    Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                    Err(e) => Err(wrap_err(e)),
                }
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, "Image", id.to_string()))
    }

    async fn create_image(&self, image: &Image) -> Result<()> {
        let id = image.id.to_string();
        let user_id = image.user_id.to_string();
        let title = image.title.clone();
        let slug = image.slug.clone();
        let url = image.url.clone();
        let description = image.description.clone();
        let created = format_date(&image.created);
        let created_at = format_datetime(&image.created_at);
        let image_id = image.id.to_string();

        self.conn
            .call(move |conn| {
                conn.execute(
                    schema::INSERT_IMAGE,
                    rusqlite::params![
                        id,
                        user_id,
                        title,
                        slug,
                        url,
                        description,
                        created,
                        created_at
                    ],
                )
                .map_err(wrap_err)?;
                Ok(())
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, "Image", image_id))
    }

    async fn count_images(&self) -> Result<usize> {
        self.conn
            .call(|conn| {
                let count: i64 = conn
                    .query_row(schema::COUNT_IMAGES, [], |row| row.get(0))
                    .map_err(wrap_err)?;
                Ok(count)
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, "Image", "unknown"))
            .and_then(|count| {
                usize::try_from(count)
                    .map_err(|_| RepositoryError::InvalidData(format!("Negative count: {count}")))
            })
    }

    async fn list_images(&self, offset: usize, limit: usize) -> Result<Vec<Image>> {
        let limit = i64::try_from(limit).unwrap_or(i64::MAX);
        let offset = i64::try_from(offset).unwrap_or(i64::MAX);

        self.conn
            .call(move |conn| {
                let mut stmt = conn.prepare(schema::SELECT_IMAGES_PAGE).map_err(wrap_err)?;
                let rows = stmt
                    .query_map(rusqlite::params![limit, offset], row_to_image)
                    .map_err(wrap_err)?;

                let mut images = Vec::new();
                for row_result in rows {
                    images.push(row_result.map_err(wrap_err)?);
                }
                Ok(images)
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, "Image", "unknown"))
    }

    async fn get_images_by_ids(&self, ids: &[Uuid]) -> Result<Vec<Image>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let sql = schema::select_images_by_ids(ids.len());
        let id_strs: Vec<String> = ids.iter().map(Uuid::to_string).collect();

        self.conn
            .call(move |conn| {
                let mut stmt = conn.prepare(&sql).map_err(wrap_err)?;
                let rows = stmt
                    .query_map(rusqlite::params_from_iter(id_strs.iter()), row_to_image)
                    .map_err(wrap_err)?;

                let mut images = Vec::new();
                for row_result in rows {
                    images.push(row_result.map_err(wrap_err)?);
                }
                Ok(images)
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, "Image", "unknown"))
    }
}

#[async_trait]
impl UserRepository for SqliteRepository {
    async fn get_user(&self, id: Uuid) -> Result<Option<User>> {
        let id_str = id.to_string();

        self.conn
            .call(move |conn| {
                let mut stmt = conn.prepare(schema::SELECT_USER_BY_ID).map_err(wrap_err)?;
                match stmt.query_row([&id_str], row_to_user) {
                    Ok(user) => Ok(Some(user)),
                    Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                    Err(e) => Err(wrap_err(e)),
                }
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, "User", id.to_string()))
    }

    async fn get_user_by_username(&self, username: &str) -> Result<Option<User>> {
        let username = username.to_string();
        let lookup = username.clone();

        self.conn
            .call(move |conn| {
                let mut stmt = conn
                    .prepare(schema::SELECT_USER_BY_USERNAME)
                    .map_err(wrap_err)?;
                match stmt.query_row([&lookup], row_to_user) {
                    Ok(user) => Ok(Some(user)),
                    Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                    Err(e) => Err(wrap_err(e)),
                }
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, "User", username))
    }

    async fn create_user(&self, user: &User) -> Result<()> {
        let id = user.id.to_string();
        let username = user.username.clone();
        let created_at = format_datetime(&user.created_at);
        let error_id = user.username.clone();

        self.conn
            .call(move |conn| {
                conn.execute(schema::INSERT_USER, rusqlite::params![id, username, created_at])
                    .map_err(wrap_err)?;
                Ok(())
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, "User", error_id))
    }
}

#[async_trait]
impl LikeRepository for SqliteRepository {
    async fn add_like(&self, image_id: Uuid, user_id: Uuid) -> Result<()> {
        let image_id_str = image_id.to_string();
        let user_id_str = user_id.to_string();

        self.conn
            .call(move |conn| {
                let exists: bool = conn
                    .query_row(
                        "SELECT EXISTS(SELECT 1 FROM images WHERE id = ?1)",
                        [&image_id_str],
                        |row| row.get(0),
                    )
                    .map_err(wrap_err)?;
                if !exists {
                    return Err(wrap_err(rusqlite::Error::QueryReturnedNoRows));
                }

                conn.execute(schema::INSERT_LIKE, [&image_id_str, &user_id_str])
                    .map_err(wrap_err)?;
                Ok(())
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, "Image", image_id.to_string()))
    }

    async fn remove_like(&self, image_id: Uuid, user_id: Uuid) -> Result<()> {
        let image_id_str = image_id.to_string();
        let user_id_str = user_id.to_string();

        self.conn
            .call(move |conn| {
                conn.execute(schema::DELETE_LIKE, [&image_id_str, &user_id_str])
                    .map_err(wrap_err)?;
                Ok(())
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, "Like", image_id.to_string()))
    }

    async fn get_likers(&self, image_id: Uuid) -> Result<Vec<User>> {
        let image_id_str = image_id.to_string();

        self.conn
            .call(move |conn| {
                let mut stmt = conn.prepare(schema::SELECT_LIKERS).map_err(wrap_err)?;
                let rows = stmt
                    .query_map([&image_id_str], row_to_user)
                    .map_err(wrap_err)?;

                let mut users = Vec::new();
                for row_result in rows {
                    users.push(row_result.map_err(wrap_err)?);
                }
                Ok(users)
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, "User", image_id.to_string()))
    }

    async fn has_liked(&self, image_id: Uuid, user_id: Uuid) -> Result<bool> {
        let image_id_str = image_id.to_string();
        let user_id_str = user_id.to_string();

        self.conn
            .call(move |conn| {
                let liked: bool = conn
                    .query_row(
                        schema::SELECT_LIKE_EXISTS,
                        [&image_id_str, &user_id_str],
                        |row| row.get(0),
                    )
                    .map_err(wrap_err)?;
                Ok(liked)
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, "Like", image_id.to_string()))
    }
}

#[async_trait]
impl ActionRepository for SqliteRepository {
    async fn create_action(&self, action: &Action) -> Result<()> {
        let id = action.id.to_string();
        let user_id = action.user_id.to_string();
        let verb = action.verb.clone();
        let target_id = action.target_id.map(|t| t.to_string());
        let created_at = format_datetime(&action.created_at);
        let action_id = action.id.to_string();

        self.conn
            .call(move |conn| {
                conn.execute(
                    schema::INSERT_ACTION,
                    rusqlite::params![id, user_id, verb, target_id, created_at],
                )
                .map_err(wrap_err)?;
                Ok(())
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, "Action", action_id))
    }

    async fn get_recent_actions(
        &self,
        user_id: Uuid,
        since: DateTime<Utc>,
    ) -> Result<Vec<Action>> {
        let user_id_str = user_id.to_string();
        let since_str = format_datetime(&since);

        self.conn
            .call(move |conn| {
                let mut stmt = conn
                    .prepare(schema::SELECT_RECENT_ACTIONS)
                    .map_err(wrap_err)?;
                let rows = stmt
                    .query_map([&user_id_str, &since_str], row_to_action)
                    .map_err(wrap_err)?;

                let mut actions = Vec::new();
                for row_result in rows {
                    actions.push(row_result.map_err(wrap_err)?);
                }
                Ok(actions)
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, "Action", user_id.to_string()))
    }
}
