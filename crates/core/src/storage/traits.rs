use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::images::{Action, Image, User};

use super::Result;

/// Repository for bookmarked images.
#[async_trait]
pub trait ImageRepository: Send + Sync {
    /// Gets an image by its ID.
    async fn get_image(&self, id: Uuid) -> Result<Option<Image>>;

    /// Gets an image only if both its ID and slug match.
    async fn get_image_by_id_and_slug(&self, id: Uuid, slug: &str) -> Result<Option<Image>>;

    /// Creates a new image.
    async fn create_image(&self, image: &Image) -> Result<()>;

    /// Total number of images.
    async fn count_images(&self) -> Result<usize>;

    /// Lists images newest first, skipping `offset` and returning at most `limit`.
    async fn list_images(&self, offset: usize, limit: usize) -> Result<Vec<Image>>;

    /// Gets every image whose ID is in `ids`, in no particular order.
    ///
    /// Unknown IDs are ignored.
    async fn get_images_by_ids(&self, ids: &[Uuid]) -> Result<Vec<Image>>;
}

/// Repository for user operations.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Gets a user by their ID.
    async fn get_user(&self, id: Uuid) -> Result<Option<User>>;

    /// Gets a user by their username.
    async fn get_user_by_username(&self, username: &str) -> Result<Option<User>>;

    /// Creates a new user.
    async fn create_user(&self, user: &User) -> Result<()>;
}

/// Repository for the image/user "likes" relation.
#[async_trait]
pub trait LikeRepository: Send + Sync {
    /// Records that `user_id` likes `image_id`. Liking twice is a no-op.
    async fn add_like(&self, image_id: Uuid, user_id: Uuid) -> Result<()>;

    /// Removes a like. Removing a missing like is a no-op.
    async fn remove_like(&self, image_id: Uuid, user_id: Uuid) -> Result<()>;

    /// Users who like the image, ordered by username.
    async fn get_likers(&self, image_id: Uuid) -> Result<Vec<User>>;

    /// Whether `user_id` likes `image_id`.
    async fn has_liked(&self, image_id: Uuid, user_id: Uuid) -> Result<bool>;
}

/// Repository for the activity stream.
#[async_trait]
pub trait ActionRepository: Send + Sync {
    /// Stores an action.
    async fn create_action(&self, action: &Action) -> Result<()>;

    /// Actions of `user_id` created at or after `since`.
    async fn get_recent_actions(
        &self,
        user_id: Uuid,
        since: DateTime<Utc>,
    ) -> Result<Vec<Action>>;
}
