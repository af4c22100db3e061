use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::slug::slugify;

/// A registered user that can bookmark and like images.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Creates a new user with a generated ID.
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            username: username.into(),
            created_at: Utc::now(),
        }
    }

    /// Sets a specific ID for this user (useful for testing).
    pub fn with_id(mut self, id: Uuid) -> Self {
        self.id = id;
        self
    }
}

/// An image bookmarked from an external site.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Image {
    pub id: Uuid,
    /// The user who bookmarked the image.
    pub user_id: Uuid,
    pub title: String,
    /// URL-friendly version of the title, part of the detail URL.
    pub slug: String,
    /// Source URL of the image.
    pub url: String,
    pub description: Option<String>,
    /// Calendar day the bookmark was created.
    pub created: NaiveDate,
    pub created_at: DateTime<Utc>,
}

impl Image {
    /// Creates a new image bookmark owned by `user_id`.
    ///
    /// The slug is derived from the title.
    pub fn new(user_id: Uuid, title: impl Into<String>, url: impl Into<String>) -> Self {
        let title = title.into();
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            user_id,
            slug: slugify(&title),
            title,
            url: url.into(),
            description: None,
            created: now.date_naive(),
            created_at: now,
        }
    }

    /// Sets the description for this image.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets a specific ID for this image (useful for testing).
    pub fn with_id(mut self, id: Uuid) -> Self {
        self.id = id;
        self
    }

    /// Sets the creation timestamp (useful for testing ordering).
    pub fn with_created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = created_at;
        self.created = created_at.date_naive();
        self
    }

    /// Canonical URL of the image detail page.
    pub fn absolute_url(&self) -> String {
        format!("/images/detail/{}/{}/", self.id, self.slug)
    }
}

/// An entry of the user activity stream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Action {
    pub id: Uuid,
    pub user_id: Uuid,
    /// What the user did, e.g. `"bookmarked image"` or `"likes"`.
    pub verb: String,
    /// The object the action refers to, if any.
    pub target_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}

impl Action {
    pub fn new(user_id: Uuid, verb: impl Into<String>, target_id: Option<Uuid>) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            verb: verb.into(),
            target_id,
            created_at: Utc::now(),
        }
    }

    /// Sets the creation timestamp (useful for testing).
    pub fn with_created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = created_at;
        self
    }
}

/// An image together with the number of times its detail page was viewed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RankedImage {
    pub image: Image,
    pub views: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_image_new_derives_slug() {
        let image = Image::new(Uuid::nil(), "Duke and Basie", "http://x.com/a.jpg");
        assert_eq!(image.slug, "duke-and-basie");
        assert_eq!(image.description, None);
        assert_eq!(image.created, image.created_at.date_naive());
    }

    #[test]
    fn test_absolute_url() {
        let id = Uuid::nil();
        let image = Image::new(Uuid::new_v4(), "Red Panda", "http://x.com/a.jpg").with_id(id);
        assert_eq!(
            image.absolute_url(),
            "/images/detail/00000000-0000-0000-0000-000000000000/red-panda/"
        );
    }

    #[test]
    fn test_with_created_at_updates_created_day() {
        let ts = DateTime::parse_from_rfc3339("2024-06-15T23:30:00Z")
            .unwrap()
            .with_timezone(&Utc);
        let image = Image::new(Uuid::nil(), "t", "u").with_created_at(ts);
        assert_eq!(image.created, NaiveDate::from_ymd_opt(2024, 6, 15).unwrap());
    }

    #[test]
    fn test_action_new() {
        let user = Uuid::new_v4();
        let target = Uuid::new_v4();
        let action = Action::new(user, "likes", Some(target));
        assert_eq!(action.user_id, user);
        assert_eq!(action.verb, "likes");
        assert_eq!(action.target_id, Some(target));
    }
}
