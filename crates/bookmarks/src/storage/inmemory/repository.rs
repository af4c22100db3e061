use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use uuid::Uuid;

use bookmarks_core::images::{Action, Image, User};
use bookmarks_core::storage::{
    ActionRepository, ImageRepository, LikeRepository, RepositoryError, Result, UserRepository,
};

/// In-memory storage backend.
///
/// Data is not persisted and will be lost when the repository is dropped.
/// Clones share the same underlying maps.
#[derive(Debug, Clone, Default)]
pub struct InMemoryRepository {
    images: Arc<RwLock<HashMap<Uuid, Image>>>,
    users: Arc<RwLock<HashMap<Uuid, User>>>,
    /// `(image_id, user_id)` pairs.
    likes: Arc<RwLock<BTreeSet<(Uuid, Uuid)>>>,
    actions: Arc<RwLock<Vec<Action>>>,
}

impl InMemoryRepository {
    /// Creates a new empty in-memory repository.
    pub fn new() -> Self {
        Self::default()
    }
}

/// Newest first; the ID breaks ties so paging is stable.
fn newest_first(a: &Image, b: &Image) -> std::cmp::Ordering {
    b.created_at
        .cmp(&a.created_at)
        .then_with(|| b.id.cmp(&a.id))
}

#[async_trait]
impl ImageRepository for InMemoryRepository {
    async fn get_image(&self, id: Uuid) -> Result<Option<Image>> {
        let images = self.images.read().await;
        Ok(images.get(&id).cloned())
    }

    async fn get_image_by_id_and_slug(&self, id: Uuid, slug: &str) -> Result<Option<Image>> {
        let images = self.images.read().await;
        Ok(images.get(&id).filter(|i| i.slug == slug).cloned())
    }

    async fn create_image(&self, image: &Image) -> Result<()> {
        let mut images = self.images.write().await;
        if images.contains_key(&image.id) {
            return Err(RepositoryError::AlreadyExists {
                entity_type: "Image",
                id: image.id.to_string(),
            });
        }
        images.insert(image.id, image.clone());
        Ok(())
    }

    async fn count_images(&self) -> Result<usize> {
        Ok(self.images.read().await.len())
    }

    async fn list_images(&self, offset: usize, limit: usize) -> Result<Vec<Image>> {
        let images = self.images.read().await;
        let mut all: Vec<&Image> = images.values().collect();
        all.sort_by(|a, b| newest_first(a, b));
        Ok(all
            .into_iter()
            .skip(offset)
            .take(limit)
            .cloned()
            .collect())
    }

    async fn get_images_by_ids(&self, ids: &[Uuid]) -> Result<Vec<Image>> {
        let images = self.images.read().await;
        Ok(ids.iter().filter_map(|id| images.get(id).cloned()).collect())
    }
}

#[async_trait]
impl UserRepository for InMemoryRepository {
    async fn get_user(&self, id: Uuid) -> Result<Option<User>> {
        let users = self.users.read().await;
        Ok(users.get(&id).cloned())
    }

    async fn get_user_by_username(&self, username: &str) -> Result<Option<User>> {
        let users = self.users.read().await;
        Ok(users.values().find(|u| u.username == username).cloned())
    }

    async fn create_user(&self, user: &User) -> Result<()> {
        let mut users = self.users.write().await;
        if users.contains_key(&user.id) {
            return Err(RepositoryError::AlreadyExists {
                entity_type: "User",
                id: user.id.to_string(),
            });
        }
        if users.values().any(|u| u.username == user.username) {
            return Err(RepositoryError::AlreadyExists {
                entity_type: "User",
                id: user.username.clone(),
            });
        }
        users.insert(user.id, user.clone());
        Ok(())
    }
}

#[async_trait]
impl LikeRepository for InMemoryRepository {
    async fn add_like(&self, image_id: Uuid, user_id: Uuid) -> Result<()> {
        if !self.images.read().await.contains_key(&image_id) {
            return Err(RepositoryError::not_found("Image", image_id));
        }
        self.likes.write().await.insert((image_id, user_id));
        Ok(())
    }

    async fn remove_like(&self, image_id: Uuid, user_id: Uuid) -> Result<()> {
        self.likes.write().await.remove(&(image_id, user_id));
        Ok(())
    }

    async fn get_likers(&self, image_id: Uuid) -> Result<Vec<User>> {
        let likes = self.likes.read().await;
        let users = self.users.read().await;

        let mut likers: Vec<User> = likes
            .range((image_id, Uuid::nil())..=(image_id, Uuid::max()))
            .filter_map(|(_, user_id)| users.get(user_id).cloned())
            .collect();
        likers.sort_by(|a, b| a.username.cmp(&b.username));
        Ok(likers)
    }

    async fn has_liked(&self, image_id: Uuid, user_id: Uuid) -> Result<bool> {
        Ok(self.likes.read().await.contains(&(image_id, user_id)))
    }
}

#[async_trait]
impl ActionRepository for InMemoryRepository {
    async fn create_action(&self, action: &Action) -> Result<()> {
        self.actions.write().await.push(action.clone());
        Ok(())
    }

    async fn get_recent_actions(
        &self,
        user_id: Uuid,
        since: DateTime<Utc>,
    ) -> Result<Vec<Action>> {
        let actions = self.actions.read().await;
        Ok(actions
            .iter()
            .filter(|a| a.user_id == user_id && a.created_at >= since)
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn image_at(user_id: Uuid, title: &str, minutes_ago: i64) -> Image {
        Image::new(user_id, title, "http://example.com/a.jpg")
            .with_created_at(Utc::now() - Duration::minutes(minutes_ago))
    }

    #[tokio::test]
    async fn test_image_create_and_get() {
        let repo = InMemoryRepository::new();
        let image = image_at(Uuid::new_v4(), "Sunset", 0);

        repo.create_image(&image).await.unwrap();

        assert_eq!(repo.get_image(image.id).await.unwrap(), Some(image.clone()));
        assert_eq!(repo.count_images().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_image_create_duplicate() {
        let repo = InMemoryRepository::new();
        let image = image_at(Uuid::new_v4(), "Sunset", 0);

        repo.create_image(&image).await.unwrap();
        let result = repo.create_image(&image).await;

        assert!(matches!(
            result,
            Err(RepositoryError::AlreadyExists { entity_type: "Image", .. })
        ));
    }

    #[tokio::test]
    async fn test_get_image_by_id_and_slug() {
        let repo = InMemoryRepository::new();
        let image = image_at(Uuid::new_v4(), "Sunset Beach", 0);
        repo.create_image(&image).await.unwrap();

        assert!(repo
            .get_image_by_id_and_slug(image.id, "sunset-beach")
            .await
            .unwrap()
            .is_some());
        assert!(repo
            .get_image_by_id_and_slug(image.id, "sunset")
            .await
            .unwrap()
            .is_none());
        assert!(repo
            .get_image_by_id_and_slug(Uuid::new_v4(), "sunset-beach")
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn test_list_images_newest_first_with_offset() {
        let repo = InMemoryRepository::new();
        let user = Uuid::new_v4();
        let oldest = image_at(user, "oldest", 30);
        let middle = image_at(user, "middle", 20);
        let newest = image_at(user, "newest", 10);
        for image in [&middle, &oldest, &newest] {
            repo.create_image(image).await.unwrap();
        }

        let first: Vec<String> = repo
            .list_images(0, 2)
            .await
            .unwrap()
            .into_iter()
            .map(|i| i.title)
            .collect();
        assert_eq!(first, vec!["newest", "middle"]);

        let rest = repo.list_images(2, 2).await.unwrap();
        assert_eq!(rest.len(), 1);
        assert_eq!(rest[0].title, "oldest");

        assert!(repo.list_images(3, 2).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_get_images_by_ids_ignores_unknown() {
        let repo = InMemoryRepository::new();
        let image = image_at(Uuid::new_v4(), "a", 0);
        repo.create_image(&image).await.unwrap();

        let found = repo
            .get_images_by_ids(&[Uuid::new_v4(), image.id])
            .await
            .unwrap();

        assert_eq!(found, vec![image]);
    }

    #[tokio::test]
    async fn test_user_create_and_lookup() {
        let repo = InMemoryRepository::new();
        let user = User::new("alice");
        repo.create_user(&user).await.unwrap();

        assert_eq!(repo.get_user(user.id).await.unwrap(), Some(user.clone()));
        assert_eq!(
            repo.get_user_by_username("alice").await.unwrap(),
            Some(user)
        );
        assert!(repo.get_user_by_username("bob").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_duplicate_username_rejected() {
        let repo = InMemoryRepository::new();
        repo.create_user(&User::new("alice")).await.unwrap();

        let result = repo.create_user(&User::new("alice")).await;

        assert!(matches!(
            result,
            Err(RepositoryError::AlreadyExists { entity_type: "User", .. })
        ));
    }

    #[tokio::test]
    async fn test_like_unlike() {
        let repo = InMemoryRepository::new();
        let alice = User::new("alice");
        repo.create_user(&alice).await.unwrap();
        let image = image_at(alice.id, "a", 0);
        repo.create_image(&image).await.unwrap();

        repo.add_like(image.id, alice.id).await.unwrap();
        repo.add_like(image.id, alice.id).await.unwrap();
        assert!(repo.has_liked(image.id, alice.id).await.unwrap());
        assert_eq!(repo.get_likers(image.id).await.unwrap().len(), 1);

        repo.remove_like(image.id, alice.id).await.unwrap();
        repo.remove_like(image.id, alice.id).await.unwrap();
        assert!(!repo.has_liked(image.id, alice.id).await.unwrap());
        assert!(repo.get_likers(image.id).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_like_missing_image() {
        let repo = InMemoryRepository::new();

        let result = repo.add_like(Uuid::new_v4(), Uuid::new_v4()).await;

        assert!(matches!(
            result,
            Err(RepositoryError::NotFound { entity_type: "Image", .. })
        ));
    }

    #[tokio::test]
    async fn test_likers_sorted_by_username_and_scoped_to_image() {
        let repo = InMemoryRepository::new();
        let zoe = User::new("zoe");
        let bob = User::new("bob");
        repo.create_user(&zoe).await.unwrap();
        repo.create_user(&bob).await.unwrap();
        let liked = image_at(zoe.id, "liked", 0);
        let other = image_at(zoe.id, "other", 0);
        repo.create_image(&liked).await.unwrap();
        repo.create_image(&other).await.unwrap();

        repo.add_like(liked.id, zoe.id).await.unwrap();
        repo.add_like(liked.id, bob.id).await.unwrap();
        repo.add_like(other.id, bob.id).await.unwrap();

        let names: Vec<String> = repo
            .get_likers(liked.id)
            .await
            .unwrap()
            .into_iter()
            .map(|u| u.username)
            .collect();
        assert_eq!(names, vec!["bob", "zoe"]);
    }

    #[tokio::test]
    async fn test_recent_actions_filters_user_and_time() {
        let repo = InMemoryRepository::new();
        let user = Uuid::new_v4();
        let now = Utc::now();

        let old = Action::new(user, "likes", None).with_created_at(now - Duration::minutes(5));
        let fresh = Action::new(user, "likes", None).with_created_at(now);
        let someone_else = Action::new(Uuid::new_v4(), "likes", None).with_created_at(now);
        for action in [&old, &fresh, &someone_else] {
            repo.create_action(action).await.unwrap();
        }

        let recent = repo
            .get_recent_actions(user, now - Duration::seconds(60))
            .await
            .unwrap();

        assert_eq!(recent, vec![fresh]);
    }
}
