use uuid::Uuid;

/// Sorted set holding one member per viewed image, scored by views.
pub const IMAGE_RANKING_KEY: &str = "image_ranking";

/// Returns the counter key holding the total views of an image.
pub fn image_views_key(image_id: Uuid) -> String {
    format!("image:{}:views", image_id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_image_views_key() {
        assert_eq!(
            image_views_key(Uuid::nil()),
            "image:00000000-0000-0000-0000-000000000000:views"
        );
    }
}
