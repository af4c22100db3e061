use std::collections::HashMap;

use uuid::Uuid;

use super::types::Image;

/// Number of images shown on the ranking page.
pub const DEFAULT_RANKING_SIZE: usize = 10;

/// Orders `images` by their position in `ranked_ids`.
///
/// Ids without a matching image are skipped, as are images that do not
/// appear in the ranking.
pub fn order_by_ranking(ranked_ids: &[Uuid], images: Vec<Image>) -> Vec<Image> {
    let mut by_id: HashMap<Uuid, Image> = images.into_iter().map(|i| (i.id, i)).collect();
    ranked_ids
        .iter()
        .filter_map(|id| by_id.remove(id))
        .collect()
}

/// Parses ranking members into image ids, dropping members that are not UUIDs.
pub fn parse_ranked_ids<I, S>(members: I) -> Vec<Uuid>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    members
        .into_iter()
        .filter_map(|m| Uuid::parse_str(m.as_ref()).ok())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn image(id: Uuid) -> Image {
        Image::new(Uuid::nil(), "t", "http://example.com/a.jpg").with_id(id)
    }

    #[test]
    fn test_order_follows_ranking() {
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        let c = Uuid::new_v4();

        let ordered = order_by_ranking(&[c, a, b], vec![image(a), image(b), image(c)]);
        let ids: Vec<Uuid> = ordered.iter().map(|i| i.id).collect();

        assert_eq!(ids, vec![c, a, b]);
    }

    #[test]
    fn test_missing_images_are_skipped() {
        let a = Uuid::new_v4();
        let deleted = Uuid::new_v4();

        let ordered = order_by_ranking(&[deleted, a], vec![image(a)]);

        assert_eq!(ordered.len(), 1);
        assert_eq!(ordered[0].id, a);
    }

    #[test]
    fn test_unranked_images_are_dropped() {
        let a = Uuid::new_v4();
        let ordered = order_by_ranking(&[], vec![image(a)]);
        assert!(ordered.is_empty());
    }

    #[test]
    fn test_parse_ranked_ids_skips_garbage() {
        let id = Uuid::new_v4();
        let ids = parse_ranked_ids(vec![id.to_string(), "42".to_string()]);
        assert_eq!(ids, vec![id]);
    }
}
