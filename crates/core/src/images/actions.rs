use chrono::{DateTime, Duration, Utc};

use super::types::Action;

/// Verb recorded when a user bookmarks an image.
pub const VERB_BOOKMARKED: &str = "bookmarked image";

/// Verb recorded when a user likes an image.
pub const VERB_LIKES: &str = "likes";

/// Window in which a repeated action by the same user is not recorded again.
pub fn similar_action_window() -> Duration {
    Duration::seconds(60)
}

/// Returns true if `candidate` repeats one of `recent` within the similarity window.
///
/// Two actions are similar when they share user, verb and target.
pub fn is_similar_recent_action(recent: &[Action], candidate: &Action, now: DateTime<Utc>) -> bool {
    let cutoff = now - similar_action_window();
    recent.iter().any(|action| {
        action.user_id == candidate.user_id
            && action.verb == candidate.verb
            && action.target_id == candidate.target_id
            && action.created_at >= cutoff
    })
}

/// Lower bound of `created_at` for actions that count as recent at `now`.
pub fn recent_actions_since(now: DateTime<Utc>) -> DateTime<Utc> {
    now - similar_action_window()
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn test_same_action_within_window_is_similar() {
        let now = Utc::now();
        let user = Uuid::new_v4();
        let target = Some(Uuid::new_v4());
        let previous = Action::new(user, VERB_LIKES, target).with_created_at(now - Duration::seconds(30));
        let candidate = Action::new(user, VERB_LIKES, target);

        assert!(is_similar_recent_action(&[previous], &candidate, now));
    }

    #[test]
    fn test_action_outside_window_is_not_similar() {
        let now = Utc::now();
        let user = Uuid::new_v4();
        let target = Some(Uuid::new_v4());
        let previous = Action::new(user, VERB_LIKES, target).with_created_at(now - Duration::seconds(61));
        let candidate = Action::new(user, VERB_LIKES, target);

        assert!(!is_similar_recent_action(&[previous], &candidate, now));
    }

    #[test]
    fn test_different_verb_or_target_is_not_similar() {
        let now = Utc::now();
        let user = Uuid::new_v4();
        let target = Some(Uuid::new_v4());
        let previous = Action::new(user, VERB_BOOKMARKED, target).with_created_at(now);
        let other_target = Action::new(user, VERB_LIKES, Some(Uuid::new_v4())).with_created_at(now);
        let candidate = Action::new(user, VERB_LIKES, target);

        assert!(!is_similar_recent_action(&[previous, other_target], &candidate, now));
    }

    #[test]
    fn test_different_user_is_not_similar() {
        let now = Utc::now();
        let target = Some(Uuid::new_v4());
        let previous = Action::new(Uuid::new_v4(), VERB_LIKES, target).with_created_at(now);
        let candidate = Action::new(Uuid::new_v4(), VERB_LIKES, target);

        assert!(!is_similar_recent_action(&[previous], &candidate, now));
    }

    #[test]
    fn test_recent_actions_since() {
        let now = Utc::now();
        assert_eq!(recent_actions_since(now), now - Duration::seconds(60));
    }
}
