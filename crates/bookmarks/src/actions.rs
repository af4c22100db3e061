//! Activity stream recording.

use chrono::Utc;
use uuid::Uuid;

use bookmarks_core::images::{is_similar_recent_action, recent_actions_since, Action};
use bookmarks_core::storage::{ActionRepository, RepositoryError};

/// Records that `user_id` did `verb` on `target_id`.
///
/// Skipped when the same user recorded the same verb on the same target
/// within the last minute. Returns whether an action was stored.
pub async fn create_action(
    actions: &dyn ActionRepository,
    user_id: Uuid,
    verb: &str,
    target_id: Option<Uuid>,
) -> Result<bool, RepositoryError> {
    let now = Utc::now();
    let candidate = Action::new(user_id, verb, target_id).with_created_at(now);

    let recent = actions
        .get_recent_actions(user_id, recent_actions_since(now))
        .await?;
    if is_similar_recent_action(&recent, &candidate, now) {
        tracing::debug!(user_id = %user_id, verb, "skipping repeated action");
        return Ok(false);
    }

    actions.create_action(&candidate).await?;
    Ok(true)
}
