mod actions;
mod error;
mod forms;
mod ranking;
mod slug;
mod types;

pub use actions::{
    is_similar_recent_action, recent_actions_since, similar_action_window, VERB_BOOKMARKED,
    VERB_LIKES,
};
pub use error::ImageFormError;
pub use forms::{
    validate_image_url, ImageForm, ImageFormErrors, ValidImageForm, MAX_TITLE_LENGTH,
    VALID_IMAGE_EXTENSIONS,
};
pub use ranking::{order_by_ranking, parse_ranked_ids, DEFAULT_RANKING_SIZE};
pub use slug::slugify;
pub use types::{Action, Image, RankedImage, User};
