use askama::Template;
use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};

use bookmarks_core::images::{Image, ImageForm, ImageFormErrors, RankedImage, User};
use bookmarks_core::pagination::Page;

use super::flash::FlashMessage;

/// Template wrapper that converts Askama templates into HTML responses.
pub struct HtmlTemplate<T>(pub T);

impl<T> IntoResponse for HtmlTemplate<T>
where
    T: Template,
{
    fn into_response(self) -> Response {
        match self.0.render() {
            Ok(html) => Html(html).into_response(),
            Err(err) => {
                tracing::error!(error = %err, "template rendering failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    format!("Failed to render template: {err}"),
                )
                    .into_response()
            }
        }
    }
}

/// Bookmark form, also used by the bookmarklet with query-string values.
#[derive(Template)]
#[template(path = "images/create.html")]
pub struct CreateTemplate {
    pub section: &'static str,
    pub username: Option<String>,
    pub title: String,
    pub url: String,
    pub description: String,
    pub title_error: Option<String>,
    pub url_error: Option<String>,
}

impl CreateTemplate {
    pub fn new(user: &User, form: &ImageForm, errors: &ImageFormErrors) -> Self {
        Self {
            section: "images",
            username: Some(user.username.clone()),
            title: form.title.clone().unwrap_or_default(),
            url: form.url.clone().unwrap_or_default(),
            description: form.description.clone().unwrap_or_default(),
            title_error: errors.title.as_ref().map(ToString::to_string),
            url_error: errors.url.as_ref().map(ToString::to_string),
        }
    }
}

#[derive(Template)]
#[template(path = "images/detail.html")]
pub struct DetailTemplate {
    pub section: &'static str,
    pub username: Option<String>,
    pub image: Image,
    pub total_views: u64,
    pub likers: Vec<User>,
    /// Whether the current user likes the image.
    pub liked: bool,
    pub flash: Option<FlashMessage>,
}

#[derive(Template)]
#[template(path = "images/list.html")]
pub struct ListTemplate {
    pub section: &'static str,
    pub username: Option<String>,
    pub images: Vec<Image>,
    pub page: Page,
}

/// Just the image cards, appended by the infinite-scroll script.
#[derive(Template)]
#[template(path = "images/list_ajax.html")]
pub struct ListAjaxTemplate {
    pub images: Vec<Image>,
}

#[derive(Template)]
#[template(path = "images/ranking.html")]
pub struct RankingTemplate {
    pub section: &'static str,
    pub username: Option<String>,
    pub most_viewed: Vec<RankedImage>,
}
