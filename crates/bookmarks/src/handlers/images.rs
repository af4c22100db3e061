//! Image bookmark pages: create, detail, like, list and ranking.

use std::sync::Arc;

use axum::{
    extract::{rejection::FormRejection, Path, Query, State},
    http::{header::ALLOW, Method, StatusCode},
    response::{Html, IntoResponse, Redirect, Response},
    Form, Json,
};
use axum_extra::extract::cookie::CookieJar;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use bookmarks_auth::{CurrentUser, OptionalUser};
use bookmarks_core::images::{
    order_by_ranking, Image, ImageForm, ImageFormErrors, RankedImage, VERB_BOOKMARKED, VERB_LIKES,
};
use bookmarks_core::pagination::{resolve_page, PageOutcome, Paginator};
use bookmarks_core::serde::deserialize_trimmed_string;
use bookmarks_core::stats::ImageStats;
use bookmarks_core::storage::RepositoryError;

use crate::actions::create_action;
use crate::state::AppState;

use super::ajax::{AjaxOnly, AjaxRequest};
use super::error::AppError;
use super::flash::{redirect_with_flash, take_flash, FlashMessage};
use super::templates::{
    CreateTemplate, DetailTemplate, HtmlTemplate, ListAjaxTemplate, ListTemplate, RankingTemplate,
};

const SECTION: &str = "images";

/// GET / - The list is the home page.
pub async fn root() -> Redirect {
    Redirect::to("/images/")
}

/// GET /images/create/ - Empty form, or pre-filled by the bookmarklet.
pub async fn image_create_form(
    CurrentUser(user): CurrentUser,
    Query(form): Query<ImageForm>,
) -> impl IntoResponse {
    HtmlTemplate(CreateTemplate::new(&user, &form, &ImageFormErrors::default()))
}

/// POST /images/create/ - Bookmark an image.
pub async fn image_create(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Form(form): Form<ImageForm>,
) -> Result<Response, AppError> {
    let valid = match form.validate() {
        Ok(valid) => valid,
        Err(errors) => {
            return Ok(HtmlTemplate(CreateTemplate::new(&user, &form, &errors)).into_response())
        }
    };

    let mut image = Image::new(user.id, valid.title, valid.url);
    if let Some(description) = valid.description {
        image = image.with_description(description);
    }

    state.images.create_image(&image).await?;
    create_action(state.actions.as_ref(), user.id, VERB_BOOKMARKED, Some(image.id)).await?;

    tracing::info!(image_id = %image.id, user_id = %user.id, "image bookmarked");

    Ok(redirect_with_flash(
        &image.absolute_url(),
        FlashMessage::success("Image added successfully"),
    ))
}

/// GET /images/detail/{id}/{slug}/ - Show an image and count the view.
pub async fn image_detail(
    State(state): State<AppState>,
    OptionalUser(user): OptionalUser,
    Path((id, slug)): Path<(String, String)>,
    jar: CookieJar,
) -> Result<Response, AppError> {
    let not_found = || RepositoryError::not_found("Image", &id);

    let image_id = Uuid::parse_str(&id).map_err(|_| not_found())?;
    let image = state
        .images
        .get_image_by_id_and_slug(image_id, &slug)
        .await?
        .ok_or_else(not_found)?;

    let total_views = state.stats.incr_views(image.id).await?;
    state.stats.incr_ranking(image.id).await?;

    let likers = state.likes.get_likers(image.id).await?;
    let liked = match &user {
        Some(user) => state.likes.has_liked(image.id, user.id).await?,
        None => false,
    };

    tracing::debug!(image_id = %image.id, total_views, "image viewed");

    let (jar, flash) = take_flash(jar);
    let template = DetailTemplate {
        section: SECTION,
        username: user.map(|u| u.username),
        image,
        total_views,
        likers,
        liked,
        flash,
    };

    Ok((jar, HtmlTemplate(template)).into_response())
}

#[derive(Debug, Deserialize)]
pub struct LikeForm {
    #[serde(default, deserialize_with = "deserialize_trimmed_string")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "deserialize_trimmed_string")]
    pub action: Option<String>,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct LikeResponse {
    pub status: &'static str,
}

impl LikeResponse {
    fn ok() -> Json<Self> {
        Json(Self { status: "ok" })
    }

    fn error() -> Json<Self> {
        Json(Self { status: "error" })
    }
}

/// POST /images/like/ - Like or unlike an image from the detail page script.
///
/// AJAX only (400 otherwise), then login required, then POST only (405).
pub async fn image_like(
    _ajax: AjaxOnly,
    CurrentUser(user): CurrentUser,
    method: Method,
    State(state): State<AppState>,
    form: Result<Form<LikeForm>, FormRejection>,
) -> Response {
    if method != Method::POST {
        return (StatusCode::METHOD_NOT_ALLOWED, [(ALLOW, "POST")]).into_response();
    }

    let Ok(Form(LikeForm {
        id: Some(id),
        action: Some(action),
    })) = form
    else {
        return LikeResponse::error().into_response();
    };

    match toggle_like(&state, user.id, &id, &action).await {
        Ok(()) => LikeResponse::ok().into_response(),
        Err(e) => {
            tracing::warn!(image_id = %id, action = %action, error = %e, "like failed");
            LikeResponse::error().into_response()
        }
    }
}

async fn toggle_like(
    state: &AppState,
    user_id: Uuid,
    image_id: &str,
    action: &str,
) -> anyhow::Result<()> {
    let image_id = Uuid::parse_str(image_id)?;
    let image = state
        .images
        .get_image(image_id)
        .await?
        .ok_or_else(|| RepositoryError::not_found("Image", image_id))?;

    if action == "like" {
        state.likes.add_like(image.id, user_id).await?;
        create_action(state.actions.as_ref(), user_id, VERB_LIKES, Some(image.id)).await?;
    } else {
        state.likes.remove_like(image.id, user_id).await?;
    }

    Ok(())
}

#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    pub page: Option<String>,
}

/// GET /images/ - Paginated list, newest first.
///
/// AJAX requests get only the image cards; an out-of-range page gets an
/// empty body so the infinite-scroll script knows to stop.
pub async fn image_list(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    AjaxRequest(is_ajax): AjaxRequest,
    Query(query): Query<ListQuery>,
) -> Result<Response, AppError> {
    let count = state.images.count_images().await?;
    let paginator = Paginator::new(count, state.images_per_page);

    let page = match resolve_page(&paginator, query.page.as_deref(), is_ajax) {
        PageOutcome::Page(page) => page,
        PageOutcome::Empty => return Ok(Html("").into_response()),
    };

    let images = state.images.list_images(page.offset, page.limit).await?;

    if is_ajax {
        return Ok(HtmlTemplate(ListAjaxTemplate { images }).into_response());
    }

    Ok(HtmlTemplate(ListTemplate {
        section: SECTION,
        username: Some(user.username),
        images,
        page,
    })
    .into_response())
}

/// GET /images/ranking/ - The most viewed images, best first.
pub async fn image_ranking(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
) -> Result<impl IntoResponse, AppError> {
    let ranked_ids = state.stats.top_ranked(state.ranking_size).await?;
    let images = state.images.get_images_by_ids(&ranked_ids).await?;
    let most_viewed = with_views(&state.stats, order_by_ranking(&ranked_ids, images)).await?;

    Ok(HtmlTemplate(RankingTemplate {
        section: SECTION,
        username: Some(user.username),
        most_viewed,
    }))
}

async fn with_views(
    stats: &Arc<dyn ImageStats>,
    images: Vec<Image>,
) -> Result<Vec<RankedImage>, AppError> {
    let mut ranked = Vec::with_capacity(images.len());
    for image in images {
        let views = stats.views(image.id).await?;
        ranked.push(RankedImage { image, views });
    }
    Ok(ranked)
}
