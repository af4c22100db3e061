//! Detection of requests sent by the page's own JavaScript.
//!
//! Browsers never set `X-Requested-With` on their own, so its presence marks
//! an XHR/fetch call from our scripts.

use std::convert::Infallible;

use axum::{
    extract::FromRequestParts,
    http::{request::Parts, HeaderMap, StatusCode},
};

pub const X_REQUESTED_WITH: &str = "x-requested-with";
pub const XML_HTTP_REQUEST: &str = "XMLHttpRequest";

/// Returns true if the request carries `X-Requested-With: XMLHttpRequest`.
pub fn is_ajax_request(headers: &HeaderMap) -> bool {
    headers
        .get(X_REQUESTED_WITH)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v == XML_HTTP_REQUEST)
}

/// Whether the current request is an AJAX request. Never rejects.
#[derive(Debug, Clone, Copy)]
pub struct AjaxRequest(pub bool);

impl<S> FromRequestParts<S> for AjaxRequest
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self(is_ajax_request(&parts.headers)))
    }
}

/// Guard for AJAX-only endpoints: rejects other requests with 400.
#[derive(Debug, Clone, Copy)]
pub struct AjaxOnly;

impl<S> FromRequestParts<S> for AjaxOnly
where
    S: Send + Sync,
{
    type Rejection = StatusCode;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        if is_ajax_request(&parts.headers) {
            Ok(Self)
        } else {
            Err(StatusCode::BAD_REQUEST)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_is_ajax_request() {
        let mut headers = HeaderMap::new();
        assert!(!is_ajax_request(&headers));

        headers.insert(X_REQUESTED_WITH, HeaderValue::from_static("fetch"));
        assert!(!is_ajax_request(&headers));

        headers.insert(X_REQUESTED_WITH, HeaderValue::from_static(XML_HTTP_REQUEST));
        assert!(is_ajax_request(&headers));
    }
}
