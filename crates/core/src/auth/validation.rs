/// Returns `next` if it is safe to redirect to after login.
///
/// Only same-site relative paths are accepted: the value must start with a
/// single `/`, contain no control characters and embed no `scheme://`.
/// Anything else yields `None` and callers fall back to a default page.
///
/// ```
/// use bookmarks_core::auth::safe_next_path;
///
/// assert_eq!(safe_next_path("/images/ranking/"), Some("/images/ranking/"));
/// assert_eq!(safe_next_path("//evil.com"), None);
/// assert_eq!(safe_next_path("https://evil.com"), None);
/// ```
pub fn safe_next_path(next: &str) -> Option<&str> {
    let relative = next.starts_with('/') && !next.starts_with("//");
    let clean = !next.chars().any(char::is_control) && !next.contains("://");
    (relative && clean).then_some(next)
}

/// Resolves the post-login destination, defaulting to `fallback`.
pub fn next_or<'a>(next: Option<&'a str>, fallback: &'a str) -> &'a str {
    next.and_then(safe_next_path).unwrap_or(fallback)
}
