use unicode_normalization::UnicodeNormalization;

/// Converts a title into a URL slug.
///
/// The title is NFKD-decomposed first so accented Latin letters keep their
/// base letter. Characters other than ASCII alphanumerics, underscores,
/// hyphens and whitespace are then dropped. The result is lowercased,
/// trimmed, and runs of whitespace or hyphens collapse into a single hyphen.
///
/// # Examples
///
/// ```
/// use bookmarks_core::images::slugify;
///
/// assert_eq!(slugify("Hello, World!"), "hello-world");
/// assert_eq!(slugify("  a -- b  "), "a-b");
/// assert_eq!(slugify("Café olé"), "cafe-ole");
/// ```
pub fn slugify(value: &str) -> String {
    let cleaned: String = value
        .nfkd()
        .filter(|c| c.is_ascii())
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_' || *c == '-' || c.is_whitespace())
        .collect::<String>()
        .to_lowercase();

    let mut slug = String::with_capacity(cleaned.len());
    let mut pending_separator = false;

    for c in cleaned.trim().chars() {
        if c == '-' || c.is_whitespace() {
            pending_separator = true;
            continue;
        }
        if pending_separator && !slug.is_empty() {
            slug.push('-');
        }
        pending_separator = false;
        slug.push(c);
    }

    slug.trim_matches(|c| c == '-' || c == '_').to_string()
}
