//! Link target checks for rendered anchors.

/// URL schemes that can run script when followed.
const BLOCKED_SCHEMES: &[&str] = &["javascript:", "vbscript:", "data:"];

/// Replacement target for blocked links.
const NEUTRAL_URL: &str = "#";

/// Returns the URL to place in an anchor's `href`.
///
/// Script-capable schemes are replaced with `#`. Browsers ignore ASCII
/// whitespace and control characters inside a scheme, so those are
/// stripped before comparison (`java\tscript:` is still blocked). Every
/// other URL is returned unchanged; attribute escaping happens at render
/// time.
///
/// # Examples
///
/// ```
/// use qcmark::markdown::sanitize_url;
///
/// assert_eq!(sanitize_url("https://example.com"), "https://example.com");
/// assert_eq!(sanitize_url("JavaScript:alert(1)"), "#");
/// ```
pub fn sanitize_url(url: &str) -> &str {
    let scheme: String = url
        .chars()
        .filter(|c| !c.is_ascii_whitespace() && !c.is_control())
        .take_while(|&c| c != '/' && c != '?' && c != '#')
        .map(|c| c.to_ascii_lowercase())
        .collect();

    if BLOCKED_SCHEMES.iter().any(|s| scheme.starts_with(s)) {
        NEUTRAL_URL
    } else {
        url
    }
}
