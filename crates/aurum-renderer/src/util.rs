//! Shared URL helpers.

use std::borrow::Cow;

/// Check whether a URL points outside the site.
pub(crate) fn is_external(url: &str) -> bool {
    url.starts_with("http://") || url.starts_with("https://") || url.starts_with("//")
}

/// Resolve a URL against an optional base URL.
///
/// Absolute URLs, protocol-relative URLs, site-absolute paths, `data:` URIs
/// and fragments are returned unchanged. Anything else is joined onto `base`
/// with a single `/`.
///
/// # Examples
///
/// ```
/// use aurum_renderer::resolve_url;
///
/// assert_eq!(
///     resolve_url("chart.png", Some("https://img.example.com/posts")),
///     "https://img.example.com/posts/chart.png"
/// );
/// assert_eq!(resolve_url("/logo.svg", Some("https://img.example.com")), "/logo.svg");
/// assert_eq!(resolve_url("chart.png", None), "chart.png");
/// ```
pub fn resolve_url<'a>(url: &'a str, base: Option<&str>) -> Cow<'a, str> {
    let Some(base) = base else {
        return Cow::Borrowed(url);
    };

    if is_external(url)
        || url.starts_with('/')
        || url.starts_with('#')
        || url.starts_with("data:")
        || url.starts_with("mailto:")
    {
        return Cow::Borrowed(url);
    }

    let relative = url.trim_start_matches("./");
    Cow::Owned(format!("{}/{relative}", base.trim_end_matches('/')))
}
