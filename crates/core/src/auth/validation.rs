/// Validates return_to URL to prevent open redirects.
///
/// Returns `Some(url)` if the URL is a valid relative path, `None` otherwise.
///
/// # Security
///
/// This function prevents open redirect attacks by ensuring URLs:
/// - Start with a single `/` (relative path)
/// - Do not start with `//` (protocol-relative URLs like `//evil.com`)
/// - Do not contain control characters (potential injection)
/// - Do not contain `://` (absolute URLs with schemes like `https://`, `javascript:`)
///
/// # Examples
///
/// ```
/// use stagepass_core::auth::validate_return_to;
///
/// // Valid relative paths
/// assert_eq!(validate_return_to("/my/events"), Some("/my/events"));
/// assert_eq!(validate_return_to("/"), Some("/"));
///
/// // Invalid: protocol-relative URL
/// assert_eq!(validate_return_to("//evil.com"), None);
///
/// // Invalid: absolute URL
/// assert_eq!(validate_return_to("https://evil.com"), None);
/// ```
pub fn validate_return_to(url: &str) -> Option<&str> {
    // Must start with /
    if !url.starts_with('/') {
        return None;
    }

    // Reject protocol-relative URLs (//evil.com)
    if url.starts_with("//") {
        return None;
    }

    // Reject control characters (potential injection attacks)
    if url.chars().any(|c| c.is_control()) {
        return None;
    }

    // Reject URLs with schemes (https://, javascript:, etc.)
    if url.contains("://") {
        return None;
    }

    Some(url)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_simple_relative_path() {
        assert_eq!(validate_return_to("/my/events"), Some("/my/events"));
    }

    #[test]
    fn accepts_root_path() {
        assert_eq!(validate_return_to("/"), Some("/"));
    }

    #[test]
    fn accepts_path_with_query_string() {
        assert_eq!(
            validate_return_to("/events?keyword=rock"),
            Some("/events?keyword=rock")
        );
    }

    #[test]
    fn rejects_https_url() {
        assert_eq!(validate_return_to("https://evil.com"), None);
    }

    #[test]
    fn rejects_url_without_leading_slash() {
        assert_eq!(validate_return_to("events/123"), None);
    }

    #[test]
    fn rejects_empty_string() {
        assert_eq!(validate_return_to(""), None);
    }

    #[test]
    fn rejects_protocol_relative_url() {
        assert_eq!(validate_return_to("//evil.com"), None);
    }

    #[test]
    fn rejects_javascript_url() {
        assert_eq!(validate_return_to("javascript:alert(1)"), None);
    }

    #[test]
    fn rejects_control_characters() {
        assert_eq!(validate_return_to("/path\r\nSet-Cookie: x"), None);
    }
}
