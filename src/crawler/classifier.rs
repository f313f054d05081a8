//! Content-Type gating
//!
//! Decides whether a fetched response is worth running through the extractor.

/// The one non-`text/*` media type that is parsed for links
const JAVASCRIPT_MEDIA_TYPE: &str = "application/javascript";

/// Returns true if a response with this Content-Type should be parsed for links
///
/// The header value is compared as sent: anything starting with `text/`
/// qualifies, and `application/javascript` qualifies only as an exact match
/// (no parameters). Everything else, including an empty or missing header, is
/// treated as binary.
///
/// # Examples
///
/// ```
/// use paexkey::crawler::is_textual;
///
/// assert!(is_textual("text/html; charset=utf-8"));
/// assert!(is_textual("application/javascript"));
/// assert!(!is_textual("image/png"));
/// assert!(!is_textual(""));
/// ```
pub fn is_textual(content_type: &str) -> bool {
    content_type.starts_with("text/") || content_type == JAVASCRIPT_MEDIA_TYPE
}
