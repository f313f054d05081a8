use crate::UrlError;
use url::Url;

/// Resolves a reference found in a page against the page's URL
///
/// Follows RFC 3986 reference resolution: absolute references are returned
/// as-is (re-serialized), relative ones are joined onto `base`. An empty
/// reference resolves to the base itself without its fragment.
///
/// Unlike link *filtering*, no scheme is rejected here; `mailto:` or
/// `javascript:` references come back unchanged and are left to the visited-set
/// check and the fetcher downstream.
///
/// # Arguments
///
/// * `base` - The URL of the page the reference was found on
/// * `reference` - The raw attribute or captured value
///
/// # Returns
///
/// * `Some(String)` - The resolved absolute URL
/// * `None` - The reference cannot be resolved (e.g. an invalid port)
///
/// # Examples
///
/// ```
/// use url::Url;
/// use paexkey::url::resolve;
///
/// let base = Url::parse("http://example.test/dir/page.html").unwrap();
/// assert_eq!(resolve(&base, "/b").as_deref(), Some("http://example.test/b"));
/// assert_eq!(resolve(&base, "c.css").as_deref(), Some("http://example.test/dir/c.css"));
/// ```
pub fn resolve(base: &Url, reference: &str) -> Option<String> {
    base.join(reference).ok().map(String::from)
}

/// Parses and validates a seed URL
///
/// The seed must be an absolute `http` or `https` URL with a host, since the
/// host names the output directory.
///
/// # Examples
///
/// ```
/// use paexkey::url::parse_seed;
///
/// assert!(parse_seed("https://example.com/").is_ok());
/// assert!(parse_seed("ftp://example.com/").is_err());
/// assert!(parse_seed("example.com").is_err());
/// ```
pub fn parse_seed(url_str: &str) -> Result<Url, UrlError> {
    let url = Url::parse(url_str.trim()).map_err(|e| UrlError::Parse(e.to_string()))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(UrlError::InvalidScheme(format!(
            "Only HTTP and HTTPS schemes are supported, got: {}",
            url.scheme()
        )));
    }

    if url.host_str().map_or(true, str::is_empty) {
        return Err(UrlError::MissingDomain);
    }

    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_url() -> Url {
        Url::parse("http://example.test/dir/page.html").unwrap()
    }

    #[test]
    fn test_resolve_root_relative() {
        assert_eq!(
            resolve(&base_url(), "/b"),
            Some("http://example.test/b".to_string())
        );
    }

    #[test]
    fn test_resolve_path_relative() {
        assert_eq!(
            resolve(&base_url(), "other.html"),
            Some("http://example.test/dir/other.html".to_string())
        );
    }

    #[test]
    fn test_resolve_parent_segment() {
        assert_eq!(
            resolve(&base_url(), "../up.js"),
            Some("http://example.test/up.js".to_string())
        );
    }

    #[test]
    fn test_resolve_absolute_passthrough() {
        assert_eq!(
            resolve(&base_url(), "https://cdn.test/lib.js"),
            Some("https://cdn.test/lib.js".to_string())
        );
    }

    #[test]
    fn test_resolve_protocol_relative() {
        assert_eq!(
            resolve(&base_url(), "//cdn.test/x.css"),
            Some("http://cdn.test/x.css".to_string())
        );
    }

    #[test]
    fn test_resolve_fragment_only() {
        assert_eq!(
            resolve(&base_url(), "#top"),
            Some("http://example.test/dir/page.html#top".to_string())
        );
    }

    #[test]
    fn test_resolve_keeps_other_schemes() {
        assert_eq!(
            resolve(&base_url(), "mailto:someone@example.test"),
            Some("mailto:someone@example.test".to_string())
        );
    }

    #[test]
    fn test_resolve_invalid_reference() {
        assert_eq!(resolve(&base_url(), "http://example.test:99999/"), None);
    }

    #[test]
    fn test_parse_seed_valid() {
        let url = parse_seed("http://example.test").unwrap();
        assert_eq!(url.as_str(), "http://example.test/");
    }

    #[test]
    fn test_parse_seed_trims_whitespace() {
        assert!(parse_seed("  https://example.test/start  ").is_ok());
    }

    #[test]
    fn test_parse_seed_rejects_scheme() {
        assert!(matches!(
            parse_seed("ftp://example.test/"),
            Err(UrlError::InvalidScheme(_))
        ));
    }

    #[test]
    fn test_parse_seed_rejects_relative() {
        assert!(matches!(parse_seed("/just/a/path"), Err(UrlError::Parse(_))));
    }
}
