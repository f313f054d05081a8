use url::Url;

/// Extracts the domain from a URL
///
/// Retrieves the host portion of a URL and converts it to lowercase.
///
/// # Examples
///
/// ```
/// use url::Url;
/// use paexkey::url::extract_domain;
///
/// let url = Url::parse("https://EXAMPLE.COM/path").unwrap();
/// assert_eq!(extract_domain(&url), Some("example.com".to_string()));
/// ```
pub fn extract_domain(url: &Url) -> Option<String> {
    url.host_str().map(|h| h.to_lowercase())
}

/// Returns the name of the per-domain output directory for a seed URL
///
/// This is the URL's authority without userinfo: the lowercase host, followed by
/// `:port` when the URL carries a non-default port. Output for
/// `http://127.0.0.1:8080/` therefore lands under `127.0.0.1:8080/`.
///
/// # Examples
///
/// ```
/// use url::Url;
/// use paexkey::url::output_domain;
///
/// let url = Url::parse("https://example.com:8443/app").unwrap();
/// assert_eq!(output_domain(&url), Some("example.com:8443".to_string()));
/// ```
pub fn output_domain(url: &Url) -> Option<String> {
    let host = extract_domain(url)?;
    match url.port() {
        Some(port) => Some(format!("{}:{}", host, port)),
        None => Some(host),
    }
}
