use url::{Position, Url};

/// Derives the site origin from the catalog start URL
///
/// The origin is the start URL cut at the first occurrence of
/// `search_segment` in its path. When the path does not contain the segment,
/// the scheme, host and port are used instead.
///
/// # Examples
///
/// ```
/// use catalog_harvest::url::site_origin;
///
/// let origin = site_origin("https://shop.example.com/search/categories/Wine", "/search").unwrap();
/// assert_eq!(origin, "https://shop.example.com");
///
/// let origin = site_origin("https://shop.example.com/store/search/all", "/search").unwrap();
/// assert_eq!(origin, "https://shop.example.com/store");
/// ```
pub fn site_origin(start_url: &str, search_segment: &str) -> Result<String, url::ParseError> {
    let url = Url::parse(start_url)?;
    let authority = &url[..Position::BeforePath];
    let rest = &url[Position::BeforePath..];

    match rest.find(search_segment) {
        Some(idx) => Ok(format!("{}{}", authority, &rest[..idx])),
        None => Ok(url.origin().ascii_serialization()),
    }
}

/// Resolves a link attribute value against the site origin
///
/// Absolute http(s) values are kept verbatim. Relative values are appended to
/// the origin without any normalization, so two spellings of the same path
/// stay two different links.
///
/// Returns None for empty values, same-page fragments and non-http schemes
/// (`javascript:`, `mailto:` and the like).
pub fn resolve_link(origin: &str, raw: &str) -> Option<String> {
    let raw = raw.trim();

    if raw.is_empty() || raw.starts_with('#') {
        return None;
    }

    if let Ok(absolute) = Url::parse(raw) {
        return match absolute.scheme() {
            "http" | "https" => Some(raw.to_string()),
            _ => None,
        };
    }

    if raw.starts_with('/') {
        Some(format!("{}{}", origin, raw))
    } else {
        Some(format!("{}/{}", origin, raw))
    }
}
