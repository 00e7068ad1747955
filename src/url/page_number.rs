/// Reads the listing page number from a URL
///
/// The number is the run of characters after the first `page_segment`, up to
/// the next `/`, `?` or `#`. A URL without the segment is page 1. A segment
/// followed by something that is not a number is logged and also treated as
/// page 1.
///
/// # Examples
///
/// ```
/// use catalog_harvest::url::page_number;
///
/// assert_eq!(page_number("https://example.com/search/categories/Wine", "/page/"), 1);
/// assert_eq!(page_number("https://example.com/search/categories/Wine/page/7", "/page/"), 7);
/// ```
pub fn page_number(url: &str, page_segment: &str) -> u32 {
    let Some(idx) = url.find(page_segment) else {
        return 1;
    };

    let tail = &url[idx + page_segment.len()..];
    let end = tail.find(|c| matches!(c, '/' | '?' | '#')).unwrap_or(tail.len());
    let raw = &tail[..end];

    match raw.parse::<u32>() {
        Ok(n) if n > 0 => n,
        _ => {
            tracing::warn!("Unreadable page number '{}' in {}, assuming page 1", raw, url);
            1
        }
    }
}
