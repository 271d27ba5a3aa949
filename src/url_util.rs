// src/url_util.rs
use url::Url;

/// Resolves `candidate` against `base`, dropping the fragment and query string
/// so the same page is never counted twice under different anchors.
/// Returns None for anything that cannot become an absolute URL - callers
/// skip those candidates rather than treating them as errors.
pub fn normalize_url(candidate: &str, base: &str) -> Option<String> {
    let trimmed = candidate.trim();
    // Cut at the first '#' or '?', whichever comes earlier
    let stripped = trimmed
        .split('#')
        .next()
        .unwrap_or("")
        .split('?')
        .next()
        .unwrap_or("");

    if stripped.is_empty() {
        return None;
    }

    let base = Url::parse(base).ok()?;
    let resolved = base.join(stripped).ok()?;
    Some(resolved.to_string())
}

/// A URL is usable for crawling only if it carries both a scheme and a host.
pub fn is_valid_url(url: &str) -> bool {
    match Url::parse(url) {
        Ok(parsed) => !parsed.scheme().is_empty() && parsed.host_str().is_some_and(|h| !h.is_empty()),
        Err(_) => false,
    }
}

/// True when `url` lives on `host` itself or on one of its subdomains.
pub fn is_same_host(url: &str, host: &str) -> bool {
    if host.is_empty() {
        return false;
    }
    match Url::parse(url) {
        Ok(parsed) => parsed
            .host_str()
            .is_some_and(|h| h == host || h.ends_with(&format!(".{}", host))),
        Err(_) => false,
    }
}

/// Host of an absolute URL, or empty string when it cannot be parsed.
pub fn host_of(url: &str) -> String {
    Url::parse(url)
        .ok()
        .and_then(|u| u.host_str().map(|h| h.to_string()))
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_strips_fragment_and_query() {
        assert_eq!(
            normalize_url("/about?lang=fr#team", "https://example.com/"),
            Some("https://example.com/about".to_string())
        );
    }

    #[test]
    fn test_normalize_resolves_relative() {
        assert_eq!(
            normalize_url("contact", "https://example.com/pages/"),
            Some("https://example.com/pages/contact".to_string())
        );
    }

    #[test]
    fn test_normalize_keeps_absolute() {
        assert_eq!(
            normalize_url("https://other.org/x", "https://example.com/"),
            Some("https://other.org/x".to_string())
        );
    }

    #[test]
    fn test_normalize_rejects_empty() {
        assert_eq!(normalize_url("#top", "https://example.com/"), None);
        assert_eq!(normalize_url("", "https://example.com/"), None);
    }

    #[test]
    fn test_is_valid_url() {
        assert!(is_valid_url("https://example.com/"));
        assert!(!is_valid_url("example.com/"));
        assert!(!is_valid_url("/pages/about"));
        assert!(!is_valid_url("mailto:hi@example.com"));
    }

    #[test]
    fn test_is_same_host_accepts_subdomains() {
        assert!(is_same_host("https://example.com/a", "example.com"));
        assert!(is_same_host("https://shop.example.com/a", "example.com"));
        assert!(!is_same_host("https://notexample.com/a", "example.com"));
        assert!(!is_same_host("https://other.org/", "example.com"));
    }
}
