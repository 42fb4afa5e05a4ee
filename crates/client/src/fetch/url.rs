//! URL construction for the two remote pages.
//!
//! The postal search page comes from a path template with a `{postal_code}`
//! placeholder; region pages are addressed by the locator scraped from the
//! postal page. Both resolve beneath the configured base URL and must stay on
//! its host.

use url::Url;

/// Placeholder replaced by the normalized postal code in a path template.
pub const POSTAL_CODE_PLACEHOLDER: &str = "{postal_code}";

/// Error type for URL construction failures.
#[derive(Debug, Clone, thiserror::Error)]
pub enum UrlError {
    #[error("empty locator")]
    Empty,

    #[error("unsupported scheme: {0}")]
    UnsupportedScheme(String),

    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    #[error("locator leaves the source host: {0}")]
    OffSite(String),
}

/// Parse the source root. The path must end in `/` for relative joins to
/// land beneath it.
pub fn parse_base(input: &str) -> Result<Url, UrlError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(UrlError::Empty);
    }

    let parsed = Url::parse(trimmed).map_err(|e| UrlError::InvalidUrl(e.to_string()))?;
    match parsed.scheme() {
        "http" | "https" => Ok(parsed),
        scheme => Err(UrlError::UnsupportedScheme(scheme.to_string())),
    }
}

/// Build the postal search URL for an already-normalized postal code.
pub fn postal_url(base: &Url, template: &str, postal_code: &str) -> Result<Url, UrlError> {
    if postal_code.is_empty() {
        return Err(UrlError::Empty);
    }
    let path = template.replace(POSTAL_CODE_PLACEHOLDER, postal_code);
    resolve_locator(base, &path)
}

/// Resolve a scraped locator against the source root.
///
/// Relative locators join beneath `base`; absolute ones are accepted only
/// when they point at the same host. Fragments are dropped.
pub fn resolve_locator(base: &Url, locator: &str) -> Result<Url, UrlError> {
    let trimmed = locator.trim();
    if trimmed.is_empty() {
        return Err(UrlError::Empty);
    }

    let mut resolved = base.join(trimmed).map_err(|e| UrlError::InvalidUrl(e.to_string()))?;

    match resolved.scheme() {
        "http" | "https" => {}
        scheme => return Err(UrlError::UnsupportedScheme(scheme.to_string())),
    }

    if resolved.host_str() != base.host_str() {
        return Err(UrlError::OffSite(resolved.to_string()));
    }

    resolved.set_fragment(None);
    Ok(resolved)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> Url {
        parse_base("https://srv129.services.gc.ca/ei_regions/eng/").unwrap()
    }

    #[test]
    fn test_parse_base() {
        assert_eq!(base().host_str(), Some("srv129.services.gc.ca"));
        assert!(matches!(parse_base("   "), Err(UrlError::Empty)));
        assert!(matches!(parse_base("ftp://example.com/"), Err(UrlError::UnsupportedScheme(_))));
        assert!(matches!(parse_base("not a url"), Err(UrlError::InvalidUrl(_))));
    }

    #[test]
    fn test_postal_url_fills_placeholder() {
        let url = postal_url(&base(), "postalcode_search.aspx?_code={postal_code}", "K1A0B1").unwrap();
        assert_eq!(
            url.as_str(),
            "https://srv129.services.gc.ca/ei_regions/eng/postalcode_search.aspx?_code=K1A0B1"
        );
    }

    #[test]
    fn test_postal_url_empty_code() {
        let result = postal_url(&base(), "search?code={postal_code}", "");
        assert!(matches!(result, Err(UrlError::Empty)));
    }

    #[test]
    fn test_resolve_relative_locator() {
        let url = resolve_locator(&base(), "eiregion.aspx?id=35").unwrap();
        assert_eq!(url.as_str(), "https://srv129.services.gc.ca/ei_regions/eng/eiregion.aspx?id=35");
    }

    #[test]
    fn test_resolve_root_relative_locator() {
        let url = resolve_locator(&base(), "/ei_regions/eng/eiregion.aspx?id=35").unwrap();
        assert_eq!(url.path(), "/ei_regions/eng/eiregion.aspx");
    }

    #[test]
    fn test_resolve_absolute_same_host() {
        let url = resolve_locator(&base(), "https://srv129.services.gc.ca/other.aspx#top").unwrap();
        assert_eq!(url.path(), "/other.aspx");
        assert_eq!(url.fragment(), None);
    }

    #[test]
    fn test_resolve_rejects_other_host() {
        let result = resolve_locator(&base(), "https://example.com/eiregion.aspx");
        assert!(matches!(result, Err(UrlError::OffSite(_))));
    }

    #[test]
    fn test_resolve_rejects_non_http_scheme() {
        let result = resolve_locator(&base(), "javascript:alert(1)");
        assert!(matches!(result, Err(UrlError::UnsupportedScheme(_))));
    }

    #[test]
    fn test_resolve_empty_locator() {
        assert!(matches!(resolve_locator(&base(), "  "), Err(UrlError::Empty)));
    }
}
