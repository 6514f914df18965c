//! Asset-host allowlist validation.
//!
//! The proxy only fetches from the asset hosts of the three catalog
//! providers. Host membership is the gate that keeps the proxy from being
//! used to reach arbitrary internal or external endpoints, so it runs
//! before any upstream request is issued.

use super::ImageError;
use url::Url;

/// The asset hosts the proxy will fetch from, one per provider.
pub const ALLOWED_IMAGE_HOSTS: &[&str] = &["image.tmdb.org", "books.google.com", "media.rawg.io"];

/// Validate a raw URL against the scheme and host rules.
///
/// Accepts only absolute http/https URLs whose hostname is an exact,
/// case-insensitive member of `allowed_hosts`. Subdomains of allowed hosts
/// do not qualify.
pub fn validate(raw: &str, allowed_hosts: &[String]) -> Result<Url, ImageError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ImageError::MissingUrl);
    }

    let url = Url::parse(trimmed).map_err(|e| ImageError::InvalidUrl(e.to_string()))?;

    match url.scheme() {
        "http" | "https" => {}
        scheme => return Err(ImageError::DisallowedScheme(scheme.to_string())),
    }

    let host = url
        .host_str()
        .ok_or_else(|| ImageError::InvalidUrl("missing host".to_string()))?;

    if !allowed_hosts.iter().any(|allowed| allowed.eq_ignore_ascii_case(host)) {
        return Err(ImageError::DisallowedHost(host.to_string()));
    }

    Ok(url)
}
