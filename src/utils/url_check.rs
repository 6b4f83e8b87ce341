//! Destination URL validation.

use url::Url;

/// Reasons a destination URL is refused.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum UrlCheckError {
    #[error("URL is empty")]
    Empty,

    #[error("URL is not absolute: {0}")]
    Parse(#[from] url::ParseError),

    #[error("Unsupported scheme: {0}")]
    UnsupportedScheme(String),

    #[error("URL has no host")]
    MissingHost,
}

/// Checks that `raw` is an absolute `http`/`https` URL with a host.
///
/// Returns the trimmed input unchanged on success so the stored destination
/// is exactly what the caller submitted.
///
/// # Errors
///
/// Returns [`UrlCheckError`] describing the first problem found.
pub fn check_destination(raw: &str) -> Result<&str, UrlCheckError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(UrlCheckError::Empty);
    }

    let parsed = Url::parse(trimmed)?;

    match parsed.scheme() {
        "http" | "https" => {}
        other => return Err(UrlCheckError::UnsupportedScheme(other.to_string())),
    }

    if parsed.host_str().is_none_or(str::is_empty) {
        return Err(UrlCheckError::MissingHost);
    }

    Ok(trimmed)
}
