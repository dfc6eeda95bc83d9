// Validation utilities
use crate::error::{Error, Result};
use tracing::warn;
use url::Url;

/// Validate that a generative endpoint is an absolute http(s) URL with a host
///
/// Loopback and private hosts are allowed here, since self-hosted inference
/// servers commonly listen on them.
pub fn validate_endpoint_url(url_str: &str) -> Result<Url> {
    let url = Url::parse(url_str.trim())?;

    match url.scheme() {
        "https" => {}
        "http" => {
            let local = matches!(
                url.host_str(),
                Some("localhost") | Some("127.0.0.1") | Some("[::1]")
            );
            if !local {
                warn!(
                    "Generative endpoint {} uses plain http; the API key will be sent unencrypted",
                    url.host_str().unwrap_or_default()
                );
            }
        }
        other => {
            return Err(Error::Validation(format!(
                "Endpoint must use http or https scheme, got {other}"
            )));
        }
    }

    if url.host_str().map_or(true, str::is_empty) {
        return Err(Error::Validation(
            "Endpoint URL must have a valid host".to_string(),
        ));
    }

    Ok(url)
}

/// Validate a recipe id supplied on the command line
pub fn validate_recipe_id(id: &str) -> Result<&str> {
    let id = id.trim();
    if id.is_empty() {
        return Err(Error::Validation("Recipe id must not be empty".to_string()));
    }
    if id.chars().any(char::is_control) {
        return Err(Error::Validation(
            "Recipe id must not contain control characters".to_string(),
        ));
    }
    Ok(id)
}
