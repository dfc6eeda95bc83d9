use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Catalog error: {0}")]
    Catalog(String),

    #[error("Favorites error: {0}")]
    Favorites(String),

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Get a sanitized error message safe for logging
    /// Filters out potentially sensitive information
    pub fn log_safe(&self) -> String {
        match self {
            // HTTP errors might contain endpoint URLs with embedded credentials
            Error::Http(_) => "External HTTP request failed".to_string(),

            Error::Config(msg) => {
                let lower = msg.to_lowercase();
                if lower.contains("password")
                    || lower.contains("secret")
                    || lower.contains("token")
                    || lower.contains("key")
                {
                    "Configuration error (details redacted)".to_string()
                } else {
                    self.to_string()
                }
            }

            Error::Json(e) => format!("JSON error at line {}", e.line()),
            Error::Catalog(msg) => format!("Catalog error: {msg}"),
            Error::Favorites(msg) => format!("Favorites error: {msg}"),
            Error::InvalidUrl(_) => "Invalid URL provided".to_string(),
            Error::Io(_) => "File system operation failed".to_string(),
            Error::NotFound(msg) => format!("Not found: {msg}"),
            Error::Validation(msg) => format!("Validation error: {msg}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_safe_redacts_credentials() {
        let err = Error::Config("AI_API_KEY contains whitespace".to_string());
        assert_eq!(
            err.log_safe(),
            "Configuration error (details redacted)"
        );

        let err = Error::Config("Invalid AI_API_TIMEOUT value".to_string());
        assert_eq!(
            err.log_safe(),
            "Configuration error: Invalid AI_API_TIMEOUT value"
        );
    }

    #[test]
    fn test_log_safe_hides_http_details() {
        let err = reqwest::Client::new()
            .get("http://user:hunter2@[::1")
            .build()
            .unwrap_err();
        let err = Error::from(err);

        assert!(matches!(err, Error::Http(_)));
        assert_eq!(err.log_safe(), "External HTTP request failed");
    }

    #[test]
    fn test_log_safe_passes_through_domain_errors() {
        let err = Error::NotFound("recipe r-1".to_string());
        assert_eq!(err.log_safe(), "Not found: recipe r-1");
    }
}
