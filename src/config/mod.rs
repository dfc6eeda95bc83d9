use crate::error::{Error, Result};
use crate::utils::validation::validate_endpoint_url;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    pub generative: GenerativeConfig,
    pub catalog: CatalogConfig,
    pub favorites: FavoritesConfig,
}

/// Connection settings for the external text-generation endpoint.
///
/// Both `api_url` and `api_key` are optional: when either is absent the
/// generative path is simply not configured and searches go straight to the
/// local ranking engine.
#[derive(Clone, Serialize, Deserialize)]
pub struct GenerativeConfig {
    pub api_url: Option<String>,
    #[serde(skip_serializing)]
    pub api_key: Option<String>,
    pub model: String,
    pub timeout_ms: u64,
    pub max_tokens: u32,
    pub temperature: f32,
    pub referer: Option<String>,
    pub title: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogConfig {
    pub path: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FavoritesConfig {
    pub path: PathBuf,
}

pub const DEFAULT_MODEL: &str = "openai/gpt-3.5-turbo";
pub const DEFAULT_TIMEOUT_MS: u64 = 10_000;
pub const DEFAULT_MAX_TOKENS: u32 = 3000;
pub const DEFAULT_TEMPERATURE: f32 = 0.8;

impl GenerativeConfig {
    /// Endpoint and credential, if both are present and non-blank
    pub fn endpoint(&self) -> Option<(&str, &str)> {
        let url = self.api_url.as_deref().map(str::trim).filter(|s| !s.is_empty())?;
        let key = self.api_key.as_deref().map(str::trim).filter(|s| !s.is_empty())?;
        Some((url, key))
    }

    pub fn is_configured(&self) -> bool {
        self.endpoint().is_some()
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

impl Default for GenerativeConfig {
    fn default() -> Self {
        Self {
            api_url: None,
            api_key: None,
            model: DEFAULT_MODEL.to_string(),
            timeout_ms: DEFAULT_TIMEOUT_MS,
            max_tokens: DEFAULT_MAX_TOKENS,
            temperature: DEFAULT_TEMPERATURE,
            referer: None,
            title: None,
        }
    }
}

// Hand-written so the credential never ends up in logs
impl std::fmt::Debug for GenerativeConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GenerativeConfig")
            .field("api_url", &self.api_url)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("model", &self.model)
            .field("timeout_ms", &self.timeout_ms)
            .field("max_tokens", &self.max_tokens)
            .field("temperature", &self.temperature)
            .field("referer", &self.referer)
            .field("title", &self.title)
            .finish()
    }
}

fn optional_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

impl Settings {
    /// Load settings from environment variables
    pub fn from_env() -> Result<Self> {
        let api_url = optional_var("AI_API_URL");
        let api_key = optional_var("AI_API_KEY");

        let model = optional_var("AI_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string());

        let timeout_ms = std::env::var("AI_API_TIMEOUT")
            .unwrap_or_else(|_| DEFAULT_TIMEOUT_MS.to_string())
            .parse()
            .map_err(|_| Error::Config("Invalid AI_API_TIMEOUT value".to_string()))?;

        let max_tokens = std::env::var("AI_MAX_TOKENS")
            .unwrap_or_else(|_| DEFAULT_MAX_TOKENS.to_string())
            .parse()
            .map_err(|_| Error::Config("Invalid AI_MAX_TOKENS value".to_string()))?;

        let temperature = std::env::var("AI_TEMPERATURE")
            .unwrap_or_else(|_| DEFAULT_TEMPERATURE.to_string())
            .parse()
            .map_err(|_| Error::Config("Invalid AI_TEMPERATURE value".to_string()))?;

        let catalog_path = std::env::var("RECIPE_CATALOG_PATH")
            .unwrap_or_else(|_| "data/recipes.json".to_string())
            .into();

        let favorites_path = std::env::var("FAVORITES_PATH")
            .unwrap_or_else(|_| "data/favorites.json".to_string())
            .into();

        Ok(Settings {
            generative: GenerativeConfig {
                api_url,
                api_key,
                model,
                timeout_ms,
                max_tokens,
                temperature,
                referer: optional_var("AI_REFERER"),
                title: optional_var("AI_TITLE"),
            },
            catalog: CatalogConfig { path: catalog_path },
            favorites: FavoritesConfig {
                path: favorites_path,
            },
        })
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.generative.timeout_ms == 0 {
            return Err(Error::Config("AI_API_TIMEOUT must be non-zero".to_string()));
        }

        if !(0.0..=2.0).contains(&self.generative.temperature) {
            return Err(Error::Config(
                "AI_TEMPERATURE must be between 0.0 and 2.0".to_string(),
            ));
        }

        // An unset endpoint is a valid "not configured" state
        if let Some(url) = &self.generative.api_url {
            validate_endpoint_url(url)?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings() -> Settings {
        Settings {
            generative: GenerativeConfig {
                api_url: Some("https://openrouter.ai/api/v1/chat/completions".to_string()),
                api_key: Some("sk-test".to_string()),
                ..GenerativeConfig::default()
            },
            catalog: CatalogConfig {
                path: "/tmp/recipes.json".into(),
            },
            favorites: FavoritesConfig {
                path: "/tmp/favorites.json".into(),
            },
        }
    }

    #[test]
    fn test_settings_validation() {
        let mut settings = settings();
        assert!(settings.validate().is_ok());

        settings.generative.timeout_ms = 0;
        assert!(settings.validate().is_err());

        settings.generative.timeout_ms = 500;
        settings.generative.temperature = 3.5;
        assert!(settings.validate().is_err());

        settings.generative.temperature = 0.8;
        settings.generative.api_url = Some("ftp://example.com/v1".to_string());
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_missing_endpoint_is_valid_but_unconfigured() {
        let mut settings = settings();
        settings.generative.api_url = None;

        assert!(settings.validate().is_ok());
        assert!(!settings.generative.is_configured());
    }

    #[test]
    fn test_blank_credential_is_unconfigured() {
        let mut config = settings().generative;
        assert!(config.is_configured());

        config.api_key = Some("   ".to_string());
        assert!(config.endpoint().is_none());
    }

    #[test]
    fn test_debug_redacts_api_key() {
        let config = settings().generative;
        let rendered = format!("{config:?}");
        assert!(!rendered.contains("sk-test"));
        assert!(rendered.contains("<redacted>"));
    }
}
