use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Environment variable carrying the catalog API bearer token.
pub const CATALOG_TOKEN_ENV: &str = "TMDB_ACCESS_TOKEN";
/// Environment variable carrying the identity provider API key.
pub const IDENTITY_KEY_ENV: &str = "REELIST_IDENTITY_API_KEY";

#[derive(Debug, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub catalog: CatalogConfig,
    #[serde(default)]
    pub identity: IdentityConfig,
}

/// Settings for the external movie/TV metadata service.
#[derive(Debug, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// Bearer token for the catalog API. Usually left unset in the file and
    /// supplied via `TMDB_ACCESS_TOKEN` instead.
    #[serde(default)]
    pub access_token: Option<String>,
    /// Default language tag for catalog requests.
    #[serde(default = "default_language")]
    pub language: String,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            access_token: None,
            language: default_language(),
        }
    }
}

fn default_language() -> String {
    "en-US".to_string()
}

/// Settings for the external identity provider.
#[derive(Debug, Serialize, Deserialize, Default)]
pub struct IdentityConfig {
    /// API key for the identity toolkit endpoint. Usually supplied via
    /// `REELIST_IDENTITY_API_KEY`.
    #[serde(default)]
    pub api_key: Option<String>,
    /// Override for the identity endpoint base URL (tests point this at a
    /// local server).
    #[serde(default)]
    pub endpoint: Option<String>,
}

impl Config {
    /// Load configuration from the given TOML file, falling back to defaults
    /// when the file does not exist yet.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;
        Ok(config)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file {}", path.display()))?;
        Ok(())
    }

    /// Catalog bearer token: environment wins over the config file.
    pub fn catalog_token(&self) -> Option<String> {
        std::env::var(CATALOG_TOKEN_ENV)
            .ok()
            .filter(|v| !v.is_empty())
            .or_else(|| self.catalog.access_token.clone())
    }

    /// Identity API key: environment wins over the config file.
    pub fn identity_key(&self) -> Option<String> {
        std::env::var(IDENTITY_KEY_ENV)
            .ok()
            .filter(|v| !v.is_empty())
            .or_else(|| self.identity.api_key.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_load_missing_file_yields_defaults() {
        let dir = TempDir::new().unwrap();
        let config = Config::load(&dir.path().join("config.toml")).unwrap();
        assert_eq!(config.catalog.language, "en-US");
        assert!(config.catalog.access_token.is_none());
    }

    #[test]
    fn test_save_and_reload() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");

        let mut config = Config::default();
        config.catalog.access_token = Some("tok".to_string());
        config.catalog.language = "hi".to_string();
        config.save(&path).unwrap();

        let loaded = Config::load(&path).unwrap();
        assert_eq!(loaded.catalog.access_token.as_deref(), Some("tok"));
        assert_eq!(loaded.catalog.language, "hi");
    }

    #[test]
    fn test_load_rejects_malformed_toml() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "catalog = 7").unwrap();
        assert!(Config::load(&path).is_err());
    }
}
