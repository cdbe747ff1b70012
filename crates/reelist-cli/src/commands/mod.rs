use std::sync::Arc;
use std::time::Duration;

use color_eyre::eyre::eyre;
use color_eyre::Result;
use indicatif::{ProgressBar, ProgressStyle};

use reelist_config::config::CATALOG_TOKEN_ENV;
use reelist_config::{Config, KvStore, PathManager};
use reelist_core::AppContext;
use reelist_providers::{CatalogClient, RestIdentityProvider};

use crate::output::{Output, OutputFormat};

pub mod auth;
pub mod browse;
pub mod clear;
pub mod details;
pub mod list;
pub mod prompts;

/// Paths and configuration shared by every command.
pub(crate) struct App {
    pub paths: PathManager,
    pub config: Config,
}

impl App {
    pub fn init() -> Result<Self> {
        let paths = PathManager::default();
        paths
            .ensure_directories()
            .map_err(|e| eyre!("Failed to prepare data directories: {}", e))?;
        let config = Config::load(&paths.config_file()).map_err(|e| eyre!("{}", e))?;
        Ok(Self { paths, config })
    }

    /// Construct the state container: restored session plus the watchlist
    /// for its scope.
    pub fn context(&self) -> Result<AppContext> {
        let store = KvStore::new(&self.paths).map_err(|e| eyre!("{}", e))?;
        let provider = RestIdentityProvider::new(
            self.config.identity_key().unwrap_or_default(),
            self.config.identity.endpoint.clone(),
        );
        Ok(AppContext::new(
            Arc::new(provider),
            store,
            self.paths.credentials_file(),
        ))
    }

    pub fn catalog(&self, lang: Option<String>) -> Result<CatalogClient> {
        let token = self.config.catalog_token().ok_or_else(|| {
            eyre!(
                "Catalog access token not configured. Set {} or add it to {}",
                CATALOG_TOKEN_ENV,
                self.paths.config_file().display()
            )
        })?;
        let language = lang
            .map(expand_lang)
            .unwrap_or_else(|| self.config.catalog.language.clone());
        Ok(CatalogClient::new(token, language))
    }
}

/// Expand the short language menu codes to full catalog tags.
pub(crate) fn expand_lang(lang: String) -> String {
    match lang.as_str() {
        "en" => "en-US".to_string(),
        "hi" => "hi-IN".to_string(),
        "es" => "es-ES".to_string(),
        _ => lang,
    }
}

/// Spinner shown while a network call is in flight. Human output only.
pub(crate) fn spinner(output: &Output, msg: &str) -> Option<ProgressBar> {
    if output.is_quiet() || output.format() != OutputFormat::Human {
        return None;
    }
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::with_template("{spinner} {msg}").unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.set_message(msg.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    Some(pb)
}

pub(crate) fn finish_spinner(pb: Option<ProgressBar>) {
    if let Some(pb) = pb {
        pb.finish_and_clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expand_lang() {
        assert_eq!(expand_lang("en".to_string()), "en-US");
        assert_eq!(expand_lang("hi".to_string()), "hi-IN");
        assert_eq!(expand_lang("es".to_string()), "es-ES");
        assert_eq!(expand_lang("fr-CA".to_string()), "fr-CA");
    }
}
