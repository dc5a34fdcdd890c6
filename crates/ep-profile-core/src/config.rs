//! Page configuration.
//!
//! Every field has a default matching the production page, so a config file
//! or JS object only needs the keys it overrides.

use crate::media::MediaConfig;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read media config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid media config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProfileConfig {
    /// Prefix for the text-record and NFT endpoints. Empty means same origin.
    pub api_base: String,
    pub avatar_provider: String,
    pub placeholder_image: String,
    pub avatar_placeholder: String,
    pub error_route: String,
    pub media: MediaConfig,
}

impl Default for ProfileConfig {
    fn default() -> Self {
        Self {
            api_base: String::new(),
            avatar_provider: "metadata.ens.domains".to_owned(),
            placeholder_image: "/static-assets/img/placeholder.png".to_owned(),
            avatar_placeholder: "https://loremflickr.com/281/281/design?lock=9".to_owned(),
            error_route: "/404".to_owned(),
            media: MediaConfig::default(),
        }
    }
}

impl ProfileConfig {
    /// Defaults overridden by `PROFILE_API_URL`, `PROFILE_AVATAR_PROVIDER`
    /// and `PROFILE_MEDIA_CONFIG` (path to a JSON [`MediaConfig`]).
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::default();
        if let Ok(api_base) = std::env::var("PROFILE_API_URL") {
            config.api_base = api_base.trim_end_matches('/').to_owned();
        }
        if let Ok(provider) = std::env::var("PROFILE_AVATAR_PROVIDER") {
            config.avatar_provider = provider;
        }
        if let Ok(path) = std::env::var("PROFILE_MEDIA_CONFIG") {
            config.media = load_media_config(PathBuf::from(path))?;
        }
        Ok(config)
    }

    pub fn avatar_url(&self, domain: &str) -> String {
        format!("https://{}/mainnet/avatar/{}", self.avatar_provider, domain)
    }
}

fn load_media_config(path: PathBuf) -> Result<MediaConfig, ConfigError> {
    let raw = std::fs::read_to_string(&path).map_err(|source| ConfigError::Read {
        path: path.clone(),
        source,
    })?;
    serde_json::from_str(&raw).map_err(|source| ConfigError::Parse { path, source })
}
