use crate::search::{Catalog, TrackError, TrackSearcher};
use std::path::Path;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info};

pub const DEFAULT_TERRITORY: &str = "SE";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Unknown catalog '{0}', expected 'web' or 'legacy'")]
    UnknownCatalog(String),
    #[error("Invalid timeout '{0}', expected a whole number of seconds")]
    InvalidTimeout(String),
    #[error("Failed to load env file: {0}")]
    EnvFile(#[from] dotenvy::Error),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CatalogKind {
    WebApi,
    Legacy,
}

/// Searcher configuration
/// Loaded from the environment, optionally seeded from a .env file
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    pub catalog: CatalogKind,
    /// Overrides the catalog's default search endpoint
    pub base_url: Option<String>,
    /// Preferred territory, only used by the legacy catalog
    pub territory: String,
    pub timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            catalog: CatalogKind::WebApi,
            base_url: None,
            territory: DEFAULT_TERRITORY.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl Config {
    /// Load configuration from the process environment
    pub fn load() -> Result<Self, ConfigError> {
        if dotenvy::dotenv().is_ok() {
            info!("Config: loaded .env file");
        } else {
            debug!("Config: no .env file found, using environment only");
        }

        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Load configuration from a specific env file, falling back to the environment
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let vars: Vec<(String, String)> = dotenvy::from_path_iter(path)?.collect::<Result<_, _>>()?;
        info!("Config: loaded {}", path.display());

        Self::from_vars(|key| {
            vars.iter()
                .find(|(k, _)| k == key)
                .map(|(_, v)| v.clone())
                .or_else(|| std::env::var(key).ok())
        })
    }

    /// Build configuration from a variable lookup
    pub fn from_vars<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let catalog = match lookup("TRACKMATCH_CATALOG") {
            None => defaults.catalog,
            Some(value) => match value.trim().to_lowercase().as_str() {
                "web" | "" => CatalogKind::WebApi,
                "legacy" => CatalogKind::Legacy,
                _ => return Err(ConfigError::UnknownCatalog(value)),
            },
        };

        let base_url = lookup("TRACKMATCH_BASE_URL")
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty());

        let territory = lookup("TRACKMATCH_TERRITORY")
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .unwrap_or(defaults.territory);

        let timeout = match lookup("TRACKMATCH_TIMEOUT_SECS") {
            None => defaults.timeout,
            Some(value) => value
                .trim()
                .parse::<u64>()
                .ok()
                .filter(|secs| *secs > 0)
                .map(Duration::from_secs)
                .ok_or(ConfigError::InvalidTimeout(value))?,
        };

        debug!(
            "Config: catalog={:?}, base_url={:?}, territory={}, timeout={:?}",
            catalog, base_url, territory, timeout
        );

        Ok(Self {
            catalog,
            base_url,
            territory,
            timeout,
        })
    }

    /// Build a searcher for this configuration
    ///
    /// Fails if the legacy catalog is selected with an invalid territory.
    pub fn searcher(&self) -> Result<TrackSearcher, TrackError> {
        let catalog = match self.catalog {
            CatalogKind::WebApi => Catalog::WebApi,
            CatalogKind::Legacy => Catalog::legacy(&self.territory)?,
        };

        let base_url = self
            .base_url
            .clone()
            .unwrap_or_else(|| catalog.default_base_url().to_string());

        TrackSearcher::with_options(catalog, base_url, self.timeout)
    }
}
