//! Runtime configuration assembled from command-line arguments

use std::fmt;
use std::path::PathBuf;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

pub const DEFAULT_CATALOG: &str = "pokedex.json";
pub const DEFAULT_LOOKUP_URL: &str = "http://localhost:3030";

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum ConfigError {
    #[error("lookup url must not be empty")]
    EmptyLookupUrl,
    #[error("lookup url `{0}` must start with http:// or https://")]
    UnsupportedScheme(String),
    #[error("catalog source must not be empty")]
    EmptyCatalog,
}

/// Where the static catalog is read from
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "kind", content = "location", rename_all = "snake_case")]
pub enum CatalogSource {
    File(PathBuf),
    Url(String),
}

impl CatalogSource {
    pub fn parse(raw: &str) -> Result<Self, ConfigError> {
        let raw = raw.trim();
        if raw.is_empty() {
            return Err(ConfigError::EmptyCatalog);
        }
        if is_http_url(raw) {
            Ok(CatalogSource::Url(raw.to_string()))
        } else {
            Ok(CatalogSource::File(PathBuf::from(raw)))
        }
    }
}

impl fmt::Display for CatalogSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CatalogSource::File(path) => write!(f, "{}", path.display()),
            CatalogSource::Url(url) => write!(f, "{url}"),
        }
    }
}

impl Default for CatalogSource {
    fn default() -> Self {
        CatalogSource::File(PathBuf::from(DEFAULT_CATALOG))
    }
}

/// How concurrent detail responses are applied
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema, clap::ValueEnum,
)]
#[serde(rename_all = "snake_case")]
pub enum DetailOrdering {
    /// Whichever response resolves last is shown
    #[default]
    LastResolved,
    /// Responses for anything but the most recent request are dropped
    LatestRequested,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ViewerConfig {
    pub catalog: CatalogSource,
    pub lookup_base_url: String,
    pub ordering: DetailOrdering,
}

impl ViewerConfig {
    pub fn new(
        catalog: &str,
        lookup_url: &str,
        ordering: DetailOrdering,
    ) -> Result<Self, ConfigError> {
        let catalog = CatalogSource::parse(catalog)?;
        let lookup = lookup_url.trim().trim_end_matches('/');
        if lookup.is_empty() {
            return Err(ConfigError::EmptyLookupUrl);
        }
        if !is_http_url(lookup) {
            return Err(ConfigError::UnsupportedScheme(lookup.to_string()));
        }
        Ok(Self {
            catalog,
            lookup_base_url: lookup.to_string(),
            ordering,
        })
    }
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            catalog: CatalogSource::default(),
            lookup_base_url: DEFAULT_LOOKUP_URL.to_string(),
            ordering: DetailOrdering::default(),
        }
    }
}

fn is_http_url(raw: &str) -> bool {
    raw.starts_with("http://") || raw.starts_with("https://")
}
