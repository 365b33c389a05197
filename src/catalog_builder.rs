//! Builds the static `pokedex.json` catalog from the public PokeAPI

use std::path::Path;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::sync::Semaphore;
use tokio::task::JoinSet;

use crate::api::{self, ApiError};

pub const DEFAULT_API_BASE: &str = "https://pokeapi.co/api/v2";
pub const DEFAULT_LIMIT: u32 = 151;
pub const DEFAULT_CONCURRENCY: usize = 12;

#[derive(thiserror::Error, Debug)]
pub enum BuildError {
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error("failed to write {path}: {source}")]
    Write {
        path: String,
        source: std::io::Error,
    },
    #[error("detail task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
    #[error("fetch limiter closed")]
    LimiterClosed,
}

/// One record of the catalog file
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CatalogRecord {
    pub id: u32,
    pub name: String,
    pub url: String,
    pub sprite: String,
}

#[derive(Clone, Debug)]
pub struct BuildOptions {
    pub api_base: String,
    pub limit: u32,
    pub concurrency: usize,
}

impl Default for BuildOptions {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            limit: DEFAULT_LIMIT,
            concurrency: DEFAULT_CONCURRENCY,
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
struct ListResponse {
    results: Vec<NamedResource>,
}

#[derive(Clone, Debug, Deserialize)]
struct NamedResource {
    name: String,
    url: String,
}

#[derive(Clone, Debug, Default, Deserialize)]
struct SpriteOnlyResponse {
    #[serde(default)]
    sprites: serde_json::Value,
}

pub fn list_url(api_base: &str, limit: u32) -> String {
    format!("{}/pokemon?limit={limit}", api_base.trim_end_matches('/'))
}

/// Ids follow list position, starting at 1
fn number_entries(list: ListResponse) -> Vec<(u32, NamedResource)> {
    list.results
        .into_iter()
        .enumerate()
        .map(|(index, entry)| (index as u32 + 1, entry))
        .collect()
}

fn sprite_from_detail(bytes: &[u8]) -> Result<String, ApiError> {
    let detail: SpriteOnlyResponse = serde_json::from_slice(bytes)?;
    Ok(detail
        .sprites
        .pointer("/front_default")
        .and_then(|value| value.as_str())
        .unwrap_or_default()
        .to_string())
}

async fn fetch_record(
    semaphore: Arc<Semaphore>,
    id: u32,
    entry: NamedResource,
) -> Result<CatalogRecord, BuildError> {
    let _permit = semaphore
        .acquire_owned()
        .await
        .map_err(|_| BuildError::LimiterClosed)?;
    let bytes = api::fetch_bytes(&entry.url).await?;
    let sprite = sprite_from_detail(&bytes)?;
    tracing::debug!(id, name = %entry.name, "fetched sprite");
    Ok(CatalogRecord {
        id,
        name: entry.name,
        url: entry.url,
        sprite,
    })
}

pub async fn build_catalog(options: &BuildOptions) -> Result<Vec<CatalogRecord>, BuildError> {
    let url = list_url(&options.api_base, options.limit);
    tracing::info!(%url, "fetching pokemon list");
    let bytes = api::fetch_bytes(&url).await?;
    let list: ListResponse = serde_json::from_slice(&bytes).map_err(ApiError::from)?;
    let entries = number_entries(list);

    let semaphore = Arc::new(Semaphore::new(options.concurrency.max(1)));
    let mut join_set = JoinSet::new();
    for (id, entry) in entries {
        let semaphore = semaphore.clone();
        join_set.spawn(fetch_record(semaphore, id, entry));
    }

    let mut records = Vec::new();
    while let Some(result) = join_set.join_next().await {
        records.push(result??);
    }
    records.sort_by_key(|record| record.id);
    Ok(records)
}

pub async fn write_catalog(path: &Path, records: &[CatalogRecord]) -> Result<(), BuildError> {
    let write_error = |source| BuildError::Write {
        path: path.display().to_string(),
        source,
    };
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent).await.map_err(write_error)?;
    }
    let json = serde_json::to_string_pretty(records).map_err(ApiError::from)?;
    tokio::fs::write(path, json).await.map_err(write_error)
}
