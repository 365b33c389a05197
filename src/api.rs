//! Catalog loader and detail lookup client

use std::path::PathBuf;
use std::sync::OnceLock;

use serde::Deserialize;

use crate::config::CatalogSource;
use crate::state::{Ability, DetailRecord, SummaryRecord, TypeSlot};

#[derive(thiserror::Error, Debug)]
pub enum ApiError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("{url} returned {status}")]
    Status {
        url: String,
        status: reqwest::StatusCode,
    },
    #[error("response parse error: {0}")]
    Decode(#[from] serde_json::Error),
}

// ============================================================================
// Wire types
// ============================================================================

#[derive(Clone, Debug, Deserialize)]
struct CatalogEntryResponse {
    id: u32,
    name: String,
    #[serde(default)]
    sprite: String,
}

#[derive(Clone, Debug, Deserialize)]
struct NamedResource {
    name: String,
}

#[derive(Clone, Debug, Deserialize)]
struct PokemonResponse {
    id: u32,
    name: String,
    height: u32,
    weight: u32,
    base_experience: Option<u32>,
    #[serde(default)]
    types: Vec<TypeSlotResponse>,
    #[serde(default)]
    abilities: Vec<AbilitySlotResponse>,
    #[serde(default)]
    sprites: SpritesResponse,
}

#[derive(Clone, Debug, Deserialize)]
struct TypeSlotResponse {
    slot: u32,
    #[serde(rename = "type")]
    type_info: NamedResource,
}

#[derive(Clone, Debug, Deserialize)]
struct AbilitySlotResponse {
    ability: NamedResource,
}

#[derive(Clone, Debug, Default, Deserialize)]
struct SpritesResponse {
    front_default: Option<String>,
}

impl From<CatalogEntryResponse> for SummaryRecord {
    fn from(entry: CatalogEntryResponse) -> Self {
        SummaryRecord {
            id: entry.id,
            display_name: entry.name,
            thumbnail_ref: entry.sprite,
        }
    }
}

impl From<PokemonResponse> for DetailRecord {
    fn from(response: PokemonResponse) -> Self {
        DetailRecord {
            id: response.id,
            display_name: response.name,
            height: response.height,
            weight: response.weight,
            base_experience: response.base_experience.unwrap_or_default(),
            type_slots: response
                .types
                .into_iter()
                .map(|slot| TypeSlot {
                    slot: slot.slot,
                    type_name: slot.type_info.name,
                })
                .collect(),
            abilities: response
                .abilities
                .into_iter()
                .map(|slot| Ability {
                    ability_name: slot.ability.name,
                })
                .collect(),
            image_ref: response.sprites.front_default.unwrap_or_default(),
        }
    }
}

// ============================================================================
// Decoding
// ============================================================================

/// Decode a catalog document, keeping source order
pub fn decode_catalog(bytes: &[u8]) -> Result<Vec<SummaryRecord>, ApiError> {
    let entries: Vec<CatalogEntryResponse> = serde_json::from_slice(bytes)?;
    Ok(entries.into_iter().map(SummaryRecord::from).collect())
}

pub fn decode_detail(bytes: &[u8]) -> Result<DetailRecord, ApiError> {
    let response: PokemonResponse = serde_json::from_slice(bytes)?;
    Ok(response.into())
}

// ============================================================================
// Requests
// ============================================================================

pub fn detail_url(base: &str, id: u32) -> String {
    format!("{}/pokemon/{id}", base.trim_end_matches('/'))
}

pub async fn load_catalog(source: &CatalogSource) -> Result<Vec<SummaryRecord>, ApiError> {
    let bytes = match source {
        CatalogSource::File(path) => {
            tokio::fs::read(path)
                .await
                .map_err(|source| ApiError::Io {
                    path: path.clone(),
                    source,
                })?
        }
        CatalogSource::Url(url) => fetch_bytes(url).await?,
    };
    decode_catalog(&bytes)
}

pub async fn fetch_detail(url: &str) -> Result<DetailRecord, ApiError> {
    let bytes = fetch_bytes(url).await?;
    decode_detail(&bytes)
}

pub async fn fetch_bytes(url: &str) -> Result<Vec<u8>, ApiError> {
    let response = http_client().get(url).send().await?;
    let status = response.status();
    if !status.is_success() {
        return Err(ApiError::Status {
            url: url.to_string(),
            status,
        });
    }
    Ok(response.bytes().await?.to_vec())
}

pub(crate) fn http_client() -> &'static reqwest::Client {
    static CLIENT: OnceLock<reqwest::Client> = OnceLock::new();
    CLIENT.get_or_init(reqwest::Client::new)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const PIKACHU: &str = r#"{
        "name": "pikachu",
        "id": 25,
        "height": 4,
        "weight": 60,
        "base_experience": 112,
        "types": [{"slot": 1, "type": {"name": "electric", "url": "x"}}],
        "abilities": [
            {"ability": {"name": "static"}, "is_hidden": false},
            {"ability": {"name": "lightning-rod"}, "is_hidden": true}
        ],
        "sprites": {"front_default": "https://img/25.png", "back_default": null}
    }"#;

    #[test]
    fn test_decode_detail_flattens_nested_names() {
        let detail = decode_detail(PIKACHU.as_bytes()).unwrap();

        assert_eq!(detail.id, 25);
        assert_eq!(detail.display_name, "pikachu");
        assert_eq!(detail.base_experience, 112);
        assert_eq!(
            detail.type_slots,
            vec![TypeSlot {
                slot: 1,
                type_name: "electric".into()
            }]
        );
        let abilities: Vec<_> = detail
            .abilities
            .iter()
            .map(|a| a.ability_name.as_str())
            .collect();
        assert_eq!(abilities, vec!["static", "lightning-rod"]);
        assert_eq!(detail.image_ref, "https://img/25.png");
    }

    #[test]
    fn test_decode_detail_null_fields_default() {
        let json = r#"{"name": "x", "id": 10001, "height": 1, "weight": 2,
            "base_experience": null, "types": [], "abilities": [],
            "sprites": {"front_default": null}}"#;
        let detail = decode_detail(json.as_bytes()).unwrap();
        assert_eq!(detail.base_experience, 0);
        assert_eq!(detail.image_ref, "");
    }

    #[test]
    fn test_decode_catalog_keeps_order_and_ignores_extra_fields() {
        let json = r#"[
            {"id": 4, "name": "charmander", "url": "u4", "sprite": "s4"},
            {"id": 1, "name": "bulbasaur", "url": "u1", "sprite": "s1"}
        ]"#;
        let catalog = decode_catalog(json.as_bytes()).unwrap();
        let ids: Vec<_> = catalog.iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![4, 1]);
        assert_eq!(catalog[0].thumbnail_ref, "s4");
    }

    #[test]
    fn test_decode_catalog_rejects_non_array() {
        assert!(matches!(
            decode_catalog(br#"{"id": 1}"#),
            Err(ApiError::Decode(_))
        ));
    }

    #[test]
    fn test_detail_url() {
        assert_eq!(
            detail_url("http://localhost:3030/", 25),
            "http://localhost:3030/pokemon/25"
        );
    }
}
