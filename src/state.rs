//! Application state - single source of truth

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tui_dispatch_debug::debug::{ron_string, DebugSection, DebugState};

use crate::config::{CatalogSource, DetailOrdering, ViewerConfig};

/// Lightweight catalog entry shown in the list
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct SummaryRecord {
    pub id: u32,
    pub display_name: String,
    pub thumbnail_ref: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct TypeSlot {
    pub slot: u32,
    pub type_name: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Ability {
    pub ability_name: String,
}

/// Full record fetched on demand for one entry
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct DetailRecord {
    pub id: u32,
    pub display_name: String,
    pub height: u32,
    pub weight: u32,
    pub base_experience: u32,
    pub type_slots: Vec<TypeSlot>,
    /// Source order, duplicates kept
    pub abilities: Vec<Ability>,
    pub image_ref: String,
}

/// Application state - everything the UI needs to render
#[derive(Clone, Debug, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct AppState {
    pub terminal_size: (u16, u16),

    // --- Sources ---
    pub catalog_source: CatalogSource,
    pub lookup_base_url: String,
    pub ordering: DetailOrdering,

    // --- Catalog ---
    pub catalog: Vec<SummaryRecord>,
    pub catalog_loaded: bool,
    pub cursor: usize,

    // --- Selection ---
    /// Entry currently shown inline-expanded. Not tied to `current_detail.id`.
    pub expanded_id: Option<u32>,
    pub current_detail: Option<DetailRecord>,

    // --- Request tracking ---
    pub next_request_seq: u64,
    pub latest_request_seq: Option<u64>,
    pub pending_fetches: usize,
}

impl AppState {
    pub fn new(config: &ViewerConfig) -> Self {
        Self {
            terminal_size: (80, 24),
            catalog_source: config.catalog.clone(),
            lookup_base_url: config.lookup_base_url.clone(),
            ordering: config.ordering,
            catalog: Vec::new(),
            catalog_loaded: false,
            cursor: 0,
            expanded_id: None,
            current_detail: None,
            next_request_seq: 0,
            latest_request_seq: None,
            pending_fetches: 0,
        }
    }

    pub fn entry_at(&self, index: usize) -> Option<&SummaryRecord> {
        self.catalog.get(index)
    }

    pub fn highlighted_entry(&self) -> Option<&SummaryRecord> {
        self.entry_at(self.cursor)
    }

    /// Clamp and apply a cursor position, returns whether it moved.
    pub fn set_cursor(&mut self, index: usize) -> bool {
        if self.catalog.is_empty() {
            self.cursor = 0;
            return false;
        }
        let bounded = index.min(self.catalog.len() - 1);
        if bounded != self.cursor {
            self.cursor = bounded;
            return true;
        }
        false
    }

    /// Hand out the next request sequence number and remember it as the latest.
    pub fn allocate_request_seq(&mut self) -> u64 {
        let seq = self.next_request_seq;
        self.next_request_seq = self.next_request_seq.wrapping_add(1);
        self.latest_request_seq = Some(seq);
        seq
    }

    pub fn is_fetching(&self) -> bool {
        self.pending_fetches > 0
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(&ViewerConfig::default())
    }
}

impl DebugState for AppState {
    fn debug_sections(&self) -> Vec<DebugSection> {
        vec![
            DebugSection::new("Catalog")
                .entry("source", ron_string(&self.catalog_source.to_string()))
                .entry("loaded", ron_string(&self.catalog_loaded))
                .entry("entries", ron_string(&self.catalog.len()))
                .entry("cursor", ron_string(&self.cursor))
                .entry(
                    "highlighted",
                    ron_string(&self.highlighted_entry().map(|e| e.display_name.clone())),
                ),
            DebugSection::new("Selection")
                .entry("expanded_id", ron_string(&self.expanded_id))
                .entry(
                    "detail",
                    ron_string(&self.current_detail.as_ref().map(|d| d.display_name.clone())),
                ),
            DebugSection::new("Requests")
                .entry("lookup", ron_string(&self.lookup_base_url))
                .entry("ordering", ron_string(&self.ordering))
                .entry("latest_seq", ron_string(&self.latest_request_seq))
                .entry("pending", ron_string(&self.pending_fetches)),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(id: u32, name: &str) -> SummaryRecord {
        SummaryRecord {
            id,
            display_name: name.into(),
            thumbnail_ref: String::new(),
        }
    }

    #[test]
    fn test_set_cursor_clamps_to_catalog() {
        let mut state = AppState {
            catalog: vec![entry(1, "bulbasaur"), entry(2, "ivysaur")],
            ..Default::default()
        };

        assert!(state.set_cursor(10));
        assert_eq!(state.cursor, 1);
        assert!(!state.set_cursor(1));
        assert_eq!(
            state.highlighted_entry().map(|e| e.display_name.as_str()),
            Some("ivysaur")
        );
    }

    #[test]
    fn test_set_cursor_on_empty_catalog() {
        let mut state = AppState::default();
        assert!(!state.set_cursor(3));
        assert_eq!(state.cursor, 0);
    }

    #[test]
    fn test_request_seq_is_monotonic() {
        let mut state = AppState::default();
        assert_eq!(state.allocate_request_seq(), 0);
        assert_eq!(state.allocate_request_seq(), 1);
        assert_eq!(state.latest_request_seq, Some(1));
    }
}
