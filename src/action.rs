//! Actions: user intents and async results

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::state::{DetailRecord, SummaryRecord};

#[derive(tui_dispatch::Action, Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
#[action(infer_categories)]
pub enum Action {
    /// Startup: read the static catalog once
    Init,

    // ===== Catalog category =====
    /// Result: catalog read, replaces the list wholesale
    CatalogDidLoad(Vec<SummaryRecord>),
    /// Result: catalog read failed, list stays as it is
    CatalogDidError(String),

    // ===== Cursor category =====
    CursorMove(i16),
    CursorJumpTop,
    CursorJumpBottom,

    // ===== Entry category =====
    /// Intent: expand the entry at this index and fetch its detail
    EntrySelect(usize),

    // ===== Detail category =====
    /// Result: detail fetch for request `seq` succeeded
    DetailDidLoad { seq: u64, detail: DetailRecord },
    /// Result: detail fetch for request `seq` failed
    DetailDidError { seq: u64, id: u32, error: String },

    // ===== UI category =====
    UiTerminalResize(u16, u16),

    // ===== Uncategorized (global) =====
    Quit,
}
