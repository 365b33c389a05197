//! Reducer - pure function: (state, action) -> DispatchResult

use tui_dispatch::DispatchResult;

use crate::action::Action;
use crate::api;
use crate::config::DetailOrdering;
use crate::effect::Effect;
use crate::state::AppState;

pub fn reducer(state: &mut AppState, action: Action) -> DispatchResult<Effect> {
    match action {
        Action::Init => DispatchResult::changed_with(Effect::LoadCatalog {
            source: state.catalog_source.clone(),
        }),

        // ===== Catalog =====
        Action::CatalogDidLoad(entries) => {
            state.catalog = entries;
            state.catalog_loaded = true;
            state.cursor = 0;
            DispatchResult::changed()
        }

        // The list silently stays empty
        Action::CatalogDidError(_) => DispatchResult::unchanged(),

        // ===== Cursor =====
        Action::CursorMove(delta) => {
            let target = (state.cursor as i64 + delta as i64).max(0) as usize;
            if state.set_cursor(target) {
                DispatchResult::changed()
            } else {
                DispatchResult::unchanged()
            }
        }

        Action::CursorJumpTop => {
            if state.set_cursor(0) {
                DispatchResult::changed()
            } else {
                DispatchResult::unchanged()
            }
        }

        Action::CursorJumpBottom => {
            if state.set_cursor(state.catalog.len().saturating_sub(1)) {
                DispatchResult::changed()
            } else {
                DispatchResult::unchanged()
            }
        }

        // ===== Selection =====
        Action::EntrySelect(index) => {
            let Some(id) = state.entry_at(index).map(|entry| entry.id) else {
                return DispatchResult::unchanged();
            };
            state.cursor = index;
            state.expanded_id = Some(id);
            let seq = state.allocate_request_seq();
            state.pending_fetches += 1;
            DispatchResult::changed_with(Effect::FetchDetail {
                id,
                seq,
                url: api::detail_url(&state.lookup_base_url, id),
            })
        }

        // ===== Detail =====
        Action::DetailDidLoad { seq, detail } => {
            state.pending_fetches = state.pending_fetches.saturating_sub(1);
            if state.ordering == DetailOrdering::LatestRequested
                && state.latest_request_seq != Some(seq)
            {
                tracing::debug!(seq, id = detail.id, "discarding stale detail response");
                return DispatchResult::changed();
            }
            state.current_detail = Some(detail);
            DispatchResult::changed()
        }

        // Previous detail stays visible
        Action::DetailDidError { .. } => {
            state.pending_fetches = state.pending_fetches.saturating_sub(1);
            DispatchResult::changed()
        }

        // ===== UI =====
        Action::UiTerminalResize(width, height) => {
            if state.terminal_size == (width, height) {
                return DispatchResult::unchanged();
            }
            state.terminal_size = (width, height);
            DispatchResult::changed()
        }

        Action::Quit => DispatchResult::unchanged(),
    }
}
