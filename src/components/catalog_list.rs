use crossterm::event::KeyCode;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, List, ListItem, ListState},
    Frame,
};
use tui_dispatch::EventKind;

use super::{detail_lines, Component, ACCENT_TEAL, BG_HIGHLIGHT, BG_PANEL, TEXT_DIM, TEXT_MAIN};
use crate::action::Action;
use crate::state::{DetailRecord, SummaryRecord};

const PAGE_STEP: i16 = 10;
const INLINE_INDENT: &str = "    ";

#[derive(Clone, Copy)]
pub struct CatalogListProps<'a> {
    pub entries: &'a [SummaryRecord],
    pub cursor: usize,
    pub expanded_id: Option<u32>,
    pub detail: Option<&'a DetailRecord>,
    pub is_focused: bool,
}

/// Scrollable catalog list with the expanded entry shown inline
#[derive(Default)]
pub struct CatalogList {
    list_state: ListState,
}

impl CatalogList {
    pub fn new() -> Self {
        Self::default()
    }

    fn items(props: &CatalogListProps<'_>) -> Vec<ListItem<'static>> {
        props
            .entries
            .iter()
            .map(|entry| {
                let mut row = vec![Span::raw(format!("{}. {}", entry.id, entry.display_name))];
                if !entry.thumbnail_ref.is_empty() {
                    row.push(Span::styled(
                        format!("  {}", entry.thumbnail_ref),
                        Style::default().fg(TEXT_DIM),
                    ));
                }
                let mut lines = vec![Line::from(row)];
                if props.expanded_id == Some(entry.id) {
                    if let Some(detail) = props.detail {
                        lines.extend(detail_lines(detail).into_iter().map(|line| {
                            let mut spans = vec![Span::raw(INLINE_INDENT)];
                            spans.extend(line.spans);
                            Line::from(spans)
                        }));
                    }
                }
                ListItem::new(Text::from(lines))
            })
            .collect()
    }
}

impl Component<Action> for CatalogList {
    type Props<'a> = CatalogListProps<'a>;

    fn handle_event(
        &mut self,
        event: &EventKind,
        props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = Action> {
        if !props.is_focused {
            return None;
        }

        match event {
            EventKind::Key(key) => match key.code {
                KeyCode::Up | KeyCode::Char('k') => Some(Action::CursorMove(-1)),
                KeyCode::Down | KeyCode::Char('j') => Some(Action::CursorMove(1)),
                KeyCode::PageUp => Some(Action::CursorMove(-PAGE_STEP)),
                KeyCode::PageDown => Some(Action::CursorMove(PAGE_STEP)),
                KeyCode::Home | KeyCode::Char('g') => Some(Action::CursorJumpTop),
                KeyCode::End | KeyCode::Char('G') => Some(Action::CursorJumpBottom),
                KeyCode::Enter | KeyCode::Char(' ') if !props.entries.is_empty() => {
                    Some(Action::EntrySelect(props.cursor))
                }
                _ => None,
            },
            EventKind::Scroll { delta, .. } => Some(Action::CursorMove(*delta as i16)),
            _ => None,
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let border = if props.is_focused {
            Style::default()
                .fg(ACCENT_TEAL)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(TEXT_DIM)
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .title(format!("POKÉDEX ({})", props.entries.len()))
            .style(Style::default().bg(BG_PANEL).fg(TEXT_MAIN))
            .border_style(border);

        let selected = if props.entries.is_empty() {
            None
        } else {
            Some(props.cursor.min(props.entries.len() - 1))
        };
        self.list_state.select(selected);

        let list = List::new(Self::items(&props))
            .block(block)
            .highlight_style(
                Style::default()
                    .bg(BG_HIGHLIGHT)
                    .fg(TEXT_MAIN)
                    .add_modifier(Modifier::BOLD),
            );
        frame.render_stateful_widget(list, area, &mut self.list_state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyEvent, KeyModifiers};
    use tui_dispatch::testing::*;

    fn entries() -> Vec<SummaryRecord> {
        vec![
            SummaryRecord {
                id: 1,
                display_name: "bulbasaur".into(),
                thumbnail_ref: String::new(),
            },
            SummaryRecord {
                id: 4,
                display_name: "charmander".into(),
                thumbnail_ref: String::new(),
            },
        ]
    }

    fn props(entries: &[SummaryRecord], is_focused: bool) -> CatalogListProps<'_> {
        CatalogListProps {
            entries,
            cursor: 1,
            expanded_id: None,
            detail: None,
            is_focused,
        }
    }

    #[test]
    fn test_enter_selects_cursor_entry() {
        let mut list = CatalogList::new();
        let entries = entries();
        let enter = EventKind::Key(KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE));

        let actions: Vec<_> = list
            .handle_event(&enter, props(&entries, true))
            .into_iter()
            .collect();
        actions.assert_count(1);
        actions.assert_first(Action::EntrySelect(1));
    }

    #[test]
    fn test_navigation_keys() {
        let mut list = CatalogList::new();
        let entries = entries();

        let actions: Vec<_> = list
            .handle_event(&EventKind::Key(key("j")), props(&entries, true))
            .into_iter()
            .collect();
        actions.assert_first(Action::CursorMove(1));

        let actions: Vec<_> = list
            .handle_event(&EventKind::Key(key("g")), props(&entries, true))
            .into_iter()
            .collect();
        actions.assert_first(Action::CursorJumpTop);
    }

    #[test]
    fn test_enter_on_empty_list_is_ignored() {
        let mut list = CatalogList::new();
        let enter = EventKind::Key(KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE));

        let actions: Vec<_> = list
            .handle_event(&enter, props(&[], true))
            .into_iter()
            .collect();
        actions.assert_empty();
    }

    #[test]
    fn test_unfocused_ignores_keys() {
        let mut list = CatalogList::new();
        let entries = entries();

        let actions: Vec<_> = list
            .handle_event(&EventKind::Key(key("j")), props(&entries, false))
            .into_iter()
            .collect();
        actions.assert_empty();
    }
}
