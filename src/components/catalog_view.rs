use crossterm::event::KeyCode;
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Paragraph},
    Frame,
};
use tui_dispatch::EventKind;
use tui_dispatch_components::{
    BaseStyle, Padding, StatusBar, StatusBarHint, StatusBarItem, StatusBarProps,
    StatusBarSection, StatusBarStyle,
};

use super::{
    CatalogList, CatalogListProps, Component, DetailPanel, DetailPanelProps, ACCENT_GOLD,
    ACCENT_TEAL, BG_BASE, BG_PANEL, TEXT_DIM, TEXT_MAIN,
};
use crate::action::Action;
use crate::state::AppState;

/// Props for CatalogView - read-only view of state
pub struct CatalogViewProps<'a> {
    pub state: &'a AppState,
    pub is_focused: bool,
}

/// Root view: header, list beside the detail panel, and a status bar
pub struct CatalogView {
    list: CatalogList,
    panel: DetailPanel,
    status_bar: StatusBar,
}

impl CatalogView {
    pub fn new() -> Self {
        Self {
            list: CatalogList::new(),
            panel: DetailPanel,
            status_bar: StatusBar::new(),
        }
    }

    fn list_props<'a>(state: &'a AppState, is_focused: bool) -> CatalogListProps<'a> {
        CatalogListProps {
            entries: &state.catalog,
            cursor: state.cursor,
            expanded_id: state.expanded_id,
            detail: state.current_detail.as_ref(),
            is_focused,
        }
    }

    fn render_header(frame: &mut Frame, area: Rect, state: &AppState) {
        let line = Line::from(vec![
            Span::styled(
                "Poké",
                Style::default()
                    .fg(ACCENT_TEAL)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!("  {}", state.catalog_source),
                Style::default().fg(TEXT_DIM),
            ),
        ]);
        frame.render_widget(
            Paragraph::new(line).style(Style::default().bg(BG_PANEL).fg(TEXT_MAIN)),
            area,
        );
    }

    fn render_status(&mut self, frame: &mut Frame, area: Rect, state: &AppState) {
        let status = if state.is_fetching() {
            format!("Fetching ({})...", state.pending_fetches)
        } else {
            String::new()
        };
        let status_span = Span::styled(status, Style::default().fg(ACCENT_GOLD));
        let status_items = [StatusBarItem::span(status_span)];
        let hints = [
            StatusBarHint::new("↑↓", "move"),
            StatusBarHint::new("enter", "select"),
            StatusBarHint::new("q", "quit"),
        ];

        let style = StatusBarStyle {
            base: BaseStyle {
                border: None,
                padding: Padding::xy(1, 0),
                bg: Some(BG_PANEL),
                fg: Some(TEXT_MAIN),
            },
            text: Style::default().fg(TEXT_DIM),
            hint_key: Style::default()
                .fg(ACCENT_TEAL)
                .add_modifier(Modifier::BOLD),
            hint_label: Style::default().fg(TEXT_DIM),
            separator: Style::default().fg(TEXT_DIM),
        };

        <StatusBar as Component<Action>>::render(
            &mut self.status_bar,
            frame,
            area,
            StatusBarProps {
                left: StatusBarSection::items(&status_items),
                center: StatusBarSection::hints(&hints).with_separator("  "),
                right: StatusBarSection::empty(),
                style,
                is_focused: false,
            },
        );
    }
}

impl Component<Action> for CatalogView {
    type Props<'a> = CatalogViewProps<'a>;

    fn handle_event(
        &mut self,
        event: &EventKind,
        props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = Action> {
        if !props.is_focused {
            return Vec::new();
        }
        if let EventKind::Key(key) = event {
            if matches!(key.code, KeyCode::Char('q') | KeyCode::Esc) {
                return vec![Action::Quit];
            }
        }
        self.list
            .handle_event(event, Self::list_props(props.state, true))
            .into_iter()
            .collect()
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let state = props.state;
        frame.render_widget(Block::default().style(Style::default().bg(BG_BASE)), area);

        let rows = Layout::vertical([
            Constraint::Length(1), // Header
            Constraint::Min(3),    // List + detail
            Constraint::Length(1), // Status bar
        ])
        .split(area);
        let columns =
            Layout::horizontal([Constraint::Percentage(45), Constraint::Percentage(55)])
                .split(rows[1]);

        Self::render_header(frame, rows[0], state);
        self.list
            .render(frame, columns[0], Self::list_props(state, props.is_focused));
        self.panel.render(
            frame,
            columns[1],
            DetailPanelProps {
                detail: state.current_detail.as_ref(),
            },
        );
        self.render_status(frame, rows[2], state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tui_dispatch::testing::*;

    #[test]
    fn test_quit_key() {
        let mut view = CatalogView::new();
        let state = AppState::default();

        let actions: Vec<_> = view
            .handle_event(
                &EventKind::Key(key("q")),
                CatalogViewProps {
                    state: &state,
                    is_focused: true,
                },
            )
            .into_iter()
            .collect();
        actions.assert_first(Action::Quit);
    }

    #[test]
    fn test_render_help_bar() {
        let mut render = RenderHarness::new(80, 24);
        let mut view = CatalogView::new();
        let state = AppState::default();

        let output = render.render_to_string_plain(|frame| {
            view.render(
                frame,
                frame.area(),
                CatalogViewProps {
                    state: &state,
                    is_focused: true,
                },
            );
        });

        assert!(output.contains("select"), "Should show select hint");
        assert!(output.contains("quit"), "Should show quit hint");
    }
}
