use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};
use tui_dispatch::EventKind;

use super::{Component, ACCENT_GOLD, ACCENT_TEAL, BG_PANEL, TEXT_DIM, TEXT_MAIN};
use crate::action::Action;
use crate::state::DetailRecord;

pub const PLACEHOLDER: &str = "Select a Pokémon from the list";

/// Lines describing a detail record, shared by the panel and the inline block.
pub fn detail_lines(detail: &DetailRecord) -> Vec<Line<'static>> {
    let heading = Style::default()
        .fg(ACCENT_TEAL)
        .add_modifier(Modifier::BOLD);
    let label = Style::default().fg(TEXT_DIM);

    let mut lines = vec![
        Line::from(Span::styled(
            detail.display_name.clone(),
            Style::default()
                .fg(ACCENT_GOLD)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(vec![
            Span::styled("Height: ", label),
            Span::raw(detail.height.to_string()),
        ]),
        Line::from(vec![
            Span::styled("Weight: ", label),
            Span::raw(detail.weight.to_string()),
        ]),
        Line::from(vec![
            Span::styled("Base Experience: ", label),
            Span::raw(detail.base_experience.to_string()),
        ]),
        Line::from(vec![
            Span::styled("Sprite: ", label),
            Span::raw(detail.image_ref.clone()),
        ]),
        Line::from(Span::styled("Types", heading)),
    ];
    lines.extend(
        detail
            .type_slots
            .iter()
            .map(|slot| Line::from(format!("  {}", slot.type_name))),
    );
    lines.push(Line::from(Span::styled("Abilities", heading)));
    lines.extend(
        detail
            .abilities
            .iter()
            .map(|ability| Line::from(format!("  {}", ability.ability_name))),
    );
    lines
}

pub struct DetailPanelProps<'a> {
    pub detail: Option<&'a DetailRecord>,
}

/// Side panel showing the current detail or a placeholder
#[derive(Default)]
pub struct DetailPanel;

impl Component<Action> for DetailPanel {
    type Props<'a> = DetailPanelProps<'a>;

    fn handle_event(
        &mut self,
        _event: &EventKind,
        _props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = Action> {
        None::<Action>
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let block = Block::default()
            .borders(Borders::ALL)
            .title("DETAIL")
            .style(Style::default().bg(BG_PANEL).fg(TEXT_MAIN))
            .border_style(Style::default().fg(TEXT_DIM));

        let lines = match props.detail {
            Some(detail) => detail_lines(detail),
            None => vec![Line::from(Span::styled(
                PLACEHOLDER,
                Style::default().fg(TEXT_DIM),
            ))],
        };

        let paragraph = Paragraph::new(lines)
            .block(block)
            .wrap(Wrap { trim: false });
        frame.render_widget(paragraph, area);
    }
}
