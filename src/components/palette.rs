use crate::app::overlay::Overlay;
use crate::app::state::PaletteState;
use crate::domain::models::PaletteOption;
use crate::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, List, ListItem, ListState, StatefulWidget, Widget},
};

use super::helpers::{draw_drop_shadow, top_anchored_rect};

const WIDTH_PERCENT: u16 = 60;
// Borders, query line and separator.
const CHROME_HEIGHT: u16 = 4;
const MIN_ROWS: u16 = 1;

/// Where the palette is drawn. Both overlays share the same position.
pub fn palette_rect(area: Rect, visible_rows: usize) -> Rect {
    let max_rows = (area.height / 5 * 3).saturating_sub(CHROME_HEIGHT).max(MIN_ROWS);
    let rows = u16::try_from(visible_rows)
        .unwrap_or(u16::MAX)
        .clamp(MIN_ROWS, max_rows);
    top_anchored_rect(WIDTH_PERCENT, rows + CHROME_HEIGHT, area.height / 8, area)
}

pub struct PaletteModal<'a> {
    pub theme: &'a Theme,
    pub state: &'a PaletteState,
}

impl PaletteModal<'_> {
    fn title(&self) -> &'static str {
        match self.state.overlay {
            Overlay::Command => " COMMAND PALETTE ",
            Overlay::SessionSearch => " SESSIONS ",
        }
    }

    fn item(&self, option: &PaletteOption, selected: bool) -> ListItem<'static> {
        let theme = self.theme;
        let base = if selected {
            theme.list_selected
        } else {
            theme.list_item
        };

        let mut spans = vec![Span::styled(if selected { "> " } else { "  " }, base)];

        if let Some(icon) = &option.leading_icon {
            let style = match option.accent_color {
                Some(rgb) if !selected => Theme::accent(rgb),
                _ => base,
            };
            spans.push(Span::styled(format!("{} ", icon.glyph()), style));
        }

        let title_style = if option.emphasis && !selected {
            theme.emphasis
        } else {
            base
        };
        spans.push(Span::styled(option.title.clone(), title_style));

        if let Some(badge) = &option.badge {
            spans.push(Span::raw(" "));
            spans.push(Span::styled(format!(" {badge} "), theme.palette_badge));
        }

        if let Some(description) = &option.description {
            spans.push(Span::styled(
                format!("  {description}"),
                theme.list_item.add_modifier(Modifier::DIM),
            ));
        }

        if let Some(keys) = &option.key_hint {
            spans.push(Span::styled(
                format!("  {}", keys.join("+")),
                theme.palette_key_hint,
            ));
        }

        ListItem::new(Line::from(spans))
    }
}

impl Widget for PaletteModal<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let visible: Vec<&PaletteOption> = self.state.visible().collect();
        let modal_area = palette_rect(area, visible.len());
        if modal_area.width == 0 || modal_area.height == 0 {
            return;
        }

        draw_drop_shadow(buf, modal_area, area);
        Clear.render(modal_area, buf);

        let block = Block::default()
            .title(Line::from(vec![
                Span::raw(" "),
                Span::styled(self.title(), self.theme.palette_title),
                Span::raw(" "),
            ]))
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(self.theme.border_focus);

        let inner_area = block.inner(modal_area);
        block.render(modal_area, buf);

        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1), // Query input
                Constraint::Length(1), // Separator
                Constraint::Min(0),    // Results
            ])
            .split(inner_area);

        // Render Query
        let query_line = if self.state.query.is_empty() {
            Line::from(vec![
                Span::styled(" > ", self.theme.footer_segment_key),
                Span::styled(self.state.placeholder.as_str(), self.theme.palette_placeholder),
            ])
        } else {
            Line::from(vec![
                Span::styled(" > ", self.theme.footer_segment_key),
                Span::styled(self.state.query.as_str(), self.theme.palette_query),
                Span::styled(
                    "_",
                    self.theme.palette_query.add_modifier(Modifier::SLOW_BLINK),
                ),
            ])
        };
        buf.set_line(layout[0].x, layout[0].y, &query_line, layout[0].width);

        // Render Separator
        let separator = "─".repeat(layout[1].width as usize);
        buf.set_string(layout[1].x, layout[1].y, separator, self.theme.border_focus);

        // Render Results
        if visible.is_empty() {
            let no_results = Line::from(vec![Span::styled(
                "  No matches",
                self.theme.list_item.add_modifier(Modifier::DIM),
            )]);
            buf.set_line(layout[2].x, layout[2].y, &no_results, layout[2].width);
            return;
        }

        let items: Vec<ListItem> = visible
            .iter()
            .enumerate()
            .map(|(i, option)| self.item(option, i == self.state.selected_index))
            .collect();

        let mut list_state = ListState::default().with_selected(Some(self.state.selected_index));
        StatefulWidget::render(List::new(items), layout[2], buf, &mut list_state);
    }
}
