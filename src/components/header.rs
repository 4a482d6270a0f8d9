use crate::domain::update::UpdateState;
use crate::theme::Theme;

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

const SEP_RIGHT: &str = "\u{e0b0}";

/// Powerline strip: logo, key window title, then update status.
pub struct Header<'a> {
    pub theme: &'a Theme,
    pub window_title: &'a str,
    pub update: UpdateState,
    pub update_text: &'a str,
    pub terminal_width: u16,
}

impl Widget for Header<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let logo_bg = self.theme.header_logo.bg.unwrap_or(Color::Reset);
        let item_bg = self.theme.header_item.bg.unwrap_or(Color::Reset);
        let base_bg = self.theme.header.bg.unwrap_or(Color::Reset);

        // Update segment only shows up when there is something to act on
        let update_style = match self.update {
            UpdateState::NotChecked | UpdateState::UpToDate => None,
            UpdateState::Error => Some(self.theme.header_warn),
            _ => Some(self.theme.emphasis.bg(item_bg)),
        };

        let mut spans = vec![
            Span::styled(" ❐ SWITCHYARD ", self.theme.header_logo),
            Span::styled(SEP_RIGHT, Style::default().fg(logo_bg).bg(item_bg)),
            Span::styled(format!(" {} ", self.window_title), self.theme.header_item),
        ];

        match update_style {
            Some(style) => {
                let update_bg = style.bg.unwrap_or(Color::Reset);
                spans.push(Span::styled(
                    SEP_RIGHT,
                    Style::default().fg(item_bg).bg(update_bg),
                ));
                spans.push(Span::styled(format!(" {} ", self.update_text), style));
                spans.push(Span::styled(
                    SEP_RIGHT,
                    Style::default().fg(update_bg).bg(base_bg),
                ));
            }
            None => spans.push(Span::styled(
                SEP_RIGHT,
                Style::default().fg(item_bg).bg(base_bg),
            )),
        }

        spans.push(Span::styled(
            " ".repeat(self.terminal_width as usize),
            self.theme.header,
        ));

        Paragraph::new(Line::from(spans))
            .style(self.theme.header)
            .render(area, buf);
    }
}
