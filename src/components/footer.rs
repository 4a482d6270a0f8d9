use crate::app::action::Action;
use crate::app::state::AppState;
use crate::theme::Theme;

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

pub struct FooterItem {
    pub key: String,
    pub desc: &'static str,
}

pub struct FooterGroup {
    pub name: &'static str,
    pub items: Vec<FooterItem>,
}

pub struct Footer<'a> {
    pub state: &'a AppState,
    pub theme: &'a Theme,
}

/// Hint groups for the current overlay state. Keys come from the live
/// keymap so custom bindings show up here.
pub fn get_groups(state: &AppState) -> Vec<FooterGroup> {
    let keymap = &state.keymap;
    let item = |key: Option<String>, desc| key.map(|key| FooterItem { key, desc });

    if state.overlay.active().is_some() {
        let palette = |action| keymap.palette_binding_label(&action);
        return vec![FooterGroup {
            name: "PALETTE",
            items: [
                item(palette(Action::PaletteSelect), "run"),
                item(palette(Action::ClosePalette), "close"),
                item(palette(Action::PaletteNext), "next"),
                item(palette(Action::PalettePrev), "prev"),
                item(palette(Action::PaletteClearQuery), "clear"),
            ]
            .into_iter()
            .flatten()
            .collect(),
        }];
    }

    let global = |action| keymap.binding_label(&action);
    vec![
        FooterGroup {
            name: "PALETTE",
            items: [
                item(global(Action::ToggleCommandPalette), "commands"),
                item(global(Action::OpenSessionSearch), "sessions"),
            ]
            .into_iter()
            .flatten()
            .collect(),
        },
        FooterGroup {
            name: "SURFACE",
            items: [
                item(global(Action::FocusNextSurface), "focus"),
                item(global(Action::Quit), "quit"),
            ]
            .into_iter()
            .flatten()
            .collect(),
        },
    ]
}

impl Widget for Footer<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let theme = self.theme;

        let status_span = match &self.state.status_message {
            Some(msg) => Span::styled(format!("  {msg}  "), theme.header_warn),
            None => Span::styled("  READY  ", theme.header_logo),
        };

        let mut spans = vec![status_span, Span::raw(" ")];

        let available_width = area.width.saturating_sub(4) as usize; // Margin
        let mut current_width = spans.iter().map(Span::width).sum::<usize>();

        for group in get_groups(self.state) {
            // Group names only when there is room to spare
            if area.width > 100 && !group.items.is_empty() {
                let label = Span::styled(format!("{}: ", group.name), theme.dimmed);
                current_width += label.width();
                spans.push(label);
            }

            for item in group.items {
                let key_str = format!(" {} ", item.key);
                let desc_str = format!(" {} ", item.desc);

                let item_width = key_str.len() + desc_str.len();
                if current_width + item_width + 1 > available_width {
                    break;
                }

                spans.push(Span::styled(key_str, theme.footer_segment_key));
                spans.push(Span::styled(desc_str, theme.footer_segment_val));
                spans.push(Span::raw(" "));
                current_width += item_width + 1;
            }
            spans.push(Span::raw("  "));
            current_width += 2;
        }

        Paragraph::new(Line::from(spans))
            .style(theme.footer)
            .render(area, buf);
    }
}
