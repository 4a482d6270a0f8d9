use crate::infrastructure::demo::{display_pwd, display_title, DemoWindow, Workspace};
use crate::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, Widget},
};

/// Visible windows side by side, each split into its surfaces.
pub struct WorkspaceView<'a> {
    pub workspace: &'a Workspace,
    pub theme: &'a Theme,
}

impl Widget for WorkspaceView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let windows: Vec<&DemoWindow> = self
            .workspace
            .windows
            .iter()
            .filter(|w| w.visible)
            .collect();
        if windows.is_empty() {
            Paragraph::new(Line::from(Span::styled(
                "  No open windows. Open the command palette to create one.",
                self.theme.dimmed,
            )))
            .render(area, buf);
            return;
        }

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints(vec![Constraint::Ratio(1, windows.len() as u32); windows.len()])
            .split(area);

        for (window, column) in windows.into_iter().zip(columns.iter()) {
            self.render_window(window, *column, buf);
        }
    }
}

impl WorkspaceView<'_> {
    fn render_window(&self, window: &DemoWindow, area: Rect, buf: &mut Buffer) {
        let is_key = self.workspace.key_window == Some(window.handle);
        let tab_style = window
            .tab_color
            .display_color()
            .map_or(self.theme.surface_title, |rgb| {
                self.theme.surface_title.patch(Theme::accent(rgb))
            });

        let mut title = vec![Span::styled(format!(" {} ", display_title(window)), tab_style)];
        if let Some(pwd) = display_pwd(window, self.workspace.home.as_deref()) {
            title.push(Span::styled(format!("{pwd} "), self.theme.dimmed));
        }

        let block = Block::default()
            .title(Line::from(title))
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(if is_key {
                self.theme.border_focus
            } else {
                self.theme.border
            });
        let inner = block.inner(area);
        block.render(area, buf);

        let splits = Layout::default()
            .direction(Direction::Vertical)
            .constraints(vec![
                Constraint::Ratio(1, window.surfaces.len().max(1) as u32);
                window.surfaces.len()
            ])
            .split(inner);

        for (surface, split) in window.surfaces.iter().zip(splits.iter()) {
            let focused = self.workspace.first_responder == Some(surface.id);
            let border = if focused {
                self.theme.border_focus
            } else {
                self.theme.border
            };
            let surface_block = Block::default()
                .title(Span::styled(format!(" {} ", surface.id), self.theme.dimmed))
                .borders(Borders::TOP)
                .border_style(border);

            // Keep the tail of the scrollback in view
            let height = surface_block.inner(*split).height as usize;
            let start = surface.lines.len().saturating_sub(height);
            let lines: Vec<Line> = surface.lines[start..]
                .iter()
                .enumerate()
                .map(|(i, text)| {
                    let mut spans = vec![Span::styled("$ ", self.theme.dimmed)];
                    spans.push(Span::styled(text.as_str(), self.theme.surface_text));
                    if focused && start + i + 1 == surface.lines.len() {
                        spans.push(Span::styled("█", self.theme.surface_text));
                    }
                    Line::from(spans)
                })
                .collect();

            Paragraph::new(lines).block(surface_block).render(*split, buf);
        }
    }
}
