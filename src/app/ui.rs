use crate::app::dispatch::Host;
use crate::app::state::AppState;
use crate::components::footer::Footer;
use crate::components::header::Header;
use crate::components::helpers::dim_area;
use crate::components::palette::PaletteModal;
use crate::domain::sources::UpdateSource;
use crate::domain::update::UpdateState;
use crate::theme::Theme;

use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    Frame,
};

/// The parts of a frame only the host knows how to draw.
pub trait HostView {
    fn window_title(&self) -> &str;
    fn render_body(&self, theme: &Theme, area: Rect, buf: &mut Buffer);
}

pub struct AppLayout {
    pub header: Rect,
    pub body: Rect,
    pub footer: Rect,
}

pub fn get_layout(area: Rect) -> AppLayout {
    let main = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Header
            Constraint::Min(0),    // Body
            Constraint::Length(1), // Footer
        ])
        .split(area);

    AppLayout {
        header: main[0],
        body: main[1],
        footer: main[2],
    }
}

pub fn draw<H: Host + HostView>(f: &mut Frame, app_state: &AppState, host: &H) {
    if f.area().width == 0 || f.area().height == 0 {
        return;
    }

    let theme = &app_state.theme;
    let layout = get_layout(f.area());

    // --- Header ---
    if layout.header.height > 0 {
        let sources = host.sources();
        let (update, update_text) = sources
            .update
            .map_or((UpdateState::NotChecked, String::new()), |u| {
                (u.state(), u.status_text())
            });
        f.render_widget(
            Header {
                theme,
                window_title: host.window_title(),
                update,
                update_text: &update_text,
                terminal_width: f.area().width,
            },
            layout.header,
        );
    }

    // --- Body ---
    if layout.body.width > 0 && layout.body.height > 0 {
        host.render_body(theme, layout.body, f.buffer_mut());
    }

    // --- Footer ---
    if layout.footer.height > 0 {
        f.render_widget(
            Footer {
                state: app_state,
                theme,
            },
            layout.footer,
        );
    }

    // --- Palette ---
    if let Some(palette) = &app_state.palette {
        let area = f.area();
        dim_area(f.buffer_mut(), area);
        f.render_widget(
            PaletteModal {
                theme,
                state: palette,
            },
            area,
        );
    }
}
