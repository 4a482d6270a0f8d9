use crate::domain::models::Rgb;
use ratatui::style::{Color, Modifier, Style};
use serde::{Deserialize, Serialize};

pub mod catppuccin;
pub mod nord;
pub mod palette;

pub use palette::Palette;

#[derive(Debug, Clone, PartialEq)]
pub struct Theme {
    pub border: Style,
    pub border_focus: Style,

    pub surface_title: Style,
    pub surface_text: Style,

    pub header_logo: Style,
    pub header_item: Style,
    pub header_warn: Style,
    pub header: Style,

    pub footer_segment_key: Style,
    pub footer_segment_val: Style,
    pub footer: Style,

    pub palette_title: Style,
    pub palette_query: Style,
    pub palette_placeholder: Style,
    pub palette_badge: Style,
    pub palette_key_hint: Style,
    pub emphasis: Style,

    pub list_selected: Style,
    pub list_item: Style,
    pub dimmed: Style,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PaletteType {
    #[default]
    CatppuccinMocha,
    Nord,
}

impl Theme {
    #[must_use]
    pub fn from_palette_type(t: PaletteType) -> Self {
        match t {
            PaletteType::CatppuccinMocha => Self::from_palette(&catppuccin::CATPPUCCIN_MOCHA),
            PaletteType::Nord => Self::from_palette(&nord::NORD),
        }
    }

    #[must_use]
    pub fn from_palette(p: &Palette) -> Self {
        Self {
            border: Style::default().fg(p.surface2),
            border_focus: Style::default().fg(p.blue),

            surface_title: Style::default().fg(p.subtext1).add_modifier(Modifier::BOLD),
            surface_text: Style::default().fg(p.text),

            header_logo: Style::default()
                .bg(p.blue)
                .fg(p.crust)
                .add_modifier(Modifier::BOLD),
            header_item: Style::default().bg(p.surface0).fg(p.text),
            header_warn: Style::default()
                .bg(p.yellow)
                .fg(p.crust)
                .add_modifier(Modifier::BOLD),
            header: Style::default().bg(p.base).fg(p.text),

            footer_segment_key: Style::default()
                .bg(p.surface0)
                .fg(p.blue)
                .add_modifier(Modifier::BOLD),
            footer_segment_val: Style::default().bg(p.base).fg(p.text),
            footer: Style::default().bg(p.crust).fg(p.subtext0),

            palette_title: Style::default()
                .bg(p.mauve)
                .fg(p.crust)
                .add_modifier(Modifier::BOLD),
            palette_query: Style::default().bg(p.mantle).fg(p.text),
            palette_placeholder: Style::default()
                .bg(p.mantle)
                .fg(p.overlay0)
                .add_modifier(Modifier::ITALIC),
            palette_badge: Style::default().bg(p.surface1).fg(p.peach),
            palette_key_hint: Style::default().fg(p.subtext0),
            emphasis: Style::default().fg(p.green).add_modifier(Modifier::BOLD),

            list_selected: Style::default()
                .bg(p.blue)
                .fg(p.crust)
                .add_modifier(Modifier::BOLD),
            list_item: Style::default().fg(p.text),
            dimmed: Style::default().fg(p.overlay0).add_modifier(Modifier::DIM),
        }
    }

    /// Foreground style for an option's accent color.
    #[must_use]
    pub fn accent(rgb: Rgb) -> Style {
        Style::default().fg(Color::Rgb(rgb.0, rgb.1, rgb.2))
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::from_palette_type(PaletteType::default())
    }
}
