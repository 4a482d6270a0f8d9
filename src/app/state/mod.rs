use super::config::{Config, PaletteConfig};
use super::keymap::{KeyConfig, KeyMap};
use super::overlay::OverlayController;
use std::path::PathBuf;
use std::sync::Arc;

pub mod palette;

// Re-exports
pub use palette::PaletteState;

#[derive(Debug, Clone, PartialEq)]
pub struct AppState {
    // --- Status ---
    pub should_quit: bool,
    pub status_message: Option<String>,

    // --- Overlays ---
    pub overlay: OverlayController,
    pub palette: Option<PaletteState>, // Present while an overlay is open

    // --- Config ---
    pub keymap: Arc<KeyMap>,
    pub palette_config: PaletteConfig,
    pub theme: crate::theme::Theme,
    pub home: Option<PathBuf>,
}

impl AppState {
    #[must_use]
    pub fn new(config: &Config) -> Self {
        Self {
            keymap: Arc::new(KeyMap::from_config(&config.keys)),
            palette_config: config.palette.clone(),
            theme: crate::theme::Theme::from_palette_type(config.theme),
            home: home::home_dir(),
            ..Default::default()
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            should_quit: false,
            status_message: None,
            overlay: OverlayController::new(),
            palette: None,
            keymap: Arc::new(KeyMap::from_config(&KeyConfig::default())),
            palette_config: PaletteConfig::default(),
            theme: crate::theme::Theme::default(),
            home: None,
        }
    }
}
