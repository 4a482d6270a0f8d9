use crate::domain::models::ActionId;

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    // --- System / Terminal ---
    Tick,
    Resize(u16, u16),
    Quit,

    // --- Surfaces (outside any overlay) ---
    FocusNextSurface,
    FocusPrevSurface,
    SurfaceInput(char),          // Key forwarded to the first responder
    RunTerminalAction(ActionId), // Bound shortcut fired directly

    // --- Overlay Transitions ---
    OpenCommandPalette,   // Palette button or shortcut
    OpenSessionSearch,    // Shortcut, or "Search Sessions…" from the command palette
    ToggleCommandPalette, // Same key opens and closes
    ClosePalette,         // Escape / cancel, no option invoked
    SourcesChanged,       // Update, session, or action state moved underneath us

    // --- Palette Session ---
    PaletteInput(char),
    PaletteBackspace,
    PaletteClearQuery,
    PaletteNext,
    PalettePrev,
    PaletteSelect,
}
