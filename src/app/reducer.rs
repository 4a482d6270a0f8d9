use super::{
    action::Action,
    command::Command,
    options::OptionBuilder,
    overlay::Overlay,
    state::{AppState, PaletteState},
};
use crate::domain::models::OptionAction;
use crate::domain::sources::{ActionRegistry, SessionRegistry, SurfaceRegistry, UpdateSource};
use tracing::debug;

/// Read access to the live sources the palette is built from.
pub struct Sources<'a> {
    pub update: Option<&'a dyn UpdateSource>,
    pub actions: &'a dyn ActionRegistry,
    pub sessions: &'a dyn SessionRegistry,
    pub surfaces: &'a dyn SurfaceRegistry,
}

pub fn update(state: &mut AppState, action: Action, sources: &Sources<'_>) -> Option<Command> {
    match action {
        // --- System ---
        Action::Tick | Action::Resize(_, _) => {}
        Action::Quit => {
            state.should_quit = true;
        }

        // --- Surfaces ---
        Action::FocusNextSurface => return Some(Command::CycleSurface(1)),
        Action::FocusPrevSurface => return Some(Command::CycleSurface(-1)),
        Action::SurfaceInput(c) => return Some(Command::SendText(c)),
        Action::RunTerminalAction(id) => return Some(Command::RunAction(id)),

        // --- Overlay Transitions ---
        Action::OpenCommandPalette => open(state, Overlay::Command, sources),
        Action::OpenSessionSearch => open(state, Overlay::SessionSearch, sources),
        Action::ToggleCommandPalette => {
            state
                .overlay
                .toggle(Overlay::Command, sources.surfaces.focused());
            present(state, sources);
        }
        Action::ClosePalette => close(state),
        Action::SourcesChanged => refresh(state, sources),

        // --- Palette Session ---
        Action::PaletteInput(c) => {
            if let Some(palette) = &mut state.palette {
                palette.push_char(c);
            }
        }
        Action::PaletteBackspace => {
            if let Some(palette) = &mut state.palette {
                palette.pop_char();
            }
        }
        Action::PaletteClearQuery => {
            if let Some(palette) = &mut state.palette {
                palette.clear_query();
            }
        }
        Action::PaletteNext => {
            if let Some(palette) = &mut state.palette {
                palette.select_next();
            }
        }
        Action::PalettePrev => {
            if let Some(palette) = &mut state.palette {
                palette.select_prev();
            }
        }
        Action::PaletteSelect => return select(state, sources),
    }
    None
}

fn open(state: &mut AppState, overlay: Overlay, sources: &Sources<'_>) {
    state.overlay.open(overlay, sources.surfaces.focused());
    present(state, sources);
}

fn close(state: &mut AppState) {
    state.overlay.close();
    state.palette = None;
}

/// Rebuilds the option list for whichever overlay is open.
fn present(state: &mut AppState, sources: &Sources<'_>) {
    state.palette = build_presentation(state, sources).map(PaletteState::from_presentation);
}

/// Like `present`, but keeps the query of an open palette session.
fn refresh(state: &mut AppState, sources: &Sources<'_>) {
    let Some(presentation) = build_presentation(state, sources) else {
        state.palette = None;
        return;
    };
    match &mut state.palette {
        Some(palette) if palette.overlay == presentation.overlay => {
            palette.replace_options(presentation.options);
        }
        _ => state.palette = Some(PaletteState::from_presentation(presentation)),
    }
}

fn build_presentation(
    state: &AppState,
    sources: &Sources<'_>,
) -> Option<super::overlay::Presentation> {
    let overlay = state.overlay.active()?;
    let builder = OptionBuilder {
        update: sources.update,
        actions: sources.actions,
        shortcuts: state.keymap.as_ref(),
        sessions: sources.sessions,
        home: state.home.as_deref(),
    };
    let placeholder = match overlay {
        Overlay::Command => &state.palette_config.command_placeholder,
        Overlay::SessionSearch => &state.palette_config.session_placeholder,
    };
    state
        .overlay
        .present(overlay, placeholder, || match overlay {
            Overlay::Command => builder.command_options(),
            Overlay::SessionSearch => builder.session_options(),
        })
}

/// Consumes the palette session: the chosen option is dispatched once and
/// its overlay closes.
fn select(state: &mut AppState, sources: &Sources<'_>) -> Option<Command> {
    let palette = state.palette.take()?;
    let Some(option) = palette.selected().cloned() else {
        // Nothing matches the query; keep the session open.
        state.palette = Some(palette);
        return None;
    };
    debug!(title = %option.title, "palette option selected");
    state.status_message = Some(option.title.clone());

    let command = match option.action {
        OptionAction::OpenSessionSearch => {
            open(state, Overlay::SessionSearch, sources);
            return None;
        }
        OptionAction::InstallUpdate => Command::InstallUpdate,
        OptionAction::CancelUpdate => Command::CancelUpdate,
        OptionAction::RunAction(id) => Command::RunAction(id),
        OptionAction::ActivateSession(window) => Command::ActivateSession(window),
    };
    close(state);
    Some(command)
}
