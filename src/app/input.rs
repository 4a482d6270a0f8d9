use crate::app::{action::Action, state::AppState};
use crate::components::palette::palette_rect;
use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEventKind};
use ratatui::layout::{Rect, Size};

pub fn map_event_to_action(
    event: Event,
    app_state: &AppState,
    terminal_size: Size,
) -> Option<Action> {
    if let Event::Key(key) = &event {
        if key.kind == KeyEventKind::Release {
            return None;
        }
    }

    match event {
        Event::Resize(w, h) => Some(Action::Resize(w, h)),
        Event::Key(key) if app_state.overlay.active().is_some() => overlay_key(key, app_state),
        Event::Key(key) => {
            if let Some(action) = app_state.keymap.get_action(key) {
                return Some(action);
            }
            typed_char(key).map(Action::SurfaceInput)
        }
        Event::Mouse(mouse) => {
            let palette = app_state.palette.as_ref()?;
            match mouse.kind {
                MouseEventKind::ScrollUp => Some(Action::PalettePrev),
                MouseEventKind::ScrollDown => Some(Action::PaletteNext),
                MouseEventKind::Down(MouseButton::Left) => {
                    let area = Rect::new(0, 0, terminal_size.width, terminal_size.height);
                    let modal = palette_rect(area, palette.visible().count());
                    let inside = mouse.column >= modal.x
                        && mouse.column < modal.x + modal.width
                        && mouse.row >= modal.y
                        && mouse.row < modal.y + modal.height;
                    // Clicking outside dismisses, like Escape.
                    (!inside).then_some(Action::ClosePalette)
                }
                _ => None,
            }
        }
        _ => None,
    }
}

/// Palette bindings first, then typed text for the query. Anything else
/// falls through to the responder behind the overlay, which only ever
/// receives terminal actions.
fn overlay_key(key: KeyEvent, app_state: &AppState) -> Option<Action> {
    if let Some(action) = app_state.keymap.get_palette_action(key) {
        return Some(action);
    }
    if let Some(c) = typed_char(key).filter(|c| *c != '\n') {
        return Some(Action::PaletteInput(c));
    }
    app_state.overlay.focus().next_responder()?;
    match app_state.keymap.get_action(key)? {
        action @ Action::RunTerminalAction(_) => Some(action),
        _ => None,
    }
}

fn typed_char(key: KeyEvent) -> Option<char> {
    if key
        .modifiers
        .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT | KeyModifiers::SUPER)
    {
        return None;
    }
    match key.code {
        KeyCode::Char(c) => Some(c),
        KeyCode::Enter => Some('\n'),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::overlay::Overlay;
    use crate::domain::models::{ActionId, SurfaceId};
    use crate::domain::sources::MockSurfaceRegistry;
    use crossterm::event::{KeyEventState, MouseEvent};

    const SIZE: Size = Size {
        width: 100,
        height: 40,
    };

    fn press(code: KeyCode, modifiers: KeyModifiers) -> Event {
        Event::Key(KeyEvent::new(code, modifiers))
    }

    fn open_state() -> AppState {
        let mut state = AppState::default();
        state.overlay.open(Overlay::Command, Some(SurfaceId(1)));
        state
    }

    #[test]
    fn test_closed_overlay_routes_to_surface() {
        let state = AppState::default();
        assert_eq!(
            map_event_to_action(press(KeyCode::Char('a'), KeyModifiers::NONE), &state, SIZE),
            Some(Action::SurfaceInput('a'))
        );
        assert_eq!(
            map_event_to_action(press(KeyCode::Enter, KeyModifiers::NONE), &state, SIZE),
            Some(Action::SurfaceInput('\n'))
        );
        assert_eq!(
            map_event_to_action(press(KeyCode::Char('p'), KeyModifiers::CONTROL), &state, SIZE),
            Some(Action::ToggleCommandPalette)
        );
    }

    #[test]
    fn test_open_overlay_claims_keys() {
        let state = open_state();
        assert_eq!(
            map_event_to_action(press(KeyCode::Char('a'), KeyModifiers::SHIFT), &state, SIZE),
            Some(Action::PaletteInput('a'))
        );
        assert_eq!(
            map_event_to_action(press(KeyCode::Enter, KeyModifiers::NONE), &state, SIZE),
            Some(Action::PaletteSelect)
        );
        assert_eq!(
            map_event_to_action(press(KeyCode::Esc, KeyModifiers::NONE), &state, SIZE),
            Some(Action::ClosePalette)
        );
    }

    #[test]
    fn test_unclaimed_keys_wait_for_responder_link() {
        let mut state = open_state();
        let ctrl_n = press(KeyCode::Char('n'), KeyModifiers::CONTROL);
        let tab = press(KeyCode::Tab, KeyModifiers::NONE);

        // Link not established until the next turn.
        assert_eq!(map_event_to_action(ctrl_n.clone(), &state, SIZE), None);

        let mut surfaces = MockSurfaceRegistry::new();
        surfaces.expect_is_alive().return_const(true);
        surfaces.expect_focused().return_const(Some(SurfaceId(1)));
        state.overlay.focus_mut().run_turn(&mut surfaces);

        assert_eq!(
            map_event_to_action(ctrl_n, &state, SIZE),
            Some(Action::RunTerminalAction(ActionId::new("new_window")))
        );
        // Focus cycling stays blocked behind the overlay.
        assert_eq!(map_event_to_action(tab, &state, SIZE), None);
    }

    #[test]
    fn test_release_events_ignored() {
        let state = AppState::default();
        let release = Event::Key(KeyEvent {
            code: KeyCode::Char('a'),
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Release,
            state: KeyEventState::NONE,
        });
        assert_eq!(map_event_to_action(release, &state, SIZE), None);
    }

    #[test]
    fn test_click_outside_palette_closes() {
        let mut state = open_state();
        state.palette = Some(crate::app::state::PaletteState::from_presentation(
            crate::app::overlay::Presentation {
                overlay: Overlay::Command,
                placeholder: String::new(),
                options: Vec::new(),
            },
        ));
        let click = |column, row| {
            Event::Mouse(MouseEvent {
                kind: MouseEventKind::Down(MouseButton::Left),
                column,
                row,
                modifiers: KeyModifiers::NONE,
            })
        };
        assert_eq!(
            map_event_to_action(click(0, SIZE.height - 1), &state, SIZE),
            Some(Action::ClosePalette)
        );

        let modal = palette_rect(Rect::new(0, 0, SIZE.width, SIZE.height), 0);
        assert_eq!(map_event_to_action(click(modal.x + 1, modal.y + 1), &state, SIZE), None);
    }
}
