use super::action::Action;
use crate::domain::models::ActionId;
use crate::domain::sources::ShortcutLookup;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;
use tracing::warn;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct KeyConfig {
    pub profile: String,
    /// Binding name (or terminal action id) -> key spec such as `"ctrl+shift+p"`.
    pub custom: Option<HashMap<String, String>>,
}

impl Default for KeyConfig {
    fn default() -> Self {
        Self {
            profile: "default".to_string(),
            custom: None,
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum KeySpecError {
    #[error("empty key spec")]
    Empty,
    #[error("unknown modifier `{0}`")]
    UnknownModifier(String),
    #[error("unknown key `{0}`")]
    UnknownKey(String),
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct KeyMap {
    pub global: HashMap<KeyEvent, Action>,
    pub palette: HashMap<KeyEvent, Action>,
    terminal_bindings: HashMap<ActionId, KeyEvent>,
}

impl KeyMap {
    pub fn from_config(config: &KeyConfig) -> Self {
        if config.profile != "default" {
            warn!(profile = %config.profile, "unknown key profile, using default");
        }

        let mut map = Self::default();

        // --- Global ---
        map.bind(ctrl('p'), Action::ToggleCommandPalette);
        map.bind(ctrl('o'), Action::OpenSessionSearch);
        map.bind(ctrl('c'), Action::Quit);
        map.bind(key(KeyCode::Tab), Action::FocusNextSurface);
        map.bind(key(KeyCode::BackTab), Action::FocusPrevSurface);
        map.bind(ctrl('n'), terminal("new_window"));
        map.bind(ctrl('w'), terminal("close_window"));
        map.bind(ctrl('t'), terminal("set_tab_color"));
        map.bind(ctrl('u'), terminal("check_for_updates"));

        // --- Palette (overlay open) ---
        map.palette.insert(key(KeyCode::Esc), Action::ClosePalette);
        map.palette.insert(key(KeyCode::Enter), Action::PaletteSelect);
        map.palette.insert(key(KeyCode::Down), Action::PaletteNext);
        map.palette.insert(key(KeyCode::Up), Action::PalettePrev);
        map.palette.insert(ctrl('j'), Action::PaletteNext);
        map.palette.insert(ctrl('k'), Action::PalettePrev);
        map.palette.insert(key(KeyCode::Backspace), Action::PaletteBackspace);
        map.palette.insert(ctrl('u'), Action::PaletteClearQuery);
        map.palette.insert(ctrl('p'), Action::ToggleCommandPalette);
        map.palette.insert(ctrl('o'), Action::OpenSessionSearch);
        map.palette.insert(ctrl('c'), Action::Quit);

        if let Some(custom) = &config.custom {
            let mut names: Vec<_> = custom.keys().collect();
            names.sort();
            for name in names {
                let spec = &custom[name];
                match parse_key_spec(spec) {
                    Ok(event) => map.rebind(event, action_for_name(name)),
                    Err(err) => warn!(binding = %name, spec = %spec, error = %err, "ignoring key binding"),
                }
            }
        }

        map
    }

    /// Lookup while no overlay is open.
    pub fn get_action(&self, event: KeyEvent) -> Option<Action> {
        self.global.get(&normalize(event)).cloned()
    }

    /// Lookup while an overlay is open.
    pub fn get_palette_action(&self, event: KeyEvent) -> Option<Action> {
        self.palette.get(&normalize(event)).cloned()
    }

    /// Display label of the global key bound to `action`, e.g. `"ctrl+p"`.
    pub fn binding_label(&self, action: &Action) -> Option<String> {
        label_for(&self.global, action)
    }

    pub fn palette_binding_label(&self, action: &Action) -> Option<String> {
        label_for(&self.palette, action)
    }

    fn bind(&mut self, event: KeyEvent, action: Action) {
        if let Action::RunTerminalAction(id) = &action {
            self.terminal_bindings.insert(id.clone(), event);
        }
        self.global.insert(event, action);
    }

    /// Binds `event`, dropping any key previously bound to the same action.
    fn rebind(&mut self, event: KeyEvent, action: Action) {
        self.global.retain(|_, bound| *bound != action);
        if let Some(Action::RunTerminalAction(old)) = self.global.get(&event) {
            self.terminal_bindings.remove(old);
        }
        self.bind(event, action);
    }
}

impl ShortcutLookup for KeyMap {
    fn shortcut_for(&self, id: &ActionId) -> Option<Vec<String>> {
        self.terminal_bindings.get(id).map(|event| key_symbols(*event))
    }
}

/// Shortest label wins when several keys share an action.
fn label_for(bindings: &HashMap<KeyEvent, Action>, action: &Action) -> Option<String> {
    bindings
        .iter()
        .filter(|(_, bound)| *bound == action)
        .map(|(event, _)| key_symbols(*event).join("+"))
        .min_by(|a, b| a.len().cmp(&b.len()).then_with(|| a.cmp(b)))
}

fn action_for_name(name: &str) -> Action {
    match name {
        "toggle_command_palette" => Action::ToggleCommandPalette,
        "open_command_palette" => Action::OpenCommandPalette,
        "open_session_search" => Action::OpenSessionSearch,
        "focus_next_surface" => Action::FocusNextSurface,
        "focus_prev_surface" => Action::FocusPrevSurface,
        "quit" => Action::Quit,
        other => terminal(other),
    }
}

/// Parses `"ctrl+shift+p"`-style specs. The last segment is the key.
pub fn parse_key_spec(spec: &str) -> Result<KeyEvent, KeySpecError> {
    let parts: Vec<&str> = spec
        .split('+')
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .collect();
    let (last, mods) = parts.split_last().ok_or(KeySpecError::Empty)?;

    let mut modifiers = KeyModifiers::empty();
    for m in mods {
        modifiers |= match m.to_lowercase().as_str() {
            "ctrl" | "control" => KeyModifiers::CONTROL,
            "alt" | "opt" | "option" => KeyModifiers::ALT,
            "shift" => KeyModifiers::SHIFT,
            "super" | "cmd" => KeyModifiers::SUPER,
            other => return Err(KeySpecError::UnknownModifier(other.to_string())),
        };
    }

    let code = match last.to_lowercase().as_str() {
        "enter" | "return" => KeyCode::Enter,
        "esc" | "escape" => KeyCode::Esc,
        "tab" => KeyCode::Tab,
        "backspace" => KeyCode::Backspace,
        "space" => KeyCode::Char(' '),
        "up" => KeyCode::Up,
        "down" => KeyCode::Down,
        "left" => KeyCode::Left,
        "right" => KeyCode::Right,
        other => {
            let mut chars = other.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => KeyCode::Char(c),
                _ => match other.strip_prefix('f').and_then(|n| n.parse::<u8>().ok()) {
                    Some(n) if (1..=12).contains(&n) => KeyCode::F(n),
                    _ => return Err(KeySpecError::UnknownKey((*last).to_string())),
                },
            }
        }
    };

    Ok(KeyEvent::new(code, modifiers))
}

/// Display symbols for a binding, modifiers first.
#[must_use]
pub fn key_symbols(event: KeyEvent) -> Vec<String> {
    let mut symbols = Vec::new();
    for (flag, name) in [
        (KeyModifiers::SUPER, "cmd"),
        (KeyModifiers::CONTROL, "ctrl"),
        (KeyModifiers::ALT, "alt"),
        (KeyModifiers::SHIFT, "shift"),
    ] {
        if event.modifiers.contains(flag) {
            symbols.push(name.to_string());
        }
    }
    symbols.push(match event.code {
        KeyCode::Char(' ') => "space".to_string(),
        KeyCode::Char(c) => c.to_string(),
        KeyCode::F(n) => format!("f{n}"),
        KeyCode::Enter => "enter".to_string(),
        KeyCode::Esc => "esc".to_string(),
        KeyCode::Tab => "tab".to_string(),
        KeyCode::BackTab => "backtab".to_string(),
        KeyCode::Backspace => "backspace".to_string(),
        KeyCode::Up => "up".to_string(),
        KeyCode::Down => "down".to_string(),
        KeyCode::Left => "left".to_string(),
        KeyCode::Right => "right".to_string(),
        other => format!("{other:?}").to_lowercase(),
    });
    symbols
}

/// Strips state and kind so lookups match regardless of how the terminal
/// reported the event.
fn normalize(event: KeyEvent) -> KeyEvent {
    let mut modifiers = event.modifiers;
    if event.code == KeyCode::BackTab {
        modifiers.remove(KeyModifiers::SHIFT);
    }
    KeyEvent::new(event.code, modifiers)
}

fn terminal(id: &str) -> Action {
    Action::RunTerminalAction(ActionId::new(id))
}

fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::empty())
}

fn ctrl(c: char) -> KeyEvent {
    KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_bindings() {
        let map = KeyMap::from_config(&KeyConfig::default());
        assert_eq!(map.get_action(ctrl('p')), Some(Action::ToggleCommandPalette));
        assert_eq!(
            map.get_palette_action(key(KeyCode::Esc)),
            Some(Action::ClosePalette)
        );
        assert_eq!(map.get_action(key(KeyCode::Char('x'))), None);
    }

    #[test]
    fn test_shortcut_lookup_for_terminal_actions() {
        let map = KeyMap::from_config(&KeyConfig::default());
        assert_eq!(
            map.shortcut_for(&ActionId::new("new_window")),
            Some(vec!["ctrl".to_string(), "n".to_string()])
        );
        assert_eq!(map.shortcut_for(&ActionId::new("unbound")), None);
    }

    #[test]
    fn test_custom_binding_replaces_default() {
        let mut custom = HashMap::new();
        custom.insert("new_window".to_string(), "ctrl+shift+n".to_string());
        custom.insert("open_session_search".to_string(), "alt+s".to_string());
        custom.insert("quit".to_string(), "hyper+q".to_string());
        let map = KeyMap::from_config(&KeyConfig {
            profile: "default".to_string(),
            custom: Some(custom),
        });

        assert_eq!(map.get_action(ctrl('n')), None);
        assert_eq!(
            map.shortcut_for(&ActionId::new("new_window")),
            Some(vec![
                "ctrl".to_string(),
                "shift".to_string(),
                "n".to_string()
            ])
        );
        assert_eq!(
            map.get_action(KeyEvent::new(KeyCode::Char('s'), KeyModifiers::ALT)),
            Some(Action::OpenSessionSearch)
        );
        // Invalid spec leaves the default in place.
        assert_eq!(map.get_action(ctrl('c')), Some(Action::Quit));
    }

    #[test]
    fn test_binding_labels() {
        let map = KeyMap::from_config(&KeyConfig::default());
        assert_eq!(
            map.binding_label(&Action::OpenSessionSearch).as_deref(),
            Some("ctrl+o")
        );
        // Down and ctrl+j both move to the next row.
        assert_eq!(
            map.palette_binding_label(&Action::PaletteNext).as_deref(),
            Some("down")
        );
        assert_eq!(map.binding_label(&Action::PaletteSelect), None);
    }

    #[test]
    fn test_parse_key_spec() {
        assert_eq!(
            parse_key_spec("Ctrl+Shift+P"),
            Ok(KeyEvent::new(
                KeyCode::Char('p'),
                KeyModifiers::CONTROL | KeyModifiers::SHIFT
            ))
        );
        assert_eq!(parse_key_spec("f5"), Ok(key(KeyCode::F(5))));
        assert_eq!(parse_key_spec(""), Err(KeySpecError::Empty));
        assert_eq!(
            parse_key_spec("meta+x"),
            Err(KeySpecError::UnknownModifier("meta".to_string()))
        );
        assert_eq!(
            parse_key_spec("ctrl+pageup"),
            Err(KeySpecError::UnknownKey("pageup".to_string()))
        );
    }
}
