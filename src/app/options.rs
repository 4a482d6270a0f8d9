//! Assembles palette option lists from live source state.
//!
//! Lists are rebuilt on every presentation, never cached.

use super::path_format::format_path_from;
use crate::domain::models::{Icon, OptionAction, PaletteOption, TerminalAction};
use crate::domain::sources::{ActionRegistry, SessionRegistry, ShortcutLookup, UpdateSource};
use crate::domain::update::UpdateState;
use std::path::Path;
use tracing::{debug, warn};

pub const UPDATE_AND_RESTART: &str = "Update Ghostty and Restart";
pub const CANCEL_UPDATE: &str = "Cancel or Skip Update";
pub const CANCEL_UPDATE_DESCRIPTION: &str = "Dismiss the current update process";
pub const SEARCH_SESSIONS: &str = "Search Sessions…";
pub const UNTITLED: &str = "Untitled";

pub struct OptionBuilder<'a> {
    pub update: Option<&'a dyn UpdateSource>,
    pub actions: &'a dyn ActionRegistry,
    pub shortcuts: &'a dyn ShortcutLookup,
    pub sessions: &'a dyn SessionRegistry,
    pub home: Option<&'a Path>,
}

impl OptionBuilder<'_> {
    /// Update options first, then session search, then terminal actions.
    #[must_use]
    pub fn command_options(&self) -> Vec<PaletteOption> {
        let mut options = self.update_options();

        options.push(PaletteOption::new(
            SEARCH_SESSIONS,
            OptionAction::OpenSessionSearch,
        ));

        match self.actions.list_actions() {
            Ok(actions) => options.extend(actions.into_iter().map(|a| self.action_option(a))),
            Err(err) => warn!(error = %err, "terminal actions unavailable, omitting them"),
        }

        options
    }

    /// One option per session window, in registry order. Sessions without a
    /// window are left out.
    #[must_use]
    pub fn session_options(&self) -> Vec<PaletteOption> {
        let sessions = self.sessions.all_sessions();
        let total = sessions.len();
        let options: Vec<PaletteOption> = sessions
            .into_iter()
            .filter_map(|session| {
                let window = session.window?;
                let title = if session.title.is_empty() {
                    UNTITLED.to_string()
                } else {
                    session.title
                };
                let description = session
                    .working_directory
                    .as_deref()
                    .map(|pwd| format_path_from(pwd, self.home));
                let accent = session.tab_color.and_then(|c| c.display_color());

                Some(
                    PaletteOption::new(title, OptionAction::ActivateSession(window))
                        .with_description(description)
                        .with_icon(Some(Icon::StackedRectangles))
                        .with_accent(accent),
                )
            })
            .collect();

        if options.len() < total {
            debug!(
                skipped = total - options.len(),
                "sessions without a window left out of search"
            );
        }
        options
    }

    fn update_options(&self) -> Vec<PaletteOption> {
        let Some(update) = self.update else {
            return Vec::new();
        };
        let state = update.state();
        if !state.is_installable() {
            return Vec::new();
        }

        let title = if state == UpdateState::UpdateAvailable {
            UPDATE_AND_RESTART.to_string()
        } else {
            Some(update.status_text())
                .filter(|text| !text.is_empty())
                .unwrap_or_else(|| state.label().to_string())
        };

        vec![
            PaletteOption::new(title, OptionAction::InstallUpdate)
                .with_icon(update.icon())
                .with_badge(update.badge())
                .with_emphasis(true),
            PaletteOption::new(CANCEL_UPDATE, OptionAction::CancelUpdate)
                .with_description(Some(CANCEL_UPDATE_DESCRIPTION.to_string())),
        ]
    }

    fn action_option(&self, action: TerminalAction) -> PaletteOption {
        let key_hint = self.shortcuts.shortcut_for(&action.id);
        let title = if action.title.is_empty() {
            action.id.to_string()
        } else {
            action.title
        };
        PaletteOption::new(title, OptionAction::RunAction(action.id))
            .with_description(action.description)
            .with_key_hint(key_hint)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::{
        ActionId, Rgb, SessionInfo, SurfaceId, TabColor, WindowHandle,
    };
    use crate::domain::sources::{
        EnumerationError, MockActionRegistry, MockSessionRegistry, MockShortcutLookup,
        MockUpdateSource,
    };
    use std::path::PathBuf;

    fn no_sessions() -> MockSessionRegistry {
        let mut sessions = MockSessionRegistry::new();
        sessions.expect_all_sessions().returning(Vec::new);
        sessions
    }

    fn actions(list: Vec<TerminalAction>) -> MockActionRegistry {
        let mut registry = MockActionRegistry::new();
        registry
            .expect_list_actions()
            .returning(move || Ok(list.clone()));
        registry
    }

    fn failing_actions() -> MockActionRegistry {
        let mut registry = MockActionRegistry::new();
        registry
            .expect_list_actions()
            .returning(|| Err(EnumerationError::SessionUnavailable));
        registry
    }

    fn shortcuts() -> MockShortcutLookup {
        let mut lookup = MockShortcutLookup::new();
        lookup.expect_shortcut_for().returning(|id| {
            (id.as_str() == "new_window").then(|| vec!["ctrl".to_string(), "n".to_string()])
        });
        lookup
    }

    fn updater(state: UpdateState) -> MockUpdateSource {
        let mut update = MockUpdateSource::new();
        update.expect_state().return_const(state);
        update
            .expect_status_text()
            .returning(move || state.label().to_string());
        update
            .expect_icon()
            .returning(|| Some(Icon::Named("shippingbox".to_string())));
        update.expect_badge().returning(|| Some("1.2.0".to_string()));
        update
    }

    fn terminal_action(id: &str, title: &str) -> TerminalAction {
        TerminalAction {
            id: ActionId::new(id),
            title: title.to_string(),
            description: Some(format!("Run {id}")),
        }
    }

    fn titles(options: &[PaletteOption]) -> Vec<&str> {
        options.iter().map(|o| o.title.as_str()).collect()
    }

    #[test]
    fn test_update_available_uses_restart_title() {
        let update = updater(UpdateState::UpdateAvailable);
        let registry = actions(vec![terminal_action("new_window", "New Window")]);
        let lookup = shortcuts();
        let sessions = no_sessions();
        let builder = OptionBuilder {
            update: Some(&update),
            actions: &registry,
            shortcuts: &lookup,
            sessions: &sessions,
            home: None,
        };

        let options = builder.command_options();
        assert_eq!(
            titles(&options),
            vec![UPDATE_AND_RESTART, CANCEL_UPDATE, SEARCH_SESSIONS, "New Window"]
        );
        assert!(options[0].emphasis);
        assert_eq!(options[0].action, OptionAction::InstallUpdate);
        assert_eq!(options[0].badge.as_deref(), Some("1.2.0"));
        assert_eq!(options[1].action, OptionAction::CancelUpdate);
        assert!(!options[1].emphasis);
        assert_eq!(options[2].action, OptionAction::OpenSessionSearch);
        assert_eq!(
            options[3].key_hint,
            Some(vec!["ctrl".to_string(), "n".to_string()])
        );
    }

    #[test]
    fn test_other_installable_states_use_status_text() {
        for state in [UpdateState::Downloading, UpdateState::Installable] {
            let update = updater(state);
            let registry = actions(Vec::new());
            let lookup = shortcuts();
            let sessions = no_sessions();
            let builder = OptionBuilder {
                update: Some(&update),
                actions: &registry,
                shortcuts: &lookup,
                sessions: &sessions,
                home: None,
            };

            let options = builder.command_options();
            assert_eq!(options[0].title, state.label());
            assert_eq!(options[1].title, CANCEL_UPDATE);
            assert_eq!(options[2].title, SEARCH_SESSIONS);
        }
    }

    #[test]
    fn test_empty_status_text_falls_back_to_state_label() {
        let mut update = MockUpdateSource::new();
        update.expect_state().return_const(UpdateState::Downloading);
        update.expect_status_text().returning(String::new);
        update.expect_icon().returning(|| None);
        update.expect_badge().returning(|| None);
        let registry = actions(Vec::new());
        let lookup = shortcuts();
        let sessions = no_sessions();
        let builder = OptionBuilder {
            update: Some(&update),
            actions: &registry,
            shortcuts: &lookup,
            sessions: &sessions,
            home: None,
        };

        let options = builder.command_options();
        assert_eq!(options[0].title, UpdateState::Downloading.label());
        assert_eq!(options[0].action, OptionAction::InstallUpdate);
        assert!(!options[0].title.is_empty());
    }

    #[test]
    fn test_search_sessions_first_without_update() {
        for state in [
            UpdateState::NotChecked,
            UpdateState::Checking,
            UpdateState::UpToDate,
            UpdateState::Error,
        ] {
            let update = updater(state);
            let registry = actions(vec![terminal_action("copy", "Copy")]);
            let lookup = shortcuts();
            let sessions = no_sessions();
            let builder = OptionBuilder {
                update: Some(&update),
                actions: &registry,
                shortcuts: &lookup,
                sessions: &sessions,
                home: None,
            };

            let options = builder.command_options();
            assert_eq!(titles(&options), vec![SEARCH_SESSIONS, "Copy"]);
            assert_eq!(options[1].key_hint, None);
        }
    }

    #[test]
    fn test_enumeration_failure_degrades() {
        let update = updater(UpdateState::UpdateAvailable);
        let registry = failing_actions();
        let lookup = shortcuts();
        let sessions = no_sessions();
        let builder = OptionBuilder {
            update: Some(&update),
            actions: &registry,
            shortcuts: &lookup,
            sessions: &sessions,
            home: None,
        };

        assert_eq!(
            titles(&builder.command_options()),
            vec![UPDATE_AND_RESTART, CANCEL_UPDATE, SEARCH_SESSIONS]
        );

        let builder = OptionBuilder {
            update: None,
            ..builder
        };
        assert_eq!(titles(&builder.command_options()), vec![SEARCH_SESSIONS]);
    }

    #[test]
    fn test_action_with_empty_title_falls_back_to_id() {
        let registry = actions(vec![terminal_action("toggle_fullscreen", "")]);
        let lookup = shortcuts();
        let sessions = no_sessions();
        let builder = OptionBuilder {
            update: None,
            actions: &registry,
            shortcuts: &lookup,
            sessions: &sessions,
            home: None,
        };

        let options = builder.command_options();
        assert_eq!(options[1].title, "toggle_fullscreen");
        assert_eq!(
            options[1].action,
            OptionAction::RunAction(ActionId::new("toggle_fullscreen"))
        );
    }

    #[test]
    fn test_session_options() {
        let mut sessions = MockSessionRegistry::new();
        sessions.expect_all_sessions().returning(|| {
            vec![
                SessionInfo {
                    window: Some(WindowHandle(1)),
                    title: "vim".to_string(),
                    working_directory: Some(PathBuf::from("/home/dev/src")),
                    tab_color: Some(TabColor::Red),
                    focused_surface: Some(SurfaceId(10)),
                },
                SessionInfo {
                    window: None,
                    title: "headless".to_string(),
                    ..Default::default()
                },
                SessionInfo {
                    window: Some(WindowHandle(2)),
                    title: String::new(),
                    working_directory: Some(PathBuf::from("/opt/data")),
                    tab_color: Some(TabColor::None),
                    focused_surface: None,
                },
                SessionInfo {
                    window: Some(WindowHandle(3)),
                    title: "logs".to_string(),
                    working_directory: None,
                    tab_color: None,
                    focused_surface: None,
                },
            ]
        });
        let registry = failing_actions();
        let lookup = shortcuts();
        let builder = OptionBuilder {
            update: None,
            actions: &registry,
            shortcuts: &lookup,
            sessions: &sessions,
            home: Some(Path::new("/home/dev")),
        };

        let options = builder.session_options();
        assert_eq!(titles(&options), vec!["vim", UNTITLED, "logs"]);

        assert_eq!(options[0].description.as_deref(), Some("~/src"));
        assert_eq!(options[0].leading_icon, Some(Icon::StackedRectangles));
        assert_eq!(options[0].accent_color, Some(Rgb(0xff, 0x45, 0x3a)));
        assert_eq!(
            options[0].action,
            OptionAction::ActivateSession(WindowHandle(1))
        );

        assert_eq!(options[1].description.as_deref(), Some("/opt/data"));
        assert_eq!(options[1].accent_color, None);

        assert_eq!(options[2].description, None);
        assert_eq!(options[2].accent_color, None);
    }

    #[cfg(unix)]
    #[test]
    fn test_non_utf8_working_directory_keeps_description() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let mut sessions = MockSessionRegistry::new();
        sessions.expect_all_sessions().returning(|| {
            vec![SessionInfo {
                window: Some(WindowHandle(1)),
                title: "cafe".to_string(),
                working_directory: Some(PathBuf::from(OsStr::from_bytes(b"/home/dev/caf\xe9"))),
                ..Default::default()
            }]
        });
        let registry = failing_actions();
        let lookup = shortcuts();
        let builder = OptionBuilder {
            update: None,
            actions: &registry,
            shortcuts: &lookup,
            sessions: &sessions,
            home: Some(Path::new("/home/dev")),
        };

        let options = builder.session_options();
        assert_eq!(options[0].description.as_deref(), Some("~/caf\u{fffd}"));
    }
}
