//! Narrow read interfaces onto the collaborators the palette consumes.
//!
//! All calls are synchronous and expected to be cheap: option lists are
//! rebuilt on every presentation.

use super::models::{ActionId, Icon, SessionInfo, SurfaceId, TerminalAction, WindowHandle};
use super::update::UpdateState;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum EnumerationError {
    #[error("terminal session is unavailable")]
    SessionUnavailable,

    #[error("action enumeration failed: {0}")]
    Failed(String),
}

#[cfg_attr(test, mockall::automock)]
pub trait ActionRegistry {
    fn list_actions(&self) -> Result<Vec<TerminalAction>, EnumerationError>;
}

#[cfg_attr(test, mockall::automock)]
pub trait ShortcutLookup {
    /// Key symbols for the binding of `id`, or `None` when unbound.
    fn shortcut_for(&self, id: &ActionId) -> Option<Vec<String>>;
}

#[cfg_attr(test, mockall::automock)]
pub trait UpdateSource {
    fn state(&self) -> UpdateState;
    fn status_text(&self) -> String;
    fn icon(&self) -> Option<Icon>;
    fn badge(&self) -> Option<String>;
    fn install(&mut self);
    fn cancel(&mut self);
}

#[cfg_attr(test, mockall::automock)]
pub trait SessionRegistry {
    fn all_sessions(&self) -> Vec<SessionInfo>;
    fn activate_app(&mut self);
    /// Raises and focuses the window. Returns false when the window is gone.
    fn raise_window(&mut self, window: WindowHandle) -> bool;
}

#[cfg_attr(test, mockall::automock)]
pub trait SurfaceRegistry {
    fn is_alive(&self, id: SurfaceId) -> bool;
    fn focused(&self) -> Option<SurfaceId>;
    fn make_first_responder(&mut self, id: SurfaceId);
}

/// Receives terminal actions selected from the command palette.
#[cfg_attr(test, mockall::automock)]
pub trait ActionHost {
    fn on_action(&mut self, id: &ActionId);
}
