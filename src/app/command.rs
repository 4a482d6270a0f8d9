use crate::domain::models::{ActionId, WindowHandle};

/// Side effects the host performs after the reducer runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    InstallUpdate,
    CancelUpdate,
    RunAction(ActionId),
    ActivateSession(WindowHandle),
    CycleSurface(isize),
    SendText(char),
}
