use super::{command::Command, focus::FocusCoordinator, reducer::Sources};
use crate::domain::models::WindowHandle;
use crate::domain::sources::{ActionHost, SessionRegistry, SurfaceRegistry, UpdateSource};
use tracing::debug;

/// Everything a command may touch on the hosting application.
pub trait Host: ActionHost + SessionRegistry + SurfaceRegistry {
    fn sources(&self) -> Sources<'_>;
    fn updater_mut(&mut self) -> Option<&mut dyn UpdateSource>;
    /// Advances timed state. Returns true when anything the palette shows
    /// may have changed.
    fn tick(&mut self) -> bool;
    fn cycle_focus(&mut self, step: isize);
    fn send_text(&mut self, c: char);
}

/// Performs `command` against `host`. Focus changes that must survive the
/// overlay's own restoration are queued on `focus` behind it.
pub fn handle_command<H: Host>(command: Command, host: &mut H, focus: &mut FocusCoordinator) {
    match command {
        Command::InstallUpdate => {
            if let Some(updater) = host.updater_mut() {
                updater.install();
            }
        }
        Command::CancelUpdate => {
            if let Some(updater) = host.updater_mut() {
                updater.cancel();
            }
        }
        Command::RunAction(id) => {
            let before = host.focused();
            host.on_action(&id);
            let after = host.focused();
            // The palette's restoration is already queued; keep whatever the
            // action focused.
            if let Some(moved) = after.filter(|a| Some(*a) != before) {
                focus.restore_focus(moved);
            }
        }
        Command::ActivateSession(window) => activate_session(window, host, focus),
        Command::CycleSurface(step) => host.cycle_focus(step),
        Command::SendText(c) => host.send_text(c),
    }
}

fn activate_session<H: Host>(window: WindowHandle, host: &mut H, focus: &mut FocusCoordinator) {
    host.activate_app();
    if !host.raise_window(window) {
        debug!(window = %window, "session window is gone, skipping activation");
        return;
    }

    let surface = host
        .all_sessions()
        .into_iter()
        .find(|s| s.window == Some(window))
        .and_then(|s| s.focused_surface);
    if let Some(id) = surface {
        focus.restore_focus(id);
    }
}
