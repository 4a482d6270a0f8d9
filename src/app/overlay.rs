//! Visibility state for the two palette overlays.
//!
//! At most one overlay is open at a time. Every closing edge schedules a
//! deferred focus restoration to the surface that held focus before the
//! overlay opened, and every opening edge re-links the responder chain.

use super::focus::FocusCoordinator;
use crate::domain::models::{PaletteOption, SurfaceId};
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Overlay {
    Command,
    SessionSearch,
}

impl Overlay {
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Overlay::Command => "command palette",
            Overlay::SessionSearch => "session search",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OverlayState {
    #[default]
    Closed,
    CommandOpen,
    SessionSearchOpen,
}

impl OverlayState {
    #[must_use]
    pub fn open(overlay: Overlay) -> Self {
        match overlay {
            Overlay::Command => OverlayState::CommandOpen,
            Overlay::SessionSearch => OverlayState::SessionSearchOpen,
        }
    }

    #[must_use]
    pub fn active(self) -> Option<Overlay> {
        match self {
            OverlayState::Closed => None,
            OverlayState::CommandOpen => Some(Overlay::Command),
            OverlayState::SessionSearchOpen => Some(Overlay::SessionSearch),
        }
    }
}

/// What the palette renderer is asked to draw.
#[derive(Debug, Clone, PartialEq)]
pub struct Presentation {
    pub overlay: Overlay,
    pub placeholder: String,
    pub options: Vec<PaletteOption>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct OverlayController {
    state: OverlayState,
    focus_target: Option<SurfaceId>,
    focus: FocusCoordinator,
}

impl OverlayController {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn state(&self) -> OverlayState {
        self.state
    }

    #[must_use]
    pub fn active(&self) -> Option<Overlay> {
        self.state.active()
    }

    #[must_use]
    pub fn is_visible(&self, overlay: Overlay) -> bool {
        self.active() == Some(overlay)
    }

    #[must_use]
    pub fn focus_target(&self) -> Option<SurfaceId> {
        self.focus_target
    }

    #[must_use]
    pub fn focus(&self) -> &FocusCoordinator {
        &self.focus
    }

    pub fn focus_mut(&mut self) -> &mut FocusCoordinator {
        &mut self.focus
    }

    /// Opens `overlay`, remembering `focused` as the surface to hand focus
    /// back to. If the other overlay is open it closes first, and the focus
    /// target it captured carries over.
    pub fn open(&mut self, overlay: Overlay, focused: Option<SurfaceId>) {
        match self.active() {
            Some(current) if current == overlay => return,
            Some(current) => {
                debug!(from = current.label(), to = overlay.label(), "switching overlay");
                let carried = self.focus_target;
                self.close();
                self.focus_target = carried.or(focused);
            }
            None => {
                self.focus_target = focused;
            }
        }

        debug!(overlay = overlay.label(), "overlay opened");
        self.state = OverlayState::open(overlay);
        if let Some(target) = self.focus_target {
            self.focus.link_responder(target);
        }
    }

    /// Closes whichever overlay is open. No-op when already closed.
    pub fn close(&mut self) {
        let Some(current) = self.active() else {
            return;
        };

        debug!(overlay = current.label(), "overlay closed");
        self.state = OverlayState::Closed;
        self.focus.unlink_responder();
        if let Some(target) = self.focus_target.take() {
            self.focus.restore_focus(target);
        }
    }

    pub fn toggle(&mut self, overlay: Overlay, focused: Option<SurfaceId>) {
        if self.is_visible(overlay) {
            self.close();
        } else {
            self.open(overlay, focused);
        }
    }

    /// Builds the presentation for `overlay` if it is visible. `build` is not
    /// called otherwise.
    pub fn present<F>(&self, overlay: Overlay, placeholder: &str, build: F) -> Option<Presentation>
    where
        F: FnOnce() -> Vec<PaletteOption>,
    {
        if !self.is_visible(overlay) {
            return None;
        }
        Some(Presentation {
            overlay,
            placeholder: placeholder.to_string(),
            options: build(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::focus::FocusTask;

    fn restores(controller: &OverlayController) -> Vec<SurfaceId> {
        controller
            .focus()
            .pending()
            .filter_map(|t| match t {
                FocusTask::Restore(id) => Some(*id),
                FocusTask::LinkResponder(_) => None,
            })
            .collect()
    }

    #[test]
    fn test_open_and_close_schedules_one_restore() {
        let mut controller = OverlayController::new();
        controller.open(Overlay::Command, Some(SurfaceId(7)));
        assert!(controller.is_visible(Overlay::Command));
        assert!(!controller.is_visible(Overlay::SessionSearch));
        assert!(restores(&controller).is_empty());

        controller.close();
        assert_eq!(controller.state(), OverlayState::Closed);
        assert_eq!(restores(&controller), vec![SurfaceId(7)]);

        controller.close();
        assert_eq!(restores(&controller), vec![SurfaceId(7)]);
    }

    #[test]
    fn test_switch_closes_previous_overlay() {
        let mut controller = OverlayController::new();
        controller.open(Overlay::Command, Some(SurfaceId(1)));
        controller.open(Overlay::SessionSearch, None);

        assert_eq!(controller.state(), OverlayState::SessionSearchOpen);
        assert_eq!(restores(&controller), vec![SurfaceId(1)]);
        assert_eq!(controller.focus_target(), Some(SurfaceId(1)));

        controller.close();
        assert_eq!(restores(&controller), vec![SurfaceId(1), SurfaceId(1)]);
    }

    #[test]
    fn test_reopening_same_overlay_is_noop() {
        let mut controller = OverlayController::new();
        controller.open(Overlay::SessionSearch, Some(SurfaceId(2)));
        controller.open(Overlay::SessionSearch, Some(SurfaceId(3)));
        assert_eq!(controller.focus_target(), Some(SurfaceId(2)));
        assert!(restores(&controller).is_empty());
    }

    #[test]
    fn test_present_only_builds_when_visible() {
        let mut controller = OverlayController::new();
        let mut built = 0;
        assert!(controller
            .present(Overlay::Command, "Execute a command…", || {
                built += 1;
                Vec::new()
            })
            .is_none());
        assert_eq!(built, 0);

        controller.open(Overlay::Command, None);
        let presentation = controller
            .present(Overlay::Command, "Execute a command…", || {
                built += 1;
                Vec::new()
            })
            .unwrap();
        assert_eq!(built, 1);
        assert_eq!(presentation.overlay, Overlay::Command);
        assert_eq!(presentation.placeholder, "Execute a command…");
        assert!(controller
            .present(Overlay::SessionSearch, "Search sessions…", Vec::new)
            .is_none());
    }

    #[test]
    fn test_toggle() {
        let mut controller = OverlayController::new();
        controller.toggle(Overlay::Command, Some(SurfaceId(5)));
        assert!(controller.is_visible(Overlay::Command));
        controller.toggle(Overlay::Command, Some(SurfaceId(5)));
        assert_eq!(controller.state(), OverlayState::Closed);
        assert_eq!(restores(&controller), vec![SurfaceId(5)]);
    }
}
