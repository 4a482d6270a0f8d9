//! Deferred focus handling for overlays.
//!
//! Nothing here runs inline. Focus restoration and responder linkage are
//! queued and executed on the next turn of the UI loop, after the overlay's
//! own setup or teardown for the current turn has finished.

use crate::domain::models::SurfaceId;
use crate::domain::sources::SurfaceRegistry;
use std::collections::VecDeque;
use tracing::{debug, trace};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusTask {
    Restore(SurfaceId),
    LinkResponder(SurfaceId),
}

/// Zero-size element spliced into the responder chain while an overlay is
/// open. Keys the overlay does not claim are forwarded to `next`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ResponderPlaceholder {
    pub next: Option<SurfaceId>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct FocusCoordinator {
    ready: VecDeque<FocusTask>,
    placeholder: Option<ResponderPlaceholder>,
}

impl FocusCoordinator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedules `to` to become first responder on the next turn.
    pub fn restore_focus(&mut self, to: SurfaceId) {
        debug!(surface = %to, "scheduling focus restoration");
        self.ready.push_back(FocusTask::Restore(to));
    }

    /// Inserts the placeholder now; its next-responder pointer is set one
    /// turn later.
    pub fn link_responder(&mut self, to: SurfaceId) {
        self.placeholder = Some(ResponderPlaceholder::default());
        self.ready.push_back(FocusTask::LinkResponder(to));
    }

    pub fn unlink_responder(&mut self) {
        if self.placeholder.take().is_some() {
            trace!("responder placeholder removed");
        }
    }

    /// Surface that receives keys the open overlay does not handle.
    #[must_use]
    pub fn next_responder(&self) -> Option<SurfaceId> {
        self.placeholder.and_then(|p| p.next)
    }

    #[must_use]
    pub fn has_placeholder(&self) -> bool {
        self.placeholder.is_some()
    }

    pub fn pending(&self) -> impl Iterator<Item = &FocusTask> {
        self.ready.iter()
    }

    #[must_use]
    pub fn is_idle(&self) -> bool {
        self.ready.is_empty()
    }

    /// Runs every task queued before this call. Tasks queued while running
    /// wait for the following turn. Returns how many tasks ran.
    pub fn run_turn(&mut self, surfaces: &mut dyn SurfaceRegistry) -> usize {
        let batch = std::mem::take(&mut self.ready);
        let count = batch.len();
        for task in batch {
            match task {
                FocusTask::Restore(id) => Self::restore_now(id, surfaces),
                FocusTask::LinkResponder(id) => self.link_now(id, surfaces),
            }
        }
        count
    }

    fn restore_now(id: SurfaceId, surfaces: &mut dyn SurfaceRegistry) {
        if !surfaces.is_alive(id) {
            debug!(surface = %id, "focus target is gone, skipping restoration");
            return;
        }
        if surfaces.focused() == Some(id) {
            trace!(surface = %id, "already first responder");
            return;
        }
        debug!(surface = %id, "restoring focus");
        surfaces.make_first_responder(id);
    }

    fn link_now(&mut self, id: SurfaceId, surfaces: &dyn SurfaceRegistry) {
        let Some(placeholder) = self.placeholder.as_mut() else {
            trace!(surface = %id, "overlay closed before responder link ran");
            return;
        };
        if surfaces.is_alive(id) {
            placeholder.next = Some(id);
            trace!(surface = %id, "responder chain linked");
        }
    }
}
