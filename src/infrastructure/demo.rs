//! In-memory terminal workspace backing the demo host.
//!
//! Windows hold one or more split surfaces. Exactly one surface is first
//! responder while any window is open.

use crate::app::dispatch::Host;
use crate::app::reducer::Sources;
use crate::app::ui::HostView;
use crate::components::workspace::WorkspaceView;
use crate::domain::models::{
    ActionId, Icon, SessionInfo, SurfaceId, TabColor, TerminalAction, WindowHandle,
};
use crate::domain::sources::{
    ActionHost, ActionRegistry, EnumerationError, SessionRegistry, SurfaceRegistry, UpdateSource,
};
use crate::domain::update::UpdateState;
use crate::theme::Theme;
use ratatui::{buffer::Buffer, layout::Rect, widgets::Widget};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

const SCROLLBACK_LIMIT: usize = 200;
const DOWNLOAD_TICKS: u32 = 8;
const CHECK_TICKS: u32 = 4;

const TAB_COLORS: [TabColor; 10] = [
    TabColor::None,
    TabColor::Blue,
    TabColor::Purple,
    TabColor::Pink,
    TabColor::Red,
    TabColor::Orange,
    TabColor::Yellow,
    TabColor::Green,
    TabColor::Teal,
    TabColor::Graphite,
];

#[derive(Debug, Clone, PartialEq)]
pub struct DemoSurface {
    pub id: SurfaceId,
    pub lines: Vec<String>,
}

impl DemoSurface {
    fn new(id: SurfaceId) -> Self {
        Self {
            id,
            lines: vec![String::new()],
        }
    }

    fn write(&mut self, c: char) {
        if c == '\n' {
            self.lines.push(String::new());
            if self.lines.len() > SCROLLBACK_LIMIT {
                self.lines.remove(0);
            }
        } else if let Some(line) = self.lines.last_mut() {
            line.push(c);
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DemoWindow {
    pub handle: WindowHandle,
    pub title: String,
    pub pwd: Option<PathBuf>,
    pub tab_color: TabColor,
    /// Hidden windows (such as a dropdown terminal) keep their surfaces
    /// but are not reachable from session search.
    pub visible: bool,
    pub surfaces: Vec<DemoSurface>,
    pub focused_surface: Option<SurfaceId>,
}

/// Update checker that walks through the update states on ticks.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DemoUpdater {
    state: UpdateState,
    version: String,
    ticks: u32,
}

impl DemoUpdater {
    #[must_use]
    pub fn new(version: impl Into<String>) -> Self {
        Self {
            version: version.into(),
            ..Default::default()
        }
    }

    pub fn check(&mut self) {
        if matches!(
            self.state,
            UpdateState::NotChecked | UpdateState::UpToDate | UpdateState::Error
        ) {
            self.set_state(UpdateState::Checking);
        }
    }

    /// Advances timed transitions. Returns true when the state changed.
    pub fn tick(&mut self) -> bool {
        let (after, to) = match self.state {
            UpdateState::Checking => (CHECK_TICKS, UpdateState::UpdateAvailable),
            UpdateState::Downloading => (DOWNLOAD_TICKS, UpdateState::Installable),
            _ => return false,
        };
        self.ticks += 1;
        if self.ticks < after {
            return false;
        }
        debug!(from = %self.state, to = %to, "update progressed");
        self.set_state(to);
        true
    }

    fn set_state(&mut self, state: UpdateState) {
        self.state = state;
        self.ticks = 0;
    }
}

impl UpdateSource for DemoUpdater {
    fn state(&self) -> UpdateState {
        self.state
    }

    fn status_text(&self) -> String {
        match self.state {
            UpdateState::Downloading => format!("Downloading {}…", self.version),
            UpdateState::Installable => format!("Install {} and Restart", self.version),
            other => other.label().to_string(),
        }
    }

    fn icon(&self) -> Option<Icon> {
        let name = match self.state {
            UpdateState::UpdateAvailable => "shippingbox",
            UpdateState::Downloading => "arrow.down",
            UpdateState::Installable => "checkmark",
            UpdateState::Error => "exclamationmark",
            _ => return None,
        };
        Some(Icon::Named(name.to_string()))
    }

    fn badge(&self) -> Option<String> {
        self.state
            .is_installable()
            .then(|| self.version.clone())
    }

    fn install(&mut self) {
        match self.state {
            UpdateState::UpdateAvailable => self.set_state(UpdateState::Downloading),
            UpdateState::Installable => {
                info!(version = %self.version, "update installed");
                self.set_state(UpdateState::UpToDate);
            }
            _ => {}
        }
    }

    fn cancel(&mut self) {
        if self.state.is_installable() {
            info!(version = %self.version, "update skipped");
            self.set_state(UpdateState::NotChecked);
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Workspace {
    pub windows: Vec<DemoWindow>,
    pub key_window: Option<WindowHandle>,
    pub first_responder: Option<SurfaceId>,
    pub app_active: bool,
    pub updater: DemoUpdater,
    pub home: Option<PathBuf>,
    next_id: u64,
}

impl Workspace {
    #[must_use]
    pub fn new(home: Option<PathBuf>) -> Self {
        Self {
            app_active: true,
            updater: DemoUpdater::new("1.2.0"),
            home,
            ..Default::default()
        }
    }

    /// A handful of windows to search through.
    #[must_use]
    pub fn demo(home: Option<PathBuf>) -> Self {
        let mut ws = Self::new(home.clone());
        let under_home = |rel: &str| home.as_ref().map(|h| h.join(rel));

        let editor = ws.open_window("nvim", under_home("src/switchyard"), TabColor::Blue, 2);
        ws.open_window("htop", Some(PathBuf::from("/")), TabColor::Red, 1);
        ws.open_window("", home.clone(), TabColor::None, 1);
        let quick = ws.open_window("quick terminal", home, TabColor::None, 1);
        if let Some(window) = ws.window_mut(quick) {
            window.visible = false;
        }

        if let Some(first) = ws.window(editor).and_then(|w| w.focused_surface) {
            ws.focus_surface(first);
        }
        ws
    }

    /// Opens a window with `splits` surfaces and focuses its first one.
    pub fn open_window(
        &mut self,
        title: &str,
        pwd: Option<PathBuf>,
        tab_color: TabColor,
        splits: usize,
    ) -> WindowHandle {
        let handle = WindowHandle(self.alloc_id());
        let surfaces: Vec<DemoSurface> = (0..splits.max(1))
            .map(|_| DemoSurface::new(SurfaceId(self.alloc_id())))
            .collect();
        let focused_surface = surfaces.first().map(|s| s.id);
        self.windows.push(DemoWindow {
            handle,
            title: title.to_string(),
            pwd,
            tab_color,
            visible: true,
            surfaces,
            focused_surface,
        });
        if let Some(id) = focused_surface {
            self.focus_surface(id);
        }
        debug!(window = %handle, "window opened");
        handle
    }

    pub fn close_window(&mut self, handle: WindowHandle) {
        let before = self.windows.len();
        self.windows.retain(|w| w.handle != handle);
        if self.windows.len() == before {
            return;
        }
        debug!(window = %handle, "window closed");

        if self.key_window == Some(handle) {
            self.key_window = None;
            self.first_responder = None;
            let next = self
                .windows
                .iter()
                .find(|w| w.visible)
                .and_then(|w| w.focused_surface);
            if let Some(id) = next {
                self.focus_surface(id);
            }
        }
    }

    #[must_use]
    pub fn window(&self, handle: WindowHandle) -> Option<&DemoWindow> {
        self.windows.iter().find(|w| w.handle == handle)
    }

    fn window_mut(&mut self, handle: WindowHandle) -> Option<&mut DemoWindow> {
        self.windows.iter_mut().find(|w| w.handle == handle)
    }

    #[must_use]
    pub fn window_of(&self, surface: SurfaceId) -> Option<&DemoWindow> {
        self.windows
            .iter()
            .find(|w| w.surfaces.iter().any(|s| s.id == surface))
    }

    fn surface_mut(&mut self, id: SurfaceId) -> Option<&mut DemoSurface> {
        self.windows
            .iter_mut()
            .flat_map(|w| w.surfaces.iter_mut())
            .find(|s| s.id == id)
    }

    /// Makes `id` first responder and its window the key window.
    pub fn focus_surface(&mut self, id: SurfaceId) {
        let Some(window) = self
            .windows
            .iter_mut()
            .find(|w| w.surfaces.iter().any(|s| s.id == id))
        else {
            return;
        };
        window.focused_surface = Some(id);
        self.key_window = Some(window.handle);
        self.first_responder = Some(id);
    }

    /// Surfaces of visible windows, in window order.
    fn focus_ring(&self) -> Vec<SurfaceId> {
        self.windows
            .iter()
            .filter(|w| w.visible)
            .flat_map(|w| w.surfaces.iter().map(|s| s.id))
            .collect()
    }

    fn set_next_tab_color(&mut self) {
        let Some(handle) = self.key_window else {
            return;
        };
        if let Some(window) = self.window_mut(handle) {
            let current = TAB_COLORS
                .iter()
                .position(|c| *c == window.tab_color)
                .unwrap_or(0);
            window.tab_color = TAB_COLORS[(current + 1) % TAB_COLORS.len()];
        }
    }

    fn clear_focused(&mut self) {
        if let Some(surface) = self.first_responder.and_then(|id| self.surface_mut(id)) {
            surface.lines = vec![String::new()];
        }
    }

    fn alloc_id(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }
}

impl ActionRegistry for Workspace {
    fn list_actions(&self) -> Result<Vec<TerminalAction>, EnumerationError> {
        if self.first_responder.is_none() {
            return Err(EnumerationError::SessionUnavailable);
        }
        let action = |id: &str, title: &str, description: Option<&str>| TerminalAction {
            id: ActionId::new(id),
            title: title.to_string(),
            description: description.map(str::to_string),
        };
        Ok(vec![
            action("new_window", "New Window", Some("Open a new terminal window")),
            action("close_window", "Close Window", Some("Close the focused window")),
            action(
                "set_tab_color",
                "Change Tab Color",
                Some("Cycle the color of the focused window's tab"),
            ),
            action("clear_screen", "Clear Screen", None),
            action(
                "check_for_updates",
                "Check for Updates",
                Some("Look for a newer release"),
            ),
        ])
    }
}

impl SessionRegistry for Workspace {
    fn all_sessions(&self) -> Vec<SessionInfo> {
        self.windows
            .iter()
            .map(|w| SessionInfo {
                window: w.visible.then_some(w.handle),
                title: w.title.clone(),
                working_directory: w.pwd.clone(),
                tab_color: Some(w.tab_color),
                focused_surface: w.focused_surface,
            })
            .collect()
    }

    fn activate_app(&mut self) {
        self.app_active = true;
    }

    fn raise_window(&mut self, window: WindowHandle) -> bool {
        let Some(focused) = self.window(window).map(|w| w.focused_surface) else {
            return false;
        };
        if let Some(id) = focused {
            self.focus_surface(id);
        } else {
            self.key_window = Some(window);
        }
        true
    }
}

impl SurfaceRegistry for Workspace {
    fn is_alive(&self, id: SurfaceId) -> bool {
        self.window_of(id).is_some()
    }

    fn focused(&self) -> Option<SurfaceId> {
        self.first_responder
    }

    fn make_first_responder(&mut self, id: SurfaceId) {
        self.focus_surface(id);
    }
}

impl ActionHost for Workspace {
    fn on_action(&mut self, id: &ActionId) {
        match id.as_str() {
            "new_window" => {
                let pwd = self
                    .key_window
                    .and_then(|h| self.window(h))
                    .and_then(|w| w.pwd.clone())
                    .or_else(|| self.home.clone());
                self.open_window("zsh", pwd, TabColor::None, 1);
            }
            "close_window" => {
                if let Some(handle) = self.key_window {
                    self.close_window(handle);
                }
            }
            "set_tab_color" => self.set_next_tab_color(),
            "clear_screen" => self.clear_focused(),
            "check_for_updates" => self.updater.check(),
            other => debug!(action = other, "unknown terminal action"),
        }
    }
}

impl Host for Workspace {
    fn sources(&self) -> Sources<'_> {
        Sources {
            update: Some(&self.updater),
            actions: self,
            sessions: self,
            surfaces: self,
        }
    }

    fn updater_mut(&mut self) -> Option<&mut dyn UpdateSource> {
        Some(&mut self.updater)
    }

    fn tick(&mut self) -> bool {
        self.updater.tick()
    }

    fn cycle_focus(&mut self, step: isize) {
        let ring = self.focus_ring();
        if ring.is_empty() {
            return;
        }
        let len = ring.len() as isize;
        let current = self
            .first_responder
            .and_then(|id| ring.iter().position(|s| *s == id))
            .map_or(0, |i| i as isize);
        let next = (current + step).rem_euclid(len) as usize;
        self.focus_surface(ring[next]);
    }

    fn send_text(&mut self, c: char) {
        if let Some(surface) = self.first_responder.and_then(|id| self.surface_mut(id)) {
            surface.write(c);
        }
    }
}

/// Title shown for a window, falling back like session search does.
#[must_use]
pub fn display_title(window: &DemoWindow) -> &str {
    if window.title.is_empty() {
        crate::app::options::UNTITLED
    } else {
        &window.title
    }
}

impl HostView for Workspace {
    fn window_title(&self) -> &str {
        self.key_window
            .and_then(|h| self.window(h))
            .map_or("no window", display_title)
    }

    fn render_body(&self, theme: &Theme, area: Rect, buf: &mut Buffer) {
        WorkspaceView {
            workspace: self,
            theme,
        }
        .render(area, buf);
    }
}

/// Working directory of a window abbreviated against `home`.
#[must_use]
pub fn display_pwd(window: &DemoWindow, home: Option<&Path>) -> Option<String> {
    window
        .pwd
        .as_deref()
        .map(|pwd| crate::app::path_format::format_path_from(pwd, home))
}
