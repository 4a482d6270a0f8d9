use std::fmt;
use std::path::PathBuf;

/// Identifies a terminal surface. Liveness is always checked through a
/// `SurfaceRegistry`; holding an id never keeps a surface around.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SurfaceId(pub u64);

impl fmt::Display for SurfaceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "surface#{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WindowHandle(pub u64);

impl fmt::Display for WindowHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "window#{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct ActionId(pub String);

impl ActionId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ActionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Icon {
    StackedRectangles,
    Named(String),
}

impl Icon {
    #[must_use]
    pub fn glyph(&self) -> &str {
        match self {
            Icon::StackedRectangles => "❐",
            Icon::Named(name) => match name.as_str() {
                "shippingbox" => "▣",
                "arrow.down" => "↓",
                "checkmark" => "✓",
                "exclamationmark" => "!",
                _ => "•",
            },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

/// Tab color as reported by a session. `None` is the "no color" sentinel and
/// never maps to a display color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TabColor {
    #[default]
    None,
    Blue,
    Purple,
    Pink,
    Red,
    Orange,
    Yellow,
    Green,
    Teal,
    Graphite,
}

impl TabColor {
    #[must_use]
    pub fn display_color(self) -> Option<Rgb> {
        match self {
            TabColor::None => None,
            TabColor::Blue => Some(Rgb(0x0a, 0x84, 0xff)),
            TabColor::Purple => Some(Rgb(0xbf, 0x5a, 0xf2)),
            TabColor::Pink => Some(Rgb(0xff, 0x37, 0x5f)),
            TabColor::Red => Some(Rgb(0xff, 0x45, 0x3a)),
            TabColor::Orange => Some(Rgb(0xff, 0x9f, 0x0a)),
            TabColor::Yellow => Some(Rgb(0xff, 0xd6, 0x0a)),
            TabColor::Green => Some(Rgb(0x32, 0xd7, 0x4b)),
            TabColor::Teal => Some(Rgb(0x64, 0xd2, 0xff)),
            TabColor::Graphite => Some(Rgb(0x8e, 0x8e, 0x93)),
        }
    }
}

/// What happens when an option is selected. The host dispatches on the tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OptionAction {
    InstallUpdate,
    CancelUpdate,
    OpenSessionSearch,
    RunAction(ActionId),
    ActivateSession(WindowHandle),
}

/// One selectable palette entry.
#[derive(Debug, Clone, PartialEq)]
pub struct PaletteOption {
    pub title: String,
    pub description: Option<String>,
    pub leading_icon: Option<Icon>,
    pub badge: Option<String>,
    pub emphasis: bool,
    pub key_hint: Option<Vec<String>>,
    pub accent_color: Option<Rgb>,
    pub action: OptionAction,
}

impl PaletteOption {
    pub fn new(title: impl Into<String>, action: OptionAction) -> Self {
        let title = title.into();
        debug_assert!(!title.is_empty(), "palette option titles are never empty");
        Self {
            title,
            description: None,
            leading_icon: None,
            badge: None,
            emphasis: false,
            key_hint: None,
            accent_color: None,
            action,
        }
    }

    #[must_use]
    pub fn with_description(mut self, description: Option<String>) -> Self {
        self.description = description;
        self
    }

    #[must_use]
    pub fn with_icon(mut self, icon: Option<Icon>) -> Self {
        self.leading_icon = icon;
        self
    }

    #[must_use]
    pub fn with_badge(mut self, badge: Option<String>) -> Self {
        self.badge = badge;
        self
    }

    #[must_use]
    pub fn with_emphasis(mut self, emphasis: bool) -> Self {
        self.emphasis = emphasis;
        self
    }

    #[must_use]
    pub fn with_key_hint(mut self, key_hint: Option<Vec<String>>) -> Self {
        self.key_hint = key_hint;
        self
    }

    #[must_use]
    pub fn with_accent(mut self, accent_color: Option<Rgb>) -> Self {
        self.accent_color = accent_color;
        self
    }
}

/// A terminal action as enumerated by the action registry.
#[derive(Debug, Clone, PartialEq)]
pub struct TerminalAction {
    pub id: ActionId,
    pub title: String,
    pub description: Option<String>,
}

/// One open session as reported by the session registry.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SessionInfo {
    pub window: Option<WindowHandle>,
    pub title: String,
    pub working_directory: Option<PathBuf>,
    pub tab_color: Option<TabColor>,
    pub focused_surface: Option<SurfaceId>,
}
