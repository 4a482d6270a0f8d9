use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UpdateState {
    #[default]
    NotChecked,
    Checking,
    UpdateAvailable,
    Downloading,
    Installable,
    UpToDate,
    Error,
}

impl UpdateState {
    /// True when invoking install is currently valid.
    #[must_use]
    pub fn is_installable(self) -> bool {
        matches!(
            self,
            UpdateState::UpdateAvailable | UpdateState::Downloading | UpdateState::Installable
        )
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            UpdateState::NotChecked => "Not Checked",
            UpdateState::Checking => "Checking for Updates…",
            UpdateState::UpdateAvailable => "Update Available",
            UpdateState::Downloading => "Downloading Update…",
            UpdateState::Installable => "Ready to Install",
            UpdateState::UpToDate => "Up to Date",
            UpdateState::Error => "Update Failed",
        }
    }
}

impl fmt::Display for UpdateState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
