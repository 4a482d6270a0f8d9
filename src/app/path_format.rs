use std::path::Path;

/// Abbreviates `path` relative to the current user's home directory.
#[must_use]
pub fn format_path(path: &Path) -> String {
    format_path_from(path, home::home_dir().as_deref())
}

/// Replaces a leading `home` with `~`. Paths outside `home` come back
/// unchanged, and so does everything when no home directory is known.
///
/// Matching is per component, so `/home/bobby` is not treated as living
/// under `/home/bob`. Non-UTF-8 bytes are shown lossily.
#[must_use]
pub fn format_path_from(path: &Path, home: Option<&Path>) -> String {
    let display = path.to_string_lossy();
    // A bare root is never abbreviated.
    let Some(home) = home.filter(|h| h.parent().is_some()) else {
        return display.into_owned();
    };
    let Ok(rest) = path.strip_prefix(home) else {
        return display.into_owned();
    };

    let trailing = if display.ends_with('/') { "/" } else { "" };
    if rest.as_os_str().is_empty() {
        format!("~{trailing}")
    } else {
        format!("~/{}{trailing}", rest.to_string_lossy())
    }
}
