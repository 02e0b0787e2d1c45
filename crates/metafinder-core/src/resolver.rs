/// Root path resolution.
///
/// Turns whatever the folder prompt produced into a [`ScanRoot`]. An empty
/// or missing input is the normal "nothing selected" outcome, not an error.
/// The filesystem is not consulted: a root that does not exist is accepted
/// here and simply yields an empty scan later.
use crate::model::ScanRoot;
use std::path::{Path, PathBuf};
use tracing::warn;

/// Resolve a raw root path.
///
/// Returns `None` for a missing, empty, or whitespace-only input. Otherwise
/// the path is made absolute against the current directory and normalised
/// (no `.` components, no trailing separator).
pub fn resolve(raw: Option<&str>) -> Option<ScanRoot> {
    let raw = raw?.trim();
    if raw.is_empty() {
        return None;
    }
    Some(ScanRoot::new(normalise(Path::new(raw))))
}

fn normalise(raw: &Path) -> PathBuf {
    let absolute = match std::path::absolute(raw) {
        Ok(p) => p,
        Err(e) => {
            // Only fails when the current directory is unavailable.
            warn!("Could not make {} absolute: {}", raw.display(), e);
            raw.to_path_buf()
        }
    };
    absolute.components().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_input_is_no_selection() {
        assert!(resolve(None).is_none());
    }

    #[test]
    fn empty_and_blank_input_is_no_selection() {
        assert!(resolve(Some("")).is_none());
        assert!(resolve(Some("   ")).is_none());
    }

    #[test]
    fn relative_input_becomes_absolute() {
        let root = resolve(Some("some-folder")).unwrap();
        assert!(root.path().is_absolute());
        assert!(root.path().ends_with("some-folder"));
    }

    #[test]
    fn nonexistent_path_is_still_resolved() {
        let missing = std::env::temp_dir().join("metafinder-does-not-exist-7f3a");
        let root = resolve(missing.to_str()).unwrap();
        assert_eq!(root.path(), missing.as_path());
    }

    #[test]
    fn trailing_separator_and_dot_components_are_dropped() {
        let base = std::env::temp_dir();
        let raw = format!(
            "{}{sep}.{sep}data{sep}",
            base.display(),
            sep = std::path::MAIN_SEPARATOR
        );
        let root = resolve(Some(&raw)).unwrap();
        assert_eq!(root.path(), base.join("data").as_path());
    }
}
