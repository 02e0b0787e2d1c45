/// The validated scan root and root-relative path arithmetic.
use std::fmt;
use std::path::{Component, Path, PathBuf, MAIN_SEPARATOR};

/// Absolute directory a scan starts from. Read-only once resolved.
///
/// Only [`crate::resolver::resolve`] constructs one, so the path is always
/// absolute and free of `.` components and trailing separators.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanRoot {
    path: PathBuf,
}

impl ScanRoot {
    pub(crate) fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Path of `file` relative to the root, with a leading separator:
    /// `<root>/archive/old.txt` becomes `/archive/old.txt` (`\archive\old.txt`
    /// on Windows).
    ///
    /// Returns `None` when `file` is not strictly below the root.
    pub fn relative_path_of(&self, file: &Path) -> Option<String> {
        let rel = file.strip_prefix(&self.path).ok()?;
        let mut out = String::new();
        for component in rel.components() {
            match component {
                Component::Normal(part) => {
                    out.push(MAIN_SEPARATOR);
                    out.push_str(&part.to_string_lossy());
                }
                Component::CurDir => {}
                _ => return None,
            }
        }
        if out.is_empty() {
            None
        } else {
            Some(out)
        }
    }

    /// Inverse of [`relative_path_of`](Self::relative_path_of).
    pub fn join_relative(&self, relative: &str) -> PathBuf {
        self.path.join(relative.trim_start_matches(MAIN_SEPARATOR))
    }
}

impl fmt::Display for ScanRoot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.path.display())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn root() -> ScanRoot {
        ScanRoot::new(std::env::temp_dir().join("metafinder-root"))
    }

    #[test]
    fn relative_path_has_leading_separator() {
        let r = root();
        let file = r.path().join("archive").join("old.txt");
        let rel = r.relative_path_of(&file).unwrap();
        assert_eq!(rel, format!("{MAIN_SEPARATOR}archive{MAIN_SEPARATOR}old.txt"));
    }

    #[test]
    fn relative_path_round_trips() {
        let r = root();
        let file = r.path().join("a").join("b").join("c.bin");
        let rel = r.relative_path_of(&file).unwrap();
        assert_eq!(r.join_relative(&rel), file);
    }

    #[test]
    fn file_outside_root_has_no_relative_path() {
        let r = root();
        let outside = std::env::temp_dir().join("elsewhere").join("x.txt");
        assert!(r.relative_path_of(&outside).is_none());
    }

    #[test]
    fn root_itself_has_no_relative_path() {
        let r = root();
        assert!(r.relative_path_of(r.path()).is_none());
    }
}
