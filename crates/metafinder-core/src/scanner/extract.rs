/// Per-file metadata extraction.
///
/// Turns one absolute file path into a [`FileRecord`]. Stat failures and
/// files outside the root come back as an [`ExtractionError`] for the
/// scanner to log and skip; owner lookup problems only blank the owner.
use crate::error::ExtractionError;
use crate::model::{local_seconds, FileRecord, ScanRoot};
use crate::platform::{extended_length, OwnerResolver};
use std::fs::Metadata;
use std::io;
use std::path::Path;
use std::time::SystemTime;

/// Builds [`FileRecord`]s, consulting an [`OwnerResolver`] for the owner
/// column.
pub struct MetadataExtractor<'a> {
    owner: &'a dyn OwnerResolver,
}

impl<'a> MetadataExtractor<'a> {
    pub fn new(owner: &'a dyn OwnerResolver) -> Self {
        Self { owner }
    }

    /// Read the metadata of `file`, which must lie below `root`.
    ///
    /// All filesystem queries use the extended-length form of the path.
    /// Read-only: nothing on disk is modified.
    pub fn extract(&self, file: &Path, root: &ScanRoot) -> Result<FileRecord, ExtractionError> {
        let stat_err = |source: io::Error| ExtractionError::Stat {
            path: file.to_path_buf(),
            source,
        };

        let query_path = extended_length(file);
        let meta = std::fs::metadata(&query_path).map_err(stat_err)?;

        let created = created_time(&meta).map_err(stat_err)?;
        let modified = meta.modified().map_err(stat_err)?;
        let accessed = meta.accessed().ok();

        let relative_path =
            root.relative_path_of(file)
                .ok_or_else(|| ExtractionError::OutsideRoot {
                    path: file.to_path_buf(),
                    root: root.path().to_path_buf(),
                })?;

        let owner = self.owner.resolve(&query_path, &meta).unwrap_or_default();

        let name = file
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        Ok(FileRecord::new(
            name,
            local_seconds(created),
            local_seconds(modified),
            accessed.map(local_seconds),
            meta.len(),
            owner,
            relative_path,
        ))
    }
}

/// Creation (birth) time, falling back to the inode change time on Unix
/// filesystems that do not record a birth time.
fn created_time(meta: &Metadata) -> io::Result<SystemTime> {
    match meta.created() {
        Ok(t) => Ok(t),
        Err(e) => change_time(meta).ok_or(e),
    }
}

#[cfg(unix)]
fn change_time(meta: &Metadata) -> Option<SystemTime> {
    use std::os::unix::fs::MetadataExt;
    use std::time::Duration;

    let secs = meta.ctime();
    let nanos = u32::try_from(meta.ctime_nsec()).unwrap_or(0);
    if secs >= 0 {
        SystemTime::UNIX_EPOCH.checked_add(Duration::new(secs.unsigned_abs(), nanos))
    } else {
        SystemTime::UNIX_EPOCH.checked_sub(Duration::from_secs(secs.unsigned_abs()))
    }
}

#[cfg(not(unix))]
fn change_time(_meta: &Metadata) -> Option<SystemTime> {
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::NoOwner;
    use crate::resolver::resolve;
    use std::path::MAIN_SEPARATOR;

    struct FixedOwner(&'static str);

    impl OwnerResolver for FixedOwner {
        fn resolve(&self, _path: &Path, _meta: &Metadata) -> Option<String> {
            Some(self.0.to_owned())
        }
    }

    fn root_of(dir: &tempfile::TempDir) -> ScanRoot {
        resolve(dir.path().to_str()).unwrap()
    }

    #[test]
    fn extracts_name_size_and_relative_path() {
        let dir = tempfile::TempDir::new().unwrap();
        let sub = dir.path().join("archive");
        std::fs::create_dir(&sub).unwrap();
        let file = sub.join("old.txt");
        std::fs::write(&file, vec![0u8; 512]).unwrap();

        let root = root_of(&dir);
        let rec = MetadataExtractor::new(&NoOwner)
            .extract(&root.path().join("archive").join("old.txt"), &root)
            .unwrap();

        assert_eq!(rec.name(), "old.txt");
        assert_eq!(rec.size_bytes(), 512);
        assert_eq!(
            rec.relative_path(),
            format!("{MAIN_SEPARATOR}archive{MAIN_SEPARATOR}old.txt")
        );
        assert_eq!(rec.owner(), "");
    }

    #[test]
    fn owner_comes_from_resolver() {
        let dir = tempfile::TempDir::new().unwrap();
        std::fs::write(dir.path().join("a.txt"), b"abc").unwrap();
        let root = root_of(&dir);

        let rec = MetadataExtractor::new(&FixedOwner("CORP\\jack"))
            .extract(&root.path().join("a.txt"), &root)
            .unwrap();
        assert_eq!(rec.owner(), "CORP\\jack");
    }

    #[test]
    fn missing_file_is_a_stat_failure() {
        let dir = tempfile::TempDir::new().unwrap();
        let root = root_of(&dir);
        let missing = root.path().join("gone.txt");

        let err = MetadataExtractor::new(&NoOwner)
            .extract(&missing, &root)
            .unwrap_err();
        assert!(matches!(err, ExtractionError::Stat { .. }));
        assert_eq!(err.path(), missing.as_path());
    }

    #[test]
    fn file_outside_root_is_rejected() {
        let dir = tempfile::TempDir::new().unwrap();
        let other = tempfile::TempDir::new().unwrap();
        let stray = other.path().join("stray.txt");
        std::fs::write(&stray, b"x").unwrap();

        let err = MetadataExtractor::new(&NoOwner)
            .extract(&stray, &root_of(&dir))
            .unwrap_err();
        assert!(matches!(err, ExtractionError::OutsideRoot { .. }));
    }

    #[test]
    fn timestamps_are_whole_seconds() {
        let dir = tempfile::TempDir::new().unwrap();
        std::fs::write(dir.path().join("t.bin"), b"x").unwrap();
        let root = root_of(&dir);

        let rec = MetadataExtractor::new(&NoOwner)
            .extract(&root.path().join("t.bin"), &root)
            .unwrap();
        assert_eq!(rec.modified_at().and_utc().timestamp_subsec_nanos(), 0);
        assert_eq!(rec.created_at().and_utc().timestamp_subsec_nanos(), 0);
    }
}
