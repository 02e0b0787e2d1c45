/// The per-file metadata record: the unit of output.
///
/// Records are built once by the extractor and never modified afterwards.
/// Fields are private; the report writer reads them through accessors.
use chrono::{DateTime, Local, NaiveDateTime, SubsecRound};
use std::time::SystemTime;

/// Rendering used for every timestamp column in the report.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Convert a filesystem timestamp to local wall-clock time at whole-second
/// granularity.
pub fn local_seconds(time: SystemTime) -> NaiveDateTime {
    let local: DateTime<Local> = time.into();
    local.naive_local().trunc_subsecs(0)
}

/// Render a timestamp as `YYYY-MM-DD HH:MM:SS`.
pub fn format_timestamp(ts: &NaiveDateTime) -> String {
    ts.format(TIMESTAMP_FORMAT).to_string()
}

/// Metadata for one successfully stat'd file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileRecord {
    name: String,
    created_at: NaiveDateTime,
    modified_at: NaiveDateTime,
    accessed_at: Option<NaiveDateTime>,
    size_bytes: u64,
    /// Empty when the owner could not be resolved.
    owner: String,
    /// Root-relative, always starting with the platform separator.
    relative_path: String,
}

impl FileRecord {
    /// Assemble a record. Timestamps are truncated to whole seconds.
    pub fn new(
        name: String,
        created_at: NaiveDateTime,
        modified_at: NaiveDateTime,
        accessed_at: Option<NaiveDateTime>,
        size_bytes: u64,
        owner: String,
        relative_path: String,
    ) -> Self {
        Self {
            name,
            created_at: created_at.trunc_subsecs(0),
            modified_at: modified_at.trunc_subsecs(0),
            accessed_at: accessed_at.map(|t| t.trunc_subsecs(0)),
            size_bytes,
            owner,
            relative_path,
        }
    }

    /// File name only, without any directory component.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn created_at(&self) -> NaiveDateTime {
        self.created_at
    }

    pub fn modified_at(&self) -> NaiveDateTime {
        self.modified_at
    }

    /// `None` when the host does not report access times.
    pub fn accessed_at(&self) -> Option<NaiveDateTime> {
        self.accessed_at
    }

    pub fn size_bytes(&self) -> u64 {
        self.size_bytes
    }

    /// Owner display string (`DOMAIN\name` on Windows), or `""`.
    pub fn owner(&self) -> &str {
        &self.owner
    }

    /// Path relative to the scan root, prefixed with the path separator.
    pub fn relative_path(&self) -> &str {
        &self.relative_path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use std::time::Duration;

    fn at(h: u32, m: u32, s: u32, milli: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 6, 14)
            .unwrap()
            .and_hms_milli_opt(h, m, s, milli)
            .unwrap()
    }

    #[test]
    fn timestamps_render_in_fixed_format() {
        assert_eq!(format_timestamp(&at(9, 5, 3, 0)), "2024-06-14 09:05:03");
    }

    #[test]
    fn record_truncates_sub_second_precision() {
        let rec = FileRecord::new(
            "a.txt".into(),
            at(1, 2, 3, 999),
            at(4, 5, 6, 500),
            Some(at(7, 8, 9, 1)),
            10,
            String::new(),
            "/a.txt".into(),
        );
        assert_eq!(rec.created_at(), at(1, 2, 3, 0));
        assert_eq!(rec.modified_at(), at(4, 5, 6, 0));
        assert_eq!(rec.accessed_at(), Some(at(7, 8, 9, 0)));
    }

    #[test]
    fn local_seconds_drops_fraction() {
        let t = SystemTime::UNIX_EPOCH + Duration::from_millis(1_700_000_000_750);
        let converted = local_seconds(t);
        assert_eq!(converted.and_utc().timestamp_subsec_nanos(), 0);
    }
}
