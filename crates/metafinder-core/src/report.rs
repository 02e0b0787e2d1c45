/// CSV report writer.
///
/// One header row, then one row per record in the order given. The
/// destination is overwritten without confirmation. Quoting follows the
/// `csv` crate defaults: fields containing the delimiter, a quote, or a
/// line break are quoted.
use crate::config::Schema;
use crate::error::ReportError;
use crate::model::{format_timestamp, FileRecord};
use chrono::NaiveDateTime;
use std::path::Path;
use tracing::info;

/// Header for [`Schema::Base`].
pub const BASE_HEADER: &[&str] = &[
    "Filename",
    "Created On",
    "Modified On",
    "File Size (bytes)",
    "File Path",
];

/// Header for [`Schema::Extended`].
pub const EXTENDED_HEADER: &[&str] = &[
    "Filename",
    "Created On",
    "Modified On",
    "Last Accessed On",
    "File Size (bytes)",
    "File Owner",
    "File Path",
];

/// Stamp format used in generated report names.
const FILE_STAMP_FORMAT: &str = "%Y%m%d-%H%M%S";

/// `file_metadata_<YYYYMMDD-HHMMSS>.csv` for the given moment.
///
/// Names are unique per second only; two runs within the same second
/// target the same file.
pub fn report_file_name(now: NaiveDateTime) -> String {
    format!("file_metadata_{}.csv", now.format(FILE_STAMP_FORMAT))
}

/// Writes records in one of the two column layouts.
#[derive(Debug, Clone, Copy)]
pub struct ReportWriter {
    schema: Schema,
}

impl ReportWriter {
    pub fn new(schema: Schema) -> Self {
        Self { schema }
    }

    pub fn header(&self) -> &'static [&'static str] {
        match self.schema {
            Schema::Base => BASE_HEADER,
            Schema::Extended => EXTENDED_HEADER,
        }
    }

    fn row(&self, rec: &FileRecord) -> Vec<String> {
        let created = format_timestamp(&rec.created_at());
        let modified = format_timestamp(&rec.modified_at());
        let size = rec.size_bytes().to_string();
        match self.schema {
            Schema::Base => vec![
                rec.name().to_owned(),
                created,
                modified,
                size,
                rec.relative_path().to_owned(),
            ],
            Schema::Extended => vec![
                rec.name().to_owned(),
                created,
                modified,
                rec.accessed_at()
                    .map(|t| format_timestamp(&t))
                    .unwrap_or_default(),
                size,
                rec.owner().to_owned(),
                rec.relative_path().to_owned(),
            ],
        }
    }

    /// Write `records` to `destination`, returning the number of data rows.
    pub fn write(&self, destination: &Path, records: &[FileRecord]) -> Result<usize, ReportError> {
        let mut writer =
            csv::Writer::from_path(destination).map_err(|source| ReportError::Create {
                path: destination.to_path_buf(),
                source,
            })?;
        let write_err = |source: csv::Error| ReportError::Write {
            path: destination.to_path_buf(),
            source,
        };

        writer.write_record(self.header()).map_err(write_err)?;
        for rec in records {
            writer.write_record(self.row(rec)).map_err(write_err)?;
        }
        writer.flush().map_err(|source| ReportError::Flush {
            path: destination.to_path_buf(),
            source,
        })?;

        info!(
            "File data saved to {} ({} rows, {} schema)",
            destination.display(),
            records.len(),
            self.schema.label()
        );
        Ok(records.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn ts(d: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 9, d)
            .unwrap()
            .and_hms_opt(8, 30, 0)
            .unwrap()
    }

    fn record(name: &str, accessed: bool, owner: &str) -> FileRecord {
        FileRecord::new(
            name.into(),
            ts(1),
            ts(2),
            accessed.then(|| ts(3)),
            1024,
            owner.into(),
            format!("/{name}"),
        )
    }

    fn read_rows(path: &Path) -> Vec<Vec<String>> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .from_path(path)
            .unwrap();
        reader
            .records()
            .map(|r| r.unwrap().iter().map(str::to_owned).collect())
            .collect()
    }

    #[test]
    fn report_name_uses_compact_stamp() {
        assert_eq!(report_file_name(ts(18)), "file_metadata_20240918-083000.csv");
    }

    #[test]
    fn extended_schema_writes_all_columns() {
        let dir = tempfile::TempDir::new().unwrap();
        let out = dir.path().join("r.csv");
        let rows = ReportWriter::new(Schema::Extended)
            .write(&out, &[record("a.txt", true, "CORP\\jack")])
            .unwrap();
        assert_eq!(rows, 1);

        let table = read_rows(&out);
        assert_eq!(table[0], EXTENDED_HEADER);
        assert_eq!(
            table[1],
            [
                "a.txt",
                "2024-09-01 08:30:00",
                "2024-09-02 08:30:00",
                "2024-09-03 08:30:00",
                "1024",
                "CORP\\jack",
                "/a.txt"
            ]
        );
    }

    #[test]
    fn base_schema_omits_accessed_and_owner() {
        let dir = tempfile::TempDir::new().unwrap();
        let out = dir.path().join("r.csv");
        ReportWriter::new(Schema::Base)
            .write(&out, &[record("b.txt", true, "someone")])
            .unwrap();

        let table = read_rows(&out);
        assert_eq!(table[0], BASE_HEADER);
        assert_eq!(
            table[1],
            ["b.txt", "2024-09-01 08:30:00", "2024-09-02 08:30:00", "1024", "/b.txt"]
        );
    }

    #[test]
    fn missing_access_time_and_owner_are_empty_cells() {
        let dir = tempfile::TempDir::new().unwrap();
        let out = dir.path().join("r.csv");
        ReportWriter::new(Schema::Extended)
            .write(&out, &[record("c.txt", false, "")])
            .unwrap();

        let table = read_rows(&out);
        assert_eq!(table[1][3], "");
        assert_eq!(table[1][5], "");
    }

    #[test]
    fn fields_with_delimiters_are_quoted() {
        let dir = tempfile::TempDir::new().unwrap();
        let out = dir.path().join("r.csv");
        ReportWriter::new(Schema::Base)
            .write(&out, &[record("a, \"b\".txt", true, "")])
            .unwrap();

        let raw = std::fs::read_to_string(&out).unwrap();
        assert!(raw.contains("\"a, \"\"b\"\".txt\""));
        assert_eq!(read_rows(&out)[1][0], "a, \"b\".txt");
    }

    #[test]
    fn rows_keep_insertion_order() {
        let dir = tempfile::TempDir::new().unwrap();
        let out = dir.path().join("r.csv");
        let recs = [record("z.txt", true, ""), record("a.txt", true, "")];
        ReportWriter::new(Schema::Base).write(&out, &recs).unwrap();

        let names: Vec<_> = read_rows(&out).into_iter().skip(1).map(|r| r[0].clone()).collect();
        assert_eq!(names, ["z.txt", "a.txt"]);
    }

    #[test]
    fn existing_file_is_overwritten() {
        let dir = tempfile::TempDir::new().unwrap();
        let out = dir.path().join("r.csv");
        std::fs::write(&out, "old contents\nmore\nlines\nhere\n").unwrap();
        ReportWriter::new(Schema::Base).write(&out, &[]).unwrap();

        assert_eq!(std::fs::read_to_string(&out).unwrap().lines().count(), 1);
    }

    #[test]
    fn unwritable_destination_is_an_error() {
        let dir = tempfile::TempDir::new().unwrap();
        let out = dir.path().join("no-such-dir").join("r.csv");
        let err = ReportWriter::new(Schema::Extended)
            .write(&out, &[])
            .unwrap_err();
        assert!(matches!(err, ReportError::Create { .. }));
    }
}
