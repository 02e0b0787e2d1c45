/// Run configuration.
///
/// Loaded from an optional JSON file; any field left out takes its default.
///
/// ```json
/// { "schema": "base", "resolve_owner": false }
/// ```
use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Which column set the report carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Schema {
    /// Filename, Created On, Modified On, File Size (bytes), File Path.
    Base,
    /// Base columns plus Last Accessed On and File Owner.
    #[default]
    Extended,
}

impl Schema {
    pub fn label(self) -> &'static str {
        match self {
            Self::Base => "base",
            Self::Extended => "extended",
        }
    }
}

/// Settings for one orchestrated run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    pub schema: Schema,
    /// Look up file owners. Ignored (no lookup) for the base schema, which
    /// has no owner column.
    pub resolve_owner: bool,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            schema: Schema::Extended,
            resolve_owner: true,
        }
    }
}

impl RunConfig {
    /// Read a JSON config file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Whether owner lookups should actually be performed.
    pub fn wants_owner(&self) -> bool {
        self.resolve_owner && self.schema == Schema::Extended
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn default_is_extended_with_owner() {
        let cfg = RunConfig::default();
        assert_eq!(cfg.schema, Schema::Extended);
        assert!(cfg.wants_owner());
    }

    #[test]
    fn partial_file_keeps_defaults() {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        f.write_all(br#"{ "schema": "base" }"#).unwrap();
        let cfg = RunConfig::load(f.path()).unwrap();
        assert_eq!(cfg.schema, Schema::Base);
        assert!(cfg.resolve_owner);
        assert!(!cfg.wants_owner(), "base schema has no owner column");
    }

    #[test]
    fn unknown_schema_is_rejected() {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        f.write_all(br#"{ "schema": "full" }"#).unwrap();
        assert!(matches!(
            RunConfig::load(f.path()),
            Err(ConfigError::Parse { .. })
        ));
    }

    #[test]
    fn missing_file_is_a_read_error() {
        let dir = tempfile::TempDir::new().unwrap();
        let err = RunConfig::load(&dir.path().join("nope.json")).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }
}
