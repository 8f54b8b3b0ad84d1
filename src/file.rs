use std::fs::Metadata;
use std::path::Path as StdPath;

use chrono::DateTime;
use chrono::Utc;
#[cfg(feature = "json_schema")]
use schemars::JsonSchema;
use serde::Deserialize;
use serde::Serialize;

use crate::errors::Error;

/// Raw metadata of a single document, before any formatting.
#[cfg_attr(feature = "json_schema", derive(JsonSchema))]
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Hash, Eq)]
pub struct FileStat {
    /// The size of the file in bytes.
    pub size: u64,
    /// The last modification time of the file.
    pub modified: DateTime<Utc>,
}

impl FileStat {
    /// Create a `FileStat` from a `Metadata` value.
    ///
    /// `path` is only used to describe the file in errors. A platform that
    /// cannot report modification times makes this fail rather than invent
    /// a date.
    pub fn from_metadata(path: &StdPath, metadata: &Metadata) -> Result<Self, Error> {
        let modified = metadata.modified().map_err(|e| Error::Read {
            what: format!("modification time of {}", path.display()),
            how: e.to_string(),
        })?;
        Ok(FileStat {
            size: metadata.len(),
            modified: modified.into(),
        })
    }
}
