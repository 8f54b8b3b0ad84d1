use std::collections::BTreeSet;

#[cfg(feature = "json_schema")]
use schemars::JsonSchema;
use serde::Deserialize;
use serde::Serialize;

use crate::Error;

/// Enumerates what the scanner should do with a directory entry
#[cfg_attr(feature = "json_schema", derive(JsonSchema))]
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum FilterLevel {
    /// Leave the entry out of the manifest
    Deny,

    /// Include the entry in the manifest
    Allow,
}

/// Decides which directory entries belong in the manifest.
///
/// Only regular files whose name ends with one of the allowed extensions are
/// admitted. The comparison is a case-insensitive suffix match on the whole
/// file name, so `REPORT.PDF` and `.pdf` both match the `pdf` extension.
#[cfg_attr(feature = "json_schema", derive(JsonSchema))]
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct FilterSet {
    /// Allowed file name suffixes, lowercased and including the leading dot
    /// (e.g. ".pdf").
    allowed_suffixes: BTreeSet<String>,
}

impl FilterSet {
    /// Create a new, empty filter. An empty filter denies every entry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new filter allowing the given extensions
    pub fn create_with<S: AsRef<str>>(allowed_extensions: &[S]) -> Result<Self, Error> {
        let mut ret = Self::new();
        for ext in allowed_extensions {
            ret.allow_extension(ext.as_ref())?;
        }
        Ok(ret)
    }

    /// Add an extension to the allowed list. A leading dot is optional.
    pub fn allow_extension(&mut self, ext: &str) -> Result<(), Error> {
        let ext = ext.trim_start_matches('.');
        if ext.is_empty() || ext.contains(['/', '\\']) {
            return Err(Error::InvalidArgument(format!("Invalid extension: {ext:?}")));
        }
        self.allowed_suffixes
            .insert(format!(".{}", ext.to_lowercase()));
        Ok(())
    }

    /// Determines whether an entry with `name` goes into the manifest.
    ///
    /// `is_file` must describe the entry itself; symlinks and directories
    /// are always denied.
    pub fn matches(&self, name: &str, is_file: bool) -> FilterLevel {
        if !is_file {
            return FilterLevel::Deny;
        }
        let name = name.to_lowercase();
        if self
            .allowed_suffixes
            .iter()
            .any(|suffix| name.ends_with(suffix.as_str()))
        {
            FilterLevel::Allow
        } else {
            FilterLevel::Deny
        }
    }
}
