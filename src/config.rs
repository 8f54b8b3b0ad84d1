//! Scan configuration and its defaults

use std::path::PathBuf;

#[cfg(feature = "json_schema")]
use schemars::JsonSchema;
use serde::Deserialize;
use serde::Serialize;

/// Directory scanned when no other is configured.
pub const DEFAULT_SOURCE_DIR: &str = "DOCS_PDF";

/// Manifest written when no other is configured.
pub const DEFAULT_OUTPUT_FILE: &str = "data.js";

/// Global the viewer reads its initial documents from.
pub const DEFAULT_GLOBAL_NAME: &str = "window.initialDocuments";

/// Extension admitted when no other is configured.
pub const DEFAULT_EXTENSION: &str = "pdf";

/// Order of the entries in the written manifest.
#[cfg_attr(feature = "json_schema", derive(JsonSchema))]
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum EntryOrder {
    /// Whatever order the filesystem lists the directory in.
    #[default]
    Enumeration,

    /// Most recently modified first, by full timestamp.
    NewestFirst,
}

/// Everything a scan needs to know, passed explicitly to [`crate::DocScanner`].
#[cfg_attr(feature = "json_schema", derive(JsonSchema))]
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ManifestConfig {
    /// Directory holding the documents. Created if missing.
    pub source_dir: PathBuf,
    /// File the manifest is written to, replaced on every scan.
    pub output_file: PathBuf,
    /// Prefix of every entry's `url`, relative to the page loading the
    /// manifest.
    pub url_prefix: String,
    /// Dotted name of the global the entries are assigned to.
    pub global_name: String,
    /// Extensions, without the dot, of files to include.
    pub extensions: Vec<String>,
    /// Order of the entries in the manifest.
    pub order: EntryOrder,
}

impl Default for ManifestConfig {
    fn default() -> Self {
        Self {
            source_dir: DEFAULT_SOURCE_DIR.into(),
            output_file: DEFAULT_OUTPUT_FILE.into(),
            url_prefix: DEFAULT_SOURCE_DIR.into(),
            global_name: DEFAULT_GLOBAL_NAME.into(),
            extensions: vec![DEFAULT_EXTENSION.into()],
            order: EntryOrder::default(),
        }
    }
}

impl ManifestConfig {
    /// Sets the directory to scan
    pub fn with_source_dir<P: Into<PathBuf>>(mut self, source_dir: P) -> Self {
        self.source_dir = source_dir.into();
        self
    }

    /// Sets the manifest file
    pub fn with_output_file<P: Into<PathBuf>>(mut self, output_file: P) -> Self {
        self.output_file = output_file.into();
        self
    }

    /// Sets the prefix of entry urls
    pub fn with_url_prefix(mut self, url_prefix: &str) -> Self {
        self.url_prefix = url_prefix.to_owned();
        self
    }

    /// Sets the global variable name
    pub fn with_global_name(mut self, global_name: &str) -> Self {
        self.global_name = global_name.to_owned();
        self
    }

    /// Replaces the list of admitted extensions
    pub fn with_extensions<S: AsRef<str>>(mut self, extensions: &[S]) -> Self {
        self.extensions = extensions.iter().map(|e| e.as_ref().to_owned()).collect();
        self
    }

    /// Sets the entry order
    pub fn with_order(mut self, order: EntryOrder) -> Self {
        self.order = order;
        self
    }
}
