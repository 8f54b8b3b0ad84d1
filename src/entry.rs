use std::fmt::Display;

use chrono::TimeZone;
#[cfg(feature = "json_schema")]
use schemars::JsonSchema;
use serde::Deserialize;
use serde::Serialize;

use crate::FileStat;
use crate::UrlPath;
use crate::utils::format_date;
use crate::utils::format_size;

/// One document as the viewer displays it.
///
/// Every field is a preformatted string; the viewer renders them verbatim.
#[cfg_attr(feature = "json_schema", derive(JsonSchema))]
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Hash, Eq)]
pub struct DocumentEntry {
    /// Base name of the file, including the extension.
    pub name: String,
    /// Human readable size, e.g. "1.50 MB".
    pub size: String,
    /// Last modification date as `MM/DD/YYYY`.
    pub date: String,
    /// Relative access path, e.g. "DOCS_PDF/report.pdf".
    pub url: String,
}

impl DocumentEntry {
    /// Builds the entry for `url` from raw file stats, rendering the date in
    /// the timezone `tz`. The entry name is the last component of `url`.
    pub fn from_stat<Tz>(url: &UrlPath, stat: &FileStat, tz: &Tz) -> Self
    where
        Tz: TimeZone,
        Tz::Offset: Display,
    {
        DocumentEntry {
            name: url.basename().unwrap_or_default().to_string(),
            size: format_size(stat.size),
            date: format_date(&stat.modified, tz),
            url: url.to_string(),
        }
    }
}
