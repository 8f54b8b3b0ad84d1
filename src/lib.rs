//! Turns a directory of PDF documents into a static JavaScript manifest
//!
//! A typical use is a static page that lists the documents sitting next to
//! it without a server. The page loads the manifest with a `<script>` tag
//! and reads the global it defines.
//!
//! ```rust,no_run
//! use chrono::Local;
//! use docmanifest::DocScanner;
//! use docmanifest::ManifestConfig;
//!
//! let scanner = DocScanner::new(ManifestConfig::default()).unwrap();
//! let report = scanner.scan(&Local).unwrap();
//! println!("{} documents", report.documents);
//! ```
//!
//! With a `DOCS_PDF` directory holding two files, `data.js` might look like
//! ```js
//! window.initialDocuments = [
//!     {
//!         "name": "Annual Report.pdf",
//!         "size": "2.41 MB",
//!         "date": "03/07/2024",
//!         "url": "DOCS_PDF/Annual Report.pdf"
//!     },
//!     {
//!         "name": "INVOICE.PDF",
//!         "size": "88.00 KB",
//!         "date": "11/19/2023",
//!         "url": "DOCS_PDF/INVOICE.PDF"
//!     }
//! ];
//! ```

pub mod config;
mod entry;
mod errors;
mod file;
mod filter;
mod manifest;
mod path;
mod scanner;
pub mod utils;

pub use config::EntryOrder;
pub use config::ManifestConfig;
pub use entry::DocumentEntry;
pub use errors::Error;
pub use file::FileStat;
pub use filter::FilterLevel;
pub use filter::FilterSet;
pub use manifest::Manifest;
pub use path::UrlPath;
pub use scanner::DocScanner;
pub use scanner::ScanReport;
pub use scanner::ScannedFile;

#[cfg(feature = "test_utils")]
pub(crate) mod test_utils;
#[cfg(feature = "test_utils")]
pub use test_utils::TestRoot;
