use std::fmt::Display;
use std::path::PathBuf;

use chrono::TimeZone;
use log::debug;
use log::warn;
use serde::Deserialize;
use serde::Serialize;

use crate::DocumentEntry;
use crate::Error;
use crate::FileStat;
use crate::Manifest;
use crate::UrlPath;
use crate::config::EntryOrder;
use crate::config::ManifestConfig;
use crate::filter::FilterLevel;
use crate::filter::FilterSet;
use crate::manifest::validate_global_name;

/// A document found by [`DocScanner::enumerate`], before formatting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScannedFile {
    /// Access path of the document, ending in its file name.
    pub url: UrlPath,
    /// Raw size and modification time.
    pub stats: FileStat,
}

/// Summary of one completed scan.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ScanReport {
    /// Whether the source directory was missing and had to be created.
    pub created_source_dir: bool,
    /// Number of documents written to the manifest.
    pub documents: usize,
    /// The manifest file that was written.
    pub output: PathBuf,
}

/// Turns a directory of documents into a manifest file.
#[derive(Debug, Clone)]
pub struct DocScanner {
    config: ManifestConfig,
    filter_set: FilterSet,
    url_prefix: UrlPath,
}

impl DocScanner {
    /// Creates a scanner, validating the extensions, url prefix and global
    /// name of `config` up front.
    pub fn new(config: ManifestConfig) -> Result<Self, Error> {
        let filter_set = FilterSet::create_with(&config.extensions)?;
        let url_prefix = UrlPath::parse(&config.url_prefix)?;
        validate_global_name(&config.global_name)?;
        Ok(Self {
            config,
            filter_set,
            url_prefix,
        })
    }

    /// The configuration this scanner was built with.
    pub fn config(&self) -> &ManifestConfig {
        &self.config
    }

    /// Creates the source directory, including parents, if it is missing.
    ///
    /// Returns `true` if the directory had to be created.
    pub fn ensure_source_dir(&self) -> Result<bool, Error> {
        let dir = &self.config.source_dir;
        if dir.exists() {
            return Ok(false);
        }
        std::fs::create_dir_all(dir).map_err(|e| Error::Create {
            what: format!("directory {}", dir.display()),
            how: e.to_string(),
        })?;
        debug!("Created missing directory {}", dir.display());
        Ok(true)
    }

    /// Lists the documents directly inside the source directory.
    ///
    /// Subdirectories, symlinks and files with other extensions are skipped.
    /// The result is in filesystem listing order. Any error while listing or
    /// reading a document's metadata aborts the whole enumeration.
    pub fn enumerate(&self) -> Result<Vec<ScannedFile>, Error> {
        let dir = &self.config.source_dir;
        let read_err = |e: std::io::Error| Error::Read {
            what: dir.display().to_string(),
            how: e.to_string(),
        };

        let mut ret = Vec::new();
        for entry in std::fs::read_dir(dir).map_err(read_err)? {
            let entry = entry.map_err(read_err)?;
            let Some(name) = entry.file_name().to_str().map(str::to_owned) else {
                warn!(
                    "Skipping {}: file name is not valid UTF-8",
                    entry.path().display()
                );
                continue;
            };
            // DirEntry::metadata does not traverse symlinks.
            let metadata = entry.metadata().map_err(|e| Error::Read {
                what: format!("metadata of {}", entry.path().display()),
                how: e.to_string(),
            })?;
            if self.filter_set.matches(&name, metadata.is_file()) == FilterLevel::Deny {
                debug!("Skipping {name}");
                continue;
            }
            ret.push(ScannedFile {
                url: self.url_prefix.join_file_name(&name)?,
                stats: FileStat::from_metadata(&entry.path(), &metadata)?,
            });
        }
        Ok(ret)
    }

    /// Builds the manifest for the current contents of the source directory,
    /// with dates rendered in `tz`. Nothing is written.
    pub fn build_manifest<Tz>(&self, tz: &Tz) -> Result<Manifest, Error>
    where
        Tz: TimeZone,
        Tz::Offset: Display,
    {
        let mut files = self.enumerate()?;
        if self.config.order == EntryOrder::NewestFirst {
            files.sort_by(|a, b| b.stats.modified.cmp(&a.stats.modified));
        }
        let entries = files
            .iter()
            .map(|file| DocumentEntry::from_stat(&file.url, &file.stats, tz))
            .collect();
        Manifest::new(&self.config.global_name, entries)
    }

    /// Runs a full scan: ensures the source directory, enumerates it and
    /// overwrites the manifest file.
    pub fn scan<Tz>(&self, tz: &Tz) -> Result<ScanReport, Error>
    where
        Tz: TimeZone,
        Tz::Offset: Display,
    {
        let created_source_dir = self.ensure_source_dir()?;
        let manifest = self.build_manifest(tz)?;
        manifest.write_to(&self.config.output_file)?;
        Ok(ScanReport {
            created_source_dir,
            documents: manifest.entries.len(),
            output: self.config.output_file.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;
    use crate::TestRoot;

    const MARCH_7_2024: u64 = 1_709_812_800;
    const JAN_1_2020: u64 = 1_577_836_800;

    fn scanner(root: &TestRoot) -> DocScanner {
        DocScanner::new(root.config()).unwrap()
    }

    fn names(manifest: &Manifest) -> Vec<&str> {
        let mut names: Vec<&str> = manifest.entries.iter().map(|e| e.name.as_str()).collect();
        names.sort();
        names
    }

    #[test]
    fn rejects_invalid_config() {
        let config = ManifestConfig::default();
        assert!(DocScanner::new(config.clone().with_extensions(&[""])).is_err());
        assert!(DocScanner::new(config.clone().with_url_prefix("../up")).is_err());
        assert!(DocScanner::new(config.with_global_name("not valid")).is_err());
    }

    #[test]
    fn filters_by_extension_any_case() {
        let root = TestRoot::new().unwrap();
        root.create_file("annual.pdf", 10, MARCH_7_2024).unwrap();
        root.create_file("REPORT.PDF", 10, MARCH_7_2024).unwrap();
        root.create_file("notes.txt", 10, MARCH_7_2024).unwrap();
        root.create_file("pdf", 10, MARCH_7_2024).unwrap();

        let manifest = scanner(&root).build_manifest(&Utc).unwrap();
        assert_eq!(names(&manifest), vec!["REPORT.PDF", "annual.pdf"]);
    }

    #[cfg(unix)]
    #[test]
    fn backslash_is_part_of_the_file_name() {
        let root = TestRoot::new().unwrap();
        root.create_file("a\\b.pdf", 10, MARCH_7_2024).unwrap();
        root.create_file("ok.pdf", 10, MARCH_7_2024).unwrap();

        let report = scanner(&root).scan(&Utc).unwrap();
        assert_eq!(report.documents, 2);
        let output = root.read_output().unwrap();
        assert!(output.contains(r#""url": "DOCS_PDF/a\\b.pdf""#));
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn skips_names_that_are_not_utf8() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let root = TestRoot::new().unwrap();
        std::fs::write(
            root.source_dir().join(OsStr::from_bytes(b"bad\xff.pdf")),
            b"%PDF",
        )
        .unwrap();
        root.create_file("good.pdf", 10, MARCH_7_2024).unwrap();

        let manifest = scanner(&root).build_manifest(&Utc).unwrap();
        assert_eq!(names(&manifest), vec!["good.pdf"]);
    }

    #[test]
    fn ensure_then_scan_creates_the_directory_once() {
        let root = TestRoot::without_source_dir().unwrap();
        let scanner = scanner(&root);

        assert!(scanner.ensure_source_dir().unwrap());
        let report = scanner.scan(&Utc).unwrap();
        assert!(!report.created_source_dir);
        assert_eq!(root.read_output().unwrap(), "window.initialDocuments = [];");
    }

    #[test]
    fn skips_directories_and_is_not_recursive() {
        let root = TestRoot::new().unwrap();
        root.create_dir("folder.pdf").unwrap();
        root.create_file("folder.pdf/inner.pdf", 10, MARCH_7_2024)
            .unwrap();
        root.create_file("top.pdf", 10, MARCH_7_2024).unwrap();

        let manifest = scanner(&root).build_manifest(&Utc).unwrap();
        assert_eq!(names(&manifest), vec!["top.pdf"]);
    }

    #[cfg(unix)]
    #[test]
    fn skips_symlinks() {
        let root = TestRoot::new().unwrap();
        root.create_file("real.pdf", 10, MARCH_7_2024).unwrap();
        std::os::unix::fs::symlink(
            root.source_dir().join("real.pdf"),
            root.source_dir().join("link.pdf"),
        )
        .unwrap();

        let manifest = scanner(&root).build_manifest(&Utc).unwrap();
        assert_eq!(names(&manifest), vec!["real.pdf"]);
    }

    #[test]
    fn entries_carry_formatted_metadata() {
        let root = TestRoot::new().unwrap();
        root.create_file("paper.pdf", 1536, MARCH_7_2024).unwrap();

        let manifest = scanner(&root).build_manifest(&Utc).unwrap();
        assert_eq!(
            manifest.entries,
            vec![DocumentEntry {
                name: "paper.pdf".into(),
                size: "1.50 KB".into(),
                date: "03/07/2024".into(),
                url: "DOCS_PDF/paper.pdf".into(),
            }]
        );
    }

    #[test]
    fn newest_first_sorts_by_timestamp() {
        let root = TestRoot::new().unwrap();
        root.create_file("old.pdf", 1, JAN_1_2020).unwrap();
        root.create_file("new.pdf", 1, MARCH_7_2024).unwrap();
        root.create_file("newest.pdf", 1, MARCH_7_2024 + 60).unwrap();

        let config = root.config().with_order(EntryOrder::NewestFirst);
        let manifest = DocScanner::new(config).unwrap().build_manifest(&Utc).unwrap();
        let ordered: Vec<&str> = manifest.entries.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(ordered, vec!["newest.pdf", "new.pdf", "old.pdf"]);
    }

    #[test]
    fn scan_of_empty_directory() {
        let root = TestRoot::new().unwrap();

        let report = scanner(&root).scan(&Utc).unwrap();
        assert_eq!(
            report,
            ScanReport {
                created_source_dir: false,
                documents: 0,
                output: root.output_file(),
            }
        );
        assert_eq!(root.read_output().unwrap(), "window.initialDocuments = [];");
    }

    #[test]
    fn scan_creates_missing_directory() {
        let root = TestRoot::without_source_dir().unwrap();
        assert!(!root.source_dir().exists());

        let report = scanner(&root).scan(&Utc).unwrap();
        assert!(report.created_source_dir);
        assert_eq!(report.documents, 0);
        assert!(root.source_dir().is_dir());
        assert_eq!(root.read_output().unwrap(), "window.initialDocuments = [];");

        let report = scanner(&root).scan(&Utc).unwrap();
        assert!(!report.created_source_dir);
    }

    #[test]
    fn second_scan_overwrites_stale_entries() {
        let root = TestRoot::new().unwrap();
        root.create_file("first.pdf", 10, MARCH_7_2024).unwrap();
        root.create_file("second.pdf", 10, MARCH_7_2024).unwrap();
        let scanner = scanner(&root);
        assert_eq!(scanner.scan(&Utc).unwrap().documents, 2);

        root.remove_file("first.pdf").unwrap();
        assert_eq!(scanner.scan(&Utc).unwrap().documents, 1);
        let output = root.read_output().unwrap();
        assert!(!output.contains("first.pdf"));
        assert!(output.contains("DOCS_PDF/second.pdf"));
    }

    #[test]
    fn output_is_a_single_assignment() {
        let root = TestRoot::new().unwrap();
        root.create_file("a.pdf", 2048, MARCH_7_2024).unwrap();
        scanner(&root).scan(&Utc).unwrap();

        let output = root.read_output().unwrap();
        let json = output
            .strip_prefix("window.initialDocuments = ")
            .and_then(|s| s.strip_suffix(';'))
            .unwrap();
        let entries: Vec<DocumentEntry> = serde_json::from_str(json).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].size, "2.00 KB");
    }

    #[test]
    fn unwritable_output_fails_the_scan() {
        let root = TestRoot::new().unwrap();
        root.create_file("a.pdf", 1, MARCH_7_2024).unwrap();
        let config = root
            .config()
            .with_output_file(root.path().join("no_such_dir").join("data.js"));

        let err = DocScanner::new(config).unwrap().scan(&Utc).unwrap_err();
        assert!(matches!(err, Error::Write { .. }));
    }

    #[test]
    fn source_dir_that_is_a_file_fails_the_scan() {
        let root = TestRoot::without_source_dir().unwrap();
        std::fs::write(root.source_dir(), b"not a dir").unwrap();

        let err = scanner(&root).scan(&Utc).unwrap_err();
        assert!(matches!(err, Error::Read { .. }));
        assert!(!root.output_file().exists());
    }
}
