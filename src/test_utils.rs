use std::fs;
use std::fs::File;
use std::fs::create_dir_all;
use std::path::Path as StdPath;
use std::path::PathBuf;
use std::time::Duration;
use std::time::SystemTime;

use tempdir::TempDir;

use crate::Error;
use crate::ManifestConfig;
use crate::config::DEFAULT_OUTPUT_FILE;
use crate::config::DEFAULT_SOURCE_DIR;

/// Utility structure for managing a temporary document directory and the
/// manifest written next to it.
///
/// The layout mirrors a real deployment: `<root>/DOCS_PDF/` holds the
/// documents and `<root>/data.js` receives the manifest.
#[derive(Debug)]
pub struct TestRoot {
    /// Root of the temporary test directory.
    pub root: TempDir,
}

impl TestRoot {
    /// Creates a new `TestRoot` with an empty source directory.
    pub fn new() -> Result<Self, Error> {
        let ret = Self::without_source_dir()?;
        create_dir_all(ret.source_dir()).map_err(|e| Error::Create {
            what: format!("directory {}", ret.source_dir().display()),
            how: e.to_string(),
        })?;
        Ok(ret)
    }

    /// Creates a new `TestRoot` whose source directory does not exist yet.
    pub fn without_source_dir() -> Result<Self, Error> {
        let root = TempDir::new("docmanifest").map_err(|e| Error::Create {
            what: "temporary directory".into(),
            how: e.to_string(),
        })?;
        Ok(Self { root })
    }

    /// Root of the temporary directory.
    pub fn path(&self) -> &StdPath {
        self.root.path()
    }

    /// Directory the documents live in.
    pub fn source_dir(&self) -> PathBuf {
        self.root.path().join(DEFAULT_SOURCE_DIR)
    }

    /// File the manifest is written to.
    pub fn output_file(&self) -> PathBuf {
        self.root.path().join(DEFAULT_OUTPUT_FILE)
    }

    /// Default configuration pointed at this root.
    pub fn config(&self) -> ManifestConfig {
        ManifestConfig::default()
            .with_source_dir(self.source_dir())
            .with_output_file(self.output_file())
    }

    /// Creates a file of `size` zero bytes under the source directory whose
    /// modification time is `mtime_secs` seconds after the epoch.
    pub fn create_file(
        &self,
        relative_path: &str,
        size: u64,
        mtime_secs: u64,
    ) -> Result<PathBuf, Error> {
        let full_path = self.source_dir().join(relative_path);
        if let Some(parent) = full_path.parent() {
            create_dir_all(parent).map_err(|e| Error::Create {
                what: format!("directory {}", parent.display()),
                how: e.to_string(),
            })?;
        }
        let write_err = |e: std::io::Error| Error::Write {
            what: full_path.display().to_string(),
            how: e.to_string(),
        };
        let file = File::create(&full_path).map_err(write_err)?;
        file.set_len(size).map_err(write_err)?;
        file.set_modified(SystemTime::UNIX_EPOCH + Duration::from_secs(mtime_secs))
            .map_err(write_err)?;
        Ok(full_path)
    }

    /// Creates a directory under the source directory.
    pub fn create_dir(&self, relative_path: &str) -> Result<PathBuf, Error> {
        let full_path = self.source_dir().join(relative_path);
        create_dir_all(&full_path).map_err(|e| Error::Create {
            what: format!("directory {}", full_path.display()),
            how: e.to_string(),
        })?;
        Ok(full_path)
    }

    /// Removes a file from the source directory.
    pub fn remove_file(&self, relative_path: &str) -> Result<(), Error> {
        let full_path = self.source_dir().join(relative_path);
        fs::remove_file(&full_path).map_err(|e| Error::Write {
            what: full_path.display().to_string(),
            how: e.to_string(),
        })
    }

    /// Reads back the manifest file.
    pub fn read_output(&self) -> Result<String, Error> {
        fs::read_to_string(self.output_file()).map_err(|e| Error::Read {
            what: self.output_file().display().to_string(),
            how: e.to_string(),
        })
    }
}
