use std::path::Path as StdPath;

use log::debug;
#[cfg(feature = "json_schema")]
use schemars::JsonSchema;
use serde::Deserialize;
use serde::Serialize;
use serde_json::ser::PrettyFormatter;

use crate::DocumentEntry;
use crate::Error;

const INDENT: &[u8] = b"    ";

/// Checks that `name` is a dotted path of JavaScript identifiers, e.g.
/// `window.initialDocuments`.
pub(crate) fn validate_global_name(name: &str) -> Result<(), Error> {
    let valid = !name.is_empty()
        && name.split('.').all(|ident| {
            let mut chars = ident.chars();
            chars
                .next()
                .is_some_and(|c| c.is_alphabetic() || c == '_' || c == '$')
                && chars.all(|c| c.is_alphanumeric() || c == '_' || c == '$')
        });
    if valid {
        Ok(())
    } else {
        Err(Error::InvalidArgument(format!(
            "Invalid global name: {name:?}"
        )))
    }
}

/// The list of documents handed to the viewer, together with the global it
/// is published under.
#[cfg_attr(feature = "json_schema", derive(JsonSchema))]
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Hash, Eq)]
pub struct Manifest {
    /// Dotted name of the global the entries are assigned to.
    pub global_name: String,
    /// The documents, in the order they are displayed.
    pub entries: Vec<DocumentEntry>,
}

impl Manifest {
    /// Creates a manifest, rejecting global names that are not valid
    /// JavaScript member paths.
    pub fn new(global_name: &str, entries: Vec<DocumentEntry>) -> Result<Self, Error> {
        validate_global_name(global_name)?;
        Ok(Self {
            global_name: global_name.to_owned(),
            entries,
        })
    }

    /// Renders the manifest as a single `<global> = <json>;` statement.
    ///
    /// The array is pretty printed with four space indentation. There is no
    /// trailing newline.
    pub fn render(&self) -> Result<String, Error> {
        let mut buf = Vec::new();
        let mut serializer =
            serde_json::Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(INDENT));
        self.entries
            .serialize(&mut serializer)
            .map_err(|e| Error::Serialize {
                what: "document entries".into(),
                how: e.to_string(),
            })?;
        let json = String::from_utf8(buf).map_err(|e| Error::Serialize {
            what: "document entries".into(),
            how: e.to_string(),
        })?;
        Ok(format!("{} = {};", self.global_name, json))
    }

    /// Renders the manifest and replaces `path` with it.
    ///
    /// Rendering happens before the file is opened, so a failed render
    /// leaves any previous manifest untouched.
    pub fn write_to<P: AsRef<StdPath>>(&self, path: P) -> Result<(), Error> {
        let path = path.as_ref();
        let contents = self.render()?;
        std::fs::write(path, contents).map_err(|e| Error::Write {
            what: path.display().to_string(),
            how: e.to_string(),
        })?;
        debug!(
            "Wrote {} documents to {}",
            self.entries.len(),
            path.display()
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use tempdir::TempDir;

    use super::*;

    fn entry(name: &str) -> DocumentEntry {
        DocumentEntry {
            name: name.into(),
            size: "1.00 KB".into(),
            date: "03/07/2024".into(),
            url: format!("DOCS_PDF/{name}"),
        }
    }

    #[test]
    fn empty_manifest() {
        let manifest = Manifest::new("window.initialDocuments", vec![]).unwrap();
        assert_eq!(manifest.render().unwrap(), "window.initialDocuments = [];");
    }

    #[test]
    fn renders_with_four_space_indent() {
        let manifest =
            Manifest::new("window.initialDocuments", vec![entry("a.pdf"), entry("B.PDF")])
                .unwrap();
        let expected = r#"window.initialDocuments = [
    {
        "name": "a.pdf",
        "size": "1.00 KB",
        "date": "03/07/2024",
        "url": "DOCS_PDF/a.pdf"
    },
    {
        "name": "B.PDF",
        "size": "1.00 KB",
        "date": "03/07/2024",
        "url": "DOCS_PDF/B.PDF"
    }
];"#;
        assert_eq!(manifest.render().unwrap(), expected);
    }

    #[test]
    fn escapes_quotes_in_names() {
        let manifest = Manifest::new("docs", vec![entry("say \"hi\".pdf")]).unwrap();
        let rendered = manifest.render().unwrap();
        assert!(rendered.contains(r#""name": "say \"hi\".pdf""#));
    }

    #[test]
    fn global_name_validation() {
        assert!(Manifest::new("docs", vec![]).is_ok());
        assert!(Manifest::new("$app._docs2", vec![]).is_ok());
        assert!(Manifest::new("", vec![]).is_err());
        assert!(Manifest::new("window.", vec![]).is_err());
        assert!(Manifest::new("2docs", vec![]).is_err());
        assert!(Manifest::new("a = 1; b", vec![]).is_err());
    }

    #[test]
    fn write_replaces_previous_contents() {
        let root = TempDir::new("manifest").unwrap();
        let path = root.path().join("data.js");
        Manifest::new("docs", vec![entry("old.pdf"), entry("older.pdf")])
            .unwrap()
            .write_to(&path)
            .unwrap();
        Manifest::new("docs", vec![]).unwrap().write_to(&path).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "docs = [];");
    }

    #[test]
    fn write_into_missing_directory_fails() {
        let root = TempDir::new("manifest").unwrap();
        let path = root.path().join("missing").join("data.js");
        let err = Manifest::new("docs", vec![]).unwrap().write_to(&path).unwrap_err();
        assert!(matches!(err, Error::Write { .. }));
    }
}
