use std::fmt::Display;

#[cfg(feature = "json_schema")]
use schemars::JsonSchema;
use serde::Deserialize;
use serde::Deserializer;
use serde::Serialize;
use serde::de;

use crate::errors::Error;

/// A custom deserializer function for a Vec<String> that rejects components
/// a browser would resolve against the page location.
fn deserialize_components<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let components = Vec::<String>::deserialize(deserializer)?;
    for comp in &components {
        validate_file_name(comp).map_err(de::Error::custom)?;
    }
    Ok(components)
}

/// Rejects what can never be a single directory entry name.
fn validate_file_name(s: &str) -> Result<(), Error> {
    if s.contains('/') || s == "." || s == ".." || s.is_empty() {
        return Err(Error::InvalidArgument(format!("Invalid file name: {s:?}")));
    }
    Ok(())
}

/// Prefix components are configuration, so platform separators are refused
/// as well.
fn validate_component(s: &str) -> Result<(), Error> {
    if s.contains('\\') {
        return Err(Error::InvalidArgument(format!(
            "Invalid path component: {s:?}"
        )));
    }
    validate_file_name(s).map_err(|_| {
        Error::InvalidArgument(format!("Invalid path component: {s:?}"))
    })
}

/// A relative access path as the viewer sees it, e.g. `DOCS_PDF/report.pdf`.
///
/// The components are always joined with `/`, independent of the platform
/// the scan runs on.
#[cfg_attr(feature = "json_schema", derive(JsonSchema))]
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Hash, Eq)]
pub struct UrlPath {
    /// The components of the path as a vector of strings.
    #[serde(deserialize_with = "deserialize_components")]
    components: Vec<String>,
}

impl Display for UrlPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.components.join("/"))
    }
}

impl UrlPath {
    /// Creates empty path
    pub fn empty() -> Self {
        Self { components: vec![] }
    }

    /// Parses a `/` separated prefix such as `DOCS_PDF` or `static/docs`.
    ///
    /// Leading, trailing and repeated slashes are ignored. Backslashes, `.`
    /// and `..` are rejected.
    pub fn parse(prefix: &str) -> Result<Self, Error> {
        let components: Vec<&str> = prefix.split('/').filter(|c| !c.is_empty()).collect();
        Self::try_from(components.as_slice())
    }

    /// Returns the last component, typically the file name.
    pub fn basename(&self) -> Option<&str> {
        self.components.last().map(|s| s.as_str())
    }

    /// Appends a new component to the end of the path.
    pub fn push(&mut self, component: &str) -> Result<(), Error> {
        validate_component(component)?;
        self.components.push(component.to_owned());
        Ok(())
    }

    /// Returns a new path with `name` appended.
    pub fn join(&self, name: &str) -> Result<UrlPath, Error> {
        let mut ret = self.clone();
        ret.push(name)?;
        Ok(ret)
    }

    /// Returns a new path ending in the directory entry `name`.
    ///
    /// Unlike [`UrlPath::join`], backslashes are kept verbatim: on Unix they
    /// are ordinary characters of a file name.
    pub fn join_file_name(&self, name: &str) -> Result<UrlPath, Error> {
        validate_file_name(name)?;
        let mut ret = self.clone();
        ret.components.push(name.to_owned());
        Ok(ret)
    }
}

impl<T> TryFrom<&[T]> for UrlPath
where
    T: AsRef<str>,
{
    type Error = Error;

    /// Attempt to build a `UrlPath` from a slice of components.
    ///
    /// Each component is validated to not contain directory separators and to
    /// not equal `.` or `..`. Returns `Error::InvalidArgument` on invalid
    /// components.
    fn try_from(components: &[T]) -> std::result::Result<Self, Self::Error> {
        let mut ret = Self::empty();
        for comp in components {
            ret.push(comp.as_ref())?;
        }
        Ok(ret)
    }
}
