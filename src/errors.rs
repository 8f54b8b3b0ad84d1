use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

/// Represents all possible errors in the docmanifest crate.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq, Hash, Eq)]
pub enum Error {
    /// Error indicating a failure to read a directory listing or metadata.
    #[error("Failed to read {what}: {how}")]
    Read {
        /// The item that failed to be read.
        what: String,
        /// The reason for the failure.
        how: String,
    },

    /// Error indicating an invalid argument was provided.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Error indicating a failure to create a directory.
    #[error("Failed to create {what}: {how}")]
    Create {
        /// The item that failed to be created.
        what: String,
        /// The reason for the failure.
        how: String,
    },

    /// Error indicating a failure to write the manifest.
    #[error("Failed to write {what}: {how}")]
    Write {
        /// The item that failed to be written.
        what: String,
        /// The reason for the failure.
        how: String,
    },

    /// Error indicating that the entries could not be serialized.
    #[error("Failed to serialize {what}: {how}")]
    Serialize {
        /// The item that failed to be serialized.
        what: String,
        /// The reason for the failure.
        how: String,
    },
}
