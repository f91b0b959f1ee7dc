//! Error types for garbage-preserving filesystems.

use std::path::PathBuf;

/// Filesystem error type with contextual variants.
///
/// Every variant names the operation that failed and carries the path(s)
/// involved. Backends report their own failures through the same type, so the
/// decorator can pass them through unchanged.
///
/// # Examples
///
/// ```rust
/// use garbage_fs::FsError;
/// use std::path::PathBuf;
///
/// let err = FsError::UnableToReadFile {
///     path: PathBuf::from("missing.txt"),
///     reason: "file does not exist".into(),
/// };
/// assert_eq!(
///     err.to_string(),
///     "unable to read file from location: missing.txt. file does not exist"
/// );
/// ```
#[non_exhaustive]
#[derive(Debug, thiserror::Error)]
pub enum FsError {
    // Construction Errors
    /// The decorator was configured with an unusable value.
    #[error("invalid configuration: {reason}")]
    InvalidConfiguration {
        /// Why the configuration was rejected.
        reason: String,
    },

    // Path/File Errors
    /// Existence of a file or directory could not be determined.
    #[error("unable to check existence of {path}: {reason}")]
    UnableToCheckExistence {
        /// The path that was checked.
        path: PathBuf,
        /// Backend-provided reason.
        reason: String,
    },

    /// A file could not be read.
    #[error("unable to read file from location: {path}. {reason}")]
    UnableToReadFile {
        /// The file that could not be read.
        path: PathBuf,
        /// Backend-provided reason.
        reason: String,
    },

    /// A file could not be written.
    #[error("unable to write file at location: {path}. {reason}")]
    UnableToWriteFile {
        /// The file that could not be written.
        path: PathBuf,
        /// Backend-provided reason.
        reason: String,
    },

    /// A file could not be deleted.
    #[error("unable to delete file located at: {path}. {reason}")]
    UnableToDeleteFile {
        /// The file that could not be deleted.
        path: PathBuf,
        /// Backend-provided reason.
        reason: String,
    },

    /// A directory could not be deleted.
    #[error("unable to delete directory located at: {path}. {reason}")]
    UnableToDeleteDirectory {
        /// The directory that could not be deleted.
        path: PathBuf,
        /// Backend-provided reason.
        reason: String,
    },

    /// A directory could not be created.
    #[error("unable to create directory at location: {path}. {reason}")]
    UnableToCreateDirectory {
        /// The directory that could not be created.
        path: PathBuf,
        /// Backend-provided reason.
        reason: String,
    },

    /// A file could not be moved.
    ///
    /// `previous` holds the lower-level failure when the move was built from
    /// other operations (e.g. copy-then-preserve).
    #[error("unable to move file from {from} to {to}. {reason}")]
    UnableToMoveFile {
        /// Source of the move.
        from: PathBuf,
        /// Destination of the move.
        to: PathBuf,
        /// Backend-provided reason.
        reason: String,
        /// The failure that caused the move to fail, if any.
        #[source]
        previous: Option<Box<FsError>>,
    },

    /// A file could not be copied.
    #[error("unable to copy file from {from} to {to}. {reason}")]
    UnableToCopyFile {
        /// Source of the copy.
        from: PathBuf,
        /// Destination of the copy.
        to: PathBuf,
        /// Backend-provided reason.
        reason: String,
    },

    /// Visibility could not be set.
    #[error("unable to set visibility for file {path}. {reason}")]
    UnableToSetVisibility {
        /// The path whose visibility was being set.
        path: PathBuf,
        /// Backend-provided reason.
        reason: String,
    },

    /// Metadata (visibility, mime type, size, last modified) is unavailable.
    #[error("unable to retrieve the {metadata_type} for file at location: {path}. {reason}")]
    UnableToRetrieveMetadata {
        /// The path whose metadata was requested.
        path: PathBuf,
        /// Which metadata field was requested.
        metadata_type: &'static str,
        /// Backend-provided reason.
        reason: String,
    },

    /// Directory contents could not be listed.
    #[error("unable to list contents of {path}. {reason}")]
    UnableToListContents {
        /// The directory being listed.
        path: PathBuf,
        /// Backend-provided reason.
        reason: String,
    },

    // Optional Capability Errors
    /// A public URL could not be generated.
    #[error("unable to generate public url for {path}: {reason}")]
    UnableToGeneratePublicUrl {
        /// The path the URL was requested for.
        path: PathBuf,
        /// Why generation failed.
        reason: String,
    },

    /// A temporary URL could not be generated.
    #[error("unable to generate temporary url for {path}: {reason}")]
    UnableToGenerateTemporaryUrl {
        /// The path the URL was requested for.
        path: PathBuf,
        /// Why generation failed.
        reason: String,
    },

    /// A checksum could not be provided.
    #[error("unable to get checksum for {path}: {reason}")]
    UnableToProvideChecksum {
        /// The path the checksum was requested for.
        path: PathBuf,
        /// Why the checksum is unavailable.
        reason: String,
    },

    /// Serialization error.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// Deserialization error.
    #[error("deserialization error: {0}")]
    Deserialization(String),
}

impl FsError {
    /// Build a move failure from the two locations and a reason.
    pub fn move_failed(
        from: impl Into<PathBuf>,
        to: impl Into<PathBuf>,
        reason: impl Into<String>,
    ) -> Self {
        FsError::UnableToMoveFile {
            from: from.into(),
            to: to.into(),
            reason: reason.into(),
            previous: None,
        }
    }

    /// Build a copy failure from the two locations and a reason.
    pub fn copy_failed(
        from: impl Into<PathBuf>,
        to: impl Into<PathBuf>,
        reason: impl Into<String>,
    ) -> Self {
        FsError::UnableToCopyFile {
            from: from.into(),
            to: to.into(),
            reason: reason.into(),
        }
    }

    /// Returns `true` for metadata retrieval failures.
    #[inline]
    pub fn is_metadata_unavailable(&self) -> bool {
        matches!(self, FsError::UnableToRetrieveMetadata { .. })
    }
}
