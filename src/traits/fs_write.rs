//! Write operations for storage backends.

use std::io::Read;
use std::path::Path;

use crate::{Config, FsError};

/// Write operations for a storage backend.
///
/// These are the destructive calls a garbage layer intercepts.
///
/// # Object Safety
///
/// This trait is object-safe and can be used as `dyn FsWrite`.
pub trait FsWrite: Send + Sync {
    /// Write data to a file (creates if not exists, overwrites if exists).
    ///
    /// Missing parent directories are created implicitly.
    ///
    /// # Errors
    ///
    /// - [`FsError::UnableToWriteFile`] if the write fails
    fn write(&self, path: &Path, contents: &[u8], config: &Config) -> Result<(), FsError>;

    /// Write the full contents of a reader to a file.
    ///
    /// # Errors
    ///
    /// - [`FsError::UnableToWriteFile`] if reading the stream or writing fails
    fn write_stream(
        &self,
        path: &Path,
        contents: &mut dyn Read,
        config: &Config,
    ) -> Result<(), FsError>;

    /// Delete a file. Deleting a missing file is not an error.
    ///
    /// # Errors
    ///
    /// - [`FsError::UnableToDeleteFile`] if the file exists but cannot be removed
    fn delete(&self, path: &Path) -> Result<(), FsError>;

    /// Move a file, overwriting the destination.
    ///
    /// # Errors
    ///
    /// - [`FsError::UnableToMoveFile`] if the source is missing or the move fails
    fn move_file(&self, source: &Path, destination: &Path, config: &Config)
    -> Result<(), FsError>;

    /// Copy a file, overwriting the destination.
    ///
    /// # Errors
    ///
    /// - [`FsError::UnableToCopyFile`] if the source is missing or the copy fails
    fn copy(&self, source: &Path, destination: &Path, config: &Config) -> Result<(), FsError>;
}
