//! Read operations for storage backends.

use std::io::Read;
use std::path::Path;

use crate::FsError;

/// Read operations for a storage backend.
///
/// # Thread Safety
///
/// All implementations must be `Send + Sync`. Methods use `&self` to allow
/// concurrent access. Backends should use interior mutability (`RwLock`, `Mutex`)
/// for thread-safe state management.
///
/// # Object Safety
///
/// This trait is object-safe and can be used as `dyn FsRead`.
pub trait FsRead: Send + Sync {
    /// Check if a file exists.
    ///
    /// Returns `Ok(false)` for directories and missing paths.
    ///
    /// # Errors
    ///
    /// - [`FsError::UnableToCheckExistence`] if the backend cannot tell
    fn file_exists(&self, path: &Path) -> Result<bool, FsError>;

    /// Check if a directory exists.
    ///
    /// # Errors
    ///
    /// - [`FsError::UnableToCheckExistence`] if the backend cannot tell
    fn directory_exists(&self, path: &Path) -> Result<bool, FsError>;

    /// Read entire file contents as bytes.
    ///
    /// # Errors
    ///
    /// - [`FsError::UnableToReadFile`] if the file is missing or unreadable
    fn read(&self, path: &Path) -> Result<Vec<u8>, FsError>;

    /// Open a file for reading, returning a boxed reader.
    ///
    /// # Errors
    ///
    /// - [`FsError::UnableToReadFile`] if the file is missing or unreadable
    fn read_stream(&self, path: &Path) -> Result<Box<dyn Read + Send>, FsError>;
}
