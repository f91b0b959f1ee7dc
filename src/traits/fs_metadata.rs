//! Metadata operations for storage backends.

use std::path::Path;

use crate::{FileAttributes, FsError, Visibility};

/// Metadata access for a storage backend.
///
/// Each getter returns [`FileAttributes`] with at least the requested field
/// populated.
pub trait FsMetadata: Send + Sync {
    /// Set the visibility of a file.
    ///
    /// # Errors
    ///
    /// - [`FsError::UnableToSetVisibility`] if the file is missing or the backend refuses
    fn set_visibility(&self, path: &Path, visibility: &Visibility) -> Result<(), FsError>;

    /// Get the visibility of a file.
    ///
    /// # Errors
    ///
    /// - [`FsError::UnableToRetrieveMetadata`] if visibility is unknown or unsupported
    fn visibility(&self, path: &Path) -> Result<FileAttributes, FsError>;

    /// Get the mime type of a file.
    ///
    /// # Errors
    ///
    /// - [`FsError::UnableToRetrieveMetadata`] if the mime type cannot be determined
    fn mime_type(&self, path: &Path) -> Result<FileAttributes, FsError>;

    /// Get the last modification time of a file.
    ///
    /// # Errors
    ///
    /// - [`FsError::UnableToRetrieveMetadata`] if the file is missing
    fn last_modified(&self, path: &Path) -> Result<FileAttributes, FsError>;

    /// Get the size of a file.
    ///
    /// # Errors
    ///
    /// - [`FsError::UnableToRetrieveMetadata`] if the file is missing
    fn file_size(&self, path: &Path) -> Result<FileAttributes, FsError>;
}
