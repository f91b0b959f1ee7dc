//! Directory operations for storage backends.

use std::path::Path;

use crate::{Config, FsError, StorageAttributes};

/// Directory operations for a storage backend.
///
/// # Object Safety
///
/// This trait is object-safe and can be used as `dyn FsDir`.
pub trait FsDir: Send + Sync {
    /// List the contents of a directory.
    ///
    /// With `deep` set, entries of all nested directories are included.
    /// Listing a missing directory yields no entries.
    ///
    /// # Errors
    ///
    /// - [`FsError::UnableToListContents`] if the listing cannot be started
    fn list_contents(&self, path: &Path, deep: bool) -> Result<ListContents, FsError>;

    /// Create a directory and all of its parents.
    ///
    /// # Errors
    ///
    /// - [`FsError::UnableToCreateDirectory`] if creation fails
    fn create_directory(&self, path: &Path, config: &Config) -> Result<(), FsError>;

    /// Delete a directory and everything below it.
    ///
    /// # Errors
    ///
    /// - [`FsError::UnableToDeleteDirectory`] if deletion fails
    fn delete_directory(&self, path: &Path) -> Result<(), FsError>;
}

/// Iterator over listed entries.
///
/// - Outer `Result` (from [`FsDir::list_contents`]) = "can I list this directory?"
/// - Inner `Result` (per item) = "can I read this entry?"
///
/// # Example
///
/// ```rust
/// use garbage_fs::{Fs, FsError};
/// use std::path::Path;
///
/// fn list_names<B: Fs>(backend: &B) -> Result<Vec<String>, FsError> {
///     let mut names = Vec::new();
///     for entry in backend.list_contents(Path::new(""), false)? {
///         names.push(entry?.path().display().to_string());
///     }
///     Ok(names)
/// }
/// ```
pub struct ListContents(Box<dyn Iterator<Item = Result<StorageAttributes, FsError>> + Send + 'static>);

impl ListContents {
    /// Create from any compatible iterator.
    pub fn new<I>(iter: I) -> Self
    where
        I: Iterator<Item = Result<StorageAttributes, FsError>> + Send + 'static,
    {
        Self(Box::new(iter))
    }

    /// Create from a pre-collected vector.
    pub fn from_vec(entries: Vec<Result<StorageAttributes, FsError>>) -> Self {
        Self(Box::new(entries.into_iter()))
    }

    /// Collect all entries, short-circuiting on first error.
    pub fn collect_all(self) -> Result<Vec<StorageAttributes>, FsError> {
        self.collect()
    }
}

impl Iterator for ListContents {
    type Item = Result<StorageAttributes, FsError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.0.next()
    }
}
