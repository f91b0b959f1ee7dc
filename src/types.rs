//! Core types for garbage-preserving filesystems.

use std::fmt;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};

/// Visibility of a stored object.
///
/// Visibility is backend-defined. The well-known values are `"public"` and
/// `"private"`, but any non-empty string is accepted and carried verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Visibility(String);

impl Visibility {
    /// Publicly readable.
    pub const PUBLIC: &'static str = "public";
    /// Readable by the owner only.
    pub const PRIVATE: &'static str = "private";

    /// Create a visibility from any backend-defined value.
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// The `"public"` visibility.
    pub fn public() -> Self {
        Self::new(Self::PUBLIC)
    }

    /// The `"private"` visibility.
    pub fn private() -> Self {
        Self::new(Self::PRIVATE)
    }

    /// The raw value.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns `true` if no value is set.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for Visibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Visibility {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// Type of a storage entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FileType {
    /// Regular file.
    File,
    /// Directory.
    Directory,
}

/// Attributes of a file.
///
/// Metadata getters fill in the field they were asked for; other fields may
/// be `None` when the backend did not load them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FileAttributes {
    /// Path of the file.
    pub path: PathBuf,
    /// Size in bytes.
    pub file_size: Option<u64>,
    /// Visibility.
    pub visibility: Option<Visibility>,
    /// Last modification time.
    pub last_modified: Option<DateTime<Utc>>,
    /// Mime type.
    pub mime_type: Option<String>,
}

impl FileAttributes {
    /// Attributes with only the path set.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            ..Self::default()
        }
    }

    /// Set the size.
    pub fn with_file_size(mut self, size: u64) -> Self {
        self.file_size = Some(size);
        self
    }

    /// Set the visibility.
    pub fn with_visibility(mut self, visibility: Visibility) -> Self {
        self.visibility = Some(visibility);
        self
    }

    /// Set the last modification time.
    pub fn with_last_modified(mut self, last_modified: DateTime<Utc>) -> Self {
        self.last_modified = Some(last_modified);
        self
    }

    /// Set the mime type.
    pub fn with_mime_type(mut self, mime_type: impl Into<String>) -> Self {
        self.mime_type = Some(mime_type.into());
        self
    }
}

/// Attributes of a directory.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DirectoryAttributes {
    /// Path of the directory.
    pub path: PathBuf,
    /// Visibility, if the backend tracks it for directories.
    pub visibility: Option<Visibility>,
    /// Last modification time.
    pub last_modified: Option<DateTime<Utc>>,
}

impl DirectoryAttributes {
    /// Attributes with only the path set.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            ..Self::default()
        }
    }
}

/// A single entry returned from `list_contents`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StorageAttributes {
    /// A file entry.
    File(FileAttributes),
    /// A directory entry.
    Directory(DirectoryAttributes),
}

impl StorageAttributes {
    /// Full path of the entry.
    pub fn path(&self) -> &Path {
        match self {
            StorageAttributes::File(f) => &f.path,
            StorageAttributes::Directory(d) => &d.path,
        }
    }

    /// Type of the entry.
    pub fn file_type(&self) -> FileType {
        match self {
            StorageAttributes::File(_) => FileType::File,
            StorageAttributes::Directory(_) => FileType::Directory,
        }
    }

    /// Returns `true` if this is a file.
    #[inline]
    pub fn is_file(&self) -> bool {
        self.file_type() == FileType::File
    }

    /// Returns `true` if this is a directory.
    #[inline]
    pub fn is_dir(&self) -> bool {
        self.file_type() == FileType::Directory
    }
}
