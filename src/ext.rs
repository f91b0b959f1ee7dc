//! # Extension Traits
//!
//! Convenience methods built from the core traits and blanket-implemented
//! for every [`Fs`] backend.
//!
//! | Method | Description |
//! |--------|-------------|
//! | [`files_under`](FsExt::files_under) | Paths of all files below a directory |
//! | [`read_to_string`](FsExt::read_to_string) | Read a file as UTF-8 |
//! | [`exists`](FsExt::exists) | File or directory exists |
//!
//! With the `serde` feature, [`FsExtJson`] adds `read_json` / `write_json`.

use std::path::{Path, PathBuf};

use crate::{Fs, FsError};

/// Extension methods for any storage backend.
pub trait FsExt: Fs {
    /// Paths of every file transitively below `path`.
    ///
    /// Directory entries are skipped. The listing is collected before it is
    /// returned, so callers may mutate the backend while walking the result.
    ///
    /// # Example
    ///
    /// ```rust
    /// use garbage_fs::{Config, FsExt, FsWrite, MemoryFs};
    /// use std::path::{Path, PathBuf};
    ///
    /// let fs = MemoryFs::new();
    /// fs.write(Path::new("dir/a.txt"), b"a", &Config::new()).unwrap();
    /// fs.write(Path::new("dir/sub/b.txt"), b"b", &Config::new()).unwrap();
    ///
    /// let mut files = fs.files_under(Path::new("dir")).unwrap();
    /// files.sort();
    /// assert_eq!(files, vec![PathBuf::from("dir/a.txt"), PathBuf::from("dir/sub/b.txt")]);
    /// ```
    fn files_under(&self, path: &Path) -> Result<Vec<PathBuf>, FsError> {
        let mut files = Vec::new();
        for entry in self.list_contents(path, true)? {
            let entry = entry?;
            if entry.is_file() {
                files.push(entry.path().to_path_buf());
            }
        }
        Ok(files)
    }

    /// Read a file as UTF-8 text.
    ///
    /// # Errors
    ///
    /// - Any error from [`read`](crate::FsRead::read)
    /// - [`FsError::UnableToReadFile`] if the contents are not valid UTF-8
    fn read_to_string(&self, path: &Path) -> Result<String, FsError> {
        let bytes = self.read(path)?;
        String::from_utf8(bytes).map_err(|_| FsError::UnableToReadFile {
            path: path.to_path_buf(),
            reason: "not valid UTF-8".into(),
        })
    }

    /// Returns `true` if a file or a directory exists at `path`.
    fn exists(&self, path: &Path) -> Result<bool, FsError> {
        Ok(self.file_exists(path)? || self.directory_exists(path)?)
    }
}

impl<B: Fs + ?Sized> FsExt for B {}

#[cfg(feature = "serde")]
mod json {
    use super::*;
    use crate::Config;
    use serde::{Serialize, de::DeserializeOwned};

    /// JSON serialization extension methods.
    ///
    /// Available when the `serde` feature is enabled.
    pub trait FsExtJson: Fs {
        /// Read a file and deserialize it as JSON.
        ///
        /// # Errors
        ///
        /// - `FsError::UnableToReadFile` if the file is missing or not UTF-8
        /// - `FsError::Deserialization` if JSON parsing fails
        fn read_json<T: DeserializeOwned>(&self, path: &Path) -> Result<T, FsError> {
            let data = self.read_to_string(path)?;
            serde_json::from_str(&data).map_err(|e| FsError::Deserialization(e.to_string()))
        }

        /// Serialize a value and write it as pretty-printed JSON.
        ///
        /// Goes through [`write`](crate::FsWrite::write), so a garbage layer
        /// preserves the previous document.
        fn write_json<T: Serialize>(
            &self,
            path: &Path,
            value: &T,
            config: &Config,
        ) -> Result<(), FsError> {
            let json = serde_json::to_string_pretty(value)
                .map_err(|e| FsError::Serialization(e.to_string()))?;
            self.write(path, json.as_bytes(), config)
        }
    }

    impl<B: Fs + ?Sized> FsExtJson for B {}
}

#[cfg(feature = "serde")]
pub use json::FsExtJson;
