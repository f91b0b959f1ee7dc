//! In-memory storage backend.
//!
//! [`MemoryFs`] implements the full required capability set with
//! object-store semantics: directories exist implicitly when something is
//! stored below them, writes create missing parents, and deleting a missing
//! file succeeds. It advertises none of the optional capabilities.

use std::collections::{BTreeMap, BTreeSet};
use std::io::{Cursor, Read};
use std::path::{Path, PathBuf};
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::{DateTime, Utc};

use crate::path::normalize;
use crate::{
    Config, DirectoryAttributes, FileAttributes, FsCapabilities, FsDir, FsError, FsMetadata,
    FsRead, FsWrite, ListContents, StorageAttributes, Visibility,
};

#[derive(Debug, Clone)]
struct StoredFile {
    contents: Vec<u8>,
    visibility: Visibility,
    last_modified: DateTime<Utc>,
}

#[derive(Debug, Default)]
struct State {
    files: BTreeMap<PathBuf, StoredFile>,
    /// Explicitly created directories and their visibility.
    dirs: BTreeMap<PathBuf, Visibility>,
}

impl State {
    fn directory_exists(&self, dir: &Path) -> bool {
        dir.as_os_str().is_empty()
            || self.dirs.keys().any(|d| d.starts_with(dir))
            || self.files.keys().any(|f| f.starts_with(dir) && f != dir)
    }
}

/// A thread-safe in-memory backend.
///
/// # Example
///
/// ```rust
/// use garbage_fs::{Config, FsRead, FsWrite, MemoryFs};
/// use std::path::Path;
///
/// let fs = MemoryFs::new();
/// fs.write(Path::new("dir/file.txt"), b"hello", &Config::new()).unwrap();
///
/// assert!(fs.directory_exists(Path::new("dir")).unwrap());
/// assert_eq!(fs.read(Path::new("/dir/file.txt")).unwrap(), b"hello");
/// ```
#[derive(Debug)]
pub struct MemoryFs {
    state: RwLock<State>,
    default_visibility: Visibility,
}

impl MemoryFs {
    /// Create an empty backend whose files default to public visibility.
    pub fn new() -> Self {
        Self::with_default_visibility(Visibility::public())
    }

    /// Create an empty backend with a custom default visibility.
    pub fn with_default_visibility(visibility: Visibility) -> Self {
        Self {
            state: RwLock::new(State::default()),
            default_visibility: visibility,
        }
    }

    /// Remove everything.
    pub fn clear(&self) {
        *self.write_state() = State::default();
    }

    /// Number of stored files.
    pub fn file_count(&self) -> usize {
        self.read_state().files.len()
    }

    fn read_state(&self) -> RwLockReadGuard<'_, State> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_state(&self) -> RwLockWriteGuard<'_, State> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }

    fn store(&self, path: &Path, contents: Vec<u8>, config: &Config) {
        let visibility = config
            .visibility()
            .unwrap_or_else(|| self.default_visibility.clone());
        self.write_state().files.insert(
            normalize(path),
            StoredFile {
                contents,
                visibility,
                last_modified: Utc::now(),
            },
        );
    }

    fn stored(&self, path: &Path, metadata_type: &'static str) -> Result<StoredFile, FsError> {
        self.read_state()
            .files
            .get(&normalize(path))
            .cloned()
            .ok_or_else(|| FsError::UnableToRetrieveMetadata {
                path: path.to_path_buf(),
                metadata_type,
                reason: "file does not exist".into(),
            })
    }
}

impl Default for MemoryFs {
    fn default() -> Self {
        Self::new()
    }
}

impl FsRead for MemoryFs {
    fn file_exists(&self, path: &Path) -> Result<bool, FsError> {
        Ok(self.read_state().files.contains_key(&normalize(path)))
    }

    fn directory_exists(&self, path: &Path) -> Result<bool, FsError> {
        Ok(self.read_state().directory_exists(&normalize(path)))
    }

    fn read(&self, path: &Path) -> Result<Vec<u8>, FsError> {
        self.read_state()
            .files
            .get(&normalize(path))
            .map(|f| f.contents.clone())
            .ok_or_else(|| FsError::UnableToReadFile {
                path: path.to_path_buf(),
                reason: "file does not exist".into(),
            })
    }

    fn read_stream(&self, path: &Path) -> Result<Box<dyn Read + Send>, FsError> {
        Ok(Box::new(Cursor::new(self.read(path)?)))
    }
}

impl FsWrite for MemoryFs {
    fn write(&self, path: &Path, contents: &[u8], config: &Config) -> Result<(), FsError> {
        self.store(path, contents.to_vec(), config);
        Ok(())
    }

    fn write_stream(
        &self,
        path: &Path,
        contents: &mut dyn Read,
        config: &Config,
    ) -> Result<(), FsError> {
        let mut buffer = Vec::new();
        contents
            .read_to_end(&mut buffer)
            .map_err(|e| FsError::UnableToWriteFile {
                path: path.to_path_buf(),
                reason: e.to_string(),
            })?;
        self.store(path, buffer, config);
        Ok(())
    }

    fn delete(&self, path: &Path) -> Result<(), FsError> {
        self.write_state().files.remove(&normalize(path));
        Ok(())
    }

    fn move_file(
        &self,
        source: &Path,
        destination: &Path,
        config: &Config,
    ) -> Result<(), FsError> {
        let from = normalize(source);
        let to = normalize(destination);
        let mut state = self.write_state();

        let Some(mut file) = state.files.remove(&from) else {
            return Err(FsError::move_failed(
                source,
                destination,
                "source file does not exist",
            ));
        };
        if let Some(visibility) = config.visibility() {
            file.visibility = visibility;
        }
        state.files.insert(to, file);
        Ok(())
    }

    fn copy(&self, source: &Path, destination: &Path, config: &Config) -> Result<(), FsError> {
        let mut state = self.write_state();

        let Some(mut file) = state.files.get(&normalize(source)).cloned() else {
            return Err(FsError::copy_failed(
                source,
                destination,
                "source file does not exist",
            ));
        };
        if let Some(visibility) = config.visibility() {
            file.visibility = visibility;
        }
        file.last_modified = Utc::now();
        state.files.insert(normalize(destination), file);
        Ok(())
    }
}

impl FsDir for MemoryFs {
    fn list_contents(&self, path: &Path, deep: bool) -> Result<ListContents, FsError> {
        let prefix = normalize(path);
        let state = self.read_state();

        let below = |candidate: &Path| candidate.starts_with(&prefix) && candidate != prefix;
        let visible = |candidate: &Path| deep || candidate.parent() == Some(prefix.as_path());

        // Directories are implied by every file and explicit directory below
        // the prefix.
        let mut dirs = BTreeSet::new();
        for stored in state.files.keys().chain(state.dirs.keys()) {
            let mut ancestor = stored.parent();
            while let Some(dir) = ancestor {
                if !below(dir) {
                    break;
                }
                dirs.insert(dir.to_path_buf());
                ancestor = dir.parent();
            }
        }
        dirs.extend(state.dirs.keys().filter(|d| below(d)).cloned());

        let mut entries: Vec<Result<StorageAttributes, FsError>> = dirs
            .into_iter()
            .filter(|d| visible(d))
            .map(|d| {
                let mut attrs = DirectoryAttributes::new(d.clone());
                attrs.visibility = state.dirs.get(&d).cloned();
                Ok(StorageAttributes::Directory(attrs))
            })
            .collect();

        entries.extend(
            state
                .files
                .iter()
                .filter(|(p, _)| below(p) && visible(p))
                .map(|(p, f)| {
                    Ok(StorageAttributes::File(
                        FileAttributes::new(p.clone())
                            .with_file_size(f.contents.len() as u64)
                            .with_visibility(f.visibility.clone())
                            .with_last_modified(f.last_modified),
                    ))
                }),
        );

        Ok(ListContents::from_vec(entries))
    }

    fn create_directory(&self, path: &Path, config: &Config) -> Result<(), FsError> {
        let visibility = config
            .get(Config::OPTION_DIRECTORY_VISIBILITY)
            .filter(|v| !v.is_empty())
            .map(Visibility::new)
            .unwrap_or_else(|| self.default_visibility.clone());
        self.write_state().dirs.insert(normalize(path), visibility);
        Ok(())
    }

    fn delete_directory(&self, path: &Path) -> Result<(), FsError> {
        let prefix = normalize(path);
        let mut state = self.write_state();
        state.files.retain(|p, _| !p.starts_with(&prefix));
        state.dirs.retain(|p, _| !p.starts_with(&prefix));
        Ok(())
    }
}

impl FsMetadata for MemoryFs {
    fn set_visibility(&self, path: &Path, visibility: &Visibility) -> Result<(), FsError> {
        let mut state = self.write_state();
        match state.files.get_mut(&normalize(path)) {
            Some(file) => {
                file.visibility = visibility.clone();
                Ok(())
            }
            None => Err(FsError::UnableToSetVisibility {
                path: path.to_path_buf(),
                reason: "file does not exist".into(),
            }),
        }
    }

    fn visibility(&self, path: &Path) -> Result<FileAttributes, FsError> {
        let file = self.stored(path, "visibility")?;
        Ok(FileAttributes::new(path).with_visibility(file.visibility))
    }

    fn mime_type(&self, path: &Path) -> Result<FileAttributes, FsError> {
        let file = self.stored(path, "mime_type")?;
        let mime_type = guess_mime_type(path, &file.contents).ok_or_else(|| {
            FsError::UnableToRetrieveMetadata {
                path: path.to_path_buf(),
                metadata_type: "mime_type",
                reason: "unknown mime type".into(),
            }
        })?;
        Ok(FileAttributes::new(path).with_mime_type(mime_type))
    }

    fn last_modified(&self, path: &Path) -> Result<FileAttributes, FsError> {
        let file = self.stored(path, "last_modified")?;
        Ok(FileAttributes::new(path).with_last_modified(file.last_modified))
    }

    fn file_size(&self, path: &Path) -> Result<FileAttributes, FsError> {
        let file = self.stored(path, "file_size")?;
        Ok(FileAttributes::new(path).with_file_size(file.contents.len() as u64))
    }
}

impl FsCapabilities for MemoryFs {}

fn guess_mime_type(path: &Path, contents: &[u8]) -> Option<&'static str> {
    let by_extension = path
        .extension()
        .and_then(|e| e.to_str())
        .and_then(|e| match e.to_ascii_lowercase().as_str() {
            "txt" => Some("text/plain"),
            "json" => Some("application/json"),
            "html" | "htm" => Some("text/html"),
            "css" => Some("text/css"),
            "js" => Some("text/javascript"),
            "csv" => Some("text/csv"),
            "xml" => Some("application/xml"),
            "svg" => Some("image/svg+xml"),
            "png" => Some("image/png"),
            "jpg" | "jpeg" => Some("image/jpeg"),
            "gif" => Some("image/gif"),
            "pdf" => Some("application/pdf"),
            _ => None,
        });

    by_extension.or_else(|| std::str::from_utf8(contents).is_ok().then_some("text/plain"))
}
