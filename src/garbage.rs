//! # Garbage-preserving middleware
//!
//! [`GarbageFs`] wraps any [`Fs`] backend and keeps the previous version of
//! every object a caller destroys. Overwrites, deletes, moves and directory
//! deletes first preserve the at-risk file under
//!
//! ```text
//! <root>/<YYYYMMDD>/<original path>[<collision suffix>]
//! ```
//!
//! on the same backend, then carry on with the requested operation. All
//! other calls are delegated untouched.
//!
//! ## Preservation modes
//!
//! | Mode | Preserve step | Then |
//! |------|---------------|------|
//! | [`PreservationMode::Move`] | backend `move_file` into garbage | nothing for deletes; the move *is* the removal |
//! | [`PreservationMode::Copy`] | backend `copy` into garbage | the real delete/move against the backend |
//!
//! ## Example
//!
//! ```rust
//! use garbage_fs::{Config, FsExt, FsRead, FsWrite, GarbageFs, MemoryFs};
//! use std::path::Path;
//!
//! let fs = GarbageFs::new(MemoryFs::new());
//! fs.write(Path::new("notes.txt"), b"v1", &Config::new())?;
//! fs.write(Path::new("notes.txt"), b"v2", &Config::new())?;
//!
//! let preserved = fs.garbage_path_for(Path::new("notes.txt"));
//! assert_eq!(fs.read_to_string(&preserved)?, "v1");
//! assert_eq!(fs.read_to_string(Path::new("notes.txt"))?, "v2");
//! # Ok::<(), garbage_fs::FsError>(())
//! ```
//!
//! ## Races
//!
//! The existence and collision checks are check-then-act. Two callers
//! preserving the same path within the same microsecond may still collide.

use std::cmp::Reverse;
use std::io::Read;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use tracing::{debug, trace, warn};

use crate::path::{self, GarbageRoot, normalize};
use crate::{
    ChecksumProvider, Config, FileAttributes, Fs, FsCapabilities, FsDir, FsError, FsExt,
    FsMetadata, FsRead, FsWrite, Layer, ListContents, PublicUrlGenerator, StorageAttributes,
    TemporaryUrlGenerator, Visibility,
};

/// How the at-risk object reaches the garbage area.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum PreservationMode {
    /// Relocate the object with a backend move.
    #[default]
    Move,
    /// Duplicate the object with a backend copy, then let the real
    /// destructive call run.
    Copy,
}

/// Settings an embedding application can load from its own configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GarbageOptions {
    /// Top-level segment for preserved objects.
    pub root: String,
    /// Preservation strategy.
    pub mode: PreservationMode,
}

impl Default for GarbageOptions {
    fn default() -> Self {
        Self {
            root: path::DEFAULT_GARBAGE_ROOT.to_owned(),
            mode: PreservationMode::default(),
        }
    }
}

/// Whether the preserve step still has to confirm the file exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Existence {
    Unknown,
    Known,
}

/// Middleware that moves or copies files into a garbage area before they are
/// overwritten, deleted or moved away.
///
/// `GarbageFs<B>` is itself an [`Fs`], and advertises all optional
/// capabilities; calls to them fail with the capability-specific error when
/// the wrapped backend lacks the capability.
#[derive(Debug)]
pub struct GarbageFs<B> {
    inner: B,
    root: GarbageRoot,
    mode: PreservationMode,
}

impl<B> GarbageFs<B> {
    /// Wrap `inner` using move mode and the `garbage` root.
    pub fn new(inner: B) -> Self {
        Self {
            inner,
            root: GarbageRoot::default(),
            mode: PreservationMode::Move,
        }
    }

    /// Wrap `inner` using move mode and a custom root.
    ///
    /// Leading and trailing `/` are trimmed from `root`.
    ///
    /// # Errors
    ///
    /// - [`FsError::InvalidConfiguration`] if `root` is empty after trimming
    pub fn with_root(inner: B, root: &str) -> Result<Self, FsError> {
        Ok(Self {
            inner,
            root: GarbageRoot::new(root)?,
            mode: PreservationMode::Move,
        })
    }

    /// Wrap `inner` using copy mode and the `garbage` root.
    pub fn copying(inner: B) -> Self {
        Self {
            inner,
            root: GarbageRoot::default(),
            mode: PreservationMode::Copy,
        }
    }

    /// Wrap `inner` with settings loaded by the embedding application.
    ///
    /// # Errors
    ///
    /// - [`FsError::InvalidConfiguration`] if the root is empty after trimming
    pub fn from_options(inner: B, options: &GarbageOptions) -> Result<Self, FsError> {
        Ok(Self {
            inner,
            root: GarbageRoot::new(&options.root)?,
            mode: options.mode,
        })
    }

    /// The normalized garbage root.
    pub fn garbage_root(&self) -> &str {
        self.root.as_str()
    }

    /// The preservation strategy.
    pub fn mode(&self) -> PreservationMode {
        self.mode
    }

    /// Where `path` would be preserved today, before collision suffixing.
    pub fn garbage_path_for(&self, path: &Path) -> PathBuf {
        self.root.entry_for(path, path::today())
    }

    /// The wrapped backend.
    pub fn inner(&self) -> &B {
        &self.inner
    }

    /// Unwrap the backend.
    pub fn into_inner(self) -> B {
        self.inner
    }
}

impl<B: Fs> GarbageFs<B> {
    fn preserve(&self, path: &Path, existence: Existence) -> Result<(), FsError> {
        if self.mode == PreservationMode::Move && self.root.contains(path) {
            trace!(path = %path.display(), "already in garbage");
            return Ok(());
        }

        if existence == Existence::Unknown && !self.inner.file_exists(path)? {
            trace!(path = %path.display(), "nothing to preserve");
            return Ok(());
        }

        let target = self.garbage_target(path)?;
        let config = self.preservation_config(path)?;

        match self.mode {
            PreservationMode::Move => self.inner.move_file(path, &target, &config)?,
            PreservationMode::Copy => self.inner.copy(path, &target, &config)?,
        }

        debug!(
            source = %path.display(),
            garbage = %target.display(),
            mode = ?self.mode,
            "preserved file"
        );
        Ok(())
    }

    fn garbage_target(&self, path: &Path) -> Result<PathBuf, FsError> {
        let target = self.garbage_path_for(path);
        if !self.inner.file_exists(&target)? {
            return Ok(target);
        }

        let suffixed = path::with_suffix(&target, &path::collision_suffix(&Utc::now()));
        warn!(
            taken = %target.display(),
            garbage = %suffixed.display(),
            "garbage entry exists, using suffixed path"
        );
        Ok(suffixed)
    }

    /// Fresh config carrying the source visibility, when it can be read.
    fn preservation_config(&self, path: &Path) -> Result<Config, FsError> {
        let config = Config::new();
        match self.inner.visibility(path) {
            Ok(FileAttributes {
                visibility: Some(visibility),
                ..
            }) if !visibility.is_empty() => Ok(config.with_visibility(&visibility)),
            Ok(_) => Ok(config),
            Err(e) if e.is_metadata_unavailable() => {
                debug!(path = %path.display(), error = %e, "preserving without visibility");
                Ok(config)
            }
            Err(e) => Err(e),
        }
    }

    /// Whether deleting the directory `path` wholesale would also remove
    /// today's garbage partition.
    ///
    /// In move mode a directory inside the garbage root is being pruned on
    /// purpose and nothing new was preserved into it.
    fn encloses_todays_garbage(&self, path: &Path) -> bool {
        if self.mode == PreservationMode::Move && self.root.contains(path) {
            return false;
        }
        self.root
            .partition_for(path::today())
            .starts_with(normalize(path))
    }

    /// Remove the contents of `path` without touching garbage.
    ///
    /// `files` and `dirs` are the listing taken before preservation. Copy
    /// mode deletes each listed file (its copy now lives in garbage); move
    /// mode already relocated them. Directories are removed deepest first,
    /// and only once no file is left below them.
    fn clear_around_garbage(
        &self,
        path: &Path,
        files: &[StorageAttributes],
        dirs: &[StorageAttributes],
    ) -> Result<(), FsError> {
        debug!(
            path = %path.display(),
            "directory encloses garbage, deleting entries individually"
        );

        if self.mode == PreservationMode::Copy {
            for file in files {
                self.inner.delete(file.path())?;
            }
        }

        let mut dirs: Vec<&Path> = dirs.iter().map(StorageAttributes::path).collect();
        dirs.sort_by_key(|dir| Reverse(dir.components().count()));
        for dir in dirs {
            if self.files_under(dir)?.is_empty() {
                self.inner.delete_directory(dir)?;
            }
        }
        Ok(())
    }

    /// Move-mode removal: relocate into garbage, or delete outright when the
    /// path already lives there.
    fn relocate(&self, path: &Path, existence: Existence) -> Result<(), FsError> {
        if self.root.contains(path) {
            return self.inner.delete(path);
        }
        self.preserve(path, existence)
    }
}

impl<B: Fs> FsRead for GarbageFs<B> {
    fn file_exists(&self, path: &Path) -> Result<bool, FsError> {
        self.inner.file_exists(path)
    }

    fn directory_exists(&self, path: &Path) -> Result<bool, FsError> {
        self.inner.directory_exists(path)
    }

    fn read(&self, path: &Path) -> Result<Vec<u8>, FsError> {
        self.inner.read(path)
    }

    fn read_stream(&self, path: &Path) -> Result<Box<dyn Read + Send>, FsError> {
        self.inner.read_stream(path)
    }
}

impl<B: Fs> FsWrite for GarbageFs<B> {
    fn write(&self, path: &Path, contents: &[u8], config: &Config) -> Result<(), FsError> {
        self.preserve(path, Existence::Unknown)?;
        self.inner.write(path, contents, config)
    }

    fn write_stream(
        &self,
        path: &Path,
        contents: &mut dyn Read,
        config: &Config,
    ) -> Result<(), FsError> {
        self.preserve(path, Existence::Unknown)?;
        self.inner.write_stream(path, contents, config)
    }

    fn delete(&self, path: &Path) -> Result<(), FsError> {
        match self.mode {
            PreservationMode::Move => self.relocate(path, Existence::Unknown),
            PreservationMode::Copy => {
                self.preserve(path, Existence::Unknown)?;
                self.inner.delete(path)
            }
        }
    }

    fn move_file(
        &self,
        source: &Path,
        destination: &Path,
        config: &Config,
    ) -> Result<(), FsError> {
        let same_location = normalize(source) == normalize(destination);

        match self.mode {
            PreservationMode::Move => {
                self.inner
                    .copy(source, destination, config)
                    .map_err(|e| match e {
                        FsError::UnableToCopyFile { .. } => FsError::UnableToMoveFile {
                            from: source.to_path_buf(),
                            to: destination.to_path_buf(),
                            reason: e.to_string(),
                            previous: Some(Box::new(e)),
                        },
                        other => other,
                    })?;

                if same_location {
                    return Ok(());
                }
                // The copy succeeded, so the source exists.
                self.relocate(source, Existence::Known)
            }
            PreservationMode::Copy => {
                if !same_location {
                    self.preserve(source, Existence::Unknown)?;
                }
                self.inner.move_file(source, destination, config)
            }
        }
    }

    fn copy(&self, source: &Path, destination: &Path, config: &Config) -> Result<(), FsError> {
        self.inner.copy(source, destination, config)
    }
}

impl<B: Fs> FsDir for GarbageFs<B> {
    fn list_contents(&self, path: &Path, deep: bool) -> Result<ListContents, FsError> {
        self.inner.list_contents(path, deep)
    }

    fn create_directory(&self, path: &Path, config: &Config) -> Result<(), FsError> {
        self.inner.create_directory(path, config)
    }

    /// Preserves every file below `path`, then deletes the directory.
    ///
    /// Fail-fast: if any file cannot be preserved the directory is left in
    /// place and the error is returned. When `path` contains today's garbage
    /// partition (for example `""`, or the parent of a nested root), the
    /// listed entries are removed one by one so that the preserved files
    /// survive.
    fn delete_directory(&self, path: &Path) -> Result<(), FsError> {
        let (files, dirs): (Vec<_>, Vec<_>) = self
            .list_contents(path, true)?
            .collect_all()?
            .into_iter()
            .partition(StorageAttributes::is_file);
        debug!(path = %path.display(), files = files.len(), "preserving directory");

        for file in &files {
            self.preserve(file.path(), Existence::Known)?;
        }

        if self.encloses_todays_garbage(path) {
            return self.clear_around_garbage(path, &files, &dirs);
        }
        self.inner.delete_directory(path)
    }
}

impl<B: Fs> FsMetadata for GarbageFs<B> {
    fn set_visibility(&self, path: &Path, visibility: &Visibility) -> Result<(), FsError> {
        self.inner.set_visibility(path, visibility)
    }

    fn visibility(&self, path: &Path) -> Result<FileAttributes, FsError> {
        self.inner.visibility(path)
    }

    fn mime_type(&self, path: &Path) -> Result<FileAttributes, FsError> {
        self.inner.mime_type(path)
    }

    fn last_modified(&self, path: &Path) -> Result<FileAttributes, FsError> {
        self.inner.last_modified(path)
    }

    fn file_size(&self, path: &Path) -> Result<FileAttributes, FsError> {
        self.inner.file_size(path)
    }
}

impl<B: Fs> PublicUrlGenerator for GarbageFs<B> {
    fn public_url(&self, path: &Path, config: &Config) -> Result<String, FsError> {
        let generator =
            self.inner
                .public_url_generator()
                .ok_or_else(|| FsError::UnableToGeneratePublicUrl {
                    path: path.to_path_buf(),
                    reason: "backend must implement `PublicUrlGenerator` to use public_url".into(),
                })?;
        generator.public_url(path, config)
    }
}

impl<B: Fs> TemporaryUrlGenerator for GarbageFs<B> {
    fn temporary_url(
        &self,
        path: &Path,
        expires_at: DateTime<Utc>,
        config: &Config,
    ) -> Result<String, FsError> {
        let generator = self.inner.temporary_url_generator().ok_or_else(|| {
            FsError::UnableToGenerateTemporaryUrl {
                path: path.to_path_buf(),
                reason: "backend must implement `TemporaryUrlGenerator` to use temporary_url"
                    .into(),
            }
        })?;
        generator.temporary_url(path, expires_at, config)
    }
}

impl<B: Fs> ChecksumProvider for GarbageFs<B> {
    fn checksum(&self, path: &Path, config: &Config) -> Result<String, FsError> {
        let provider =
            self.inner
                .checksum_provider()
                .ok_or_else(|| FsError::UnableToProvideChecksum {
                    path: path.to_path_buf(),
                    reason: "backend must implement `ChecksumProvider` to use checksum".into(),
                })?;
        provider.checksum(path, config)
    }
}

impl<B: Fs> FsCapabilities for GarbageFs<B> {
    fn public_url_generator(&self) -> Option<&dyn PublicUrlGenerator> {
        Some(self)
    }

    fn temporary_url_generator(&self) -> Option<&dyn TemporaryUrlGenerator> {
        Some(self)
    }

    fn checksum_provider(&self) -> Option<&dyn ChecksumProvider> {
        Some(self)
    }
}

/// [`Layer`] producing a [`GarbageFs`].
///
/// ```rust
/// use garbage_fs::{GarbageLayer, LayerExt, MemoryFs, PreservationMode};
///
/// let fs = MemoryFs::new().layer(
///     GarbageLayer::with_root("/trash/")?.mode(PreservationMode::Copy),
/// );
/// assert_eq!(fs.garbage_root(), "trash");
/// assert_eq!(fs.mode(), PreservationMode::Copy);
/// # Ok::<(), garbage_fs::FsError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct GarbageLayer {
    root: GarbageRoot,
    mode: PreservationMode,
}

impl GarbageLayer {
    /// Move mode with the `garbage` root.
    pub fn new() -> Self {
        Self::default()
    }

    /// Move mode with a custom root.
    ///
    /// # Errors
    ///
    /// - [`FsError::InvalidConfiguration`] if `root` is empty after trimming
    pub fn with_root(root: &str) -> Result<Self, FsError> {
        Ok(Self {
            root: GarbageRoot::new(root)?,
            mode: PreservationMode::Move,
        })
    }

    /// Layer built from application settings.
    ///
    /// # Errors
    ///
    /// - [`FsError::InvalidConfiguration`] if the root is empty after trimming
    pub fn from_options(options: &GarbageOptions) -> Result<Self, FsError> {
        Ok(Self {
            root: GarbageRoot::new(&options.root)?,
            mode: options.mode,
        })
    }

    /// Select the preservation strategy.
    pub fn mode(mut self, mode: PreservationMode) -> Self {
        self.mode = mode;
        self
    }
}

impl<B: Fs> Layer<B> for GarbageLayer {
    type Backend = GarbageFs<B>;

    fn layer(self, backend: B) -> Self::Backend {
        GarbageFs {
            inner: backend,
            root: self.root,
            mode: self.mode,
        }
    }
}
