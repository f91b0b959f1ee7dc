//! Test doubles shared by the integration tests.
//!
//! [`TestFs`] wraps a [`MemoryFs`] and can be switched into the variants the
//! tests need: backends that cannot report visibility, backends that only
//! honour visibility passed through `Config`, backends with URL or checksum
//! support, and backends that fail specific calls. It also records the calls
//! the decorator makes.

#![allow(dead_code)]

use std::io::Read;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use chrono::{DateTime, Utc};
use garbage_fs::path::normalize;
use garbage_fs::*;

#[derive(Debug, Default, Clone, Copy)]
pub struct Behaviour {
    pub visibility_unsupported: bool,
    pub visibility_from_config_on_copy: bool,
    pub visibility_from_config_on_move: bool,
    pub urls: bool,
    pub checksums: bool,
    pub failing_copies: bool,
}

#[derive(Debug, Default)]
pub struct TestFs {
    inner: MemoryFs,
    behaviour: Behaviour,
    failing_move_source: Mutex<Option<PathBuf>>,
    file_exists_calls: AtomicUsize,
    list_calls: Mutex<Vec<(PathBuf, bool)>>,
    deletes: Mutex<Vec<PathBuf>>,
}

impl TestFs {
    pub fn new(behaviour: Behaviour) -> Self {
        Self {
            behaviour,
            ..Self::default()
        }
    }

    pub fn plain() -> Self {
        Self::default()
    }

    pub fn visibility_unsupported() -> Self {
        Self::new(Behaviour {
            visibility_unsupported: true,
            ..Behaviour::default()
        })
    }

    pub fn visibility_from_config_when_copy() -> Self {
        Self::new(Behaviour {
            visibility_from_config_on_copy: true,
            ..Behaviour::default()
        })
    }

    pub fn visibility_from_config_when_move() -> Self {
        Self::new(Behaviour {
            visibility_from_config_on_move: true,
            ..Behaviour::default()
        })
    }

    pub fn url_generator() -> Self {
        Self::new(Behaviour {
            urls: true,
            ..Behaviour::default()
        })
    }

    pub fn checksum_provider() -> Self {
        Self::new(Behaviour {
            checksums: true,
            ..Behaviour::default()
        })
    }

    pub fn failing_copies() -> Self {
        Self::new(Behaviour {
            failing_copies: true,
            ..Behaviour::default()
        })
    }

    /// Make every move whose source is `path` fail.
    pub fn fail_moves_from(&self, path: &str) {
        *self.failing_move_source.lock().unwrap() = Some(normalize(Path::new(path)));
    }

    pub fn file_exists_calls(&self) -> usize {
        self.file_exists_calls.load(Ordering::SeqCst)
    }

    pub fn reset_file_exists_calls(&self) {
        self.file_exists_calls.store(0, Ordering::SeqCst);
    }

    pub fn list_calls(&self) -> Vec<(PathBuf, bool)> {
        self.list_calls.lock().unwrap().clone()
    }

    pub fn deletes(&self) -> Vec<PathBuf> {
        self.deletes.lock().unwrap().clone()
    }

    pub fn file_count(&self) -> usize {
        self.inner.file_count()
    }

    fn required_visibility(
        &self,
        config: &Config,
        fail: impl FnOnce() -> FsError,
    ) -> Result<Visibility, FsError> {
        config.visibility().ok_or_else(fail)
    }
}

impl FsRead for TestFs {
    fn file_exists(&self, path: &Path) -> Result<bool, FsError> {
        self.file_exists_calls.fetch_add(1, Ordering::SeqCst);
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

impl FsWrite for TestFs {
    fn write(&self, path: &Path, contents: &[u8], config: &Config) -> Result<(), FsError> {
        self.inner.write(path, contents, config)
    }

    fn write_stream(
        &self,
        path: &Path,
        contents: &mut dyn Read,
        config: &Config,
    ) -> Result<(), FsError> {
        self.inner.write_stream(path, contents, config)
    }

    fn delete(&self, path: &Path) -> Result<(), FsError> {
        self.deletes.lock().unwrap().push(path.to_path_buf());
        self.inner.delete(path)
    }

    fn move_file(
        &self,
        source: &Path,
        destination: &Path,
        config: &Config,
    ) -> Result<(), FsError> {
        let failing = self.failing_move_source.lock().unwrap().clone();
        if failing.as_deref() == Some(normalize(source).as_path()) {
            return Err(FsError::move_failed(source, destination, "injected failure"));
        }

        if self.behaviour.visibility_from_config_on_move {
            let visibility = self.required_visibility(config, || {
                FsError::move_failed(source, destination, "visibility missing from config")
            })?;
            self.inner.move_file(source, destination, config)?;
            return self.inner.set_visibility(destination, &visibility);
        }

        self.inner.move_file(source, destination, config)
    }

    fn copy(&self, source: &Path, destination: &Path, config: &Config) -> Result<(), FsError> {
        if self.behaviour.failing_copies {
            return Err(FsError::copy_failed(source, destination, "injected failure"));
        }

        if self.behaviour.visibility_from_config_on_copy {
            let visibility = self.required_visibility(config, || {
                FsError::copy_failed(source, destination, "visibility missing from config")
            })?;
            self.inner.copy(source, destination, config)?;
            return self.inner.set_visibility(destination, &visibility);
        }

        self.inner.copy(source, destination, config)
    }
}

impl FsDir for TestFs {
    fn list_contents(&self, path: &Path, deep: bool) -> Result<ListContents, FsError> {
        self.list_calls
            .lock()
            .unwrap()
            .push((path.to_path_buf(), deep));
        self.inner.list_contents(path, deep)
    }

    fn create_directory(&self, path: &Path, config: &Config) -> Result<(), FsError> {
        self.inner.create_directory(path, config)
    }

    fn delete_directory(&self, path: &Path) -> Result<(), FsError> {
        self.inner.delete_directory(path)
    }
}

impl FsMetadata for TestFs {
    fn set_visibility(&self, path: &Path, visibility: &Visibility) -> Result<(), FsError> {
        self.inner.set_visibility(path, visibility)
    }

    fn visibility(&self, path: &Path) -> Result<FileAttributes, FsError> {
        if self.behaviour.visibility_unsupported {
            return Err(FsError::UnableToRetrieveMetadata {
                path: path.to_path_buf(),
                metadata_type: "visibility",
                reason: "Visibility is not supported.".into(),
            });
        }
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

impl TestFs {
    fn url(&self, path: &Path) -> Result<String, String> {
        if !self.inner.file_exists(path).map_err(|e| e.to_string())? {
            return Err(format!("file does not exist: {}", path.display()));
        }
        Ok(format!("memory://{}", normalize(path).display()))
    }
}

impl PublicUrlGenerator for TestFs {
    fn public_url(&self, path: &Path, _config: &Config) -> Result<String, FsError> {
        self.url(path)
            .map_err(|reason| FsError::UnableToGeneratePublicUrl {
                path: path.to_path_buf(),
                reason,
            })
    }
}

impl TemporaryUrlGenerator for TestFs {
    fn temporary_url(
        &self,
        path: &Path,
        expires_at: DateTime<Utc>,
        _config: &Config,
    ) -> Result<String, FsError> {
        self.url(path)
            .map(|url| format!("{url}?expires={}", expires_at.timestamp()))
            .map_err(|reason| FsError::UnableToGenerateTemporaryUrl {
                path: path.to_path_buf(),
                reason,
            })
    }
}

impl ChecksumProvider for TestFs {
    fn checksum(&self, path: &Path, _config: &Config) -> Result<String, FsError> {
        let contents = self
            .inner
            .read(path)
            .map_err(|e| FsError::UnableToProvideChecksum {
                path: path.to_path_buf(),
                reason: e.to_string(),
            })?;
        Ok(hex::encode(blake3::hash(&contents).as_bytes()))
    }
}

impl FsCapabilities for TestFs {
    fn public_url_generator(&self) -> Option<&dyn PublicUrlGenerator> {
        self.behaviour.urls.then_some(self as &dyn PublicUrlGenerator)
    }

    fn temporary_url_generator(&self) -> Option<&dyn TemporaryUrlGenerator> {
        self.behaviour
            .urls
            .then_some(self as &dyn TemporaryUrlGenerator)
    }

    fn checksum_provider(&self) -> Option<&dyn ChecksumProvider> {
        self.behaviour
            .checksums
            .then_some(self as &dyn ChecksumProvider)
    }
}

/// Both preservation modes, for tests that must hold in either.
pub const MODES: [PreservationMode; 2] = [PreservationMode::Move, PreservationMode::Copy];

pub fn garbage_over<B: Fs>(backend: B, mode: PreservationMode) -> GarbageFs<B> {
    GarbageFs::from_options(
        backend,
        &GarbageOptions {
            mode,
            ..GarbageOptions::default()
        },
    )
    .unwrap()
}

pub fn memory_garbage(mode: PreservationMode) -> GarbageFs<MemoryFs> {
    garbage_over(MemoryFs::new(), mode)
}

/// `garbage/<today>/<path>` spelled out independently of the crate.
pub fn todays_garbage(path: &str) -> PathBuf {
    PathBuf::from(format!(
        "garbage/{}/{}",
        chrono::Local::now().format("%Y%m%d"),
        path
    ))
}

pub fn cfg() -> Config {
    Config::new()
}
