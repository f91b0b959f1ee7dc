//! # Storage Traits
//!
//! The capability set every backend exposes, split by concern:
//!
//! | Trait | Operations |
//! |-------|------------|
//! | [`FsRead`] | `file_exists`, `directory_exists`, `read`, `read_stream` |
//! | [`FsWrite`] | `write`, `write_stream`, `delete`, `move_file`, `copy` |
//! | [`FsDir`] | `list_contents`, `create_directory`, `delete_directory` |
//! | [`FsMetadata`] | `set_visibility`, `visibility`, `mime_type`, `last_modified`, `file_size` |
//! | [`FsCapabilities`] | negotiation of the optional URL/checksum traits |
//!
//! ## Blanket Implementation
//!
//! [`Fs`] is implemented for every type implementing all component traits.
//! Middleware such as the garbage layer accepts any `B: Fs` and is itself an
//! `Fs`, so layers stack.
//!
//! ## Object Safety
//!
//! All traits are object-safe:
//!
//! ```rust
//! use garbage_fs::Fs;
//!
//! fn exists(fs: &dyn Fs) -> bool {
//!     fs.file_exists(std::path::Path::new("file.txt")).unwrap_or(false)
//! }
//! ```

mod fs_capabilities;
mod fs_dir;
mod fs_metadata;
mod fs_read;
mod fs_write;

pub use fs_capabilities::{
    ChecksumProvider, FsCapabilities, PublicUrlGenerator, TemporaryUrlGenerator,
};
pub use fs_dir::{FsDir, ListContents};
pub use fs_metadata::FsMetadata;
pub use fs_read::FsRead;
pub use fs_write::FsWrite;

/// A complete storage backend.
///
/// Automatically implemented for any type that implements all component
/// traits. You never implement `Fs` directly.
///
/// # Example
///
/// ```rust
/// use garbage_fs::{Config, Fs, FsError};
/// use std::path::Path;
///
/// fn backup_file<B: Fs>(fs: &B, src: &Path, dst: &Path) -> Result<(), FsError> {
///     let data = fs.read(src)?;
///     fs.write(dst, &data, &Config::new())
/// }
/// ```
pub trait Fs: FsRead + FsWrite + FsDir + FsMetadata + FsCapabilities {}

impl<T: FsRead + FsWrite + FsDir + FsMetadata + FsCapabilities> Fs for T {}
