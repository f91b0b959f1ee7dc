//! # garbage-fs
//!
//! A decorator for storage backends that never throws data away.
//!
//! Wrap any backend implementing [`Fs`] in a [`GarbageFs`] and every
//! destructive call (overwrite, delete, move, directory delete) first
//! preserves the old content under a dated garbage area on the same backend.
//! Everything else passes straight through, so the decorated backend can be
//! used anywhere the plain one was.
//!
//! ---
//!
//! ## Quick Start
//!
//! ```rust
//! use garbage_fs::{Config, FsExt, FsRead, FsWrite, GarbageFs, MemoryFs};
//! use std::path::Path;
//!
//! let fs = GarbageFs::new(MemoryFs::new());
//!
//! fs.write(Path::new("report.csv"), b"a,b", &Config::new())?;
//! fs.delete(Path::new("report.csv"))?;
//!
//! assert!(!fs.file_exists(Path::new("report.csv"))?);
//! let preserved = fs.garbage_path_for(Path::new("report.csv"));
//! assert_eq!(fs.read_to_string(&preserved)?, "a,b");
//! # Ok::<(), garbage_fs::FsError>(())
//! ```
//!
//! ---
//!
//! ## Core Types
//!
//! | Type | Purpose |
//! |------|---------|
//! | [`Fs`] | Required backend capability set |
//! | [`FsCapabilities`] | Negotiation of optional URL and checksum support |
//! | [`GarbageFs`] | The garbage-preserving decorator |
//! | [`GarbageLayer`] | [`Layer`] that builds a [`GarbageFs`] |
//! | [`PreservationMode`] | Move into garbage, or copy and then apply |
//! | [`Config`] | Immutable per-call option bag |
//! | [`FsError`] | Error type shared by backends and the decorator |
//! | [`MemoryFs`] | In-memory backend |
//!
//! ---
//!
//! ## Garbage Layout
//!
//! ```text
//! <root>/<YYYYMMDD>/<original path>[<collision suffix>]
//! ```
//!
//! The root defaults to `garbage`. The date is the local day of
//! preservation. When the path is already taken, the current time in
//! microseconds is appended. Nothing is ever pruned; run your own cleanup
//! against the garbage root.
//!
//! ---
//!
//! ## Logging
//!
//! The crate emits [`tracing`](https://docs.rs/tracing) events (preserved
//! files at `debug`, collisions at `warn`) and never installs a subscriber.
//!
//! ---
//!
//! ## Feature Flags
//!
//! | Feature | Description |
//! |---------|-------------|
//! | `serde` | Serialization for [`Config`], [`GarbageOptions`], attribute types; JSON helpers on [`FsExt`] |

mod config;
mod error;
mod ext;
mod garbage;
mod layer;
mod memory;
pub mod path;
mod traits;
mod types;

// Public re-exports - error types
pub use error::FsError;

// Public re-exports - core types
pub use config::Config;
pub use types::{
    DirectoryAttributes, FileAttributes, FileType, StorageAttributes, Visibility,
};

// Public re-exports - backend traits
pub use traits::{Fs, FsCapabilities, FsDir, FsMetadata, FsRead, FsWrite, ListContents};

// Public re-exports - optional capabilities
pub use traits::{ChecksumProvider, PublicUrlGenerator, TemporaryUrlGenerator};

// Public re-exports - middleware
pub use garbage::{GarbageFs, GarbageLayer, GarbageOptions, PreservationMode};
pub use layer::{Layer, LayerExt};

// Public re-exports - infrastructure
pub use ext::FsExt;
pub use memory::MemoryFs;

// Conditional re-exports
#[cfg(feature = "serde")]
pub use ext::FsExtJson;
