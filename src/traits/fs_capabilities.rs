//! Optional backend capabilities and their negotiation.
//!
//! Not every backend can hand out URLs or checksums. Instead of inspecting
//! types at runtime, a backend advertises what it supports through
//! [`FsCapabilities`]: each query returns `Some` with the capability trait
//! object, or `None` (the default).

use std::path::Path;

use chrono::{DateTime, Utc};

use crate::{Config, FsError};

/// Generates permanent public URLs.
pub trait PublicUrlGenerator: Send + Sync {
    /// Public URL for `path`.
    ///
    /// # Errors
    ///
    /// - [`FsError::UnableToGeneratePublicUrl`] if no URL can be produced
    fn public_url(&self, path: &Path, config: &Config) -> Result<String, FsError>;
}

/// Generates URLs that stop working at a given instant.
pub trait TemporaryUrlGenerator: Send + Sync {
    /// URL for `path` valid until `expires_at`.
    ///
    /// # Errors
    ///
    /// - [`FsError::UnableToGenerateTemporaryUrl`] if no URL can be produced
    fn temporary_url(
        &self,
        path: &Path,
        expires_at: DateTime<Utc>,
        config: &Config,
    ) -> Result<String, FsError>;
}

/// Computes content checksums.
pub trait ChecksumProvider: Send + Sync {
    /// Checksum of the file at `path`.
    ///
    /// # Errors
    ///
    /// - [`FsError::UnableToProvideChecksum`] if the file is missing or not a file
    fn checksum(&self, path: &Path, config: &Config) -> Result<String, FsError>;
}

/// Capability negotiation for the optional operations.
///
/// Backends that implement an optional trait override the matching query to
/// return `Some(self)`:
///
/// ```rust
/// use garbage_fs::{ChecksumProvider, Config, FsCapabilities, FsError};
/// use std::path::Path;
///
/// struct Hashing;
///
/// impl ChecksumProvider for Hashing {
///     fn checksum(&self, _: &Path, _: &Config) -> Result<String, FsError> {
///         Ok("abc".into())
///     }
/// }
///
/// impl FsCapabilities for Hashing {
///     fn checksum_provider(&self) -> Option<&dyn ChecksumProvider> {
///         Some(self)
///     }
/// }
///
/// assert!(Hashing.checksum_provider().is_some());
/// assert!(Hashing.public_url_generator().is_none());
/// ```
pub trait FsCapabilities: Send + Sync {
    /// Public URL support.
    fn public_url_generator(&self) -> Option<&dyn PublicUrlGenerator> {
        None
    }

    /// Temporary URL support.
    fn temporary_url_generator(&self) -> Option<&dyn TemporaryUrlGenerator> {
        None
    }

    /// Checksum support.
    fn checksum_provider(&self) -> Option<&dyn ChecksumProvider> {
        None
    }
}
