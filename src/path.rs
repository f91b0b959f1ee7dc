//! # Storage keys and garbage paths
//!
//! Backend paths are relative, `/`-separated keys. Leading and trailing
//! separators carry no meaning, so `"/dir/file.txt"` and `"dir/file.txt"`
//! name the same object. [`normalize`] produces the canonical form.
//!
//! Preserved objects land at
//!
//! ```text
//! <root>/<YYYYMMDD>/<original path>[<collision suffix>]
//! ```
//!
//! where the date is the local calendar day of preservation and the
//! collision suffix is only appended when the first choice is taken.

use std::ffi::OsString;
use std::path::{Component, Path, PathBuf};

use chrono::{DateTime, NaiveDate, TimeZone, Utc};

use crate::FsError;

/// Default garbage root.
pub const DEFAULT_GARBAGE_ROOT: &str = "garbage";

/// Canonical relative key for `path`.
///
/// Root and `.` components are dropped and `..` pops the previous component
/// (lexically; it never escapes the key space).
///
/// ```rust
/// use garbage_fs::path::normalize;
/// use std::path::PathBuf;
///
/// assert_eq!(normalize("/dir/./a/../file.txt/".as_ref()), PathBuf::from("dir/file.txt"));
/// ```
pub fn normalize(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();
    for component in path.components() {
        match component {
            Component::Normal(part) => normalized.push(part),
            Component::ParentDir => {
                normalized.pop();
            }
            Component::RootDir | Component::CurDir | Component::Prefix(_) => {}
        }
    }
    normalized
}

/// The validated top-level segment under which garbage is stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GarbageRoot {
    /// `key` spelled with `/` separators.
    name: String,
    key: PathBuf,
}

impl GarbageRoot {
    /// Trim leading and trailing separators from `root` and validate it.
    ///
    /// # Errors
    ///
    /// - [`FsError::InvalidConfiguration`] if nothing is left after trimming
    pub fn new(root: &str) -> Result<Self, FsError> {
        let trimmed = root.trim_matches('/');
        let key = normalize(Path::new(trimmed));
        // "." or ".." would place garbage at the top of the key space.
        if key.as_os_str().is_empty() {
            return Err(FsError::InvalidConfiguration {
                reason: "garbage path must not be empty".into(),
            });
        }

        let name = key
            .components()
            .map(|c| c.as_os_str().to_string_lossy())
            .collect::<Vec<_>>()
            .join("/");
        Ok(Self { name, key })
    }

    /// The normalized root, as it appears in garbage paths.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.name
    }

    /// Returns `true` if `path` is the root itself or lies below it.
    pub fn contains(&self, path: &Path) -> bool {
        normalize(path).starts_with(&self.key)
    }

    /// Garbage location for `path` preserved on `day`.
    ///
    /// ```rust
    /// use chrono::NaiveDate;
    /// use garbage_fs::path::GarbageRoot;
    /// use std::path::{Path, PathBuf};
    ///
    /// let root = GarbageRoot::new("/trash/").unwrap();
    /// let day = NaiveDate::from_ymd_opt(2024, 3, 7).unwrap();
    /// assert_eq!(
    ///     root.entry_for(Path::new("/dir/file.txt"), day),
    ///     PathBuf::from("trash/20240307/dir/file.txt"),
    /// );
    /// ```
    pub fn entry_for(&self, path: &Path, day: NaiveDate) -> PathBuf {
        self.partition_for(day).join(normalize(path))
    }

    /// The directory holding everything preserved on `day`.
    pub fn partition_for(&self, day: NaiveDate) -> PathBuf {
        self.key.join(date_partition(day))
    }
}

impl Default for GarbageRoot {
    fn default() -> Self {
        Self {
            name: DEFAULT_GARBAGE_ROOT.to_owned(),
            key: PathBuf::from(DEFAULT_GARBAGE_ROOT),
        }
    }
}

/// Fixed-width `YYYYMMDD` partition for a calendar day.
pub fn date_partition(day: NaiveDate) -> String {
    day.format("%Y%m%d").to_string()
}

/// Today's partition in the local time zone.
pub fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

/// Disambiguating suffix: seconds since epoch followed by six digits of
/// microseconds, without a separator.
pub fn collision_suffix<Tz: TimeZone>(now: &DateTime<Tz>) -> String {
    let now = now.with_timezone(&Utc);
    format!("{}{:06}", now.timestamp(), now.timestamp_subsec_micros())
}

/// Append `suffix` to the final component of `path`.
pub fn with_suffix(path: &Path, suffix: &str) -> PathBuf {
    let mut raw = OsString::from(path.as_os_str());
    raw.push(suffix);
    PathBuf::from(raw)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2023, 11, 5).unwrap()
    }

    #[test]
    fn normalize_strips_separators_and_dots() {
        assert_eq!(normalize(Path::new("/a/b/")), PathBuf::from("a/b"));
        assert_eq!(normalize(Path::new("./a//b")), PathBuf::from("a/b"));
        assert_eq!(normalize(Path::new("a/../b")), PathBuf::from("b"));
        assert_eq!(normalize(Path::new("../../a")), PathBuf::from("a"));
        assert_eq!(normalize(Path::new("/")), PathBuf::new());
    }

    #[test]
    fn root_is_trimmed() {
        let root = GarbageRoot::new("/garbage/").unwrap();
        assert_eq!(root.as_str(), "garbage");

        let nested = GarbageRoot::new("//var/trash//").unwrap();
        assert_eq!(nested.as_str(), "var/trash");
    }

    #[test]
    fn root_name_matches_layout() {
        let root = GarbageRoot::new("a/./b").unwrap();
        assert_eq!(root.as_str(), "a/b");
        assert_eq!(
            root.entry_for(Path::new("f.txt"), day()),
            PathBuf::from(root.as_str()).join("20231105/f.txt")
        );

        assert_eq!(GarbageRoot::new("x/../y/").unwrap().as_str(), "y");
    }

    #[test]
    fn partition_is_parent_of_entries() {
        let root = GarbageRoot::default();
        assert_eq!(root.partition_for(day()), PathBuf::from("garbage/20231105"));
        assert!(
            root.entry_for(Path::new("a/b.txt"), day())
                .starts_with(root.partition_for(day()))
        );
    }

    #[test]
    fn empty_root_is_rejected() {
        for root in ["", "/", "///", "./", "a/.."] {
            let err = GarbageRoot::new(root).unwrap_err();
            assert!(
                matches!(err, FsError::InvalidConfiguration { .. }),
                "root {root:?} should be rejected"
            );
        }
    }

    #[test]
    fn default_root_is_garbage() {
        assert_eq!(GarbageRoot::default(), GarbageRoot::new("garbage").unwrap());
    }

    #[test]
    fn contains_is_component_wise() {
        let root = GarbageRoot::new("garbage").unwrap();
        assert!(root.contains(Path::new("garbage")));
        assert!(root.contains(Path::new("garbage/20230101/a.txt")));
        assert!(root.contains(Path::new("/garbage/x")));
        assert!(!root.contains(Path::new("garbage-collector.txt")));
        assert!(!root.contains(Path::new("dir/garbage/a.txt")));
    }

    #[test]
    fn entry_layout() {
        let root = GarbageRoot::default();
        assert_eq!(
            root.entry_for(Path::new("file.txt"), day()),
            PathBuf::from("garbage/20231105/file.txt")
        );
        assert_eq!(
            root.entry_for(Path::new("/dir/sub/file.txt"), day()),
            PathBuf::from("garbage/20231105/dir/sub/file.txt")
        );
    }

    #[test]
    fn date_partition_is_fixed_width() {
        let jan = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
        assert_eq!(date_partition(jan), "20240102");
    }

    #[test]
    fn collision_suffix_has_no_separator() {
        let now = Utc.timestamp_opt(1_700_000_000, 42_000).unwrap();
        assert_eq!(collision_suffix(&now), "1700000000000042");
    }

    #[test]
    fn suffix_is_appended_to_file_name() {
        let path = with_suffix(Path::new("garbage/20231105/file.txt"), "123");
        assert_eq!(path, PathBuf::from("garbage/20231105/file.txt123"));
    }
}
