//! # Per-call configuration
//!
//! Every write, copy, move and directory creation receives a [`Config`]: an
//! opaque key/value bag the backend may interpret. Extending a config never
//! mutates it; [`Config::extend`] and [`Config::with`] return a new value.
//!
//! ```rust
//! use garbage_fs::Config;
//!
//! let base = Config::new();
//! let extended = base.with(Config::OPTION_VISIBILITY, "public");
//!
//! assert_eq!(base.get(Config::OPTION_VISIBILITY), None);
//! assert_eq!(extended.get(Config::OPTION_VISIBILITY), Some("public"));
//! ```

use std::collections::BTreeMap;

use crate::Visibility;

/// Immutable key/value configuration passed through filesystem calls.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Config {
    options: BTreeMap<String, String>,
}

impl Config {
    /// Visibility to apply to the written file.
    pub const OPTION_VISIBILITY: &'static str = "visibility";
    /// Visibility to apply to directories created along the way.
    pub const OPTION_DIRECTORY_VISIBILITY: &'static str = "directory_visibility";

    /// An empty config.
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up an option.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.options.get(key).map(String::as_str)
    }

    /// Look up an option, falling back to `default`.
    pub fn get_or<'a>(&'a self, key: &str, default: &'a str) -> &'a str {
        self.get(key).unwrap_or(default)
    }

    /// The visibility option, if set and non-empty.
    pub fn visibility(&self) -> Option<Visibility> {
        self.get(Self::OPTION_VISIBILITY)
            .filter(|v| !v.is_empty())
            .map(Visibility::new)
    }

    /// Return a copy with all `options` layered over this config.
    pub fn extend<K, V, I>(&self, options: I) -> Self
    where
        K: Into<String>,
        V: Into<String>,
        I: IntoIterator<Item = (K, V)>,
    {
        let mut extended = self.options.clone();
        extended.extend(options.into_iter().map(|(k, v)| (k.into(), v.into())));
        Self { options: extended }
    }

    /// Return a copy with a single option set.
    pub fn with(&self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.extend([(key.into(), value.into())])
    }

    /// Return a copy with the visibility option set.
    pub fn with_visibility(&self, visibility: &Visibility) -> Self {
        self.with(Self::OPTION_VISIBILITY, visibility.as_str())
    }

    /// Number of options.
    pub fn len(&self) -> usize {
        self.options.len()
    }

    /// Returns `true` if no options are set.
    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Config {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Config::new().extend(iter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extend_leaves_original_untouched() {
        let base = Config::from_iter([("a", "1")]);
        let extended = base.extend([("b", "2"), ("a", "3")]);

        assert_eq!(base.get("a"), Some("1"));
        assert_eq!(base.get("b"), None);
        assert_eq!(extended.get("a"), Some("3"));
        assert_eq!(extended.get("b"), Some("2"));
        assert_eq!(extended.len(), 2);
    }

    #[test]
    fn visibility_ignores_empty_value() {
        let config = Config::new().with(Config::OPTION_VISIBILITY, "");
        assert_eq!(config.visibility(), None);

        let config = Config::new().with_visibility(&Visibility::private());
        assert_eq!(config.visibility(), Some(Visibility::private()));
    }

    #[test]
    fn get_or_falls_back() {
        let config = Config::new();
        assert!(config.is_empty());
        assert_eq!(config.get_or("missing", "fallback"), "fallback");
    }
}
