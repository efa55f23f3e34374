//! Flat key/value config store.
//!
//! Format:
//! ```text
//! # comment line
//! key = value1, value2, value3
//! ```
//! Whitespace and NUL bytes are trimmed from line ends, comma-separated
//! values are each trimmed independently, and `#`-prefixed or blank lines
//! are ignored. Keys are expected to be unique; when a file repeats a key,
//! the first occurrence wins on lookup and later ones are never merged.

use std::path::Path;

use crate::error::ConfigError;

/// Result of a single-valued key lookup.
///
/// Several keys (`<id>_source`, `<id>_destination`, `<id>_file`,
/// `linux_library_config_file`, `linux_library_path`) are single-valued by
/// schema. A config that supplies a value list for one of them is rejected
/// by the caller rather than silently collapsed to its first element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SingleValue<'a> {
    /// The key is absent (or present with no value at all).
    Unset,
    /// Exactly one value.
    One(&'a str),
    /// More than one value; carries the offending count.
    Many(usize),
}

/// Immutable key/value store built once at startup from the config file.
#[derive(Debug, Clone, Default)]
pub struct ConfigStore {
    entries: Vec<(String, Vec<String>)>,
}

impl ConfigStore {
    /// Load and parse the config file at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::NotFound`] if the path does not exist,
    /// [`ConfigError::Io`] if it cannot be read, and
    /// [`ConfigError::InvalidLine`] for a non-comment line without `=`.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::NotFound(path.to_path_buf()));
        }
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::parse(&content)
    }

    /// Parse config content from a string.
    ///
    /// # Examples
    ///
    /// ```
    /// use sdk_installer::config::ConfigStore;
    ///
    /// let store = ConfigStore::parse("linux_64 = pkgA, pkgB\n").unwrap();
    /// assert_eq!(store.lookup("linux_64"), ["pkgA", "pkgB"]);
    /// assert!(store.lookup("osx_64").is_empty());
    /// ```
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidLine`] for a non-empty, non-comment
    /// line with no `=` separator.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        let mut entries = Vec::new();

        for (line_num, raw) in content.lines().enumerate() {
            let line = clean(raw);
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let Some((key, value)) = line.split_once('=') else {
                return Err(ConfigError::InvalidLine {
                    line: line_num + 1,
                    text: line.to_string(),
                });
            };

            let values = value.split(',').map(|v| clean(v).to_string()).collect();
            entries.push((clean(key).to_string(), values));
        }

        Ok(Self { entries })
    }

    /// Look up all values for `key`, in file order.
    ///
    /// Returns an empty slice when the key is absent — callers treat empty
    /// as "unset". Duplicate keys resolve to the first occurrence.
    #[must_use]
    pub fn lookup(&self, key: &str) -> &[String] {
        self.entries
            .iter()
            .find(|(k, _)| k.as_str() == key)
            .map_or(&[], |(_, values)| values.as_slice())
    }

    /// Look up a key declared single-valued by the schema.
    #[must_use]
    pub fn single(&self, key: &str) -> SingleValue<'_> {
        match self.lookup(key) {
            [] => SingleValue::Unset,
            [one] => SingleValue::One(one.as_str()),
            many => SingleValue::Many(many.len()),
        }
    }

    /// Number of entries loaded from the file.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the store holds no entries at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Trim whitespace and NUL bytes from both ends of a fragment.
///
/// Packaged config files have been observed with trailing NULs, which plain
/// `str::trim` would keep.
fn clean(s: &str) -> &str {
    s.trim_matches(|c: char| c.is_whitespace() || c == '\0')
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;

    #[test]
    fn parse_simple_entry() {
        let store = ConfigStore::parse("key = value\n").expect("test data should parse");
        assert_eq!(store.lookup("key"), ["value"]);
    }

    #[test]
    fn values_round_trip_trimmed() {
        let store = ConfigStore::parse("key = a, b, c\n").expect("test data should parse");
        assert_eq!(store.lookup("key"), ["a", "b", "c"]);
    }

    #[test]
    fn value_order_preserved() {
        let store = ConfigStore::parse("list = z, a, m\n").expect("test data should parse");
        assert_eq!(store.lookup("list"), ["z", "a", "m"]);
    }

    #[test]
    fn comments_and_blank_lines_ignored() {
        let store = ConfigStore::parse("# comment\n\nkey = v\n# trailing\n")
            .expect("test data should parse");
        assert_eq!(store.len(), 1);
        assert_eq!(store.lookup("key"), ["v"]);
    }

    #[test]
    fn absent_key_returns_empty_slice() {
        let store = ConfigStore::parse("key = v\n").expect("test data should parse");
        assert!(store.lookup("missing").is_empty());
    }

    #[test]
    fn duplicate_key_first_occurrence_wins() {
        let store =
            ConfigStore::parse("key = first\nkey = second\n").expect("test data should parse");
        assert_eq!(store.lookup("key"), ["first"]);
    }

    #[test]
    fn nul_bytes_stripped_from_line_ends() {
        let store = ConfigStore::parse("key = value\0\0\n").expect("test data should parse");
        assert_eq!(store.lookup("key"), ["value"]);
    }

    #[test]
    fn equals_in_value_preserved() {
        // Only the first '=' separates key from value.
        let store = ConfigStore::parse("key = a=b\n").expect("test data should parse");
        assert_eq!(store.lookup("key"), ["a=b"]);
    }

    #[test]
    fn line_without_equals_is_rejected() {
        let err = ConfigStore::parse("key = v\norphan line\n").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidLine { line: 2, .. }));
    }

    #[test]
    fn empty_elements_kept_in_store() {
        // Empty list entries survive parsing; the manifest resolver is the
        // layer that discards them.
        let store = ConfigStore::parse("key = a,,b\n").expect("test data should parse");
        assert_eq!(store.lookup("key"), ["a", "", "b"]);
    }

    #[test]
    fn single_unset() {
        let store = ConfigStore::parse("").expect("empty input should parse");
        assert_eq!(store.single("key"), SingleValue::Unset);
    }

    #[test]
    fn single_one() {
        let store = ConfigStore::parse("key = v\n").expect("test data should parse");
        assert_eq!(store.single("key"), SingleValue::One("v"));
    }

    #[test]
    fn single_many() {
        let store = ConfigStore::parse("key = a, b\n").expect("test data should parse");
        assert_eq!(store.single("key"), SingleValue::Many(2));
    }

    #[test]
    fn load_missing_file_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let err = ConfigStore::load(&dir.path().join("nope.cfg")).unwrap_err();
        assert!(matches!(err, ConfigError::NotFound(_)));
    }

    #[test]
    fn load_reads_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("install.cfg");
        std::fs::write(&path, "linux_64 = pkgA\n").unwrap();
        let store = ConfigStore::load(&path).unwrap();
        assert_eq!(store.lookup("linux_64"), ["pkgA"]);
    }
}
