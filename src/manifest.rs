//! Package list resolution.
//!
//! A package's existence is implicit: it is inferred purely from membership
//! in the platform's package-list entry (`linux_32 = pkgA, pkgB`). Each
//! [`PackageRef`] names the group of three config keys that describe one
//! deployable unit.

use std::fmt;

use crate::config::ConfigStore;
use crate::platform::Platform;

/// A named group of `<id>_source`, `<id>_destination`, `<id>_file` keys.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageRef {
    pub id: String,
}

impl PackageRef {
    #[must_use]
    pub fn new(id: &str) -> Self {
        Self { id: id.to_string() }
    }

    /// Key holding the package's source directory.
    #[must_use]
    pub fn source_key(&self) -> String {
        format!("{}_source", self.id)
    }

    /// Key holding the package's destination directory.
    #[must_use]
    pub fn destination_key(&self) -> String {
        format!("{}_destination", self.id)
    }

    /// Key holding the package's file pattern.
    #[must_use]
    pub fn file_key(&self) -> String {
        format!("{}_file", self.id)
    }
}

impl fmt::Display for PackageRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.id)
    }
}

/// Collect the ordered package list registered for `platform`.
///
/// Empty-string entries are discarded. An absent key yields an empty list,
/// making the install a no-op for that platform rather than an error.
#[must_use]
pub fn resolve(store: &ConfigStore, platform: Platform) -> Vec<PackageRef> {
    store
        .lookup(platform.key())
        .iter()
        .filter(|id| !id.is_empty())
        .map(|id| PackageRef::new(id))
        .collect()
}
