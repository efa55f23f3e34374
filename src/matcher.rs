//! File pattern classification and per-package expansion.
//!
//! A package's `<id>_file` value selects entries of its source directory.
//! Classification inspects the whole string rather than splitting at the
//! first dot, so multi-dot filenames behave deterministically:
//!
//! - `*.<ext>` matches a *file* whose name ends in `.<ext>` — so
//!   `archive.tar.gz` matches both `*.gz` and `*.tar.gz`.
//! - `<name>.*` matches any entry whose name up to the first dot equals
//!   `<name>` — so `archive.tar.gz` matches `archive.*`, and a dot-less
//!   entry named exactly `<name>` matches too.

use std::path::PathBuf;

use crate::config::{ConfigStore, SingleValue};
use crate::error::Diagnostic;
use crate::manifest::PackageRef;

/// Classification of a package's file-selector string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilePattern {
    /// Exactly one named entry, file or directory.
    Exact(String),
    /// `*.<ext>`: regular files whose name ends in `.<ext>`.
    Extension(String),
    /// `<name>.*`: entries whose name before the first dot equals `<name>`.
    Prefix(String),
    /// `*.*`: every entry in the source directory.
    Any,
}

impl FilePattern {
    /// Classify a raw `<id>_file` value.
    ///
    /// # Examples
    ///
    /// ```
    /// use sdk_installer::matcher::FilePattern;
    ///
    /// assert_eq!(FilePattern::classify("*.*"), FilePattern::Any);
    /// assert_eq!(FilePattern::classify("*.so"), FilePattern::Extension("so".into()));
    /// assert_eq!(FilePattern::classify("report.*"), FilePattern::Prefix("report".into()));
    /// assert_eq!(FilePattern::classify("readme.txt"), FilePattern::Exact("readme.txt".into()));
    /// ```
    #[must_use]
    pub fn classify(raw: &str) -> Self {
        if raw == "*.*" {
            Self::Any
        } else if let Some(ext) = raw.strip_prefix("*.") {
            Self::Extension(ext.to_string())
        } else if let Some(name) = raw.strip_suffix(".*") {
            Self::Prefix(name.to_string())
        } else {
            Self::Exact(raw.to_string())
        }
    }

    /// Whether a directory entry with this name and kind matches.
    #[must_use]
    pub fn matches_entry(&self, name: &str, is_dir: bool) -> bool {
        match self {
            Self::Any => true,
            Self::Extension(ext) => !is_dir && name.ends_with(&format!(".{ext}")),
            Self::Prefix(stem) => name.split('.').next() == Some(stem.as_str()),
            Self::Exact(exact) => name == exact,
        }
    }
}

/// Whether a matched source entry is a regular file or a directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchKind {
    File,
    Directory,
}

/// One concrete entry selected from the source directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchedFile {
    /// Entry name relative to the source directory.
    pub name: String,
    pub kind: MatchKind,
}

/// A package resolved to concrete directories and matches, ready to copy.
#[derive(Debug, Clone)]
pub struct Expansion {
    pub package: PackageRef,
    pub source: PathBuf,
    pub destination: PathBuf,
    pub matches: Vec<MatchedFile>,
}

/// Expand a package's config keys into concrete matches.
///
/// Transient per-package computation: nothing here is cached between runs.
///
/// # Errors
///
/// Returns the accumulated diagnostics when the package cannot be expanded:
/// a missing or multi-valued key, or a missing source/destination directory
/// (both are reported when both are absent). The caller records these and
/// moves on to the next package; expansion failure is never fatal.
pub fn expand(store: &ConfigStore, package: &PackageRef) -> Result<Expansion, Vec<Diagnostic>> {
    let mut diags = Vec::new();

    let destination = lookup_single(store, &package.destination_key(), &mut diags);
    let source = lookup_single(store, &package.source_key(), &mut diags);
    let file = lookup_single(store, &package.file_key(), &mut diags);

    let (Some(destination), Some(source), Some(file)) = (destination, source, file) else {
        return Err(diags);
    };
    let destination = PathBuf::from(destination);
    let source = PathBuf::from(source);

    if !source.is_dir() {
        diags.push(Diagnostic::SourceDirMissing {
            path: source.clone(),
        });
    }
    if !destination.is_dir() {
        diags.push(Diagnostic::DestDirMissing {
            path: destination.clone(),
        });
    }
    if !diags.is_empty() {
        return Err(diags);
    }

    let pattern = FilePattern::classify(file);
    let matches = match &pattern {
        // An exact name is matched without listing the directory; if the
        // entry is absent the deployer records SourceMissing at copy time.
        FilePattern::Exact(name) => {
            let kind = if source.join(name).is_dir() {
                MatchKind::Directory
            } else {
                MatchKind::File
            };
            vec![MatchedFile {
                name: name.clone(),
                kind,
            }]
        }
        _ => list_matches(&source, &pattern)?,
    };

    Ok(Expansion {
        package: package.clone(),
        source,
        destination,
        matches,
    })
}

/// List the source directory and keep entries the pattern selects.
///
/// Entries are sorted by name so repeated runs report in a stable order.
fn list_matches(
    source: &std::path::Path,
    pattern: &FilePattern,
) -> Result<Vec<MatchedFile>, Vec<Diagnostic>> {
    let entries = std::fs::read_dir(source).map_err(|e| {
        vec![Diagnostic::DirUnreadable {
            path: source.to_path_buf(),
            message: e.to_string(),
        }]
    })?;

    let mut matches = Vec::new();
    for entry in entries.flatten() {
        let name = entry.file_name().to_string_lossy().into_owned();
        let is_dir = entry.path().is_dir();
        if pattern.matches_entry(&name, is_dir) {
            matches.push(MatchedFile {
                name,
                kind: if is_dir {
                    MatchKind::Directory
                } else {
                    MatchKind::File
                },
            });
        }
    }
    matches.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(matches)
}

fn lookup_single<'a>(
    store: &'a ConfigStore,
    key: &str,
    diags: &mut Vec<Diagnostic>,
) -> Option<&'a str> {
    match store.single(key) {
        SingleValue::One(value) => Some(value),
        SingleValue::Unset => {
            diags.push(Diagnostic::MissingKey {
                key: key.to_string(),
            });
            None
        }
        SingleValue::Many(count) => {
            diags.push(Diagnostic::MultiValued {
                key: key.to_string(),
                count,
            });
            None
        }
    }
}
