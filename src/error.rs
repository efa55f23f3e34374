//! Error and diagnostic types for the installer.
//!
//! Two tiers, matching the run semantics:
//!
//! - [`ConfigError`] — **fatal**. The config file could not be loaded or
//!   parsed; the run aborts before any platform selection or copying.
//! - [`Diagnostic`] — **recorded, non-fatal**. A missing directory, a
//!   vanished source file, a bad config key for one package. Diagnostics are
//!   attributed to the package or step they concern, printed as warnings,
//!   and never stop processing of subsequent packages or files.

use std::path::PathBuf;

use thiserror::Error;

/// Fatal configuration-loading errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The config file path does not exist.
    #[error("config file not found: {}", .0.display())]
    NotFound(PathBuf),

    /// An I/O error occurred while reading the config file.
    #[error("reading config file {path}: {source}")]
    Io {
        /// Path to the file that could not be read.
        path: String,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// A non-empty, non-comment line is missing the `=` separator.
    #[error("invalid config line {line}: {text}")]
    InvalidLine { line: usize, text: String },
}

/// Non-fatal conditions recorded during a run.
///
/// Each variant is a human-readable message attributed by the caller to the
/// package or step it concerns. Accumulating these instead of returning
/// `Err` is what keeps a partial install a valid terminal outcome.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    /// The package's source directory does not exist.
    #[error("source path does not exist: {}", .path.display())]
    SourceDirMissing { path: PathBuf },

    /// The package's destination directory does not exist.
    #[error("destination path does not exist: {}", .path.display())]
    DestDirMissing { path: PathBuf },

    /// A required config key is absent.
    #[error("config key '{key}' is not set")]
    MissingKey { key: String },

    /// A single-valued config key carries more than one value.
    #[error("config key '{key}' expects a single value, found {count}")]
    MultiValued { key: String, count: usize },

    /// The source directory could not be listed.
    #[error("cannot list source directory {}: {message}", .path.display())]
    DirUnreadable { path: PathBuf, message: String },

    /// A matched source entry no longer exists at copy time.
    #[error("source file does not exist: {}", .path.display())]
    SourceMissing { path: PathBuf },

    /// Copying one item failed.
    #[error("copy failed for {}: {message}", .path.display())]
    CopyFailed { path: PathBuf, message: String },

    /// The library loader config file named by the config is absent.
    #[error("library config file not found: {}", .path.display())]
    LibraryConfigMissing { path: PathBuf },

    /// Appending the library path to the loader config failed.
    #[error("updating {}: {message}", .path.display())]
    PatchFailed { path: PathBuf, message: String },

    /// The shared-library cache refresh command failed or could not run.
    #[error("library cache refresh failed: {message}")]
    CacheRefreshFailed { message: String },
}
