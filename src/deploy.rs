//! Batch copier.
//!
//! Copies an [`Expansion`]'s matches from source to destination, one item at
//! a time. Every failure is recorded as a [`Diagnostic`] and the batch keeps
//! going; a partial copy is a reportable outcome, not an abort.

use std::fmt;
use std::path::Path;

use crate::error::Diagnostic;
use crate::logging::Logger;
use crate::matcher::{Expansion, MatchKind};

/// Outcome of copying one package's matches.
#[derive(Debug, Default)]
pub struct CopyReport {
    /// Number of items copied (a directory subtree counts as one item).
    pub copied: usize,
    /// Everything that went wrong, in the order it was hit.
    pub diagnostics: Vec<Diagnostic>,
}

impl CopyReport {
    /// Whether the package copied without any recorded problem.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.diagnostics.is_empty()
    }
}

impl fmt::Display for CopyReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.diagnostics.is_empty() {
            write!(f, "{} copied", self.copied)
        } else {
            write!(f, "{} copied, {} failed", self.copied, self.diagnostics.len())
        }
    }
}

/// Copy every match of `expansion` into its destination directory.
///
/// Directories are copied recursively to `destination/<name>`; regular files
/// are copied into the destination preserving their name. A source entry
/// that vanished since expansion records [`Diagnostic::SourceMissing`] and
/// the batch continues.
pub fn copy_package(expansion: &Expansion, log: &Logger) -> CopyReport {
    let mut report = CopyReport::default();

    for matched in &expansion.matches {
        let src = expansion.source.join(&matched.name);
        let dst = expansion.destination.join(&matched.name);

        if !src.exists() {
            report.diagnostics.push(Diagnostic::SourceMissing { path: src });
            continue;
        }

        let result = match matched.kind {
            MatchKind::Directory => copy_dir_recursive(&src, &dst),
            MatchKind::File => std::fs::copy(&src, &dst).map(|_| ()),
        };

        match result {
            Ok(()) => {
                log.debug(&format!(
                    "copied {} -> {}",
                    src.display(),
                    expansion.destination.display()
                ));
                report.copied += 1;
            }
            Err(e) => report.diagnostics.push(Diagnostic::CopyFailed {
                path: src,
                message: e.to_string(),
            }),
        }
    }

    report
}

/// Recursively copy the directory `src` to `dst`, creating `dst` as needed.
fn copy_dir_recursive(src: &Path, dst: &Path) -> std::io::Result<()> {
    std::fs::create_dir_all(dst)?;
    for entry in std::fs::read_dir(src)? {
        let entry = entry?;
        let target = dst.join(entry.file_name());
        if entry.file_type()?.is_dir() {
            copy_dir_recursive(&entry.path(), &target)?;
        } else {
            std::fs::copy(entry.path(), &target)?;
        }
    }
    Ok(())
}
