//! Logging facade and per-package summary collection.
//!
//! Console output goes through `tracing`; [`init`] installs the fmt
//! subscriber with a level derived from the CLI flags (`RUST_LOG` can
//! override it). The [`Logger`] additionally collects one entry per
//! installed package for the end-of-run summary.

use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

/// Install the global tracing subscriber.
///
/// `-v` lowers the level to DEBUG (every file operation is printed), `-w`
/// raises it to WARN (only warnings and errors). `RUST_LOG` takes
/// precedence when set.
pub fn init(verbose: bool, warnings_only: bool) {
    let default_level = if verbose {
        "debug"
    } else if warnings_only {
        "warn"
    } else {
        "info"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .init();
}

/// Status of one package in the run summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PackageStatus {
    Ok,
    Skipped,
    Failed,
}

/// One recorded package outcome.
#[derive(Debug, Clone)]
pub struct PackageEntry {
    pub name: String,
    pub status: PackageStatus,
    pub message: Option<String>,
}

/// Logger with verbosity awareness and summary collection.
#[derive(Debug)]
pub struct Logger {
    verbose: bool,
    packages: Mutex<Vec<PackageEntry>>,
}

impl Logger {
    #[must_use]
    pub fn new(verbose: bool) -> Self {
        Self {
            verbose,
            packages: Mutex::new(Vec::new()),
        }
    }

    /// Whether per-file operations should be narrated.
    #[must_use]
    pub const fn verbose(&self) -> bool {
        self.verbose
    }

    pub fn error(&self, msg: &str) {
        tracing::error!("{msg}");
    }

    pub fn warn(&self, msg: &str) {
        tracing::warn!("{msg}");
    }

    /// Log a stage header (major section of the run).
    pub fn stage(&self, msg: &str) {
        tracing::info!("==> {msg}");
    }

    pub fn info(&self, msg: &str) {
        tracing::info!("{msg}");
    }

    pub fn debug(&self, msg: &str) {
        tracing::debug!("{msg}");
    }

    /// Record a package outcome for the summary.
    pub fn record(&self, name: &str, status: PackageStatus, message: Option<&str>) {
        if let Ok(mut guard) = self.packages.lock() {
            guard.push(PackageEntry {
                name: name.to_string(),
                status,
                message: message.map(String::from),
            });
        }
    }

    /// Count the recorded failures.
    #[must_use]
    pub fn failure_count(&self) -> usize {
        self.packages.lock().map_or(0, |guard| {
            guard
                .iter()
                .filter(|p| p.status == PackageStatus::Failed)
                .count()
        })
    }

    /// Return a clone of all recorded entries (test inspection).
    #[must_use]
    pub fn entries(&self) -> Vec<PackageEntry> {
        self.packages.lock().map_or_else(|_| vec![], |g| g.clone())
    }

    /// Print the summary of all recorded packages.
    pub fn print_summary(&self) {
        let packages = match self.packages.lock() {
            Ok(guard) => guard.clone(),
            Err(_) => return,
        };
        if packages.is_empty() {
            return;
        }

        self.stage("Summary");

        let mut ok = 0u32;
        let mut skipped = 0u32;
        let mut failed = 0u32;

        for package in &packages {
            let icon = match package.status {
                PackageStatus::Ok => {
                    ok += 1;
                    "✓"
                }
                PackageStatus::Skipped => {
                    skipped += 1;
                    "○"
                }
                PackageStatus::Failed => {
                    failed += 1;
                    "✗"
                }
            };
            let suffix = package
                .message
                .as_ref()
                .map_or_else(String::new, |msg| format!(" ({msg})"));
            self.info(&format!("{icon} {}{suffix}", package.name));
        }

        let total = ok + skipped + failed;
        self.info(&format!(
            "{total} packages: {ok} ok, {skipped} skipped, {failed} failed"
        ));
    }
}
