//! Post-install library path registration for Linux targets.
//!
//! Idempotently appends the runtime library search path to the system
//! loader config file (`/etc/ld.so.conf` by convention, named by the
//! `linux_library_config_file` key), then refreshes the shared-library
//! cache via `ldconfig`. A path that is already present is reported with
//! its line number and the file is left byte-for-byte unchanged.

use std::io::Write as _;
use std::path::{Path, PathBuf};

use crate::config::{ConfigStore, SingleValue};
use crate::error::Diagnostic;
use crate::exec::Executor;
use crate::logging::Logger;

/// Config key naming the loader config file.
pub const LIBRARY_CONFIG_KEY: &str = "linux_library_config_file";
/// Config key naming the library search path to register.
pub const LIBRARY_PATH_KEY: &str = "linux_library_path";

/// Result of the registration step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PatchOutcome {
    /// The path was already present; `line` is the 0-based line number.
    AlreadyRegistered { line: usize },
    /// The path was appended to the loader config file.
    Appended,
}

/// Run the full post-install step: register the path, then refresh the
/// cache. Only called for Linux platforms.
///
/// Returns the diagnostics collected along the way; all are non-fatal.
/// The cache refresh is skipped when registration could not run at all
/// (matching the original installer, which only invoked the refresh after
/// finding the loader config file).
pub fn run(store: &ConfigStore, executor: &dyn Executor, log: &Logger) -> Vec<Diagnostic> {
    let outcome = match register_library_path(store, log) {
        Ok(outcome) => outcome,
        Err(diag) => return vec![diag],
    };

    match outcome {
        PatchOutcome::AlreadyRegistered { line } => {
            log.info(&format!("library path already registered on line {line}"));
        }
        PatchOutcome::Appended => log.info("library path registered"),
    }

    match refresh_cache(executor) {
        Ok(()) => {
            log.debug("shared library cache refreshed");
            vec![]
        }
        Err(diag) => vec![diag],
    }
}

/// Append the library path to the loader config file unless present.
///
/// # Errors
///
/// Returns a [`Diagnostic`] when a config key is missing or multi-valued,
/// the loader config file does not exist, or the file cannot be updated.
pub fn register_library_path(
    store: &ConfigStore,
    log: &Logger,
) -> Result<PatchOutcome, Diagnostic> {
    let config_file = PathBuf::from(single_value(store, LIBRARY_CONFIG_KEY)?);
    let library_path = single_value(store, LIBRARY_PATH_KEY)?;

    if !config_file.is_file() {
        return Err(Diagnostic::LibraryConfigMissing { path: config_file });
    }

    let content =
        std::fs::read_to_string(&config_file).map_err(|e| Diagnostic::PatchFailed {
            path: config_file.clone(),
            message: e.to_string(),
        })?;

    if let Some(line) = find_line(&content, library_path) {
        return Ok(PatchOutcome::AlreadyRegistered { line });
    }

    log.debug(&format!(
        "appending {library_path} to {}",
        config_file.display()
    ));
    append_line(&config_file, library_path).map_err(|e| Diagnostic::PatchFailed {
        path: config_file,
        message: e.to_string(),
    })?;
    Ok(PatchOutcome::Appended)
}

/// Refresh the shared-library cache, capturing the command's outcome.
///
/// # Errors
///
/// Returns [`Diagnostic::CacheRefreshFailed`] when `ldconfig` cannot be
/// spawned or exits non-zero; its stderr is carried in the message.
pub fn refresh_cache(executor: &dyn Executor) -> Result<(), Diagnostic> {
    let program = which::which("ldconfig").unwrap_or_else(|_| PathBuf::from("/sbin/ldconfig"));
    let result = executor
        .run_unchecked(&program.to_string_lossy(), &[])
        .map_err(|e| Diagnostic::CacheRefreshFailed {
            message: e.to_string(),
        })?;

    if result.success {
        Ok(())
    } else {
        Err(Diagnostic::CacheRefreshFailed {
            message: format!(
                "exit {}: {}",
                result.code.unwrap_or(-1),
                result.stderr.trim()
            ),
        })
    }
}

/// Find the 0-based line number of the first line containing `needle`.
fn find_line(content: &str, needle: &str) -> Option<usize> {
    content.lines().position(|line| line.contains(needle))
}

/// Append a newline-padded copy of `path` to the file.
fn append_line(file: &Path, path: &str) -> std::io::Result<()> {
    let mut f = std::fs::OpenOptions::new().append(true).open(file)?;
    write!(f, "\n{path}\n")
}

fn single_value<'a>(store: &'a ConfigStore, key: &str) -> Result<&'a str, Diagnostic> {
    match store.single(key) {
        SingleValue::One(value) => Ok(value),
        SingleValue::Unset => Err(Diagnostic::MissingKey {
            key: key.to_string(),
        }),
        SingleValue::Many(count) => Err(Diagnostic::MultiValued {
            key: key.to_string(),
            count,
        }),
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use crate::exec::ExecResult;
    use std::fs;

    /// Stub executor returning a canned result, recording nothing.
    struct StubExecutor {
        success: bool,
        stderr: &'static str,
    }

    impl Executor for StubExecutor {
        fn run_unchecked(&self, _: &str, _: &[&str]) -> anyhow::Result<ExecResult> {
            Ok(ExecResult {
                stdout: String::new(),
                stderr: self.stderr.to_string(),
                success: self.success,
                code: if self.success { Some(0) } else { Some(1) },
            })
        }
    }

    fn store_for(config_file: &Path, lib_path: &str) -> ConfigStore {
        ConfigStore::parse(&format!(
            "linux_library_config_file = {}\nlinux_library_path = {lib_path}\n",
            config_file.display()
        ))
        .expect("test config should parse")
    }

    #[test]
    fn find_line_is_zero_based() {
        assert_eq!(find_line("a\nb\nc\n", "b"), Some(1));
        assert_eq!(find_line("a\nb\n", "a"), Some(0));
        assert_eq!(find_line("a\nb\n", "z"), None);
    }

    #[test]
    fn find_line_matches_substring() {
        assert_eq!(find_line("include /usr/local/lib/extra\n", "/usr/local/lib"), Some(0));
    }

    #[test]
    fn appends_path_when_absent() {
        let tmp = tempfile::tempdir().unwrap();
        let conf = tmp.path().join("ld.so.conf");
        fs::write(&conf, "include ld.so.conf.d/*.conf\n").unwrap();

        let store = store_for(&conf, "/usr/local/lib");
        let outcome = register_library_path(&store, &Logger::new(false)).unwrap();
        assert_eq!(outcome, PatchOutcome::Appended);
        assert_eq!(
            fs::read_to_string(&conf).unwrap(),
            "include ld.so.conf.d/*.conf\n\n/usr/local/lib\n"
        );
    }

    #[test]
    fn second_run_is_byte_for_byte_idempotent() {
        let tmp = tempfile::tempdir().unwrap();
        let conf = tmp.path().join("ld.so.conf");
        fs::write(&conf, "include ld.so.conf.d/*.conf\n").unwrap();
        let store = store_for(&conf, "/usr/local/lib");
        let log = Logger::new(false);

        register_library_path(&store, &log).unwrap();
        let after_first = fs::read(&conf).unwrap();

        let outcome = register_library_path(&store, &log).unwrap();
        // Appended as "\n<path>\n": line 0 is the include, line 1 the pad.
        assert_eq!(outcome, PatchOutcome::AlreadyRegistered { line: 2 });
        assert_eq!(fs::read(&conf).unwrap(), after_first);
    }

    #[test]
    fn preexisting_path_reports_line_number() {
        let tmp = tempfile::tempdir().unwrap();
        let conf = tmp.path().join("ld.so.conf");
        fs::write(&conf, "/usr/local/lib\n").unwrap();

        let store = store_for(&conf, "/usr/local/lib");
        let outcome = register_library_path(&store, &Logger::new(false)).unwrap();
        assert_eq!(outcome, PatchOutcome::AlreadyRegistered { line: 0 });
    }

    #[test]
    fn missing_config_file_is_diagnosed() {
        let tmp = tempfile::tempdir().unwrap();
        let conf = tmp.path().join("absent.conf");
        let store = store_for(&conf, "/usr/local/lib");

        let err = register_library_path(&store, &Logger::new(false)).unwrap_err();
        assert_eq!(err, Diagnostic::LibraryConfigMissing { path: conf });
    }

    #[test]
    fn missing_key_is_diagnosed() {
        let store = ConfigStore::parse("linux_library_path = /usr/local/lib\n")
            .expect("test config should parse");
        let err = register_library_path(&store, &Logger::new(false)).unwrap_err();
        assert_eq!(
            err,
            Diagnostic::MissingKey {
                key: LIBRARY_CONFIG_KEY.to_string(),
            }
        );
    }

    #[test]
    fn refresh_failure_surfaces_stderr() {
        let executor = StubExecutor {
            success: false,
            stderr: "permission denied",
        };
        let err = refresh_cache(&executor).unwrap_err();
        assert!(matches!(err, Diagnostic::CacheRefreshFailed { ref message }
            if message.contains("permission denied")));
    }

    #[test]
    fn refresh_success_is_ok() {
        let executor = StubExecutor {
            success: true,
            stderr: "",
        };
        assert!(refresh_cache(&executor).is_ok());
    }

    #[test]
    fn run_skips_refresh_when_config_file_missing() {
        let tmp = tempfile::tempdir().unwrap();
        let store = store_for(&tmp.path().join("absent.conf"), "/usr/local/lib");
        // A failing stub: if refresh ran anyway, a second diagnostic would
        // appear.
        let executor = StubExecutor {
            success: false,
            stderr: "should not run",
        };

        let diags = run(&store, &executor, &Logger::new(false));
        assert_eq!(diags.len(), 1);
        assert!(matches!(diags[0], Diagnostic::LibraryConfigMissing { .. }));
    }
}
