//! Top-level run orchestration.
//!
//! A run is: load the config store (the only fatal step) → choose the
//! target platform interactively → resolve the platform's package list →
//! expand and copy each package → register the library path on Linux →
//! print the summary. Every per-package problem is recorded and reported;
//! the process exits 0 for any completed run, with a non-zero exit reserved
//! for a config file that cannot be loaded at all.

use anyhow::{Context as _, Result};

use crate::cli::Cli;
use crate::config::ConfigStore;
use crate::deploy;
use crate::exec::{Executor, SystemExecutor};
use crate::logging::{Logger, PackageStatus};
use crate::manifest;
use crate::matcher;
use crate::patcher;
use crate::platform::{self, Platform};

/// Everything an install step needs, passed explicitly — no ambient state.
pub struct Context<'a> {
    pub store: &'a ConfigStore,
    pub platform: Platform,
    pub executor: &'a dyn Executor,
    pub log: &'a Logger,
}

impl std::fmt::Debug for Context<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Context")
            .field("platform", &self.platform)
            .field("store", &self.store.len())
            .finish_non_exhaustive()
    }
}

/// Run the installer end to end.
///
/// # Errors
///
/// Returns an error only when the config file cannot be loaded; everything
/// after that point is recorded as diagnostics and the run completes.
pub fn run(cli: &Cli, log: &Logger) -> Result<()> {
    let store = ConfigStore::load(&cli.config)
        .with_context(|| format!("loading {}", cli.config.display()))?;
    log.debug(&format!(
        "loaded {} entries from {}",
        store.len(),
        cli.config.display()
    ));

    let Some(target) = platform::choose(&mut std::io::stdin().lock())? else {
        log.info("installation cancelled");
        return Ok(());
    };

    let executor = SystemExecutor;
    let ctx = Context {
        store: &store,
        platform: target,
        executor: &executor,
        log,
    };

    log.stage(&format!("Installing packages for {target}"));
    install_packages(&ctx);

    if target.is_linux() {
        log.stage("Registering library path");
        run_post_install(&ctx);
    }

    log.print_summary();
    Ok(())
}

/// Expand and copy every package registered for the context's platform.
pub fn install_packages(ctx: &Context<'_>) {
    let packages = manifest::resolve(ctx.store, ctx.platform);
    if packages.is_empty() {
        ctx.log
            .info(&format!("no packages registered for {}", ctx.platform));
        return;
    }

    for package in &packages {
        match matcher::expand(ctx.store, package) {
            Ok(expansion) => {
                let report = deploy::copy_package(&expansion, ctx.log);
                for diag in &report.diagnostics {
                    ctx.log.warn(&format!("{package}: {diag}"));
                }
                let line = format!("{package}: {report}");
                if ctx.log.verbose() {
                    // The per-file debug lines already narrated this package.
                    ctx.log.debug(&line);
                } else {
                    ctx.log.info(&line);
                }
                let status = if report.is_clean() {
                    PackageStatus::Ok
                } else {
                    PackageStatus::Failed
                };
                ctx.log
                    .record(&package.id, status, Some(&report.to_string()));
            }
            Err(diags) => {
                for diag in &diags {
                    ctx.log.warn(&format!("{package}: {diag}"));
                }
                let message = diags
                    .iter()
                    .map(ToString::to_string)
                    .collect::<Vec<_>>()
                    .join("; ");
                ctx.log
                    .record(&package.id, PackageStatus::Failed, Some(&message));
            }
        }
    }
}

/// Register the runtime library path and refresh the loader cache.
fn run_post_install(ctx: &Context<'_>) {
    let diags = patcher::run(ctx.store, ctx.executor, ctx.log);
    for diag in &diags {
        ctx.log.warn(&diag.to_string());
    }
    let status = if diags.is_empty() {
        PackageStatus::Ok
    } else {
        PackageStatus::Failed
    };
    let message = diags.first().map(ToString::to_string);
    ctx.log
        .record("library path", status, message.as_deref());
}
