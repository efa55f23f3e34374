//! Configuration-driven SDK package installer.
//!
//! Deploys SDK payloads onto a target machine: a flat `key = value, value`
//! config file registers a list of packages per platform, each package names
//! a source directory, a destination directory, and a file pattern, and the
//! installer copies every matching file or subtree into place. On Linux
//! targets the run ends by registering the runtime library path in the
//! system loader config and refreshing the shared-library cache.
//!
//! The public API is organised in pipeline order:
//!
//! - **[`config`]** — parse the install config into a [`config::ConfigStore`]
//! - **[`platform`]** — interactive target platform selection
//! - **[`manifest`]** — resolve the package list for a platform
//! - **[`matcher`]** — expand a package's file pattern into concrete matches
//! - **[`deploy`]** — copy matches, collecting non-fatal diagnostics
//! - **[`patcher`]** — idempotent loader-config registration (Linux only)
//! - **[`install`]** — top-level orchestration wired to the CLI
#![deny(clippy::or_fun_call)]
#![deny(clippy::bool_to_int_with_if)]

pub mod cli;
pub mod config;
pub mod deploy;
pub mod error;
pub mod exec;
pub mod install;
pub mod logging;
pub mod manifest;
pub mod matcher;
pub mod patcher;
pub mod platform;
