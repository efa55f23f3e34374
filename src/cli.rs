use std::path::PathBuf;

use clap::Parser;

/// Top-level CLI entry point for the SDK installer.
///
/// There are no subcommands and no positional arguments: the installer is a
/// one-shot interactive run driven entirely by the config file and the
/// platform menu. `--version` is handled by clap and exits before any work.
#[derive(Parser, Debug)]
#[command(
    name = "sdk-install",
    about = "Configuration-driven SDK package installer",
    version
)]
pub struct Cli {
    /// Config file to use
    #[arg(short, long, default_value = "install.cfg")]
    pub config: PathBuf,

    /// Print every file operation instead of one summary line per package
    #[arg(short, long)]
    pub verbose: bool,

    /// Only print warnings and errors
    #[arg(short, long)]
    pub warning: bool,
}
