use anyhow::Result;
use clap::Parser;

use sdk_installer::logging::Logger;
use sdk_installer::{cli, install, logging};

fn main() -> Result<()> {
    let args = cli::Cli::parse();
    logging::init(args.verbose, args.warning);
    let log = Logger::new(args.verbose);
    install::run(&args, &log)
}
