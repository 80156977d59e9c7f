use std::process::ExitCode;

use clap::Parser;
use fluprep::cli::{self, rmdup::RmdupArgs};

fn main() -> ExitCode {
    let args = RmdupArgs::parse();
    cli::init_logging(args.verbose);
    cli::finish(cli::rmdup::run(&args))
}
