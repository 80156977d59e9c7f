use std::process::ExitCode;

use clap::Parser;
use fluprep::cli::{self, parse_header::ParseHeaderArgs};

fn main() -> ExitCode {
    let args = ParseHeaderArgs::parse();
    cli::init_logging(args.verbose);
    cli::finish(cli::parse_header::run(&args))
}
