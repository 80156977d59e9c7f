use std::process::ExitCode;

use clap::Parser;
use fluprep::cli::{self, trim_fasta::TrimFastaArgs};

fn main() -> ExitCode {
    let args = TrimFastaArgs::parse();
    cli::init_logging(args.verbose);
    cli::finish(cli::trim_fasta::run(&args))
}
