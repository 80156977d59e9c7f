use std::process::ExitCode;

use clap::Parser;
use fluprep::cli::{self, seqid_validate::SeqidValidateArgs};

fn main() -> ExitCode {
    let args = SeqidValidateArgs::parse();
    cli::init_logging(args.verbose);
    cli::finish(cli::seqid_validate::run(&args))
}
