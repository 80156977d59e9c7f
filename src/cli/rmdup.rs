use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;

use crate::core::{KeyPattern, STRAIN_TOKEN_PATTERN};
use crate::dedup::seqkit::SEQKIT_ENV_BIN;
use crate::dedup::{remove_duplicates, Deduplicator, NativeDeduplicator, SeqkitDeduplicator};

#[derive(Parser)]
#[command(name = "flu-rmdup")]
#[command(version)]
#[command(about = "Remove duplicate sequences from FASTA files")]
#[command(
    long_about = "Removes records whose strain name (the text between the first pair of '|' delimiters) was already seen, keeping the first occurrence.\n\nThe input is a FASTA file, or a directory searched recursively for *.fasta files. Each input produces <name>.rmdup.fasta in the output directory."
)]
pub struct RmdupArgs {
    /// Path to the input FASTA file or directory containing FASTA files
    #[arg(short, long)]
    pub input: PathBuf,

    /// Path to the output directory for non-redundant FASTA files
    #[arg(short, long)]
    pub output: PathBuf,

    /// seqkit executable
    #[arg(long, env = SEQKIT_ENV_BIN, default_value = "seqkit")]
    pub seqkit: PathBuf,

    /// Remove duplicates in-process instead of running seqkit
    #[arg(long)]
    pub native: bool,

    /// Regular expression extracting the duplicate key (first group)
    #[arg(long, default_value = STRAIN_TOKEN_PATTERN)]
    pub id_regexp: String,

    /// Process every file even after a failure, then report all failures
    #[arg(long)]
    pub keep_going: bool,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

/// Execute flu-rmdup
///
/// # Errors
///
/// Returns an error if the input path is invalid, the pattern does not
/// compile, or de-duplicating any file fails.
pub fn run(args: &RmdupArgs) -> anyhow::Result<()> {
    let pattern = KeyPattern::new(&args.id_regexp)
        .with_context(|| format!("Invalid --id-regexp '{}'", args.id_regexp))?;

    let seqkit = SeqkitDeduplicator::new(&args.seqkit);
    let deduplicator: &dyn Deduplicator = if args.native {
        &NativeDeduplicator
    } else {
        &seqkit
    };

    let mut report = remove_duplicates(
        &args.input,
        &args.output,
        deduplicator,
        &pattern,
        args.keep_going,
    )?;

    for output in &report.written {
        println!("Written: {}", output.display());
    }

    let failed = report.failures.len();
    let total = report.written.len() + failed;
    if failed > 0 {
        for (input, error) in &report.failures {
            println!("Failed: {}: {error}", input.display());
        }
        let (_, first) = report.failures.remove(0);
        return Err(anyhow::Error::new(first).context(format!("{failed} of {total} files failed")));
    }

    println!(
        "Removed duplicates from {total} file(s); results in {}",
        args.output.display()
    );
    Ok(())
}
