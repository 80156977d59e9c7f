use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Parser;
use noodles_fasta as fasta;
use tracing::warn;

use crate::core::TrimWindow;
use crate::parsing::fasta::read_records;
use crate::parsing::ParseError;
use crate::utils::output::AtomicFile;

#[derive(Parser)]
#[command(name = "flu-trim-fasta")]
#[command(version)]
#[command(about = "Trim sequences in a FASTA file based on start and stop positions")]
#[command(
    long_about = "Cuts every sequence to the zero-based, end-exclusive window [start, end).\n\nPositions past the end of a sequence are clipped: a window reaching beyond a record keeps what is there, and a window starting beyond it leaves an empty sequence."
)]
pub struct TrimFastaArgs {
    /// Path to the input FASTA file
    #[arg(short, long)]
    pub input: PathBuf,

    /// Path to the output trimmed FASTA file
    #[arg(short, long)]
    pub output: PathBuf,

    /// Start position for trimming (0-based, inclusive)
    #[arg(short, long)]
    pub start: usize,

    /// Stop position for trimming (0-based, exclusive)
    #[arg(short, long)]
    pub end: usize,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

/// Trim every record of `input` to `window` and write them to `output`.
/// Returns the number of records written.
///
/// Nothing is written to `output` unless every record was read and written.
///
/// # Errors
///
/// Returns `ParseError::NotFound` if the input does not exist,
/// `ParseError::NoRecords` if it holds no records, or other parse and I/O
/// errors.
pub fn trim_fasta(input: &Path, output: &Path, window: TrimWindow) -> Result<usize, ParseError> {
    let records = read_records(input)?;
    if records.is_empty() {
        return Err(ParseError::NoRecords(input.to_path_buf()));
    }

    let mut file = AtomicFile::create(output)?;
    {
        let mut writer = fasta::io::Writer::new(&mut file);
        for record in &records {
            writer.write_record(&window.trim_record(record))?;
        }
    }
    file.commit()?;

    Ok(records.len())
}

/// Execute flu-trim-fasta
///
/// # Errors
///
/// Returns an error if the input cannot be read or the output cannot be
/// written.
pub fn run(args: &TrimFastaArgs) -> anyhow::Result<()> {
    let window = TrimWindow::new(args.start, args.end);
    if window.start > window.end {
        warn!(
            start = window.start,
            end = window.end,
            "Start is after end, every sequence will be empty"
        );
    }

    let count = trim_fasta(&args.input, &args.output, window)
        .with_context(|| format!("Failed to trim '{}'", args.input.display()))?;

    println!("Trimming completed successfully!");
    println!("Input file: {}", args.input.display());
    println!("Output file: {}", args.output.display());
    println!("Start position: {}", args.start);
    println!("Stop position: {}", args.end);
    println!("Total records trimmed: {count}");

    Ok(())
}
