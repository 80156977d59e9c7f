use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Parser;
use tracing::debug;

use crate::core::{HeaderTable, KeyPattern, StructuredIdentifier};
use crate::parsing::fasta::read_header_lines;
use crate::parsing::ParseError;
use crate::utils::output::AtomicFile;

#[derive(Parser)]
#[command(name = "flu-parse-header")]
#[command(version)]
#[command(about = "Extract and split headers from a multi-FASTA file and write to a TSV file")]
#[command(
    long_about = "Extracts the strain name found between the first pair of '|' delimiters of every FASTA header (e.g. A/human/Victoria/1234/2024), splits it on '/', and writes the original header followed by the parts to a TSV file.\n\nHeaders without a '|...|' token are skipped."
)]
pub struct ParseHeaderArgs {
    /// Path to the input multi-FASTA file
    #[arg(short, long)]
    pub input: PathBuf,

    /// Path to the output TSV file
    #[arg(short, long)]
    pub output: PathBuf,

    /// Column names for the output TSV file; missing ones become Part<N>
    #[arg(long, required = true, num_args = 1..)]
    pub column_names: Vec<String>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

/// Counts from one header-splitting run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SplitSummary {
    /// Header lines read
    pub headers: usize,
    /// Rows written
    pub rows: usize,
    /// Headers without a strain token
    pub skipped: usize,
    /// Token columns in the output
    pub width: usize,
}

/// Split the strain token of every header of `input` into `output`.
///
/// # Errors
///
/// Returns `ParseError::NotFound` if the input does not exist,
/// `ParseError::NoRecords` if no header carries a strain token (nothing is
/// written in that case), or `ParseError::Io` on read/write failures.
pub fn split_headers(
    input: &Path,
    output: &Path,
    column_names: &[String],
) -> Result<SplitSummary, ParseError> {
    let pattern = KeyPattern::strain_token();
    let headers = read_header_lines(input)?;

    let mut identifiers = Vec::with_capacity(headers.len());
    for header in &headers {
        match StructuredIdentifier::parse(header, &pattern) {
            Some(id) => identifiers.push(id),
            None => debug!(header = %header, "No strain token, skipping"),
        }
    }

    let table = HeaderTable::build(identifiers, column_names)
        .ok_or_else(|| ParseError::NoRecords(input.to_path_buf()))?;

    let mut file = AtomicFile::create(output)?;
    table.write_tsv(&mut file)?;
    file.commit()?;

    Ok(SplitSummary {
        headers: headers.len(),
        rows: table.row_count(),
        skipped: headers.len() - table.row_count(),
        width: table.width(),
    })
}

/// Execute flu-parse-header
///
/// # Errors
///
/// Returns an error if the input cannot be read, holds no strain tokens, or
/// the output cannot be written.
pub fn run(args: &ParseHeaderArgs) -> anyhow::Result<()> {
    let summary = split_headers(&args.input, &args.output, &args.column_names)
        .with_context(|| format!("Failed to split headers of '{}'", args.input.display()))?;

    debug!(?summary, "Header splitting finished");
    if summary.skipped > 0 {
        println!(
            "Skipped {} of {} headers without a '|...|' strain token",
            summary.skipped, summary.headers
        );
    }
    println!("Data has been written to {}", args.output.display());

    Ok(())
}
