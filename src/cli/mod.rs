//! Command-line front ends, one per binary.
//!
//! - **flu-parse-header**: split strain tokens from FASTA headers into a TSV
//! - **flu-rmdup**: remove duplicate strains from FASTA files
//! - **flu-seqid-validate**: cross-reference FASTA identifiers with a metadata table
//! - **flu-trim-fasta**: cut every sequence to a coordinate window
//!
//! ## Usage
//!
//! ```text
//! flu-parse-header -i ha.fasta -o ha.tsv --column-names Type Host Location Strain Year
//! flu-rmdup -i segments/ -o dedup/
//! flu-seqid-validate -f ha.fasta -m metadata.tsv -o filtered.tsv -d ids/
//! flu-trim-fasta -i ha.fasta -o ha.trimmed.fasta -s 20 -e 1720
//! ```
//!
//! ## Exit codes
//!
//! | Code | Meaning |
//! |------|---------|
//! | 0 | Success |
//! | 1 | Unexpected failure |
//! | 2 | Input path missing or not a file/directory |
//! | 3 | Malformed or empty input, or missing required column |
//! | 4 | External tool failed |

use std::process::ExitCode;

use tracing_subscriber::EnvFilter;

use crate::dedup::DedupError;
use crate::parsing::ParseError;

pub mod parse_header;
pub mod rmdup;
pub mod seqid_validate;
pub mod trim_fasta;

pub const EXIT_FAILURE: u8 = 1;
pub const EXIT_NOT_FOUND: u8 = 2;
pub const EXIT_MALFORMED_INPUT: u8 = 3;
pub const EXIT_TOOL_FAILURE: u8 = 4;

#[derive(Clone, Copy, Debug, Default, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Initialize logging based on verbosity flag
pub fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("fluprep=debug,info")
    } else {
        EnvFilter::new("fluprep=warn")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .init();
}

fn parse_error_code(err: &ParseError) -> u8 {
    match err {
        ParseError::NotFound(_) => EXIT_NOT_FOUND,
        e if e.is_malformed_input() => EXIT_MALFORMED_INPUT,
        _ => EXIT_FAILURE,
    }
}

fn dedup_error_code(err: &DedupError) -> u8 {
    match err {
        DedupError::InvalidInput(_) => EXIT_NOT_FOUND,
        DedupError::ToolLaunch { .. } | DedupError::ToolFailed { .. } => EXIT_TOOL_FAILURE,
        DedupError::Parse(e) => parse_error_code(e),
        DedupError::Io(_) => EXIT_FAILURE,
    }
}

/// Process exit code for an error, from the first typed error in its chain.
#[must_use]
pub fn exit_code(err: &anyhow::Error) -> u8 {
    for cause in err.chain() {
        if let Some(e) = cause.downcast_ref::<ParseError>() {
            return parse_error_code(e);
        }
        if let Some(e) = cause.downcast_ref::<DedupError>() {
            return dedup_error_code(e);
        }
    }
    EXIT_FAILURE
}

/// Report the outcome of a run and turn it into the process exit code.
#[must_use]
pub fn finish(result: anyhow::Result<()>) -> ExitCode {
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            println!("Error: {err:#}");
            ExitCode::from(exit_code(&err))
        }
    }
}
