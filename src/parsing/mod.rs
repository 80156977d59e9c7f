//! Readers for the files the utilities consume.
//!
//! This module provides parsers for:
//!
//! - **FASTA files**: raw header lines (for header splitting) and full records
//!   via noodles (for trimming, de-duplication and identifier extraction).
//!   Plain, gzip and bgzip inputs are all accepted.
//! - **Metadata tables**: tab-separated tables keyed by a `seqid` column.
//!
//! ## Example
//!
//! ```rust,no_run
//! use fluprep::parsing::fasta::read_header_lines;
//! use std::path::Path;
//!
//! let headers = read_header_lines(Path::new("segments.fasta")).unwrap();
//! for header in &headers {
//!     println!("{header}");
//! }
//! ```

use std::path::PathBuf;

use thiserror::Error;

pub mod fasta;
pub mod metadata;

#[derive(Error, Debug)]
pub enum ParseError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Input file '{}' not found", .0.display())]
    NotFound(PathBuf),

    #[error("No records found in '{}'", .0.display())]
    NoRecords(PathBuf),

    #[error("Column '{column}' not found in '{}'", .path.display())]
    MissingColumn { column: String, path: PathBuf },

    #[error("noodles error: {0}")]
    Noodles(String),

    #[error("TSV error: {0}")]
    Tsv(#[from] csv::Error),
}

impl ParseError {
    /// True when the error is caused by the shape of the input rather than I/O.
    #[must_use]
    pub fn is_malformed_input(&self) -> bool {
        matches!(
            self,
            ParseError::NoRecords(_)
                | ParseError::MissingColumn { .. }
                | ParseError::Noodles(_)
                | ParseError::Tsv(_)
        )
    }
}
