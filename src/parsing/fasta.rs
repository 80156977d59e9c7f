//! FASTA input.
//!
//! Two views of a FASTA file are offered: the raw header lines, as used by the
//! header splitter, and full records parsed with noodles.
//! Supports both uncompressed and gzip/bgzip compressed files.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use flate2::read::MultiGzDecoder;
use noodles_fasta as fasta;

use crate::parsing::ParseError;

/// Marker that starts every FASTA header line
pub const HEADER_MARKER: char = '>';

/// Check if the path is a gzipped file
#[allow(clippy::case_sensitive_file_extension_comparisons)] // Already lowercased
fn is_gzipped(path: &Path) -> bool {
    let path_str = path.to_string_lossy().to_lowercase();
    path_str.ends_with(".gz") || path_str.ends_with(".bgz")
}

/// Open a FASTA file for buffered reading, decompressing when needed.
///
/// # Errors
///
/// Returns `ParseError::NotFound` if the path is not an existing file, or
/// `ParseError::Io` if it cannot be opened.
pub fn open_input(path: &Path) -> Result<Box<dyn BufRead>, ParseError> {
    if !path.is_file() {
        return Err(ParseError::NotFound(path.to_path_buf()));
    }

    let file = File::open(path)?;
    if is_gzipped(path) {
        Ok(Box::new(BufReader::new(MultiGzDecoder::new(file))))
    } else {
        Ok(Box::new(BufReader::new(file)))
    }
}

/// Read every header line of a FASTA file.
///
/// The leading `>` and surrounding whitespace are removed; sequence lines are
/// skipped without being inspected.
///
/// # Errors
///
/// Returns `ParseError::NotFound` if the file does not exist, or
/// `ParseError::Io` if it cannot be read.
pub fn read_header_lines(path: &Path) -> Result<Vec<String>, ParseError> {
    let reader = open_input(path)?;
    let mut headers = Vec::new();

    for line in reader.lines() {
        let line = line?;
        if let Some(header) = line.strip_prefix(HEADER_MARKER) {
            headers.push(header.trim().to_string());
        }
    }

    Ok(headers)
}

/// Read all records of a FASTA file.
///
/// # Errors
///
/// Returns `ParseError::NotFound` if the file does not exist, `ParseError::Io`
/// if it cannot be read, or `ParseError::Noodles` if a record is malformed.
pub fn read_records(path: &Path) -> Result<Vec<fasta::Record>, ParseError> {
    let reader = open_input(path)?;
    let mut fasta_reader = fasta::io::Reader::new(reader);

    let mut records = Vec::new();
    for result in fasta_reader.records() {
        let record = result
            .map_err(|e| ParseError::Noodles(format!("Failed to parse FASTA record: {e}")))?;
        records.push(record);
    }

    Ok(records)
}

/// The identifier of a record: its header up to the first whitespace.
#[must_use]
pub fn record_id(record: &fasta::Record) -> String {
    String::from_utf8_lossy(record.name()).to_string()
}

/// The full header of a record, identifier and description, without the `>`.
#[must_use]
pub fn record_header(record: &fasta::Record) -> String {
    let name = record_id(record);
    match record.description() {
        Some(description) => format!("{name} {}", String::from_utf8_lossy(description)),
        None => name,
    }
}
