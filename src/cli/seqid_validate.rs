use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Parser;
use csv::WriterBuilder;
use tracing::debug;

use crate::cli::OutputFormat;
use crate::core::{scalar_id, IdComparison, IdList, IdSummary, SEGMENT_SEPARATOR};
use crate::parsing::fasta::{read_records, record_id};
use crate::parsing::metadata::{MetadataTable, SEQID_COLUMN};
use crate::parsing::ParseError;
use crate::utils::output::AtomicFile;

#[derive(Parser)]
#[command(name = "flu-seqid-validate")]
#[command(version)]
#[command(about = "Compare sequence IDs between a FASTA file and a metadata TSV file")]
#[command(
    long_about = "Reads identifiers of the form seqID_segment# from a FASTA file and the 'seqid' column of a metadata TSV file, then reports how many are shared and how many appear on only one side.\n\nOptionally writes the metadata rows whose seqid occurs in the FASTA file, and one identifier list per reported count."
)]
pub struct SeqidValidateArgs {
    /// Input FASTA file
    #[arg(short, long)]
    pub fasta: PathBuf,

    /// Input metadata TSV file with a 'seqid' column
    #[arg(short, long)]
    pub metadata: PathBuf,

    /// Output metadata TSV file with only the rows containing seqIDs present in the FASTA file
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Directory to write out 5 files containing the seqids for each of the reported counts
    #[arg(short, long)]
    pub directory: Option<PathBuf>,

    /// Format of the console report
    #[arg(long, value_enum, default_value = "text")]
    pub format: OutputFormat,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

/// Distinct scalar identifiers of the records of a FASTA file.
///
/// # Errors
///
/// Returns `ParseError::NotFound` if the file does not exist,
/// `ParseError::NoRecords` if it holds no records, or other parse errors if a
/// record is malformed.
pub fn fasta_ids(path: &Path, separator: char) -> Result<BTreeSet<String>, ParseError> {
    let records = read_records(path)?;
    if records.is_empty() {
        return Err(ParseError::NoRecords(path.to_path_buf()));
    }

    let ids: BTreeSet<String> = records
        .iter()
        .map(|record| scalar_id(&record_id(record), separator).to_string())
        .collect();
    debug!(records = records.len(), ids = ids.len(), "Collected FASTA identifiers");
    Ok(ids)
}

/// Write the rows of `table` whose key is in `keep`, keeping the header row
/// and the original row order. Returns the number of rows written.
///
/// # Errors
///
/// Returns `ParseError::Io` if the file cannot be written.
pub fn write_filtered_metadata(
    table: &MetadataTable,
    keep: &BTreeSet<String>,
    path: &Path,
) -> Result<usize, ParseError> {
    let mut file = AtomicFile::create(path)?;
    let mut rows = 0;
    {
        let mut writer = WriterBuilder::new().delimiter(b'\t').from_writer(&mut file);
        writer.write_record(&table.headers)?;
        for row in table.rows_with_keys(keep) {
            writer.write_record(row)?;
            rows += 1;
        }
        writer.flush()?;
    }
    file.commit()?;
    Ok(rows)
}

fn write_id_list(ids: &BTreeSet<String>, path: &Path) -> Result<(), ParseError> {
    let mut file = AtomicFile::create(path)?;
    {
        let mut writer = WriterBuilder::new().delimiter(b'\t').from_writer(&mut file);
        writer.write_record([SEQID_COLUMN])?;
        for id in ids {
            writer.write_record([id])?;
        }
        writer.flush()?;
    }
    file.commit()?;
    Ok(())
}

/// Write the five identifier lists into `directory`, creating it if needed.
///
/// # Errors
///
/// Returns `ParseError::Io` if the directory or a file cannot be written.
pub fn write_id_lists(
    comparison: &IdComparison,
    directory: &Path,
) -> Result<Vec<PathBuf>, ParseError> {
    std::fs::create_dir_all(directory)?;

    let mut written = Vec::with_capacity(IdList::ALL.len());
    for list in IdList::ALL {
        let path = directory.join(list.file_name());
        write_id_list(&comparison.list(list), &path)?;
        written.push(path);
    }
    Ok(written)
}

fn print_text_summary(summary: &IdSummary) {
    println!(
        "1. Number of unique IDs in the FASTA file: {}",
        summary.fasta_ids
    );
    println!(
        "2. Number of unique IDs in the metadata file: {}",
        summary.metadata_ids
    );
    println!(
        "3. Number of unique IDs present in both files: {}",
        summary.common
    );
    println!(
        "4. Number of unique IDs in the FASTA file but not in the metadata file: {}",
        summary.fasta_only
    );
    println!(
        "5. Number of unique IDs in the metadata file but not in the FASTA file: {}",
        summary.metadata_only
    );
}

/// Execute flu-seqid-validate
///
/// # Errors
///
/// Returns an error if either input cannot be read, the metadata lacks a
/// `seqid` column, or an output cannot be written.
pub fn run(args: &SeqidValidateArgs) -> anyhow::Result<()> {
    let fasta = fasta_ids(&args.fasta, SEGMENT_SEPARATOR)
        .with_context(|| format!("Failed to read FASTA file '{}'", args.fasta.display()))?;
    let table = MetadataTable::from_path(&args.metadata, SEQID_COLUMN)
        .with_context(|| format!("Failed to read metadata file '{}'", args.metadata.display()))?;

    let comparison = IdComparison::new(fasta, table.keys());
    let summary = comparison.summary();

    match args.format {
        OutputFormat::Text => print_text_summary(&summary),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&summary)?),
    }

    if let Some(output) = &args.output {
        let rows = write_filtered_metadata(&table, &comparison.fasta, output).with_context(|| {
            format!("Failed to write filtered metadata '{}'", output.display())
        })?;
        debug!(rows, "Filtered metadata rows written");
        println!("\nFiltered metadata written to: {}", output.display());
    }

    if let Some(directory) = &args.directory {
        write_id_lists(&comparison, directory)
            .with_context(|| format!("Failed to write ID lists to '{}'", directory.display()))?;
        println!("\nFiles written to: {}", directory.display());
        println!("\nFiles created:");
        for list in IdList::ALL {
            println!("  {}: {}", list.file_name(), list.description());
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn temp_file(suffix: &str, content: &[u8]) -> NamedTempFile {
        let mut temp = NamedTempFile::with_suffix(suffix).unwrap();
        temp.write_all(content).unwrap();
        temp.flush().unwrap();
        temp
    }

    const FASTA: &[u8] = b">A_1 PB2\nACGT\n>A_4 HA\nACGT\n>B_4\nAC\n>C\nGG\n";
    const METADATA: &[u8] = b"seqid\thost\nD\tswine\nC\tduck\nB\thuman\n";

    #[test]
    fn test_fasta_ids_truncate_at_separator() {
        let fasta = temp_file(".fasta", FASTA);
        let ids = fasta_ids(fasta.path(), SEGMENT_SEPARATOR).unwrap();
        let ids: Vec<&str> = ids.iter().map(String::as_str).collect();
        assert_eq!(ids, vec!["A", "B", "C"]);
    }

    #[test]
    fn test_empty_fasta_is_error() {
        let fasta = temp_file(".fasta", b"");
        let result = fasta_ids(fasta.path(), SEGMENT_SEPARATOR);
        assert!(matches!(result, Err(ParseError::NoRecords(_))));
    }

    #[test]
    fn test_filtered_metadata_keeps_order() {
        let fasta = temp_file(".fasta", FASTA);
        let meta = temp_file(".tsv", METADATA);
        let table = MetadataTable::from_path(meta.path(), SEQID_COLUMN).unwrap();
        let ids = fasta_ids(fasta.path(), SEGMENT_SEPARATOR).unwrap();

        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("filtered.tsv");
        let rows = write_filtered_metadata(&table, &ids, &output).unwrap();

        assert_eq!(rows, 2);
        assert_eq!(
            std::fs::read_to_string(&output).unwrap(),
            "seqid\thost\nC\tduck\nB\thuman\n"
        );
    }

    #[test]
    fn test_write_id_lists() {
        let fasta = temp_file(".fasta", FASTA);
        let meta = temp_file(".tsv", METADATA);
        let table = MetadataTable::from_path(meta.path(), SEQID_COLUMN).unwrap();
        let comparison =
            IdComparison::new(fasta_ids(fasta.path(), SEGMENT_SEPARATOR).unwrap(), table.keys());

        let dir = tempfile::tempdir().unwrap();
        let out_dir = dir.path().join("ids");
        let written = write_id_lists(&comparison, &out_dir).unwrap();
        assert_eq!(written.len(), 5);

        let read = |name: &str| std::fs::read_to_string(out_dir.join(name)).unwrap();
        assert_eq!(read("fasta_ids.tsv"), "seqid\nA\nB\nC\n");
        assert_eq!(read("metadata_ids.tsv"), "seqid\nB\nC\nD\n");
        assert_eq!(read("intersect.tsv"), "seqid\nB\nC\n");
        assert_eq!(read("fasta_only.tsv"), "seqid\nA\n");
        assert_eq!(read("metadata_only.tsv"), "seqid\nD\n");
    }
}
