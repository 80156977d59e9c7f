//! Removal of duplicate records keyed by a header substring.
//!
//! The comparison itself is delegated to a [`Deduplicator`]; this module owns
//! input discovery, output naming and error propagation.
//!
//! - [`SeqkitDeduplicator`]: runs `seqkit rmdup` as a child process
//! - [`NativeDeduplicator`]: the same rule applied in-process
//!
//! ## Example
//!
//! ```rust,no_run
//! use fluprep::core::KeyPattern;
//! use fluprep::dedup::{remove_duplicates, SeqkitDeduplicator};
//! use std::path::Path;
//!
//! let seqkit = SeqkitDeduplicator::new("seqkit");
//! let report = remove_duplicates(
//!     Path::new("segments/"),
//!     Path::new("dedup/"),
//!     &seqkit,
//!     &KeyPattern::strain_token(),
//!     false,
//! )
//! .unwrap();
//! println!("{} files written", report.written.len());
//! ```

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::process::ExitStatus;

use thiserror::Error;
use tracing::{debug, info, warn};

use crate::core::KeyPattern;
use crate::parsing::ParseError;

pub mod discovery;
pub mod native;
pub mod seqkit;

pub use discovery::{discover_inputs, output_path, FASTA_EXTENSION, OUTPUT_SUFFIX};
pub use native::NativeDeduplicator;
pub use seqkit::SeqkitDeduplicator;

#[derive(Error, Debug)]
pub enum DedupError {
    #[error("{} is not a valid file or directory", .0.display())]
    InvalidInput(PathBuf),

    #[error("Failed to launch '{tool}': {source}")]
    ToolLaunch {
        tool: String,
        #[source]
        source: std::io::Error,
    },

    #[error("'{tool}' failed on '{}' ({status}): {stderr}", .input.display())]
    ToolFailed {
        tool: String,
        input: PathBuf,
        status: ExitStatus,
        stderr: String,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Parse(#[from] ParseError),
}

/// Something that writes a copy of `input` to `output` keeping only the first
/// record for each key extracted by `pattern`.
pub trait Deduplicator {
    /// Short name used in messages
    fn name(&self) -> &str;

    /// # Errors
    ///
    /// Returns an error if the input cannot be read, the output cannot be
    /// written, or the underlying tool fails.
    fn deduplicate(&self, input: &Path, pattern: &KeyPattern, output: &Path)
        -> Result<(), DedupError>;
}

/// Outcome of a de-duplication run
#[derive(Debug, Default)]
pub struct DedupReport {
    /// Output files written, in processing order
    pub written: Vec<PathBuf>,

    /// Inputs that failed, only populated when continuing past failures
    pub failures: Vec<(PathBuf, DedupError)>,
}

impl DedupReport {
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }
}

/// De-duplicate one FASTA file, or every `.fasta` file below a directory,
/// writing `<stem>.rmdup.fasta` files into `output_dir`.
///
/// With `keep_going` false the first failure is returned immediately;
/// otherwise failures are collected in the report and the remaining files are
/// still processed.
///
/// # Errors
///
/// Returns `DedupError::InvalidInput` if `input` is neither a file nor a
/// directory, `DedupError::Io` if the output directory cannot be created, or
/// the first per-file failure when `keep_going` is false.
pub fn remove_duplicates(
    input: &Path,
    output_dir: &Path,
    deduplicator: &dyn Deduplicator,
    pattern: &KeyPattern,
    keep_going: bool,
) -> Result<DedupReport, DedupError> {
    let inputs = discover_inputs(input)?;
    debug!(count = inputs.len(), input = %input.display(), "Discovered FASTA files");

    std::fs::create_dir_all(output_dir)?;

    let mut report = DedupReport::default();
    let mut seen_outputs = HashSet::new();

    for file in inputs {
        let output = output_path(&file, output_dir);
        if !seen_outputs.insert(output.clone()) {
            warn!(
                input = %file.display(),
                output = %output.display(),
                "Output name already used by another input, overwriting"
            );
        }

        info!(
            tool = deduplicator.name(),
            input = %file.display(),
            output = %output.display(),
            "Removing duplicates"
        );

        match deduplicator.deduplicate(&file, pattern, &output) {
            Ok(()) => report.written.push(output),
            Err(e) if keep_going => {
                warn!(input = %file.display(), error = %e, "De-duplication failed");
                report.failures.push((file, e));
            }
            Err(e) => return Err(e),
        }
    }

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    /// Records calls and copies input to output, failing for chosen stems.
    struct FakeDeduplicator {
        calls: RefCell<Vec<(PathBuf, String, PathBuf)>>,
        fail_on: Option<&'static str>,
    }

    impl FakeDeduplicator {
        fn new(fail_on: Option<&'static str>) -> Self {
            Self {
                calls: RefCell::new(Vec::new()),
                fail_on,
            }
        }
    }

    impl Deduplicator for FakeDeduplicator {
        fn name(&self) -> &str {
            "fake"
        }

        fn deduplicate(
            &self,
            input: &Path,
            pattern: &KeyPattern,
            output: &Path,
        ) -> Result<(), DedupError> {
            self.calls.borrow_mut().push((
                input.to_path_buf(),
                pattern.as_str().to_string(),
                output.to_path_buf(),
            ));
            let stem = input.file_stem().unwrap().to_string_lossy();
            if self.fail_on == Some(stem.as_ref()) {
                return Err(DedupError::Io(std::io::Error::other("boom")));
            }
            std::fs::copy(input, output)?;
            Ok(())
        }
    }

    fn write(path: &Path) {
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, ">a|A/x/y/1/2020|\nACGT\n").unwrap();
    }

    #[test]
    fn test_single_file() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("h1.fa");
        write(&input);
        let out_dir = dir.path().join("out/nested");

        let fake = FakeDeduplicator::new(None);
        let report =
            remove_duplicates(&input, &out_dir, &fake, &KeyPattern::strain_token(), false).unwrap();

        assert!(report.is_success());
        assert_eq!(report.written, vec![out_dir.join("h1.rmdup.fasta")]);
        assert!(out_dir.join("h1.rmdup.fasta").is_file());

        let calls = fake.calls.borrow();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].1, r"\|([^|]+)\|");
    }

    #[test]
    fn test_directory_halts_on_first_failure() {
        let dir = tempfile::tempdir().unwrap();
        let in_dir = dir.path().join("in");
        write(&in_dir.join("a.fasta"));
        write(&in_dir.join("b.fasta"));
        write(&in_dir.join("c.fasta"));

        let fake = FakeDeduplicator::new(Some("b"));
        let result = remove_duplicates(
            &in_dir,
            &dir.path().join("out"),
            &fake,
            &KeyPattern::strain_token(),
            false,
        );

        assert!(matches!(result, Err(DedupError::Io(_))));
        assert_eq!(fake.calls.borrow().len(), 2);
    }

    #[test]
    fn test_directory_keep_going() {
        let dir = tempfile::tempdir().unwrap();
        let in_dir = dir.path().join("in");
        write(&in_dir.join("a.fasta"));
        write(&in_dir.join("b.fasta"));
        write(&in_dir.join("c.fasta"));

        let fake = FakeDeduplicator::new(Some("b"));
        let report = remove_duplicates(
            &in_dir,
            &dir.path().join("out"),
            &fake,
            &KeyPattern::strain_token(),
            true,
        )
        .unwrap();

        assert_eq!(fake.calls.borrow().len(), 3);
        assert_eq!(report.written.len(), 2);
        assert_eq!(report.failures.len(), 1);
        assert!(report.failures[0].0.ends_with("b.fasta"));
    }

    #[test]
    fn test_invalid_input_creates_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let out_dir = dir.path().join("out");
        let fake = FakeDeduplicator::new(None);

        let result = remove_duplicates(
            &dir.path().join("missing"),
            &out_dir,
            &fake,
            &KeyPattern::strain_token(),
            false,
        );

        assert!(matches!(result, Err(DedupError::InvalidInput(_))));
        assert!(!out_dir.exists());
        assert!(fake.calls.borrow().is_empty());
    }
}
