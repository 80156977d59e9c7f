//! # fluprep
//!
//! Utilities for preparing influenza genome FASTA files before analysis.
//!
//! Influenza sequence exports carry the strain name inside the FASTA header,
//! e.g. `>EPI_ISL_1_4|A/human/Victoria/1234/2024|HA`. Before building trees or
//! alignments the files usually need the same handful of clean-up steps, each
//! provided here as a standalone binary:
//!
//! - **flu-parse-header**: split the strain name of every header into a TSV
//!   table (type, host, location, strain, year)
//! - **flu-rmdup**: drop records whose strain name was already seen, via
//!   `seqkit rmdup` or in-process
//! - **flu-seqid-validate**: compare FASTA identifiers against a metadata
//!   table and write the shared and one-sided identifier lists
//! - **flu-trim-fasta**: cut every sequence to a coordinate window
//!
//! ## Example
//!
//! ```rust
//! use fluprep::core::{KeyPattern, StructuredIdentifier, TrimWindow};
//!
//! let pattern = KeyPattern::strain_token();
//! let id = StructuredIdentifier::parse("EPI1_4|A/human/Victoria/1234/2024|HA", &pattern).unwrap();
//! assert_eq!(id.fields, ["A", "human", "Victoria", "1234", "2024"]);
//!
//! assert_eq!(TrimWindow::new(2, 5).apply(b"ACGTACGTAC"), b"GTA");
//! ```
//!
//! ## Modules
//!
//! - [`core`]: Strain tokens, header tables, identifier sets and trim windows
//! - [`parsing`]: FASTA and metadata table readers
//! - [`dedup`]: Duplicate removal and the `Deduplicator` capability
//! - [`cli`]: Command-line front ends shared by the binaries
//! - [`utils`]: Atomic output files

pub mod cli;
pub mod core;
pub mod dedup;
pub mod parsing;
pub mod utils;

pub use crate::core::{IdComparison, KeyPattern, StructuredIdentifier, TrimWindow};
pub use dedup::{Deduplicator, NativeDeduplicator, SeqkitDeduplicator};
pub use parsing::ParseError;
