//! Core data types for influenza sequence preparation.
//!
//! - [`KeyPattern`]: regex-based key extraction from FASTA headers
//! - [`StructuredIdentifier`]: a header and the fields of its strain token
//! - [`HeaderTable`]: split headers laid out as tab-separated rows
//! - [`IdComparison`]: FASTA and metadata identifiers compared as sets
//! - [`TrimWindow`]: the coordinate window applied by the trimmer
//!
//! ## Header layout
//!
//! Influenza FASTA headers carry the strain name between the first pair of
//! `|` delimiters, itself split by `/`:
//!
//! ```text
//! EPI1_4|A/human/Victoria/1234/2024|HA
//!        ^ token: A/human/Victoria/1234/2024 -> 5 fields
//! ```

pub mod header_table;
pub mod id_set;
pub mod identifier;
pub mod trim;

pub use header_table::{HeaderTable, ORIGINAL_HEADER_COLUMN};
pub use id_set::{scalar_id, IdComparison, IdList, IdSummary, SEGMENT_SEPARATOR};
pub use identifier::{KeyPattern, StructuredIdentifier, FIELD_DELIMITER, STRAIN_TOKEN_PATTERN};
pub use trim::TrimWindow;
