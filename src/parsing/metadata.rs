//! Tab-separated metadata tables keyed by a sequence identifier column.

use std::collections::BTreeSet;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use csv::{ReaderBuilder, StringRecord};
use tracing::debug;

use crate::parsing::ParseError;

/// Name of the column holding sequence identifiers
pub const SEQID_COLUMN: &str = "seqid";

/// A metadata table held in memory with its original row order.
#[derive(Debug, Clone)]
pub struct MetadataTable {
    pub headers: StringRecord,
    pub rows: Vec<StringRecord>,
    key_index: usize,
}

impl MetadataTable {
    /// Read a tab-separated table and locate `key_column` in its header row.
    ///
    /// # Errors
    ///
    /// Returns `ParseError::NotFound` if the file does not exist,
    /// `ParseError::MissingColumn` if the header row lacks `key_column`, or
    /// `ParseError::Tsv` if a row cannot be parsed.
    pub fn from_path(path: &Path, key_column: &str) -> Result<Self, ParseError> {
        if !path.is_file() {
            return Err(ParseError::NotFound(path.to_path_buf()));
        }
        let file = File::open(path)?;
        Self::from_reader(BufReader::new(file), path, key_column)
    }

    /// Read a table from any reader; `source` is only used for messages.
    ///
    /// # Errors
    ///
    /// Same as [`MetadataTable::from_path`], minus the existence check.
    pub fn from_reader<R: Read>(
        reader: R,
        source: &Path,
        key_column: &str,
    ) -> Result<Self, ParseError> {
        let mut reader = ReaderBuilder::new()
            .delimiter(b'\t')
            .has_headers(true)
            .from_reader(reader);

        let headers = reader.headers()?.clone();
        let key_index = headers
            .iter()
            .position(|h| h.trim() == key_column)
            .ok_or_else(|| ParseError::MissingColumn {
                column: key_column.to_string(),
                path: source.to_path_buf(),
            })?;

        let rows = reader.records().collect::<Result<Vec<_>, _>>()?;
        debug!(rows = rows.len(), column = key_column, "Loaded metadata table");

        Ok(Self {
            headers,
            rows,
            key_index,
        })
    }

    /// Key of a row, `None` when the cell is empty.
    #[must_use]
    pub fn key_of<'a>(&self, row: &'a StringRecord) -> Option<&'a str> {
        row.get(self.key_index)
            .map(str::trim)
            .filter(|value| !value.is_empty())
    }

    /// All distinct non-empty keys of the table.
    #[must_use]
    pub fn keys(&self) -> BTreeSet<String> {
        self.rows
            .iter()
            .filter_map(|row| self.key_of(row))
            .map(str::to_string)
            .collect()
    }

    /// Rows whose key is in `keep`, in their original order.
    pub fn rows_with_keys<'a>(
        &'a self,
        keep: &'a BTreeSet<String>,
    ) -> impl Iterator<Item = &'a StringRecord> + 'a {
        self.rows
            .iter()
            .filter(move |row| self.key_of(row).is_some_and(|key| keep.contains(key)))
    }
}
