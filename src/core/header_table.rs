use std::io::{self, Write};

use csv::WriterBuilder;

use crate::core::identifier::StructuredIdentifier;

/// Name of the first column, holding the untouched header
pub const ORIGINAL_HEADER_COLUMN: &str = "OriginalHeader";

/// Column names for `width` token fields.
///
/// User names are used first; missing positions are filled with `Part{N}`
/// (1-based) and surplus names are dropped.
#[must_use]
pub fn column_names(user_names: &[String], width: usize) -> Vec<String> {
    let mut names: Vec<String> = user_names.iter().take(width).cloned().collect();
    names.extend((names.len() + 1..=width).map(|i| format!("Part{i}")));
    names
}

/// Split headers laid out as a table, one row per identifier.
#[derive(Debug, Clone)]
pub struct HeaderTable {
    columns: Vec<String>,
    rows: Vec<StructuredIdentifier>,
    width: usize,
}

impl HeaderTable {
    /// Build a table wide enough for the longest identifier.
    ///
    /// Returns `None` when there are no identifiers, since no width can be
    /// derived.
    #[must_use]
    pub fn build(rows: Vec<StructuredIdentifier>, user_names: &[String]) -> Option<Self> {
        let width = rows.iter().map(StructuredIdentifier::field_count).max()?;

        let mut columns = Vec::with_capacity(width + 1);
        columns.push(ORIGINAL_HEADER_COLUMN.to_string());
        columns.extend(column_names(user_names, width));

        Some(Self {
            columns,
            rows,
            width,
        })
    }

    /// Header row, starting with [`ORIGINAL_HEADER_COLUMN`].
    #[must_use]
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Number of token fields per row.
    #[must_use]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Number of split headers, never zero.
    #[must_use]
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Rows as cells, right-padded with empty strings to the table width.
    pub fn rows(&self) -> impl Iterator<Item = Vec<&str>> + '_ {
        self.rows.iter().map(move |id| {
            let mut cells = Vec::with_capacity(self.width + 1);
            cells.push(id.original_header.as_str());
            cells.extend(id.fields.iter().map(String::as_str));
            cells.resize(self.width + 1, "");
            cells
        })
    }

    /// Write the table as tab-separated text with a header row.
    ///
    /// # Errors
    ///
    /// Returns an error if writing fails.
    pub fn write_tsv<W: Write>(&self, writer: W) -> io::Result<()> {
        let mut writer = WriterBuilder::new().delimiter(b'\t').from_writer(writer);
        writer.write_record(&self.columns)?;
        for row in self.rows() {
            writer.write_record(&row)?;
        }
        writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::identifier::KeyPattern;

    fn ids(headers: &[&str]) -> Vec<StructuredIdentifier> {
        let pattern = KeyPattern::strain_token();
        headers
            .iter()
            .filter_map(|h| StructuredIdentifier::parse(h, &pattern))
            .collect()
    }

    fn names(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| (*s).to_string()).collect()
    }

    #[test]
    fn test_column_names_extended() {
        assert_eq!(
            column_names(&names(&["Type", "Host"]), 5),
            vec!["Type", "Host", "Part3", "Part4", "Part5"]
        );
    }

    #[test]
    fn test_column_names_truncated() {
        assert_eq!(column_names(&names(&["a", "b", "c"]), 2), vec!["a", "b"]);
    }

    #[test]
    fn test_empty_table() {
        assert!(HeaderTable::build(Vec::new(), &names(&["Type"])).is_none());
    }

    #[test]
    fn test_rows_padded() {
        let table = HeaderTable::build(
            ids(&["s1|A/duck/Ohio/1/2020|HA", "s2|human/Texas|NA", "s3 no token"]),
            &names(&["Type", "Host"]),
        )
        .unwrap();

        assert_eq!(table.row_count(), 2);
        assert_eq!(table.width(), 5);
        assert_eq!(
            table.columns(),
            &["OriginalHeader", "Type", "Host", "Part3", "Part4", "Part5"]
        );

        let rows: Vec<Vec<&str>> = table.rows().collect();
        assert_eq!(
            rows[0],
            vec!["s1|A/duck/Ohio/1/2020|HA", "A", "duck", "Ohio", "1", "2020"]
        );
        assert_eq!(rows[1], vec!["s2|human/Texas|NA", "human", "Texas", "", "", ""]);
    }

    #[test]
    fn test_write_tsv() {
        let table =
            HeaderTable::build(ids(&["x|A/human/Victoria/1234/2024|y"]), &names(&["Type"])).unwrap();

        let mut out = Vec::new();
        table.write_tsv(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(
            text,
            "OriginalHeader\tType\tPart2\tPart3\tPart4\tPart5\n\
             x|A/human/Victoria/1234/2024|y\tA\thuman\tVictoria\t1234\t2024\n"
        );
    }
}
