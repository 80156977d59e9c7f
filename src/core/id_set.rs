use std::collections::BTreeSet;

use serde::Serialize;

/// Separator between the sequence identifier and the segment number
/// in record identifiers such as `EPI123_4`.
pub const SEGMENT_SEPARATOR: char = '_';

/// Scalar identifier of a record: the text before the first `separator`.
#[must_use]
pub fn scalar_id(record_id: &str, separator: char) -> &str {
    record_id
        .split_once(separator)
        .map_or(record_id, |(id, _)| id)
}

/// The five derived identifier lists, in report order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdList {
    FastaIds,
    MetadataIds,
    Intersect,
    FastaOnly,
    MetadataOnly,
}

impl IdList {
    pub const ALL: [IdList; 5] = [
        IdList::FastaIds,
        IdList::MetadataIds,
        IdList::Intersect,
        IdList::FastaOnly,
        IdList::MetadataOnly,
    ];

    #[must_use]
    pub fn file_name(self) -> &'static str {
        match self {
            IdList::FastaIds => "fasta_ids.tsv",
            IdList::MetadataIds => "metadata_ids.tsv",
            IdList::Intersect => "intersect.tsv",
            IdList::FastaOnly => "fasta_only.tsv",
            IdList::MetadataOnly => "metadata_only.tsv",
        }
    }

    #[must_use]
    pub fn description(self) -> &'static str {
        match self {
            IdList::FastaIds => "Contains all seqids present in the FASTA file.",
            IdList::MetadataIds => "Contains all seqids present in the metadata file.",
            IdList::Intersect => "Contains seqids present in both the FASTA and metadata files.",
            IdList::FastaOnly => "Contains seqids present only in the FASTA file.",
            IdList::MetadataOnly => "Contains seqids present only in the metadata file.",
        }
    }
}

/// Counts reported by the cross-referencer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct IdSummary {
    pub fasta_ids: usize,
    pub metadata_ids: usize,
    pub common: usize,
    pub fasta_only: usize,
    pub metadata_only: usize,
}

/// Identifiers from a FASTA file and a metadata table, compared as sets.
///
/// Sets are ordered so every derived list comes out sorted.
#[derive(Debug, Clone, Default)]
pub struct IdComparison {
    pub fasta: BTreeSet<String>,
    pub metadata: BTreeSet<String>,
}

impl IdComparison {
    #[must_use]
    pub fn new(fasta: BTreeSet<String>, metadata: BTreeSet<String>) -> Self {
        Self { fasta, metadata }
    }

    #[must_use]
    pub fn intersection(&self) -> BTreeSet<String> {
        self.fasta.intersection(&self.metadata).cloned().collect()
    }

    #[must_use]
    pub fn fasta_only(&self) -> BTreeSet<String> {
        self.fasta.difference(&self.metadata).cloned().collect()
    }

    #[must_use]
    pub fn metadata_only(&self) -> BTreeSet<String> {
        self.metadata.difference(&self.fasta).cloned().collect()
    }

    #[must_use]
    pub fn summary(&self) -> IdSummary {
        IdSummary {
            fasta_ids: self.fasta.len(),
            metadata_ids: self.metadata.len(),
            common: self.fasta.intersection(&self.metadata).count(),
            fasta_only: self.fasta.difference(&self.metadata).count(),
            metadata_only: self.metadata.difference(&self.fasta).count(),
        }
    }

    /// Members of one of the derived lists.
    #[must_use]
    pub fn list(&self, which: IdList) -> BTreeSet<String> {
        match which {
            IdList::FastaIds => self.fasta.clone(),
            IdList::MetadataIds => self.metadata.clone(),
            IdList::Intersect => self.intersection(),
            IdList::FastaOnly => self.fasta_only(),
            IdList::MetadataOnly => self.metadata_only(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(ids: &[&str]) -> BTreeSet<String> {
        ids.iter().map(|s| (*s).to_string()).collect()
    }

    #[test]
    fn test_scalar_id() {
        assert_eq!(scalar_id("EPI123_4", SEGMENT_SEPARATOR), "EPI123");
        assert_eq!(scalar_id("EPI123_4_extra", SEGMENT_SEPARATOR), "EPI123");
        assert_eq!(scalar_id("EPI123", SEGMENT_SEPARATOR), "EPI123");
        assert_eq!(scalar_id("_4", SEGMENT_SEPARATOR), "");
    }

    #[test]
    fn test_comparison_counts() {
        let cmp = IdComparison::new(set(&["A", "B", "C"]), set(&["B", "C", "D"]));
        assert_eq!(
            cmp.summary(),
            IdSummary {
                fasta_ids: 3,
                metadata_ids: 3,
                common: 2,
                fasta_only: 1,
                metadata_only: 1,
            }
        );
        assert_eq!(cmp.intersection(), set(&["B", "C"]));
        assert_eq!(cmp.fasta_only(), set(&["A"]));
        assert_eq!(cmp.metadata_only(), set(&["D"]));
    }

    #[test]
    fn test_lists_are_sorted() {
        let cmp = IdComparison::new(set(&["z", "a", "m"]), set(&[]));
        let listed: Vec<String> = cmp.list(IdList::FastaOnly).into_iter().collect();
        assert_eq!(listed, vec!["a", "m", "z"]);
        assert!(cmp.list(IdList::Intersect).is_empty());
    }

    #[test]
    fn test_list_file_names_unique() {
        let names: BTreeSet<&str> = IdList::ALL.iter().map(|l| l.file_name()).collect();
        assert_eq!(names.len(), 5);
    }
}
