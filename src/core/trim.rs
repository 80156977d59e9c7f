use std::ops::Range;

use noodles_fasta as fasta;
use noodles_fasta::record::Sequence;

/// A zero-based, end-exclusive coordinate window applied to every record.
///
/// Coordinates are clipped to each record's length rather than validated:
/// an `end` past the sequence end keeps everything up to the end, and a window
/// that starts at or after the end (or after `end`) yields an empty sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrimWindow {
    pub start: usize,
    pub end: usize,
}

impl TrimWindow {
    #[must_use]
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// The part of `0..len` covered by the window.
    #[must_use]
    pub fn clip(&self, len: usize) -> Range<usize> {
        let end = self.end.min(len);
        let start = self.start.min(end);
        start..end
    }

    #[must_use]
    pub fn apply<'a>(&self, residues: &'a [u8]) -> &'a [u8] {
        &residues[self.clip(residues.len())]
    }

    /// A copy of `record` with its sequence cut to the window; the
    /// definition line is kept as is.
    #[must_use]
    pub fn trim_record(&self, record: &fasta::Record) -> fasta::Record {
        let residues = self.apply(record.sequence().as_ref()).to_vec();
        fasta::Record::new(record.definition().clone(), Sequence::from(residues))
    }
}
