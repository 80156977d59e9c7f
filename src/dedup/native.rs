use std::collections::HashSet;
use std::path::Path;

use noodles_fasta as fasta;
use tracing::info;

use crate::core::KeyPattern;
use crate::dedup::{DedupError, Deduplicator};
use crate::parsing::fasta::{read_records, record_header};
use crate::parsing::ParseError;
use crate::utils::output::AtomicFile;

/// In-process de-duplication with the same keep-first rule as seqkit.
///
/// Records whose header does not match the pattern have no key and are
/// always kept.
#[derive(Debug, Clone, Copy, Default)]
pub struct NativeDeduplicator;

impl Deduplicator for NativeDeduplicator {
    fn name(&self) -> &str {
        "native"
    }

    fn deduplicate(
        &self,
        input: &Path,
        pattern: &KeyPattern,
        output: &Path,
    ) -> Result<(), DedupError> {
        let records = read_records(input)?;
        if records.is_empty() {
            return Err(ParseError::NoRecords(input.to_path_buf()).into());
        }
        let total = records.len();

        let mut seen = HashSet::new();
        let mut file = AtomicFile::create(output)?;
        let mut kept = 0;
        {
            let mut writer = fasta::io::Writer::new(&mut file);
            for record in &records {
                let header = record_header(record);
                let is_first = match pattern.extract(&header) {
                    Some(key) => seen.insert(key.to_string()),
                    None => true,
                };
                if is_first {
                    writer.write_record(record)?;
                    kept += 1;
                }
            }
        }
        file.commit()?;

        info!(
            input = %input.display(),
            removed = total - kept,
            "{} duplicated records removed",
            total - kept
        );
        Ok(())
    }
}
