use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::dedup::DedupError;

/// Extension of files picked up when walking a directory
pub const FASTA_EXTENSION: &str = "fasta";

/// Suffix replacing the extension of each de-duplicated file
pub const OUTPUT_SUFFIX: &str = "rmdup.fasta";

/// Files to process for `input`.
///
/// A file is returned as is, whatever its extension. A directory is walked
/// recursively and every file with the `.fasta` extension is returned, in
/// sorted order.
///
/// # Errors
///
/// Returns `DedupError::InvalidInput` if `input` is neither a file nor a
/// directory, or `DedupError::Io` if a directory cannot be read.
pub fn discover_inputs(input: &Path) -> Result<Vec<PathBuf>, DedupError> {
    if input.is_file() {
        return Ok(vec![input.to_path_buf()]);
    }
    if !input.is_dir() {
        return Err(DedupError::InvalidInput(input.to_path_buf()));
    }

    let mut files = Vec::new();
    walk(input, &mut files)?;
    files.sort();
    Ok(files)
}

fn walk(dir: &Path, files: &mut Vec<PathBuf>) -> io::Result<()> {
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        // Symlinked directories are not followed
        if entry.file_type()?.is_dir() {
            walk(&path, files)?;
        } else if path.is_file() && has_fasta_extension(&path) {
            files.push(path);
        }
    }
    Ok(())
}

fn has_fasta_extension(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == FASTA_EXTENSION)
}

/// Output path for `input`: its stem plus [`OUTPUT_SUFFIX`], inside `output_dir`.
#[must_use]
pub fn output_path(input: &Path, output_dir: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_default();
    output_dir.join(format!("{stem}.{OUTPUT_SUFFIX}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn touch(path: &Path) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, ">x\nA\n").unwrap();
    }

    #[test]
    fn test_output_path() {
        let out = Path::new("/out");
        assert_eq!(
            output_path(Path::new("/data/h1n1.fasta"), out),
            PathBuf::from("/out/h1n1.rmdup.fasta")
        );
        assert_eq!(
            output_path(Path::new("segments.fa"), out),
            PathBuf::from("/out/segments.rmdup.fasta")
        );
        assert_eq!(
            output_path(Path::new("x.fasta.gz"), out),
            PathBuf::from("/out/x.fasta.rmdup.fasta")
        );
    }

    #[test]
    fn test_discover_single_file_any_extension() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("reads.txt");
        touch(&file);
        assert_eq!(discover_inputs(&file).unwrap(), vec![file]);
    }

    #[test]
    fn test_discover_directory_recursive() {
        let dir = tempfile::tempdir().unwrap();
        touch(&dir.path().join("b.fasta"));
        touch(&dir.path().join("a.fasta"));
        touch(&dir.path().join("sub/deeper/c.fasta"));
        touch(&dir.path().join("notes.txt"));
        touch(&dir.path().join("d.fa"));
        touch(&dir.path().join("e.fasta.gz"));

        let found = discover_inputs(dir.path()).unwrap();
        assert_eq!(
            found,
            vec![
                dir.path().join("a.fasta"),
                dir.path().join("b.fasta"),
                dir.path().join("sub/deeper/c.fasta"),
            ]
        );
    }

    #[test]
    fn test_discover_missing() {
        let result = discover_inputs(Path::new("/nonexistent/path"));
        assert!(matches!(result, Err(DedupError::InvalidInput(_))));
    }
}
