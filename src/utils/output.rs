//! Output files that only appear at their final path once fully written.

use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

/// A file written to a temporary sibling and renamed over `target` on commit.
///
/// Dropping an uncommitted `AtomicFile` removes the temporary file, leaving
/// `target` untouched.
pub struct AtomicFile {
    inner: BufWriter<NamedTempFile>,
    target: PathBuf,
}

impl AtomicFile {
    /// Create a temporary file in the directory of `target`.
    ///
    /// # Errors
    ///
    /// Returns an error if the temporary file cannot be created.
    pub fn create(target: &Path) -> io::Result<Self> {
        let dir = match target.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let temp = NamedTempFile::new_in(dir)?;
        Ok(Self {
            inner: BufWriter::new(temp),
            target: target.to_path_buf(),
        })
    }

    /// Flush and move the file to its final path, replacing any existing file.
    ///
    /// # Errors
    ///
    /// Returns an error if flushing or renaming fails.
    pub fn commit(self) -> io::Result<()> {
        let temp = self.inner.into_inner().map_err(io::IntoInnerError::into_error)?;
        temp.persist(&self.target).map_err(|e| e.error)?;
        Ok(())
    }
}

impl Write for AtomicFile {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.inner.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_commit_replaces_target() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("out.txt");
        std::fs::write(&target, "old").unwrap();

        let mut file = AtomicFile::create(&target).unwrap();
        file.write_all(b"new").unwrap();
        assert_eq!(std::fs::read_to_string(&target).unwrap(), "old");
        file.commit().unwrap();

        assert_eq!(std::fs::read_to_string(&target).unwrap(), "new");
    }

    #[test]
    fn test_drop_leaves_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("out.txt");

        {
            let mut file = AtomicFile::create(&target).unwrap();
            file.write_all(b"partial").unwrap();
        }

        assert!(!target.exists());
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }
}
