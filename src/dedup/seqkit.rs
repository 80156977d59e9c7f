use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use tempfile::NamedTempFile;
use tracing::{debug, info};

use crate::core::KeyPattern;
use crate::dedup::{DedupError, Deduplicator};

/// Environment variable overriding the seqkit executable
pub const SEQKIT_ENV_BIN: &str = "FLUPREP_SEQKIT";

/// Runs `seqkit rmdup --id-regexp <pattern> <input>` with stdout sent to the
/// output file.
///
/// The output is first written to a temporary file next to the target and
/// only renamed into place when seqkit exits successfully.
#[derive(Debug, Clone)]
pub struct SeqkitDeduplicator {
    program: PathBuf,
}

impl SeqkitDeduplicator {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// The command line run for one input, without output redirection.
    #[must_use]
    pub fn command(&self, input: &Path, pattern: &KeyPattern) -> Command {
        let mut command = Command::new(&self.program);
        command
            .arg("rmdup")
            .arg("--id-regexp")
            .arg(pattern.as_str())
            .arg(input);
        command
    }
}

impl Deduplicator for SeqkitDeduplicator {
    fn name(&self) -> &str {
        "seqkit"
    }

    fn deduplicate(
        &self,
        input: &Path,
        pattern: &KeyPattern,
        output: &Path,
    ) -> Result<(), DedupError> {
        let dir = match output.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let temp = NamedTempFile::new_in(dir)?;

        let mut command = self.command(input, pattern);
        debug!(command = ?command, "Running seqkit");

        let result = command
            .stdout(Stdio::from(temp.reopen()?))
            .stderr(Stdio::piped())
            .output()
            .map_err(|source| DedupError::ToolLaunch {
                tool: self.program.display().to_string(),
                source,
            })?;

        let stderr = String::from_utf8_lossy(&result.stderr).trim().to_string();
        if !result.status.success() {
            return Err(DedupError::ToolFailed {
                tool: self.program.display().to_string(),
                input: input.to_path_buf(),
                status: result.status,
                stderr,
            });
        }

        if !stderr.is_empty() {
            info!(input = %input.display(), "seqkit: {stderr}");
        }

        temp.persist(output).map_err(|e| DedupError::Io(e.error))?;
        Ok(())
    }
}
