use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use thiserror::Error;

/// Name of the downloadable LaTeX artifact.
pub const RESUME_TEX_FILENAME: &str = "optimized_resume.tex";
/// Name of the downloadable preview artifact.
pub const RESUME_PDF_FILENAME: &str = "optimized_resume.pdf";

#[derive(Debug, Error)]
pub enum PersistError {
    #[error("output directory missing or not writable: {0}")]
    OutputDir(String),
    #[error("io error: {0}")]
    Io(#[from] io::Error),
}

/// Ensure output directory exists; create if missing.
pub fn ensure_output_dir(dir: &Path) -> Result<(), PersistError> {
    if dir.exists() {
        let meta = fs::metadata(dir).map_err(|e| PersistError::OutputDir(e.to_string()))?;
        if !meta.is_dir() {
            return Err(PersistError::OutputDir("path is not a directory".into()));
        }
    } else {
        fs::create_dir_all(dir).map_err(|e| PersistError::OutputDir(e.to_string()))?;
    }
    // Basic writability probe: try creating a temp file.
    NamedTempFile::new_in(dir).map_err(|e| PersistError::OutputDir(e.to_string()))?;
    Ok(())
}

/// Writes the downloadable artifacts into one output directory, atomically
/// (temp file then rename) so a rerun never leaves a half-written file.
pub struct ArtifactWriter {
    dir: PathBuf,
}

impl ArtifactWriter {
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    pub fn write_resume_tex(&self, contents: &str) -> Result<PathBuf, PersistError> {
        self.write_atomic(RESUME_TEX_FILENAME, contents.as_bytes())
    }

    pub fn write_resume_pdf(&self, bytes: &[u8]) -> Result<PathBuf, PersistError> {
        self.write_atomic(RESUME_PDF_FILENAME, bytes)
    }

    fn write_atomic(&self, filename: &str, payload: &[u8]) -> Result<PathBuf, PersistError> {
        ensure_output_dir(&self.dir)?;

        let target = self.dir.join(filename);
        let mut tmp = NamedTempFile::new_in(&self.dir)?;
        tmp.write_all(payload)?;
        tmp.flush()?;
        tmp.as_file_mut().sync_all()?;

        // Replace existing file if present to keep determinism.
        if target.exists() {
            fs::remove_file(&target)?;
        }
        tmp.persist(&target).map_err(|e| PersistError::Io(e.error))?;
        Ok(target)
    }
}
