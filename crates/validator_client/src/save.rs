use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SaveError {
    #[error("output directory missing or not writable: {0}")]
    OutputDir(String),
    #[error("io error: {0}")]
    Io(#[from] io::Error),
}

/// Ensure the output directory exists; create it if missing.
pub fn ensure_output_dir(dir: &Path) -> Result<(), SaveError> {
    if dir.exists() {
        let meta = fs::metadata(dir).map_err(|e| SaveError::OutputDir(e.to_string()))?;
        if !meta.is_dir() {
            return Err(SaveError::OutputDir("path is not a directory".into()));
        }
    } else {
        fs::create_dir_all(dir).map_err(|e| SaveError::OutputDir(e.to_string()))?;
    }
    Ok(())
}

/// Atomically write the artifact to `{dir}/{filename}` by writing a temp
/// file then renaming.
pub fn save_artifact(dir: &Path, filename: &str, bytes: &[u8]) -> Result<PathBuf, SaveError> {
    ensure_output_dir(dir)?;

    let target = dir.join(filename);
    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(bytes)?;
    tmp.flush()?;
    tmp.as_file_mut().sync_all()?;

    // Replace an existing result from an earlier download.
    if target.exists() {
        fs::remove_file(&target)?;
    }
    tmp.persist(&target).map_err(|e| SaveError::Io(e.error))?;
    Ok(target)
}
