use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use dork_core::AccumulatedUrls;
use tempfile::NamedTempFile;
use thiserror::Error;

use crate::FlushOutcome;

#[derive(Debug, Error)]
pub enum PersistError {
    #[error("cannot prepare output directory {}: {source}", .path.display())]
    OutputDir { path: PathBuf, source: io::Error },
    #[error("cannot write {}: {source}", .path.display())]
    Io { path: PathBuf, source: io::Error },
}

/// Creates `dir` (and parents) unless it already is a directory.
pub fn ensure_output_dir(dir: &Path) -> Result<(), PersistError> {
    fs::create_dir_all(dir).map_err(|source| PersistError::OutputDir {
        path: dir.to_path_buf(),
        source,
    })
}

/// Stages `content` in a temp file inside `dir` and renames it over
/// `dir/filename`, so readers never observe a partial file.
pub fn write_atomic(dir: &Path, filename: &str, content: &str) -> Result<PathBuf, PersistError> {
    ensure_output_dir(dir)?;

    let target = dir.join(filename);
    let io_err = |source: io::Error| PersistError::Io {
        path: target.clone(),
        source,
    };

    let mut staged = NamedTempFile::new_in(dir).map_err(io_err)?;
    staged.write_all(content.as_bytes()).map_err(io_err)?;
    staged.as_file().sync_all().map_err(io_err)?;
    staged.persist(&target).map_err(|err| io_err(err.error))?;
    Ok(target)
}

/// Local wall-clock stamp used in result file names.
pub fn local_timestamp() -> String {
    chrono::Local::now().format("%Y-%m-%d_%H-%M-%S").to_string()
}

pub fn results_filename(timestamp: &str) -> String {
    format!("results_{timestamp}.txt")
}

/// Writes the accumulated URLs, one per line. An empty set writes nothing.
pub fn flush_results(dir: &Path, timestamp: &str, urls: &AccumulatedUrls) -> FlushOutcome {
    if urls.is_empty() {
        return FlushOutcome::Skipped;
    }
    match write_atomic(dir, &results_filename(timestamp), &urls.to_lines()) {
        Ok(path) => FlushOutcome::Written(path),
        Err(err) => FlushOutcome::Failed(err.to_string()),
    }
}
