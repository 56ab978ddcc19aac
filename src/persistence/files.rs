use anyhow::{Context, Result};
use std::env;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Name of the data directory, both local and under the home directory
pub const DATA_DIR_NAME: &str = ".tally";

/// Get the default data directory - checks for local .tally first, then falls back to global ~/.tally
pub fn default_data_dir() -> Result<PathBuf> {
    let current_dir = env::current_dir().context("Could not determine current directory")?;

    if let Some(local_dir) = find_local_data_dir(&current_dir) {
        return Ok(local_dir);
    }

    let home = dirs::home_dir().context("Could not determine home directory")?;
    Ok(home.join(DATA_DIR_NAME))
}

/// Find local .tally directory by walking up the directory tree
pub fn find_local_data_dir(start_dir: &Path) -> Option<PathBuf> {
    let mut current = start_dir;

    loop {
        let candidate = current.join(DATA_DIR_NAME);
        if candidate.is_dir() {
            return Some(candidate);
        }

        current = current.parent()?;
    }
}

/// Ensure a directory exists
pub fn ensure_dir(dir: &Path) -> Result<()> {
    if !dir.exists() {
        fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create directory: {}", dir.display()))?;
    }
    Ok(())
}

/// Initialize a local .tally directory inside `parent`
pub fn init_local_data_dir(parent: &Path) -> Result<PathBuf> {
    let data_dir = parent.join(DATA_DIR_NAME);

    if data_dir.exists() {
        anyhow::bail!("Data directory already exists: {}", data_dir.display());
    }

    fs::create_dir_all(&data_dir)
        .with_context(|| format!("Failed to create directory: {}", data_dir.display()))?;

    Ok(data_dir)
}

/// Atomically write content to a file using temp file + rename
pub fn atomic_write<P: AsRef<Path>>(path: P, content: &str) -> Result<()> {
    let path = path.as_ref();
    let dir = path.parent().context("File path has no parent directory")?;

    let mut temp_file = NamedTempFile::new_in(dir).context("Failed to create temporary file")?;

    temp_file
        .write_all(content.as_bytes())
        .context("Failed to write to temporary file")?;

    temp_file
        .as_file()
        .sync_all()
        .context("Failed to sync temporary file")?;

    temp_file
        .persist(path)
        .with_context(|| format!("Failed to persist file: {}", path.display()))?;

    Ok(())
}

/// Read file content, `None` if the file doesn't exist
pub fn read_file<P: AsRef<Path>>(path: P) -> Result<Option<String>> {
    let path = path.as_ref();
    if !path.exists() {
        return Ok(None);
    }
    fs::read_to_string(path)
        .map(Some)
        .with_context(|| format!("Failed to read file: {}", path.display()))
}
