use anyhow::{Context, Result};
use std::path::PathBuf;

/// Data directory name under the home directory.
const DATA_DIR_NAME: &str = ".scoopika";

/// Resolve the data directory: explicit path, else ~/.scoopika.
pub fn resolve_data_dir(data_dir: Option<&str>) -> Result<PathBuf> {
    match data_dir {
        Some(dir) => Ok(PathBuf::from(dir)),
        None => Ok(dirs::home_dir()
            .context("Could not determine home directory")?
            .join(DATA_DIR_NAME)),
    }
}
