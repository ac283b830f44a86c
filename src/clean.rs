//! Cleanup of previously generated output.

use log::{debug, warn};
use std::fs;
use std::path::Path;

use crate::error::{IoContext, Result};

/// Removes every file directly inside `output_dir` for which `is_protected`
/// is false, creating the directory if it is missing. Subdirectories are
/// left in place. Returns the number of files removed.
pub fn clean_output(output_dir: &Path, is_protected: impl Fn(&str) -> bool) -> Result<usize> {
    if !output_dir.exists() {
        debug!("creating output directory {}", output_dir.display());
        fs::create_dir_all(output_dir).at(output_dir)?;
        return Ok(0);
    }

    let mut removed = 0;
    for entry in fs::read_dir(output_dir).at(output_dir)? {
        let entry = entry.at(output_dir)?;
        let path = entry.path();
        let name = entry.file_name();
        let name = name.to_string_lossy();

        if path.is_dir() {
            warn!("leaving directory {} in output", path.display());
            continue;
        }
        if is_protected(&name) {
            debug!("keeping protected {name}");
            continue;
        }

        fs::remove_file(&path).at(&path)?;
        removed += 1;
    }
    Ok(removed)
}
