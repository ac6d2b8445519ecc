//! Staging-directory assembly
//!
//! Before a burn, every file that should land on the disc is copied
//! into one staging directory: the converted output files plus any
//! manually added files. Sources are never moved or modified.

use std::fs;
use std::path::{Path, PathBuf};

/// Fixed name of the staging directory
pub const STAGING_DIR_NAME: &str = "burn_temp";

/// Resolve where the staging directory lives
///
/// A subdirectory of the output directory when one is configured,
/// otherwise a directory relative to the working context.
pub fn staging_dir_for(output_dir: Option<&Path>) -> PathBuf {
    match output_dir {
        Some(dir) => dir.join(STAGING_DIR_NAME),
        None => PathBuf::from(STAGING_DIR_NAME),
    }
}

/// Assemble the staging directory for a burn
///
/// Copies every regular file directly inside the output directory (if
/// one is set), then every manually added file. Name collisions are
/// not deduplicated; the manual copy wins. Returns the staging path.
///
/// Fails with "No files to burn." before touching the filesystem when
/// there is no output directory and the manual set is empty.
pub fn stage_files(output_dir: Option<&Path>, manual_files: &[PathBuf]) -> Result<PathBuf, String> {
    if output_dir.is_none() && manual_files.is_empty() {
        return Err("No files to burn.".to_string());
    }

    let staging_dir = staging_dir_for(output_dir);
    fs::create_dir_all(&staging_dir)
        .map_err(|e| format!("Failed to create staging directory: {}", e))?;

    let mut staged = 0usize;

    if let Some(output_dir) = output_dir {
        let entries = fs::read_dir(output_dir)
            .map_err(|e| format!("Failed to read output directory: {}", e))?;
        for entry in entries.filter_map(|e| e.ok()) {
            let path = entry.path();
            // The staging dir itself sits under the output dir; skipping
            // non-files keeps it out of its own contents.
            if !path.is_file() {
                continue;
            }
            let dest = staging_dir.join(entry.file_name());
            fs::copy(&path, &dest)
                .map_err(|e| format!("Failed to copy {}: {}", path.display(), e))?;
            staged += 1;
        }
    }

    for file in manual_files {
        let name = file
            .file_name()
            .ok_or_else(|| format!("Invalid file path: {}", file.display()))?;
        let dest = staging_dir.join(name);
        fs::copy(file, &dest)
            .map_err(|e| format!("Failed to copy {}: {}", file.display(), e))?;
        staged += 1;
    }

    log::info!(
        "Staged {} file(s) in {}",
        staged,
        staging_dir.display()
    );
    Ok(staging_dir)
}
