//! Audio conversion module
//!
//! Handles converting audio files to AAC by driving an external
//! encoder, one file at a time.

mod batch;
mod encoder;

pub use batch::{convert_folder, start_batch, BatchEvent, BatchHandle, BatchSummary, ConversionJob};
pub use encoder::{encode_file, ConversionResult};

use std::path::{Path, PathBuf};

/// Extension given to every converted file
pub const TARGET_EXTENSION: &str = "aac";

/// Check if a file qualifies for conversion based on its extension
///
/// The recognized set is fixed; matching is case-insensitive.
pub fn is_convertible_file(path: &Path) -> bool {
    if let Some(ext) = path.extension() {
        let ext = ext.to_string_lossy().to_lowercase();
        matches!(ext.as_str(), "mp3" | "wav" | "flac" | "ogg")
    } else {
        false
    }
}

/// Derive the output path for a source file
///
/// Output files keep the source base name with the target extension,
/// placed directly in the output directory.
pub fn output_path_for(output_dir: &Path, source_path: &Path) -> PathBuf {
    let stem = source_path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("output");
    output_dir.join(format!("{}.{}", stem, TARGET_EXTENSION))
}

/// Create the output directory (including parents) if it doesn't exist
///
/// An existing directory is left untouched.
pub fn ensure_output_dir(output_dir: &Path) -> Result<(), String> {
    std::fs::create_dir_all(output_dir)
        .map_err(|e| format!("Failed to create output directory: {}", e))
}
