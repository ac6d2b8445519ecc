//! External encoder subprocess handling
//!
//! One encoder invocation per source file. The encoder is any
//! ffmpeg-compatible binary; its path and the target bitrate come from
//! the tool configuration.

use std::path::{Path, PathBuf};
use std::process::Command;

/// Result of a single file conversion
#[derive(Debug, Clone)]
pub struct ConversionResult {
    /// Path to the converted output file
    pub output_path: PathBuf,
    /// Original input file path
    pub input_path: PathBuf,
    /// Whether conversion was successful
    pub success: bool,
    /// Error message if conversion failed
    pub error: Option<String>,
}

/// Convert a single audio file to AAC using the external encoder
///
/// # Arguments
/// * `encoder_path` - Path to the encoder binary
/// * `input_path` - Path to the input audio file
/// * `output_path` - Path for the output AAC file
/// * `bitrate` - Target bitrate in kbps (e.g., 192)
///
/// Success is the encoder exiting with status zero. On failure the
/// encoder's own error reporting (last stderr line) is captured.
pub fn encode_file(
    encoder_path: &Path,
    input_path: &Path,
    output_path: &Path,
    bitrate: u32,
) -> ConversionResult {
    // -i <input>   : input file
    // -c:a aac     : target codec
    // -b:a <rate>k : fixed bitrate
    // -y           : overwrite output without prompting
    let bitrate_str = format!("{}k", bitrate);
    let input_str = input_path.to_str().unwrap_or("");
    let output_str = output_path.to_str().unwrap_or("");

    let args = vec![
        "-i",
        input_str,
        "-c:a",
        "aac",
        "-b:a",
        &bitrate_str,
        "-y",
        output_str,
    ];

    log::debug!(
        "Converting: {} -> {} at {}kbps",
        input_path.display(),
        output_path.display(),
        bitrate
    );

    let result = Command::new(encoder_path).args(&args).output();

    match result {
        Ok(output) => {
            if output.status.success() {
                ConversionResult {
                    output_path: output_path.to_path_buf(),
                    input_path: input_path.to_path_buf(),
                    success: true,
                    error: None,
                }
            } else {
                let stderr = String::from_utf8_lossy(&output.stderr);
                let error_msg = format!(
                    "encoder exited with status {}: {}",
                    output.status,
                    stderr.lines().last().unwrap_or("Unknown error")
                );
                log::warn!("Conversion failed: {}", error_msg);
                ConversionResult {
                    output_path: output_path.to_path_buf(),
                    input_path: input_path.to_path_buf(),
                    success: false,
                    error: Some(error_msg),
                }
            }
        }
        Err(e) => {
            let error_msg = format!("Failed to spawn encoder: {}", e);
            log::warn!("Conversion error: {}", error_msg);
            ConversionResult {
                output_path: output_path.to_path_buf(),
                input_path: input_path.to_path_buf(),
                success: false,
                error: Some(error_msg),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conversion_result_creation() {
        let result = ConversionResult {
            output_path: PathBuf::from("/tmp/test.aac"),
            input_path: PathBuf::from("/home/user/song.flac"),
            success: true,
            error: None,
        };

        assert!(result.success);
        assert!(result.error.is_none());
    }

    #[test]
    fn test_encode_file_missing_encoder() {
        let result = encode_file(
            Path::new("/nonexistent/encoder"),
            Path::new("/tmp/in.mp3"),
            Path::new("/tmp/out.aac"),
            192,
        );
        assert!(!result.success);
        assert!(result.error.unwrap().contains("Failed to spawn encoder"));
    }

    #[cfg(unix)]
    #[test]
    fn test_encode_file_with_stub_encoder() {
        let temp = tempfile::TempDir::new().unwrap();
        let encoder = crate::test_support::write_stub_encoder(temp.path(), None);
        let input = temp.path().join("song.mp3");
        std::fs::write(&input, b"fake audio").unwrap();
        let output = temp.path().join("song.aac");

        let result = encode_file(&encoder, &input, &output, 192);
        assert!(result.success);
        assert!(output.exists());
    }

    #[cfg(unix)]
    #[test]
    fn test_encode_file_captures_stub_error() {
        let temp = tempfile::TempDir::new().unwrap();
        let encoder = crate::test_support::write_stub_encoder(temp.path(), Some("song"));
        let input = temp.path().join("song.mp3");
        std::fs::write(&input, b"fake audio").unwrap();
        let output = temp.path().join("song.aac");

        let result = encode_file(&encoder, &input, &output, 192);
        assert!(!result.success);
        let error = result.error.unwrap();
        assert!(error.contains("encoder exited with status"));
        assert!(error.contains("simulated encode failure"));
    }
}
