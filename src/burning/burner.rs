//! External burn tool invocation
//!
//! One process call per burn request. The tool is invoked in build
//! mode against the staging directory; a zero exit status only means
//! the burn has started, not that it finished.

use std::path::Path;
use std::process::Command;

use crate::config::ToolConfig;

/// Start a burn of the staging directory
///
/// Invokes the configured burning tool once with build mode, the
/// staging directory as source, the configured destination drive, and
/// flags to start immediately and close the tool afterward.
///
/// # Returns
/// * `Ok(())` when the tool accepted the job (exit status zero)
/// * `Err(String)` with the tool's reported error otherwise
pub fn start_burn(config: &ToolConfig, staging_dir: &Path) -> Result<(), String> {
    if !staging_dir.is_dir() {
        return Err(format!(
            "Staging directory not found: {}",
            staging_dir.display()
        ));
    }

    let staging_str = staging_dir.to_str().unwrap_or("");

    log::info!(
        "Starting burn of {} to drive {}",
        staging_dir.display(),
        config.burn_drive
    );

    let output = Command::new(&config.burner_path)
        .args([
            "/MODE",
            "BUILD",
            "/SRC",
            staging_str,
            "/DEST",
            &config.burn_drive,
            "/START",
            "/CLOSE",
        ])
        .output()
        .map_err(|e| format!("Failed to execute burn tool: {}", e))?;

    if output.status.success() {
        log::info!("Burn tool accepted the job");
        Ok(())
    } else {
        let stderr = String::from_utf8_lossy(&output.stderr);
        Err(format!(
            "Burn tool exited with status {}: {}",
            output.status,
            stderr.lines().last().unwrap_or("Unknown error")
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn test_config(burner_path: &Path) -> ToolConfig {
        ToolConfig {
            burner_path: burner_path.to_path_buf(),
            ..ToolConfig::default()
        }
    }

    #[test]
    fn test_start_burn_missing_staging_dir() {
        let temp = TempDir::new().unwrap();
        let config = test_config(Path::new("/nonexistent/burner"));
        let result = start_burn(&config, &temp.path().join("missing"));
        assert!(result.is_err());
        assert!(result.unwrap_err().contains("Staging directory not found"));
    }

    #[test]
    fn test_start_burn_missing_tool() {
        let temp = TempDir::new().unwrap();
        let config = test_config(Path::new("/nonexistent/burner"));
        let result = start_burn(&config, temp.path());
        assert!(result.is_err());
        assert!(result.unwrap_err().contains("Failed to execute burn tool"));
    }

    #[cfg(unix)]
    #[test]
    fn test_start_burn_with_stub_tool() {
        let temp = TempDir::new().unwrap();
        let burner = crate::test_support::write_stub_burner(temp.path(), true);
        let config = test_config(&burner);
        assert!(start_burn(&config, temp.path()).is_ok());
    }

    #[cfg(unix)]
    #[test]
    fn test_start_burn_captures_tool_error() {
        let temp = TempDir::new().unwrap();
        let burner = crate::test_support::write_stub_burner(temp.path(), false);
        let config = test_config(&burner);
        let result = start_burn(&config, temp.path());
        assert!(result.is_err());
        let error = result.unwrap_err();
        assert!(error.contains("Burn tool exited with status"));
        assert!(error.contains("no device"));
    }
}
