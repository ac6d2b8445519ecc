//! External tool configuration
//!
//! The encoder and burn tool locations, the destination drive, and the
//! target bitrate are platform-specific details rather than part of
//! the workflow, so they are resolved from a config file at startup
//! instead of being hardcoded.
//!
//! Persisted to `<config dir>/aacburn/config.json`.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Paths and parameters for the two external tools
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolConfig {
    /// Encoder binary (bare name is resolved via PATH)
    #[serde(default = "default_encoder_path")]
    pub encoder_path: PathBuf,
    /// Burning tool binary
    #[serde(default = "default_burner_path")]
    pub burner_path: PathBuf,
    /// Destination drive identifier handed to the burn tool
    #[serde(default = "default_burn_drive")]
    pub burn_drive: String,
    /// Fixed encoding bitrate in kbps
    #[serde(default = "default_bitrate")]
    pub bitrate_kbps: u32,
}

fn default_encoder_path() -> PathBuf {
    PathBuf::from("ffmpeg")
}

fn default_burner_path() -> PathBuf {
    if cfg!(windows) {
        PathBuf::from("C:\\Program Files (x86)\\ImgBurn\\ImgBurn.exe")
    } else {
        PathBuf::from("imgburn")
    }
}

fn default_burn_drive() -> String {
    if cfg!(windows) {
        "F:\\".to_string()
    } else {
        "F:".to_string()
    }
}

fn default_bitrate() -> u32 {
    192
}

impl Default for ToolConfig {
    fn default() -> Self {
        Self {
            encoder_path: default_encoder_path(),
            burner_path: default_burner_path(),
            burn_drive: default_burn_drive(),
            bitrate_kbps: default_bitrate(),
        }
    }
}

impl ToolConfig {
    const CONFIG_FILE: &'static str = "config.json";

    /// Get the app config directory, creating it if needed
    fn get_config_dir() -> Result<PathBuf, String> {
        let config_dir =
            dirs::config_dir().ok_or_else(|| "Could not determine config directory".to_string())?;

        let app_dir = config_dir.join("aacburn");

        if !app_dir.exists() {
            std::fs::create_dir_all(&app_dir)
                .map_err(|e| format!("Failed to create config directory: {}", e))?;
        }

        Ok(app_dir)
    }

    /// Load the tool config from disk, or return defaults if not found
    pub fn load() -> Self {
        match Self::try_load() {
            Ok(config) => {
                log::debug!("Loaded tool config from disk");
                config
            }
            Err(e) => {
                log::debug!("Using default tool config: {}", e);
                Self::default()
            }
        }
    }

    /// Load the config, writing a default file on first run so users
    /// have something to edit
    pub fn load_or_create() -> Self {
        let config = Self::load();
        let file_exists = Self::get_config_dir()
            .map(|dir| dir.join(Self::CONFIG_FILE).exists())
            .unwrap_or(true);
        if !file_exists {
            if let Err(e) = config.save() {
                log::warn!("Could not write default config: {}", e);
            }
        }
        config
    }

    fn try_load() -> Result<Self, String> {
        let app_dir = Self::get_config_dir()?;
        let config_path = app_dir.join(Self::CONFIG_FILE);

        if !config_path.exists() {
            return Err("Config file not found".to_string());
        }

        let contents = std::fs::read_to_string(&config_path)
            .map_err(|e| format!("Failed to read config: {}", e))?;

        serde_json::from_str(&contents).map_err(|e| format!("Failed to parse config: {}", e))
    }

    /// Save the tool config to disk
    pub fn save(&self) -> Result<(), String> {
        let app_dir = Self::get_config_dir()?;
        let config_path = app_dir.join(Self::CONFIG_FILE);

        let json = serde_json::to_string_pretty(self)
            .map_err(|e| format!("Failed to serialize config: {}", e))?;

        std::fs::write(&config_path, json)
            .map_err(|e| format!("Failed to write config: {}", e))?;

        log::debug!("Saved tool config to {:?}", config_path);
        Ok(())
    }

    /// Verify that the configured encoder can be found
    ///
    /// A bare name is searched for on PATH; anything with a directory
    /// component must exist as given.
    pub fn verify_encoder(&self) -> Result<PathBuf, String> {
        resolve_tool(&self.encoder_path)
            .ok_or_else(|| format!("Encoder not found: {}", self.encoder_path.display()))
    }
}

/// Resolve a tool path, searching PATH for bare names
fn resolve_tool(tool: &Path) -> Option<PathBuf> {
    if tool.components().count() > 1 {
        return tool.exists().then(|| tool.to_path_buf());
    }

    let path_var = std::env::var_os("PATH")?;
    std::env::split_paths(&path_var)
        .map(|dir| dir.join(tool))
        .find(|candidate| candidate.is_file())
}
