//! Session workflow state
//!
//! One `Session` lives for the duration of the interactive run. It
//! owns the selected folders, the manually added file set, and the
//! append-only status log, and guards every operation with an explicit
//! state machine instead of scattered enable/disable flags.

use std::path::{Path, PathBuf};

use crate::burning::{stage_files, start_burn};
use crate::config::ToolConfig;
use crate::conversion::{start_batch, BatchEvent, BatchHandle, ConversionJob};

/// Where the session is in the convert-then-burn workflow
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// Nothing selected yet
    Idle,
    /// One of the two folders selected
    InputSelected,
    /// Both folders selected, conversion available
    FoldersSelected,
    /// A batch is running on the background worker
    Converting,
    /// Batch finished (regardless of per-file failures), burn available
    ReadyToBurn,
}

/// Append-only log of user-visible status lines
///
/// Every line also goes to the logging backend; the most recent line
/// doubles as the single-line status indicator.
#[derive(Debug, Default)]
pub struct StatusLog {
    entries: Vec<String>,
}

impl StatusLog {
    pub fn push(&mut self, message: String) {
        log::info!("{}", message);
        self.entries.push(message);
    }

    pub fn last(&self) -> Option<&str> {
        self.entries.last().map(|s| s.as_str())
    }

    pub fn lines(&self) -> &[String] {
        &self.entries
    }
}

/// The running session: selected paths, manual file set, status log
pub struct Session {
    input_dir: Option<PathBuf>,
    output_dir: Option<PathBuf>,
    manual_files: Vec<PathBuf>,
    state: SessionState,
    status: StatusLog,
}

impl Session {
    pub fn new() -> Self {
        Self {
            input_dir: None,
            output_dir: None,
            manual_files: Vec::new(),
            state: SessionState::Idle,
            status: StatusLog::default(),
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn input_dir(&self) -> Option<&Path> {
        self.input_dir.as_deref()
    }

    pub fn output_dir(&self) -> Option<&Path> {
        self.output_dir.as_deref()
    }

    pub fn manual_files(&self) -> &[PathBuf] {
        &self.manual_files
    }

    pub fn status_log(&self) -> &StatusLog {
        &self.status
    }

    pub fn is_converting(&self) -> bool {
        self.state == SessionState::Converting
    }

    /// Burn is available after a batch completes or once any file has
    /// been added manually, independent of conversion.
    pub fn can_burn(&self) -> bool {
        self.state == SessionState::ReadyToBurn || !self.manual_files.is_empty()
    }

    /// Select the input folder
    pub fn select_input(&mut self, path: PathBuf) -> Result<(), String> {
        if self.is_converting() {
            return Err("Cannot change folders while converting.".to_string());
        }
        self.status.push(format!("Input folder: {}", path.display()));
        self.input_dir = Some(path);
        self.advance_selection_state();
        Ok(())
    }

    /// Select the output folder
    pub fn select_output(&mut self, path: PathBuf) -> Result<(), String> {
        if self.is_converting() {
            return Err("Cannot change folders while converting.".to_string());
        }
        self.status.push(format!("Output folder: {}", path.display()));
        self.output_dir = Some(path);
        self.advance_selection_state();
        Ok(())
    }

    fn advance_selection_state(&mut self) {
        // Re-selecting after a finished batch keeps burn available
        if self.state == SessionState::ReadyToBurn {
            return;
        }
        self.state = match (&self.input_dir, &self.output_dir) {
            (Some(_), Some(_)) => SessionState::FoldersSelected,
            (None, None) => SessionState::Idle,
            _ => SessionState::InputSelected,
        };
    }

    /// Append externally chosen files to the manual set
    ///
    /// No validation beyond what the chooser guarantees; duplicates are
    /// kept. Returns the new cumulative count.
    pub fn add_files(&mut self, paths: Vec<PathBuf>) -> usize {
        self.manual_files.extend(paths);
        let count = self.manual_files.len();
        self.status.push(format!("{} files added manually.", count));
        count
    }

    /// Start the conversion batch on the background worker
    ///
    /// Requires both folders and at most one active batch. The caller
    /// drains the returned handle and feeds each event back through
    /// [`Session::record_event`].
    pub fn start_conversion(&mut self, config: &ToolConfig) -> Result<BatchHandle, String> {
        if self.is_converting() {
            return Err("A conversion is already running.".to_string());
        }

        let (input_dir, output_dir) = match (&self.input_dir, &self.output_dir) {
            (Some(input), Some(output)) => (input.clone(), output.clone()),
            _ => {
                let message = "Please select both input and output folders.".to_string();
                self.status.push(message.clone());
                return Err(message);
            }
        };

        let job = ConversionJob {
            input_dir,
            output_dir,
        };
        self.state = SessionState::Converting;
        self.status.push("Converting files...".to_string());

        Ok(start_batch(
            job,
            config.encoder_path.clone(),
            config.bitrate_kbps,
        ))
    }

    /// Fold one batch event into the session
    ///
    /// Appends the matching status line and, on completion, moves the
    /// session to `ReadyToBurn` regardless of per-file failures.
    /// Returns the appended line.
    pub fn record_event(&mut self, event: &BatchEvent) -> String {
        let message = match event {
            BatchEvent::Converted { output_path } => {
                format!("Conversion successful: {}", output_path.display())
            }
            BatchEvent::Failed { input_path, error } => {
                format!(
                    "Error during conversion of {}: {}",
                    input_path.display(),
                    error
                )
            }
            BatchEvent::Aborted { error } => {
                // The batch never ran; conversion can be retried
                self.state = SessionState::FoldersSelected;
                format!("Conversion failed: {}", error)
            }
            BatchEvent::Finished(_) => {
                self.state = SessionState::ReadyToBurn;
                "Conversion complete. Ready to burn files.".to_string()
            }
        };
        self.status.push(message.clone());
        message
    }

    /// Stage everything burnable and start a burn
    ///
    /// Burning may be repeated; the session stays burn-ready afterward.
    pub fn burn(&mut self, config: &ToolConfig) -> Result<(), String> {
        if !self.can_burn() {
            let message = "No files to burn.".to_string();
            self.status.push(message.clone());
            return Err(message);
        }

        let staging_dir = match stage_files(self.output_dir.as_deref(), &self.manual_files) {
            Ok(dir) => dir,
            Err(e) => {
                self.status.push(e.clone());
                return Err(e);
            }
        };

        match start_burn(config, &staging_dir) {
            Ok(()) => {
                self.status.push("Burning process started.".to_string());
                Ok(())
            }
            Err(e) => {
                let message = format!("Error during burning: {}", e);
                self.status.push(message.clone());
                Err(message)
            }
        }
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}
