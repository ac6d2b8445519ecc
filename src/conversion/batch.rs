//! Folder-to-folder batch conversion
//!
//! One batch walks the direct entries of the input directory, converts
//! every recognized audio file sequentially, and reports progress over
//! a channel. The batch runs on a single background thread so the
//! interactive surface stays responsive.

use std::path::{Path, PathBuf};
use std::sync::mpsc;
use std::thread::{self, JoinHandle};

use walkdir::WalkDir;

use super::{encode_file, ensure_output_dir, is_convertible_file, output_path_for};

/// One conversion batch: input folder in, converted folder out
///
/// Immutable for the duration of the batch and discarded afterward.
#[derive(Debug, Clone)]
pub struct ConversionJob {
    pub input_dir: PathBuf,
    pub output_dir: PathBuf,
}

/// Final counts for a completed batch
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchSummary {
    pub converted: usize,
    pub failed: usize,
}

/// Events emitted by the batch worker
#[derive(Debug, Clone)]
pub enum BatchEvent {
    /// A file was converted successfully
    Converted { output_path: PathBuf },
    /// A file failed to convert; the batch continues
    Failed { input_path: PathBuf, error: String },
    /// The batch could not run at all (bad input or output directory)
    Aborted { error: String },
    /// All files have been attempted; sent exactly once, last
    Finished(BatchSummary),
}

/// Convert every recognized audio file in the input directory
///
/// Files are processed one at a time in enumeration order. Per-file
/// failures are reported and skipped; only an unusable input or output
/// directory fails the batch itself.
pub fn convert_folder(
    job: &ConversionJob,
    encoder_path: &Path,
    bitrate: u32,
    events: &mpsc::Sender<BatchEvent>,
) -> Result<BatchSummary, String> {
    if !job.input_dir.is_dir() {
        return Err(format!(
            "Input path is not a directory: {}",
            job.input_dir.display()
        ));
    }

    ensure_output_dir(&job.output_dir)?;

    let mut summary = BatchSummary::default();

    // Direct entries only, no recursion, filesystem order
    for entry in WalkDir::new(&job.input_dir)
        .min_depth(1)
        .max_depth(1)
        .into_iter()
        .filter_map(|e| e.ok())
    {
        let input_path = entry.path();
        if !input_path.is_file() || !is_convertible_file(input_path) {
            continue;
        }

        let output_path = output_path_for(&job.output_dir, input_path);
        let result = encode_file(encoder_path, input_path, &output_path, bitrate);

        if result.success {
            summary.converted += 1;
            let _ = events.send(BatchEvent::Converted {
                output_path: result.output_path,
            });
        } else {
            summary.failed += 1;
            let _ = events.send(BatchEvent::Failed {
                input_path: result.input_path,
                error: result
                    .error
                    .unwrap_or_else(|| "Unknown error".to_string()),
            });
        }
    }

    log::info!(
        "Batch complete: {} converted, {} failed",
        summary.converted,
        summary.failed
    );
    Ok(summary)
}

/// Handle to a running batch worker
#[derive(Debug)]
pub struct BatchHandle {
    events: mpsc::Receiver<BatchEvent>,
    thread: Option<JoinHandle<()>>,
}

impl BatchHandle {
    /// Block until the next event from the worker
    ///
    /// Returns None once the worker has finished and the channel drained.
    pub fn recv(&self) -> Option<BatchEvent> {
        self.events.recv().ok()
    }
}

impl Drop for BatchHandle {
    fn drop(&mut self) {
        if let Some(handle) = self.thread.take() {
            let _ = handle.join();
        }
    }
}

/// Start a batch on a background thread
///
/// The returned handle yields events as files complete, ending with
/// exactly one `Finished` (or `Aborted` if the batch never ran).
pub fn start_batch(job: ConversionJob, encoder_path: PathBuf, bitrate: u32) -> BatchHandle {
    let (tx, rx) = mpsc::channel();

    let thread = thread::spawn(move || {
        match convert_folder(&job, &encoder_path, bitrate, &tx) {
            Ok(summary) => {
                let _ = tx.send(BatchEvent::Finished(summary));
            }
            Err(error) => {
                let _ = tx.send(BatchEvent::Aborted { error });
            }
        }
    });

    BatchHandle {
        events: rx,
        thread: Some(thread),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::write_stub_encoder;
    use tempfile::TempDir;

    fn collect_events(handle: BatchHandle) -> Vec<BatchEvent> {
        let mut events = Vec::new();
        while let Some(event) = handle.recv() {
            events.push(event);
        }
        events
    }

    #[test]
    fn test_convert_folder_missing_input() {
        let temp = TempDir::new().unwrap();
        let (tx, _rx) = mpsc::channel();
        let job = ConversionJob {
            input_dir: temp.path().join("missing"),
            output_dir: temp.path().join("out"),
        };
        let result = convert_folder(&job, Path::new("encoder"), 192, &tx);
        assert!(result.is_err());
        assert!(result.unwrap_err().contains("not a directory"));
    }

    #[cfg(unix)]
    #[test]
    fn test_converts_only_recognized_extensions() {
        let temp = TempDir::new().unwrap();
        let input = temp.path().join("in");
        let output = temp.path().join("out");
        std::fs::create_dir(&input).unwrap();
        std::fs::write(input.join("song.mp3"), b"a").unwrap();
        std::fs::write(input.join("track.flac"), b"b").unwrap();
        std::fs::write(input.join("notes.txt"), b"c").unwrap();

        let encoder = write_stub_encoder(temp.path(), None);
        let (tx, _rx) = mpsc::channel();
        let job = ConversionJob {
            input_dir: input,
            output_dir: output.clone(),
        };
        let summary = convert_folder(&job, &encoder, 192, &tx).unwrap();

        assert_eq!(summary.converted, 2);
        assert_eq!(summary.failed, 0);
        assert!(output.join("song.aac").exists());
        assert!(output.join("track.aac").exists());
        assert!(!output.join("notes.aac").exists());
    }

    #[cfg(unix)]
    #[test]
    fn test_per_file_failure_does_not_halt_batch() {
        let temp = TempDir::new().unwrap();
        let input = temp.path().join("in");
        let output = temp.path().join("out");
        std::fs::create_dir(&input).unwrap();
        std::fs::write(input.join("bad_take.wav"), b"a").unwrap();
        std::fs::write(input.join("good.mp3"), b"b").unwrap();

        // Stub fails for inputs whose path contains "bad"
        let encoder = write_stub_encoder(temp.path(), Some("bad"));
        let job = ConversionJob {
            input_dir: input,
            output_dir: output.clone(),
        };
        let events = collect_events(start_batch(job, encoder, 192));

        let failed: Vec<_> = events
            .iter()
            .filter(|e| matches!(e, BatchEvent::Failed { .. }))
            .collect();
        assert_eq!(failed.len(), 1);
        assert!(output.join("good.aac").exists());

        match events.last().unwrap() {
            BatchEvent::Finished(summary) => {
                assert_eq!(summary.converted, 1);
                assert_eq!(summary.failed, 1);
            }
            other => panic!("Expected Finished last, got {:?}", other),
        }
    }

    #[cfg(unix)]
    #[test]
    fn test_batch_emits_one_finished_after_successes() {
        let temp = TempDir::new().unwrap();
        let input = temp.path().join("in");
        std::fs::create_dir(&input).unwrap();
        std::fs::write(input.join("song.mp3"), b"a").unwrap();
        std::fs::write(input.join("notes.txt"), b"b").unwrap();
        std::fs::write(input.join("track.flac"), b"c").unwrap();

        let encoder = write_stub_encoder(temp.path(), None);
        let job = ConversionJob {
            input_dir: input,
            output_dir: temp.path().join("out"),
        };
        let events = collect_events(start_batch(job, encoder, 192));

        let converted = events
            .iter()
            .filter(|e| matches!(e, BatchEvent::Converted { .. }))
            .count();
        let finished = events
            .iter()
            .filter(|e| matches!(e, BatchEvent::Finished(_)))
            .count();
        assert_eq!(converted, 2);
        assert_eq!(finished, 1);
        assert!(matches!(events.last(), Some(BatchEvent::Finished(_))));
    }

    #[test]
    fn test_batch_aborts_on_missing_input() {
        let temp = TempDir::new().unwrap();
        let job = ConversionJob {
            input_dir: temp.path().join("missing"),
            output_dir: temp.path().join("out"),
        };
        let events = collect_events(start_batch(job, PathBuf::from("encoder"), 192));
        assert_eq!(events.len(), 1);
        assert!(matches!(events[0], BatchEvent::Aborted { .. }));
    }

    #[cfg(unix)]
    #[test]
    fn test_subdirectories_are_not_entered() {
        let temp = TempDir::new().unwrap();
        let input = temp.path().join("in");
        let nested = input.join("nested");
        std::fs::create_dir_all(&nested).unwrap();
        std::fs::write(nested.join("deep.mp3"), b"a").unwrap();
        std::fs::write(input.join("top.mp3"), b"b").unwrap();

        let encoder = write_stub_encoder(temp.path(), None);
        let output = temp.path().join("out");
        let (tx, _rx) = mpsc::channel();
        let job = ConversionJob {
            input_dir: input,
            output_dir: output.clone(),
        };
        let summary = convert_folder(&job, &encoder, 192, &tx).unwrap();

        assert_eq!(summary.converted, 1);
        assert!(output.join("top.aac").exists());
        assert!(!output.join("deep.aac").exists());
    }
}
