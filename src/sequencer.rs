//! Flash Sequencer
//!
//! Drives one flashing run over a directory of extracted images. The run
//! is an explicit little state machine so it can be tested without a
//! console or a device:
//!
//! ```text
//! Idle
//!   ↓ (empty input)          → NoImages
//!   ↓
//! AwaitingConfirmation
//!   ↓ (gate returns false)   → Aborted
//!   ↓
//! Flashing (loops per image)
//!   ↓ (first failed attempt) → Halted(partition)
//!   ↓ (all attempts succeed) → Completed (+ fire-and-forget reboot)
//! ```
//!
//! Invariants:
//! - Images are processed in directory-listing order.
//! - An unmatched image is skipped with a warning; it is never a failure
//!   and produces no [`FlashResult`].
//! - The run halts at the first failed attempt; remaining images stay
//!   unprocessed (and unlogged as skipped, not as failed). Nothing is
//!   ever rolled back.

use crate::classify::classify;
use crate::error::Result;
use std::fs;
use std::path::{Path, PathBuf};
use std::thread;
use std::time::Duration;
use tracing::{info, warn};

/// An image file discovered in the extraction directory. Immutable once
/// discovered; scoped to one flashing run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageFile {
    pub path: PathBuf,
    pub file_name: String,
}

impl ImageFile {
    pub fn new(path: PathBuf) -> Self {
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        Self { path, file_name }
    }
}

/// Outcome of one attempted flash. The ordered sequence of these is the
/// audit trail for the run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlashResult {
    pub partition: String,
    pub succeeded: bool,
}

/// Terminal state of a flashing run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FlashOutcome {
    /// The image list was empty; the confirmation gate was never invoked.
    NoImages,
    /// The operator declined; zero flash attempts were made. This is a
    /// first-class non-error outcome and is logged as such.
    Aborted,
    /// The named partition failed; everything before it is in `results`,
    /// everything after it was never attempted.
    Halted {
        partition: String,
        results: Vec<FlashResult>,
    },
    /// Every matched image flashed successfully and a reboot was issued.
    Completed { results: Vec<FlashResult> },
}

impl FlashOutcome {
    /// Short operator-facing summary, also used as the action-log result.
    pub fn summary(&self) -> String {
        match self {
            Self::NoImages => "no images to flash".to_string(),
            Self::Aborted => "aborted by operator".to_string(),
            Self::Halted { partition, results } => format!(
                "halted on failure at partition '{}' after {} attempt(s)",
                partition,
                results.len()
            ),
            Self::Completed { results } => {
                format!("completed ({} partition(s) flashed)", results.len())
            }
        }
    }

    /// The attempted results, in order, regardless of terminal state.
    pub fn results(&self) -> &[FlashResult] {
        match self {
            Self::NoImages | Self::Aborted => &[],
            Self::Halted { results, .. } | Self::Completed { results } => results,
        }
    }
}

/// Narrow seam over the bootloader client so the sequencer never sees the
/// fragile textual success heuristic. The fastboot-backed implementation
/// sniffs output tokens today; swapping to exit-status inspection later
/// touches only that implementation.
pub trait Flasher {
    /// Flash one image onto one partition. Returns plain success/failure.
    fn flash(&self, serial: &str, partition: &str, image: &Path) -> bool;

    /// Request a device reboot. Fire-and-forget: the result does not
    /// influence the sequence's overall outcome.
    fn reboot(&self, serial: &str);
}

/// List the image files of an extraction directory, in listing order.
/// Subdirectories and non-files are ignored.
pub fn discover_images(dir: &Path) -> Result<Vec<ImageFile>> {
    let mut images = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        if path.is_file() {
            images.push(ImageFile::new(path));
        }
    }
    Ok(images)
}

/// Run one flashing sequence.
///
/// `confirm` is the synchronous operator-facing gate for destructive
/// intent; `pacing` is the cooperative throttling delay between
/// successive flash attempts (an operational constant, not a correctness
/// requirement - tests pass `Duration::ZERO`).
pub fn run_flash_sequence(
    flasher: &dyn Flasher,
    serial: &str,
    images: &[ImageFile],
    confirm: &mut dyn FnMut() -> bool,
    pacing: Duration,
) -> FlashOutcome {
    if images.is_empty() {
        return FlashOutcome::NoImages;
    }

    if !confirm() {
        info!("flash sequence aborted by operator");
        return FlashOutcome::Aborted;
    }

    let mut results = Vec::new();
    let mut attempted_any = false;

    for image in images {
        let Some(partition) = classify(&image.file_name) else {
            warn!(file = %image.file_name, "no partition match, skipping image");
            continue;
        };

        if attempted_any {
            thread::sleep(pacing);
        }
        attempted_any = true;

        info!(partition, file = %image.file_name, "flashing image");
        let succeeded = flasher.flash(serial, partition, &image.path);
        results.push(FlashResult {
            partition: partition.to_string(),
            succeeded,
        });

        if !succeeded {
            warn!(partition, "flash attempt failed, halting sequence");
            return FlashOutcome::Halted {
                partition: partition.to_string(),
                results,
            };
        }
    }

    flasher.reboot(serial);
    FlashOutcome::Completed { results }
}
