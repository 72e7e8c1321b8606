//! Bootloader-client (fastboot) wrappers.
//!
//! The enumerator output is whitespace-delimited lines; the first token
//! of each non-empty line is a device identifier. Flash success is
//! inferred from textual output tokens - an integration contract with
//! the external tool, not a protocol - and that heuristic lives only
//! here, behind the [`Flasher`] trait, so the sequencer never depends
//! on it.

use crate::command::run_command;
use crate::sequencer::Flasher;
use std::path::Path;
use tracing::warn;

const FASTBOOT: &str = "fastboot";

/// Tokens whose presence anywhere in the captured output marks a
/// successful flash. Any other output, including empty output, is a
/// failure.
const SUCCESS_TOKENS: &[&str] = &["OKAY", "Flashing"];

/// Enumerate devices visible to the bootloader client.
pub fn list_fastboot_devices() -> Vec<String> {
    match run_command(FASTBOOT, &["devices"]) {
        Ok(output) => parse_fastboot_devices(&output),
        Err(e) => {
            warn!("fastboot enumeration failed: {e}");
            Vec::new()
        }
    }
}

/// Pure parser for the enumerator's output.
pub fn parse_fastboot_devices(output: &str) -> Vec<String> {
    output
        .lines()
        .filter_map(|line| line.split_whitespace().next())
        .map(str::to_string)
        .collect()
}

/// Decide flash success from the tool's captured output.
pub fn output_indicates_success(output: &str) -> bool {
    SUCCESS_TOKENS.iter().any(|token| output.contains(token))
}

/// The fastboot-backed [`Flasher`]. Stateless; the serial travels with
/// each call because a device handle is only valid for one invocation.
#[derive(Debug, Default)]
pub struct FastbootClient;

impl FastbootClient {
    pub fn new() -> Self {
        Self
    }
}

impl Flasher for FastbootClient {
    fn flash(&self, serial: &str, partition: &str, image: &Path) -> bool {
        let image_arg = image.to_string_lossy();
        let mut args: Vec<&str> = Vec::new();
        if !serial.is_empty() {
            args.extend(["-s", serial]);
        }
        args.extend(["flash", partition, &image_arg]);

        match run_command(FASTBOOT, &args) {
            Ok(output) => output_indicates_success(&output),
            Err(e) => {
                warn!(partition, "flash invocation failed: {e}");
                false
            }
        }
    }

    fn reboot(&self, serial: &str) {
        let mut args: Vec<&str> = Vec::new();
        if !serial.is_empty() {
            args.extend(["-s", serial]);
        }
        args.push("reboot");

        // Fire-and-forget: the reboot result never affects the run outcome.
        if let Err(e) = run_command(FASTBOOT, &args) {
            warn!("reboot request failed: {e}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_enumerator_output() {
        let output = "9A201FFAZ004TL\tfastboot\n0123456789ABCDEF\tfastboot\n";
        assert_eq!(
            parse_fastboot_devices(output),
            vec!["9A201FFAZ004TL", "0123456789ABCDEF"]
        );
    }

    #[test]
    fn test_parse_skips_blank_lines() {
        let output = "\n\nSERIAL1 fastboot\n\n";
        assert_eq!(parse_fastboot_devices(output), vec!["SERIAL1"]);
    }

    #[test]
    fn test_parse_empty_output() {
        assert!(parse_fastboot_devices("").is_empty());
    }

    #[test]
    fn test_success_tokens() {
        assert!(output_indicates_success(
            "Sending 'boot' (65536 KB)\nOKAY [  1.503s]\nFinished."
        ));
        assert!(output_indicates_success("Flashing boot..."));
        assert!(!output_indicates_success("FAILED (remote: 'no such partition')"));
        assert!(!output_indicates_success(""));
    }
}
