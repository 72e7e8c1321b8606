//! Menu Controller
//!
//! An explicit finite-state session: [`Session::handle_selection`] is a
//! pure transition from an operator selection to a [`MenuAction`],
//! independent of how input is obtained, so the dispatch can be tested
//! without an interactive console. The blocking stdin loop lives in
//! [`Session::run_menu_loop`] and only feeds selections in.
//!
//! Every branch terminates with a write into the action logger.
//! Environment errors (missing device, missing tool, no network) abort
//! the current operation and return to the menu; they are never fatal.

use crate::adb;
use crate::config::ToolConfig;
use crate::db::ActionLogger;
use crate::download::fetch_archive;
use crate::error::Result;
use crate::extract::extract_archive;
use crate::fastboot::{list_fastboot_devices, FastbootClient};
use crate::report;
use crate::sequencer::{discover_images, run_flash_sequence, FlashOutcome};
use crate::ui;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing::warn;

const ACTION_DETECT: &str = "detect-device";
const ACTION_PROVISION: &str = "provision-firmware";
const ACTION_FLASH: &str = "flash-sequence";

/// Where one menu selection leads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAction {
    DetectDevice,
    ProvisionFirmware,
    FlashDirectory,
    ShowLog,
    Quit,
    Invalid,
}

/// One interactive provisioning session. Owns the datastore connection
/// for its lifetime; borrows the configuration built once at startup.
pub struct Session<'a> {
    config: &'a ToolConfig,
    logger: ActionLogger,
}

impl<'a> Session<'a> {
    pub fn new(config: &'a ToolConfig, logger: ActionLogger) -> Self {
        Self { config, logger }
    }

    /// Pure transition from an operator selection to the next action.
    pub fn handle_selection(input: &str) -> MenuAction {
        match input.trim() {
            "1" => MenuAction::DetectDevice,
            "2" => MenuAction::ProvisionFirmware,
            "3" => MenuAction::FlashDirectory,
            "4" => MenuAction::ShowLog,
            "5" | "q" | "quit" | "exit" => MenuAction::Quit,
            _ => MenuAction::Invalid,
        }
    }

    /// Blocking interactive loop. Returns on quit or stdin EOF.
    pub fn run_menu_loop(&mut self) -> Result<()> {
        ui::print_banner();
        loop {
            print_menu();
            let Some(line) = read_line("Select an option: ")? else {
                println!();
                return Ok(());
            };
            match Self::handle_selection(&line) {
                MenuAction::DetectDevice => self.detect_device(),
                MenuAction::ProvisionFirmware => self.provision_firmware(),
                MenuAction::FlashDirectory => self.flash_directory(),
                MenuAction::ShowLog => self.show_recent_actions(),
                MenuAction::Quit => return Ok(()),
                MenuAction::Invalid => ui::warn_line("Unrecognized selection."),
            }
            println!();
        }
    }

    /// Menu option 1: detect the adb device, read its properties, persist
    /// the snapshot and the `details.txt` report.
    fn detect_device(&mut self) {
        ui::step_line("Detecting device over the debug bridge...");
        let Some(serial) = adb::detect_bridge_device() else {
            ui::fail_line("No device detected. Make sure USB debugging is enabled.");
            self.logger
                .log_action_best_effort("unknown", ACTION_DETECT, "no device detected");
            return;
        };
        ui::ok_line(&format!("Device detected: {serial}"));

        let info = adb::read_device_info(&serial);
        report::print_device_details(&info);

        match self.logger.record_device(&info) {
            Ok(()) => ui::ok_line("Device info saved to the database."),
            Err(e) => {
                warn!("device snapshot write failed: {e}");
                ui::warn_line(&format!("Could not save device info: {e}"));
            }
        }

        match report::write_details_file(Path::new("details.txt"), &info) {
            Ok(()) => ui::ok_line("Device info saved to details.txt."),
            Err(e) => ui::warn_line(&format!("Could not write details.txt: {e}")),
        }

        self.logger
            .log_action_best_effort(&serial, ACTION_DETECT, "device detected");
    }

    /// Menu option 2: download a firmware archive, extract it, then hand
    /// the extracted images to the flash sequencer.
    fn provision_firmware(&mut self) {
        let url = match read_line("Firmware archive URL: ") {
            Ok(Some(url)) if !url.is_empty() => url,
            _ => {
                ui::warn_line("No URL given.");
                self.logger
                    .log_action_best_effort("unknown", ACTION_PROVISION, "no URL given");
                return;
            }
        };

        ui::step_line("Downloading firmware archive...");
        let archive = match fetch_archive(
            &url,
            &self.config.tool.downloads_dir,
            &self.config.tool.user_agent,
        ) {
            Ok(path) => path,
            Err(e) => {
                ui::fail_line(&e.to_string());
                self.logger.log_action_best_effort(
                    "unknown",
                    ACTION_PROVISION,
                    &format!("download failed: {e}"),
                );
                return;
            }
        };
        ui::ok_line(&format!("Downloaded {}", archive.display()));

        let target_dir = extraction_dir_for(&archive);
        ui::step_line("Extracting firmware archive...");
        let extraction = match extract_archive(&archive, &target_dir) {
            Ok(report) => report,
            Err(e) => {
                ui::fail_line(&e.to_string());
                self.logger.log_action_best_effort(
                    "unknown",
                    ACTION_PROVISION,
                    &format!("extraction failed: {e}"),
                );
                return;
            }
        };

        if !extraction.images_present {
            ui::fail_line("Extraction produced no recognized partition images.");
            if !extraction.tool_output.is_empty() {
                println!("{}", extraction.tool_output);
            }
            self.logger.log_action_best_effort(
                "unknown",
                ACTION_PROVISION,
                "extraction produced no recognized images",
            );
            return;
        }
        ui::ok_line(&format!("Images extracted to {}", target_dir.display()));

        self.logger
            .log_action_best_effort("unknown", ACTION_PROVISION, "archive fetched and extracted");
        self.flash_images_in(&target_dir);
    }

    /// Menu option 3: flash an already-extracted directory directly.
    fn flash_directory(&mut self) {
        let dir = match read_line("Extracted image directory: ") {
            Ok(Some(dir)) if !dir.is_empty() => PathBuf::from(dir),
            _ => {
                ui::warn_line("No directory given.");
                self.logger
                    .log_action_best_effort("unknown", ACTION_FLASH, "no directory given");
                return;
            }
        };
        self.flash_images_in(&dir);
    }

    /// Menu option 4: show the tail of the action log. A query failure is
    /// a warning only, never an error of the session.
    fn show_recent_actions(&mut self) {
        match self.logger.recent_actions(10) {
            Ok(entries) if entries.is_empty() => ui::warn_line("Action log is empty."),
            Ok(entries) => {
                for entry in entries {
                    println!(
                        "{}  {:<18} {:<20} {}",
                        entry.created_at, entry.device_name, entry.action, entry.result
                    );
                }
            }
            Err(e) => {
                warn!("action log query failed: {e}");
                ui::warn_line(&format!("Could not read action log: {e}"));
            }
        }
    }

    /// Resolve a fastboot device, confirm destructive intent, and run the
    /// flash sequence over the directory's images.
    fn flash_images_in(&mut self, dir: &Path) {
        let images = match discover_images(dir) {
            Ok(images) => images,
            Err(e) => {
                ui::fail_line(&format!("Cannot list {}: {e}", dir.display()));
                self.logger.log_action_best_effort(
                    "unknown",
                    ACTION_FLASH,
                    &format!("failed to list images: {e}"),
                );
                return;
            }
        };

        let devices = list_fastboot_devices();
        let Some(serial) = devices.first().cloned() else {
            // Zero candidates is reported, not retried.
            if adb::detect_bridge_device().is_some() {
                ui::warn_line("No fastboot device, but an adb device is online.");
                match adb::reboot_to_bootloader() {
                    Ok(()) => ui::step_line(
                        "Reboot to bootloader requested; run the flash again once it re-enumerates.",
                    ),
                    Err(e) => ui::fail_line(&e.to_string()),
                }
            } else {
                ui::fail_line("No fastboot device detected.");
            }
            self.logger
                .log_action_best_effort("unknown", ACTION_FLASH, "no fastboot device");
            return;
        };
        if devices.len() > 1 {
            ui::warn_line(&format!(
                "{} fastboot devices attached, using {serial}",
                devices.len()
            ));
        }

        let mut confirm = || {
            prompt_yes_no(&format!(
                "About to overwrite partitions on {serial}. Proceed? [y/N] "
            ))
        };

        let outcome = run_flash_sequence(
            &FastbootClient::new(),
            &serial,
            &images,
            &mut confirm,
            self.config.tool.flash_pacing(),
        );

        for result in outcome.results() {
            if result.succeeded {
                ui::ok_line(&format!("Flashed partition '{}'", result.partition));
            } else {
                ui::fail_line(&format!("Failed to flash partition '{}'", result.partition));
            }
        }
        match &outcome {
            FlashOutcome::NoImages => {
                ui::warn_line("Nothing to do: the directory holds no image files.")
            }
            FlashOutcome::Aborted => ui::warn_line("Flash sequence aborted by operator."),
            FlashOutcome::Halted { partition, .. } => ui::fail_line(&format!(
                "Halted at partition '{partition}'; remaining images were not processed."
            )),
            FlashOutcome::Completed { .. } => {
                ui::ok_line("Flash sequence completed; device reboot requested.")
            }
        }

        self.logger
            .log_action_best_effort(&serial, ACTION_FLASH, &outcome.summary());
    }
}

/// Directory an archive is extracted into: a sibling named after the
/// archive's stem.
fn extraction_dir_for(archive: &Path) -> PathBuf {
    let stem = archive
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "extracted".to_string());
    archive.with_file_name(stem)
}

fn print_menu() {
    println!("  1) Detect device and read properties");
    println!("  2) Download, extract, and flash firmware");
    println!("  3) Flash an extracted image directory");
    println!("  4) Show recent action log");
    println!("  5) Quit");
}

/// Prompt and read one trimmed line; `None` on EOF.
fn read_line(label: &str) -> Result<Option<String>> {
    print!("{label}");
    io::stdout().flush()?;
    let mut line = String::new();
    if io::stdin().read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

/// Synchronous operator-facing confirmation gate.
fn prompt_yes_no(label: &str) -> bool {
    match read_line(label) {
        Ok(Some(answer)) => matches!(answer.to_ascii_lowercase().as_str(), "y" | "yes"),
        _ => false,
    }
}
