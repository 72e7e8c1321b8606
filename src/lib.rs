//! droidflash library
//!
//! Core functionality for the Android provisioning console: image
//! classification, the flash sequencer, adb/fastboot wrappers, firmware
//! download and extraction, configuration, and the action log store.

pub mod adb;
pub mod classify;
pub mod command;
pub mod config;
pub mod db;
pub mod download;
pub mod error;
pub mod extract;
pub mod fastboot;
pub mod report;
pub mod sequencer;
pub mod session;
pub mod ui;

// Re-export main types for convenience
pub use adb::DeviceInfo;
pub use classify::classify;
pub use config::{DatabaseConfig, ToolConfig, ToolSettings};
pub use db::{ActionLogEntry, ActionLogger};
pub use error::{DbError, DroidflashError, Result};
pub use extract::{extract_archive, has_recognized_images, ExtractionReport};
pub use fastboot::FastbootClient;
pub use sequencer::{
    discover_images, run_flash_sequence, FlashOutcome, FlashResult, Flasher, ImageFile,
};
pub use session::{MenuAction, Session};
