//! Debug-bridge (adb) queries.
//!
//! Everything here is text parsing over `adb` subprocess output: device
//! detection scans the line-oriented listing for the marker adb prints
//! next to an online, authorized device; property reads return the
//! trimmed value or an empty string on any failure (never an error).

use crate::command::run_command;
use crate::error::Result;
use tracing::{debug, warn};

const ADB: &str = "adb";

/// Marker adb appends to a listing line for an online, authorized
/// device (offline and unauthorized devices use different words).
const ONLINE_MARKER: &str = "\tdevice";

/// Identifying properties read from a powered-on device.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceInfo {
    pub serial: String,
    pub model: String,
    pub brand: String,
    pub device: String,
    pub android_version: String,
    pub sdk_version: String,
}

/// Scan `adb devices` output for the first online device and return its
/// serial, or `None` when no usable device is attached.
pub fn detect_bridge_device() -> Option<String> {
    let output = match run_command(ADB, &["devices"]) {
        Ok(output) => output,
        Err(e) => {
            warn!("adb enumeration failed: {e}");
            return None;
        }
    };
    parse_bridge_devices(&output)
}

/// Pure parser for the bridge's device listing: the first line carrying
/// the online marker yields the serial (its leading token).
pub fn parse_bridge_devices(output: &str) -> Option<String> {
    output.lines().find_map(|line| {
        let line = line.trim_end();
        line.find(ONLINE_MARKER)
            .map(|idx| line[..idx].to_string())
            .filter(|serial| !serial.is_empty())
    })
}

/// Read one Android system property via `adb shell getprop`.
///
/// Returns the trimmed value, or an empty string on any failure - a
/// missing property and a missing device are indistinguishable here by
/// design.
pub fn read_property(key: &str) -> String {
    match run_command(ADB, &["shell", "getprop", key]) {
        Ok(value) => value.trim().to_string(),
        Err(e) => {
            debug!(key, "property read failed: {e}");
            String::new()
        }
    }
}

/// Read the identifying property snapshot for an attached device.
pub fn read_device_info(serial: &str) -> DeviceInfo {
    DeviceInfo {
        serial: serial.to_string(),
        model: read_property("ro.product.model"),
        brand: read_property("ro.product.brand"),
        device: read_property("ro.product.device"),
        android_version: read_property("ro.build.version.release"),
        sdk_version: read_property("ro.build.version.sdk"),
    }
}

/// Ask the device to reboot into its bootloader so fastboot can reach it.
pub fn reboot_to_bootloader() -> Result<()> {
    run_command(ADB, &["reboot", "bootloader"])?;
    Ok(())
}
