//! Device detail reporting.
//!
//! Writes the `details.txt` snapshot and prints the device-details block
//! on the console.

use crate::adb::DeviceInfo;
use crate::error::Result;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Write the device snapshot to a plain-text report file.
pub fn write_details_file(path: &Path, info: &DeviceInfo) -> Result<()> {
    let mut file = File::create(path)?;
    writeln!(file, "Serial: {}", info.serial)?;
    writeln!(file, "Model: {}", info.model)?;
    writeln!(file, "Brand: {}", info.brand)?;
    writeln!(file, "Device: {}", info.device)?;
    writeln!(file, "Android Version: {}", info.android_version)?;
    writeln!(file, "SDK Version: {}", info.sdk_version)?;
    Ok(())
}

/// Print the device-details block.
pub fn print_device_details(info: &DeviceInfo) {
    println!();
    println!("========== Device Details ==========");
    println!("Serial Number      : {}", info.serial);
    println!("Model              : {}", info.model);
    println!("Brand              : {}", info.brand);
    println!("Device             : {}", info.device);
    println!("Android Version    : {}", info.android_version);
    println!("SDK Version        : {}", info.sdk_version);
    println!("====================================");
}
