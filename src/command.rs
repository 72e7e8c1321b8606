//! command.rs - Blocking execution of external device tools.
//!
//! Every device interaction in this tool is delegated to an external
//! program (adb, fastboot, an archive extractor). This module runs one
//! command line, blocks until the subprocess exits, and captures its
//! combined stdout/stderr as text for the caller to parse. No timeouts
//! are enforced and an in-flight subprocess cannot be interrupted.

use crate::error::{DroidflashError, Result};
use std::process::Command;
use tracing::debug;

/// Execute an external command and capture its combined output.
///
/// stdout and stderr are concatenated (device tools print status on
/// either, inconsistently) and trailing whitespace is trimmed. A
/// non-zero exit status is not an error here: callers interpret the
/// textual output themselves.
pub fn run_command(program: &str, args: &[&str]) -> Result<String> {
    debug!(program, ?args, "executing external command");

    let output = Command::new(program).args(args).output().map_err(|e| {
        DroidflashError::system(format!("failed to run '{}': {}", program, e))
    })?;

    let mut combined = String::from_utf8_lossy(&output.stdout).into_owned();
    combined.push_str(&String::from_utf8_lossy(&output.stderr));

    debug!(
        program,
        status = ?output.status.code(),
        bytes = combined.len(),
        "command finished"
    );

    Ok(combined.trim_end().to_string())
}

/// Check whether an external tool is present on PATH.
pub fn tool_available(program: &str) -> bool {
    std::env::var_os("PATH")
        .map(|paths| {
            std::env::split_paths(&paths).any(|dir| dir.join(program).is_file())
        })
        .unwrap_or(false)
}
