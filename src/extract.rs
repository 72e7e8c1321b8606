//! Archive extraction.
//!
//! Unpacks a fetched firmware archive into a working directory using the
//! best-available system extraction tool. Success is defined
//! operationally: the target directory contains at least one recognized
//! image file afterwards. The extractor's own exit status does not
//! define success - "tool failed outright" and "extracted but irrelevant
//! contents" are the same merged signal - but the tool's output is kept
//! in the report so the operator sees its complaint when the check
//! fails.

use crate::classify::classify;
use crate::command::{run_command, tool_available};
use crate::error::{DroidflashError, Result};
use std::fs;
use std::path::Path;
use tracing::info;

/// What one extraction attempt produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractionReport {
    /// Operational success: the target directory holds a recognized image.
    pub images_present: bool,
    /// Name of the tool invoked, or `None` when extraction was skipped
    /// because recognized images were already present.
    pub tool_ran: Option<String>,
    /// Combined output of the tool, empty when nothing was invoked.
    pub tool_output: String,
}

/// True when the directory holds at least one file the classifier
/// recognizes as a partition image.
pub fn has_recognized_images(dir: &Path) -> bool {
    let Ok(entries) = fs::read_dir(dir) else {
        return false;
    };
    entries.flatten().any(|entry| {
        entry.path().is_file() && classify(&entry.file_name().to_string_lossy()).is_some()
    })
}

/// Pick the extraction command line for an archive: `unzip` for zip
/// archives, `tar` for tarballs, `7z` as the general fallback, skipping
/// tools absent from PATH.
fn extraction_command(archive: &Path, target_dir: &Path) -> Option<(&'static str, Vec<String>)> {
    let name = archive.file_name()?.to_string_lossy().to_ascii_lowercase();
    let archive_arg = archive.to_string_lossy().into_owned();
    let target_arg = target_dir.to_string_lossy().into_owned();

    if name.ends_with(".zip") && tool_available("unzip") {
        return Some((
            "unzip",
            vec!["-o".into(), archive_arg, "-d".into(), target_arg],
        ));
    }

    let tarball = [".tar", ".tar.gz", ".tgz", ".tar.xz", ".txz"]
        .iter()
        .any(|ext| name.ends_with(ext));
    if tarball && tool_available("tar") {
        return Some((
            "tar",
            vec!["-xf".into(), archive_arg, "-C".into(), target_arg],
        ));
    }

    if tool_available("7z") {
        return Some((
            "7z",
            vec!["x".into(), "-y".into(), format!("-o{target_arg}"), archive_arg],
        ));
    }

    None
}

/// Extract `archive` into `target_dir`.
///
/// Idempotent: when the target directory already contains recognized
/// images, no extractor is invoked and the existing files are left
/// untouched.
pub fn extract_archive(archive: &Path, target_dir: &Path) -> Result<ExtractionReport> {
    if has_recognized_images(target_dir) {
        info!(
            dir = %target_dir.display(),
            "target directory already holds recognized images, skipping extraction"
        );
        return Ok(ExtractionReport {
            images_present: true,
            tool_ran: None,
            tool_output: String::new(),
        });
    }

    fs::create_dir_all(target_dir)?;

    let (program, args) = extraction_command(archive, target_dir).ok_or_else(|| {
        DroidflashError::extract(
            "no extraction tool available (need unzip, tar, or 7z on PATH)".to_string(),
        )
    })?;

    info!(tool = program, archive = %archive.display(), "extracting firmware archive");
    let arg_refs: Vec<&str> = args.iter().map(String::as_str).collect();
    let tool_output = run_command(program, &arg_refs)?;

    Ok(ExtractionReport {
        images_present: has_recognized_images(target_dir),
        tool_ran: Some(program.to_string()),
        tool_output,
    })
}
