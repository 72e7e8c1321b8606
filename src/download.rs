//! Firmware package retrieval.
//!
//! Blocking HTTP GET of a factory archive to local storage. Redirects
//! are followed, any non-success transport result is a failure, and the
//! transfer streams into a `.part` file that is renamed only once
//! complete so an interrupted download never looks like a finished one.
//! Byte-level progress is rendered for the operator.

use crate::error::{DroidflashError, Result};
use indicatif::{ProgressBar, ProgressStyle};
use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};
use tracing::info;

/// Derive the local file name from a URL, stripping any query string or
/// fragment.
pub fn file_name_from_url(url: &str) -> Result<&str> {
    let path = url.split(['?', '#']).next().unwrap_or(url);
    let after_scheme = path.split_once("://").map_or(path, |(_, rest)| rest);
    let name = after_scheme
        .split_once('/')
        .map(|(_, rest)| rest.rsplit('/').next().unwrap_or(""))
        .unwrap_or("");
    if name.is_empty() {
        return Err(DroidflashError::download(format!(
            "no file name in URL '{url}'"
        )));
    }
    Ok(name)
}

/// Download a firmware archive into `dest_dir`, reporting progress.
///
/// Returns the path of the completed archive. Blocks until the transfer
/// finishes or fails; there is no mid-transfer cancellation.
pub fn fetch_archive(url: &str, dest_dir: &Path, user_agent: &str) -> Result<PathBuf> {
    let file_name = file_name_from_url(url)?.to_string();
    fs::create_dir_all(dest_dir)?;

    let client = reqwest::blocking::Client::builder()
        .user_agent(user_agent)
        .build()
        .map_err(|e| DroidflashError::download(format!("failed to build HTTP client: {e}")))?;

    info!(url, "starting firmware download");
    let mut response = client
        .get(url)
        .send()
        .map_err(|e| DroidflashError::download(format!("request failed: {e}")))?;

    if !response.status().is_success() {
        return Err(DroidflashError::download(format!(
            "download failed with status {}",
            response.status()
        )));
    }

    let bar = match response.content_length() {
        Some(total) => {
            let bar = ProgressBar::new(total);
            bar.set_style(ProgressStyle::default_bar());
            bar
        }
        None => ProgressBar::new_spinner(),
    };

    let temp_path = dest_dir.join(format!("{file_name}.part"));
    let final_path = dest_dir.join(&file_name);

    let file = File::create(&temp_path)?;
    let mut writer = bar.wrap_write(file);

    if let Err(e) = io::copy(&mut response, &mut writer) {
        bar.abandon();
        let _ = fs::remove_file(&temp_path);
        return Err(DroidflashError::download(format!("transfer failed: {e}")));
    }

    bar.finish();
    fs::rename(&temp_path, &final_path)?;

    info!(path = %final_path.display(), "firmware archive downloaded");
    Ok(final_path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_name_from_plain_url() {
        assert_eq!(
            file_name_from_url("https://dl.example.com/fw/pixel-factory.zip").unwrap(),
            "pixel-factory.zip"
        );
    }

    #[test]
    fn test_file_name_strips_query_and_fragment() {
        assert_eq!(
            file_name_from_url("https://cdn.example.com/a/b.tar.gz?token=abc#frag").unwrap(),
            "b.tar.gz"
        );
    }

    #[test]
    fn test_file_name_rejects_trailing_slash() {
        assert!(file_name_from_url("https://example.com/downloads/").is_err());
    }

    #[test]
    fn test_file_name_rejects_bare_host() {
        assert!(file_name_from_url("https://example.com").is_err());
    }
}
