//! Webview data directory and the recover-cache switch.
//!
//! A broken webview profile (stale service workers, a corrupt cache) can
//! leave a provider page blank. Setting `CHATDOCK_RECOVER_CACHE=1` or
//! passing `--recover-cache` wipes the profile before any window exists.

use directories::ProjectDirs;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::info;

pub const RECOVER_CACHE_ENV: &str = "CHATDOCK_RECOVER_CACHE";

/// Parse an on/off style flag. Unrecognized values are `None`.
pub fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "on" | "true" | "yes" => Some(true),
        "0" | "off" | "false" | "no" | "" => Some(false),
        _ => None,
    }
}

pub fn recover_cache_requested(cli_flag: bool) -> bool {
    cli_flag
        || std::env::var(RECOVER_CACHE_ENV)
            .ok()
            .and_then(|value| parse_flag(&value))
            .unwrap_or(false)
}

/// `<cache dir>/webview`, where the webview keeps cookies and storage.
pub fn webview_data_dir() -> Option<PathBuf> {
    ProjectDirs::from("org", "chatdock", "chatdock").map(|dirs| dirs.cache_dir().join("webview"))
}

/// Remove the webview data directory. Returns `false` when there was nothing
/// to remove.
pub fn purge_webview_data(dir: &Path) -> io::Result<bool> {
    match fs::remove_dir_all(dir) {
        Ok(()) => {
            info!(path = %dir.display(), "cleared webview data");
            Ok(true)
        }
        Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(false),
        Err(err) => Err(err),
    }
}
