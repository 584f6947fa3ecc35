use crate::core::provider::Provider;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// The single record written to `settings.toml`.
#[derive(Debug, Serialize, Deserialize, Default, Clone, PartialEq, Eq)]
pub struct PersistedState {
    /// Id of the provider loaded at startup. Absent only when no providers remain.
    pub default_provider_id: Option<String>,
    #[serde(default)]
    pub providers: Vec<Provider>,
}

/// Render `path` for messages, abbreviating the home directory to `~`.
pub fn path_display<P: AsRef<Path>>(path: P) -> String {
    let path = path.as_ref();
    let relative = std::env::var_os("HOME")
        .filter(|_| cfg!(unix))
        .map(PathBuf::from)
        .and_then(|home| path.strip_prefix(home).ok().map(Path::to_path_buf));

    match relative {
        Some(rest) => format!("~/{}", rest.display()),
        None => path.display().to_string(),
    }
}
