use std::path::{Path, PathBuf};

use serde::Deserialize;

pub const DEFAULT_API: &str = "http://localhost:8000";
pub const API_ENV: &str = "FILESERVER_API";
const RC_FILE: &str = ".fileserverrc";

#[derive(Debug, Default, Deserialize)]
struct RcFile {
    api: Option<String>,
}

pub fn rc_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(RC_FILE))
}

/// Reads `{"api": "..."}` from a per-user rc file. A missing or unreadable
/// file is not an error, it just doesn't contribute.
pub fn read_rc(path: &Path) -> Option<String> {
    let raw = std::fs::read_to_string(path).ok()?;
    match serde_json::from_str::<RcFile>(&raw) {
        Ok(rc) => rc.api.filter(|api| !api.trim().is_empty()),
        Err(e) => {
            log::warn!("Ignoring malformed {}: {}", path.display(), e);
            None
        }
    }
}

/// `explicit` is the `--api` flag, already merged with `FILESERVER_API` by
/// clap, so the order here is flag > env > rc file > default.
pub fn resolve_api(explicit: Option<String>, rc: Option<&Path>) -> String {
    explicit
        .filter(|api| !api.trim().is_empty())
        .or_else(|| rc.and_then(read_rc))
        .unwrap_or_else(|| DEFAULT_API.to_string())
        .trim_end_matches('/')
        .to_string()
}
