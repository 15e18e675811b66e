// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Centralized environment variable access for the daemon crate.

use std::path::{Path, PathBuf};
use std::time::Duration;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum EnvError {
    #[error("cannot resolve state directory (set PAYLENS_STATE_DIR or HOME)")]
    NoStateDir,
    #[error("PAYLENS_API_BASE is not set")]
    NoApiBase,
}

/// Resolve state directory: PAYLENS_STATE_DIR > XDG_STATE_HOME/paylens >
/// ~/.local/state/paylens
pub fn state_dir() -> Result<PathBuf, EnvError> {
    if let Ok(dir) = std::env::var("PAYLENS_STATE_DIR") {
        return Ok(PathBuf::from(dir));
    }
    if let Ok(xdg) = std::env::var("XDG_STATE_HOME") {
        return Ok(PathBuf::from(xdg).join("paylens"));
    }
    let home = dirs::home_dir().ok_or(EnvError::NoStateDir)?;
    Ok(home.join(".local/state/paylens"))
}

/// Base URL of the remote HR/finance API, e.g. `https://host/api/v1`.
pub fn api_base() -> Result<String, EnvError> {
    std::env::var("PAYLENS_API_BASE").ok().filter(|s| !s.is_empty()).ok_or(EnvError::NoApiBase)
}

/// Unix socket path; defaults to `<state_dir>/paylensd.sock`.
pub fn socket_path(state_dir: &Path) -> PathBuf {
    std::env::var("PAYLENS_SOCKET")
        .map(PathBuf::from)
        .unwrap_or_else(|_| state_dir.join("paylensd.sock"))
}

/// Default IPC timeout
pub fn ipc_timeout() -> Duration {
    std::env::var("PAYLENS_IPC_TIMEOUT_MS")
        .ok()
        .and_then(|s| s.parse::<u64>().ok())
        .map(Duration::from_millis)
        .unwrap_or(Duration::from_secs(5))
}
