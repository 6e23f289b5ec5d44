//! Hand a matched path to the OS default handler.

use crate::error::{DocseekError, Result};
use log::info;
use std::path::Path;
use std::process::Command;

/// Launches the platform opener for `path`. A failure to launch is
/// returned to the caller for reporting; it is never fatal to a session.
pub fn open_with_default_handler(path: &Path) -> Result<()> {
    info!("Opening {} with the default handler", path.display());

    let mut command = if cfg!(target_os = "macos") {
        let mut c = Command::new("open");
        c.arg(path);
        c
    } else if cfg!(target_os = "windows") {
        let mut c = Command::new("cmd");
        c.args(["/C", "start", ""]).arg(path);
        c
    } else {
        let mut c = Command::new("xdg-open");
        c.arg(path);
        c
    };

    let status = command.status().map_err(|e| DocseekError::OpenHandler {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;

    if status.success() {
        Ok(())
    } else {
        Err(DocseekError::OpenHandler {
            path: path.to_path_buf(),
            reason: format!("handler exited with {status}"),
        })
    }
}
