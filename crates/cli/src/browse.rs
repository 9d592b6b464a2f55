//! Opening generated reports in the desktop browser.

use std::path::Path;
use std::process::Command;

use anyhow::Context;
use tracing::warn;

fn opener() -> Command {
  #[cfg(target_os = "macos")]
  {
    Command::new("open")
  }
  #[cfg(target_os = "windows")]
  {
    Command::new("explorer")
  }
  #[cfg(not(any(target_os = "macos", target_os = "windows")))]
  {
    Command::new("xdg-open")
  }
}

/// Open `path` with the platform opener and wait for it to exit.
pub fn open_in_browser(path: &Path) -> anyhow::Result<()> {
  let mut cmd = opener();
  let program = cmd.get_program().to_string_lossy().into_owned();

  let status = cmd
    .arg(path)
    .status()
    .with_context(|| format!("failed to run {}", program))?;

  if !status.success() {
    warn!("{} exited with {}", program, status);
  }
  Ok(())
}
