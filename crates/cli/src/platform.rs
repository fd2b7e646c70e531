use anyhow::Context;
use std::path::Path;
use std::process::Command;

#[cfg(target_os = "windows")]
const OPENER: &str = "explorer";
#[cfg(target_os = "macos")]
const OPENER: &str = "open";
#[cfg(all(unix, not(target_os = "macos")))]
const OPENER: &str = "xdg-open";

/// Open a directory in the platform file manager. The directory is created
/// first so the shortcut works before anything has been stored.
pub fn open_in_file_manager(path: &Path) -> anyhow::Result<()> {
    std::fs::create_dir_all(path)
        .with_context(|| format!("could not create {}", path.display()))?;

    // explorer.exe reports exit code 1 even when it opens the window, so on
    // Windows the child is only spawned.
    #[cfg(target_os = "windows")]
    {
        Command::new(OPENER)
            .arg(path)
            .spawn()
            .with_context(|| format!("failed to launch {OPENER} for {}", path.display()))?;
        Ok(())
    }

    #[cfg(not(target_os = "windows"))]
    {
        let status = Command::new(OPENER)
            .arg(path)
            .status()
            .with_context(|| format!("failed to launch {OPENER} for {}", path.display()))?;
        anyhow::ensure!(status.success(), "{OPENER} exited with {status}");
        Ok(())
    }
}
