//! Self-update: check the tool's own release feed, stage a newer build, and
//! hand off replacement of the running executable to a short-lived helper
//! script.
//!
//! The two-phase handoff exists because a running executable image cannot be
//! overwritten in place. Phase one stages the new binary next to the current
//! one; phase two spawns a helper script that waits for this process to
//! exit, copies the staged binary over the old one, relaunches it, and
//! deletes itself.

use crate::catalog;
use crate::download::download_file;
use crate::feed;
use crate::ui::Prompter;
use anyhow::{anyhow, Context, Result};
use std::path::Path;
use std::process::Command;

/// Parse a release tag like `v6` into a build number.
///
/// Non-numeric tags mean "no update available", never an error.
fn parse_build_tag(tag: &str) -> Option<u32> {
    tag.strip_prefix('v').unwrap_or(tag).parse().ok()
}

/// Build number of the newest published release, if it can be determined.
pub async fn remote_build() -> Option<u32> {
    let release = match feed::release(catalog::SELF_RELEASE_API).await {
        Ok(release) => release,
        Err(e) => {
            tracing::warn!("Could not check for updates: {}", e);
            return None;
        }
    };
    parse_build_tag(&release.tag_name)
}

fn update_available(current: u32, remote: Option<u32>) -> bool {
    remote.is_some_and(|remote| remote > current)
}

/// Offer and perform a self-update when the feed carries a newer build.
///
/// On success the process exits inside [`upgrade`] and this never returns.
pub async fn maybe_upgrade(prompter: &dyn Prompter) -> Result<()> {
    if !update_available(catalog::BUILD_NUMBER, remote_build().await) {
        tracing::debug!("No newer build published");
        return Ok(());
    }

    let wanted = prompter.confirm(
        "A new update is available. Do you want to update?",
        "Continue",
        "Cancel",
    )?;
    if !wanted {
        tracing::info!("Update declined");
        return Ok(());
    }

    prompter.notify("Installing newer version. Please wait.");
    upgrade().await
}

/// Download the new executable and schedule the swap. Exits the process.
pub async fn upgrade() -> Result<()> {
    let release = feed::release(catalog::SELF_RELEASE_API)
        .await
        .context("failed to fetch release info")?;

    let asset = release
        .assets
        .iter()
        .find(|asset| asset.name == catalog::SELF_ASSET_NAME)
        .ok_or_else(|| anyhow!("no executable asset found in latest release"))?;

    let current_exe = std::env::current_exe().context("could not locate current executable")?;
    let staged = current_exe.with_extension("new");

    download_file(&asset.browser_download_url, &staged)
        .await
        .context("failed to download new executable")?;
    tracing::info!("Staged new executable at {}", staged.display());

    schedule_replacement(&current_exe, &staged)
}

/// Write and spawn the helper script, then exit so it can do the swap.
fn schedule_replacement(current: &Path, staged: &Path) -> Result<()> {
    if cfg!(windows) {
        let script = format!(
            "@echo off\r\n\
             timeout /t 3 /nobreak > nul\r\n\
             copy /Y \"{staged}\" \"{current}\" > nul\r\n\
             del /f \"{staged}\" > nul 2>&1\r\n\
             start \"\" \"{current}\"\r\n\
             del \"%~f0\"\r\n\
             exit\r\n",
            staged = staged.display(),
            current = current.display(),
        );

        let script_path = current.with_extension("upgrade.bat");
        std::fs::write(&script_path, script).context("failed to write upgrade script")?;

        Command::new("cmd")
            .args(["/C", "start", "/min"])
            .arg(&script_path)
            .spawn()
            .context("failed to start upgrade script")?;
    } else {
        let script = format!(
            "#!/bin/sh\n\
             sleep 3\n\
             cp \"{staged}\" \"{current}\"\n\
             rm -f \"{staged}\"\n\
             \"{current}\" &\n\
             rm -f \"$0\"\n",
            staged = staged.display(),
            current = current.display(),
        );

        let script_path = current.with_extension("upgrade.sh");
        std::fs::write(&script_path, script).context("failed to write upgrade script")?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mut perms = std::fs::metadata(&script_path)?.permissions();
            perms.set_mode(0o755);
            std::fs::set_permissions(&script_path, perms)?;
        }

        Command::new("sh")
            .arg(&script_path)
            .spawn()
            .context("failed to start upgrade script")?;
    }

    tracing::info!("Upgrade scheduled, restarting application");

    // Exit now so the helper can overwrite the image after process teardown
    std::process::exit(0);
}
