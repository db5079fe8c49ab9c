//! Process-boundary and host concerns: privilege elevation, opening URLs,
//! and the connectivity probe.

use crate::error::PatchError;
use crate::ui::Prompter;
use std::process::Command;
use std::time::Duration;

/// Whether the current process already has administrator rights.
///
/// On Windows this probes with `net session`, which only succeeds elevated.
pub fn is_elevated() -> bool {
    if cfg!(windows) {
        Command::new("net")
            .arg("session")
            .output()
            .map(|output| output.status.success())
            .unwrap_or(false)
    } else {
        Command::new("id")
            .arg("-u")
            .output()
            .ok()
            .and_then(|output| String::from_utf8(output.stdout).ok())
            .map(|uid| uid.trim() == "0")
            .unwrap_or(false)
    }
}

/// Re-launch the current executable with elevated privileges and exit.
///
/// Only supported on Windows, where the shell shows the UAC prompt. On other
/// platforms elevation cannot be requested after the fact and the caller
/// must report the privilege requirement as fatal.
pub fn relaunch_elevated() -> Result<(), PatchError> {
    if !cfg!(windows) {
        return Err(PatchError::PrivilegeRequired);
    }

    let exe = std::env::current_exe()?;
    let args: Vec<String> = std::env::args().skip(1).collect();

    let mut command = format!("Start-Process -FilePath '{}' -Verb RunAs", exe.display());
    if !args.is_empty() {
        command.push_str(&format!(" -ArgumentList '{}'", args.join(" ")));
    }

    Command::new("powershell")
        .args(["-NoProfile", "-Command", &command])
        .spawn()?;

    tracing::info!("Relaunched elevated, exiting unprivileged process");
    std::process::exit(0);
}

/// Open a URL in the default browser, fire-and-forget.
pub fn open_url(url: &str) -> Result<(), PatchError> {
    if cfg!(windows) {
        Command::new("rundll32")
            .args(["url.dll,FileProtocolHandler", url])
            .spawn()?;
    } else if cfg!(target_os = "macos") {
        Command::new("open").arg(url).spawn()?;
    } else {
        Command::new("xdg-open").arg(url).spawn()?;
    }
    Ok(())
}

pub async fn is_online() -> bool {
    reqwest::get("https://api.github.com").await.is_ok()
}

/// Block until the connectivity probe succeeds, polling once a second.
///
/// Fixed-interval sleeping to avoid a busy wait; there is no timeout by
/// design, the session simply cannot proceed offline. Everything that
/// talks to the release feed runs after this returns.
pub async fn wait_until_online(prompter: &dyn Prompter) {
    wait_for(is_online, prompter).await;
}

async fn wait_for<F, Fut>(mut probe: F, prompter: &dyn Prompter)
where
    F: FnMut() -> Fut,
    Fut: std::future::Future<Output = bool>,
{
    if probe().await {
        return;
    }

    prompter.notify("Connection failed. Please connect to the internet.");
    loop {
        tokio::time::sleep(Duration::from_secs(1)).await;
        if probe().await {
            break;
        }
    }
    tracing::info!("Connectivity restored");
}
