mod catalog;
mod cli;
mod download;
mod error;
mod feed;
mod fingerprint;
mod install;
mod platform;
mod selector;
mod ui;
mod upgrade;

use anyhow::{bail, Result};
use clap::Parser;
use cli::{Cli, Commands};
use error::PatchError;
use selector::{Decision, PatchSelector};
use std::path::Path;
use ui::{ConsolePrompter, Prompter};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup logging
    setup_logging(&cli)?;

    match cli.command {
        Commands::Version => {
            println!(
                "sebpatch v{} (build {})",
                env!("CARGO_PKG_VERSION"),
                catalog::BUILD_NUMBER
            );
            Ok(())
        }

        Commands::Detect => run_detect(),

        Commands::List { base } => run_list(base).await,

        Commands::Patch { base, tag, yes } => run_patch(base, tag, yes).await,

        Commands::Unpatch { yes } => run_unpatch(yes).await,

        Commands::SelfUpdate { yes } => run_self_update(yes).await,
    }
}

fn setup_logging(cli: &Cli) -> Result<()> {
    use tracing_subscriber::{fmt, EnvFilter};

    let level = if cli.quiet {
        "error"
    } else if cli.verbose == 0 {
        "warn"
    } else if cli.verbose == 1 {
        "info"
    } else {
        "debug"
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_thread_names(false)
        .init();

    Ok(())
}

/// Fingerprint the probe file and look it up in the version catalog.
fn detect_version() -> Option<&'static str> {
    match fingerprint::fingerprint(catalog::PROBE_FILE) {
        Ok(fp) => {
            tracing::debug!("Probe fingerprint: {}", fp);
            catalog::resolve(&fp)
        }
        Err(e) => {
            tracing::debug!("Could not fingerprint {}: {}", catalog::PROBE_FILE, e);
            None
        }
    }
}

fn validate_base(base: &str) -> Result<String> {
    if !catalog::SUPPORTED_VERSIONS.contains(&base) {
        bail!(
            "Unsupported SEB version '{}'. Supported versions: {}",
            base,
            catalog::SUPPORTED_VERSIONS.join(", ")
        );
    }
    Ok(base.to_string())
}

fn run_detect() -> Result<()> {
    match detect_version() {
        Some(version) => {
            println!("Installed SEB version: {}", version);
            Ok(())
        }
        None => Err(PatchError::UnknownInstallation.into()),
    }
}

async fn run_list(base: Option<String>) -> Result<()> {
    let base = match base {
        Some(base) => validate_base(&base)?,
        None => detect_version()
            .ok_or(PatchError::UnknownInstallation)?
            .to_string(),
    };

    let patches = feed::list_patches(&base).await;
    if patches.is_empty() {
        println!("No patch versions available for SEB {}", base);
        return Ok(());
    }

    println!("Patch versions for SEB {}:", base);
    for tag in patches {
        println!("  {}", tag);
    }
    Ok(())
}

async fn run_patch(base_arg: Option<String>, tag_arg: Option<String>, yes: bool) -> Result<()> {
    let prompter = ConsolePrompter::new(yes);

    if !platform::is_elevated() {
        // relaunch_elevated exits the unprivileged process on success
        if let Err(e) = platform::relaunch_elevated() {
            prompter.notify("Please run this program as an administrator.");
            return Err(e.into());
        }
    }

    // Startup connectivity probe, concurrent with the interactive session
    tokio::spawn(async {
        if !platform::is_online().await {
            tracing::warn!("No internet connection detected at startup");
        }
    });

    // Connectivity gates the update check: offline, the build lookup would
    // degrade to "no update" and the offer would be skipped for the session
    platform::wait_until_online(&prompter).await;

    if let Err(e) = upgrade::maybe_upgrade(&prompter).await {
        tracing::error!("Failed to update sebpatch: {}", e);
        prompter.notify("Failed to update sebpatch, continuing with the current build.");
    }

    let detected = detect_version();
    if detected.is_none() {
        let install_now =
            prompter.confirm("No valid SEB installation found.", "Install now.", "Ignore")?;
        if install_now {
            platform::open_url(catalog::SEB_DOWNLOAD_PAGE)?;
            return Ok(());
        }
    }

    let base = match (base_arg, detected) {
        (Some(base), Some(detected)) if base != detected => {
            let change = prompter.confirm(
                "Are you sure you want to change this? The default was selected based on your installation files.",
                "Continue",
                "Cancel",
            )?;
            if change {
                validate_base(&base)?
            } else {
                detected.to_string()
            }
        }
        (Some(base), _) => validate_base(&base)?,
        (None, Some(detected)) => detected.to_string(),
        (None, None) => {
            let options: Vec<String> = catalog::SUPPORTED_VERSIONS
                .iter()
                .map(|v| v.to_string())
                .collect();
            match prompter.select("Select your installed SEB version", &options)? {
                Some(index) => options[index].clone(),
                None => {
                    prompter.notify("Action canceled");
                    return Ok(());
                }
            }
        }
    };

    let mut selector = PatchSelector::new();
    selector.select_version(&base);
    selector.set_patches(feed::list_patches(&base).await);

    let chosen = match tag_arg {
        Some(tag) => tag,
        None => {
            let message = "Select the patch version you want to install";
            match prompter.select(message, selector.patches())? {
                Some(index) => selector.patches()[index].clone(),
                None => {
                    prompter.notify("No patch version selected.");
                    return Ok(());
                }
            }
        }
    };
    selector.choose_patch(&chosen);

    // A failed lookup degrades to an error-carrying string; containment
    // against it fails, so the stale gate fires on a broken feed.
    let live_latest = feed::latest_patch()
        .await
        .unwrap_or_else(|e| e.to_string());

    if selector.decide(&live_latest, &prompter)? == Decision::Cancelled {
        prompter.notify("Action canceled");
        return Ok(());
    }

    println!("SEB version: {}\nPatch version: {}", base, chosen);

    prompter.notify("Fetching assets...");
    let release = feed::release(catalog::PATCH_RELEASE_API).await?;
    let urls: Vec<String> = release
        .assets
        .into_iter()
        .map(|asset| asset.browser_download_url)
        .collect();
    let urls = install::filter_executables(urls);

    prompter.notify("Installing...");
    let moved = install::install(&urls, Path::new(catalog::INSTALL_DIR)).await;

    if moved.is_empty() {
        selector.mark_failed();
        bail!("Failed to patch SEB! Are you connected to the internet?");
    }

    selector.mark_success();
    println!("Successfully patched your SEB installation:");
    for file in &moved {
        println!("  {}", file.display());
    }
    Ok(())
}

async fn run_unpatch(yes: bool) -> Result<()> {
    let prompter = ConsolePrompter::new(yes);

    // The restore flow does not re-launch itself elevated; missing
    // privileges are fatal after a single notification
    if !platform::is_elevated() {
        prompter.notify("Please run this program as an administrator.");
        return Err(PatchError::PrivilegeRequired.into());
    }

    platform::wait_until_online(&prompter).await;

    let proceed = prompter.confirm("Restore the original SEB files?", "Continue", "Cancel")?;
    if !proceed {
        prompter.notify("Action canceled");
        return Ok(());
    }

    // The restore asset set is installed unfiltered
    let urls: Vec<String> = catalog::RESTORE_ASSETS
        .iter()
        .map(|url| url.to_string())
        .collect();
    let moved = install::install(&urls, Path::new(catalog::INSTALL_DIR)).await;

    if moved.is_empty() {
        bail!("Failed to restore the original SEB files.");
    }

    println!("Successfully restored the following files:");
    for file in &moved {
        println!("  {}", file.display());
    }
    Ok(())
}

async fn run_self_update(yes: bool) -> Result<()> {
    let prompter = ConsolePrompter::new(yes);

    platform::wait_until_online(&prompter).await;

    match upgrade::remote_build().await {
        Some(remote) if remote > catalog::BUILD_NUMBER => {
            let wanted = prompter.confirm(
                "A new update is available. Do you want to update?",
                "Continue",
                "Cancel",
            )?;
            if wanted {
                prompter.notify("Installing newer version. Please wait.");
                // Exits the process after scheduling the swap
                upgrade::upgrade().await?;
            }
            Ok(())
        }
        _ => {
            println!("sebpatch is up to date (build {})", catalog::BUILD_NUMBER);
            Ok(())
        }
    }
}
