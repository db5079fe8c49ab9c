//! Asset installation: download to the temp directory, then relocate into
//! the SEB installation directory.
//!
//! Per-asset failures are logged and skipped; the operation only reports
//! overall success or failure after every asset has been attempted. At least
//! one relocated file counts as success, zero as total failure. There is no
//! rollback of files that did move.

use crate::download::download_file;
use std::fs;
use std::path::{Path, PathBuf};

/// Last path segment of a download URL, used as the local file name.
fn asset_name(url: &str) -> &str {
    url.rsplit('/').next().unwrap_or(url)
}

/// Drop executable assets from a download set.
///
/// Matches anywhere in the URL, not just the extension, mirroring how the
/// release feed names its assets. Only the patch flow applies this filter;
/// the restore flow downloads its set unfiltered.
pub fn filter_executables(urls: Vec<String>) -> Vec<String> {
    urls.into_iter().filter(|url| !url.contains("exe")).collect()
}

/// Download each asset to the platform temp directory.
///
/// Failed downloads are logged and skipped; the returned paths are the
/// assets that made it to disk.
pub async fn download_assets(urls: &[String]) -> Vec<PathBuf> {
    let temp_dir = std::env::temp_dir();
    let mut downloaded = Vec::new();

    for url in urls {
        let local_path = temp_dir.join(asset_name(url));
        match download_file(url, &local_path).await {
            Ok(()) => downloaded.push(local_path),
            Err(e) => tracing::warn!("Failed to download {}: {}", url, e),
        }
    }

    downloaded
}

/// Move downloaded files into the destination directory.
///
/// Directory creation is idempotent. A file that fails to move is logged
/// and skipped; the returned paths are the files now in place.
pub fn relocate(files: &[PathBuf], destination_dir: &Path) -> Vec<PathBuf> {
    let mut moved = Vec::new();

    for file in files {
        let Some(file_name) = file.file_name() else {
            tracing::warn!("Skipping download with no file name: {}", file.display());
            continue;
        };
        let destination = destination_dir.join(file_name);

        if let Err(e) = fs::create_dir_all(destination_dir) {
            tracing::warn!(
                "Failed to create directory {}: {}",
                destination_dir.display(),
                e
            );
            continue;
        }

        match fs::rename(file, &destination) {
            Ok(()) => {
                tracing::info!("Installed {}", destination.display());
                moved.push(destination);
            }
            Err(e) => tracing::warn!("Failed to move {} into place: {}", file.display(), e),
        }
    }

    moved
}

/// Download an asset set and relocate it into `destination_dir`.
///
/// Returns every file that ended up in the destination; the caller decides
/// what an empty result means for the overall operation.
pub async fn install(urls: &[String], destination_dir: &Path) -> Vec<PathBuf> {
    let downloaded = download_assets(urls).await;
    relocate(&downloaded, destination_dir)
}
