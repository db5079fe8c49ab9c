//! Release directory client.
//!
//! Talks to the remote feed describing available patch releases: one JSON
//! document for the latest patch tag, one array of release descriptors, and
//! the GitHub releases API for downloadable assets.

use crate::catalog;
use crate::error::PatchError;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct Release {
    pub tag_name: String,
    #[serde(default)]
    pub assets: Vec<Asset>,
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct Asset {
    #[serde(default)]
    pub name: String,
    pub browser_download_url: String,
}

async fn get_json<T: serde::de::DeserializeOwned>(url: &str) -> Result<T, PatchError> {
    tracing::debug!("Fetching release metadata from: {}", url);

    let client = reqwest::Client::new();
    let response = client
        .get(url)
        .header("User-Agent", "sebpatch")
        .send()
        .await?
        .error_for_status()?;

    let body = response.text().await?;
    Ok(serde_json::from_str(&body)?)
}

/// Fetch the tag of the latest published patch.
pub async fn latest_patch() -> Result<String, PatchError> {
    let release: Release = get_json(catalog::LATEST_PATCH_URL).await?;
    Ok(release.tag_name)
}

/// List patch tags applicable to a base version, annotated for display.
///
/// Retains feed entries whose tag contains `base` as a substring, in feed
/// order. On any fetch or parse error the list is empty and the session
/// continues with nothing selectable rather than failing outright.
pub async fn list_patches(base: &str) -> Vec<String> {
    let latest = match latest_patch().await {
        Ok(tag) => tag,
        Err(e) => {
            tracing::warn!("Could not fetch latest patch tag: {}", e);
            return Vec::new();
        }
    };

    let releases: Vec<Release> = match get_json(catalog::RELEASES_URL).await {
        Ok(releases) => releases,
        Err(e) => {
            tracing::warn!("Could not fetch patch release list: {}", e);
            return Vec::new();
        }
    };

    annotate(&releases, base, &latest)
}

/// Append a `" (latest)"` marker to the live latest tag and to the frozen
/// legacy tags, which stay latest forever because their lines are closed.
fn annotate(releases: &[Release], base: &str, live_latest: &str) -> Vec<String> {
    releases
        .iter()
        .filter(|release| release.tag_name.contains(base))
        .map(|release| {
            let tag = &release.tag_name;
            let is_legacy_latest = catalog::SUPPORTED_VERSIONS
                .iter()
                .filter_map(|version| catalog::legacy_latest(version))
                .any(|legacy| legacy == tag.as_str());

            if tag.as_str() == live_latest || is_legacy_latest {
                format!("{} (latest)", tag)
            } else {
                tag.clone()
            }
        })
        .collect()
}

/// Fetch a release API document with its downloadable assets.
pub async fn release(api_url: &str) -> Result<Release, PatchError> {
    get_json(api_url).await
}
