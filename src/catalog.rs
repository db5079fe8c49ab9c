//! Versioned configuration table for supported SEB releases.
//!
//! Everything in this file is coupled to specific upstream binary releases:
//! the fingerprint table identifies installed builds by content hash, and the
//! legacy "latest" overrides freeze the last known patch for version lines
//! that no longer receive updates. A new upstream release is a data change
//! here, not a logic change elsewhere.
//!
//! The fingerprint table and the set of base versions the release feed knows
//! about are reconciled manually; there is no automatic check that they agree.

/// Build number of this tool, compared against its own release feed.
pub const BUILD_NUMBER: u32 = 5;

/// Base versions selectable in the patch flow, newest first.
pub const SUPPORTED_VERSIONS: [&str; 3] = ["3.9.0", "3.8.0", "3.7.1"];

/// The installed file whose content hash identifies the SEB version.
pub const PROBE_FILE: &str =
    "C:/Program Files/SafeExamBrowser/Application/SafeExamBrowser.Proctoring.dll";

/// Directory patched files are relocated into.
pub const INSTALL_DIR: &str = "C:\\Program Files\\SafeExamBrowser\\Application";

/// MD5 of `PROBE_FILE` for each supported upstream build.
const FINGERPRINTS: [(&str, &str); 3] = [
    ("184550b2479cab509b45291381994ec9", "3.9.0"),
    ("fc8abcc53d255b5a9de9a9d09c7ee452", "3.8.0"),
    ("6d572137fdf86b0386e4f33491eb8ae4", "3.7.1"),
];

/// Last patch ever published for the frozen version lines. These are treated
/// as permanently latest regardless of what the live feed reports.
const LEGACY_LATEST: [(&str, &str); 2] = [
    ("3.8.0", "v3.8.0_b97253e"),
    ("3.7.1", "v3.7.1_98e8089"),
];

pub const LATEST_PATCH_URL: &str = "https://wxnnvs.ftp.sh/un-seb/latest.json";
pub const RELEASES_URL: &str = "https://wxnnvs.ftp.sh/un-seb/releases.json";
pub const PATCH_RELEASE_API: &str =
    "https://api.github.com/repos/wxnnvs/seb-win-bypass/releases/latest";
pub const SELF_RELEASE_API: &str =
    "https://api.github.com/repos/wxnnvs/patch-seb/releases/latest";
pub const SEB_DOWNLOAD_PAGE: &str =
    "https://github.com/SafeExamBrowser/seb-win-refactoring/releases/latest";

/// Asset name of this tool's own executable in its release feed.
pub const SELF_ASSET_NAME: &str = "sebpatch.exe";

/// Original (unpatched) files served for the restore flow.
pub const RESTORE_ASSETS: [&str; 2] = [
    "https://wxnnvs.ftp.sh/un-seb/dlls/390/SafeExamBrowser.Browser.dll",
    "https://wxnnvs.ftp.sh/un-seb/dlls/390/SafeExamBrowser.Configuration.dll",
];

/// Look up an installed version by probe-file fingerprint.
///
/// Exact match only; any hash not in the table means the installation is
/// unknown to us (too old, too new, or tampered with).
pub fn resolve(fingerprint: &str) -> Option<&'static str> {
    FINGERPRINTS
        .iter()
        .find(|(hash, _)| *hash == fingerprint)
        .map(|(_, version)| *version)
}

/// The frozen "latest" patch tag for a base version, if that line is frozen.
pub fn legacy_latest(base: &str) -> Option<&'static str> {
    LEGACY_LATEST
        .iter()
        .find(|(version, _)| *version == base)
        .map(|(_, tag)| *tag)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_known_fingerprints() {
        assert_eq!(resolve("184550b2479cab509b45291381994ec9"), Some("3.9.0"));
        assert_eq!(resolve("fc8abcc53d255b5a9de9a9d09c7ee452"), Some("3.8.0"));
        assert_eq!(resolve("6d572137fdf86b0386e4f33491eb8ae4"), Some("3.7.1"));
    }

    #[test]
    fn test_resolve_unknown_fingerprint() {
        assert_eq!(resolve("00000000000000000000000000000000"), None);
        assert_eq!(resolve(""), None);
        // Uppercase hex is not normalized; the probe always emits lowercase
        assert_eq!(resolve("184550B2479CAB509B45291381994EC9"), None);
    }

    #[test]
    fn test_legacy_latest_overrides() {
        assert_eq!(legacy_latest("3.8.0"), Some("v3.8.0_b97253e"));
        assert_eq!(legacy_latest("3.7.1"), Some("v3.7.1_98e8089"));
        assert_eq!(legacy_latest("3.9.0"), None);
    }
}
