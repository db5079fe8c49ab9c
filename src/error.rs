use thiserror::Error;

/// Failure taxonomy for patch operations.
///
/// A stale patch selection is deliberately not represented here: it is a
/// user-visible confirmation gate handled by the selector, not an error.
#[derive(Debug, Error)]
pub enum PatchError {
    #[error("network request failed: {0}")]
    Network(#[from] reqwest::Error),

    #[error("malformed release metadata: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("file operation failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("no valid Safe Exam Browser installation found")]
    UnknownInstallation,

    #[error("administrator privileges are required")]
    PrivilegeRequired,
}
