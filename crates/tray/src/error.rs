//! Error types for tray operations.

use crate::icon::TrayIconId;

/// Errors produced by the tray subsystem.
///
/// All variants are locally recoverable; no operation retries internally.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TrayError {
    #[error("system tray is not supported on this platform")]
    Unsupported,

    #[error("tray icon creation failed: {0}")]
    CreationFailed(String),

    #[error("failed to show tray icon: {0}")]
    ShowFailed(String),

    #[error("tray icon {0} has been removed")]
    Removed(TrayIconId),

    #[error("unknown tray icon id {0}")]
    UnknownIcon(TrayIconId),
}
