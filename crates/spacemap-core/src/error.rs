/// Scan failure type.
///
/// Per-entry and per-directory I/O problems below the root are recovered
/// inside the scanner and never show up here. A `ScanError` means the scan
/// as a whole failed, and is reported once through [`ScanHandle::join`].
///
/// [`ScanHandle::join`]: crate::scanner::ScanHandle::join
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScanError {
    /// The scan root itself could not be listed.
    #[error("cannot read {}: {source}", .path.display())]
    RootUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The scan root could not be resolved to an absolute path.
    #[error("cannot resolve {}: {source}", .path.display())]
    InvalidRoot {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The OS refused to start the scanner thread.
    #[error("failed to spawn scanner thread: {0}")]
    Spawn(#[source] std::io::Error),

    /// The scanner thread panicked.
    #[error("scanner thread panicked: {0}")]
    Panicked(String),
}
