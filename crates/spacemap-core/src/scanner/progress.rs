/// Scan progress reporting: lightweight messages sent from the scan
/// thread to the render loop via a crossbeam channel.
use std::time::Duration;

/// Progress updates sent from the scan thread.
///
/// The actual tree data is in the shared `LiveTree`; these messages
/// carry only running counters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanProgress {
    /// Sent after each directory level has been attached.
    Update {
        files_found: u64,
        dirs_found: u64,
        total_size: u64,
    },
    /// The walk finished without a fatal error.
    Complete {
        duration: Duration,
        files_found: u64,
        dirs_found: u64,
    },
}
