/// Scanner module: runs the filesystem walk on a background thread.
///
/// The walker writes into a **shared `LiveTree`** (`Arc<Mutex<FileTree>>`)
/// so the render loop can draw a real-time, incrementally-growing treemap
/// while the scan is running. There is exactly one scanner thread per scan;
/// readers and the writer take the same exclusive lock.
pub mod progress;
pub mod walk;

use crate::error::ScanError;
use crate::model::FileTree;
use progress::ScanProgress;

use crossbeam_channel::Receiver;
use parking_lot::Mutex;
use std::path::PathBuf;
use std::sync::Arc;
use std::thread;
use tracing::info;

/// A shared, lock-guarded file tree.
///
/// The scanner holds the lock while it lists and attaches one directory.
/// The render loop holds it while it sorts and lays out the tree.
pub type LiveTree = Arc<Mutex<FileTree>>;

/// Maximum number of progress messages that may queue up in the channel.
///
/// The scanner uses `try_send`, so when the render loop falls behind,
/// surplus updates are dropped instead of stalling the walk.
pub const PROGRESS_CHANNEL_CAPACITY: usize = 1_024;

/// Handle to a running or completed scan.
pub struct ScanHandle {
    /// Receiver for progress updates from the scan thread.
    pub progress_rx: Receiver<ScanProgress>,
    /// Shared tree that is populated incrementally during scanning.
    pub live_tree: LiveTree,
    /// Join handle for the scan thread; taken by the first `join`.
    thread: Option<thread::JoinHandle<Result<(), ScanError>>>,
}

impl ScanHandle {
    /// `true` once the scan thread has stopped, successfully or not.
    ///
    /// Also `true` after [`join`](Self::join) has consumed the outcome.
    pub fn is_finished(&self) -> bool {
        self.thread.as_ref().map_or(true, |t| t.is_finished())
    }

    /// Block until the scan thread exits and return its outcome.
    ///
    /// A fatal scan error is reported by the first call only; every later
    /// call returns `Ok(())`.
    pub fn join(&mut self) -> Result<(), ScanError> {
        let Some(thread) = self.thread.take() else {
            return Ok(());
        };
        match thread.join() {
            Ok(outcome) => outcome,
            Err(payload) => Err(ScanError::Panicked(panic_message(payload.as_ref()))),
        }
    }
}

/// Start a new scan of `root_path` on a background thread.
///
/// The path is made absolute (symlinks are not resolved) and the root node
/// exists in the returned tree before this function returns.
pub fn start_scan(root_path: PathBuf) -> Result<ScanHandle, ScanError> {
    let root_path = std::path::absolute(&root_path).map_err(|source| ScanError::InvalidRoot {
        path: root_path.clone(),
        source,
    })?;

    let (progress_tx, progress_rx) =
        crossbeam_channel::bounded::<ScanProgress>(PROGRESS_CHANNEL_CAPACITY);

    let live_tree: LiveTree = Arc::new(Mutex::new(FileTree::with_capacity(
        root_path.clone(),
        4_096,
    )));
    let tree_clone = live_tree.clone();

    let thread = thread::Builder::new()
        .name("spacemap-scanner".into())
        .spawn(move || {
            info!("Starting scan of {}", root_path.display());
            walk::scan_tree(&tree_clone, &progress_tx)
        })
        .map_err(ScanError::Spawn)?;

    Ok(ScanHandle {
        progress_rx,
        live_tree,
        thread: Some(thread),
    })
}

/// Extract a readable message from a thread panic payload.
fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}
