/// Depth-first directory walker: the only writer of the shared tree.
///
/// Each directory is listed, stat'ed and attached under a **single lock
/// acquisition**, so a concurrent reader sees either none or all of a
/// directory's immediate children. The lock is released before descending,
/// which lets the render loop interleave snapshots with deeper scanning.
///
/// # Failure policy
///
/// - Symlinks are skipped entirely: never descended, never counted.
/// - An entry that cannot be stat'ed (vanished, denied) is skipped.
/// - A directory below the root that cannot be listed keeps whatever was
///   attached before the failure and the walk moves on.
/// - Only an unreadable scan root is fatal.
use crate::error::ScanError;
use crate::model::{FileNode, NodeIndex};
use crate::scanner::progress::ScanProgress;
use crate::scanner::LiveTree;
use compact_str::CompactString;
use crossbeam_channel::Sender;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::debug;

/// Running totals for progress reporting.
#[derive(Debug, Default, Clone, Copy)]
struct Counters {
    files_found: u64,
    dirs_found: u64,
}

/// A directory attached to the tree but not yet listed.
type PendingDir = (NodeIndex, PathBuf);

/// Walk the tree rooted at the live tree's root node.
///
/// Returns `Err` only when the root itself cannot be listed.
pub fn scan_tree(
    live_tree: &LiveTree,
    progress_tx: &Sender<ScanProgress>,
) -> Result<(), ScanError> {
    let start = Instant::now();
    let mut counters = Counters {
        files_found: 0,
        dirs_found: 1, // count the root
    };

    let (root, root_path) = {
        let tree = live_tree.lock();
        let root = tree.root();
        (root, tree.node(root).path.clone())
    };

    let mut stack: Vec<PendingDir> = Vec::new();
    match scan_directory(live_tree, root, &root_path, &mut counters) {
        Ok(subdirs) => stack.extend(subdirs.into_iter().rev()),
        Err(source) => {
            return Err(ScanError::RootUnreadable {
                path: root_path,
                source,
            })
        }
    }
    report_progress(live_tree, progress_tx, counters);

    // Reversed pushes keep the visit order equal to listing order.
    while let Some((dir, path)) = stack.pop() {
        match scan_directory(live_tree, dir, &path, &mut counters) {
            Ok(subdirs) => stack.extend(subdirs.into_iter().rev()),
            Err(err) => debug!("Skipping unreadable directory {}: {err}", path.display()),
        }
        report_progress(live_tree, progress_tx, counters);
    }

    let duration = start.elapsed();
    debug!(
        "Scan complete: {} files, {} dirs in {:?}",
        counters.files_found, counters.dirs_found, duration
    );
    let _ = progress_tx.try_send(ScanProgress::Complete {
        duration,
        files_found: counters.files_found,
        dirs_found: counters.dirs_found,
    });
    Ok(())
}

/// List `path` and attach its immediate children to `dir`, all under one
/// lock. Returns the child directories still to be scanned, in listing order.
///
/// Fails only if the listing cannot be opened; failures after that point
/// keep the children attached so far.
fn scan_directory(
    live_tree: &LiveTree,
    dir: NodeIndex,
    path: &Path,
    counters: &mut Counters,
) -> io::Result<Vec<PendingDir>> {
    let mut tree = live_tree.lock();
    let entries = fs::read_dir(path)?;
    let mut subdirs = Vec::new();

    for entry in entries {
        let entry = match entry {
            Ok(e) => e,
            Err(err) => {
                debug!("Listing of {} failed mid-way: {err}", path.display());
                break;
            }
        };
        let child_path = entry.path();

        let metadata = match fs::symlink_metadata(&child_path) {
            Ok(m) => m,
            Err(err) => {
                debug!("Skipping {}: {err}", child_path.display());
                continue;
            }
        };
        let file_type = metadata.file_type();
        if file_type.is_symlink() {
            continue;
        }

        let name = CompactString::new(entry.file_name().to_string_lossy());
        if file_type.is_dir() {
            let idx = tree.attach(dir, FileNode::new_dir(name));
            subdirs.push((idx, child_path));
            counters.dirs_found += 1;
        } else if file_type.is_file() {
            tree.attach(dir, FileNode::new_file(name, metadata.len()));
            counters.files_found += 1;
        }
    }

    Ok(subdirs)
}

/// Send a non-blocking progress update; dropped if the channel is full.
fn report_progress(
    live_tree: &LiveTree,
    progress_tx: &Sender<ScanProgress>,
    counters: Counters,
) {
    let total_size = live_tree.lock().total_size();
    let _ = progress_tx.try_send(ScanProgress::Update {
        files_found: counters.files_found,
        dirs_found: counters.dirs_found,
        total_size,
    });
}
