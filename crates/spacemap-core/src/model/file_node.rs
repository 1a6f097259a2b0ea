/// A single node in the arena-allocated file tree.
///
/// Nodes are stored in a flat `Vec<FileNode>` owned by [`FileTree`].
/// Parent-child relationships use indices rather than pointers, so the
/// parent back-link never owns anything and no reference cycles exist.
///
/// [`FileTree`]: super::FileTree
use compact_str::CompactString;
use std::path::PathBuf;

/// Lightweight `u32` index into the arena `Vec<FileNode>`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeIndex(pub u32);

impl NodeIndex {
    /// Create a new `NodeIndex` from a `usize`.
    #[inline]
    pub fn new(index: usize) -> Self {
        debug_assert!(index <= u32::MAX as usize, "NodeIndex overflow");
        Self(index as u32)
    }

    /// Return the index as a `usize` for Vec indexing.
    #[inline]
    pub fn idx(self) -> usize {
        self.0 as usize
    }
}

/// A single file or directory in the tree.
#[derive(Debug, Clone)]
pub struct FileNode {
    /// File or directory name only (NOT the full path).
    pub name: CompactString,

    /// `true` if this node represents a directory.
    pub is_dir: bool,

    /// Byte size. For files this is the file length; for directories it is
    /// the running sum of every descendant, updated as children attach.
    pub size: u64,

    /// Absolute path. Derived from the parent's path when the node is
    /// attached; empty until then (except for the root).
    pub path: PathBuf,

    /// Index of the parent node. `None` for the scan root and for nodes
    /// that have not been attached yet.
    pub parent: Option<NodeIndex>,

    /// Children in insertion order, until [`FileTree::sort_all`] reorders them.
    ///
    /// [`FileTree::sort_all`]: super::FileTree::sort_all
    pub children: Vec<NodeIndex>,
}

impl FileNode {
    /// Create a new file node with the given name and size.
    pub fn new_file(name: CompactString, size: u64) -> Self {
        Self {
            name,
            is_dir: false,
            size,
            path: PathBuf::new(),
            parent: None,
            children: Vec::new(),
        }
    }

    /// Create a new, empty directory node.
    pub fn new_dir(name: CompactString) -> Self {
        Self {
            name,
            is_dir: true,
            size: 0,
            path: PathBuf::new(),
            parent: None,
            children: Vec::new(),
        }
    }

    /// Size used for proportional layout: never zero, so empty files and
    /// directories still get a visible share of their parent's rectangle.
    #[inline]
    pub fn draw_size(&self) -> u64 {
        self.size.max(1)
    }

    /// Bytes this node contributes by itself, excluding descendants.
    #[inline]
    pub fn own_size(&self) -> u64 {
        if self.is_dir {
            0
        } else {
            self.size
        }
    }
}
