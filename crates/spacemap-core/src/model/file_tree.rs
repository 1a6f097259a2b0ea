/// Arena-backed file tree with incremental size roll-up.
///
/// All nodes live in a single `Vec<FileNode>`. Relationships between nodes
/// use `NodeIndex` (a thin `u32` wrapper) rather than heap pointers. The tree
/// is append-only: nodes are attached exactly once and never removed,
/// renamed or reparented, so directory sizes can be kept current by adding
/// each new node's size to its ancestors instead of re-aggregating.
use super::file_node::{FileNode, NodeIndex};
use compact_str::CompactString;
use std::cmp::Reverse;
use std::path::{Path, PathBuf};

/// The tree produced by a scan. Index 0 is always the root directory.
#[derive(Debug, Clone)]
pub struct FileTree {
    /// Arena: every node in a flat vector.
    nodes: Vec<FileNode>,
}

impl FileTree {
    /// Create a tree holding only the root directory for `root_path`.
    ///
    /// `root_path` should already be absolute; it is stored as given.
    pub fn new(root_path: impl Into<PathBuf>) -> Self {
        Self::with_capacity(root_path, 1)
    }

    /// Like [`FileTree::new`], pre-allocating room for `estimated_nodes`.
    pub fn with_capacity(root_path: impl Into<PathBuf>, estimated_nodes: usize) -> Self {
        let path = root_path.into();
        let mut root = FileNode::new_dir(CompactString::new(root_display_name(&path)));
        root.path = path;

        let mut nodes = Vec::with_capacity(estimated_nodes.max(1));
        nodes.push(root);
        Self { nodes }
    }

    /// Index of the root directory.
    #[inline]
    pub fn root(&self) -> NodeIndex {
        NodeIndex(0)
    }

    /// Attach `node` as the last child of `parent` and return its index.
    ///
    /// Sets the node's parent and derived path, then walks the parent chain
    /// up to the root adding the node's size to every ancestor.
    pub fn attach(&mut self, parent: NodeIndex, mut node: FileNode) -> NodeIndex {
        let idx = NodeIndex::new(self.nodes.len());
        let size = node.size;

        node.parent = Some(parent);
        node.path = self.nodes[parent.idx()].path.join(node.name.as_str());
        self.nodes.push(node);
        self.nodes[parent.idx()].children.push(idx);

        let mut current = Some(parent);
        while let Some(ancestor) = current {
            let ancestor = &mut self.nodes[ancestor.idx()];
            ancestor.size += size;
            current = ancestor.parent;
        }

        idx
    }

    /// Order the children of every node by descending size, breaking ties
    /// by ascending name.
    ///
    /// The sort is stable, so repeated calls on an unchanged tree are no-ops.
    /// Must be re-applied before each layout while a scan is still appending.
    pub fn sort_all(&mut self) {
        for i in 0..self.nodes.len() {
            if self.nodes[i].children.len() < 2 {
                continue;
            }
            let mut children = std::mem::take(&mut self.nodes[i].children);
            children.sort_by(|a, b| {
                let a = &self.nodes[a.idx()];
                let b = &self.nodes[b.idx()];
                (Reverse(a.size), &a.name).cmp(&(Reverse(b.size), &b.name))
            });
            self.nodes[i].children = children;
        }
    }

    /// Get the node at the given index.
    #[inline]
    pub fn node(&self, index: NodeIndex) -> &FileNode {
        &self.nodes[index.idx()]
    }

    /// Direct children of a node, in their current order.
    #[inline]
    pub fn children(&self, parent: NodeIndex) -> &[NodeIndex] {
        &self.nodes[parent.idx()].children
    }

    /// Aggregate size of the whole tree.
    #[inline]
    pub fn total_size(&self) -> u64 {
        self.nodes[0].size
    }

    /// Total number of nodes in the tree, root included.
    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Always `false`: a tree owns at least its root.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

/// Derive a display name for the scan root: the last path segment, or the
/// whole path for roots such as `/` that have none.
fn root_display_name(path: &Path) -> String {
    match path.file_name() {
        Some(name) => name.to_string_lossy().into_owned(),
        None => path.to_string_lossy().into_owned(),
    }
}
