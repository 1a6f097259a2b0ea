/// Character-grid canvas and the recursive treemap drawing routine.
///
/// Every node is drawn into an explicit [`CellRect`]. Shapes are handled
/// by size class:
///
/// - **1×1**: a single marker.
/// - **1 wide**: a vertical capsule: top/bottom caps, the first letter of
///   the name on the second row when there are at least three rows, and a
///   vertical rule below it.
/// - **1 tall**: a horizontal capsule: left/right caps around the label,
///   padded with a horizontal rule.
/// - **otherwise**: a bordered box titled with the label (or, when only
///   two columns wide, the first letter on the second row). If the interior
///   is non-empty and the node has children, they are laid out inside it.
use super::glyphs::GlyphSet;
use super::label::{fit_label, printable, LabelStyle};
use super::split::split_in_two;
use crate::model::{FileNode, FileTree, NodeIndex};
use std::fmt;

/// Number of directory tints before the colour cycle repeats.
const DIR_TINTS: u8 = 6;

/// Colour category of a cell: files share one, directories cycle by depth.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Category(pub u8);

impl Category {
    /// All plain files.
    pub const FILE: Category = Category(0);

    /// Category of a directory drawn at nesting `depth` (root = 0).
    pub fn directory(depth: usize) -> Category {
        Category(1 + (depth % DIR_TINTS as usize) as u8)
    }

    /// Number of distinct categories, for building palettes.
    pub const COUNT: usize = 1 + DIR_TINTS as usize;
}

/// One character cell of the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub ch: char,
    pub category: Category,
}

impl Default for Cell {
    fn default() -> Self {
        Self {
            ch: ' ',
            category: Category::FILE,
        }
    }
}

/// A rectangle of cells: top-left corner plus extent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellRect {
    pub x: usize,
    pub y: usize,
    pub width: usize,
    pub height: usize,
}

impl CellRect {
    pub fn new(x: usize, y: usize, width: usize, height: usize) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Last column (inclusive).
    #[inline]
    fn right(&self) -> usize {
        self.x + self.width - 1
    }

    /// Last row (inclusive).
    #[inline]
    fn bottom(&self) -> usize {
        self.y + self.height - 1
    }

    /// The rectangle shrunk by one cell on every side, if anything is left.
    fn interior(&self) -> Option<CellRect> {
        if self.width > 2 && self.height > 2 {
            Some(CellRect::new(
                self.x + 1,
                self.y + 1,
                self.width - 2,
                self.height - 2,
            ))
        } else {
            None
        }
    }
}

/// A fixed-size grid that a treemap is drawn into.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Canvas {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
    glyphs: GlyphSet,
    label_style: LabelStyle,
}

impl Canvas {
    /// Create a blank canvas. Both dimensions should be at least 1;
    /// drawing onto an empty canvas does nothing.
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![Cell::default(); width * height],
            glyphs: GlyphSet::default(),
            label_style: LabelStyle::default(),
        }
    }

    pub fn with_glyphs(mut self, glyphs: GlyphSet) -> Self {
        self.glyphs = glyphs;
        self
    }

    pub fn with_label_style(mut self, label_style: LabelStyle) -> Self {
        self.label_style = label_style;
        self
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// The cell at `row`, `col`. Panics when out of bounds.
    #[inline]
    pub fn cell(&self, row: usize, col: usize) -> Cell {
        self.cells[row * self.width + col]
    }

    /// Iterate over the grid one row at a time.
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        // `max(1)` keeps `chunks` valid for a zero-width canvas, which has no cells.
        self.cells.chunks(self.width.max(1))
    }

    /// Draw `node` and its descendants over the whole canvas.
    pub fn draw(&mut self, tree: &FileTree, node: NodeIndex) {
        if self.width == 0 || self.height == 0 {
            return;
        }
        let full = CellRect::new(0, 0, self.width, self.height);
        self.draw_node(tree, node, 0, full);
    }

    fn draw_node(&mut self, tree: &FileTree, index: NodeIndex, depth: usize, rect: CellRect) {
        let node = tree.node(index);
        let g = self.glyphs;

        let category = if node.is_dir {
            Category::directory(depth)
        } else {
            Category::FILE
        };
        self.tint(rect, category);

        let (x0, y0, x1, y1) = (rect.x, rect.y, rect.right(), rect.bottom());

        if rect.width == 1 && rect.height == 1 {
            self.put(y0, x0, g.marker);
            return;
        }
        if rect.width == 1 {
            self.put(y0, x0, g.cap_top);
            self.put(y1, x0, g.cap_bottom);
            if rect.height > 2 {
                self.put(y0 + 1, x0, initial(node));
                self.vline(x0, y0 + 2, rect.height - 3);
            }
            return;
        }
        if rect.height == 1 {
            self.put(y0, x0, g.cap_left);
            self.put(y0, x1, g.cap_right);
            self.title(node, y0, x0 + 1, rect.width - 2);
            return;
        }

        self.put(y0, x0, g.top_left);
        self.put(y0, x1, g.top_right);
        self.put(y1, x0, g.bottom_left);
        self.put(y1, x1, g.bottom_right);

        if rect.width == 2 && rect.height > 2 {
            self.put(y0 + 1, x0, initial(node));
            self.vline(x0, y0 + 2, rect.height - 3);
        } else {
            self.title(node, y0, x0 + 1, rect.width - 2);
            self.vline(x0, y0 + 1, rect.height - 2);
        }
        self.hline(y1, x0 + 1, rect.width - 2);
        self.vline(x1, y0 + 1, rect.height - 2);

        if let Some(inner) = rect.interior() {
            let children = tree.children(index);
            if !children.is_empty() {
                self.draw_children(tree, children, depth + 1, inner);
            }
        }
    }

    /// Recursively bipartition `children` over `rect`.
    fn draw_children(
        &mut self,
        tree: &FileTree,
        children: &[NodeIndex],
        depth: usize,
        rect: CellRect,
    ) {
        if let [only] = children {
            self.draw_node(tree, *only, depth, rect);
            return;
        }

        let split = split_in_two(children, |c| tree.node(c).draw_size());
        let ratio = split.sizes[0] as f64 / (split.sizes[0] + split.sizes[1]) as f64;
        let [first, second] = &split.lists;

        // Ties split top/bottom.
        if rect.width > rect.height {
            let first_width = ((rect.width as f64 * ratio).ceil() as usize).min(rect.width);
            let left = CellRect::new(rect.x, rect.y, first_width, rect.height);
            self.draw_children(tree, first, depth, left);
            if first_width < rect.width {
                let right = CellRect::new(
                    rect.x + first_width,
                    rect.y,
                    rect.width - first_width,
                    rect.height,
                );
                self.draw_children(tree, second, depth, right);
            }
        } else {
            let first_height = ((rect.height as f64 * ratio).ceil() as usize).min(rect.height);
            let top = CellRect::new(rect.x, rect.y, rect.width, first_height);
            self.draw_children(tree, first, depth, top);
            if first_height < rect.height {
                let bottom = CellRect::new(
                    rect.x,
                    rect.y + first_height,
                    rect.width,
                    rect.height - first_height,
                );
                self.draw_children(tree, second, depth, bottom);
            }
        }
    }

    fn tint(&mut self, rect: CellRect, category: Category) {
        for row in rect.y..rect.y + rect.height {
            let start = row * self.width + rect.x;
            for cell in &mut self.cells[start..start + rect.width] {
                cell.category = category;
            }
        }
    }

    #[inline]
    fn put(&mut self, row: usize, col: usize, ch: char) {
        self.cells[row * self.width + col].ch = ch;
    }

    fn hline(&mut self, row: usize, col: usize, len: usize) {
        let ch = self.glyphs.horizontal;
        for i in 0..len {
            self.put(row, col + i, ch);
        }
    }

    fn vline(&mut self, col: usize, row: usize, len: usize) {
        let ch = self.glyphs.vertical;
        for i in 0..len {
            self.put(row + i, col, ch);
        }
    }

    /// Write the node's label into `len` cells, padding with the rule glyph.
    fn title(&mut self, node: &FileNode, row: usize, col: usize, len: usize) {
        let label = fit_label(&node.name, node.size, len, self.label_style);
        let fill = std::iter::repeat(self.glyphs.horizontal);
        for (i, ch) in label.chars().chain(fill).take(len).enumerate() {
            self.put(row, col + i, ch);
        }
    }
}

/// First letter of a node's name, or `?` for an empty name.
fn initial(node: &FileNode) -> char {
    node.name.chars().next().map_or('?', printable)
}

impl fmt::Display for Canvas {
    /// Rows of characters joined by newlines, without a trailing newline.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, row) in self.rows().enumerate() {
            if i > 0 {
                f.write_str("\n")?;
            }
            for cell in row {
                write!(f, "{}", cell.ch)?;
            }
        }
        Ok(())
    }
}
