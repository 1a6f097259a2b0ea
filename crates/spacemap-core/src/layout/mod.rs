/// Treemap layout engine: turns a subtree into a grid of character cells.
///
/// The layout is a pure function of the tree, the canvas size and the
/// chosen glyph/label styles: rendering the same tree twice yields the same
/// grid. Children must already be in their canonical order
/// ([`FileTree::sort_all`]) before [`Canvas::draw`] is called.
///
/// [`FileTree::sort_all`]: crate::model::FileTree::sort_all
pub mod canvas;
pub mod glyphs;
pub mod label;
pub mod split;

pub use canvas::{Canvas, Category, Cell, CellRect};
pub use glyphs::GlyphSet;
pub use label::LabelStyle;
pub use split::{split_in_two, Split};
