/// spacemap core: scanning, the size tree, and treemap layout.
///
/// This crate contains all business logic with zero terminal dependencies.
/// The frontend only has to paint the cells a [`layout::Canvas`] produces.
///
/// # Modules
///
/// - [`model`]: Arena-allocated file tree with incremental size roll-up.
/// - [`scanner`]: Background filesystem walk into a shared, locked tree.
/// - [`layout`]: Character-grid treemap layout and labelling.
/// - [`error`]: Scan failure type.
pub mod error;
pub mod layout;
pub mod model;
pub mod scanner;

pub use error::ScanError;
