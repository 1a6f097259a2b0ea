/// spacemap TUI: terminal frontend and render loop.
///
/// This crate contains all terminal code. Scanning and layout live in
/// `spacemap-core`; the render loop only locks the shared tree, lays it out,
/// and paints the resulting cells.
pub mod app;
pub mod config;
pub mod error;
pub mod input;
pub mod surface;
pub mod terminal;
pub mod theme;

pub use app::App;
pub use config::AppConfig;
pub use error::{AppError, ConfigError};
pub use surface::{KeySequence, Surface};
pub use terminal::CrosstermSurface;
