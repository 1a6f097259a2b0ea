//! Crossterm-backed terminal surface.
//!
//! Owns raw mode, the alternate screen and cursor visibility for the
//! session. Teardown runs from [`Surface::stop`], from `Drop`, and from a
//! panic hook, so the shell is restored however the render loop ends.

use crate::input;
use crate::surface::{KeySequence, Surface};
use crate::theme::Palette;
use crossterm::{
    cursor::{Hide, MoveTo, Show},
    event, execute, queue,
    style::{Attribute, Print, ResetColor, SetAttribute, SetColors},
    terminal::{self, disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use spacemap_core::layout::{Category, Cell};
use std::io::{self, BufWriter, Stdout, Write};
use std::panic;
use std::sync::Once;
use std::time::Duration;
use tracing::{error, info};

static PANIC_HOOK: Once = Once::new();

/// Restore the terminal before the default panic output is printed.
fn install_panic_hook() {
    PANIC_HOOK.call_once(|| {
        let original_hook = panic::take_hook();
        panic::set_hook(Box::new(move |panic_info| {
            let _ = disable_raw_mode();
            let _ = execute!(io::stdout(), ResetColor, Show, LeaveAlternateScreen);
            original_hook(panic_info);
        }));
    });
}

/// The real terminal, drawn through buffered crossterm commands.
pub struct CrosstermSurface {
    out: BufWriter<Stdout>,
    palette: Palette,
    started: bool,
    /// Where the terminal cursor is after the last queued cell.
    cursor: Option<(u16, u16)>,
    /// Colours currently in effect.
    category: Option<Category>,
}

impl CrosstermSurface {
    pub fn new() -> Self {
        Self::with_palette(Palette::standard())
    }

    pub fn with_palette(palette: Palette) -> Self {
        Self {
            out: BufWriter::new(io::stdout()),
            palette,
            started: false,
            cursor: None,
            category: None,
        }
    }
}

impl Default for CrosstermSurface {
    fn default() -> Self {
        Self::new()
    }
}

impl Surface for CrosstermSurface {
    fn start(&mut self) -> io::Result<()> {
        install_panic_hook();

        // Mark as started first so a failure below still gets torn down.
        self.started = true;
        enable_raw_mode()?;
        execute!(
            self.out,
            EnterAlternateScreen,
            Hide,
            SetAttribute(Attribute::Bold),
            terminal::Clear(terminal::ClearType::All)
        )?;
        self.cursor = None;
        self.category = None;

        info!("Terminal initialised");
        Ok(())
    }

    fn stop(&mut self) -> io::Result<()> {
        if !self.started {
            return Ok(());
        }
        self.started = false;

        let restored = execute!(
            self.out,
            SetAttribute(Attribute::Reset),
            ResetColor,
            Show,
            LeaveAlternateScreen
        );
        // Leave raw mode even if the escape sequences could not be written.
        disable_raw_mode()?;
        restored?;

        info!("Terminal restored");
        Ok(())
    }

    fn size(&self) -> io::Result<(u16, u16)> {
        terminal::size()
    }

    fn next_key(&mut self, timeout: Duration) -> io::Result<KeySequence> {
        if event::poll(timeout)? {
            Ok(input::translate(event::read()?))
        } else {
            Ok(KeySequence::None)
        }
    }

    fn paint(&mut self, row: u16, col: u16, cell: Cell) -> io::Result<()> {
        if self.cursor != Some((row, col)) {
            queue!(self.out, MoveTo(col, row))?;
        }
        if self.category != Some(cell.category) {
            queue!(self.out, SetColors(self.palette.colors(cell.category)))?;
            self.category = Some(cell.category);
        }
        queue!(self.out, Print(cell.ch))?;
        self.cursor = Some((row, col.saturating_add(1)));
        Ok(())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.out.flush()
    }
}

impl Drop for CrosstermSurface {
    fn drop(&mut self) {
        if let Err(e) = self.stop() {
            error!("Failed to restore terminal: {}", e);
        }
    }
}
