/// The terminal collaborator the render loop draws on.
///
/// [`CrosstermSurface`](crate::terminal::CrosstermSurface) is the real
/// implementation; tests drive the loop with a scripted fake.
use spacemap_core::layout::Cell;
use std::io;
use std::time::Duration;

/// One decoded input event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeySequence {
    /// Nothing arrived before the timeout.
    None,
    /// A plain character key.
    Char(char),
    /// The Escape key on its own.
    Escape,
    /// Escape-prefixed combination (`Alt` + key), decoded as a pair.
    Alt(char),
    /// Ctrl-C.
    Interrupt,
    /// The terminal now has this many columns and rows.
    Resize { width: u16, height: u16 },
    /// Anything else (function keys, mouse, focus changes).
    Other,
}

/// A character-cell terminal the render loop can paint onto.
pub trait Surface {
    /// Enter raw mode: no echo, no line buffering, hidden cursor.
    fn start(&mut self) -> io::Result<()>;

    /// Restore the terminal. Must be safe to call more than once and when
    /// [`start`](Self::start) never ran or failed part-way.
    fn stop(&mut self) -> io::Result<()>;

    /// Current size as `(width, height)` in cells.
    fn size(&self) -> io::Result<(u16, u16)>;

    /// Wait up to `timeout` for one input event.
    fn next_key(&mut self, timeout: Duration) -> io::Result<KeySequence>;

    /// Write one cell. Output may be buffered until [`flush`](Self::flush).
    fn paint(&mut self, row: u16, col: u16, cell: Cell) -> io::Result<()>;

    /// Push a completed frame to the screen.
    fn flush(&mut self) -> io::Result<()>;
}
