//! The render loop.
//!
//! Each tick locks the shared tree, re-sorts it (the scanner keeps
//! appending), lays it out onto a canvas the size of the terminal, unlocks,
//! and only then paints. Between ticks the loop waits for input for the
//! rest of the refresh interval.

use crate::config::AppConfig;
use crate::error::AppError;
use crate::input::{handle_key, InputResult};
use crate::surface::{KeySequence, Surface};
use spacemap_core::layout::{Canvas, GlyphSet, LabelStyle};
use spacemap_core::scanner::progress::ScanProgress;
use spacemap_core::scanner::ScanHandle;
use spacemap_core::ScanError;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, info};

/// Counters last reported by the scanner.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ScanStats {
    pub files_found: u64,
    pub dirs_found: u64,
    pub total_size: u64,
    /// Set once the scanner reports completion.
    pub duration: Option<Duration>,
}

/// Drives one scan's treemap on one surface.
pub struct App<S: Surface> {
    surface: S,
    scan: ScanHandle,
    refresh_rate: Duration,
    glyphs: GlyphSet,
    label_style: LabelStyle,
    /// Canvas size used by the next tick, `(width, height)`.
    size: (u16, u16),
    keep_running: bool,
    /// Raised from outside the loop (signal handler) to request a clean exit.
    shutdown: Arc<AtomicBool>,
    ticks: u64,
    stats: ScanStats,
}

impl<S: Surface> App<S> {
    pub fn new(surface: S, scan: ScanHandle, config: &AppConfig) -> Self {
        Self {
            surface,
            scan,
            refresh_rate: config.refresh_rate,
            glyphs: config.glyphs,
            label_style: config.label_style,
            size: (0, 0),
            keep_running: true,
            shutdown: Arc::new(AtomicBool::new(false)),
            ticks: 0,
            stats: ScanStats::default(),
        }
    }

    /// Share a flag that stops the loop like Ctrl-C once it is set.
    pub fn with_shutdown_flag(mut self, shutdown: Arc<AtomicBool>) -> Self {
        self.shutdown = shutdown;
        self
    }

    /// Run until the user quits or something fails.
    ///
    /// The surface is stopped unconditionally before returning, and any
    /// error from the loop is returned only after that.
    pub fn start(&mut self) -> Result<(), AppError> {
        let outcome = self
            .surface
            .start()
            .map_err(AppError::from)
            .and_then(|()| self.run());
        let restored = self.surface.stop();

        outcome?;
        restored?;
        Ok(())
    }

    fn run(&mut self) -> Result<(), AppError> {
        self.size = self.surface.size()?;

        let mut last_tick = Instant::now();
        self.tick()?;
        while self.keep_running {
            if self.shutdown.load(Ordering::Relaxed) {
                self.process_input(KeySequence::Interrupt);
                break;
            }
            let wait = self.refresh_rate.saturating_sub(last_tick.elapsed());
            let key = self.surface.next_key(wait)?;
            self.process_input(key);
            if !self.keep_running {
                break;
            }
            if last_tick.elapsed() >= self.refresh_rate {
                last_tick = Instant::now();
                self.tick()?;
            }
        }
        Ok(())
    }

    /// Apply one input event.
    pub fn process_input(&mut self, key: KeySequence) {
        match handle_key(key) {
            InputResult::Quit => {
                debug!("Quit requested via {key:?}");
                self.keep_running = false;
            }
            InputResult::Resize { width, height } => {
                debug!("Terminal resized to {width}x{height}");
                self.size = (width, height);
            }
            InputResult::Ignored => {}
        }
    }

    /// One lock/sort/layout/paint cycle.
    pub fn tick(&mut self) -> Result<(), AppError> {
        self.process_scan_messages()?;

        if let Some(canvas) = self.render_canvas() {
            for (row, cells) in canvas.rows().enumerate() {
                for (col, cell) in cells.iter().enumerate() {
                    self.surface.paint(row as u16, col as u16, *cell)?;
                }
            }
            self.surface.flush()?;
        }

        self.ticks += 1;
        Ok(())
    }

    /// Lay out the current tree at the current size. The tree lock is held
    /// only inside this function. Returns `None` for an empty terminal.
    pub fn render_canvas(&self) -> Option<Canvas> {
        let (width, height) = self.size;
        if width == 0 || height == 0 {
            return None;
        }

        let mut canvas = Canvas::new(width as usize, height as usize)
            .with_glyphs(self.glyphs)
            .with_label_style(self.label_style);

        let mut tree = self.scan.live_tree.lock();
        tree.sort_all();
        canvas.draw(&tree, tree.root());
        Some(canvas)
    }

    /// Drain scanner progress and, once the scanner thread has exited,
    /// collect its outcome. A scan failure is returned here exactly once.
    fn process_scan_messages(&mut self) -> Result<(), ScanError> {
        while let Ok(msg) = self.scan.progress_rx.try_recv() {
            match msg {
                ScanProgress::Update {
                    files_found,
                    dirs_found,
                    total_size,
                } => {
                    self.stats.files_found = files_found;
                    self.stats.dirs_found = dirs_found;
                    self.stats.total_size = total_size;
                }
                ScanProgress::Complete {
                    duration,
                    files_found,
                    dirs_found,
                } => {
                    info!("Scan complete: {files_found} files, {dirs_found} dirs in {duration:?}");
                    self.stats.files_found = files_found;
                    self.stats.dirs_found = dirs_found;
                    self.stats.duration = Some(duration);
                }
            }
        }

        if self.scan.is_finished() {
            self.scan.join()?;
        }
        Ok(())
    }

    /// `false` once a quit key has been processed.
    pub fn is_running(&self) -> bool {
        self.keep_running
    }

    /// Canvas size for the next tick, `(width, height)`.
    pub fn size(&self) -> (u16, u16) {
        self.size
    }

    /// Number of completed ticks.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn stats(&self) -> ScanStats {
        self.stats
    }

    pub fn scan(&self) -> &ScanHandle {
        &self.scan
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }
}
