/// End-to-end tests for the render loop.
///
/// The real scanner runs against a `tempfile` directory; the terminal is
/// replaced by a scripted `FakeSurface` that records every painted cell, so
/// no TTY is needed.
use spacemap_core::layout::{Canvas, Cell, GlyphSet, LabelStyle};
use spacemap_core::scanner::{start_scan, ScanHandle};
use spacemap_core::ScanError;
use spacemap_tui::{App, AppConfig, AppError, KeySequence, Surface};
use std::collections::VecDeque;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tempfile::TempDir;

// ── Fake terminal ────────────────────────────────────────────────────────────

/// Scripted terminal. Keys are served from `script`; once it runs dry,
/// `q` is returned so a test can never hang. With `hold_until` set, an empty
/// script idles until the condition holds, idles once more so a tick sees
/// the new state, and only then returns `q`.
struct FakeSurface {
    size: (u16, u16),
    script: VecDeque<KeySequence>,
    /// Last painted frame, indexed `[row][col]`.
    screen: Vec<Vec<char>>,
    starts: u32,
    stops: u32,
    flushes: u32,
    fail_paint: bool,
    hold_until: Option<Box<dyn Fn() -> bool>>,
    released: bool,
}

impl FakeSurface {
    fn new(width: u16, height: u16, script: Vec<KeySequence>) -> Self {
        Self {
            size: (width, height),
            script: script.into(),
            screen: Vec::new(),
            starts: 0,
            stops: 0,
            flushes: 0,
            fail_paint: false,
            hold_until: None,
            released: false,
        }
    }

    fn screen_text(&self) -> String {
        self.screen
            .iter()
            .map(|row| row.iter().collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl Surface for FakeSurface {
    fn start(&mut self) -> io::Result<()> {
        self.starts += 1;
        Ok(())
    }

    fn stop(&mut self) -> io::Result<()> {
        self.stops += 1;
        Ok(())
    }

    fn size(&self) -> io::Result<(u16, u16)> {
        Ok(self.size)
    }

    fn next_key(&mut self, timeout: Duration) -> io::Result<KeySequence> {
        match self.script.pop_front() {
            Some(KeySequence::None) => {
                std::thread::sleep(timeout);
                Ok(KeySequence::None)
            }
            Some(key) => Ok(key),
            None => match &self.hold_until {
                Some(done) if !self.released => {
                    self.released = done();
                    std::thread::sleep(timeout);
                    Ok(KeySequence::None)
                }
                _ => Ok(KeySequence::Char('q')),
            },
        }
    }

    fn paint(&mut self, row: u16, col: u16, cell: Cell) -> io::Result<()> {
        if self.fail_paint {
            return Err(io::Error::new(io::ErrorKind::BrokenPipe, "terminal gone"));
        }
        let (row, col) = (row as usize, col as usize);
        if self.screen.len() <= row {
            self.screen.resize(row + 1, Vec::new());
        }
        if self.screen[row].len() <= col {
            self.screen[row].resize(col + 1, ' ');
        }
        self.screen[row][col] = cell.ch;
        Ok(())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.flushes += 1;
        Ok(())
    }
}

// ── Helpers ──────────────────────────────────────────────────────────────────

fn write_bytes(path: &Path, n: usize) {
    fs::write(path, vec![0u8; n]).unwrap();
}

fn make_temp_tree() -> TempDir {
    let tmp = TempDir::new().unwrap();
    write_bytes(&tmp.path().join("a"), 10);
    write_bytes(&tmp.path().join("b"), 5);
    let sub = tmp.path().join("d2");
    fs::create_dir(&sub).unwrap();
    write_bytes(&sub.join("c"), 1);
    write_bytes(&sub.join("d"), 3);
    tmp
}

fn config(root: PathBuf) -> AppConfig {
    let mut config = AppConfig::new(root);
    config.refresh_rate = Duration::from_millis(1);
    config.glyphs = GlyphSet::ASCII;
    config
}

/// Start a scan and wait for the worker to exit without consuming its outcome.
fn finished_scan(root: &Path) -> ScanHandle {
    let handle = start_scan(root.to_path_buf()).unwrap();
    let deadline = Instant::now() + Duration::from_secs(30);
    while !handle.is_finished() {
        assert!(Instant::now() < deadline, "scan did not finish in 30 s");
        std::thread::sleep(Duration::from_millis(2));
    }
    handle
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[test]
fn loop_stops_on_q_after_one_tick() {
    let tmp = make_temp_tree();
    let surface = FakeSurface::new(20, 6, vec![KeySequence::Char('q')]);
    let mut app = App::new(surface, finished_scan(tmp.path()), &config(tmp.path().into()));

    app.start().unwrap();

    assert!(!app.is_running());
    assert_eq!(app.ticks(), 1);
    assert_eq!(app.surface().starts, 1);
    assert_eq!(app.surface().stops, 1);
    assert_eq!(app.surface().flushes, 1);
}

#[test]
fn escape_and_interrupt_quit_cleanly() {
    for key in [KeySequence::Escape, KeySequence::Interrupt] {
        let tmp = make_temp_tree();
        let surface = FakeSurface::new(20, 6, vec![key]);
        let mut app = App::new(surface, finished_scan(tmp.path()), &config(tmp.path().into()));
        assert!(app.start().is_ok(), "{key:?} must not be an error");
        assert_eq!(app.surface().stops, 1);
    }
}

#[test]
fn ignored_keys_keep_the_loop_running() {
    let tmp = make_temp_tree();
    let script = vec![
        KeySequence::Char('x'),
        KeySequence::Alt('q'),
        KeySequence::Other,
        KeySequence::None,
        KeySequence::Char('q'),
    ];
    let surface = FakeSurface::new(20, 6, script);
    let mut app = App::new(surface, finished_scan(tmp.path()), &config(tmp.path().into()));

    app.start().unwrap();
    // The `None` step sleeps past the refresh interval, forcing a second tick.
    assert!(app.ticks() >= 2, "ticks = {}", app.ticks());
}

#[test]
fn painted_frame_matches_layout() {
    let tmp = make_temp_tree();
    let scan = finished_scan(tmp.path());
    let surface = FakeSurface::new(30, 8, vec![KeySequence::Char('q')]);
    let mut app = App::new(surface, scan, &config(tmp.path().into()));
    app.start().unwrap();

    let expected = {
        let mut tree = app.scan().live_tree.lock();
        tree.sort_all();
        let mut canvas = Canvas::new(30, 8).with_glyphs(GlyphSet::ASCII);
        canvas.draw(&tree, tree.root());
        canvas.to_string()
    };
    assert_eq!(app.surface().screen_text(), expected);

    // Sorted by size: the 10-byte file is the first box after the root title.
    let second_row: String = app.surface().screen[1].iter().collect();
    assert!(second_row.starts_with("|/a 10.00B"), "row was {second_row:?}");
}

#[test]
fn resize_changes_the_next_frame() {
    let tmp = make_temp_tree();
    let script = vec![
        KeySequence::Resize {
            width: 5,
            height: 1,
        },
        KeySequence::None,
        KeySequence::Char('q'),
    ];
    let surface = FakeSurface::new(30, 8, script);
    let mut app = App::new(surface, finished_scan(tmp.path()), &config(tmp.path().into()));
    app.start().unwrap();

    assert_eq!(app.size(), (5, 1));
    // The one-row frame overwrote the start of the first row.
    let first_row: String = app.surface().screen[0].iter().take(5).collect();
    assert_eq!(first_row.chars().next(), Some('<'));
    assert_eq!(first_row.chars().nth(4), Some('>'));
}

#[test]
fn empty_terminal_is_not_painted() {
    let tmp = make_temp_tree();
    let surface = FakeSurface::new(0, 0, vec![KeySequence::Char('q')]);
    let mut app = App::new(surface, finished_scan(tmp.path()), &config(tmp.path().into()));
    app.start().unwrap();
    assert!(app.surface().screen.is_empty());
    assert_eq!(app.surface().flushes, 0);
    assert!(app.render_canvas().is_none());
}

#[test]
fn scan_failure_surfaces_after_teardown() {
    let tmp = TempDir::new().unwrap();
    let missing = tmp.path().join("missing");
    let surface = FakeSurface::new(10, 4, vec![KeySequence::None; 5]);
    let mut app = App::new(surface, finished_scan(&missing), &config(missing.clone()));

    match app.start() {
        Err(AppError::Scan(ScanError::RootUnreadable { path, .. })) => assert_eq!(path, missing),
        other => panic!("expected scan failure, got {other:?}"),
    }
    assert_eq!(app.surface().stops, 1);
    assert_eq!(app.ticks(), 0, "the failing tick must not count");
}

#[test]
fn terminal_errors_still_run_teardown() {
    let tmp = make_temp_tree();
    let mut surface = FakeSurface::new(10, 4, vec![]);
    surface.fail_paint = true;
    let mut app = App::new(surface, finished_scan(tmp.path()), &config(tmp.path().into()));

    assert!(matches!(app.start(), Err(AppError::Terminal(_))));
    assert_eq!(app.surface().starts, 1);
    assert_eq!(app.surface().stops, 1);
}

#[test]
fn scan_progress_is_collected() {
    let tmp = make_temp_tree();
    let surface = FakeSurface::new(20, 6, vec![KeySequence::Char('q')]);
    let mut app = App::new(surface, finished_scan(tmp.path()), &config(tmp.path().into()));
    app.start().unwrap();

    let stats = app.stats();
    assert_eq!(stats.files_found, 4);
    assert_eq!(stats.dirs_found, 2);
    assert_eq!(stats.total_size, 19);
    assert!(stats.duration.is_some());
}

#[test]
fn name_only_labels_are_configurable() {
    let tmp = make_temp_tree();
    let mut cfg = config(tmp.path().into());
    cfg.label_style = LabelStyle::NameOnly;
    let surface = FakeSurface::new(30, 8, vec![KeySequence::Char('q')]);
    let mut app = App::new(surface, finished_scan(tmp.path()), &cfg);
    app.start().unwrap();

    let second_row: String = app.surface().screen[1].iter().collect();
    assert!(second_row.starts_with("|/a-"), "row was {second_row:?}");
}

#[test]
fn frames_are_drawn_while_the_scan_runs() {
    let tmp = TempDir::new().unwrap();
    for d in 0..40 {
        let dir = tmp.path().join(format!("dir{d:02}"));
        fs::create_dir(&dir).unwrap();
        for f in 0..40 {
            write_bytes(&dir.join(format!("f{f:02}")), 100);
        }
    }

    let scan = start_scan(tmp.path().to_path_buf()).unwrap();
    let live = Arc::clone(&scan.live_tree);
    let deadline = Instant::now() + Duration::from_secs(30);
    let mut surface = FakeSurface::new(40, 12, vec![]);
    // The scanner thread drops its clone of the tree when it exits.
    surface.hold_until = Some(Box::new(move || {
        Arc::strong_count(&live) <= 2 || Instant::now() > deadline
    }));

    let mut app = App::new(surface, scan, &config(tmp.path().into()));
    app.start().unwrap();

    assert!(app.ticks() >= 2, "ticks = {}", app.ticks());
    assert_eq!(app.surface().stops, 1);

    // A tick after the worker exited drained its completion message.
    let stats = app.stats();
    assert!(stats.duration.is_some(), "completion was never observed");
    assert_eq!(stats.files_found, 1_600);
    assert_eq!(stats.dirs_found, 41);
    assert_eq!(stats.total_size, 160_000);

    // The last frame shows the finished tree.
    let last_frame = app.render_canvas().unwrap().to_string();
    assert_eq!(app.surface().screen_text(), last_frame);
}

#[test]
fn raised_shutdown_flag_quits_through_teardown() {
    let tmp = make_temp_tree();
    let shutdown = Arc::new(AtomicBool::new(false));
    let surface = FakeSurface::new(20, 6, vec![KeySequence::None; 10_000]);
    let mut app = App::new(surface, finished_scan(tmp.path()), &config(tmp.path().into()))
        .with_shutdown_flag(Arc::clone(&shutdown));

    let raiser = {
        let shutdown = Arc::clone(&shutdown);
        std::thread::spawn(move || {
            std::thread::sleep(Duration::from_millis(20));
            shutdown.store(true, Ordering::Relaxed);
        })
    };

    assert!(app.start().is_ok());
    raiser.join().unwrap();

    assert!(!app.is_running());
    assert_eq!(app.surface().starts, 1);
    assert_eq!(app.surface().stops, 1);
    assert!(
        !app.surface().script.is_empty(),
        "the loop must stop on the flag, not on the fallback key"
    );
}

#[test]
fn shutdown_flag_raised_before_start_allows_one_frame() {
    let tmp = make_temp_tree();
    let surface = FakeSurface::new(20, 6, vec![KeySequence::None; 100]);
    let mut app = App::new(surface, finished_scan(tmp.path()), &config(tmp.path().into()))
        .with_shutdown_flag(Arc::new(AtomicBool::new(true)));

    app.start().unwrap();
    assert_eq!(app.ticks(), 1);
    assert_eq!(app.surface().script.len(), 100);
    assert_eq!(app.surface().stops, 1);
}
