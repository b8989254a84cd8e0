//! Terminal output: prefixed log lines and a render progress bar.
//!
//! ```ignore
//! log!("render"; "{} datasets", count);
//!
//! let progress = Progress::new("render", count);
//! progress.inc();
//! ```
//!
//! Log lines printed while a progress bar is active are written above it,
//! and the bar is redrawn below them.

use colored::{ColoredString, Colorize};
use crossterm::{
    cursor, execute,
    terminal::{Clear, ClearType, size},
};
use parking_lot::Mutex;
use std::{
    io::{Write, stdout},
    sync::{
        OnceLock,
        atomic::{AtomicBool, AtomicUsize, Ordering},
    },
};

/// Terminal width, detected once.
static TERMINAL_WIDTH: OnceLock<u16> = OnceLock::new();

/// Whether a progress bar currently occupies the last line.
static BAR_ACTIVE: AtomicBool = AtomicBool::new(false);

// ============================================================================
// Layout
// ============================================================================
//
// "[render] [████░░░░] 3/8"

/// `[` and `]` around the module name.
const BRACKET_LEN: usize = 2;
const SPACE_AFTER_PREFIX: usize = 1;
/// ` []` around the bar.
const BAR_WRAPPER_LEN: usize = 3;
const SPACE_BEFORE_COUNT: usize = 1;
const MIN_BAR_WIDTH: usize = 10;
const MAX_BAR_WIDTH: usize = 40;

#[inline]
const fn prefix_len(module_len: usize) -> usize {
    module_len + BRACKET_LEN + SPACE_AFTER_PREFIX
}

fn terminal_width() -> usize {
    usize::from(*TERMINAL_WIDTH.get_or_init(|| size().map(|(w, _)| w).unwrap_or(120)))
}

// ============================================================================
// Log Macro
// ============================================================================

/// Print a message with a coloured `[module]` prefix.
///
/// ```ignore
/// log!("entities"; "loaded {} entities", n);
/// ```
#[macro_export]
macro_rules! log {
    ($module:expr; $($arg:tt)*) => {{
        $crate::logger::log($module, &format!($($arg)*))
    }};
}

/// Write one log line, truncated to the terminal width unless multiline.
pub fn log(module: &str, message: &str) {
    let prefix = colorize_prefix(module);
    let max_len = terminal_width().saturating_sub(prefix_len(module.len()));
    let message = if message.contains('\n') {
        message
    } else {
        truncate_str(message, max_len)
    };

    let mut stdout = stdout().lock();
    let bar_active = BAR_ACTIVE.load(Ordering::SeqCst);
    if bar_active {
        execute!(stdout, cursor::MoveUp(1), Clear(ClearType::FromCursorDown)).ok();
    }
    writeln!(stdout, "{prefix} {message}").ok();
    if bar_active {
        // Leave the bar's line free; the next `inc` redraws it
        writeln!(stdout).ok();
    }
    stdout.flush().ok();
}

/// Colour a module prefix by module.
fn colorize_prefix(module: &str) -> ColoredString {
    let prefix = format!("[{module}]");
    match module.to_ascii_lowercase().as_str() {
        "render" => prefix.bright_green().bold(),
        "entities" => prefix.bright_blue().bold(),
        "warn" => prefix.bright_magenta().bold(),
        "error" => prefix.bright_red().bold(),
        _ => prefix.bright_yellow().bold(),
    }
}

/// Cut `s` to at most `max_len` bytes on a char boundary.
fn truncate_str(s: &str, max_len: usize) -> &str {
    if s.len() <= max_len {
        return s;
    }
    let mut end = max_len;
    while end > 0 && !s.is_char_boundary(end) {
        end -= 1;
    }
    &s[..end]
}

// ============================================================================
// Progress Bar
// ============================================================================

/// Single-line progress bar updated in place from any thread.
pub struct Progress {
    prefix: ColoredString,
    prefix_len: usize,
    total: usize,
    current: AtomicUsize,
    lock: Mutex<()>,
}

impl Progress {
    pub fn new(module: &str, total: usize) -> Self {
        let mut stdout = stdout().lock();
        writeln!(stdout).ok();
        stdout.flush().ok();
        BAR_ACTIVE.store(true, Ordering::SeqCst);

        Self {
            prefix: colorize_prefix(module),
            prefix_len: prefix_len(module.len()),
            total,
            current: AtomicUsize::new(0),
            lock: Mutex::new(()),
        }
    }

    /// A bar for `total` items, or `None` when there is at most one.
    pub fn for_items(module: &str, total: usize) -> Option<Self> {
        (total > 1).then(|| Self::new(module, total))
    }

    pub fn inc(&self) {
        let current = self.current.fetch_add(1, Ordering::Relaxed) + 1;
        self.draw(current);
    }

    fn draw(&self, current: usize) {
        let _guard = self.lock.lock();
        let line = render_bar(self.prefix_len, current, self.total, terminal_width());

        let mut stdout = stdout().lock();
        execute!(stdout, cursor::MoveUp(1), Clear(ClearType::CurrentLine)).ok();
        writeln!(stdout, "{} {line}", self.prefix).ok();
        stdout.flush().ok();
    }

    /// Remove the bar line.
    pub fn finish(&self) {
        if !BAR_ACTIVE.swap(false, Ordering::SeqCst) {
            return;
        }
        let _guard = self.lock.lock();
        let mut stdout = stdout().lock();
        execute!(stdout, cursor::MoveUp(1), Clear(ClearType::CurrentLine)).ok();
        stdout.flush().ok();
    }
}

impl Drop for Progress {
    fn drop(&mut self) {
        self.finish();
    }
}

/// Bar and count, `[████░░░░] 3/8`, sized to the width left by the prefix.
fn render_bar(prefix_len: usize, current: usize, total: usize, width: usize) -> String {
    let count = format!("{current}/{total}");
    let overhead = prefix_len + BAR_WRAPPER_LEN + SPACE_BEFORE_COUNT + count.len();
    let bar_width = width.saturating_sub(overhead).clamp(MIN_BAR_WIDTH, MAX_BAR_WIDTH);

    let filled = if total > 0 {
        (current.min(total) * bar_width) / total
    } else {
        0
    };
    let bar = "█".repeat(filled) + &"░".repeat(bar_width - filled);
    format!("[{bar}] {count}")
}
