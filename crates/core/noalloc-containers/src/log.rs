//! Pluggable, allocation-free diagnostics for the containers.
//!
//! The crate never decides where output goes. A host registers a sink with
//! [`set_log_fn`] (a serial port writer, a ring of log records, `eprintln!`
//! in tests) and picks the most verbose level it wants with
//! [`set_max_level`]. Before a sink is registered every record is discarded,
//! and records above the maximum level are never formatted.
//!
//! The containers only report rare events: capacity rejections at
//! [`LogLevel::Trace`] and failed bounded constructions at
//! [`LogLevel::Debug`]. Successful hot-path operations are silent.

use core::fmt;
use core::sync::atomic::{AtomicPtr, AtomicU8, Ordering};

// ---------------------------------------------------------------------------
// Log levels, lower = more severe
// ---------------------------------------------------------------------------

/// Severity of a diagnostic record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[repr(u8)]
pub enum LogLevel {
    /// Something failed and the caller is likely to notice.
    Error = 0,
    /// Unexpected condition, not necessarily an error.
    Warn = 1,
    /// High-level progress messages.
    Info = 2,
    /// Detailed diagnostic information.
    Debug = 3,
    /// Very verbose, per-operation detail.
    Trace = 4,
}

impl LogLevel {
    /// Returns the human-readable name (fixed-width for aligned output).
    pub const fn name(self) -> &'static str {
        match self {
            Self::Error => "ERROR",
            Self::Warn => "WARN ",
            Self::Info => "INFO ",
            Self::Debug => "DEBUG",
            Self::Trace => "TRACE",
        }
    }

    const fn from_u8(raw: u8) -> Self {
        match raw {
            0 => Self::Error,
            1 => Self::Warn,
            2 => Self::Info,
            3 => Self::Debug,
            _ => Self::Trace,
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name().trim_end())
    }
}

// ---------------------------------------------------------------------------
// Sink registration
// ---------------------------------------------------------------------------

/// The signature of the global log sink.
pub type LogFn = fn(LogLevel, fmt::Arguments<'_>);

fn null_log(_level: LogLevel, _args: fmt::Arguments<'_>) {}

static LOG_FN: AtomicPtr<()> = AtomicPtr::new(null_log as *mut ());
static MAX_LEVEL: AtomicU8 = AtomicU8::new(LogLevel::Trace as u8);

/// Registers the global log sink, replacing any previous one.
///
/// The sink may be called from any context in which a container is used,
/// so it must not itself push into the container that is reporting.
pub fn set_log_fn(f: LogFn) {
    LOG_FN.store(f as *mut (), Ordering::Release);
}

/// Removes the registered sink. Subsequent records are discarded.
pub fn clear_log_fn() {
    set_log_fn(null_log);
}

/// Sets the most verbose level that reaches the sink.
pub fn set_max_level(level: LogLevel) {
    MAX_LEVEL.store(level as u8, Ordering::Relaxed);
}

/// Returns the most verbose level that reaches the sink.
#[must_use]
pub fn max_level() -> LogLevel {
    LogLevel::from_u8(MAX_LEVEL.load(Ordering::Relaxed))
}

/// Returns `true` if a record at `level` would be delivered.
#[inline]
#[must_use]
pub fn enabled(level: LogLevel) -> bool {
    level as u8 <= MAX_LEVEL.load(Ordering::Relaxed)
}

#[inline]
fn load_log_fn() -> LogFn {
    let ptr = LOG_FN.load(Ordering::Acquire);
    // SAFETY: Only `LogFn` pointers (including `null_log`) are ever stored
    // into LOG_FN, by `set_log_fn`.
    unsafe { core::mem::transmute::<*mut (), LogFn>(ptr) }
}

/// Implementation detail of the logging macros. Not public API.
#[doc(hidden)]
pub fn _log(level: LogLevel, args: fmt::Arguments<'_>) {
    if enabled(level) {
        load_log_fn()(level, args);
    }
}

// ---------------------------------------------------------------------------
// Crate-internal macros
// ---------------------------------------------------------------------------

macro_rules! log {
    ($level:expr, $($arg:tt)*) => {
        $crate::log::_log($level, format_args!($($arg)*))
    };
}

macro_rules! debug {
    ($($arg:tt)*) => { $crate::log::log!($crate::log::LogLevel::Debug, $($arg)*) };
}

macro_rules! trace {
    ($($arg:tt)*) => { $crate::log::log!($crate::log::LogLevel::Trace, $($arg)*) };
}

pub(crate) use {debug, log, trace};
