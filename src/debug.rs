//! Debug logging infrastructure for gofont
//!
//! Everything logged through the `log` facade, and through the category
//! macros below, lands in one file:
//! `$TMPDIR/gofont_debug.log` (`/tmp/gofont_debug.log` on most Unix systems).
//! When `RUST_LOG` is set the same lines are mirrored to stderr.
//!
//! Level precedence: `--log-level` CLI flag, then `RUST_LOG`, then the
//! config file's `log_level` (applied through [`set_level`] once the
//! config has been loaded). `DEBUG_LEVEL=0..4` is still honoured as the
//! starting level for the category macros.

use parking_lot::Mutex;
use std::fmt;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;
use std::sync::OnceLock;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

/// Debug level configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum DebugLevel {
    Off = 0,
    Error = 1,
    Info = 2,
    Debug = 3,
    Trace = 4,
}

impl DebugLevel {
    fn from_env() -> Self {
        match std::env::var("DEBUG_LEVEL") {
            Ok(val) => match val.trim().parse::<u8>() {
                Ok(1) => DebugLevel::Error,
                Ok(2) => DebugLevel::Info,
                Ok(3) => DebugLevel::Debug,
                Ok(4) => DebugLevel::Trace,
                _ => DebugLevel::Off,
            },
            Err(_) => DebugLevel::Off,
        }
    }

    fn from_filter(filter: log::LevelFilter) -> Self {
        match filter {
            log::LevelFilter::Off => DebugLevel::Off,
            log::LevelFilter::Error => DebugLevel::Error,
            log::LevelFilter::Warn | log::LevelFilter::Info => DebugLevel::Info,
            log::LevelFilter::Debug => DebugLevel::Debug,
            log::LevelFilter::Trace => DebugLevel::Trace,
        }
    }
}

/// Location of the debug log file.
pub fn log_path() -> PathBuf {
    #[cfg(unix)]
    {
        PathBuf::from("/tmp/gofont_debug.log")
    }
    #[cfg(not(unix))]
    {
        std::env::temp_dir().join("gofont_debug.log")
    }
}

/// Global debug logger
struct DebugLogger {
    level: DebugLevel,
    file: Option<std::fs::File>,
    mirror_stderr: bool,
}

impl DebugLogger {
    fn new() -> Self {
        let mut logger = DebugLogger {
            level: DebugLevel::from_env(),
            file: None,
            mirror_stderr: false,
        };
        if logger.level != DebugLevel::Off {
            logger.open_file();
        }
        logger
    }

    /// Open (and truncate) the log file once; failures are silent so logging
    /// never interferes with normal output.
    fn open_file(&mut self) {
        if self.file.is_some() {
            return;
        }
        if let Ok(f) = OpenOptions::new()
            .write(true)
            .truncate(true)
            .create(true)
            .open(log_path())
        {
            self.file = Some(f);
            self.write_raw(&format!(
                "\n{}\ngofont debug session started at {} (level={:?})\n{}\n",
                "=".repeat(80),
                get_timestamp(),
                self.level,
                "=".repeat(80)
            ));
        }
    }

    fn write_raw(&mut self, msg: &str) {
        if let Some(ref mut file) = self.file {
            let _ = file.write_all(msg.as_bytes());
            let _ = file.flush();
        }
        if self.mirror_stderr {
            eprint!("{msg}");
        }
    }

    fn log(&mut self, level: DebugLevel, category: &str, msg: &str) {
        if level <= self.level {
            let level_str = match level {
                DebugLevel::Error => "ERROR",
                DebugLevel::Info => "INFO ",
                DebugLevel::Debug => "DEBUG",
                DebugLevel::Trace => "TRACE",
                DebugLevel::Off => return,
            };
            self.write_raw(&format!(
                "[{}] [{}] [{}] {}\n",
                get_timestamp(),
                level_str,
                category,
                msg
            ));
        }
    }
}

static LOGGER: OnceLock<Mutex<DebugLogger>> = OnceLock::new();

/// Set once the CLI flag or `RUST_LOG` picked a level.
static LEVEL_PINNED: AtomicBool = AtomicBool::new(false);

fn get_logger() -> &'static Mutex<DebugLogger> {
    LOGGER.get_or_init(|| Mutex::new(DebugLogger::new()))
}

fn get_timestamp() -> String {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default();
    format!("{}.{:06}", now.as_secs(), now.subsec_micros())
}

/// Check if debugging is enabled at given level
pub fn is_enabled(level: DebugLevel) -> bool {
    let logger = get_logger().lock();
    level <= logger.level
}

/// Log a message at specified level
pub fn log(level: DebugLevel, category: &str, msg: &str) {
    let mut logger = get_logger().lock();
    logger.log(level, category, msg);
}

/// Log formatted message
pub fn logf(level: DebugLevel, category: &str, args: fmt::Arguments) {
    if is_enabled(level) {
        log(level, category, &format!("{}", args));
    }
}

/// `log::Log` implementation writing into the debug log file.
struct LogBridge;

impl log::Log for LogBridge {
    fn enabled(&self, metadata: &log::Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &log::Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let line = format!(
            "[{}] [{:<5}] [{}] {}\n",
            get_timestamp(),
            record.level(),
            record.target(),
            record.args()
        );
        get_logger().lock().write_raw(&line);
    }

    fn flush(&self) {
        if let Some(ref mut file) = get_logger().lock().file {
            let _ = file.flush();
        }
    }
}

static BRIDGE: LogBridge = LogBridge;

fn parse_rust_log(value: &str) -> Option<log::LevelFilter> {
    // Only a bare level is understood; per-module directives fall back to info.
    let value = value.trim();
    if value.is_empty() {
        return None;
    }
    Some(value.parse().unwrap_or(log::LevelFilter::Info))
}

fn apply_level(filter: log::LevelFilter) {
    {
        let mut logger = get_logger().lock();
        logger.level = logger.level.max(DebugLevel::from_filter(filter));
        if filter != log::LevelFilter::Off {
            logger.open_file();
        }
    }
    log::set_max_level(filter);
}

/// Route the `log` facade into the debug log file.
///
/// `cli_level` wins over `RUST_LOG`; without either, logging stays off until
/// [`set_level`] is called with the configured level.
pub fn init_log_bridge(cli_level: Option<log::LevelFilter>) {
    let rust_log = std::env::var("RUST_LOG").ok();
    let env_level = rust_log.as_deref().and_then(parse_rust_log);

    get_logger().lock().mirror_stderr = rust_log.is_some();

    if log::set_logger(&BRIDGE).is_err() {
        // Another logger is installed (tests); leave it alone.
        return;
    }

    match cli_level.or(env_level) {
        Some(level) => {
            LEVEL_PINNED.store(true, Ordering::SeqCst);
            apply_level(level);
        }
        None => log::set_max_level(log::LevelFilter::Off),
    }
}

/// Apply the configured level unless the CLI flag or `RUST_LOG` chose one.
pub fn set_level(level: log::LevelFilter) {
    if LEVEL_PINNED.load(Ordering::SeqCst) {
        return;
    }
    apply_level(level);
}

// Convenience macros for logging
#[macro_export]
macro_rules! debug_error {
    ($category:expr, $($arg:tt)*) => {
        $crate::debug::logf($crate::debug::DebugLevel::Error, $category, format_args!($($arg)*))
    };
}

#[macro_export]
macro_rules! debug_info {
    ($category:expr, $($arg:tt)*) => {
        $crate::debug::logf($crate::debug::DebugLevel::Info, $category, format_args!($($arg)*))
    };
}

#[macro_export]
macro_rules! debug_log {
    ($category:expr, $($arg:tt)*) => {
        $crate::debug::logf($crate::debug::DebugLevel::Debug, $category, format_args!($($arg)*))
    };
}

#[macro_export]
macro_rules! debug_trace {
    ($category:expr, $($arg:tt)*) => {
        $crate::debug::logf($crate::debug::DebugLevel::Trace, $category, format_args!($($arg)*))
    };
}
