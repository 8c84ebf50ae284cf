//! Stderr logger for the `log` facade
//!
//! Library code logs through `log::info!` and friends; the binary installs
//! this logger once at startup with the configured `LogLevel`.

use log::{LevelFilter, Log, Metadata, Record, SetLoggerError};

/// Log verbosity, numbered the same way as the `loglevel` config key
#[repr(i32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub enum LogLevel {
    Nothing = 0,
    User = 1,
    Error = 2,
    Warning = 3,
    #[default]
    Info = 4,
    Debug = 5,
    All = 6,
}

impl LogLevel {
    /// Create a LogLevel from an integer; out-of-range values mean `Info`
    pub fn from_i32(level: i32) -> Self {
        match level {
            0 => LogLevel::Nothing,
            1 => LogLevel::User,
            2 => LogLevel::Error,
            3 => LogLevel::Warning,
            4 => LogLevel::Info,
            5 => LogLevel::Debug,
            6 => LogLevel::All,
            _ => LogLevel::Info,
        }
    }

    pub fn as_i32(&self) -> i32 {
        *self as i32
    }

    /// Parse either a number (`0`-`6`) or a name (`warning`, `debug`, ...).
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        if let Ok(n) = s.parse::<i32>() {
            return (0..=6).contains(&n).then(|| Self::from_i32(n));
        }
        match s.to_ascii_lowercase().as_str() {
            "nothing" | "off" => Some(LogLevel::Nothing),
            "user" => Some(LogLevel::User),
            "error" => Some(LogLevel::Error),
            "warning" | "warn" => Some(LogLevel::Warning),
            "info" => Some(LogLevel::Info),
            "debug" => Some(LogLevel::Debug),
            "all" | "trace" => Some(LogLevel::All),
            _ => None,
        }
    }

    pub fn filter(&self) -> LevelFilter {
        match self {
            LogLevel::Nothing => LevelFilter::Off,
            LogLevel::User | LogLevel::Error => LevelFilter::Error,
            LogLevel::Warning => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::All => LevelFilter::Trace,
        }
    }
}

struct StderrLogger;

static LOGGER: StderrLogger = StderrLogger;

impl Log for StderrLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            eprintln!("[{:<5} {}] {}", record.level(), record.target(), record.args());
        }
    }

    fn flush(&self) {}
}

/// Install the stderr logger. Fails if a logger is already installed.
pub fn init(level: LogLevel) -> Result<(), SetLoggerError> {
    log::set_logger(&LOGGER)?;
    set_level(level);
    Ok(())
}

/// Change verbosity after `init`, e.g. once the config file has been read.
pub fn set_level(level: LogLevel) {
    log::set_max_level(level.filter());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_level_from_i32() {
        assert_eq!(LogLevel::from_i32(0), LogLevel::Nothing);
        assert_eq!(LogLevel::from_i32(3), LogLevel::Warning);
        assert_eq!(LogLevel::from_i32(6), LogLevel::All);
        assert_eq!(LogLevel::from_i32(100), LogLevel::Info);
        assert_eq!(LogLevel::from_i32(-1), LogLevel::Info);
    }

    #[test]
    fn test_log_level_as_i32() {
        assert_eq!(LogLevel::Nothing.as_i32(), 0);
        assert_eq!(LogLevel::Debug.as_i32(), 5);
    }

    #[test]
    fn test_log_level_parse() {
        assert_eq!(LogLevel::parse("debug"), Some(LogLevel::Debug));
        assert_eq!(LogLevel::parse(" WARN "), Some(LogLevel::Warning));
        assert_eq!(LogLevel::parse("2"), Some(LogLevel::Error));
        assert_eq!(LogLevel::parse("9"), None);
        assert_eq!(LogLevel::parse("loud"), None);
    }

    #[test]
    fn test_log_level_filter() {
        assert_eq!(LogLevel::Nothing.filter(), LevelFilter::Off);
        assert_eq!(LogLevel::User.filter(), LevelFilter::Error);
        assert_eq!(LogLevel::All.filter(), LevelFilter::Trace);
    }

    #[test]
    fn test_log_level_default_is_info() {
        assert_eq!(LogLevel::default(), LogLevel::Info);
        assert_eq!(LogLevel::default().filter(), LevelFilter::Info);
    }

    #[test]
    fn test_init_then_set_level() {
        init(LogLevel::Warning).unwrap();
        assert_eq!(log::max_level(), LevelFilter::Warn);
        assert!(log::log_enabled!(log::Level::Warn));

        set_level(LogLevel::Debug);
        assert_eq!(log::max_level(), LevelFilter::Debug);

        // Only one logger per process
        assert!(init(LogLevel::Info).is_err());
    }
}
