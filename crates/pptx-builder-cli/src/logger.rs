use chrono::Local;
use log::{Level, LevelFilter, Metadata, Record};
use std::io::Write;

/// Writes `HH:MM:SS LEVEL: message` lines to stderr
#[derive(Clone)]
pub struct CliLogger {
    max_level: LevelFilter,
}

impl CliLogger {
    pub fn new(max_level: LevelFilter) -> Self {
        Self { max_level }
    }

    /// Level for the `--quiet` / `--verbose` flags
    pub fn level_for(quiet: bool, verbose: bool) -> LevelFilter {
        if verbose {
            LevelFilter::Debug
        } else if quiet {
            LevelFilter::Error
        } else {
            LevelFilter::Warn
        }
    }

    pub fn init(self) -> Result<(), log::SetLoggerError> {
        let max_level = self.max_level;
        log::set_boxed_logger(Box::new(self))?;
        log::set_max_level(max_level);
        Ok(())
    }
}

impl log::Log for CliLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.max_level
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }

        let mut stderr = std::io::stderr().lock();
        let timestamp = Local::now().format("%H:%M:%S");
        // Debug lines carry their origin, everything else stays short
        let _ = if record.level() >= Level::Debug {
            writeln!(
                stderr,
                "{} {}: [{}] {}",
                timestamp,
                record.level(),
                record.target(),
                record.args()
            )
        } else {
            writeln!(stderr, "{} {}: {}", timestamp, record.level(), record.args())
        };
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}
