use core::fmt::Write;

use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError};

use crate::serial;

/// `Log` implementation for COM1
pub struct SerialLogger;

impl Log for SerialLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= Self::LEVEL
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        // Nowhere to report a failed serial write.
        let _ = writeln!(
            serial::Writer,
            "[{}:{}] {}: {}",
            record.file().unwrap_or("???"),
            record.line().unwrap_or(0),
            record.level(),
            record.args()
        );
    }

    fn flush(&self) {}
}

/// The static logger
pub static LOGGER: SerialLogger = SerialLogger;

impl SerialLogger {
    #[cfg(debug_assertions)]
    const LEVEL: Level = Level::Trace;
    #[cfg(debug_assertions)]
    const LEVEL_FILTER: LevelFilter = LevelFilter::Trace;

    #[cfg(not(debug_assertions))]
    const LEVEL: Level = Level::Info;
    #[cfg(not(debug_assertions))]
    const LEVEL_FILTER: LevelFilter = LevelFilter::Info;

    /// Bring up COM1 and install the logger
    pub fn init(&'static self) -> Result<(), SetLoggerError> {
        serial::init();
        log::set_logger(self)?;
        log::set_max_level(Self::LEVEL_FILTER);
        Ok(())
    }
}
