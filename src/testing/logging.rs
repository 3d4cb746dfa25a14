//! In-memory logger for asserting on emitted log lines
//!
//! The `log` facade accepts a single global logger per process, so
//! [`CapturingLogger::install`] registers it once and every later call is a
//! no-op. Tests running in parallel share the buffer; filter records by a
//! value unique to the test.

use std::sync::{Mutex, PoisonError};

/// A log record as seen by [`CapturingLogger`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapturedLog {
    pub level: log::Level,
    pub target: String,
    pub message: String,
}

pub struct CapturingLogger {
    records: Mutex<Vec<CapturedLog>>,
}

static LOGGER: CapturingLogger = CapturingLogger {
    records: Mutex::new(Vec::new()),
};

impl CapturingLogger {
    /// Install the capturing logger at `Trace` level and return it
    #[must_use]
    pub fn install() -> &'static Self {
        if log::set_logger(&LOGGER).is_ok() {
            log::set_max_level(log::LevelFilter::Trace);
        }
        &LOGGER
    }

    /// Captured records whose message contains `needle`
    #[must_use]
    pub fn records_containing(&self, needle: &str) -> Vec<CapturedLog> {
        self.records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .filter(|record| record.message.contains(needle))
            .cloned()
            .collect()
    }
}

impl log::Log for CapturingLogger {
    fn enabled(&self, metadata: &log::Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &log::Record) {
        if !self.enabled(record.metadata()) {
            return;
        }

        self.records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(CapturedLog {
                level: record.level(),
                target: record.target().to_string(),
                message: record.args().to_string(),
            });
    }

    fn flush(&self) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_records_are_captured_and_filtered() {
        let logger = CapturingLogger::install();
        log::warn!("capture-check-7f3a first");
        log::info!("capture-check-7f3a second");
        log::info!("unrelated line");

        let records = logger.records_containing("capture-check-7f3a");
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].level, log::Level::Warn);
        assert_eq!(records[0].message, "capture-check-7f3a first");
        assert_eq!(records[1].level, log::Level::Info);
        assert!(records[0].target.starts_with("suitegate"));
    }
}
