//! Browser implementations of the domain logging ports.

use crate::domain::logging::{LogEntry, LogLevel, Logger, TimeProvider};
use std::sync::Mutex;

/// Console logger implementation for WASM environment
pub struct ConsoleLogger {
    min_level: LogLevel,
}

impl ConsoleLogger {
    pub fn new(min_level: LogLevel) -> Self {
        Self { min_level }
    }

    pub fn new_production() -> Self {
        Self::new(LogLevel::Info)
    }

    pub fn new_development() -> Self {
        Self::new(LogLevel::Debug)
    }

    pub fn min_level(&self) -> LogLevel {
        self.min_level
    }
}

impl Logger for ConsoleLogger {
    fn log(&self, entry: LogEntry) {
        if entry.level < self.min_level {
            return;
        }
        let formatted = entry.format();
        match entry.level {
            LogLevel::Trace | LogLevel::Debug => web_sys::console::debug_1(&formatted.into()),
            LogLevel::Info => web_sys::console::info_1(&formatted.into()),
            LogLevel::Warn => web_sys::console::warn_1(&formatted.into()),
            LogLevel::Error => web_sys::console::error_1(&formatted.into()),
        }
    }
}

/// Wall-clock time from `Date.now()`, formatted as `HH:MM:SS.mmm`.
#[derive(Default)]
pub struct BrowserTimeProvider;

impl BrowserTimeProvider {
    pub fn new() -> Self {
        Self
    }
}

impl TimeProvider for BrowserTimeProvider {
    fn current_timestamp(&self) -> u64 {
        js_sys::Date::now() as u64
    }

    fn format_timestamp(&self, timestamp: u64) -> String {
        let date = js_sys::Date::new(&(timestamp as f64).into());
        format!(
            "{:02}:{:02}:{:02}.{:03}",
            date.get_hours(),
            date.get_minutes(),
            date.get_seconds(),
            date.get_milliseconds()
        )
    }
}

/// Keeps formatted entries in memory so tests can assert on what was logged.
#[derive(Default)]
pub struct MemoryLogger {
    min_level: Option<LogLevel>,
    lines: Mutex<Vec<(LogLevel, String)>>,
}

impl MemoryLogger {
    pub fn new(min_level: LogLevel) -> Self {
        Self { min_level: Some(min_level), lines: Mutex::new(Vec::new()) }
    }

    pub fn lines(&self) -> Vec<String> {
        match self.lines.lock() {
            Ok(lines) => lines.iter().map(|(_, line)| line.clone()).collect(),
            Err(poisoned) => poisoned.into_inner().iter().map(|(_, line)| line.clone()).collect(),
        }
    }

    pub fn count_at(&self, level: LogLevel) -> usize {
        self.lines
            .lock()
            .map(|lines| lines.iter().filter(|(l, _)| *l == level).count())
            .unwrap_or(0)
    }
}

impl Logger for MemoryLogger {
    fn log(&self, entry: LogEntry) {
        if self.min_level.is_some_and(|min| entry.level < min) {
            return;
        }
        if let Ok(mut lines) = self.lines.lock() {
            lines.push((entry.level, entry.format()));
        }
    }
}
