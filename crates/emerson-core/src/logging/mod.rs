//! Diagnostic logging for the page behaviors.
//!
//! Behavior code only uses `tracing` macros. Where the events end up is
//! decided by the [`LogSink`] behind a [`ConsoleLayer`]:
//!
//! - the browser build forwards to the devtools console,
//! - tests collect lines in a [`MemorySink`],
//! - the CLI uses `tracing_subscriber::fmt` directly.
//!
//! ## Usage
//!
//! ```ignore
//! use emerson_core::logging::{ConsoleLayer, MemorySink};
//! use tracing_subscriber::prelude::*;
//!
//! let subscriber = tracing_subscriber::registry()
//!     .with(tracing_subscriber::EnvFilter::new("emerson_core=debug"))
//!     .with(ConsoleLayer::new(MemorySink::new()));
//! tracing::subscriber::set_global_default(subscriber)?;
//! ```

pub mod entry;
pub mod layer;

use std::sync::Mutex;

pub use entry::LogLine;
pub use layer::ConsoleLayer;

/// Destination for formatted log lines.
pub trait LogSink: Send + Sync {
    fn write(&self, line: &LogLine);
}

/// Keeps every line in memory.
#[derive(Debug, Default)]
pub struct MemorySink {
    lines: Mutex<Vec<LogLine>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of all captured lines.
    pub fn lines(&self) -> Vec<LogLine> {
        self.lines.lock().map(|lines| lines.clone()).unwrap_or_default()
    }

    /// Captured lines at `level` ("error", "warn", ...).
    pub fn at_level(&self, level: &str) -> Vec<LogLine> {
        self.lines()
            .into_iter()
            .filter(|line| line.level == level)
            .collect()
    }

    pub fn clear(&self) {
        if let Ok(mut lines) = self.lines.lock() {
            lines.clear();
        }
    }
}

impl LogSink for MemorySink {
    fn write(&self, line: &LogLine) {
        if let Ok(mut lines) = self.lines.lock() {
            lines.push(line.clone());
        }
    }
}

/// Map a `-v` count to a filter directive for the emerson crates.
pub fn verbosity_filter(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info,emerson_core=info",
        2 => "info,emerson_core=debug",
        _ => "debug,emerson_core=trace",
    }
}
