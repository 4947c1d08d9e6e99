// ABOUTME: Public API for taglet logging infrastructure using tokio-tracing
// ABOUTME: Provides centralized configuration and initialization for structured logging

pub mod config;
pub mod layers;
pub mod performance;
pub mod subscriber;

// Re-export tracing macros for convenience
pub use tracing::{Level, Span, debug, error, info, instrument, span, trace, warn};

pub use config::{ConsoleFormat, LoggingConfig};
pub use performance::{PerfStats, PerfTimer};
pub use subscriber::{LoggingGuard, init_subscriber};
