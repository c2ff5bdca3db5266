//! Process-wide logging for the strategy lifecycle.
//!
//! Components only emit `tracing` events; the binary installs the
//! subscriber once at startup.

mod logging;

pub use logging::{setup_logging, LogFormat};
pub use tracing_appender::non_blocking::WorkerGuard;
