//! # autodoc-telemetry
//!
//! Structured logging for autodoc built on `tracing`.
//!
//! ```rust
//! use autodoc_telemetry::{LogFormat, info, init_telemetry};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     init_telemetry("autodoc", LogFormat::Pretty)?;
//!     info!("ready");
//!     Ok(())
//! }
//! ```

pub mod init;
pub mod spans;

// Re-export tracing macros for convenience
pub use tracing::{Instrument, Span, debug, error, info, instrument, trace, warn};

pub use init::{DEFAULT_FILTER, LogFormat, TelemetryError, env_filter, init_telemetry};
pub use spans::pipeline_run_span;
