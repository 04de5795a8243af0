//! Subscriber initialization

use std::str::FromStr;
use std::sync::Once;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

static INIT: Once = Once::new();

/// Filter used when `RUST_LOG` is unset.
pub const DEFAULT_FILTER: &str = "info";

#[derive(Debug, thiserror::Error)]
pub enum TelemetryError {
    #[error("Invalid log filter: {0}")]
    Filter(String),

    #[error("Unknown log format '{0}', expected 'pretty' or 'json'")]
    Format(String),
}

/// Output style of the console layer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

impl FromStr for LogFormat {
    type Err = TelemetryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "pretty" => Ok(LogFormat::Pretty),
            "json" => Ok(LogFormat::Json),
            other => Err(TelemetryError::Format(other.to_string())),
        }
    }
}

/// `RUST_LOG` when set, [`DEFAULT_FILTER`] otherwise.
pub fn env_filter() -> Result<EnvFilter, TelemetryError> {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(DEFAULT_FILTER))
        .map_err(|e| TelemetryError::Filter(e.to_string()))
}

/// Install the global subscriber. Later calls are no-ops.
///
/// Logs go to stderr so they never interleave with console progress on stdout.
///
/// # Example
/// ```no_run
/// use autodoc_telemetry::{LogFormat, init_telemetry};
/// init_telemetry("autodoc", LogFormat::Pretty).expect("telemetry");
/// ```
pub fn init_telemetry(service_name: &str, format: LogFormat) -> Result<(), TelemetryError> {
    let filter = env_filter()?;

    INIT.call_once(|| {
        let registry = tracing_subscriber::registry().with(filter);
        let installed = match format {
            LogFormat::Pretty => registry
                .with(
                    tracing_subscriber::fmt::layer()
                        .with_writer(std::io::stderr)
                        .with_target(true)
                        .with_line_number(true),
                )
                .try_init(),
            LogFormat::Json => registry
                .with(
                    tracing_subscriber::fmt::layer()
                        .json()
                        .with_writer(std::io::stderr)
                        .with_current_span(true),
                )
                .try_init(),
        };

        match installed {
            Ok(()) => {
                tracing::debug!(service.name = service_name, ?format, "Telemetry initialized")
            }
            Err(e) => eprintln!("telemetry already initialized elsewhere: {e}"),
        }
    });

    Ok(())
}
