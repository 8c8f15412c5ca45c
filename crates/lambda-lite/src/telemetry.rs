//! Tracing setup for binaries built on lambda-lite.

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::LambdaLiteError;

/// Filter used when `RUST_LOG` is unset or invalid.
pub const DEFAULT_FILTER: &str = "lambda_lite=info";

/// Installs a global subscriber: `RUST_LOG` filtering, formatted output
/// on stderr. Stdout is left alone because the runner writes responses
/// there.
///
/// # Errors
/// Returns [`LambdaLiteError::Telemetry`] if a global subscriber is
/// already set.
pub fn init() -> Result<(), LambdaLiteError> {
    init_with(DEFAULT_FILTER)
}

/// Like [`init`], with a custom fallback filter directive.
pub fn init_with(default_filter: &str) -> Result<(), LambdaLiteError> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init()
        .map_err(|e| LambdaLiteError::Telemetry(e.to_string()))
}
