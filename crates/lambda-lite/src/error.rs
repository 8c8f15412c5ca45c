//! Unified error type for lambda-lite.

use lambda_lite_core::CoreError;
use lambda_lite_json::HandlerError;

/// Everything that can stop a lambda-lite binary outright.
///
/// Failures inside a single invocation never get here: the handler turns
/// them into a 500 response. This type covers what is left, such as
/// losing stdin/stdout under the runner or installing a second tracing
/// subscriber.
#[derive(Debug, thiserror::Error)]
pub enum LambdaLiteError {
    /// A core-level error (unknown method, failed assertion).
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A handler-level error (extract, encode, logic).
    #[error(transparent)]
    Handler(#[from] HandlerError),

    /// Reading events or writing responses failed.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// A response could not be serialized for output.
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// A global tracing subscriber was already installed.
    #[error("failed to initialize tracing: {0}")]
    Telemetry(String),
}
