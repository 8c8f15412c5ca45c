//! Error types for the typed handler layer.
//!
//! Every failure a hook can run into ends up as a [`HandlerError`]. The
//! dispatcher turns all of them into the same bodiless 500, so the
//! distinctions here exist for logs, not for callers.

use std::error::Error as StdError;
use std::fmt;

use lambda_lite_core::CoreError;

/// Boxed error produced by business logic.
pub type BoxError = Box<dyn StdError + Send + Sync>;

/// Errors that can occur while a hook runs.
#[derive(Debug, thiserror::Error)]
pub enum HandlerError {
    /// The request body could not be decoded into the handler's body type.
    ///
    /// `type_name` is the fully qualified Rust type name, so the message
    /// reads e.g. "Failed to extract my_app::Order from request body: ...".
    #[error("Failed to extract {type_name} from request body: {source}")]
    Extract {
        type_name: &'static str,
        #[source]
        source: serde_json::Error,
    },

    /// A result value could not be encoded into the response body.
    #[error("Failed to write {type_name} to response body: {source}")]
    Encode {
        type_name: &'static str,
        #[source]
        source: serde_json::Error,
    },

    /// Business logic rejected the request.
    #[error("request rejected: {0}")]
    Logic(#[source] BoxError),

    /// The hook panicked. Carries the panic message when it was a string.
    #[error("hook panicked: {0}")]
    Panicked(String),
}

impl HandlerError {
    /// Wraps any business-logic error.
    pub fn logic(err: impl Into<BoxError>) -> Self {
        Self::Logic(err.into())
    }

    /// Which stage of the invocation failed.
    pub fn kind(&self) -> FailureKind {
        match self {
            Self::Extract { .. } => FailureKind::Extraction,
            Self::Encode { .. } => FailureKind::Encoding,
            Self::Logic(_) | Self::Panicked(_) => FailureKind::Logic,
        }
    }
}

impl From<CoreError> for HandlerError {
    fn from(err: CoreError) -> Self {
        Self::Logic(Box::new(err))
    }
}

// ---------------------------------------------------------------------------
// FailureKind
// ---------------------------------------------------------------------------

/// The stage at which an invocation left the happy path.
///
/// Only used as a structured field in logs. Externally a routing miss is
/// a 405 and the three failure stages are all a 500.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FailureKind {
    /// No hook is registered for the method.
    RoutingMiss,
    /// Decoding the request body failed.
    Extraction,
    /// The hook's own logic failed.
    Logic,
    /// Encoding the result failed.
    Encoding,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RoutingMiss => write!(f, "routing_miss"),
            Self::Extraction => write!(f, "extraction"),
            Self::Logic => write!(f, "logic"),
            Self::Encoding => write!(f, "encoding"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_message_names_type_and_cause() {
        let source = serde_json::from_str::<u32>("nope").unwrap_err();
        let err = HandlerError::Extract {
            type_name: "my_app::Order",
            source,
        };
        let text = err.to_string();
        assert!(text.starts_with(
            "Failed to extract my_app::Order from request body: "
        ));
        assert!(err.source().is_some());
        assert_eq!(err.kind(), FailureKind::Extraction);
    }

    #[test]
    fn test_from_core_error_is_logic() {
        let err: HandlerError =
            CoreError::IllegalArgument("name is empty".into()).into();
        assert_eq!(err.kind(), FailureKind::Logic);
        assert!(err.to_string().contains("name is empty"));
    }

    #[test]
    fn test_logic_accepts_strings() {
        let err = HandlerError::logic("bad value");
        assert!(matches!(err, HandlerError::Logic(_)));
        assert_eq!(err.to_string(), "request rejected: bad value");
    }

    #[test]
    fn test_panicked_is_logic_kind() {
        assert_eq!(
            HandlerError::Panicked("boom".into()).kind(),
            FailureKind::Logic
        );
    }

    #[test]
    fn test_failure_kind_display() {
        assert_eq!(FailureKind::RoutingMiss.to_string(), "routing_miss");
        assert_eq!(FailureKind::Encoding.to_string(), "encoding");
    }
}
