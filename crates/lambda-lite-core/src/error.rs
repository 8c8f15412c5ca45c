//! Error types for the core layer.
//!
//! Each crate in lambda-lite defines its own error enum. A `CoreError`
//! always points at bad input to a helper (an unknown method name, a
//! failed assertion, a broken message template), never at decoding.

/// Errors that can occur in the core layer.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CoreError {
    /// The string is not one of the known HTTP methods.
    #[error("unknown HTTP method: {0}")]
    UnknownMethod(String),

    /// An assertion helper rejected its argument.
    ///
    /// The payload is the fully formatted message supplied by the caller,
    /// printed verbatim.
    #[error("{0}")]
    IllegalArgument(String),

    /// A message template has more `%s` specifiers than arguments.
    #[error("Format specifier '{0}'")]
    MissingFormatArgument(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_illegal_argument_prints_message_verbatim() {
        let err = CoreError::IllegalArgument("Instance <null> is empty".into());
        assert_eq!(err.to_string(), "Instance <null> is empty");
    }

    #[test]
    fn test_missing_format_argument_message() {
        let err = CoreError::MissingFormatArgument("%s".into());
        assert_eq!(err.to_string(), "Format specifier '%s'");
    }

    #[test]
    fn test_unknown_method_message() {
        let err = CoreError::UnknownMethod("BREW".into());
        assert!(err.to_string().contains("BREW"));
    }
}
