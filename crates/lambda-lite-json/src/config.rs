//! Handler configuration.

/// Configuration for a [`LambdaHandler`](crate::LambdaHandler).
///
/// Fixed at build time and shared by every invocation of the handler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HandlerConfig {
    /// Pretty-print JSON response bodies. Off by default: the platform
    /// forwards the body as-is, so compact output is cheaper.
    pub pretty_json: bool,

    /// Treat a panicking hook like a failing one and answer 500.
    ///
    /// Has no effect when the binary is built with `panic = "abort"`.
    pub catch_panics: bool,
}

impl Default for HandlerConfig {
    fn default() -> Self {
        Self {
            pretty_json: false,
            catch_panics: true,
        }
    }
}
