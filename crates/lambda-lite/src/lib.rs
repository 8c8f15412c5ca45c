//! # lambda-lite
//!
//! Lightweight typed request handlers for serverless HTTP events.
//!
//! A handler declares a request body type `B` and a result type `R`,
//! registers one hook per HTTP method, and lets the framework do the
//! rest: decode the body, encode the result, answer 405 for methods
//! without a hook and 500 for anything that goes wrong inside one.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use lambda_lite::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), LambdaLiteError> {
//!     telemetry::init()?;
//!
//!     let handler = LambdaHandler::<String, String>::builder()
//!         .post(|body: Option<String>| Ok::<_, BoxError>(body))
//!         .build();
//!
//!     runner::run_stdio(Arc::new(handler), RunnerConfig::default()).await?;
//!     Ok(())
//! }
//! ```

mod error;
pub mod runner;
pub mod telemetry;

pub use error::LambdaLiteError;

/// Everything a handler crate usually needs.
pub mod prelude {
    pub use lambda_lite_core::util::{has_length, has_text, is_empty, message, not_null};
    pub use lambda_lite_core::{CoreError, Event, MediaType, Method, Response, Status};
    pub use lambda_lite_json::{
        BoxError, FailureKind, Format, HandlerConfig, HandlerError, Invocation,
        LambdaHandler, LambdaHandlerBuilder,
    };

    pub use crate::runner::{self, RunnerConfig};
    pub use crate::telemetry;
    pub use crate::LambdaLiteError;
}
