//! Typed JSON request handlers for lambda-lite.
//!
//! This crate is where an opaque [`Event`](lambda_lite_core::Event) becomes
//! a typed value and a typed result becomes a
//! [`Response`](lambda_lite_core::Response):
//!
//! - **Dispatch** ([`LambdaHandler`], [`LambdaHandlerBuilder`]) — one hook
//!   per HTTP method, 405 for the rest, 500 for anything a hook fails at.
//! - **Codecs** ([`BodyReader`], [`BodyWriter`], [`Format`]) — raw text
//!   passthrough for `String`, `serde_json` for everything else.
//! - **Cache** ([`CodecCache`]) — readers and writers built once per type
//!   and shared by every invocation of a handler.
//! - **Errors** ([`HandlerError`], [`FailureKind`]) — why an invocation
//!   failed, for logs only.
//!
//! # Example
//!
//! ```rust
//! use lambda_lite_core::Event;
//! use lambda_lite_json::{HandlerError, LambdaHandler};
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Default, Deserialize)]
//! struct Order {
//!     item: String,
//! }
//!
//! #[derive(Serialize)]
//! struct Receipt {
//!     item: String,
//! }
//!
//! let handler = LambdaHandler::<Order, Receipt>::builder()
//!     .post(|order: Option<Order>| {
//!         let order = order.unwrap_or_default();
//!         if order.item.is_empty() {
//!             return Err(HandlerError::logic("no item"));
//!         }
//!         Ok(Some(Receipt { item: order.item }))
//!     })
//!     .build();
//!
//! let ok = handler.handle(&Event::new("POST").with_body(r#"{"item":"tea"}"#));
//! assert_eq!(ok.body.as_deref(), Some(r#"{"item":"tea"}"#));
//!
//! let failed = handler.handle(&Event::new("POST").with_body("{}"));
//! assert_eq!(failed.status_code, 500);
//! ```

mod cache;
mod codec;
mod config;
mod error;
mod handler;

pub use cache::CodecCache;
pub use codec::{BodyReader, BodyWriter, Format};
pub use config::HandlerConfig;
pub use error::{BoxError, FailureKind, HandlerError};
pub use handler::{Hook, Invocation, LambdaHandler, LambdaHandlerBuilder};
