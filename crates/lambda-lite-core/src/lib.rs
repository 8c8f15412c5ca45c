//! Collaborator layer for lambda-lite.
//!
//! This crate defines the vocabulary that every handler speaks:
//!
//! - **Tables** ([`Method`], [`MediaType`], [`Status`]) — the fixed sets
//!   of HTTP methods, media types, and status codes, each with a lookup
//!   by value.
//! - **Envelopes** ([`Event`], [`Response`]) — the inbound request and the
//!   outbound response exactly as the hosting platform hands them over.
//! - **Helpers** ([`util`]) — string checks and formatted assertions.
//! - **Errors** ([`CoreError`]) — what can go wrong in this layer.
//!
//! # Architecture
//!
//! The core layer sits below the typed JSON handlers. It never decides
//! how a body is decoded; it only carries strings around.
//!
//! ```text
//! Platform (JSON event) → Core (Event) → Json (typed B → R) → Core (Response)
//! ```

// ---------------------------------------------------------------------------
// Module declarations
// ---------------------------------------------------------------------------

mod error;
mod event;
mod media_type;
mod method;
mod status;
pub mod util;

// ---------------------------------------------------------------------------
// Re-exports
// ---------------------------------------------------------------------------

pub use error::CoreError;
pub use event::{Event, Response};
pub use media_type::MediaType;
pub use method::Method;
pub use status::Status;
