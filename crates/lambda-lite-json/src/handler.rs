//! Per-method dispatch: route an event to its hook, contain failures.
//!
//! Each invocation follows the same path:
//!
//! ```text
//! Event ─→ resolve method ─┬─ no hook ──────────────→ 405 (body untouched)
//!                          └─ hook ─→ body() ─→ logic ─→ wrap() ─→ 200/204
//!                                       └──── any error or panic ──→ 500
//! ```
//!
//! The hook table is filled by [`LambdaHandlerBuilder`] and read-only after
//! [`build()`](LambdaHandlerBuilder::build), so a handler can be shared
//! across threads without locking. The only mutable state is the
//! [`CodecCache`].

use std::any::Any;
use std::collections::HashMap;
use std::fmt;
use std::marker::PhantomData;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

use lambda_lite_core::{Event, Method, Response};
use serde::{Serialize, de::DeserializeOwned};

use crate::codec::{BodyReader, BodyWriter, Format};
use crate::{BoxError, CodecCache, FailureKind, HandlerConfig, HandlerError};

/// A registered per-method callback.
pub type Hook<B, R> = Box<
    dyn Fn(&Invocation<'_, B, R>) -> Result<Response, HandlerError>
        + Send
        + Sync,
>;

// ---------------------------------------------------------------------------
// LambdaHandler
// ---------------------------------------------------------------------------

/// A request handler with a typed body `B` and a typed result `R`.
///
/// `B = String` / `R = String` selects the raw text passthrough; any other
/// type goes through JSON. A handler with no hooks answers every method
/// with 405.
///
/// ## Example
///
/// ```rust
/// use lambda_lite_core::{Event, Method};
/// use lambda_lite_json::LambdaHandler;
///
/// let handler = LambdaHandler::<String, String>::builder()
///     .get(|body: Option<String>| {
///         Ok::<_, std::convert::Infallible>(body.map(|b| b.to_uppercase()))
///     })
///     .build();
///
/// let response = handler.handle(&Event::new("GET").with_body("hi"));
/// assert_eq!(response.status_code, 200);
/// assert_eq!(response.body.as_deref(), Some("HI"));
///
/// let response = handler.handle(&Event::new("POST").with_body("hi"));
/// assert_eq!(response.status_code, 405);
/// ```
pub struct LambdaHandler<B, R> {
    hooks: HashMap<Method, Hook<B, R>>,
    codecs: CodecCache,
    config: HandlerConfig,
    _marker: PhantomData<fn(B) -> R>,
}

impl<B, R> LambdaHandler<B, R>
where
    B: DeserializeOwned + Default + 'static,
    R: Serialize + 'static,
{
    /// Creates a builder.
    pub fn builder() -> LambdaHandlerBuilder<B, R> {
        LambdaHandlerBuilder::new()
    }

    /// Creates a handler with no hooks and default configuration.
    pub fn new() -> Self {
        Self::builder().build()
    }

    /// Handles one invocation. Never fails: every outcome is a response.
    pub fn handle(&self, event: &Event) -> Response {
        let span = tracing::info_span!("invocation", method = %event.method);
        let _enter = span.enter();

        let Some((method, hook)) = event
            .resolved_method()
            .and_then(|method| self.hooks.get(&method).map(|hook| (method, hook)))
        else {
            tracing::debug!(
                kind = %FailureKind::RoutingMiss,
                "no hook registered for method"
            );
            return Response::method_not_allowed();
        };

        let invocation = Invocation {
            handler: self,
            event,
            method,
        };

        match self.run_hook(hook, &invocation) {
            Ok(response) => {
                tracing::debug!(status = response.status_code, "hook completed");
                response
            }
            Err(e) => {
                tracing::error!(
                    %method,
                    kind = %e.kind(),
                    error = %e,
                    "hook failed"
                );
                Response::internal_server_error()
            }
        }
    }

    /// Runs a hook, turning a panic into [`HandlerError::Panicked`] when
    /// configured to.
    fn run_hook(
        &self,
        hook: &Hook<B, R>,
        invocation: &Invocation<'_, B, R>,
    ) -> Result<Response, HandlerError> {
        if !self.config.catch_panics {
            return hook(invocation);
        }
        panic::catch_unwind(AssertUnwindSafe(|| hook(invocation)))
            .unwrap_or_else(|payload| {
                Err(HandlerError::Panicked(panic_message(payload.as_ref())))
            })
    }

    /// Extracts the typed request body.
    ///
    /// See [`BodyReader::read`] for the text/JSON rules.
    ///
    /// # Errors
    /// Returns [`HandlerError::Extract`] for a malformed JSON body.
    pub fn body(&self, event: &Event) -> Result<Option<B>, HandlerError> {
        self.codecs.reader::<B>().read(event.body.as_deref())
    }

    /// Wraps a result into a response.
    ///
    /// `None`, or a result that encodes to nothing (the empty string for
    /// text handlers), is 204. Anything else is 200 with the encoded body.
    /// No headers are set.
    ///
    /// # Errors
    /// Returns [`HandlerError::Encode`] if the result cannot be serialized.
    pub fn wrap(&self, result: Option<R>) -> Result<Response, HandlerError> {
        let Some(result) = result else {
            return Ok(Response::no_content());
        };
        let body = self.codecs.writer::<R>().write(&result)?;
        Ok(body.map_or_else(Response::no_content, Response::ok))
    }
}

impl<B, R> LambdaHandler<B, R> {
    /// The cached reader for any type `T`.
    pub fn reader<T: 'static>(&self) -> Arc<BodyReader<T>> {
        self.codecs.reader::<T>()
    }

    /// The cached writer for any type `T`.
    pub fn writer<T: 'static>(&self) -> Arc<BodyWriter<T>> {
        self.codecs.writer::<T>()
    }

    /// Returns `true` if a hook is registered for `method`.
    pub fn supports(&self, method: Method) -> bool {
        self.hooks.contains_key(&method)
    }

    /// The methods with a registered hook, in declaration order.
    pub fn methods(&self) -> Vec<Method> {
        Method::ALL
            .into_iter()
            .filter(|method| self.supports(*method))
            .collect()
    }

    /// The handler's configuration.
    pub fn config(&self) -> &HandlerConfig {
        &self.config
    }
}

impl<B: 'static, R: 'static> LambdaHandler<B, R> {
    /// The wire format of the request body type.
    pub fn body_format(&self) -> Format {
        Format::of::<B>()
    }

    /// The wire format of the result type.
    pub fn result_format(&self) -> Format {
        Format::of::<R>()
    }
}

impl<B, R> Default for LambdaHandler<B, R>
where
    B: DeserializeOwned + Default + 'static,
    R: Serialize + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<B, R> fmt::Debug for LambdaHandler<B, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LambdaHandler")
            .field("methods", &self.methods())
            .field("codecs", &self.codecs.len())
            .field("config", &self.config)
            .finish()
    }
}

/// Best-effort text of a panic payload.
fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "non-string panic payload".to_string()
    }
}

// ---------------------------------------------------------------------------
// Invocation
// ---------------------------------------------------------------------------

/// What a hook gets to work with: the event plus the handler's codecs.
pub struct Invocation<'a, B, R> {
    handler: &'a LambdaHandler<B, R>,
    event: &'a Event,
    method: Method,
}

impl<'a, B, R> Invocation<'a, B, R>
where
    B: DeserializeOwned + Default + 'static,
    R: Serialize + 'static,
{
    /// The raw event.
    pub fn event(&self) -> &'a Event {
        self.event
    }

    /// The resolved method.
    pub fn method(&self) -> Method {
        self.method
    }

    /// The handler serving this invocation.
    pub fn handler(&self) -> &'a LambdaHandler<B, R> {
        self.handler
    }

    /// Extracts the typed request body. See [`LambdaHandler::body`].
    pub fn body(&self) -> Result<Option<B>, HandlerError> {
        self.handler.body(self.event)
    }

    /// Wraps a result. See [`LambdaHandler::wrap`].
    pub fn wrap(&self, result: Option<R>) -> Result<Response, HandlerError> {
        self.handler.wrap(result)
    }
}

// ---------------------------------------------------------------------------
// LambdaHandlerBuilder
// ---------------------------------------------------------------------------

/// Builder for registering hooks and configuring a [`LambdaHandler`].
pub struct LambdaHandlerBuilder<B, R> {
    hooks: HashMap<Method, Hook<B, R>>,
    config: HandlerConfig,
}

impl<B, R> LambdaHandlerBuilder<B, R>
where
    B: DeserializeOwned + Default + 'static,
    R: Serialize + 'static,
{
    /// Creates a builder with no hooks and default configuration.
    pub fn new() -> Self {
        Self {
            hooks: HashMap::new(),
            config: HandlerConfig::default(),
        }
    }

    /// Sets the handler configuration.
    pub fn config(mut self, config: HandlerConfig) -> Self {
        self.config = config;
        self
    }

    /// Registers a raw hook that builds the response itself.
    ///
    /// Registering the same method twice replaces the earlier hook.
    pub fn route<F>(mut self, method: Method, hook: F) -> Self
    where
        F: Fn(&Invocation<'_, B, R>) -> Result<Response, HandlerError>
            + Send
            + Sync
            + 'static,
    {
        if self.hooks.insert(method, Box::new(hook)).is_some() {
            tracing::warn!(%method, "replacing previously registered hook");
        }
        self
    }

    /// Registers a typed hook: body in, result out.
    ///
    /// The request body is extracted before `logic` runs and its result is
    /// wrapped afterwards. Errors returned by `logic` become
    /// [`HandlerError::Logic`].
    pub fn on<F, E>(self, method: Method, logic: F) -> Self
    where
        F: Fn(Option<B>) -> Result<Option<R>, E> + Send + Sync + 'static,
        E: Into<BoxError>,
    {
        self.route(method, move |invocation| {
            let body = invocation.body()?;
            let result = logic(body).map_err(HandlerError::logic)?;
            invocation.wrap(result)
        })
    }

    /// Shortcut for `on(Method::Get, logic)`.
    pub fn get<F, E>(self, logic: F) -> Self
    where
        F: Fn(Option<B>) -> Result<Option<R>, E> + Send + Sync + 'static,
        E: Into<BoxError>,
    {
        self.on(Method::Get, logic)
    }

    /// Shortcut for `on(Method::Post, logic)`.
    pub fn post<F, E>(self, logic: F) -> Self
    where
        F: Fn(Option<B>) -> Result<Option<R>, E> + Send + Sync + 'static,
        E: Into<BoxError>,
    {
        self.on(Method::Post, logic)
    }

    /// Shortcut for `on(Method::Put, logic)`.
    pub fn put<F, E>(self, logic: F) -> Self
    where
        F: Fn(Option<B>) -> Result<Option<R>, E> + Send + Sync + 'static,
        E: Into<BoxError>,
    {
        self.on(Method::Put, logic)
    }

    /// Shortcut for `on(Method::Patch, logic)`.
    pub fn patch<F, E>(self, logic: F) -> Self
    where
        F: Fn(Option<B>) -> Result<Option<R>, E> + Send + Sync + 'static,
        E: Into<BoxError>,
    {
        self.on(Method::Patch, logic)
    }

    /// Shortcut for `on(Method::Delete, logic)`.
    pub fn delete<F, E>(self, logic: F) -> Self
    where
        F: Fn(Option<B>) -> Result<Option<R>, E> + Send + Sync + 'static,
        E: Into<BoxError>,
    {
        self.on(Method::Delete, logic)
    }

    /// Builds the handler. The hook table is frozen from here on.
    pub fn build(self) -> LambdaHandler<B, R> {
        LambdaHandler {
            codecs: CodecCache::new(self.config.pretty_json),
            hooks: self.hooks,
            config: self.config,
            _marker: PhantomData,
        }
    }
}

impl<B, R> Default for LambdaHandlerBuilder<B, R>
where
    B: DeserializeOwned + Default + 'static,
    R: Serialize + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}
