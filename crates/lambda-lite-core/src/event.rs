//! Inbound and outbound envelopes.
//!
//! These mirror the JSON shape of an API-Gateway style proxy integration.
//! The platform hands us an [`Event`], we hand back a [`Response`]; both
//! carry the body as an opaque string. Decoding that string into a typed
//! value is the job of the layer above.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::{Method, Status};

// ---------------------------------------------------------------------------
// Event
// ---------------------------------------------------------------------------

/// An inbound request event.
///
/// Fields the proxy integration sends that we don't model (path, query
/// string, request context, ...) are ignored during deserialization.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    /// The raw method string, in whatever case the client sent it.
    #[serde(rename = "httpMethod", default)]
    pub method: String,

    /// Request headers, if the platform sent any.
    #[serde(default)]
    pub headers: Option<HashMap<String, String>>,

    /// The raw request body.
    #[serde(default)]
    pub body: Option<String>,
}

impl Event {
    /// Creates an event with the given method and no headers or body.
    pub fn new(method: impl Into<String>) -> Self {
        Self {
            method: method.into(),
            headers: None,
            body: None,
        }
    }

    /// Sets the body.
    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Adds a header, creating the header map if needed.
    pub fn with_header(
        mut self,
        name: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        self.headers
            .get_or_insert_with(HashMap::new)
            .insert(name.into(), value.into());
        self
    }

    /// Case-insensitive header lookup.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.as_ref().and_then(|headers| {
            headers
                .iter()
                .find(|(key, _)| key.eq_ignore_ascii_case(name))
                .map(|(_, value)| value.as_str())
        })
    }

    /// The method resolved against the known vocabulary.
    pub fn resolved_method(&self) -> Option<Method> {
        Method::of(&self.method)
    }
}

// ---------------------------------------------------------------------------
// Response
// ---------------------------------------------------------------------------

/// An outbound response.
///
/// Built once per invocation and never touched again after it is
/// returned. `None` fields are omitted from the serialized form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Response {
    pub status_code: u16,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub headers: Option<HashMap<String, String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
}

impl Response {
    /// Creates a response from all of its parts.
    pub fn new(
        status_code: u16,
        headers: Option<HashMap<String, String>>,
        body: Option<String>,
    ) -> Self {
        Self {
            status_code,
            headers,
            body,
        }
    }

    /// A bodiless response with a raw status code.
    pub fn with_code(status_code: u16) -> Self {
        Self::new(status_code, None, None)
    }

    /// A bodiless response with the given status.
    pub fn status(status: Status) -> Self {
        Self::with_code(status.code())
    }

    /// 200 with the given body.
    pub fn ok(body: impl Into<String>) -> Self {
        Self::new(Status::Ok.code(), None, Some(body.into()))
    }

    /// 204, no body.
    pub fn no_content() -> Self {
        Self::status(Status::NoContent)
    }

    /// 400, no body.
    pub fn bad_request() -> Self {
        Self::status(Status::BadRequest)
    }

    /// 404, no body.
    pub fn not_found() -> Self {
        Self::status(Status::NotFound)
    }

    /// 405, no body.
    pub fn method_not_allowed() -> Self {
        Self::status(Status::MethodNotAllowed)
    }

    /// 500, no body.
    pub fn internal_server_error() -> Self {
        Self::status(Status::InternalServerError)
    }

    /// Sets a header, creating the header map if needed.
    pub fn with_header(
        mut self,
        name: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        self.headers
            .get_or_insert_with(HashMap::new)
            .insert(name.into(), value.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // =====================================================================
    // Event
    // =====================================================================

    #[test]
    fn test_event_builder() {
        let event = Event::new("GET")
            .with_header("Content-Type", "application/json")
            .with_body("{}");
        assert_eq!(event.method, "GET");
        assert_eq!(event.body.as_deref(), Some("{}"));
        assert_eq!(event.resolved_method(), Some(Method::Get));
    }

    #[test]
    fn test_event_header_lookup_ignores_case() {
        let event = Event::new("POST").with_header("X-Request-Id", "abc");
        assert_eq!(event.header("x-request-id"), Some("abc"));
        assert_eq!(event.header("missing"), None);
        assert_eq!(Event::new("POST").header("x-request-id"), None);
    }

    #[test]
    fn test_event_unknown_method_resolves_to_none() {
        assert_eq!(Event::new("BREW").resolved_method(), None);
    }

    #[test]
    fn test_event_deserializes_proxy_shape() {
        let json = r#"{
            "resource": "/items",
            "path": "/items",
            "httpMethod": "put",
            "headers": { "Accept": "*/*" },
            "queryStringParameters": null,
            "body": "{\"name\":\"x\"}",
            "isBase64Encoded": false
        }"#;
        let event: Event = serde_json::from_str(json).unwrap();
        assert_eq!(event.resolved_method(), Some(Method::Put));
        assert_eq!(event.header("accept"), Some("*/*"));
        assert_eq!(event.body.as_deref(), Some("{\"name\":\"x\"}"));
    }

    #[test]
    fn test_event_null_body_and_headers() {
        let json = r#"{ "httpMethod": "GET", "headers": null, "body": null }"#;
        let event: Event = serde_json::from_str(json).unwrap();
        assert!(event.headers.is_none());
        assert!(event.body.is_none());
    }

    #[test]
    fn test_event_ignores_top_level_method_key() {
        let json = r#"{ "httpMethod": "GET", "method": "POST" }"#;
        let event: Event = serde_json::from_str(json).unwrap();
        assert_eq!(event.resolved_method(), Some(Method::Get));
    }

    // =====================================================================
    // Response
    // =====================================================================

    #[test]
    fn test_response_constructors() {
        assert_eq!(Response::ok("hi").status_code, 200);
        assert_eq!(Response::ok("hi").body.as_deref(), Some("hi"));
        assert_eq!(Response::no_content(), Response::with_code(204));
        assert_eq!(Response::bad_request().status_code, 400);
        assert_eq!(Response::not_found().status_code, 404);
        assert_eq!(Response::method_not_allowed().status_code, 405);
        assert_eq!(Response::internal_server_error().status_code, 500);
        assert!(Response::internal_server_error().body.is_none());
        assert!(Response::internal_server_error().headers.is_none());
    }

    #[test]
    fn test_response_status_uses_table_code() {
        assert_eq!(Response::status(Status::Conflict).status_code, 409);
    }

    #[test]
    fn test_response_json_shape_omits_absent_parts() {
        let json = serde_json::to_value(Response::no_content()).unwrap();
        assert_eq!(json, serde_json::json!({ "statusCode": 204 }));

        let json = serde_json::to_value(
            Response::ok("body").with_header("X-Trace", "1"),
        )
        .unwrap();
        assert_eq!(json["statusCode"], 200);
        assert_eq!(json["body"], "body");
        assert_eq!(json["headers"]["X-Trace"], "1");
    }
}
