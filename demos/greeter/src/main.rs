use std::sync::Arc;

use lambda_lite::prelude::*;
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Entities
// ---------------------------------------------------------------------------

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Greeting {
    pub name: Option<String>,
    pub shout: bool,
}

#[derive(Debug, Serialize)]
pub struct Reply {
    pub value: String,
}

// ---------------------------------------------------------------------------
// Business logic
// ---------------------------------------------------------------------------

/// GET: greets whoever is named, or the world.
fn greet(greeting: Option<Greeting>) -> Result<Option<Reply>, HandlerError> {
    let greeting = greeting.unwrap_or_default();
    let name = greeting.name.as_deref().unwrap_or("world");
    Ok(Some(Reply {
        value: render(name, greeting.shout),
    }))
}

/// POST: like GET, but a name is mandatory and "nobody" gets no reply.
fn register(greeting: Option<Greeting>) -> Result<Option<Reply>, HandlerError> {
    let greeting = greeting.unwrap_or_default();
    let name = has_text(greeting.name.as_deref(), "Name <%s> is empty", &[
        &greeting.name.as_deref().unwrap_or("null"),
    ])?;
    if name == "nobody" {
        return Ok(None);
    }
    Ok(Some(Reply {
        value: render(name, greeting.shout),
    }))
}

fn render(name: &str, shout: bool) -> String {
    let text = format!("Hello, {name}!");
    if shout { text.to_uppercase() } else { text }
}

fn handler() -> LambdaHandler<Greeting, Reply> {
    LambdaHandler::builder()
        .get(greet)
        .post(register)
        .build()
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

#[tokio::main]
async fn main() -> Result<(), LambdaLiteError> {
    telemetry::init_with("greeter=info,lambda_lite=info")?;

    let handler = Arc::new(handler());
    tracing::info!(methods = ?handler.methods(), "greeter ready");

    let count = runner::run_stdio(handler, RunnerConfig::default()).await?;
    tracing::info!(count, "all events handled");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_greets_world_by_default() {
        let response = handler().handle(&Event::new("GET"));
        assert_eq!(response.status_code, 200);
        assert_eq!(response.body.as_deref(), Some(r#"{"value":"Hello, world!"}"#));
    }

    #[test]
    fn test_get_shouts() {
        let event = Event::new("GET").with_body(r#"{"name":"Ada","shout":true}"#);
        let response = handler().handle(&event);
        assert_eq!(response.body.as_deref(), Some(r#"{"value":"HELLO, ADA!"}"#));
    }

    #[test]
    fn test_post_requires_name() {
        let response = handler().handle(&Event::new("POST").with_body("{}"));
        assert_eq!(response, Response::internal_server_error());
    }

    #[test]
    fn test_post_nobody_is_no_content() {
        let event = Event::new("POST").with_body(r#"{"name":"nobody"}"#);
        assert_eq!(handler().handle(&event), Response::no_content());
    }

    #[test]
    fn test_delete_is_not_allowed() {
        let response = handler().handle(&Event::new("DELETE"));
        assert_eq!(response.status_code, 405);
    }

    #[test]
    fn test_register_error_message_is_formatted() {
        let err = register(Some(Greeting {
            name: Some(String::new()),
            shout: false,
        }))
        .unwrap_err();
        assert!(err.to_string().contains("Name <> is empty"));
    }
}
