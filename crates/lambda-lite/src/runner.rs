//! Local event runner: drive a handler from a stream of JSON events.
//!
//! In production the hosting platform delivers events and collects
//! responses. Locally (and in tests) the runner plays that part:
//!
//! ```text
//! input (one Event per line) → spawn_blocking(handle) → output (one Response per line)
//! ```
//!
//! Handlers are synchronous, so each event runs on Tokio's blocking pool.
//! Up to `max_in_flight` events are handled concurrently against the same
//! handler instance, the way a warm instance serves overlapping requests;
//! responses are still written in input order.

use std::collections::VecDeque;
use std::sync::Arc;

use lambda_lite_core::{Event, Response};
use lambda_lite_json::LambdaHandler;
use serde::{Serialize, de::DeserializeOwned};
use tokio::io::{self, AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};
use tokio::task::JoinHandle;

use crate::LambdaLiteError;

/// Configuration for [`run`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunnerConfig {
    /// Maximum number of events dispatched but not yet written out.
    /// Values below 1 are treated as 1.
    pub max_in_flight: usize,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self { max_in_flight: 16 }
    }
}

/// Reads newline-delimited events from `input`, handles each one, and
/// writes one JSON response per line to `output`.
///
/// Blank lines are skipped. A line that is not a valid event is answered
/// with 400. Returns the number of responses written.
///
/// # Errors
/// Returns an error only if reading `input` or writing `output` fails.
pub async fn run<B, R, I, O>(
    handler: Arc<LambdaHandler<B, R>>,
    input: I,
    mut output: O,
    config: RunnerConfig,
) -> Result<usize, LambdaLiteError>
where
    B: DeserializeOwned + Default + 'static,
    R: Serialize + 'static,
    I: AsyncBufRead + Unpin,
    O: AsyncWrite + Unpin,
{
    let limit = config.max_in_flight.max(1);
    let mut lines = input.lines();
    let mut in_flight: VecDeque<JoinHandle<Response>> = VecDeque::new();
    let mut written = 0;

    tracing::info!(max_in_flight = limit, "runner started");

    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }

        let handler = Arc::clone(&handler);
        in_flight.push_back(tokio::task::spawn_blocking(move || {
            dispatch(&handler, &line)
        }));

        if in_flight.len() >= limit {
            if let Some(task) = in_flight.pop_front() {
                write_response(&mut output, finish(task).await).await?;
                written += 1;
            }
        }
    }

    while let Some(task) = in_flight.pop_front() {
        write_response(&mut output, finish(task).await).await?;
        written += 1;
    }
    output.flush().await?;

    tracing::info!(responses = written, "runner finished");
    Ok(written)
}

/// Runs the handler over stdin and stdout.
pub async fn run_stdio<B, R>(
    handler: Arc<LambdaHandler<B, R>>,
    config: RunnerConfig,
) -> Result<usize, LambdaLiteError>
where
    B: DeserializeOwned + Default + 'static,
    R: Serialize + 'static,
{
    run(handler, BufReader::new(io::stdin()), io::stdout(), config).await
}

/// Parses one line and hands it to the handler.
fn dispatch<B, R>(handler: &LambdaHandler<B, R>, line: &str) -> Response
where
    B: DeserializeOwned + Default + 'static,
    R: Serialize + 'static,
{
    match serde_json::from_str::<Event>(line) {
        Ok(event) => handler.handle(&event),
        Err(e) => {
            tracing::warn!(error = %e, "malformed event");
            Response::bad_request()
        }
    }
}

/// Awaits a dispatched event. A task that died (a hook panicked with
/// panic catching disabled) is answered with 500, as the platform would.
async fn finish(task: JoinHandle<Response>) -> Response {
    task.await.unwrap_or_else(|e| {
        tracing::error!(error = %e, "handler task failed");
        Response::internal_server_error()
    })
}

async fn write_response<O>(
    output: &mut O,
    response: Response,
) -> Result<(), LambdaLiteError>
where
    O: AsyncWrite + Unpin,
{
    let mut bytes = serde_json::to_vec(&response)?;
    bytes.push(b'\n');
    output.write_all(&bytes).await?;
    Ok(())
}
