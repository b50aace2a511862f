//! # JSON Lines
//!
//! One request body per input line, one node message per output line.
//! Blank lines are skipped. A line that is not JSON gets a `REQNACK`
//! without identity fields.

use cl_03_request_handler::RequestHandlerApi;
use shared_types::{Nack, NodeMessage};
use tracing::debug;

/// Answer one input line. `None` for a blank line.
pub async fn process_line<H>(handler: &H, line: &str) -> Result<Option<String>, serde_json::Error>
where
    H: RequestHandlerApi + ?Sized,
{
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }

    let message = match serde_json::from_str::<serde_json::Value>(line) {
        Ok(raw) => handler.respond(&raw).await,
        Err(err) => {
            debug!(error = %err, "Unparseable request line");
            parse_error_message(&err)
        }
    };

    serde_json::to_string(&message).map(Some)
}

pub fn parse_error_message(err: &serde_json::Error) -> NodeMessage {
    NodeMessage::ReqNack(Nack {
        identifier: None,
        req_id: None,
        reason: format!("invalid JSON: {err}"),
    })
}
