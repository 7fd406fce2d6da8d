//! User-input wire protocol.
//!
//! The client sends one `{"form_data": {...}}` text frame per submit.
//! The server answers with JSON objects that are dispatched by key
//! presence rather than a single `type` tag, so one frame may carry a
//! progress update and a terminal status at the same time. This module
//! turns each frame into the [`ServerEvent`]s it carries.

use hybrid_core::submission::SubmissionRequest;
use serde::Serialize;
use serde_json::Value;

/// Path of the user-input WebSocket endpoint.
pub const USER_INPUT_PATH: &str = "/ws/user-input/";

/// Page the client moves to once processing completes.
pub const DASHBOARD_PATH: &str = "/dashboard/";

/// `status` value of a successful terminal message.
pub const STATUS_COMPLETED: &str = "completed";

/// `status` value of a failed terminal message.
pub const STATUS_ERROR: &str = "error";

/// Outgoing submission frame.
#[derive(Debug, Serialize)]
pub struct SubmitEnvelope<'a> {
    pub form_data: &'a SubmissionRequest,
}

/// Serialize a submission into its text frame.
pub fn encode_submission(request: &SubmissionRequest) -> String {
    serde_json::to_string(&SubmitEnvelope { form_data: request })
        .expect("SubmitEnvelope is always serialisable")
}

/// A single meaning carried by a server frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServerEvent {
    /// Work advanced; `percent` is clamped to 0-100.
    Progress { percent: u8, message: String },
    /// Processing finished successfully.
    Completed { message: String },
    /// Processing failed on the server.
    Failed { message: String },
}

impl ServerEvent {
    /// Whether this event ends the tracked operation.
    pub fn is_terminal(&self) -> bool {
        matches!(self, ServerEvent::Completed { .. } | ServerEvent::Failed { .. })
    }
}

/// Parse a server text frame into the events it carries.
///
/// Events come out in dispatch order: progress, then completion, then
/// error. Each branch looks only at its own keys, so a badly typed
/// `progress` does not hide a terminal `status` in the same frame. A
/// frame that matches nothing (unknown `status`, `progress` without a
/// numeric value or without `message`) yields an empty list. Returns
/// `Err` for non-JSON text or a JSON value that is not an object.
pub fn parse_events(text: &str) -> Result<Vec<ServerEvent>, serde_json::Error> {
    let value: Value = serde_json::from_str(text)?;
    let Some(frame) = value.as_object() else {
        return Err(serde::de::Error::custom("server frame is not a JSON object"));
    };
    let mut events = Vec::new();

    let progress = frame.get("progress").and_then(Value::as_f64);
    let message = frame.get("message").and_then(Value::as_str);
    if let (Some(progress), Some(message)) = (progress, message) {
        events.push(ServerEvent::Progress {
            percent: clamp_percent(progress),
            message: message.to_string(),
        });
    }

    match frame.get("status").and_then(Value::as_str) {
        Some(STATUS_COMPLETED) => events.push(ServerEvent::Completed {
            message: display_message(frame.get("message")),
        }),
        Some(STATUS_ERROR) => events.push(ServerEvent::Failed {
            message: display_message(frame.get("message")),
        }),
        _ => {}
    }

    Ok(events)
}

/// Text shown for a terminal event's `message`, whatever its JSON type.
fn display_message(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(text)) => text.clone(),
        Some(other) => other.to_string(),
    }
}

fn clamp_percent(value: f64) -> u8 {
    if value.is_nan() {
        return 0;
    }
    value.round().clamp(0.0, 100.0) as u8
}
