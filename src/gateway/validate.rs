//! Inbound shared-secret check and body validation.

use serde_json::Value;

use crate::gateway::error::GatewayError;
use crate::gateway::prompts::Mode;

/// Header carrying the caller's shared secret.
pub const API_KEY_HEADER: &str = "x-api-key";

/// A note that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteRequest {
    pub text: String,
    pub mode: Mode,
}

/// Compare the presented key against the configured secret.
///
/// An unset or empty secret rejects every call as a server fault rather than
/// letting requests through.
pub fn check_auth(presented: Option<&str>, expected: Option<&str>) -> Result<(), GatewayError> {
    let expected = match expected {
        Some(key) if !key.is_empty() => key,
        _ => return Err(GatewayError::ServerMisconfigured),
    };

    match presented {
        Some(key) if constant_time_eq(key.as_bytes(), expected.as_bytes()) => Ok(()),
        _ => Err(GatewayError::Unauthorized),
    }
}

/// Byte comparison whose running time depends only on the input lengths.
fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    let mut diff = 0u8;
    for (x, y) in a.iter().zip(b.iter()) {
        diff |= x ^ y;
    }
    diff == 0
}

/// Decode the body and extract `text` and `mode`.
///
/// Lightweight clients (shortcut apps) sometimes send the JSON object
/// encoded as a JSON string, so a string result is decoded a second time.
pub fn parse_note(raw: &[u8]) -> Result<NoteRequest, GatewayError> {
    if raw.iter().all(u8::is_ascii_whitespace) {
        return Err(GatewayError::NotAnObject);
    }

    let mut value: Value = serde_json::from_slice(raw).map_err(|_| GatewayError::MalformedJson)?;
    if let Value::String(inner) = &value {
        value = serde_json::from_str(inner).map_err(|_| GatewayError::MalformedJson)?;
    }

    let Value::Object(fields) = value else {
        return Err(GatewayError::NotAnObject);
    };

    let text = match fields.get("text") {
        Some(Value::String(text)) if !text.is_empty() => text.clone(),
        _ => return Err(GatewayError::MissingText),
    };

    let mode = fields
        .get("mode")
        .and_then(Value::as_str)
        .and_then(|name| name.parse::<Mode>().ok())
        .ok_or(GatewayError::InvalidMode)?;

    Ok(NoteRequest { text, mode })
}
