//! Shared request settings and status handling for the remote services.

use serde_json::Value;

use crate::app::infrastructure::error::{AppError, Result};

pub const USER_AGENT: &str = "quickshare-note";

/// Seconds before a request is abandoned. A stalled connection becomes a
/// `Network` error rather than hanging the publish.
pub const REQUEST_TIMEOUT_SECS: u64 = 60;

/// Turn a non-2xx response into an error carrying the service's own message.
pub fn check_status(status: i32, body: &[u8]) -> Result<()> {
    if (200..300).contains(&status) {
        return Ok(());
    }
    Err(AppError::from_status(status, error_message(body)))
}

/// Best-effort error text from a JSON error body.
///
/// GitHub puts it in `message`, Imgur in `data.error` (a string, or an object
/// with its own `message`).
fn error_message(body: &[u8]) -> String {
    let Ok(json) = serde_json::from_slice::<Value>(body) else {
        return String::from_utf8_lossy(body).trim().to_string();
    };

    json.get("message")
        .and_then(Value::as_str)
        .or_else(|| {
            let err = json.get("data")?.get("error")?;
            err.as_str()
                .or_else(|| err.get("message").and_then(Value::as_str))
        })
        .unwrap_or("no error message")
        .to_string()
}
