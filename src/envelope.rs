//! Wire format: `{success: true, ...payload}` or `{success: false, error}`.

use serde::Serialize;

use crate::error::ShimError;

#[derive(Serialize)]
struct Success<'a, T: Serialize> {
    success: bool,
    #[serde(flatten)]
    payload: &'a T,
}

#[derive(Serialize)]
struct Failure<'a> {
    success: bool,
    error: &'a str,
}

/// Serialize an operation outcome as a single compact JSON line (no trailing newline).
pub fn to_line<T: Serialize>(outcome: &Result<T, ShimError>) -> String {
    match outcome {
        Ok(payload) => serde_json::to_string(&Success {
            success: true,
            payload,
        })
        .unwrap_or_else(|e| failure_line(&format!("Failed to serialize result: {e}"))),
        Err(err) => failure_line(&err.to_string()),
    }
}

fn failure_line(message: &str) -> String {
    let failure = Failure {
        success: false,
        error: message,
    };
    // A struct of a bool and a str cannot fail to serialize
    serde_json::to_string(&failure).unwrap_or_default()
}
