//! Error types for the report client.
//!
//! Network failures (the request never completed), application failures
//! (non-2xx status), undecodable bodies and local file problems are kept
//! apart so each screen can word its own inline message.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ClientError {
    /// Request could not be sent or the connection dropped
    #[error("Network error: {0}")]
    Network(String),
    /// Server answered with a non-success status
    #[error("Server returned {status}{}", status_suffix(.message))]
    Status { status: u16, message: Option<String> },
    /// Body was not the JSON we expected
    #[error("Failed to decode response: {0}")]
    Decode(String),
    /// Local file could not be read
    #[error("File error: {0}")]
    File(String),
}

fn status_suffix(message: &Option<String>) -> String {
    match message {
        Some(m) => format!(": {}", m),
        None => String::new(),
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            ClientError::Decode(e.to_string())
        } else {
            ClientError::Network(e.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_display() {
        let with_message = ClientError::Status { status: 400, message: Some("Malformed XML".into()) };
        assert_eq!(with_message.to_string(), "Server returned 400: Malformed XML");

        let bare = ClientError::Status { status: 500, message: None };
        assert_eq!(bare.to_string(), "Server returned 500");
    }
}
