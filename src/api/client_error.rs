use thiserror::Error;

/// Failures of the content and game service clients.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Non-2xx response; `body` carries the response text.
    #[error("{operation} failed: {status} {body}")]
    Status {
        operation: String,
        status: u16,
        body: String,
    },
    #[error("{operation} failed: {message}")]
    Transport { operation: String, message: String },
    #[error("{operation}: invalid response body: {source}")]
    Decode {
        operation: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("could not encode request: {0}")]
    Encode(#[source] serde_json::Error),
    #[error("{0}: empty books array")]
    EmptySummary(String),
}

impl ClientError {
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}
