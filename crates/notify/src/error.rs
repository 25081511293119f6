//! Error types shared by the renderer and the payload adapters.

/// Errors that can occur while decoding or rendering an alert.
#[derive(Debug, thiserror::Error)]
pub enum NotifyError {
    /// The alert could not be written into a message body.
    #[error("Unrenderable alert: {0}")]
    Unrenderable(String),

    #[error("Invalid webhook payload: {0}")]
    Payload(String),

    #[error("JSON decoding failed: {0}")]
    Json(#[from] serde_json::Error),
}
