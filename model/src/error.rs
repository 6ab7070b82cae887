/// Reasons for rejecting an inbound update message.
///
/// None of them is fatal: the rejected message is dropped and the dashboard keeps
/// serving subsequent messages.
#[derive(Debug, thiserror::Error)]
pub enum UpdateError {
    /// The payload is not valid JSON or lacks a required field.
    #[error("malformed payload: {0}")]
    MalformedPayload(#[from] serde_json::Error),

    /// The payload addresses a device that is not part of the roster.
    #[error("unknown device `{0}`")]
    UnknownDevice(String),
}
