use serde::{Deserialize, Serialize};

use crate::UpdateError;

/// One `(meaning, value, recorded)` tuple of an update message.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Reading {
    pub meaning: String,
    pub value: f64,
    /// Time of the measurement in milliseconds since the Unix epoch.
    pub recorded: i64,
}

impl Reading {
    pub fn new(meaning: impl Into<String>, value: f64, recorded: i64) -> Self {
        Self {
            meaning: meaning.into(),
            value,
            recorded,
        }
    }
}

/// The JSON body of an update message.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePayload {
    pub device_id: String,
    pub readings: Vec<Reading>,
}

impl UpdatePayload {
    /// Decodes a raw payload, either as string or as bytes.
    pub fn decode(raw: impl AsRef<[u8]>) -> Result<Self, UpdateError> {
        Ok(serde_json::from_slice(raw.as_ref())?)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}
