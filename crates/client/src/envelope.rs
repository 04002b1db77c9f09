//! Decoding of the `{ status, data, error }` response envelope.
//!
//! Decoding is lenient about the error field: a bare string is accepted
//! alongside the usual list.

use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::error::ClientError;

#[derive(Debug, Deserialize)]
#[serde(bound = "T: DeserializeOwned")]
pub struct ApiEnvelope<T> {
    #[serde(default)]
    pub status: Option<u16>,
    #[serde(default)]
    pub data: Option<T>,
    #[serde(default)]
    pub error: ErrorField,
}

#[derive(Debug, Default, Deserialize)]
#[serde(untagged)]
pub enum ErrorField {
    #[default]
    None,
    One(String),
    Many(Vec<String>),
}

impl ErrorField {
    pub fn first(&self) -> Option<&str> {
        match self {
            ErrorField::None => None,
            ErrorField::One(msg) => Some(msg.as_str()),
            ErrorField::Many(msgs) => msgs.first().map(String::as_str),
        }
    }
}

/// Decode a 2xx body into its `data` payload (`None` when `data` is null).
pub fn decode_data<T: DeserializeOwned>(body: &[u8]) -> Result<Option<T>, ClientError> {
    let envelope: ApiEnvelope<T> = serde_json::from_slice(body)
        .map_err(|e| ClientError::UnexpectedResponse(e.to_string()))?;
    Ok(envelope.data)
}

/// Build the error for a non-2xx response.
///
/// The first envelope error wins; otherwise the status' canonical reason
/// is used.
pub fn decode_failure(status: reqwest::StatusCode, body: &[u8]) -> ClientError {
    let message = serde_json::from_slice::<ApiEnvelope<serde_json::Value>>(body)
        .ok()
        .and_then(|env| env.error.first().map(str::to_string))
        .unwrap_or_else(|| {
            status
                .canonical_reason()
                .unwrap_or("Request failed")
                .to_string()
        });

    ClientError::Api {
        status: status.as_u16(),
        message,
    }
}
