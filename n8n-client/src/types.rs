//! Response types returned by the client.

use crate::body::ParsedBody;
use crate::error::Result;
use serde::Serialize;
use serde::de::DeserializeOwned;

/// Status and parsed body of the server response.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RawResponse {
    /// HTTP status code.
    pub status: u16,
    /// Parsed response body.
    pub body: ParsedBody,
}

/// Successful trigger outcome (status < 400).
///
/// The execution details returned by n8n vary by server version, so `data`
/// is kept as a [`ParsedBody`] and can be decoded on demand with
/// [`TriggerResult::json`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TriggerResult {
    /// Response body.
    pub data: ParsedBody,
    /// Raw response for debugging.
    pub raw: RawResponse,
}

impl TriggerResult {
    pub(crate) fn new(status: u16, body: ParsedBody) -> Self {
        Self {
            data: body.clone(),
            raw: RawResponse { status, body },
        }
    }

    /// HTTP status code of the response.
    pub fn status(&self) -> u16 {
        self.raw.status
    }

    /// Decode `data` into a typed value.
    ///
    /// Text bodies decode as a JSON string and empty bodies as null.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Serialize`](crate::ClientError::Serialize) if
    /// the body does not match `T`.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T> {
        Ok(serde_json::from_value(self.data.clone().into_value())?)
    }
}
