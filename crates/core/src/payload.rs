//! Captured request/response payloads
//!
//! A `Payload` is what the store keeps under each key: the request that was
//! seen and the response that was returned for it. Values are stored as
//! JSON bytes; the store itself never looks inside them on write.

use crate::error::Result;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::BTreeMap;

/// Multi-valued header map, ordered by header name
pub type Headers = BTreeMap<String, Vec<String>>;

/// Request half of a captured exchange
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestDetails {
    /// Request path, e.g. `/api/v1/users`
    pub path: String,
    /// HTTP method
    pub method: String,
    /// Host the request was sent to
    pub destination: String,
    /// `http` or `https`
    #[serde(default)]
    pub scheme: String,
    /// Raw query string without the leading `?`
    #[serde(default)]
    pub query: String,
    /// Request body
    #[serde(default)]
    pub body: String,
    /// Request headers
    #[serde(default)]
    pub headers: Headers,
}

impl RequestDetails {
    /// Stable fingerprint of the request, used as its storage key.
    ///
    /// Covers method, destination, path, query and body. Headers and scheme
    /// are left out so that the same logical request maps to one key.
    pub fn hash(&self) -> String {
        let mut hasher = Sha256::new();
        for part in [
            &self.method,
            &self.destination,
            &self.path,
            &self.query,
            &self.body,
        ] {
            hasher.update(part.as_bytes());
            // field separator so ("ab", "c") and ("a", "bc") differ
            hasher.update([0u8]);
        }
        format!("{:x}", hasher.finalize())
    }
}

/// Response half of a captured exchange
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseDetails {
    /// HTTP status code
    pub status: u16,
    /// Response body
    #[serde(default)]
    pub body: String,
    /// Response headers
    #[serde(default)]
    pub headers: Headers,
}

/// A captured request together with the response recorded for it
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payload {
    /// Recorded response
    pub response: ResponseDetails,
    /// Captured request
    pub request: RequestDetails,
    /// Identifier, the request fingerprint unless set explicitly
    #[serde(default)]
    pub id: String,
}

impl Payload {
    /// Create a payload whose id is the request fingerprint
    pub fn new(request: RequestDetails, response: ResponseDetails) -> Self {
        let id = request.hash();
        Self {
            response,
            request,
            id,
        }
    }

    /// Storage key for this payload
    pub fn key(&self) -> Vec<u8> {
        if self.id.is_empty() {
            self.request.hash().into_bytes()
        } else {
            self.id.clone().into_bytes()
        }
    }

    /// Serialize to the stored byte form
    pub fn encode(&self) -> Result<Vec<u8>> {
        Ok(serde_json::to_vec(self)?)
    }
}

/// Decode stored bytes back into a `Payload`
///
/// # Errors
///
/// Returns `CacheError::Serialization` if the bytes are not a valid
/// encoded payload.
pub fn decode_payload(bytes: &[u8]) -> Result<Payload> {
    Ok(serde_json::from_slice(bytes)?)
}
