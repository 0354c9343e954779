//! Opaque pagination cursor codec.
//!
//! The bundled backends encode the offset of the next record; clients only
//! ever round-trip the string. A token that does not decode is reported as
//! `BadPageToken` and surfaces through the generic error path.

use crate::errors::ServiceError;

/// Encode the offset a follow-up listing should resume from.
pub fn encode(offset: usize) -> String {
    offset.to_string()
}

/// Decode an optional client-supplied token. Absent or empty means "from
/// the start".
pub fn decode(token: Option<&str>) -> Result<usize, ServiceError> {
    match token {
        None => Ok(0),
        Some(t) if t.is_empty() => Ok(0),
        Some(t) => t
            .parse::<usize>()
            .map_err(|_| ServiceError::BadPageToken(t.to_string())),
    }
}
