//! Binary payloads handed across the native engine boundary.

use crate::error::TranslateResult;
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Serialize a translated structure into its bincode payload
pub fn encode<T: Serialize>(value: &T) -> TranslateResult<Vec<u8>> {
    Ok(bincode::serialize(value)?)
}

pub fn decode<T: DeserializeOwned>(payload: &[u8]) -> TranslateResult<T> {
    Ok(bincode::deserialize(payload)?)
}
