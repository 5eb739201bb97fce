//! Encoding and decoding entities to and from wire objects.
//!
//! These are thin wrappers over `serde_json` that report failures as
//! [`ValidationError`] instead of raw serde errors.

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::ValidationError;

/// Keys of a wire object that the entity schema does not declare.
///
/// Every entity carries one of these under `additional_properties`. Entities
/// declare it as their first field so that, when encoded, declared fields are
/// written after it and win on a key collision.
pub type AdditionalProperties = serde_json::Map<String, Value>;

/// Decode an entity from a wire value.
pub fn from_value<T: DeserializeOwned>(value: Value) -> Result<T, ValidationError> {
    serde_json::from_value(value).map_err(ValidationError::from)
}

/// Decode an entity from a raw JSON body.
pub fn from_slice<T: DeserializeOwned>(body: &[u8]) -> Result<T, ValidationError> {
    serde_json::from_slice(body).map_err(ValidationError::from)
}

/// Encode an entity into a wire value.
///
/// Encoding to a [`Value`] collapses duplicate keys, so an entry in
/// `additional_properties` that shadows a declared field is dropped here.
pub fn to_value<T: Serialize>(entity: &T) -> Result<Value, ValidationError> {
    serde_json::to_value(entity).map_err(ValidationError::from)
}
