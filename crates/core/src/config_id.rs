//! Configuration identifiers.
//!
//! The service reports configuration ids as a serialized `Result`: either
//! `{"Ok": 3}` for a numeric id or `{"Err": "reason"}` when the id could not
//! be resolved. [`ConfigId`] makes the "exactly one" rule structural.

use std::fmt;

use serde::de::{self, Deserializer, MapAccess, Visitor};
use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// A numeric configuration id, or the service's explanation of why there is none.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ConfigId {
    /// A resolved numeric id.
    Ok(i32),
    /// An unresolved id with the service's error text.
    Err(String),
}

impl ConfigId {
    /// The numeric id, if resolved.
    pub fn ok(&self) -> Option<i32> {
        match self {
            Self::Ok(id) => Some(*id),
            Self::Err(_) => None,
        }
    }

    /// The error text, if unresolved.
    pub fn err(&self) -> Option<&str> {
        match self {
            Self::Ok(_) => None,
            Self::Err(reason) => Some(reason),
        }
    }

    /// Returns `true` for a numeric id.
    pub fn is_ok(&self) -> bool {
        matches!(self, Self::Ok(_))
    }

    /// Convert into a standard `Result`.
    pub fn into_result(self) -> Result<i32, String> {
        match self {
            Self::Ok(id) => Ok(id),
            Self::Err(reason) => Err(reason),
        }
    }
}

impl From<i32> for ConfigId {
    fn from(id: i32) -> Self {
        Self::Ok(id)
    }
}

impl From<Result<i32, String>> for ConfigId {
    fn from(result: Result<i32, String>) -> Self {
        match result {
            Ok(id) => Self::Ok(id),
            Err(reason) => Self::Err(reason),
        }
    }
}

/// Renders the numeric id for `Ok`, usable as a path segment, or the error text for `Err`.
impl fmt::Display for ConfigId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ok(id) => write!(f, "{id}"),
            Self::Err(reason) => f.write_str(reason),
        }
    }
}

impl Serialize for ConfigId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        match self {
            Self::Ok(id) => map.serialize_entry("Ok", id)?,
            Self::Err(reason) => map.serialize_entry("Err", reason)?,
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for ConfigId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(ConfigIdVisitor)
    }
}

struct ConfigIdVisitor;

fn malformed<E: de::Error>(reason: &str) -> E {
    E::custom(ValidationError::MalformedId(reason.to_owned()))
}

impl<'de> Visitor<'de> for ConfigIdVisitor {
    type Value = ConfigId;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("an object with exactly one of `Ok` or `Err`")
    }

    // The status endpoints of older service builds report a bare integer.
    fn visit_i64<E: de::Error>(self, v: i64) -> Result<ConfigId, E> {
        i32::try_from(v)
            .map(ConfigId::Ok)
            .map_err(|_| malformed("id out of range for i32"))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<ConfigId, E> {
        i32::try_from(v)
            .map(ConfigId::Ok)
            .map_err(|_| malformed("id out of range for i32"))
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<ConfigId, A::Error> {
        let mut found: Option<ConfigId> = None;

        while let Some(key) = map.next_key::<String>()? {
            let variant = match key.as_str() {
                "Ok" => {
                    let value: serde_json::Value = map.next_value()?;
                    let id = value
                        .as_i64()
                        .and_then(|v| i32::try_from(v).ok())
                        .ok_or_else(|| malformed("`Ok` must hold an i32"))?;
                    ConfigId::Ok(id)
                }
                "Err" => {
                    let value: serde_json::Value = map.next_value()?;
                    match value {
                        serde_json::Value::String(reason) => ConfigId::Err(reason),
                        _ => return Err(malformed("`Err` must hold a string")),
                    }
                }
                other => return Err(malformed(&format!("unexpected key `{other}`"))),
            };

            if found.is_some() {
                return Err(malformed("both `Ok` and `Err` present"));
            }
            found = Some(variant);
        }

        found.ok_or_else(|| malformed("neither `Ok` nor `Err` present"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wire;
    use serde_json::json;

    #[test]
    fn ok_variant() {
        let id: ConfigId = wire::from_value(json!({"Ok": 5})).unwrap();
        assert_eq!(id, ConfigId::Ok(5));
        assert_eq!(id.ok(), Some(5));
        assert_eq!(wire::to_value(&id).unwrap(), json!({"Ok": 5}));
    }

    #[test]
    fn err_variant() {
        let id: ConfigId = wire::from_value(json!({"Err": "bad"})).unwrap();
        assert_eq!(id, ConfigId::Err("bad".to_owned()));
        assert_eq!(id.err(), Some("bad"));
        assert_eq!(wire::to_value(&id).unwrap(), json!({"Err": "bad"}));
    }

    #[test]
    fn both_keys_rejected() {
        let err = wire::from_value::<ConfigId>(json!({"Ok": 5, "Err": "bad"})).unwrap_err();
        assert!(matches!(err, ValidationError::MalformedId(_)));
    }

    #[test]
    fn empty_object_rejected() {
        let err = wire::from_value::<ConfigId>(json!({})).unwrap_err();
        assert!(matches!(err, ValidationError::MalformedId(_)));
    }

    #[test]
    fn unknown_key_rejected() {
        let err = wire::from_value::<ConfigId>(json!({"Maybe": 1})).unwrap_err();
        assert!(matches!(err, ValidationError::MalformedId(_)));
    }

    #[test]
    fn non_integer_ok_rejected() {
        let err = wire::from_value::<ConfigId>(json!({"Ok": "five"})).unwrap_err();
        assert!(matches!(err, ValidationError::MalformedId(_)));

        let err = wire::from_value::<ConfigId>(json!({"Ok": 1.5})).unwrap_err();
        assert!(matches!(err, ValidationError::MalformedId(_)));
    }

    #[test]
    fn text_input_decodes() {
        let id: ConfigId = wire::from_slice(br#"{"Err":"not a number"}"#).unwrap();
        assert_eq!(id.to_string(), "not a number");

        let err = wire::from_slice::<ConfigId>(br#"{"Ok":1,"Err":"x"}"#).unwrap_err();
        assert!(matches!(err, ValidationError::MalformedId(_)));
    }

    #[test]
    fn bare_integer_accepted() {
        let id: ConfigId = wire::from_value(json!(7)).unwrap();
        assert_eq!(id, ConfigId::Ok(7));
    }

    #[test]
    fn display_ok_and_err() {
        assert_eq!(ConfigId::from(42).to_string(), "42");
        assert_eq!(ConfigId::Err("not configured".to_owned()).to_string(), "not configured");
        assert_eq!(ConfigId::from(Err::<i32, _>("x".to_owned())).into_result(), Err("x".to_owned()));
    }
}
