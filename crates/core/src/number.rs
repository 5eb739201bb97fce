//! Finite wire numbers that keep their textual form.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Number;

use crate::error::ValidationError;

/// A finite JSON number.
///
/// Integer-valued input such as `12` is kept as an integer, so it encodes
/// back as `12` rather than `12.0`. NaN and infinities cannot be built.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Float(Number);

impl Float {
    /// Returns `None` for NaN and infinities.
    pub fn new(value: f64) -> Option<Self> {
        Number::from_f64(value).map(Self)
    }

    pub fn as_f64(&self) -> f64 {
        // Always `Some` for a finite number without arbitrary precision.
        self.0.as_f64().unwrap_or_default()
    }

    pub fn as_number(&self) -> &Number {
        &self.0
    }

    pub fn is_integer(&self) -> bool {
        !self.0.is_f64()
    }
}

impl TryFrom<f64> for Float {
    type Error = ValidationError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value)
            .ok_or_else(|| ValidationError::Invalid(format!("non-finite number {value}")))
    }
}

macro_rules! float_from_int {
    ($($int:ty),*) => {
        $(
            impl From<$int> for Float {
                fn from(value: $int) -> Self {
                    Self(Number::from(value))
                }
            }
        )*
    };
}

float_from_int!(i32, i64, u32, u64);

impl From<Float> for f64 {
    fn from(value: Float) -> Self {
        value.as_f64()
    }
}

/// Compares numeric values, so `12` equals `12.0`.
impl PartialEq for Float {
    #[allow(clippy::float_cmp)]
    fn eq(&self, other: &Self) -> bool {
        self.as_f64() == other.as_f64()
    }
}

impl PartialEq<f64> for Float {
    #[allow(clippy::float_cmp)]
    fn eq(&self, other: &f64) -> bool {
        self.as_f64() == *other
    }
}

impl fmt::Display for Float {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn integer_input_stays_integer() {
        let value: Float = serde_json::from_value(json!(12)).unwrap();
        assert!(value.is_integer());
        assert_eq!(value, 12.0);
        assert_eq!(serde_json::to_string(&value).unwrap(), "12");
        assert_eq!(serde_json::to_value(&value).unwrap(), json!(12));
    }

    #[test]
    fn fractional_input_stays_fractional() {
        let value: Float = serde_json::from_str("12.5").unwrap();
        assert!(!value.is_integer());
        assert_eq!(serde_json::to_string(&value).unwrap(), "12.5");
    }

    #[test]
    fn non_finite_is_rejected() {
        for bad in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            assert!(Float::new(bad).is_none());
            let err = Float::try_from(bad).unwrap_err();
            assert!(matches!(err, ValidationError::Invalid(_)), "{bad}");
        }
    }

    #[test]
    fn equality_is_numeric() {
        assert_eq!(Float::from(3_i32), Float::try_from(3.0).unwrap());
        assert_ne!(Float::from(3_u64), Float::try_from(3.5).unwrap());
        assert_eq!(Float::from(7_i64).to_string(), "7");
    }

    #[test]
    fn string_is_invalid() {
        assert!(serde_json::from_value::<Float>(json!("1.5")).is_err());
    }
}
