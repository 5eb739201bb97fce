//! Three-valued optional fields.
//!
//! The control service distinguishes a key that is missing from an object
//! ("leave unchanged") from a key that is present with `null` ("reset to the
//! service default"). [`Tristate`] keeps that distinction through a
//! deserialize/serialize round trip. Model fields use it together with
//!
//! ```text
//! #[serde(default, skip_serializing_if = "Tristate::is_absent")]
//! ```
//!
//! so that an absent key decodes to [`Tristate::Absent`] and is omitted again
//! on the way out.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// An optional wire value: omitted, explicit `null`, or a concrete value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Tristate<T> {
    /// The key is not present on the wire.
    #[default]
    Absent,
    /// The key is present with a `null` value.
    Null,
    /// The key carries a value.
    Value(T),
}

impl<T> Tristate<T> {
    /// Returns `true` for [`Tristate::Absent`].
    pub const fn is_absent(&self) -> bool {
        matches!(self, Self::Absent)
    }

    /// Returns `true` for [`Tristate::Null`].
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Returns `true` for [`Tristate::Value`].
    pub const fn is_value(&self) -> bool {
        matches!(self, Self::Value(_))
    }

    /// Borrow the contained value, if any.
    pub const fn as_value(&self) -> Option<&T> {
        match self {
            Self::Value(v) => Some(v),
            Self::Absent | Self::Null => None,
        }
    }

    /// Mutably borrow the contained value, if any.
    pub fn as_value_mut(&mut self) -> Option<&mut T> {
        match self {
            Self::Value(v) => Some(v),
            Self::Absent | Self::Null => None,
        }
    }

    /// Convert `&Tristate<T>` into `Tristate<&T>`.
    pub const fn as_ref(&self) -> Tristate<&T> {
        match self {
            Self::Absent => Tristate::Absent,
            Self::Null => Tristate::Null,
            Self::Value(v) => Tristate::Value(v),
        }
    }

    /// Collapse into an `Option`, treating absent and null alike.
    pub fn into_value(self) -> Option<T> {
        match self {
            Self::Value(v) => Some(v),
            Self::Absent | Self::Null => None,
        }
    }

    /// Return the contained value or `default`.
    pub fn value_or(self, default: T) -> T {
        self.into_value().unwrap_or(default)
    }

    /// Build from an `Option`; `None` becomes an explicit null.
    ///
    /// Use [`Tristate::Absent`] directly to omit a key.
    pub fn from_option(value: Option<T>) -> Self {
        match value {
            Some(v) => Self::Value(v),
            None => Self::Null,
        }
    }

    /// Map the contained value, keeping absent and null as they are.
    pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> Tristate<U> {
        match self {
            Self::Absent => Tristate::Absent,
            Self::Null => Tristate::Null,
            Self::Value(v) => Tristate::Value(f(v)),
        }
    }
}

impl<T: Copy> Tristate<&T> {
    /// Copy the referenced value out.
    pub fn copied(self) -> Tristate<T> {
        self.map(|v| *v)
    }
}

impl<T> From<T> for Tristate<T> {
    fn from(value: T) -> Self {
        Self::Value(value)
    }
}

impl<T: Serialize> Serialize for Tristate<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            // Only reached when a field forgot `skip_serializing_if`.
            Self::Absent | Self::Null => serializer.serialize_none(),
            Self::Value(v) => serializer.serialize_some(v),
        }
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for Tristate<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        // A missing key never reaches this impl; `#[serde(default)]` yields `Absent`.
        Option::<T>::deserialize(deserializer).map(Self::from_option)
    }
}
