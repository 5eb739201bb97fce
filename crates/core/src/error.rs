//! Validation errors raised while decoding wire data.

use thiserror::Error;

/// Malformed wire data.
///
/// Every decoding failure in the model layer surfaces as one of these
/// variants; values are never silently replaced by defaults.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A closed enumeration received a string outside its set.
    #[error("invalid value `{value}` for field `{field}`")]
    UnknownVariant {
        /// Wire name of the field the enumeration belongs to.
        field: String,
        /// The offending string.
        value: String,
    },

    /// A required field was not present in the wire object.
    #[error("missing field `{0}`")]
    MissingField(String),

    /// A tagged-union id object did not carry exactly one of `Ok` / `Err`.
    #[error("malformed config id: {0}")]
    MalformedId(String),

    /// Any other decoding failure (wrong JSON type, syntax error, ...).
    #[error("invalid data: {0}")]
    Invalid(String),
}

impl ValidationError {
    /// Build an [`ValidationError::UnknownVariant`].
    pub fn unknown_variant(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self::UnknownVariant {
            field: field.into(),
            value: value.into(),
        }
    }

    /// Returns the field name this error refers to, when known.
    pub fn field(&self) -> Option<&str> {
        match self {
            Self::UnknownVariant { field, .. } | Self::MissingField(field) => Some(field),
            Self::MalformedId(_) | Self::Invalid(_) => None,
        }
    }

    /// Recover a structured error from a serde message.
    ///
    /// Custom errors raised inside `Deserialize` impls travel through serde
    /// as plain strings, so the `Display` forms above are parsed back here.
    fn from_message(message: &str) -> Self {
        if let Some(field) = message
            .strip_prefix("missing field `")
            .and_then(|rest| rest.strip_suffix('`'))
        {
            return Self::MissingField(field.to_owned());
        }

        if let Some((value, field)) = message
            .strip_prefix("invalid value `")
            .and_then(|rest| rest.strip_suffix('`'))
            .and_then(|rest| rest.split_once("` for field `"))
        {
            return Self::unknown_variant(field, value);
        }

        if let Some(reason) = message.strip_prefix("malformed config id: ") {
            return Self::MalformedId(reason.to_owned());
        }

        Self::Invalid(message.to_owned())
    }
}

impl From<serde_json::Error> for ValidationError {
    fn from(err: serde_json::Error) -> Self {
        let message = err.to_string();
        // serde_json appends the position for errors raised while reading text.
        let message = match message.rsplit_once(" at line ") {
            Some((head, _)) if err.line() > 0 => head,
            _ => message.as_str(),
        };
        Self::from_message(message)
    }
}
