//! Typed item values.

use std::fmt::{self, Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::errors::TreeError;

/// A value held by an item for one or more batches.
///
/// Equality is structural: same variant and same payload. Text compares
/// byte for byte.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "lowercase")]
pub enum Value {
    /// No value recorded.
    #[default]
    None,
    Integer(i64),
    Float(f64),
    Text(String),
}

/// The declared type of a member in a batch document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueType {
    Int,
    String,
    Double,
}

impl ValueType {
    /// Maps a declared type name to a type. Unknown names yield `None`.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "int" => Some(ValueType::Int),
            "string" => Some(ValueType::String),
            "double" => Some(ValueType::Double),
            _ => None,
        }
    }

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            ValueType::Int => "int",
            ValueType::String => "string",
            ValueType::Double => "double",
        }
    }

    /// Reads `raw` as a value of this type.
    ///
    /// Numbers are parsed in base 10 after trimming surrounding whitespace.
    /// Text is kept exactly as given.
    ///
    /// # Errors
    ///
    /// Returns [`TreeError::IllegalValue`] if `raw` is not a valid number.
    pub fn parse(self, raw: &str) -> Result<Value, TreeError> {
        let illegal = || TreeError::IllegalValue {
            type_name: self.name().to_string(),
            raw: raw.to_string(),
        };
        match self {
            ValueType::Int => raw
                .trim()
                .parse::<i64>()
                .map(Value::Integer)
                .map_err(|_| illegal()),
            ValueType::Double => raw
                .trim()
                .parse::<f64>()
                .map(Value::Float)
                .map_err(|_| illegal()),
            ValueType::String => Ok(Value::Text(raw.to_string())),
        }
    }
}

impl Display for ValueType {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Value {
    /// Parses `raw` according to the declared `type_name`.
    ///
    /// # Errors
    ///
    /// Returns [`TreeError::IllegalValue`] if the type name is unknown or the
    /// text does not parse as that type.
    pub fn parse(type_name: &str, raw: &str) -> Result<Value, TreeError> {
        ValueType::from_name(type_name)
            .ok_or_else(|| TreeError::IllegalValue {
                type_name: type_name.to_string(),
                raw: raw.to_string(),
            })?
            .parse(raw)
    }

    #[must_use]
    pub fn value_type(&self) -> Option<ValueType> {
        match self {
            Value::None => None,
            Value::Integer(_) => Some(ValueType::Int),
            Value::Float(_) => Some(ValueType::Double),
            Value::Text(_) => Some(ValueType::String),
        }
    }

    #[must_use]
    pub fn is_none(&self) -> bool {
        matches!(self, Value::None)
    }

    #[must_use]
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Value::Integer(v) => Some(*v),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Float(v) => Some(*v),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(v) => Some(v),
            _ => None,
        }
    }
}

impl Display for Value {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Value::None => write!(f, "-"),
            Value::Integer(v) => write!(f, "{v}"),
            Value::Float(v) => write!(f, "{v}"),
            Value::Text(v) => write!(f, "{v}"),
        }
    }
}
