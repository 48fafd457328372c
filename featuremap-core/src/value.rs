//! Scalar attribute values carried by spatial features.

use std::fmt;

use crate::escape::quote_literal;

/// A single attribute value.
///
/// With the `serde` feature enabled values are untagged, so plain JSON
/// scalars (`null`, booleans, numbers and strings) map directly onto the
/// variants.
///
/// # Examples
/// ```
/// use featuremap_core::AttributeValue;
///
/// let value = AttributeValue::from("O'Brien");
/// assert_eq!(value.to_string_literal(), "'O''Brien'");
/// assert_eq!(AttributeValue::from(30_i64).to_sql_literal(), "30");
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum AttributeValue {
    /// No value; treated exactly like an absent attribute.
    #[default]
    Null,
    /// Boolean flag.
    Boolean(bool),
    /// Signed integer.
    Integer(i64),
    /// Floating point number.
    Real(f64),
    /// Free text.
    Text(String),
}

impl AttributeValue {
    /// Whether the value is [`AttributeValue::Null`].
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Whether the value can be written as an SQL literal. Only NaN and
    /// infinite reals fail this check.
    #[must_use]
    pub const fn is_finite(&self) -> bool {
        match self {
            Self::Real(number) => number.is_finite(),
            _ => true,
        }
    }

    /// Render the textual form of the value as a quoted string literal.
    ///
    /// Every variant, numbers included, becomes a string literal; the
    /// container's column affinity decides the stored type.
    #[must_use]
    pub fn to_string_literal(&self) -> String {
        quote_literal(&self.to_string())
    }

    /// Render the value as a typed SQL literal: numbers bare, null as
    /// `NULL`, text and booleans quoted.
    ///
    /// Booleans stay `'true'`/`'false'` so that insert and update store the
    /// same value.
    #[must_use]
    pub fn to_sql_literal(&self) -> String {
        match self {
            Self::Null => "NULL".to_owned(),
            Self::Boolean(_) => self.to_string_literal(),
            Self::Integer(number) => number.to_string(),
            Self::Real(number) => number.to_string(),
            Self::Text(text) => quote_literal(text),
        }
    }
}

impl fmt::Display for AttributeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str("null"),
            Self::Boolean(flag) => write!(f, "{flag}"),
            Self::Integer(number) => write!(f, "{number}"),
            Self::Real(number) => write!(f, "{number}"),
            Self::Text(text) => f.write_str(text),
        }
    }
}

impl From<bool> for AttributeValue {
    fn from(value: bool) -> Self {
        Self::Boolean(value)
    }
}

impl From<i64> for AttributeValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<f64> for AttributeValue {
    fn from(value: f64) -> Self {
        Self::Real(value)
    }
}

impl From<&str> for AttributeValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl From<String> for AttributeValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl<T> From<Option<T>> for AttributeValue
where
    T: Into<Self>,
{
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}
