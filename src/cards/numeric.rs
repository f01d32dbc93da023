//! Variable-numeric card values.
//!
//! Numeric card fields (cost, defense, intellect, life, pitch, power) hold
//! one of three things:
//!
//! - `Absent`: the field doesn't exist on the card (life on most non-heroes)
//! - `Variable`: a sentinel string such as `"X"` or `"*"`, meaning the value
//!   depends on game state described in the card's body text
//! - `Concrete`: a plain integer
//!
//! Only `Concrete` values take part in comparisons and statistics.
//!
//! In human-readable formats (JSON) a value serializes as `null`, a string,
//! or an integer. Binary formats use a tagged representation.

use serde::de::{self, Deserializer, Visitor};
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};

/// A numeric card field value.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Numeric {
    /// The field is not present on the card.
    #[default]
    Absent,
    /// A non-numeric placeholder determined by game state.
    Variable(String),
    /// A concrete integer value.
    Concrete(i64),
}

impl Numeric {
    /// Create a variable (sentinel) value.
    pub fn variable(sentinel: impl Into<String>) -> Self {
        Numeric::Variable(sentinel.into())
    }

    /// Get the concrete integer, if any.
    #[must_use]
    pub fn concrete(&self) -> Option<i64> {
        match self {
            Numeric::Concrete(v) => Some(*v),
            _ => None,
        }
    }

    /// Get the sentinel string, if this is a variable value.
    #[must_use]
    pub fn sentinel(&self) -> Option<&str> {
        match self {
            Numeric::Variable(s) => Some(s),
            _ => None,
        }
    }

    #[must_use]
    pub fn is_absent(&self) -> bool {
        matches!(self, Numeric::Absent)
    }

    #[must_use]
    pub fn is_variable(&self) -> bool {
        matches!(self, Numeric::Variable(_))
    }

    #[must_use]
    pub fn is_concrete(&self) -> bool {
        matches!(self, Numeric::Concrete(_))
    }
}

impl std::fmt::Display for Numeric {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Numeric::Absent => f.write_str("-"),
            Numeric::Variable(s) => f.write_str(s),
            Numeric::Concrete(v) => write!(f, "{v}"),
        }
    }
}

impl From<i64> for Numeric {
    fn from(v: i64) -> Self {
        Numeric::Concrete(v)
    }
}

impl From<i32> for Numeric {
    fn from(v: i32) -> Self {
        Numeric::Concrete(v as i64)
    }
}

impl From<&str> for Numeric {
    fn from(v: &str) -> Self {
        Numeric::Variable(v.to_string())
    }
}

impl From<Option<i64>> for Numeric {
    fn from(v: Option<i64>) -> Self {
        v.map_or(Numeric::Absent, Numeric::Concrete)
    }
}

/// Tagged form used by non-self-describing formats.
#[derive(Serialize, Deserialize)]
enum Tagged {
    Absent,
    Variable(String),
    Concrete(i64),
}

impl Serialize for Numeric {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if serializer.is_human_readable() {
            match self {
                Numeric::Absent => serializer.serialize_none(),
                Numeric::Variable(s) => serializer.serialize_str(s),
                Numeric::Concrete(v) => serializer.serialize_i64(*v),
            }
        } else {
            let tagged = match self {
                Numeric::Absent => Tagged::Absent,
                Numeric::Variable(s) => Tagged::Variable(s.clone()),
                Numeric::Concrete(v) => Tagged::Concrete(*v),
            };
            tagged.serialize(serializer)
        }
    }
}

impl<'de> Deserialize<'de> for Numeric {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        if deserializer.is_human_readable() {
            deserializer.deserialize_any(NumericVisitor)
        } else {
            Ok(match Tagged::deserialize(deserializer)? {
                Tagged::Absent => Numeric::Absent,
                Tagged::Variable(s) => Numeric::Variable(s),
                Tagged::Concrete(v) => Numeric::Concrete(v),
            })
        }
    }
}

struct NumericVisitor;

impl<'de> Visitor<'de> for NumericVisitor {
    type Value = Numeric;

    fn expecting(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("null, an integer, or a sentinel string")
    }

    fn visit_unit<E: de::Error>(self) -> Result<Numeric, E> {
        Ok(Numeric::Absent)
    }

    fn visit_none<E: de::Error>(self) -> Result<Numeric, E> {
        Ok(Numeric::Absent)
    }

    fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<Numeric, D::Error> {
        deserializer.deserialize_any(NumericVisitor)
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Numeric, E> {
        Ok(Numeric::Concrete(v))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Numeric, E> {
        i64::try_from(v)
            .map(Numeric::Concrete)
            .map_err(|_| E::custom(format!("numeric value {v} out of range")))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Numeric, E> {
        Ok(Numeric::Variable(v.to_string()))
    }

    fn visit_string<E: de::Error>(self, v: String) -> Result<Numeric, E> {
        Ok(Numeric::Variable(v))
    }
}
