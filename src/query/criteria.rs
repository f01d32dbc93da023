//! Query values and filter criteria.
//!
//! A `Criteria` is an ordered list of `(field name, Query)` pairs. Field
//! names are resolved when the criteria are compiled, so an unknown name
//! surfaces as `UnknownField` from the filtering call.
//!
//! ## Example
//!
//! ```
//! use fab_catalog::query::{Criteria, Query};
//!
//! let brutes_with_seven_power = Criteria::new()
//!     .with("types", vec!["Brute", "Illusionist"])
//!     .with("power", 7)
//!     .with("cost", (0, 3))
//!     .with("body", Query::None);
//!
//! assert_eq!(brutes_with_seven_power.len(), 4);
//! ```

use std::fmt;
use std::sync::Arc;

use chrono::NaiveDate;

use crate::cards::{Field, FieldValue};
use crate::error::Result;

/// A caller-supplied test over a field's raw value.
#[derive(Clone)]
pub struct Predicate(Arc<dyn Fn(FieldValue<'_>) -> bool + Send + Sync>);

impl Predicate {
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(FieldValue<'_>) -> bool + Send + Sync + 'static,
    {
        Self(Arc::new(f))
    }

    /// Invoke the predicate.
    #[must_use]
    pub fn test(&self, value: FieldValue<'_>) -> bool {
        (self.0)(value)
    }
}

impl fmt::Debug for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Predicate(..)")
    }
}

/// A query value for one field.
///
/// Which shapes a field accepts depends on its `FieldKind`; see
/// `query::matcher`.
#[derive(Clone, Debug)]
pub enum Query {
    /// The field is absent or empty.
    None,
    /// Substring, membership, format code, or date prefix.
    Text(String),
    /// Any of (or, for exact filtering, exactly) these values.
    TextList(Vec<String>),
    /// Concrete integer equality.
    Int(i64),
    /// Concrete integer within `[lo, hi]`.
    Range(i64, i64),
    /// Initial release date equality.
    Date(NaiveDate),
    /// Arbitrary test over the raw value.
    Predicate(Predicate),
}

impl Query {
    /// Build a predicate query.
    pub fn predicate<F>(f: F) -> Self
    where
        F: Fn(FieldValue<'_>) -> bool + Send + Sync + 'static,
    {
        Query::Predicate(Predicate::new(f))
    }
}

impl From<&str> for Query {
    fn from(v: &str) -> Self {
        Query::Text(v.to_string())
    }
}

impl From<String> for Query {
    fn from(v: String) -> Self {
        Query::Text(v)
    }
}

impl From<i64> for Query {
    fn from(v: i64) -> Self {
        Query::Int(v)
    }
}

impl From<i32> for Query {
    fn from(v: i32) -> Self {
        Query::Int(v as i64)
    }
}

impl From<(i64, i64)> for Query {
    fn from((lo, hi): (i64, i64)) -> Self {
        Query::Range(lo, hi)
    }
}

impl From<(i32, i32)> for Query {
    fn from((lo, hi): (i32, i32)) -> Self {
        Query::Range(lo as i64, hi as i64)
    }
}

impl From<Vec<&str>> for Query {
    fn from(v: Vec<&str>) -> Self {
        Query::TextList(v.into_iter().map(str::to_string).collect())
    }
}

impl From<Vec<String>> for Query {
    fn from(v: Vec<String>) -> Self {
        Query::TextList(v)
    }
}

impl From<NaiveDate> for Query {
    fn from(v: NaiveDate) -> Self {
        Query::Date(v)
    }
}

impl From<Predicate> for Query {
    fn from(v: Predicate) -> Self {
        Query::Predicate(v)
    }
}

/// An ordered conjunction of per-field queries.
#[derive(Clone, Debug, Default)]
pub struct Criteria {
    entries: Vec<(String, Query)>,
}

impl Criteria {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a field query (builder pattern).
    #[must_use]
    pub fn with(mut self, field: impl AsRef<str>, query: impl Into<Query>) -> Self {
        self.entries.push((field.as_ref().to_string(), query.into()));
        self
    }

    /// Add a predicate query (builder pattern).
    #[must_use]
    pub fn with_predicate<F>(self, field: impl AsRef<str>, f: F) -> Self
    where
        F: Fn(FieldValue<'_>) -> bool + Send + Sync + 'static,
    {
        self.with(field, Query::predicate(f))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Query)> {
        self.entries.iter().map(|(f, q)| (f.as_str(), q))
    }

    /// Resolve every field name against the schema.
    pub fn resolve(&self) -> Result<Vec<(Field, &Query)>> {
        self.entries
            .iter()
            .map(|(name, query)| Ok((Field::parse(name)?, query)))
            .collect()
    }
}
