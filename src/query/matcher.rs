//! Value matching shared by every filter operation.
//!
//! A `(Field, Query)` pair compiles into a `FieldMatcher` once per filter
//! call. Compilation checks that the query's shape suits the field's kind,
//! so an unsupported combination fails with `InvalidQueryShape` before any
//! record is tested, and testing a record can't fail.
//!
//! | Field kind | Accepted queries                                          |
//! |------------|-----------------------------------------------------------|
//! | Text       | `None`, `Text` (case-insensitive substring), `Predicate`  |
//! | TextSet    | `None`, `Text` (membership), `TextList`, `Predicate`      |
//! | Numeric    | `None`, `Int`, `Range`, `Predicate`                       |
//! | Legality   | `None`, `Text` (format code), `Predicate`                 |
//! | Dates      | `None`, `Text` (`YYYY[/MM[/DD]]`), `Date`, `Predicate`    |

use chrono::{Datelike, NaiveDate};

use crate::cards::{Card, Field, FieldKind, FieldValue};
use crate::error::{CatalogError, Result};

use super::criteria::{Predicate, Query};

/// How list queries against set-of-text fields are interpreted.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MatchMode {
    /// Any query element present.
    Any,
    /// Field set exactly equal to the query list.
    Exact,
}

/// A release-date prefix: year, optionally month, optionally day.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DatePattern {
    pub year: i32,
    pub month: Option<u32>,
    pub day: Option<u32>,
}

impl DatePattern {
    /// Parse `YYYY`, `YYYY/MM`, or `YYYY/MM/DD`.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        let parts: Vec<&str> = s.split('/').collect();
        if parts.is_empty() || parts.len() > 3 {
            return None;
        }
        if parts.iter().any(|p| p.is_empty() || !p.bytes().all(|b| b.is_ascii_digit())) {
            return None;
        }
        let year = parts[0].parse().ok()?;
        let month = parts.get(1).map(|m| m.parse()).transpose().ok()?;
        let day = parts.get(2).map(|d| d.parse()).transpose().ok()?;
        Some(Self { year, month, day })
    }

    #[must_use]
    pub fn matches(&self, date: NaiveDate) -> bool {
        date.year() == self.year
            && self.month.map_or(true, |m| date.month() == m)
            && self.day.map_or(true, |d| date.day() == d)
    }
}

#[derive(Clone, Debug)]
enum Test {
    Absent,
    Substring(String),
    Member(String),
    AnyOf(Vec<String>),
    SetEquals(Vec<String>),
    Equals(i64),
    Within(i64, i64),
    LegalIn(String),
    ReleasedIn(DatePattern),
    ReleasedOn(NaiveDate),
    Predicate(Predicate),
}

/// A compiled test of one field against one query value.
#[derive(Clone, Debug)]
pub struct FieldMatcher {
    field: Field,
    test: Test,
}

impl FieldMatcher {
    /// Compile a query for a field, checking the query's shape.
    pub fn compile(field: Field, query: &Query, mode: MatchMode) -> Result<Self> {
        let test = match (field.kind(), query) {
            (_, Query::None) => Test::Absent,
            (_, Query::Predicate(p)) => Test::Predicate(p.clone()),

            (FieldKind::Text, Query::Text(s)) => Test::Substring(s.to_lowercase()),

            (FieldKind::TextSet, Query::Text(s)) => Test::Member(s.clone()),
            (FieldKind::TextSet, Query::TextList(list)) => match mode {
                MatchMode::Any => Test::AnyOf(list.clone()),
                MatchMode::Exact => Test::SetEquals(list.clone()),
            },

            (FieldKind::Numeric, Query::Int(v)) => Test::Equals(*v),
            (FieldKind::Numeric, Query::Range(lo, hi)) => Test::Within(*lo, *hi),

            (FieldKind::Legality, Query::Text(format)) => Test::LegalIn(format.clone()),

            (FieldKind::Dates, Query::Text(s)) => match DatePattern::parse(s) {
                Some(pattern) => Test::ReleasedIn(pattern),
                None => return Err(CatalogError::shape(field, query)),
            },
            (FieldKind::Dates, Query::Date(d)) => Test::ReleasedOn(*d),

            _ => return Err(CatalogError::shape(field, query)),
        };
        Ok(Self { field, test })
    }

    #[must_use]
    pub fn field(&self) -> Field {
        self.field
    }

    /// Test one record.
    #[must_use]
    pub fn matches(&self, card: &Card) -> bool {
        let value = self.field.value(card);
        match (&self.test, value) {
            (Test::Absent, v) => v.is_empty(),
            (Test::Predicate(p), v) => p.test(v),

            (Test::Substring(needle), FieldValue::Text(text)) => {
                text.is_some_and(|t| t.to_lowercase().contains(needle.as_str()))
            }

            (Test::Member(item), FieldValue::TextSet(set)) => set.iter().any(|v| v == item),
            (Test::AnyOf(items), FieldValue::TextSet(set)) => {
                items.iter().any(|item| set.iter().any(|v| v == item))
            }
            (Test::SetEquals(items), FieldValue::TextSet(set)) => {
                items.iter().all(|item| set.iter().any(|v| v == item))
                    && set.iter().all(|v| items.iter().any(|item| item == v))
            }

            (Test::Equals(expected), FieldValue::Numeric(n)) => n.concrete() == Some(*expected),
            (Test::Within(lo, hi), FieldValue::Numeric(n)) => {
                n.concrete().is_some_and(|v| *lo <= v && v <= *hi)
            }

            (Test::LegalIn(format), FieldValue::Legality(_)) => card.is_legal(format),

            (Test::ReleasedIn(pattern), FieldValue::Dates(_)) => {
                card.initial_release_date().is_some_and(|d| pattern.matches(d))
            }
            (Test::ReleasedOn(date), FieldValue::Dates(_)) => {
                card.initial_release_date() == Some(*date)
            }

            // Compilation pairs each test with a field kind it supports.
            _ => false,
        }
    }
}

/// Compile every `(field, query)` pair.
pub fn compile_all<'a>(
    entries: impl IntoIterator<Item = (Field, &'a Query)>,
    mode: MatchMode,
) -> Result<Vec<FieldMatcher>> {
    entries
        .into_iter()
        .map(|(field, query)| FieldMatcher::compile(field, query, mode))
        .collect()
}

/// Whether a record passes every matcher, with each test negated first
/// when `negate` is set.
#[must_use]
pub fn passes(card: &Card, matchers: &[FieldMatcher], negate: bool) -> bool {
    matchers.iter().all(|m| m.matches(card) != negate)
}
