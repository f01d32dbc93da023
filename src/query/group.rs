//! Grouping card lists by field value.
//!
//! `GroupKey` is the bucket key shared by `CardList::group` and the
//! catalog's secondary indices, so both explode records identically:
//!
//! - Text fields: the value, or `None` when absent
//! - Numeric fields: `Int`, `Variable`, or `None`
//! - Set-of-text fields: one bucket per element, `None` when empty
//! - Legality: one bucket per format the card is legal in (every format
//!   when the card has no legality data), `None` when legal nowhere
//! - Dates: one bucket per variation release date, `None` when unknown

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::cards::{dates, meta, Card, Field, FieldKind, FieldValue, Numeric};
use crate::error::Result;

use super::list::CardList;

/// A bucket key.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum GroupKey {
    /// Absent or empty value.
    None,
    Text(String),
    Int(i64),
    /// A numeric sentinel.
    Variable(String),
    Date(NaiveDate),
}

impl GroupKey {
    /// Adapt a loosely-typed key to the shape a field's buckets use.
    ///
    /// Text keys become `Variable` for numeric fields and `Date` for the
    /// dates field when they parse as `YYYY/MM/DD`.
    #[must_use]
    pub fn for_field(self, field: Field) -> Self {
        match (field.kind(), self) {
            (FieldKind::Numeric, GroupKey::Text(s)) => GroupKey::Variable(s),
            (FieldKind::Dates, GroupKey::Text(s)) => match dates::parse_date(&s) {
                Ok(d) => GroupKey::Date(d),
                Err(_) => GroupKey::Text(s),
            },
            (_, key) => key,
        }
    }

    #[must_use]
    pub fn is_none(&self) -> bool {
        matches!(self, GroupKey::None)
    }
}

impl std::fmt::Display for GroupKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GroupKey::None => f.write_str("None"),
            GroupKey::Text(s) | GroupKey::Variable(s) => f.write_str(s),
            GroupKey::Int(v) => write!(f, "{v}"),
            GroupKey::Date(d) => f.write_str(&dates::format_date(*d)),
        }
    }
}

impl From<&str> for GroupKey {
    fn from(v: &str) -> Self {
        GroupKey::Text(v.to_string())
    }
}

impl From<String> for GroupKey {
    fn from(v: String) -> Self {
        GroupKey::Text(v)
    }
}

impl From<i64> for GroupKey {
    fn from(v: i64) -> Self {
        GroupKey::Int(v)
    }
}

impl From<i32> for GroupKey {
    fn from(v: i32) -> Self {
        GroupKey::Int(v as i64)
    }
}

impl From<NaiveDate> for GroupKey {
    fn from(v: NaiveDate) -> Self {
        GroupKey::Date(v)
    }
}

impl From<&Numeric> for GroupKey {
    fn from(v: &Numeric) -> Self {
        match v {
            Numeric::Absent => GroupKey::None,
            Numeric::Variable(s) => GroupKey::Variable(s.clone()),
            Numeric::Concrete(n) => GroupKey::Int(*n),
        }
    }
}

/// Bucket keys a record contributes to for a field.
#[must_use]
pub fn keys_for(card: &Card, field: Field) -> SmallVec<[GroupKey; 4]> {
    let mut keys = SmallVec::new();
    match field.value(card) {
        FieldValue::Text(v) => {
            keys.push(v.map_or(GroupKey::None, GroupKey::from));
        }
        FieldValue::Numeric(n) => keys.push(GroupKey::from(n)),
        FieldValue::TextSet(set) => {
            if set.is_empty() {
                keys.push(GroupKey::None);
            }
            for v in set {
                let key = GroupKey::Text(v.clone());
                if !keys.contains(&key) {
                    keys.push(key);
                }
            }
        }
        FieldValue::Legality(map) if map.is_empty() => {
            keys.extend(meta::GAME_FORMATS.iter().map(|(format, _)| GroupKey::from(*format)));
        }
        FieldValue::Legality(map) => {
            keys.extend(
                map.iter()
                    .filter(|(_, legal)| **legal)
                    .map(|(format, _)| GroupKey::Text(format.clone())),
            );
            if keys.is_empty() {
                keys.push(GroupKey::None);
            }
        }
        FieldValue::Dates(map) => {
            if map.is_empty() {
                keys.push(GroupKey::None);
            }
            for (release, _) in map.values() {
                let key = release.map_or(GroupKey::None, GroupKey::Date);
                if !keys.contains(&key) {
                    keys.push(key);
                }
            }
        }
    }
    keys
}

impl CardList {
    /// Partition the list by the values of a field.
    ///
    /// Buckets holding fewer than `count_threshold` cards are dropped (a
    /// threshold of 0 behaves as 1). With `include_none` unset, absent and
    /// empty values are left out.
    pub fn group(
        &self,
        by: impl AsRef<str>,
        count_threshold: usize,
        include_none: bool,
    ) -> Result<BTreeMap<GroupKey, CardList>> {
        let field = Field::parse(by.as_ref())?;
        let mut groups: BTreeMap<GroupKey, CardList> = BTreeMap::new();
        for card in self.iter() {
            for key in keys_for(card, field) {
                if key.is_none() && !include_none {
                    continue;
                }
                groups.entry(key).or_default().push(card.clone());
            }
        }
        let threshold = count_threshold.max(1);
        groups.retain(|_, cards| cards.len() >= threshold);
        Ok(groups)
    }
}
