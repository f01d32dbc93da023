//! Sorting card lists by field value.

use chrono::NaiveDate;

use crate::cards::{meta, Card, Field, FieldValue, Numeric};
use crate::error::{CatalogError, Result};

use super::list::CardList;

/// Sort slot of one record.
///
/// Variant order is the ascending order of the groups: absent records,
/// then sentinel values, then real values. Only one valued variant occurs
/// per field.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
enum SortKey {
    Absent(String),
    Variable(String),
    Text(String),
    Count(usize),
    Rank(usize),
    Int(i64),
    Date(NaiveDate),
}

fn sort_key(card: &Card, field: Field, reverse: bool) -> SortKey {
    let absent = || SortKey::Absent(card.full_name.clone());
    match field.value(card) {
        FieldValue::Text(None) => absent(),
        FieldValue::Text(Some(v)) => SortKey::Text(v.to_string()),
        FieldValue::Numeric(Numeric::Absent) => absent(),
        FieldValue::Numeric(Numeric::Variable(_)) => SortKey::Variable(card.full_name.clone()),
        FieldValue::Numeric(Numeric::Concrete(v)) => SortKey::Int(*v),
        FieldValue::TextSet(set) if set.is_empty() => absent(),
        FieldValue::TextSet(_) if field == Field::Rarities => {
            let rarity = if reverse { card.highest_rarity() } else { card.lowest_rarity() };
            match rarity.and_then(meta::rarity_rank) {
                Some(rank) => SortKey::Rank(rank),
                None => absent(),
            }
        }
        FieldValue::TextSet(set) => SortKey::Count(set.len()),
        FieldValue::Dates(_) => card.initial_release_date().map_or_else(absent, SortKey::Date),
        // Rejected before any key is computed.
        FieldValue::Legality(_) => absent(),
    }
}

impl CardList {
    /// Stable sort by a field.
    ///
    /// Ascending order puts records without a value first (by full name),
    /// then records with a sentinel value (by full name), then the rest by
    /// value. `reverse` flips the whole order. Set-of-text fields sort by
    /// size, except rarities, which sort by the lowest rarity ascending and
    /// the highest rarity descending.
    pub fn sort(&self, by: impl AsRef<str>, reverse: bool) -> Result<CardList> {
        let field = Field::parse(by.as_ref())?;
        if field == Field::Legality {
            return Err(CatalogError::Unsupported {
                operation: "sort",
                field: field.to_string(),
            });
        }
        let mut keyed: Vec<(SortKey, Card)> = self
            .iter()
            .map(|card| (sort_key(card, field, reverse), card.clone()))
            .collect();
        keyed.sort_by(|(a, _), (b, _)| {
            let ord = a.cmp(b);
            if reverse {
                ord.reverse()
            } else {
                ord
            }
        });
        Ok(keyed.into_iter().map(|(_, card)| card).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cards() -> CardList {
        CardList::from(vec![
            Card::new("Zealous", "Action").with_cost(3).with_variation("ELE001-F-C-S-S"),
            Card::new("Brute", "Action").with_cost("X").with_variation("WTR001-A-M-S-S"),
            Card::new("Chane", "Hero").with_variation("MON154-F-T-S-S").with_variation("CHN001-N-P-S-S"),
            Card::new("Axe", "Weapon").with_cost(0),
            Card::new("Aether", "Action").with_cost("*"),
        ])
    }

    #[test]
    fn test_sort_numeric_groups() {
        let sorted = cards().sort("cost", false).unwrap();
        assert_eq!(sorted.full_names(), vec!["Chane", "Aether", "Brute", "Axe", "Zealous"]);

        let reversed = cards().sort("cost", true).unwrap();
        assert_eq!(reversed.full_names(), vec!["Zealous", "Axe", "Brute", "Aether", "Chane"]);
    }

    #[test]
    fn test_sort_text() {
        let sorted = cards().sort("name", false).unwrap();
        assert_eq!(sorted.full_names(), vec!["Aether", "Axe", "Brute", "Chane", "Zealous"]);
    }

    #[test]
    fn test_sort_set_by_size() {
        let sorted = cards().sort("identifiers", false).unwrap();
        // No identifiers first, then one, then two
        assert_eq!(sorted.full_names(), vec!["Aether", "Axe", "Zealous", "Brute", "Chane"]);
    }

    #[test]
    fn test_sort_rarities() {
        let sorted = cards().sort("rarities", false).unwrap();
        // Chane's lowest rarity is Token
        assert_eq!(sorted.full_names(), vec!["Aether", "Axe", "Chane", "Zealous", "Brute"]);

        let reversed = cards().sort("rarities", true).unwrap();
        // Chane's highest rarity is Promotion
        assert_eq!(reversed.full_names(), vec!["Chane", "Brute", "Zealous", "Axe", "Aether"]);
    }

    #[test]
    fn test_sort_is_stable_and_idempotent() {
        let once = cards().sort("types", false).unwrap();
        assert_eq!(once.full_names(), vec!["Zealous", "Brute", "Chane", "Axe", "Aether"]);
        assert_eq!(once.sort("types", false).unwrap(), once);
    }

    #[test]
    fn test_sort_dates() {
        let list = CardList::from(vec![
            Card::new("Late", "Action").with_dates("X-N-C-S-S", NaiveDate::from_ymd_opt(2022, 1, 1), None),
            Card::new("Unknown", "Action"),
            Card::new("Early", "Action").with_dates("Y-N-C-S-S", NaiveDate::from_ymd_opt(2019, 1, 1), None),
        ]);
        assert_eq!(list.sort("dates", false).unwrap().full_names(), vec!["Unknown", "Early", "Late"]);
    }

    #[test]
    fn test_sort_unsupported() {
        assert!(matches!(
            cards().sort("legality", false),
            Err(CatalogError::Unsupported { operation: "sort", .. })
        ));
        assert!(matches!(cards().sort("mana", false), Err(CatalogError::UnknownField(_))));
        assert!(CardList::new().sort("cost", false).unwrap().is_empty());
    }
}
