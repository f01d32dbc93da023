//! Property tests for the query engine and catalog.

use fab_catalog::cards::{Card, Field, Numeric};
use fab_catalog::catalog::{CardCatalog, CardQuery};
use fab_catalog::query::{CardList, Criteria, Query};
use proptest::prelude::*;

fn numeric() -> impl Strategy<Value = Numeric> {
    prop_oneof![
        Just(Numeric::Absent),
        Just(Numeric::variable("X")),
        (0i64..6).prop_map(Numeric::Concrete),
    ]
}

fn card() -> impl Strategy<Value = Card> {
    (
        "[A-E][a-z]{0,3}",
        prop::option::of(1i64..=3),
        numeric(),
        numeric(),
        prop::sample::subsequence(vec!["Action", "Attack", "Hero", "Ninja", "Guardian"], 0..=3),
        prop::sample::subsequence(vec!["Combo", "Crush", "Go again"], 0..=2),
        prop::sample::subsequence(vec!["T", "C", "R", "M"], 0..=2),
    )
        .prop_map(|(name, pitch, cost, defense, types, keywords, rarities)| {
            let mut card = Card {
                full_name: name.clone(),
                name,
                cost,
                defense,
                ..Card::default()
            };
            if let Some(pitch) = pitch {
                card = card.with_pitch(pitch);
            }
            card.types = types.into_iter().map(String::from).collect();
            card.keywords = keywords.into_iter().map(String::from).collect();
            card.rarities = rarities.into_iter().map(String::from).collect();
            card
        })
}

fn card_list() -> impl Strategy<Value = CardList> {
    prop::collection::vec(card(), 0..12).prop_map(CardList::from)
}

fn criterion() -> impl Strategy<Value = Criteria> {
    prop_oneof![
        Just(Criteria::new().with("cost", (0, 3))),
        Just(Criteria::new().with("defense", Query::None)),
        Just(Criteria::new().with("keywords", "Crush")),
        Just(Criteria::new().with("types", vec!["Hero", "Ninja"])),
        Just(Criteria::new().with("name", "a")),
        Just(Criteria::new().with("color", "Red")),
    ]
}

const SORTABLE: &[&str] = &["name", "full_name", "color", "cost", "defense", "pitch", "types", "keywords", "rarities", "dates"];

proptest! {
    #[test]
    fn test_filter_partitions(cards in card_list(), criteria in criterion()) {
        let kept = cards.filter(&criteria, false).unwrap();
        let dropped = cards.filter(&criteria, true).unwrap();
        prop_assert_eq!(kept.len() + dropped.len(), cards.len());
        for card in cards.iter() {
            let single = CardList::from(vec![card.clone()]);
            let hits = single.filter(&criteria, false).unwrap().len()
                + single.filter(&criteria, true).unwrap().len();
            prop_assert_eq!(hits, 1);
        }
    }

    #[test]
    fn test_sort_is_idempotent(cards in card_list(), field in prop::sample::select(SORTABLE), reverse in any::<bool>()) {
        let once = cards.sort(field, reverse).unwrap();
        let twice = once.sort(field, reverse).unwrap();
        prop_assert_eq!(once.len(), cards.len());
        prop_assert_eq!(twice, once);
    }

    #[test]
    fn test_group_reconstructs_valued_records(
        cards in card_list(),
        field in prop::sample::select(vec![Field::Types, Field::Keywords, Field::Cost, Field::Color]),
    ) {
        let groups = cards.group(field, 1, false).unwrap();
        for members in groups.values() {
            prop_assert!(members.iter().all(|c| !field.value(c).is_empty()));
        }
        for card in cards.iter().filter(|c| !field.value(c).is_empty()) {
            prop_assert!(groups.values().any(|members| members.iter().any(|c| c == card)));
        }
    }

    #[test]
    fn test_card_json_round_trip(card in card()) {
        let json = card.to_json().unwrap();
        prop_assert_eq!(Card::from_json(&json).unwrap(), card);
    }

    #[test]
    fn test_identifier_lookup_returns_declaring_card(cards in prop::collection::vec(card(), 1..10)) {
        let cards: Vec<Card> = cards
            .into_iter()
            .enumerate()
            .map(|(i, mut card)| {
                card.full_name = format!("{} #{i}", card.full_name);
                card.with_variation(&format!("TST{i:03}-A-C-S-S"))
            })
            .collect();
        let catalog = CardCatalog::new(cards.clone(), Vec::new()).unwrap();
        for (i, card) in cards.iter().enumerate() {
            let found = catalog.lookup_card(&CardQuery::identifier(format!("TST{i:03}"))).unwrap();
            prop_assert_eq!(found, card);
        }
    }
}
