//! Shared card fixtures for the integration tests.

#![allow(dead_code)]

use chrono::NaiveDate;
use fab_catalog::cards::{Card, CardSet};
use fab_catalog::query::CardList;

fn date(y: i32, m: u32, d: u32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(y, m, d)
}

pub fn crippling_crush() -> Card {
    Card::new("Crippling Crush", "Action")
        .with_pitch(1)
        .with_cost(7)
        .with_defense(3)
        .with_power(11)
        .with_class("Guardian")
        .with_subtypes(["Attack"])
        .with_type_text("Guardian Action - Attack")
        .with_keywords(["Deal", "Discard", "Specialization"])
        .with_label_keywords(["Crush"])
        .with_body("**Crush** - If Crippling Crush deals 4 or more damage to a hero, they discard 2 random cards.")
        .with_variation("1HP050-N-M-S-S")
        .with_variation("WTR043-A-M-R-S")
        .with_variation("WTR043-U-M-S-S")
        .with_dates("WTR043-A-M-R-S", date(2019, 10, 11), date(2019, 10, 11))
        .with_dates("WTR043-U-M-S-S", date(2020, 11, 6), None)
        .with_legality("B", true)
        .with_legality("C", true)
        .with_legality("CC", true)
}

pub fn flic_flak() -> Card {
    Card::new("Flic Flak", "Defense Reaction")
        .with_pitch(2)
        .with_cost(0)
        .with_defense(3)
        .with_class("Ninja")
        .with_type_text("Ninja Defense Reaction")
        .with_label_keywords(["Combo"])
        .with_body("If the combat chain contains an attack card with **combo**, Flic Flak gains +2 defense.")
        .with_variation("WTR093-A-R-S-S")
        .with_variation("WTR093-U-R-S-S")
        .with_dates("WTR093-A-R-S-S", date(2019, 10, 11), date(2019, 10, 11))
        .with_legality("B", true)
        .with_legality("C", true)
        .with_legality("CC", true)
}

pub fn chane() -> Card {
    Card::new("Chane", "Hero")
        .with_intellect(4)
        .with_life(20)
        .with_class("Runeblade")
        .with_talent("Shadow")
        .with_subtypes(["Young"])
        .with_type_text("Shadow Runeblade Hero - Young")
        .with_variation("HER037-N-P-S-S")
        .with_variation("CHN001-N-R-S-S")
        .with_variation("MON154-F-T-S-S")
        .with_dates("MON154-F-T-S-S", date(2021, 5, 7), None)
        .with_legality("B", true)
        .with_legality("C", false)
        .with_legality("CC", false)
}

pub fn cards() -> Vec<Card> {
    vec![crippling_crush(), flic_flak(), chane()]
}

pub fn card_list() -> CardList {
    CardList::from(cards())
}

pub fn sets() -> Vec<CardSet> {
    vec![
        CardSet::new("WTR", "Welcome to Rathe")
            .with_id_range("WTR000", "WTR225")
            .with_edition("A", date(2019, 10, 11), date(2019, 10, 11))
            .with_edition("U", date(2020, 11, 6), None),
        CardSet::new("MON", "Monarch")
            .with_id_range("MON000", "MON306")
            .with_edition("F", date(2021, 5, 7), date(2021, 5, 7)),
        CardSet::new("1HP", "History Pack 1"),
        CardSet::new("CHN", "Chane Blitz Deck"),
        CardSet::new("HER", "Promos"),
    ]
}
