//! Catalog construction, lookup and persistence tests.

mod common;

use std::sync::Arc;
use std::thread;

use chrono::NaiveDate;
use fab_catalog::cards::Field;
use fab_catalog::catalog::{CardCatalog, CardQuery, CatalogConfig, DuplicateKeyPolicy, SetQuery};
use fab_catalog::error::KeyKind;
use fab_catalog::query::GroupKey;
use fab_catalog::CatalogError;

use common::{cards, chane, sets};

fn catalog() -> CardCatalog {
    CardCatalog::builder()
        .with_config(CatalogConfig::new().validated())
        .with_cards(cards())
        .with_sets(sets())
        .build()
        .expect("fixture catalog should build")
}

#[test]
fn test_lookup_cards_cold_and_warm() {
    let catalog = catalog();
    let cold = catalog.lookup_cards("types", "Hero").unwrap();
    assert_eq!(cold.full_names(), vec!["Chane"]);
    assert_eq!(catalog.cached_fields(), vec![Field::Types]);

    let warm = catalog.lookup_cards("types", "Hero").unwrap();
    assert_eq!(warm, cold);
}

#[test]
fn test_lookup_card_by_each_key() {
    let catalog = catalog();
    let by_name = catalog.lookup_card(&CardQuery::full_name("Flic Flak (2)")).unwrap();
    let by_id = catalog.lookup_card(&CardQuery::identifier("WTR093")).unwrap();
    let by_variation = catalog.lookup_card(&CardQuery::variation("WTR093-U-R-S-S")).unwrap();
    assert_eq!(by_name, by_id);
    assert_eq!(by_id, by_variation);

    let err = catalog.lookup_card(&CardQuery::identifier("WTR999")).unwrap_err();
    assert!(matches!(err, CatalogError::NotFound { kind: KeyKind::Identifier, .. }));
    assert_eq!(err.to_string(), "no identifier matching \"WTR999\"");

    let err = catalog
        .lookup_card(&CardQuery::full_name("Chane").with_identifier("MON154"))
        .unwrap_err();
    assert!(matches!(err, CatalogError::AmbiguousQuery(_)));
}

#[test]
fn test_lookup_variant() {
    let catalog = catalog();
    let unlimited = catalog.lookup_variant("WTR043-U-M-S-S").unwrap();
    assert_eq!(unlimited.card(), catalog.lookup_card(&CardQuery::identifier("WTR043")).unwrap());
    assert_eq!((unlimited.card_set.as_str(), unlimited.edition.as_str()), ("WTR", "U"));
    assert_eq!(unlimited.release_date, NaiveDate::from_ymd_opt(2020, 11, 6));
    assert_eq!(unlimited.out_of_print_date, None);
    assert!(unlimited.check_consistency().is_ok());

    let history_pack = catalog.lookup_variant("1HP050-N-M-S-S").unwrap();
    assert_eq!(history_pack.card_set, "1HP");
    assert_eq!(history_pack.release_date, None);

    assert!(matches!(
        catalog.lookup_variant("WTR043-A-M-S-S"),
        Err(CatalogError::NotFound { kind: KeyKind::Variation, .. })
    ));
}

#[test]
fn test_lookup_set() {
    let catalog = catalog();
    let monarch = catalog.lookup_set(&SetQuery::identifier("MON")).unwrap();
    assert_eq!(monarch.name, "Monarch");
    assert_eq!(catalog.lookup_set(&SetQuery::name("Monarch")).unwrap(), monarch);
    assert!(matches!(
        catalog.lookup_set(&SetQuery::identifier("ELE")),
        Err(CatalogError::NotFound { kind: KeyKind::SetIdentifier, .. })
    ));
}

#[test]
fn test_lookup_cards_by_field_kind() {
    let catalog = catalog();
    assert_eq!(catalog.lookup_cards("keywords", "Crush").unwrap().len(), 1);
    assert_eq!(catalog.lookup_cards("defense", 3).unwrap().len(), 2);
    assert_eq!(catalog.lookup_cards("legality", "CC").unwrap().len(), 2);
    assert_eq!(catalog.lookup_cards("rarities", "R").unwrap().len(), 2);
    assert_eq!(catalog.lookup_cards("color", "Yellow").unwrap().full_names(), vec!["Flic Flak (2)"]);

    let monarch = NaiveDate::from_ymd_opt(2021, 5, 7).unwrap();
    assert_eq!(catalog.lookup_cards("dates", monarch).unwrap(), catalog.lookup_cards("dates", "2021/05/07").unwrap());
    assert_eq!(catalog.lookup_cards("dates", monarch).unwrap().full_names(), vec!["Chane"]);

    assert!(catalog.lookup_cards("types", "Wizard").unwrap().is_empty());
    assert!(matches!(catalog.lookup_cards("mana", 1), Err(CatalogError::UnknownField(_))));
}

#[test]
fn test_lookup_cards_without_values() {
    let catalog = catalog();
    let untyped = catalog.lookup_cards("subtypes", GroupKey::None).unwrap();
    assert_eq!(untyped.full_names(), vec!["Flic Flak (2)"]);

    let untagged = catalog.lookup_cards("tags", GroupKey::None).unwrap();
    assert_eq!(untagged.len(), 3);

    assert!(catalog.lookup_cards("life", GroupKey::None).unwrap().heroes().is_empty());
    assert_eq!(catalog.lookup_cards("talent_type", GroupKey::None).unwrap().len(), 2);
}

#[test]
fn test_lookup_matches_group() {
    let catalog = catalog();
    let groups = catalog.cards().group("types", 1, true).unwrap();
    for (key, members) in groups {
        assert_eq!(catalog.lookup_cards("types", key).unwrap(), members);
    }
}

#[test]
fn test_clear_cache() {
    let catalog = catalog();
    catalog.lookup_cards("types", "Hero").unwrap();
    catalog.lookup_cards("pitch", 1).unwrap();
    assert_eq!(catalog.cached_fields(), vec![Field::Pitch, Field::Types]);
    catalog.clear_cache();
    assert!(catalog.cached_fields().is_empty());
    assert_eq!(catalog.lookup_cards("pitch", 1).unwrap().len(), 1);
}

#[test]
fn test_concurrent_lookups() {
    let catalog = Arc::new(catalog());
    thread::scope(|s| {
        for _ in 0..4 {
            let catalog = Arc::clone(&catalog);
            s.spawn(move || {
                for _ in 0..25 {
                    let heroes = catalog.lookup_cards("types", "Hero").unwrap();
                    assert_eq!(heroes.full_names(), vec!["Chane"]);
                }
            });
        }
    });
    assert_eq!(catalog.cached_fields(), vec![Field::Types]);
}

#[test]
fn test_duplicate_full_name() {
    let builder = CardCatalog::builder().with_cards(cards()).with_card(chane());
    let err = builder.clone().build().unwrap_err();
    assert!(matches!(
        err,
        CatalogError::DuplicateKey { kind: KeyKind::FullName, first: 2, second: 3, .. }
    ));

    let catalog = builder
        .with_config(CatalogConfig::new().with_duplicate_keys(DuplicateKeyPolicy::LastWins))
        .build()
        .unwrap();
    assert_eq!(catalog.card_by_identifier("MON154"), catalog.get(3));
}

#[test]
fn test_validation_on_build() {
    let mut broken = chane();
    broken.color = Some("Blue".to_string());
    let err = CardCatalog::builder()
        .with_config(CatalogConfig::new().validated())
        .with_card(broken)
        .build()
        .unwrap_err();
    assert!(matches!(err, CatalogError::ConsistencyViolation { ref full_name, .. } if full_name == "Chane"));
}

#[test]
fn test_catalog_list_operations() {
    let catalog = catalog();
    let everything = catalog.cards();
    assert_eq!(everything.len(), catalog.len());
    assert_eq!(catalog.slice(0..2).full_names(), vec!["Crippling Crush (1)", "Flic Flak (2)"]);
    assert_eq!(catalog.sets().len(), 5);
    assert_eq!(catalog.iter().filter(|c| c.is_hero()).count(), 1);
}

#[test]
fn test_json_persistence() {
    let dir = std::env::temp_dir().join(format!("fab-catalog-tests-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("catalog.json");

    let original = catalog();
    original.save(&path).unwrap();
    let loaded = CardCatalog::load(&path).unwrap();
    assert_eq!(loaded.to_data(), original.to_data());
    assert_eq!(
        loaded.lookup_card(&CardQuery::variation("WTR043-U-M-S-S")).unwrap().name,
        "Crippling Crush"
    );

    assert!(matches!(
        original.save(dir.join("catalog.txt")),
        Err(CatalogError::InvalidArgument(_))
    ));
    std::fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn test_binary_snapshot() {
    let original = catalog();
    let bytes = original.to_bytes().unwrap();
    let restored = CardCatalog::from_bytes(&bytes).unwrap();
    assert_eq!(restored.to_data(), original.to_data());
}

#[test]
fn test_loading_malformed_json() {
    assert!(matches!(CardCatalog::from_json("{\"card_data\": 3}"), Err(CatalogError::Json(_))));
}
