//! The card catalog.
//!
//! Records are collected in a `CatalogBuilder`; `build` indexes them and
//! returns an immutable `CardCatalog`. To change the records, convert the
//! catalog back with `into_builder` and rebuild.
//!
//! ## Example
//!
//! ```
//! use fab_catalog::cards::{Card, CardSet};
//! use fab_catalog::catalog::{CardCatalog, CardQuery};
//!
//! let catalog = CardCatalog::builder()
//!     .with_card(Card::new("Chane", "Hero").with_variation("MON154-F-T-S-S"))
//!     .with_set(CardSet::new("MON", "Monarch"))
//!     .build()
//!     .unwrap();
//!
//! let chane = catalog.lookup_card(&CardQuery::identifier("MON154")).unwrap();
//! assert_eq!(chane.name, "Chane");
//! assert_eq!(catalog.lookup_cards("types", "Hero").unwrap().len(), 1);
//! ```

use std::ops::Range;

use im::Vector;
use tracing::info;

use crate::cards::{Card, CardSet, CardVariant, Field};
use crate::error::{KeyKind, Result};
use crate::query::{CardList, GroupKey};

use super::config::CatalogConfig;
use super::index::{PrimaryIndex, SecondaryCache};
use super::lookup::{CardQuery, SetQuery};

/// Records waiting to be indexed.
#[derive(Clone, Debug, Default)]
pub struct CatalogBuilder {
    cards: Vec<Card>,
    sets: Vec<CardSet>,
    config: CatalogConfig,
}

impl CatalogBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_config(mut self, config: CatalogConfig) -> Self {
        self.config = config;
        self
    }

    #[must_use]
    pub fn with_card(mut self, card: Card) -> Self {
        self.cards.push(card);
        self
    }

    #[must_use]
    pub fn with_cards(mut self, cards: impl IntoIterator<Item = Card>) -> Self {
        self.cards.extend(cards);
        self
    }

    #[must_use]
    pub fn with_set(mut self, set: CardSet) -> Self {
        self.sets.push(set);
        self
    }

    #[must_use]
    pub fn with_sets(mut self, sets: impl IntoIterator<Item = CardSet>) -> Self {
        self.sets.extend(sets);
        self
    }

    pub fn add_card(&mut self, card: Card) {
        self.cards.push(card);
    }

    pub fn add_set(&mut self, set: CardSet) {
        self.sets.push(set);
    }

    /// Mutable access to the pending records.
    pub fn cards_mut(&mut self) -> &mut Vec<Card> {
        &mut self.cards
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Index the records.
    ///
    /// Fails with `DuplicateKey` when two records share a unique key (unless
    /// the config keeps the last one), or with `ConsistencyViolation` when
    /// validation is enabled and a record is inconsistent.
    pub fn build(self) -> Result<CardCatalog> {
        if self.config.validate_records {
            for card in &self.cards {
                card.check_consistency()?;
            }
        }
        let cards: Vector<Card> = self.cards.into_iter().collect();
        let primary = PrimaryIndex::build(&cards, &self.sets, self.config.duplicate_keys)?;
        info!(cards = cards.len(), sets = self.sets.len(), "built card catalog");
        Ok(CardCatalog {
            cards,
            sets: self.sets,
            primary,
            secondary: SecondaryCache::new(),
            config: self.config,
        })
    }
}

/// An indexed, immutable collection of cards and sets.
///
/// Point lookups use the unique-key indices built with the catalog.
/// `lookup_cards` builds an index for its field on first use and reuses it
/// afterwards; `clear_cache` drops those indices.
#[derive(Debug)]
pub struct CardCatalog {
    cards: Vector<Card>,
    sets: Vec<CardSet>,
    primary: PrimaryIndex,
    secondary: SecondaryCache,
    config: CatalogConfig,
}

impl CardCatalog {
    #[must_use]
    pub fn builder() -> CatalogBuilder {
        CatalogBuilder::new()
    }

    /// Build a catalog with the default configuration.
    pub fn new(cards: impl IntoIterator<Item = Card>, sets: impl IntoIterator<Item = CardSet>) -> Result<Self> {
        Self::builder().with_cards(cards).with_sets(sets).build()
    }

    /// Turn the catalog back into a builder holding the same records.
    #[must_use]
    pub fn into_builder(self) -> CatalogBuilder {
        CatalogBuilder {
            cards: self.cards.into_iter().collect(),
            sets: self.sets,
            config: self.config,
        }
    }

    #[must_use]
    pub fn config(&self) -> &CatalogConfig {
        &self.config
    }

    // === Point lookups ===

    /// The card named by the query.
    pub fn lookup_card(&self, query: &CardQuery) -> Result<&Card> {
        let (kind, key) = query.resolve()?;
        let position = self.primary.require(kind, key)?;
        Ok(&self.cards[position])
    }

    /// The print named by a variation code.
    pub fn lookup_variant(&self, variation: &str) -> Result<CardVariant> {
        let position = self.primary.require(KeyKind::Variation, variation)?;
        CardVariant::new(&self.cards[position], variation)
    }

    /// The set named by the query.
    pub fn lookup_set(&self, query: &SetQuery) -> Result<&CardSet> {
        let (kind, key) = query.resolve()?;
        let position = self.primary.require(kind, key)?;
        Ok(&self.sets[position])
    }

    /// The card declaring an identifier, if any.
    #[must_use]
    pub fn card_by_identifier(&self, identifier: &str) -> Option<&Card> {
        self.primary
            .position(KeyKind::Identifier, identifier)
            .and_then(|p| self.cards.get(p))
    }

    // === Field lookups ===

    /// Every card whose field holds a value, in catalog order.
    ///
    /// Set-of-text fields match on any element, legality on the formats a
    /// card is legal in, and dates on variation release dates. Text keys
    /// are adapted to the field, so `"X"` finds a cost of `X` and
    /// `"2021/05/07"` finds a release date. Unknown values return an empty
    /// list.
    pub fn lookup_cards(&self, field: impl AsRef<str>, value: impl Into<GroupKey>) -> Result<CardList> {
        let field = Field::parse(field.as_ref())?;
        let key = value.into().for_field(field);
        let index = self.secondary.get_or_build(&self.cards, field);
        Ok(index
            .positions(&key)
            .iter()
            .filter_map(|&p| self.cards.get(p).cloned())
            .collect())
    }

    /// Drop every cached field index.
    pub fn clear_cache(&self) {
        self.secondary.clear();
    }

    /// Fields with a cached index, sorted.
    #[must_use]
    pub fn cached_fields(&self) -> Vec<Field> {
        self.secondary.fields()
    }

    // === Access ===

    #[must_use]
    pub fn get(&self, position: usize) -> Option<&Card> {
        self.cards.get(position)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Card> + '_ {
        self.cards.iter()
    }

    /// Every card as a list. The copy shares storage with the catalog.
    #[must_use]
    pub fn cards(&self) -> CardList {
        CardList::from(self.cards.clone())
    }

    #[must_use]
    pub fn sets(&self) -> &[CardSet] {
        &self.sets
    }

    /// Cards at the given positions, clamped to the catalog.
    #[must_use]
    pub fn slice(&self, range: Range<usize>) -> CardList {
        let end = range.end.min(self.cards.len());
        let start = range.start.min(end);
        CardList::from(self.cards.clone().slice(start..end))
    }
}

impl<'a> IntoIterator for &'a CardCatalog {
    type Item = &'a Card;
    type IntoIter = im::vector::Iter<'a, Card>;

    fn into_iter(self) -> Self::IntoIter {
        self.cards.iter()
    }
}
