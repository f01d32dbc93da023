//! Card lists.
//!
//! `CardList` is an ordered sequence of cards backed by `im::Vector`, so
//! copies are O(1) and writes never reach another list's storage. Every
//! query operation returns a new list and leaves its input untouched.

use std::collections::BTreeMap;

use im::Vector;
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use crate::cards::{meta, Card, DateRange, Field, FieldValue};
use crate::error::{CatalogError, Result};

use super::criteria::Criteria;
use super::matcher::{self, MatchMode};
use super::rng::ListRng;

/// Where `CardList::draw` takes cards from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DrawOrder {
    /// The last cards of the list, kept in list order.
    Back,
    /// From the start of the list.
    Front,
    /// From random positions, never drawing a card twice.
    Random,
}

/// A value collected from a field.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Collected {
    Int(i64),
    Text(String),
}

/// An ordered collection of cards.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CardList {
    cards: Vector<Card>,
}

impl CardList {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Card> {
        self.cards.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Card> + '_ {
        self.cards.iter()
    }

    pub fn push(&mut self, card: Card) {
        self.cards.push_back(card);
    }

    #[must_use]
    pub fn to_vec(&self) -> Vec<Card> {
        self.cards.iter().cloned().collect()
    }

    // === Filtering ===

    /// Keep the cards passing every field query.
    ///
    /// List queries against set-of-text fields match when any element is
    /// present. With `negate`, each field test is inverted before the
    /// results are combined: a card is kept when it fails every test.
    ///
    /// ```
    /// use fab_catalog::cards::Card;
    /// use fab_catalog::query::{CardList, Criteria};
    ///
    /// let cards = CardList::from(vec![
    ///     Card::new("Crush", "Action").with_cost(7),
    ///     Card::new("Flic Flak", "Defense Reaction").with_cost(0),
    /// ]);
    /// let cheap = cards.filter(&Criteria::new().with("cost", (0, 2)), false).unwrap();
    /// assert_eq!(cheap.full_names(), vec!["Flic Flak"]);
    /// ```
    pub fn filter(&self, criteria: &Criteria, negate: bool) -> Result<CardList> {
        self.filter_with(criteria, negate, MatchMode::Any)
    }

    /// Like `filter`, but list queries against set-of-text fields require
    /// the field to hold exactly the listed values.
    pub fn filter_exact(&self, criteria: &Criteria, negate: bool) -> Result<CardList> {
        self.filter_with(criteria, negate, MatchMode::Exact)
    }

    fn filter_with(&self, criteria: &Criteria, negate: bool, mode: MatchMode) -> Result<CardList> {
        if self.is_empty() {
            return Ok(self.clone());
        }
        let matchers = matcher::compile_all(criteria.resolve()?, mode)?;
        Ok(self
            .iter()
            .filter(|card| matcher::passes(card, &matchers, negate))
            .cloned()
            .collect())
    }

    // === Collections ===

    /// Every value of a field across the list.
    ///
    /// Absent scalars and non-concrete numbers are skipped. Rarities,
    /// foilings and art types sort by rank; other values sort naturally.
    pub fn collect(&self, field: impl AsRef<str>, reverse: bool, sort: bool) -> Result<Vec<Collected>> {
        let field = Field::parse(field.as_ref())?;
        let mut values = Vec::new();
        for card in self.iter() {
            match field.value(card) {
                FieldValue::Text(Some(v)) => values.push(Collected::Text(v.to_string())),
                FieldValue::Text(None) => {}
                FieldValue::TextSet(set) => values.extend(set.iter().cloned().map(Collected::Text)),
                FieldValue::Numeric(n) => values.extend(n.concrete().map(Collected::Int)),
                FieldValue::Legality(_) | FieldValue::Dates(_) => {
                    return Err(CatalogError::Unsupported {
                        operation: "collect",
                        field: field.to_string(),
                    })
                }
            }
        }
        if sort {
            sort_collected(field, &mut values, reverse);
        }
        Ok(values)
    }

    /// Unique values of a field across the list.
    pub fn collect_unique(&self, field: impl AsRef<str>, reverse: bool, sort: bool) -> Result<Vec<Collected>> {
        let mut values = self.collect(field.as_ref(), false, false)?;
        let mut seen = FxHashSet::default();
        values.retain(|v| seen.insert(v.clone()));
        if sort {
            sort_collected(Field::parse(field.as_ref())?, &mut values, reverse);
        }
        Ok(values)
    }

    /// Unique text values of a field, sorted.
    ///
    /// Fails like `collect` for fields that can't be collected.
    pub fn unique_text(&self, field: Field) -> Result<Vec<String>> {
        Ok(self
            .collect_unique(field, false, true)?
            .into_iter()
            .filter_map(|v| match v {
                Collected::Text(s) => Some(s),
                Collected::Int(_) => None,
            })
            .collect())
    }

    /// Number of copies of each card, by full name.
    #[must_use]
    pub fn counts(&self) -> BTreeMap<String, usize> {
        let mut counts = BTreeMap::new();
        for card in self.iter() {
            *counts.entry(card.full_name.clone()).or_insert(0) += 1;
        }
        counts
    }

    #[must_use]
    pub fn full_names(&self) -> Vec<&str> {
        self.iter().map(|c| c.full_name.as_str()).collect()
    }

    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        self.iter().map(|c| c.name.as_str()).collect()
    }

    /// Merged variation dates of every card (first card wins).
    #[must_use]
    pub fn dates(&self) -> BTreeMap<String, DateRange> {
        let mut merged = BTreeMap::new();
        for card in self.iter() {
            for (k, v) in &card.dates {
                merged.entry(k.clone()).or_insert(*v);
            }
        }
        merged
    }

    /// Per-format legality of the whole list.
    ///
    /// A list is legal in a format unless a card carrying that format is
    /// not legal in it.
    #[must_use]
    pub fn legality(&self) -> BTreeMap<&'static str, bool> {
        meta::GAME_FORMATS
            .iter()
            .map(|(format, _)| {
                let legal = self
                    .iter()
                    .filter(|c| c.legality.contains_key(*format))
                    .all(|c| c.is_legal(format));
                (*format, legal)
            })
            .collect()
    }

    fn subset(&self, predicate: impl Fn(&Card) -> bool) -> CardList {
        self.iter().filter(|c| predicate(c)).cloned().collect()
    }

    #[must_use]
    pub fn actions(&self) -> CardList {
        self.subset(Card::is_action)
    }

    #[must_use]
    pub fn attacks(&self) -> CardList {
        self.subset(Card::is_attack)
    }

    #[must_use]
    pub fn attack_reactions(&self) -> CardList {
        self.subset(Card::is_attack_reaction)
    }

    #[must_use]
    pub fn auras(&self) -> CardList {
        self.subset(Card::is_aura)
    }

    #[must_use]
    pub fn defense_reactions(&self) -> CardList {
        self.subset(Card::is_defense_reaction)
    }

    #[must_use]
    pub fn equipment(&self) -> CardList {
        self.subset(Card::is_equipment)
    }

    #[must_use]
    pub fn heroes(&self) -> CardList {
        self.subset(Card::is_hero)
    }

    #[must_use]
    pub fn instants(&self) -> CardList {
        self.subset(Card::is_instant)
    }

    #[must_use]
    pub fn item_cards(&self) -> CardList {
        self.subset(Card::is_item)
    }

    #[must_use]
    pub fn reactions(&self) -> CardList {
        self.subset(Card::is_reaction)
    }

    #[must_use]
    pub fn tokens(&self) -> CardList {
        self.subset(Card::is_token)
    }

    #[must_use]
    pub fn weapons(&self) -> CardList {
        self.subset(Card::is_weapon)
    }

    #[must_use]
    pub fn num_red(&self) -> usize {
        self.iter().filter(|c| c.is_red()).count()
    }

    #[must_use]
    pub fn num_yellow(&self) -> usize {
        self.iter().filter(|c| c.is_yellow()).count()
    }

    #[must_use]
    pub fn num_blue(&self) -> usize {
        self.iter().filter(|c| c.is_blue()).count()
    }

    // === Randomness ===

    /// Shuffle the list in place.
    pub fn shuffle(&mut self, rng: &mut ListRng) {
        let mut cards = self.to_vec();
        rng.shuffle(&mut cards);
        self.cards = cards.into_iter().collect();
    }

    /// Draw `num` cards, optionally removing them from this list.
    pub fn draw(&mut self, num: usize, order: DrawOrder, remove: bool, rng: &mut ListRng) -> Result<CardList> {
        if num == 0 || num > self.len() {
            return Err(CatalogError::InvalidArgument(format!(
                "cannot draw {num} cards from a list of {}",
                self.len()
            )));
        }
        let mut pool = if remove { std::mem::take(&mut self.cards) } else { self.cards.clone() };
        let mut drawn = Vector::new();
        for _ in 0..num {
            // `num <= len` keeps the pool non-empty here.
            match order {
                DrawOrder::Back => {
                    if let Some(card) = pool.pop_back() {
                        drawn.push_front(card);
                    }
                }
                DrawOrder::Front => drawn.extend(pool.pop_front()),
                DrawOrder::Random => drawn.push_back(pool.remove(rng.gen_index(pool.len()))),
            }
        }
        if remove {
            self.cards = pool;
        }
        Ok(CardList { cards: drawn })
    }

    // === Serialization ===

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

fn sort_collected(field: Field, values: &mut [Collected], reverse: bool) {
    let rank: Option<fn(&str) -> Option<usize>> = match field {
        Field::Rarities => Some(meta::rarity_rank),
        Field::Foilings => Some(meta::foiling_rank),
        Field::ArtTypes => Some(meta::art_type_rank),
        _ => None,
    };
    match rank {
        Some(rank) => values.sort_by_key(|v| match v {
            Collected::Text(s) => rank(s).unwrap_or(usize::MAX),
            Collected::Int(_) => usize::MAX,
        }),
        None => values.sort(),
    }
    if reverse {
        values.reverse();
    }
}

impl From<Vec<Card>> for CardList {
    fn from(cards: Vec<Card>) -> Self {
        cards.into_iter().collect()
    }
}

impl From<Vector<Card>> for CardList {
    fn from(cards: Vector<Card>) -> Self {
        Self { cards }
    }
}

impl FromIterator<Card> for CardList {
    fn from_iter<I: IntoIterator<Item = Card>>(iter: I) -> Self {
        Self {
            cards: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for CardList {
    type Item = Card;
    type IntoIter = im::vector::ConsumingIter<Card>;

    fn into_iter(self) -> Self::IntoIter {
        self.cards.into_iter()
    }
}

impl<'a> IntoIterator for &'a CardList {
    type Item = &'a Card;
    type IntoIter = im::vector::Iter<'a, Card>;

    fn into_iter(self) -> Self::IntoIter {
        self.cards.iter()
    }
}

impl std::ops::Index<usize> for CardList {
    type Output = Card;

    fn index(&self, index: usize) -> &Card {
        &self.cards[index]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cards() -> CardList {
        CardList::from(vec![
            Card::new("Crush", "Action")
                .with_pitch(1)
                .with_cost(7)
                .with_label_keywords(["Crush"])
                .with_variation("WTR043-A-M-R-S")
                .with_legality("CC", true),
            Card::new("Flic Flak", "Defense Reaction")
                .with_pitch(2)
                .with_cost(0)
                .with_variation("WTR093-A-R-S-S")
                .with_legality("CC", true),
            Card::new("Chane", "Hero")
                .with_life(20)
                .with_variation("MON154-F-T-S-S")
                .with_legality("CC", false),
        ])
    }

    #[test]
    fn test_filter_preserves_order() {
        let criteria = Criteria::new().with("types", vec!["Hero", "Action"]);
        let result = cards().filter(&criteria, false).unwrap();
        assert_eq!(result.full_names(), vec!["Crush (1)", "Chane"]);
    }

    #[test]
    fn test_filter_negate() {
        let criteria = Criteria::new().with("keywords", "Crush");
        let result = cards().filter(&criteria, true).unwrap();
        assert_eq!(result.full_names(), vec!["Flic Flak (2)", "Chane"]);
    }

    #[test]
    fn test_filter_empty_criteria_keeps_everything() {
        assert_eq!(cards().filter(&Criteria::new(), false).unwrap(), cards());
        assert_eq!(cards().filter(&Criteria::new(), true).unwrap(), cards());
    }

    #[test]
    fn test_filter_empty_list_is_not_validated() {
        let criteria = Criteria::new().with("mana", 3);
        assert!(CardList::new().filter(&criteria, false).unwrap().is_empty());
        assert!(matches!(
            cards().filter(&criteria, false),
            Err(CatalogError::UnknownField(_))
        ));
    }

    #[test]
    fn test_filter_exact() {
        let criteria = Criteria::new().with("types", vec!["Hero"]);
        assert_eq!(cards().filter_exact(&criteria, false).unwrap().full_names(), vec!["Chane"]);
        assert_eq!(cards().filter_exact(&criteria, true).unwrap().len(), 2);
    }

    #[test]
    fn test_collect() {
        let list = cards();
        let costs = list.collect_unique("cost", false, true).unwrap();
        assert_eq!(costs, vec![Collected::Int(0), Collected::Int(7)]);

        let rarities = list.unique_text(Field::Rarities).unwrap();
        assert_eq!(rarities, vec!["T", "R", "M"]);

        let reversed = list.collect("rarities", true, true).unwrap();
        assert_eq!(reversed[0], Collected::Text("M".into()));

        assert!(list.collect("legality", false, true).is_err());
    }

    #[test]
    fn test_unique_text_rejects_uncollectable_fields() {
        let list = cards();
        for field in [Field::Legality, Field::Dates] {
            assert!(matches!(
                list.unique_text(field),
                Err(CatalogError::Unsupported { operation: "collect", .. })
            ));
        }
    }

    #[test]
    fn test_counts_and_legality() {
        let mut list = cards();
        list.push(list[0].clone());
        assert_eq!(list.counts()["Crush (1)"], 2);

        let legality = list.legality();
        assert!(!legality["CC"]);
        assert!(legality["B"]);
        assert!(cards().filter(&Criteria::new().with("legality", "CC"), false).unwrap().legality()["CC"]);
    }

    #[test]
    fn test_typed_subsets() {
        let list = cards();
        assert_eq!(list.heroes().full_names(), vec!["Chane"]);
        assert_eq!(list.actions().len(), 1);
        assert_eq!(list.reactions().full_names(), vec!["Flic Flak (2)"]);
        assert!(list.weapons().is_empty());
        assert_eq!((list.num_red(), list.num_yellow(), list.num_blue()), (1, 1, 0));
    }

    #[test]
    fn test_draw() {
        let mut rng = ListRng::new(3);
        let mut list = cards();

        let back = list.draw(1, DrawOrder::Back, false, &mut rng).unwrap();
        assert_eq!(back.full_names(), vec!["Chane"]);
        assert_eq!(list.len(), 3);

        let front = list.draw(2, DrawOrder::Front, true, &mut rng).unwrap();
        assert_eq!(front.full_names(), vec!["Crush (1)", "Flic Flak (2)"]);
        assert_eq!(list.full_names(), vec!["Chane"]);

        assert!(list.draw(2, DrawOrder::Random, false, &mut rng).is_err());
        assert!(list.draw(0, DrawOrder::Random, false, &mut rng).is_err());
    }

    #[test]
    fn test_draw_back_keeps_list_order() {
        let mut rng = ListRng::new(3);
        let mut list = cards();

        let peeked = list.draw(2, DrawOrder::Back, false, &mut rng).unwrap();
        assert_eq!(peeked.full_names(), vec!["Flic Flak (2)", "Chane"]);
        assert_eq!(list.len(), 3);

        let taken = list.draw(2, DrawOrder::Back, true, &mut rng).unwrap();
        assert_eq!(taken, peeked);
        assert_eq!(list.full_names(), vec!["Crush (1)"]);
    }

    #[test]
    fn test_random_draw_is_distinct() {
        let mut rng = ListRng::new(11);
        let mut list = cards();
        let drawn = list.draw(3, DrawOrder::Random, false, &mut rng).unwrap();
        let mut names = drawn.full_names();
        names.sort_unstable();
        assert_eq!(names, vec!["Chane", "Crush (1)", "Flic Flak (2)"]);
    }

    #[test]
    fn test_shuffle_is_deterministic() {
        let mut a = cards();
        let mut b = cards();
        a.shuffle(&mut ListRng::new(8));
        b.shuffle(&mut ListRng::new(8));
        assert_eq!(a, b);
        assert_eq!(a.len(), 3);
    }

    #[test]
    fn test_json_round_trip() {
        let json = cards().to_json().unwrap();
        assert!(json.trim_start().starts_with('['));
        assert_eq!(CardList::from_json(&json).unwrap(), cards());
    }

    #[test]
    fn test_copies_are_independent() {
        let original = cards();
        let mut copy = original.clone();
        copy.push(Card::new("Extra", "Action"));
        assert_eq!(original.len(), 3);
        assert_eq!(copy.len(), 4);
    }
}
