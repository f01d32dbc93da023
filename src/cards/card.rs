//! Card records.
//!
//! A `Card` is one logical card with all of its prints merged: every
//! identifier, edition, rarity, foiling and art type it was printed with,
//! and the variation codes that combine them.
//!
//! The full name of a card is its base name with the pitch value appended
//! when the pitch is a concrete integer:
//!
//! ```text
//! {name} ({pitch})
//! ```
//!
//! Variation codes have the form:
//!
//! ```text
//! {identifier}-{edition}-{rarity}-{foiling}-{art_type}
//! ```
//!
//! Records are immutable once they reach a catalog. Catalogs and card lists
//! hand out copies, so mutating a returned card never affects an index.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{CatalogError, Result};

use super::dates::{self, DateRange};
use super::meta;
use super::numeric::Numeric;

/// Format code to currently-legal flag.
pub type Legality = BTreeMap<String, bool>;

/// Variation code to release / out-of-print dates.
pub type DateMap = BTreeMap<String, DateRange>;

/// A trading card record.
///
/// ## Example
///
/// ```
/// use fab_catalog::cards::{Card, Numeric};
///
/// let crush = Card::new("Crippling Crush", "Action")
///     .with_pitch(1)
///     .with_cost(7)
///     .with_defense(3);
///
/// assert_eq!(crush.full_name, "Crippling Crush (1)");
/// assert_eq!(crush.color.as_deref(), Some("Red"));
/// assert_eq!(crush.cost, Numeric::Concrete(7));
/// ```
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Card {
    // === Scalar text ===
    /// Rules and reminder text, in Markdown.
    pub body: Option<String>,
    /// Primary type, such as `Action`.
    pub card_type: String,
    /// Hero class supertype, such as `Guardian`.
    pub class_type: Option<String>,
    /// `Red`, `Yellow`, `Blue`, or none.
    pub color: Option<String>,
    pub flavor_text: Option<String>,
    /// Name including the pitch value, if any.
    pub full_name: String,
    /// Name excluding the pitch value.
    pub name: String,
    /// User notes.
    pub notes: Option<String>,
    /// Talent supertype, such as `Shadow`.
    pub talent_type: Option<String>,
    /// Full type box text.
    pub type_text: String,

    // === Sets of text ===
    pub ability_keywords: Vec<String>,
    pub art_types: Vec<String>,
    pub editions: Vec<String>,
    pub effect_keywords: Vec<String>,
    pub foilings: Vec<String>,
    /// Keywords this card grants to other cards.
    pub grants_keywords: Vec<String>,
    pub identifiers: Vec<String>,
    /// Every keyword associated with the card.
    pub keywords: Vec<String>,
    pub label_keywords: Vec<String>,
    pub rarities: Vec<String>,
    pub sets: Vec<String>,
    pub subtypes: Vec<String>,
    pub supertypes: Vec<String>,
    /// User-defined tags.
    pub tags: Vec<String>,
    pub token_keywords: Vec<String>,
    /// Type keywords appearing in the body text (not the type box).
    pub type_keywords: Vec<String>,
    /// Every type keyword in the type box.
    pub types: Vec<String>,
    pub variations: Vec<String>,

    // === Numeric ===
    pub cost: Numeric,
    pub defense: Numeric,
    #[serde(alias = "intelligence")]
    pub intellect: Numeric,
    #[serde(alias = "health")]
    pub life: Numeric,
    pub pitch: Numeric,
    pub power: Numeric,

    // === Maps ===
    pub legality: Legality,
    #[serde(with = "dates::range_map")]
    pub dates: DateMap,
    /// Variation code to image URL.
    pub image_urls: BTreeMap<String, String>,
}

/// Split a variation code into identifier, edition, rarity, foiling and
/// art type. `None` unless it has exactly five parts.
pub(crate) fn split_variation(variation: &str) -> Option<[&str; 5]> {
    let mut parts = variation.split('-');
    let split = [parts.next()?, parts.next()?, parts.next()?, parts.next()?, parts.next()?];
    parts.next().is_none().then_some(split)
}

/// Set code of a print identifier: its first three characters.
pub(crate) fn set_code(identifier: &str) -> Option<&str> {
    identifier.get(..3)
}

fn push_unique(list: &mut Vec<String>, value: &str) {
    if !list.iter().any(|v| v == value) {
        list.push(value.to_string());
    }
}

fn contains(list: &[String], value: &str) -> bool {
    list.iter().any(|v| v == value)
}

impl Card {
    /// Create a card with a name and primary type.
    ///
    /// The primary type is also added to `types` and used as the type text.
    #[must_use]
    pub fn new(name: impl Into<String>, card_type: impl Into<String>) -> Self {
        let name = name.into();
        let card_type = card_type.into();
        Self {
            full_name: name.clone(),
            name,
            type_text: card_type.clone(),
            types: vec![card_type.clone()],
            card_type,
            ..Self::default()
        }
    }

    /// Set a concrete pitch value, deriving color and full name.
    #[must_use]
    pub fn with_pitch(mut self, pitch: i64) -> Self {
        self.pitch = Numeric::Concrete(pitch);
        self.color = meta::pitch_color(pitch).map(str::to_string);
        self.full_name = format!("{} ({})", self.name, pitch);
        self
    }

    #[must_use]
    pub fn with_cost(mut self, cost: impl Into<Numeric>) -> Self {
        self.cost = cost.into();
        self
    }

    #[must_use]
    pub fn with_defense(mut self, defense: impl Into<Numeric>) -> Self {
        self.defense = defense.into();
        self
    }

    #[must_use]
    pub fn with_power(mut self, power: impl Into<Numeric>) -> Self {
        self.power = power.into();
        self
    }

    #[must_use]
    pub fn with_life(mut self, life: impl Into<Numeric>) -> Self {
        self.life = life.into();
        self
    }

    #[must_use]
    pub fn with_intellect(mut self, intellect: impl Into<Numeric>) -> Self {
        self.intellect = intellect.into();
        self
    }

    #[must_use]
    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    #[must_use]
    pub fn with_type_text(mut self, type_text: impl Into<String>) -> Self {
        self.type_text = type_text.into();
        self
    }

    /// Add plain keywords.
    #[must_use]
    pub fn with_keywords<'a>(mut self, keywords: impl IntoIterator<Item = &'a str>) -> Self {
        for k in keywords {
            push_unique(&mut self.keywords, k);
        }
        self
    }

    /// Add ability keywords (also added to `keywords`).
    #[must_use]
    pub fn with_ability_keywords<'a>(mut self, keywords: impl IntoIterator<Item = &'a str>) -> Self {
        for k in keywords {
            push_unique(&mut self.ability_keywords, k);
            push_unique(&mut self.keywords, k);
        }
        self
    }

    /// Add effect keywords (also added to `keywords`).
    #[must_use]
    pub fn with_effect_keywords<'a>(mut self, keywords: impl IntoIterator<Item = &'a str>) -> Self {
        for k in keywords {
            push_unique(&mut self.effect_keywords, k);
            push_unique(&mut self.keywords, k);
        }
        self
    }

    /// Add label keywords (also added to `keywords`).
    #[must_use]
    pub fn with_label_keywords<'a>(mut self, keywords: impl IntoIterator<Item = &'a str>) -> Self {
        for k in keywords {
            push_unique(&mut self.label_keywords, k);
            push_unique(&mut self.keywords, k);
        }
        self
    }

    /// Add token keywords (also added to `keywords`).
    #[must_use]
    pub fn with_token_keywords<'a>(mut self, keywords: impl IntoIterator<Item = &'a str>) -> Self {
        for k in keywords {
            push_unique(&mut self.token_keywords, k);
            push_unique(&mut self.keywords, k);
        }
        self
    }

    /// Add subtypes (also added to `types`).
    #[must_use]
    pub fn with_subtypes<'a>(mut self, subtypes: impl IntoIterator<Item = &'a str>) -> Self {
        for t in subtypes {
            push_unique(&mut self.subtypes, t);
            push_unique(&mut self.types, t);
        }
        self
    }

    /// Add supertypes (also added to `types`).
    #[must_use]
    pub fn with_supertypes<'a>(mut self, supertypes: impl IntoIterator<Item = &'a str>) -> Self {
        for t in supertypes {
            push_unique(&mut self.supertypes, t);
            push_unique(&mut self.types, t);
        }
        self
    }

    /// Set the class supertype.
    #[must_use]
    pub fn with_class(mut self, class: &str) -> Self {
        self.class_type = Some(class.to_string());
        self.with_supertypes([class])
    }

    /// Set the talent supertype.
    #[must_use]
    pub fn with_talent(mut self, talent: &str) -> Self {
        self.talent_type = Some(talent.to_string());
        self.with_supertypes([talent])
    }

    /// Add a print variation, registering each of its parts.
    ///
    /// The set code is the first three characters of the identifier.
    #[must_use]
    pub fn with_variation(mut self, variation: &str) -> Self {
        if let Some([identifier, edition, rarity, foiling, art_type]) = split_variation(variation) {
            push_unique(&mut self.identifiers, identifier);
            push_unique(&mut self.editions, edition);
            push_unique(&mut self.rarities, rarity);
            push_unique(&mut self.foilings, foiling);
            push_unique(&mut self.art_types, art_type);
            if let Some(set) = set_code(identifier) {
                push_unique(&mut self.sets, set);
            }
        }
        push_unique(&mut self.variations, variation);
        self
    }

    /// Record release / out-of-print dates for a variation.
    #[must_use]
    pub fn with_dates(
        mut self,
        variation: &str,
        release: Option<NaiveDate>,
        out_of_print: Option<NaiveDate>,
    ) -> Self {
        self.dates.insert(variation.to_string(), (release, out_of_print));
        self
    }

    #[must_use]
    pub fn with_legality(mut self, format: &str, legal: bool) -> Self {
        self.legality.insert(format.to_string(), legal);
        self
    }

    #[must_use]
    pub fn with_tag(mut self, tag: &str) -> Self {
        push_unique(&mut self.tags, tag);
        self
    }

    // === Consistency ===

    /// Check the record's internal invariants.
    ///
    /// Returns `ConsistencyViolation` naming the first broken invariant.
    pub fn check_consistency(&self) -> Result<()> {
        self.check_variations()?;
        self.check_base()
    }

    fn fail(&self, reason: impl Into<String>) -> Result<()> {
        Err(CatalogError::inconsistent(&self.full_name, reason))
    }

    fn check_variations(&self) -> Result<()> {
        for variation in &self.variations {
            let Some([identifier, edition, rarity, foiling, art_type]) = split_variation(variation) else {
                return self.fail(format!(
                    "variation \"{variation}\" not of the form \"IDENTIFIER-EDITION-RARITY-FOILING-ARTTYPE\""
                ));
            };
            let parts = [
                (identifier, &self.identifiers, "identifier"),
                (edition, &self.editions, "edition"),
                (rarity, &self.rarities, "rarity"),
                (foiling, &self.foilings, "foiling"),
                (art_type, &self.art_types, "art type"),
            ];
            for (part, list, what) in parts {
                if !contains(list, part) {
                    return self.fail(format!(
                        "{what} \"{part}\" of variation \"{variation}\" not present in {what} list"
                    ));
                }
            }
            if !self.sets.iter().any(|s| identifier.starts_with(s.as_str())) {
                return self.fail(format!("card set for variation \"{variation}\" not present in sets"));
            }
        }
        for variation in self.image_urls.keys() {
            if !contains(&self.variations, variation) {
                return self.fail(format!(
                    "image URLs contain variation \"{variation}\" not present in variations"
                ));
            }
        }
        for variation in self.dates.keys() {
            if !contains(&self.variations, variation) {
                return self.fail(format!(
                    "dates contain variation \"{variation}\" not present in variations"
                ));
            }
        }
        Ok(())
    }

    fn check_base(&self) -> Result<()> {
        if self.name.is_empty() {
            return self.fail("name is empty");
        }
        if self.types.is_empty() {
            return self.fail("types is empty");
        }

        let buckets = [
            (&self.ability_keywords, "ability"),
            (&self.effect_keywords, "effect"),
            (&self.label_keywords, "label"),
            (&self.token_keywords, "token"),
            (&self.type_keywords, "type"),
        ];
        for (bucket, what) in buckets {
            if let Some(k) = bucket.iter().find(|k| !contains(&self.keywords, k)) {
                return self.fail(format!("{what} keyword \"{k}\" not present in keywords"));
            }
        }

        if !contains(&self.types, &self.card_type) {
            return self.fail(format!("primary type \"{}\" not present in types", self.card_type));
        }
        for t in &self.subtypes {
            if !contains(&self.types, t) {
                return self.fail(format!("subtype \"{t}\" not present in types"));
            }
        }
        for t in &self.supertypes {
            if !contains(&self.types, t) {
                return self.fail(format!("supertype \"{t}\" not present in types"));
            }
        }
        let named = [(&self.class_type, "class"), (&self.talent_type, "talent")];
        for (value, what) in named {
            if let Some(t) = value {
                if !contains(&self.supertypes, t) || !contains(&self.types, t) {
                    return self.fail(format!(
                        "{what} type \"{t}\" not present in supertypes and types"
                    ));
                }
            }
        }

        let numerics = [
            (&self.cost, "cost"),
            (&self.defense, "defense"),
            (&self.intellect, "intellect"),
            (&self.life, "life"),
            (&self.pitch, "pitch"),
            (&self.power, "power"),
        ];
        for (value, what) in numerics {
            if let Some(v) = value.concrete() {
                if v < 0 {
                    return self.fail(format!("{what} \"{v}\" is a negative number"));
                }
            }
        }

        if let Some(color) = &self.color {
            if !meta::PITCH_COLORS.contains(&color.as_str()) {
                return self.fail(format!("color \"{color}\" is not Red, Yellow, Blue, or none"));
            }
            let expected = self.pitch.concrete().and_then(meta::pitch_color);
            if expected != Some(color.as_str()) {
                return self.fail(format!("color \"{color}\" is inconsistent with pitch value"));
            }
        }
        if let Some(pitch) = self.pitch.concrete() {
            if self.color.is_none() {
                return self.fail(format!("pitch value \"{pitch}\" has no corresponding color"));
            }
            if self.full_name != format!("{} ({})", self.name, pitch) {
                return self.fail(format!(
                    "full name \"{}\" is not of the form \"NAME (PITCH)\"",
                    self.full_name
                ));
            }
        }
        Ok(())
    }

    // === Type predicates ===

    fn has_type(&self, t: &str) -> bool {
        contains(&self.types, t)
    }

    #[must_use]
    pub fn is_action(&self) -> bool {
        self.has_type("Action")
    }

    #[must_use]
    pub fn is_attack(&self) -> bool {
        self.has_type("Attack")
    }

    #[must_use]
    pub fn is_attack_reaction(&self) -> bool {
        self.has_type("Attack Reaction")
    }

    #[must_use]
    pub fn is_aura(&self) -> bool {
        self.has_type("Aura")
    }

    #[must_use]
    pub fn is_defense_reaction(&self) -> bool {
        self.has_type("Defense Reaction")
    }

    #[must_use]
    pub fn is_equipment(&self) -> bool {
        self.has_type("Equipment")
    }

    #[must_use]
    pub fn is_generic(&self) -> bool {
        self.has_type("Generic")
    }

    #[must_use]
    pub fn is_hero(&self) -> bool {
        self.has_type("Hero")
    }

    #[must_use]
    pub fn is_instant(&self) -> bool {
        self.has_type("Instant")
    }

    #[must_use]
    pub fn is_item(&self) -> bool {
        self.has_type("Item")
    }

    /// Attack reaction or defense reaction.
    #[must_use]
    pub fn is_reaction(&self) -> bool {
        self.is_attack_reaction() || self.is_defense_reaction()
    }

    #[must_use]
    pub fn is_token(&self) -> bool {
        self.has_type("Token")
    }

    #[must_use]
    pub fn is_weapon(&self) -> bool {
        self.has_type("Weapon")
    }

    #[must_use]
    pub fn is_red(&self) -> bool {
        self.color.as_deref() == Some("Red")
    }

    #[must_use]
    pub fn is_yellow(&self) -> bool {
        self.color.as_deref() == Some("Yellow")
    }

    #[must_use]
    pub fn is_blue(&self) -> bool {
        self.color.as_deref() == Some("Blue")
    }

    /// Whether the card is currently legal in a format.
    ///
    /// A card without legality data is legal everywhere. A format missing
    /// from non-empty legality data is not legal.
    #[must_use]
    pub fn is_legal(&self, format: &str) -> bool {
        self.legality.is_empty() || self.legality.get(format).copied().unwrap_or(false)
    }

    // === Rarity ===

    /// Rarest rarity code of the card.
    #[must_use]
    pub fn highest_rarity(&self) -> Option<&str> {
        self.rarities
            .iter()
            .filter_map(|r| meta::rarity_rank(r).map(|rank| (rank, r.as_str())))
            .max_by_key(|(rank, _)| *rank)
            .map(|(_, r)| r)
    }

    /// Most common rarity code of the card.
    #[must_use]
    pub fn lowest_rarity(&self) -> Option<&str> {
        self.rarities
            .iter()
            .filter_map(|r| meta::rarity_rank(r).map(|rank| (rank, r.as_str())))
            .min_by_key(|(rank, _)| *rank)
            .map(|(_, r)| r)
    }

    /// Full names of the card's rarities.
    #[must_use]
    pub fn rarity_names(&self) -> Vec<&'static str> {
        self.rarities.iter().filter_map(|r| meta::rarity_name(r)).collect()
    }

    // === Dates ===

    /// Variation to release date.
    #[must_use]
    pub fn release_dates(&self) -> BTreeMap<&str, Option<NaiveDate>> {
        self.dates.iter().map(|(k, v)| (k.as_str(), v.0)).collect()
    }

    /// Variation to out-of-print date.
    #[must_use]
    pub fn out_of_print_dates(&self) -> BTreeMap<&str, Option<NaiveDate>> {
        self.dates.iter().map(|(k, v)| (k.as_str(), v.1)).collect()
    }

    /// Earliest known release date across all variations.
    #[must_use]
    pub fn initial_release_date(&self) -> Option<NaiveDate> {
        self.dates.values().filter_map(|(release, _)| *release).min()
    }

    // === Serialization ===

    /// Serialize to a JSON string.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Parse from a JSON string.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

impl std::fmt::Display for Card {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.full_name, self.type_text)
    }
}
