//! Single prints of a card.
//!
//! A `CardVariant` pins a `Card` to one of its variation codes, breaking
//! the code into the identifier, set, edition, rarity, foiling and art type
//! of that print, along with its image and dates.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{CatalogError, Result};

use super::card::{self, Card};
use super::dates;

/// One specific print of a card.
///
/// ```
/// use fab_catalog::cards::{Card, CardVariant};
///
/// let card = Card::new("Flic Flak", "Defense Reaction")
///     .with_pitch(2)
///     .with_variation("WTR093-A-R-S-S");
/// let print = CardVariant::new(&card, "WTR093-A-R-S-S").unwrap();
/// assert_eq!(print.card_set, "WTR");
/// assert_eq!(print.edition, "A");
/// assert_eq!(print.card().full_name, "Flic Flak (2)");
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CardVariant {
    /// The variation code of this print.
    pub uid: String,
    pub identifier: String,
    pub card_set: String,
    pub edition: String,
    pub rarity: String,
    pub foiling: String,
    pub art_type: String,
    pub image_url: Option<String>,
    #[serde(with = "dates::optional_date")]
    pub release_date: Option<NaiveDate>,
    #[serde(with = "dates::optional_date")]
    pub out_of_print_date: Option<NaiveDate>,
    card: Card,
}

impl CardVariant {
    /// The print of `card` named by `variation`.
    ///
    /// Fails with `InvalidArgument` when the code is malformed or isn't one
    /// of the card's variations.
    pub fn new(card: &Card, variation: &str) -> Result<Self> {
        let [identifier, edition, rarity, foiling, art_type] = card::split_variation(variation)
            .ok_or_else(|| {
                CatalogError::InvalidArgument(format!(
                    "variation \"{variation}\" not of the form \"IDENTIFIER-EDITION-RARITY-FOILING-ARTTYPE\""
                ))
            })?;
        if !card.variations.iter().any(|v| v == variation) {
            return Err(CatalogError::InvalidArgument(format!(
                "\"{variation}\" is not a variation of \"{}\"",
                card.full_name
            )));
        }
        let (release_date, out_of_print_date) = card.dates.get(variation).copied().unwrap_or_default();
        Ok(Self {
            uid: variation.to_string(),
            identifier: identifier.to_string(),
            card_set: card::set_code(identifier).unwrap_or(identifier).to_string(),
            edition: edition.to_string(),
            rarity: rarity.to_string(),
            foiling: foiling.to_string(),
            art_type: art_type.to_string(),
            image_url: card.image_urls.get(variation).cloned(),
            release_date,
            out_of_print_date,
            card: card.clone(),
        })
    }

    /// The card this is a print of.
    #[must_use]
    pub fn card(&self) -> &Card {
        &self.card
    }

    #[must_use]
    pub fn into_card(self) -> Card {
        self.card
    }

    /// Check that the print fields agree with the uid and the card.
    pub fn check_consistency(&self) -> Result<()> {
        let fail = |reason: String| Err(CatalogError::inconsistent(&self.card.full_name, reason));
        let Some([identifier, edition, rarity, foiling, art_type]) = card::split_variation(&self.uid) else {
            return fail(format!(
                "variation \"{}\" not of the form \"IDENTIFIER-EDITION-RARITY-FOILING-ARTTYPE\"",
                self.uid
            ));
        };
        let parts = [
            (&self.identifier, identifier, "identifier"),
            (&self.edition, edition, "edition"),
            (&self.rarity, rarity, "rarity"),
            (&self.foiling, foiling, "foiling"),
            (&self.art_type, art_type, "art type"),
        ];
        for (value, expected, what) in parts {
            if value != expected {
                return fail(format!("{what} \"{value}\" not consistent with variation \"{}\"", self.uid));
            }
        }
        if !identifier.starts_with(self.card_set.as_str()) {
            return fail(format!("set \"{}\" not consistent with variation \"{}\"", self.card_set, self.uid));
        }
        if !self.card.variations.contains(&self.uid) {
            return fail(format!("variation \"{}\" not present in variations", self.uid));
        }
        self.card.check_consistency()
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}
