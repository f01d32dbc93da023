//! Card sets - printings and series.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::Result;

use super::dates::{self, DateRange};

/// Upstream URLs for one edition of a set.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SetUrls {
    pub product_page: Option<String>,
    pub collectors_center: Option<String>,
    pub card_gallery: Option<String>,
}

/// A card set.
///
/// `dates` maps edition codes to `(release date, out-of-print date)`,
/// either of which may be unknown.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CardSet {
    /// Short code, such as `MON`.
    pub identifier: String,
    /// Full name, such as `Monarch`.
    pub name: String,
    /// Edition codes the set was printed in.
    pub editions: Vec<String>,
    /// First and last card identifiers of the set.
    pub id_range: (Option<String>, Option<String>),
    #[serde(with = "dates::range_map")]
    pub dates: BTreeMap<String, DateRange>,
    pub urls: BTreeMap<String, SetUrls>,
}

impl CardSet {
    /// Create a set from its code and name.
    #[must_use]
    pub fn new(identifier: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            name: name.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_id_range(mut self, first: &str, last: &str) -> Self {
        self.id_range = (Some(first.to_string()), Some(last.to_string()));
        self
    }

    /// Add an edition with its dates.
    #[must_use]
    pub fn with_edition(
        mut self,
        edition: &str,
        release: Option<NaiveDate>,
        out_of_print: Option<NaiveDate>,
    ) -> Self {
        if !self.editions.iter().any(|e| e == edition) {
            self.editions.push(edition.to_string());
        }
        self.dates.insert(edition.to_string(), (release, out_of_print));
        self
    }

    #[must_use]
    pub fn with_urls(mut self, edition: &str, urls: SetUrls) -> Self {
        self.urls.insert(edition.to_string(), urls);
        self
    }

    /// Earliest known release date across editions.
    #[must_use]
    pub fn initial_release_date(&self) -> Option<NaiveDate> {
        self.dates.values().filter_map(|(release, _)| *release).min()
    }

    /// Whether an identifier falls within this set's identifier range.
    ///
    /// Unknown bounds are treated as open.
    #[must_use]
    pub fn contains_identifier(&self, identifier: &str) -> bool {
        if !identifier.starts_with(self.identifier.as_str()) {
            return false;
        }
        let above = self.id_range.0.as_deref().map_or(true, |first| identifier >= first);
        let below = self.id_range.1.as_deref().map_or(true, |last| identifier <= last);
        above && below
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}
