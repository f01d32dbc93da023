//! Static card field schema.
//!
//! Every queryable card field is a variant of `Field`. Each field belongs
//! to one `FieldKind`, which decides how the matcher, grouping, sorting and
//! the secondary indices treat it. Field names parse from the snake_case
//! names used in serialized records (plus the `intelligence` and `health`
//! aliases).

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CatalogError;

use super::card::{Card, DateMap, Legality};
use super::numeric::Numeric;

/// Semantic group of a card field.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FieldKind {
    /// Nullable scalar text.
    Text,
    /// Ordered set of text values.
    TextSet,
    /// Absent / variable / concrete integer.
    Numeric,
    /// Format code to legal flag.
    Legality,
    /// Variation code to release and out-of-print dates.
    Dates,
}

macro_rules! fields {
    ($($variant:ident => $name:literal, $kind:ident;)*) => {
        /// A card field.
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(rename_all = "snake_case")]
        pub enum Field {
            $($variant,)*
        }

        impl Field {
            /// Every field, in schema order.
            pub const ALL: &'static [Field] = &[$(Field::$variant,)*];

            /// The serialized name of this field.
            #[must_use]
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Field::$variant => $name,)*
                }
            }

            /// The semantic group of this field.
            #[must_use]
            pub const fn kind(self) -> FieldKind {
                match self {
                    $(Field::$variant => FieldKind::$kind,)*
                }
            }
        }

        impl FromStr for Field {
            type Err = CatalogError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($name => Ok(Field::$variant),)*
                    "intelligence" => Ok(Field::Intellect),
                    "health" => Ok(Field::Life),
                    other => Err(CatalogError::UnknownField(other.to_string())),
                }
            }
        }
    };
}

fields! {
    AbilityKeywords => "ability_keywords", TextSet;
    ArtTypes => "art_types", TextSet;
    Body => "body", Text;
    CardType => "card_type", Text;
    ClassType => "class_type", Text;
    Color => "color", Text;
    Cost => "cost", Numeric;
    Dates => "dates", Dates;
    Defense => "defense", Numeric;
    Editions => "editions", TextSet;
    EffectKeywords => "effect_keywords", TextSet;
    FlavorText => "flavor_text", Text;
    Foilings => "foilings", TextSet;
    FullName => "full_name", Text;
    GrantsKeywords => "grants_keywords", TextSet;
    Identifiers => "identifiers", TextSet;
    Intellect => "intellect", Numeric;
    Keywords => "keywords", TextSet;
    LabelKeywords => "label_keywords", TextSet;
    Legality => "legality", Legality;
    Life => "life", Numeric;
    Name => "name", Text;
    Notes => "notes", Text;
    Pitch => "pitch", Numeric;
    Power => "power", Numeric;
    Rarities => "rarities", TextSet;
    Sets => "sets", TextSet;
    Subtypes => "subtypes", TextSet;
    Supertypes => "supertypes", TextSet;
    Tags => "tags", TextSet;
    TalentType => "talent_type", Text;
    TokenKeywords => "token_keywords", TextSet;
    TypeKeywords => "type_keywords", TextSet;
    TypeText => "type_text", Text;
    Types => "types", TextSet;
    Variations => "variations", TextSet;
}

impl Field {
    /// Numeric fields, in the order statistics are reported.
    pub const NUMERIC: &'static [Field] = &[
        Field::Cost,
        Field::Defense,
        Field::Intellect,
        Field::Life,
        Field::Pitch,
        Field::Power,
    ];

    /// Parse a field name.
    pub fn parse(name: &str) -> Result<Self, CatalogError> {
        name.parse()
    }

    /// Borrow this field's raw value from a card.
    #[must_use]
    pub fn value(self, card: &Card) -> FieldValue<'_> {
        use FieldValue as V;
        match self {
            Field::Body => V::Text(card.body.as_deref()),
            Field::CardType => V::Text(Some(&card.card_type)),
            Field::ClassType => V::Text(card.class_type.as_deref()),
            Field::Color => V::Text(card.color.as_deref()),
            Field::FlavorText => V::Text(card.flavor_text.as_deref()),
            Field::FullName => V::Text(Some(&card.full_name)),
            Field::Name => V::Text(Some(&card.name)),
            Field::Notes => V::Text(card.notes.as_deref()),
            Field::TalentType => V::Text(card.talent_type.as_deref()),
            Field::TypeText => V::Text(Some(&card.type_text)),

            Field::AbilityKeywords => V::TextSet(&card.ability_keywords),
            Field::ArtTypes => V::TextSet(&card.art_types),
            Field::Editions => V::TextSet(&card.editions),
            Field::EffectKeywords => V::TextSet(&card.effect_keywords),
            Field::Foilings => V::TextSet(&card.foilings),
            Field::GrantsKeywords => V::TextSet(&card.grants_keywords),
            Field::Identifiers => V::TextSet(&card.identifiers),
            Field::Keywords => V::TextSet(&card.keywords),
            Field::LabelKeywords => V::TextSet(&card.label_keywords),
            Field::Rarities => V::TextSet(&card.rarities),
            Field::Sets => V::TextSet(&card.sets),
            Field::Subtypes => V::TextSet(&card.subtypes),
            Field::Supertypes => V::TextSet(&card.supertypes),
            Field::Tags => V::TextSet(&card.tags),
            Field::TokenKeywords => V::TextSet(&card.token_keywords),
            Field::TypeKeywords => V::TextSet(&card.type_keywords),
            Field::Types => V::TextSet(&card.types),
            Field::Variations => V::TextSet(&card.variations),

            Field::Cost => V::Numeric(&card.cost),
            Field::Defense => V::Numeric(&card.defense),
            Field::Intellect => V::Numeric(&card.intellect),
            Field::Life => V::Numeric(&card.life),
            Field::Pitch => V::Numeric(&card.pitch),
            Field::Power => V::Numeric(&card.power),

            Field::Legality => V::Legality(&card.legality),
            Field::Dates => V::Dates(&card.dates),
        }
    }
}

impl std::fmt::Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl AsRef<str> for Field {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

/// A borrowed view of one field of one card.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum FieldValue<'a> {
    Text(Option<&'a str>),
    TextSet(&'a [String]),
    Numeric(&'a Numeric),
    Legality(&'a Legality),
    Dates(&'a DateMap),
}

impl FieldValue<'_> {
    /// Whether the field is absent or empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        match self {
            FieldValue::Text(v) => v.is_none(),
            FieldValue::TextSet(v) => v.is_empty(),
            FieldValue::Numeric(v) => v.is_absent(),
            FieldValue::Legality(v) => v.is_empty(),
            FieldValue::Dates(v) => v.is_empty(),
        }
    }
}
