//! Point-lookup queries.
//!
//! A `CardQuery` names a card by exactly one of its full name, an
//! identifier or a variation. A `SetQuery` names a set by its identifier or
//! its name. Supplying none or several keys is an `AmbiguousQuery`.

use crate::error::{CatalogError, KeyKind, Result};

/// Keys for looking up a single card.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CardQuery {
    pub full_name: Option<String>,
    pub identifier: Option<String>,
    pub variation: Option<String>,
}

impl CardQuery {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up by full name, such as `"Crippling Crush (1)"`.
    #[must_use]
    pub fn full_name(full_name: impl Into<String>) -> Self {
        Self::new().with_full_name(full_name)
    }

    /// Look up by identifier, such as `"WTR043"`.
    #[must_use]
    pub fn identifier(identifier: impl Into<String>) -> Self {
        Self::new().with_identifier(identifier)
    }

    /// Look up by variation, such as `"WTR043-A-M-R-S"`.
    #[must_use]
    pub fn variation(variation: impl Into<String>) -> Self {
        Self::new().with_variation(variation)
    }

    #[must_use]
    pub fn with_full_name(mut self, full_name: impl Into<String>) -> Self {
        self.full_name = Some(full_name.into());
        self
    }

    #[must_use]
    pub fn with_identifier(mut self, identifier: impl Into<String>) -> Self {
        self.identifier = Some(identifier.into());
        self
    }

    #[must_use]
    pub fn with_variation(mut self, variation: impl Into<String>) -> Self {
        self.variation = Some(variation.into());
        self
    }

    /// The single key this query names.
    pub fn resolve(&self) -> Result<(KeyKind, &str)> {
        single_key(
            "card",
            [
                (KeyKind::FullName, self.full_name.as_deref()),
                (KeyKind::Identifier, self.identifier.as_deref()),
                (KeyKind::Variation, self.variation.as_deref()),
            ],
        )
    }
}

/// Keys for looking up a single set.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SetQuery {
    pub identifier: Option<String>,
    pub name: Option<String>,
}

impl SetQuery {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up by set code, such as `"MON"`.
    #[must_use]
    pub fn identifier(identifier: impl Into<String>) -> Self {
        Self::new().with_identifier(identifier)
    }

    /// Look up by set name, such as `"Monarch"`.
    #[must_use]
    pub fn name(name: impl Into<String>) -> Self {
        Self::new().with_name(name)
    }

    #[must_use]
    pub fn with_identifier(mut self, identifier: impl Into<String>) -> Self {
        self.identifier = Some(identifier.into());
        self
    }

    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn resolve(&self) -> Result<(KeyKind, &str)> {
        single_key(
            "set",
            [
                (KeyKind::SetIdentifier, self.identifier.as_deref()),
                (KeyKind::SetName, self.name.as_deref()),
            ],
        )
    }
}

fn single_key<'a, const N: usize>(
    target: &str,
    keys: [(KeyKind, Option<&'a str>); N],
) -> Result<(KeyKind, &'a str)> {
    let mut present = keys.into_iter().filter_map(|(kind, key)| key.map(|k| (kind, k)));
    match (present.next(), present.next()) {
        (Some(found), None) => Ok(found),
        (None, _) => Err(CatalogError::AmbiguousQuery(format!("no {target} key given"))),
        (Some((first, _)), Some((second, _))) => Err(CatalogError::AmbiguousQuery(format!(
            "{target} lookup by both {first} and {second}"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_key() {
        assert_eq!(
            CardQuery::identifier("WTR043").resolve().unwrap(),
            (KeyKind::Identifier, "WTR043")
        );
        assert_eq!(SetQuery::name("Monarch").resolve().unwrap(), (KeyKind::SetName, "Monarch"));
    }

    #[test]
    fn test_ambiguous() {
        assert!(matches!(CardQuery::new().resolve(), Err(CatalogError::AmbiguousQuery(_))));
        let both = CardQuery::full_name("Chane").with_variation("MON154-F-T-S-S");
        let err = both.resolve().unwrap_err();
        assert_eq!(err.to_string(), "ambiguous lookup: card lookup by both full name and variation");
        assert!(SetQuery::identifier("MON").with_name("Monarch").resolve().is_err());
    }
}
