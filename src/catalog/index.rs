//! Catalog indices.
//!
//! Primary indices map unique keys to record positions and are built once,
//! when the catalog is built. Secondary indices map a field's values to the
//! positions of the records holding them; they're built on first use and
//! cached per catalog.

use std::collections::hash_map::Entry;
use std::sync::Arc;

use im::Vector;
use parking_lot::RwLock;
use rustc_hash::FxHashMap;
use smallvec::SmallVec;
use tracing::{debug, warn};

use crate::cards::{Card, CardSet, Field};
use crate::error::{CatalogError, KeyKind, Result};
use crate::query::{keys_for, GroupKey};

use super::config::DuplicateKeyPolicy;

// === Primary ===

/// Unique-key indices over cards and sets.
#[derive(Clone, Debug, Default)]
pub struct PrimaryIndex {
    full_names: FxHashMap<String, usize>,
    identifiers: FxHashMap<String, usize>,
    variations: FxHashMap<String, usize>,
    set_identifiers: FxHashMap<String, usize>,
    set_names: FxHashMap<String, usize>,
}

fn insert_key(
    map: &mut FxHashMap<String, usize>,
    kind: KeyKind,
    key: &str,
    position: usize,
    policy: DuplicateKeyPolicy,
) -> Result<()> {
    match map.entry(key.to_string()) {
        Entry::Vacant(slot) => {
            slot.insert(position);
        }
        Entry::Occupied(mut slot) => {
            let first = *slot.get();
            if first == position {
                return Ok(());
            }
            match policy {
                DuplicateKeyPolicy::Reject => {
                    return Err(CatalogError::DuplicateKey {
                        kind,
                        key: key.to_string(),
                        first,
                        second: position,
                    })
                }
                DuplicateKeyPolicy::LastWins => {
                    warn!(%kind, key, first, second = position, "duplicate key, keeping the later record");
                    slot.insert(position);
                }
            }
        }
    }
    Ok(())
}

impl PrimaryIndex {
    /// Index every unique key of the given records.
    pub fn build(cards: &Vector<Card>, sets: &[CardSet], policy: DuplicateKeyPolicy) -> Result<Self> {
        let mut index = Self::default();
        for (position, card) in cards.iter().enumerate() {
            insert_key(&mut index.full_names, KeyKind::FullName, &card.full_name, position, policy)?;
            for identifier in &card.identifiers {
                insert_key(&mut index.identifiers, KeyKind::Identifier, identifier, position, policy)?;
            }
            for variation in &card.variations {
                insert_key(&mut index.variations, KeyKind::Variation, variation, position, policy)?;
            }
        }
        for (position, set) in sets.iter().enumerate() {
            insert_key(&mut index.set_identifiers, KeyKind::SetIdentifier, &set.identifier, position, policy)?;
            insert_key(&mut index.set_names, KeyKind::SetName, &set.name, position, policy)?;
        }
        debug!(
            full_names = index.full_names.len(),
            identifiers = index.identifiers.len(),
            variations = index.variations.len(),
            sets = index.set_identifiers.len(),
            "built primary indices"
        );
        Ok(index)
    }

    /// Position of the record holding a key.
    #[must_use]
    pub fn position(&self, kind: KeyKind, key: &str) -> Option<usize> {
        let map = match kind {
            KeyKind::FullName => &self.full_names,
            KeyKind::Identifier => &self.identifiers,
            KeyKind::Variation => &self.variations,
            KeyKind::SetIdentifier => &self.set_identifiers,
            KeyKind::SetName => &self.set_names,
        };
        map.get(key).copied()
    }

    /// Like `position`, failing with `NotFound`.
    pub fn require(&self, kind: KeyKind, key: &str) -> Result<usize> {
        self.position(kind, key).ok_or_else(|| CatalogError::NotFound {
            kind,
            key: key.to_string(),
        })
    }
}

// === Secondary ===

/// Positions of the records holding each value of one field.
#[derive(Clone, Debug)]
pub struct SecondaryIndex {
    field: Field,
    buckets: FxHashMap<GroupKey, SmallVec<[usize; 4]>>,
}

impl SecondaryIndex {
    /// Bucket every record, exploding values the same way `CardList::group` does.
    #[must_use]
    pub fn build(cards: &Vector<Card>, field: Field) -> Self {
        let mut buckets: FxHashMap<GroupKey, SmallVec<[usize; 4]>> = FxHashMap::default();
        for (position, card) in cards.iter().enumerate() {
            for key in keys_for(card, field) {
                buckets.entry(key).or_default().push(position);
            }
        }
        Self { field, buckets }
    }

    #[must_use]
    pub fn field(&self) -> Field {
        self.field
    }

    /// Positions for a value, in record order. Unknown values have none.
    #[must_use]
    pub fn positions(&self, key: &GroupKey) -> &[usize] {
        self.buckets.get(key).map(|p| p.as_slice()).unwrap_or(&[])
    }

    /// Number of distinct values.
    #[must_use]
    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }
}

/// Lazily populated secondary indices, shared across readers.
#[derive(Debug, Default)]
pub struct SecondaryCache {
    indices: RwLock<FxHashMap<Field, Arc<SecondaryIndex>>>,
}

impl SecondaryCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Cached index for a field, building it on first use.
    ///
    /// The index is built without holding the lock. When two callers race,
    /// the first one to publish wins and both get the same index.
    pub fn get_or_build(&self, cards: &Vector<Card>, field: Field) -> Arc<SecondaryIndex> {
        if let Some(index) = self.indices.read().get(&field) {
            return Arc::clone(index);
        }
        let built = SecondaryIndex::build(cards, field);
        debug!(%field, values = built.len(), "built secondary index");
        let mut indices = self.indices.write();
        Arc::clone(indices.entry(field).or_insert_with(|| Arc::new(built)))
    }

    #[must_use]
    pub fn contains(&self, field: Field) -> bool {
        self.indices.read().contains_key(&field)
    }

    /// Fields with a cached index, sorted.
    #[must_use]
    pub fn fields(&self) -> Vec<Field> {
        let mut fields: Vec<Field> = self.indices.read().keys().copied().collect();
        fields.sort_unstable();
        fields
    }

    /// Drop every cached index.
    pub fn clear(&self) {
        let mut indices = self.indices.write();
        debug!(dropped = indices.len(), "cleared secondary index cache");
        indices.clear();
    }
}
