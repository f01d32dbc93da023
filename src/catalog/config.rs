//! Catalog configuration.
//!
//! `CatalogConfig` controls how `CatalogBuilder::build` treats its input
//! and how the catalog is persisted.

use serde::{Deserialize, Serialize};

/// What to do when two records claim the same unique key.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum DuplicateKeyPolicy {
    /// Fail the build with `DuplicateKey`.
    #[default]
    Reject,
    /// Keep the later record's position and log a warning.
    LastWins,
}

/// Configuration for building and persisting a catalog.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// Handling of colliding full names, identifiers, variations and set keys.
    pub duplicate_keys: DuplicateKeyPolicy,

    /// Run `Card::check_consistency` on every record during the build.
    pub validate_records: bool,

    /// Indent JSON output.
    pub pretty_json: bool,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            duplicate_keys: DuplicateKeyPolicy::Reject,
            validate_records: false,
            pretty_json: true,
        }
    }
}

impl CatalogConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the duplicate-key policy.
    #[must_use]
    pub fn with_duplicate_keys(mut self, policy: DuplicateKeyPolicy) -> Self {
        self.duplicate_keys = policy;
        self
    }

    /// Overwrite colliding keys instead of failing.
    #[must_use]
    pub fn last_wins(self) -> Self {
        self.with_duplicate_keys(DuplicateKeyPolicy::LastWins)
    }

    /// Validate record consistency on build.
    #[must_use]
    pub fn validated(mut self) -> Self {
        self.validate_records = true;
        self
    }

    /// Write compact JSON.
    #[must_use]
    pub fn compact_json(mut self) -> Self {
        self.pretty_json = false;
        self
    }
}
