//! # fab-catalog
//!
//! An in-memory catalog and query engine for Flesh and Blood trading card
//! records.
//!
//! ## Design Principles
//!
//! 1. **Typed Records**: Every card field has a compile-time `Field` with a
//!    `FieldKind`. Numeric fields distinguish absent, variable (`"X"`,
//!    `"*"`) and concrete values.
//!
//! 2. **Pure Queries**: Filtering, grouping, sorting and statistics return
//!    new lists and never touch their input.
//!
//! 3. **Index Once**: Unique keys are indexed when the catalog is built;
//!    field indices are built on first use and cached.
//!
//! ## Architecture
//!
//! - **Persistent Data Structures**: `CardList` and the catalog store cards
//!   in an `im::Vector`, so list copies are O(1).
//!
//! - **Arena + Positions**: Indices hold positions into the catalog's
//!   record vector, never references.
//!
//! ## Modules
//!
//! - `cards`: Card and set records, numeric values, the field schema, game metadata
//! - `query`: Criteria, value matching, `CardList` operations, statistics
//! - `catalog`: Catalog builder, indices, point lookups, persistence
//! - `error`: `CatalogError` and the `Result` alias

pub mod cards;
pub mod catalog;
pub mod error;
pub mod query;

// Re-export commonly used types
pub use crate::cards::{Card, CardSet, CardVariant, Field, FieldKind, FieldValue, Numeric};

pub use crate::query::{
    CardList, Criteria, DrawOrder, GroupKey, ListRng, Query, StatFunction, StatValue,
};

pub use crate::catalog::{
    CardCatalog, CardQuery, CatalogBuilder, CatalogConfig, DuplicateKeyPolicy, SetQuery,
};

pub use crate::error::{CatalogError, Result};
