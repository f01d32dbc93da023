//! Indexed card catalog.
//!
//! ## Key Types
//!
//! - `CatalogBuilder`: Collects records before indexing
//! - `CardCatalog`: Immutable records with unique-key and cached field indices
//! - `CardQuery` / `SetQuery`: Point-lookup keys
//! - `CatalogConfig`: Duplicate-key policy, validation, JSON style
//! - `CatalogData`: Persisted layout (`card_data`, `set_data`)

pub mod config;
pub mod index;
pub mod lookup;
pub mod persist;
pub mod store;

pub use config::{CatalogConfig, DuplicateKeyPolicy};
pub use index::{PrimaryIndex, SecondaryCache, SecondaryIndex};
pub use lookup::{CardQuery, SetQuery};
pub use persist::CatalogData;
pub use store::{CardCatalog, CatalogBuilder};
