//! Query engine over card lists.
//!
//! Every operation is pure: it reads a `CardList` and returns a new one (or
//! a derived value) without touching the input.
//!
//! ## Key Types
//!
//! - `Criteria`: Ordered per-field queries for `filter` / `filter_exact`
//! - `Query`: A single query value (text, list, int, range, date, predicate)
//! - `FieldMatcher`: A query compiled against one field
//! - `CardList`: Persistent ordered collection with the query operations
//! - `GroupKey`: Bucket key for grouping and secondary indices
//! - `StatFunction` / `StatValue`: Numeric aggregates
//! - `ListRng`: Seeded RNG for shuffling and drawing

pub mod criteria;
pub mod group;
pub mod list;
pub mod matcher;
pub mod rng;
pub mod sort;
pub mod stats;

pub use criteria::{Criteria, Predicate, Query};
pub use group::{keys_for, GroupKey};
pub use list::{CardList, Collected, DrawOrder};
pub use matcher::{DatePattern, FieldMatcher, MatchMode};
pub use rng::ListRng;
pub use stats::{aggregate, StatFunction, StatValue};
