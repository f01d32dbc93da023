//! Record model: cards, card sets, and the field schema.
//!
//! ## Key Types
//!
//! - `Card`: One logical card with all prints merged
//! - `CardVariant`: One specific print of a card
//! - `CardSet`: A printing / series with per-edition dates and URLs
//! - `Numeric`: Absent, variable (sentinel), or concrete numeric values
//! - `Field`: Compile-time schema of queryable card fields
//!
//! Records are plain values. They are validated with
//! `Card::check_consistency` and never mutated once indexed.

pub mod card;
pub mod dates;
pub mod field;
pub mod meta;
pub mod numeric;
pub mod set;
pub mod variant;

pub use card::{Card, DateMap, Legality};
pub use dates::DateRange;
pub use field::{Field, FieldKind, FieldValue};
pub use numeric::Numeric;
pub use set::{CardSet, SetUrls};
pub use variant::CardVariant;
