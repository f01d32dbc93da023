//! Error types for catalog and query operations.

use std::io;
use thiserror::Error;

/// Result type for catalog and query operations.
pub type Result<T> = std::result::Result<T, CatalogError>;

/// Which unique key collided while building a catalog.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyKind {
    FullName,
    Identifier,
    Variation,
    SetIdentifier,
    SetName,
}

impl std::fmt::Display for KeyKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            KeyKind::FullName => "full name",
            KeyKind::Identifier => "identifier",
            KeyKind::Variation => "variation",
            KeyKind::SetIdentifier => "set identifier",
            KeyKind::SetName => "set name",
        };
        f.write_str(name)
    }
}

/// Errors surfaced by the record model, query engine and catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The query value's shape is not supported for the targeted field.
    #[error("unsupported query value {value} for field \"{field}\"")]
    InvalidQueryShape {
        /// The field being queried.
        field: String,
        /// Description of the rejected value.
        value: String,
    },

    /// The operation references a field outside the record schema.
    #[error("unknown card field \"{0}\"")]
    UnknownField(String),

    /// A point lookup key is absent from the catalog.
    #[error("no {kind} matching \"{key}\"")]
    NotFound {
        /// Kind of key that was looked up.
        kind: KeyKind,
        /// The missing key.
        key: String,
    },

    /// Zero or several lookup keys were supplied where exactly one is required.
    #[error("ambiguous lookup: {0}")]
    AmbiguousQuery(String),

    /// Two distinct records claim the same unique key.
    #[error("duplicate {kind} \"{key}\" at positions {first} and {second}")]
    DuplicateKey {
        /// Kind of the colliding key.
        kind: KeyKind,
        /// The colliding key.
        key: String,
        /// Position of the record that claimed the key first.
        first: usize,
        /// Position of the record that claimed it again.
        second: usize,
    },

    /// A record fails its consistency check.
    #[error("inconsistent card \"{full_name}\": {reason}")]
    ConsistencyViolation {
        /// Full name of the offending card.
        full_name: String,
        /// Why the card is inconsistent.
        reason: String,
    },

    /// The operation is not defined for the field.
    #[error("cannot {operation} by field \"{field}\"")]
    Unsupported {
        /// The attempted operation.
        operation: &'static str,
        /// The field it was attempted on.
        field: String,
    },

    /// Unknown statistical function name.
    #[error("unknown statistical function \"{0}\"")]
    UnknownStatistic(String),

    /// An argument is outside its valid domain.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// JSON (de)serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Binary snapshot (de)serialization error.
    #[error("binary snapshot error: {0}")]
    Binary(#[from] bincode::Error),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl CatalogError {
    /// Shorthand for an `InvalidQueryShape` error.
    pub(crate) fn shape(field: impl std::fmt::Display, value: impl std::fmt::Debug) -> Self {
        Self::InvalidQueryShape {
            field: field.to_string(),
            value: format!("{value:?}"),
        }
    }

    /// Shorthand for a `ConsistencyViolation` error.
    pub(crate) fn inconsistent(full_name: &str, reason: impl Into<String>) -> Self {
        Self::ConsistencyViolation {
            full_name: full_name.to_string(),
            reason: reason.into(),
        }
    }
}
