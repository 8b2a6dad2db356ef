//! Schema Error Types

use crate::schema::DefaultStrategy;
use thiserror::Error;

/// Errors raised while building or querying a feature schema
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    /// A declared feature has no default under one strategy
    #[error("Feature '{feature}' has no {strategy} default")]
    MissingDefault {
        feature: String,
        strategy: DefaultStrategy,
    },

    /// A feature name was declared more than once
    #[error("Feature '{0}' is declared more than once")]
    DuplicateFeature(String),

    /// The schema declares no features
    #[error("Feature schema declares no features")]
    Empty,

    /// Lookup of a name the schema does not declare
    #[error("Unknown feature: {0}")]
    UnknownFeature(String),

    /// Unrecognized default strategy name
    #[error("Unknown default strategy '{0}' (expected 'median' or 'mean')")]
    UnknownStrategy(String),
}
