//! Feature Engine
//!
//! Feature schema, default substitution and vector assembly for model inference.

mod assembler;
mod catalog;
mod error;
mod record;
mod schema;
mod vector;

pub use assembler::{Assembly, VectorAssembler};
pub use error::SchemaError;
pub use record::InputRecord;
pub use schema::{DefaultStrategy, DefaultTable, FeatureName, FeatureSchema, TARGET_KEY};
pub use vector::FeatureVector;
