//! Feature Vector Assembly

use crate::record::InputRecord;
use crate::schema::{DefaultStrategy, FeatureSchema};
use crate::vector::FeatureVector;
use std::sync::Arc;

/// Outcome of one assembly, with counts for diagnostics
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assembly {
    /// The assembled vector
    pub vector: FeatureVector,
    /// Positions filled from the strategy defaults
    pub defaulted: usize,
    /// Supplied names the schema does not declare
    pub unknown: usize,
}

/// Turns caller records into schema-ordered vectors.
///
/// Holds only the shared schema and the active strategy, so it can be cloned
/// into every request handler and used concurrently.
#[derive(Debug, Clone)]
pub struct VectorAssembler {
    schema: Arc<FeatureSchema>,
    strategy: DefaultStrategy,
}

impl VectorAssembler {
    /// Create an assembler over `schema` using `strategy` for missing features
    pub fn new(schema: Arc<FeatureSchema>, strategy: DefaultStrategy) -> Self {
        Self { schema, strategy }
    }

    pub fn schema(&self) -> &FeatureSchema {
        &self.schema
    }

    pub fn strategy(&self) -> DefaultStrategy {
        self.strategy
    }

    /// Assemble a vector of exactly `schema.len()` values.
    ///
    /// Supplied values are used as-is; absent features take the strategy
    /// default; names outside the schema are ignored. An empty record yields
    /// the all-default vector.
    pub fn assemble(&self, record: &InputRecord) -> FeatureVector {
        self.assemble_with_report(record).vector
    }

    /// Same as [`assemble`](Self::assemble), also counting defaulted and unknown entries
    pub fn assemble_with_report(&self, record: &InputRecord) -> Assembly {
        let defaults = self.schema.defaults(self.strategy);
        let mut values = Vec::with_capacity(self.schema.len());
        let mut defaulted = 0;

        for (name, default) in self.schema.order().iter().zip(defaults) {
            match record.get(name) {
                Some(value) => values.push(value.to_string()),
                None => {
                    values.push(default.clone());
                    defaulted += 1;
                }
            }
        }

        let unknown = record
            .names()
            .filter(|name| !self.schema.contains(name))
            .count();

        Assembly {
            vector: FeatureVector::new(values),
            defaulted,
            unknown,
        }
    }
}
