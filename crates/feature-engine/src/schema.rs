//! Feature Schema
//!
//! Canonical feature order plus one default table per [`DefaultStrategy`].
//! Built once at startup and shared read-only afterwards.

use crate::error::SchemaError;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::str::FromStr;
use tracing::{debug, warn};

/// Key under which a default table carries the reference label statistic
pub const TARGET_KEY: &str = "target";

/// Canonical identifier of one model input dimension
pub type FeatureName = String;

/// Name → decimal-string default, as produced for one strategy
pub type DefaultTable = HashMap<FeatureName, String>;

/// Which reference statistic fills in missing features
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DefaultStrategy {
    /// Per-feature median over the reference dataset
    #[default]
    Median,
    /// Per-feature mean over the reference dataset
    Mean,
}

impl DefaultStrategy {
    /// All strategies, in a fixed order
    pub const ALL: [DefaultStrategy; 2] = [DefaultStrategy::Median, DefaultStrategy::Mean];

    /// Get string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            DefaultStrategy::Median => "median",
            DefaultStrategy::Mean => "mean",
        }
    }
}

impl fmt::Display for DefaultStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DefaultStrategy {
    type Err = SchemaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "median" => Ok(DefaultStrategy::Median),
            "mean" => Ok(DefaultStrategy::Mean),
            _ => Err(SchemaError::UnknownStrategy(s.to_string())),
        }
    }
}

/// Defaults for one strategy, stored positionally (aligned with the schema order)
#[derive(Debug, Clone)]
struct StrategyDefaults {
    values: Vec<String>,
    target: Option<String>,
}

impl StrategyDefaults {
    fn resolve(
        names: &[FeatureName],
        mut table: DefaultTable,
        strategy: DefaultStrategy,
    ) -> Result<Self, SchemaError> {
        let mut values = Vec::with_capacity(names.len());
        for name in names {
            let value = table.remove(name).ok_or_else(|| SchemaError::MissingDefault {
                feature: name.clone(),
                strategy,
            })?;
            values.push(value);
        }

        let target = table.remove(TARGET_KEY);

        if !table.is_empty() {
            let mut extra: Vec<_> = table.into_keys().collect();
            extra.sort();
            warn!(%strategy, extra = ?extra, "Default table carries keys outside the schema; ignoring them");
        }

        Ok(Self { values, target })
    }
}

/// Immutable, ordered catalog of features with per-strategy defaults
#[derive(Debug, Clone)]
pub struct FeatureSchema {
    names: Vec<FeatureName>,
    positions: HashMap<FeatureName, usize>,
    median: StrategyDefaults,
    mean: StrategyDefaults,
}

impl FeatureSchema {
    /// Build a schema, checking that every declared feature has a default
    /// under both strategies.
    pub fn new<I, S>(order: I, median: DefaultTable, mean: DefaultTable) -> Result<Self, SchemaError>
    where
        I: IntoIterator<Item = S>,
        S: Into<FeatureName>,
    {
        let names: Vec<FeatureName> = order.into_iter().map(Into::into).collect();
        if names.is_empty() {
            return Err(SchemaError::Empty);
        }

        let mut seen = HashSet::with_capacity(names.len());
        for name in &names {
            if !seen.insert(name.as_str()) {
                return Err(SchemaError::DuplicateFeature(name.clone()));
            }
        }

        let median = StrategyDefaults::resolve(&names, median, DefaultStrategy::Median)?;
        let mean = StrategyDefaults::resolve(&names, mean, DefaultStrategy::Mean)?;

        let positions = names
            .iter()
            .enumerate()
            .map(|(idx, name)| (name.clone(), idx))
            .collect();

        debug!("Feature schema built with {} features", names.len());

        Ok(Self {
            names,
            positions,
            median,
            mean,
        })
    }

    /// Feature names in declared order
    pub fn order(&self) -> &[FeatureName] {
        &self.names
    }

    /// Number of features
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Always false for a constructed schema
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Whether `name` is a declared feature
    pub fn contains(&self, name: &str) -> bool {
        self.positions.contains_key(name)
    }

    /// Position of `name` in the declared order
    pub fn position(&self, name: &str) -> Option<usize> {
        self.positions.get(name).copied()
    }

    /// Default for `name` under `strategy`
    pub fn default_for(&self, name: &str, strategy: DefaultStrategy) -> Result<&str, SchemaError> {
        let idx = self
            .position(name)
            .ok_or_else(|| SchemaError::UnknownFeature(name.to_string()))?;
        Ok(&self.strategy(strategy).values[idx])
    }

    /// All defaults for `strategy`, aligned with [`order`](Self::order)
    pub fn defaults(&self, strategy: DefaultStrategy) -> &[String] {
        &self.strategy(strategy).values
    }

    /// Reference label statistic. Never part of a feature vector.
    pub fn target(&self, strategy: DefaultStrategy) -> Option<&str> {
        self.strategy(strategy).target.as_deref()
    }

    fn strategy(&self, strategy: DefaultStrategy) -> &StrategyDefaults {
        match strategy {
            DefaultStrategy::Median => &self.median,
            DefaultStrategy::Mean => &self.mean,
        }
    }
}
