//! Built-in Breast Cancer Schema
//!
//! The 30 features of the Wisconsin diagnostic breast cancer dataset, in the
//! column order the deployed model was trained on, with median and mean
//! defaults taken over the training split.

use crate::error::SchemaError;
use crate::schema::{DefaultTable, FeatureSchema, TARGET_KEY};

/// (feature, median, mean)
const BREAST_CANCER: [(&str, &str, &str); 30] = [
    ("mean_radius", "13.3", "14.117635164835166"),
    ("mean_texture", "18.68", "19.185032967032967"),
    ("mean_perimeter", "85.98", "91.88224175824176"),
    ("mean_area", "551.7", "654.3775824175823"),
    ("mean_smoothness", "0.09462", "0.09574402197802198"),
    ("mean_compactness", "0.09097", "0.10361931868131868"),
    ("mean_concavity", "0.06154", "0.08889814505494506"),
    ("mean_concave_points", "0.03341", "0.04827987032967032"),
    ("mean_symmetry", "0.1792", "0.18109868131868131"),
    ("mean_fractal_dimension", "0.06148", "0.06275676923076923"),
    ("radius_error", "0.3237", "0.40201582417582415"),
    ("texture_error", "1.095", "1.2026868131868131"),
    ("perimeter_error", "2.287", "2.858253406593406"),
    ("area_error", "24.72", "40.0712989010989"),
    ("smoothness_error", "0.00638", "0.006989074725274725"),
    ("compactness_error", "0.02042", "0.025635448351648354"),
    ("concavity_error", "0.02615", "0.03282367230769231"),
    ("concave_points_error", "0.0111", "0.01189394065934066"),
    ("symmetry_error", "0.01872", "0.02057351208791209"),
    ("fractal_dimension_error", "0.003211", "0.003820455604395604"),
    ("worst_radius", "14.97", "16.235103296703297"),
    ("worst_texture", "25.22", "25.53569230769231"),
    ("worst_perimeter", "97.67", "107.10312087912088"),
    ("worst_area", "686.6", "876.9870329670329"),
    ("worst_smoothness", "0.1309", "0.13153213186813187"),
    ("worst_compactness", "0.2101", "0.25274180219780223"),
    ("worst_concavity", "0.2264", "0.27459456923076925"),
    ("worst_concave_points", "0.09861", "0.11418222197802198"),
    ("worst_symmetry", "0.2827", "0.29050219780219777"),
    ("worst_fractal_dimension", "0.08006", "0.08386784615384615"),
];

/// Label statistics (median, mean) of the training split
const BREAST_CANCER_TARGET: (&str, &str) = ("1.0", "0.6285714285714286");

impl FeatureSchema {
    /// Build the breast cancer schema used by the deployed model
    pub fn breast_cancer() -> Result<Self, SchemaError> {
        let mut median: DefaultTable = BREAST_CANCER
            .iter()
            .map(|(name, median, _)| (name.to_string(), median.to_string()))
            .collect();
        let mut mean: DefaultTable = BREAST_CANCER
            .iter()
            .map(|(name, _, mean)| (name.to_string(), mean.to_string()))
            .collect();

        median.insert(TARGET_KEY.to_string(), BREAST_CANCER_TARGET.0.to_string());
        mean.insert(TARGET_KEY.to_string(), BREAST_CANCER_TARGET.1.to_string());

        FeatureSchema::new(BREAST_CANCER.iter().map(|(name, _, _)| *name), median, mean)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::DefaultStrategy;

    #[test]
    fn test_breast_cancer_schema_is_complete() {
        let schema = FeatureSchema::breast_cancer().unwrap();
        assert_eq!(schema.len(), 30);
        assert_eq!(schema.order()[0], "mean_radius");
        assert_eq!(schema.order()[29], "worst_fractal_dimension");
        assert!(!schema.contains(TARGET_KEY));
    }

    #[test]
    fn test_breast_cancer_defaults() {
        let schema = FeatureSchema::breast_cancer().unwrap();
        assert_eq!(
            schema.default_for("mean_area", DefaultStrategy::Median).unwrap(),
            "551.7"
        );
        assert_eq!(
            schema.default_for("mean_area", DefaultStrategy::Mean).unwrap(),
            "654.3775824175823"
        );
        assert_eq!(schema.target(DefaultStrategy::Median), Some("1.0"));
        assert_eq!(schema.target(DefaultStrategy::Mean), Some("0.6285714285714286"));
    }

    #[test]
    fn test_order_identical_across_strategies() {
        let schema = FeatureSchema::breast_cancer().unwrap();
        for strategy in DefaultStrategy::ALL {
            assert_eq!(schema.defaults(strategy).len(), schema.order().len());
        }
        let again = FeatureSchema::breast_cancer().unwrap();
        assert_eq!(schema.order(), again.order());
    }
}
