//! Local feature attribution
//!
//! Decomposes one prediction into additive per-feature contributions
//! (Shapley values) and ranks the strongest ones. The decomposition
//! algorithm sits behind a trait so the engine can be swapped without
//! touching the ranking and truncation logic.

use ndarray::{Array1, ArrayView1};
use serde::Serialize;
use thiserror::Error;

use super::schema::FeatureSchema;
use super::scorer::{round4, LogisticModel};

/// Number of contributions returned to the caller
pub const TOP_K: usize = 10;

#[derive(Debug, Error)]
pub enum AttributionError {
    #[error("dimension mismatch: model has {expected} features, input has {got}")]
    DimensionMismatch { expected: usize, got: usize },
}

/// Additive decomposition of one prediction, in log-odds space.
///
/// Invariant: `baseline + values.sum()` equals the model's margin on the
/// attributed input.
#[derive(Debug, Clone)]
pub struct FeatureContributions {
    pub baseline: f64,
    pub values: Array1<f64>,
}

/// Pluggable attribution capability
pub trait AttributionEngine: Send + Sync {
    fn attribute(
        &self,
        model: &LogisticModel,
        standardized: &ArrayView1<f64>,
    ) -> Result<FeatureContributions, AttributionError>;
}

/// Exact Shapley decomposition for a linear classifier.
///
/// With independent features, the Shapley value of feature i for a linear
/// model is `coef_i * (z_i - background_i)` and the baseline is the model
/// output at the background point. Local accuracy and symmetry hold by
/// construction.
#[derive(Debug, Clone)]
pub struct LinearShapEngine {
    background: Array1<f64>,
}

impl LinearShapEngine {
    pub fn new(background: Array1<f64>) -> Self {
        Self { background }
    }
}

impl AttributionEngine for LinearShapEngine {
    fn attribute(
        &self,
        model: &LogisticModel,
        standardized: &ArrayView1<f64>,
    ) -> Result<FeatureContributions, AttributionError> {
        let expected = model.coefficients.len();
        if standardized.len() != expected || self.background.len() != expected {
            return Err(AttributionError::DimensionMismatch {
                expected,
                got: standardized.len(),
            });
        }

        let values = &model.coefficients * &(standardized - &self.background);
        let baseline = model.coefficients.dot(&self.background) + model.intercept;

        Ok(FeatureContributions { baseline, values })
    }
}

/// One ranked contribution as returned by the API
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Contribution {
    pub feature: String,
    pub impact: f64,
}

/// Rank all contributions by absolute value, descending, and keep the top
/// `top_k`. The sort is stable, so ties keep schema order. Ranking runs
/// over the full vector before truncation; rounding applies last.
pub fn rank_top_contributions(
    schema: &FeatureSchema,
    contributions: &FeatureContributions,
    top_k: usize,
) -> Vec<Contribution> {
    let mut indexed: Vec<(usize, f64)> = contributions
        .values
        .iter()
        .copied()
        .enumerate()
        .collect();
    indexed.sort_by(|a, b| b.1.abs().total_cmp(&a.1.abs()));

    indexed
        .into_iter()
        .take(top_k)
        .map(|(i, value)| Contribution {
            feature: schema.name(i).to_string(),
            impact: round4(value),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    fn model(coefficients: Array1<f64>, intercept: f64) -> LogisticModel {
        LogisticModel {
            coefficients,
            intercept,
        }
    }

    #[test]
    fn test_two_feature_closed_form() {
        // f(z) = 2 z1 - 3 z2 + 0.5, background (0, 0):
        // phi_1 = 2 z1, phi_2 = -3 z2, baseline = 0.5
        let m = model(array![2.0, -3.0], 0.5);
        let engine = LinearShapEngine::new(array![0.0, 0.0]);

        let c = engine.attribute(&m, &array![1.5, 1.0].view()).unwrap();
        assert!((c.values[0] - 3.0).abs() < 1e-12);
        assert!((c.values[1] + 3.0).abs() < 1e-12);
        assert!((c.baseline - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_local_accuracy() {
        let m = model(array![0.7, -1.2, 0.05, 3.4], -0.85);
        let engine = LinearShapEngine::new(array![0.1, -0.2, 0.0, 1.0]);
        let z = array![1.3, 0.4, -2.2, 0.9];

        let c = engine.attribute(&m, &z.view()).unwrap();
        let reconstructed = c.baseline + c.values.sum();
        assert!((reconstructed - m.margin(&z.view())).abs() < 1e-9);
    }

    #[test]
    fn test_symmetry() {
        // Identical coefficient and identical input value: equal contribution
        let m = model(array![1.5, 1.5, -0.3], 0.0);
        let engine = LinearShapEngine::new(array![0.0, 0.0, 0.0]);

        let c = engine.attribute(&m, &array![2.0, 2.0, 1.0].view()).unwrap();
        assert_eq!(c.values[0], c.values[1]);
    }

    #[test]
    fn test_dimension_mismatch() {
        let m = model(array![1.0, 2.0], 0.0);
        let engine = LinearShapEngine::new(array![0.0, 0.0]);

        let err = engine.attribute(&m, &array![1.0].view()).unwrap_err();
        assert!(matches!(
            err,
            AttributionError::DimensionMismatch { expected: 2, got: 1 }
        ));
    }

    #[test]
    fn test_ranking_order_and_rounding() {
        let schema = FeatureSchema::new(vec![
            "a".to_string(),
            "b".to_string(),
            "c".to_string(),
            "d".to_string(),
        ]);
        let c = FeatureContributions {
            baseline: 0.0,
            values: array![0.1, -2.55555, 0.30001, -0.3],
        };

        let ranked = rank_top_contributions(&schema, &c, 10);
        let order: Vec<&str> = ranked.iter().map(|r| r.feature.as_str()).collect();
        assert_eq!(order, vec!["b", "c", "d", "a"]);
        assert_eq!(ranked[0].impact, -2.5556);
        // Signed values survive ranking by magnitude
        assert_eq!(ranked[2].impact, -0.3);
    }

    #[test]
    fn test_ranking_tie_keeps_schema_order() {
        let schema = FeatureSchema::new(vec![
            "first".to_string(),
            "second".to_string(),
            "third".to_string(),
        ]);
        let c = FeatureContributions {
            baseline: 0.0,
            values: array![-0.5, 0.5, 0.5],
        };

        let ranked = rank_top_contributions(&schema, &c, 10);
        let order: Vec<&str> = ranked.iter().map(|r| r.feature.as_str()).collect();
        assert_eq!(order, vec!["first", "second", "third"]);
    }

    #[test]
    fn test_ranking_truncates_to_top_k() {
        let names: Vec<String> = (0..15).map(|i| format!("f{i}")).collect();
        let schema = FeatureSchema::new(names);
        let values = Array1::from_iter((0..15).map(|i| i as f64 * 0.01));
        let c = FeatureContributions {
            baseline: 0.0,
            values,
        };

        let ranked = rank_top_contributions(&schema, &c, TOP_K);
        assert_eq!(ranked.len(), 10);
        assert_eq!(ranked[0].feature, "f14");
        assert_eq!(ranked[9].feature, "f5");
    }
}
