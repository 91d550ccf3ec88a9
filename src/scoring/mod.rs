//! Scoring core: schema reconciliation, probability, banding, attribution
//!
//! `ScoringContext` is the immutable per-process bundle built from the
//! validated artifact at startup. Requests only read it, so it is shared
//! behind an `Arc` with no locking.

pub mod artifact;
pub mod attribution;
pub mod band;
pub mod schema;
pub mod scorer;

use std::collections::HashMap;

use ndarray::{Array1, ArrayView1};
use serde::Serialize;
use serde_json::Value;

use artifact::{ArtifactError, ModelArtifact};
use attribution::{
    rank_top_contributions, AttributionEngine, AttributionError, Contribution, LinearShapEngine,
};
use band::RiskBand;
use schema::{FeatureSchema, InvalidFeature};
use scorer::{round4, LogisticModel, Scorer, StandardScaler};

/// Score + decision band for one client
#[derive(Debug, Clone, Serialize)]
pub struct ScoreResult {
    pub score: f64,
    pub decision: RiskBand,
}

/// Immutable scoring state, built once from the artifact
pub struct ScoringContext {
    schema: FeatureSchema,
    scorer: Scorer,
    engine: Box<dyn AttributionEngine>,
}

impl ScoringContext {
    pub fn from_artifact(artifact: ModelArtifact) -> Result<Self, ArtifactError> {
        artifact.validate()?;

        let n = artifact.feature_names.len();
        let schema = FeatureSchema::new(artifact.feature_names);
        debug_assert!(!schema.is_empty());
        let scorer = Scorer {
            scaler: StandardScaler {
                mean: Array1::from(artifact.scaler.mean),
                scale: Array1::from(artifact.scaler.scale),
            },
            model: LogisticModel {
                coefficients: Array1::from(artifact.classifier.coefficients),
                intercept: artifact.classifier.intercept,
            },
        };
        let background = artifact
            .background
            .map(Array1::from)
            .unwrap_or_else(|| Array1::zeros(n));

        Ok(Self {
            schema,
            scorer,
            engine: Box::new(LinearShapEngine::new(background)),
        })
    }

    pub fn feature_count(&self) -> usize {
        self.schema.len()
    }

    /// Align a raw client feature map to the training schema
    pub fn reconcile(&self, raw: &HashMap<String, Value>) -> Result<Array1<f64>, InvalidFeature> {
        self.schema.reconcile(raw)
    }

    /// Score a reconciled vector: rounded probability + decision band.
    /// Banding uses the unrounded probability.
    pub fn score(&self, vector: &ArrayView1<f64>) -> ScoreResult {
        let probability = self.scorer.probability(vector);
        ScoreResult {
            score: round4(probability),
            decision: RiskBand::from_probability(probability),
        }
    }

    /// Compute the additive decomposition over all schema features, then
    /// rank and keep the `top_k` strongest contributions.
    pub fn explain_vector(
        &self,
        vector: &ArrayView1<f64>,
        top_k: usize,
    ) -> Result<Vec<Contribution>, AttributionError> {
        let standardized = self.scorer.standardize(vector);
        let contributions = self
            .engine
            .attribute(&self.scorer.model, &standardized.view())?;
        Ok(rank_top_contributions(&self.schema, &contributions, top_k))
    }
}
