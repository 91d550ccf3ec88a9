//! Model artifact loading
//!
//! The artifact is a single JSON file exported at training time: the
//! ordered feature schema, the standardization parameters, and the fitted
//! logistic classifier. Any load or validation failure is fatal at
//! startup; the process must not accept traffic with a bad model.

use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ArtifactError {
    #[error("model artifact not found: {0}")]
    NotFound(String),

    #[error("failed to read model artifact: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse model artifact: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("unsupported model type '{0}', expected 'logistic_regression'")]
    UnsupportedModelType(String),

    #[error("feature schema is empty")]
    EmptySchema,

    #[error("duplicate feature name in schema: '{0}'")]
    DuplicateFeature(String),

    #[error("{field} has {got} entries, schema has {expected} features")]
    LengthMismatch {
        field: &'static str,
        expected: usize,
        got: usize,
    },

    #[error("non-finite parameter in {0}")]
    NonFiniteParameter(&'static str),

    #[error("scale for feature '{0}' is zero")]
    ZeroScale(String),
}

#[derive(Debug, Clone, Deserialize)]
pub struct ScalerParams {
    pub mean: Vec<f64>,
    pub scale: Vec<f64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ClassifierParams {
    pub coefficients: Vec<f64>,
    pub intercept: f64,
}

/// On-disk artifact format
#[derive(Debug, Clone, Deserialize)]
pub struct ModelArtifact {
    pub model_type: String,
    pub feature_names: Vec<String>,
    pub scaler: ScalerParams,
    pub classifier: ClassifierParams,
    /// Expected feature values in standardized space, used as the
    /// attribution baseline. Defaults to zeros (the training mean).
    #[serde(default)]
    pub background: Option<Vec<f64>>,
}

impl ModelArtifact {
    pub fn load(path: &str) -> Result<Self, ArtifactError> {
        if !Path::new(path).exists() {
            return Err(ArtifactError::NotFound(path.to_string()));
        }

        let contents = std::fs::read_to_string(path)?;
        let artifact: ModelArtifact = serde_json::from_str(&contents)?;
        artifact.validate()?;

        tracing::info!(
            "Model artifact loaded: {} features, type {}",
            artifact.feature_names.len(),
            artifact.model_type
        );

        Ok(artifact)
    }

    pub fn validate(&self) -> Result<(), ArtifactError> {
        if self.model_type != "logistic_regression" {
            return Err(ArtifactError::UnsupportedModelType(self.model_type.clone()));
        }

        let n = self.feature_names.len();
        if n == 0 {
            return Err(ArtifactError::EmptySchema);
        }

        let mut seen = std::collections::HashSet::new();
        for name in &self.feature_names {
            if !seen.insert(name.as_str()) {
                return Err(ArtifactError::DuplicateFeature(name.clone()));
            }
        }

        check_len("scaler.mean", &self.scaler.mean, n)?;
        check_len("scaler.scale", &self.scaler.scale, n)?;
        check_len("classifier.coefficients", &self.classifier.coefficients, n)?;
        if let Some(background) = &self.background {
            check_len("background", background, n)?;
            check_finite("background", background)?;
        }

        check_finite("scaler.mean", &self.scaler.mean)?;
        check_finite("scaler.scale", &self.scaler.scale)?;
        check_finite("classifier.coefficients", &self.classifier.coefficients)?;
        if !self.classifier.intercept.is_finite() {
            return Err(ArtifactError::NonFiniteParameter("classifier.intercept"));
        }

        for (i, &s) in self.scaler.scale.iter().enumerate() {
            if s == 0.0 {
                return Err(ArtifactError::ZeroScale(self.feature_names[i].clone()));
            }
        }

        Ok(())
    }
}

fn check_len(field: &'static str, values: &[f64], expected: usize) -> Result<(), ArtifactError> {
    if values.len() != expected {
        return Err(ArtifactError::LengthMismatch {
            field,
            expected,
            got: values.len(),
        });
    }
    Ok(())
}

fn check_finite(field: &'static str, values: &[f64]) -> Result<(), ArtifactError> {
    if values.iter().any(|v| !v.is_finite()) {
        return Err(ArtifactError::NonFiniteParameter(field));
    }
    Ok(())
}
