//! Feature schema and reconciliation
//!
//! The schema is the ordered list of feature names the model was fitted on.
//! Reconciliation aligns an arbitrary client feature map to it: schema order,
//! missing features filled with 0.0, unknown keys dropped.

use std::collections::HashMap;

use ndarray::Array1;
use serde_json::Value;
use thiserror::Error;

/// A feature value that cannot be interpreted as a number
#[derive(Debug, Error)]
#[error("invalid value for feature '{name}': expected a number, got {value}")]
pub struct InvalidFeature {
    pub name: String,
    pub value: String,
}

/// Ordered feature names, fixed at model-fit time. Never mutated after load.
#[derive(Debug, Clone)]
pub struct FeatureSchema {
    names: Vec<String>,
}

impl FeatureSchema {
    pub fn new(names: Vec<String>) -> Self {
        Self { names }
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn name(&self, i: usize) -> &str {
        &self.names[i]
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Align a raw feature map to this schema.
    ///
    /// For each schema feature, in order: the client's value if present,
    /// otherwise 0.0. Keys not in the schema are ignored. Total over any
    /// numeric map; only a non-numeric value is an error.
    pub fn reconcile(&self, raw: &HashMap<String, Value>) -> Result<Array1<f64>, InvalidFeature> {
        let mut vector = Array1::zeros(self.names.len());
        for (i, name) in self.names.iter().enumerate() {
            if let Some(value) = raw.get(name) {
                vector[i] = coerce_numeric(name, value)?;
            }
        }
        Ok(vector)
    }
}

/// Coerce a JSON value to f64: any JSON number, or a string that parses as
/// one (the upstream clients send CSV-derived maps where numbers may arrive
/// quoted). Anything else is a client contract violation.
fn coerce_numeric(name: &str, value: &Value) -> Result<f64, InvalidFeature> {
    let invalid = || InvalidFeature {
        name: name.to_string(),
        value: value.to_string(),
    };

    match value {
        Value::Number(n) => n.as_f64().ok_or_else(invalid),
        Value::String(s) => s.trim().parse::<f64>().map_err(|_| invalid()),
        _ => Err(invalid()),
    }
}
