//! Scoring pipeline: standardize, then apply the fitted logistic classifier
//!
//! Parameters come from the model artifact and are read-only for the
//! process lifetime. Inference is deterministic.

use ndarray::{Array1, ArrayView1};

/// Standardization parameters fixed at fit time
#[derive(Debug, Clone)]
pub struct StandardScaler {
    pub mean: Array1<f64>,
    pub scale: Array1<f64>,
}

impl StandardScaler {
    /// Element-wise (x - mean) / scale
    pub fn transform(&self, vector: &ArrayView1<f64>) -> Array1<f64> {
        (vector - &self.mean) / &self.scale
    }
}

/// Fitted binary logistic classifier
#[derive(Debug, Clone)]
pub struct LogisticModel {
    pub coefficients: Array1<f64>,
    pub intercept: f64,
}

impl LogisticModel {
    /// Raw log-odds output for a standardized vector
    pub fn margin(&self, standardized: &ArrayView1<f64>) -> f64 {
        self.coefficients.dot(standardized) + self.intercept
    }

    /// Probability of the positive (default) class
    pub fn predict_proba(&self, standardized: &ArrayView1<f64>) -> f64 {
        sigmoid(self.margin(standardized))
    }
}

/// Two-stage scorer: scaler then classifier
#[derive(Debug, Clone)]
pub struct Scorer {
    pub scaler: StandardScaler,
    pub model: LogisticModel,
}

impl Scorer {
    pub fn standardize(&self, vector: &ArrayView1<f64>) -> Array1<f64> {
        self.scaler.transform(vector)
    }

    pub fn probability(&self, vector: &ArrayView1<f64>) -> f64 {
        self.model.predict_proba(&self.standardize(vector).view())
    }
}

fn sigmoid(x: f64) -> f64 {
    1.0 / (1.0 + (-x).exp())
}

/// Round to 4 decimals for the API response
pub fn round4(x: f64) -> f64 {
    (x * 10_000.0).round() / 10_000.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    fn scorer() -> Scorer {
        Scorer {
            scaler: StandardScaler {
                mean: array![10.0, 20.0],
                scale: array![2.0, 5.0],
            },
            model: LogisticModel {
                coefficients: array![1.0, -0.5],
                intercept: 0.25,
            },
        }
    }

    #[test]
    fn test_standardize() {
        let s = scorer();
        let z = s.standardize(&array![14.0, 10.0].view());
        assert_eq!(z, array![2.0, -2.0]);
    }

    #[test]
    fn test_probability_matches_closed_form() {
        let s = scorer();
        // z = [2, -2], margin = 2 + 1 + 0.25 = 3.25
        let p = s.probability(&array![14.0, 10.0].view());
        let expected = 1.0 / (1.0 + (-3.25f64).exp());
        assert!((p - expected).abs() < 1e-12);
        assert!(p > 0.0 && p < 1.0);
    }

    #[test]
    fn test_zero_coefficients_give_intercept_probability() {
        let s = Scorer {
            scaler: StandardScaler {
                mean: array![0.0],
                scale: array![1.0],
            },
            model: LogisticModel {
                coefficients: array![0.0],
                intercept: -(3.0f64).ln(),
            },
        };
        // sigmoid(-ln 3) = 1/4 exactly
        let p = s.probability(&array![123.0].view());
        assert!((p - 0.25).abs() < 1e-12);
    }

    #[test]
    fn test_deterministic() {
        let s = scorer();
        let v = array![13.0, 7.5];
        assert_eq!(s.probability(&v.view()), s.probability(&v.view()));
    }

    #[test]
    fn test_round4() {
        assert_eq!(round4(0.123456), 0.1235);
        assert_eq!(round4(0.25), 0.25);
        assert_eq!(round4(-0.00005), -0.0001);
    }
}
