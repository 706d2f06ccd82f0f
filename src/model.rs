//! Inference adapter over an opaque pre-trained regression model.

use std::fmt::Debug;
use std::path::Path;

use crate::error::{Error, Result};
use crate::features::FeatureVector;
use crate::prelude::*;

pub mod artifact;
pub mod linear;

/// Trained regression model.
///
/// Implementations are pure: callers guarantee that every row passed in has
/// exactly [`Regressor::n_features`] values.
pub trait Regressor: Debug + Send + Sync {
    fn n_features(&self) -> usize;

    fn predict_row(&self, row: &[f64]) -> f64;

    fn predict_rows(&self, rows: &[Vec<f64>]) -> Vec<f64> {
        rows.iter().map(|row| self.predict_row(row)).collect()
    }
}

/// Shared, read-only handle to the loaded model.
#[derive(Clone, Debug)]
pub struct Predictor {
    model: Arc<dyn Regressor>,
}

impl Predictor {
    pub fn new(model: impl Regressor + 'static) -> Self {
        Self {
            model: Arc::new(model),
        }
    }

    /// Loads the model artifact. Intended to be called once at startup.
    #[instrument(skip_all, fields(path = ?path.as_ref()))]
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let predictor = Self::new(artifact::load(path.as_ref())?);
        info!(n_features = predictor.n_features(), "loaded the model");
        Ok(predictor)
    }

    pub fn n_features(&self) -> usize {
        self.model.n_features()
    }

    pub fn predict(&self, features: &FeatureVector) -> Result<f64> {
        self.predict_raw(&features.to_row())
    }

    /// Predicts from a positional row, the raw model contract.
    pub fn predict_raw(&self, row: &[f64]) -> Result<f64> {
        self.ensure_shape(row.len())?;
        ensure_finite(self.model.predict_row(row))
    }

    pub fn predict_batch(&self, features: &[FeatureVector]) -> Result<Vec<f64>> {
        let rows: Vec<Vec<f64>> = features.iter().map(FeatureVector::to_row).collect();
        self.predict_raw_batch(&rows)
    }

    pub fn predict_raw_batch(&self, rows: &[Vec<f64>]) -> Result<Vec<f64>> {
        for row in rows {
            self.ensure_shape(row.len())?;
        }
        self.model
            .predict_rows(rows)
            .into_iter()
            .map(ensure_finite)
            .collect()
    }

    fn ensure_shape(&self, actual: usize) -> Result<()> {
        let expected = self.model.n_features();
        if actual == expected {
            Ok(())
        } else {
            Err(Error::InvalidInputShape { expected, actual })
        }
    }
}

fn ensure_finite(prediction: f64) -> Result<f64> {
    if prediction.is_finite() {
        Ok(prediction)
    } else {
        Err(Error::NonFinitePrediction(prediction))
    }
}

#[cfg(test)]
pub mod tests {
    use super::*;
    use crate::model::linear::LinearRegression;

    /// Monotonically increasing in every feature.
    pub fn toy_predictor() -> Predictor {
        Predictor::new(LinearRegression::new(vec![100.0, 5000.0, 3000.0, 2000.0], 10000.0))
    }

    #[test]
    fn predict_ok() -> Result<()> {
        let price = toy_predictor().predict(&FeatureVector::new(1000.0, 3, 2, 1))?;
        assert!((price - 133000.0).abs() < 1e-9);
        Ok(())
    }

    #[test]
    fn predict_is_deterministic() -> Result<()> {
        let predictor = toy_predictor();
        let features = FeatureVector::new(1234.5, 4, 3, 2);
        let first = predictor.predict(&features)?;
        let second = predictor.predict(&features)?;
        assert_eq!(first.to_bits(), second.to_bits());
        assert!(first.is_finite());
        Ok(())
    }

    #[test]
    fn wrong_arity_is_rejected() {
        let result = toy_predictor().predict_raw(&[1000.0, 3.0, 2.0]);
        assert!(matches!(result, Err(Error::InvalidInputShape { expected: 4, actual: 3 })));
    }

    #[test]
    fn model_with_other_arity_rejects_feature_vectors() {
        let predictor = Predictor::new(LinearRegression::new(vec![1.0, 2.0, 3.0], 0.0));
        let result = predictor.predict(&FeatureVector::new(1000.0, 3, 2, 1));
        assert!(matches!(result, Err(Error::InvalidInputShape { expected: 3, actual: 4 })));
    }

    #[test]
    fn batch_matches_single_predictions() -> Result<()> {
        let predictor = toy_predictor();
        let features = [FeatureVector::new(800.0, 2, 1, 0), FeatureVector::new(1600.0, 4, 3, 2)];
        let batch = predictor.predict_batch(&features)?;
        assert_eq!(batch, [predictor.predict(&features[0])?, predictor.predict(&features[1])?]);
        Ok(())
    }

    #[test]
    fn batch_rejects_any_wrong_row() {
        let rows = vec![vec![1.0, 2.0, 3.0, 4.0], vec![1.0, 2.0]];
        let result = toy_predictor().predict_raw_batch(&rows);
        assert!(matches!(result, Err(Error::InvalidInputShape { expected: 4, actual: 2 })));
    }

    #[test]
    fn non_finite_prediction_is_reported() {
        let predictor = Predictor::new(LinearRegression::new(vec![f64::NAN, 0.0, 0.0, 0.0], 0.0));
        let result = predictor.predict(&FeatureVector::new(1000.0, 3, 2, 1));
        assert!(matches!(result, Err(Error::NonFinitePrediction(_))));
    }

    #[test]
    fn out_of_range_input_passes_through() -> Result<()> {
        let price = toy_predictor().predict(&FeatureVector::new(-500.0, 0, 0, 0))?;
        assert!((price - -40000.0).abs() < 1e-9);
        Ok(())
    }
}
