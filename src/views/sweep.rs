use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::features::{Feature, FeatureVector};
use crate::math::linspace;
use crate::model::Predictor;

/// Upper bound on the swept values, each one costs a model call.
pub const MAX_SWEEP_POINTS: usize = 1000;

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SweepRange {
    pub start: f64,
    pub end: f64,
    pub n_points: usize,
}

impl SweepRange {
    pub const fn new(start: f64, end: f64, n_points: usize) -> Self {
        Self {
            start,
            end,
            n_points,
        }
    }

    /// Rejects non-finite bounds and more than [`MAX_SWEEP_POINTS`] values.
    pub fn validate(&self) -> Result<()> {
        if !self.start.is_finite() {
            return Err(Error::invalid_parameter("sweep_start", "must be finite"));
        }
        if !self.end.is_finite() {
            return Err(Error::invalid_parameter("sweep_end", "must be finite"));
        }
        if self.n_points > MAX_SWEEP_POINTS {
            return Err(Error::invalid_parameter(
                "sweep_points",
                format!("at most {} points are allowed, got {}", MAX_SWEEP_POINTS, self.n_points),
            ));
        }
        Ok(())
    }

    pub fn values(&self) -> Vec<f64> {
        linspace(self.start, self.end, self.n_points)
    }
}

/// Predicted price over a swept feature, other features held fixed.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct DerivedSeries {
    pub axis: Feature,

    /// `(value, predicted price)` in ascending value order.
    pub points: Vec<(f64, f64)>,
}

impl DerivedSeries {
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

pub fn sweep(
    predictor: &Predictor,
    selection: &FeatureVector,
    axis: Feature,
    range: &SweepRange,
) -> Result<DerivedSeries> {
    range.validate()?;
    let mut values = range.values();
    values.sort_unstable_by(f64::total_cmp);
    let inputs: Vec<FeatureVector> = values
        .iter()
        .map(|value| selection.with(axis, *value))
        .collect();
    let prices = predictor.predict_batch(&inputs)?;
    Ok(DerivedSeries {
        axis,
        points: values.into_iter().zip(prices).collect(),
    })
}
