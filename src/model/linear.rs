use serde::{Deserialize, Serialize};

use crate::math::dot;
use crate::model::Regressor;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LinearRegression {
    pub coefficients: Vec<f64>,
    pub intercept: f64,
}

impl LinearRegression {
    pub const fn new(coefficients: Vec<f64>, intercept: f64) -> Self {
        Self {
            coefficients,
            intercept,
        }
    }
}

impl Regressor for LinearRegression {
    fn n_features(&self) -> usize {
        self.coefficients.len()
    }

    fn predict_row(&self, row: &[f64]) -> f64 {
        debug_assert_eq!(row.len(), self.coefficients.len());
        dot(&self.coefficients, row) + self.intercept
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn predict_row_ok() {
        let model = LinearRegression::new(vec![2.0, -1.0], 0.5);
        assert!((model.predict_row(&[3.0, 4.0]) - 2.5).abs() < f64::EPSILON);
    }
}
