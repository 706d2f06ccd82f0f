use serde::Serialize;
use statrs::statistics::Statistics;

use crate::dataset::{Column, Dataset};
use crate::error::{Error, Result};

/// Ordinary least squares fit of the price on the size.
#[derive(Copy, Clone, Debug, PartialEq, Serialize)]
pub struct Trendline {
    pub slope: f64,
    pub intercept: f64,
    pub r_squared: f64,
    pub n_points: usize,
}

impl Trendline {
    pub fn at(&self, size: f64) -> f64 {
        self.slope * size + self.intercept
    }
}

/// Returns `None` when the points do not determine a line.
pub fn trendline(dataset: &Dataset) -> Result<Option<Trendline>> {
    let (sizes, prices): (Vec<f64>, Vec<f64>) = dataset
        .complete(&Column::CHARTED)
        .filter_map(|record| Some((record.size?, record.price?)))
        .unzip();
    if sizes.is_empty() {
        return Err(Error::EmptyDataset("price trendline"));
    }
    if sizes.len() < 2 {
        return Ok(None);
    }

    let size_variance = Statistics::variance(sizes.iter());
    if size_variance == 0.0 {
        return Ok(None);
    }
    let price_variance = Statistics::variance(prices.iter());
    let covariance = Statistics::covariance(sizes.iter(), prices.iter());

    let slope = covariance / size_variance;
    let intercept = Statistics::mean(prices.iter()) - slope * Statistics::mean(sizes.iter());
    let r_squared = if price_variance == 0.0 {
        1.0
    } else {
        covariance * covariance / (size_variance * price_variance)
    };
    Ok(Some(Trendline {
        slope,
        intercept,
        r_squared,
        n_points: sizes.len(),
    }))
}
