use serde::Serialize;
use statrs::statistics::Statistics;

use crate::dataset::{Column, Dataset};
use crate::error::{Error, Result};

/// Market snapshot over the historical prices.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SummaryStatistics {
    /// Number of records with a price.
    pub n_records: usize,

    pub mean_price: f64,
    pub max_price: f64,
    pub min_price: f64,

    /// Mean price per square foot over records with a positive size.
    pub mean_price_per_area: Option<f64>,
}

pub fn summarize(dataset: &Dataset, with_price_per_area: bool) -> Result<SummaryStatistics> {
    let prices: Vec<f64> = dataset.values(Column::Price).collect();
    if prices.is_empty() {
        return Err(Error::EmptyDataset("summary statistics"));
    }

    let mean_price_per_area = if with_price_per_area {
        let prices_per_area: Vec<f64> = dataset
            .records()
            .iter()
            .filter_map(|record| record.price_per_area())
            .collect();
        (!prices_per_area.is_empty()).then(|| Statistics::mean(prices_per_area.iter()))
    } else {
        None
    };

    Ok(SummaryStatistics {
        n_records: prices.len(),
        mean_price: Statistics::mean(prices.iter()),
        max_price: Statistics::max(prices.iter()),
        min_price: Statistics::min(prices.iter()),
        mean_price_per_area,
    })
}
