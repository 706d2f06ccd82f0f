use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::dataset::{Column, Dataset};
use crate::error::{Error, Result};
use crate::features::Feature;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Aggregate {
    #[default]
    Sum,
    Mean,
    Count,
}

/// Historical prices aggregated per distinct pair of feature values.
///
/// Only charted records are counted, see [`Column::CHARTED`].
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct DensityGrid {
    pub x_axis: Feature,
    pub y_axis: Feature,
    pub aggregate: Aggregate,

    /// Distinct values in ascending order.
    pub x_values: Vec<f64>,
    pub y_values: Vec<f64>,

    /// `cells[y][x]`, `None` for pairs without any record.
    pub cells: Vec<Vec<Option<f64>>>,
}

#[derive(Copy, Clone, Default)]
struct Bucket {
    sum: f64,
    count: usize,
}

pub fn density(dataset: &Dataset, x_axis: Feature, y_axis: Feature, aggregate: Aggregate) -> Result<DensityGrid> {
    if x_axis == y_axis {
        return Err(Error::DuplicateAxis(x_axis));
    }
    let mut columns = Column::CHARTED.to_vec();
    columns.extend([Column::from(x_axis), Column::from(y_axis)]);
    let points = dataset
        .complete(&columns)
        .filter_map(|record| Some((record.get(x_axis.into())?, record.get(y_axis.into())?, record.price?)))
        .collect_vec();
    if points.is_empty() {
        return Err(Error::EmptyDataset("price density"));
    }

    let x_values = distinct(points.iter().map(|(x, _, _)| *x));
    let y_values = distinct(points.iter().map(|(_, y, _)| *y));
    let mut buckets = vec![vec![Bucket::default(); x_values.len()]; y_values.len()];
    for (x, y, price) in points {
        // Both values come from the distinct lists built above.
        if let (Some(i), Some(j)) = (position(&x_values, x), position(&y_values, y)) {
            let bucket = &mut buckets[j][i];
            bucket.sum += price;
            bucket.count += 1;
        }
    }

    let cells = buckets
        .into_iter()
        .map(|row| {
            row.into_iter()
                .map(|bucket| {
                    (bucket.count != 0).then(|| match aggregate {
                        Aggregate::Sum => bucket.sum,
                        Aggregate::Mean => bucket.sum / bucket.count as f64,
                        Aggregate::Count => bucket.count as f64,
                    })
                })
                .collect()
        })
        .collect();

    Ok(DensityGrid {
        x_axis,
        y_axis,
        aggregate,
        x_values,
        y_values,
        cells,
    })
}

fn distinct(values: impl Iterator<Item = f64>) -> Vec<f64> {
    values
        .sorted_by(f64::total_cmp)
        .dedup_by(|left, right| left.total_cmp(right).is_eq())
        .collect()
}

fn position(values: &[f64], value: f64) -> Option<usize> {
    values.binary_search_by(|probe| probe.total_cmp(&value)).ok()
}
