use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::features::{Feature, FeatureVector};
use crate::model::Predictor;

/// Feature with its candidate values.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Axis {
    pub feature: Feature,
    pub values: Vec<f64>,
}

impl Axis {
    pub fn new(feature: Feature, values: impl IntoIterator<Item = f64>) -> Self {
        Self {
            feature,
            values: values.into_iter().collect(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct HeatmapAxes {
    pub rows: Axis,
    pub columns: Axis,
}

/// Predicted price for every pair of candidate values.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct HeatmapGrid {
    pub rows: Axis,
    pub columns: Axis,

    /// `cells[row][column]`.
    pub cells: Vec<Vec<f64>>,
}

impl HeatmapGrid {
    pub fn cell_count(&self) -> usize {
        self.cells.iter().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.cell_count() == 0
    }
}

/// Calls the model once per cell, the other two features held at the selection.
pub fn heatmap(
    predictor: &Predictor,
    selection: &FeatureVector,
    axes: &HeatmapAxes,
) -> Result<HeatmapGrid> {
    let HeatmapAxes { rows, columns } = axes;
    if rows.feature == columns.feature {
        return Err(Error::DuplicateAxis(rows.feature));
    }

    let inputs = rows
        .values
        .iter()
        .cartesian_product(&columns.values)
        .map(|(row, column)| selection.with(rows.feature, *row).with(columns.feature, *column))
        .collect_vec();
    let prices = predictor.predict_batch(&inputs)?;
    let cells = if columns.values.is_empty() {
        vec![Vec::new(); rows.values.len()]
    } else {
        prices
            .chunks(columns.values.len())
            .map(<[f64]>::to_vec)
            .collect()
    };

    Ok(HeatmapGrid {
        rows: rows.clone(),
        columns: columns.clone(),
        cells,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::tests::toy_predictor;

    fn size_by_bedrooms() -> HeatmapAxes {
        HeatmapAxes {
            rows: Axis::new(
                Feature::Size,
                [600.0, 800.0, 1000.0, 1200.0, 1500.0, 1800.0, 2000.0, 2200.0, 2500.0],
            ),
            columns: Axis::new(Feature::Bedrooms, (1..=5).map(f64::from)),
        }
    }

    #[test]
    fn heatmap_ok() -> Result<()> {
        let predictor = toy_predictor();
        let selection = FeatureVector::new(1000.0, 3, 2, 1);
        let grid = heatmap(&predictor, &selection, &size_by_bedrooms())?;

        assert_eq!(grid.cells.len(), 9);
        assert_eq!(grid.cell_count(), 9 * 5);
        assert_eq!(grid.cells[2][0], predictor.predict(&FeatureVector::new(1000.0, 1, 2, 1))?);
        assert_eq!(grid.cells[8][4], predictor.predict(&FeatureVector::new(2500.0, 5, 2, 1))?);
        Ok(())
    }

    #[test]
    fn empty_axis_gives_empty_grid() -> Result<()> {
        let predictor = toy_predictor();
        let selection = FeatureVector::new(1000.0, 3, 2, 1);

        let mut axes = size_by_bedrooms();
        axes.columns.values.clear();
        let grid = heatmap(&predictor, &selection, &axes)?;
        assert!(grid.is_empty());
        assert_eq!(grid.cells.len(), 9);

        let mut axes = size_by_bedrooms();
        axes.rows.values.clear();
        assert!(heatmap(&predictor, &selection, &axes)?.is_empty());
        Ok(())
    }

    #[test]
    fn duplicate_axis_fails() {
        let axes = HeatmapAxes {
            rows: Axis::new(Feature::Garage, [0.0, 1.0]),
            columns: Axis::new(Feature::Garage, [2.0, 3.0]),
        };
        let result = heatmap(&toy_predictor(), &FeatureVector::new(1000.0, 3, 2, 1), &axes);
        assert!(matches!(result, Err(Error::DuplicateAxis(Feature::Garage))));
    }
}
