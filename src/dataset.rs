//! Historical house sales.

use std::fs::File;
use std::path::Path;

use csv::{ReaderBuilder, Trim};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::features::Feature;
use crate::prelude::*;

/// Dataset column.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Column {
    Feature(Feature),
    Price,
}

impl Column {
    pub const REQUIRED: [Column; 5] = [
        Column::Feature(Feature::Size),
        Column::Feature(Feature::Bedrooms),
        Column::Feature(Feature::Bathrooms),
        Column::Feature(Feature::Garage),
        Column::Price,
    ];

    /// Columns a record needs to be charted, the historical charts drop the rest.
    pub const CHARTED: [Column; 3] = [
        Column::Feature(Feature::Size),
        Column::Price,
        Column::Feature(Feature::Bedrooms),
    ];

    pub const fn name(self) -> &'static str {
        match self {
            Self::Feature(feature) => feature.name(),
            Self::Price => "Price",
        }
    }
}

impl From<Feature> for Column {
    fn from(feature: Feature) -> Self {
        Self::Feature(feature)
    }
}

/// Single historical sale. Empty cells are kept as missing values.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct HistoricalRecord {
    #[serde(rename = "Size")]
    pub size: Option<f64>,

    #[serde(rename = "Bedrooms")]
    pub bedrooms: Option<f64>,

    #[serde(rename = "Bathrooms")]
    pub bathrooms: Option<f64>,

    #[serde(rename = "Garage")]
    pub garage: Option<f64>,

    /// Sale price in PKR.
    #[serde(rename = "Price")]
    pub price: Option<f64>,
}

impl HistoricalRecord {
    pub fn get(&self, column: Column) -> Option<f64> {
        match column {
            Column::Feature(Feature::Size) => self.size,
            Column::Feature(Feature::Bedrooms) => self.bedrooms,
            Column::Feature(Feature::Bathrooms) => self.bathrooms,
            Column::Feature(Feature::Garage) => self.garage,
            Column::Price => self.price,
        }
    }

    /// Whether none of the columns is missing.
    pub fn is_complete(&self, columns: &[Column]) -> bool {
        columns.iter().all(|column| self.get(*column).is_some())
    }

    /// Price per square foot, defined for a positive size only.
    pub fn price_per_area(&self) -> Option<f64> {
        match (self.price, self.size) {
            (Some(price), Some(size)) if size > 0.0 => Some(price / size),
            _ => None,
        }
    }
}

/// Immutable historical table, loaded once per session.
#[derive(Clone, Debug, Default)]
pub struct Dataset {
    records: Vec<HistoricalRecord>,
}

impl Dataset {
    pub fn from_records(records: Vec<HistoricalRecord>) -> Self {
        Self { records }
    }

    /// Reads the CSV file, failing on a missing required column or a malformed cell.
    #[instrument(skip_all, fields(path = ?path.as_ref()))]
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|error| Error::dataset_load(path, error))?;
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .trim(Trim::All)
            .from_reader(file);

        let headers = reader
            .headers()
            .map_err(|error| Error::dataset_load(path, error))?;
        let missing: Vec<&str> = Column::REQUIRED
            .iter()
            .map(|column| column.name())
            .filter(|name| !headers.iter().any(|header| header == *name))
            .collect();
        if !missing.is_empty() {
            return Err(Error::dataset_load(path, format!("missing columns: {}", missing.join(", "))));
        }

        let records = reader
            .deserialize()
            .collect::<StdResult<Vec<HistoricalRecord>, _>>()
            .map_err(|error| Error::dataset_load(path, error))?;
        info!(n_records = records.len(), "loaded the dataset");
        Ok(Self::from_records(records))
    }

    pub fn records(&self) -> &[HistoricalRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Records having all the columns, in the original order.
    pub fn complete<'a>(
        &'a self,
        columns: &'a [Column],
    ) -> impl Iterator<Item = &'a HistoricalRecord> + 'a {
        self.records
            .iter()
            .filter(move |record| record.is_complete(columns))
    }

    /// Present values of the column, in the original order.
    pub fn values(&self, column: Column) -> impl Iterator<Item = f64> + '_ {
        self.records.iter().filter_map(move |record| record.get(column))
    }
}

#[cfg(test)]
pub mod tests {
    use std::io::Write;

    use tempfile::NamedTempFile;

    use super::*;

    pub fn record(size: f64, bedrooms: f64, bathrooms: f64, garage: f64, price: f64) -> HistoricalRecord {
        HistoricalRecord {
            size: Some(size),
            bedrooms: Some(bedrooms),
            bathrooms: Some(bathrooms),
            garage: Some(garage),
            price: Some(price),
        }
    }

    fn write_csv(contents: &str) -> anyhow::Result<NamedTempFile> {
        let mut file = tempfile::Builder::new().suffix(".csv").tempfile()?;
        file.write_all(contents.as_bytes())?;
        file.flush()?;
        Ok(file)
    }

    #[test]
    fn load_ok() -> anyhow::Result<()> {
        let file = write_csv(
            "Size,Bedrooms,Bathrooms,Garage,Price,City\n\
             1000,3,2,1,5000000,Lahore\n\
             1500, 4 ,3,2,7500000,Karachi\n",
        )?;
        let dataset = Dataset::load(file.path())?;
        assert_eq!(
            dataset.records(),
            [record(1000.0, 3.0, 2.0, 1.0, 5000000.0), record(1500.0, 4.0, 3.0, 2.0, 7500000.0)],
        );
        Ok(())
    }

    #[test]
    fn empty_cells_are_missing() -> anyhow::Result<()> {
        let file = write_csv("Size,Bedrooms,Bathrooms,Garage,Price\n1000,,2,1,\n")?;
        let dataset = Dataset::load(file.path())?;
        let record = &dataset.records()[0];
        assert_eq!(record.bedrooms, None);
        assert_eq!(record.price, None);
        assert!(!record.is_complete(&Column::REQUIRED));
        assert!(record.is_complete(&[Column::Feature(Feature::Size)]));
        Ok(())
    }

    #[test]
    fn missing_column_fails() -> anyhow::Result<()> {
        let file = write_csv("Size,Bedrooms,Bathrooms,Price\n1000,3,2,5000000\n")?;
        let error = Dataset::load(file.path()).unwrap_err();
        assert!(matches!(error, Error::DatasetLoad { .. }));
        assert!(format!("{:#}", anyhow::Error::from(error)).contains("Garage"));
        Ok(())
    }

    #[test]
    fn malformed_cell_fails() -> anyhow::Result<()> {
        let file = write_csv("Size,Bedrooms,Bathrooms,Garage,Price\nlarge,3,2,1,5000000\n")?;
        assert!(matches!(Dataset::load(file.path()), Err(Error::DatasetLoad { .. })));
        Ok(())
    }

    #[test]
    fn missing_file_fails() {
        assert!(matches!(
            Dataset::load("/nonexistent/house_data.csv"),
            Err(Error::DatasetLoad { .. }),
        ));
    }

    #[test]
    fn header_only_is_empty() -> anyhow::Result<()> {
        let file = write_csv("Size,Bedrooms,Bathrooms,Garage,Price\n")?;
        assert!(Dataset::load(file.path())?.is_empty());
        Ok(())
    }

    #[test]
    fn price_per_area_ok() {
        assert_eq!(record(1000.0, 3.0, 2.0, 1.0, 5000000.0).price_per_area(), Some(5000.0));
        assert_eq!(record(0.0, 3.0, 2.0, 1.0, 5000000.0).price_per_area(), None);
    }

    #[test]
    fn complete_filters_rows() {
        let dataset = Dataset::from_records(vec![
            record(1000.0, 3.0, 2.0, 1.0, 5000000.0),
            HistoricalRecord {
                size: Some(1200.0),
                ..Default::default()
            },
        ]);
        let columns = [Column::Feature(Feature::Size), Column::Price];
        assert_eq!(dataset.complete(&columns).count(), 1);
        assert_eq!(dataset.values(Column::Feature(Feature::Size)).collect::<Vec<_>>(), [1000.0, 1200.0]);
    }
}
