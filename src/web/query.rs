//! Query string parameters, missing ones fall back to the preset.

use serde::Deserialize;

use crate::error::{Error, Result};
use crate::features::FeatureVector;
use crate::views::SweepRange;

#[derive(Deserialize, Default)]
pub struct FeatureQuery {
    #[serde(default)]
    pub size: Option<f64>,

    #[serde(default)]
    pub bedrooms: Option<u32>,

    #[serde(default)]
    pub bathrooms: Option<u32>,

    #[serde(default)]
    pub garage: Option<u32>,
}

impl FeatureQuery {
    pub fn or(&self, defaults: FeatureVector) -> Result<FeatureVector> {
        let size = self.size.unwrap_or(defaults.size);
        if !size.is_finite() {
            return Err(Error::invalid_parameter("size", "must be finite"));
        }
        Ok(FeatureVector::new(
            size,
            self.bedrooms.unwrap_or(defaults.bedrooms),
            self.bathrooms.unwrap_or(defaults.bathrooms),
            self.garage.unwrap_or(defaults.garage),
        ))
    }
}

#[derive(Deserialize, Default)]
pub struct SweepQuery {
    #[serde(default)]
    pub sweep_start: Option<f64>,

    #[serde(default)]
    pub sweep_end: Option<f64>,

    #[serde(default)]
    pub sweep_points: Option<usize>,
}

impl SweepQuery {
    pub fn or(&self, defaults: &SweepRange) -> Result<SweepRange> {
        let range = SweepRange::new(
            self.sweep_start.unwrap_or(defaults.start),
            self.sweep_end.unwrap_or(defaults.end),
            self.sweep_points.unwrap_or(defaults.n_points),
        );
        range.validate()?;
        Ok(range)
    }
}
