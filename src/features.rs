//! Model input features.

use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

/// Number of features the model is fit on.
pub const N_FEATURES: usize = 4;

/// Feature position in the model input.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Feature {
    Size,
    Bedrooms,
    Bathrooms,
    Garage,
}

impl Feature {
    /// All features in the order the model was fit on.
    pub const ALL: [Feature; N_FEATURES] =
        [Feature::Size, Feature::Bedrooms, Feature::Bathrooms, Feature::Garage];

    /// Column name in the dataset and in the model artifact.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Size => "Size",
            Self::Bedrooms => "Bedrooms",
            Self::Bathrooms => "Bathrooms",
            Self::Garage => "Garage",
        }
    }
}

impl Display for Feature {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        formatter.write_str(self.name())
    }
}

/// Single model input: a house described by its four features.
///
/// Field order matters: [`FeatureVector::to_row`] lays the values out
/// positionally, names are never consulted at inference time.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FeatureVector {
    /// Area in square feet.
    pub size: f64,

    pub bedrooms: u32,
    pub bathrooms: u32,
    pub garage: u32,
}

impl FeatureVector {
    pub const fn new(size: f64, bedrooms: u32, bathrooms: u32, garage: u32) -> Self {
        Self {
            size,
            bedrooms,
            bathrooms,
            garage,
        }
    }

    #[must_use]
    pub fn to_row(&self) -> Vec<f64> {
        Feature::ALL.iter().map(|feature| self.get(*feature)).collect()
    }

    #[must_use]
    pub fn get(&self, feature: Feature) -> f64 {
        match feature {
            Feature::Size => self.size,
            Feature::Bedrooms => self.bedrooms as f64,
            Feature::Bathrooms => self.bathrooms as f64,
            Feature::Garage => self.garage as f64,
        }
    }

    /// Returns a copy with the feature replaced.
    ///
    /// Count features are rounded to the nearest non-negative integer.
    #[must_use]
    pub fn with(mut self, feature: Feature, value: f64) -> Self {
        let count = || value.round().max(0.0) as u32;
        match feature {
            Feature::Size => self.size = value,
            Feature::Bedrooms => self.bedrooms = count(),
            Feature::Bathrooms => self.bathrooms = count(),
            Feature::Garage => self.garage = count(),
        }
        self
    }
}
