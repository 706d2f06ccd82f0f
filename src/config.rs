//! Dashboard view configuration.

use clap::ValueEnum;
use serde::Serialize;

use crate::features::{Feature, FeatureVector};
use crate::views::{Aggregate, Axis, HeatmapAxes, SweepRange};

/// Dashboard flavour.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum Preset {
    /// Price-vs-size sweep and a size-by-bedrooms heatmap.
    #[default]
    Classic,

    /// Market KPIs with price per area and a bedrooms-by-bathrooms heatmap.
    Modern,
}

/// Input widget bounds, inclusive.
#[derive(Copy, Clone, Debug, PartialEq, Serialize)]
pub struct InputRange<T> {
    pub min: T,
    pub max: T,
    pub default: T,
}

impl<T> InputRange<T> {
    pub const fn new(min: T, max: T, default: T) -> Self {
        Self { min, max, default }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Serialize)]
pub struct InputRanges {
    pub size: InputRange<f64>,
    pub bedrooms: InputRange<u32>,
    pub bathrooms: InputRange<u32>,
    pub garage: InputRange<u32>,
}

impl InputRanges {
    pub const fn defaults(&self) -> FeatureVector {
        FeatureVector::new(
            self.size.default,
            self.bedrooms.default,
            self.bathrooms.default,
            self.garage.default,
        )
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ViewConfig {
    pub inputs: InputRanges,
    pub sweep: SweepRange,
    pub heatmap: HeatmapAxes,

    /// Historical density chart axes.
    pub density: (Feature, Feature),
    pub density_aggregate: Aggregate,

    pub price_per_area: bool,
}

impl ViewConfig {
    pub fn classic() -> Self {
        Self {
            inputs: InputRanges {
                size: InputRange::new(100.0, 5000.0, 1000.0),
                bedrooms: InputRange::new(1, 10, 3),
                bathrooms: InputRange::new(1, 10, 2),
                garage: InputRange::new(0, 5, 1),
            },
            sweep: SweepRange::new(500.0, 2500.0, 20),
            heatmap: HeatmapAxes {
                rows: Axis::new(
                    Feature::Size,
                    [600.0, 800.0, 1000.0, 1200.0, 1500.0, 1800.0, 2000.0, 2200.0, 2500.0],
                ),
                columns: Axis::new(Feature::Bedrooms, (1..=5).map(f64::from)),
            },
            density: (Feature::Bedrooms, Feature::Bathrooms),
            density_aggregate: Aggregate::Sum,
            price_per_area: false,
        }
    }

    pub fn modern() -> Self {
        Self {
            inputs: InputRanges {
                size: InputRange::new(400.0, 6000.0, 1400.0),
                bedrooms: InputRange::new(1, 8, 1),
                bathrooms: InputRange::new(1, 6, 1),
                garage: InputRange::new(0, 5, 1),
            },
            sweep: SweepRange::new(400.0, 6000.0, 20),
            heatmap: HeatmapAxes {
                rows: Axis::new(Feature::Bedrooms, (1..=8).map(f64::from)),
                columns: Axis::new(Feature::Bathrooms, (1..=6).map(f64::from)),
            },
            density: (Feature::Bedrooms, Feature::Bathrooms),
            density_aggregate: Aggregate::Sum,
            price_per_area: true,
        }
    }
}

impl From<Preset> for ViewConfig {
    fn from(preset: Preset) -> Self {
        match preset {
            Preset::Classic => Self::classic(),
            Preset::Modern => Self::modern(),
        }
    }
}
