//! Derived chart data, built from the dataset and from repeated model calls.

pub mod density;
pub mod heatmap;
pub mod summary;
pub mod sweep;
pub mod trendline;

pub use self::density::{density, Aggregate, DensityGrid};
pub use self::heatmap::{heatmap, Axis, HeatmapAxes, HeatmapGrid};
pub use self::summary::{summarize, SummaryStatistics};
pub use self::sweep::{sweep, DerivedSeries, SweepRange, MAX_SWEEP_POINTS};
pub use self::trendline::{trendline, Trendline};
