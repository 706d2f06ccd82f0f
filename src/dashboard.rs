//! Per-session dashboard state and the per-interaction recompute.

use serde::Serialize;

use crate::config::ViewConfig;
use crate::dataset::Dataset;
use crate::error::{Error, Result};
use crate::features::{Feature, FeatureVector};
use crate::model::Predictor;
use crate::prelude::*;
use crate::views::*;

/// Everything the presentation needs after an input change.
#[derive(Clone, Debug, Serialize)]
pub struct Snapshot {
    pub features: FeatureVector,
    pub predicted_price: f64,
    pub sweep: DerivedSeries,
    pub heatmap: HeatmapGrid,
}

/// Views over the static historical table.
#[derive(Clone, Debug, Default, Serialize)]
pub struct MarketOverview {
    pub summary: Option<SummaryStatistics>,
    pub trendline: Option<Trendline>,
    pub density: Option<DensityGrid>,
}

/// The loaded model and dataset, immutable after construction.
pub struct Dashboard {
    predictor: Predictor,
    dataset: Arc<Dataset>,
    config: ViewConfig,
    market: MarketOverview,
}

impl Dashboard {
    /// Computes the session-static views once.
    #[instrument(skip_all, fields(n_records = dataset.len()))]
    pub fn new(predictor: Predictor, dataset: Arc<Dataset>, config: ViewConfig) -> Result<Self> {
        let (x_axis, y_axis) = config.density;
        let market = MarketOverview {
            summary: no_data_as_none(summarize(&dataset, config.price_per_area))?,
            trendline: no_data_as_none(trendline(&dataset))?.flatten(),
            density: no_data_as_none(density(&dataset, x_axis, y_axis, config.density_aggregate))?,
        };
        if market.summary.is_none() {
            warn!("the dataset has no prices, market views are unavailable");
        }
        Ok(Self {
            predictor,
            dataset,
            config,
            market,
        })
    }

    pub const fn predictor(&self) -> &Predictor {
        &self.predictor
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub const fn config(&self) -> &ViewConfig {
        &self.config
    }

    pub const fn market(&self) -> &MarketOverview {
        &self.market
    }

    pub fn summary(&self) -> Result<&SummaryStatistics> {
        self.market
            .summary
            .as_ref()
            .ok_or(Error::EmptyDataset("summary statistics"))
    }

    /// Also fails when the historical sizes do not determine a line.
    pub fn trendline(&self) -> Result<&Trendline> {
        self.market
            .trendline
            .as_ref()
            .ok_or(Error::EmptyDataset("price trendline"))
    }

    pub fn density(&self) -> Result<&DensityGrid> {
        self.market
            .density
            .as_ref()
            .ok_or(Error::EmptyDataset("price density"))
    }

    pub fn recompute(&self, features: FeatureVector) -> Result<Snapshot> {
        self.recompute_with(features, &self.config.sweep)
    }

    #[instrument(level = "debug", skip_all, fields(features = ?features))]
    pub fn recompute_with(&self, features: FeatureVector, sweep_range: &SweepRange) -> Result<Snapshot> {
        let start_instant = Instant::now();
        let predicted_price = self.predictor.predict(&features)?;
        let sweep = sweep(&self.predictor, &features, Feature::Size, sweep_range)?;
        let heatmap = heatmap(&self.predictor, &features, &self.config.heatmap)?;
        debug!(predicted_price, n_cells = heatmap.cell_count(), elapsed = ?start_instant.elapsed());
        Ok(Snapshot {
            features,
            predicted_price,
            sweep,
            heatmap,
        })
    }
}

fn no_data_as_none<T>(result: Result<T>) -> Result<Option<T>> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(Error::EmptyDataset(view)) => {
            debug!(view, "no data");
            Ok(None)
        }
        Err(error) => Err(error),
    }
}
