//! One-shot commands printing JSON to stdout.

use std::io::{stdout, Write};

use serde::Serialize;

use crate::dashboard::Dashboard;
use crate::dataset::Dataset;
use crate::model::Predictor;
use crate::opts::{AssetOpts, PredictOpts, SummaryOpts};
use crate::prelude::*;

/// Loads the model and the dataset, failing fast on either.
#[instrument(skip_all, fields(preset = ?assets.preset))]
pub fn load_dashboard(assets: &AssetOpts) -> Result<Dashboard> {
    let start_instant = Instant::now();
    let predictor = Predictor::load(&assets.model)?;
    let dataset = Arc::new(Dataset::load(&assets.dataset)?);
    let dashboard = Dashboard::new(predictor, dataset, assets.view_config())
        .context("failed to build the market overview")?;
    info!(elapsed = ?start_instant.elapsed(), "the dashboard is ready");
    Ok(dashboard)
}

pub fn predict(opts: PredictOpts) -> Result {
    let dashboard = load_dashboard(&opts.assets)?;
    let snapshot = dashboard
        .recompute(opts.features())
        .context("failed to compute the prediction")?;
    print_json(&snapshot)
}

pub fn summary(opts: SummaryOpts) -> Result {
    let dashboard = load_dashboard(&opts.assets)?;
    print_json(dashboard.market())
}

fn print_json(value: &impl Serialize) -> Result {
    let mut stdout = stdout().lock();
    serde_json::to_writer_pretty(&mut stdout, value)?;
    writeln!(stdout)?;
    Ok(())
}
