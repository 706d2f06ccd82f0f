//! CLI options.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::config::{Preset, ViewConfig};
use crate::features::FeatureVector;
use crate::prelude::*;
use crate::views::{SweepRange, MAX_SWEEP_POINTS};

#[derive(Parser)]
#[command(author, version, about, propagate_version = true)]
pub struct Opts {
    /// Sentry DSN
    #[arg(long, env = "HOUSE_PRICE_DASHBOARD_SENTRY_DSN")]
    pub sentry_dsn: Option<String>,

    /// Sentry performance monitoring sample rate
    #[arg(long, default_value = "0.0", env = "HOUSE_PRICE_DASHBOARD_TRACES_SAMPLE_RATE")]
    pub traces_sample_rate: f32,

    #[command(subcommand)]
    pub subcommand: Command,
}

#[derive(Subcommand)]
pub enum Command {
    Web(WebOpts),
    Predict(PredictOpts),
    Summary(SummaryOpts),
}

/// Runs the web dashboard
#[derive(Args)]
pub struct WebOpts {
    #[command(flatten)]
    pub assets: AssetOpts,

    /// Web application bind host
    #[arg(long, default_value = "::", env = "HOUSE_PRICE_DASHBOARD_HOST")]
    pub host: String,

    /// Web application bind port
    #[arg(short, long, default_value = "8081", env = "HOUSE_PRICE_DASHBOARD_PORT")]
    pub port: u16,
}

/// Predicts a single house price and prints the derived views
#[derive(Args)]
pub struct PredictOpts {
    #[command(flatten)]
    pub assets: AssetOpts,

    /// Size in square feet
    #[arg(long)]
    pub size: f64,

    #[arg(long)]
    pub bedrooms: u32,

    #[arg(long)]
    pub bathrooms: u32,

    /// Number of garage spaces
    #[arg(long)]
    pub garage: u32,
}

impl PredictOpts {
    pub const fn features(&self) -> FeatureVector {
        FeatureVector::new(self.size, self.bedrooms, self.bathrooms, self.garage)
    }
}

/// Prints the market overview of the historical dataset
#[derive(Args)]
pub struct SummaryOpts {
    #[command(flatten)]
    pub assets: AssetOpts,
}

#[derive(Args)]
pub struct AssetOpts {
    /// Pre-trained model artifact (pickle, or JSON with the `.json` extension)
    #[arg(long, default_value = "house_price_model.pkl", env = "HOUSE_PRICE_DASHBOARD_MODEL")]
    pub model: PathBuf,

    /// Historical sales CSV
    #[arg(long, default_value = "house_data.csv", env = "HOUSE_PRICE_DASHBOARD_DATASET")]
    pub dataset: PathBuf,

    /// Dashboard flavour
    #[arg(long, value_enum, default_value_t = Preset::Classic, env = "HOUSE_PRICE_DASHBOARD_PRESET")]
    pub preset: Preset,

    /// Overrides the preset's first swept size
    #[arg(long)]
    pub sweep_start: Option<f64>,

    /// Overrides the preset's last swept size
    #[arg(long)]
    pub sweep_end: Option<f64>,

    /// Overrides the preset's number of swept sizes
    #[arg(long, value_parser = parse_sweep_points)]
    pub sweep_points: Option<usize>,
}

impl AssetOpts {
    pub fn view_config(&self) -> ViewConfig {
        let mut config = ViewConfig::from(self.preset);
        let SweepRange {
            start,
            end,
            n_points,
        } = config.sweep;
        config.sweep = SweepRange::new(
            self.sweep_start.unwrap_or(start),
            self.sweep_end.unwrap_or(end),
            self.sweep_points.unwrap_or(n_points),
        );
        config
    }
}

fn parse_sweep_points(value: &str) -> Result<usize> {
    match value.parse()? {
        n_points @ 1..=MAX_SWEEP_POINTS => Ok(n_points),
        _ => Err(anyhow!("expected from 1 to {} points", MAX_SWEEP_POINTS)),
    }
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn verify_cli() {
        Opts::command().debug_assert();
    }

    #[test]
    fn sweep_overrides_ok() -> Result {
        let opts = Opts::try_parse_from([
            "house-price-dashboard",
            "summary",
            "--preset",
            "modern",
            "--sweep-end",
            "3000",
            "--sweep-points",
            "5",
        ])?;
        let summary = match opts.subcommand {
            Command::Summary(summary) => summary,
            _ => anyhow::bail!("expected the summary command"),
        };
        let config = summary.assets.view_config();
        assert_eq!(config.sweep, SweepRange::new(400.0, 3000.0, 5));
        assert!(config.price_per_area);
        Ok(())
    }

    #[test]
    fn zero_sweep_points_fails() {
        let result = Opts::try_parse_from(["house-price-dashboard", "summary", "--sweep-points", "0"]);
        assert!(result.is_err());
    }

    #[test]
    fn too_many_sweep_points_fails() {
        let result = Opts::try_parse_from(["house-price-dashboard", "summary", "--sweep-points", "1001"]);
        assert!(result.is_err());
    }
}
