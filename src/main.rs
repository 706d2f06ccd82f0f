use clap::Parser;

use crate::opts::{Command, Opts};
use crate::prelude::*;

mod cli;
mod config;
mod dashboard;
mod dataset;
mod error;
mod features;
mod logging;
mod math;
mod model;
mod opts;
mod prelude;
mod views;
mod web;

#[tokio::main]
async fn main() -> Result {
    let opts = Opts::parse();
    let _sentry_guard = logging::init(opts.sentry_dsn, opts.traces_sample_rate)?;
    info!(version = env!("CARGO_PKG_VERSION"), "starting…");

    let result = match opts.subcommand {
        Command::Web(opts) => web::run(opts).await,
        Command::Predict(opts) => cli::predict(opts),
        Command::Summary(opts) => cli::summary(opts),
    };
    if let Err(error) = &result {
        error!("fatal error: {:#}", error);
    }
    result
}
