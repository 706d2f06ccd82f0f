use std::net::IpAddr;
use std::str::FromStr;

use poem::listener::TcpListener;
use poem::middleware::{CatchPanic, Tracing};
use poem::{get, post, Endpoint, EndpointExt, Route, Server};

use crate::cli::load_dashboard;
use crate::dashboard::Dashboard;
use crate::opts::WebOpts;
use crate::prelude::*;
use crate::web::middleware::ErrorMiddleware;

mod api;
mod error;
mod middleware;
mod pages;
mod partials;
mod query;

pub async fn run(opts: WebOpts) -> Result {
    let dashboard = Arc::new(load_dashboard(&opts.assets)?);
    let app = create_app(dashboard);
    info!(host = opts.host.as_str(), opts.port, "listening…");
    Server::new(TcpListener::bind((IpAddr::from_str(&opts.host)?, opts.port)))
        .run_with_graceful_shutdown(
            app,
            async {
                if let Err(error) = tokio::signal::ctrl_c().await {
                    error!("failed to listen for the shutdown signal: {:#}", error);
                }
                info!("shutting down…");
            },
            None,
        )
        .await?;
    Ok(())
}

pub fn create_app(dashboard: Arc<Dashboard>) -> impl Endpoint {
    Route::new()
        .at("/", get(pages::get_index))
        .at("/dataset", get(pages::get_dataset))
        .at("/health", get(api::get_health))
        .at("/api/config", get(api::get_config))
        .at("/api/predict", get(api::get_predict))
        .at("/api/predict/batch", post(api::post_predict_batch))
        .at("/api/predict/raw", post(api::post_predict_raw))
        .at("/api/snapshot", get(api::get_snapshot))
        .at("/api/summary", get(api::get_summary))
        .at("/api/trendline", get(api::get_trendline))
        .at("/api/density", get(api::get_density))
        .at("/api/market", get(api::get_market))
        .at("/api/dataset", get(api::get_dataset))
        .data(dashboard)
        .with(Tracing)
        .with(CatchPanic::new())
        .with(ErrorMiddleware)
}
