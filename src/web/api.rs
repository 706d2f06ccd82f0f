use poem::http::StatusCode;
use poem::web::{Data, Json, Query};
use poem::{handler, IntoResponse, Response, Result};
use serde::Serialize;

use crate::config::ViewConfig;
use crate::dashboard::{Dashboard, MarketOverview, Snapshot};
use crate::dataset::HistoricalRecord;
use crate::features::FeatureVector;
use crate::prelude::{debug, instrument, Arc};
use crate::views::{DensityGrid, SummaryStatistics, Trendline};
use crate::web::query::{FeatureQuery, SweepQuery};

const CACHE_CONTROL: &str = "no-cache";

#[derive(Serialize)]
pub struct PredictResponse {
    pub features: FeatureVector,
    pub predicted_price: f64,
}

#[derive(Serialize)]
pub struct RawPredictResponse {
    pub predicted_price: f64,
}

#[handler]
pub async fn get_health() -> impl IntoResponse {
    Response::from(StatusCode::NO_CONTENT).with_header("Cache-Control", CACHE_CONTROL)
}

#[handler]
pub async fn get_config(Data(dashboard): Data<&Arc<Dashboard>>) -> Json<ViewConfig> {
    Json(dashboard.config().clone())
}

#[handler]
#[instrument(level = "debug", skip_all)]
pub async fn get_predict(
    Query(query): Query<FeatureQuery>,
    Data(dashboard): Data<&Arc<Dashboard>>,
) -> Result<Json<PredictResponse>> {
    let features = query.or(dashboard.config().inputs.defaults())?;
    let predicted_price = dashboard.predictor().predict(&features)?;
    debug!(?features, predicted_price);
    Ok(Json(PredictResponse {
        features,
        predicted_price,
    }))
}

#[handler]
#[instrument(level = "debug", skip_all)]
pub async fn post_predict_batch(
    Json(features): Json<Vec<FeatureVector>>,
    Data(dashboard): Data<&Arc<Dashboard>>,
) -> Result<Json<Vec<f64>>> {
    debug!(n_features = features.len());
    Ok(Json(dashboard.predictor().predict_batch(&features)?))
}

/// Predicts from a positional feature row as the model sees it.
#[handler]
#[instrument(level = "debug", skip_all)]
pub async fn post_predict_raw(
    Json(row): Json<Vec<f64>>,
    Data(dashboard): Data<&Arc<Dashboard>>,
) -> Result<Json<RawPredictResponse>> {
    let predicted_price = dashboard.predictor().predict_raw(&row)?;
    Ok(Json(RawPredictResponse { predicted_price }))
}

#[handler]
#[instrument(level = "debug", skip_all)]
pub async fn get_snapshot(
    Query(features): Query<FeatureQuery>,
    Query(sweep): Query<SweepQuery>,
    Data(dashboard): Data<&Arc<Dashboard>>,
) -> Result<Json<Snapshot>> {
    let config = dashboard.config();
    let features = features.or(config.inputs.defaults())?;
    let snapshot = dashboard.recompute_with(features, &sweep.or(&config.sweep)?)?;
    Ok(Json(snapshot))
}

#[handler]
pub async fn get_summary(Data(dashboard): Data<&Arc<Dashboard>>) -> Result<Json<SummaryStatistics>> {
    Ok(Json(dashboard.summary()?.clone()))
}

#[handler]
pub async fn get_trendline(Data(dashboard): Data<&Arc<Dashboard>>) -> Result<Json<Trendline>> {
    Ok(Json(*dashboard.trendline()?))
}

#[handler]
pub async fn get_density(Data(dashboard): Data<&Arc<Dashboard>>) -> Result<Json<DensityGrid>> {
    Ok(Json(dashboard.density()?.clone()))
}

#[handler]
pub async fn get_market(Data(dashboard): Data<&Arc<Dashboard>>) -> Json<MarketOverview> {
    Json(dashboard.market().clone())
}

#[handler]
pub async fn get_dataset(Data(dashboard): Data<&Arc<Dashboard>>) -> Json<Vec<HistoricalRecord>> {
    Json(dashboard.dataset().records().to_vec())
}
