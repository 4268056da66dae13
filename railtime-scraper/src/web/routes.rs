//! HTTP route handlers.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use chrono::NaiveDate;
use tracing::warn;

use crate::domain::{StationId, StopVisit, TripId, VehicleVisit, parse_service_date};
use crate::railtime::{Fetcher, ScrapeError};

use super::dto::*;
use super::state::AppState;

/// Create the application router.
pub fn create_router<F>(state: AppState<F>) -> Router
where
    F: Fetcher + Send + Sync + 'static,
{
    Router::new()
        .route("/health", get(health))
        .route("/stations", get(list_stations::<F>))
        .route("/stations/:sid", get(get_station::<F>))
        .route("/stops/:sid/:date", get(get_stop::<F>))
        .route("/trips/:tid/:date", get(get_trip::<F>))
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

async fn list_stations<F>(State(state): State<AppState<F>>) -> Json<StationListResponse>
where
    F: Fetcher + Send + Sync + 'static,
{
    let directory = state.scraper.directory().await;
    let stations = directory
        .iter()
        .map(StationResponse::from)
        .collect();
    Json(StationListResponse { stations })
}

async fn get_station<F>(
    State(state): State<AppState<F>>,
    Path(sid): Path<String>,
) -> Result<Json<StationResponse>, AppError>
where
    F: Fetcher + Send + Sync + 'static,
{
    let sid = parse_station(&sid)?;
    let directory = state.scraper.directory().await;
    directory
        .get(&sid)
        .map(|station| Json(StationResponse::from(station)))
        .ok_or_else(|| AppError::NotFound {
            message: format!("Unknown station: {sid}"),
        })
}

/// Every vehicle calling at a station on a service day.
async fn get_stop<F>(
    State(state): State<AppState<F>>,
    Path((sid, date)): Path<(String, String)>,
) -> Result<Json<Vec<VehicleVisit>>, AppError>
where
    F: Fetcher + Send + Sync + 'static,
{
    let sid = parse_station(&sid)?;
    let date = parse_date(&date)?;
    let visits = state.scraper.get_stop(&sid, date).await?;
    Ok(Json(visits))
}

/// Every stop of a trip on a service day. Empty when Railtime has no data.
async fn get_trip<F>(
    State(state): State<AppState<F>>,
    Path((tid, date)): Path<(String, String)>,
) -> Result<Json<Vec<StopVisit>>, AppError>
where
    F: Fetcher + Send + Sync + 'static,
{
    let tid = TripId::parse(&tid).map_err(|e| AppError::BadRequest {
        message: format!("Invalid trip id {tid:?}: {e}"),
    })?;
    let date = parse_date(&date)?;
    let stops = state.scraper.get_trip(&tid, date).await?;
    Ok(Json(stops))
}

fn parse_station(sid: &str) -> Result<StationId, AppError> {
    StationId::parse(sid).map_err(|e| AppError::BadRequest {
        message: format!("Invalid station id {sid:?}: {e}"),
    })
}

fn parse_date(date: &str) -> Result<NaiveDate, AppError> {
    parse_service_date(date).map_err(|e| AppError::BadRequest {
        message: e.to_string(),
    })
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
    NotFound { message: String },
    /// Railtime itself could not be reached
    Upstream { message: String },
    Internal { message: String },
}

impl From<ScrapeError> for AppError {
    fn from(e: ScrapeError) -> Self {
        let message = e.to_string();
        match e {
            ScrapeError::StopNotFound(_) => AppError::NotFound { message },
            ScrapeError::Fetch(_) => AppError::Upstream { message },
            _ => AppError::Internal { message },
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::BadRequest { message } => (StatusCode::BAD_REQUEST, message),
            AppError::NotFound { message } => (StatusCode::NOT_FOUND, message),
            AppError::Upstream { message } => (StatusCode::BAD_GATEWAY, message),
            AppError::Internal { message } => (StatusCode::INTERNAL_SERVER_ERROR, message),
        };

        warn!(status = status.as_u16(), %message, "Request failed");

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}
