use std::sync::Arc;

use axum::{
    Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::get,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::error;

use crate::{
    TourismError,
    data::DataLoader,
    models::VisitorYear,
    resolver::{self, CountyMap},
    view::AttractionView,
};

/// Shared state behind every handler
pub struct AppState {
    pub loader: DataLoader,
    pub county_map: CountyMap,
}

impl AppState {
    #[must_use]
    pub fn new(loader: DataLoader, county_map: CountyMap) -> Self {
        Self { loader, county_map }
    }
}

/// Handler failures, rendered as `{"error": ...}`
#[derive(Debug)]
pub enum ApiError {
    NotFound(String),
    Tourism(TourismError),
}

impl From<TourismError> for ApiError {
    fn from(err: TourismError) -> Self {
        Self::Tourism(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            Self::NotFound(name) => (
                StatusCode::NOT_FOUND,
                format!("Unknown attraction: {name}"),
            ),
            Self::Tourism(err) => {
                let status = match &err {
                    TourismError::Validation { .. } => StatusCode::BAD_REQUEST,
                    e if e.is_load_failure() => StatusCode::SERVICE_UNAVAILABLE,
                    _ => StatusCode::INTERNAL_SERVER_ERROR,
                };
                error!("Request failed: {}", err);
                (status, err.user_message())
            }
        };
        (status, Json(json!({ "error": message }))).into_response()
    }
}

#[derive(Serialize)]
pub struct ApiHealth {
    pub status: &'static str,
    pub version: &'static str,
    pub data_loaded: bool,
}

#[derive(Serialize)]
pub struct ApiYear {
    pub year: VisitorYear,
    pub column: &'static str,
}

#[derive(Debug, Default, Deserialize)]
pub struct YearsQuery {
    /// Comma separated, e.g. `2020,2022`. Absent means every year.
    pub years: Option<String>,
}

impl YearsQuery {
    pub fn selection(&self) -> Result<Vec<VisitorYear>, TourismError> {
        match &self.years {
            None => Ok(VisitorYear::ALL.to_vec()),
            Some(raw) => raw
                .split(',')
                .map(str::trim)
                .filter(|part| !part.is_empty())
                .map(str::parse::<VisitorYear>)
                .collect(),
        }
    }
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/years", get(list_years))
        .route("/attractions", get(list_attractions))
        .route("/attractions/{name}", get(get_attraction))
        .with_state(state)
}

async fn health(State(state): State<Arc<AppState>>) -> Json<ApiHealth> {
    Json(ApiHealth {
        status: "ok",
        version: crate::VERSION,
        data_loaded: state.loader.is_loaded(),
    })
}

async fn list_years() -> Json<Vec<ApiYear>> {
    Json(
        VisitorYear::ALL
            .into_iter()
            .map(|year| ApiYear {
                year,
                column: year.column(),
            })
            .collect(),
    )
}

async fn list_attractions(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<String>>, ApiError> {
    let sources = state.loader.get().await?;
    let names = sources
        .attractions
        .unique_names()
        .into_iter()
        .map(str::to_string)
        .collect();
    Ok(Json(names))
}

async fn get_attraction(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
    Query(query): Query<YearsQuery>,
) -> Result<Json<AttractionView>, ApiError> {
    let years = query.selection()?;
    let sources = state.loader.get().await?;

    let resolution = resolver::resolve(
        &name,
        &sources.attractions,
        &sources.boundaries,
        &state.county_map,
    )
    .ok_or_else(|| ApiError::NotFound(name.clone()))?;

    Ok(Json(AttractionView::build(
        &resolution,
        &years,
        sources.boundaries.name_field(),
    )))
}
