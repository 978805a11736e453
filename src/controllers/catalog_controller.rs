use axum::{
    extract::{Path, State},
    response::IntoResponse,
    Json,
};

use crate::error::ApiError;
use crate::models::catalog::{City, RegionalProfile, TariffProfile};
use crate::shared_state::AppState;

/// GET /api/departamentos
/// List regions with their average monthly production
///
/// The average production (MWh) is what the calculator turns into daily solar hours.
#[utoipa::path(
    get,
    path = "/api/departamentos",
    responses(
        (status = 200, description = "Regions and average production", body = Vec<RegionalProfile>),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn list_regions(State(state): State<AppState>) -> impl IntoResponse {
    match state.catalog.regions() {
        Ok(regions) => Json(regions).into_response(),
        Err(e) => ApiError::from(e).into_response_with(state.expose_error_details),
    }
}

/// GET /api/municipios/{dpto}
/// List the cities of a region
///
/// Only used to complete the form; cities never feed the estimate.
#[utoipa::path(
    get,
    path = "/api/municipios/{dpto}",
    params(
        ("dpto" = String, Path, description = "Region name")
    ),
    responses(
        (
            status = 200,
            description = "Cities of the region, empty for unknown regions",
            body = Vec<City>
        ),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn list_cities(
    Path(region): Path<String>,
    State(state): State<AppState>,
) -> impl IntoResponse {
    match state.catalog.cities(&region) {
        Ok(cities) => Json(cities).into_response(),
        Err(e) => ApiError::from(e).into_response_with(state.expose_error_details),
    }
}

/// GET /api/tarifas
/// List energy tariffs per stratum
#[utoipa::path(
    get,
    path = "/api/tarifas",
    responses(
        (status = 200, description = "Tariffs ordered by stratum", body = Vec<TariffProfile>),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn list_tariffs(State(state): State<AppState>) -> impl IntoResponse {
    match state.catalog.tariffs() {
        Ok(tariffs) => Json(tariffs).into_response(),
        Err(e) => ApiError::from(e).into_response_with(state.expose_error_details),
    }
}
