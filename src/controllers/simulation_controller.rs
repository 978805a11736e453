use axum::{
    extract::{Query, State},
    response::IntoResponse,
    Json,
};
use tracing::info;

use crate::error::{ApiError, CatalogError};
use crate::models::simulation::{
    HealthStatus, SimulationInput, SimulationRequest, SimulationResponse, SuggestionQuery,
    SuggestionResponse,
};
use crate::services::catalog_service::CatalogSource;
use crate::services::estimator;
use crate::shared_state::AppState;

/// Explicit hours win; otherwise the named region decides, with the national
/// average for unknown or missing regions.
fn resolve_solar_hours(
    catalog: &dyn CatalogSource,
    explicit: Option<f64>,
    region: Option<&str>,
) -> Result<f64, CatalogError> {
    if let Some(hours) = explicit {
        return Ok(hours);
    }
    let profile = match region {
        Some(name) => catalog.region(name)?,
        None => None,
    };
    Ok(estimator::solar_hours_per_day(profile.as_ref()))
}

fn run_simulation(
    state: &AppState,
    req: SimulationRequest,
) -> Result<SimulationResponse, ApiError> {
    let solar_hours_per_day = resolve_solar_hours(
        state.catalog.as_ref(),
        req.solar_hours_per_day,
        req.region.as_deref(),
    )?;

    let input = SimulationInput {
        monthly_consumption_kwh: req.monthly_consumption_kwh,
        panel_count: req.panel_count,
        panel_efficiency_coefficient: req
            .panel_efficiency_coefficient
            .unwrap_or(estimator::DEFAULT_PANEL_EFFICIENCY),
        solar_hours_per_day,
        price_per_kwh: req.price_per_kwh,
    };
    let result = estimator::simulate(&input)?;

    info!(
        panels = input.panel_count,
        solar_hours = solar_hours_per_day,
        savings = result.savings_amount,
        reduction_pct = result.percentage_reduction,
        "simulation computed"
    );

    Ok(SimulationResponse {
        generated_at: chrono::Utc::now(),
        input,
        result,
    })
}

/// POST /api/simulacion
/// Estimate monthly savings
///
/// Solar hours come from `solar_hours_per_day` when given, otherwise from the
/// named region (national average of 5 h/day when unknown or absent).
#[utoipa::path(
    post,
    path = "/api/simulacion",
    request_body = SimulationRequest,
    responses(
        (status = 200, description = "Savings estimate", body = SimulationResponse),
        (status = 422, description = "Input outside the supported domain"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn simulate(
    State(state): State<AppState>,
    Json(req): Json<SimulationRequest>,
) -> impl IntoResponse {
    match run_simulation(&state, req) {
        Ok(response) => Json(response).into_response(),
        Err(e) => e.into_response_with(state.expose_error_details),
    }
}

/// GET /api/sugerencia
/// Suggest a panel count
///
/// Advisory only: the count covering the consumption at the region's solar hours.
#[utoipa::path(
    get,
    path = "/api/sugerencia",
    params(SuggestionQuery),
    responses(
        (status = 200, description = "Suggested panel count", body = SuggestionResponse),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn suggest_panels(
    State(state): State<AppState>,
    Query(query): Query<SuggestionQuery>,
) -> impl IntoResponse {
    match resolve_solar_hours(state.catalog.as_ref(), None, query.region.as_deref()) {
        Ok(solar_hours_per_day) => Json(SuggestionResponse {
            solar_hours_per_day,
            suggested_panels: estimator::suggest_panel_count(
                query.consumption_kwh,
                solar_hours_per_day,
            ),
        })
        .into_response(),
        Err(e) => ApiError::from(e).into_response_with(state.expose_error_details),
    }
}

/// GET /api/health
#[utoipa::path(
    get,
    path = "/api/health",
    responses(
        (status = 200, description = "Service is up", body = HealthStatus)
    )
)]
pub async fn health() -> impl IntoResponse {
    Json(HealthStatus {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}
