use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

// ─── Estimator input / output ────────────────────────────────────────────────

/// Everything one savings estimate needs, already resolved by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct SimulationInput {
    /// Monthly consumption (kWh)
    pub monthly_consumption_kwh: f64,
    /// Number of installed panels
    pub panel_count: u32,
    /// Panel quality coefficient, 0.18 is the reference panel
    pub panel_efficiency_coefficient: f64,
    /// Peak-sun-equivalent hours per day
    pub solar_hours_per_day: f64,
    /// Energy price per kWh
    pub price_per_kwh: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct SimulationResult {
    /// Estimated generation (kWh/month)
    pub estimated_monthly_generation_kwh: f64,
    pub current_bill_amount: f64,
    pub projected_bill_amount: f64,
    pub savings_amount: f64,
    /// Savings as a share of the current bill (%)
    pub percentage_reduction: f64,
    /// Part of the bill that generation can never offset
    pub mandatory_fixed_cost: f64,
    /// Upper bound on savings before clamping at zero
    pub max_possible_savings: f64,
}

// ─── REST API request / response types ───────────────────────────────────────

/// Body of `POST /api/simulacion`.
///
/// Solar hours come from `solar_hours_per_day` when present, otherwise they are
/// derived from the named region.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct SimulationRequest {
    pub monthly_consumption_kwh: f64,
    pub panel_count: u32,
    pub panel_efficiency_coefficient: Option<f64>,
    pub price_per_kwh: f64,
    pub solar_hours_per_day: Option<f64>,
    #[serde(rename = "departamento")]
    pub region: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SimulationResponse {
    pub generated_at: DateTime<Utc>,
    pub input: SimulationInput,
    pub result: SimulationResult,
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SuggestionQuery {
    /// Monthly consumption (kWh)
    #[serde(rename = "consumo")]
    pub consumption_kwh: f64,
    /// Region name; the national average is used when absent
    #[serde(rename = "departamento")]
    pub region: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SuggestionResponse {
    pub solar_hours_per_day: f64,
    pub suggested_panels: u32,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct HealthStatus {
    pub status: String,
    pub version: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}
