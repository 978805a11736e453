use axum::{Json, http::StatusCode, response::IntoResponse, response::Response};
use thiserror::Error;

use crate::models::simulation::ErrorResponse;

/// Rejected estimator input. The estimator never coerces bad values.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EstimateError {
    #[error("invalid input: {field} must be {requirement} (got {value})")]
    InvalidInput {
        field: &'static str,
        requirement: &'static str,
        value: f64,
    },
}

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("catalog connection lock poisoned")]
    Poisoned,
}

/// Error returned by HTTP handlers.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Estimate(#[from] EstimateError),

    #[error(transparent)]
    Catalog(#[from] CatalogError),
}

impl ApiError {
    /// Render the error, hiding internal details unless `expose_details` is set.
    pub fn into_response_with(self, expose_details: bool) -> Response {
        match self {
            Self::Estimate(e) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(ErrorResponse { error: e.to_string(), message: None }),
            )
                .into_response(),
            Self::Catalog(e) => {
                tracing::error!(error = %e, "unhandled catalog error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(ErrorResponse {
                        error: "internal server error".to_string(),
                        message: expose_details.then(|| e.to_string()),
                    }),
                )
                    .into_response()
            }
        }
    }
}

/// Why the calculator form cannot produce an estimate yet.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SessionError {
    #[error("unknown region: {0}")]
    UnknownRegion(String),

    #[error("unknown stratum: {0}")]
    UnknownStratum(i64),

    #[error("select a region first")]
    RegionNotSelected,

    #[error("select a tariff stratum first")]
    TariffNotSelected,

    #[error("monthly consumption must be a positive number")]
    MissingConsumption,

    #[error(transparent)]
    Estimate(#[from] EstimateError),
}
