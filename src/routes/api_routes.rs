use axum::{routing::{get, post}, Router};
use crate::controllers::catalog_controller::{list_cities, list_regions, list_tariffs};
use crate::controllers::simulation_controller::{health, simulate, suggest_panels};
use crate::shared_state::AppState;

/// Build the `/api/*` sub-router.
pub fn api_routes(state: AppState) -> Router {
    Router::new()
        // Lookups
        .route("/departamentos",     get(list_regions))
        .route("/municipios/{dpto}", get(list_cities))
        .route("/tarifas",           get(list_tariffs))
        // Estimator
        .route("/simulacion",        post(simulate))
        .route("/sugerencia",        get(suggest_panels))
        .route("/health",            get(health))
        .with_state(state)
}
