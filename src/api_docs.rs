use utoipa::OpenApi;
use crate::controllers::{catalog_controller, simulation_controller};
use crate::models::{catalog, simulation};

#[derive(OpenApi)]
#[openapi(
    paths(
        catalog_controller::list_regions,
        catalog_controller::list_cities,
        catalog_controller::list_tariffs,
        simulation_controller::simulate,
        simulation_controller::suggest_panels,
        simulation_controller::health
    ),
    components(
        schemas(
            catalog::RegionalProfile,
            catalog::City,
            catalog::TariffProfile,
            simulation::SimulationInput,
            simulation::SimulationResult,
            simulation::SimulationRequest,
            simulation::SimulationResponse,
            simulation::SuggestionResponse,
            simulation::HealthStatus,
            simulation::ErrorResponse
        )
    ),
    tags(
        (name = "solar-savings-estimator", description = "Solar Panel Savings Estimator API")
    )
)]
pub struct ApiDoc;
