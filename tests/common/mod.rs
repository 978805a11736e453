//! Shared fixtures for integration tests.

use std::sync::Arc;

use solar_savings_estimator::error::CatalogError;
use solar_savings_estimator::models::catalog::{CatalogSeed, City, RegionalProfile, TariffProfile};
use solar_savings_estimator::services::catalog_service::{CatalogSource, SqliteCatalog};
use solar_savings_estimator::shared_state::AppState;

/// Two regions (Cesar averages 120 MWh, Atlántico 330 MWh) and three strata.
pub fn sample_seed() -> CatalogSeed {
    serde_json::from_str(
        r#"{
            "produccion": [
                {"departamento": "Cesar", "produccion_mwh": 100.0},
                {"departamento": "Cesar", "produccion_mwh": 140.0},
                {"departamento": "Atlántico", "produccion_mwh": 330.0}
            ],
            "municipios": [
                {"departamento": "Cesar", "municipio": "Valledupar"},
                {"departamento": "Atlántico", "municipio": "Barranquilla"},
                {"departamento": "Atlántico", "municipio": "Soledad"}
            ],
            "tarifas": [
                {"estrato": 1, "consumo_promedio": 120.0, "tarifa_kwh": 650.0},
                {"estrato": 3, "consumo_promedio": 160.0, "tarifa_kwh": 780.0},
                {"estrato": 4, "consumo_promedio": 210.0, "tarifa_kwh": 800.0}
            ]
        }"#,
    )
    .expect("sample seed should parse")
}

pub fn sample_state() -> AppState {
    let catalog = SqliteCatalog::open_in_memory().expect("in-memory catalog should open");
    catalog.import_seed(&sample_seed()).expect("sample seed should import");
    AppState::new(Arc::new(catalog), true)
}

/// Catalog whose every query fails, for the 500 path.
pub struct BrokenCatalog;

impl CatalogSource for BrokenCatalog {
    fn regions(&self) -> Result<Vec<RegionalProfile>, CatalogError> {
        Err(CatalogError::Poisoned)
    }

    fn region(&self, _name: &str) -> Result<Option<RegionalProfile>, CatalogError> {
        Err(CatalogError::Poisoned)
    }

    fn cities(&self, _region: &str) -> Result<Vec<City>, CatalogError> {
        Err(CatalogError::Poisoned)
    }

    fn tariffs(&self) -> Result<Vec<TariffProfile>, CatalogError> {
        Err(CatalogError::Poisoned)
    }
}
