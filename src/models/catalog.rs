use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

// ─── Lookup rows served by /api ──────────────────────────────────────────────

/// Average monthly production of a region, the radiation proxy used to
/// derive solar hours.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct RegionalProfile {
    #[serde(rename = "departamento")]
    pub name: String,
    /// Average monthly production (MWh)
    #[serde(rename = "promedio_mwh")]
    pub average_monthly_production_mwh: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct City {
    #[serde(rename = "municipio")]
    pub name: String,
}

/// Energy price for one socioeconomic stratum.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct TariffProfile {
    #[serde(rename = "estrato")]
    pub stratum: i64,
    /// Consumption of a similar household (kWh/month), informational only
    #[serde(rename = "consumo_promedio")]
    pub average_consumption_kwh: f64,
    #[serde(rename = "tarifa_kwh")]
    pub price_per_kwh: f64,
}

// ─── Seed file ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Deserialize)]
pub struct ProductionRecord {
    #[serde(rename = "departamento")]
    pub region: String,
    #[serde(rename = "produccion_mwh")]
    pub production_mwh: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CityRecord {
    #[serde(rename = "departamento")]
    pub region: String,
    #[serde(rename = "municipio")]
    pub city: String,
}

/// Contents of a catalog import file. Each table is replaced as a whole.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CatalogSeed {
    #[serde(default, rename = "produccion")]
    pub production: Vec<ProductionRecord>,
    #[serde(default, rename = "municipios")]
    pub cities: Vec<CityRecord>,
    #[serde(default, rename = "tarifas")]
    pub tariffs: Vec<TariffProfile>,
}

impl CatalogSeed {
    pub fn load(path: &str) -> anyhow::Result<Self> {
        use anyhow::Context;

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read seed file {path}"))?;
        let seed = serde_json::from_str(&content)
            .with_context(|| format!("failed to parse seed file {path}"))?;
        Ok(seed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rows_keep_original_column_names() {
        let region = RegionalProfile {
            name: "Guajira".to_string(),
            average_monthly_production_mwh: 330.0,
        };
        let json = serde_json::to_value(&region).unwrap();
        assert_eq!(json["departamento"], "Guajira");
        assert_eq!(json["promedio_mwh"], 330.0);

        let tariff: TariffProfile = serde_json::from_str(
            r#"{"estrato": 3, "consumo_promedio": 160.0, "tarifa_kwh": 812.5}"#,
        )
        .unwrap();
        assert_eq!(tariff.stratum, 3);
        assert_eq!(tariff.price_per_kwh, 812.5);
    }

    #[test]
    fn seed_tables_are_optional() {
        let seed: CatalogSeed = serde_json::from_str(
            r#"{"tarifas": [{"estrato": 1, "consumo_promedio": 120, "tarifa_kwh": 650}]}"#,
        )
        .unwrap();
        assert!(seed.production.is_empty());
        assert!(seed.cities.is_empty());
        assert_eq!(seed.tariffs.len(), 1);
    }
}
