use std::path::Path;
use std::sync::{Mutex, MutexGuard};

use anyhow::Context;
use rusqlite::{Connection, OptionalExtension, params};
use tracing::{debug, info, instrument};

use crate::error::CatalogError;
use crate::models::catalog::{CatalogSeed, City, RegionalProfile, TariffProfile};

/// Read-only lookups feeding the form and the estimator.
pub trait CatalogSource: Send + Sync {
    /// Every region with its average monthly production, ordered by name.
    fn regions(&self) -> Result<Vec<RegionalProfile>, CatalogError>;

    fn region(&self, name: &str) -> Result<Option<RegionalProfile>, CatalogError>;

    /// Cities of one region. Unknown regions yield an empty list.
    fn cities(&self, region: &str) -> Result<Vec<City>, CatalogError>;

    /// Tariffs ordered by stratum.
    fn tariffs(&self) -> Result<Vec<TariffProfile>, CatalogError>;
}

const SCHEMA: &str = "
    CREATE TABLE IF NOT EXISTS dataset_produccion (
        id              INTEGER PRIMARY KEY AUTOINCREMENT,
        departamento    TEXT NOT NULL,
        produccion_mwh  REAL NOT NULL
    );

    CREATE INDEX IF NOT EXISTS idx_produccion_departamento
        ON dataset_produccion(departamento);

    CREATE TABLE IF NOT EXISTS lista_municipios (
        departamento    TEXT NOT NULL,
        municipio       TEXT NOT NULL,
        PRIMARY KEY (departamento, municipio)
    );

    CREATE TABLE IF NOT EXISTS tarifas_energia (
        estrato           INTEGER PRIMARY KEY,
        consumo_promedio  REAL NOT NULL,
        tarifa_kwh        REAL NOT NULL
    );
";

/// SQLite-backed catalog. Tables keep the column names of the public dataset.
#[derive(Debug)]
pub struct SqliteCatalog {
    conn: Mutex<Connection>,
}

impl SqliteCatalog {
    pub fn open(path: &str) -> anyhow::Result<Self> {
        if let Some(parent) = Path::new(path).parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent).with_context(|| {
                format!("failed to create database directory: {}", parent.display())
            })?;
        }

        let conn = Connection::open(path)
            .with_context(|| format!("failed to open catalog database: {path}"))?;
        Self::with_connection(conn)
    }

    pub fn open_in_memory() -> anyhow::Result<Self> {
        Self::with_connection(Connection::open_in_memory()?)
    }

    fn with_connection(conn: Connection) -> anyhow::Result<Self> {
        conn.execute_batch(SCHEMA).context("failed to initialise catalog schema")?;
        Ok(Self { conn: Mutex::new(conn) })
    }

    fn lock(&self) -> Result<MutexGuard<'_, Connection>, CatalogError> {
        self.conn.lock().map_err(|_| CatalogError::Poisoned)
    }

    /// Replace the catalog contents with `seed` in a single transaction.
    #[instrument(skip_all)]
    pub fn import_seed(&self, seed: &CatalogSeed) -> Result<(), CatalogError> {
        let mut conn = self.lock()?;
        let tx = conn.transaction()?;

        tx.execute("DELETE FROM dataset_produccion", [])?;
        tx.execute("DELETE FROM lista_municipios", [])?;
        tx.execute("DELETE FROM tarifas_energia", [])?;

        {
            let mut insert = tx.prepare(
                "INSERT INTO dataset_produccion (departamento, produccion_mwh) VALUES (?1, ?2)",
            )?;
            for row in &seed.production {
                insert.execute(params![row.region, row.production_mwh])?;
            }

            let mut insert = tx.prepare(
                "INSERT OR IGNORE INTO lista_municipios (departamento, municipio) VALUES (?1, ?2)",
            )?;
            for row in &seed.cities {
                insert.execute(params![row.region, row.city])?;
            }

            let mut insert = tx.prepare(
                "INSERT OR REPLACE INTO tarifas_energia (estrato, consumo_promedio, tarifa_kwh)
                 VALUES (?1, ?2, ?3)",
            )?;
            for row in &seed.tariffs {
                insert.execute(params![
                    row.stratum,
                    row.average_consumption_kwh,
                    row.price_per_kwh
                ])?;
            }
        }

        tx.commit()?;
        info!(
            production_rows = seed.production.len(),
            cities = seed.cities.len(),
            tariffs = seed.tariffs.len(),
            "catalog imported"
        );
        Ok(())
    }
}

impl CatalogSource for SqliteCatalog {
    #[instrument(skip(self))]
    fn regions(&self) -> Result<Vec<RegionalProfile>, CatalogError> {
        let conn = self.lock()?;
        let mut stmt = conn.prepare(
            "SELECT departamento, AVG(produccion_mwh) AS promedio_mwh
             FROM dataset_produccion
             GROUP BY departamento
             ORDER BY departamento",
        )?;

        let regions = stmt
            .query_map([], |row| {
                Ok(RegionalProfile {
                    name: row.get(0)?,
                    average_monthly_production_mwh: row.get(1)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;

        debug!(count = regions.len(), "regions loaded");
        Ok(regions)
    }

    #[instrument(skip(self))]
    fn region(&self, name: &str) -> Result<Option<RegionalProfile>, CatalogError> {
        let conn = self.lock()?;
        let region = conn
            .query_row(
                "SELECT departamento, AVG(produccion_mwh)
                 FROM dataset_produccion
                 WHERE departamento = ?1
                 GROUP BY departamento",
                params![name],
                |row| {
                    Ok(RegionalProfile {
                        name: row.get(0)?,
                        average_monthly_production_mwh: row.get(1)?,
                    })
                },
            )
            .optional()?;
        Ok(region)
    }

    #[instrument(skip(self))]
    fn cities(&self, region: &str) -> Result<Vec<City>, CatalogError> {
        let conn = self.lock()?;
        let mut stmt = conn.prepare(
            "SELECT municipio
             FROM lista_municipios
             WHERE departamento = ?1
             ORDER BY municipio",
        )?;

        let cities = stmt
            .query_map(params![region], |row| Ok(City { name: row.get(0)? }))?
            .collect::<Result<Vec<_>, _>>()?;

        debug!(count = cities.len(), "cities loaded");
        Ok(cities)
    }

    #[instrument(skip(self))]
    fn tariffs(&self) -> Result<Vec<TariffProfile>, CatalogError> {
        let conn = self.lock()?;
        let mut stmt = conn.prepare(
            "SELECT estrato, consumo_promedio, tarifa_kwh
             FROM tarifas_energia
             ORDER BY estrato",
        )?;

        let tariffs = stmt
            .query_map([], |row| {
                Ok(TariffProfile {
                    stratum: row.get(0)?,
                    average_consumption_kwh: row.get(1)?,
                    price_per_kwh: row.get(2)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;

        debug!(count = tariffs.len(), "tariffs loaded");
        Ok(tariffs)
    }
}
