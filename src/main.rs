use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, bail};
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use solar_savings_estimator::config::Config;
use solar_savings_estimator::models::catalog::CatalogSeed;
use solar_savings_estimator::routes::app_router;
use solar_savings_estimator::services::calculator_session::CalculatorSession;
use solar_savings_estimator::services::catalog_service::SqliteCatalog;
use solar_savings_estimator::shared_state::AppState;

#[derive(Parser)]
#[command(author, version, about)]
struct Args {
    /// Path to the JSON configuration file.
    #[arg(long, env = "SOLAR_ESTIMATOR_CONFIG", default_value = "config.json")]
    config: String,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Serve the lookup API and the calculator form (default).
    Serve,

    /// Replace the catalog with the contents of a JSON seed file.
    Import {
        #[arg(long)]
        seed: String,
    },

    /// Run one estimate against the catalog from the command line.
    Estimate {
        /// Region name as listed by the catalog.
        #[arg(long)]
        region: String,
        /// Tariff stratum; defaults to the first one in the catalog.
        #[arg(long)]
        stratum: Option<i64>,
        /// Monthly consumption in kWh.
        #[arg(long)]
        consumption: f64,
        /// Panel quality coefficient (0.10 to 0.30).
        #[arg(long)]
        efficiency: Option<f64>,
        /// Panel count; the suggestion is used when absent.
        #[arg(long)]
        panels: Option<u32>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    let config = Config::load(&args.config)?;
    info!(config = %args.config, database = %config.database.path, "configuration loaded");

    let catalog = SqliteCatalog::open(&config.database.path)?;

    match args.command.unwrap_or(Command::Serve) {
        Command::Serve => serve(config, catalog).await,
        Command::Import { seed } => {
            let seed = CatalogSeed::load(&seed)?;
            catalog.import_seed(&seed)?;
            Ok(())
        }
        Command::Estimate { region, stratum, consumption, efficiency, panels } => {
            let mut session = CalculatorSession::load(&catalog)?;
            session.select_region(Some(&region))?;
            if let Some(stratum) = stratum {
                session.select_tariff(stratum)?;
            }
            session.set_consumption(Some(consumption));
            if let Some(efficiency) = efficiency {
                session.set_efficiency(efficiency);
            }
            info!(suggested_panels = session.panel_count(), "suggestion");
            if let Some(panels) = panels
                && !session.adjust_panels(i64::from(panels) - i64::from(session.panel_count()))
            {
                bail!("panel count must be at least 1");
            }

            let result = session.calculate()?;
            info!(
                solar_hours = %format!("{:.1}", session.solar_hours_per_day()),
                panels = session.panel_count(),
                generation_kwh = %format!("{:.0}", result.estimated_monthly_generation_kwh),
                current_bill = %format!("{:.0}", result.current_bill_amount),
                projected_bill = %format!("{:.0}", result.projected_bill_amount),
                savings = %format!("{:.0}", result.savings_amount),
                reduction = %format!("{:.1}%", result.percentage_reduction),
                "estimate"
            );
            Ok(())
        }
    }
}

async fn serve(config: Config, catalog: SqliteCatalog) -> anyhow::Result<()> {
    let state = AppState::new(Arc::new(catalog), config.expose_error_details);
    let app = app_router(state, config.static_dir.as_deref());

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port)
        .parse()
        .with_context(|| {
            format!("invalid listen address {}:{}", config.server.host, config.server.port)
        })?;
    info!("API server listening on http://{addr}");
    info!("Scalar UI: http://{addr}/scalar");

    axum_server::bind(addr)
        .serve(app.into_make_service())
        .await
        .context("HTTP server failed")
}
