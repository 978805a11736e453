use tracing::debug;

use crate::error::{CatalogError, SessionError};
use crate::models::catalog::{RegionalProfile, TariffProfile};
use crate::models::simulation::{SimulationInput, SimulationResult};
use crate::services::catalog_service::CatalogSource;
use crate::services::estimator;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelSource {
    /// Count derived from consumption and regional radiation
    Suggested,
    /// Count changed by hand after the last suggestion
    Manual,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayState {
    Initial,
    ResultsShown,
}

/// Form state of one calculator user.
///
/// Owns the lookup data fetched at start-up; the estimator itself stays
/// stateless and only ever sees a resolved `SimulationInput`.
#[derive(Debug, Clone)]
pub struct CalculatorSession {
    regions: Vec<RegionalProfile>,
    tariffs: Vec<TariffProfile>,
    selected_region: Option<usize>,
    selected_tariff: Option<usize>,
    consumption_kwh: Option<f64>,
    efficiency: f64,
    panel_count: u32,
    panel_source: PanelSource,
    display: DisplayState,
    last_result: Option<SimulationResult>,
}

impl CalculatorSession {
    /// Start a session over already-resolved lookup data.
    ///
    /// The first tariff is pre-selected and an initial suggestion is computed.
    pub fn new(regions: Vec<RegionalProfile>, tariffs: Vec<TariffProfile>) -> Self {
        let selected_tariff = if tariffs.is_empty() { None } else { Some(0) };
        let mut session = Self {
            regions,
            tariffs,
            selected_region: None,
            selected_tariff,
            consumption_kwh: None,
            efficiency: estimator::DEFAULT_PANEL_EFFICIENCY,
            panel_count: 1,
            panel_source: PanelSource::Suggested,
            display: DisplayState::Initial,
            last_result: None,
        };
        session.refresh_suggestion();
        session
    }

    /// Both lookups must succeed before any simulation can run.
    pub fn load(catalog: &dyn CatalogSource) -> Result<Self, CatalogError> {
        let regions = catalog.regions()?;
        let tariffs = catalog.tariffs()?;
        debug!(regions = regions.len(), tariffs = tariffs.len(), "calculator data loaded");
        Ok(Self::new(regions, tariffs))
    }

    pub fn regions(&self) -> &[RegionalProfile] {
        &self.regions
    }

    pub fn tariffs(&self) -> &[TariffProfile] {
        &self.tariffs
    }

    pub fn selected_region(&self) -> Option<&RegionalProfile> {
        self.selected_region.map(|i| &self.regions[i])
    }

    pub fn selected_tariff(&self) -> Option<&TariffProfile> {
        self.selected_tariff.map(|i| &self.tariffs[i])
    }

    pub fn panel_count(&self) -> u32 {
        self.panel_count
    }

    pub fn panel_source(&self) -> PanelSource {
        self.panel_source
    }

    pub fn display(&self) -> DisplayState {
        self.display
    }

    pub fn last_result(&self) -> Option<&SimulationResult> {
        self.last_result.as_ref()
    }

    pub fn solar_hours_per_day(&self) -> f64 {
        estimator::solar_hours_per_day(self.selected_region())
    }

    /// Select a region by name, or clear the selection with `None`.
    ///
    /// The suggestion is recomputed since solar hours changed.
    pub fn select_region(&mut self, name: Option<&str>) -> Result<(), SessionError> {
        self.selected_region = match name {
            None => None,
            Some(name) => Some(
                self.regions
                    .iter()
                    .position(|r| r.name == name)
                    .ok_or_else(|| SessionError::UnknownRegion(name.to_string()))?,
            ),
        };
        self.refresh_suggestion();
        Ok(())
    }

    pub fn select_tariff(&mut self, stratum: i64) -> Result<(), SessionError> {
        let index = self
            .tariffs
            .iter()
            .position(|t| t.stratum == stratum)
            .ok_or(SessionError::UnknownStratum(stratum))?;
        self.selected_tariff = Some(index);
        Ok(())
    }

    pub fn set_consumption(&mut self, kwh: Option<f64>) {
        self.consumption_kwh = kwh;
        self.refresh_suggestion();
    }

    /// Panel quality does not affect the suggestion, only the simulation.
    pub fn set_efficiency(&mut self, coefficient: f64) {
        self.efficiency = coefficient;
    }

    /// Replace the panel count with the advisory suggestion.
    pub fn refresh_suggestion(&mut self) {
        let consumption = self.consumption_kwh.unwrap_or(0.0);
        self.panel_count = estimator::suggest_panel_count(consumption, self.solar_hours_per_day());
        self.panel_source = PanelSource::Suggested;
    }

    /// Step the panel count by `delta`. Steps that would go below one panel are
    /// ignored and `false` is returned.
    pub fn adjust_panels(&mut self, delta: i64) -> bool {
        let next = i64::from(self.panel_count) + delta;
        match u32::try_from(next) {
            Ok(count) if count >= 1 => {
                self.panel_count = count;
                self.panel_source = PanelSource::Manual;
                true
            }
            _ => false,
        }
    }

    /// Run the estimate for the current form and switch to the results view.
    pub fn calculate(&mut self) -> Result<SimulationResult, SessionError> {
        let region = self.selected_region().ok_or(SessionError::RegionNotSelected)?;
        let tariff = self.selected_tariff().ok_or(SessionError::TariffNotSelected)?;
        let consumption = self
            .consumption_kwh
            .filter(|c| c.is_finite() && *c > 0.0)
            .ok_or(SessionError::MissingConsumption)?;

        let input = SimulationInput {
            monthly_consumption_kwh: consumption,
            panel_count: self.panel_count,
            panel_efficiency_coefficient: self.efficiency,
            solar_hours_per_day: estimator::solar_hours_per_day(Some(region)),
            price_per_kwh: tariff.price_per_kwh,
        };
        let result = estimator::simulate(&input)?;

        self.last_result = Some(result);
        self.display = DisplayState::ResultsShown;
        Ok(result)
    }

    /// Back to the empty results view; form inputs are kept.
    pub fn reset(&mut self) {
        self.display = DisplayState::Initial;
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;
    use crate::services::catalog_service::tests::seeded_catalog;

    fn session() -> CalculatorSession {
        CalculatorSession::load(&seeded_catalog()).unwrap()
    }

    #[test]
    fn starts_with_first_tariff_and_national_average() {
        let s = session();

        assert_eq!(s.selected_tariff().map(|t| t.stratum), Some(1));
        assert!(s.selected_region().is_none());
        assert_eq!(s.solar_hours_per_day(), estimator::DEFAULT_SOLAR_HOURS);
        assert_eq!(s.panel_count(), 1);
        assert_eq!(s.display(), DisplayState::Initial);
    }

    #[test]
    fn region_change_refreshes_suggestion() {
        let mut s = session();
        s.set_consumption(Some(500.0));
        assert_eq!(s.panel_count(), 9);

        // Cesar averages 120 MWh -> 2 h/day
        s.select_region(Some("Cesar")).unwrap();
        assert_abs_diff_eq!(s.solar_hours_per_day(), 2.0, epsilon = 1e-12);
        assert_eq!(s.panel_count(), 21);
        assert_eq!(s.panel_source(), PanelSource::Suggested);
    }

    #[test]
    fn unknown_selections_are_rejected() {
        let mut s = session();

        assert_eq!(
            s.select_region(Some("Amazonas")),
            Err(SessionError::UnknownRegion("Amazonas".to_string()))
        );
        assert_eq!(s.select_tariff(9), Err(SessionError::UnknownStratum(9)));
    }

    #[test]
    fn manual_adjustment_never_drops_below_one() {
        let mut s = session();

        assert!(s.adjust_panels(2));
        assert_eq!(s.panel_count(), 3);
        assert_eq!(s.panel_source(), PanelSource::Manual);

        assert!(!s.adjust_panels(-3));
        assert_eq!(s.panel_count(), 3);
        assert!(s.adjust_panels(-2));
        assert_eq!(s.panel_count(), 1);
    }

    #[test]
    fn calculate_requires_complete_form() {
        let mut s = session();
        assert_eq!(s.calculate(), Err(SessionError::RegionNotSelected));

        s.select_region(Some("Atlántico")).unwrap();
        assert_eq!(s.calculate(), Err(SessionError::MissingConsumption));

        s.set_consumption(Some(0.0));
        assert_eq!(s.calculate(), Err(SessionError::MissingConsumption));
        assert_eq!(s.display(), DisplayState::Initial);
    }

    #[test]
    fn cleared_region_blocks_calculation() {
        let mut s = session();
        s.select_region(Some("Cesar")).unwrap();
        s.set_consumption(Some(300.0));
        s.select_region(None).unwrap();

        assert!(s.selected_region().is_none());
        assert_eq!(s.calculate(), Err(SessionError::RegionNotSelected));
        assert_eq!(s.display(), DisplayState::Initial);
        assert!(s.last_result().is_none());
    }

    #[test]
    fn calculate_shows_results_and_reset_hides_them() {
        let mut s = session();
        s.select_region(Some("Atlántico")).unwrap();
        s.select_tariff(4).unwrap();
        s.set_consumption(Some(300.0));
        s.set_efficiency(0.18);

        let result = s.calculate().unwrap();
        assert_eq!(s.display(), DisplayState::ResultsShown);
        assert_eq!(s.last_result(), Some(&result));
        assert_abs_diff_eq!(result.current_bill_amount, 240_000.0, epsilon = 1e-6);
        assert!(result.savings_amount <= result.max_possible_savings);

        s.reset();
        assert_eq!(s.display(), DisplayState::Initial);
    }

    #[test]
    fn out_of_range_efficiency_surfaces_as_estimate_error() {
        let mut s = session();
        s.select_region(Some("Cesar")).unwrap();
        s.set_consumption(Some(200.0));
        s.set_efficiency(0.5);

        assert!(matches!(s.calculate(), Err(SessionError::Estimate(_))));
    }
}
