/// ============================================================
///  Monthly Solar Savings Estimator
///
///  Pipeline:
///   1. Solar hours     – regional production (MWh) / 60, or the
///                        national average when no region applies
///   2. Generation      – panels × 0.55 kW × HSP × 30 days × PR,
///                        PR = 0.75 shifted by (efficiency − 0.18)
///   3. Current bill    – consumption × price
///   4. Savings cap     – the bill keeps max(15 %, floor fee) that
///                        self-generation can never offset
///   5. Savings         – generation × price, capped, never negative
///   6. Reduction       – savings / bill, 0 % for an empty bill
///
///  Pure and synchronous: no I/O, no shared state.
/// ============================================================

use std::ops::RangeInclusive;

use crate::error::EstimateError;
use crate::models::catalog::RegionalProfile;
use crate::models::simulation::{SimulationInput, SimulationResult};

// ─── Constants ───────────────────────────────────────────────
/// Nameplate output of one panel (kW).
pub const PANEL_NAMEPLATE_KW: f64 = 0.55;
pub const DAYS_PER_MONTH: f64 = 30.0;
/// System performance ratio of a reference panel.
pub const BASELINE_PERFORMANCE_RATIO: f64 = 0.75;
/// Efficiency coefficient at which the performance ratio is exactly the baseline.
pub const REFERENCE_EFFICIENCY: f64 = 0.18;
/// Coefficient pre-selected in the form before the user picks a panel quality.
pub const DEFAULT_PANEL_EFFICIENCY: f64 = 0.25;
pub const EFFICIENCY_RANGE: RangeInclusive<f64> = 0.10..=0.30;

/// Share of the bill made of street-lighting tax and connection fee.
pub const MANDATORY_COST_SHARE: f64 = 0.15;
/// Minimum non-avoidable charge, in currency units.
pub const FLOOR_FEE: f64 = 25_000.0;

/// National average peak-sun hours per day.
pub const DEFAULT_SOLAR_HOURS: f64 = 5.0;
/// Divisor turning average monthly production (MWh) into daily solar hours.
pub const PRODUCTION_TO_SOLAR_HOURS: f64 = 60.0;

// ─── Solar hours ─────────────────────────────────────────────

/// Peak-sun hours for the selected region.
///
/// Falls back to [`DEFAULT_SOLAR_HOURS`] when no region is selected or its
/// production is not strictly positive.
pub fn solar_hours_per_day(region: Option<&RegionalProfile>) -> f64 {
    match region {
        Some(r)
            if r.average_monthly_production_mwh.is_finite()
                && r.average_monthly_production_mwh > 0.0 =>
        {
            r.average_monthly_production_mwh / PRODUCTION_TO_SOLAR_HOURS
        }
        _ => DEFAULT_SOLAR_HOURS,
    }
}

// ─── Generation ──────────────────────────────────────────────

/// Performance ratio shifted linearly around the reference efficiency.
pub fn performance_factor(panel_efficiency_coefficient: f64) -> f64 {
    BASELINE_PERFORMANCE_RATIO + (panel_efficiency_coefficient - REFERENCE_EFFICIENCY)
}

/// Estimated monthly generation (kWh).
///
/// Callers must pass `panel_count >= 1` and positive solar hours; `simulate`
/// enforces both.
pub fn estimate_generation(
    panel_count: u32,
    solar_hours_per_day: f64,
    panel_efficiency_coefficient: f64,
) -> f64 {
    f64::from(panel_count)
        * PANEL_NAMEPLATE_KW
        * solar_hours_per_day
        * DAYS_PER_MONTH
        * performance_factor(panel_efficiency_coefficient)
}

/// Advisory panel count covering `monthly_consumption_kwh`.
///
/// Always uses the baseline performance ratio, whatever panel quality the user
/// picked. Never returns less than 1.
pub fn suggest_panel_count(monthly_consumption_kwh: f64, solar_hours_per_day: f64) -> u32 {
    let per_panel =
        PANEL_NAMEPLATE_KW * solar_hours_per_day * DAYS_PER_MONTH * BASELINE_PERFORMANCE_RATIO;
    if !per_panel.is_finite() || per_panel <= 0.0 {
        return 1;
    }

    let panels = (monthly_consumption_kwh / per_panel).ceil();
    if panels.is_nan() {
        return 1;
    }
    // float -> int casts saturate
    (panels as u32).max(1)
}

// ─── Validation ──────────────────────────────────────────────

fn require(
    field: &'static str,
    requirement: &'static str,
    value: f64,
    ok: bool,
) -> Result<(), EstimateError> {
    if ok {
        Ok(())
    } else {
        Err(EstimateError::InvalidInput { field, requirement, value })
    }
}

impl SimulationInput {
    /// Reject anything outside the domain the formula is defined for.
    ///
    /// Zero consumption is accepted: it yields an empty bill and a 0 % reduction.
    pub fn validate(&self) -> Result<(), EstimateError> {
        let c = self.monthly_consumption_kwh;
        require("monthly_consumption_kwh", "a non-negative number", c, c.is_finite() && c >= 0.0)?;

        let p = self.price_per_kwh;
        require("price_per_kwh", "a positive number", p, p.is_finite() && p > 0.0)?;

        let n = f64::from(self.panel_count);
        require("panel_count", "at least 1", n, self.panel_count >= 1)?;

        let h = self.solar_hours_per_day;
        require("solar_hours_per_day", "a positive number", h, h.is_finite() && h > 0.0)?;

        let e = self.panel_efficiency_coefficient;
        require(
            "panel_efficiency_coefficient",
            "between 0.10 and 0.30",
            e,
            e.is_finite() && EFFICIENCY_RANGE.contains(&e),
        )
    }
}

// ─── Simulation ──────────────────────────────────────────────

/// Monthly savings estimate for a validated input.
pub fn simulate(input: &SimulationInput) -> Result<SimulationResult, EstimateError> {
    input.validate()?;

    let generation = estimate_generation(
        input.panel_count,
        input.solar_hours_per_day,
        input.panel_efficiency_coefficient,
    );

    require(
        "solar_hours_per_day",
        "small enough for a finite generation",
        input.solar_hours_per_day,
        generation.is_finite(),
    )?;

    let current_bill = input.monthly_consumption_kwh * input.price_per_kwh;
    require(
        "monthly_consumption_kwh",
        "small enough for a finite bill at the given price",
        input.monthly_consumption_kwh,
        current_bill.is_finite(),
    )?;
    let mandatory_fixed_cost = (current_bill * MANDATORY_COST_SHARE).max(FLOOR_FEE);
    let max_possible_savings = current_bill - mandatory_fixed_cost;

    let raw_savings = generation * input.price_per_kwh;
    let savings = raw_savings.min(max_possible_savings).max(0.0);

    let projected_bill = current_bill - savings;
    let percentage_reduction = if current_bill > 0.0 {
        savings / current_bill * 100.0
    } else {
        0.0
    };

    Ok(SimulationResult {
        estimated_monthly_generation_kwh: generation,
        current_bill_amount: current_bill,
        projected_bill_amount: projected_bill,
        savings_amount: savings,
        percentage_reduction,
        mandatory_fixed_cost,
        max_possible_savings,
    })
}
