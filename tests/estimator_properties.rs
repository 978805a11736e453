//! Invariants of the savings estimate over a grid of valid inputs.

use approx::assert_abs_diff_eq;

use solar_savings_estimator::models::simulation::SimulationInput;
use solar_savings_estimator::services::estimator::{
    estimate_generation, simulate, suggest_panel_count,
};

fn grid() -> impl Iterator<Item = SimulationInput> {
    let consumptions = [0.0, 40.0, 150.0, 300.0, 1_200.0];
    let panels = [1, 3, 8, 40];
    let efficiencies = [0.10, 0.18, 0.25, 0.30];
    let hours = [0.5, 2.0, 5.0, 6.5];
    let prices = [250.0, 800.0, 1_100.0];

    consumptions.into_iter().flat_map(move |c| {
        panels.into_iter().flat_map(move |n| {
            efficiencies.into_iter().flat_map(move |e| {
                hours.into_iter().flat_map(move |h| {
                    prices.into_iter().map(move |p| SimulationInput {
                        monthly_consumption_kwh: c,
                        panel_count: n,
                        panel_efficiency_coefficient: e,
                        solar_hours_per_day: h,
                        price_per_kwh: p,
                    })
                })
            })
        })
    })
}

#[test]
fn savings_stay_within_the_bill() {
    for input in grid() {
        let r = simulate(&input).unwrap();
        assert!(r.savings_amount >= 0.0, "{input:?}");
        assert!(r.savings_amount <= r.current_bill_amount, "{input:?}");
        assert!(r.savings_amount <= r.max_possible_savings.max(0.0), "{input:?}");
    }
}

#[test]
fn projected_bill_is_bill_minus_savings() {
    for input in grid() {
        let r = simulate(&input).unwrap();
        assert_eq!(r.projected_bill_amount, r.current_bill_amount - r.savings_amount, "{input:?}");
    }
}

#[test]
fn reduction_matches_savings_share() {
    for input in grid() {
        let r = simulate(&input).unwrap();
        if r.current_bill_amount > 0.0 {
            assert_abs_diff_eq!(
                r.percentage_reduction,
                r.savings_amount / r.current_bill_amount * 100.0,
                epsilon = 1e-9
            );
        } else {
            assert_eq!(r.percentage_reduction, 0.0);
        }
    }
}

#[test]
fn simulate_is_repeatable() {
    for input in grid() {
        assert_eq!(simulate(&input).unwrap(), simulate(&input).unwrap());
    }
}

#[test]
fn generation_is_linear_in_panel_count() {
    for hours in [1.0, 4.2, 5.0] {
        for efficiency in [0.12, 0.18, 0.28] {
            let one = estimate_generation(5, hours, efficiency);
            let two = estimate_generation(10, hours, efficiency);
            assert_abs_diff_eq!(two, 2.0 * one, epsilon = 1e-9);
        }
    }
}

#[test]
fn suggestion_is_monotonic_in_consumption() {
    for hours in [0.8, 2.0, 5.0, 7.3] {
        let mut previous = 1;
        for step in 0..400 {
            let panels = suggest_panel_count(f64::from(step) * 7.5, hours);
            assert!(panels >= previous, "hours={hours} step={step}");
            previous = panels;
        }
    }
}
