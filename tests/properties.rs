//! Algebraic laws and monotonicity properties of the engine

use approx::assert_relative_eq;

use retirement_planner::decision::{mortgage_vs_invest, Recommendation};
use retirement_planner::formulas::{
    future_value, future_value_of_annuity, payment_for_future_value, payment_for_present_value, present_value,
    present_value_of_annuity,
};
use retirement_planner::planning::retirement_age_estimator;
use retirement_planner::Outcome;

const RATES: [f64; 6] = [-0.5, -0.02, 0.0, 0.03, 0.07, 0.25];
const PERIODS: [f64; 5] = [0.0, 1.0, 7.5, 30.0, 360.0];

#[test]
fn present_value_inverts_future_value() {
    for &rate in &RATES {
        for &n in &PERIODS {
            let pv = 12_345.67;
            let round_trip = present_value(future_value(pv, rate, n).unwrap(), rate, n).unwrap();
            assert_relative_eq!(round_trip, pv, max_relative = 1e-9);
        }
    }
}

#[test]
fn zero_rate_annuities_are_linear() {
    for &n in &PERIODS {
        assert_eq!(future_value_of_annuity(250.0, 0.0, n).unwrap(), 250.0 * n);
        assert_eq!(present_value_of_annuity(250.0, 0.0, n).unwrap(), 250.0 * n);
    }
}

#[test]
fn sinking_fund_inverts_annuity_future_value() {
    for &rate in &RATES {
        for &n in PERIODS.iter().filter(|&&n| n > 0.0) {
            let target = 1_000_000.0;
            let payment = payment_for_future_value(target, rate, n).unwrap();
            let accumulated = future_value_of_annuity(payment, rate, n).unwrap();
            assert_relative_eq!(accumulated, target, max_relative = 1e-9);
        }
    }
}

#[test]
fn amortizing_payment_inverts_annuity_present_value() {
    for &rate in &RATES {
        for &n in PERIODS.iter().filter(|&&n| n > 0.0) {
            let payment = payment_for_present_value(250_000.0, rate, n).unwrap();
            assert_relative_eq!(present_value_of_annuity(payment, rate, n).unwrap(), 250_000.0, max_relative = 1e-9);
        }
    }
}

fn finite_age(outcome: Outcome<u32>) -> u32 {
    match outcome {
        Outcome::Finite(age) => age,
        other => panic!("expected a finite age, got {:?}", other),
    }
}

#[test]
fn retirement_age_non_decreasing_in_target() {
    let mut previous = 0;
    for step in 1..=20 {
        let target = 100_000.0 * step as f64;
        let age = finite_age(retirement_age_estimator(30, 50_000.0, 100_000.0, 0.10, target, 0.06).unwrap());
        assert!(age >= previous, "target {} gave age {} after {}", target, age, previous);
        previous = age;
    }
}

/// Unreachable ranks above every finite age
fn age_rank(outcome: Outcome<u32>) -> u32 {
    match outcome {
        Outcome::Finite(age) => age,
        _ => u32::MAX,
    }
}

#[test]
fn retirement_age_non_increasing_in_savings_rate() {
    let mut previous = u32::MAX;
    for step in 0..=12 {
        let savings_rate = 0.025 * step as f64;
        let age =
            finite_age(retirement_age_estimator(35, 20_000.0, 80_000.0, savings_rate, 1_500_000.0, 0.07).unwrap());
        assert!(age <= previous, "savings rate {} gave age {} after {}", savings_rate, age, previous);
        previous = age;
    }
}

#[test]
fn retirement_age_non_increasing_in_savings_rate_for_any_return() {
    let cases = [
        (123_456.0, 50_000.0),
        (50_000.0, 200_000.0),
        (20_000.0, 1_000_000.0),
        (0.0, 300_000.0),
    ];
    for &rate in &[-0.05, -0.01, 0.0, 0.04] {
        for &(savings, target) in &cases {
            let mut previous = u32::MAX;
            for step in 0..=40 {
                let savings_rate = 0.005 * step as f64;
                let outcome = retirement_age_estimator(30, savings, 80_000.0, savings_rate, target, rate).unwrap();
                let rank = age_rank(outcome);
                assert!(
                    rank <= previous,
                    "return {} savings {} target {} rate {} gave {:?}",
                    rate,
                    savings,
                    target,
                    savings_rate,
                    outcome
                );
                previous = rank;
            }
        }
    }
}

#[test]
fn savings_already_at_target_retire_now() {
    for &rate in &[-0.05, 0.0, 0.07] {
        for &savings_rate in &[0.0, 0.005, 0.2] {
            let age = retirement_age_estimator(40, 123_456.0, 80_000.0, savings_rate, 50_000.0, rate).unwrap();
            assert_eq!(age, Outcome::Finite(40), "return {} savings rate {}", rate, savings_rate);
        }
    }
}

#[test]
fn higher_investment_return_never_flips_to_paying_down() {
    for &mortgage_rate in &[0.02, 0.045, 0.07, 0.10] {
        let mut seen_invest = false;
        for step in 0..=24 {
            let investment_return = 0.005 * step as f64;
            let analysis = mortgage_vs_invest(300_000.0, mortgage_rate, 30, investment_return).unwrap();
            if seen_invest {
                assert_eq!(
                    analysis.recommendation,
                    Recommendation::Invest,
                    "flipped at mortgage {} return {}",
                    mortgage_rate,
                    investment_return
                );
            }
            seen_invest |= analysis.recommendation == Recommendation::Invest;
        }
    }
}
