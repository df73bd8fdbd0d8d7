//! Reference calculations checked against published figures

use approx::assert_abs_diff_eq;

use retirement_planner::decision::{mortgage_vs_invest, Recommendation};
use retirement_planner::formulas::{future_value, present_value, present_value_of_annuity};
use retirement_planner::planning::{retirement_age_estimator, savings_duration};
use retirement_planner::Outcome;

#[test]
fn future_value_of_lump_sum() {
    assert_abs_diff_eq!(future_value(10_000.0, 0.07, 10.0).unwrap(), 19_671.51, epsilon = 1.0);
}

#[test]
fn present_value_of_future_amount() {
    assert_abs_diff_eq!(present_value(20_000.0, 0.07, 10.0).unwrap(), 10_162.67, epsilon = 1.0);
}

#[test]
fn present_value_of_ordinary_annuity() {
    assert_abs_diff_eq!(present_value_of_annuity(1_000.0, 0.07, 10.0).unwrap(), 7_023.58, epsilon = 1.0);
}

#[test]
fn cheap_mortgage_favours_investing() {
    let analysis = mortgage_vs_invest(200_000.0, 0.03, 15, 0.07).unwrap();
    assert_eq!(analysis.recommendation, Recommendation::Invest);
    assert!(analysis.net_benefit > 0.0);
}

#[test]
fn expensive_mortgage_favours_paying_down() {
    let analysis = mortgage_vs_invest(200_000.0, 0.12, 15, 0.03).unwrap();
    assert_eq!(analysis.recommendation, Recommendation::PayDownDebt);
    assert!(analysis.net_benefit < 0.0);
}

#[test]
fn retirement_age_for_steady_saver() {
    let age = retirement_age_estimator(30, 50_000.0, 100_000.0, 0.15, 1_000_000.0, 0.07).unwrap();
    match age {
        Outcome::Finite(age) => assert!((45..=65).contains(&age), "age {}", age),
        other => panic!("expected a finite age, got {:?}", other),
    }
}

#[test]
fn savings_duration_under_steady_withdrawals() {
    match savings_duration(500_000.0, 40_000.0, 0.04).unwrap() {
        Outcome::Finite(years) => assert!(years > 15.0 && years < 20.0, "years {}", years),
        other => panic!("expected a finite duration, got {:?}", other),
    }
}

#[test]
fn no_savings_and_no_contributions_is_unreachable() {
    let age = retirement_age_estimator(30, 0.0, 100_000.0, 0.0, 1_000_000.0, 0.07).unwrap();
    assert_eq!(age, Outcome::Unreachable);
}
