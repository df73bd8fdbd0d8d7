//! Monthly savings needed to reach a goal

use serde::{Deserialize, Serialize};

use crate::error::PlanningResult;
use crate::formulas::{self, guards};

/// Breakdown of a goal-based savings calculation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GoalSavingsPlan {
    pub target_amount: f64,
    pub horizon_years: f64,
    /// Current savings grown over the horizon
    pub projected_savings: f64,
    /// Amount still needed after growth of current savings (0 when met)
    pub shortfall: f64,
    /// Year-end contribution that closes the shortfall
    pub annual_contribution: f64,
    /// `annual_contribution / 12`
    pub monthly_contribution: f64,
    pub goal_already_met: bool,
}

/// Monthly contribution needed to reach `target_amount` in `horizon_years`
///
/// The annual sinking-fund payment is divided by 12. This spreads an
/// annually compounded payment across the year; it is an approximation, not
/// a monthly-compounding answer. Returns 0 when current savings alone reach
/// the target.
pub fn goal_based_monthly_savings(
    target_amount: f64,
    horizon_years: f64,
    current_savings: f64,
    expected_return: f64,
) -> PlanningResult<f64> {
    Ok(plan_goal_savings(target_amount, horizon_years, current_savings, expected_return)?.monthly_contribution)
}

/// Full breakdown behind [`goal_based_monthly_savings`]
pub fn plan_goal_savings(
    target_amount: f64,
    horizon_years: f64,
    current_savings: f64,
    expected_return: f64,
) -> PlanningResult<GoalSavingsPlan> {
    guards::positive("target_amount", target_amount)?;
    guards::positive("horizon_years", horizon_years)?;
    guards::non_negative("current_savings", current_savings)?;
    guards::rate("expected_return", expected_return)?;

    let projected_savings = formulas::future_value(current_savings, expected_return, horizon_years)?;
    let shortfall = target_amount - projected_savings;

    if shortfall <= 0.0 {
        return Ok(GoalSavingsPlan {
            target_amount,
            horizon_years,
            projected_savings,
            shortfall: 0.0,
            annual_contribution: 0.0,
            monthly_contribution: 0.0,
            goal_already_met: true,
        });
    }

    let annual_contribution = formulas::payment_for_future_value(shortfall, expected_return, horizon_years)?;

    Ok(GoalSavingsPlan {
        target_amount,
        horizon_years,
        projected_savings,
        shortfall,
        annual_contribution,
        monthly_contribution: annual_contribution / 12.0,
        goal_already_met: false,
    })
}
