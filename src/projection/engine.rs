//! Retirement plan projection for a single profile

use log::debug;

use super::plan::{RetirementPlan, SafeWithdrawal, TrajectoryRow};
use crate::assumptions::PlanningAssumptions;
use crate::error::PlanningResult;
use crate::formulas;
use crate::outcome::Outcome;
use crate::planning::{plan_goal_savings, savings_duration};
use crate::profile::FinancialProfile;

/// Builds retirement plans from profiles under one set of assumptions
#[derive(Debug, Clone, Default)]
pub struct RetirementPlanner {
    assumptions: PlanningAssumptions,
}

impl RetirementPlanner {
    pub fn new(assumptions: PlanningAssumptions) -> Self {
        Self { assumptions }
    }

    pub fn assumptions(&self) -> &PlanningAssumptions {
        &self.assumptions
    }

    /// Project a profile to its retirement age
    ///
    /// # Example
    /// ```
    /// use retirement_planner::profile::FinancialProfile;
    /// use retirement_planner::projection::RetirementPlanner;
    ///
    /// let profile = FinancialProfile::new(30, 90_000.0, 25_000.0, 65);
    /// let plan = RetirementPlanner::default().plan(&profile).unwrap();
    /// assert_eq!(plan.trajectory.len(), 36);
    /// assert!(!plan.on_track);
    /// ```
    pub fn plan(&self, profile: &FinancialProfile) -> PlanningResult<RetirementPlan> {
        profile.validate()?;
        let a = &self.assumptions;

        let risk_tolerance = profile.risk_tolerance_or_default();
        let expected_return = a.expected_return(risk_tolerance);
        let years = profile.years_to_retirement();
        let horizon = years as f64;

        let income_target = profile.annual_income * a.income_replacement_ratio;
        let required_nest_egg =
            formulas::present_value_of_annuity(income_target, expected_return, a.retirement_years as f64)?;

        let goal = plan_goal_savings(required_nest_egg, horizon, profile.current_savings, expected_return)?;
        let projected_savings = goal.projected_savings;
        debug!(
            "plan: target income {:.2}, nest egg {:.2}, projected {:.2}, shortfall {:.2}",
            income_target, required_nest_egg, projected_savings, goal.shortfall
        );

        let projected_savings_duration = if projected_savings > 0.0 {
            savings_duration(projected_savings, income_target, a.drawdown_return)?
        } else {
            Outcome::Finite(0.0)
        };

        let mut plan = RetirementPlan {
            current_age: profile.age,
            retirement_age: profile.retirement_age,
            years_to_retirement: years,
            risk_tolerance,
            expected_return,
            income_target,
            projected_savings,
            required_nest_egg,
            shortfall: goal.shortfall,
            required_annual_savings: goal.annual_contribution,
            required_monthly_savings: goal.monthly_contribution,
            on_track: goal.goal_already_met,
            projected_savings_duration,
            trajectory: Vec::with_capacity(years as usize + 1),
            emergency_fund: profile
                .monthly_expenses
                .map(|expenses| expenses * a.emergency_fund_months as f64),
            safe_withdrawals: a
                .safe_withdrawal_rates
                .iter()
                .map(|&rate| SafeWithdrawal {
                    rate,
                    annual_amount: profile.current_savings * rate,
                })
                .collect(),
        };

        for years_elapsed in 0..=years {
            let elapsed = years_elapsed as f64;
            let balance = formulas::future_value(profile.current_savings, expected_return, elapsed)?;
            let contributions =
                formulas::future_value_of_annuity(goal.annual_contribution, expected_return, elapsed)?;
            plan.add_row(TrajectoryRow {
                age: profile.age + years_elapsed,
                years_elapsed,
                balance,
                balance_with_contributions: balance + contributions,
            });
        }

        Ok(plan)
    }
}
