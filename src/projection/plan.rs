//! Plan output structures

use serde::{Deserialize, Serialize};

use crate::outcome::Outcome;
use crate::profile::RiskTolerance;

/// Projected balance at one age between now and retirement
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrajectoryRow {
    pub age: u32,
    pub years_elapsed: u32,
    /// Current savings grown with no further contributions
    pub balance: f64,
    /// Balance when the required annual savings are also made
    pub balance_with_contributions: f64,
}

/// Annual withdrawal supported by current savings at one withdrawal rate
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SafeWithdrawal {
    pub rate: f64,
    pub annual_amount: f64,
}

/// Complete retirement plan for one profile
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RetirementPlan {
    pub current_age: u32,
    pub retirement_age: u32,
    pub years_to_retirement: u32,
    pub risk_tolerance: RiskTolerance,
    pub expected_return: f64,

    /// Annual income needed in retirement
    pub income_target: f64,
    /// Current savings grown to the retirement age
    pub projected_savings: f64,
    /// Present value at retirement of the income target over the retirement years
    pub required_nest_egg: f64,
    /// Nest egg not covered by projected savings (0 when on track)
    pub shortfall: f64,
    pub required_annual_savings: f64,
    pub required_monthly_savings: f64,
    pub on_track: bool,

    /// Years projected savings alone would fund the income target
    pub projected_savings_duration: Outcome<f64>,

    /// One row per year from the current age to the retirement age, inclusive
    pub trajectory: Vec<TrajectoryRow>,

    pub emergency_fund: Option<f64>,
    pub safe_withdrawals: Vec<SafeWithdrawal>,
}

impl RetirementPlan {
    pub fn add_row(&mut self, row: TrajectoryRow) {
        self.trajectory.push(row);
    }

    /// Flat summary suitable for CSV output
    pub fn summary(&self) -> PlanSummary {
        PlanSummary {
            current_age: self.current_age,
            retirement_age: self.retirement_age,
            risk_tolerance: self.risk_tolerance,
            expected_return: self.expected_return,
            income_target: self.income_target,
            projected_savings: self.projected_savings,
            required_nest_egg: self.required_nest_egg,
            shortfall: self.shortfall,
            required_monthly_savings: self.required_monthly_savings,
            on_track: self.on_track,
            funding_ratio: if self.required_nest_egg > 0.0 {
                self.projected_savings / self.required_nest_egg
            } else {
                1.0
            },
        }
    }
}

/// Summary statistics for a plan
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlanSummary {
    pub current_age: u32,
    pub retirement_age: u32,
    pub risk_tolerance: RiskTolerance,
    pub expected_return: f64,
    pub income_target: f64,
    pub projected_savings: f64,
    pub required_nest_egg: f64,
    pub shortfall: f64,
    pub required_monthly_savings: f64,
    pub on_track: bool,
    /// Projected savings as a share of the required nest egg
    pub funding_ratio: f64,
}
