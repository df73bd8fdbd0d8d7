//! Scenario runner for what-if and batch planning
//!
//! Holds one set of assumptions and re-plans a profile under varied
//! retirement ages or risk tolerances, or plans many profiles at once.
//! Independent plans run in parallel on the rayon pool.

use std::path::Path;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::assumptions::PlanningAssumptions;
use crate::error::PlanningResult;
use crate::planning::MAX_AGE;
use crate::profile::{FinancialProfile, RiskTolerance};
use crate::projection::{RetirementPlan, RetirementPlanner};

/// One varied plan and what was varied
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    pub label: String,
    pub retirement_age: u32,
    pub risk_tolerance: RiskTolerance,
    pub plan: RetirementPlan,
}

/// Pre-loaded scenario runner
///
/// # Example
/// ```
/// use retirement_planner::profile::FinancialProfile;
/// use retirement_planner::scenario::ScenarioRunner;
///
/// let runner = ScenarioRunner::new();
/// let profile = FinancialProfile::new(40, 100_000.0, 100_000.0, 65);
/// let scenarios = runner.retirement_age_scenarios(&profile).unwrap();
/// assert_eq!(scenarios.len(), 3);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ScenarioRunner {
    base_assumptions: PlanningAssumptions,
}

impl ScenarioRunner {
    /// Runner with default assumptions
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_assumptions(assumptions: PlanningAssumptions) -> Self {
        Self {
            base_assumptions: assumptions,
        }
    }

    /// Runner with assumptions loaded from a JSON file
    pub fn from_json_path(path: &Path) -> PlanningResult<Self> {
        Ok(Self::with_assumptions(PlanningAssumptions::from_json_path(path)?))
    }

    pub fn assumptions(&self) -> &PlanningAssumptions {
        &self.base_assumptions
    }

    pub fn assumptions_mut(&mut self) -> &mut PlanningAssumptions {
        &mut self.base_assumptions
    }

    fn planner(&self) -> RetirementPlanner {
        RetirementPlanner::new(self.base_assumptions.clone())
    }

    /// Plan a single profile
    pub fn run(&self, profile: &FinancialProfile) -> PlanningResult<RetirementPlan> {
        self.planner().plan(profile)
    }

    /// Plan many profiles in parallel; results keep the input order
    pub fn run_batch(&self, profiles: &[FinancialProfile]) -> Vec<PlanningResult<RetirementPlan>> {
        let planner = self.planner();
        profiles.par_iter().map(|profile| planner.plan(profile)).collect()
    }

    /// Re-plan at the target retirement age shifted by each configured offset
    ///
    /// Shifted ages at or before the current age, or beyond the maximum age,
    /// are skipped.
    pub fn retirement_age_scenarios(&self, profile: &FinancialProfile) -> PlanningResult<Vec<Scenario>> {
        let planner = self.planner();
        let risk_tolerance = profile.risk_tolerance_or_default();

        let ages: Vec<u32> = self
            .base_assumptions
            .retirement_age_offsets
            .iter()
            .filter_map(|&offset| {
                let age = profile.retirement_age as i64 + offset as i64;
                (age > profile.age as i64 && age <= MAX_AGE as i64).then_some(age as u32)
            })
            .collect();

        ages.par_iter()
            .map(|&retirement_age| {
                let varied = FinancialProfile {
                    retirement_age,
                    ..profile.clone()
                };
                Ok(Scenario {
                    label: format!("retire at {}", retirement_age),
                    retirement_age,
                    risk_tolerance,
                    plan: planner.plan(&varied)?,
                })
            })
            .collect()
    }

    /// Re-plan under each risk tolerance
    pub fn risk_tolerance_scenarios(&self, profile: &FinancialProfile) -> PlanningResult<Vec<Scenario>> {
        let planner = self.planner();
        RiskTolerance::ALL
            .par_iter()
            .map(|&risk_tolerance| {
                let varied = profile.clone().with_risk_tolerance(risk_tolerance);
                Ok(Scenario {
                    label: format!("{} portfolio", risk_tolerance),
                    retirement_age: profile.retirement_age,
                    risk_tolerance,
                    plan: planner.plan(&varied)?,
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_profile() -> FinancialProfile {
        FinancialProfile::new(40, 100_000.0, 100_000.0, 65)
    }

    #[test]
    fn test_retirement_age_scenarios() {
        let runner = ScenarioRunner::new();
        let scenarios = runner.retirement_age_scenarios(&test_profile()).unwrap();

        let ages: Vec<u32> = scenarios.iter().map(|s| s.retirement_age).collect();
        assert_eq!(ages, vec![63, 65, 67]);
        assert_eq!(scenarios[0].label, "retire at 63");

        // Retiring later needs less saved per month
        assert!(scenarios[0].plan.required_monthly_savings > scenarios[1].plan.required_monthly_savings);
        assert!(scenarios[1].plan.required_monthly_savings > scenarios[2].plan.required_monthly_savings);
    }

    #[test]
    fn test_offsets_before_current_age_skipped() {
        let runner = ScenarioRunner::new();
        let profile = FinancialProfile::new(60, 80_000.0, 400_000.0, 61);
        let scenarios = runner.retirement_age_scenarios(&profile).unwrap();
        let ages: Vec<u32> = scenarios.iter().map(|s| s.retirement_age).collect();
        assert_eq!(ages, vec![61, 63]);
    }

    #[test]
    fn test_offsets_beyond_max_age_skipped() {
        let runner = ScenarioRunner::new();
        let profile = FinancialProfile::new(60, 80_000.0, 400_000.0, 99);
        let scenarios = runner.retirement_age_scenarios(&profile).unwrap();
        let ages: Vec<u32> = scenarios.iter().map(|s| s.retirement_age).collect();
        assert_eq!(ages, vec![97, 99]);
    }

    #[test]
    fn test_risk_tolerance_scenarios() {
        let runner = ScenarioRunner::new();
        let scenarios = runner.risk_tolerance_scenarios(&test_profile()).unwrap();
        assert_eq!(scenarios.len(), 3);

        let returns: Vec<f64> = scenarios.iter().map(|s| s.plan.expected_return).collect();
        assert_eq!(returns, vec![0.05, 0.07, 0.09]);
        assert_eq!(scenarios[2].label, "aggressive portfolio");
    }

    #[test]
    fn test_custom_offsets() {
        let mut runner = ScenarioRunner::new();
        runner.assumptions_mut().retirement_age_offsets = vec![-5, 5];
        let scenarios = runner.retirement_age_scenarios(&test_profile()).unwrap();
        let ages: Vec<u32> = scenarios.iter().map(|s| s.retirement_age).collect();
        assert_eq!(ages, vec![60, 70]);
    }

    #[test]
    fn test_batch_keeps_order_and_errors() {
        let runner = ScenarioRunner::new();
        let mut invalid = test_profile();
        invalid.annual_income = 0.0;
        let profiles = vec![test_profile(), invalid, FinancialProfile::new(25, 50_000.0, 0.0, 60)];

        let results = runner.run_batch(&profiles);
        assert_eq!(results.len(), 3);
        assert_eq!(results[0].as_ref().unwrap().current_age, 40);
        assert_eq!(results[1].as_ref().unwrap_err().parameter(), Some("annual_income"));
        assert_eq!(results[2].as_ref().unwrap().retirement_age, 60);
    }
}
