//! Planning assumptions: the configurable constants behind a retirement plan

pub mod loader;

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{PlanningError, PlanningResult};
use crate::formulas::guards;
use crate::profile::RiskTolerance;
use crate::solver::SolverConfig;

/// Expected annual return for each risk tolerance
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RiskReturns {
    pub conservative: f64,
    pub moderate: f64,
    pub aggressive: f64,
}

impl Default for RiskReturns {
    fn default() -> Self {
        Self {
            conservative: 0.05,
            moderate: 0.07,
            aggressive: 0.09,
        }
    }
}

impl RiskReturns {
    pub fn for_tolerance(&self, tolerance: RiskTolerance) -> f64 {
        match tolerance {
            RiskTolerance::Conservative => self.conservative,
            RiskTolerance::Moderate => self.moderate,
            RiskTolerance::Aggressive => self.aggressive,
        }
    }
}

/// Container for all plan assumptions
///
/// Every field has a default, so an override file only needs the values it
/// changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlanningAssumptions {
    /// Share of pre-retirement income needed in retirement
    pub income_replacement_ratio: f64,

    /// Years the nest egg must fund retirement income
    pub retirement_years: u32,

    pub risk_returns: RiskReturns,

    /// Return earned on the balance while drawing it down
    pub drawdown_return: f64,

    /// Retirement age shifts explored by the scenario runner
    pub retirement_age_offsets: Vec<i32>,

    /// Withdrawal rates shown in the safe withdrawal table
    pub safe_withdrawal_rates: Vec<f64>,

    /// Months of expenses to hold as an emergency fund
    pub emergency_fund_months: u32,

    pub solver: SolverConfig,
}

impl Default for PlanningAssumptions {
    fn default() -> Self {
        Self {
            income_replacement_ratio: 0.80,
            retirement_years: 25,
            risk_returns: RiskReturns::default(),
            drawdown_return: 0.04,
            retirement_age_offsets: vec![-2, 0, 2],
            safe_withdrawal_rates: vec![0.03, 0.035, 0.04, 0.045],
            emergency_fund_months: 6,
            solver: SolverConfig::default(),
        }
    }
}

impl PlanningAssumptions {
    /// Load assumptions from a JSON file, falling back to defaults per field
    pub fn from_json_path(path: &Path) -> PlanningResult<Self> {
        let assumptions = loader::load_assumptions(path)?;
        assumptions.validate()?;
        Ok(assumptions)
    }

    /// Load from the default location if the file exists, else use defaults
    pub fn load_or_default() -> PlanningResult<Self> {
        let path = Path::new(loader::DEFAULT_ASSUMPTIONS_PATH);
        if path.exists() {
            Self::from_json_path(path)
        } else {
            Ok(Self::default())
        }
    }

    pub fn expected_return(&self, tolerance: RiskTolerance) -> f64 {
        self.risk_returns.for_tolerance(tolerance)
    }

    pub fn validate(&self) -> PlanningResult<()> {
        guards::positive("income_replacement_ratio", self.income_replacement_ratio)?;
        guards::within(
            "income_replacement_ratio",
            "must be greater than 0 and at most 2",
            self.income_replacement_ratio,
            0.0,
            2.0,
        )?;
        guards::positive("retirement_years", self.retirement_years as f64)?;
        guards::rate("risk_returns.conservative", self.risk_returns.conservative)?;
        guards::rate("risk_returns.moderate", self.risk_returns.moderate)?;
        guards::rate("risk_returns.aggressive", self.risk_returns.aggressive)?;
        guards::rate("drawdown_return", self.drawdown_return)?;
        for &rate in &self.safe_withdrawal_rates {
            guards::fraction("safe_withdrawal_rates", rate)?;
        }
        self.solver.validate()?;
        if self.retirement_age_offsets.is_empty() {
            return Err(PlanningError::Config("at least one retirement age offset is required".into()));
        }
        Ok(())
    }
}
