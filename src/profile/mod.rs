//! User financial profiles and the quick summary derived from them

mod data;
pub mod loader;

pub use data::{FieldKind, FinancialProfile, RiskTolerance};
pub use loader::{load_profiles, load_profiles_from_reader, ProfileRecord};

use serde::{Deserialize, Serialize};

use crate::assumptions::PlanningAssumptions;

/// Headline ratios for a profile, before any projection
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProfileSummary {
    pub years_to_retirement: u32,
    /// Share of income saved, when monthly savings are known
    pub savings_rate: Option<f64>,
    /// Months of expenses covered by current savings, when expenses are known
    pub emergency_fund_months: Option<f64>,
    pub expected_return: f64,
}

impl FinancialProfile {
    pub fn summary(&self, assumptions: &PlanningAssumptions) -> ProfileSummary {
        ProfileSummary {
            years_to_retirement: self.years_to_retirement(),
            savings_rate: self
                .monthly_savings
                .filter(|_| self.annual_income > 0.0)
                .map(|monthly| monthly * 12.0 / self.annual_income),
            emergency_fund_months: self
                .monthly_expenses
                .filter(|&expenses| expenses > 0.0)
                .map(|expenses| self.current_savings / expenses),
            expected_return: assumptions.expected_return(self.risk_tolerance_or_default()),
        }
    }
}
