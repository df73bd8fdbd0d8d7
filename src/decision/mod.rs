//! Comparative decision models
//!
//! Currently a single model: whether extra monthly cash is better spent
//! accelerating a mortgage or invested at an expected return.

mod amortization;
mod mortgage;

pub use amortization::{
    amortization_schedule, payoff_months, AmortizationRow, AmortizationSchedule, MAX_SCHEDULE_MONTHS,
};
pub use mortgage::{mortgage_vs_invest, MortgageAnalysis, MortgageScenario, Recommendation};
