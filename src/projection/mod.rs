//! Retirement plan projection: nest egg, shortfall, and savings trajectory

mod engine;
mod plan;

pub use engine::RetirementPlanner;
pub use plan::{PlanSummary, RetirementPlan, SafeWithdrawal, TrajectoryRow};
