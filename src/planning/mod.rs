//! Planning calculators composed from the formula primitives and the solver

mod retirement;
mod duration;
mod goal;

pub use retirement::{
    retirement_age_estimator, estimate_retirement, RetirementInputs, RetirementEstimate, MIN_AGE, MAX_AGE,
};
pub use duration::savings_duration;
pub use goal::{goal_based_monthly_savings, plan_goal_savings, GoalSavingsPlan};
