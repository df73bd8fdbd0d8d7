//! Retirement Planner - Financial formula engine for personal retirement planning
//!
//! This library provides:
//! - Time-value-of-money primitives (lump sums, annuities, sinking funds)
//! - A bisection solver for periods with no closed-form inverse
//! - Planning calculators (retirement age, savings duration, goal savings)
//! - A mortgage prepayment vs. investing decision model
//! - Full retirement plans, what-if scenarios, and batch runs over profiles

pub mod error;
pub mod outcome;
pub mod formulas;
pub mod solver;
pub mod planning;
pub mod decision;
pub mod assumptions;
pub mod profile;
pub mod projection;
pub mod scenario;
pub mod calculation;

// Re-export commonly used types
pub use error::{PlanningError, PlanningResult};
pub use outcome::Outcome;
pub use assumptions::PlanningAssumptions;
pub use profile::{FinancialProfile, RiskTolerance};
pub use projection::{RetirementPlan, RetirementPlanner};
pub use scenario::ScenarioRunner;
pub use calculation::{CalculationRequest, CalculationResponse};
