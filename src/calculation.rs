//! Serializable requests for every engine operation
//!
//! A [`CalculationRequest`] names an operation and carries its inputs; the
//! CLI and the HTTP handler both dispatch through [`CalculationRequest::evaluate`].
//!
//! ```json
//! {"calculation": "future_value", "present_value": 10000, "rate": 0.07, "periods": 10}
//! ```

use log::debug;
use serde::{Deserialize, Serialize};

use crate::assumptions::PlanningAssumptions;
use crate::decision::{MortgageAnalysis, MortgageScenario};
use crate::error::PlanningResult;
use crate::formulas;
use crate::outcome::Outcome;
use crate::planning::{
    estimate_retirement, plan_goal_savings, savings_duration, GoalSavingsPlan, RetirementEstimate,
    RetirementInputs,
};
use crate::profile::FinancialProfile;
use crate::projection::{RetirementPlan, RetirementPlanner};
use crate::scenario::{Scenario, ScenarioRunner};
use crate::solver::{self, SolverConfig, SolverResult, DEFAULT_TOLERANCE};

fn default_tolerance() -> f64 {
    DEFAULT_TOLERANCE
}

/// One engine operation with its inputs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "calculation", rename_all = "snake_case")]
pub enum CalculationRequest {
    FutureValue {
        present_value: f64,
        rate: f64,
        periods: f64,
    },
    PresentValue {
        future_value: f64,
        rate: f64,
        periods: f64,
    },
    FutureValueOfAnnuity {
        payment: f64,
        rate: f64,
        periods: f64,
    },
    PresentValueOfAnnuity {
        payment: f64,
        rate: f64,
        periods: f64,
    },
    PaymentForFutureValue {
        future_value: f64,
        rate: f64,
        periods: f64,
    },
    PaymentForPresentValue {
        present_value: f64,
        rate: f64,
        periods: f64,
    },
    /// Periods for a lump sum plus payments to reach a target
    SolvePeriods {
        present_value: f64,
        payment: f64,
        target: f64,
        rate: f64,
        #[serde(default = "default_tolerance")]
        tolerance: f64,
    },
    RetirementAge(RetirementInputs),
    SavingsDuration {
        current_savings: f64,
        annual_withdrawal: f64,
        annual_return: f64,
    },
    GoalSavings {
        target_amount: f64,
        horizon_years: f64,
        current_savings: f64,
        expected_return: f64,
    },
    MortgageVsInvest(MortgageScenario),
    RuleOf72 {
        rate: f64,
    },
    InflationAdjustedReturn {
        nominal_return: f64,
        inflation_rate: f64,
    },
    Plan(FinancialProfile),
    Scenarios(FinancialProfile),
}

/// Result of a [`CalculationRequest`], tagged with the same operation name
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "calculation", content = "result", rename_all = "snake_case")]
pub enum CalculationResponse {
    FutureValue(f64),
    PresentValue(f64),
    FutureValueOfAnnuity(f64),
    PresentValueOfAnnuity(f64),
    PaymentForFutureValue(f64),
    PaymentForPresentValue(f64),
    SolvePeriods(SolverResult),
    RetirementAge(RetirementEstimate),
    SavingsDuration(Outcome<f64>),
    GoalSavings(GoalSavingsPlan),
    MortgageVsInvest(MortgageAnalysis),
    RuleOf72(f64),
    InflationAdjustedReturn(f64),
    Plan(RetirementPlan),
    Scenarios {
        retirement_age: Vec<Scenario>,
        risk_tolerance: Vec<Scenario>,
    },
}

impl CalculationRequest {
    pub fn name(&self) -> &'static str {
        match self {
            CalculationRequest::FutureValue { .. } => "future_value",
            CalculationRequest::PresentValue { .. } => "present_value",
            CalculationRequest::FutureValueOfAnnuity { .. } => "future_value_of_annuity",
            CalculationRequest::PresentValueOfAnnuity { .. } => "present_value_of_annuity",
            CalculationRequest::PaymentForFutureValue { .. } => "payment_for_future_value",
            CalculationRequest::PaymentForPresentValue { .. } => "payment_for_present_value",
            CalculationRequest::SolvePeriods { .. } => "solve_periods",
            CalculationRequest::RetirementAge(_) => "retirement_age",
            CalculationRequest::SavingsDuration { .. } => "savings_duration",
            CalculationRequest::GoalSavings { .. } => "goal_savings",
            CalculationRequest::MortgageVsInvest(_) => "mortgage_vs_invest",
            CalculationRequest::RuleOf72 { .. } => "rule_of_72",
            CalculationRequest::InflationAdjustedReturn { .. } => "inflation_adjusted_return",
            CalculationRequest::Plan(_) => "plan",
            CalculationRequest::Scenarios(_) => "scenarios",
        }
    }

    /// Run the calculation; the solver settings and plan constants come from `assumptions`
    pub fn evaluate(&self, assumptions: &PlanningAssumptions) -> PlanningResult<CalculationResponse> {
        debug!("evaluating {}", self.name());
        let response = match *self {
            CalculationRequest::FutureValue {
                present_value,
                rate,
                periods,
            } => CalculationResponse::FutureValue(formulas::future_value(present_value, rate, periods)?),
            CalculationRequest::PresentValue {
                future_value,
                rate,
                periods,
            } => CalculationResponse::PresentValue(formulas::present_value(future_value, rate, periods)?),
            CalculationRequest::FutureValueOfAnnuity { payment, rate, periods } => {
                CalculationResponse::FutureValueOfAnnuity(formulas::future_value_of_annuity(payment, rate, periods)?)
            }
            CalculationRequest::PresentValueOfAnnuity { payment, rate, periods } => {
                CalculationResponse::PresentValueOfAnnuity(formulas::present_value_of_annuity(payment, rate, periods)?)
            }
            CalculationRequest::PaymentForFutureValue {
                future_value,
                rate,
                periods,
            } => CalculationResponse::PaymentForFutureValue(formulas::payment_for_future_value(
                future_value,
                rate,
                periods,
            )?),
            CalculationRequest::PaymentForPresentValue {
                present_value,
                rate,
                periods,
            } => CalculationResponse::PaymentForPresentValue(formulas::payment_for_present_value(
                present_value,
                rate,
                periods,
            )?),
            CalculationRequest::SolvePeriods {
                present_value,
                payment,
                target,
                rate,
                tolerance,
            } => {
                let config = SolverConfig {
                    tolerance,
                    ..assumptions.solver
                };
                CalculationResponse::SolvePeriods(solver::solve_periods_with(
                    present_value,
                    payment,
                    target,
                    rate,
                    &config,
                )?)
            }
            CalculationRequest::RetirementAge(ref inputs) => {
                CalculationResponse::RetirementAge(estimate_retirement(inputs, &assumptions.solver)?)
            }
            CalculationRequest::SavingsDuration {
                current_savings,
                annual_withdrawal,
                annual_return,
            } => CalculationResponse::SavingsDuration(savings_duration(current_savings, annual_withdrawal, annual_return)?),
            CalculationRequest::GoalSavings {
                target_amount,
                horizon_years,
                current_savings,
                expected_return,
            } => CalculationResponse::GoalSavings(plan_goal_savings(
                target_amount,
                horizon_years,
                current_savings,
                expected_return,
            )?),
            CalculationRequest::MortgageVsInvest(ref scenario) => {
                CalculationResponse::MortgageVsInvest(scenario.analyze()?)
            }
            CalculationRequest::RuleOf72 { rate } => CalculationResponse::RuleOf72(formulas::rule_of_72(rate)?),
            CalculationRequest::InflationAdjustedReturn {
                nominal_return,
                inflation_rate,
            } => CalculationResponse::InflationAdjustedReturn(formulas::inflation_adjusted_return(
                nominal_return,
                inflation_rate,
            )?),
            CalculationRequest::Plan(ref profile) => {
                CalculationResponse::Plan(RetirementPlanner::new(assumptions.clone()).plan(profile)?)
            }
            CalculationRequest::Scenarios(ref profile) => {
                let runner = ScenarioRunner::with_assumptions(assumptions.clone());
                CalculationResponse::Scenarios {
                    retirement_age: runner.retirement_age_scenarios(profile)?,
                    risk_tolerance: runner.risk_tolerance_scenarios(profile)?,
                }
            }
        };
        Ok(response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decision::Recommendation;

    fn evaluate(json: &str) -> PlanningResult<CalculationResponse> {
        let request: CalculationRequest = serde_json::from_str(json).unwrap();
        request.evaluate(&PlanningAssumptions::default())
    }

    #[test]
    fn test_future_value_request() {
        let response = evaluate(r#"{"calculation": "future_value", "present_value": 10000, "rate": 0.07, "periods": 10}"#).unwrap();
        match response {
            CalculationResponse::FutureValue(value) => assert!((value - 19_671.51).abs() < 0.01),
            other => panic!("unexpected response {:?}", other),
        }
    }

    #[test]
    fn test_solve_periods_default_tolerance() {
        let request: CalculationRequest = serde_json::from_str(
            r#"{"calculation": "solve_periods", "present_value": 50000, "payment": 15000, "target": 1000000, "rate": 0.07}"#,
        )
        .unwrap();
        match &request {
            CalculationRequest::SolvePeriods { tolerance, .. } => assert_eq!(*tolerance, DEFAULT_TOLERANCE),
            other => panic!("unexpected request {:?}", other),
        }
        match request.evaluate(&PlanningAssumptions::default()).unwrap() {
            CalculationResponse::SolvePeriods(result) => assert_eq!(result.periods.ceil(), 23.0),
            other => panic!("unexpected response {:?}", other),
        }
    }

    #[test]
    fn test_mortgage_request_without_extra_payment() {
        let response = evaluate(
            r#"{"calculation": "mortgage_vs_invest", "balance": 200000, "mortgage_rate": 0.03,
                "term_years": 15, "investment_return": 0.07}"#,
        )
        .unwrap();
        match response {
            CalculationResponse::MortgageVsInvest(analysis) => {
                assert_eq!(analysis.recommendation, Recommendation::Invest)
            }
            other => panic!("unexpected response {:?}", other),
        }
    }

    #[test]
    fn test_savings_duration_response_json() {
        let response = evaluate(
            r#"{"calculation": "savings_duration", "current_savings": 100000, "annual_withdrawal": 3000, "annual_return": 0.05}"#,
        )
        .unwrap();
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["calculation"], "savings_duration");
        assert_eq!(json["result"]["outcome"], "indefinite");
    }

    #[test]
    fn test_plan_request() {
        let response = evaluate(
            r#"{"calculation": "plan", "age": 30, "annual_income": 90000, "current_savings": 25000,
                "retirement_age": 65, "risk_tolerance": "conservative"}"#,
        )
        .unwrap();
        match response {
            CalculationResponse::Plan(plan) => {
                assert_eq!(plan.expected_return, 0.05);
                assert_eq!(plan.trajectory.len(), 36);
            }
            other => panic!("unexpected response {:?}", other),
        }
    }

    #[test]
    fn test_invalid_input_propagates() {
        let err = evaluate(r#"{"calculation": "rule_of_72", "rate": 0}"#).unwrap_err();
        assert_eq!(err.parameter(), Some("rate"));

        let err = evaluate(r#"{"calculation": "present_value", "future_value": 1000, "rate": -1.5, "periods": 3}"#)
            .unwrap_err();
        assert_eq!(err.parameter(), Some("rate"));
    }

    #[test]
    fn test_unknown_calculation_rejected() {
        let result: Result<CalculationRequest, _> = serde_json::from_str(r#"{"calculation": "lottery"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_request_names_match_tags() {
        let request = CalculationRequest::RuleOf72 { rate: 0.08 };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["calculation"], request.name());
    }
}
