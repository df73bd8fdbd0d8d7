//! Retirement Planner CLI
//!
//! Command-line interface to the formula engine and the plan projection

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use retirement_planner::decision::MortgageScenario;
use retirement_planner::planning::RetirementInputs;
use retirement_planner::projection::RetirementPlan;
use retirement_planner::scenario::Scenario;
use retirement_planner::solver::DEFAULT_TOLERANCE;
use retirement_planner::{CalculationRequest, CalculationResponse, FinancialProfile, Outcome, PlanningAssumptions};

#[derive(Parser)]
#[command(
    name = "retirement-planner",
    version,
    about = "Retirement planning calculator",
    long_about = "Time-value-of-money formulas, retirement-age and savings estimates, \
                  mortgage prepayment analysis, and full retirement plans."
)]
struct Cli {
    /// Planning assumptions JSON (defaults to data/assumptions.json when present)
    #[arg(short, long, global = true)]
    assumptions: Option<PathBuf>,

    /// Print the result as JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Future value of a lump sum
    FutureValue {
        present_value: f64,
        #[arg(allow_negative_numbers = true)]
        rate: f64,
        periods: f64,
    },

    /// Present value of a future amount
    PresentValue {
        future_value: f64,
        #[arg(allow_negative_numbers = true)]
        rate: f64,
        periods: f64,
    },

    /// Future value of end-of-period payments
    AnnuityFv {
        payment: f64,
        #[arg(allow_negative_numbers = true)]
        rate: f64,
        periods: f64,
    },

    /// Present value of end-of-period payments
    AnnuityPv {
        payment: f64,
        #[arg(allow_negative_numbers = true)]
        rate: f64,
        periods: f64,
    },

    /// Payment needed to accumulate a future value
    SinkingFund {
        future_value: f64,
        #[arg(allow_negative_numbers = true)]
        rate: f64,
        periods: f64,
    },

    /// Payment that amortizes a present value
    LoanPayment {
        present_value: f64,
        #[arg(allow_negative_numbers = true)]
        rate: f64,
        periods: f64,
    },

    /// Periods for a lump sum plus payments to reach a target
    SolvePeriods {
        present_value: f64,
        payment: f64,
        target: f64,
        #[arg(allow_negative_numbers = true)]
        rate: f64,
        #[arg(short, long, default_value_t = DEFAULT_TOLERANCE)]
        tolerance: f64,
    },

    /// Age at which a target nest egg is reached
    RetirementAge {
        current_age: u32,
        current_savings: f64,
        annual_income: f64,
        /// Fraction of income saved (0.15 = 15%)
        savings_rate: f64,
        target_nest_egg: f64,
        #[arg(allow_negative_numbers = true)]
        expected_return: f64,
    },

    /// Years a balance lasts under a level annual withdrawal
    SavingsDuration {
        current_savings: f64,
        annual_withdrawal: f64,
        #[arg(allow_negative_numbers = true)]
        annual_return: f64,
    },

    /// Monthly savings needed to reach a goal
    GoalSavings {
        target_amount: f64,
        horizon_years: f64,
        current_savings: f64,
        #[arg(allow_negative_numbers = true)]
        expected_return: f64,
    },

    /// Compare paying down a mortgage with investing the extra
    Mortgage {
        balance: f64,
        #[arg(allow_negative_numbers = true)]
        mortgage_rate: f64,
        term_years: u32,
        #[arg(allow_negative_numbers = true)]
        investment_return: f64,
        /// Extra monthly payment (defaults to doubling the scheduled payment)
        #[arg(short, long)]
        extra: Option<f64>,
    },

    /// Approximate years to double at a rate
    RuleOf72 {
        #[arg(allow_negative_numbers = true)]
        rate: f64,
    },

    /// Real return after inflation
    RealReturn {
        #[arg(allow_negative_numbers = true)]
        nominal_return: f64,
        #[arg(allow_negative_numbers = true)]
        inflation_rate: f64,
    },

    /// Full retirement plan for a profile
    Plan {
        /// Financial profile JSON
        #[arg(short, long)]
        profile: PathBuf,
    },

    /// Retirement age and risk tolerance what-ifs for a profile
    Scenarios {
        /// Financial profile JSON
        #[arg(short, long)]
        profile: PathBuf,
    },

    /// Print the effective planning assumptions
    Assumptions,
}

impl Commands {
    fn into_request(self) -> Result<Option<CalculationRequest>> {
        let request = match self {
            Commands::FutureValue { present_value, rate, periods } => CalculationRequest::FutureValue {
                present_value,
                rate,
                periods,
            },
            Commands::PresentValue { future_value, rate, periods } => CalculationRequest::PresentValue {
                future_value,
                rate,
                periods,
            },
            Commands::AnnuityFv { payment, rate, periods } => {
                CalculationRequest::FutureValueOfAnnuity { payment, rate, periods }
            }
            Commands::AnnuityPv { payment, rate, periods } => {
                CalculationRequest::PresentValueOfAnnuity { payment, rate, periods }
            }
            Commands::SinkingFund { future_value, rate, periods } => CalculationRequest::PaymentForFutureValue {
                future_value,
                rate,
                periods,
            },
            Commands::LoanPayment { present_value, rate, periods } => CalculationRequest::PaymentForPresentValue {
                present_value,
                rate,
                periods,
            },
            Commands::SolvePeriods {
                present_value,
                payment,
                target,
                rate,
                tolerance,
            } => CalculationRequest::SolvePeriods {
                present_value,
                payment,
                target,
                rate,
                tolerance,
            },
            Commands::RetirementAge {
                current_age,
                current_savings,
                annual_income,
                savings_rate,
                target_nest_egg,
                expected_return,
            } => CalculationRequest::RetirementAge(RetirementInputs {
                current_age,
                current_savings,
                annual_income,
                savings_rate,
                target_nest_egg,
                expected_return,
            }),
            Commands::SavingsDuration {
                current_savings,
                annual_withdrawal,
                annual_return,
            } => CalculationRequest::SavingsDuration {
                current_savings,
                annual_withdrawal,
                annual_return,
            },
            Commands::GoalSavings {
                target_amount,
                horizon_years,
                current_savings,
                expected_return,
            } => CalculationRequest::GoalSavings {
                target_amount,
                horizon_years,
                current_savings,
                expected_return,
            },
            Commands::Mortgage {
                balance,
                mortgage_rate,
                term_years,
                investment_return,
                extra,
            } => CalculationRequest::MortgageVsInvest(MortgageScenario {
                balance,
                mortgage_rate,
                term_years,
                investment_return,
                extra_payment: extra,
            }),
            Commands::RuleOf72 { rate } => CalculationRequest::RuleOf72 { rate },
            Commands::RealReturn {
                nominal_return,
                inflation_rate,
            } => CalculationRequest::InflationAdjustedReturn {
                nominal_return,
                inflation_rate,
            },
            Commands::Plan { profile } => CalculationRequest::Plan(load_profile(&profile)?),
            Commands::Scenarios { profile } => CalculationRequest::Scenarios(load_profile(&profile)?),
            Commands::Assumptions => return Ok(None),
        };
        Ok(Some(request))
    }
}

fn load_profile(path: &Path) -> Result<FinancialProfile> {
    let file = File::open(path).with_context(|| format!("cannot open profile {}", path.display()))?;
    let profile = serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("cannot parse profile {}", path.display()))?;
    Ok(profile)
}

fn load_assumptions(path: Option<&Path>) -> Result<PlanningAssumptions> {
    let assumptions = match path {
        Some(path) => PlanningAssumptions::from_json_path(path)
            .with_context(|| format!("cannot load assumptions from {}", path.display()))?,
        None => PlanningAssumptions::load_or_default()?,
    };
    Ok(assumptions)
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let assumptions = load_assumptions(cli.assumptions.as_deref())?;

    let Some(request) = cli.command.into_request()? else {
        println!("{}", serde_json::to_string_pretty(&assumptions)?);
        return Ok(());
    };

    let response = request.evaluate(&assumptions)?;
    if cli.json {
        println!("{}", serde_json::to_string_pretty(&response)?);
    } else {
        print_response(&response);
    }
    Ok(())
}

fn print_response(response: &CalculationResponse) {
    match response {
        CalculationResponse::FutureValue(v) => println!("Future value: {:.2}", v),
        CalculationResponse::PresentValue(v) => println!("Present value: {:.2}", v),
        CalculationResponse::FutureValueOfAnnuity(v) => println!("Future value of annuity: {:.2}", v),
        CalculationResponse::PresentValueOfAnnuity(v) => println!("Present value of annuity: {:.2}", v),
        CalculationResponse::PaymentForFutureValue(v) => println!("Payment per period: {:.2}", v),
        CalculationResponse::PaymentForPresentValue(v) => println!("Payment per period: {:.2}", v),
        CalculationResponse::SolvePeriods(r) => {
            println!("Periods: {:.0} (residual {:.2}, {} iterations)", r.periods.ceil(), r.residual, r.iterations);
            if !r.converged {
                println!("  Warning: solver did not converge within tolerance");
            }
        }
        CalculationResponse::RetirementAge(estimate) => {
            match estimate.retirement_age {
                Outcome::Finite(age) => println!("Estimated retirement age: {}", age),
                _ => println!("Target nest egg is unreachable with these inputs"),
            }
            if estimate.capped_at_max_age {
                println!("  Capped at the maximum planning age");
            }
        }
        CalculationResponse::SavingsDuration(outcome) => print_duration("Savings last", *outcome),
        CalculationResponse::GoalSavings(goal) => {
            if goal.goal_already_met {
                println!("Goal already met: current savings grow to {:.2}", goal.projected_savings);
            } else {
                println!("Monthly savings needed: {:.2}", goal.monthly_contribution);
                println!("  Shortfall after growth: {:.2}", goal.shortfall);
            }
        }
        CalculationResponse::MortgageVsInvest(a) => {
            println!("Recommendation: {}", a.recommendation);
            println!("  {}", a.rationale);
            println!("  Scheduled payment:  {:.2}", a.mortgage_payment);
            println!("  Payoff with extra:  {:.1} years", a.payoff_years);
            println!("  Interest saved:     {:.2}", a.interest_saved);
            println!("  Investment value:   {:.2}", a.investment_value);
        }
        CalculationResponse::RuleOf72(years) => println!("Years to double: {:.1}", years),
        CalculationResponse::InflationAdjustedReturn(r) => println!("Real return: {:.2}%", r * 100.0),
        CalculationResponse::Plan(plan) => print_plan(plan),
        CalculationResponse::Scenarios {
            retirement_age,
            risk_tolerance,
        } => {
            println!("Retirement age scenarios");
            retirement_age.iter().for_each(print_scenario);
            println!();
            println!("Risk tolerance scenarios");
            risk_tolerance.iter().for_each(print_scenario);
        }
    }
}

fn print_duration(label: &str, outcome: Outcome<f64>) {
    match outcome {
        Outcome::Finite(years) => println!("{}: {:.1} years", label, years),
        Outcome::Indefinite => println!("{}: indefinitely", label),
        Outcome::Unreachable => println!("{}: never", label),
    }
}

fn print_plan(plan: &RetirementPlan) {
    println!("Retirement plan: age {} to {} ({} portfolio, {:.1}% return)",
        plan.current_age, plan.retirement_age, plan.risk_tolerance, plan.expected_return * 100.0);
    println!("======================\n");
    println!("  Income target:       {:.2} per year", plan.income_target);
    println!("  Required nest egg:   {:.2}", plan.required_nest_egg);
    println!("  Projected savings:   {:.2}", plan.projected_savings);
    println!("  Shortfall:           {:.2}", plan.shortfall);
    println!("  Monthly savings:     {:.2}", plan.required_monthly_savings);
    println!("  On track:            {}", if plan.on_track { "yes" } else { "no" });
    print_duration("  Projected savings last", plan.projected_savings_duration);

    if let Some(fund) = plan.emergency_fund {
        println!("  Emergency fund:      {:.2}", fund);
    }

    println!("\nSafe withdrawal (current savings):");
    for w in &plan.safe_withdrawals {
        println!("  {:>5.1}%: {:.2}", w.rate * 100.0, w.annual_amount);
    }

    println!("\n  Age      Balance  With savings");
    for row in &plan.trajectory {
        println!("  {:>3} {:>12.2} {:>13.2}", row.age, row.balance, row.balance_with_contributions);
    }
}

fn print_scenario(scenario: &Scenario) {
    let plan = &scenario.plan;
    println!(
        "  {:<22} nest egg {:>12.2}  shortfall {:>12.2}  monthly {:>9.2}",
        scenario.label, plan.required_nest_egg, plan.shortfall, plan.required_monthly_savings
    );
}
