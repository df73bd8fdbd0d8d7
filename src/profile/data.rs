//! Structured financial profile consumed by the planner

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{PlanningError, PlanningResult};
use crate::formulas::guards;
use crate::planning::{MAX_AGE, MIN_AGE};

/// Investor risk tolerance, which selects the expected return
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskTolerance {
    Conservative,
    #[default]
    Moderate,
    Aggressive,
}

impl RiskTolerance {
    pub const ALL: [RiskTolerance; 3] = [
        RiskTolerance::Conservative,
        RiskTolerance::Moderate,
        RiskTolerance::Aggressive,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RiskTolerance::Conservative => "conservative",
            RiskTolerance::Moderate => "moderate",
            RiskTolerance::Aggressive => "aggressive",
        }
    }
}

impl fmt::Display for RiskTolerance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RiskTolerance {
    type Err = PlanningError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "conservative" => Ok(RiskTolerance::Conservative),
            "moderate" => Ok(RiskTolerance::Moderate),
            "aggressive" => Ok(RiskTolerance::Aggressive),
            other => Err(PlanningError::Config(format!("unknown risk tolerance: {}", other))),
        }
    }
}

/// A user's financial situation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinancialProfile {
    pub age: u32,
    pub annual_income: f64,
    pub current_savings: f64,
    /// Target retirement age
    pub retirement_age: u32,

    /// Unspecified tolerance is planned as moderate
    #[serde(default)]
    pub risk_tolerance: Option<RiskTolerance>,

    #[serde(default)]
    pub monthly_expenses: Option<f64>,

    #[serde(default)]
    pub monthly_savings: Option<f64>,
}

impl FinancialProfile {
    pub fn new(age: u32, annual_income: f64, current_savings: f64, retirement_age: u32) -> Self {
        Self {
            age,
            annual_income,
            current_savings,
            retirement_age,
            risk_tolerance: None,
            monthly_expenses: None,
            monthly_savings: None,
        }
    }

    pub fn with_risk_tolerance(mut self, tolerance: RiskTolerance) -> Self {
        self.risk_tolerance = Some(tolerance);
        self
    }

    pub fn with_monthly_expenses(mut self, expenses: f64) -> Self {
        self.monthly_expenses = Some(expenses);
        self
    }

    pub fn with_monthly_savings(mut self, savings: f64) -> Self {
        self.monthly_savings = Some(savings);
        self
    }

    pub fn risk_tolerance_or_default(&self) -> RiskTolerance {
        self.risk_tolerance.unwrap_or_default()
    }

    pub fn years_to_retirement(&self) -> u32 {
        self.retirement_age.saturating_sub(self.age)
    }

    pub fn validate(&self) -> PlanningResult<()> {
        guards::within("age", "must be between 18 and 100", self.age as f64, MIN_AGE as f64, MAX_AGE as f64)?;
        guards::positive("annual_income", self.annual_income)?;
        guards::non_negative("current_savings", self.current_savings)?;
        if self.retirement_age <= self.age || self.retirement_age > MAX_AGE {
            return Err(PlanningError::invalid(
                "retirement_age",
                "must be after the current age and no later than 100",
                self.retirement_age as f64,
            ));
        }
        if let Some(expenses) = self.monthly_expenses {
            guards::positive("monthly_expenses", expenses)?;
        }
        if let Some(savings) = self.monthly_savings {
            guards::non_negative("monthly_savings", savings)?;
        }
        Ok(())
    }

    /// Fields whose values are valid but outside typical ranges
    pub fn implausible_fields(&self) -> Vec<FieldKind> {
        let checks = [
            (FieldKind::Age, self.age as f64),
            (FieldKind::Income, self.annual_income),
            (FieldKind::Savings, self.current_savings),
            (FieldKind::RetirementAge, self.retirement_age as f64),
        ];
        checks
            .iter()
            .filter(|(kind, value)| !kind.is_reasonable(*value))
            .map(|(kind, _)| *kind)
            .collect()
    }
}

/// Kinds of planning inputs with a plausible range
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    Age,
    Income,
    Savings,
    RetirementAge,
    ReturnRate,
    InflationRate,
    Percentage,
}

impl FieldKind {
    /// Inclusive plausible range
    pub fn range(&self) -> (f64, f64) {
        match self {
            FieldKind::Age => (18.0, 100.0),
            FieldKind::Income => (10_000.0, 10_000_000.0),
            FieldKind::Savings => (0.0, 100_000_000.0),
            FieldKind::RetirementAge => (50.0, 85.0),
            FieldKind::ReturnRate => (-0.5, 0.3),
            FieldKind::InflationRate => (0.0, 0.15),
            FieldKind::Percentage => (0.0, 1.0),
        }
    }

    pub fn is_reasonable(&self, value: f64) -> bool {
        let (min, max) = self.range();
        (min..=max).contains(&value)
    }
}
