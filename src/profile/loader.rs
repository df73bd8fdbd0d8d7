//! Load financial profiles from a CSV file
//!
//! Expected columns: `ProfileID, Age, AnnualIncome, CurrentSavings,
//! RetirementAge, RiskTolerance, MonthlyExpenses, MonthlySavings`. The last
//! three may be left empty.

use std::io::Read;
use std::path::Path;

use csv::{Reader, ReaderBuilder};
use serde::{Deserialize, Serialize};

use super::{FinancialProfile, RiskTolerance};
use crate::error::PlanningResult;

/// A profile tagged with the identifier it was loaded under
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileRecord {
    pub profile_id: u32,
    pub profile: FinancialProfile,
}

/// Raw CSV row
#[derive(Debug, Deserialize)]
struct CsvRow {
    #[serde(rename = "ProfileID")]
    profile_id: u32,
    #[serde(rename = "Age")]
    age: u32,
    #[serde(rename = "AnnualIncome")]
    annual_income: f64,
    #[serde(rename = "CurrentSavings")]
    current_savings: f64,
    #[serde(rename = "RetirementAge")]
    retirement_age: u32,
    #[serde(rename = "RiskTolerance", default)]
    risk_tolerance: String,
    #[serde(rename = "MonthlyExpenses", default)]
    monthly_expenses: Option<f64>,
    #[serde(rename = "MonthlySavings", default)]
    monthly_savings: Option<f64>,
}

impl CsvRow {
    fn to_record(self) -> PlanningResult<ProfileRecord> {
        let risk_tolerance = if self.risk_tolerance.trim().is_empty() {
            None
        } else {
            Some(self.risk_tolerance.parse::<RiskTolerance>()?)
        };

        Ok(ProfileRecord {
            profile_id: self.profile_id,
            profile: FinancialProfile {
                age: self.age,
                annual_income: self.annual_income,
                current_savings: self.current_savings,
                retirement_age: self.retirement_age,
                risk_tolerance,
                monthly_expenses: self.monthly_expenses,
                monthly_savings: self.monthly_savings,
            },
        })
    }
}

/// Load all profiles from a CSV file
pub fn load_profiles<P: AsRef<Path>>(path: P) -> PlanningResult<Vec<ProfileRecord>> {
    let reader = csv_reader().from_path(path)?;
    collect_records(reader)
}

/// Load profiles from any CSV source with a header row
pub fn load_profiles_from_reader<R: Read>(source: R) -> PlanningResult<Vec<ProfileRecord>> {
    let reader = csv_reader().from_reader(source);
    collect_records(reader)
}

fn csv_reader() -> ReaderBuilder {
    let mut builder = ReaderBuilder::new();
    builder.trim(csv::Trim::All);
    builder
}

fn collect_records<R: Read>(mut reader: Reader<R>) -> PlanningResult<Vec<ProfileRecord>> {
    let mut records = Vec::new();
    for result in reader.deserialize() {
        let row: CsvRow = result?;
        records.push(row.to_record()?);
    }
    Ok(records)
}
