//! Plan every profile in a CSV file
//!
//! Outputs one summary row per profile; profiles that fail validation are
//! written with their error and skipped from the totals.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use log::warn;
use rayon::prelude::*;

use retirement_planner::profile::{load_profiles, ProfileRecord};
use retirement_planner::projection::{PlanSummary, RetirementPlanner};
use retirement_planner::PlanningAssumptions;

#[derive(Parser)]
#[command(name = "run_plans", about = "Batch retirement plans from a CSV of profiles")]
struct Args {
    /// Input CSV of profiles
    #[arg(default_value = "data/profiles.csv")]
    input: PathBuf,

    /// Output CSV of plan summaries
    #[arg(short, long, default_value = "plan_summaries.csv")]
    output: PathBuf,

    /// Planning assumptions JSON
    #[arg(short, long)]
    assumptions: Option<PathBuf>,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let start = Instant::now();
    println!("Loading profiles from {}...", args.input.display());
    let records = load_profiles(&args.input)
        .with_context(|| format!("failed to load profiles from {}", args.input.display()))?;
    println!("Loaded {} profiles in {:?}", records.len(), start.elapsed());

    let assumptions = match &args.assumptions {
        Some(path) => PlanningAssumptions::from_json_path(path)?,
        None => PlanningAssumptions::load_or_default()?,
    };
    let planner = RetirementPlanner::new(assumptions);

    println!("Running plans...");
    let plan_start = Instant::now();

    // Run plans in parallel
    let results: Vec<(&ProfileRecord, Result<PlanSummary, String>)> = records
        .par_iter()
        .map(|record| {
            let summary = planner
                .plan(&record.profile)
                .map(|plan| plan.summary())
                .map_err(|e| e.to_string());
            (record, summary)
        })
        .collect();

    println!("Plans complete in {:?}", plan_start.elapsed());

    let file = File::create(&args.output)
        .with_context(|| format!("failed to create {}", args.output.display()))?;
    let mut out = BufWriter::new(file);

    writeln!(out, "ProfileID,Age,RetirementAge,RiskTolerance,ExpectedReturn,IncomeTarget,ProjectedSavings,RequiredNestEgg,Shortfall,MonthlySavings,FundingRatio,OnTrack,Error")?;

    let mut planned = 0usize;
    let mut on_track = 0usize;
    let mut total_shortfall = 0.0;

    for (record, result) in &results {
        match result {
            Ok(s) => {
                planned += 1;
                if s.on_track {
                    on_track += 1;
                }
                total_shortfall += s.shortfall;
                writeln!(
                    out,
                    "{},{},{},{},{:.4},{:.2},{:.2},{:.2},{:.2},{:.2},{:.4},{},",
                    record.profile_id,
                    s.current_age,
                    s.retirement_age,
                    s.risk_tolerance,
                    s.expected_return,
                    s.income_target,
                    s.projected_savings,
                    s.required_nest_egg,
                    s.shortfall,
                    s.required_monthly_savings,
                    s.funding_ratio,
                    s.on_track,
                )?;
            }
            Err(message) => {
                warn!("profile {} skipped: {}", record.profile_id, message);
                writeln!(
                    out,
                    "{},{},{},,,,,,,,,,\"{}\"",
                    record.profile_id,
                    record.profile.age,
                    record.profile.retirement_age,
                    message.replace('"', "'"),
                )?;
            }
        }
    }
    out.flush()?;

    println!("Output written to {}", args.output.display());

    println!("\nBatch Summary:");
    println!("  Planned:   {} of {}", planned, results.len());
    println!("  On track:  {}", on_track);
    if planned > 0 {
        println!("  Average shortfall: {:.0}", total_shortfall / planned as f64);
    }

    println!("\nTotal time: {:?}", start.elapsed());
    Ok(())
}
