//! JSON-based assumption loader
//!
//! Loads planning assumptions from data/assumptions.json, or any path given

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use log::info;

use super::PlanningAssumptions;
use crate::error::PlanningResult;

/// Default path to the assumptions file
pub const DEFAULT_ASSUMPTIONS_PATH: &str = "data/assumptions.json";

/// Read assumptions from a JSON file without validating them
pub fn load_assumptions(path: &Path) -> PlanningResult<PlanningAssumptions> {
    let file = File::open(path)?;
    let assumptions = serde_json::from_reader(BufReader::new(file))?;
    info!("loaded planning assumptions from {}", path.display());
    Ok(assumptions)
}

/// Write assumptions as pretty-printed JSON (useful as an override template)
pub fn write_assumptions(path: &Path, assumptions: &PlanningAssumptions) -> PlanningResult<()> {
    let file = File::create(path)?;
    serde_json::to_writer_pretty(file, assumptions)?;
    Ok(())
}
