use crate::domain::trip::TripContext;
use crate::error::Result;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Reads a trip as the confirming screen would hand it over, in JSON.
pub fn load_trip(path: &Path) -> Result<TripContext> {
    let file = File::open(path)?;
    let trip = serde_json::from_reader(BufReader::new(file))?;
    Ok(trip)
}
