//! CSV and JSON reports of close-approach query results

use serde::Serialize;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::error::{Error, Result};
use crate::types::LinkedApproach;

/// Name written for NEOs without an IAU name
pub const ABSENT_NAME: &str = "None";

/// Serialized NEO nested in an approach record
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NeoRecord {
    pub designation: String,
    pub name: String,
    pub diameter_km: f64,
    pub potentially_hazardous: bool,
}

/// Serialized close approach
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ApproachRecord {
    pub datetime_utc: String,
    pub distance_au: f64,
    pub velocity_km_s: f64,
    pub neo: NeoRecord,
}

/// Flat CSV row: the approach columns followed by the NEO columns
#[derive(Debug, Serialize)]
struct CsvRow<'r> {
    datetime_utc: &'r str,
    distance_au: f64,
    velocity_km_s: f64,
    designation: &'r str,
    name: &'r str,
    diameter_km: f64,
    potentially_hazardous: bool,
}

impl<'r> From<&'r ApproachRecord> for CsvRow<'r> {
    fn from(record: &'r ApproachRecord) -> Self {
        Self {
            datetime_utc: &record.datetime_utc,
            distance_au: record.distance_au,
            velocity_km_s: record.velocity_km_s,
            designation: &record.neo.designation,
            name: &record.neo.name,
            diameter_km: record.neo.diameter_km,
            potentially_hazardous: record.neo.potentially_hazardous,
        }
    }
}

impl LinkedApproach<'_> {
    /// Flatten into the report record
    ///
    /// An unlinked approach reports its raw designation with unknown physical
    /// attributes.
    pub fn serialize(&self) -> ApproachRecord {
        let neo = match self.neo {
            Some(neo) => NeoRecord {
                designation: neo.designation().to_string(),
                name: neo.name().unwrap_or(ABSENT_NAME).to_string(),
                diameter_km: neo.diameter(),
                potentially_hazardous: neo.hazardous(),
            },
            None => NeoRecord {
                designation: self.designation().to_string(),
                name: ABSENT_NAME.to_string(),
                diameter_km: f64::NAN,
                potentially_hazardous: false,
            },
        };

        ApproachRecord {
            datetime_utc: self.approach.time_str(),
            distance_au: self.approach.distance(),
            velocity_km_s: self.approach.velocity(),
            neo,
        }
    }
}

/// Report file formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Csv,
    Json,
}

impl OutputFormat {
    /// Pick the format from a file extension
    pub fn from_path(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .map(|e| e.to_string_lossy().to_lowercase())
            .unwrap_or_default();
        match ext.as_str() {
            "csv" => Ok(OutputFormat::Csv),
            "json" => Ok(OutputFormat::Json),
            _ => Err(Error::UnsupportedOutput(path.display().to_string())),
        }
    }
}

/// Write results as CSV with a header row
pub fn write_csv<'a, W, I>(writer: W, results: I) -> Result<usize>
where
    W: Write,
    I: IntoIterator<Item = LinkedApproach<'a>>,
{
    let mut writer = csv::Writer::from_writer(writer);
    let mut count = 0;
    for linked in results {
        let record = linked.serialize();
        writer.serialize(CsvRow::from(&record))?;
        count += 1;
    }
    if count == 0 {
        writer.write_record([
            "datetime_utc",
            "distance_au",
            "velocity_km_s",
            "designation",
            "name",
            "diameter_km",
            "potentially_hazardous",
        ])?;
    }
    writer.flush()?;
    Ok(count)
}

/// Write results as a pretty-printed JSON array
pub fn write_json<'a, W, I>(mut writer: W, results: I) -> Result<usize>
where
    W: Write,
    I: IntoIterator<Item = LinkedApproach<'a>>,
{
    let records: Vec<ApproachRecord> = results.into_iter().map(|l| l.serialize()).collect();
    serde_json::to_writer_pretty(&mut writer, &records)?;
    writer.write_all(b"\n")?;
    writer.flush()?;
    Ok(records.len())
}

/// Write results to `path`, choosing CSV or JSON by its extension
pub fn write_results<'a, P, I>(path: P, results: I) -> Result<usize>
where
    P: AsRef<Path>,
    I: IntoIterator<Item = LinkedApproach<'a>>,
{
    let path = path.as_ref();
    let format = OutputFormat::from_path(path)?;
    let file = BufWriter::new(File::create(path)?);

    let count = match format {
        OutputFormat::Csv => write_csv(file, results)?,
        OutputFormat::Json => write_json(file, results)?,
    };
    tracing::info!("Wrote {} close approaches to {}", count, path.display());
    Ok(count)
}
