//! Core entity types

pub mod approach;
pub mod neo;
pub mod record;

pub use approach::{
    cd_to_datetime, datetime_to_str, ApproachId, CloseApproach, LinkedApproach, NeoRef,
    CAD_TIME_FORMAT, OUTPUT_TIME_FORMAT,
};
pub use neo::{NearEarthObject, NeoId};
pub use record::{RawApproachRecord, RawNeoRecord};

use crate::error::{Error, Result};

/// Coerce an optional string field to `f64`, mapping absent or blank input to NaN
pub(crate) fn parse_float(record: &str, key: &str, value: Option<&str>) -> Result<f64> {
    match value.map(str::trim) {
        None | Some("") => Ok(f64::NAN),
        Some(raw) => raw
            .parse::<f64>()
            .map_err(|e| Error::malformed(record, key, raw, e)),
    }
}
