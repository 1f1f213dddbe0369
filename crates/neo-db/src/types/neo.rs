//! Near-Earth object entity

use serde::{Deserialize, Serialize};
use std::fmt;

use super::approach::ApproachId;
use super::parse_float;
use super::record::RawNeoRecord;
use crate::error::{Error, Result};

/// Handle of a NEO inside a [`NeoDatabase`](crate::NeoDatabase)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NeoId(pub(crate) usize);

impl NeoId {
    /// Position in the database's NEO arena
    pub fn index(self) -> usize {
        self.0
    }
}

/// A near-Earth object
///
/// Carries the primary designation (required, unique), the IAU name (optional),
/// the diameter in km (NaN when unknown) and whether the object is flagged as
/// potentially hazardous. The approach list starts empty and is filled once
/// while the database links close approaches.
#[derive(Debug, Clone, PartialEq)]
pub struct NearEarthObject {
    designation: String,
    name: Option<String>,
    diameter: f64,
    hazardous: bool,
    approaches: Vec<ApproachId>,
}

impl NearEarthObject {
    /// Create a NEO from already typed values
    pub fn new(
        designation: impl Into<String>,
        name: Option<String>,
        diameter: f64,
        hazardous: bool,
    ) -> Self {
        Self {
            designation: designation.into(),
            name: name.filter(|n| !n.is_empty()),
            diameter,
            hazardous,
            approaches: Vec::new(),
        }
    }

    /// Build a NEO from a raw CSV record
    ///
    /// `label` identifies the record in error messages (e.g. `neos.csv row 12`).
    pub fn from_record(record: RawNeoRecord, label: &str) -> Result<Self> {
        let designation = record
            .pdes
            .filter(|d| !d.trim().is_empty())
            .ok_or_else(|| Error::missing_key(label, "pdes"))?;
        let diameter = parse_float(label, "diameter", record.diameter.as_deref())?;
        let hazardous = record
            .pha
            .as_deref()
            .is_some_and(|flag| flag.eq_ignore_ascii_case("y"));

        Ok(Self::new(designation, record.name, diameter, hazardous))
    }

    pub fn designation(&self) -> &str {
        &self.designation
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Diameter in kilometers, NaN when unknown
    pub fn diameter(&self) -> f64 {
        self.diameter
    }

    pub fn hazardous(&self) -> bool {
        self.hazardous
    }

    /// Handles of this NEO's close approaches, in input order
    pub fn approaches(&self) -> &[ApproachId] {
        &self.approaches
    }

    /// Designation followed by the name, when there is one
    pub fn fullname(&self) -> String {
        match &self.name {
            Some(name) => format!("{} {}", self.designation, name),
            None => self.designation.clone(),
        }
    }

    pub(crate) fn push_approach(&mut self, id: ApproachId) {
        self.approaches.push(id);
    }

    /// Drop handles that belong to another database
    pub(crate) fn clear_approaches(&mut self) {
        self.approaches.clear();
    }

    /// Overwrite the physical attributes with those of a later duplicate record
    pub(crate) fn replace_attributes(&mut self, other: NearEarthObject) {
        self.name = other.name;
        self.diameter = other.diameter;
        self.hazardous = other.hazardous;
    }
}

impl TryFrom<RawNeoRecord> for NearEarthObject {
    type Error = Error;

    fn try_from(record: RawNeoRecord) -> Result<Self> {
        Self::from_record(record, "<neo>")
    }
}

impl fmt::Display for NearEarthObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} has a diameter of {:.3} km and is {}potentially hazardous.",
            self.fullname(),
            self.diameter,
            if self.hazardous { "" } else { "not " }
        )
    }
}
