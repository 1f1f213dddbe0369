//! Close-approach entity and its link to a NEO

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::neo::{NearEarthObject, NeoId};
use super::parse_float;
use super::record::RawApproachRecord;
use crate::error::{Error, Result};

/// Time format of the `cd` field in close-approach data, e.g. `2020-Jan-01 00:00`
pub const CAD_TIME_FORMAT: &str = "%Y-%b-%d %H:%M";

/// Time format used in reports; minutes precision like the input
pub const OUTPUT_TIME_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Parse a close-approach time string
pub fn cd_to_datetime(value: &str) -> std::result::Result<NaiveDateTime, chrono::ParseError> {
    NaiveDateTime::parse_from_str(value.trim(), CAD_TIME_FORMAT)
}

/// Format a time without seconds
pub fn datetime_to_str(time: &NaiveDateTime) -> String {
    time.format(OUTPUT_TIME_FORMAT).to_string()
}

/// Handle of a close approach inside a [`NeoDatabase`](crate::NeoDatabase)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ApproachId(pub(crate) usize);

impl ApproachId {
    /// Position in the database's approach arena
    pub fn index(self) -> usize {
        self.0
    }
}

/// Reference from a close approach to its NEO
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NeoRef {
    /// Freshly constructed, not yet linked
    Pending(String),
    /// Resolved to a NEO in the database
    Linked(NeoId),
    /// No NEO carries this designation
    Unlinked(String),
}

impl NeoRef {
    pub fn neo_id(&self) -> Option<NeoId> {
        match self {
            NeoRef::Linked(id) => Some(*id),
            _ => None,
        }
    }
}

/// A close approach to Earth by a NEO
#[derive(Debug, Clone, PartialEq)]
pub struct CloseApproach {
    time: NaiveDateTime,
    distance: f64,
    velocity: f64,
    neo: NeoRef,
}

impl CloseApproach {
    /// Create an unlinked close approach from typed values
    pub fn new(
        designation: impl Into<String>,
        time: NaiveDateTime,
        distance: f64,
        velocity: f64,
    ) -> Self {
        Self {
            time,
            distance,
            velocity,
            neo: NeoRef::Pending(designation.into()),
        }
    }

    /// Build a close approach from a raw JSON record
    ///
    /// `label` identifies the record in error messages.
    pub fn from_record(record: RawApproachRecord, label: &str) -> Result<Self> {
        let designation = record.des.unwrap_or_default();
        let cd = record.cd.unwrap_or_default();
        let time = cd_to_datetime(&cd).map_err(|e| Error::malformed(label, "cd", cd.as_str(), e))?;
        let distance = parse_float(label, "dist", record.dist.as_deref())?;
        let velocity = parse_float(label, "v_rel", record.v_rel.as_deref())?;

        Ok(Self::new(designation, time, distance, velocity))
    }

    /// Time of closest approach (UTC)
    pub fn time(&self) -> NaiveDateTime {
        self.time
    }

    /// Time of closest approach as `YYYY-MM-DD HH:MM`
    pub fn time_str(&self) -> String {
        datetime_to_str(&self.time)
    }

    /// Nominal approach distance in au, NaN when unknown
    pub fn distance(&self) -> f64 {
        self.distance
    }

    /// Relative approach velocity in km/s, NaN when unknown
    pub fn velocity(&self) -> f64 {
        self.velocity
    }

    pub fn neo(&self) -> &NeoRef {
        &self.neo
    }

    /// Designation captured from the input, while it is still needed
    pub fn raw_designation(&self) -> Option<&str> {
        match &self.neo {
            NeoRef::Pending(des) | NeoRef::Unlinked(des) => Some(des),
            NeoRef::Linked(_) => None,
        }
    }

    /// Resolve the pending reference. Only the first call has any effect.
    pub(crate) fn resolve(&mut self, neo: Option<NeoId>) {
        if let NeoRef::Pending(des) = &mut self.neo {
            let des = std::mem::take(des);
            self.neo = match neo {
                Some(id) => NeoRef::Linked(id),
                None => NeoRef::Unlinked(des),
            };
        }
    }
}

impl TryFrom<RawApproachRecord> for CloseApproach {
    type Error = Error;

    fn try_from(record: RawApproachRecord) -> Result<Self> {
        Self::from_record(record, "<approach>")
    }
}

/// A close approach together with its resolved NEO
#[derive(Debug, Clone, Copy)]
pub struct LinkedApproach<'a> {
    pub id: ApproachId,
    pub approach: &'a CloseApproach,
    pub neo: Option<&'a NearEarthObject>,
}

impl<'a> LinkedApproach<'a> {
    /// Designation of the NEO, whether or not it was found
    pub fn designation(&self) -> &'a str {
        match (self.neo, self.approach.raw_designation()) {
            (Some(neo), _) => neo.designation(),
            (None, Some(des)) => des,
            (None, None) => "",
        }
    }

    /// Full name of the NEO, or the bare designation when unlinked
    pub fn fullname(&self) -> String {
        match self.neo {
            Some(neo) => neo.fullname(),
            None => self.designation().to_string(),
        }
    }
}

impl fmt::Display for LinkedApproach<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "on {} '{}' approaches Earth at a distance of {:.2} au and a velocity of {:.2} km/s.",
            self.approach.time_str(),
            self.fullname(),
            self.approach.distance,
            self.approach.velocity
        )
    }
}
