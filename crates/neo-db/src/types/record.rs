//! Raw input records as they come out of the CSV and JSON sources
//!
//! Every field is an optional string; coercion to typed values happens in the
//! entity constructors. Keys that are not listed here are ignored.

use serde::Deserialize;

/// One row of the NEO CSV file
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct RawNeoRecord {
    /// Primary designation
    #[serde(default)]
    pub pdes: Option<String>,
    /// IAU name
    #[serde(default)]
    pub name: Option<String>,
    /// Diameter in km
    #[serde(default)]
    pub diameter: Option<String>,
    /// Potentially hazardous flag ("Y"/"N")
    #[serde(default)]
    pub pha: Option<String>,
}

impl<K: AsRef<str>, V: Into<String>> FromIterator<(K, V)> for RawNeoRecord {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut record = Self::default();
        for (key, value) in iter {
            match key.as_ref() {
                "pdes" => record.pdes = Some(value.into()),
                "name" => record.name = Some(value.into()),
                "diameter" => record.diameter = Some(value.into()),
                "pha" => record.pha = Some(value.into()),
                _ => {}
            }
        }
        record
    }
}

/// One row of the close-approach JSON file
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct RawApproachRecord {
    /// Designation of the approaching NEO
    #[serde(default)]
    pub des: Option<String>,
    /// Close-approach time, `YYYY-Mon-DD HH:MM`
    #[serde(default)]
    pub cd: Option<String>,
    /// Nominal approach distance in au
    #[serde(default)]
    pub dist: Option<String>,
    /// Relative velocity in km/s
    #[serde(default)]
    pub v_rel: Option<String>,
}

impl<K: AsRef<str>, V: Into<String>> FromIterator<(K, V)> for RawApproachRecord {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut record = Self::default();
        for (key, value) in iter {
            match key.as_ref() {
                "des" => record.des = Some(value.into()),
                "cd" => record.cd = Some(value.into()),
                "dist" => record.dist = Some(value.into()),
                "v_rel" => record.v_rel = Some(value.into()),
                _ => {}
            }
        }
        record
    }
}
