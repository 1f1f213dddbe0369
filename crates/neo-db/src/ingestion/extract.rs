//! Extract NEOs from CSV and close approaches from JSON
//!
//! The NEO file is a CSV with a header row (`pdes`, `name`, `diameter`, `pha`
//! and many more columns that are ignored). The close-approach file is the
//! JPL CAD API layout: a `fields` array naming the columns and a `data` array
//! of rows whose values are strings or null.

use serde::Deserialize;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use crate::error::{Error, Result};
use crate::types::{CloseApproach, NearEarthObject, RawApproachRecord, RawNeoRecord};

/// Close-approach document as served by the JPL CAD API
#[derive(Debug, Clone, Deserialize)]
pub struct CadDocument {
    /// Column names, in row order
    pub fields: Vec<String>,
    /// Rows of values zipped with `fields`
    #[serde(default)]
    pub data: Vec<Vec<serde_json::Value>>,
}

impl CadDocument {
    /// Raw records, one per data row; null values count as absent
    pub fn records(&self) -> impl Iterator<Item = RawApproachRecord> + '_ {
        self.data.iter().map(move |row| {
            self.fields
                .iter()
                .zip(row.iter())
                .filter_map(|(field, value)| match value {
                    serde_json::Value::Null => None,
                    serde_json::Value::String(s) => Some((field.as_str(), s.clone())),
                    other => Some((field.as_str(), other.to_string())),
                })
                .collect()
        })
    }
}

fn open(path: &Path) -> Result<BufReader<File>> {
    let file = File::open(path).map_err(|e| {
        std::io::Error::new(e.kind(), format!("{}: {}", path.display(), e))
    })?;
    Ok(BufReader::new(file))
}

fn source_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Read near-Earth objects from a CSV file
pub fn load_neos<P: AsRef<Path>>(path: P) -> Result<Vec<NearEarthObject>> {
    let path = path.as_ref();
    let neos = read_neos(open(path)?, &source_name(path))?;
    tracing::info!("Loaded {} NEOs from {}", neos.len(), path.display());
    Ok(neos)
}

/// Read near-Earth objects from any CSV source
///
/// `source` names the input in error messages.
pub fn read_neos<R: Read>(reader: R, source: &str) -> Result<Vec<NearEarthObject>> {
    let mut reader = csv::Reader::from_reader(reader);
    let mut neos = Vec::new();

    for (index, row) in reader.deserialize::<RawNeoRecord>().enumerate() {
        let label = format!("{} row {}", source, index + 1);
        let record = row.map_err(|e| Error::malformed(label.as_str(), "<row>", "", e))?;
        neos.push(NearEarthObject::from_record(record, &label)?);
    }

    Ok(neos)
}

/// Read close approaches from a JSON file
pub fn load_approaches<P: AsRef<Path>>(path: P) -> Result<Vec<CloseApproach>> {
    let path = path.as_ref();
    let approaches = read_approaches(open(path)?, &source_name(path))?;
    tracing::info!("Loaded {} close approaches from {}", approaches.len(), path.display());
    Ok(approaches)
}

/// Read close approaches from any JSON source
pub fn read_approaches<R: Read>(reader: R, source: &str) -> Result<Vec<CloseApproach>> {
    let document: CadDocument = serde_json::from_reader(reader)?;

    document
        .records()
        .enumerate()
        .map(|(index, record)| {
            CloseApproach::from_record(record, &format!("{} row {}", source, index + 1))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const NEOS_CSV: &str = "\
id,spkid,full_name,pdes,name,prefix,neo,pha,diameter,albedo
a0000433,2000433,\"   433 Eros (A898 PA)\",433,Eros,,Y,N,16.84,0.25
bK20F00K,54000001,\"       (2020 FK)\",2020 FK,,,Y,Y,,
";

    const CAD_JSON: &str = r#"{
        "signature": {"source": "NASA/JPL SBDB Close Approach Data API", "version": "1.1"},
        "count": "3",
        "fields": ["des", "orbit_id", "jd", "cd", "dist", "dist_min", "dist_max", "v_rel", "v_inf", "t_sigma_f", "h"],
        "data": [
            ["433", "659", "2451545.5", "2000-Jan-01 00:00", "0.15", "0.14", "0.16", "12.0", "11.9", "< 00:01", "10.4"],
            ["2020 FK", "3", "2458938.2", "2020-Mar-25 16:33", "", "0.0", "0.1", null, null, "00:05", "27.0"],
            ["1999 XX", "1", "2451546.0", "2000-Jan-02 12:00", "0.3", "0.2", "0.4", "5.5", "5.4", "00:02", null]
        ]
    }"#;

    #[test]
    fn test_read_neos() {
        let neos = read_neos(NEOS_CSV.as_bytes(), "neos.csv").unwrap();
        assert_eq!(neos.len(), 2);
        assert_eq!(neos[0].fullname(), "433 Eros");
        assert_eq!(neos[0].diameter(), 16.84);
        assert!(!neos[0].hazardous());
        assert_eq!(neos[1].name(), None);
        assert!(neos[1].diameter().is_nan());
        assert!(neos[1].hazardous());
    }

    #[test]
    fn test_read_neos_missing_designation_names_row() {
        let csv = "pdes,name,diameter,pha\n433,Eros,16.84,N\n,Nameless,,N\n";
        let err = read_neos(csv.as_bytes(), "neos.csv").unwrap_err();
        assert_eq!(err.to_string(), "Record neos.csv row 2: missing required key 'pdes'");
    }

    #[test]
    fn test_read_neos_without_pdes_column() {
        let csv = "name,diameter\nEros,16.84\n";
        let err = read_neos(csv.as_bytes(), "neos.csv").unwrap_err();
        assert!(matches!(err, Error::MissingKey { .. }));
    }

    #[test]
    fn test_read_approaches() {
        let approaches = read_approaches(CAD_JSON.as_bytes(), "cad.json").unwrap();
        assert_eq!(approaches.len(), 3);
        assert_eq!(approaches[0].raw_designation(), Some("433"));
        assert_eq!(approaches[0].distance(), 0.15);
        assert_eq!(approaches[0].velocity(), 12.0);
        assert!(approaches[1].distance().is_nan());
        assert!(approaches[1].velocity().is_nan());
        assert_eq!(approaches[2].time_str(), "2000-01-02 12:00");
    }

    #[test]
    fn test_read_approaches_bad_date_names_row() {
        let json = r#"{"fields": ["des", "cd"], "data": [["433", "2000-Jan-01 00:00"], ["433", "yesterday"]]}"#;
        let err = read_approaches(json.as_bytes(), "cad.json").unwrap_err();
        match err {
            Error::MalformedRecord { record, key, value, .. } => {
                assert_eq!(record, "cad.json row 2");
                assert_eq!(key, "cd");
                assert_eq!(value, "yesterday");
            }
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn test_numeric_json_values_are_accepted() {
        let json = r#"{"fields": ["des", "cd", "dist"], "data": [["433", "2000-Jan-01 00:00", 0.25]]}"#;
        let approaches = read_approaches(json.as_bytes(), "cad.json").unwrap();
        assert_eq!(approaches[0].distance(), 0.25);
    }

    #[test]
    fn test_invalid_json() {
        let err = read_approaches("[1, 2".as_bytes(), "cad.json").unwrap_err();
        assert!(matches!(err, Error::Json(_)));
    }

    #[test]
    fn test_load_from_files() {
        let dir = tempfile::tempdir().unwrap();
        let neo_path = dir.path().join("neos.csv");
        let cad_path = dir.path().join("cad.json");
        File::create(&neo_path).unwrap().write_all(NEOS_CSV.as_bytes()).unwrap();
        File::create(&cad_path).unwrap().write_all(CAD_JSON.as_bytes()).unwrap();

        assert_eq!(load_neos(&neo_path).unwrap().len(), 2);
        assert_eq!(load_approaches(&cad_path).unwrap().len(), 3);

        let err = load_neos(dir.path().join("missing.csv")).unwrap_err();
        assert!(matches!(err, Error::Io(_)));
        assert!(err.to_string().contains("missing.csv"));
    }
}
