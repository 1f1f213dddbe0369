//! neo-db: Near-Earth object database with close-approach linking
//!
//! This crate loads NASA/JPL near-Earth object records and close-approach data,
//! links every close approach to the NEO it belongs to, and exposes the linked
//! collection for lookups, filtered queries and CSV/JSON reports.

pub mod config;
pub mod database;
pub mod error;
pub mod ingestion;
pub mod output;
pub mod query;
pub mod types;

pub use config::NeoConfig;
pub use database::{LinkReport, NeoDatabase};
pub use error::{Error, Result};
pub use ingestion::{load_approaches, load_neos};
pub use output::{write_results, ApproachRecord, NeoRecord, OutputFormat};
pub use query::{limit, ApproachFilter, ApproachQuery, Comparison, FilterSet};
pub use types::{
    approach::{ApproachId, CloseApproach, LinkedApproach, NeoRef},
    neo::{NearEarthObject, NeoId},
    record::{RawApproachRecord, RawNeoRecord},
};
