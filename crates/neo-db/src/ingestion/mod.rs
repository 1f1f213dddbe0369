//! Loaders for the NEO CSV file and the close-approach JSON file

mod extract;

pub use extract::{load_approaches, load_neos, read_approaches, read_neos, CadDocument};
