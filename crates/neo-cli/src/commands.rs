//! Subcommand implementations

use anyhow::{bail, Context, Result};
use std::io::Write;

use neo_db::{limit, load_approaches, load_neos, write_results, NeoConfig, NeoDatabase};

use crate::cli::{Cli, InspectArgs, QueryArgs};

/// Resolve the configuration from the optional file and command line overrides
pub fn load_config(cli: &Cli) -> Result<NeoConfig> {
    let mut config = match &cli.config {
        Some(path) => NeoConfig::from_file(path)
            .with_context(|| format!("Failed to load configuration from {}", path.display()))?,
        None => NeoConfig::default(),
    };

    if let Some(path) = &cli.neofile {
        config.data.neo_path = path.clone();
    }
    if let Some(path) = &cli.cadfile {
        config.data.cad_path = path.clone();
    }
    Ok(config)
}

/// Load both data files and link them
pub fn build_database(config: &NeoConfig) -> Result<NeoDatabase> {
    let neos = load_neos(&config.data.neo_path)
        .with_context(|| format!("Failed to load NEOs from {}", config.data.neo_path.display()))?;
    let approaches = load_approaches(&config.data.cad_path).with_context(|| {
        format!(
            "Failed to load close approaches from {}",
            config.data.cad_path.display()
        )
    })?;

    NeoDatabase::with_config(neos, approaches, &config.linking).context("Failed to link NEO data")
}

pub fn inspect<W: Write>(db: &NeoDatabase, args: &InspectArgs, out: &mut W) -> Result<()> {
    let neo = match (&args.pdes, &args.name) {
        (Some(pdes), _) => db.get_neo_by_designation(pdes),
        (None, Some(name)) => db.get_neo_by_name(name),
        (None, None) => None,
    };

    let Some(neo) = neo else {
        bail!("No matching NEOs exist in the database.");
    };

    writeln!(out, "{}", neo)?;
    if args.verbose {
        for approach in db.approaches_for(neo) {
            writeln!(out, "- {}", approach)?;
        }
    }
    Ok(())
}

pub fn query<W: Write>(
    db: &NeoDatabase,
    args: &QueryArgs,
    config: &NeoConfig,
    out: &mut W,
) -> Result<()> {
    let filters = args.filter_set().build();
    tracing::debug!("Query filters: {:?}", filters);
    let results = db.query(&filters);

    match &args.outfile {
        Some(path) => {
            let count = write_results(path, limit(results, args.limit))
                .with_context(|| format!("Failed to write results to {}", path.display()))?;
            tracing::info!("{} matching close approaches written", count);
        }
        None => {
            let n = args.limit.or(Some(config.query.default_limit));
            for approach in limit(results, n) {
                writeln!(out, "{}", approach)?;
            }
        }
    }
    Ok(())
}
