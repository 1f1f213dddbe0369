//! Command line arguments

use chrono::NaiveDate;
use clap::{ArgGroup, Args, Parser, Subcommand};
use std::path::PathBuf;

use neo_db::FilterSet;

#[derive(Debug, Parser)]
#[command(
    name = "neo",
    version,
    about = "Explore past and future close approaches of near-Earth objects"
)]
pub struct Cli {
    /// CSV file of near-Earth objects (overrides the config file)
    #[arg(long, global = true)]
    pub neofile: Option<PathBuf>,

    /// JSON file of close approaches (overrides the config file)
    #[arg(long, global = true)]
    pub cadfile: Option<PathBuf>,

    /// TOML configuration file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Inspect one NEO by primary designation or by name
    Inspect(InspectArgs),
    /// Query close approaches matching a set of criteria
    Query(QueryArgs),
}

#[derive(Debug, Args)]
#[command(group(ArgGroup::new("target").required(true).args(["pdes", "name"])))]
pub struct InspectArgs {
    /// Primary designation of the NEO
    #[arg(short, long)]
    pub pdes: Option<String>,

    /// IAU name of the NEO
    #[arg(short, long)]
    pub name: Option<String>,

    /// Also list the NEO's close approaches
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Debug, Args)]
pub struct QueryArgs {
    /// Only approaches on this date (YYYY-MM-DD)
    #[arg(short, long, value_parser = parse_date)]
    pub date: Option<NaiveDate>,

    /// Only approaches on or after this date (YYYY-MM-DD)
    #[arg(short, long, value_parser = parse_date)]
    pub start_date: Option<NaiveDate>,

    /// Only approaches on or before this date (YYYY-MM-DD)
    #[arg(short, long, value_parser = parse_date)]
    pub end_date: Option<NaiveDate>,

    /// Minimum approach distance in au
    #[arg(long = "min-distance")]
    pub distance_min: Option<f64>,

    /// Maximum approach distance in au
    #[arg(long = "max-distance")]
    pub distance_max: Option<f64>,

    /// Minimum relative velocity in km/s
    #[arg(long = "min-velocity")]
    pub velocity_min: Option<f64>,

    /// Maximum relative velocity in km/s
    #[arg(long = "max-velocity")]
    pub velocity_max: Option<f64>,

    /// Minimum NEO diameter in km
    #[arg(long = "min-diameter")]
    pub diameter_min: Option<f64>,

    /// Maximum NEO diameter in km
    #[arg(long = "max-diameter")]
    pub diameter_max: Option<f64>,

    /// Only potentially hazardous NEOs
    #[arg(long, conflicts_with = "not_hazardous")]
    pub hazardous: bool,

    /// Only NEOs that are not potentially hazardous
    #[arg(long)]
    pub not_hazardous: bool,

    /// Only approaches of the NEO with this designation
    #[arg(long)]
    pub designation: Option<String>,

    /// Only approaches of the NEO with this name
    #[arg(long)]
    pub name: Option<String>,

    /// Maximum number of results (0 = no limit)
    #[arg(short, long)]
    pub limit: Option<usize>,

    /// Write results to a .csv or .json file instead of printing them
    #[arg(short, long)]
    pub outfile: Option<PathBuf>,
}

impl QueryArgs {
    pub fn filter_set(&self) -> FilterSet {
        let hazardous = match (self.hazardous, self.not_hazardous) {
            (true, _) => Some(true),
            (_, true) => Some(false),
            _ => None,
        };

        let mut set = FilterSet::new()
            .between(self.start_date, self.end_date)
            .with_distance(self.distance_min, self.distance_max)
            .with_velocity(self.velocity_min, self.velocity_max)
            .with_diameter(self.diameter_min, self.diameter_max);
        if let Some(date) = self.date {
            set = set.on_date(date);
        }
        if let Some(flag) = hazardous {
            set = set.hazardous(flag);
        }
        set.designation = self.designation.clone();
        set.name = self.name.clone();
        set
    }
}

fn parse_date(value: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|e| format!("'{}' is not a YYYY-MM-DD date: {}", value, e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_query_args_to_filters() {
        let cli = Cli::parse_from([
            "neo",
            "query",
            "--start-date",
            "2020-01-01",
            "--max-distance",
            "0.1",
            "--not-hazardous",
            "--limit",
            "5",
        ]);
        let Command::Query(args) = cli.command else {
            panic!("expected query command");
        };
        let set = args.filter_set();
        assert_eq!(set.start_date, NaiveDate::from_ymd_opt(2020, 1, 1));
        assert_eq!(set.distance_max, Some(0.1));
        assert_eq!(set.hazardous, Some(false));
        assert_eq!(set.build().len(), 3);
        assert_eq!(args.limit, Some(5));
    }

    #[test]
    fn test_date_velocity_and_diameter_flags() {
        let cli = Cli::parse_from([
            "neo",
            "query",
            "--date",
            "2020-01-01",
            "--min-velocity",
            "5",
            "--max-diameter",
            "1.5",
            "--hazardous",
        ]);
        let Command::Query(args) = cli.command else {
            panic!("expected query command");
        };
        let set = args.filter_set();
        assert_eq!(set.date, NaiveDate::from_ymd_opt(2020, 1, 1));
        assert_eq!(set.velocity_min, Some(5.0));
        assert_eq!(set.velocity_max, None);
        assert_eq!(set.diameter_max, Some(1.5));
        assert_eq!(set.hazardous, Some(true));
        assert_eq!(set.build().len(), 4);
    }

    #[test]
    fn test_inspect_requires_target() {
        assert!(Cli::try_parse_from(["neo", "inspect"]).is_err());
        assert!(Cli::try_parse_from(["neo", "inspect", "--pdes", "433", "--name", "Eros"]).is_err());
        assert!(Cli::try_parse_from(["neo", "inspect", "--name", "Eros", "-v"]).is_ok());
    }

    #[test]
    fn test_bad_date_rejected() {
        assert!(Cli::try_parse_from(["neo", "query", "--date", "2020-Jan-01"]).is_err());
    }
}
