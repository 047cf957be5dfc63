//! Command-line interface for the map demo.
//!
//! `mapdemo search` runs one place search around a fixed location and prints
//! the resulting annotations; `mapdemo directions` prints the directions link
//! the navigation launcher would open.
#![forbid(unsafe_code)]

use clap::{Parser, Subcommand};
use mapdemo_core::Coordinate;

mod directions;
mod error;
mod search;
mod terminal;

pub use error::CliError;

use directions::{DirectionsArgs, run_directions};
use search::{SearchArgs, run_search};

pub(crate) const ARG_QUERY: &str = "query";
pub(crate) const ARG_LATITUDE: &str = "latitude";
pub(crate) const ARG_LONGITUDE: &str = "longitude";
pub(crate) const ARG_SPAN_DEGREES: &str = "span-degrees";
pub(crate) const ARG_MAP_TYPE: &str = "map-type";
pub(crate) const ARG_JSON: &str = "json";
pub(crate) const ARG_SEARCH_BASE_URL: &str = "search-base-url";
pub(crate) const ARG_LIMIT: &str = "limit";
pub(crate) const ARG_TO_LATITUDE: &str = "to-latitude";
pub(crate) const ARG_TO_LONGITUDE: &str = "to-longitude";
pub(crate) const ARG_DIRECTIONS_BASE_URL: &str = "directions-base-url";

pub(crate) const ENV_SEARCH_QUERY: &str = "MAPDEMO_CMDS_SEARCH_QUERY";
pub(crate) const ENV_SEARCH_LATITUDE: &str = "MAPDEMO_CMDS_SEARCH_LATITUDE";
pub(crate) const ENV_SEARCH_LONGITUDE: &str = "MAPDEMO_CMDS_SEARCH_LONGITUDE";
pub(crate) const ENV_DIRECTIONS_TO_LATITUDE: &str = "MAPDEMO_CMDS_DIRECTIONS_TO_LATITUDE";
pub(crate) const ENV_DIRECTIONS_TO_LONGITUDE: &str = "MAPDEMO_CMDS_DIRECTIONS_TO_LONGITUDE";

/// Run the map demo CLI with the current process arguments and environment.
///
/// # Errors
///
/// Returns a [`CliError`] when arguments or configuration are invalid, or
/// when the selected command fails.
pub fn run() -> Result<(), CliError> {
    let cli = Cli::try_parse().map_err(CliError::ArgumentParsing)?;
    match cli.command {
        Command::Search(args) => run_search(args),
        Command::Directions(args) => run_directions(args),
    }
}

#[derive(Debug, Parser)]
#[command(
    name = "mapdemo",
    about = "Search for places on a map and hand off directions",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Search for places around a location and list the annotations.
    Search(SearchArgs),
    /// Print the directions link from a location to a destination.
    Directions(DirectionsArgs),
}

/// Validate a latitude/longitude pair.
pub(crate) fn coordinate(
    field: &'static str,
    latitude: f64,
    longitude: f64,
) -> Result<Coordinate, CliError> {
    if (-90.0..=90.0).contains(&latitude) && (-180.0..=180.0).contains(&longitude) {
        Ok(Coordinate {
            x: longitude,
            y: latitude,
        })
    } else {
        Err(CliError::InvalidCoordinate {
            field,
            latitude,
            longitude,
        })
    }
}

/// Check that `value` parses as a URL.
pub(crate) fn require_url(field: &'static str, value: String) -> Result<String, CliError> {
    match url::Url::parse(&value) {
        Ok(_) => Ok(value),
        Err(source) => Err(CliError::InvalidUrl {
            field,
            value,
            source,
        }),
    }
}

#[cfg(test)]
mod tests;
