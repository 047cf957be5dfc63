//! Directions command implementation for the map demo CLI.

use std::io::Write;

use clap::Parser;
use mapdemo_core::{Coordinate, DirectionsDispatcher, InteractionError};
use mapdemo_data::{DEFAULT_DIRECTIONS_BASE_URL, UrlNavigationLauncher};
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};

use crate::terminal::CollectedLinks;
use crate::{
    ARG_DIRECTIONS_BASE_URL, ARG_LATITUDE, ARG_LONGITUDE, ARG_TO_LATITUDE, ARG_TO_LONGITUDE,
    CliError, ENV_DIRECTIONS_TO_LATITUDE, ENV_DIRECTIONS_TO_LONGITUDE, coordinate, require_url,
};

/// CLI arguments for the `directions` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Build driving directions from the current location to a \
                 destination and print the link a browser would open. The \
                 current location is required; without it no directions \
                 can be produced.",
    about = "Print a driving directions link"
)]
#[ortho_config(prefix = "MAPDEMO")]
pub(crate) struct DirectionsArgs {
    /// Latitude of the destination in degrees.
    #[arg(long = ARG_TO_LATITUDE, value_name = "degrees", allow_negative_numbers = true)]
    #[serde(default)]
    pub(crate) to_latitude: Option<f64>,
    /// Longitude of the destination in degrees.
    #[arg(long = ARG_TO_LONGITUDE, value_name = "degrees", allow_negative_numbers = true)]
    #[serde(default)]
    pub(crate) to_longitude: Option<f64>,
    /// Latitude of the current location in degrees.
    #[arg(long = ARG_LATITUDE, value_name = "degrees", allow_negative_numbers = true)]
    #[serde(default)]
    pub(crate) latitude: Option<f64>,
    /// Longitude of the current location in degrees.
    #[arg(long = ARG_LONGITUDE, value_name = "degrees", allow_negative_numbers = true)]
    #[serde(default)]
    pub(crate) longitude: Option<f64>,
    /// OpenStreetMap-compatible site serving the directions page.
    #[arg(long = ARG_DIRECTIONS_BASE_URL, value_name = "url")]
    #[serde(default)]
    pub(crate) directions_base_url: Option<String>,
}

impl DirectionsArgs {
    pub(crate) fn into_config(self) -> Result<DirectionsConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        DirectionsConfig::try_from(merged)
    }
}

/// Resolved `directions` command configuration.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct DirectionsConfig {
    /// Current location; `None` until a fix is known.
    pub(crate) origin: Option<Coordinate>,
    pub(crate) destination: Coordinate,
    pub(crate) base_url: String,
}

impl TryFrom<DirectionsArgs> for DirectionsConfig {
    type Error = CliError;

    fn try_from(args: DirectionsArgs) -> Result<Self, Self::Error> {
        let to_latitude = args.to_latitude.ok_or(CliError::MissingArgument {
            field: ARG_TO_LATITUDE,
            env: ENV_DIRECTIONS_TO_LATITUDE,
        })?;
        let to_longitude = args.to_longitude.ok_or(CliError::MissingArgument {
            field: ARG_TO_LONGITUDE,
            env: ENV_DIRECTIONS_TO_LONGITUDE,
        })?;
        let destination = coordinate("destination", to_latitude, to_longitude)?;

        // A partial location counts as no fix at all.
        let origin = match (args.latitude, args.longitude) {
            (Some(latitude), Some(longitude)) => Some(coordinate("location", latitude, longitude)?),
            _ => None,
        };

        let base_url = require_url(
            ARG_DIRECTIONS_BASE_URL,
            args.directions_base_url
                .unwrap_or_else(|| DEFAULT_DIRECTIONS_BASE_URL.to_owned()),
        )?;

        Ok(Self {
            origin,
            destination,
            base_url,
        })
    }
}

pub(super) fn run_directions(args: DirectionsArgs) -> Result<(), CliError> {
    let mut stdout = std::io::stdout().lock();
    run_directions_with(args, &mut stdout)
}

pub(super) fn run_directions_with(
    args: DirectionsArgs,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    let config = args.into_config()?;
    let origin = config
        .origin
        .ok_or(CliError::Interaction(InteractionError::LocationUnavailable))?;

    let launcher = UrlNavigationLauncher::with_base_url(config.base_url, CollectedLinks::default());
    let mut dispatcher = DirectionsDispatcher::new(launcher);
    dispatcher.dispatch(origin, config.destination);

    dispatcher
        .launcher()
        .opener()
        .links()
        .iter()
        .try_for_each(|link| writeln!(writer, "{link}"))
        .map_err(CliError::WriteOutput)
}
