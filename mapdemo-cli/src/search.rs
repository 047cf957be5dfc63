//! Search command implementation for the map demo CLI.

use std::io::Write;

use clap::Parser;
use mapdemo_core::{
    Annotation, Coordinate, LocationEvent, MapController, MapEvent, MapType, PlaceSearchProvider,
    SearchOutcome, Span, Viewport,
};
use mapdemo_data::{HttpPlaceSearchProvider, HttpPlaceSearchProviderConfig, UrlNavigationLauncher};
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};

use crate::terminal::{CollectedLinks, FixedLocationProvider, TerminalSurface, region_line};
use crate::{
    ARG_JSON, ARG_LATITUDE, ARG_LIMIT, ARG_LONGITUDE, ARG_MAP_TYPE, ARG_QUERY,
    ARG_SEARCH_BASE_URL, ARG_SPAN_DEGREES, CliError, ENV_SEARCH_LATITUDE, ENV_SEARCH_LONGITUDE,
    ENV_SEARCH_QUERY, coordinate, require_url,
};

/// Span shown when none is configured, in degrees.
const DEFAULT_SPAN_DEGREES: f64 = 0.05;

/// CLI arguments for the `search` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Search for places matching a free-text query inside a map \
                 region centred on the given location. Matches are listed \
                 one per line with their phone number and coordinates, \
                 followed by the region fitted around them.",
    about = "Search for places around a location"
)]
#[ortho_config(prefix = "MAPDEMO")]
pub(crate) struct SearchArgs {
    /// Free-text query, e.g. "coffee".
    #[arg(value_name = "query")]
    #[serde(default)]
    pub(crate) query: Option<String>,
    /// Latitude of the current location in degrees.
    #[arg(long = ARG_LATITUDE, value_name = "degrees", allow_negative_numbers = true)]
    #[serde(default)]
    pub(crate) latitude: Option<f64>,
    /// Longitude of the current location in degrees.
    #[arg(long = ARG_LONGITUDE, value_name = "degrees", allow_negative_numbers = true)]
    #[serde(default)]
    pub(crate) longitude: Option<f64>,
    /// Height and width of the searched region in degrees.
    #[arg(long = ARG_SPAN_DEGREES, value_name = "degrees")]
    #[serde(default)]
    pub(crate) span_degrees: Option<f64>,
    /// Map type: standard, satellite or hybrid.
    #[arg(long = ARG_MAP_TYPE, value_name = "type")]
    #[serde(default)]
    pub(crate) map_type: Option<String>,
    /// Print a JSON report instead of text lines.
    #[arg(long = ARG_JSON)]
    #[serde(default)]
    pub(crate) json: bool,
    /// Base URL for the Nominatim service.
    #[arg(long = ARG_SEARCH_BASE_URL, value_name = "url")]
    #[serde(default)]
    pub(crate) search_base_url: Option<String>,
    /// Maximum number of places to return.
    #[arg(long = ARG_LIMIT, value_name = "count")]
    #[serde(default)]
    pub(crate) limit: Option<u32>,
}

impl SearchArgs {
    pub(crate) fn into_config(self) -> Result<SearchConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        SearchConfig::try_from(merged)
    }
}

/// Resolved `search` command configuration.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct SearchConfig {
    pub(crate) query: String,
    /// The fixed current location.
    pub(crate) location: Coordinate,
    /// Region the search is confined to, centred on `location`.
    pub(crate) viewport: Viewport,
    pub(crate) map_type: MapType,
    pub(crate) json: bool,
    pub(crate) search_base_url: String,
    pub(crate) limit: Option<u32>,
}

impl TryFrom<SearchArgs> for SearchConfig {
    type Error = CliError;

    fn try_from(args: SearchArgs) -> Result<Self, Self::Error> {
        let query = args.query.ok_or(CliError::MissingArgument {
            field: ARG_QUERY,
            env: ENV_SEARCH_QUERY,
        })?;
        let latitude = args.latitude.ok_or(CliError::MissingArgument {
            field: ARG_LATITUDE,
            env: ENV_SEARCH_LATITUDE,
        })?;
        let longitude = args.longitude.ok_or(CliError::MissingArgument {
            field: ARG_LONGITUDE,
            env: ENV_SEARCH_LONGITUDE,
        })?;
        let location = coordinate("location", latitude, longitude)?;

        let span = args.span_degrees.unwrap_or(DEFAULT_SPAN_DEGREES);
        let viewport =
            Viewport::new(location, Span::new(span, span)).map_err(CliError::InvalidRegion)?;

        let map_type = args
            .map_type
            .as_deref()
            .map_or(Ok(MapType::default()), parse_map_type)?;

        let default_base_url = HttpPlaceSearchProviderConfig::default().base_url;
        let search_base_url = require_url(
            ARG_SEARCH_BASE_URL,
            args.search_base_url.unwrap_or(default_base_url),
        )?;

        Ok(Self {
            query,
            location,
            viewport,
            map_type,
            json: args.json,
            search_base_url,
            limit: args.limit,
        })
    }
}

/// Resolve a map type by name, ignoring case.
pub(crate) fn parse_map_type(value: &str) -> Result<MapType, CliError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "standard" => Ok(MapType::Standard),
        "satellite" => Ok(MapType::Satellite),
        "hybrid" => Ok(MapType::Hybrid),
        _ => Err(CliError::InvalidMapType {
            value: value.to_owned(),
        }),
    }
}

/// Builds the place search provider for a search invocation.
pub(crate) trait SearchProviderBuilder {
    type Provider: PlaceSearchProvider;

    fn build(&self, config: &SearchConfig) -> Result<Self::Provider, CliError>;
}

pub(crate) struct HttpSearchProviderBuilder;

impl SearchProviderBuilder for HttpSearchProviderBuilder {
    type Provider = HttpPlaceSearchProvider;

    fn build(&self, config: &SearchConfig) -> Result<Self::Provider, CliError> {
        let mut provider_config = HttpPlaceSearchProviderConfig::new(&config.search_base_url);
        if let Some(limit) = config.limit {
            provider_config = provider_config.with_limit(limit);
        }
        HttpPlaceSearchProvider::with_config(provider_config).map_err(|source| {
            CliError::BuildSearchProvider {
                base_url: config.search_base_url.clone(),
                source,
            }
        })
    }
}

/// JSON shape of `--json` output.
#[derive(Debug, Serialize)]
struct SearchReport<'a> {
    query: &'a str,
    map_type: MapType,
    viewport: Viewport,
    annotations: &'a [Annotation],
}

type CliController<P, W> = MapController<
    P,
    TerminalSurface<W>,
    FixedLocationProvider,
    UrlNavigationLauncher<CollectedLinks>,
    CollectedLinks,
>;

pub(super) fn run_search(args: SearchArgs) -> Result<(), CliError> {
    let mut stdout = std::io::stdout().lock();
    run_search_with(args, &HttpSearchProviderBuilder, &mut stdout).map(|_| ())
}

pub(super) fn run_search_with<B: SearchProviderBuilder>(
    args: SearchArgs,
    builder: &B,
    writer: &mut dyn Write,
) -> Result<SearchOutcome, CliError> {
    let config = args.into_config()?;
    let provider = builder.build(&config)?;
    if config.json {
        let searched = execute_search(&config, provider, std::io::sink())?;
        write_search_report(writer, &config, &searched)?;
        return Ok(searched.outcome);
    }

    let searched = execute_search(&config, provider, &mut *writer)?;
    if let Some(err) = searched.controller.surface().write_error() {
        return Err(CliError::WriteOutput(err));
    }
    let state = searched.controller.state();
    let region = region_line(&state.viewport(), state.map_type());
    let outcome = searched.outcome;
    drop(searched);
    writeln!(writer, "{region}").map_err(CliError::WriteOutput)?;
    Ok(outcome)
}

struct Searched<P, W> {
    controller: CliController<P, W>,
    outcome: SearchOutcome,
}

/// Drive a controller through startup, one search and shutdown.
///
/// The fixed location arrives as a location update after startup, and the
/// configured region is applied as if the user had moved the map there.
fn execute_search<P: PlaceSearchProvider, W: Write>(
    config: &SearchConfig,
    provider: P,
    out: W,
) -> Result<Searched<P, W>, CliError> {
    let mut controller = MapController::new(
        provider,
        TerminalSurface::new(out),
        FixedLocationProvider::new(Some(config.location)),
        UrlNavigationLauncher::new(CollectedLinks::default()),
        CollectedLinks::default(),
        config.viewport,
    );
    controller.start();
    controller.handle_location_event(LocationEvent::Updated(config.location));
    controller.handle_map_event(MapEvent::RegionChanged(config.viewport));
    controller.set_map_type_index(config.map_type.index());

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(CliError::Runtime)?;
    let outcome = runtime.block_on(controller.submit_search(config.query.as_str()));
    controller.stop();
    Ok(Searched {
        controller,
        outcome: outcome?,
    })
}

fn write_search_report<P: PlaceSearchProvider, W: Write>(
    writer: &mut dyn Write,
    config: &SearchConfig,
    searched: &Searched<P, W>,
) -> Result<(), CliError> {
    let state = searched.controller.state();
    let report = SearchReport {
        query: &config.query,
        map_type: state.map_type(),
        viewport: state.viewport(),
        annotations: state.annotations(),
    };
    let payload =
        serde_json::to_string_pretty(&report).map_err(CliError::SerialiseSearchReport)?;
    writer
        .write_all(payload.as_bytes())
        .map_err(CliError::WriteOutput)?;
    writer.write_all(b"\n").map_err(CliError::WriteOutput)?;
    Ok(())
}

#[cfg(test)]
pub(crate) fn config_from_layers_for_test(
    layers: Vec<ortho_config::MergeLayer<'static>>,
) -> Result<SearchConfig, CliError> {
    let merged = SearchArgs::merge_from_layers(layers).map_err(CliError::from)?;
    SearchConfig::try_from(merged)
}
