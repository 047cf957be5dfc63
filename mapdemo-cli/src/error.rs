//! Error types emitted by the map demo CLI.
//!
//! Keep this error type reasonably small, as many CLI helpers return
//! `Result<_, CliError>` and the workspace enables `clippy::result_large_err`.

use std::sync::Arc;

use mapdemo_core::{InteractionError, SearchError, ViewportError};
use mapdemo_data::ProviderBuildError;
use thiserror::Error;

/// Errors emitted by the map demo CLI.
#[derive(Debug, Error)]
pub enum CliError {
    /// Provided arguments failed Clap validation.
    #[error(transparent)]
    ArgumentParsing(#[from] clap::Error),
    /// Configuration layering failed (files, env, CLI).
    #[error("failed to load configuration: {0}")]
    Configuration(#[from] Arc<ortho_config::OrthoError>),
    /// A required option is missing after configuration merging.
    #[error("missing {field} (set --{field} or {env})")]
    MissingArgument {
        field: &'static str,
        env: &'static str,
    },
    /// A latitude/longitude pair is out of range.
    #[error("{field} ({latitude}, {longitude}) is not a valid coordinate")]
    InvalidCoordinate {
        field: &'static str,
        latitude: f64,
        longitude: f64,
    },
    /// The requested map region is not valid.
    #[error("invalid map region: {0}")]
    InvalidRegion(#[source] ViewportError),
    /// The map type name is not recognised.
    #[error("unknown map type {value:?} (expected standard, satellite or hybrid)")]
    InvalidMapType { value: String },
    /// A configured service URL cannot be parsed.
    #[error("{field} {value:?} is not a valid URL: {source}")]
    InvalidUrl {
        field: &'static str,
        value: String,
        #[source]
        source: url::ParseError,
    },
    /// Constructing the place search provider failed.
    #[error("failed to build search provider for {base_url:?}: {source}")]
    BuildSearchProvider {
        base_url: String,
        #[source]
        source: ProviderBuildError,
    },
    /// The async runtime could not be started.
    #[error("failed to build Tokio runtime: {0}")]
    Runtime(#[source] std::io::Error),
    /// The place search failed.
    #[error(transparent)]
    Search(#[from] SearchError),
    /// A map interaction could not be completed.
    #[error(transparent)]
    Interaction(#[from] InteractionError),
    /// Serialising the search report failed.
    #[error("failed to serialise search report: {0}")]
    SerialiseSearchReport(#[source] serde_json::Error),
    /// Writing command output failed.
    #[error("failed to write output: {0}")]
    WriteOutput(#[source] std::io::Error),
}
