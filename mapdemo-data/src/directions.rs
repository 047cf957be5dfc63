//! Directions rendered as OpenStreetMap links.
//!
//! [`UrlNavigationLauncher`] turns a [`DirectionsRequest`] into an
//! `openstreetmap.org/directions` URL and hands it to a [`LinkOpener`], so any
//! browser can act as the navigation application.

use log::warn;
use mapdemo_core::{Coordinate, DirectionsRequest, LinkOpener, NavigationLauncher, TravelMode};
use url::Url;

/// Default site for directions links.
pub const DEFAULT_DIRECTIONS_BASE_URL: &str = "https://www.openstreetmap.org";

/// `NavigationLauncher` that opens directions in a web map.
#[derive(Debug, Clone)]
pub struct UrlNavigationLauncher<O> {
    base_url: String,
    opener: O,
}

impl<O: LinkOpener> UrlNavigationLauncher<O> {
    /// Launcher targeting [`DEFAULT_DIRECTIONS_BASE_URL`].
    pub fn new(opener: O) -> Self {
        Self::with_base_url(DEFAULT_DIRECTIONS_BASE_URL, opener)
    }

    /// Launcher targeting another OpenStreetMap-compatible site.
    pub fn with_base_url(base_url: impl Into<String>, opener: O) -> Self {
        Self {
            base_url: base_url.into(),
            opener,
        }
    }

    /// The wrapped opener.
    pub const fn opener(&self) -> &O {
        &self.opener
    }

    /// Build the directions URL for `request`.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured base URL is not a valid URL.
    pub fn directions_url(&self, request: &DirectionsRequest) -> Result<Url, url::ParseError> {
        let mut url = Url::parse(&format!(
            "{}/directions",
            self.base_url.trim_end_matches('/')
        ))?;
        let route = format!(
            "{};{}",
            route_point(request.source),
            route_point(request.destination)
        );
        url.query_pairs_mut()
            .append_pair("engine", engine(request.mode))
            .append_pair("route", &route);
        Ok(url)
    }
}

impl<O: LinkOpener> NavigationLauncher for UrlNavigationLauncher<O> {
    fn open_directions(&mut self, request: &DirectionsRequest) {
        match self.directions_url(request) {
            Ok(url) => self.opener.open(&url),
            Err(err) => warn!("cannot build directions link from {}: {err}", self.base_url),
        }
    }
}

fn engine(mode: TravelMode) -> &'static str {
    match mode {
        TravelMode::Driving => "fossgis_osrm_car",
        TravelMode::Walking => "fossgis_osrm_foot",
        TravelMode::Cycling => "fossgis_osrm_bike",
    }
}

/// `lat,lon`, the order the directions page expects.
fn route_point(coordinate: Coordinate) -> String {
    format!("{},{}", coordinate.y, coordinate.x)
}
