//! In-memory collaborators used by unit and behaviour tests.
//!
//! Each double records the calls it receives so tests can assert on what the
//! controller did without a real map, location subsystem or launcher.

use std::future::Future;

use async_trait::async_trait;
use url::Url;

use crate::{
    Annotation, AnnotationDetail, AuthorizationStatus, Coordinate, DirectionsRequest, LinkOpener,
    LocationProvider, MapController, MapSurface, MapType, NavigationLauncher, PlaceItem,
    PlaceSearchProvider, SearchError, SearchRequest, Span, Viewport,
};

/// Drive a future to completion on a fresh current-thread runtime.
///
/// # Panics
///
/// Panics if the runtime cannot be built.
pub fn block_on<F: Future>(future: F) -> F::Output {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .expect("test runtime should build")
        .block_on(future)
}

/// Viewport centred on (37.33, -122.03).
///
/// # Panics
///
/// Never; the constants form a valid region.
#[must_use]
pub fn sample_viewport() -> Viewport {
    Viewport::new(Coordinate { x: -122.03, y: 37.33 }, Span::new(0.05, 0.05))
        .expect("sample viewport is valid")
}

/// The two coffee shops from the reference search example.
///
/// # Panics
///
/// Never; the URL literal is valid.
#[must_use]
pub fn coffee_places() -> Vec<PlaceItem> {
    vec![
        PlaceItem {
            name: Some("Cafe A".to_owned()),
            phone_number: Some("555-1111".to_owned()),
            url: None,
            coordinate: Coordinate {
                x: -122.031,
                y: 37.331,
            },
        },
        PlaceItem {
            name: Some("Cafe B".to_owned()),
            phone_number: None,
            url: Some(Url::parse("http://b.example").expect("sample URL is valid")),
            coordinate: Coordinate {
                x: -122.028,
                y: 37.329,
            },
        },
    ]
}

/// Stub `PlaceSearchProvider` returning a fixed answer.
#[derive(Debug, Clone)]
pub struct StubPlaceSearchProvider {
    response: Result<Vec<PlaceItem>, SearchError>,
}

impl StubPlaceSearchProvider {
    /// Answer every request with `places`.
    #[must_use]
    pub const fn with_places(places: Vec<PlaceItem>) -> Self {
        Self {
            response: Ok(places),
        }
    }

    /// Fail every request with `error`.
    #[must_use]
    pub const fn with_error(error: SearchError) -> Self {
        Self {
            response: Err(error),
        }
    }
}

#[async_trait(?Send)]
impl PlaceSearchProvider for StubPlaceSearchProvider {
    async fn search(&self, _request: &SearchRequest) -> Result<Vec<PlaceItem>, SearchError> {
        self.response.clone()
    }
}

/// `MapSurface` that records every call.
#[derive(Debug, Default, Clone)]
pub struct RecordingSurface {
    annotation_sets: Vec<Vec<Annotation>>,
    viewports: Vec<Viewport>,
    map_types: Vec<MapType>,
    shows_user_location: bool,
    presented: Vec<AnnotationDetail>,
    dismissals: usize,
}

impl RecordingSurface {
    /// Every annotation set passed to `replace_annotations`, oldest first.
    #[must_use]
    pub fn annotation_sets(&self) -> &[Vec<Annotation>] {
        &self.annotation_sets
    }

    /// The annotations currently displayed.
    #[must_use]
    pub fn displayed(&self) -> &[Annotation] {
        self.annotation_sets
            .last()
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Every viewport set, oldest first.
    #[must_use]
    pub fn viewports(&self) -> &[Viewport] {
        &self.viewports
    }

    /// Every map type set, oldest first.
    #[must_use]
    pub fn map_types(&self) -> &[MapType] {
        &self.map_types
    }

    /// Whether the user marker is currently shown.
    #[must_use]
    pub const fn shows_user_location(&self) -> bool {
        self.shows_user_location
    }

    /// Every detail view presented, oldest first.
    #[must_use]
    pub fn presented(&self) -> &[AnnotationDetail] {
        &self.presented
    }

    /// Number of times the detail view was dismissed.
    #[must_use]
    pub const fn dismissals(&self) -> usize {
        self.dismissals
    }
}

impl MapSurface for RecordingSurface {
    fn replace_annotations(&mut self, annotations: &[Annotation]) {
        self.annotation_sets.push(annotations.to_vec());
    }

    fn set_viewport(&mut self, viewport: &Viewport) {
        self.viewports.push(*viewport);
    }

    fn set_map_type(&mut self, map_type: MapType) {
        self.map_types.push(map_type);
    }

    fn set_shows_user_location(&mut self, shows: bool) {
        self.shows_user_location = shows;
    }

    fn present_detail(&mut self, detail: &AnnotationDetail) {
        self.presented.push(detail.clone());
    }

    fn dismiss_detail(&mut self) {
        self.dismissals += 1;
    }
}

/// `LocationProvider` with a fixed permission state.
#[derive(Debug, Clone)]
pub struct ScriptedLocationProvider {
    status: AuthorizationStatus,
    last_known: Option<Coordinate>,
    authorization_requests: usize,
    updating: bool,
}

impl ScriptedLocationProvider {
    /// Provider reporting `status` and no last known location.
    #[must_use]
    pub const fn new(status: AuthorizationStatus) -> Self {
        Self {
            status,
            last_known: None,
            authorization_requests: 0,
            updating: false,
        }
    }

    /// Report `position` as the last known location.
    #[must_use]
    pub const fn with_last_known(mut self, position: Coordinate) -> Self {
        self.last_known = Some(position);
        self
    }

    /// Number of permission prompts issued.
    #[must_use]
    pub const fn authorization_requests(&self) -> usize {
        self.authorization_requests
    }

    /// Whether updates are currently running.
    #[must_use]
    pub const fn is_updating(&self) -> bool {
        self.updating
    }
}

impl Default for ScriptedLocationProvider {
    fn default() -> Self {
        Self::new(AuthorizationStatus::Granted)
    }
}

impl LocationProvider for ScriptedLocationProvider {
    fn authorization_status(&self) -> AuthorizationStatus {
        self.status
    }

    fn request_when_in_use_authorization(&mut self) {
        self.authorization_requests += 1;
    }

    fn last_known_location(&self) -> Option<Coordinate> {
        self.last_known
    }

    fn start_updating(&mut self) {
        self.updating = true;
    }

    fn stop_updating(&mut self) {
        self.updating = false;
    }
}

/// `NavigationLauncher` that records requests.
#[derive(Debug, Default, Clone)]
pub struct RecordingLauncher {
    requests: Vec<DirectionsRequest>,
}

impl RecordingLauncher {
    /// Requests received, oldest first.
    #[must_use]
    pub fn requests(&self) -> &[DirectionsRequest] {
        &self.requests
    }
}

impl NavigationLauncher for RecordingLauncher {
    fn open_directions(&mut self, request: &DirectionsRequest) {
        self.requests.push(*request);
    }
}

/// `LinkOpener` that records URLs.
#[derive(Debug, Default, Clone)]
pub struct RecordingLinkOpener {
    opened: Vec<Url>,
}

impl RecordingLinkOpener {
    /// URLs opened, oldest first.
    #[must_use]
    pub fn opened(&self) -> &[Url] {
        &self.opened
    }
}

impl LinkOpener for RecordingLinkOpener {
    fn open(&mut self, url: &Url) {
        self.opened.push(url.clone());
    }
}

/// Controller wired entirely to in-memory doubles.
pub type TestController = MapController<
    StubPlaceSearchProvider,
    RecordingSurface,
    ScriptedLocationProvider,
    RecordingLauncher,
    RecordingLinkOpener,
>;

/// Build a [`TestController`] over `provider`, showing [`sample_viewport`],
/// with location access already granted.
#[must_use]
pub fn test_controller(provider: StubPlaceSearchProvider) -> TestController {
    test_controller_with_location(provider, ScriptedLocationProvider::default())
}

/// Build a [`TestController`] with an explicit location provider.
#[must_use]
pub fn test_controller_with_location(
    provider: StubPlaceSearchProvider,
    location: ScriptedLocationProvider,
) -> TestController {
    MapController::new(
        provider,
        RecordingSurface::default(),
        location,
        RecordingLauncher::default(),
        RecordingLinkOpener::default(),
        sample_viewport(),
    )
}
