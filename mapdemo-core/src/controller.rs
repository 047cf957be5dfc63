//! The interaction loop between the map surface, search and directions.
//!
//! [`MapController`] owns a [`MapState`] and the collaborators it drives. All
//! state is mutated through the controller in response to user actions or
//! collaborator events; there is no shared mutable state elsewhere.
//!
//! # Search generations
//!
//! Every search is issued with a monotonically increasing generation. A
//! completion is applied only when its generation is newer than the one
//! currently displayed, so an older search finishing late can never replace
//! the results of a newer one. Applying a completion replaces the surface's
//! annotations in a single call.

use log::{debug, info, warn};
use thiserror::Error;

use crate::{
    Annotation, AnnotationDetail, AuthorizationStatus, Coordinate, DirectionsDispatcher,
    LinkOpener, LocationEvent, LocationProvider, MapEvent, MapItem, MapSurface,
    NavigationLauncher, PlaceSearchAdapter, PlaceSearchProvider, SearchError, SearchRequest,
    Viewport,
};

/// Size of the region shown around the user at startup, in metres.
pub const STARTUP_REGION_METERS: f64 = 200.0;

/// Render style of the map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum MapType {
    /// Street map.
    #[default]
    Standard,
    /// Satellite imagery.
    Satellite,
    /// Imagery with street labels.
    Hybrid,
}

impl MapType {
    /// Resolve a selector index. Unknown indices fall back to [`MapType::Standard`].
    #[must_use]
    pub const fn from_index(index: usize) -> Self {
        match index {
            1 => Self::Satellite,
            2 => Self::Hybrid,
            _ => Self::Standard,
        }
    }

    /// Selector index of this map type.
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::Standard => 0,
            Self::Satellite => 1,
            Self::Hybrid => 2,
        }
    }
}

/// Whether the controller is following the device location.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TrackingState {
    /// Updates are flowing and the user marker is shown.
    #[default]
    Tracking,
    /// Updates are halted and the user marker is hidden.
    Stopped,
}

impl TrackingState {
    /// The opposite state.
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Tracking => Self::Stopped,
            Self::Stopped => Self::Tracking,
        }
    }

    /// Label for the toggle control: the action it will perform next.
    #[must_use]
    pub const fn control_label(self) -> &'static str {
        match self {
            Self::Tracking => "Stop",
            Self::Stopped => "Start",
        }
    }
}

/// Recoverable failures of user interactions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum InteractionError {
    /// Directions were requested before the first location fix.
    #[error("current location is not yet known")]
    LocationUnavailable,
    /// "Visit website" was used on an annotation without a URL.
    #[error("annotation has no website")]
    MissingUrl,
}

/// Result of applying a search completion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchOutcome {
    /// The results replaced the displayed annotations.
    Displayed(usize),
    /// The search matched nothing; the displayed set is now empty.
    NoResults,
    /// A newer search was already displayed; the completion was discarded.
    Stale,
}

/// Actions offered by the detail view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DetailAction {
    /// Open the annotation's website.
    VisitWebsite,
    /// Request driving directions to the annotation.
    GetDirections,
}

/// An issued search awaiting completion.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchTicket {
    generation: u64,
    request: SearchRequest,
}

impl SearchTicket {
    /// Generation assigned when the search was issued.
    #[must_use]
    pub const fn generation(&self) -> u64 {
        self.generation
    }

    /// The query and region sent to the provider.
    #[must_use]
    pub const fn request(&self) -> &SearchRequest {
        &self.request
    }
}

/// Everything the controller knows about the map.
#[derive(Debug, Clone, PartialEq)]
pub struct MapState {
    annotations: Vec<Annotation>,
    viewport: Viewport,
    current_location: Option<Coordinate>,
    map_type: MapType,
    tracking: TrackingState,
    shows_user_location: bool,
    issued_generation: u64,
    displayed_generation: u64,
    selected: Option<Annotation>,
}

impl MapState {
    /// Fresh state showing `viewport`.
    #[must_use]
    pub const fn new(viewport: Viewport) -> Self {
        Self {
            annotations: Vec::new(),
            viewport,
            current_location: None,
            map_type: MapType::Standard,
            tracking: TrackingState::Tracking,
            shows_user_location: false,
            issued_generation: 0,
            displayed_generation: 0,
            selected: None,
        }
    }

    /// Annotations currently displayed.
    #[must_use]
    pub fn annotations(&self) -> &[Annotation] {
        &self.annotations
    }

    /// Visible region.
    #[must_use]
    pub const fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Most recent device position, once a fix has arrived.
    #[must_use]
    pub const fn current_location(&self) -> Option<Coordinate> {
        self.current_location
    }

    /// Render style.
    #[must_use]
    pub const fn map_type(&self) -> MapType {
        self.map_type
    }

    /// Location tracking state.
    #[must_use]
    pub const fn tracking(&self) -> TrackingState {
        self.tracking
    }

    /// Whether the user-location marker is shown.
    #[must_use]
    pub const fn shows_user_location(&self) -> bool {
        self.shows_user_location
    }

    /// Generation of the most recently issued search.
    #[must_use]
    pub const fn issued_generation(&self) -> u64 {
        self.issued_generation
    }

    /// Generation whose results are displayed; zero before any search completes.
    #[must_use]
    pub const fn displayed_generation(&self) -> u64 {
        self.displayed_generation
    }

    /// Annotation whose callout was last opened.
    #[must_use]
    pub const fn selected(&self) -> Option<&Annotation> {
        self.selected.as_ref()
    }
}

/// Drives the map interaction loop.
///
/// Type parameters name the collaborators: `P` the place-search provider,
/// `S` the map surface, `L` the location provider, `N` the navigation
/// launcher and `O` the link opener.
#[derive(Debug)]
pub struct MapController<P, S, L, N, O> {
    state: MapState,
    search: PlaceSearchAdapter<P>,
    surface: S,
    location: L,
    directions: DirectionsDispatcher<N>,
    links: O,
}

impl<P, S, L, N, O> MapController<P, S, L, N, O>
where
    P: PlaceSearchProvider,
    S: MapSurface,
    L: LocationProvider,
    N: NavigationLauncher,
    O: LinkOpener,
{
    /// Assemble a controller showing `viewport`.
    pub const fn new(
        provider: P,
        surface: S,
        location: L,
        launcher: N,
        links: O,
        viewport: Viewport,
    ) -> Self {
        Self {
            state: MapState::new(viewport),
            search: PlaceSearchAdapter::new(provider),
            surface,
            location,
            directions: DirectionsDispatcher::new(launcher),
            links,
        }
    }

    /// Current state.
    pub const fn state(&self) -> &MapState {
        &self.state
    }

    /// The search adapter.
    pub const fn search_adapter(&self) -> &PlaceSearchAdapter<P> {
        &self.search
    }

    /// The map surface.
    pub const fn surface(&self) -> &S {
        &self.surface
    }

    /// The location provider.
    pub const fn location_provider(&self) -> &L {
        &self.location
    }

    /// The navigation launcher.
    pub const fn launcher(&self) -> &N {
        self.directions.launcher()
    }

    /// The link opener.
    pub const fn link_opener(&self) -> &O {
        &self.links
    }

    /// Bring the map up: settle location access and zoom to the last known
    /// position. The user marker and location updates only resume while
    /// tracking is on.
    pub fn start(&mut self) {
        let tracking = self.state.tracking == TrackingState::Tracking;
        self.show_user_location(tracking);
        self.request_location_access();
        if let Some(position) = self.location.last_known_location() {
            match Viewport::around(position, STARTUP_REGION_METERS, STARTUP_REGION_METERS) {
                Ok(viewport) => self.show_viewport(viewport),
                Err(err) => warn!("ignoring last known location: {err}"),
            }
        }
        if tracking {
            self.location.start_updating();
        }
    }

    /// Tear the map down: halt location updates and hide the user marker.
    pub fn stop(&mut self) {
        self.location.stop_updating();
        self.show_user_location(false);
    }

    fn request_location_access(&mut self) {
        match self.location.authorization_status() {
            AuthorizationStatus::Granted => {}
            AuthorizationStatus::Denied | AuthorizationStatus::Restricted => {
                warn!("location access denied");
            }
            AuthorizationStatus::Undetermined => {
                self.location.request_when_in_use_authorization();
            }
        }
    }

    /// Apply the map type selected at `index`.
    pub fn set_map_type_index(&mut self, index: usize) -> MapType {
        let map_type = MapType::from_index(index);
        self.state.map_type = map_type;
        self.surface.set_map_type(map_type);
        map_type
    }

    /// Flip location tracking on or off.
    pub fn toggle_tracking(&mut self) -> TrackingState {
        let next = self.state.tracking.toggled();
        match next {
            TrackingState::Stopped => {
                self.show_user_location(false);
                self.location.stop_updating();
            }
            TrackingState::Tracking => {
                self.show_user_location(true);
                self.location.start_updating();
            }
        }
        self.state.tracking = next;
        next
    }

    /// Issue a search for `query` over the visible region.
    ///
    /// The returned ticket must be passed to [`Self::complete_search`] with
    /// the provider's answer.
    pub fn begin_search(&mut self, query: impl Into<String>) -> SearchTicket {
        self.state.issued_generation += 1;
        let ticket = SearchTicket {
            generation: self.state.issued_generation,
            request: SearchRequest::new(query, self.state.viewport),
        };
        debug!(
            "issuing search {} for {:?}",
            ticket.generation, ticket.request.query
        );
        ticket
    }

    /// Apply the answer to an issued search.
    ///
    /// Stale completions are discarded. Failures are logged and leave the
    /// displayed annotations untouched.
    pub fn complete_search(
        &mut self,
        ticket: SearchTicket,
        result: Result<Vec<Annotation>, SearchError>,
    ) -> Result<SearchOutcome, SearchError> {
        if ticket.generation <= self.state.displayed_generation {
            debug!(
                "discarding search {}; generation {} is already displayed",
                ticket.generation, self.state.displayed_generation
            );
            return Ok(SearchOutcome::Stale);
        }
        let annotations = result.inspect_err(|err| warn!("Error occurred in search: {err}"))?;

        self.state.displayed_generation = ticket.generation;
        self.state.selected = None;
        self.surface.replace_annotations(&annotations);
        self.state.annotations = annotations;

        if self.state.annotations.is_empty() {
            info!("No matches found for {:?}", ticket.request.query);
            return Ok(SearchOutcome::NoResults);
        }
        info!(
            "Matches found for {:?}: {}",
            ticket.request.query,
            self.state.annotations.len()
        );
        self.fit_annotations();
        Ok(SearchOutcome::Displayed(self.state.annotations.len()))
    }

    /// Search for `query` and display the results.
    pub async fn submit_search(
        &mut self,
        query: impl Into<String>,
    ) -> Result<SearchOutcome, SearchError> {
        let ticket = self.begin_search(query);
        let result = self.search.search(ticket.request()).await;
        self.complete_search(ticket, result)
    }

    /// Open the detail view for `item`.
    ///
    /// Items that are not search annotations, such as the user-location
    /// marker, are ignored.
    pub fn select_annotation(&mut self, item: &MapItem) -> Option<AnnotationDetail> {
        let Some(annotation) = item.as_annotation() else {
            debug!("ignoring detail request for a non-annotation item");
            return None;
        };
        let detail = AnnotationDetail::new(annotation);
        self.state.selected = Some(annotation.clone());
        self.surface.present_detail(&detail);
        Some(detail)
    }

    /// Request driving directions from the current location to `annotation`.
    pub fn request_directions(&mut self, annotation: &Annotation) -> Result<(), InteractionError> {
        let Some(source) = self.state.current_location else {
            warn!("directions unavailable: no location fix yet");
            return Err(InteractionError::LocationUnavailable);
        };
        self.directions.dispatch(source, annotation.coordinate());
        Ok(())
    }

    /// Open the website shown in `detail`, or disable the control when there is none.
    pub fn visit_website(&mut self, detail: &mut AnnotationDetail) -> Result<(), InteractionError> {
        if let Some(url) = detail.url() {
            self.links.open(url);
            Ok(())
        } else {
            detail.disable_website();
            Err(InteractionError::MissingUrl)
        }
    }

    /// Perform a detail-view action. Requesting directions closes the view.
    pub fn handle_detail_action(
        &mut self,
        detail: &mut AnnotationDetail,
        action: DetailAction,
    ) -> Result<(), InteractionError> {
        match action {
            DetailAction::VisitWebsite => self.visit_website(detail),
            DetailAction::GetDirections => {
                let result = self.request_directions(detail.annotation());
                self.surface.dismiss_detail();
                result
            }
        }
    }

    /// React to an event from the map surface.
    pub fn handle_map_event(&mut self, event: MapEvent) -> Option<AnnotationDetail> {
        match event {
            MapEvent::AnnotationTapped(item) => {
                if let MapItem::Annotation(annotation) = item {
                    self.state.selected = Some(annotation);
                }
                None
            }
            MapEvent::DetailDisclosureRequested(item) => self.select_annotation(&item),
            MapEvent::RegionChanged(viewport) => {
                self.state.viewport = viewport;
                None
            }
        }
    }

    /// React to an event from the location provider.
    pub fn handle_location_event(&mut self, event: LocationEvent) {
        match event {
            LocationEvent::Updated(position) => {
                self.state.current_location = Some(position);
            }
            LocationEvent::AuthorizationChanged(
                AuthorizationStatus::Denied | AuthorizationStatus::Restricted,
            ) => warn!("location access denied"),
            LocationEvent::AuthorizationChanged(status) => {
                debug!("location authorization is now {status:?}");
            }
        }
    }

    fn fit_annotations(&mut self) {
        let user = self
            .state
            .current_location
            .filter(|_| self.state.shows_user_location);
        let coordinates = self
            .state
            .annotations
            .iter()
            .map(Annotation::coordinate)
            .chain(user);
        if let Some(viewport) = Viewport::fitting(coordinates) {
            self.show_viewport(viewport);
        }
    }

    fn show_viewport(&mut self, viewport: Viewport) {
        self.state.viewport = viewport;
        self.surface.set_viewport(&viewport);
    }

    fn show_user_location(&mut self, shows: bool) {
        self.state.shows_user_location = shows;
        self.surface.set_shows_user_location(shows);
    }
}
