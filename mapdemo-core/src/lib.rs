//! Core domain types for the map demo.
//!
//! The crate turns a free-text query plus a map viewport into point
//! annotations, and mediates the interaction loop around them: selecting an
//! annotation, opening its website, and requesting driving directions.
//!
//! Platform services (the rendering surface, the location subsystem, the
//! place-search service and the external launchers) are modelled as traits so
//! the interaction logic can run against real adapters or the in-memory doubles
//! in [`test_support`].

#![forbid(unsafe_code)]

pub mod annotation;
pub mod controller;
pub mod directions;
pub mod links;
pub mod location;
pub mod search;
pub mod surface;
pub mod viewport;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use annotation::{Annotation, AnnotationDetail, MapItem, Observable, SubscriptionId};
pub use controller::{
    DetailAction, InteractionError, MapController, MapState, MapType, SearchOutcome,
    SearchTicket, TrackingState,
};
pub use directions::{
    DESTINATION_LABEL, DirectionsDispatcher, DirectionsRequest, NavigationLauncher, SOURCE_LABEL,
    TravelMode,
};
pub use links::LinkOpener;
pub use location::{AuthorizationStatus, LocationEvent, LocationProvider};
pub use search::{
    PlaceItem, PlaceSearchAdapter, PlaceSearchProvider, SearchError, SearchRequest,
    annotation_from_place,
};
pub use surface::{MapEvent, MapSurface};
pub use viewport::{Span, Viewport, ViewportError};

/// Geographic coordinate used throughout the crate.
///
/// `x` holds the longitude and `y` the latitude, both in degrees.
pub type Coordinate = geo::Coord<f64>;
