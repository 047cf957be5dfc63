//! Facade crate for the map demo.
//!
//! This crate re-exports the core domain types and, behind the `http`
//! feature, the Nominatim search provider and OpenStreetMap directions
//! launcher.

#![forbid(unsafe_code)]

pub use mapdemo_core::{
    Annotation, AnnotationDetail, AuthorizationStatus, Coordinate, DetailAction,
    DirectionsDispatcher, DirectionsRequest, InteractionError, LinkOpener, LocationEvent,
    LocationProvider, MapController, MapEvent, MapItem, MapState, MapSurface, MapType,
    NavigationLauncher, PlaceItem, PlaceSearchAdapter, PlaceSearchProvider, SearchError,
    SearchOutcome, SearchRequest, SearchTicket, Span, TrackingState, TravelMode, Viewport,
    ViewportError, annotation_from_place,
};

#[cfg(feature = "http")]
pub use mapdemo_data::{
    HttpPlaceSearchProvider, HttpPlaceSearchProviderConfig, ProviderBuildError,
    UrlNavigationLauncher,
};
