//! Concrete collaborators for the map demo.
//!
//! - [`search`] queries a Nominatim place-search service over HTTP.
//! - [`directions`] renders directions requests as OpenStreetMap links.

#![forbid(unsafe_code)]

pub mod directions;
pub mod search;

pub use directions::{DEFAULT_DIRECTIONS_BASE_URL, UrlNavigationLauncher};
pub use search::{
    DEFAULT_USER_AGENT, HttpPlaceSearchProvider, HttpPlaceSearchProviderConfig,
    ProviderBuildError, decode_search_body,
};
