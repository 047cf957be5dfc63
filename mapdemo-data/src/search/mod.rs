//! HTTP-based place search.
//!
//! [`HttpPlaceSearchProvider`] implements
//! [`mapdemo_core::PlaceSearchProvider`] against the Nominatim search API.
//! Results are restricted to the request's viewport and carry the place's
//! phone number and website when OpenStreetMap knows them.
//!
//! # Example
//!
//! ```no_run
//! use std::time::Duration;
//! use geo::Coord;
//! use mapdemo_core::{PlaceSearchProvider, SearchRequest, Span, Viewport};
//! use mapdemo_data::search::{HttpPlaceSearchProvider, HttpPlaceSearchProviderConfig};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let config = HttpPlaceSearchProviderConfig::new("http://localhost:8080")
//!     .with_timeout(Duration::from_secs(10))
//!     .with_limit(5);
//! let provider = HttpPlaceSearchProvider::with_config(config)?;
//!
//! let viewport = Viewport::new(Coord { x: -0.1, y: 51.5 }, Span::new(0.05, 0.05))?;
//! let places = provider.search(&SearchRequest::new("coffee", viewport)).await?;
//! println!("{} places", places.len());
//! # Ok(())
//! # }
//! ```

mod nominatim;
mod provider;

pub use nominatim::decode_search_body;
pub use provider::{
    DEFAULT_USER_AGENT, HttpPlaceSearchProvider, HttpPlaceSearchProviderConfig,
    ProviderBuildError,
};
