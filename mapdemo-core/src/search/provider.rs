//! Place-search provider trait and its request/result types.

use async_trait::async_trait;
use url::Url;

use crate::{Coordinate, Viewport};

use super::error::SearchError;

/// One raw result returned by a place-search provider.
#[derive(Debug, Clone, PartialEq)]
pub struct PlaceItem {
    /// Place name, when the provider knows one.
    pub name: Option<String>,
    /// Contact phone number.
    pub phone_number: Option<String>,
    /// Website.
    pub url: Option<Url>,
    /// Position of the place.
    pub coordinate: Coordinate,
}

impl PlaceItem {
    /// A result at `coordinate` with no metadata.
    #[must_use]
    pub const fn at(coordinate: Coordinate) -> Self {
        Self {
            name: None,
            phone_number: None,
            url: None,
            coordinate,
        }
    }
}

/// The query text plus the region to search within.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchRequest {
    /// Natural-language query. May be empty; the provider decides what that means.
    pub query: String,
    /// Region biasing the search.
    pub viewport: Viewport,
}

impl SearchRequest {
    /// Build a request.
    #[must_use]
    pub fn new(query: impl Into<String>, viewport: Viewport) -> Self {
        Self {
            query: query.into(),
            viewport,
        }
    }
}

/// Look up places matching a natural-language query within a region.
///
/// Implementers return results in relevance order. An empty list means no
/// matches and is distinct from an error.
///
/// # Examples
///
/// ```rust
/// use async_trait::async_trait;
/// use geo::Coord;
/// use mapdemo_core::{PlaceItem, PlaceSearchProvider, SearchError, SearchRequest, Span, Viewport};
///
/// struct OnePlace;
///
/// #[async_trait(?Send)]
/// impl PlaceSearchProvider for OnePlace {
///     async fn search(&self, request: &SearchRequest) -> Result<Vec<PlaceItem>, SearchError> {
///         Ok(vec![PlaceItem::at(request.viewport.center())])
///     }
/// }
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let viewport = Viewport::new(Coord { x: -122.03, y: 37.33 }, Span::new(0.05, 0.05))?;
/// let runtime = tokio::runtime::Builder::new_current_thread().build()?;
/// let places = runtime.block_on(OnePlace.search(&SearchRequest::new("coffee", viewport)))?;
/// assert_eq!(places.len(), 1);
/// # Ok(())
/// # }
/// ```
#[async_trait(?Send)]
pub trait PlaceSearchProvider {
    /// Return the places matching `request`.
    async fn search(&self, request: &SearchRequest) -> Result<Vec<PlaceItem>, SearchError>;
}
