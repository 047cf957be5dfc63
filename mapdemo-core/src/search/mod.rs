//! Translate a free-text query and a viewport into annotations.
//!
//! The [`PlaceSearchProvider`] trait abstracts the external place-search
//! service. [`PlaceSearchAdapter`] wraps a provider and converts its raw
//! [`PlaceItem`] results into [`Annotation`](crate::Annotation) records,
//! preserving the provider's ordering.
//!
//! Provider failures surface as [`SearchError`]. An empty result list is not
//! an error.

mod adapter;
mod error;
mod provider;

pub use adapter::{PlaceSearchAdapter, annotation_from_place};
pub use error::SearchError;
pub use provider::{PlaceItem, PlaceSearchProvider, SearchRequest};
