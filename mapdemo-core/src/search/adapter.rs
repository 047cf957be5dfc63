//! Conversion of provider results into annotations.

use log::debug;

use crate::Annotation;

use super::error::SearchError;
use super::provider::{PlaceItem, PlaceSearchProvider, SearchRequest};

/// Build the annotation for one search result.
///
/// The subtitle carries the phone number when there is one and is the empty
/// string otherwise.
#[must_use]
pub fn annotation_from_place(item: PlaceItem) -> Annotation {
    let mut annotation = Annotation::new(item.coordinate);
    annotation.title = item.name;
    annotation.url = item.url;
    annotation.subtitle = Some(item.phone_number.clone().unwrap_or_default());
    annotation.phone_number = item.phone_number;
    annotation
}

/// Wraps a [`PlaceSearchProvider`] and produces annotations.
///
/// Every call builds its own result list, so a slow request can never append
/// to the results of a newer one.
#[derive(Debug, Clone, Default)]
pub struct PlaceSearchAdapter<P> {
    provider: P,
}

impl<P: PlaceSearchProvider> PlaceSearchAdapter<P> {
    /// Wrap `provider`.
    pub const fn new(provider: P) -> Self {
        Self { provider }
    }

    /// The wrapped provider.
    pub const fn provider(&self) -> &P {
        &self.provider
    }

    /// Search and convert the results, preserving provider order.
    pub async fn search(&self, request: &SearchRequest) -> Result<Vec<Annotation>, SearchError> {
        let items = self.provider.search(request).await?;
        let annotations = items
            .into_iter()
            .map(|item| {
                debug!(
                    "search result name={} phone={}",
                    item.name.as_deref().unwrap_or("No match"),
                    item.phone_number.as_deref().unwrap_or("No match"),
                );
                annotation_from_place(item)
            })
            .collect::<Vec<_>>();
        debug!("search for {:?} produced {} annotations", request.query, annotations.len());
        Ok(annotations)
    }
}
