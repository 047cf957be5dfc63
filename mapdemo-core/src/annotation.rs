//! Point-of-interest annotations and the items a map surface can hold.

use std::fmt;
use std::sync::Arc;

use url::Url;

use crate::Coordinate;

/// Handle returned by [`Observable::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Listener<T> = Arc<dyn Fn(&T, &T) + Send + Sync>;

/// A value whose changes can be observed.
///
/// Listeners receive `(old, new)` whenever [`Observable::set`] stores a
/// different value. Cloning copies the value only; the clone starts with no
/// subscribers. Equality compares values.
///
/// # Examples
///
/// ```
/// use std::sync::{Arc, Mutex};
/// use mapdemo_core::Observable;
///
/// let seen = Arc::new(Mutex::new(Vec::new()));
/// let sink = Arc::clone(&seen);
/// let mut cell = Observable::new(1);
/// cell.subscribe(move |old, new| {
///     if let Ok(mut guard) = sink.lock() {
///         guard.push((*old, *new));
///     }
/// });
/// cell.set(2);
/// cell.set(2);
/// assert_eq!(*seen.lock().unwrap(), vec![(1, 2)]);
/// ```
pub struct Observable<T> {
    value: T,
    next_id: u64,
    listeners: Vec<(SubscriptionId, Listener<T>)>,
}

impl<T: PartialEq> Observable<T> {
    /// Wrap `value` with no subscribers.
    pub const fn new(value: T) -> Self {
        Self {
            value,
            next_id: 0,
            listeners: Vec::new(),
        }
    }

    /// Current value.
    pub const fn get(&self) -> &T {
        &self.value
    }

    /// Store `value`, notifying subscribers when it differs from the current one.
    pub fn set(&mut self, value: T) {
        if self.value == value {
            return;
        }
        let old = std::mem::replace(&mut self.value, value);
        for (_, listener) in &self.listeners {
            listener(&old, &self.value);
        }
    }

    /// Register a change listener.
    pub fn subscribe<F>(&mut self, listener: F) -> SubscriptionId
    where
        F: Fn(&T, &T) + Send + Sync + 'static,
    {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.listeners.push((id, Arc::new(listener)));
        id
    }

    /// Remove a listener. Returns `false` when `id` was not registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(existing, _)| *existing != id);
        self.listeners.len() != before
    }

    /// Number of registered listeners.
    pub fn subscriber_count(&self) -> usize {
        self.listeners.len()
    }
}

impl<T: Clone + PartialEq> Clone for Observable<T> {
    fn clone(&self) -> Self {
        Self::new(self.value.clone())
    }
}

impl<T: PartialEq> PartialEq for Observable<T> {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl<T: fmt::Debug> fmt::Debug for Observable<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Observable")
            .field("value", &self.value)
            .field("subscribers", &self.listeners.len())
            .finish()
    }
}

/// A point of interest shown on the map.
///
/// Only the coordinate is required; every other field is independently
/// optional.
///
/// # Examples
///
/// ```
/// use geo::Coord;
/// use mapdemo_core::Annotation;
///
/// let annotation = Annotation::new(Coord { x: -122.031, y: 37.331 })
///     .with_title("Cafe A")
///     .with_phone_number("555-1111");
/// assert_eq!(annotation.subtitle.as_deref(), Some("555-1111"));
/// assert!(annotation.url.is_none());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Annotation {
    coordinate: Observable<Coordinate>,
    /// Display name.
    pub title: Option<String>,
    /// Secondary text shown beneath the title.
    pub subtitle: Option<String>,
    /// Contact phone number.
    pub phone_number: Option<String>,
    /// Website opened by "visit website".
    pub url: Option<Url>,
    /// Image asset name. Reserved; nothing renders it yet.
    pub image_name: Option<String>,
}

impl Annotation {
    /// Create an annotation at `coordinate` with every optional field unset.
    #[must_use]
    pub const fn new(coordinate: Coordinate) -> Self {
        Self {
            coordinate: Observable::new(coordinate),
            title: None,
            subtitle: None,
            phone_number: None,
            url: None,
            image_name: None,
        }
    }

    /// Position of the annotation.
    #[must_use]
    pub const fn coordinate(&self) -> Coordinate {
        *self.coordinate.get()
    }

    /// Move the annotation, notifying coordinate observers.
    pub fn set_coordinate(&mut self, coordinate: Coordinate) {
        self.coordinate.set(coordinate);
    }

    /// Observe coordinate changes, e.g. from a rendering surface.
    pub fn observe_coordinate<F>(&mut self, listener: F) -> SubscriptionId
    where
        F: Fn(&Coordinate, &Coordinate) + Send + Sync + 'static,
    {
        self.coordinate.subscribe(listener)
    }

    /// Stop observing coordinate changes.
    pub fn unobserve_coordinate(&mut self, id: SubscriptionId) -> bool {
        self.coordinate.unsubscribe(id)
    }

    /// Set the title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Set the phone number, mirroring it into the subtitle.
    #[must_use]
    pub fn with_phone_number(mut self, phone_number: impl Into<String>) -> Self {
        let phone_number = phone_number.into();
        self.subtitle = Some(phone_number.clone());
        self.phone_number = Some(phone_number);
        self
    }

    /// Set the website.
    #[must_use]
    pub fn with_url(mut self, url: Url) -> Self {
        self.url = Some(url);
        self
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Annotation {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        #[derive(serde::Serialize)]
        struct Record<'a> {
            coordinate: Coordinate,
            title: Option<&'a str>,
            subtitle: Option<&'a str>,
            phone_number: Option<&'a str>,
            url: Option<&'a str>,
            image_name: Option<&'a str>,
        }

        Record {
            coordinate: self.coordinate(),
            title: self.title.as_deref(),
            subtitle: self.subtitle.as_deref(),
            phone_number: self.phone_number.as_deref(),
            url: self.url.as_ref().map(Url::as_str),
            image_name: self.image_name.as_deref(),
        }
        .serialize(serializer)
    }
}

/// An item rendered on the map surface.
#[derive(Debug, Clone, PartialEq)]
pub enum MapItem {
    /// A search-result annotation.
    Annotation(Annotation),
    /// The marker for the device's own position.
    UserLocation(Coordinate),
}

impl MapItem {
    /// The annotation, when this item is one.
    #[must_use]
    pub const fn as_annotation(&self) -> Option<&Annotation> {
        match self {
            Self::Annotation(annotation) => Some(annotation),
            Self::UserLocation(_) => None,
        }
    }
}

/// State of the detail view shown for one annotation.
#[derive(Debug, Clone, PartialEq)]
pub struct AnnotationDetail {
    annotation: Annotation,
    website_enabled: bool,
}

impl AnnotationDetail {
    /// Populate a detail view from `annotation`. The website control starts enabled.
    #[must_use]
    pub fn new(annotation: &Annotation) -> Self {
        Self {
            annotation: annotation.clone(),
            website_enabled: true,
        }
    }

    /// The annotation being shown.
    #[must_use]
    pub const fn annotation(&self) -> &Annotation {
        &self.annotation
    }

    /// Title label text.
    #[must_use]
    pub fn title(&self) -> Option<&str> {
        self.annotation.title.as_deref()
    }

    /// Phone number text.
    #[must_use]
    pub fn phone_number(&self) -> Option<&str> {
        self.annotation.phone_number.as_deref()
    }

    /// Website link.
    #[must_use]
    pub const fn url(&self) -> Option<&Url> {
        self.annotation.url.as_ref()
    }

    /// Whether the "visit website" control is enabled.
    #[must_use]
    pub const fn website_enabled(&self) -> bool {
        self.website_enabled
    }

    pub(crate) const fn disable_website(&mut self) {
        self.website_enabled = false;
    }
}
