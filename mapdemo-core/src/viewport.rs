//! Visible map regions.
//!
//! A [`Viewport`] is a centre coordinate plus a [`Span`] of degrees in each
//! direction. Constructors validate their input so that every viewport handed
//! to a search provider or a map surface describes a real region.

use geo::Rect;
use thiserror::Error;

use crate::Coordinate;

/// Approximate length of one degree of latitude.
const METERS_PER_DEGREE_LATITUDE: f64 = 111_320.0;

/// Fraction of the fitted extent added on each side by [`Viewport::fitting`].
const FIT_PADDING: f64 = 0.1;

/// Smallest span produced by [`Viewport::fitting`], in degrees.
pub const MIN_FIT_SPAN_DEGREES: f64 = 0.005;

const MAX_LATITUDE_DELTA: f64 = 180.0;
const MAX_LONGITUDE_DELTA: f64 = 360.0;

/// Extent of a region in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Span {
    /// North-south extent.
    pub latitude_delta: f64,
    /// East-west extent.
    pub longitude_delta: f64,
}

impl Span {
    /// Construct a span from raw deltas. Validation happens in [`Viewport::new`].
    #[must_use]
    pub const fn new(latitude_delta: f64, longitude_delta: f64) -> Self {
        Self {
            latitude_delta,
            longitude_delta,
        }
    }
}

/// Errors returned by [`Viewport::new`].
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum ViewportError {
    /// The centre latitude was outside `[-90, 90]` or not finite.
    #[error("latitude {0} is outside [-90, 90]")]
    InvalidLatitude(f64),
    /// The centre longitude was outside `[-180, 180]` or not finite.
    #[error("longitude {0} is outside [-180, 180]")]
    InvalidLongitude(f64),
    /// A span delta was not strictly positive, not finite, or too large.
    #[error("span {latitude_delta}x{longitude_delta} is not a valid region")]
    InvalidSpan {
        /// Offending latitude delta.
        latitude_delta: f64,
        /// Offending longitude delta.
        longitude_delta: f64,
    },
}

/// The visible map region.
///
/// # Examples
///
/// ```
/// use geo::Coord;
/// use mapdemo_core::{Span, Viewport};
///
/// # fn main() -> Result<(), mapdemo_core::ViewportError> {
/// let viewport = Viewport::new(Coord { x: -122.03, y: 37.33 }, Span::new(0.05, 0.05))?;
/// assert!(viewport.contains(Coord { x: -122.031, y: 37.331 }));
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Viewport {
    center: Coordinate,
    span: Span,
}

impl Viewport {
    /// Validate and construct a [`Viewport`].
    pub fn new(center: Coordinate, span: Span) -> Result<Self, ViewportError> {
        if !center.y.is_finite() || !(-90.0..=90.0).contains(&center.y) {
            return Err(ViewportError::InvalidLatitude(center.y));
        }
        if !center.x.is_finite() || !(-180.0..=180.0).contains(&center.x) {
            return Err(ViewportError::InvalidLongitude(center.x));
        }
        let valid_delta =
            |delta: f64, max: f64| delta.is_finite() && delta > 0.0 && delta <= max;
        if !valid_delta(span.latitude_delta, MAX_LATITUDE_DELTA)
            || !valid_delta(span.longitude_delta, MAX_LONGITUDE_DELTA)
        {
            return Err(ViewportError::InvalidSpan {
                latitude_delta: span.latitude_delta,
                longitude_delta: span.longitude_delta,
            });
        }
        Ok(Self { center, span })
    }

    /// Build a region around `center` measuring the given distances in metres.
    ///
    /// The longitudinal distance is scaled by the cosine of the latitude, so
    /// regions near the poles are clamped to the full longitude range.
    pub fn around(
        center: Coordinate,
        latitudinal_meters: f64,
        longitudinal_meters: f64,
    ) -> Result<Self, ViewportError> {
        let latitude_delta = (latitudinal_meters / METERS_PER_DEGREE_LATITUDE)
            .min(MAX_LATITUDE_DELTA);
        let meters_per_degree_longitude =
            METERS_PER_DEGREE_LATITUDE * center.y.to_radians().cos();
        let longitude_delta = if meters_per_degree_longitude > f64::EPSILON {
            (longitudinal_meters / meters_per_degree_longitude).min(MAX_LONGITUDE_DELTA)
        } else {
            MAX_LONGITUDE_DELTA
        };
        Self::new(center, Span::new(latitude_delta, longitude_delta))
    }

    /// Smallest padded region containing every coordinate.
    ///
    /// Returns `None` when `coordinates` is empty or contains an invalid
    /// position. A lone coordinate yields a region of
    /// [`MIN_FIT_SPAN_DEGREES`] in each direction.
    pub fn fitting<I>(coordinates: I) -> Option<Self>
    where
        I: IntoIterator<Item = Coordinate>,
    {
        let mut iter = coordinates.into_iter();
        let first = iter.next()?;
        let (min, max) = iter.fold((first, first), |(min, max), c| {
            (
                Coordinate {
                    x: min.x.min(c.x),
                    y: min.y.min(c.y),
                },
                Coordinate {
                    x: max.x.max(c.x),
                    y: max.y.max(c.y),
                },
            )
        });
        let pad = |extent: f64, limit: f64| {
            (extent * (1.0 + 2.0 * FIT_PADDING))
                .max(MIN_FIT_SPAN_DEGREES)
                .min(limit)
        };
        let center = Coordinate {
            x: (min.x + max.x) / 2.0,
            y: (min.y + max.y) / 2.0,
        };
        let span = Span::new(
            pad(max.y - min.y, MAX_LATITUDE_DELTA),
            pad(max.x - min.x, MAX_LONGITUDE_DELTA),
        );
        Self::new(center, span).ok()
    }

    /// Centre of the region.
    #[must_use]
    pub const fn center(&self) -> Coordinate {
        self.center
    }

    /// Extent of the region.
    #[must_use]
    pub const fn span(&self) -> Span {
        self.span
    }

    /// The region as an axis-aligned rectangle (`x` = longitude, `y` = latitude).
    ///
    /// Edges are clamped to the valid coordinate range, so regions near a
    /// pole or the antimeridian are cut off rather than wrapped.
    #[must_use]
    pub fn bounding_rect(&self) -> Rect<f64> {
        let half_lat = self.span.latitude_delta / 2.0;
        let half_lon = self.span.longitude_delta / 2.0;
        Rect::new(
            Coordinate {
                x: (self.center.x - half_lon).max(-180.0),
                y: (self.center.y - half_lat).max(-90.0),
            },
            Coordinate {
                x: (self.center.x + half_lon).min(180.0),
                y: (self.center.y + half_lat).min(90.0),
            },
        )
    }

    /// Whether `coordinate` lies inside the region, boundary included.
    #[must_use]
    pub fn contains(&self, coordinate: Coordinate) -> bool {
        let rect = self.bounding_rect();
        (rect.min().x..=rect.max().x).contains(&coordinate.x)
            && (rect.min().y..=rect.max().y).contains(&coordinate.y)
    }
}
