//! Hand driving directions off to an external navigation application.

use crate::Coordinate;

/// Label attached to the start of a directions request.
pub const SOURCE_LABEL: &str = "Source";
/// Label attached to the end of a directions request.
pub const DESTINATION_LABEL: &str = "Destination";

/// How the traveller moves between the two points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum TravelMode {
    /// By car.
    #[default]
    Driving,
    /// On foot.
    Walking,
    /// By bicycle.
    Cycling,
}

/// A request for directions between two coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DirectionsRequest {
    /// Start of the route.
    pub source: Coordinate,
    /// End of the route.
    pub destination: Coordinate,
    /// Travel mode.
    pub mode: TravelMode,
}

/// External navigation application.
///
/// Fire-and-forget: whether a compatible application exists is the
/// launcher's concern.
pub trait NavigationLauncher {
    /// Display directions for `request`.
    fn open_directions(&mut self, request: &DirectionsRequest);
}

/// Builds [`DirectionsRequest`]s and forwards them to a [`NavigationLauncher`].
///
/// # Examples
///
/// ```
/// use geo::Coord;
/// use mapdemo_core::{DirectionsDispatcher, DirectionsRequest, NavigationLauncher, TravelMode};
///
/// #[derive(Default)]
/// struct Recorder(Vec<DirectionsRequest>);
///
/// impl NavigationLauncher for Recorder {
///     fn open_directions(&mut self, request: &DirectionsRequest) {
///         self.0.push(*request);
///     }
/// }
///
/// let mut dispatcher = DirectionsDispatcher::new(Recorder::default());
/// dispatcher.dispatch(Coord { x: 0.0, y: 0.0 }, Coord { x: 1.0, y: 1.0 });
/// assert_eq!(dispatcher.launcher().0[0].mode, TravelMode::Driving);
/// ```
#[derive(Debug, Clone, Default)]
pub struct DirectionsDispatcher<N> {
    launcher: N,
}

impl<N: NavigationLauncher> DirectionsDispatcher<N> {
    /// Wrap `launcher`.
    pub const fn new(launcher: N) -> Self {
        Self { launcher }
    }

    /// The wrapped launcher.
    pub const fn launcher(&self) -> &N {
        &self.launcher
    }

    /// Request driving directions from `source` to `destination`.
    pub fn dispatch(&mut self, source: Coordinate, destination: Coordinate) {
        self.dispatch_with_mode(source, destination, TravelMode::default());
    }

    /// Request directions using an explicit travel mode.
    pub fn dispatch_with_mode(
        &mut self,
        source: Coordinate,
        destination: Coordinate,
        mode: TravelMode,
    ) {
        let request = DirectionsRequest {
            source,
            destination,
            mode,
        };
        log::info!(
            "requesting {mode:?} directions from {SOURCE_LABEL} ({}, {}) to {DESTINATION_LABEL} ({}, {})",
            source.y,
            source.x,
            destination.y,
            destination.x,
        );
        self.launcher.open_directions(&request);
    }
}
