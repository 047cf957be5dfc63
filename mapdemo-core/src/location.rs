//! Device location collaborator and its events.

use crate::Coordinate;

/// Outcome of the location-permission query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthorizationStatus {
    /// Access is allowed.
    Granted,
    /// The user refused access.
    Denied,
    /// Access is blocked by policy.
    Restricted,
    /// The user has not been asked yet.
    Undetermined,
}

/// Events emitted by a [`LocationProvider`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LocationEvent {
    /// A new device position is available.
    Updated(Coordinate),
    /// The permission state changed.
    AuthorizationChanged(AuthorizationStatus),
}

/// The device location subsystem.
///
/// Position fixes are delivered separately as [`LocationEvent`]s; this trait
/// only covers the calls the controller makes.
pub trait LocationProvider {
    /// Current permission state.
    fn authorization_status(&self) -> AuthorizationStatus;
    /// Ask the user for when-in-use access.
    fn request_when_in_use_authorization(&mut self);
    /// Most recent fix known to the subsystem, if any.
    fn last_known_location(&self) -> Option<Coordinate>;
    /// Begin delivering position updates.
    fn start_updating(&mut self);
    /// Stop delivering position updates.
    fn stop_updating(&mut self);
}
