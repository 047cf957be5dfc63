//! Map rendering surface collaborator and its events.

use crate::controller::MapType;
use crate::{Annotation, AnnotationDetail, MapItem, Viewport};

/// Events emitted by a [`MapSurface`].
#[derive(Debug, Clone, PartialEq)]
pub enum MapEvent {
    /// The user tapped an item, revealing its callout.
    AnnotationTapped(MapItem),
    /// The user asked for the detail view of an item.
    DetailDisclosureRequested(MapItem),
    /// The user moved the visible region.
    RegionChanged(Viewport),
}

/// The rendering surface the controller drives.
pub trait MapSurface {
    /// Replace every displayed annotation with `annotations` in one step.
    fn replace_annotations(&mut self, annotations: &[Annotation]);
    /// Move the visible region.
    fn set_viewport(&mut self, viewport: &Viewport);
    /// Change the render style.
    fn set_map_type(&mut self, map_type: MapType);
    /// Show or hide the user-location marker.
    fn set_shows_user_location(&mut self, shows: bool);
    /// Show the detail view for one annotation.
    fn present_detail(&mut self, detail: &AnnotationDetail);
    /// Close the detail view.
    fn dismiss_detail(&mut self);
}
