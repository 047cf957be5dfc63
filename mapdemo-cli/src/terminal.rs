//! Terminal stand-ins for the platform collaborators.
//!
//! The CLI has no rendering surface, GPS or browser, so annotations are
//! written as text lines, the location is fixed by configuration and links
//! are collected for printing.

use std::io::{self, Write};

use log::{debug, info, warn};
use mapdemo_core::{
    Annotation, AnnotationDetail, AuthorizationStatus, Coordinate, LinkOpener, LocationProvider,
    MapSurface, MapType, Viewport,
};
use url::Url;

/// Title printed for annotations without a name.
const UNNAMED: &str = "No match";

/// `MapSurface` that lists annotations on a writer.
///
/// Write failures are logged and remembered; check them with
/// [`TerminalSurface::write_error`] once the controller is done.
#[derive(Debug)]
pub(crate) struct TerminalSurface<W> {
    out: W,
    write_error: Option<io::ErrorKind>,
}

impl<W: Write> TerminalSurface<W> {
    pub(crate) const fn new(out: W) -> Self {
        Self {
            out,
            write_error: None,
        }
    }

    /// First write failure seen, if any.
    pub(crate) fn write_error(&self) -> Option<io::Error> {
        self.write_error.map(io::Error::from)
    }

    fn emit(&mut self, write: impl FnOnce(&mut W) -> io::Result<()>) {
        if self.write_error.is_some() {
            return;
        }
        if let Err(err) = write(&mut self.out) {
            warn!("terminal output failed: {err}");
            self.write_error = Some(err.kind());
        }
    }
}

/// One tab-separated line: title, subtitle, `lat,lon` and the website if any.
pub(crate) fn annotation_line(annotation: &Annotation) -> String {
    let coordinate = annotation.coordinate();
    let mut line = format!(
        "{}\t{}\t{:.6},{:.6}",
        annotation.title.as_deref().unwrap_or(UNNAMED),
        annotation.subtitle.as_deref().unwrap_or_default(),
        coordinate.y,
        coordinate.x,
    );
    if let Some(url) = &annotation.url {
        line.push('\t');
        line.push_str(url.as_str());
    }
    line
}

/// `region lat,lon span dlat x dlon (map type)`.
pub(crate) fn region_line(viewport: &Viewport, map_type: MapType) -> String {
    let center = viewport.center();
    let span = viewport.span();
    format!(
        "region {:.5},{:.5} span {:.5}x{:.5} ({map_type:?})",
        center.y, center.x, span.latitude_delta, span.longitude_delta,
    )
}

impl<W: Write> MapSurface for TerminalSurface<W> {
    fn replace_annotations(&mut self, annotations: &[Annotation]) {
        self.emit(|out| {
            if annotations.is_empty() {
                return writeln!(out, "No matches found");
            }
            annotations
                .iter()
                .try_for_each(|annotation| writeln!(out, "{}", annotation_line(annotation)))
        });
    }

    fn set_viewport(&mut self, viewport: &Viewport) {
        debug!("viewport now {viewport:?}");
    }

    fn set_map_type(&mut self, map_type: MapType) {
        debug!("map type now {map_type:?}");
    }

    fn set_shows_user_location(&mut self, shows: bool) {
        debug!("user location marker shown: {shows}");
    }

    fn present_detail(&mut self, detail: &AnnotationDetail) {
        self.emit(|out| {
            writeln!(out, "{}", detail.title().unwrap_or(UNNAMED))?;
            if let Some(phone) = detail.phone_number() {
                writeln!(out, "  phone: {phone}")?;
            }
            if let Some(url) = detail.url() {
                writeln!(out, "  website: {url}")?;
            }
            Ok(())
        });
    }

    fn dismiss_detail(&mut self) {
        debug!("detail view dismissed");
    }
}

/// `LocationProvider` reporting a configured position.
///
/// Access counts as granted when a position is configured and denied
/// otherwise.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct FixedLocationProvider {
    position: Option<Coordinate>,
    updating: bool,
}

impl FixedLocationProvider {
    pub(crate) const fn new(position: Option<Coordinate>) -> Self {
        Self {
            position,
            updating: false,
        }
    }

    #[cfg(test)]
    pub(crate) const fn is_updating(&self) -> bool {
        self.updating
    }
}

impl LocationProvider for FixedLocationProvider {
    fn authorization_status(&self) -> AuthorizationStatus {
        if self.position.is_some() {
            AuthorizationStatus::Granted
        } else {
            AuthorizationStatus::Denied
        }
    }

    fn request_when_in_use_authorization(&mut self) {
        debug!("location permission is fixed; ignoring request");
    }

    fn last_known_location(&self) -> Option<Coordinate> {
        self.position
    }

    fn start_updating(&mut self) {
        self.updating = true;
    }

    fn stop_updating(&mut self) {
        self.updating = false;
    }
}

/// `LinkOpener` that collects URLs for printing.
#[derive(Debug, Clone, Default)]
pub(crate) struct CollectedLinks {
    links: Vec<Url>,
}

impl CollectedLinks {
    pub(crate) fn links(&self) -> &[Url] {
        &self.links
    }
}

impl LinkOpener for CollectedLinks {
    fn open(&mut self, url: &Url) {
        info!("opening {url}");
        self.links.push(url.clone());
    }
}
