//! External link opening.

use url::Url;

/// Opens a URL in an external application. Fire-and-forget.
pub trait LinkOpener {
    /// Hand `url` to the external opener.
    fn open(&mut self, url: &Url);
}

impl<T: LinkOpener + ?Sized> LinkOpener for &mut T {
    fn open(&mut self, url: &Url) {
        (**self).open(url);
    }
}
