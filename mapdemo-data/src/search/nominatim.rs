//! Nominatim search API response types.
//!
//! With `format=jsonv2` the service answers with a JSON array of places, or
//! with an object carrying an `error` member when the query is rejected.
//!
//! See: <https://nominatim.org/release-docs/latest/api/Search/>

use std::collections::HashMap;

use log::debug;
use mapdemo_core::{Coordinate, PlaceItem, SearchError};
use serde::Deserialize;
use url::Url;

/// Tags holding a phone number, in order of preference.
const PHONE_TAGS: [&str; 2] = ["phone", "contact:phone"];
/// Tags holding a website, in order of preference.
const WEBSITE_TAGS: [&str; 2] = ["website", "contact:website"];

/// Top-level search response.
///
/// An object with an `error` member is an error even if it carries other
/// members.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum SearchResponse {
    Error(ErrorResponse),
    Places(Vec<Place>),
}

#[derive(Debug, Deserialize)]
pub(crate) struct ErrorResponse {
    pub error: ErrorDetail,
}

/// Nominatim reports errors either as a bare string or as a
/// `{ "code": .., "message": .. }` object.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum ErrorDetail {
    Message(String),
    Structured {
        code: Option<u16>,
        message: String,
    },
}

impl ErrorDetail {
    fn into_message(self) -> String {
        match self {
            Self::Message(message) => message,
            Self::Structured {
                code: Some(code),
                message,
            } => format!("{code}: {message}"),
            Self::Structured {
                code: None,
                message,
            } => message,
        }
    }
}

/// One place in a `jsonv2` response.
#[derive(Debug, Deserialize)]
pub(crate) struct Place {
    /// Latitude as a decimal string.
    pub lat: String,
    /// Longitude as a decimal string.
    pub lon: String,
    /// Local name; often empty for addresses.
    #[serde(default)]
    pub name: Option<String>,
    /// Full comma-separated label.
    #[serde(default)]
    pub display_name: Option<String>,
    /// Additional OSM tags, present when requested with `extratags=1`.
    #[serde(default)]
    pub extratags: Option<HashMap<String, String>>,
}

impl Place {
    fn tag(&self, keys: &[&str]) -> Option<&str> {
        let tags = self.extratags.as_ref()?;
        keys.iter()
            .find_map(|key| tags.get(*key))
            .map(|value| value.trim())
            .filter(|value| !value.is_empty())
    }

    fn coordinate(&self) -> Result<Coordinate, SearchError> {
        let parse = |raw: &str, axis: &str, limit: f64| {
            raw.trim()
                .parse::<f64>()
                .ok()
                .filter(|value| (-limit..=limit).contains(value))
                .ok_or_else(|| SearchError::Parse {
                    message: format!("invalid {axis} {raw:?}"),
                })
        };
        Ok(Coordinate {
            x: parse(&self.lon, "longitude", 180.0)?,
            y: parse(&self.lat, "latitude", 90.0)?,
        })
    }

    fn into_place_item(self) -> Result<PlaceItem, SearchError> {
        let coordinate = self.coordinate()?;
        let phone_number = self.tag(&PHONE_TAGS).map(str::to_owned);
        let url = self.tag(&WEBSITE_TAGS).and_then(|raw| {
            Url::parse(raw)
                .inspect_err(|err| debug!("dropping unparseable website {raw:?}: {err}"))
                .ok()
        });
        let name = [self.name, self.display_name]
            .into_iter()
            .flatten()
            .find(|candidate| !candidate.trim().is_empty());
        Ok(PlaceItem {
            name,
            phone_number,
            url,
            coordinate,
        })
    }
}

impl SearchResponse {
    pub(crate) fn into_places(self) -> Result<Vec<PlaceItem>, SearchError> {
        match self {
            Self::Error(response) => Err(SearchError::Service {
                message: response.error.into_message(),
            }),
            Self::Places(places) => places.into_iter().map(Place::into_place_item).collect(),
        }
    }
}

/// Decode a Nominatim `jsonv2` search body into place items.
///
/// # Errors
///
/// Returns [`SearchError::Service`] when the body reports an error and
/// [`SearchError::Parse`] when it is not a valid response.
pub fn decode_search_body(body: &[u8]) -> Result<Vec<PlaceItem>, SearchError> {
    let response: SearchResponse =
        serde_json::from_slice(body).map_err(|err| SearchError::Parse {
            message: err.to_string(),
        })?;
    response.into_places()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn decodes_places_with_contact_tags() {
        let body = br#"[
            {
                "lat": "37.331", "lon": "-122.031",
                "name": "Cafe A",
                "display_name": "Cafe A, Cupertino",
                "extratags": {"phone": "555-1111"}
            },
            {
                "lat": "37.329", "lon": "-122.028",
                "name": "Cafe B",
                "extratags": {"contact:website": "http://b.example"}
            }
        ]"#;

        let places = decode_search_body(body).expect("should decode");

        assert_eq!(places.len(), 2);
        assert_eq!(places[0].name.as_deref(), Some("Cafe A"));
        assert_eq!(places[0].phone_number.as_deref(), Some("555-1111"));
        assert!(places[0].url.is_none());
        assert_eq!(places[0].coordinate, Coordinate { x: -122.031, y: 37.331 });
        assert!(places[1].phone_number.is_none());
        assert_eq!(
            places[1].url.as_ref().map(Url::as_str),
            Some("http://b.example/")
        );
    }

    #[rstest]
    fn falls_back_to_display_name() {
        let body = br#"[{"lat": "1", "lon": "2", "name": "", "display_name": "1 Main St"}]"#;

        let places = decode_search_body(body).expect("should decode");

        assert_eq!(places[0].name.as_deref(), Some("1 Main St"));
    }

    #[rstest]
    fn missing_names_leave_title_empty() {
        let body = br#"[{"lat": "1", "lon": "2", "extratags": null}]"#;

        let places = decode_search_body(body).expect("should decode");

        assert!(places[0].name.is_none());
        assert!(places[0].phone_number.is_none());
    }

    #[rstest]
    fn drops_unparseable_websites() {
        let body = br#"[{"lat": "1", "lon": "2", "extratags": {"website": "not a url"}}]"#;

        let places = decode_search_body(body).expect("should decode");

        assert!(places[0].url.is_none());
    }

    #[rstest]
    fn empty_array_is_no_results() {
        let places = decode_search_body(b"[]").expect("should decode");
        assert!(places.is_empty());
    }

    #[rstest]
    #[case(br#"{"error": "Nothing to search for"}"#.as_slice(), "Nothing to search for")]
    #[case(br#"{"error": {"code": 400, "message": "Bad Request"}}"#.as_slice(), "400: Bad Request")]
    fn error_bodies_become_service_errors(#[case] body: &[u8], #[case] expected: &str) {
        let err = decode_search_body(body).expect_err("should fail");
        assert_eq!(
            err,
            SearchError::Service {
                message: expected.to_owned()
            }
        );
    }

    #[rstest]
    fn error_wins_over_results() {
        let body = br#"{"error": "rate limited", "results": [{"lat": "1", "lon": "2"}]}"#;

        let err = decode_search_body(body).expect_err("should fail");

        assert!(matches!(err, SearchError::Service { .. }));
    }

    #[rstest]
    #[case(br#"[{"lat": "north", "lon": "2"}]"#.as_slice())]
    #[case(br#"[{"lat": "95", "lon": "2"}]"#.as_slice())]
    #[case(br#"[{"lat": "1", "lon": "200"}]"#.as_slice())]
    #[case(br#"[{"lat": "NaN", "lon": "2"}]"#.as_slice())]
    #[case(b"not json".as_slice())]
    fn malformed_bodies_are_parse_errors(#[case] body: &[u8]) {
        let err = decode_search_body(body).expect_err("should fail");
        assert!(matches!(err, SearchError::Parse { .. }));
    }
}
