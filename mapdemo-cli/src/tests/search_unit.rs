//! Focused unit tests covering search CLI configuration and output.

use super::helpers::{StubSearchProviderBuilder, search_command_line};
use super::*;
use crate::search::{
    SearchArgs, SearchConfig, config_from_layers_for_test, parse_map_type, run_search_with,
};
use mapdemo_core::test_support::{StubPlaceSearchProvider, coffee_places};
use mapdemo_core::{MapType, SearchError, SearchOutcome};
use rstest::{fixture, rstest};

#[fixture]
fn args() -> SearchArgs {
    SearchArgs {
        query: Some("coffee".to_owned()),
        latitude: Some(37.33),
        longitude: Some(-122.03),
        ..SearchArgs::default()
    }
}

fn search_args_from(argv: Vec<String>) -> SearchArgs {
    let cli = Cli::try_parse_from(argv).expect("arguments should parse");
    match cli.command {
        Command::Search(args) => args,
        Command::Directions(_) => panic!("expected search command"),
    }
}

#[rstest]
#[case::query(ARG_QUERY, ENV_SEARCH_QUERY)]
#[case::latitude(ARG_LATITUDE, ENV_SEARCH_LATITUDE)]
#[case::longitude(ARG_LONGITUDE, ENV_SEARCH_LONGITUDE)]
fn converting_without_required_fields_errors(
    mut args: SearchArgs,
    #[case] missing: &'static str,
    #[case] env_var: &'static str,
) {
    match missing {
        ARG_QUERY => args.query = None,
        ARG_LATITUDE => args.latitude = None,
        _ => args.longitude = None,
    }

    let err = SearchConfig::try_from(args).expect_err("missing field should error");
    match err {
        CliError::MissingArgument { field, env } => {
            assert_eq!(field, missing);
            assert_eq!(env, env_var);
        }
        other => panic!("expected MissingArgument, found {other:?}"),
    }
}

#[rstest]
fn search_config_applies_defaults(args: SearchArgs) {
    let config = SearchConfig::try_from(args).expect("config should build");

    assert_eq!(config.query, "coffee");
    assert_eq!(config.location.y, 37.33);
    assert_eq!(config.location.x, -122.03);
    assert_eq!(config.viewport.center(), config.location);
    assert_eq!(config.viewport.span().latitude_delta, 0.05);
    assert_eq!(config.map_type, MapType::Standard);
    assert_eq!(config.search_base_url, "https://nominatim.openstreetmap.org");
    assert!(!config.json);
    assert!(config.limit.is_none());
}

#[rstest]
fn out_of_range_location_is_rejected(mut args: SearchArgs) {
    args.latitude = Some(91.0);

    let err = SearchConfig::try_from(args).expect_err("latitude should be rejected");

    assert!(matches!(err, CliError::InvalidCoordinate { latitude, .. } if latitude == 91.0));
}

#[rstest]
#[case(0.0)]
#[case(-1.0)]
#[case(f64::NAN)]
fn invalid_span_is_rejected(mut args: SearchArgs, #[case] span: f64) {
    args.span_degrees = Some(span);

    let err = SearchConfig::try_from(args).expect_err("span should be rejected");

    assert!(matches!(err, CliError::InvalidRegion(_)));
}

#[rstest]
fn invalid_base_url_is_rejected(mut args: SearchArgs) {
    args.search_base_url = Some("not a url".to_owned());

    let err = SearchConfig::try_from(args).expect_err("url should be rejected");

    match err {
        CliError::InvalidUrl { field, value, .. } => {
            assert_eq!(field, ARG_SEARCH_BASE_URL);
            assert_eq!(value, "not a url");
        }
        other => panic!("expected InvalidUrl, found {other:?}"),
    }
}

#[rstest]
#[case("standard", MapType::Standard)]
#[case("Satellite", MapType::Satellite)]
#[case(" HYBRID ", MapType::Hybrid)]
fn map_type_names_are_case_insensitive(#[case] name: &str, #[case] expected: MapType) {
    assert_eq!(parse_map_type(name).expect("name should parse"), expected);
}

#[rstest]
fn unknown_map_type_is_rejected(mut args: SearchArgs) {
    args.map_type = Some("terrain".to_owned());

    let err = SearchConfig::try_from(args).expect_err("map type should be rejected");

    assert!(matches!(err, CliError::InvalidMapType { value } if value == "terrain"));
}

#[rstest]
fn merge_layers_maps_configuration_errors() {
    use ortho_config::MergeComposer;
    use serde_json::json;

    let mut composer = MergeComposer::new();
    composer.push_cli(json!({ "latitude": "north" }));

    let err = config_from_layers_for_test(composer.layers())
        .expect_err("invalid config layer should map to CliError::Configuration");
    match err {
        CliError::Configuration(_) => {}
        other => panic!("expected CliError::Configuration, found {other:?}"),
    }
}

#[rstest]
fn merge_layers_honours_precedence() {
    use ortho_config::MergeComposer;
    use serde_json::json;

    let mut composer = MergeComposer::new();
    composer.push_file(
        json!({
            "query": "tea",
            "latitude": 51.5,
            "longitude": -0.1,
            "map_type": "hybrid",
            "search_base_url": "http://from-file:8080",
        }),
        None,
    );
    composer.push_environment(json!({
        "query": "coffee",
        "span_degrees": 0.02,
    }));
    composer.push_cli(json!({
        "latitude": 51.6,
    }));

    let config =
        config_from_layers_for_test(composer.layers()).expect("merged config should build");
    assert_eq!(config.query, "coffee");
    assert_eq!(config.location.y, 51.6);
    assert_eq!(config.location.x, -0.1);
    assert_eq!(config.viewport.span().longitude_delta, 0.02);
    assert_eq!(config.map_type, MapType::Hybrid);
    assert_eq!(config.search_base_url, "http://from-file:8080");
}

#[rstest]
fn run_search_lists_annotations_then_region() {
    let builder = StubSearchProviderBuilder {
        provider: StubPlaceSearchProvider::with_places(coffee_places()),
    };
    let args = search_args_from(search_command_line(&[]));
    let mut stdout = Vec::new();

    let outcome = run_search_with(args, &builder, &mut stdout).expect("search should succeed");

    assert_eq!(outcome, SearchOutcome::Displayed(2));
    let text = String::from_utf8(stdout).expect("stdout utf-8");
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 3, "expected two annotations and a region");
    assert_eq!(lines[0], "Cafe A\t555-1111\t37.331000,-122.031000");
    assert_eq!(lines[1], "Cafe B\t\t37.329000,-122.028000\thttp://b.example/");
    assert!(lines[2].starts_with("region "));
    assert!(lines[2].ends_with("(Standard)"));
}

#[rstest]
fn run_search_reports_no_matches() {
    let builder = StubSearchProviderBuilder {
        provider: StubPlaceSearchProvider::with_places(Vec::new()),
    };
    let args = search_args_from(search_command_line(&["--map-type", "satellite"]));
    let mut stdout = Vec::new();

    let outcome = run_search_with(args, &builder, &mut stdout).expect("search should succeed");

    assert_eq!(outcome, SearchOutcome::NoResults);
    let text = String::from_utf8(stdout).expect("stdout utf-8");
    let mut lines = text.lines();
    assert_eq!(lines.next(), Some("No matches found"));
    assert_eq!(
        lines.next(),
        Some("region 37.33000,-122.03000 span 0.05000x0.05000 (Satellite)")
    );
}

#[rstest]
fn run_search_prints_json_report() {
    let builder = StubSearchProviderBuilder {
        provider: StubPlaceSearchProvider::with_places(coffee_places()),
    };
    let args = search_args_from(search_command_line(&["--json"]));
    let mut stdout = Vec::new();

    run_search_with(args, &builder, &mut stdout).expect("search should succeed");

    let report: serde_json::Value = serde_json::from_slice(&stdout).expect("stdout is JSON");
    assert_eq!(report["query"], "coffee");
    assert_eq!(report["map_type"], "standard");
    let annotations = report["annotations"]
        .as_array()
        .expect("annotations array");
    assert_eq!(annotations.len(), 2);
    assert_eq!(annotations[0]["title"], "Cafe A");
    assert_eq!(annotations[0]["subtitle"], "555-1111");
    assert_eq!(annotations[1]["subtitle"], "");
    assert_eq!(annotations[1]["url"], "http://b.example/");
}

#[rstest]
fn run_search_surfaces_search_failures() {
    let builder = StubSearchProviderBuilder {
        provider: StubPlaceSearchProvider::with_error(SearchError::Service {
            message: "rate limited".to_owned(),
        }),
    };
    let args = search_args_from(search_command_line(&[]));
    let mut stdout = Vec::new();

    let err = run_search_with(args, &builder, &mut stdout).expect_err("search should fail");

    assert!(matches!(err, CliError::Search(SearchError::Service { .. })));
    assert!(stdout.is_empty());
}
