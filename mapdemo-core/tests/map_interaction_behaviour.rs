//! Behavioural tests for [`MapController`](mapdemo_core::MapController).

use geo::Coord;
use mapdemo_core::test_support::{
    StubPlaceSearchProvider, TestController, block_on, coffee_places, test_controller,
};
use mapdemo_core::{
    AnnotationDetail, DetailAction, InteractionError, MapEvent, MapItem, SearchError,
    SearchOutcome, TravelMode, annotation_from_place,
};
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use std::cell::RefCell;

const DEVICE_LOCATION: Coord<f64> = Coord { x: -122.0, y: 37.3 };

/// Scenario state shared between steps.
struct MapWorld {
    controller: RefCell<TestController>,
    search: RefCell<Option<Result<SearchOutcome, SearchError>>>,
    detail: RefCell<Option<AnnotationDetail>>,
    interaction: RefCell<Option<Result<(), InteractionError>>>,
}

#[fixture]
fn world() -> MapWorld {
    MapWorld {
        controller: RefCell::new(test_controller(StubPlaceSearchProvider::with_places(
            Vec::new(),
        ))),
        search: RefCell::new(None),
        detail: RefCell::new(None),
        interaction: RefCell::new(None),
    }
}

fn coffee_controller() -> TestController {
    test_controller(StubPlaceSearchProvider::with_places(coffee_places()))
}

fn first_coffee_annotation() -> mapdemo_core::Annotation {
    annotation_from_place(coffee_places().remove(0))
}

// --- Given steps ---

#[given("a map showing coffee shops near Cupertino")]
fn coffee_map(#[from(world)] world: &MapWorld) {
    *world.controller.borrow_mut() = coffee_controller();
    world.controller.borrow_mut().start();
}

#[given("a completed search for coffee")]
fn completed_search(#[from(world)] world: &MapWorld) {
    let mut controller = world.controller.borrow_mut();
    block_on(controller.submit_search("coffee")).expect("search should succeed");
}

#[given("the device reports its location")]
fn device_location(#[from(world)] world: &MapWorld) {
    world
        .controller
        .borrow_mut()
        .handle_location_event(mapdemo_core::LocationEvent::Updated(DEVICE_LOCATION));
}

#[given("the detail view for the first annotation is open")]
fn detail_open(#[from(world)] world: &MapWorld) {
    let detail = world
        .controller
        .borrow_mut()
        .handle_map_event(MapEvent::DetailDisclosureRequested(MapItem::Annotation(
            first_coffee_annotation(),
        )));
    *world.detail.borrow_mut() = detail;
}

// --- When steps ---

#[when("I search for coffee")]
fn search_coffee(#[from(world)] world: &MapWorld) {
    let mut controller = world.controller.borrow_mut();
    *world.search.borrow_mut() = Some(block_on(controller.submit_search("coffee")));
}

#[when("an older search completes after a newer one")]
fn stale_completion(#[from(world)] world: &MapWorld) {
    let mut controller = world.controller.borrow_mut();
    let older = controller.begin_search("tea");
    let newer = controller.begin_search("coffee");
    let newer_results = vec![first_coffee_annotation()];
    let older_results = vec![annotation_from_place(coffee_places().remove(1))];
    controller
        .complete_search(newer, Ok(newer_results))
        .expect("newer search should complete");
    *world.search.borrow_mut() = Some(controller.complete_search(older, Ok(older_results)));
}

#[when("a later search fails")]
fn later_search_fails(#[from(world)] world: &MapWorld) {
    let mut controller = world.controller.borrow_mut();
    let ticket = controller.begin_search("tea");
    *world.search.borrow_mut() = Some(controller.complete_search(
        ticket,
        Err(SearchError::Network {
            url: "http://search.example".to_owned(),
            message: "connection refused".to_owned(),
        }),
    ));
}

#[when("I request directions to the first annotation")]
fn request_directions(#[from(world)] world: &MapWorld) {
    let result = world
        .controller
        .borrow_mut()
        .request_directions(&first_coffee_annotation());
    *world.interaction.borrow_mut() = Some(result);
}

#[when("I visit the website")]
fn visit_website(#[from(world)] world: &MapWorld) {
    let mut guard = world.detail.borrow_mut();
    let detail = guard.as_mut().expect("detail view should be open");
    let result = world
        .controller
        .borrow_mut()
        .handle_detail_action(detail, DetailAction::VisitWebsite);
    *world.interaction.borrow_mut() = Some(result);
}

#[when("I ask for details of the user location marker")]
fn user_marker_details(#[from(world)] world: &MapWorld) {
    let detail = world
        .controller
        .borrow_mut()
        .handle_map_event(MapEvent::DetailDisclosureRequested(MapItem::UserLocation(
            DEVICE_LOCATION,
        )));
    *world.detail.borrow_mut() = detail;
}

// --- Then steps ---

#[then("two annotations are displayed")]
fn two_displayed(#[from(world)] world: &MapWorld) {
    let search = world.search.borrow();
    assert_eq!(
        search.as_ref().and_then(|r| r.as_ref().ok()),
        Some(&SearchOutcome::Displayed(2))
    );
    assert_eq!(world.controller.borrow().surface().displayed().len(), 2);
}

#[then("the first subtitle is the phone number and the second is empty")]
fn subtitles(#[from(world)] world: &MapWorld) {
    let controller = world.controller.borrow();
    let displayed = controller.surface().displayed();
    assert_eq!(displayed[0].subtitle.as_deref(), Some("555-1111"));
    assert_eq!(displayed[1].subtitle.as_deref(), Some(""));
    assert!(displayed[1].url.is_some());
}

#[then("only the newer results are displayed")]
fn newer_displayed(#[from(world)] world: &MapWorld) {
    let search = world.search.borrow();
    assert_eq!(
        search.as_ref().and_then(|r| r.as_ref().ok()),
        Some(&SearchOutcome::Stale)
    );
    let controller = world.controller.borrow();
    assert_eq!(controller.surface().annotation_sets().len(), 1);
    assert_eq!(
        controller.surface().displayed()[0].title.as_deref(),
        Some("Cafe A")
    );
}

#[then("the coffee results are still displayed")]
fn coffee_still_displayed(#[from(world)] world: &MapWorld) {
    let search = world.search.borrow();
    assert!(
        matches!(search.as_ref(), Some(Err(SearchError::Network { .. }))),
        "expected a network error, got {search:?}"
    );
    assert_eq!(world.controller.borrow().state().annotations().len(), 2);
}

#[then("directions are unavailable")]
fn directions_unavailable(#[from(world)] world: &MapWorld) {
    assert_eq!(
        *world.interaction.borrow(),
        Some(Err(InteractionError::LocationUnavailable))
    );
}

#[then("no directions are dispatched")]
fn no_directions(#[from(world)] world: &MapWorld) {
    assert!(world.controller.borrow().launcher().requests().is_empty());
}

#[then("driving directions are dispatched from the device location")]
fn directions_dispatched(#[from(world)] world: &MapWorld) {
    assert_eq!(*world.interaction.borrow(), Some(Ok(())));
    let controller = world.controller.borrow();
    let requests = controller.launcher().requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].source, DEVICE_LOCATION);
    assert_eq!(requests[0].destination, first_coffee_annotation().coordinate());
    assert_eq!(requests[0].mode, TravelMode::Driving);
}

#[then("the website control is disabled")]
fn website_disabled(#[from(world)] world: &MapWorld) {
    assert_eq!(
        *world.interaction.borrow(),
        Some(Err(InteractionError::MissingUrl))
    );
    let detail = world.detail.borrow();
    assert!(!detail.as_ref().expect("detail view").website_enabled());
}

#[then("no link is opened")]
fn no_link(#[from(world)] world: &MapWorld) {
    assert!(world.controller.borrow().link_opener().opened().is_empty());
}

#[then("no detail view is presented")]
fn no_detail(#[from(world)] world: &MapWorld) {
    assert!(world.detail.borrow().is_none());
    assert!(world.controller.borrow().surface().presented().is_empty());
}

// --- Scenario registrations ---

macro_rules! register_scenario {
    ($fn_name:ident, $index:literal) => {
        #[scenario(path = "tests/features/map_interaction.feature", index = $index)]
        fn $fn_name(world: MapWorld) {
            let _ = world;
        }
    };
}

register_scenario!(searching_displays_annotations, 0);
register_scenario!(stale_completion_discarded, 1);
register_scenario!(failed_search_leaves_map, 2);
register_scenario!(directions_before_fix, 3);
register_scenario!(directions_after_fix, 4);
register_scenario!(website_without_url, 5);
register_scenario!(user_marker_selection, 6);
