//! List controller behaviour: request modes, resets, image search, and the
//! list → detail → list round-trip.

use serde_json::json;

use restobrowse_core::{
    ApiError, DetailController, ImageSearchResponse, ImageUpload, ListController, ModeOutcome,
    PerPage, RequestKind, RequestMode, RestaurantId, RestaurantPage, RestaurantSummary, Route,
};

// ── Helpers ──────────────────────────────────────────────────────────

fn restaurant(id: i64, name: &str) -> RestaurantSummary {
    serde_json::from_value(json!({
        "restaurant_id": id,
        "name": name,
        "address": "Connaught Place, New Delhi",
        "average_cost_for_two": 800,
        "currency": "Indian Rupees(Rs.)",
        "cuisines": ["North Indian"],
        "aggregate_rating": 3.9
    }))
    .unwrap()
}

fn page(names: &[&str], total: u64) -> RestaurantPage {
    RestaurantPage {
        restaurants: names
            .iter()
            .enumerate()
            .map(|(i, n)| restaurant(i as i64 + 1, n))
            .collect(),
        total_count: total,
    }
}

/// A mounted controller already showing `names`.
fn loaded(names: &[&str], total: u64) -> ListController {
    let mut c = ListController::new(None, PerPage::Ten);
    let t = c.mount();
    assert!(c.apply_page(t.token, page(names, total)));
    c
}

fn listing_cuisines(mode: &RequestMode) -> Vec<String> {
    match mode {
        RequestMode::Listing(p) => p.cuisines.clone(),
        other => panic!("expected listing, got {other:?}"),
    }
}

// ── Request modes ────────────────────────────────────────────────────

#[test]
fn each_action_issues_exactly_one_mode() {
    let mut c = loaded(&["a"], 1);

    assert_eq!(c.apply_filters().mode.kind(), RequestKind::Listing);

    c.set_search_name("Barbeque");
    assert_eq!(c.search_by_name().unwrap().mode.kind(), RequestKind::NameSearch);

    c.set_latitude(Some(28.63));
    c.set_longitude(Some(77.21));
    c.set_range(Some(3.0));
    assert_eq!(c.search_nearby().unwrap().mode.kind(), RequestKind::Nearby);

    c.select_image(ImageUpload::new("sushi.png", vec![0x89, 0x50]));
    assert_eq!(c.search_by_image().unwrap().mode.kind(), RequestKind::ImageSearch);
}

#[test]
fn result_set_is_replaced_not_merged() {
    let mut c = loaded(&["a", "b", "c"], 30);
    c.set_search_name("Cafe");
    let t = c.search_by_name().unwrap();
    c.apply_page(t.token, page(&["Cafe Coffee Day"], 1));

    let r = c.results();
    assert_eq!(r.items.len(), 1);
    assert_eq!(r.items[0].name, "Cafe Coffee Day");
    assert_eq!(r.total, 1);
    assert_eq!(r.source, Some(RequestKind::NameSearch));
}

#[test]
fn name_search_keeps_pagination() {
    let mut c = loaded(&["a"], 100);
    c.set_page(3);
    c.set_per_page(PerPage::Twenty);
    c.set_search_name("Pind");
    c.search_by_name().unwrap();
    assert_eq!(c.query().page(), 3);
    assert_eq!(c.query().per_page(), PerPage::Twenty);
}

#[test]
fn dependency_changes_trigger_listing() {
    let mut c = loaded(&["a"], 100);
    assert!(c.set_page(2).is_some());
    assert!(c.set_page(2).is_none());
    assert!(c.cycle_per_page().is_some());
    assert!(c.add_cuisine("Cafe").is_some());
    assert!(c.remove_cuisine("Cafe").is_some());
}

#[test]
fn form_fields_do_not_trigger_requests() {
    let mut c = loaded(&["a"], 1);
    c.set_country_code(Some("1".into()));
    c.set_average_spent(Some(500.0));
    c.set_latitude(Some(1.0));
    assert!(c.loading().is_none());
}

// ── Cuisines ─────────────────────────────────────────────────────────

#[test]
fn adding_present_cuisine_is_noop() {
    let mut c = loaded(&["a"], 1);
    assert!(c.add_cuisine("Italian").is_some());
    assert!(c.add_cuisine("Italian").is_none());
    assert_eq!(c.query().cuisines().len(), 1);
}

#[test]
fn removing_absent_cuisine_is_noop() {
    let mut c = loaded(&["a"], 1);
    c.add_cuisine("Italian");
    assert!(c.remove_cuisine("Mexican").is_none());
    assert_eq!(c.query().cuisines(), ["Italian"]);
}

// ── Nearby guard ─────────────────────────────────────────────────────

#[test]
fn nearby_with_partial_triple_does_nothing() {
    let partials: [(Option<f64>, Option<f64>, Option<f64>); 4] = [
        (None, Some(77.2), Some(5.0)),
        (Some(28.6), None, Some(5.0)),
        (Some(28.6), Some(77.2), None),
        (None, None, None),
    ];
    for (lat, lon, range) in partials {
        let mut c = loaded(&["kept"], 1);
        c.set_latitude(lat);
        c.set_longitude(lon);
        c.set_range(range);
        assert!(c.search_nearby().is_none());
        assert!(c.loading().is_none());
        assert_eq!(c.results().items[0].name, "kept");
    }
}

#[test]
fn nearby_truncates_range_to_whole_km() {
    let mut c = loaded(&["a"], 1);
    c.set_latitude(Some(14.56));
    c.set_longitude(Some(121.02));
    c.set_range(Some(2.9));
    match c.search_nearby().unwrap().mode {
        RequestMode::Nearby(geo) => assert_eq!(geo.max_distance_km, 2),
        other => panic!("expected nearby, got {other:?}"),
    }
}

// ── Resets ───────────────────────────────────────────────────────────

fn fully_populated() -> ListController {
    let mut c = loaded(&["a"], 100);
    c.set_page(2);
    c.set_search_name("Tandoor");
    c.set_country_code(Some("1".into()));
    c.set_average_spent(Some(600.0));
    c.add_cuisine("Mughlai");
    c.set_latitude(Some(28.6));
    c.set_longitude(Some(77.2));
    c.set_range(Some(4.0));
    c
}

#[test]
fn reset_location_only_clears_geo() {
    let mut c = fully_populated();
    let t = c.reset_location();
    assert_eq!(t.mode.kind(), RequestKind::Listing);
    let q = c.query();
    assert!(q.latitude().is_none() && q.longitude().is_none() && q.range().is_none());
    assert_eq!(q.search_name(), "Tandoor");
    assert_eq!(q.cuisines(), ["Mughlai"]);
    assert_eq!(q.country_code(), Some("1"));
    assert_eq!(q.page(), 2);
}

#[test]
fn reset_filters_only_clears_filter_group() {
    let mut c = fully_populated();
    c.reset_filters();
    let q = c.query();
    assert!(q.country_code().is_none());
    assert!(q.average_spent().is_none());
    assert!(q.cuisines().is_empty());
    assert_eq!(q.search_name(), "Tandoor");
    assert!(q.geo().is_some());
}

#[test]
fn reset_search_only_clears_name() {
    let mut c = fully_populated();
    c.reset_search();
    let q = c.query();
    assert_eq!(q.search_name(), "");
    assert_eq!(q.cuisines(), ["Mughlai"]);
    assert!(q.geo().is_some());
    assert_eq!(q.average_spent(), Some(600.0));
}

// ── Image search ─────────────────────────────────────────────────────

#[test]
fn image_verdict_becomes_cuisine_filter_and_triggers_listing() {
    let mut c = loaded(&["a"], 1);
    c.select_image(ImageUpload::new("pizza.jpg", vec![0xff, 0xd8]));
    let t = c.search_by_image().unwrap();

    let response: ImageSearchResponse = serde_json::from_value(json!({
        "predicted_food": "Pizza",
        "cuisines": ["Italian", "Fast Food"]
    }))
    .unwrap();
    let follow_up = c.apply_image(t.token, response).expect("listing follow-up");

    assert_eq!(c.query().cuisines(), ["Italian", "Fast Food"]);
    assert_eq!(listing_cuisines(&follow_up.mode), vec!["Italian", "Fast Food"]);
    assert_eq!(c.dish_info().unwrap().predicted_food, "Pizza");
    assert!(c.image_uploaded());
    assert_eq!(c.loading(), Some(RequestKind::Listing));
}

#[test]
fn malformed_image_response_applies_results_without_dish_info() {
    let mut c = loaded(&["a", "b"], 2);
    c.add_cuisine("Thai");
    c.select_image(ImageUpload::new("mystery.jpg", vec![1]));
    let t = c.search_by_image().unwrap();

    let response: ImageSearchResponse = serde_json::from_value(json!({
        "cuisines": "Italian",
        "restaurants": [restaurant(9, "Pizza Hut")],
        "total_count": 1
    }))
    .unwrap();
    assert!(c.apply_image(t.token, response).is_none());

    assert!(c.dish_info().is_none());
    assert!(c.image_uploaded());
    assert_eq!(c.results().items.len(), 1);
    assert_eq!(c.results().total, 1);
    assert_eq!(c.query().cuisines(), ["Thai"]);
}

#[test]
fn image_response_without_results_empties_list() {
    let mut c = loaded(&["a", "b"], 2);
    c.select_image(ImageUpload::new("x.jpg", vec![1]));
    let t = c.search_by_image().unwrap();
    c.apply(t.token, Ok(ModeOutcome::Image(ImageSearchResponse::default())));
    assert!(c.results().items.is_empty());
    assert_eq!(c.results().total, 0);
}

#[test]
fn verdict_for_replaced_image_is_ignored() {
    let mut c = loaded(&["a"], 1);
    c.add_cuisine("Thai");
    c.select_image(ImageUpload::new("pizza.jpg", vec![1]));
    let pizza = c.search_by_image().unwrap();
    c.select_image(ImageUpload::new("sushi.jpg", vec![2]));
    assert!(c.loading().is_none());

    let response: ImageSearchResponse = serde_json::from_value(json!({
        "predicted_food": "pizza",
        "cuisines": ["Italian"]
    }))
    .unwrap();
    assert!(c.apply(pizza.token, Ok(ModeOutcome::Image(response))).is_none());

    assert_eq!(c.image().unwrap().file_name, "sushi.jpg");
    assert!(!c.image_uploaded());
    assert!(c.dish_info().is_none());
    assert_eq!(c.query().cuisines(), ["Thai"]);
    assert_eq!(c.results().items[0].name, "a");

    let sushi = c.search_by_image().unwrap();
    let response: ImageSearchResponse = serde_json::from_value(json!({
        "predicted_food": "sushi",
        "cuisines": ["Japanese"]
    }))
    .unwrap();
    assert!(c.apply(sushi.token, Ok(ModeOutcome::Image(response))).is_some());
    assert_eq!(c.dish_info().unwrap().predicted_food, "sushi");
    assert_eq!(c.query().cuisines(), ["Japanese"]);
}

// ── Failures and races ───────────────────────────────────────────────

#[test]
fn failure_leaves_previous_results() {
    let mut c = loaded(&["a", "b"], 2);
    c.set_search_name("x");
    let t = c.search_by_name().unwrap();
    assert!(c.apply(t.token, Err(ApiError::Status { status: 500, url: "u".into() })).is_none());
    assert_eq!(c.results().items.len(), 2);
    assert_eq!(c.results().source, Some(RequestKind::Listing));
    assert!(matches!(c.last_error(), Some(ApiError::Status { status: 500, .. })));
}

#[test]
fn slow_earlier_response_cannot_overwrite_later_one() {
    let mut c = loaded(&["start"], 1);
    c.set_search_name("slow");
    let slow = c.search_by_name().unwrap();
    c.set_latitude(Some(1.0));
    c.set_longitude(Some(2.0));
    c.set_range(Some(3.0));
    let fast = c.search_nearby().unwrap();

    assert!(c.apply_page(fast.token, page(&["near"], 1)));
    assert!(!c.apply_page(slow.token, page(&["by name"], 1)));
    assert_eq!(c.results().items[0].name, "near");
    assert_eq!(c.results().source, Some(RequestKind::Nearby));
}

#[test]
fn stale_failure_does_not_record_error() {
    let mut c = loaded(&["a"], 1);
    let old = c.apply_filters();
    let new = c.apply_filters();
    assert!(!c.apply_failure(old.token, ApiError::NetworkUnreachable("x".into())));
    assert!(c.last_error().is_none());
    assert!(c.apply_page(new.token, page(&["b"], 1)));
}

// ── Navigation round-trip ────────────────────────────────────────────

#[test]
fn list_detail_list_round_trip_restores_query() {
    let mut c = fully_populated();
    c.set_per_page(PerPage::Fifty);
    let before = c.query().clone();

    let (detail, _ticket) = DetailController::mount(RestaurantId(42), c.context());
    let route = detail.back();
    let context = match route {
        Route::List { context } => context.expect("context forwarded"),
        other => panic!("expected list route, got {other:?}"),
    };

    let restored = ListController::new(Some(&context), PerPage::Ten);
    assert_eq!(restored.query(), &before);
}

#[test]
fn round_trip_example_page_two_twenty_italian() {
    let mut c = loaded(&["a"], 100);
    c.set_page(2);
    c.set_per_page(PerPage::Twenty);
    c.add_cuisine("Italian");

    let (detail, ticket) = DetailController::mount(RestaurantId(42), c.context());
    assert_eq!(ticket.id, RestaurantId(42));
    let Route::List { context: Some(context) } = detail.back() else {
        panic!("expected list route with context");
    };
    let mut back = ListController::new(Some(&context), PerPage::Ten);

    assert_eq!(back.query().page(), 2);
    assert_eq!(back.query().per_page(), PerPage::Twenty);
    assert_eq!(back.query().cuisines(), ["Italian"]);
    assert_eq!(listing_cuisines(&back.mount().mode), vec!["Italian"]);
}

#[test]
fn fresh_mount_uses_defaults() {
    let c = ListController::new(None, PerPage::Ten);
    assert_eq!(c.query().page(), 1);
    assert_eq!(c.query().per_page(), PerPage::Ten);
    assert!(c.query().cuisines().is_empty());
    assert_eq!(c.query().search_name(), "");
}
