use crate::remote::{GeoClient, GeoEntry, RemoteError};
use crate::tests::utils::{server_error, test_endpoints, MockTransport};
use serde_json::json;

fn entry(id: &str, name: &str) -> GeoEntry {
    GeoEntry {
        id: id.into(),
        name: name.into(),
    }
}

#[test]
fn lists_states_of_country() {
    let transport = MockTransport::new(vec![Ok(json!({
        "id": "AR",
        "name": "Argentina",
        "states": [
            { "id": "TUxBUENBUGw3M2E1", "name": "Capital Federal" },
            { "id": "TUxBUEJSQWwyMzA1", "name": "Bs.As. G.B.A. Norte" }
        ]
    }))]);
    let geo = GeoClient::new(&transport, test_endpoints());

    let states = geo.list_states("AR");

    assert_eq!(
        states,
        vec![
            entry("TUxBUENBUGw3M2E1", "Capital Federal"),
            entry("TUxBUEJSQWwyMzA1", "Bs.As. G.B.A. Norte"),
        ]
    );
    assert_eq!(transport.calls()[0].path(), "/classified_locations/countries/AR");
}

#[test]
fn lists_cities_of_state() {
    let transport = MockTransport::new(vec![Ok(json!({
        "id": "TUxBUENBUGw3M2E1",
        "cities": [{ "id": "TUxBQ0NBUGZlZG1sYQ", "name": "Palermo" }]
    }))]);
    let geo = GeoClient::new(&transport, test_endpoints());

    let cities = geo.list_cities("TUxBUENBUGw3M2E1");

    assert_eq!(cities, vec![entry("TUxBQ0NBUGZlZG1sYQ", "Palermo")]);
    assert_eq!(
        transport.calls()[0].path(),
        "/classified_locations/states/TUxBUENBUGw3M2E1"
    );
}

#[test]
fn lists_subcategories() {
    let transport = MockTransport::new(vec![Ok(json!({
        "id": "MLA1459",
        "children_categories": [
            { "id": "MLA1472", "name": "Departamentos", "total_items_in_this_category": 10 },
            { "id": "MLA1466", "name": "Casas" }
        ]
    }))]);
    let geo = GeoClient::new(&transport, test_endpoints());

    let subs = geo.list_subcategories("MLA1459");

    assert_eq!(subs.len(), 2);
    assert_eq!(subs[1], entry("MLA1466", "Casas"));
    assert_eq!(transport.calls()[0].path(), "/categories/MLA1459");
}

#[test]
fn failed_lookups_yield_empty_lists() {
    let transport = MockTransport::new(vec![
        server_error(),
        Err(RemoteError::Network("connection reset".into())),
        Ok(json!({ "unexpected": true, "children_categories": "nope" })),
    ]);
    let geo = GeoClient::new(&transport, test_endpoints());

    assert!(geo.list_states("AR").is_empty());
    assert!(geo.list_cities("X").is_empty());
    assert!(geo.list_subcategories("MLA1459").is_empty());
    assert_eq!(transport.call_count(), 3);
}
