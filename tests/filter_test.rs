use flightdash::filter::{Endpoint, FilterCriteria, FilterInput};

fn params(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

#[test]
fn empty_input_uses_unfiltered_endpoint() {
    let criteria = FilterInput::default().parse().unwrap();
    assert!(criteria.is_empty());
    let request = criteria.request();
    assert_eq!(request.endpoint, Endpoint::All);
    assert_eq!(request.endpoint.path(), "/flights");
    assert!(request.params.is_empty());
}

#[test]
fn each_single_field_is_serialized_alone() {
    let cases = [
        ("altitude_min", "1500"),
        ("altitude_max", "6000"),
        ("distance_min", "0.5"),
        ("distance_max", "2"),
        ("speed_min", "100"),
        ("speed_max", "250.5"),
        ("tracking_number", "3c6"),
    ];

    for (key, value) in cases {
        let mut input = FilterInput::default();
        input.set(key, value).unwrap();
        let request = input.parse().unwrap().request();
        assert_eq!(request.endpoint, Endpoint::Filtered, "{key}");
        assert_eq!(request.endpoint.path(), "/flights/filtered");
        assert_eq!(request.params, params(&[(key, value)]), "{key}");
    }
}

#[test]
fn params_keep_fixed_order() {
    let mut input = FilterInput::default();
    input.set("tracking_number", "abc").unwrap();
    input.set("speed_max", "300").unwrap();
    input.set("altitude_min", "1000").unwrap();
    let request = input.parse().unwrap().request();
    assert_eq!(
        request.params,
        params(&[
            ("altitude_min", "1000"),
            ("speed_max", "300"),
            ("tracking_number", "abc"),
        ])
    );
}

#[test]
fn numbers_use_shortest_form() {
    let criteria = FilterCriteria {
        altitude_max: Some(5000.0),
        distance_max: Some(1.25),
        ..FilterCriteria::default()
    };
    assert_eq!(
        criteria.to_url_params(),
        params(&[("altitude_max", "5000"), ("distance_max", "1.25")])
    );
}

#[test]
fn whitespace_tracking_number_is_absent() {
    let mut input = FilterInput::default();
    input.tracking_number = "   ".into();
    let criteria = input.parse().unwrap();
    assert_eq!(criteria.tracking_number, None);
    assert_eq!(criteria.request().endpoint, Endpoint::All);
}

#[test]
fn tracking_number_is_trimmed() {
    let mut input = FilterInput::default();
    input.tracking_number = "  3c6444 ".into();
    assert_eq!(input.parse().unwrap().tracking_number.as_deref(), Some("3c6444"));
}

#[test]
fn inverted_range_is_passed_through() {
    let mut input = FilterInput::default();
    input.altitude_min = "6000".into();
    input.altitude_max = "1000".into();
    let criteria = input.parse().unwrap();
    assert_eq!(criteria.altitude_min, Some(6000.0));
    assert_eq!(criteria.altitude_max, Some(1000.0));
}

#[test]
fn rejects_non_numeric_bound() {
    let mut input = FilterInput::default();
    input.speed_min = "fast".into();
    let err = input.parse().unwrap_err();
    assert!(err.to_string().contains("speed_min"));
}

#[test]
fn rejects_non_finite_bound() {
    let mut input = FilterInput::default();
    input.altitude_max = "NaN".into();
    assert!(input.parse().is_err());
}

#[test]
fn set_accepts_dashed_keys_and_rejects_unknown() {
    let mut input = FilterInput::default();
    input.set("altitude-max", "3000").unwrap();
    assert_eq!(input.altitude_max, "3000");
    assert!(input.set("heading", "90").is_err());
}

#[test]
fn clear_resets_every_field() {
    let mut input = FilterInput::default();
    input.set("speed_min", "100").unwrap();
    input.set("tracking_number", "abc").unwrap();
    input.clear();
    assert_eq!(input, FilterInput::default());
}
