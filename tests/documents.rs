//! End-to-end checks against literal HexJSON documents.

use hexjson::{Error, HexJson, OffsetLayout, grid_for_hexjson, render_hexjson};
use serde_json::{Value, json};

const EPS: f64 = 1e-9;

fn two_hexes() -> HexJson {
    HexJson::from_value(json!({
        "layout": "odd-r",
        "hexes": {
            "A": { "q": 0, "r": 0, "n": 1 },
            "B": { "q": 1, "r": 0, "n": 2 }
        }
    }))
    .unwrap()
}

#[test]
fn two_hexes_sit_one_width_apart() {
    let data = two_hexes();
    let out = render_hexjson(&data, 100.0, 100.0).unwrap();

    let radius = 100.0 / (2.5 * 3f64.sqrt());
    assert!((out.shape().radius - radius).abs() < EPS);
    assert!((out.shape().width - 40.0).abs() < EPS);

    let (a, b) = (out.hexes()[0], out.hexes()[1]);
    assert_eq!((a.key(), b.key()), ("A", "B"));
    assert_eq!(a.y, b.y);
    assert!((b.x - a.x - out.shape().width).abs() < EPS);
    assert!((a.x - 20.0).abs() < EPS);
    assert!((a.y - radius).abs() < EPS);
}

#[test]
fn dump_records_keep_attributes_and_add_geometry() {
    let data = two_hexes();
    let out = render_hexjson(&data, 100.0, 100.0).unwrap();
    let records: Value = serde_json::from_str(&out.to_json_string_pretty().unwrap()).unwrap();
    let first = &records[0];

    assert_eq!(first["n"], json!(1));
    assert_eq!(first["key"], json!("A"));
    assert_eq!((first["qc"].clone(), first["rc"].clone()), (json!(0), json!(0)));
    assert_eq!(first["vertices"].as_array().map(Vec::len), Some(6));
    assert_eq!(first["points"], records[1]["points"]);

    // The caller's dataset is untouched.
    assert!(data.get("A").unwrap().attributes.get("x").is_none());
}

#[test]
fn empty_hexes_is_an_error() {
    let data = HexJson::from_value(json!({ "layout": "even-q", "hexes": {} })).unwrap();
    assert!(matches!(render_hexjson(&data, 100.0, 100.0), Err(Error::EmptyDataset)));
    assert!(matches!(grid_for_hexjson(&data), Err(Error::EmptyDataset)));
}

#[test]
fn unknown_layout_is_rejected() {
    let err = HexJson::from_value(json!({ "layout": "hex-weird", "hexes": {} })).unwrap_err();
    match err {
        Error::UnsupportedLayout { layout } => assert_eq!(layout, "hex-weird"),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn bad_coordinates_name_the_hex() {
    let err = HexJson::from_value(json!({
        "layout": "odd-r",
        "hexes": { "Z": { "q": 0.5, "r": 0 } }
    }))
    .unwrap_err();
    assert!(matches!(err, Error::InvalidCoordinate { ref key, .. } if key == "Z"));
}

#[test]
fn grid_round_trips_through_json() {
    let data = two_hexes();
    let grid = grid_for_hexjson(&data).unwrap();
    let reparsed = HexJson::from_json_str(&grid.to_json_string_pretty().unwrap()).unwrap();
    assert_eq!(reparsed, grid);
    assert_eq!(reparsed.layout(), OffsetLayout::OddR);
    assert!(reparsed.get("Q0R0").is_some() && reparsed.get("Q1R0").is_some());
}

#[test]
fn zero_canvas_collapses_radius() {
    let data = two_hexes();
    let out = render_hexjson(&data, 0.0, 100.0).unwrap();
    assert_eq!(out.shape().radius, 0.0);
    assert!(out.iter().all(|hex| hex.x == 0.0 && hex.y == 0.0));
}
