use nalgebra::Point2;

use crate::cluster::{ClusterAnchors, ClusterId};
use crate::error::LayoutError;

#[test]
fn test_empty_mapping_fails_fast() {
    let anchors: Vec<(&str, Point2<f64>)> = vec![];
    assert_eq!(
        ClusterAnchors::new(anchors).unwrap_err(),
        LayoutError::EmptyClusterMap
    );
}

#[test]
fn test_non_finite_anchor_rejected() {
    let err = ClusterAnchors::new([
        ("Action", Point2::new(400.0, 300.0)),
        ("Broken", Point2::new(f64::NAN, 0.0)),
    ])
    .unwrap_err();

    assert_eq!(
        err,
        LayoutError::NonFiniteAnchor {
            label: "Broken".to_string()
        }
    );
}

#[test]
fn test_duplicate_label_rejected() {
    let err = ClusterAnchors::new([
        ("Action", Point2::new(0.0, 0.0)),
        ("Action", Point2::new(1.0, 1.0)),
    ])
    .unwrap_err();

    assert_eq!(err, LayoutError::DuplicateCluster("Action".to_string()));
}

#[test]
fn test_ids_follow_insertion_order() {
    let anchors = ClusterAnchors::new([
        ("A", Point2::new(0.0, 0.0)),
        ("B", Point2::new(10.0, 0.0)),
        ("C", Point2::new(20.0, 0.0)),
    ])
    .unwrap();

    assert_eq!(anchors.resolve("A"), Some(ClusterId(0)));
    assert_eq!(anchors.resolve("C"), Some(ClusterId(2)));
    assert_eq!(anchors.anchor(ClusterId(1)), Some(Point2::new(10.0, 0.0)));
    assert_eq!(anchors.anchor(ClusterId(7)), None);

    let labels: Vec<&str> = anchors.iter().map(|c| c.label.as_str()).collect();
    assert_eq!(labels, vec!["A", "B", "C"]);
}

#[test]
fn test_resolve_is_case_sensitive() {
    let anchors = ClusterAnchors::steam_genres();
    assert!(anchors.resolve("RPG").is_some());
    assert!(anchors.resolve("rpg").is_none());
}

#[test]
fn test_steam_genres_preset() {
    let anchors = ClusterAnchors::steam_genres();

    assert_eq!(anchors.len(), 7);
    assert!(!anchors.is_empty());

    let action = anchors.resolve("Action").unwrap();
    assert_eq!(anchors.anchor(action), Some(Point2::new(400.0, 300.0)));

    let racing = anchors.resolve("Racing").unwrap();
    assert_eq!(anchors.anchor(racing), Some(Point2::new(250.0, 90.0)));
    assert_eq!(anchors.anchor_points().len(), 7);
}
