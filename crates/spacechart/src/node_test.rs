use approx::assert_relative_eq;
use nalgebra::{Point2, Vector2};

use crate::cluster::ClusterId;
use crate::node::{GameRecord, Node, NodeId};

fn make_node(x: f64, y: f64, radius: f64) -> Node {
    Node {
        id: NodeId(0),
        key: "Portal".to_string(),
        cluster: ClusterId(0),
        weight: 100.0,
        quality_score: 97.0,
        tags: vec!["Action".to_string(), "Indie".to_string()],
        radius,
        position: Point2::new(x, y),
        velocity: Vector2::new(3.0, 4.0),
    }
}

#[test]
fn test_distance_to() {
    let a = make_node(0.0, 0.0, 1.0);
    let b = make_node(3.0, 4.0, 1.0);

    assert_relative_eq!(a.distance_to(&b), 5.0);
    assert_relative_eq!(a.distance_to_point(Point2::new(0.0, 2.0)), 2.0);
}

#[test]
fn test_speed() {
    let a = make_node(0.0, 0.0, 1.0);
    assert_relative_eq!(a.speed(), 5.0);
}

#[test]
fn test_overlap_with() {
    let a = make_node(0.0, 0.0, 5.0);
    let b = make_node(8.0, 0.0, 5.0);
    let c = make_node(20.0, 0.0, 5.0);

    assert_relative_eq!(a.overlap_with(&b), 2.0);
    assert!(a.overlap_with(&c) < 0.0);
}

#[test]
fn test_has_tag() {
    let a = make_node(0.0, 0.0, 1.0);

    assert!(a.has_tag("Indie"));
    assert!(!a.has_tag("indie"));
    assert!(!a.has_tag("Racing"));
}

#[test]
fn test_record_deserializes_camel_case() {
    let json = r#"{
        "id": "Celeste",
        "clusterLabel": "Adventure",
        "weight": 1200,
        "qualityScore": 96.5,
        "tags": ["Adventure", "Indie"]
    }"#;
    let record: GameRecord = serde_json::from_str(json).unwrap();

    assert_eq!(
        record,
        GameRecord::new("Celeste", "Adventure", 1200.0, 96.5).with_tags(["Adventure", "Indie"])
    );
}

#[test]
fn test_record_tags_default_to_empty() {
    let json = r#"{ "id": "x", "clusterLabel": "RPG", "weight": 1, "qualityScore": 2 }"#;
    let record: GameRecord = serde_json::from_str(json).unwrap();
    assert!(record.tags.is_empty());
}
