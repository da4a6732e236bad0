use approx::assert_relative_eq;
use nalgebra::Point2;

use crate::cluster::ClusterAnchors;
use crate::config::{Placement, ScaleConfig};
use crate::node::{GameRecord, NodeId};
use crate::registry::{IngestReport, NodeRegistry};

fn two_clusters() -> ClusterAnchors {
    ClusterAnchors::new([
        ("Action", Point2::new(100.0, 100.0)),
        ("RPG", Point2::new(300.0, 100.0)),
    ])
    .unwrap()
}

fn build(records: Vec<GameRecord>) -> (NodeRegistry, IngestReport) {
    NodeRegistry::from_records(
        &two_clusters(),
        records,
        &ScaleConfig::default(),
        &Placement::default(),
    )
}

#[test]
fn test_unknown_cluster_is_dropped() {
    let (registry, report) = build(vec![
        GameRecord::new("a", "Action", 100.0, 80.0),
        GameRecord::new("b", "Unknown", 200.0, 70.0),
        GameRecord::new("c", "RPG", 300.0, 90.0),
    ]);

    assert_eq!(registry.len(), 2);
    assert_eq!(report.accepted, 2);
    assert_eq!(report.unknown_cluster, 1);
    assert_eq!(report.dropped(), 1);
    assert!(registry.find("b").is_none());
}

#[test]
fn test_invalid_weights_are_dropped() {
    let (registry, report) = build(vec![
        GameRecord::new("nan", "Action", f64::NAN, 80.0),
        GameRecord::new("inf", "Action", f64::INFINITY, 80.0),
        GameRecord::new("neg", "Action", -5.0, 80.0),
        GameRecord::new("zero", "Action", 0.0, 80.0),
    ]);

    assert_eq!(registry.len(), 1);
    assert_eq!(report.invalid_weight, 3);
    assert!(registry.find("zero").is_some());
}

#[test]
fn test_invalid_score_and_duplicates_are_dropped() {
    let (registry, report) = build(vec![
        GameRecord::new("a", "Action", 10.0, f64::NAN),
        GameRecord::new("b", "Action", 10.0, 50.0),
        GameRecord::new("b", "RPG", 20.0, 60.0),
    ]);

    assert_eq!(registry.len(), 1);
    assert_eq!(report.invalid_score, 1);
    assert_eq!(report.duplicate_id, 1);
    assert_eq!(report.total(), 3);
    assert_eq!(registry.find("b").unwrap().weight, 10.0);
}

#[test]
fn test_empty_input() {
    let (registry, report) = build(vec![]);

    assert!(registry.is_empty());
    assert_eq!(report, IngestReport::default());
    assert_eq!(registry.members(two_clusters().resolve("RPG").unwrap()).count(), 0);
}

#[test]
fn test_ids_are_dense_and_ordered() {
    let (registry, _) = build(vec![
        GameRecord::new("a", "Action", 10.0, 50.0),
        GameRecord::new("skip", "Nope", 10.0, 50.0),
        GameRecord::new("b", "RPG", 20.0, 60.0),
    ]);

    assert_eq!(registry.get(NodeId(0)).unwrap().key, "a");
    assert_eq!(registry.get(NodeId(1)).unwrap().key, "b");
    assert!(registry.get(NodeId(2)).is_none());
}

#[test]
fn test_members_grouped_by_cluster() {
    let anchors = two_clusters();
    let (registry, _) = build(vec![
        GameRecord::new("a", "Action", 10.0, 50.0),
        GameRecord::new("b", "RPG", 20.0, 60.0),
        GameRecord::new("c", "Action", 30.0, 70.0),
    ]);

    let action = anchors.resolve("Action").unwrap();
    let keys: Vec<&str> = registry.members(action).map(|n| n.key.as_str()).collect();
    assert_eq!(keys, vec!["a", "c"]);
    assert_eq!(registry.member_count(action), 2);
}

#[test]
fn test_radius_from_size_scale() {
    let (registry, _) = build(vec![
        GameRecord::new("small", "Action", 100.0, 50.0),
        GameRecord::new("large", "Action", 400.0, 60.0),
        GameRecord::new("mid", "RPG", 225.0, 60.0),
    ]);

    assert_relative_eq!(registry.find("small").unwrap().radius, 1.0);
    assert_relative_eq!(registry.find("large").unwrap().radius, 100.0);
    // sqrt(225) = 15 is halfway between 10 and 20
    assert_relative_eq!(registry.find("mid").unwrap().radius, 50.5);
}

#[test]
fn test_equal_weights_get_minimum_radius() {
    let (registry, _) = build(vec![
        GameRecord::new("a", "Action", 500.0, 50.0),
        GameRecord::new("b", "RPG", 500.0, 60.0),
    ]);

    for node in registry.nodes() {
        assert_eq!(node.radius, 1.0);
    }
}

#[test]
fn test_phyllotaxis_places_near_anchor_without_coincidence() {
    let (registry, _) = build(
        (0..20)
            .map(|i| GameRecord::new(format!("g{i}"), "Action", i as f64, 50.0))
            .collect(),
    );

    let anchor = Point2::new(100.0, 100.0);
    for node in registry.nodes() {
        assert!(node.distance_to_point(anchor) < 10.0 * 20.5_f64.sqrt() + 1e-9);
        assert!(node.distance_to_point(anchor) > 0.0);
    }

    let nodes = registry.nodes();
    for i in 0..nodes.len() {
        for j in (i + 1)..nodes.len() {
            assert!(nodes[i].distance_to(&nodes[j]) > 1e-6);
        }
    }
}

#[test]
fn test_scatter_is_seed_deterministic() {
    let records: Vec<GameRecord> = (0..10)
        .map(|i| GameRecord::new(format!("g{i}"), "RPG", 10.0 * i as f64, 50.0))
        .collect();
    let placement = Placement::Scatter {
        seed: 99,
        spread: 50.0,
    };

    let (a, _) = NodeRegistry::from_records(
        &two_clusters(),
        records.clone(),
        &ScaleConfig::default(),
        &placement,
    );
    let (b, _) = NodeRegistry::from_records(
        &two_clusters(),
        records,
        &ScaleConfig::default(),
        &placement,
    );

    assert_eq!(a.positions(), b.positions());
    for node in a.nodes() {
        assert!((node.position.x - 300.0).abs() <= 50.0);
        assert!((node.position.y - 100.0).abs() <= 50.0);
    }
}

#[test]
fn test_tags_and_scores_pass_through() {
    let (registry, _) = build(vec![
        GameRecord::new("a", "Action", 10.0, 87.5).with_tags(["Action", "Indie"]),
    ]);

    let node = registry.find("a").unwrap();
    assert_eq!(node.quality_score, 87.5);
    assert!(node.has_tag("Indie"));
}

#[test]
fn test_starts_at_rest() {
    let (registry, _) = build(vec![GameRecord::new("a", "Action", 10.0, 87.5)]);
    assert_eq!(registry.kinetic_energy(), 0.0);
}
