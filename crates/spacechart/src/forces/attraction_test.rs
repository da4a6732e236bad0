use approx::assert_relative_eq;

use crate::forces::{ClusterAttraction, CompositeForce, ForceModel};
use crate::test_support::{node_at, registry_of, two_anchors};

#[test]
fn test_pull_toward_own_anchor() {
    let anchors = two_anchors();
    let registry = registry_of(
        &anchors,
        vec![node_at(0, 0, 120.0, 80.0, 5.0), node_at(1, 1, 280.0, 100.0, 5.0)],
    );
    let pull = ClusterAttraction::new(&anchors, 0.5);

    let left = pull.velocity_delta(0, &registry);
    assert_relative_eq!(left.x, -10.0);
    assert_relative_eq!(left.y, 10.0);

    let right = pull.velocity_delta(1, &registry);
    assert_relative_eq!(right.x, 10.0);
    assert_relative_eq!(right.y, 0.0);
}

#[test]
fn test_zero_at_anchor() {
    let anchors = two_anchors();
    let registry = registry_of(&anchors, vec![node_at(0, 0, 100.0, 100.0, 5.0)]);
    let pull = ClusterAttraction::new(&anchors, 0.5);

    assert_eq!(pull.velocity_delta(0, &registry).magnitude(), 0.0);
}

#[test]
fn test_pull_shrinks_as_node_approaches() {
    let anchors = two_anchors();
    let pull = ClusterAttraction::new(&anchors, 0.5);

    let magnitudes: Vec<f64> = [400.0, 250.0, 160.0, 110.0, 101.0, 100.0]
        .iter()
        .map(|&x| {
            let registry = registry_of(&anchors, vec![node_at(0, 0, x, 100.0, 5.0)]);
            pull.velocity_delta(0, &registry).magnitude()
        })
        .collect();

    for pair in magnitudes.windows(2) {
        assert!(pair[1] <= pair[0]);
    }
}

#[test]
fn test_not_distance_capped() {
    let anchors = two_anchors();
    let registry = registry_of(&anchors, vec![node_at(0, 0, 10_100.0, 100.0, 5.0)]);
    let pull = ClusterAttraction::new(&anchors, 0.5);

    assert_relative_eq!(pull.velocity_delta(0, &registry).x, -5_000.0);
}

#[test]
fn test_composite_sums_models() {
    let anchors = two_anchors();
    let registry = registry_of(&anchors, vec![node_at(0, 0, 110.0, 100.0, 5.0)]);

    let composite = CompositeForce::new()
        .with_force(ClusterAttraction::new(&anchors, 0.5))
        .with_force(ClusterAttraction::new(&anchors, 0.25));

    assert_relative_eq!(composite.velocity_delta(0, &registry).x, -7.5);
    assert_relative_eq!(composite.velocity_deltas(&registry)[0].x, -7.5);
    assert_eq!(composite.names(), vec!["cluster-attraction", "cluster-attraction"]);
}
