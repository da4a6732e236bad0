use approx::assert_relative_eq;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaChaRng;

use crate::forces::{DirectRepulsion, ForceModel, TreeRepulsion};
use crate::node::Node;
use crate::registry::NodeRegistry;
use crate::test_support::{node_at, registry_of, two_anchors};

fn random_registry(seed: u64, n: u32) -> NodeRegistry {
    let mut rng = ChaChaRng::seed_from_u64(seed);
    let nodes: Vec<Node> = (0..n)
        .map(|i| {
            node_at(
                i,
                (i % 2) as u16,
                rng.gen_range(0.0..800.0),
                rng.gen_range(0.0..700.0),
                5.0,
            )
        })
        .collect();
    registry_of(&two_anchors(), nodes)
}

#[test]
fn test_exact_when_theta_zero() {
    let registry = random_registry(5, 40);
    let direct = DirectRepulsion::new(-10.0, 1.0);
    let tree = TreeRepulsion::new(-10.0, 1.0, 0.0);

    let exact = direct.velocity_deltas(&registry);
    let approx = tree.velocity_deltas(&registry);

    for (e, a) in exact.iter().zip(&approx) {
        assert_relative_eq!(e.x, a.x, epsilon = 1e-9);
        assert_relative_eq!(e.y, a.y, epsilon = 1e-9);
    }
}

#[test]
fn test_single_and_batched_agree() {
    let registry = random_registry(9, 25);
    let tree = TreeRepulsion::default();
    let batched = tree.velocity_deltas(&registry);

    for i in [0, 12, 24] {
        let single = tree.velocity_delta(i, &registry);
        assert_relative_eq!(single.x, batched[i].x, epsilon = 1e-12);
        assert_relative_eq!(single.y, batched[i].y, epsilon = 1e-12);
    }
}

#[test]
fn test_points_away_from_crowd() {
    let anchors = two_anchors();
    let mut nodes: Vec<Node> = (0..10)
        .map(|i| node_at(i, 0, 500.0 + i as f64, 500.0 + (i * 3 % 7) as f64, 2.0))
        .collect();
    nodes.push(node_at(10, 0, 0.0, 0.0, 2.0));
    let registry = registry_of(&anchors, nodes);

    let push = TreeRepulsion::default().velocity_delta(10, &registry);
    assert!(push.x < 0.0);
    assert!(push.y < 0.0);
}

#[test]
fn test_empty_registry() {
    let registry = registry_of(&two_anchors(), Vec::new());
    assert!(TreeRepulsion::default().velocity_deltas(&registry).is_empty());
}
