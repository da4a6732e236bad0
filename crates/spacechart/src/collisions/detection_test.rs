use approx::assert_relative_eq;
use nalgebra::Point2;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaChaRng;

use crate::collisions::{check_pair, CollisionDetector, DirectDetector, TreeDetector};

#[test]
fn test_check_pair_touching_is_not_overlap() {
    let positions = vec![Point2::new(0.0, 0.0), Point2::new(10.0, 0.0)];
    let radii = vec![5.0, 5.0];

    assert!(check_pair(0, 1, &positions, &radii).is_none());
}

#[test]
fn test_check_pair_orders_indices() {
    let positions = vec![Point2::new(0.0, 0.0), Point2::new(3.0, 4.0)];
    let radii = vec![4.0, 4.0];

    let overlap = check_pair(1, 0, &positions, &radii).unwrap();
    assert_eq!((overlap.a, overlap.b), (0, 1));
    assert_relative_eq!(overlap.separation, 5.0);
    assert_relative_eq!(overlap.depth(), 3.0);
}

#[test]
fn test_direct_detects_all_pairs() {
    let positions = vec![
        Point2::new(0.0, 0.0),
        Point2::new(1.0, 0.0),
        Point2::new(2.0, 0.0),
    ];
    let radii = vec![5.0, 5.0, 5.0];

    let overlaps = DirectDetector.detect(&positions, &radii);
    let pairs: Vec<(usize, usize)> = overlaps.iter().map(|o| (o.a, o.b)).collect();
    assert_eq!(pairs, vec![(0, 1), (0, 2), (1, 2)]);
}

#[test]
fn test_unequal_radii() {
    let positions = vec![Point2::new(0.0, 0.0), Point2::new(30.0, 0.0)];

    assert!(DirectDetector.detect(&positions, &[2.0, 20.0]).is_empty());
    assert_eq!(DirectDetector.detect(&positions, &[12.0, 20.0]).len(), 1);
}

#[test]
fn test_empty_input() {
    assert!(DirectDetector.detect(&[], &[]).is_empty());
    assert!(TreeDetector.detect(&[], &[]).is_empty());
}

#[test]
fn test_tree_matches_direct() {
    let mut rng = ChaChaRng::seed_from_u64(21);
    let positions: Vec<Point2<f64>> = (0..120)
        .map(|_| Point2::new(rng.gen_range(0.0..400.0), rng.gen_range(0.0..400.0)))
        .collect();
    let radii: Vec<f64> = (0..120).map(|_| rng.gen_range(1.0..25.0)).collect();

    let direct = DirectDetector.detect(&positions, &radii);
    let tree = TreeDetector.detect(&positions, &radii);

    assert!(!direct.is_empty());
    assert_eq!(direct, tree);
}

#[test]
fn test_tree_handles_coincident_points() {
    let positions = vec![Point2::new(4.0, 4.0); 4];
    let radii = vec![1.0; 4];

    assert_eq!(TreeDetector.detect(&positions, &radii).len(), 6);
}
