use approx::assert_relative_eq;
use nalgebra::{Point2, Vector2};

use crate::config::IntegrationConfig;
use crate::integrator::{commit, Cooling, DampedVelocity, Integrator};
use crate::test_support::node_at;

#[test]
fn test_delta_scaled_by_alpha() {
    let mut nodes = vec![node_at(0, 0, 10.0, 10.0, 5.0)];
    let integrator = DampedVelocity::new(0.0);

    let tentative = integrator.step(&mut nodes, &[Vector2::new(2.0, -4.0)], 0.25);

    assert_relative_eq!(nodes[0].velocity.x, 0.5);
    assert_relative_eq!(nodes[0].velocity.y, -1.0);
    assert_relative_eq!(tentative[0].x, 10.5);
    assert_relative_eq!(tentative[0].y, 9.0);
}

#[test]
fn test_velocity_decays_without_force() {
    let mut nodes = vec![node_at(0, 0, 0.0, 0.0, 5.0)];
    nodes[0].velocity = Vector2::new(10.0, 0.0);
    let integrator = DampedVelocity::default();

    for _ in 0..3 {
        let tentative = integrator.step(&mut nodes, &[Vector2::zeros()], 1.0);
        commit(&mut nodes, &tentative);
    }

    // 10 · 0.6³
    assert_relative_eq!(nodes[0].velocity.x, 2.16, epsilon = 1e-12);
    assert_relative_eq!(nodes[0].position.x, 6.0 + 3.6 + 2.16, epsilon = 1e-12);
}

#[test]
fn test_full_decay_stops_node() {
    let mut nodes = vec![node_at(0, 0, 3.0, 3.0, 5.0)];
    nodes[0].velocity = Vector2::new(7.0, 7.0);

    let tentative = DampedVelocity::new(1.0).step(&mut nodes, &[Vector2::new(1.0, 1.0)], 1.0);

    assert_eq!(nodes[0].velocity, Vector2::zeros());
    assert_eq!(tentative[0], Point2::new(3.0, 3.0));
}

#[test]
fn test_step_leaves_positions_untouched() {
    let mut nodes = vec![node_at(0, 0, 1.0, 2.0, 5.0), node_at(1, 0, 3.0, 4.0, 5.0)];
    let deltas = vec![Vector2::new(1.0, 0.0); 2];

    let tentative = DampedVelocity::default().step(&mut nodes, &deltas, 1.0);

    assert_eq!(nodes[0].position, Point2::new(1.0, 2.0));
    assert_eq!(nodes[1].position, Point2::new(3.0, 4.0));
    assert_eq!(tentative.len(), 2);
}

#[test]
fn test_cooling_is_monotone_and_floored() {
    let mut cooling = Cooling::default();
    let mut previous = cooling.alpha();

    for _ in 0..2_000 {
        let alpha = cooling.step();
        assert!(alpha <= previous);
        assert!(alpha >= 0.001);
        previous = alpha;
    }

    assert!(cooling.is_settled());
    assert_relative_eq!(cooling.alpha(), 0.001);
}

#[test]
fn test_cooling_reaches_floor_near_300_ticks() {
    let mut cooling = Cooling::default();
    let ticks = (1..=1_000)
        .find(|_| {
            cooling.step();
            cooling.is_settled()
        })
        .unwrap();

    assert!((290..=310).contains(&ticks), "settled after {ticks} ticks");
}

#[test]
fn test_reheat_restores_start() {
    let config = IntegrationConfig {
        alpha_start: 0.8,
        ..IntegrationConfig::default()
    };
    let mut cooling = Cooling::from_config(&config);
    for _ in 0..50 {
        cooling.step();
    }
    assert!(cooling.alpha() < 0.8);

    cooling.reheat();

    assert_relative_eq!(cooling.alpha(), 0.8);
}

#[test]
fn test_cooling_toward_positive_target() {
    let config = IntegrationConfig {
        alpha_target: 0.3,
        ..IntegrationConfig::default()
    };
    let mut cooling = Cooling::from_config(&config);
    for _ in 0..5_000 {
        cooling.step();
    }

    assert_relative_eq!(cooling.alpha(), 0.3, epsilon = 1e-9);
    assert!(!cooling.is_settled());
}
