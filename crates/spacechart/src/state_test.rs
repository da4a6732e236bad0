use crate::cluster::ClusterAnchors;
use crate::config::{Placement, ScaleConfig};
use crate::integrator::Cooling;
use crate::node::GameRecord;
use crate::registry::NodeRegistry;
use crate::state::{SimulationState, Status};

#[test]
fn test_status_defaults_to_idle() {
    assert_eq!(Status::default(), Status::Idle);
}

#[test]
fn test_status_predicates() {
    assert!(Status::Running.is_running());
    assert!(!Status::Paused.is_running());

    assert!(Status::Running.is_live());
    assert!(Status::Paused.is_live());
    assert!(!Status::Idle.is_live());
    assert!(!Status::Stopped.is_live());
}

#[test]
fn test_status_serializes_lowercase() {
    let json = serde_json::to_string(&Status::Paused).unwrap();
    assert_eq!(json, r#""paused""#);
}

#[test]
fn test_state_wraps_registry() {
    let anchors = ClusterAnchors::steam_genres();
    let (registry, _) = NodeRegistry::from_records(
        &anchors,
        vec![
            GameRecord::new("Terraria", "Adventure", 30_000.0, 97.0),
            GameRecord::new("Rocket League", "Racing", 50_000.0, 86.0),
        ],
        &ScaleConfig::default(),
        &Placement::default(),
    );

    let state = SimulationState::new(registry, Cooling::default());

    assert_eq!(state.node_count(), 2);
    assert_eq!(state.alpha(), 1.0);
    assert_eq!(state.status, Status::Idle);
}
