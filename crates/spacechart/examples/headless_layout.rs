//! Headless layout of a small synthetic catalog
//!
//! Loads a handful of games into the seven genre clusters, runs the layout
//! until it settles, walks the probe across the chart and prints the final
//! tick event as JSON.
//!
//! Run with: RUST_LOG=spacechart=debug cargo run --package spacechart --example headless_layout

use spacechart::{ClusterAnchors, Direction, GameRecord, LayoutConfig, Simulation};
use tracing_subscriber::EnvFilter;

fn catalog() -> Vec<GameRecord> {
    vec![
        GameRecord::new("Counter-Strike 2", "Action", 850_000.0, 87.0),
        GameRecord::new("Dota 2", "Action", 600_000.0, 81.0).with_tags(["Action", "Strategy"]),
        GameRecord::new("Apex Legends", "Action", 180_000.0, 66.0),
        GameRecord::new("Baldur's Gate 3", "RPG", 90_000.0, 96.0),
        GameRecord::new("Elden Ring", "RPG", 45_000.0, 92.0),
        GameRecord::new("Hades", "RPG", 8_000.0, 98.0).with_tags(["RPG", "Indie"]),
        GameRecord::new("Terraria", "Adventure", 30_000.0, 97.0).with_tags(["Adventure", "Indie"]),
        GameRecord::new("Hollow Knight", "Adventure", 9_000.0, 97.0).with_tags(["Indie"]),
        GameRecord::new("Stardew Valley", "Simulation", 40_000.0, 98.0).with_tags(["Indie"]),
        GameRecord::new("Euro Truck Simulator 2", "Simulation", 35_000.0, 97.0),
        GameRecord::new("Civilization VI", "Strategy", 35_000.0, 85.0),
        GameRecord::new("Stellaris", "Strategy", 15_000.0, 86.0),
        GameRecord::new("Vampire Survivors", "Casual", 12_000.0, 98.0).with_tags(["Indie"]),
        GameRecord::new("Forza Horizon 5", "Racing", 9_000.0, 87.0),
        GameRecord::new("Rocket League", "Racing", 50_000.0, 86.0),
        // dropped: no such cluster
        GameRecord::new("Tetris Effect", "Puzzle", 1_000.0, 95.0),
    ]
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    println!("Space chart headless layout\n");
    println!("{}", "=".repeat(60));

    let (mut sim, report) =
        Simulation::with_records(ClusterAnchors::steam_genres(), LayoutConfig::default(), catalog())?;

    println!(
        "Loaded {} nodes ({} dropped) into {} clusters",
        report.accepted,
        report.dropped(),
        sim.anchors().len()
    );

    for checkpoint in [1, 50, 150, 300, 500] {
        let ticks = checkpoint - sim.tick_count() as usize;
        sim.run(ticks);
        println!(
            "  tick {:>4}  alpha {:.4}  kinetic energy {:.6}",
            sim.tick_count(),
            sim.alpha(),
            sim.kinetic_energy()
        );
    }

    println!("\nHalos:");
    for halo in sim.halos() {
        println!("  {:<12} {:>7.2}", halo.label, halo.halo_radius);
    }

    println!("\nProbe walk from the viewport centre:");
    let walk = [Direction::Up; 5]
        .into_iter()
        .chain([Direction::Left; 12])
        .chain([Direction::Down; 8]);
    for direction in walk {
        let report = sim.move_probe(direction);
        if let Some(id) = report.node_id {
            println!(
                "  ({:>5.1}, {:>5.1}) -> {}",
                report.position[0], report.position[1], id
            );
        }
    }

    let event = sim.snapshot();
    println!("\nFinal tick event:");
    println!("{}", serde_json::to_string_pretty(&event)?);

    sim.stop();
    Ok(())
}
