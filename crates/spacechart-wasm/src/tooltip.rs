//! Host-side text for the probe readout and keyboard mapping

use spacechart::{Direction, NodeFrame, ProbeReport};

/// Shown while the probe touches nothing
pub const IDLE_TEXT: &str = "Hover a node...";

/// Hover line for a node, e.g. `Hades | Players: 8000 | Indie: Yes`
pub fn describe_node(node: &NodeFrame) -> String {
    let indie = if node.tags.iter().any(|t| t == "Indie") {
        "Yes"
    } else {
        "No"
    };
    format!("{} | Players: {} | Indie: {}", node.id, node.weight, indie)
}

pub fn describe(report: &ProbeReport) -> String {
    report
        .node
        .as_ref()
        .map_or_else(|| IDLE_TEXT.to_string(), describe_node)
}

/// Arrow keys and plain direction names
pub fn direction_from_key(key: &str) -> Option<Direction> {
    match key {
        "ArrowUp" | "up" | "Up" => Some(Direction::Up),
        "ArrowDown" | "down" | "Down" => Some(Direction::Down),
        "ArrowLeft" | "left" | "Left" => Some(Direction::Left),
        "ArrowRight" | "right" | "Right" => Some(Direction::Right),
        _ => None,
    }
}
