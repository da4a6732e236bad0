//! WASM bindings for the space chart layout engine.
//!
//! The browser owns rendering and input; this crate owns the layout.
//!
//! # Architecture
//!
//! Engines are stored in thread-local storage (WASM is single-threaded).
//! Functions return opaque IDs for referencing mutable state, and
//! serializable snapshots for reading it. The host calls `engine_tick`
//! from its animation frame callback; freezing the callback freezes the
//! layout.
//!
//! # Example Usage (JavaScript)
//!
//! ```javascript
//! // Seven default genre anchors, default config
//! const id = engine_create(null, null);
//!
//! // Records come from the CSV loader, already filtered by player count
//! const report = engine_load(id, [
//!   { id: "Hades", clusterLabel: "RPG", weight: 8000, qualityScore: 98, tags: ["Indie"] },
//! ]);
//!
//! function frame() {
//!   const event = engine_tick(id);   // { tick, nodes, clusters }
//!   draw(event);
//!   requestAnimationFrame(frame);
//! }
//!
//! document.addEventListener("keydown", (e) => {
//!   engine_move_probe(id, e.key);
//!   tooltip.textContent = engine_probe_text(id);
//! });
//! ```

use std::cell::RefCell;
use std::collections::HashMap;

use nalgebra::Point2;
use serde::{Deserialize, Serialize};
use tracing::debug;
use wasm_bindgen::prelude::*;

use spacechart::{
    ClusterAnchors, Direction, GameRecord, IngestReport, LayoutConfig, ProbeReport, Simulation,
    TickEvent,
};

pub mod tooltip;


// =============================================================================
// Serialization helpers
// =============================================================================

fn to_js<T: Serialize>(value: &T) -> Result<JsValue, JsError> {
    serde_wasm_bindgen::to_value(value).map_err(|e| JsError::new(&e.to_string()))
}

fn from_js<T: serde::de::DeserializeOwned>(value: JsValue) -> Result<T, JsError> {
    serde_wasm_bindgen::from_value(value).map_err(|e| JsError::new(&e.to_string()))
}

/// `null` / `undefined` fall back to the default
fn from_js_or_default<T: serde::de::DeserializeOwned + Default>(
    value: JsValue,
) -> Result<T, JsError> {
    if value.is_null() || value.is_undefined() {
        Ok(T::default())
    } else {
        from_js(value)
    }
}

// =============================================================================
// Thread-local storage for engines
// =============================================================================

thread_local! {
    static ENGINES: RefCell<HashMap<u32, Simulation>> = RefCell::new(HashMap::new());
    static NEXT_ENGINE_ID: RefCell<u32> = const { RefCell::new(0) };
}

fn not_found(engine_id: u32) -> JsError {
    JsError::new(&format!("Engine {} not found", engine_id))
}

fn with_engine<T>(
    engine_id: u32,
    f: impl FnOnce(&Simulation) -> Result<T, JsError>,
) -> Result<T, JsError> {
    ENGINES.with(|engines| {
        let engines = engines.borrow();
        let sim = engines.get(&engine_id).ok_or_else(|| not_found(engine_id))?;
        f(sim)
    })
}

fn with_engine_mut<T>(
    engine_id: u32,
    f: impl FnOnce(&mut Simulation) -> Result<T, JsError>,
) -> Result<T, JsError> {
    ENGINES.with(|engines| {
        let mut engines = engines.borrow_mut();
        let sim = engines
            .get_mut(&engine_id)
            .ok_or_else(|| not_found(engine_id))?;
        f(sim)
    })
}

// =============================================================================
// Serializable types for JavaScript interop
// =============================================================================

/// One cluster anchor as supplied by the host
#[derive(Clone, Debug, Deserialize)]
pub struct AnchorInput {
    pub label: String,
    pub x: f64,
    pub y: f64,
}

/// Engine summary for diagnostics
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EngineInfo {
    pub status: spacechart::Status,
    pub tick: u64,
    pub alpha: f64,
    pub node_count: usize,
    pub cluster_labels: Vec<String>,
    pub kinetic_energy: f64,
}

// =============================================================================
// Engine management functions
// =============================================================================

/// Create a new layout engine.
///
/// Returns an engine ID for use with other functions.
///
/// # Arguments
/// * `anchors` - Array of `{ label, x, y }`, or null for the default genres
/// * `config` - Partial layout config (camelCase), or null for defaults
#[wasm_bindgen]
pub fn engine_create(anchors: JsValue, config: JsValue) -> Result<u32, JsError> {
    let anchors = if anchors.is_null() || anchors.is_undefined() {
        ClusterAnchors::steam_genres()
    } else {
        let input: Vec<AnchorInput> = from_js(anchors)?;
        ClusterAnchors::new(
            input
                .into_iter()
                .map(|a| (a.label, Point2::new(a.x, a.y))),
        )
        .map_err(|e| JsError::new(&e.to_string()))?
    };
    let config: LayoutConfig = from_js_or_default(config)?;

    let sim = Simulation::new(anchors, config).map_err(|e| JsError::new(&e.to_string()))?;

    let id = NEXT_ENGINE_ID.with(|next_id| {
        let mut id = next_id.borrow_mut();
        let current = *id;
        *id += 1;
        current
    });

    ENGINES.with(|engines| {
        engines.borrow_mut().insert(id, sim);
    });

    debug!(engine = id, "engine created");
    Ok(id)
}

/// Delete an engine to free memory.
#[wasm_bindgen]
pub fn engine_delete(engine_id: u32) {
    ENGINES.with(|engines| {
        engines.borrow_mut().remove(&engine_id);
    });
}

/// Load catalog records and start the layout.
///
/// # Returns
/// Ingest report `{ accepted, unknownCluster, invalidWeight, invalidScore, duplicateId }`
#[wasm_bindgen]
pub fn engine_load(engine_id: u32, records: JsValue) -> Result<IngestReport, JsError> {
    let records: Vec<GameRecord> = from_js(records)?;

    with_engine_mut(engine_id, |sim| {
        sim.load(records).map_err(|e| JsError::new(&e.to_string()))
    })
}

// =============================================================================
// Ticking and lifecycle
// =============================================================================

/// Advance one tick.
///
/// # Returns
/// The tick event `{ tick, alpha, nodes, clusters }`, or null when the
/// engine is not running
#[wasm_bindgen]
pub fn engine_tick(engine_id: u32) -> Result<JsValue, JsError> {
    with_engine_mut(engine_id, |sim| match sim.tick() {
        Some(event) => to_js(&event),
        None => Ok(JsValue::NULL),
    })
}

/// Advance up to `n_ticks` ticks, returning only the last event.
#[wasm_bindgen]
pub fn engine_run(engine_id: u32, n_ticks: usize) -> Result<JsValue, JsError> {
    with_engine_mut(engine_id, |sim| match sim.run(n_ticks) {
        Some(event) => to_js(&event),
        None => Ok(JsValue::NULL),
    })
}

#[wasm_bindgen]
pub fn engine_pause(engine_id: u32) -> Result<(), JsError> {
    with_engine_mut(engine_id, |sim| {
        sim.pause();
        Ok(())
    })
}

#[wasm_bindgen]
pub fn engine_resume(engine_id: u32) -> Result<(), JsError> {
    with_engine_mut(engine_id, |sim| {
        sim.resume();
        Ok(())
    })
}

#[wasm_bindgen]
pub fn engine_stop(engine_id: u32) -> Result<(), JsError> {
    with_engine_mut(engine_id, |sim| {
        sim.stop();
        Ok(())
    })
}

/// Restart alpha cooling so the layout settles again.
#[wasm_bindgen]
pub fn engine_reheat(engine_id: u32) -> Result<(), JsError> {
    with_engine_mut(engine_id, |sim| {
        sim.reheat();
        Ok(())
    })
}

// =============================================================================
// State queries
// =============================================================================

/// Current positions and halos without advancing.
#[wasm_bindgen]
pub fn engine_snapshot(engine_id: u32) -> Result<TickEvent, JsError> {
    with_engine(engine_id, |sim| Ok(sim.snapshot()))
}

#[wasm_bindgen]
pub fn engine_info(engine_id: u32) -> Result<JsValue, JsError> {
    with_engine(engine_id, |sim| {
        let info = EngineInfo {
            status: sim.status(),
            tick: sim.tick_count(),
            alpha: sim.alpha(),
            node_count: sim.registry().len(),
            cluster_labels: sim.anchors().iter().map(|c| c.label.clone()).collect(),
            kinetic_energy: sim.kinetic_energy(),
        };
        to_js(&info)
    })
}

// =============================================================================
// Probe
// =============================================================================

/// Move the probe one step.
///
/// # Arguments
/// * `key` - `"ArrowUp"`/`"up"` etc.; other keys leave the probe in place
///
/// # Returns
/// Probe report `{ position, halfSize, nodeId, node }`
#[wasm_bindgen]
pub fn engine_move_probe(engine_id: u32, key: &str) -> Result<ProbeReport, JsError> {
    with_engine_mut(engine_id, |sim| {
        Ok(match tooltip::direction_from_key(key) {
            Some(direction) => sim.move_probe(direction),
            None => sim.query_probe(),
        })
    })
}

/// Move the probe with a typed `"up" | "down" | "left" | "right"` command.
#[wasm_bindgen]
pub fn engine_step_probe(engine_id: u32, direction: Direction) -> Result<ProbeReport, JsError> {
    with_engine_mut(engine_id, |sim| Ok(sim.move_probe(direction)))
}

#[wasm_bindgen]
pub fn engine_query_probe(engine_id: u32) -> Result<ProbeReport, JsError> {
    with_engine(engine_id, |sim| Ok(sim.query_probe()))
}

/// Hover line for whatever the probe currently touches.
#[wasm_bindgen]
pub fn engine_probe_text(engine_id: u32) -> Result<String, JsError> {
    with_engine(engine_id, |sim| Ok(tooltip::describe(&sim.query_probe())))
}
