//! Layout configuration
//!
//! Every section deserializes from camelCase JSON with defaults filled in,
//! so a host may send `{}` and get the stock space chart.

use crate::error::{LayoutError, Result};
use serde::{Deserialize, Serialize};

/// Which pass computes node-node repulsion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RepulsionMethod {
    /// Every pair, O(N²)
    Direct,
    /// Barnes-Hut quadtree approximation
    Tree,
}

/// Force composer settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForceConfig {
    /// Spring coefficient pulling nodes toward their cluster anchor
    #[serde(default = "default_attraction_strength")]
    pub attraction_strength: f64,
    /// Negative coefficient for mutual repulsion
    #[serde(default = "default_repulsion_strength")]
    pub repulsion_strength: f64,
    /// Distances below this are softened when computing repulsion
    #[serde(default = "default_repulsion_distance_min")]
    pub repulsion_distance_min: f64,
    #[serde(default = "default_repulsion_method")]
    pub repulsion_method: RepulsionMethod,
    /// Opening angle for tree repulsion
    #[serde(default = "default_theta")]
    pub theta: f64,
}

fn default_attraction_strength() -> f64 {
    0.5
}

fn default_repulsion_strength() -> f64 {
    -10.0
}

fn default_repulsion_distance_min() -> f64 {
    1.0
}

fn default_repulsion_method() -> RepulsionMethod {
    RepulsionMethod::Direct
}

fn default_theta() -> f64 {
    0.9
}

impl Default for ForceConfig {
    fn default() -> Self {
        Self {
            attraction_strength: default_attraction_strength(),
            repulsion_strength: default_repulsion_strength(),
            repulsion_distance_min: default_repulsion_distance_min(),
            repulsion_method: default_repulsion_method(),
            theta: default_theta(),
        }
    }
}

/// Collision resolver settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CollisionConfig {
    /// Added to every node radius before testing for overlap
    pub padding: f64,
    /// Fraction of each overlap corrected per relaxation pass
    pub strength: f64,
    /// Relaxation passes per tick
    pub iterations: usize,
    /// Use the quadtree to find overlapping pairs
    pub use_tree: bool,
}

impl Default for CollisionConfig {
    fn default() -> Self {
        Self {
            padding: 2.0,
            strength: 0.7,
            // dense clusters need several passes per tick
            iterations: 4,
            use_tree: false,
        }
    }
}

/// Velocity damping and alpha cooling
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct IntegrationConfig {
    /// Fraction of velocity lost every tick
    pub velocity_decay: f64,
    pub alpha_start: f64,
    /// Alpha never cools below this; ticks keep running at the floor
    pub alpha_min: f64,
    pub alpha_decay: f64,
    pub alpha_target: f64,
}

impl Default for IntegrationConfig {
    fn default() -> Self {
        let alpha_min: f64 = 0.001;
        Self {
            velocity_decay: 0.4,
            alpha_start: 1.0,
            alpha_min,
            // settles in roughly 300 ticks
            alpha_decay: 1.0 - alpha_min.powf(1.0 / 300.0),
            alpha_target: 0.0,
        }
    }
}

/// Output ranges for the square-root scales
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ScaleConfig {
    pub radius_range: [f64; 2],
    pub backdrop_range: [f64; 2],
    pub intensity_range: [f64; 2],
}

impl Default for ScaleConfig {
    fn default() -> Self {
        Self {
            radius_range: [1.0, 100.0],
            backdrop_range: [10.0, 110.0],
            intensity_range: [0.0, 0.8],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HaloConfig {
    /// Multiplier on member radius added to its anchor distance
    pub padding: f64,
    pub max_radius: f64,
    /// Radius reported for a cluster with no members
    pub fallback_radius: f64,
}

impl Default for HaloConfig {
    fn default() -> Self {
        Self {
            padding: 1.0,
            max_radius: 150.0,
            fallback_radius: 50.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProbeConfig {
    pub half_size: f64,
    pub step: f64,
    /// Starting position; the viewport centre when absent
    pub start: Option<[f64; 2]>,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            half_size: 10.0,
            step: 10.0,
            start: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub fn center(&self) -> [f64; 2] {
        [self.width / 2.0, self.height / 2.0]
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 700.0,
        }
    }
}

/// Initial node placement around each node's cluster anchor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Placement {
    /// Deterministic sunflower spiral, one spiral per cluster
    #[serde(rename_all = "camelCase")]
    Phyllotaxis { initial_radius: f64 },
    /// Seeded uniform scatter inside a square of half-width `spread`
    Scatter { seed: u64, spread: f64 },
}

impl Default for Placement {
    fn default() -> Self {
        Placement::Phyllotaxis {
            initial_radius: 10.0,
        }
    }
}

/// Complete engine configuration
///
/// # Examples
///
/// ```
/// use spacechart::config::{LayoutConfig, RepulsionMethod};
///
/// let config: LayoutConfig =
///     serde_json::from_str(r#"{ "forces": { "repulsionMethod": "tree" } }"#).unwrap();
///
/// assert_eq!(config.forces.repulsion_method, RepulsionMethod::Tree);
/// assert_eq!(config.forces.attraction_strength, 0.5);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LayoutConfig {
    pub forces: ForceConfig,
    pub collision: CollisionConfig,
    pub integration: IntegrationConfig,
    pub scales: ScaleConfig,
    pub halo: HaloConfig,
    pub probe: ProbeConfig,
    pub viewport: Viewport,
    pub placement: Placement,
}

fn invalid(msg: impl Into<String>) -> LayoutError {
    LayoutError::InvalidConfig(msg.into())
}

fn check_finite(name: &str, value: f64) -> Result<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(invalid(format!("{name} must be finite")))
    }
}

fn check_range(name: &str, range: [f64; 2]) -> Result<()> {
    check_finite(name, range[0])?;
    check_finite(name, range[1])?;
    if range[0] > range[1] {
        return Err(invalid(format!("{name} is reversed")));
    }
    Ok(())
}

impl LayoutConfig {
    /// Rejects values that would make the layout diverge or the outputs
    /// undrawable
    pub fn validate(&self) -> Result<()> {
        let f = &self.forces;
        check_finite("attractionStrength", f.attraction_strength)?;
        check_finite("repulsionStrength", f.repulsion_strength)?;
        if f.attraction_strength < 0.0 {
            return Err(invalid("attractionStrength must be non-negative"));
        }
        if f.repulsion_strength > 0.0 {
            return Err(invalid("repulsionStrength must not be positive"));
        }
        if !(f.repulsion_distance_min > 0.0 && f.repulsion_distance_min.is_finite()) {
            return Err(invalid("repulsionDistanceMin must be positive"));
        }
        if !(f.theta >= 0.0 && f.theta.is_finite()) {
            return Err(invalid("theta must be non-negative"));
        }

        let c = &self.collision;
        if !(c.padding >= 0.0 && c.padding.is_finite()) {
            return Err(invalid("collision padding must be non-negative"));
        }
        if !(c.strength > 0.0 && c.strength <= 1.0) {
            return Err(invalid("collision strength must be in (0, 1]"));
        }

        let i = &self.integration;
        if !(0.0..=1.0).contains(&i.velocity_decay) {
            return Err(invalid("velocityDecay must be in [0, 1]"));
        }
        if !(0.0..=1.0).contains(&i.alpha_decay) {
            return Err(invalid("alphaDecay must be in [0, 1]"));
        }
        check_finite("alphaStart", i.alpha_start)?;
        check_finite("alphaTarget", i.alpha_target)?;
        if !(i.alpha_min >= 0.0 && i.alpha_min <= i.alpha_start) {
            return Err(invalid("alphaMin must be in [0, alphaStart]"));
        }

        check_range("radiusRange", self.scales.radius_range)?;
        check_range("backdropRange", self.scales.backdrop_range)?;
        check_range("intensityRange", self.scales.intensity_range)?;
        if self.scales.radius_range[0] < 0.0 {
            return Err(invalid("radiusRange must be non-negative"));
        }

        let h = &self.halo;
        for (name, value) in [
            ("halo padding", h.padding),
            ("maxRadius", h.max_radius),
            ("fallbackRadius", h.fallback_radius),
        ] {
            if !(value >= 0.0 && value.is_finite()) {
                return Err(invalid(format!("{name} must be non-negative")));
            }
        }

        let p = &self.probe;
        if !(p.half_size > 0.0 && p.half_size.is_finite()) {
            return Err(invalid("probe halfSize must be positive"));
        }
        check_finite("probe step", p.step)?;
        if let Some([x, y]) = p.start {
            check_finite("probe start", x)?;
            check_finite("probe start", y)?;
        }

        check_finite("viewport width", self.viewport.width)?;
        check_finite("viewport height", self.viewport.height)?;

        match self.placement {
            Placement::Phyllotaxis { initial_radius } => {
                check_finite("initialRadius", initial_radius)?
            }
            Placement::Scatter { spread, .. } => check_finite("spread", spread)?,
        }

        Ok(())
    }
}
