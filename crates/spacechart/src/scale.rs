//! Square-root scales from an observed domain to a fixed output range
//!
//! Square-root mapping compresses differences in magnitude so that a few
//! very popular games do not dwarf the rest of the catalog.

use crate::config::ScaleConfig;

/// `sign(x) * sqrt(|x|)`, so negative inputs stay ordered
#[inline]
fn signed_sqrt(x: f64) -> f64 {
    x.signum() * x.abs().sqrt()
}

/// A clamped square-root scale
///
/// Monotonically non-decreasing for a non-reversed range, and always
/// returns a value inside the range. A degenerate domain (min == max,
/// or no observations) maps everything to the range minimum.
///
/// # Examples
///
/// ```
/// use spacechart::scale::SqrtScale;
///
/// let scale = SqrtScale::new([0.0, 100.0], [0.0, 10.0]);
/// assert_eq!(scale.map(25.0), 5.0);
/// assert_eq!(scale.map(400.0), 10.0); // clamped
///
/// let flat = SqrtScale::new([7.0, 7.0], [1.0, 100.0]);
/// assert_eq!(flat.map(7.0), 1.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SqrtScale {
    domain: [f64; 2],
    range: [f64; 2],
}

impl SqrtScale {
    pub fn new(domain: [f64; 2], range: [f64; 2]) -> Self {
        Self { domain, range }
    }

    /// Fits the domain to the minimum and maximum finite value observed
    pub fn fit<I>(values: I, range: [f64; 2]) -> Self
    where
        I: IntoIterator<Item = f64>,
    {
        let domain = values
            .into_iter()
            .filter(|v| v.is_finite())
            .fold(None, |acc: Option<[f64; 2]>, v| match acc {
                None => Some([v, v]),
                Some([lo, hi]) => Some([lo.min(v), hi.max(v)]),
            })
            .unwrap_or([0.0, 0.0]);

        Self { domain, range }
    }

    pub fn domain(&self) -> [f64; 2] {
        self.domain
    }

    pub fn range(&self) -> [f64; 2] {
        self.range
    }

    pub fn is_degenerate(&self) -> bool {
        !(signed_sqrt(self.domain[1]) - signed_sqrt(self.domain[0]) > 0.0)
    }

    pub fn map(&self, value: f64) -> f64 {
        let [r0, r1] = self.range;
        if self.is_degenerate() || !value.is_finite() {
            return r0;
        }

        let s0 = signed_sqrt(self.domain[0]);
        let s1 = signed_sqrt(self.domain[1]);
        let t = ((signed_sqrt(value) - s0) / (s1 - s0)).clamp(0.0, 1.0);

        r0 + t * (r1 - r0)
    }
}

/// The scales one node set is drawn with, fitted to its observed values
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScaleSet {
    size: SqrtScale,
    backdrop: SqrtScale,
    intensity: SqrtScale,
}

impl ScaleSet {
    /// Fits weight scales to `weights` and the intensity scale to `scores`
    pub fn fit(weights: &[f64], scores: &[f64], config: &ScaleConfig) -> Self {
        Self {
            size: SqrtScale::fit(weights.iter().copied(), config.radius_range),
            backdrop: SqrtScale::fit(weights.iter().copied(), config.backdrop_range),
            intensity: SqrtScale::fit(scores.iter().copied(), config.intensity_range),
        }
    }

    /// Node radius for a weight
    pub fn size_of(&self, weight: f64) -> f64 {
        self.size.map(weight)
    }

    /// Half-width of the tinted backdrop drawn behind a node
    pub fn backdrop_of(&self, weight: f64) -> f64 {
        self.backdrop.map(weight)
    }

    /// Normalized brightness for a quality score
    pub fn intensity_of(&self, score: f64) -> f64 {
        self.intensity.map(score)
    }
}
