//! Layout configuration.
//!
//! Defaults reproduce the dashboard's bubble chart: a 1200x700 canvas with
//! 20px margins, a legend strip across the top centre and the force constants
//! the chart was tuned with. Every section is `#[serde(default)]`, so a
//! config file only needs the keys it changes.

use serde::{Deserialize, Serialize};

use crate::errors::LayoutError;

/// Per-side canvas padding.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Margins {
    /// Top padding.
    pub top: f64,
    /// Right padding.
    pub right: f64,
    /// Bottom padding.
    pub bottom: f64,
    /// Left padding.
    pub left: f64,
}

impl Default for Margins {
    fn default() -> Self {
        Self {
            top: 20.0,
            right: 20.0,
            bottom: 20.0,
            left: 20.0,
        }
    }
}

/// What happens to a node that ends a step inside the legend region.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LegendPolicy {
    /// The legend is drawn over whatever sits beneath it.
    #[default]
    Ignore,
    /// The node goes back to where it was before the step.
    Reject,
    /// The node is mirrored below the legend's bottom edge.
    Reflect,
}

/// The reserved rectangle at the top centre of the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LegendRegion {
    /// Half of the region's width, measured from the canvas centre line.
    pub half_width: f64,
    /// Distance of the region's bottom edge from the top of the canvas.
    pub height: f64,
    /// How strictly the region is kept clear.
    pub policy: LegendPolicy,
}

impl Default for LegendRegion {
    fn default() -> Self {
        Self {
            half_width: 420.0,
            height: 160.0,
            policy: LegendPolicy::Ignore,
        }
    }
}

impl LegendRegion {
    /// Whether `(x, y)` lies inside the region on a canvas `width` wide.
    pub fn contains(&self, width: f64, x: f64, y: f64) -> bool {
        y < self.height && (x - width / 2.0).abs() < self.half_width
    }
}

/// How node and edge attributes are derived from the input counts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SizingConfig {
    /// Radius of the least frequent word.
    pub min_radius: f64,
    /// Radius of the most frequent word.
    pub max_radius: f64,
    /// Radius used when every word has the same count. Midpoint of the
    /// radius range when unset.
    pub default_radius: Option<f64>,
    /// `charge = radius ^ charge_exponent`, capped at `charge_cap`.
    pub charge_exponent: f64,
    /// Upper bound on the derived charge.
    pub charge_cap: f64,
    /// Edges lighter than `round(max_weight * edge_threshold_ratio)` are
    /// dropped.
    pub edge_threshold_ratio: f64,
    /// Thinnest and thickest edge stroke.
    pub thickness_range: (f64, f64),
}

impl Default for SizingConfig {
    fn default() -> Self {
        Self {
            min_radius: 20.0,
            max_radius: 70.0,
            default_radius: None,
            charge_exponent: 1.15,
            charge_cap: 100.0,
            edge_threshold_ratio: 0.005,
            thickness_range: (0.5, 4.0),
        }
    }
}

impl SizingConfig {
    /// The radius used for a zero-width count domain.
    pub fn fallback_radius(&self) -> f64 {
        self.default_radius
            .unwrap_or((self.min_radius + self.max_radius) / 2.0)
    }
}

/// Force constants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ForceConfig {
    /// Lower bound on each node's repulsion magnitude.
    pub repulsion_floor: f64,
    /// Upper bound on each node's repulsion magnitude.
    pub max_repulsion: f64,
    /// Edge rest length before the radius term.
    pub link_distance: f64,
    /// Cap on the `r_source + r_target` term added to the rest length.
    pub link_radius_cap: f64,
    /// Horizontal position of the centre target, as a share of the width.
    pub center_x: f64,
    /// Vertical position of the centre target, as a share of the height.
    pub center_y: f64,
    /// Strength of the horizontal pull towards the centre target.
    pub x_strength: f64,
    /// Strength of the vertical pull towards the centre target.
    pub y_strength: f64,
    /// Extra spacing added to each radius for collision.
    pub collide_padding: f64,
    /// Fraction of velocity lost per step.
    pub velocity_decay: f64,
    /// Stroke allowance kept between a circle and the canvas margin.
    pub boundary_buffer: f64,
    /// Radius of the starting circle, as a share of the width.
    pub initial_spread: f64,
    /// Vertical centre of the starting circle, as a share of the height.
    pub initial_center_y: f64,
}

impl Default for ForceConfig {
    fn default() -> Self {
        Self {
            repulsion_floor: 350.0,
            max_repulsion: 350.0,
            link_distance: 100.0,
            link_radius_cap: 100.0,
            center_x: 0.5,
            center_y: 0.7,
            x_strength: 0.08,
            y_strength: 0.18,
            collide_padding: 25.0,
            velocity_decay: 0.4,
            boundary_buffer: 26.0,
            initial_spread: 0.5,
            initial_center_y: 0.4,
        }
    }
}

/// Cooling schedule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AlphaConfig {
    /// Energy at the start of a run.
    pub initial: f64,
    /// Share of the gap to the target closed each step.
    pub decay: f64,
    /// Resting target while nobody drags.
    pub target: f64,
    /// Target while at least one node is being dragged.
    pub drag_target: f64,
    /// Target restored when the last drag ends.
    pub release_target: f64,
    /// The run is converged once alpha drops below this.
    pub min: f64,
}

impl Default for AlphaConfig {
    fn default() -> Self {
        Self {
            initial: 1.0,
            decay: 0.002,
            target: 0.01,
            drag_target: 0.3,
            release_target: 0.0,
            min: 0.001,
        }
    }
}

/// Everything a [`Simulation`](crate::Simulation) needs besides its graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LayoutConfig {
    /// Canvas width in pixels.
    pub width: f64,
    /// Canvas height in pixels.
    pub height: f64,
    /// Canvas padding.
    pub margins: Margins,
    /// Reserved legend rectangle.
    pub legend: LegendRegion,
    /// Radius, charge and edge styling.
    pub sizing: SizingConfig,
    /// Force constants.
    pub forces: ForceConfig,
    /// Cooling schedule.
    pub alpha: AlphaConfig,
    /// Seed of the generator used to separate coincident nodes.
    pub seed: u32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            width: 1200.0,
            height: 700.0,
            margins: Margins::default(),
            legend: LegendRegion::default(),
            sizing: SizingConfig::default(),
            forces: ForceConfig::default(),
            alpha: AlphaConfig::default(),
            seed: 1,
        }
    }
}

impl LayoutConfig {
    /// Rejects values that would make the layout meaningless.
    pub fn validate(&self) -> Result<(), LayoutError> {
        let positive = [("width", self.width), ("height", self.height)];
        for (name, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(LayoutError::InvalidConfig(format!(
                    "{name} must be a positive number, got {value}"
                )));
            }
        }
        if self.sizing.min_radius > self.sizing.max_radius {
            return Err(LayoutError::InvalidConfig(
                "min_radius exceeds max_radius".to_string(),
            ));
        }
        if self.forces.repulsion_floor > self.forces.max_repulsion {
            return Err(LayoutError::InvalidConfig(
                "repulsion_floor exceeds max_repulsion".to_string(),
            ));
        }
        if !(0.0..=1.0).contains(&self.forces.velocity_decay) {
            return Err(LayoutError::InvalidConfig(
                "velocity_decay must lie in [0, 1]".to_string(),
            ));
        }
        if !(self.alpha.decay > 0.0 && self.alpha.decay <= 1.0) {
            return Err(LayoutError::InvalidConfig(
                "alpha decay must lie in (0, 1]".to_string(),
            ));
        }
        Ok(())
    }

    /// Point the centering forces pull towards.
    pub fn center(&self) -> (f64, f64) {
        (
            self.width * self.forces.center_x,
            self.height * self.forces.center_y,
        )
    }

    /// Allowed `[lo, hi]` for a circle's centre on each axis.
    ///
    /// When the canvas is too small for the circle, `hi < lo` and callers
    /// clamp to `lo`.
    pub fn bounds(&self, radius: f64) -> ((f64, f64), (f64, f64)) {
        let pad = radius + self.forces.boundary_buffer;
        (
            (self.margins.left + pad, self.width - self.margins.right - pad),
            (self.margins.top + pad, self.height - self.margins.bottom - pad),
        )
    }
}
