//! Zoom-dependent scaling configuration for graph visuals.
//!
//! - **World-space** values scale with zoom (node discs, link length).
//! - **Screen-space** values keep a constant pixel size; they are divided by
//!   the zoom factor `k` before drawing under the canvas transform.

/// Configuration for all size-related rendering parameters.
#[derive(Clone, Debug)]
pub struct ScaleConfig {
	/// Zoom bounds `(min, max)`.
	pub zoom: (f64, f64),
	/// Hit detection radius in world units.
	pub hit_radius: f64,
	/// Link width per unit of link value, in screen pixels.
	pub link_width_per_value: f64,
	/// Arrowhead length in world units.
	pub arrow_length: f64,
	/// Arrowhead position along the link (0 = source, 1 = target).
	pub arrow_rel_pos: f64,
	/// Flow particle radius in screen pixels.
	pub particle_radius: f64,
	/// Hover label font size in screen pixels.
	pub label_size: f64,
}

impl Default for ScaleConfig {
	fn default() -> Self {
		Self {
			zoom: (0.5, 5.0),
			hit_radius: 12.0,
			link_width_per_value: 0.1,
			arrow_length: 8.0,
			arrow_rel_pos: 0.8,
			particle_radius: 2.0,
			label_size: 12.0,
		}
	}
}

impl ScaleConfig {
	pub fn clamp_zoom(&self, k: f64) -> f64 {
		k.clamp(self.zoom.0, self.zoom.1)
	}
}

/// Pre-computed scale values for a specific zoom level.
///
/// Create this once per frame and pass it to rendering functions.
#[derive(Clone, Debug)]
pub struct ScaledValues {
	pub k: f64,
	pub particle_radius: f64,
	/// Label font string (e.g., "12px sans-serif").
	pub label_font: String,
	link_width_per_value: f64,
}

impl ScaledValues {
	pub fn new(config: &ScaleConfig, k: f64) -> Self {
		Self {
			k,
			particle_radius: config.particle_radius / k,
			label_font: format!("{}px sans-serif", config.label_size / k),
			link_width_per_value: config.link_width_per_value,
		}
	}

	/// Link line width in world-space for a link of the given value.
	pub fn link_width(&self, value: f64) -> f64 {
		(value * self.link_width_per_value).max(0.5) / self.k
	}
}
