//! 2D node painters.
//!
//! Painters draw through [`Surface2d`] so the same code runs against the
//! browser canvas ([`CanvasSurface`]) and a recording surface in tests.

use std::f64::consts::PI;

use serde::Deserialize;
use web_sys::CanvasRenderingContext2d;

use super::theme::{BLACK, Color, GroupPalette, WHITE};
use super::types::Node;

/// Radius of the white outer disc/ring in world units.
pub const NODE_RADIUS: f64 = 12.0;

/// A radial gradient between two circles with ordered color stops.
#[derive(Clone, Debug, PartialEq)]
pub struct RadialGradient {
	pub x: f64,
	pub y: f64,
	pub r0: f64,
	pub r1: f64,
	pub stops: Vec<(f64, Color)>,
}

/// The subset of 2D canvas operations the painters need.
pub trait Surface2d {
	fn begin_path(&mut self);
	/// Full circle path.
	fn circle(&mut self, x: f64, y: f64, radius: f64);
	fn fill_color(&mut self, color: Color);
	fn fill_gradient(&mut self, gradient: &RadialGradient);
	fn stroke_color(&mut self, color: Color, width: f64);
}

/// Node appearance on the 2D canvas.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CanvasStyle {
	/// White disc with a group-colored core fading to black.
	#[default]
	FlatGradient,
	/// Stroked white ring around a bright core fading outward.
	GlowRing,
}

impl CanvasStyle {
	/// Paints `node` at `(x, y)`. Does nothing until the layout has given the
	/// node finite coordinates.
	pub fn paint(
		self,
		node: &Node,
		x: f64,
		y: f64,
		palette: &GroupPalette,
		surface: &mut impl Surface2d,
	) {
		if !x.is_finite() || !y.is_finite() {
			return;
		}
		let color = palette.color(node.group);
		match self {
			CanvasStyle::FlatGradient => paint_flat_gradient(x, y, color, surface),
			CanvasStyle::GlowRing => paint_glow_ring(x, y, color, surface),
		}
	}
}

fn paint_flat_gradient(x: f64, y: f64, color: Color, surface: &mut impl Surface2d) {
	surface.begin_path();
	surface.circle(x, y, NODE_RADIUS);
	surface.fill_color(WHITE);

	let inner = NODE_RADIUS - 1.0;
	let gradient = RadialGradient {
		x,
		y,
		r0: inner / 4.0,
		r1: inner,
		stops: vec![(0.0, color), (1.0, BLACK)],
	};
	surface.begin_path();
	surface.circle(x, y, inner);
	surface.fill_gradient(&gradient);
}

fn paint_glow_ring(x: f64, y: f64, color: Color, surface: &mut impl Surface2d) {
	let inner = NODE_RADIUS - 1.0;
	let gradient = RadialGradient {
		x,
		y,
		r0: 0.0,
		r1: inner,
		stops: vec![
			(0.0, color.lighten(0.7)),
			(0.45, color),
			(1.0, color.with_alpha(0.0)),
		],
	};
	surface.begin_path();
	surface.circle(x, y, inner);
	surface.fill_gradient(&gradient);

	surface.begin_path();
	surface.circle(x, y, NODE_RADIUS);
	surface.stroke_color(WHITE, 1.5);
}

/// [`Surface2d`] backed by a browser canvas context.
pub struct CanvasSurface<'a>(pub &'a CanvasRenderingContext2d);

impl Surface2d for CanvasSurface<'_> {
	fn begin_path(&mut self) {
		self.0.begin_path();
	}

	fn circle(&mut self, x: f64, y: f64, radius: f64) {
		let _ = self.0.arc(x, y, radius, 0.0, 2.0 * PI);
	}

	fn fill_color(&mut self, color: Color) {
		self.0.set_fill_style_str(&color.to_css());
		self.0.fill();
	}

	fn fill_gradient(&mut self, gradient: &RadialGradient) {
		let Ok(canvas_gradient) = self.0.create_radial_gradient(
			gradient.x,
			gradient.y,
			gradient.r0,
			gradient.x,
			gradient.y,
			gradient.r1,
		) else {
			return;
		};
		for (offset, color) in &gradient.stops {
			let _ = canvas_gradient.add_color_stop(*offset as f32, &color.to_css());
		}
		#[allow(deprecated)]
		self.0.set_fill_style(&canvas_gradient);
		self.0.fill();
	}

	fn stroke_color(&mut self, color: Color, width: f64) {
		self.0.set_stroke_style_str(&color.to_css());
		self.0.set_line_width(width);
		self.0.stroke();
	}
}

#[cfg(test)]
pub(crate) mod tests {
	use super::*;

	#[derive(Clone, Debug, PartialEq)]
	pub(crate) enum Op {
		BeginPath,
		Circle(f64, f64, f64),
		Fill(Color),
		FillGradient(RadialGradient),
		Stroke(Color, f64),
	}

	#[derive(Default)]
	pub(crate) struct Recorder {
		pub ops: Vec<Op>,
	}

	impl Surface2d for Recorder {
		fn begin_path(&mut self) {
			self.ops.push(Op::BeginPath);
		}
		fn circle(&mut self, x: f64, y: f64, radius: f64) {
			self.ops.push(Op::Circle(x, y, radius));
		}
		fn fill_color(&mut self, color: Color) {
			self.ops.push(Op::Fill(color));
		}
		fn fill_gradient(&mut self, gradient: &RadialGradient) {
			self.ops.push(Op::FillGradient(gradient.clone()));
		}
		fn stroke_color(&mut self, color: Color, width: f64) {
			self.ops.push(Op::Stroke(color, width));
		}
	}

	fn node(group: u32) -> Node {
		Node {
			id: 1,
			name: "0x98ad...ba9d".into(),
			group,
			share: "1.32%".into(),
			visible: Some(true),
		}
	}

	#[test]
	fn flat_gradient_draws_ring_then_core() {
		let palette = GroupPalette::default();
		let mut rec = Recorder::default();
		CanvasStyle::FlatGradient.paint(&node(1), 10.0, 20.0, &palette, &mut rec);

		assert_eq!(rec.ops[1], Op::Circle(10.0, 20.0, 12.0));
		assert_eq!(rec.ops[2], Op::Fill(WHITE));
		let Op::FillGradient(g) = &rec.ops[5] else {
			panic!("expected gradient fill, got {:?}", rec.ops[5]);
		};
		assert_eq!(g.r0, 11.0 / 4.0);
		assert_eq!(g.r1, 11.0);
		assert_eq!(g.stops, vec![(0.0, palette.hub), (1.0, BLACK)]);
	}

	#[test]
	fn inner_stop_follows_group() {
		let palette = GroupPalette::default();
		let mut rec = Recorder::default();
		CanvasStyle::FlatGradient.paint(&node(2), 0.0, 0.0, &palette, &mut rec);
		let gradient = rec.ops.iter().find_map(|op| match op {
			Op::FillGradient(g) => Some(g.clone()),
			_ => None,
		});
		assert_eq!(gradient.map(|g| g.stops[0].1), Some(palette.leaf));
	}

	#[test]
	fn glow_ring_strokes_instead_of_filling_white() {
		let palette = GroupPalette::default();
		let mut rec = Recorder::default();
		CanvasStyle::GlowRing.paint(&node(2), 0.0, 0.0, &palette, &mut rec);

		assert!(!rec.ops.contains(&Op::Fill(WHITE)));
		assert_eq!(rec.ops.last(), Some(&Op::Stroke(WHITE, 1.5)));
		let Op::FillGradient(g) = &rec.ops[2] else {
			panic!("expected gradient fill");
		};
		assert_eq!(g.stops.first().map(|s| s.1), Some(palette.leaf.lighten(0.7)));
		assert_eq!(g.stops.last().map(|s| s.1.a), Some(0.0));
	}

	#[test]
	fn unpositioned_nodes_are_skipped() {
		let palette = GroupPalette::default();
		for style in [CanvasStyle::FlatGradient, CanvasStyle::GlowRing] {
			let mut rec = Recorder::default();
			style.paint(&node(1), f64::NAN, 0.0, &palette, &mut rec);
			style.paint(&node(1), 0.0, f64::INFINITY, &palette, &mut rec);
			assert!(rec.ops.is_empty());
		}
	}

	#[test]
	fn painting_leaves_node_untouched() {
		let n = node(1);
		let before = n.clone();
		CanvasStyle::GlowRing.paint(&n, 1.0, 1.0, &GroupPalette::default(), &mut Recorder::default());
		assert_eq!(n, before);
	}
}
