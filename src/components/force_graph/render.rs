//! Canvas rendering for the force graph.
//!
//! Rendering uses multiple passes for correct z-ordering:
//! 1. Background (screen space)
//! 2. Visible links: lines, arrowheads, flow particles (world space)
//! 3. Visible nodes through the active painter, then the hover label

use std::collections::HashMap;
use std::f64::consts::PI;

use force_graph::DefaultNodeIdx;
use web_sys::CanvasRenderingContext2d;

use super::particles::LinkParticles;
use super::renderer::{CanvasSurface, NODE_RADIUS};
use super::scale::{ScaleConfig, ScaledValues};
use super::state::ForceGraphState;
use super::theme::Theme;
use super::types::GraphDataset;
use super::view::GraphView;

/// Everything a frame needs besides the simulation state.
pub struct Frame<'a> {
	pub data: &'a GraphDataset,
	pub view: &'a GraphView,
	pub scale: &'a ScaleConfig,
	pub theme: &'a Theme,
	pub particles: &'a LinkParticles,
}

/// Renders the complete graph to the canvas.
pub fn render(state: &ForceGraphState, ctx: &CanvasRenderingContext2d, frame: &Frame) {
	let scale = ScaledValues::new(frame.scale, state.transform.k);

	ctx.set_fill_style_str(&frame.theme.background.to_css());
	ctx.fill_rect(0.0, 0.0, state.width, state.height);

	ctx.save();
	let _ = ctx.translate(state.transform.x, state.transform.y);
	let _ = ctx.scale(state.transform.k, state.transform.k);

	let positions = state.positions();
	draw_links(state, ctx, frame, &scale, &positions);
	draw_nodes(state, ctx, frame, &scale);

	ctx.restore();
}

fn draw_links(
	state: &ForceGraphState,
	ctx: &CanvasRenderingContext2d,
	frame: &Frame,
	scale: &ScaledValues,
	positions: &HashMap<DefaultNodeIdx, (f32, f32)>,
) {
	let color = frame.theme.link.color.to_css();
	let particle_color = frame.theme.link.particle_color.to_css();
	let _ = ctx.set_line_dash(&js_sys::Array::new());

	for sim in &state.links {
		let Some(link) = frame.data.links.get(sim.index) else {
			continue;
		};
		if !frame.view.link_visibility(link) {
			continue;
		}
		let (Some(&(x1, y1)), Some(&(x2, y2))) =
			(positions.get(&sim.source), positions.get(&sim.target))
		else {
			continue;
		};
		let (x1, y1, x2, y2) = (x1 as f64, y1 as f64, x2 as f64, y2 as f64);
		let (dx, dy) = (x2 - x1, y2 - y1);
		let dist = (dx * dx + dy * dy).sqrt();
		if !dist.is_finite() || dist < 0.001 {
			continue;
		}
		let (ux, uy) = (dx / dist, dy / dist);

		ctx.set_stroke_style_str(&color);
		ctx.set_line_width(scale.link_width(link.value));
		ctx.begin_path();
		ctx.move_to(x1, y1);
		ctx.line_to(x2, y2);
		ctx.stroke();

		// Arrowhead tip sits at `arrow_rel_pos` of the segment between the
		// node discs.
		let span = (dist - 2.0 * NODE_RADIUS).max(0.0);
		let along = NODE_RADIUS + span * frame.scale.arrow_rel_pos + frame.scale.arrow_length / 2.0;
		let (tip_x, tip_y) = (x1 + ux * along, y1 + uy * along);
		let len = frame.scale.arrow_length;
		let (back_x, back_y) = (tip_x - ux * len, tip_y - uy * len);
		let (px, py) = (-uy * len * 0.4, ux * len * 0.4);
		ctx.set_fill_style_str(&color);
		ctx.begin_path();
		ctx.move_to(tip_x, tip_y);
		ctx.line_to(back_x + px, back_y + py);
		ctx.line_to(back_x - px, back_y - py);
		ctx.close_path();
		ctx.fill();

		ctx.set_fill_style_str(&particle_color);
		for t in frame.particles.positions(sim.index) {
			ctx.begin_path();
			let _ = ctx.arc(x1 + dx * t, y1 + dy * t, scale.particle_radius, 0.0, 2.0 * PI);
			ctx.fill();
		}
	}
}

fn draw_nodes(
	state: &ForceGraphState,
	ctx: &CanvasRenderingContext2d,
	frame: &Frame,
	scale: &ScaledValues,
) {
	let mut surface = CanvasSurface(ctx);
	let mut label = None;

	state.graph.visit_nodes(|node| {
		let Some(data) = frame.data.nodes.get(node.data.user_data.index) else {
			return;
		};
		let (x, y) = (node.x() as f64, node.y() as f64);
		frame.view.paint_node(data, x, y, &mut surface);

		if state.hovered == Some(data.id) && frame.view.node_visibility(data.id) {
			label = Some((data.name.as_str(), x, y));
		}
	});

	if let Some((name, x, y)) = label {
		if x.is_finite() && y.is_finite() {
			ctx.set_fill_style_str(&frame.theme.label.to_css());
			ctx.set_font(&scale.label_font);
			let _ = ctx.fill_text(name, x + NODE_RADIUS + 4.0, y + 4.0);
		}
	}
}
