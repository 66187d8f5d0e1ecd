//! Graph simulation state and interaction tracking.
//!
//! Wraps the `force_graph` physics simulation with per-node metadata, a
//! link-distance constraint, view transforms for pan/zoom and hover state.
//! Every dataset node is simulated; visibility only affects drawing and hit
//! testing.

use std::collections::HashMap;
use std::f64::consts::PI;

use force_graph::{DefaultNodeIdx, EdgeData, ForceGraph, NodeData, SimulationParameters};
use log::warn;

use super::scale::ScaleConfig;
use super::types::{GraphDataset, NodeId};
use super::view::GraphView;
use super::visibility::VisibleSet;

/// How strongly a link pulls its endpoints towards its target distance per
/// frame (0 = not at all, 1 = fully).
const LINK_STRENGTH: f32 = 0.1;

/// Per-node metadata attached to each node in the simulation.
#[derive(Clone, Debug, Default)]
pub struct NodeInfo {
	/// Index into `GraphDataset::nodes`.
	pub index: usize,
	pub id: NodeId,
}

/// A simulated link with its resolved endpoints.
#[derive(Clone, Debug)]
pub struct SimLink {
	/// Index into `GraphDataset::links`.
	pub index: usize,
	pub source: DefaultNodeIdx,
	pub target: DefaultNodeIdx,
	pub distance: f32,
}

/// Pan and zoom transform applied to the entire graph view.
#[derive(Clone, Debug, Default)]
pub struct ViewTransform {
	pub x: f64,
	pub y: f64,
	/// Zoom factor (1.0 = 100%).
	pub k: f64,
}

/// Tracks an in-progress node drag operation.
#[derive(Clone, Debug, Default)]
pub struct DragState {
	pub active: bool,
	pub node_idx: Option<DefaultNodeIdx>,
	pub start_x: f64,
	pub start_y: f64,
	pub node_start_x: f32,
	pub node_start_y: f32,
}

/// Tracks an in-progress canvas pan operation.
#[derive(Clone, Debug, Default)]
pub struct PanState {
	pub active: bool,
	pub start_x: f64,
	pub start_y: f64,
	pub transform_start_x: f64,
	pub transform_start_y: f64,
}

/// Core graph state combining physics simulation with interaction tracking.
///
/// Created once when the component mounts, then mutated each frame by the
/// animation loop.
pub struct ForceGraphState {
	pub graph: ForceGraph<NodeInfo, ()>,
	pub links: Vec<SimLink>,
	pub transform: ViewTransform,
	pub drag: DragState,
	pub pan: PanState,
	pub hovered: Option<NodeId>,
	pub width: f64,
	pub height: f64,
	pub animation_running: bool,
}

impl ForceGraphState {
	/// Builds the simulation. Layout parameters (link distance, velocity
	/// decay) are read from `view` once, here.
	pub fn new(data: &GraphDataset, view: &GraphView, width: f64, height: f64) -> Self {
		let mut graph = ForceGraph::new(SimulationParameters {
			force_charge: 150.0,
			force_spring: 0.01,
			force_max: 100.0,
			node_speed: 3000.0,
			damping_factor: (1.0 - view.velocity_decay()) as f32,
		});
		let mut id_to_idx = HashMap::new();

		for (i, node) in data.nodes.iter().enumerate() {
			let angle = (i as f64) * 2.0 * PI / data.nodes.len() as f64;
			let idx = graph.add_node(NodeData {
				x: (100.0 * angle.cos()) as f32,
				y: (100.0 * angle.sin()) as f32,
				mass: 10.0,
				is_anchor: false,
				user_data: NodeInfo { index: i, id: node.id },
			});
			id_to_idx.insert(node.id, idx);
		}

		let mut links = Vec::new();
		for (i, link) in data.links.iter().enumerate() {
			let (source, target) = (link.source.id(), link.target.id());
			match (id_to_idx.get(&source), id_to_idx.get(&target)) {
				(Some(&src), Some(&tgt)) => {
					graph.add_edge(src, tgt, EdgeData::default());
					links.push(SimLink {
						index: i,
						source: src,
						target: tgt,
						distance: view.link_distance(link) as f32,
					});
				}
				_ => warn!("address-graph: link {source} -> {target} references a missing node"),
			}
		}

		Self {
			graph,
			links,
			transform: ViewTransform {
				x: width / 2.0,
				y: height / 2.0,
				k: 1.0,
			},
			drag: DragState::default(),
			pan: PanState::default(),
			hovered: None,
			width,
			height,
			animation_running: true,
		}
	}

	pub fn positions(&self) -> HashMap<DefaultNodeIdx, (f32, f32)> {
		let mut positions = HashMap::new();
		self.graph.visit_nodes(|node| {
			positions.insert(node.index(), (node.x(), node.y()));
		});
		positions
	}

	pub fn screen_to_graph(&self, sx: f64, sy: f64) -> (f64, f64) {
		(
			(sx - self.transform.x) / self.transform.k,
			(sy - self.transform.y) / self.transform.k,
		)
	}

	/// Topmost visible node under the screen position.
	pub fn node_at_position(
		&self,
		sx: f64,
		sy: f64,
		config: &ScaleConfig,
		visible: &VisibleSet,
	) -> Option<(DefaultNodeIdx, NodeId)> {
		let (gx, gy) = self.screen_to_graph(sx, sy);
		let mut found = None;
		self.graph.visit_nodes(|node| {
			let id = node.data.user_data.id;
			if !visible.contains(id) {
				return;
			}
			let (dx, dy) = (node.x() as f64 - gx, node.y() as f64 - gy);
			if (dx * dx + dy * dy).sqrt() < config.hit_radius {
				found = Some((node.index(), id));
			}
		});
		found
	}

	/// Pulls linked nodes towards their target distance. Anchored (dragged)
	/// nodes stay put.
	pub fn apply_link_distance(&mut self) {
		let positions = self.positions();
		let mut shifts: HashMap<DefaultNodeIdx, (f32, f32)> = HashMap::new();
		for link in &self.links {
			let (Some(&(x1, y1)), Some(&(x2, y2))) =
				(positions.get(&link.source), positions.get(&link.target))
			else {
				continue;
			};
			let (dx, dy) = (x2 - x1, y2 - y1);
			let dist = (dx * dx + dy * dy).sqrt();
			if !dist.is_finite() || dist < 0.001 {
				continue;
			}
			let f = (dist - link.distance) / dist * LINK_STRENGTH * 0.5;
			let s = shifts.entry(link.source).or_default();
			s.0 += dx * f;
			s.1 += dy * f;
			let t = shifts.entry(link.target).or_default();
			t.0 -= dx * f;
			t.1 -= dy * f;
		}
		self.graph.visit_nodes_mut(|node| {
			if node.data.is_anchor {
				return;
			}
			if let Some(&(sx, sy)) = shifts.get(&node.index()) {
				node.data.x += sx;
				node.data.y += sy;
			}
		});
	}

	pub fn tick(&mut self, dt: f32) {
		self.graph.update(dt);
		self.apply_link_distance();
	}

	pub fn resize(&mut self, width: f64, height: f64) {
		self.width = width;
		self.height = height;
	}
}

#[cfg(test)]
mod tests {
	use super::super::renderer::CanvasStyle;
	use super::super::theme::GroupPalette;
	use super::super::types::{Link, Node};
	use super::super::view::RenderMode;
	use super::*;

	fn pair(distance: Option<f64>) -> GraphDataset {
		let node = |id| Node {
			id,
			name: format!("0x{id}"),
			group: 1,
			share: String::new(),
			visible: None,
		};
		let mut link = Link::new(1, 2, 10.0);
		link.custom_length = distance;
		GraphDataset {
			nodes: vec![node(1), node(2)],
			links: vec![link, Link::new(1, 9, 1.0)],
		}
	}

	fn view() -> GraphView {
		GraphView::new(RenderMode::Canvas(CanvasStyle::FlatGradient), GroupPalette::default())
	}

	fn separation(state: &ForceGraphState) -> f32 {
		let p = state.positions();
		let (a, b) = (p[&state.links[0].source], p[&state.links[0].target]);
		((a.0 - b.0).powi(2) + (a.1 - b.1).powi(2)).sqrt()
	}

	#[test]
	fn dangling_links_are_not_simulated() {
		let state = ForceGraphState::new(&pair(None), &view(), 800.0, 600.0);
		assert_eq!(state.links.len(), 1);
		assert_eq!(state.links[0].distance, 50.0);
	}

	#[test]
	fn custom_length_sets_target_distance() {
		let state = ForceGraphState::new(&pair(Some(80.0)), &view(), 800.0, 600.0);
		assert_eq!(state.links[0].distance, 80.0);
	}

	#[test]
	fn link_constraint_moves_towards_target() {
		let mut state = ForceGraphState::new(&pair(None), &view(), 800.0, 600.0);
		// Two nodes start 200 apart on the initial circle.
		let before = separation(&state);
		assert!(before > 150.0);
		for _ in 0..200 {
			state.apply_link_distance();
		}
		let after = separation(&state);
		assert!(after < before);
		assert!((after - 50.0).abs() < 1.0);
	}

	#[test]
	fn hidden_nodes_are_not_hit() {
		let state = ForceGraphState::new(&pair(None), &view(), 800.0, 600.0);
		let config = ScaleConfig::default();
		// Node 1 sits at (100, 0) in graph space.
		let (sx, sy) = (state.transform.x + 100.0, state.transform.y);
		let all: VisibleSet = [1, 2].into_iter().collect();
		assert_eq!(state.node_at_position(sx, sy, &config, &all).map(|h| h.1), Some(1));
		let none: VisibleSet = [2].into_iter().collect();
		assert_eq!(state.node_at_position(sx, sy, &config, &none), None);
	}
}
