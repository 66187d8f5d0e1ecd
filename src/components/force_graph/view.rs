//! Orchestration between the visibility layer, the node painters and the
//! layout engine.
//!
//! A [`GraphView`] is configured once with a [`RenderMode`]. It answers the
//! per-frame questions of the render loop (is this node/link visible, how is
//! this node drawn) from a [`VisibleSet`] that is only replaced when the
//! visibility inputs change.

use std::collections::HashMap;

use log::debug;
use serde::Deserialize;

use super::renderer::{CanvasStyle, Surface2d};
use super::scene::{MeshStyle, SceneObject};
use super::theme::GroupPalette;
use super::types::{GraphDataset, Group, Link, Node, NodeId};
use super::visibility::VisibleSet;

/// Link target distance when a link has no custom length.
pub const DEFAULT_LINK_DISTANCE: f64 = 50.0;

/// Rendering mode and the node style active in it, configured as
/// `{ "mode": "mesh", "style": "neon" }`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(tag = "mode", content = "style", rename_all = "kebab-case")]
pub enum RenderMode {
	Canvas(CanvasStyle),
	Mesh(MeshStyle),
}

impl RenderMode {
	/// Fraction of node velocity lost per simulation step.
	pub fn velocity_decay(self) -> f64 {
		match self {
			RenderMode::Canvas(_) => 0.5,
			RenderMode::Mesh(_) => 0.3,
		}
	}

	/// Style for the 2D canvas. Mesh mode keeps the canvas for links and
	/// layout with the default node style.
	pub fn canvas_style(self) -> CanvasStyle {
		match self {
			RenderMode::Canvas(style) => style,
			RenderMode::Mesh(_) => CanvasStyle::default(),
		}
	}
}

impl Default for RenderMode {
	fn default() -> Self {
		RenderMode::Canvas(CanvasStyle::default())
	}
}

/// Page-level view configuration.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct ViewConfig {
	pub render: RenderMode,
	pub initial_groups: Vec<Group>,
	pub link_distance: f64,
}

impl Default for ViewConfig {
	fn default() -> Self {
		Self {
			render: RenderMode::default(),
			initial_groups: vec![1, 2],
			link_distance: DEFAULT_LINK_DISTANCE,
		}
	}
}

impl ViewConfig {
	pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
		serde_json::from_str(json)
	}
}

/// Per-frame callbacks handed to the layout/render loop.
pub struct GraphView {
	mode: RenderMode,
	palette: GroupPalette,
	default_link_distance: f64,
	visible: VisibleSet,
	objects: HashMap<NodeId, SceneObject>,
}

impl GraphView {
	pub fn new(mode: RenderMode, palette: GroupPalette) -> Self {
		Self {
			mode,
			palette,
			default_link_distance: DEFAULT_LINK_DISTANCE,
			visible: VisibleSet::default(),
			objects: HashMap::new(),
		}
	}

	pub fn with_link_distance(mut self, distance: f64) -> Self {
		self.default_link_distance = distance;
		self
	}

	pub fn mode(&self) -> RenderMode {
		self.mode
	}

	/// Replaces the visible set. Called once per visibility change.
	pub fn set_visible(&mut self, visible: VisibleSet) {
		debug!("graph view: {} visible nodes", visible.len());
		self.visible = visible;
	}

	pub fn visible(&self) -> &VisibleSet {
		&self.visible
	}

	pub fn node_visibility(&self, id: NodeId) -> bool {
		self.visible.contains(id)
	}

	pub fn link_visibility(&self, link: &Link) -> bool {
		self.visible.is_link_visible(link)
	}

	pub fn link_distance(&self, link: &Link) -> f64 {
		link.custom_length.unwrap_or(self.default_link_distance)
	}

	pub fn velocity_decay(&self) -> f64 {
		self.mode.velocity_decay()
	}

	/// Canvas mode draw callback. Hidden nodes and mesh mode draw nothing.
	pub fn paint_node(&self, node: &Node, x: f64, y: f64, surface: &mut impl Surface2d) {
		let RenderMode::Canvas(style) = self.mode else {
			return;
		};
		if self.node_visibility(node.id) {
			style.paint(node, x, y, &self.palette, surface);
		}
	}

	/// Mesh mode object factory. Objects are built once per node and reused
	/// until [`GraphView::forget_node`].
	pub fn node_object(&mut self, node: &Node) -> Option<&SceneObject> {
		let RenderMode::Mesh(style) = self.mode else {
			return None;
		};
		let palette = &self.palette;
		let object = self
			.objects
			.entry(node.id)
			.or_insert_with(|| style.build(node, palette));
		Some(&*object)
	}

	pub fn forget_node(&mut self, id: NodeId) {
		self.objects.remove(&id);
	}

	/// Scene objects of every visible node as a JSON array of
	/// `{ id, object }` entries.
	pub fn scene_json(&mut self, dataset: &GraphDataset) -> Result<String, serde_json::Error> {
		let mut entries = Vec::new();
		for node in &dataset.nodes {
			if !self.node_visibility(node.id) {
				continue;
			}
			if let Some(object) = self.node_object(node) {
				entries.push(serde_json::json!({ "id": node.id, "object": object }));
			}
		}
		serde_json::to_string(&entries)
	}
}
