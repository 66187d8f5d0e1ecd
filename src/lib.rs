//! address-graph: interactive force-directed address graph.
//!
//! This crate provides a WASM-based graph visualization of addresses and the
//! links between them. Node visibility is layered: a global group filter and
//! a per-node override from the address list combine into the set of nodes
//! and links the canvas draws. The dataset itself is never mutated.

use leptos::prelude::*;
use leptos_meta::*;
use log::{Level, debug, info, warn};
use wasm_bindgen::JsCast;
use web_sys::{HtmlScriptElement, Window};

pub mod components;

pub use components::address_list::AddressList;
use components::force_graph::theme::GroupPalette;
pub use components::force_graph::{
	CanvasStyle, ForceGraphCanvas, GraphDataset, GraphView, Group, Link, MeshStyle, Node, NodeId,
	RenderMode, SceneObject, ViewConfig, VisibilityState, VisibleSet, nodes_for_table, resolve,
	sample_dataset,
};

/// Initialize logging and panic hooks for the WASM target.
pub fn init_logging() {
	let _ = console_log::init_with_level(Level::Debug);
	console_error_panic_hook::set_once();
	info!("address-graph: logging initialized");
}

/// Text of the `<script>` element with the given id.
fn script_text(id: &str) -> Option<String> {
	let window: Window = web_sys::window()?;
	let document = window.document()?;
	let element = document.get_element_by_id(id)?;
	let script: HtmlScriptElement = element.dyn_into().ok()?;
	script.text().ok()
}

/// Load graph data from a script element with id="graph-data".
/// Expected format: JSON with { nodes: [...], links: [...] }
fn load_graph_data() -> Option<GraphDataset> {
	let json_text = script_text("graph-data")?;

	match GraphDataset::from_json(&json_text) {
		Ok(data) => {
			info!(
				"address-graph: loaded {} nodes, {} links",
				data.nodes.len(),
				data.links.len()
			);
			for link in data.dangling_links() {
				warn!(
					"address-graph: link {} -> {} references a missing node",
					link.source.id(),
					link.target.id()
				);
			}
			Some(data)
		}
		Err(e) => {
			warn!("address-graph: failed to parse graph data: {}", e);
			None
		}
	}
}

/// Load the optional view configuration from id="view-config".
fn load_view_config() -> ViewConfig {
	let Some(json_text) = script_text("view-config") else {
		return ViewConfig::default();
	};
	ViewConfig::from_json(&json_text).unwrap_or_else(|e| {
		warn!("address-graph: invalid view config, using defaults: {}", e);
		ViewConfig::default()
	})
}

/// Writes the mesh-mode scene objects into `<script id="scene-objects">`,
/// creating the element on first use. A WebGL host reads them from there.
fn publish_scene(json: &str) -> Option<()> {
	let document = web_sys::window()?.document()?;
	let element = match document.get_element_by_id("scene-objects") {
		Some(element) => element,
		None => {
			let element = document.create_element("script").ok()?;
			element.set_id("scene-objects");
			element.set_attribute("type", "application/json").ok()?;
			document.body()?.append_child(&element).ok()?;
			element
		}
	};
	element.set_text_content(Some(json));
	Some(())
}

/// Label of a group's show/hide button.
pub fn group_button_label(group: Group, shown: bool) -> String {
	if shown {
		format!("Hide Group {group}")
	} else {
		format!("Show Group {group}")
	}
}

/// Main application component.
///
/// Owns the visibility inputs and derives the visible set from them with a
/// memo, so it is recomputed once per toggle and shared by the list and the
/// canvas.
#[component]
pub fn App() -> impl IntoView {
	provide_meta_context();

	let data = load_graph_data().unwrap_or_else(|| {
		info!("address-graph: no embedded dataset, using sample data");
		sample_dataset()
	});
	let config = load_view_config();
	let groups = data.groups();

	let state = RwSignal::new(VisibilityState::new(&data, config.initial_groups.clone()));
	let dataset = StoredValue::new(data);
	let selected = RwSignal::new(None::<NodeId>);

	let visible = Memo::new(move |_| {
		let set = dataset.with_value(|d| state.with(|s| s.visible_set(d)));
		state.with(|s| {
			info!(
				"address-graph: groups {:?} allowed, {} nodes visible",
				s.allowed_groups(),
				set.len()
			)
		});
		set
	});
	let rows = Memo::new(move |_| visible.with(|v| dataset.with_value(|d| nodes_for_table(d, v))));

	let toggle_group = move |group: Group| {
		debug!("address-graph: toggle group {group}");
		state.update(|s| s.toggle_group(group));
	};
	let on_toggle_visible = Callback::new(move |id: NodeId| {
		debug!("address-graph: toggle node {id}");
		state.update(|s| s.toggle_node_override(id));
	});
	let on_node_click = Callback::new(move |id: NodeId| selected.set(Some(id)));

	if let RenderMode::Mesh(style) = config.render {
		info!("address-graph: mesh mode, style {style:?}");
		let scene = StoredValue::new(GraphView::new(config.render, GroupPalette::default()));
		Effect::new(move |_| {
			let set = visible.get();
			let json = scene.try_update_value(|view| {
				view.set_visible(set);
				dataset.with_value(|d| view.scene_json(d))
			});
			match json {
				Some(Ok(json)) => {
					if publish_scene(&json).is_none() {
						warn!("address-graph: could not publish scene objects");
					}
				}
				Some(Err(e)) => warn!("address-graph: failed to serialize scene: {}", e),
				None => {}
			}
		});
	}

	view! {
		<Html attr:lang="en" attr:dir="ltr" attr:data-theme="dark" />
		<Title text="Address Graph" />
		<Meta charset="UTF-8" />
		<Meta name="viewport" content="width=device-width, initial-scale=1.0" />

		<div class="app-container">
			<div class="controls">
				{groups
					.into_iter()
					.map(|group| {
						view! {
							<button on:click=move |_| toggle_group(group)>
								{move || group_button_label(group, state.with(|s| s.is_group_allowed(group)))}
							</button>
						}
					})
					.collect_view()}
			</div>

			<AddressList rows=rows selected=selected on_toggle_visible=on_toggle_visible />

			<div class="graph-panel">
				<ForceGraphCanvas
					data=Signal::derive(move || dataset.get_value())
					visible=visible
					style=config.render.canvas_style()
					link_distance=config.link_distance
					on_node_click=on_node_click
				/>
			</div>
		</div>
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn button_labels_reflect_group_state() {
		assert_eq!(group_button_label(1, true), "Hide Group 1");
		assert_eq!(group_button_label(2, false), "Show Group 2");
	}
}
