//! Force-directed address graph with layered visibility.
//!
//! Renders an interactive force-directed graph on an HTML canvas with:
//! - Physics-based node positioning via force simulation
//! - Visibility composed from a group filter and per-node overrides
//! - Interchangeable node painters (2D) and mesh builders (3D)
//! - Pan, zoom, node dragging and selection
//!
//! # Example
//!
//! ```ignore
//! use address_graph::{ForceGraphCanvas, GraphDataset, VisibilityState};
//!
//! let data = address_graph::sample_dataset();
//! let state = RwSignal::new(VisibilityState::new(&data, [1, 2]));
//! let dataset = data.clone();
//! let visible = Memo::new(move |_| state.with(|s| s.visible_set(&dataset)));
//!
//! view! { <ForceGraphCanvas data=Signal::derive(move || data.clone()) visible=visible fullscreen=true /> }
//! ```

mod component;
mod particles;
mod render;
pub mod renderer;
pub mod scale;
pub mod scene;
mod state;
pub mod theme;
mod types;
pub mod view;
pub mod visibility;

pub use component::ForceGraphCanvas;
pub use renderer::{CanvasStyle, Surface2d};
pub use scene::{MeshStyle, SceneObject};
pub use theme::Theme;
pub use types::{GraphDataset, Group, Link, LinkEndpoint, Node, NodeId, sample_dataset};
pub use view::{GraphView, RenderMode, ViewConfig};
pub use visibility::{NodeRow, VisibilityState, VisibleSet, nodes_for_table, resolve};
