//! 3D node objects.
//!
//! Mesh styles build a small scene-graph description per node. The
//! description is plain data and serializes to JSON, so a WebGL host can
//! turn it into real meshes and materials.

use serde::{Deserialize, Serialize};

use super::theme::{Color, GroupPalette};
use super::types::Node;

/// Which faces of a mesh are rendered.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
	Front,
	Back,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Blending {
	Normal,
	Additive,
}

/// Surface material of a mesh.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase", rename_all_fields = "camelCase")]
pub enum Material {
	/// Unlit color, optionally translucent.
	Basic {
		color: Color,
		opacity: f64,
		transparent: bool,
		side: Side,
		blending: Blending,
	},
	/// Physically lit metal/roughness surface.
	Standard {
		color: Color,
		metalness: f64,
		roughness: f64,
		emissive: Option<Color>,
		emissive_intensity: f64,
	},
	/// Transmissive clearcoat surface.
	Physical {
		color: Color,
		roughness: f64,
		transmission: f64,
		thickness: f64,
		clearcoat: f64,
		clearcoat_roughness: f64,
		opacity: f64,
	},
}

impl Material {
	pub fn opacity(&self) -> f64 {
		match self {
			Material::Basic { opacity, .. } | Material::Physical { opacity, .. } => *opacity,
			Material::Standard { .. } => 1.0,
		}
	}

	pub fn side(&self) -> Side {
		match self {
			Material::Basic { side, .. } => *side,
			_ => Side::Front,
		}
	}

	fn shell(color: Color, opacity: f64, blending: Blending) -> Self {
		Material::Basic {
			color,
			opacity,
			transparent: true,
			side: Side::Back,
			blending,
		}
	}
}

/// A node of the scene graph.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum SceneObject {
	/// Sphere mesh.
	Mesh {
		radius: f64,
		segments: u32,
		material: Material,
	},
	Group { children: Vec<SceneObject> },
}

impl SceneObject {
	fn sphere(radius: f64, material: Material) -> Self {
		SceneObject::Mesh {
			radius,
			segments: SPHERE_SEGMENTS,
			material,
		}
	}

	/// All meshes in depth-first order.
	pub fn meshes(&self) -> Vec<(f64, &Material)> {
		match self {
			SceneObject::Mesh {
				radius, material, ..
			} => vec![(*radius, material)],
			SceneObject::Group { children } => children.iter().flat_map(|c| c.meshes()).collect(),
		}
	}

	pub fn to_json(&self) -> Result<String, serde_json::Error> {
		serde_json::to_string(self)
	}
}

const SPHERE_SEGMENTS: u32 = 24;
const CORE_RADIUS: f64 = 5.0;

/// Node appearance in the 3D view.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MeshStyle {
	Metallic,
	Neon,
	/// Default 3D look.
	#[default]
	Highlighted,
	Crystal,
	BallGlow,
}

impl MeshStyle {
	/// Builds the scene object for `node`. Called once per node; the result is
	/// cached by the caller until the node is removed.
	pub fn build(self, node: &Node, palette: &GroupPalette) -> SceneObject {
		let color = palette.color(node.group);
		match self {
			MeshStyle::Metallic => SceneObject::sphere(
				6.0,
				Material::Standard {
					color,
					metalness: 0.85,
					roughness: 0.25,
					emissive: None,
					emissive_intensity: 0.0,
				},
			),
			MeshStyle::Neon => SceneObject::Group {
				children: vec![
					SceneObject::sphere(CORE_RADIUS, opaque(color)),
					SceneObject::sphere(8.0, Material::shell(color, 0.35, Blending::Additive)),
				],
			},
			MeshStyle::Highlighted => SceneObject::Group {
				children: vec![
					SceneObject::sphere(
						CORE_RADIUS,
						Material::Standard {
							color,
							metalness: 0.3,
							roughness: 0.4,
							emissive: None,
							emissive_intensity: 0.0,
						},
					),
					SceneObject::sphere(7.0, Material::shell(color, 0.15, Blending::Normal)),
				],
			},
			MeshStyle::Crystal => SceneObject::sphere(
				6.0,
				Material::Physical {
					color,
					roughness: 0.05,
					transmission: 0.9,
					thickness: 2.0,
					clearcoat: 1.0,
					clearcoat_roughness: 0.1,
					opacity: 0.85,
				},
			),
			MeshStyle::BallGlow => SceneObject::Group {
				children: vec![
					SceneObject::sphere(
						CORE_RADIUS,
						Material::Standard {
							color,
							metalness: 0.1,
							roughness: 0.5,
							emissive: Some(color),
							emissive_intensity: 0.6,
						},
					),
					SceneObject::sphere(7.5, Material::shell(color, 0.25, Blending::Normal)),
				],
			},
		}
	}
}

fn opaque(color: Color) -> Material {
	Material::Basic {
		color,
		opacity: 1.0,
		transparent: false,
		side: Side::Front,
		blending: Blending::Normal,
	}
}
