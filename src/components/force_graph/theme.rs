//! Visual theming for the force graph.
//!
//! Provides colors for the background, links and node groups.

use serde::Serialize;

use super::types::Group;

/// RGBA color representation. Serializes as packed `0xRRGGBB`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(into = "u32")]
pub struct Color {
	pub r: u8,
	pub g: u8,
	pub b: u8,
	pub a: f64,
}

impl Color {
	pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
		Self { r, g, b, a: 1.0 }
	}

	pub const fn rgba(r: u8, g: u8, b: u8, a: f64) -> Self {
		Self { r, g, b, a }
	}

	pub fn with_alpha(self, a: f64) -> Self {
		Self { a, ..self }
	}

	/// Lighten the color by a factor (0.0 = unchanged, 1.0 = white)
	pub fn lighten(self, factor: f64) -> Self {
		let f = factor.clamp(0.0, 1.0);
		Self {
			r: (self.r as f64 + (255.0 - self.r as f64) * f) as u8,
			g: (self.g as f64 + (255.0 - self.g as f64) * f) as u8,
			b: (self.b as f64 + (255.0 - self.b as f64) * f) as u8,
			a: self.a,
		}
	}

	pub fn to_css(self) -> String {
		if (self.a - 1.0).abs() < 0.001 {
			format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
		} else {
			format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
		}
	}

	/// Packed `0xRRGGBB`, the form scene hosts expect for material colors.
	pub fn to_hex(self) -> u32 {
		((self.r as u32) << 16) | ((self.g as u32) << 8) | self.b as u32
	}
}

impl From<Color> for u32 {
	fn from(color: Color) -> Self {
		color.to_hex()
	}
}

pub const WHITE: Color = Color::rgb(255, 255, 255);
pub const BLACK: Color = Color::rgb(0, 0, 0);

/// Two-color lookup by group: the hub group gets one color, all others the
/// second.
#[derive(Clone, Debug)]
pub struct GroupPalette {
	pub hub_group: Group,
	pub hub: Color,
	pub leaf: Color,
}

impl GroupPalette {
	pub fn color(&self, group: Group) -> Color {
		if group == self.hub_group {
			self.hub
		} else {
			self.leaf
		}
	}
}

impl Default for GroupPalette {
	fn default() -> Self {
		Self {
			hub_group: 1,
			hub: Color::rgb(0xff, 0xcc, 0x00),
			leaf: Color::rgb(0x95, 0xd5, 0xe9),
		}
	}
}

/// Link visual style.
#[derive(Clone, Debug)]
pub struct LinkStyle {
	pub color: Color,
	pub particle_color: Color,
}

/// Complete visual theme.
#[derive(Clone, Debug)]
pub struct Theme {
	pub background: Color,
	pub link: LinkStyle,
	pub palette: GroupPalette,
	pub label: Color,
}

impl Default for Theme {
	fn default() -> Self {
		Self {
			background: Color::rgb(0x09, 0x10, 0x24),
			link: LinkStyle {
				color: WHITE,
				particle_color: WHITE.with_alpha(0.9),
			},
			palette: GroupPalette::default(),
			label: WHITE.with_alpha(0.9),
		}
	}
}
