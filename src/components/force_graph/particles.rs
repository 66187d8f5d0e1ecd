//! Directional flow particles travelling along links.

/// Particles per link.
pub const PARTICLES_PER_LINK: usize = 2;

/// Link-relative speed per unit of link value, per frame.
const SPEED_PER_VALUE: f64 = 0.001;

/// Flow phase of one link's particles.
#[derive(Clone, Debug)]
struct LinkFlow {
	phase: f64,
	speed: f64,
}

/// Tracks particle progress for every link, in link order.
pub struct LinkParticles {
	flows: Vec<LinkFlow>,
}

impl LinkParticles {
	pub fn new(values: impl IntoIterator<Item = f64>) -> Self {
		Self {
			flows: values
				.into_iter()
				.map(|value| LinkFlow {
					phase: 0.0,
					speed: value * SPEED_PER_VALUE,
				})
				.collect(),
		}
	}

	/// Advance all flows by one frame.
	pub fn update(&mut self) {
		for flow in &mut self.flows {
			flow.phase = (flow.phase + flow.speed).rem_euclid(1.0);
		}
	}

	/// Positions (0 = source, 1 = target) of the particles on link `index`,
	/// spaced evenly along the link.
	pub fn positions(&self, index: usize) -> impl Iterator<Item = f64> + '_ {
		let phase = self.flows.get(index).map(|f| f.phase);
		(0..PARTICLES_PER_LINK).filter_map(move |i| {
			phase.map(|p| (p + i as f64 / PARTICLES_PER_LINK as f64).rem_euclid(1.0))
		})
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn faster_links_move_further() {
		let mut particles = LinkParticles::new([10.0, 20.0]);
		for _ in 0..10 {
			particles.update();
		}
		let slow: Vec<_> = particles.positions(0).collect();
		let fast: Vec<_> = particles.positions(1).collect();
		assert!((slow[0] - 0.1).abs() < 1e-9);
		assert!((fast[0] - 0.2).abs() < 1e-9);
		assert!((slow[1] - 0.6).abs() < 1e-9);
	}

	#[test]
	fn phases_wrap_around() {
		let mut particles = LinkParticles::new([600.0]);
		particles.update();
		particles.update();
		let positions: Vec<_> = particles.positions(0).collect();
		assert_eq!(positions.len(), PARTICLES_PER_LINK);
		assert!(positions.iter().all(|p| (0.0..1.0).contains(p)));
	}

	#[test]
	fn unknown_link_has_no_particles() {
		let particles = LinkParticles::new([]);
		assert_eq!(particles.positions(3).count(), 0);
	}
}
