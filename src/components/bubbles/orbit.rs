//! Radial motion: a fixed-radius orbit around the viewport centre.

use rand::Rng;

use super::geometry::{Vec2, distance, rand_range};

/// Orbit radius at which the base speed is halved.
const FALLOFF_RADIUS: f64 = 120.0;
/// Per-particle random offset added to the orbital speed.
const SPEED_JITTER: f64 = 0.001;

#[derive(Clone, Debug, PartialEq)]
pub struct Orbit {
	pub center: Vec2,
	/// Distance from `center`; fixed when the orbit is created.
	pub radius: f64,
	/// Current bearing in radians.
	pub angle: f64,
	/// Radians advanced per tick.
	pub speed: f64,
}

impl Orbit {
	/// Start an orbit through `position`. Farther particles orbit more
	/// slowly, which reads as depth.
	pub fn through<R: Rng + ?Sized>(
		position: Vec2,
		center: Vec2,
		base_speed: f64,
		rng: &mut R,
	) -> Self {
		let radius = distance(position, center);
		let jitter = rand_range(rng, -SPEED_JITTER, SPEED_JITTER);
		Self {
			center,
			radius,
			angle: (position.y - center.y).atan2(position.x - center.x),
			speed: base_speed / (radius / FALLOFF_RADIUS + 1.0) + jitter,
		}
	}

	/// Advance one tick and return the new position.
	pub fn advance(&mut self) -> Vec2 {
		self.angle += self.speed;
		self.position()
	}

	pub fn position(&self) -> Vec2 {
		self.center + Vec2::new(self.angle.cos(), self.angle.sin()) * self.radius
	}
}
