//! Pointer state and the repulsion it applies to particles.

use super::geometry::{Bounds, Vec2, clamp};

/// Radius of the exclusion disc around the pointer, in pixels.
pub const MOUSE_RADIUS: f64 = 60.0;

/// Latest pointer position in canvas-local pixels.
///
/// Written by the `mousemove` handler, read by every particle during a tick.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PointerState {
	pub position: Vec2,
}

impl PointerState {
	/// Record a move. Coordinates are rounded to whole pixels.
	pub fn move_to(&mut self, x: f64, y: f64) {
		self.position = Vec2::new(x.round(), y.round());
	}

	pub fn touches(&self, center: Vec2, radius: f64) -> bool {
		(center - self.position).length() < radius + MOUSE_RADIUS
	}

	/// Where a particle of `radius` at `center` would sit if pushed exactly
	/// to the edge of the exclusion disc.
	pub fn push_out_target(&self, center: Vec2, radius: f64) -> Vec2 {
		let u = center.direction_from(self.position);
		self.position + u * (radius + MOUSE_RADIUS)
	}
}

/// Ease a touching particle toward the disc edge by `lerp_factor`, then
/// keep it inside `[radius, extent - radius]` on both axes. Returns `None`
/// when the particle is clear of the pointer.
pub fn repel(
	pointer: &PointerState,
	position: Vec2,
	radius: f64,
	lerp_factor: f64,
	bounds: Bounds,
) -> Option<Vec2> {
	if !pointer.touches(position, radius) {
		return None;
	}
	let target = pointer.push_out_target(position, radius);
	let eased = position.lerp(target, lerp_factor);
	Some(Vec2::new(
		clamp(radius, eased.x, bounds.width - radius),
		clamp(radius, eased.y, bounds.height - radius),
	))
}
