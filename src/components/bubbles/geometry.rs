//! Small 2D math helpers shared by the particle and field code.

use std::ops::{Add, Mul, Sub};

use rand::Rng;

/// A point or displacement in canvas pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Vec2 {
	pub x: f64,
	pub y: f64,
}

impl Vec2 {
	pub const UNIT_X: Vec2 = Vec2::new(1.0, 0.0);

	pub const fn new(x: f64, y: f64) -> Self {
		Self { x, y }
	}

	pub fn length(self) -> f64 {
		(self.x * self.x + self.y * self.y).sqrt()
	}

	/// Unit vector pointing from `from` to `self`, or [`Vec2::UNIT_X`] when
	/// the points coincide.
	pub fn direction_from(self, from: Vec2) -> Vec2 {
		let offset = self - from;
		let len = offset.length();
		if len == 0.0 {
			return Vec2::UNIT_X;
		}
		Vec2::new(offset.x / len, offset.y / len)
	}

	pub fn lerp(self, target: Vec2, t: f64) -> Vec2 {
		Vec2::new(lerp(self.x, target.x, t), lerp(self.y, target.y, t))
	}
}

impl Add for Vec2 {
	type Output = Vec2;

	fn add(self, rhs: Vec2) -> Vec2 {
		Vec2::new(self.x + rhs.x, self.y + rhs.y)
	}
}

impl Sub for Vec2 {
	type Output = Vec2;

	fn sub(self, rhs: Vec2) -> Vec2 {
		Vec2::new(self.x - rhs.x, self.y - rhs.y)
	}
}

impl Mul<f64> for Vec2 {
	type Output = Vec2;

	fn mul(self, k: f64) -> Vec2 {
		Vec2::new(self.x * k, self.y * k)
	}
}

/// Canvas extent that particles bounce and clamp against.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds {
	pub width: f64,
	pub height: f64,
}

impl Bounds {
	pub const fn new(width: f64, height: f64) -> Self {
		Self { width, height }
	}

	pub fn center(&self) -> Vec2 {
		Vec2::new(self.width / 2.0, self.height / 2.0)
	}
}

pub fn distance(a: Vec2, b: Vec2) -> f64 {
	(b - a).length()
}

/// Clamp that never panics on an inverted window: `min` wins when
/// `min > max`, which happens for particles larger than a tiny viewport.
pub fn clamp(min: f64, value: f64, max: f64) -> f64 {
	if value < min {
		min
	} else if value > max {
		max
	} else {
		value
	}
}

pub fn lerp(a: f64, b: f64, t: f64) -> f64 {
	a + (b - a) * t
}

/// Uniform float in `[a, b)`.
pub fn rand_range<R: Rng + ?Sized>(rng: &mut R, a: f64, b: f64) -> f64 {
	a + rng.r#gen::<f64>() * (b - a)
}

/// Uniform integer in `[start, stop)`, swapping reversed bounds.
/// Equal bounds yield `start`.
pub fn rand_int<R: Rng + ?Sized>(rng: &mut R, start: i64, stop: i64) -> i64 {
	let (start, stop) = if start > stop {
		(stop, start)
	} else {
		(start, stop)
	};
	start + (rng.r#gen::<f64>() * (stop - start) as f64).floor() as i64
}
