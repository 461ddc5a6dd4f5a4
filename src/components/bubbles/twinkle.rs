//! Per-particle brightness oscillation.
//!
//! The oscillator runs on a coarse clock that ticks once per elapsed second,
//! so the twinkle rate does not depend on the render frame rate. The raw
//! target lightness jumps once per second; exponential smoothing turns those
//! steps into a gradual fade.

use std::f64::consts::TAU;

use rand::Rng;

use super::config::TwinkleStyle;
use super::geometry::{clamp, rand_int, rand_range};

/// Darkest lightness (percent) a twinkle may reach.
pub const MIN_LIGHTNESS: f64 = 25.0;
/// Brightest lightness (percent) a twinkle may reach.
pub const MAX_LIGHTNESS: f64 = 96.0;
/// Fraction of the remaining distance covered per render.
pub const SMOOTHING: f64 = 0.12;

/// Counts whole seconds of accumulated simulation time.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FrameClock {
	/// Whole seconds elapsed, offset by a random start.
	pub frame: u64,
	/// Fractional second carried between ticks.
	carry: f64,
}

impl FrameClock {
	pub fn starting_at(frame: u64) -> Self {
		Self { frame, carry: 0.0 }
	}

	/// Add `dt` seconds; each completed second bumps the frame by one.
	pub fn advance(&mut self, dt: f64) {
		if !dt.is_finite() || dt <= 0.0 {
			return;
		}
		self.carry += dt;
		while self.carry >= 1.0 {
			self.carry -= 1.0;
			self.frame += 1;
		}
	}
}

/// Brightness oscillator state embedded in each particle.
#[derive(Clone, Debug, PartialEq)]
pub struct Twinkle {
	/// Radians of phase advanced per clock frame, in `[0.6, 1.2)`.
	pub speed: f64,
	/// Phase offset in `[0, 2π)`.
	pub phase: f64,
	/// Running lightness, carried between renders.
	pub smoothed_lightness: f64,
	pub clock: FrameClock,
}

impl Twinkle {
	pub fn new<R: Rng + ?Sized>(base_lightness: f64, rng: &mut R) -> Self {
		Self {
			speed: rand_range(rng, 0.6, 1.2),
			phase: rand_range(rng, 0.0, TAU),
			smoothed_lightness: clamp(MIN_LIGHTNESS, base_lightness, MAX_LIGHTNESS),
			clock: FrameClock::starting_at(rand_int(rng, 0, 10_000) as u64),
		}
	}

	/// Multiplier applied to the base lightness at the current frame.
	pub fn intensity(&self, style: TwinkleStyle) -> f64 {
		let t = self.clock.frame as f64 * self.speed + self.phase;
		match style {
			TwinkleStyle::Flash => {
				if t.sin() > 0.0 {
					1.0
				} else {
					0.4
				}
			}
			TwinkleStyle::Fade => t.sin() * 0.3 + 0.7,
		}
	}

	/// Move the smoothed lightness one step toward this frame's target and
	/// return it.
	pub fn step(&mut self, base_lightness: f64, style: TwinkleStyle) -> f64 {
		let target = clamp(
			MIN_LIGHTNESS,
			base_lightness * self.intensity(style),
			MAX_LIGHTNESS,
		);
		self.smoothed_lightness += (target - self.smoothed_lightness) * SMOOTHING;
		self.smoothed_lightness
	}
}
