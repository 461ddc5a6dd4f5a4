//! A single floating bubble: its motion model, spin, pointer response and
//! twinkle, and how it draws itself.

use std::f64::consts::TAU;

use rand::Rng;

use super::color::Hsl;
use super::config::{BubblesConfig, MovementKind, ShapePreference};
use super::geometry::{Bounds, Vec2, rand_int, rand_range};
use super::orbit::Orbit;
use super::pointer::{PointerState, repel};
use super::render::{OUTLINE_WIDTH, Surface, trace_star};
use super::twinkle::Twinkle;

/// Sign applied to both components of a new particle's drift velocity.
///
/// Fresh particles always start drifting up and to the left; bounces and
/// pointer contact flip the direction afterwards.
const INITIAL_DRIFT_SIGN: f64 = -1.0;

/// What a particle looks like.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Shape {
	Circle,
	Star,
	StarOutline,
}

impl Shape {
	pub const ALL: [Shape; 3] = [Shape::Circle, Shape::Star, Shape::StarOutline];

	/// Concrete shape for one particle; `Random` draws uniformly.
	pub fn resolve<R: Rng + ?Sized>(pref: ShapePreference, rng: &mut R) -> Self {
		match pref {
			ShapePreference::Circle => Shape::Circle,
			ShapePreference::Star => Shape::Star,
			ShapePreference::StarOutline => Shape::StarOutline,
			ShapePreference::Random => Self::ALL[rand_int(rng, 0, Self::ALL.len() as i64) as usize],
		}
	}

	pub fn is_star(self) -> bool {
		matches!(self, Shape::Star | Shape::StarOutline)
	}
}

/// Motion model, fixed for the particle's lifetime.
#[derive(Clone, Debug, PartialEq)]
pub enum Motion {
	/// Integrate velocity and bounce off the edges.
	Drift,
	/// Circle the viewport centre at a fixed radius.
	Orbit(Orbit),
}

/// Appearance shared by every particle a field creates, plus the
/// per-particle opacity.
#[derive(Clone, Copy, Debug)]
pub struct ParticleStyle {
	pub shape: Shape,
	pub color: Hsl,
	pub alpha: f64,
}

/// Everything a particle reads during one tick.
#[derive(Clone, Copy, Debug)]
pub struct Frame<'a> {
	/// Seconds since the previous tick.
	pub dt: f64,
	pub bounds: Bounds,
	pub pointer: &'a PointerState,
	pub config: &'a BubblesConfig,
}

/// A single floating particle.
#[derive(Clone, Debug, PartialEq)]
pub struct Particle {
	pub position: Vec2,
	pub velocity: Vec2,
	pub radius: f64,
	pub shape: Shape,
	/// Star orientation in radians; always 0 for circles.
	pub rotation: f64,
	pub rotation_speed: f64,
	pub motion: Motion,
	/// Base colour; only the lightness is modulated when drawing.
	pub color: Hsl,
	pub alpha: f64,
	pub twinkle: Twinkle,
}

impl Particle {
	pub fn new<R: Rng + ?Sized>(
		bounds: Bounds,
		style: ParticleStyle,
		movement: MovementKind,
		config: &BubblesConfig,
		rng: &mut R,
	) -> Self {
		let radius = rand_int(rng, config.radius_min, config.radius_max);
		let position = Vec2::new(
			rand_int(rng, radius, bounds.width as i64 - radius) as f64,
			rand_int(rng, radius, bounds.height as i64 - radius) as f64,
		);
		let radius = radius as f64;

		let motion = match movement {
			MovementKind::Radial => Motion::Orbit(Orbit::through(
				position,
				bounds.center(),
				config.radial_speed,
				rng,
			)),
			MovementKind::Drift => Motion::Drift,
		};

		let velocity = Vec2::new(
			INITIAL_DRIFT_SIGN * rng.r#gen::<f64>() * config.velocity_constant,
			INITIAL_DRIFT_SIGN * rng.r#gen::<f64>() * config.velocity_constant,
		);

		let (rotation, rotation_speed) = if style.shape.is_star() {
			(
				rand_range(rng, 0.0, TAU),
				rand_range(rng, config.spin_min, config.spin_max),
			)
		} else {
			(0.0, 0.0)
		};

		Self {
			position,
			velocity,
			radius,
			shape: style.shape,
			rotation,
			rotation_speed,
			motion,
			color: style.color,
			alpha: style.alpha,
			twinkle: Twinkle::new(style.color.l, rng),
		}
	}

	pub fn overlaps(&self, other: &Particle) -> bool {
		(self.position - other.position).length() < self.radius + other.radius
	}

	/// Advance one tick: clock, motion, spin, then pointer repulsion.
	pub fn update(&mut self, frame: &Frame<'_>) {
		self.twinkle.clock.advance(frame.dt);

		match &mut self.motion {
			Motion::Orbit(orbit) => self.position = orbit.advance(),
			Motion::Drift => {
				self.position = self.position + self.velocity;
				bounce(&mut self.velocity, self.position, self.radius, frame.bounds);
			}
		}

		if self.shape.is_star() {
			self.rotation += self.rotation_speed;
		}

		if let Some(pushed) = repel(
			frame.pointer,
			self.position,
			self.radius,
			frame.config.lerp_factor,
			frame.bounds,
		) {
			self.position = pushed;
			self.velocity = self.velocity * -1.0;
		}
	}

	/// Update, then draw with the twinkled colour.
	pub fn render(&mut self, frame: &Frame<'_>, surface: &dyn Surface) {
		self.update(frame);

		let lightness = self.twinkle.step(self.color.l, frame.config.twinkle_style);
		let style = self.color.with_lightness(lightness).to_css();

		surface.begin_path();
		surface.set_global_alpha(self.alpha);
		match self.shape {
			Shape::Circle => {
				surface.arc(self.position, self.radius);
				surface.close_path();
				surface.fill(&style);
			}
			Shape::Star => {
				trace_star(surface, self.position, self.radius, self.rotation);
				surface.fill(&style);
			}
			Shape::StarOutline => {
				trace_star(surface, self.position, self.radius, self.rotation);
				surface.stroke(&style, OUTLINE_WIDTH);
			}
		}
	}
}

/// Edge test for drifting particles. The horizontal test uses a margin of
/// twice the radius on both sides; the vertical one uses twice the radius at
/// the bottom and one radius at the top.
fn bounce(velocity: &mut Vec2, position: Vec2, r: f64, bounds: Bounds) {
	if position.x - r * 2.0 > bounds.width || position.x - r * 2.0 < 0.0 {
		velocity.x = -velocity.x;
	}
	if position.y - r * 2.0 > bounds.height || position.y - r < 0.0 {
		velocity.y = -velocity.y;
	}
}

#[cfg(test)]
mod tests {
	use rand::SeedableRng;
	use rand::rngs::StdRng;

	use super::super::render::testing::{Op, RecordingSurface};
	use super::super::twinkle::FrameClock;
	use super::*;

	const BOUNDS: Bounds = Bounds::new(800.0, 600.0);

	fn config() -> BubblesConfig {
		BubblesConfig {
			radius_min: 5,
			radius_max: 15,
			..BubblesConfig::default()
		}
	}

	fn style(shape: Shape) -> ParticleStyle {
		ParticleStyle {
			shape,
			color: Hsl::new(16.0, 100.0, 50.0),
			alpha: 0.8,
		}
	}

	/// Pointer far outside the canvas so it never interferes.
	fn far_pointer() -> PointerState {
		PointerState {
			position: Vec2::new(-10_000.0, -10_000.0),
		}
	}

	fn frame<'a>(dt: f64, pointer: &'a PointerState, config: &'a BubblesConfig) -> Frame<'a> {
		Frame {
			dt,
			bounds: BOUNDS,
			pointer,
			config,
		}
	}

	fn drifting(position: Vec2, velocity: Vec2, radius: f64) -> Particle {
		Particle {
			position,
			velocity,
			radius,
			shape: Shape::Circle,
			rotation: 0.0,
			rotation_speed: 0.0,
			motion: Motion::Drift,
			color: Hsl::new(16.0, 100.0, 50.0),
			alpha: 1.0,
			twinkle: Twinkle {
				speed: 1.0,
				phase: 0.0,
				smoothed_lightness: 50.0,
				clock: FrameClock::starting_at(0),
			},
		}
	}

	#[test]
	fn construction_respects_configured_ranges() {
		let mut rng = StdRng::seed_from_u64(11);
		let config = config();
		for _ in 0..500 {
			let p = Particle::new(BOUNDS, style(Shape::Circle), MovementKind::Drift, &config, &mut rng);
			assert!((5.0..15.0).contains(&p.radius));
			assert!(p.position.x >= p.radius && p.position.x < BOUNDS.width - p.radius);
			assert!(p.position.y >= p.radius && p.position.y < BOUNDS.height - p.radius);
			assert!(p.velocity.x <= 0.0 && p.velocity.x > -0.5);
			assert!(p.velocity.y <= 0.0 && p.velocity.y > -0.5);
			assert_eq!((p.rotation, p.rotation_speed), (0.0, 0.0));
			assert!((0.6..1.2).contains(&p.twinkle.speed));
			assert!((0.0..TAU).contains(&p.twinkle.phase));
			assert_eq!(p.twinkle.smoothed_lightness, 50.0);
		}
	}

	#[test]
	fn stars_get_spin() {
		let mut rng = StdRng::seed_from_u64(12);
		let config = config();
		let p = Particle::new(BOUNDS, style(Shape::StarOutline), MovementKind::Drift, &config, &mut rng);
		assert!((0.0..TAU).contains(&p.rotation));
		assert!((-0.03..0.03).contains(&p.rotation_speed));

		let pointer = far_pointer();
		let frame = frame(0.016, &pointer, &config);
		let mut spun = p.clone();
		spun.update(&frame);
		assert!((spun.rotation - (p.rotation + p.rotation_speed)).abs() < 1e-12);
	}

	#[test]
	fn radial_particles_keep_their_orbit_radius() {
		let mut rng = StdRng::seed_from_u64(13);
		let config = config();
		let mut p = Particle::new(BOUNDS, style(Shape::Circle), MovementKind::Radial, &config, &mut rng);
		let Motion::Orbit(start) = p.motion.clone() else {
			panic!("expected an orbit");
		};
		assert_eq!(start.center, BOUNDS.center());

		let pointer = far_pointer();
		let frame = frame(0.016, &pointer, &config);
		for _ in 0..1000 {
			p.update(&frame);
		}
		let Motion::Orbit(end) = &p.motion else {
			panic!("expected an orbit");
		};
		assert_eq!(end.radius, start.radius);
		assert!((end.angle - (start.angle + 1000.0 * start.speed)).abs() < 1e-9);
	}

	#[test]
	fn drift_integrates_velocity() {
		let config = config();
		let pointer = far_pointer();
		let frame = frame(0.016, &pointer, &config);
		let mut p = drifting(Vec2::new(400.0, 300.0), Vec2::new(0.5, -0.25), 10.0);
		p.update(&frame);
		assert_eq!(p.position, Vec2::new(400.5, 299.75));
		assert_eq!(p.velocity, Vec2::new(0.5, -0.25));
	}

	#[test]
	fn drift_bounce_margins_are_asymmetric() {
		let config = config();
		let pointer = far_pointer();
		let frame = frame(0.016, &pointer, &config);

		// x - 2r < 0 flips even though the disc is fully on screen
		let mut p = drifting(Vec2::new(15.0, 300.0), Vec2::new(-0.5, 0.0), 10.0);
		p.update(&frame);
		assert_eq!(p.velocity.x, 0.5);

		// the top edge only uses one radius
		let mut p = drifting(Vec2::new(400.0, 15.0), Vec2::new(0.0, -0.5), 10.0);
		p.update(&frame);
		assert_eq!(p.velocity.y, -0.5);
		let mut p = drifting(Vec2::new(400.0, 9.0), Vec2::new(0.0, -0.5), 10.0);
		p.update(&frame);
		assert_eq!(p.velocity.y, 0.5);

		// right and bottom edges allow overshoot of twice the radius
		let mut p = drifting(Vec2::new(815.0, 615.0), Vec2::new(0.5, 0.5), 10.0);
		p.update(&frame);
		assert_eq!(p.velocity, Vec2::new(0.5, 0.5));
		let mut p = drifting(Vec2::new(821.0, 621.0), Vec2::new(0.5, 0.5), 10.0);
		p.update(&frame);
		assert_eq!(p.velocity, Vec2::new(-0.5, -0.5));
	}

	#[test]
	fn pointer_contact_eases_away_and_flips_velocity() {
		let config = config();
		let pointer = PointerState {
			position: Vec2::new(400.0, 300.0),
		};
		let frame = frame(0.016, &pointer, &config);
		let mut p = drifting(Vec2::new(429.5, 300.0), Vec2::new(0.5, 0.0), 10.0);
		p.update(&frame);
		// drift to 430, target 470, 20% of the way
		assert!((p.position.x - 438.0).abs() < 1e-9);
		assert_eq!(p.position.y, 300.0);
		assert_eq!(p.velocity, Vec2::new(-0.5, 0.0));
	}

	#[test]
	fn update_advances_the_twinkle_clock_per_second() {
		let config = config();
		let pointer = far_pointer();
		let frame = frame(0.25, &pointer, &config);
		let mut p = drifting(Vec2::new(400.0, 300.0), Vec2::default(), 10.0);
		for _ in 0..7 {
			p.update(&frame);
		}
		assert_eq!(p.twinkle.clock.frame, 1);
	}

	#[test]
	fn circle_render_fills_an_arc_with_twinkled_colour() {
		let config = config();
		let pointer = far_pointer();
		let frame = frame(0.0, &pointer, &config);
		let mut p = drifting(Vec2::new(400.0, 300.0), Vec2::default(), 10.0);
		p.alpha = 0.5;
		let surface = RecordingSurface::default();
		p.render(&frame, &surface);

		// fade at t = 0: target 35, smoothed 50 + (35 - 50) * 0.12 = 48.2
		assert!((p.twinkle.smoothed_lightness - 48.2).abs() < 1e-9);
		let ops = surface.ops.borrow();
		assert_eq!(ops[0], Op::BeginPath);
		assert_eq!(ops[1], Op::Alpha(0.5));
		assert_eq!(ops[2], Op::Arc(Vec2::new(400.0, 300.0), 10.0));
		assert_eq!(
			ops.last(),
			Some(&Op::Fill(Hsl::new(16.0, 100.0, p.twinkle.smoothed_lightness).to_css()))
		);
	}

	#[test]
	fn outlined_stars_are_stroked() {
		let config = config();
		let pointer = far_pointer();
		let frame = frame(0.0, &pointer, &config);
		let mut p = drifting(Vec2::new(400.0, 300.0), Vec2::default(), 10.0);
		p.shape = Shape::StarOutline;
		let surface = RecordingSurface::default();
		p.render(&frame, &surface);
		let ops = surface.ops.borrow();
		assert!(matches!(ops.last(), Some(Op::Stroke(_, w)) if *w == OUTLINE_WIDTH));
		assert!(!ops.iter().any(|op| matches!(op, Op::Fill(_))));
	}

	#[test]
	fn random_shape_preference_covers_all_shapes() {
		let mut rng = StdRng::seed_from_u64(14);
		let mut seen = [false; 3];
		for _ in 0..300 {
			let shape = Shape::resolve(ShapePreference::Random, &mut rng);
			let i = Shape::ALL.iter().position(|s| *s == shape).unwrap();
			seen[i] = true;
		}
		assert_eq!(seen, [true; 3]);
		assert_eq!(Shape::resolve(ShapePreference::Star, &mut rng), Shape::Star);
	}
}
