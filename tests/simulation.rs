use std::cell::Cell;

use bubbles::components::bubbles::{
	BubblesConfig, Field, MAX_LIGHTNESS, MIN_LIGHTNESS, Motion, MovementKind, PointerState,
	ShapePreference, Surface, TwinkleStyle, Vec2,
};
use rand::SeedableRng;
use rand::rngs::StdRng;

/// Surface that only counts what would be drawn.
#[derive(Default)]
struct CountingSurface {
	clears: Cell<usize>,
	fills: Cell<usize>,
	strokes: Cell<usize>,
}

impl Surface for CountingSurface {
	fn clear(&self, _: f64, _: f64) {
		self.clears.set(self.clears.get() + 1);
	}
	fn set_global_alpha(&self, _: f64) {}
	fn begin_path(&self) {}
	fn arc(&self, _: Vec2, _: f64) {}
	fn move_to(&self, _: Vec2) {}
	fn line_to(&self, _: Vec2) {}
	fn close_path(&self) {}
	fn fill(&self, _: &str) {
		self.fills.set(self.fills.get() + 1);
	}
	fn stroke(&self, _: &str, width: f64) {
		assert_eq!(width, 2.0);
		self.strokes.set(self.strokes.get() + 1);
	}
}

fn config(count: usize) -> BubblesConfig {
	BubblesConfig {
		particle_count: count,
		radius_min: 3,
		radius_max: 14,
		..BubblesConfig::default()
	}
}

fn idle_pointer() -> PointerState {
	PointerState {
		position: Vec2::new(-5_000.0, -5_000.0),
	}
}

#[test]
fn every_tick_draws_every_particle_once() {
	let mut rng = StdRng::seed_from_u64(100);
	let config = BubblesConfig {
		shape: ShapePreference::Random,
		..config(30)
	};
	let mut field = Field::new(config, 1280.0, 720.0, Vec::new(), &mut rng);
	let surface = CountingSurface::default();
	let pointer = idle_pointer();

	for _ in 0..120 {
		field.tick(1.0 / 60.0, &pointer, &surface);
	}
	assert_eq!(surface.clears.get(), 120);
	assert_eq!(surface.fills.get() + surface.strokes.get(), 120 * 30);
}

#[test]
fn orbit_radius_survives_collisions_and_pointer() {
	let mut rng = StdRng::seed_from_u64(101);
	let config = BubblesConfig {
		movement: MovementKind::Radial,
		..config(40)
	};
	let mut field = Field::new(config, 900.0, 700.0, Vec::new(), &mut rng);
	let radii: Vec<f64> = field
		.particles()
		.iter()
		.map(|p| match &p.motion {
			Motion::Orbit(orbit) => orbit.radius,
			Motion::Drift => panic!("expected radial motion"),
		})
		.collect();

	let surface = CountingSurface::default();
	let mut pointer = PointerState::default();
	for i in 0..600 {
		pointer.move_to(450.0 + (i as f64).cos() * 200.0, 350.0 + (i as f64).sin() * 200.0);
		field.tick(1.0 / 60.0, &pointer, &surface);
	}

	for (p, radius) in field.particles().iter().zip(radii) {
		let Motion::Orbit(orbit) = &p.motion else {
			panic!("expected radial motion");
		};
		assert_eq!(orbit.radius, radius);
	}
}

#[test]
fn twinkle_lightness_stays_in_window_for_both_styles() {
	for style in [TwinkleStyle::Fade, TwinkleStyle::Flash] {
		let mut rng = StdRng::seed_from_u64(102);
		let config = BubblesConfig {
			twinkle_style: style,
			color: "#3366cc".to_string(),
			..config(20)
		};
		let mut field = Field::new(config, 800.0, 600.0, Vec::new(), &mut rng);
		let surface = CountingSurface::default();
		let pointer = idle_pointer();
		for _ in 0..400 {
			field.tick(0.1, &pointer, &surface);
			for p in field.particles() {
				let l = p.twinkle.smoothed_lightness;
				assert!((MIN_LIGHTNESS..=MAX_LIGHTNESS).contains(&l), "{style:?}: {l}");
			}
		}
	}
}

#[test]
fn resize_carries_particles_over() {
	let mut rng = StdRng::seed_from_u64(103);
	let mut field = Field::new(config(12), 800.0, 600.0, Vec::new(), &mut rng);
	let surface = CountingSurface::default();
	let pointer = idle_pointer();
	for _ in 0..30 {
		field.tick(1.0 / 60.0, &pointer, &surface);
	}
	let before = field.particles().to_vec();

	let field = field.rebuild(config(99), 400.0, 300.0, &mut rng);
	assert_eq!(field.particles(), before.as_slice());
	assert_eq!(field.pairs().len(), 12 * 11 / 2);
	assert_eq!(field.bounds().width, 400.0);
}

#[test]
fn pointer_pushes_nearby_particle_out_gradually() {
	let mut rng = StdRng::seed_from_u64(104);
	let mut field = Field::new(config(1), 800.0, 600.0, Vec::new(), &mut rng);
	{
		let p = &mut field.particles_mut()[0];
		p.position = Vec2::new(400.0, 300.0);
		p.velocity = Vec2::default();
		p.radius = 10.0;
	}
	let pointer = PointerState {
		position: Vec2::new(380.0, 300.0),
	};
	let surface = CountingSurface::default();

	let mut last_gap = 20.0;
	for _ in 0..10 {
		field.tick(1.0 / 60.0, &pointer, &surface);
		let gap = field.particles()[0].position.x - pointer.position.x;
		assert!(gap > last_gap && gap < 70.0);
		last_gap = gap;
	}
	// gap to the disc edge shrinks by 20% per tick
	let expected = 70.0 - 50.0 * 0.8_f64.powi(10);
	assert!((last_gap - expected).abs() < 1e-9);
}
