//! The particle field: owns every particle, resolves collisions between them
//! and drives one update-and-draw pass per animation frame.
//!
//! A field is built for one viewport size. On resize the old field is
//! consumed by [`Field::rebuild`], which hands its particles to the new one
//! unchanged and recomputes only the derived state.

use log::{debug, info};
use rand::Rng;

use super::color::parse_hsl_or_fallback;
use super::config::BubblesConfig;
use super::geometry::{Bounds, rand_int};
use super::particle::{Frame, Particle, ParticleStyle, Shape};
use super::pointer::PointerState;
use super::render::Surface;

/// Every unordered pair `(i, j)` with `i < j < count`, in lexicographic order.
pub fn unordered_pairs(count: usize) -> Vec<(usize, usize)> {
	let mut pairs = Vec::with_capacity(count * count.saturating_sub(1) / 2);
	for i in 0..count {
		for j in i + 1..count {
			pairs.push((i, j));
		}
	}
	pairs
}

/// Bubble simulation for one viewport size.
pub struct Field {
	bounds: Bounds,
	particles: Vec<Particle>,
	pairs: Vec<(usize, usize)>,
	config: BubblesConfig,
}

impl Field {
	/// Build a field. An empty `particles` collection is filled with
	/// `config.particle_count` fresh particles; otherwise the given particles
	/// are adopted as they are.
	pub fn new<R: Rng + ?Sized>(
		config: BubblesConfig,
		width: f64,
		height: f64,
		mut particles: Vec<Particle>,
		rng: &mut R,
	) -> Self {
		let bounds = Bounds::new(width, height);

		if particles.is_empty() {
			let color = parse_hsl_or_fallback(&config.color);
			particles.reserve(config.particle_count);
			for _ in 0..config.particle_count {
				let style = ParticleStyle {
					shape: Shape::resolve(config.shape, &mut *rng),
					color,
					alpha: (0.1 + rand_int(&mut *rng, 0, config.max_alpha) as f64 * 0.01).clamp(0.1, 1.0),
				};
				particles.push(Particle::new(bounds, style, config.movement, &config, &mut *rng));
			}
			info!(
				"bubbles: created {} particles in {}x{}",
				particles.len(),
				width,
				height
			);
		}

		let pairs = unordered_pairs(particles.len());
		Self {
			bounds,
			particles,
			pairs,
			config,
		}
	}

	/// Replace this field with one sized `width` × `height`, carrying the
	/// particles over.
	pub fn rebuild<R: Rng + ?Sized>(
		self,
		config: BubblesConfig,
		width: f64,
		height: f64,
		rng: &mut R,
	) -> Self {
		debug!(
			"bubbles: resizing {}x{} -> {}x{}",
			self.bounds.width, self.bounds.height, width, height
		);
		Self::new(config, width, height, self.particles, rng)
	}

	pub fn bounds(&self) -> Bounds {
		self.bounds
	}

	pub fn particles(&self) -> &[Particle] {
		&self.particles
	}

	pub fn particles_mut(&mut self) -> &mut [Particle] {
		&mut self.particles
	}

	pub fn pairs(&self) -> &[(usize, usize)] {
		&self.pairs
	}

	pub fn config(&self) -> &BubblesConfig {
		&self.config
	}

	/// Separate every overlapping pair and return how many were resolved.
	///
	/// Overlaps are detected against positions at the start of the pass. For
	/// each hit the first particle is placed exactly touching the second along
	/// their centre line, and both velocities are negated. The second
	/// particle never moves.
	pub fn collision_pass(&mut self) -> usize {
		let colliding: Vec<(usize, usize)> = self
			.pairs
			.iter()
			.copied()
			.filter(|&(i, j)| self.particles[i].overlaps(&self.particles[j]))
			.collect();

		for &(i, j) in &colliding {
			let anchor = self.particles[j].position;
			let contact = self.particles[i].radius + self.particles[j].radius;

			let first = &mut self.particles[i];
			let u = first.position.direction_from(anchor);
			first.position = anchor + u * contact;
			first.velocity = first.velocity * -1.0;

			let second = &mut self.particles[j];
			second.velocity = second.velocity * -1.0;
		}

		colliding.len()
	}

	/// One animation frame: clear, collide, then update and draw every
	/// particle in creation order. `dt` is in seconds.
	pub fn tick(&mut self, dt: f64, pointer: &PointerState, surface: &dyn Surface) {
		surface.clear(self.bounds.width, self.bounds.height);
		self.collision_pass();

		let frame = Frame {
			dt,
			bounds: self.bounds,
			pointer,
			config: &self.config,
		};
		for particle in &mut self.particles {
			particle.render(&frame, surface);
		}
	}
}
