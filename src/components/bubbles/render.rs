//! Drawing seam between the simulation and the browser canvas.
//!
//! Particles draw through [`Surface`], which covers only the handful of 2D
//! path operations they need. [`CanvasRenderingContext2d`] is the production
//! implementation; tests record calls instead.

use std::f64::consts::PI;

use web_sys::CanvasRenderingContext2d;

use super::geometry::Vec2;

/// Number of points on a star.
pub const STAR_POINTS: usize = 5;
/// Inner radius of a star as a fraction of its outer radius.
pub const STAR_INSET: f64 = 0.5;
/// Stroke width of outlined stars.
pub const OUTLINE_WIDTH: f64 = 2.0;

/// The 2D drawing operations a frame needs.
pub trait Surface {
	/// Erase the whole `width` × `height` area.
	fn clear(&self, width: f64, height: f64);
	fn set_global_alpha(&self, alpha: f64);
	fn begin_path(&self);
	/// Full circle at `center`.
	fn arc(&self, center: Vec2, radius: f64);
	fn move_to(&self, p: Vec2);
	fn line_to(&self, p: Vec2);
	fn close_path(&self);
	/// Fill the current path with a CSS colour.
	fn fill(&self, style: &str);
	/// Stroke the current path with a CSS colour.
	fn stroke(&self, style: &str, line_width: f64);
}

impl Surface for CanvasRenderingContext2d {
	fn clear(&self, width: f64, height: f64) {
		self.clear_rect(0.0, 0.0, width, height);
	}

	fn set_global_alpha(&self, alpha: f64) {
		CanvasRenderingContext2d::set_global_alpha(self, alpha);
	}

	fn begin_path(&self) {
		CanvasRenderingContext2d::begin_path(self);
	}

	fn arc(&self, center: Vec2, radius: f64) {
		let _ = CanvasRenderingContext2d::arc(self, center.x, center.y, radius, 0.0, 2.0 * PI);
	}

	fn move_to(&self, p: Vec2) {
		CanvasRenderingContext2d::move_to(self, p.x, p.y);
	}

	fn line_to(&self, p: Vec2) {
		CanvasRenderingContext2d::line_to(self, p.x, p.y);
	}

	fn close_path(&self) {
		CanvasRenderingContext2d::close_path(self);
	}

	fn fill(&self, style: &str) {
		self.set_fill_style_str(style);
		CanvasRenderingContext2d::fill(self);
	}

	fn stroke(&self, style: &str, line_width: f64) {
		self.set_stroke_style_str(style);
		self.set_line_width(line_width);
		CanvasRenderingContext2d::stroke(self);
	}
}

/// Vertices of a star centred on `center`, alternating outer and inner
/// radius, starting at `rotation` radians.
pub fn star_vertices(center: Vec2, radius: f64, rotation: f64) -> Vec<Vec2> {
	(0..STAR_POINTS * 2)
		.map(|i| {
			let angle = rotation + (PI / STAR_POINTS as f64) * i as f64;
			let r = if i % 2 == 0 { radius } else { radius * STAR_INSET };
			center + Vec2::new(angle.cos(), angle.sin()) * r
		})
		.collect()
}

/// Trace a closed star path on the surface.
pub fn trace_star(surface: &dyn Surface, center: Vec2, radius: f64, rotation: f64) {
	let vertices = star_vertices(center, radius, rotation);
	if let Some((first, rest)) = vertices.split_first() {
		surface.move_to(*first);
		for v in rest {
			surface.line_to(*v);
		}
	}
	surface.close_path();
}
