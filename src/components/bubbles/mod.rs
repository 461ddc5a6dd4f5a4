//! Ambient bubble background.
//!
//! Renders a field of floating circles and stars on an HTML canvas with:
//! - Straight-line drift with edge bounces, or circular orbits around the
//!   viewport centre with radius-dependent speed
//! - Pairwise collision separation between every two particles
//! - Pointer repulsion that eases particles out of a disc around the cursor
//! - A smoothed per-particle twinkle on the colour's lightness
//!
//! # Example
//!
//! ```ignore
//! use bubbles::{BubblesCanvas, BubblesConfig};
//!
//! let config = BubblesConfig { particle_count: 40, radius_min: 2, radius_max: 8, ..Default::default() };
//! view! { <BubblesCanvas config=config /> }
//! ```
//!
//! The simulation itself is independent of the browser: drive a [`Field`]
//! with [`Field::tick`] and any [`Surface`].

pub mod color;
mod component;
pub mod config;
mod field;
pub mod geometry;
mod orbit;
mod particle;
mod pointer;
pub mod render;
mod twinkle;

pub use color::Hsl;
pub use component::BubblesCanvas;
pub use config::{BubblesConfig, MovementKind, ShapePreference, TwinkleStyle};
pub use field::{Field, unordered_pairs};
pub use geometry::{Bounds, Vec2};
pub use orbit::Orbit;
pub use particle::{Frame, Motion, Particle, ParticleStyle, Shape};
pub use pointer::{MOUSE_RADIUS, PointerState};
pub use render::Surface;
pub use twinkle::{FrameClock, MAX_LIGHTNESS, MIN_LIGHTNESS, Twinkle};
