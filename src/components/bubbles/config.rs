//! Bubble field configuration.
//!
//! Values are layered: built-in defaults, then an optional JSON object in a
//! `<script id="bubbles-config">` element, then CSS custom properties on the
//! document element (`--particle-count`, `--bubble-shape`, ...). Anything
//! missing or malformed keeps the value from the layer below.

use log::{debug, warn};
use serde::Deserialize;
use wasm_bindgen::JsCast;
use web_sys::{HtmlScriptElement, Window};

/// Which shape new particles get.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ShapePreference {
	#[default]
	Circle,
	Star,
	StarOutline,
	/// Pick uniformly among the three shapes, independently per particle.
	Random,
}

impl ShapePreference {
	/// Parse a CSS keyword; unknown keywords mean [`ShapePreference::Circle`].
	pub fn from_keyword(s: &str) -> Self {
		match s {
			"star" => Self::Star,
			"star-outline" => Self::StarOutline,
			"random" => Self::Random,
			_ => Self::Circle,
		}
	}
}

/// How particles move for their whole lifetime.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
pub enum MovementKind {
	/// Straight-line drift, bouncing off the viewport edges.
	#[default]
	#[serde(rename = "random")]
	Drift,
	/// Circular orbit around the viewport centre.
	#[serde(rename = "radial")]
	Radial,
}

impl MovementKind {
	/// Parse a CSS keyword; anything but `radial` drifts.
	pub fn from_keyword(s: &str) -> Self {
		match s {
			"radial" => Self::Radial,
			_ => Self::Drift,
		}
	}
}

/// How the brightness oscillation maps onto lightness.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TwinkleStyle {
	/// Continuous sine between 40% and 100% of base lightness.
	#[default]
	Fade,
	/// Hard switch between 40% and 100%.
	Flash,
}

impl TwinkleStyle {
	/// Parse a CSS keyword case-insensitively; unknown keywords fade.
	pub fn from_keyword(s: &str) -> Self {
		match s.to_ascii_lowercase().as_str() {
			"flash" => Self::Flash,
			_ => Self::Fade,
		}
	}
}

/// Complete configuration for one [`Field`](super::Field).
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct BubblesConfig {
	/// Number of particles created for a fresh field.
	#[serde(rename = "particle-count")]
	pub particle_count: usize,
	/// Lower radius bound (inclusive).
	#[serde(rename = "particle-radius-min")]
	pub radius_min: i64,
	/// Upper radius bound (exclusive).
	#[serde(rename = "particle-radius-max")]
	pub radius_max: i64,
	/// Base CSS colour for every particle.
	#[serde(rename = "particle-color")]
	pub color: String,
	/// Upper bound (0-100) of the per-particle opacity percentage.
	#[serde(rename = "max-alpha")]
	pub max_alpha: i64,
	#[serde(rename = "bubble-shape")]
	pub shape: ShapePreference,
	#[serde(rename = "bubble-movement")]
	pub movement: MovementKind,
	/// Base angular speed (radians per tick) of orbiting particles.
	#[serde(rename = "bubble-radial-speed")]
	pub radial_speed: f64,
	/// Maximum drift speed per axis, in pixels per tick.
	#[serde(rename = "velocity-constant")]
	pub velocity_constant: f64,
	#[serde(rename = "star-spin-min")]
	pub spin_min: f64,
	#[serde(rename = "star-spin-max")]
	pub spin_max: f64,
	#[serde(rename = "bubble-twinkle-style")]
	pub twinkle_style: TwinkleStyle,
	/// Fraction of the way a pointer-touched particle moves toward its
	/// pushed-out position each tick.
	#[serde(rename = "bubble-lerp-factor")]
	pub lerp_factor: f64,
	/// Canvas background fill.
	#[serde(rename = "bubbles-bg")]
	pub background: String,
	/// Turns the whole effect off.
	#[serde(rename = "particles-off")]
	pub disabled: bool,
}

impl Default for BubblesConfig {
	fn default() -> Self {
		Self {
			particle_count: 0,
			radius_min: 0,
			radius_max: 0,
			color: "orangered".to_string(),
			max_alpha: 100,
			shape: ShapePreference::Circle,
			movement: MovementKind::Drift,
			radial_speed: 0.002,
			velocity_constant: 0.5,
			spin_min: -0.03,
			spin_max: 0.03,
			twinkle_style: TwinkleStyle::Fade,
			lerp_factor: 0.2,
			background: "transparent".to_string(),
			disabled: false,
		}
	}
}

impl BubblesConfig {
	/// Resolve the configuration from the current document.
	pub fn from_document() -> Self {
		let mut config = load_json_config().unwrap_or_default();
		if let Some(window) = web_sys::window() {
			config.apply_css(|name| css_custom_prop(&window, name));
		}
		config.normalize();
		debug!("bubbles: resolved config {config:?}");
		config
	}

	/// Overlay CSS custom property values. `lookup` receives the property
	/// name without the leading `--` and returns its raw value, if any.
	pub fn apply_css(&mut self, lookup: impl Fn(&str) -> Option<String>) {
		let get = |name: &str| {
			lookup(name)
				.map(|raw| clean_css_value(&raw))
				.filter(|v| !v.is_empty())
		};
		// Options read as `value || default`: zero and garbage mean "unset".
		let nonzero_float = |name: &str| get(name).and_then(|v| parse_float(&v)).filter(|v| *v != 0.0);

		if let Some(v) = get("particle-count") {
			match parse_int(&v) {
				Some(n) => self.particle_count = n.max(0) as usize,
				None => warn!("bubbles: ignoring --particle-count {v:?}"),
			}
		}
		if let Some(n) = get("particle-radius-min").and_then(|v| parse_int(&v)) {
			self.radius_min = n;
		}
		if let Some(n) = get("particle-radius-max").and_then(|v| parse_int(&v)) {
			self.radius_max = n;
		}
		if let Some(v) = get("particle-color") {
			self.color = v;
		}
		if let Some(n) = get("max-alpha").and_then(|v| parse_int(&v)).filter(|n| *n != 0) {
			self.max_alpha = n.clamp(0, 100);
		}
		if let Some(v) = get("bubble-shape") {
			self.shape = ShapePreference::from_keyword(&v);
		}
		if let Some(v) = get("bubble-movement") {
			self.movement = MovementKind::from_keyword(&v);
		}
		if let Some(v) = nonzero_float("bubble-radial-speed") {
			self.radial_speed = v;
		}
		if let Some(v) = nonzero_float("velocity-constant") {
			self.velocity_constant = v;
		}
		if let Some(v) = nonzero_float("star-spin-min") {
			self.spin_min = v;
		}
		if let Some(v) = nonzero_float("star-spin-max") {
			self.spin_max = v;
		}
		if let Some(v) = get("bubble-twinkle-style") {
			self.twinkle_style = TwinkleStyle::from_keyword(&v);
		}
		if let Some(v) = nonzero_float("bubble-lerp-factor") {
			self.lerp_factor = v;
		}
		if let Some(v) = get("bubbles-bg") {
			self.background = v;
		}
		if get("particles-off").is_some() {
			self.disabled = true;
		}
	}

	/// Bring values from any layer into range. Zero or non-finite speeds and
	/// factors mean "unset", as they do for CSS values.
	pub fn normalize(&mut self) {
		let defaults = Self::default();
		let or_default = |v: f64, default: f64| if v.is_finite() && v != 0.0 { v } else { default };

		self.max_alpha = match self.max_alpha {
			0 => defaults.max_alpha,
			n => n.clamp(0, 100),
		};
		self.radial_speed = or_default(self.radial_speed, defaults.radial_speed);
		self.velocity_constant = or_default(self.velocity_constant, defaults.velocity_constant);
		self.spin_min = or_default(self.spin_min, defaults.spin_min);
		self.spin_max = or_default(self.spin_max, defaults.spin_max);
		self.lerp_factor = or_default(self.lerp_factor, defaults.lerp_factor).min(1.0);
	}
}

/// Load the JSON layer from a script element with id="bubbles-config".
fn load_json_config() -> Option<BubblesConfig> {
	let window: Window = web_sys::window()?;
	let document = window.document()?;
	let element = document.get_element_by_id("bubbles-config")?;
	let script: HtmlScriptElement = element.dyn_into().ok()?;
	let json_text = script.text().ok()?;

	match serde_json::from_str::<BubblesConfig>(&json_text) {
		Ok(config) => Some(config),
		Err(e) => {
			warn!("bubbles: failed to parse bubbles-config: {}", e);
			None
		}
	}
}

fn css_custom_prop(window: &Window, name: &str) -> Option<String> {
	let root = window.document()?.document_element()?;
	let style = window.get_computed_style(&root).ok()??;
	style
		.get_property_value(&format!("--{name}"))
		.ok()
		.filter(|v| !v.is_empty())
}

/// Strip quotes and surrounding whitespace from a custom property value.
fn clean_css_value(raw: &str) -> String {
	raw.replace(['\'', '"'], "").trim().to_string()
}

/// Leading-integer parse: `"12px"` is 12, `"px"` is `None`.
fn parse_int(s: &str) -> Option<i64> {
	let s = s.trim_start();
	let sign_len = usize::from(s.starts_with(['+', '-']));
	let digits = s[sign_len..].chars().take_while(char::is_ascii_digit).count();
	if digits == 0 {
		return None;
	}
	s[..sign_len + digits].parse().ok()
}

/// Longest finite float prefix: `"0.5s"` is 0.5.
fn parse_float(s: &str) -> Option<f64> {
	let s = s.trim_start();
	(1..=s.len())
		.rev()
		.filter(|end| s.is_char_boundary(*end))
		.find_map(|end| s[..end].parse::<f64>().ok().filter(|v| v.is_finite()))
}
