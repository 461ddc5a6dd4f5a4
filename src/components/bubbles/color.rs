//! CSS colour parsing and RGB/HSL conversion.
//!
//! Particles cache their base colour as an integer HSL triple so the twinkle
//! can modulate lightness without touching hue or saturation.

use log::warn;

/// RGBA color representation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
	pub r: u8,
	pub g: u8,
	pub b: u8,
	pub a: f64,
}

impl Color {
	pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
		Self { r, g, b, a: 1.0 }
	}

	pub const fn rgba(r: u8, g: u8, b: u8, a: f64) -> Self {
		Self { r, g, b, a }
	}

	/// Drop the alpha channel the way reading back a painted pixel does: a
	/// fully transparent colour comes back as black.
	pub fn opaque(self) -> Self {
		if self.a <= 0.0 {
			Self::rgb(0, 0, 0)
		} else {
			Self::rgb(self.r, self.g, self.b)
		}
	}

	/// Convert to HSL with every component rounded to a whole number
	/// (degrees, percent, percent).
	pub fn to_hsl(self) -> Hsl {
		let (r, g, b) = (
			self.r as f64 / 255.0,
			self.g as f64 / 255.0,
			self.b as f64 / 255.0,
		);
		let max = r.max(g).max(b);
		let min = r.min(g).min(b);
		let l = (max + min) / 2.0;

		let (h, s) = if max == min {
			(0.0, 0.0)
		} else {
			let d = max - min;
			let s = if l > 0.5 {
				d / (2.0 - max - min)
			} else {
				d / (max + min)
			};
			let h = if max == r {
				(g - b) / d + if g < b { 6.0 } else { 0.0 }
			} else if max == g {
				(b - r) / d + 2.0
			} else {
				(r - g) / d + 4.0
			};
			(h / 6.0, s)
		};

		Hsl {
			h: (h * 360.0).round(),
			s: (s * 100.0).round(),
			l: (l * 100.0).round(),
		}
	}
}

/// Hue in degrees, saturation and lightness in percent.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Hsl {
	pub h: f64,
	pub s: f64,
	pub l: f64,
}

impl Hsl {
	pub const fn new(h: f64, s: f64, l: f64) -> Self {
		Self { h, s, l }
	}

	/// Same hue and saturation with a different lightness.
	pub fn with_lightness(self, l: f64) -> Self {
		Self { l, ..self }
	}

	pub fn to_rgb(self) -> Color {
		let h = self.h.rem_euclid(360.0) / 360.0;
		let s = (self.s / 100.0).clamp(0.0, 1.0);
		let l = (self.l / 100.0).clamp(0.0, 1.0);
		if s == 0.0 {
			let v = (l * 255.0).round() as u8;
			return Color::rgb(v, v, v);
		}
		let q = if l < 0.5 { l * (1.0 + s) } else { l + s - l * s };
		let p = 2.0 * l - q;
		let channel = |t: f64| {
			let t = t.rem_euclid(1.0);
			let v = if t < 1.0 / 6.0 {
				p + (q - p) * 6.0 * t
			} else if t < 0.5 {
				q
			} else if t < 2.0 / 3.0 {
				p + (q - p) * (2.0 / 3.0 - t) * 6.0
			} else {
				p
			};
			(v * 255.0).round() as u8
		};
		Color::rgb(channel(h + 1.0 / 3.0), channel(h), channel(h - 1.0 / 3.0))
	}

	pub fn to_css(self) -> String {
		format!("hsl({}, {}%, {}%)", self.h, self.s, self.l)
	}
}

/// Colour used when a configured colour string cannot be understood.
pub const FALLBACK_COLOR: &str = "orangered";

/// Parse a CSS colour string and return its HSL triple.
///
/// Accepts `#rgb`, `#rgba`, `#rrggbb`, `#rrggbbaa`, `rgb()`/`rgba()`,
/// `hsl()`/`hsla()` and CSS named colours. HSL input is round-tripped
/// through 8-bit RGB so every input format quantises the same way. Alpha is
/// discarded, except that a fully transparent colour reads as black.
pub fn parse_hsl(color_str: &str) -> Option<Hsl> {
	parse_color(color_str).map(|c| c.opaque().to_hsl())
}

/// Like [`parse_hsl`], but an unparseable colour logs a warning and falls back
/// to [`FALLBACK_COLOR`].
pub fn parse_hsl_or_fallback(color_str: &str) -> Hsl {
	parse_hsl(color_str).unwrap_or_else(|| {
		warn!("bubbles: unrecognised colour {color_str:?}, using {FALLBACK_COLOR}");
		Color::rgb(255, 69, 0).to_hsl()
	})
}

/// Parses a CSS color string into a [`Color`].
pub fn parse_color(color_str: &str) -> Option<Color> {
	let s = color_str.trim().to_ascii_lowercase();
	if let Some(hex) = s.strip_prefix('#') {
		parse_hex(hex)
	} else if let Some(args) = function_args(&s, &["rgba", "rgb"]) {
		parse_rgb_args(&args)
	} else if let Some(args) = function_args(&s, &["hsla", "hsl"]) {
		parse_hsl_args(&args)
	} else {
		named_color(&s)
	}
}

/// Returns the argument list of `name(...)` split on commas, whitespace and
/// the `/` alpha separator.
fn function_args(s: &str, names: &[&str]) -> Option<Vec<String>> {
	let name = names.iter().find(|n| s.starts_with(**n))?;
	let inner = s[name.len()..]
		.trim()
		.strip_prefix('(')?
		.strip_suffix(')')?;
	Some(
		inner
			.split(|c: char| c == ',' || c == '/' || c.is_whitespace())
			.filter(|part| !part.is_empty())
			.map(str::to_string)
			.collect(),
	)
}

fn parse_hex(hex: &str) -> Option<Color> {
	if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
		return None;
	}
	let nibble = |i: usize| u8::from_str_radix(&hex[i..i + 1], 16).ok().map(|v| v * 17);
	let byte = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
	match hex.len() {
		3 | 4 => {
			let a = if hex.len() == 4 {
				nibble(3)? as f64 / 255.0
			} else {
				1.0
			};
			Some(Color::rgba(nibble(0)?, nibble(1)?, nibble(2)?, a))
		}
		6 | 8 => {
			let a = if hex.len() == 8 {
				byte(6)? as f64 / 255.0
			} else {
				1.0
			};
			Some(Color::rgba(byte(0)?, byte(2)?, byte(4)?, a))
		}
		_ => None,
	}
}

fn parse_alpha(arg: Option<&String>) -> Option<f64> {
	match arg {
		None => Some(1.0),
		Some(a) => match a.strip_suffix('%') {
			Some(pct) => pct.parse::<f64>().ok().map(|v| (v / 100.0).clamp(0.0, 1.0)),
			None => a.parse::<f64>().ok().map(|v| v.clamp(0.0, 1.0)),
		},
	}
}

fn parse_rgb_args(args: &[String]) -> Option<Color> {
	if !(3..=4).contains(&args.len()) {
		return None;
	}
	let channel = |arg: &String| -> Option<u8> {
		let v = match arg.strip_suffix('%') {
			Some(pct) => pct.parse::<f64>().ok()? * 2.55,
			None => arg.parse::<f64>().ok()?,
		};
		Some(v.clamp(0.0, 255.0).round() as u8)
	};
	Some(Color::rgba(
		channel(&args[0])?,
		channel(&args[1])?,
		channel(&args[2])?,
		parse_alpha(args.get(3))?,
	))
}

fn parse_hsl_args(args: &[String]) -> Option<Color> {
	if !(3..=4).contains(&args.len()) {
		return None;
	}
	let h = args[0].trim_end_matches("deg").parse::<f64>().ok()?;
	let s = args[1].trim_end_matches('%').parse::<f64>().ok()?;
	let l = args[2].trim_end_matches('%').parse::<f64>().ok()?;
	let a = parse_alpha(args.get(3))?;
	let rgb = Hsl::new(h, s, l).to_rgb();
	Some(Color { a, ..rgb })
}

fn named_color(name: &str) -> Option<Color> {
	if name == "transparent" {
		return Some(Color::rgba(0, 0, 0, 0.0));
	}
	NAMED_COLORS
		.binary_search_by(|(n, _)| n.cmp(&name))
		.ok()
		.map(|i| {
			let rgb = NAMED_COLORS[i].1;
			Color::rgb((rgb >> 16) as u8, (rgb >> 8) as u8, rgb as u8)
		})
}

/// CSS named colours, sorted by name for binary search.
const NAMED_COLORS: &[(&str, u32)] = &[
	("aliceblue", 0xf0f8ff),
	("antiquewhite", 0xfaebd7),
	("aqua", 0x00ffff),
	("aquamarine", 0x7fffd4),
	("azure", 0xf0ffff),
	("beige", 0xf5f5dc),
	("bisque", 0xffe4c4),
	("black", 0x000000),
	("blanchedalmond", 0xffebcd),
	("blue", 0x0000ff),
	("blueviolet", 0x8a2be2),
	("brown", 0xa52a2a),
	("burlywood", 0xdeb887),
	("cadetblue", 0x5f9ea0),
	("chartreuse", 0x7fff00),
	("chocolate", 0xd2691e),
	("coral", 0xff7f50),
	("cornflowerblue", 0x6495ed),
	("cornsilk", 0xfff8dc),
	("crimson", 0xdc143c),
	("cyan", 0x00ffff),
	("darkblue", 0x00008b),
	("darkcyan", 0x008b8b),
	("darkgoldenrod", 0xb8860b),
	("darkgray", 0xa9a9a9),
	("darkgreen", 0x006400),
	("darkgrey", 0xa9a9a9),
	("darkkhaki", 0xbdb76b),
	("darkmagenta", 0x8b008b),
	("darkolivegreen", 0x556b2f),
	("darkorange", 0xff8c00),
	("darkorchid", 0x9932cc),
	("darkred", 0x8b0000),
	("darksalmon", 0xe9967a),
	("darkseagreen", 0x8fbc8f),
	("darkslateblue", 0x483d8b),
	("darkslategray", 0x2f4f4f),
	("darkslategrey", 0x2f4f4f),
	("darkturquoise", 0x00ced1),
	("darkviolet", 0x9400d3),
	("deeppink", 0xff1493),
	("deepskyblue", 0x00bfff),
	("dimgray", 0x696969),
	("dimgrey", 0x696969),
	("dodgerblue", 0x1e90ff),
	("firebrick", 0xb22222),
	("floralwhite", 0xfffaf0),
	("forestgreen", 0x228b22),
	("fuchsia", 0xff00ff),
	("gainsboro", 0xdcdcdc),
	("ghostwhite", 0xf8f8ff),
	("gold", 0xffd700),
	("goldenrod", 0xdaa520),
	("gray", 0x808080),
	("green", 0x008000),
	("greenyellow", 0xadff2f),
	("grey", 0x808080),
	("honeydew", 0xf0fff0),
	("hotpink", 0xff69b4),
	("indianred", 0xcd5c5c),
	("indigo", 0x4b0082),
	("ivory", 0xfffff0),
	("khaki", 0xf0e68c),
	("lavender", 0xe6e6fa),
	("lavenderblush", 0xfff0f5),
	("lawngreen", 0x7cfc00),
	("lemonchiffon", 0xfffacd),
	("lightblue", 0xadd8e6),
	("lightcoral", 0xf08080),
	("lightcyan", 0xe0ffff),
	("lightgoldenrodyellow", 0xfafad2),
	("lightgray", 0xd3d3d3),
	("lightgreen", 0x90ee90),
	("lightgrey", 0xd3d3d3),
	("lightpink", 0xffb6c1),
	("lightsalmon", 0xffa07a),
	("lightseagreen", 0x20b2aa),
	("lightskyblue", 0x87cefa),
	("lightslategray", 0x778899),
	("lightslategrey", 0x778899),
	("lightsteelblue", 0xb0c4de),
	("lightyellow", 0xffffe0),
	("lime", 0x00ff00),
	("limegreen", 0x32cd32),
	("linen", 0xfaf0e6),
	("magenta", 0xff00ff),
	("maroon", 0x800000),
	("mediumaquamarine", 0x66cdaa),
	("mediumblue", 0x0000cd),
	("mediumorchid", 0xba55d3),
	("mediumpurple", 0x9370db),
	("mediumseagreen", 0x3cb371),
	("mediumslateblue", 0x7b68ee),
	("mediumspringgreen", 0x00fa9a),
	("mediumturquoise", 0x48d1cc),
	("mediumvioletred", 0xc71585),
	("midnightblue", 0x191970),
	("mintcream", 0xf5fffa),
	("mistyrose", 0xffe4e1),
	("moccasin", 0xffe4b5),
	("navajowhite", 0xffdead),
	("navy", 0x000080),
	("oldlace", 0xfdf5e6),
	("olive", 0x808000),
	("olivedrab", 0x6b8e23),
	("orange", 0xffa500),
	("orangered", 0xff4500),
	("orchid", 0xda70d6),
	("palegoldenrod", 0xeee8aa),
	("palegreen", 0x98fb98),
	("paleturquoise", 0xafeeee),
	("palevioletred", 0xdb7093),
	("papayawhip", 0xffefd5),
	("peachpuff", 0xffdab9),
	("peru", 0xcd853f),
	("pink", 0xffc0cb),
	("plum", 0xdda0dd),
	("powderblue", 0xb0e0e6),
	("purple", 0x800080),
	("rebeccapurple", 0x663399),
	("red", 0xff0000),
	("rosybrown", 0xbc8f8f),
	("royalblue", 0x4169e1),
	("saddlebrown", 0x8b4513),
	("salmon", 0xfa8072),
	("sandybrown", 0xf4a460),
	("seagreen", 0x2e8b57),
	("seashell", 0xfff5ee),
	("sienna", 0xa0522d),
	("silver", 0xc0c0c0),
	("skyblue", 0x87ceeb),
	("slateblue", 0x6a5acd),
	("slategray", 0x708090),
	("slategrey", 0x708090),
	("snow", 0xfffafa),
	("springgreen", 0x00ff7f),
	("steelblue", 0x4682b4),
	("tan", 0xd2b48c),
	("teal", 0x008080),
	("thistle", 0xd8bfd8),
	("tomato", 0xff6347),
	("turquoise", 0x40e0d0),
	("violet", 0xee82ee),
	("wheat", 0xf5deb3),
	("white", 0xffffff),
	("whitesmoke", 0xf5f5f5),
	("yellow", 0xffff00),
	("yellowgreen", 0x9acd32),
];
