//! bubbles: ambient floating-particle background for web pages.
//!
//! This crate provides a WASM canvas component that fills the viewport with
//! drifting or orbiting bubbles which collide with each other, shy away from
//! the pointer and twinkle.

use getrandom as _;
use leptos::prelude::*;
use leptos_meta::*;
use log::{Level, info};

pub mod components;

pub use components::bubbles::{
	BubblesCanvas, BubblesConfig, Field, Particle, PointerState, Surface,
};

/// Initialize logging and panic hooks for the WASM target.
pub fn init_logging() {
	let _ = console_log::init_with_level(Level::Debug);
	console_error_panic_hook::set_once();
	info!("bubbles: logging initialized");
}

/// Main application component.
/// Resolves the configuration from the document and mounts the bubble canvas
/// unless `--particles-off` is set.
#[component]
pub fn App() -> impl IntoView {
	provide_meta_context();

	let config = BubblesConfig::from_document();
	let canvas = if config.disabled {
		info!("bubbles: disabled by --particles-off");
		None
	} else {
		Some(view! { <BubblesCanvas config=config reload_on_resize=true /> })
	};

	view! {
		<Title text="Bubbles" />
		<Meta name="viewport" content="width=device-width, initial-scale=1.0" />
		{canvas}
	}
}
