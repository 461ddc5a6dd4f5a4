//! Leptos component wrapping the bubble canvas.
//!
//! The component creates a full-viewport canvas behind the page content,
//! listens for window `mousemove` and `resize` events, and runs the field's
//! tick from a `requestAnimationFrame` loop.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use leptos::prelude::*;
use log::warn;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, MouseEvent, Window};

use super::config::BubblesConfig;
use super::field::Field;
use super::pointer::PointerState;

type Callback = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

/// Renders the animated bubble field on a fixed canvas that fills the
/// viewport and sits behind all other content.
///
/// `config` seeds the first field and is reused on every resize. With
/// `reload_on_resize`, a resize re-reads the configuration from the document
/// instead. Either way the field is rebuilt around the existing particles.
#[component]
pub fn BubblesCanvas(
	config: BubblesConfig,
	#[prop(optional)] reload_on_resize: bool,
) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let field: Rc<RefCell<Option<Field>>> = Rc::new(RefCell::new(None));
	let pointer: Rc<Cell<PointerState>> = Rc::new(Cell::new(PointerState::default()));
	let animate: Callback = Rc::new(RefCell::new(None));
	let resize_cb: Callback = Rc::new(RefCell::new(None));
	let mousemove_cb: Rc<RefCell<Option<Closure<dyn FnMut(MouseEvent)>>>> =
		Rc::new(RefCell::new(None));

	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		let Some(window) = web_sys::window() else {
			return;
		};

		let (w, h) = viewport_size(&window);
		style_surface(&canvas, &config, w, h);

		let Some(ctx) = context_2d(&canvas) else {
			warn!("bubbles: canvas has no 2d context");
			return;
		};

		*field.borrow_mut() = Some(Field::new(
			config.clone(),
			w,
			h,
			Vec::new(),
			&mut rand::thread_rng(),
		));

		let (field_resize, canvas_resize, base_config) =
			(field.clone(), canvas.clone(), config.clone());
		*resize_cb.borrow_mut() = Some(Closure::new(move || {
			let Some(win) = web_sys::window() else {
				return;
			};
			let (nw, nh) = viewport_size(&win);
			let config = resize_config(&base_config, reload_on_resize, BubblesConfig::from_document);
			style_surface(&canvas_resize, &config, nw, nh);

			let mut slot = field_resize.borrow_mut();
			if let Some(old) = slot.take() {
				*slot = Some(old.rebuild(config, nw, nh, &mut rand::thread_rng()));
			}
		}));
		if let Some(ref cb) = *resize_cb.borrow() {
			let _ = window.add_event_listener_with_callback("resize", cb.as_ref().unchecked_ref());
		}

		let (pointer_move, canvas_move) = (pointer.clone(), canvas.clone());
		*mousemove_cb.borrow_mut() = Some(Closure::new(move |ev: MouseEvent| {
			let rect = canvas_move.get_bounding_client_rect();
			let mut state = pointer_move.get();
			state.move_to(
				ev.client_x() as f64 - rect.left(),
				ev.client_y() as f64 - rect.top(),
			);
			pointer_move.set(state);
		}));
		if let Some(ref cb) = *mousemove_cb.borrow() {
			let _ =
				window.add_event_listener_with_callback("mousemove", cb.as_ref().unchecked_ref());
		}

		let (field_anim, pointer_anim, animate_inner) =
			(field.clone(), pointer.clone(), animate.clone());
		let mut last_frame_ms = js_sys::Date::now();
		*animate.borrow_mut() = Some(Closure::new(move || {
			let now = js_sys::Date::now();
			let dt = (now - last_frame_ms) / 1000.0;
			last_frame_ms = now;

			if let Some(ref mut f) = *field_anim.borrow_mut() {
				f.tick(dt, &pointer_anim.get(), &ctx);
			}
			if let (Some(win), Some(cb)) = (web_sys::window(), animate_inner.borrow().as_ref()) {
				let _ = win.request_animation_frame(cb.as_ref().unchecked_ref());
			}
		}));
		if let Some(ref cb) = *animate.borrow() {
			let _ = window.request_animation_frame(cb.as_ref().unchecked_ref());
		}
	});

	view! { <canvas node_ref=canvas_ref class="bubbles-canvas" /> }
}

/// Configuration for a rebuild after a resize.
fn resize_config(
	base: &BubblesConfig,
	reload: bool,
	from_document: impl FnOnce() -> BubblesConfig,
) -> BubblesConfig {
	if reload { from_document() } else { base.clone() }
}

fn viewport_size(window: &Window) -> (f64, f64) {
	let dim = |v: Result<JsValue, JsValue>, fallback: f64| {
		v.ok().and_then(|v| v.as_f64()).unwrap_or(fallback)
	};
	(
		dim(window.inner_width(), 800.0),
		dim(window.inner_height(), 600.0),
	)
}

fn context_2d(canvas: &HtmlCanvasElement) -> Option<CanvasRenderingContext2d> {
	canvas.get_context("2d").ok()??.dyn_into().ok()
}

/// Pin the canvas behind the page at viewport size.
fn style_surface(canvas: &HtmlCanvasElement, config: &BubblesConfig, width: f64, height: f64) {
	canvas.set_width(width as u32);
	canvas.set_height(height as u32);

	let style = web_sys::HtmlElement::style(canvas);
	for (name, value) in [
		("position", "fixed"),
		("left", "0"),
		("top", "0"),
		("margin", "0"),
		("width", "100vw"),
		("height", "100vh"),
		("background-color", config.background.as_str()),
		("overflow", "hidden"),
		("z-index", "-1"),
	] {
		if style.set_property(name, value).is_err() {
			warn!("bubbles: could not set canvas {name}");
		}
	}
}
