//! Leptos wrapper around the cluster canvas: owns the animation-frame loop,
//! the resize listener, and the pointer event plumbing.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use leptos::prelude::*;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, MouseEvent, WheelEvent, Window};

use crate::data::Topic;

use super::render;
use super::state::ClusterGraphState;
use super::view::ZOOM_STEP;

/// Assumed frame delta in seconds; the loop runs off requestAnimationFrame.
const FRAME_DT: f64 = 0.016;

fn measured_size(canvas: &HtmlCanvasElement) -> (f64, f64) {
	canvas
		.parent_element()
		.map(|parent| {
			(
				f64::from(parent.client_width()),
				f64::from(parent.client_height()),
			)
		})
		.unwrap_or((0.0, 0.0))
}

/// Force-directed topic cluster visualization with pan/zoom/drag and hover
/// highlighting. Rebuilds its graph whenever `data` changes.
#[component]
pub fn ClusterGraphCanvas(#[prop(into)] data: Signal<Vec<Topic>>) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let state: Rc<RefCell<Option<ClusterGraphState>>> = Rc::new(RefCell::new(None));
	let animate: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
	let resize_cb: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
	// Pending animation-frame id, so stale loops can be cancelled before a
	// dataset swap or teardown.
	let raf_id: Rc<Cell<i32>> = Rc::new(Cell::new(0));

	let (state_init, animate_init, resize_cb_init, raf_id_init) = (
		state.clone(),
		animate.clone(),
		resize_cb.clone(),
		raf_id.clone(),
	);

	Effect::new(move |_| {
		let topics = data.get();
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		let window: Window = web_sys::window().unwrap();

		// A previous dataset may still have a frame scheduled.
		let _ = window.cancel_animation_frame(raf_id_init.get());

		let (w, h) = measured_size(&canvas);
		let seed = js_sys::Date::now() as u32;
		let graph_state = ClusterGraphState::new(&topics, w, h, seed);
		// The state may have fallen back to a safe size; size the canvas to
		// whatever it settled on.
		canvas.set_width(graph_state.width as u32);
		canvas.set_height(graph_state.height as u32);
		*state_init.borrow_mut() = Some(graph_state);

		let ctx: CanvasRenderingContext2d = canvas
			.get_context("2d")
			.unwrap()
			.unwrap()
			.dyn_into()
			.unwrap();

		// The resize listener survives dataset swaps; register it once.
		if resize_cb_init.borrow().is_none() {
			let (state_resize, canvas_resize) = (state_init.clone(), canvas.clone());
			*resize_cb_init.borrow_mut() = Some(Closure::new(move || {
				let (nw, nh) = measured_size(&canvas_resize);
				if let Some(ref mut s) = *state_resize.borrow_mut() {
					s.resize(nw, nh);
					canvas_resize.set_width(s.width as u32);
					canvas_resize.set_height(s.height as u32);
				}
			}));
			if let Some(ref cb) = *resize_cb_init.borrow() {
				let _ =
					window.add_event_listener_with_callback("resize", cb.as_ref().unchecked_ref());
			}
		}

		let (state_anim, animate_inner, raf_anim) = (
			state_init.clone(),
			animate_init.clone(),
			raf_id_init.clone(),
		);
		*animate_init.borrow_mut() = Some(Closure::new(move || {
			if let Some(ref mut s) = *state_anim.borrow_mut() {
				s.tick(FRAME_DT);
				render::render(s, &ctx);
			}
			if let Some(ref cb) = *animate_inner.borrow() {
				if let Ok(id) = web_sys::window()
					.unwrap()
					.request_animation_frame(cb.as_ref().unchecked_ref())
				{
					raf_anim.set(id);
				}
			}
		}));
		if let Some(ref cb) = *animate_init.borrow() {
			if let Ok(id) = window.request_animation_frame(cb.as_ref().unchecked_ref()) {
				raf_id_init.set(id);
			}
		}
	});

	// Teardown must be idempotent: cancelling a stale frame id and removing
	// an already-removed listener are both harmless. The captures are not
	// Send, so they ride in local storage.
	let cleanup = StoredValue::new_local((
		state.clone(),
		animate.clone(),
		resize_cb.clone(),
		raf_id.clone(),
	));
	on_cleanup(move || {
		cleanup.with_value(|(state, animate, resize_cb, raf_id)| {
			if let Some(window) = web_sys::window() {
				let _ = window.cancel_animation_frame(raf_id.get());
				if let Some(cb) = resize_cb.borrow_mut().take() {
					let _ = window
						.remove_event_listener_with_callback("resize", cb.as_ref().unchecked_ref());
				}
			}
			*animate.borrow_mut() = None;
			*state.borrow_mut() = None;
		});
	});

	let canvas_point = move |ev: &MouseEvent| -> Option<(f64, f64)> {
		let canvas: HtmlCanvasElement = canvas_ref.get()?.into();
		let rect = canvas.get_bounding_client_rect();
		Some((
			f64::from(ev.client_x()) - rect.left(),
			f64::from(ev.client_y()) - rect.top(),
		))
	};

	let state_md = state.clone();
	let on_mousedown = move |ev: MouseEvent| {
		let Some((x, y)) = canvas_point(&ev) else {
			return;
		};
		if let Some(ref mut s) = *state_md.borrow_mut() {
			// A drag on a node never pans the viewport.
			match s.node_at_position(x, y) {
				Some(idx) => s.begin_drag(idx, x, y),
				None => s.begin_pan(x, y),
			}
		}
	};

	let state_mm = state.clone();
	let on_mousemove = move |ev: MouseEvent| {
		let Some((x, y)) = canvas_point(&ev) else {
			return;
		};
		if let Some(ref mut s) = *state_mm.borrow_mut() {
			if s.drag.active {
				s.drag_to(x, y);
			} else if s.pan.active {
				s.pan_to(x, y);
			} else {
				let hovered = s.node_at_position(x, y);
				s.set_hover(hovered);
			}
		}
	};

	let state_mu = state.clone();
	let on_mouseup = move |_: MouseEvent| {
		if let Some(ref mut s) = *state_mu.borrow_mut() {
			s.end_drag();
			s.end_pan();
		}
	};

	let state_ml = state.clone();
	let on_mouseleave = move |_: MouseEvent| {
		if let Some(ref mut s) = *state_ml.borrow_mut() {
			s.pointer_leave();
		}
	};

	let state_wh = state.clone();
	let on_wheel = move |ev: WheelEvent| {
		ev.prevent_default();
		let Some((x, y)) = canvas_point(&ev) else {
			return;
		};
		if let Some(ref mut s) = *state_wh.borrow_mut() {
			let factor = if ev.delta_y() > 0.0 { 0.9 } else { 1.1 };
			s.viewport.zoom_at(factor, x, y);
		}
	};

	// Double-click zoom is deliberately disabled; it fights node dragging.
	let on_dblclick = move |ev: MouseEvent| {
		ev.prevent_default();
	};

	let state_zi = state.clone();
	let zoom_in = move |_: MouseEvent| {
		if let Some(ref mut s) = *state_zi.borrow_mut() {
			s.viewport.zoom_by(ZOOM_STEP);
		}
	};
	let state_zo = state.clone();
	let zoom_out = move |_: MouseEvent| {
		if let Some(ref mut s) = *state_zo.borrow_mut() {
			s.viewport.zoom_by(1.0 / ZOOM_STEP);
		}
	};
	let state_rv = state.clone();
	let reset_view = move |_: MouseEvent| {
		if let Some(ref mut s) = *state_rv.borrow_mut() {
			s.viewport.reset();
		}
	};

	view! {
		<div class="cluster-canvas-wrap">
			<canvas
				node_ref=canvas_ref
				class="cluster-canvas"
				on:mousedown=on_mousedown
				on:mousemove=on_mousemove
				on:mouseup=on_mouseup
				on:mouseleave=on_mouseleave
				on:wheel=on_wheel
				on:dblclick=on_dblclick
			/>
			<div class="zoom-controls">
				<button type="button" title="Zoom In" on:click=zoom_in>
					"+"
				</button>
				<button type="button" title="Zoom Out" on:click=zoom_out>
					"\u{2212}"
				</button>
				<div class="zoom-divider"></div>
				<button type="button" title="Reset View" on:click=reset_view>
					"\u{27f2}"
				</button>
			</div>
		</div>
	}
}
