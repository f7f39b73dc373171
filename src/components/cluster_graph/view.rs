//! Pan/zoom transform over the rendered scene.

use super::types::NARROW_BREAKPOINT;

/// Lower zoom bound.
pub const MIN_SCALE: f64 = 0.1;
/// Upper zoom bound.
pub const MAX_SCALE: f64 = 4.0;
/// Per-press factor for the +/- zoom controls.
pub const ZOOM_STEP: f64 = 1.3;

const ZOOM_ANIM_MS: f64 = 300.0;
const RESET_ANIM_MS: f64 = 500.0;
/// Initial zoom-out so every cluster is on screen at load.
const INITIAL_SCALE_NARROW: f64 = 0.35;
const INITIAL_SCALE_WIDE: f64 = 0.55;

/// Affine transform applied to the whole scene: translate then uniform scale.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewTransform {
	/// X translation in screen pixels.
	pub x: f64,
	/// Y translation in screen pixels.
	pub y: f64,
	/// Uniform scale, clamped to `[MIN_SCALE, MAX_SCALE]`.
	pub k: f64,
}

impl ViewTransform {
	fn lerp(a: Self, b: Self, t: f64) -> Self {
		Self {
			x: a.x + (b.x - a.x) * t,
			y: a.y + (b.y - a.y) * t,
			k: a.k + (b.k - a.k) * t,
		}
	}
}

struct ZoomAnimation {
	from: ViewTransform,
	to: ViewTransform,
	elapsed_ms: f64,
	duration_ms: f64,
}

fn ease_out_cubic(t: f64) -> f64 {
	1.0 - (1.0 - t).powi(3)
}

/// Owns the view transform and its short eased zoom transitions. Pans apply
/// immediately; button zooms and resets animate.
pub struct Viewport {
	transform: ViewTransform,
	animation: Option<ZoomAnimation>,
	width: f64,
	height: f64,
}

impl Viewport {
	/// Start at the breakpoint default for the given size.
	pub fn new(width: f64, height: f64) -> Self {
		Self {
			transform: Self::default_transform(width, height),
			animation: None,
			width,
			height,
		}
	}

	/// Breakpoint default: a non-100% initial scale with the scaled scene
	/// centered in the viewport.
	pub fn default_transform(width: f64, height: f64) -> ViewTransform {
		let k = if width < NARROW_BREAKPOINT {
			INITIAL_SCALE_NARROW
		} else {
			INITIAL_SCALE_WIDE
		};
		ViewTransform {
			x: (width - width * k) / 2.0,
			y: (height - height * k) / 2.0,
			k,
		}
	}

	/// Current transform.
	pub fn transform(&self) -> ViewTransform {
		self.transform
	}

	/// Current scale.
	pub fn scale(&self) -> f64 {
		self.transform.k
	}

	/// Map screen coordinates into graph space.
	pub fn screen_to_graph(&self, sx: f64, sy: f64) -> (f64, f64) {
		(
			(sx - self.transform.x) / self.transform.k,
			(sy - self.transform.y) / self.transform.k,
		)
	}

	fn anchored(t: ViewTransform, factor: f64, ax: f64, ay: f64) -> ViewTransform {
		let k = (t.k * factor).clamp(MIN_SCALE, MAX_SCALE);
		let ratio = k / t.k;
		ViewTransform {
			x: ax - (ax - t.x) * ratio,
			y: ay - (ay - t.y) * ratio,
			k,
		}
	}

	/// Immediate cursor-anchored zoom (wheel input).
	pub fn zoom_at(&mut self, factor: f64, ax: f64, ay: f64) {
		self.animation = None;
		self.transform = Self::anchored(self.transform, factor, ax, ay);
	}

	/// Eased zoom anchored at the viewport center (the +/- controls).
	/// Factors compound against the end state of any running transition.
	pub fn zoom_by(&mut self, factor: f64) {
		let to = Self::anchored(self.target(), factor, self.width / 2.0, self.height / 2.0);
		self.animate_to(to, ZOOM_ANIM_MS);
	}

	/// Eased return to the breakpoint default. Idempotent for a given size.
	pub fn reset(&mut self) {
		self.animate_to(
			Self::default_transform(self.width, self.height),
			RESET_ANIM_MS,
		);
	}

	/// Set the translation directly (pan drag). Cancels any transition.
	pub fn set_translation(&mut self, x: f64, y: f64) {
		self.animation = None;
		self.transform.x = x;
		self.transform.y = y;
	}

	/// Track a new viewport size. The transform itself is left alone.
	pub fn resize(&mut self, width: f64, height: f64) {
		self.width = width;
		self.height = height;
	}

	/// End state of the running transition, or the current transform.
	fn target(&self) -> ViewTransform {
		self.animation
			.as_ref()
			.map(|a| a.to)
			.unwrap_or(self.transform)
	}

	fn animate_to(&mut self, to: ViewTransform, duration_ms: f64) {
		self.animation = Some(ZoomAnimation {
			from: self.transform,
			to,
			elapsed_ms: 0.0,
			duration_ms,
		});
	}

	/// Advance any running transition. Returns true while one is active.
	pub fn tick(&mut self, dt_ms: f64) -> bool {
		let Some(anim) = self.animation.as_mut() else {
			return false;
		};
		anim.elapsed_ms += dt_ms;
		let t = (anim.elapsed_ms / anim.duration_ms).min(1.0);
		let (from, to) = (anim.from, anim.to);
		self.transform = ViewTransform::lerp(from, to, ease_out_cubic(t));
		if t >= 1.0 {
			self.animation = None;
			false
		} else {
			true
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn settle(viewport: &mut Viewport) {
		while viewport.tick(50.0) {}
	}

	#[test]
	fn scale_stays_clamped_under_any_zoom_sequence() {
		let mut viewport = Viewport::new(1200.0, 800.0);
		for i in 0..200 {
			if i % 3 == 0 {
				viewport.zoom_at(1.5, 100.0, 50.0);
			} else if i % 3 == 1 {
				viewport.zoom_by(ZOOM_STEP);
			} else {
				viewport.zoom_by(1.0 / ZOOM_STEP);
			}
			viewport.tick(16.0);
			let k = viewport.scale();
			assert!((MIN_SCALE..=MAX_SCALE).contains(&k), "scale {k} escaped");
		}
		settle(&mut viewport);
		assert!((MIN_SCALE..=MAX_SCALE).contains(&viewport.scale()));
	}

	#[test]
	fn repeated_zoom_out_bottoms_out_at_min_scale() {
		let mut viewport = Viewport::new(1200.0, 800.0);
		for _ in 0..50 {
			viewport.zoom_by(1.0 / ZOOM_STEP);
			settle(&mut viewport);
		}
		assert!((viewport.scale() - MIN_SCALE).abs() < 1e-9);
	}

	#[test]
	fn reset_restores_default_regardless_of_history() {
		let mut viewport = Viewport::new(1200.0, 800.0);
		viewport.zoom_at(2.7, 300.0, 200.0);
		viewport.set_translation(-500.0, 900.0);
		viewport.zoom_by(ZOOM_STEP);
		settle(&mut viewport);

		viewport.reset();
		settle(&mut viewport);
		assert_eq!(
			viewport.transform(),
			Viewport::default_transform(1200.0, 800.0)
		);

		// Resetting again is a no-op.
		viewport.reset();
		settle(&mut viewport);
		assert_eq!(
			viewport.transform(),
			Viewport::default_transform(1200.0, 800.0)
		);
	}

	#[test]
	fn default_transform_follows_breakpoint() {
		let narrow = Viewport::default_transform(500.0, 800.0);
		let wide = Viewport::default_transform(1200.0, 800.0);
		assert_eq!(narrow.k, INITIAL_SCALE_NARROW);
		assert_eq!(wide.k, INITIAL_SCALE_WIDE);
		// Scaled scene is centered.
		assert_eq!(wide.x, (1200.0 - 1200.0 * wide.k) / 2.0);
		assert_eq!(wide.y, (800.0 - 800.0 * wide.k) / 2.0);
	}

	#[test]
	fn screen_to_graph_inverts_the_transform() {
		let mut viewport = Viewport::new(1000.0, 700.0);
		viewport.zoom_at(1.7, 400.0, 300.0);
		let t = viewport.transform();
		let (gx, gy) = viewport.screen_to_graph(250.0, 125.0);
		assert!((gx * t.k + t.x - 250.0).abs() < 1e-9);
		assert!((gy * t.k + t.y - 125.0).abs() < 1e-9);
	}

	#[test]
	fn pan_cancels_running_zoom_transition() {
		let mut viewport = Viewport::new(1000.0, 700.0);
		viewport.zoom_by(ZOOM_STEP);
		assert!(viewport.tick(16.0));
		viewport.set_translation(10.0, 20.0);
		assert!(!viewport.tick(16.0));
		assert_eq!(viewport.transform().x, 10.0);
		assert_eq!(viewport.transform().y, 20.0);
	}

	#[test]
	fn wheel_zoom_is_anchored_at_the_cursor() {
		let mut viewport = Viewport::new(1000.0, 700.0);
		let before = viewport.screen_to_graph(400.0, 300.0);
		viewport.zoom_at(1.4, 400.0, 300.0);
		let after = viewport.screen_to_graph(400.0, 300.0);
		assert!((before.0 - after.0).abs() < 1e-9);
		assert!((before.1 - after.1).abs() < 1e-9);
	}
}
