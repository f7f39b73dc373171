//! Shared interactive state for the cluster canvas.
//!
//! One instance lives behind an `Rc<RefCell<_>>` and is touched by both the
//! animation-frame tick and the pointer handlers, so everything they share
//! (the node arena, the hover machine, drag bookkeeping) sits here.

use log::debug;

use crate::data::Topic;
use crate::rng::Lcg;

use super::build::{self, BuiltGraph};
use super::sim::{DRAG_ALPHA_TARGET, LayoutParams, Simulation};
use super::types::{GraphEdge, GraphNode, NodeKind};
use super::view::Viewport;

/// Minimum hit-test radius so small satellites stay grabbable.
const HIT_RADIUS: f64 = 12.0;
/// Fallback size when the container measures zero.
const FALLBACK_SIZE: (f64, f64) = (800.0, 600.0);

/// Hub highlight ramp-in time in seconds.
const HUB_IN_SECS: f64 = 0.4;
/// Satellite/edge highlight ramp-in time in seconds.
const SATELLITE_IN_SECS: f64 = 0.3;
/// Fade-back time after pointer leave, in seconds.
const FADE_OUT_SECS: f64 = 0.3;
/// Extra delay per satellite list position, giving the ripple effect.
const RIPPLE_SECS: f64 = 0.015;

fn ease_out_cubic(t: f64) -> f64 {
	1.0 - (1.0 - t).powi(3)
}

/// Active node drag, in screen coordinates.
#[derive(Clone, Debug, Default)]
pub struct DragState {
	/// True between mousedown on a node and mouseup.
	pub active: bool,
	/// Arena index of the dragged node.
	pub node: Option<usize>,
	/// Pointer position at drag start.
	pub start_x: f64,
	/// Pointer position at drag start.
	pub start_y: f64,
	/// Node position at drag start, in graph space.
	pub node_start_x: f64,
	/// Node position at drag start, in graph space.
	pub node_start_y: f64,
}

/// Active background pan, in screen coordinates.
#[derive(Clone, Debug, Default)]
pub struct PanState {
	/// True between mousedown on empty space and mouseup.
	pub active: bool,
	/// Pointer position at pan start.
	pub start_x: f64,
	/// Pointer position at pan start.
	pub start_y: f64,
	/// Translation at pan start.
	pub transform_start_x: f64,
	/// Translation at pan start.
	pub transform_start_y: f64,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
enum HoverPhase {
	#[default]
	Idle,
	FadeIn,
	FadeOut,
}

/// Per-cluster highlight state machine. Hovering a hub ramps its cluster in
/// with a per-satellite ripple; leaving keeps the previous cluster around
/// while it fades back to baseline.
#[derive(Clone, Debug, Default)]
pub struct HoverState {
	phase: HoverPhase,
	/// Seconds since the last phase change.
	elapsed: f64,
	hub: Option<usize>,
	satellites: Vec<usize>,
	prev_hub: Option<usize>,
	prev_satellites: Vec<usize>,
}

/// Everything the tick loop, renderer, and input handlers operate on.
pub struct ClusterGraphState {
	/// The layout engine; owns the node arena.
	pub sim: Simulation,
	/// Hub→satellite edges into the arena.
	pub edges: Vec<GraphEdge>,
	/// Pan/zoom controller.
	pub viewport: Viewport,
	/// Node drag bookkeeping.
	pub drag: DragState,
	/// Background pan bookkeeping.
	pub pan: PanState,
	/// Cluster highlight machine.
	pub hover: HoverState,
	/// Current canvas width.
	pub width: f64,
	/// Current canvas height.
	pub height: f64,
}

fn safe_size(width: f64, height: f64) -> (f64, f64) {
	if width <= 0.0 || height <= 0.0 {
		FALLBACK_SIZE
	} else {
		(width, height)
	}
}

impl ClusterGraphState {
	/// Build the graph for one dataset and wrap it in fresh interaction
	/// state.
	pub fn new(topics: &[Topic], width: f64, height: f64, seed: u32) -> Self {
		let (width, height) = safe_size(width, height);
		let mut rng = Lcg::new(seed);
		let BuiltGraph { nodes, edges } = build::build_graph(topics, width, height, &mut rng);
		let sim = Simulation::new(
			nodes,
			&edges,
			width / 2.0,
			height / 2.0,
			LayoutParams::default(),
		);
		Self {
			sim,
			edges,
			viewport: Viewport::new(width, height),
			drag: DragState::default(),
			pan: PanState::default(),
			hover: HoverState::default(),
			width,
			height,
		}
	}

	/// The node arena.
	pub fn nodes(&self) -> &[GraphNode] {
		&self.sim.nodes
	}

	/// Topmost node under a screen position, if any. Later nodes draw on
	/// top, so scan back to front.
	pub fn node_at_position(&self, sx: f64, sy: f64) -> Option<usize> {
		let (gx, gy) = self.viewport.screen_to_graph(sx, sy);
		self.sim
			.nodes
			.iter()
			.enumerate()
			.rev()
			.find(|(_, node)| {
				let dx = node.x - gx;
				let dy = node.y - gy;
				(dx * dx + dy * dy).sqrt() < node.radius.max(HIT_RADIUS)
			})
			.map(|(idx, _)| idx)
	}

	/// Advance one frame: physics, zoom transitions, and the hover machine.
	/// `dt` is in seconds.
	pub fn tick(&mut self, dt: f64) {
		self.sim.tick();
		self.viewport.tick(dt * 1000.0);

		self.hover.elapsed += dt;
		if self.hover.elapsed >= FADE_OUT_SECS {
			self.hover.prev_hub = None;
			self.hover.prev_satellites.clear();
			if self.hover.phase == HoverPhase::FadeOut {
				self.hover.phase = HoverPhase::Idle;
			}
		}
	}

	/// Re-center the forces at the new midpoint and reheat; nodes and the
	/// view transform survive the resize.
	pub fn resize(&mut self, width: f64, height: f64) {
		let (width, height) = safe_size(width, height);
		self.width = width;
		self.height = height;
		self.sim.set_center(width / 2.0, height / 2.0);
		self.sim.reheat();
		self.viewport.resize(width, height);
		debug!("cluster canvas resized to {width}x{height}");
	}

	// ----- hover -----

	/// Update the hover target. Only hubs highlight; pointing at a satellite
	/// or empty space clears the highlight.
	pub fn set_hover(&mut self, node: Option<usize>) {
		let hub = node.filter(|&idx| self.sim.nodes[idx].kind == NodeKind::Hub);
		if self.hover.hub == hub {
			return;
		}

		if hub.is_none() {
			// Keep the old cluster around while it fades back out.
			self.hover.prev_hub = self.hover.hub.take();
			self.hover.prev_satellites = std::mem::take(&mut self.hover.satellites);
			self.hover.phase = HoverPhase::FadeOut;
			self.hover.elapsed = 0.0;
			return;
		}

		// A direct hub-to-hub switch fades the outgoing cluster while the
		// new one ramps in.
		self.hover.prev_hub = self.hover.hub.take();
		self.hover.prev_satellites = std::mem::take(&mut self.hover.satellites);
		self.hover.hub = hub;
		self.hover.phase = HoverPhase::FadeIn;
		self.hover.elapsed = 0.0;
		if let Some(h) = hub {
			self.hover
				.satellites
				.extend(self.edges.iter().filter(|e| e.source == h).map(|e| e.target));
		}
	}

	/// Hub currently hovered, if any.
	pub fn hovered_hub(&self) -> Option<usize> {
		self.hover.hub
	}

	/// True while any cluster is highlighted or still fading.
	pub fn has_active_highlight(&self) -> bool {
		self.hover.hub.is_some() || self.hover.prev_hub.is_some()
	}

	/// True if the node belongs to the active or fading cluster.
	pub fn is_highlighted(&self, idx: usize) -> bool {
		self.hover.hub == Some(idx)
			|| self.hover.prev_hub == Some(idx)
			|| self.hover.satellites.contains(&idx)
			|| self.hover.prev_satellites.contains(&idx)
	}

	/// Shared fade-out ramp for whatever cluster was hovered last. Runs in
	/// both phases: FadeOut after leaving, FadeIn during a hub-to-hub switch.
	fn fade_out(&self) -> f64 {
		1.0 - (self.hover.elapsed / FADE_OUT_SECS).clamp(0.0, 1.0)
	}

	/// Eased highlight factor in `[0, 1]` for a hub node.
	pub fn hub_highlight(&self, idx: usize) -> f64 {
		if self.hover.phase == HoverPhase::FadeIn && self.hover.hub == Some(idx) {
			ease_out_cubic((self.hover.elapsed / HUB_IN_SECS).clamp(0.0, 1.0))
		} else if self.hover.prev_hub == Some(idx) {
			self.fade_out()
		} else {
			0.0
		}
	}

	/// Eased highlight factor for a satellite, rippling by list position.
	pub fn satellite_highlight(&self, idx: usize) -> f64 {
		if self.hover.phase == HoverPhase::FadeIn {
			if let Some(i) = self.hover.satellites.iter().position(|&s| s == idx) {
				let local = (self.hover.elapsed - i as f64 * RIPPLE_SECS) / SATELLITE_IN_SECS;
				return ease_out_cubic(local.clamp(0.0, 1.0));
			}
		}
		if self.hover.prev_satellites.contains(&idx) {
			self.fade_out()
		} else {
			0.0
		}
	}

	/// Eased highlight factor for an edge; follows its hub's cluster.
	pub fn edge_highlight(&self, edge: &GraphEdge) -> f64 {
		if self.hover.phase == HoverPhase::FadeIn && self.hover.hub == Some(edge.source) {
			ease_out_cubic((self.hover.elapsed / SATELLITE_IN_SECS).clamp(0.0, 1.0))
		} else if self.hover.prev_hub == Some(edge.source) {
			self.fade_out()
		} else {
			0.0
		}
	}

	// ----- drag -----

	/// Start dragging a node: pin it under the pointer and keep the
	/// simulation warm so neighbors react.
	pub fn begin_drag(&mut self, idx: usize, sx: f64, sy: f64) {
		let Some(node) = self.sim.nodes.get(idx) else {
			return;
		};
		self.drag = DragState {
			active: true,
			node: Some(idx),
			start_x: sx,
			start_y: sy,
			node_start_x: node.x,
			node_start_y: node.y,
		};
		let (x, y) = (node.x, node.y);
		self.sim.pin(idx, x, y);
		self.sim.set_alpha_target(DRAG_ALPHA_TARGET);
		self.sim.reheat();
	}

	/// Move the dragged node's pin to follow the pointer.
	pub fn drag_to(&mut self, sx: f64, sy: f64) {
		if !self.drag.active {
			return;
		}
		let Some(idx) = self.drag.node else {
			return;
		};
		let k = self.viewport.scale();
		let nx = self.drag.node_start_x + (sx - self.drag.start_x) / k;
		let ny = self.drag.node_start_y + (sy - self.drag.start_y) / k;
		self.sim.pin(idx, nx, ny);
	}

	/// Release the drag: unpin so forces move the node again, and let the
	/// temperature decay.
	pub fn end_drag(&mut self) {
		if let Some(idx) = self.drag.node.take() {
			self.sim.unpin(idx);
			self.sim.set_alpha_target(0.0);
		}
		self.drag.active = false;
	}

	// ----- pan -----

	/// Start a background pan. Never called while a node drag is active.
	pub fn begin_pan(&mut self, sx: f64, sy: f64) {
		let t = self.viewport.transform();
		self.pan = PanState {
			active: true,
			start_x: sx,
			start_y: sy,
			transform_start_x: t.x,
			transform_start_y: t.y,
		};
	}

	/// Follow the pointer during a pan.
	pub fn pan_to(&mut self, sx: f64, sy: f64) {
		if !self.pan.active {
			return;
		}
		self.viewport.set_translation(
			self.pan.transform_start_x + (sx - self.pan.start_x),
			self.pan.transform_start_y + (sy - self.pan.start_y),
		);
	}

	/// Stop any pan in progress.
	pub fn end_pan(&mut self) {
		self.pan.active = false;
	}

	/// Pointer left the canvas: drop every gesture and fade the highlight.
	pub fn pointer_leave(&mut self) {
		self.end_drag();
		self.end_pan();
		self.set_hover(None);
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::data::Entry;

	const DT: f64 = 0.016;

	fn topic(name: &str, keywords: usize) -> Topic {
		Topic {
			topic: name.to_string(),
			entries: (0..keywords)
				.map(|k| Entry {
					keyword: Some(format!("k{k}")),
					prompt: "p".to_string(),
				})
				.collect(),
		}
	}

	fn fixture() -> ClusterGraphState {
		// First topic hub is index 0, its 4 satellites are 1..=4.
		ClusterGraphState::new(&[topic("a", 4), topic("b", 2)], 1000.0, 800.0, 11)
	}

	fn run(state: &mut ClusterGraphState, seconds: f64) {
		let mut t = 0.0;
		while t < seconds {
			state.tick(DT);
			t += DT;
		}
	}

	#[test]
	fn hover_on_hub_highlights_all_satellites_and_edges() {
		let mut state = fixture();
		state.set_hover(Some(0));
		run(&mut state, 1.0);

		assert_eq!(state.hovered_hub(), Some(0));
		assert!(state.hub_highlight(0) > 0.99);
		let satellites: Vec<usize> = (1..=4).collect();
		for &s in &satellites {
			assert!(state.is_highlighted(s));
			assert!(state.satellite_highlight(s) > 0.99, "satellite {s} dim");
		}
		let cluster_edges: Vec<GraphEdge> = state
			.edges
			.iter()
			.copied()
			.filter(|e| e.source == 0)
			.collect();
		assert_eq!(cluster_edges.len(), 4);
		for edge in &cluster_edges {
			assert!(state.edge_highlight(edge) > 0.99);
		}
	}

	#[test]
	fn hover_on_satellite_highlights_nothing() {
		let mut state = fixture();
		state.set_hover(Some(1));
		run(&mut state, 0.5);

		assert_eq!(state.hovered_hub(), None);
		assert!(!state.has_active_highlight());
		for idx in 0..state.nodes().len() {
			assert_eq!(state.hub_highlight(idx), 0.0);
			assert_eq!(state.satellite_highlight(idx), 0.0);
		}
	}

	#[test]
	fn leave_fades_back_to_idle() {
		let mut state = fixture();
		state.set_hover(Some(0));
		run(&mut state, 1.0);
		state.set_hover(None);

		// Mid-fade the previous cluster is still highlighted.
		run(&mut state, 0.1);
		assert!(state.has_active_highlight());
		assert!(state.satellite_highlight(1) < 1.0);

		run(&mut state, 0.5);
		assert!(!state.has_active_highlight());
		assert_eq!(state.satellite_highlight(1), 0.0);
	}

	#[test]
	fn hub_to_hub_switch_fades_the_old_cluster_out() {
		let mut state = fixture();
		state.set_hover(Some(0));
		run(&mut state, 1.0);

		// Second topic's hub sits at index 5.
		state.set_hover(Some(5));
		state.tick(DT);
		assert_eq!(state.hovered_hub(), Some(5));
		assert!(state.is_highlighted(0));
		let old = state.hub_highlight(0);
		assert!(old > 0.0 && old < 1.0, "old hub not mid-fade: {old}");
		assert!(state.hub_highlight(5) > 0.0);
		let sat = state.satellite_highlight(1);
		assert!(sat > 0.0 && sat < 1.0, "old satellite not mid-fade: {sat}");

		run(&mut state, 0.5);
		assert!(!state.is_highlighted(0));
		assert_eq!(state.hub_highlight(0), 0.0);
		assert!(state.hub_highlight(5) > 0.99);
	}

	#[test]
	fn ripple_orders_satellite_highlight() {
		let mut state = fixture();
		state.set_hover(Some(0));
		// Two frames in, earlier satellites lead later ones.
		state.tick(DT);
		state.tick(DT);
		assert!(state.satellite_highlight(1) >= state.satellite_highlight(4));
		assert!(state.satellite_highlight(1) > 0.0);
	}

	#[test]
	fn drag_pins_then_release_frees_the_node() {
		let mut state = fixture();
		state.begin_drag(2, 100.0, 100.0);
		state.drag_to(160.0, 130.0);
		run(&mut state, 0.2);

		let k = state.viewport.scale();
		let expected_x = state.drag.node_start_x + 60.0 / k;
		let expected_y = state.drag.node_start_y + 30.0 / k;
		assert!((state.nodes()[2].x - expected_x).abs() < 1e-9);
		assert!((state.nodes()[2].y - expected_y).abs() < 1e-9);

		state.end_drag();
		assert!(state.nodes()[2].pin.is_none());
		let (px, py) = (state.nodes()[2].x, state.nodes()[2].y);
		run(&mut state, 0.2);
		let moved = (state.nodes()[2].x - px).abs() + (state.nodes()[2].y - py).abs();
		assert!(moved > 0.0, "released node never moved");
	}

	#[test]
	fn drag_does_not_pan_the_viewport() {
		let mut state = fixture();
		let before = state.viewport.transform();
		state.begin_drag(1, 100.0, 100.0);
		state.drag_to(300.0, 300.0);
		state.end_drag();
		assert_eq!(state.viewport.transform(), before);
	}

	#[test]
	fn pan_moves_the_viewport_only() {
		let mut state = fixture();
		let node_before = (state.nodes()[1].x, state.nodes()[1].y);
		state.begin_pan(50.0, 50.0);
		state.pan_to(80.0, 120.0);
		state.end_pan();
		let t = state.viewport.transform();
		let d = Viewport::default_transform(1000.0, 800.0);
		assert_eq!(t.x, d.x + 30.0);
		assert_eq!(t.y, d.y + 70.0);
		assert_eq!((state.nodes()[1].x, state.nodes()[1].y), node_before);
	}

	#[test]
	fn resize_updates_sim_center_and_positions_stay_finite() {
		let mut state = fixture();
		run(&mut state, 0.3);
		state.resize(600.0, 400.0);
		assert_eq!(state.sim.center(), (300.0, 200.0));
		run(&mut state, 2.0);
		for node in state.nodes() {
			assert!(node.x.is_finite() && node.y.is_finite());
		}
	}

	#[test]
	fn zero_size_container_falls_back_to_default() {
		let state = ClusterGraphState::new(&[topic("a", 1)], 0.0, 0.0, 1);
		assert_eq!((state.width, state.height), FALLBACK_SIZE);

		let mut state = fixture();
		state.resize(0.0, -5.0);
		assert_eq!((state.width, state.height), FALLBACK_SIZE);
	}

	#[test]
	fn empty_dataset_renders_nothing_without_crashing() {
		let mut state = ClusterGraphState::new(&[], 900.0, 600.0, 1);
		run(&mut state, 0.5);
		assert!(state.nodes().is_empty());
		assert_eq!(state.node_at_position(450.0, 300.0), None);
	}

	#[test]
	fn pointer_leave_is_idempotent() {
		let mut state = fixture();
		state.begin_drag(1, 10.0, 10.0);
		state.pointer_leave();
		state.pointer_leave();
		assert!(!state.drag.active);
		assert!(!state.pan.active);
	}

	#[test]
	fn node_at_position_honors_the_transform() {
		let mut state = fixture();
		// Move the hub well away from the seeded cluster so nothing else
		// overlaps it, then look it up through the transform.
		state.sim.nodes[0].x = 1500.0;
		state.sim.nodes[0].y = 1200.0;
		let t = state.viewport.transform();
		let sx = 1500.0 * t.k + t.x;
		let sy = 1200.0 * t.k + t.y;
		let hit = state.node_at_position(sx, sy);
		assert_eq!(hit, Some(0));
		// A point outside every node misses.
		assert_eq!(state.node_at_position(-500.0, -500.0), None);
	}
}
