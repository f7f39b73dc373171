//! Graph model shared by the builder, the simulation, and the renderer.

/// Viewport width below which the compact layout constants apply.
pub const NARROW_BREAKPOINT: f64 = 768.0;
/// Hub radius on narrow viewports.
pub const HUB_RADIUS_NARROW: f64 = 45.0;
/// Hub radius on wide viewports.
pub const HUB_RADIUS_WIDE: f64 = 65.0;
/// Satellite radii are drawn uniformly from `[MIN, MIN + SPREAD)`.
pub const SATELLITE_RADIUS_MIN: f64 = 6.0;
/// Width of the satellite radius range.
pub const SATELLITE_RADIUS_SPREAD: f64 = 6.0;

/// Whether a node anchors a cluster or orbits one.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NodeKind {
	/// One per topic; the cluster anchor.
	Hub,
	/// One per keyword, linked to its topic's hub.
	Satellite,
}

/// One node in the simulation arena. Position and velocity are mutated in
/// place by the layout engine; `pin` holds a fixed position while the node is
/// dragged.
#[derive(Clone, Debug)]
pub struct GraphNode {
	/// Stable unique id, derived from the topic name.
	pub id: String,
	/// Display label.
	pub name: String,
	/// Hub or satellite.
	pub kind: NodeKind,
	/// Owning topic name; satellites share their hub's group.
	pub group: String,
	/// Draw/collision radius, fixed after build.
	pub radius: f64,
	/// Current x position.
	pub x: f64,
	/// Current y position.
	pub y: f64,
	/// Current x velocity.
	pub vx: f64,
	/// Current y velocity.
	pub vy: f64,
	/// Fixed position while dragging; `None` when free.
	pub pin: Option<(f64, f64)>,
}

impl GraphNode {
	/// True for cluster anchor nodes.
	pub fn is_hub(&self) -> bool {
		self.kind == NodeKind::Hub
	}
}

/// Hub→satellite edge as indices into the node arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GraphEdge {
	/// Arena index of the hub.
	pub source: usize,
	/// Arena index of the satellite.
	pub target: usize,
}
