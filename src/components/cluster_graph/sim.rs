//! Force relaxation over the node arena.
//!
//! Five forces act each tick: link attraction, pairwise charge repulsion,
//! whole-system centering, weak per-axis centering, and circle collision. A
//! decaying temperature (alpha) scales the link, charge, and axis forces so
//! the system settles instead of oscillating forever. Charge and collision
//! are O(n²) per tick, which is fine at the few hundred nodes this renders.

use crate::rng::Lcg;

use super::types::{GraphEdge, GraphNode, NodeKind};

/// Alpha below which the simulation counts as settled.
pub const ALPHA_MIN: f64 = 0.001;
/// Alpha target held while a node is dragged, so neighbors keep reacting.
pub const DRAG_ALPHA_TARGET: f64 = 0.3;
/// Per-tick exponential approach rate of alpha toward its target. Settles
/// from 1.0 to ALPHA_MIN in roughly 300 ticks.
const ALPHA_DECAY: f64 = 0.0228;
/// Velocity retained per tick after integration.
const VELOCITY_DECAY: f64 = 0.6;
/// Alpha restored when the layout is disturbed (resize, drag start).
const REHEAT_ALPHA: f64 = 0.3;

/// Tuning constants for the five forces.
#[derive(Clone, Copy, Debug)]
pub struct LayoutParams {
	/// Rest distance of hub–satellite links.
	pub link_distance: f64,
	/// Link spring strength; weak so clusters stay loose.
	pub link_strength: f64,
	/// Repulsion of hub nodes (negative).
	pub hub_charge: f64,
	/// Repulsion of satellite nodes (negative).
	pub satellite_charge: f64,
	/// Strength of the whole-system centering shift.
	pub center_strength: f64,
	/// Strength of the independent per-axis pull toward center.
	pub axis_strength: f64,
	/// Collision correction strength.
	pub collide_strength: f64,
	/// Collision radius multiplier applied to each node radius.
	pub collide_factor: f64,
	/// Flat margin added to each collision radius.
	pub collide_margin: f64,
}

impl Default for LayoutParams {
	fn default() -> Self {
		Self {
			link_distance: 70.0,
			link_strength: 0.15,
			hub_charge: -350.0,
			satellite_charge: -20.0,
			center_strength: 0.8,
			axis_strength: 0.025,
			collide_strength: 0.5,
			collide_factor: 1.1,
			collide_margin: 5.0,
		}
	}
}

struct Link {
	source: usize,
	target: usize,
	/// Share of each correction applied to the target; degree-weighted so a
	/// well-connected hub moves less than its satellites.
	bias: f64,
}

/// Owns the node arena and advances it tick by tick. Input handlers mutate
/// nodes in place through [`Simulation::pin`]/[`Simulation::unpin`] so the
/// tick loop and the handlers always agree on one authoritative node list.
pub struct Simulation {
	/// The node arena. Indices are stable for the lifetime of one dataset.
	pub nodes: Vec<GraphNode>,
	links: Vec<Link>,
	params: LayoutParams,
	alpha: f64,
	alpha_target: f64,
	cx: f64,
	cy: f64,
	rng: Lcg,
}

impl Simulation {
	/// Take ownership of a freshly built arena.
	pub fn new(
		nodes: Vec<GraphNode>,
		edges: &[GraphEdge],
		cx: f64,
		cy: f64,
		params: LayoutParams,
	) -> Self {
		let mut degree = vec![0usize; nodes.len()];
		for edge in edges {
			degree[edge.source] += 1;
			degree[edge.target] += 1;
		}
		let links = edges
			.iter()
			.map(|edge| Link {
				source: edge.source,
				target: edge.target,
				bias: degree[edge.source] as f64
					/ (degree[edge.source] + degree[edge.target]) as f64,
			})
			.collect();
		Self {
			nodes,
			links,
			params,
			alpha: 1.0,
			alpha_target: 0.0,
			cx,
			cy,
			rng: Lcg::new(97),
		}
	}

	/// Current temperature.
	pub fn alpha(&self) -> f64 {
		self.alpha
	}

	/// Floor that alpha decays toward; nonzero while dragging.
	pub fn set_alpha_target(&mut self, target: f64) {
		self.alpha_target = target;
	}

	/// Raise the temperature so the layout re-settles after a disturbance.
	pub fn reheat(&mut self) {
		self.alpha = self.alpha.max(REHEAT_ALPHA);
	}

	/// Move the centering target, e.g. after a viewport resize.
	pub fn set_center(&mut self, cx: f64, cy: f64) {
		self.cx = cx;
		self.cy = cy;
	}

	/// Current centering target.
	pub fn center(&self) -> (f64, f64) {
		(self.cx, self.cy)
	}

	/// True once alpha has decayed below [`ALPHA_MIN`] with no drag active.
	pub fn is_settled(&self) -> bool {
		self.alpha < ALPHA_MIN && self.alpha_target < ALPHA_MIN
	}

	/// Fix a node at a position; it ignores forces until unpinned.
	pub fn pin(&mut self, idx: usize, x: f64, y: f64) {
		if let Some(node) = self.nodes.get_mut(idx) {
			node.pin = Some((x, y));
		}
	}

	/// Release a pinned node back to the force field.
	pub fn unpin(&mut self, idx: usize) {
		if let Some(node) = self.nodes.get_mut(idx) {
			node.pin = None;
		}
	}

	/// Advance one step. Returns false when the system is settled and no
	/// work was done.
	pub fn tick(&mut self) -> bool {
		if self.is_settled() {
			return false;
		}
		self.alpha += (self.alpha_target - self.alpha) * ALPHA_DECAY;

		self.apply_links();
		self.apply_charge();
		self.apply_axes();
		self.apply_collisions();
		self.apply_centering();

		for node in &mut self.nodes {
			if let Some((fx, fy)) = node.pin {
				node.x = fx;
				node.y = fy;
				node.vx = 0.0;
				node.vy = 0.0;
			} else {
				node.vx *= VELOCITY_DECAY;
				node.vy *= VELOCITY_DECAY;
				node.x += node.vx;
				node.y += node.vy;
			}
		}
		true
	}

	/// Sub-pixel displacement used when two nodes coincide exactly.
	fn jiggle(&mut self) -> f64 {
		(self.rng.next_f64() - 0.5) * 1e-6
	}

	fn apply_links(&mut self) {
		let alpha = self.alpha;
		for li in 0..self.links.len() {
			let (source, target, bias) = {
				let link = &self.links[li];
				(link.source, link.target, link.bias)
			};
			let (sx, sy, svx, svy) = {
				let s = &self.nodes[source];
				(s.x, s.y, s.vx, s.vy)
			};
			let (tx, ty, tvx, tvy) = {
				let t = &self.nodes[target];
				(t.x, t.y, t.vx, t.vy)
			};
			let mut dx = tx + tvx - sx - svx;
			let mut dy = ty + tvy - sy - svy;
			if dx == 0.0 && dy == 0.0 {
				dx = self.jiggle();
				dy = self.jiggle();
			}
			let len = (dx * dx + dy * dy).sqrt();
			let scale =
				(len - self.params.link_distance) / len * alpha * self.params.link_strength;
			dx *= scale;
			dy *= scale;
			self.nodes[target].vx -= dx * bias;
			self.nodes[target].vy -= dy * bias;
			self.nodes[source].vx += dx * (1.0 - bias);
			self.nodes[source].vy += dy * (1.0 - bias);
		}
	}

	fn apply_charge(&mut self) {
		let alpha = self.alpha;
		let n = self.nodes.len();
		for i in 0..n {
			let (xi, yi) = (self.nodes[i].x, self.nodes[i].y);
			let mut fx = 0.0;
			let mut fy = 0.0;
			for j in 0..n {
				if i == j {
					continue;
				}
				let strength = match self.nodes[j].kind {
					NodeKind::Hub => self.params.hub_charge,
					NodeKind::Satellite => self.params.satellite_charge,
				};
				let mut dx = self.nodes[j].x - xi;
				let mut dy = self.nodes[j].y - yi;
				if dx == 0.0 && dy == 0.0 {
					dx = self.jiggle();
					dy = self.jiggle();
				}
				// Clamp the squared distance to keep close pairs finite.
				let l2 = (dx * dx + dy * dy).max(1.0);
				let w = strength * alpha / l2;
				fx += dx * w;
				fy += dy * w;
			}
			self.nodes[i].vx += fx;
			self.nodes[i].vy += fy;
		}
	}

	fn apply_axes(&mut self) {
		let k = self.params.axis_strength * self.alpha;
		let (cx, cy) = (self.cx, self.cy);
		for node in &mut self.nodes {
			node.vx += (cx - node.x) * k;
			node.vy += (cy - node.y) * k;
		}
	}

	/// Shift the whole system so its mean position tracks the center. Acts on
	/// positions directly and does not scale with alpha.
	fn apply_centering(&mut self) {
		if self.nodes.is_empty() {
			return;
		}
		let n = self.nodes.len() as f64;
		let mean_x = self.nodes.iter().map(|node| node.x).sum::<f64>() / n;
		let mean_y = self.nodes.iter().map(|node| node.y).sum::<f64>() / n;
		let dx = (mean_x - self.cx) * self.params.center_strength;
		let dy = (mean_y - self.cy) * self.params.center_strength;
		for node in &mut self.nodes {
			node.x -= dx;
			node.y -= dy;
		}
	}

	fn collide_radius(&self, idx: usize) -> f64 {
		self.nodes[idx].radius * self.params.collide_factor + self.params.collide_margin
	}

	fn apply_collisions(&mut self) {
		let n = self.nodes.len();
		for i in 0..n {
			let ri = self.collide_radius(i);
			let xi = self.nodes[i].x + self.nodes[i].vx;
			let yi = self.nodes[i].y + self.nodes[i].vy;
			for j in (i + 1)..n {
				let rj = self.collide_radius(j);
				let xj = self.nodes[j].x + self.nodes[j].vx;
				let yj = self.nodes[j].y + self.nodes[j].vy;
				let mut dx = xi - xj;
				let mut dy = yi - yj;
				if dx == 0.0 && dy == 0.0 {
					dx = self.jiggle();
					dy = self.jiggle();
				}
				let l2 = dx * dx + dy * dy;
				let r = ri + rj;
				if l2 >= r * r {
					continue;
				}
				let len = l2.sqrt().max(1e-9);
				let push = (r - len) / len * self.params.collide_strength;
				let (px, py) = (dx * push, dy * push);
				// Lighter node takes the larger share of the correction.
				let share = rj * rj / (ri * ri + rj * rj);
				self.nodes[i].vx += px * share;
				self.nodes[i].vy += py * share;
				self.nodes[j].vx -= px * (1.0 - share);
				self.nodes[j].vy -= py * (1.0 - share);
			}
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::cluster_graph::build::build_graph;
	use crate::data::{Entry, Topic};

	fn fixture(keywords_per_topic: &[usize]) -> Simulation {
		let topics: Vec<Topic> = keywords_per_topic
			.iter()
			.enumerate()
			.map(|(t, &n)| Topic {
				topic: format!("t{t}"),
				entries: (0..n)
					.map(|k| Entry {
						keyword: Some(format!("k{k}")),
						prompt: "p".to_string(),
					})
					.collect(),
			})
			.collect();
		let graph = build_graph(&topics, 1000.0, 800.0, &mut Lcg::new(5));
		Simulation::new(
			graph.nodes,
			&graph.edges,
			500.0,
			400.0,
			LayoutParams::default(),
		)
	}

	fn assert_finite(sim: &Simulation) {
		for node in &sim.nodes {
			assert!(node.x.is_finite(), "x became non-finite");
			assert!(node.y.is_finite(), "y became non-finite");
			assert!(node.vx.is_finite() && node.vy.is_finite());
		}
	}

	#[test]
	fn settles_within_bounded_ticks() {
		let mut sim = fixture(&[4, 3]);
		let mut ticks = 0;
		while sim.tick() {
			ticks += 1;
			assert!(ticks < 1000, "simulation never settled");
		}
		assert!(sim.is_settled());
		assert_finite(&sim);
	}

	#[test]
	fn settled_tick_reports_no_work() {
		let mut sim = fixture(&[2]);
		while sim.tick() {}
		assert!(!sim.tick());
	}

	#[test]
	fn reheat_restarts_a_settled_simulation() {
		let mut sim = fixture(&[2]);
		while sim.tick() {}
		sim.reheat();
		assert!(sim.tick());
	}

	#[test]
	fn drag_alpha_target_keeps_simulation_hot() {
		let mut sim = fixture(&[3]);
		sim.set_alpha_target(DRAG_ALPHA_TARGET);
		for _ in 0..500 {
			assert!(sim.tick());
		}
		assert!(sim.alpha() >= DRAG_ALPHA_TARGET - 0.05);
	}

	#[test]
	fn pinned_node_stays_put_and_moves_after_release() {
		let mut sim = fixture(&[4]);
		sim.pin(0, 120.0, 130.0);
		sim.set_alpha_target(DRAG_ALPHA_TARGET);
		for _ in 0..10 {
			sim.tick();
		}
		assert_eq!(sim.nodes[0].x, 120.0);
		assert_eq!(sim.nodes[0].y, 130.0);

		sim.unpin(0);
		sim.set_alpha_target(0.0);
		sim.reheat();
		for _ in 0..10 {
			sim.tick();
		}
		let moved = (sim.nodes[0].x - 120.0).abs() + (sim.nodes[0].y - 130.0).abs();
		assert!(moved > 0.0, "released node never moved");
	}

	#[test]
	fn resize_mid_simulation_retargets_center_without_nan() {
		let mut sim = fixture(&[4, 2]);
		for _ in 0..20 {
			sim.tick();
		}
		sim.set_center(800.0, 100.0);
		sim.reheat();
		assert_eq!(sim.center(), (800.0, 100.0));
		for _ in 0..200 {
			sim.tick();
		}
		assert_finite(&sim);

		// Centering tracks the new midpoint.
		let n = sim.nodes.len() as f64;
		let mean_x = sim.nodes.iter().map(|node| node.x).sum::<f64>() / n;
		let mean_y = sim.nodes.iter().map(|node| node.y).sum::<f64>() / n;
		assert!((mean_x - 800.0).abs() < 10.0);
		assert!((mean_y - 100.0).abs() < 10.0);
	}

	#[test]
	fn coincident_nodes_separate() {
		let mut sim = fixture(&[2]);
		let (x, y) = (sim.nodes[1].x, sim.nodes[1].y);
		sim.nodes[2].x = x;
		sim.nodes[2].y = y;
		for _ in 0..60 {
			sim.tick();
		}
		let dx = sim.nodes[1].x - sim.nodes[2].x;
		let dy = sim.nodes[1].y - sim.nodes[2].y;
		assert!((dx * dx + dy * dy).sqrt() > 1.0);
		assert_finite(&sim);
	}

	#[test]
	fn empty_arena_is_harmless() {
		let mut sim = Simulation::new(Vec::new(), &[], 400.0, 300.0, LayoutParams::default());
		for _ in 0..5 {
			sim.tick();
		}
		assert!(sim.nodes.is_empty());
	}
}
