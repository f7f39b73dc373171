//! Flattens the topic hierarchy into a node arena and an edge list.

use log::debug;

use crate::data::Topic;
use crate::rng::Lcg;

use super::types::{
	GraphEdge, GraphNode, HUB_RADIUS_NARROW, HUB_RADIUS_WIDE, NARROW_BREAKPOINT, NodeKind,
	SATELLITE_RADIUS_MIN, SATELLITE_RADIUS_SPREAD,
};

/// Seed jitter half-width for hub positions.
const HUB_JITTER: f64 = 25.0;
/// Seed jitter half-width for satellite positions.
const SATELLITE_JITTER: f64 = 100.0;

/// Node arena plus edges produced from one dataset.
pub struct BuiltGraph {
	/// All nodes; hubs precede their own satellites.
	pub nodes: Vec<GraphNode>,
	/// Hub→satellite links.
	pub edges: Vec<GraphEdge>,
}

/// Hub radius for the given viewport width.
pub fn hub_radius(width: f64) -> f64 {
	if width < NARROW_BREAKPOINT {
		HUB_RADIUS_NARROW
	} else {
		HUB_RADIUS_WIDE
	}
}

/// Build the node/edge sets for one dataset. One hub per topic; one satellite
/// and one edge per keyword-bearing entry. Everything is seeded near the
/// viewport center so the layout starts from a sane configuration.
pub fn build_graph(topics: &[Topic], width: f64, height: f64, rng: &mut Lcg) -> BuiltGraph {
	let (cx, cy) = (width / 2.0, height / 2.0);
	let hub_r = hub_radius(width);
	let mut nodes = Vec::new();
	let mut edges = Vec::new();

	for topic in topics {
		let hub = nodes.len();
		nodes.push(GraphNode {
			id: format!("topic-{}", topic.topic),
			name: topic.topic.clone(),
			kind: NodeKind::Hub,
			group: topic.topic.clone(),
			radius: hub_r,
			x: cx + rng.range(-HUB_JITTER, HUB_JITTER),
			y: cy + rng.range(-HUB_JITTER, HUB_JITTER),
			vx: 0.0,
			vy: 0.0,
			pin: None,
		});

		// Prompt-only entries carry no keyword and contribute nothing here.
		let keywords = topic.entries.iter().filter_map(|e| e.keyword.as_deref());
		for (i, keyword) in keywords.enumerate() {
			let target = nodes.len();
			nodes.push(GraphNode {
				id: format!("kw-{}-{}", topic.topic, i),
				name: keyword.to_string(),
				kind: NodeKind::Satellite,
				group: topic.topic.clone(),
				radius: SATELLITE_RADIUS_MIN + rng.next_f64() * SATELLITE_RADIUS_SPREAD,
				x: cx + rng.range(-SATELLITE_JITTER, SATELLITE_JITTER),
				y: cy + rng.range(-SATELLITE_JITTER, SATELLITE_JITTER),
				vx: 0.0,
				vy: 0.0,
				pin: None,
			});
			edges.push(GraphEdge {
				source: hub,
				target,
			});
		}
	}

	debug!(
		"built cluster graph: {} nodes, {} edges",
		nodes.len(),
		edges.len()
	);
	BuiltGraph { nodes, edges }
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::data::Entry;

	fn topic(name: &str, keywords: &[Option<&str>]) -> Topic {
		Topic {
			topic: name.to_string(),
			entries: keywords
				.iter()
				.map(|k| Entry {
					keyword: k.map(str::to_string),
					prompt: "p".to_string(),
				})
				.collect(),
		}
	}

	fn build(topics: &[Topic]) -> BuiltGraph {
		build_graph(topics, 1024.0, 768.0, &mut Lcg::new(1))
	}

	#[test]
	fn one_hub_per_topic_with_unique_ids() {
		let topics = vec![
			topic("a", &[Some("k1")]),
			topic("b", &[]),
			topic("c", &[Some("k2"), Some("k3")]),
		];
		let graph = build(&topics);
		let hubs: Vec<_> = graph.nodes.iter().filter(|n| n.is_hub()).collect();
		assert_eq!(hubs.len(), topics.len());
		for (i, a) in hubs.iter().enumerate() {
			for b in &hubs[i + 1..] {
				assert_ne!(a.id, b.id);
			}
		}
	}

	#[test]
	fn null_keywords_produce_no_satellites_or_edges() {
		let topics = vec![topic("a", &[Some("k1"), None, Some("k2"), None])];
		let graph = build(&topics);
		let satellites = graph
			.nodes
			.iter()
			.filter(|n| n.kind == NodeKind::Satellite)
			.count();
		assert_eq!(satellites, 2);
		assert_eq!(graph.edges.len(), 2);
	}

	#[test]
	fn edges_connect_hub_to_satellite_in_same_group() {
		let topics = vec![
			topic("a", &[Some("k1"), Some("k2")]),
			topic("b", &[Some("k3")]),
		];
		let graph = build(&topics);
		for edge in &graph.edges {
			let source = &graph.nodes[edge.source];
			let target = &graph.nodes[edge.target];
			assert_eq!(source.kind, NodeKind::Hub);
			assert_eq!(target.kind, NodeKind::Satellite);
			assert_eq!(source.group, target.group);
		}
	}

	#[test]
	fn two_topic_scenario() {
		// 2 topics, one with 3 keywords, one with none.
		let topics = vec![
			topic("a", &[Some("k1"), Some("k2"), Some("k3")]),
			topic("b", &[None]),
		];
		let graph = build(&topics);
		let hubs: Vec<usize> = graph
			.nodes
			.iter()
			.enumerate()
			.filter(|(_, n)| n.is_hub())
			.map(|(i, _)| i)
			.collect();
		assert_eq!(hubs.len(), 2);
		assert_eq!(graph.edges.len(), 3);
		let satellites = graph
			.nodes
			.iter()
			.filter(|n| n.kind == NodeKind::Satellite)
			.count();
		assert_eq!(satellites, 3);
		let hub_without_edges = hubs
			.iter()
			.filter(|&&h| graph.edges.iter().all(|e| e.source != h))
			.count();
		assert_eq!(hub_without_edges, 1);
	}

	#[test]
	fn seeding_stays_near_center_without_nan() {
		let topics = vec![topic("a", &[Some("k1"), Some("k2")])];
		let graph = build_graph(&topics, 1000.0, 800.0, &mut Lcg::new(9));
		for node in &graph.nodes {
			assert!(node.x.is_finite() && node.y.is_finite());
			let jitter = match node.kind {
				NodeKind::Hub => HUB_JITTER,
				NodeKind::Satellite => SATELLITE_JITTER,
			};
			assert!((node.x - 500.0).abs() <= jitter);
			assert!((node.y - 400.0).abs() <= jitter);
		}
	}

	#[test]
	fn hub_radius_follows_breakpoint() {
		let topics = vec![topic("a", &[])];
		let narrow = build_graph(&topics, 500.0, 800.0, &mut Lcg::new(1));
		let wide = build_graph(&topics, 1200.0, 800.0, &mut Lcg::new(1));
		assert_eq!(narrow.nodes[0].radius, HUB_RADIUS_NARROW);
		assert_eq!(wide.nodes[0].radius, HUB_RADIUS_WIDE);
	}

	#[test]
	fn empty_dataset_builds_empty_graph() {
		let graph = build(&[]);
		assert!(graph.nodes.is_empty());
		assert!(graph.edges.is_empty());
	}
}
