//! Canvas drawing for the cluster graph. Consumes the eased highlight
//! factors from the state; no physics or easing lives here.

use std::f64::consts::PI;

use web_sys::CanvasRenderingContext2d;

use super::state::ClusterGraphState;
use super::types::{GraphNode, NodeKind};

/// Brand orange used for hubs, edges, and accents.
const MAIN_COLOR: (u8, u8, u8) = (255, 122, 0);
/// Keyword labels longer than this are truncated.
const LABEL_MAX_CHARS: usize = 15;

fn rgba((r, g, b): (u8, u8, u8), a: f64) -> String {
	format!("rgba({r}, {g}, {b}, {a})")
}

fn truncate_label(name: &str) -> String {
	if name.chars().count() > LABEL_MAX_CHARS {
		let head: String = name.chars().take(LABEL_MAX_CHARS).collect();
		format!("{head}..")
	} else {
		name.to_string()
	}
}

/// Draw one frame.
pub fn render(state: &ClusterGraphState, ctx: &CanvasRenderingContext2d) {
	ctx.set_fill_style_str("#050505");
	ctx.fill_rect(0.0, 0.0, state.width, state.height);

	ctx.save();
	let t = state.viewport.transform();
	let _ = ctx.translate(t.x, t.y);
	let _ = ctx.scale(t.k, t.k);

	draw_edges(state, ctx);
	draw_nodes(state, ctx);
	ctx.restore();
}

fn draw_edges(state: &ClusterGraphState, ctx: &CanvasRenderingContext2d) {
	for edge in &state.edges {
		let source = &state.nodes()[edge.source];
		let target = &state.nodes()[edge.target];
		let t = state.edge_highlight(edge);

		ctx.set_stroke_style_str(&rgba(MAIN_COLOR, 0.2 + 0.4 * t));
		ctx.set_line_width(1.0 + 0.5 * t);
		ctx.begin_path();
		ctx.move_to(source.x, source.y);
		ctx.line_to(target.x, target.y);
		ctx.stroke();
	}
}

fn draw_nodes(state: &ClusterGraphState, ctx: &CanvasRenderingContext2d) {
	// Two passes: the highlighted cluster draws last so it sits in front.
	for (idx, node) in state.nodes().iter().enumerate() {
		if !state.is_highlighted(idx) {
			draw_node(state, ctx, idx, node);
		}
	}
	if state.has_active_highlight() {
		for (idx, node) in state.nodes().iter().enumerate() {
			if state.is_highlighted(idx) {
				draw_node(state, ctx, idx, node);
			}
		}
	}
}

fn draw_node(
	state: &ClusterGraphState,
	ctx: &CanvasRenderingContext2d,
	idx: usize,
	node: &GraphNode,
) {
	match node.kind {
		NodeKind::Hub => draw_hub(ctx, node, state.hub_highlight(idx)),
		NodeKind::Satellite => draw_satellite(ctx, node, state.satellite_highlight(idx)),
	}
}

fn draw_hub(ctx: &CanvasRenderingContext2d, node: &GraphNode, t: f64) {
	let r = node.radius * (1.0 + 0.2 * t);

	// Glassy orb: radial gradient offset toward the upper left.
	if let Ok(gradient) = ctx.create_radial_gradient(
		node.x - r * 0.2,
		node.y - r * 0.2,
		r * 0.1,
		node.x,
		node.y,
		r,
	) {
		let _ = gradient.add_color_stop(0.0, &rgba(MAIN_COLOR, 0.6));
		let _ = gradient.add_color_stop(1.0, &rgba(MAIN_COLOR, 0.2));
		ctx.set_fill_style_canvas_gradient(&gradient);
		ctx.begin_path();
		let _ = ctx.arc(node.x, node.y, r, 0.0, 2.0 * PI);
		ctx.fill();
	}

	// Stroke shifts white→orange as the highlight ramps in.
	let stroke = if t > 0.0 {
		rgba(MAIN_COLOR, 0.4 + 0.6 * t)
	} else {
		"rgba(255, 255, 255, 0.4)".to_string()
	};
	ctx.set_stroke_style_str(&stroke);
	ctx.set_line_width(1.0 + t);
	ctx.begin_path();
	let _ = ctx.arc(node.x, node.y, r, 0.0, 2.0 * PI);
	ctx.stroke();

	// Topic label in a dark pill above the orb.
	let label = node.name.to_uppercase();
	ctx.set_font("700 11px 'Inter', sans-serif");
	ctx.set_text_align("center");
	let label_y = node.y - r - 14.0;
	let approx_width = label.chars().count() as f64 * 7.5 + 16.0;
	ctx.set_fill_style_str("rgba(0, 0, 0, 0.8)");
	ctx.fill_rect(node.x - approx_width / 2.0, label_y - 11.0, approx_width, 18.0);
	ctx.set_fill_style_str(&if t > 0.0 {
		rgba(MAIN_COLOR, 0.6 + 0.4 * t)
	} else {
		"#ffffff".to_string()
	});
	let _ = ctx.fill_text(&label, node.x, label_y + 3.0);
}

fn draw_satellite(ctx: &CanvasRenderingContext2d, node: &GraphNode, t: f64) {
	let r = node.radius * (1.0 + 0.5 * t);

	ctx.set_fill_style_str(&format!("rgba(255, 255, 255, {})", 0.8 + 0.2 * t));
	ctx.begin_path();
	let _ = ctx.arc(node.x, node.y, r, 0.0, 2.0 * PI);
	ctx.fill();

	// Keyword label centered on the dot, zinc grey at rest, white when lit.
	let channel = |from: f64| (from + (255.0 - from) * t) as u32;
	ctx.set_font("9px 'Inter', sans-serif");
	ctx.set_text_align("center");
	ctx.set_fill_style_str(&format!(
		"rgba({}, {}, {}, {})",
		channel(161.0),
		channel(161.0),
		channel(170.0),
		0.7 + 0.3 * t
	));
	let _ = ctx.fill_text(&truncate_label(&node.name), node.x, node.y + 3.0);
}
