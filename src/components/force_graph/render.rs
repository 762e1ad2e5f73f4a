use std::f64::consts::PI;

use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

use super::state::{ForceGraphState, NodeInfo};
use crate::graph::{NodeShape, VisualStyle};

fn ease_out_cubic(t: f64) -> f64 {
	1.0 - (1.0 - t).powi(3)
}

pub fn render(state: &ForceGraphState, ctx: &CanvasRenderingContext2d) {
	ctx.set_fill_style_str("#1a1a2e");
	ctx.fill_rect(0.0, 0.0, state.width, state.height);
	ctx.save();
	let _ = ctx.translate(state.transform.x, state.transform.y);
	let _ = ctx.scale(state.transform.k, state.transform.k);
	draw_edges(state, ctx);
	draw_nodes(state, ctx);
	ctx.restore();
}

fn draw_edges(state: &ForceGraphState, ctx: &CanvasRenderingContext2d) {
	let k = state.transform.k;
	let edge = &state.styles.edge;
	let (line_width, dash, gap, arrow_size) = (edge.width / k, 8.0 / k, 4.0 / k, 8.0 / k);
	let dash_offset = -(state.flow_time * 30.0) % (dash + gap);
	let t = ease_out_cubic(state.hover.highlight_t);

	state.graph.visit_edges(|n1, n2, _| {
		let (x1, y1, x2, y2) = (n1.x() as f64, n1.y() as f64, n2.x() as f64, n2.y() as f64);
		let (dx, dy) = (x2 - x1, y2 - y1);
		let dist = (dx * dx + dy * dy).sqrt();
		if dist < 0.001 {
			return;
		}
		let (r1, r2) = (
			state.radius(&n1.data.user_data),
			state.radius(&n2.data.user_data),
		);

		let is_highlighted = state.is_highlighted(n1.index()) && state.is_highlighted(n2.index());

		// t=0: every edge at base alpha; t=1: highlighted edges brighten, others dim
		let (alpha, color, width) = if is_highlighted {
			(0.6 + 0.3 * t, &edge.highlight, line_width * (1.0 + 0.3 * t))
		} else {
			(0.6 - 0.45 * t, &edge.color, line_width * (1.0 - 0.3 * t))
		};
		let head = if edge.arrows { arrow_size } else { 0.0 };

		ctx.set_global_alpha(alpha);
		ctx.set_stroke_style_str(color);
		ctx.set_line_width(width);
		let _ = ctx.set_line_dash(&js_sys::Array::of2(
			&JsValue::from_f64(dash),
			&JsValue::from_f64(gap),
		));
		ctx.set_line_dash_offset(dash_offset);

		let (ux, uy) = (dx / dist, dy / dist);
		ctx.begin_path();
		ctx.move_to(x1 + ux * r1, y1 + uy * r1);
		ctx.line_to(x2 - ux * (r2 + head), y2 - uy * (r2 + head));
		ctx.stroke();
		let _ = ctx.set_line_dash(&js_sys::Array::new());

		if edge.arrows {
			ctx.set_fill_style_str(color);
			let (tip_x, tip_y) = (x2 - ux * r2, y2 - uy * r2);
			let (back_x, back_y) = (tip_x - ux * arrow_size, tip_y - uy * arrow_size);
			let (px, py) = (-uy * arrow_size * 0.5, ux * arrow_size * 0.5);
			ctx.begin_path();
			ctx.move_to(tip_x, tip_y);
			ctx.line_to(back_x + px, back_y + py);
			ctx.line_to(back_x - px, back_y - py);
			ctx.close_path();
			ctx.fill();
		}
	});
	ctx.set_global_alpha(1.0);
	let _ = ctx.set_line_dash(&js_sys::Array::new());
}

fn trace_shape(ctx: &CanvasRenderingContext2d, shape: NodeShape, x: f64, y: f64, r: f64) {
	ctx.begin_path();
	match shape {
		NodeShape::Dot => {
			let _ = ctx.arc(x, y, r, 0.0, 2.0 * PI);
		}
		NodeShape::Diamond => {
			ctx.move_to(x, y - r);
			ctx.line_to(x + r, y);
			ctx.line_to(x, y + r);
			ctx.line_to(x - r, y);
			ctx.close_path();
		}
		NodeShape::Box => {
			ctx.rect(x - r, y - r * 0.7, 2.0 * r, 1.4 * r);
		}
	}
}

fn draw_node(
	ctx: &CanvasRenderingContext2d,
	style: &VisualStyle,
	x: f64,
	y: f64,
	radius: f64,
	k: f64,
) {
	trace_shape(ctx, style.shape, x, y, radius);
	ctx.set_fill_style_str(&style.fill);
	ctx.fill();
	ctx.set_stroke_style_str(&style.border);
	ctx.set_line_width(if style.emphasized {
		style.border_width * 1.5 / k
	} else {
		style.border_width / k
	});
	ctx.stroke();
}

fn draw_label(
	ctx: &CanvasRenderingContext2d,
	info: &NodeInfo,
	style: &VisualStyle,
	x: f64,
	y: f64,
	k: f64,
) {
	if info.label.is_empty() {
		return;
	}
	let font = &style.font;
	let weight = if font.bold { "bold " } else { "" };
	ctx.set_font(&format!(
		"{}{}px sans-serif",
		weight,
		font.size * 0.75 / k.max(0.5)
	));
	ctx.set_text_align("center");
	ctx.set_text_baseline("middle");
	if font.stroke_width > 0.0 {
		ctx.set_line_width(font.stroke_width / k);
		ctx.set_stroke_style_str(&font.stroke_color);
		let _ = ctx.stroke_text(&info.label, x, y);
	}
	ctx.set_fill_style_str(&font.color);
	let _ = ctx.fill_text(&info.label, x, y);
}

fn draw_nodes(state: &ForceGraphState, ctx: &CanvasRenderingContext2d) {
	let (has_highlight, t, k) = (
		state.has_active_highlight(),
		ease_out_cubic(state.hover.highlight_t),
		state.transform.k,
	);

	// emphasized nodes go on top
	for emphasized_pass in [false, true] {
		state.graph.visit_nodes(|node| {
			let idx = node.index();
			let info = &node.data.user_data;
			let style = state.style(info);
			if style.emphasized != emphasized_pass || (has_highlight && state.is_highlighted(idx)) {
				return;
			}
			let (x, y) = (node.x() as f64, node.y() as f64);
			let (alpha, radius) = (1.0 - 0.7 * t, state.radius(info) * (1.0 - 0.15 * t));

			ctx.set_global_alpha(alpha);
			draw_node(ctx, style, x, y, radius, k);
			draw_label(ctx, info, style, x, y, k);
			ctx.set_global_alpha(1.0);
		});
	}

	if !has_highlight {
		return;
	}

	state.graph.visit_nodes(|node| {
		let idx = node.index();
		if !state.is_highlighted(idx) {
			return;
		}
		let info = &node.data.user_data;
		let style = state.style(info);
		let base = state.radius(info);
		let (x, y) = (node.x() as f64, node.y() as f64);
		let is_hovered = state.is_hovered(idx);
		let is_neighbor =
			state.hover.neighbors.contains(&idx) || state.hover.prev_neighbors.contains(&idx);

		let (radius, glow_radius) = if is_hovered {
			(base * (1.0 + 0.35 * t), base * (1.8 + 1.2 * t))
		} else if is_neighbor {
			(base * (1.0 + 0.2 * t), base * (1.4 + 0.6 * t))
		} else {
			(base, 0.0)
		};

		if glow_radius > 0.0 && t > 0.01 {
			if let Ok(gradient) = ctx.create_radial_gradient(x, y, radius * 0.3, x, y, glow_radius) {
				let alpha = if is_hovered { 0.35 * t } else { 0.2 * t };
				let _ = gradient.add_color_stop(0.0, &format!("rgba(255, 255, 255, {})", alpha));
				let _ = gradient
					.add_color_stop(0.6, &format!("rgba(200, 220, 255, {})", alpha * 0.3));
				let _ = gradient.add_color_stop(1.0, "rgba(255, 255, 255, 0)");
				ctx.begin_path();
				let _ = ctx.arc(x, y, glow_radius, 0.0, 2.0 * PI);
				#[allow(deprecated)]
				ctx.set_fill_style(&gradient);
				ctx.fill();
			}
		}

		draw_node(ctx, style, x, y, radius, k);

		if is_hovered && t > 0.01 {
			trace_shape(ctx, style.shape, x, y, radius + 2.0 / k);
			ctx.set_stroke_style_str(&format!("rgba(255, 255, 255, {})", 0.7 * t));
			ctx.set_line_width(1.5 / k);
			ctx.stroke();
		}

		draw_label(ctx, info, style, x, y, k);
	});
}
