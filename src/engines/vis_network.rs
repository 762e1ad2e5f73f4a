//! vis-network backend: per-node inline style attributes plus Barnes-Hut
//! physics options.

use serde_json::{Value, json};
use wasm_bindgen::prelude::*;
use web_sys::HtmlElement;

use super::web::{global_function, js_error_message, to_js};
use crate::graph::{
	EdgeStyle, EngineKind, GraphDataset, InteractionConfig, LayoutConfig, MountRequest, NodeShape,
	NodeSpec, RenderEngine, RenderError, StyleRules, ViewHandle, VisualStyle,
};

#[wasm_bindgen]
extern "C" {
	type Network;

	#[wasm_bindgen(constructor, catch, js_namespace = vis)]
	fn new(container: &HtmlElement, data: &JsValue, options: &JsValue) -> Result<Network, JsValue>;

	#[wasm_bindgen(method)]
	fn destroy(this: &Network);
}

/// Mounts through the global `vis.Network` constructor.
pub struct VisNetworkEngine;

impl RenderEngine<HtmlElement> for VisNetworkEngine {
	fn kind(&self) -> EngineKind {
		EngineKind::VisNetwork
	}

	fn is_available(&self) -> bool {
		global_function(&["vis", "Network"])
	}

	fn mount(
		&self,
		container: &HtmlElement,
		request: MountRequest<'_>,
	) -> Result<Box<dyn ViewHandle>, RenderError> {
		let js_data = to_js(&data(request.dataset, request.styles))?;
		let js_options = to_js(&options(request.styles, request.layout, request.interaction))?;
		let network = Network::new(container, &js_data, &js_options)
			.map_err(|e| RenderError::construction(EngineKind::VisNetwork, js_error_message(&e)))?;
		Ok(Box::new(VisNetworkView { network }))
	}
}

struct VisNetworkView {
	network: Network,
}

impl ViewHandle for VisNetworkView {
	fn engine(&self) -> EngineKind {
		EngineKind::VisNetwork
	}

	fn destroy(self: Box<Self>) {
		self.network.destroy();
	}
}

fn shape_name(shape: NodeShape) -> &'static str {
	match shape {
		NodeShape::Diamond => "diamond",
		NodeShape::Dot => "dot",
		NodeShape::Box => "box",
	}
}

/// Neutralises the markup vis recognises in `multi: "html"` labels.
fn escape_markup(text: &str) -> String {
	let mut out = String::with_capacity(text.len());
	for c in text.chars() {
		match c {
			'&' => out.push_str("&amp;"),
			'<' => out.push_str("&lt;"),
			'>' => out.push_str("&gt;"),
			_ => out.push(c),
		}
	}
	out
}

fn node(spec: &NodeSpec, style: &VisualStyle) -> Value {
	// Bold labels need vis' html label markup.
	let (label, multi) = if style.font.bold {
		(format!("<b>{}</b>", escape_markup(&spec.label)), json!("html"))
	} else {
		(spec.label.clone(), json!(false))
	};
	json!({
		"id": spec.id,
		"label": label,
		"title": spec.label,
		"shape": shape_name(style.shape),
		"size": style.size,
		"borderWidth": style.border_width,
		"shadow": style.shadow,
		"color": {
			"background": style.fill,
			"border": style.border,
			"highlight": { "background": style.fill, "border": style.border },
		},
		"font": {
			"size": style.font.size,
			"color": style.font.color,
			"strokeWidth": style.font.stroke_width,
			"strokeColor": style.font.stroke_color,
			"multi": multi,
		},
	})
}

/// `{nodes, edges}` with every node's style resolved inline.
pub fn data(dataset: &GraphDataset, styles: &StyleRules) -> Value {
	let nodes: Vec<Value> = dataset
		.nodes
		.iter()
		.map(|spec| node(spec, styles.style_for(spec.group)))
		.collect();
	let edges: Vec<Value> = dataset
		.edges
		.iter()
		.enumerate()
		.map(|(i, edge)| json!({ "id": edge.id_or_derived(i), "from": edge.source, "to": edge.target }))
		.collect();
	json!({ "nodes": nodes, "edges": edges })
}

fn edge_options(edge: &EdgeStyle) -> Value {
	json!({
		"width": edge.width,
		"color": { "color": edge.color, "highlight": edge.highlight, "hover": edge.highlight },
		"arrows": { "to": { "enabled": edge.arrows } },
		"smooth": { "enabled": edge.smooth, "type": "dynamic", "roundness": 0.5 },
	})
}

/// Edge, Barnes-Hut physics and interaction options.
pub fn options(styles: &StyleRules, layout: &LayoutConfig, interaction: &InteractionConfig) -> Value {
	let mut value = json!({
		"edges": edge_options(&styles.edge),
		"physics": {
			"enabled": true,
			"solver": "barnesHut",
			"barnesHut": {
				"gravitationalConstant": -layout.repulsion,
				"centralGravity": layout.gravity,
				"springLength": layout.ideal_edge_length,
				"springConstant": layout.spring_constant,
				"damping": layout.damping,
				"avoidOverlap": layout.avoid_overlap,
			},
			"stabilization": { "iterations": layout.iterations, "fit": layout.fit },
		},
		"interaction": {
			"hover": interaction.hover,
			"tooltipDelay": interaction.tooltip_delay_ms,
			"hideEdgesOnDrag": interaction.hide_edges_on_drag,
			"navigationButtons": interaction.navigation_buttons,
		},
		"layout": {},
	});
	if let Some(seed) = layout.random_seed {
		value["layout"]["randomSeed"] = json!(seed);
	}
	value
}
