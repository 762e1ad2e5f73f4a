//! cytoscape.js backend: grouped selector stylesheet plus a `cose` layout.

use serde_json::{Map, Value, json};
use wasm_bindgen::prelude::*;
use web_sys::HtmlElement;

use super::web::{global_function, js_error_message, to_js};
use crate::graph::{
	EngineKind, GraphDataset, LayoutConfig, MountRequest, NodeShape, RenderEngine, RenderError,
	StyleRules, ViewHandle, VisualStyle,
};

#[wasm_bindgen]
extern "C" {
	type Core;

	#[wasm_bindgen(catch, js_name = cytoscape)]
	fn cytoscape(options: &JsValue) -> Result<Core, JsValue>;

	#[wasm_bindgen(method)]
	fn destroy(this: &Core);
}

/// Mounts through the global `cytoscape()` factory.
pub struct CytoscapeEngine;

impl RenderEngine<HtmlElement> for CytoscapeEngine {
	fn kind(&self) -> EngineKind {
		EngineKind::Cytoscape
	}

	fn is_available(&self) -> bool {
		global_function(&["cytoscape"])
	}

	fn mount(
		&self,
		container: &HtmlElement,
		request: MountRequest<'_>,
	) -> Result<Box<dyn ViewHandle>, RenderError> {
		let js_options = to_js(&options(request))?;
		js_sys::Reflect::set(&js_options, &JsValue::from_str("container"), container)
			.map_err(|e| RenderError::construction(EngineKind::Cytoscape, js_error_message(&e)))?;
		let core = cytoscape(&js_options)
			.map_err(|e| RenderError::construction(EngineKind::Cytoscape, js_error_message(&e)))?;
		Ok(Box::new(CytoscapeView { core }))
	}
}

struct CytoscapeView {
	core: Core,
}

impl ViewHandle for CytoscapeView {
	fn engine(&self) -> EngineKind {
		EngineKind::Cytoscape
	}

	fn destroy(self: Box<Self>) {
		self.core.destroy();
	}
}

/// Full constructor options, minus the container.
pub fn options(request: MountRequest<'_>) -> Value {
	json!({
		"elements": elements(request.dataset),
		"style": stylesheet(request.styles),
		"layout": layout(request.layout),
		"minZoom": request.interaction.zoom_min,
		"maxZoom": request.interaction.zoom_max,
	})
}

/// Nodes carry their group as data; the stylesheet does the rest.
pub fn elements(dataset: &GraphDataset) -> Value {
	let nodes: Vec<Value> = dataset
		.nodes
		.iter()
		.map(|node| {
			json!({ "data": { "id": node.id, "label": node.label, "group": node.group } })
		})
		.collect();
	let edges: Vec<Value> = dataset
		.edges
		.iter()
		.enumerate()
		.map(|(i, edge)| {
			json!({ "data": {
				"id": edge.id_or_derived(i),
				"source": edge.source,
				"target": edge.target,
			} })
		})
		.collect();
	json!({ "nodes": nodes, "edges": edges })
}

fn shape_name(shape: NodeShape) -> &'static str {
	match shape {
		NodeShape::Diamond => "diamond",
		NodeShape::Dot => "ellipse",
		NodeShape::Box => "round-rectangle",
	}
}

fn node_properties(style: &VisualStyle) -> Map<String, Value> {
	let diameter = format!("{}px", style.size * 2.0);
	let mut props = Map::new();
	props.insert("shape".into(), shape_name(style.shape).into());
	props.insert("background-color".into(), style.fill.clone().into());
	props.insert("border-color".into(), style.border.clone().into());
	props.insert("border-width".into(), style.border_width.into());
	props.insert("width".into(), diameter.clone().into());
	props.insert("height".into(), diameter.into());
	props.insert("color".into(), style.font.color.clone().into());
	props.insert("font-size".into(), format!("{}px", style.font.size).into());
	props.insert("text-outline-color".into(), style.font.stroke_color.clone().into());
	props.insert("text-outline-width".into(), style.font.stroke_width.into());
	if style.font.bold {
		props.insert("font-weight".into(), "bold".into());
	}
	if style.emphasized {
		props.insert("z-index".into(), 10.into());
	}
	props
}

/// Base `node` and `edge` rules followed by one `node[group="…"]` rule per
/// classification. Unclassified nodes fall through to the base rule.
pub fn stylesheet(styles: &StyleRules) -> Value {
	let mut base = node_properties(&styles.unclassified);
	base.insert("label".into(), "data(label)".into());
	base.insert("text-valign".into(), "center".into());
	base.insert("text-halign".into(), "center".into());
	base.insert("text-wrap".into(), "wrap".into());
	base.insert("text-max-width".into(), "90px".into());

	let edge = &styles.edge;
	let mut rules = vec![
		json!({ "selector": "node", "style": base }),
		json!({ "selector": "edge", "style": {
			"width": edge.width,
			"line-color": edge.color,
			"target-arrow-color": edge.color,
			"target-arrow-shape": if edge.arrows { "triangle" } else { "none" },
			"curve-style": if edge.smooth { "bezier" } else { "straight" },
		} }),
		json!({ "selector": "edge:selected", "style": {
			"line-color": edge.highlight,
			"target-arrow-color": edge.highlight,
		} }),
	];
	rules.extend(styles.rules().map(|(group, style)| {
		json!({
			"selector": format!("node[group=\"{}\"]", group.as_str()),
			"style": node_properties(style),
		})
	}));
	Value::Array(rules)
}

/// `cose` layout options.
pub fn layout(config: &LayoutConfig) -> Value {
	json!({
		"name": "cose",
		"idealEdgeLength": config.ideal_edge_length,
		"nodeOverlap": config.node_overlap,
		"refresh": 20,
		"fit": config.fit,
		"padding": config.padding,
		"randomize": false,
		"componentSpacing": config.component_spacing,
		"nodeRepulsion": config.repulsion,
		"edgeElasticity": config.spring_constant,
		"nestingFactor": 5,
		"gravity": config.gravity,
		"numIter": config.iterations,
		"initialTemp": config.initial_temperature,
		"coolingFactor": config.cooling_factor,
		"minTemp": config.min_temperature,
	})
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::graph::{Classification, EdgeSpec, NodeSpec};

	fn rule<'a>(sheet: &'a Value, selector: &str) -> &'a Value {
		sheet
			.as_array()
			.unwrap()
			.iter()
			.find(|r| r["selector"] == selector)
			.map(|r| &r["style"])
			.unwrap_or_else(|| panic!("no rule for {selector}"))
	}

	#[test]
	fn elements_keep_group_tags() {
		let dataset = GraphDataset::new(
			vec![
				NodeSpec::new("A", "A", Classification::Category),
				NodeSpec::new("B", "B", Classification::Technology),
			],
			vec![EdgeSpec::new("A", "B")],
		);
		let els = elements(&dataset);
		assert_eq!(els["nodes"][0]["data"]["group"], "Category");
		assert_eq!(els["nodes"][1]["data"]["group"], "Technology");
		assert_eq!(els["edges"][0]["data"]["source"], "A");
		assert_eq!(els["edges"][0]["data"]["target"], "B");
		assert_eq!(els["edges"][0]["data"]["id"], "e0_A_B");
	}

	#[test]
	fn stylesheet_has_rule_per_group() {
		let sheet = stylesheet(&StyleRules::default());

		let category = rule(&sheet, "node[group=\"Category\"]");
		assert_eq!(category["shape"], "diamond");
		assert_eq!(category["background-color"], "#4a90e2");
		assert_eq!(category["width"], "60px");
		assert_eq!(category["font-weight"], "bold");

		let book = rule(&sheet, "node[group=\"Book\"]");
		assert_eq!(book["shape"], "round-rectangle");
		assert_eq!(book["background-color"], "#ffa726");

		let highlighted = rule(&sheet, "node[group=\"BookHighlighted\"]");
		assert_eq!(highlighted["z-index"], 10);

		let base = rule(&sheet, "node");
		assert_eq!(base["background-color"], "#666666");
		assert_eq!(base["label"], "data(label)");
	}

	#[test]
	fn layout_uses_named_parameters() {
		let config = LayoutConfig {
			repulsion: 1234.0,
			iterations: 50,
			..LayoutConfig::cose()
		};
		let value = layout(&config);
		assert_eq!(value["name"], "cose");
		assert_eq!(value["nodeRepulsion"], 1234.0);
		assert_eq!(value["numIter"], 50);
		assert_eq!(value["coolingFactor"], 0.95);
	}
}
