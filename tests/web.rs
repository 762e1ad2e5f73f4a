//! Browser tests; run with `wasm-pack test --headless --firefox`.
#![cfg(target_arch = "wasm32")]

use tech_graph_view::engines::{WebDocument, web_graph_view};
use tech_graph_view::graph::{
	Classification, EdgeSpec, EngineKind, GraphDataset, HostDocument, NodeSpec, RenderError,
};
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

fn mount_point(id: &str) -> web_sys::Element {
	let document = web_sys::window().unwrap().document().unwrap();
	let div = document.create_element("div").unwrap();
	div.set_id(id);
	div.set_attribute("style", "width: 400px; height: 300px;").unwrap();
	document.body().unwrap().append_child(&div).unwrap();
	div
}

fn scenario() -> GraphDataset {
	GraphDataset::new(
		vec![
			NodeSpec::new("A", "A", Classification::Category),
			NodeSpec::new("B", "B", Classification::Technology),
		],
		vec![EdgeSpec::new("A", "B")],
	)
}

#[wasm_bindgen_test]
fn resolves_existing_containers_only() {
	mount_point("resolve-me");
	assert!(WebDocument.resolve("resolve-me").is_some());
	assert!(WebDocument.resolve("not-there").is_none());
}

#[wasm_bindgen_test]
fn canvas_view_is_replaced_not_duplicated() {
	let div = mount_point("canvas-host");
	let mut view = web_graph_view();

	view.render("canvas-host", scenario(), EngineKind::Canvas).unwrap();
	view.render("canvas-host", GraphDataset::default(), EngineKind::Canvas)
		.unwrap();
	assert_eq!(div.child_element_count(), 1);

	view.teardown();
	assert_eq!(div.child_element_count(), 0);
}

#[wasm_bindgen_test]
fn script_engines_report_unavailable_without_their_library() {
	mount_point("script-host");
	let mut view = web_graph_view();
	for kind in [EngineKind::Cytoscape, EngineKind::VisNetwork] {
		let err = view.render("script-host", scenario(), kind).unwrap_err();
		assert_eq!(err, RenderError::EngineUnavailable { engine: kind });
	}
	assert!(!view.is_mounted());
}
