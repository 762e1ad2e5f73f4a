//! Browser-bound rendering engines and the document they mount into.

mod cytoscape;
mod vis_network;
mod web;

use web_sys::HtmlElement;

pub use cytoscape::CytoscapeEngine;
pub use vis_network::VisNetworkEngine;
pub use web::{WebDocument, global_function, js_error_message, to_js};

use crate::components::force_graph::CanvasEngine;
use crate::graph::{GraphView, RenderEngine};

/// Every engine this crate ships, in registration order.
pub fn default_engines() -> Vec<Box<dyn RenderEngine<HtmlElement>>> {
	vec![
		Box::new(CytoscapeEngine),
		Box::new(VisNetworkEngine),
		Box::new(CanvasEngine),
	]
}

/// A controller over the window's document with every engine registered.
pub fn web_graph_view() -> GraphView<WebDocument> {
	let mut view = GraphView::new(WebDocument);
	for engine in default_engines() {
		view.register(engine);
	}
	view
}
