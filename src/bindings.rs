//! Host page entry point.
//!
//! Page scripts own a `GraphViewController` and pass it around instead of
//! relying on a hidden global view:
//!
//! ```js
//! const graph = new GraphViewController();
//! graph.render("graph", { nodes, edges }, "vis-network");
//! graph.teardown();
//! ```

use wasm_bindgen::prelude::*;

use crate::engines::{WebDocument, web_graph_view};
use crate::graph::{EngineKind, GraphDataset, GraphView, RenderError};

/// A graph view owned by a page script. Dropping it (`free()`) tears the view
/// down.
#[wasm_bindgen]
pub struct GraphViewController {
	view: GraphView<WebDocument>,
}

#[wasm_bindgen]
impl GraphViewController {
	/// A controller with every engine registered.
	#[wasm_bindgen(constructor)]
	pub fn new() -> GraphViewController {
		GraphViewController {
			view: web_graph_view(),
		}
	}

	/// Replace the current view. `engine` defaults to the canvas engine.
	pub fn render(
		&mut self,
		container_id: &str,
		dataset: JsValue,
		engine: Option<String>,
	) -> Result<(), JsError> {
		let choice = match engine {
			Some(name) => name.parse::<EngineKind>()?,
			None => EngineKind::default(),
		};
		let dataset: GraphDataset = serde_wasm_bindgen::from_value(dataset)
			.map_err(|e| RenderError::Serialization(e.to_string()))?;
		self.view.render(container_id, dataset, choice)?;
		Ok(())
	}

	/// Override layout parameters for one engine. Fields missing from
	/// `overrides` keep their current value, including earlier overrides.
	#[wasm_bindgen(js_name = setLayout)]
	pub fn set_layout(&mut self, engine: &str, overrides: JsValue) -> Result<(), JsError> {
		let kind = engine.parse::<EngineKind>()?;
		let patch: serde_json::Value = serde_wasm_bindgen::from_value(overrides)
			.map_err(|e| RenderError::Serialization(e.to_string()))?;
		let layout = self.view.layout(kind).merged(patch)?;
		self.view.set_layout(kind, layout)?;
		Ok(())
	}

	/// Destroy the live view, if any.
	pub fn teardown(&mut self) {
		self.view.teardown();
	}

	/// Whether a view is live.
	#[wasm_bindgen(js_name = isMounted)]
	pub fn is_mounted(&self) -> bool {
		self.view.is_mounted()
	}

	/// Engine of the live view, if any.
	pub fn engine(&self) -> Option<String> {
		self.view.engine().map(|kind| kind.to_string())
	}
}

impl Default for GraphViewController {
	fn default() -> Self {
		Self::new()
	}
}
