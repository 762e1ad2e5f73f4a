//! Browser bindings shared by the engines: mount point lookup, global
//! capability probing and JS value conversion.

use serde::Serialize;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::HtmlElement;

use crate::graph::{HostDocument, RenderError};

/// Resolves containers from the window's document.
#[derive(Clone, Copy, Debug, Default)]
pub struct WebDocument;

impl HostDocument for WebDocument {
	type Container = HtmlElement;

	fn resolve(&self, container_id: &str) -> Option<HtmlElement> {
		web_sys::window()?
			.document()?
			.get_element_by_id(container_id)?
			.dyn_into::<HtmlElement>()
			.ok()
	}
}

/// Whether `path` (e.g. `["vis", "Network"]`) names a function on the global
/// object.
pub fn global_function(path: &[&str]) -> bool {
	let mut value: JsValue = js_sys::global().into();
	for key in path {
		if value.is_undefined() || value.is_null() {
			return false;
		}
		match js_sys::Reflect::get(&value, &JsValue::from_str(key)) {
			Ok(next) => value = next,
			Err(_) => return false,
		}
	}
	value.is_function()
}

/// Convert to a plain JS object graph (objects, not `Map`s).
pub fn to_js<T: Serialize + ?Sized>(value: &T) -> Result<JsValue, RenderError> {
	value
		.serialize(&serde_wasm_bindgen::Serializer::json_compatible())
		.map_err(|e| RenderError::Serialization(e.to_string()))
}

/// Best-effort message from a thrown JS value.
pub fn js_error_message(err: &JsValue) -> String {
	if let Some(err) = err.dyn_ref::<js_sys::Error>() {
		return String::from(err.message());
	}
	err.as_string().unwrap_or_else(|| format!("{:?}", err))
}
