use std::cell::RefCell;
use std::rc::Rc;

use leptos::prelude::*;
use log::warn;

use crate::engines::web_graph_view;
use crate::graph::{EngineKind, GraphDataset};

/// Mounts `dataset` with `engine` and re-renders whenever either changes.
///
/// The controller lives as long as the component, so unmounting it destroys
/// the engine instance.
#[component]
pub fn TechGraphView(
	/// Graph to draw.
	#[prop(into)]
	dataset: Signal<GraphDataset>,
	/// Engine to draw it with.
	#[prop(into)]
	engine: Signal<EngineKind>,
	/// Id given to the mount point element.
	#[prop(default = "graph-view-container".to_string(), into)]
	container_id: String,
) -> impl IntoView {
	let container_ref = NodeRef::<leptos::html::Div>::new();
	let controller = Rc::new(RefCell::new(web_graph_view()));
	let (error, set_error) = signal(None::<String>);
	let id = container_id.clone();

	Effect::new(move |_| {
		let (data, choice) = (dataset.get(), engine.get());
		if container_ref.get().is_none() {
			return;
		}
		match controller.borrow_mut().render(&id, data, choice) {
			Ok(()) => set_error.set(None),
			Err(e) => {
				warn!("Graph render failed: {}", e);
				set_error.set(Some(e.to_string()));
			}
		}
	});

	view! {
		<div class="graph-view-wrapper">
			<div id=container_id class="graph-container" node_ref=container_ref></div>
			{move || error.get().map(|msg| view! { <p class="graph-error">{msg}</p> })}
		</div>
	}
}
