use leptos::prelude::*;

use crate::components::TechGraphView;
use crate::graph::{Classification, EdgeSpec, EngineKind, GraphDataset, NodeSpec};

/// A small technology/book catalogue, with `focus` highlighted.
fn sample_data(focus: Option<&str>) -> GraphDataset {
	let techs = [
		("t_1", "Neural Lace", "Biotech"),
		("t_2", "Mind Upload", "Biotech"),
		("t_3", "Alcubierre Drive", "Propulsion"),
		("t_4", "Ramjet", "Propulsion"),
	];
	let books: [(&str, &str, &[&str]); 3] = [
		("b_1", "Glasshouse", &["t_2", "t_1"]),
		("b_2", "Revelation Space", &["t_3", "t_4", "t_1"]),
		("b_3", "Tau Zero", &["t_4"]),
	];

	let mut nodes = vec![
		NodeSpec::new("c_Biotech", "Biotech", Classification::Category),
		NodeSpec::new("c_Propulsion", "Propulsion", Classification::Category),
	];
	let mut edges = Vec::new();

	for (id, name, category) in techs {
		let group = if focus == Some(id) {
			Classification::TechnologyHighlighted
		} else {
			Classification::Technology
		};
		nodes.push(NodeSpec::new(id, name, group));
		edges.push(EdgeSpec::new(format!("c_{}", category), id));
	}
	for (id, title, links) in books {
		let group = if focus.is_some_and(|f| links.contains(&f)) {
			Classification::BookHighlighted
		} else {
			Classification::Book
		};
		nodes.push(NodeSpec::new(id, title, group));
		edges.extend(links.iter().map(|tech| EdgeSpec::new(id, *tech)));
	}

	GraphDataset::new(nodes, edges)
}

/// Default Home Page
#[component]
pub fn Home() -> impl IntoView {
	let (engine, set_engine) = signal(EngineKind::default());
	let (focus, set_focus) = signal(None::<String>);
	let (cleared, set_cleared) = signal(false);

	let dataset = Signal::derive(move || {
		if cleared.get() {
			GraphDataset::default()
		} else {
			sample_data(focus.get().as_deref())
		}
	});

	let engine_options = EngineKind::ALL
		.into_iter()
		.map(|kind| {
			view! {
				<option value=kind.as_str() selected=move || engine.get() == kind>
					{kind.as_str()}
				</option>
			}
		})
		.collect_view();

	view! {
		<ErrorBoundary fallback=|errors| {
			view! {
				<h1>"Uh oh! Something went wrong!"</h1>

				<p>"Errors: "</p>
				<ul>
					{move || {
						errors
							.get()
							.into_iter()
							.map(|(_, e)| view! { <li>{e.to_string()}</li> })
							.collect_view()
					}}
				</ul>
			}
		}>

			<div class="tech-graph-page">
				<div class="graph-controls">
					<label for="engine-select">"Engine: "</label>
					<select
						id="engine-select"
						on:change=move |ev| {
							if let Ok(kind) = event_target_value(&ev).parse() {
								set_engine.set(kind);
							}
						}
					>
						{engine_options}
					</select>
					<label for="focus-select">"Highlight: "</label>
					<select
						id="focus-select"
						on:change=move |ev| {
							let val = event_target_value(&ev);
							set_focus.set((val != "none").then_some(val));
							set_cleared.set(false);
						}
					>
						<option value="none">"-- none --"</option>
						<option value="t_1">"Neural Lace"</option>
						<option value="t_3">"Alcubierre Drive"</option>
						<option value="t_4">"Ramjet"</option>
					</select>
					<button on:click=move |_| set_cleared.set(true)>"Clear Graph"</button>
				</div>
				<TechGraphView dataset=dataset engine=engine />
				<div class="graph-overlay">
					<h1>"Technology Graph"</h1>
					<p class="subtitle">"Technologies, their categories and the books that feature them."</p>
				</div>
			</div>
		</ErrorBoundary>
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn focus_highlights_tech_and_its_books() {
		let data = sample_data(Some("t_4"));
		let group = |id: &str| data.nodes.iter().find(|n| n.id == id).unwrap().group;
		assert_eq!(group("t_4"), Classification::TechnologyHighlighted);
		assert_eq!(group("t_3"), Classification::Technology);
		assert_eq!(group("b_2"), Classification::BookHighlighted);
		assert_eq!(group("b_3"), Classification::BookHighlighted);
		assert_eq!(group("b_1"), Classification::Book);
	}

	#[test]
	fn edges_reference_known_nodes() {
		let data = sample_data(None);
		for edge in &data.edges {
			assert!(data.nodes.iter().any(|n| n.id == edge.source), "{}", edge.source);
			assert!(data.nodes.iter().any(|n| n.id == edge.target), "{}", edge.target);
		}
	}
}
