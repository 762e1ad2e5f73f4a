use std::cell::RefCell;
use std::collections::HashSet;
use std::rc::Rc;

use tech_graph_view::graph::{
	Classification, EngineKind, GraphDataset, GraphView, HostDocument, LayoutConfig,
	MountRequest, NodeShape, RenderEngine, RenderError, ViewHandle, VisualStyle,
};

/// Containers are plain ids present in the fake document.
struct FakeDocument {
	containers: HashSet<String>,
}

impl FakeDocument {
	fn with(ids: &[&str]) -> Self {
		Self {
			containers: ids.iter().map(|id| id.to_string()).collect(),
		}
	}
}

impl HostDocument for FakeDocument {
	type Container = String;

	fn resolve(&self, container_id: &str) -> Option<String> {
		self.containers.get(container_id).cloned()
	}
}

#[derive(Debug, Clone)]
struct MountedNode {
	id: String,
	style: VisualStyle,
}

#[derive(Default)]
struct EngineLog {
	live: usize,
	mounts: usize,
	destroyed: usize,
	last_container: Option<String>,
	last_nodes: Vec<MountedNode>,
	last_edges: usize,
	last_layout: Option<LayoutConfig>,
}

struct FakeEngine {
	kind: EngineKind,
	available: bool,
	reject: bool,
	log: Rc<RefCell<EngineLog>>,
}

impl FakeEngine {
	fn new(kind: EngineKind, log: &Rc<RefCell<EngineLog>>) -> Self {
		Self {
			kind,
			available: true,
			reject: false,
			log: log.clone(),
		}
	}
}

struct FakeHandle {
	kind: EngineKind,
	log: Rc<RefCell<EngineLog>>,
}

impl ViewHandle for FakeHandle {
	fn engine(&self) -> EngineKind {
		self.kind
	}

	fn destroy(self: Box<Self>) {
		let mut log = self.log.borrow_mut();
		log.live -= 1;
		log.destroyed += 1;
	}
}

impl RenderEngine<String> for FakeEngine {
	fn kind(&self) -> EngineKind {
		self.kind
	}

	fn is_available(&self) -> bool {
		self.available
	}

	fn mount(
		&self,
		container: &String,
		request: MountRequest<'_>,
	) -> Result<Box<dyn ViewHandle>, RenderError> {
		if self.reject {
			return Err(RenderError::construction(self.kind, "bad dataset"));
		}
		let mut log = self.log.borrow_mut();
		log.live += 1;
		log.mounts += 1;
		log.last_container = Some(container.clone());
		log.last_nodes = request
			.dataset
			.nodes
			.iter()
			.map(|n| MountedNode {
				id: n.id.clone(),
				style: request.styles.style_for(n.group).clone(),
			})
			.collect();
		log.last_edges = request.dataset.edges.len();
		log.last_layout = Some(request.layout.clone());
		Ok(Box::new(FakeHandle {
			kind: self.kind,
			log: self.log.clone(),
		}))
	}
}

fn scenario() -> GraphDataset {
	serde_json::from_str(
		r#"{"nodes": [{"id":"A", "label":"A", "group":"Category"},
		              {"id":"B", "label":"B", "group":"Technology"}],
		    "edges": [{"from":"A", "to":"B"}]}"#,
	)
	.unwrap()
}

fn view_with(log: &Rc<RefCell<EngineLog>>) -> GraphView<FakeDocument> {
	GraphView::new(FakeDocument::with(&["graph", "other"]))
		.with_engine(FakeEngine::new(EngineKind::Cytoscape, log))
		.with_engine(FakeEngine::new(EngineKind::VisNetwork, log))
}

#[test]
fn scenario_renders_styled_nodes_and_edge() {
	let log = Rc::new(RefCell::new(EngineLog::default()));
	let mut view = view_with(&log);

	view.render("graph", scenario(), EngineKind::Cytoscape).unwrap();

	let log = log.borrow();
	assert_eq!(log.last_container.as_deref(), Some("graph"));
	assert_eq!(log.last_edges, 1);
	let a = &log.last_nodes[0];
	assert_eq!(a.id, "A");
	assert_eq!(a.style.shape, NodeShape::Diamond);
	assert_eq!(a.style.fill, "#4a90e2");
	let b = &log.last_nodes[1];
	assert_eq!(b.style.shape, NodeShape::Dot);
	assert_eq!(b.style.fill, "#7b68ee");
	assert!(a.style.size > b.style.size);
}

#[test]
fn rendering_twice_keeps_one_live_view() {
	let log = Rc::new(RefCell::new(EngineLog::default()));
	let mut view = view_with(&log);

	view.render("graph", scenario(), EngineKind::Cytoscape).unwrap();
	view.render("graph", scenario(), EngineKind::Cytoscape).unwrap();
	view.render("other", scenario(), EngineKind::VisNetwork).unwrap();

	assert_eq!(log.borrow().live, 1);
	assert_eq!(log.borrow().mounts, 3);
	assert_eq!(log.borrow().destroyed, 2);
	assert_eq!(view.engine(), Some(EngineKind::VisNetwork));
}

#[test]
fn empty_dataset_replaces_prior_view() {
	let log = Rc::new(RefCell::new(EngineLog::default()));
	let mut view = view_with(&log);

	view.render("graph", scenario(), EngineKind::Cytoscape).unwrap();
	view.render("graph", GraphDataset::default(), EngineKind::Cytoscape)
		.unwrap();

	let log = log.borrow();
	assert_eq!(log.live, 1);
	assert_eq!(log.destroyed, 1);
	assert!(log.last_nodes.is_empty());
	assert_eq!(log.last_edges, 0);
	assert!(view.is_mounted());
}

#[test]
fn missing_container_leaves_live_view_untouched() {
	let log = Rc::new(RefCell::new(EngineLog::default()));
	let mut view = view_with(&log);
	view.render("graph", scenario(), EngineKind::Cytoscape).unwrap();

	let err = view
		.render("nowhere", scenario(), EngineKind::Cytoscape)
		.unwrap_err();

	assert_eq!(
		err,
		RenderError::ContainerNotFound {
			id: "nowhere".into()
		}
	);
	assert_eq!(log.borrow().live, 1);
	assert_eq!(log.borrow().destroyed, 0);
	assert_eq!(view.engine(), Some(EngineKind::Cytoscape));
}

#[test]
fn unavailable_engine_stores_nothing() {
	let log = Rc::new(RefCell::new(EngineLog::default()));
	let mut view = GraphView::new(FakeDocument::with(&["graph"])).with_engine(FakeEngine {
		available: false,
		..FakeEngine::new(EngineKind::VisNetwork, &log)
	});

	let err = view
		.render("graph", scenario(), EngineKind::VisNetwork)
		.unwrap_err();
	assert_eq!(
		err,
		RenderError::EngineUnavailable {
			engine: EngineKind::VisNetwork
		}
	);
	assert!(!view.is_mounted());

	// not registered at all
	let err = view
		.render("graph", scenario(), EngineKind::Canvas)
		.unwrap_err();
	assert!(matches!(err, RenderError::EngineUnavailable { .. }));
	assert_eq!(log.borrow().mounts, 0);
}

#[test]
fn construction_failure_is_propagated_without_a_handle() {
	let log = Rc::new(RefCell::new(EngineLog::default()));
	let mut view = view_with(&log);
	view.register(Box::new(FakeEngine {
		reject: true,
		..FakeEngine::new(EngineKind::Canvas, &log)
	}));
	view.render("graph", scenario(), EngineKind::Cytoscape).unwrap();

	let err = view
		.render("graph", scenario(), EngineKind::Canvas)
		.unwrap_err();

	assert!(matches!(
		err,
		RenderError::EngineConstruction {
			engine: EngineKind::Canvas,
			..
		}
	));
	assert!(!view.is_mounted());
	assert_eq!(log.borrow().live, 0);
}

#[test]
fn unclassified_nodes_get_default_style() {
	let log = Rc::new(RefCell::new(EngineLog::default()));
	let mut view = view_with(&log);
	let data: GraphDataset = serde_json::from_str(
		r#"{"nodes": [{"id":"x", "label":"x", "group":"Planet"}, {"id":"y", "label":"y"}]}"#,
	)
	.unwrap();

	view.render("graph", data, EngineKind::VisNetwork).unwrap();

	for node in &log.borrow().last_nodes {
		assert_eq!(node.style.fill, "#666666");
		assert_eq!(node.style.shape, NodeShape::Dot);
	}
	assert_eq!(Classification::from("Planet"), Classification::Unclassified);
}

#[test]
fn teardown_and_drop_release_the_view() {
	let log = Rc::new(RefCell::new(EngineLog::default()));
	let mut view = view_with(&log);

	view.render("graph", scenario(), EngineKind::Cytoscape).unwrap();
	view.teardown();
	assert!(!view.is_mounted());
	assert_eq!(log.borrow().live, 0);

	view.render("graph", scenario(), EngineKind::Cytoscape).unwrap();
	drop(view);
	assert_eq!(log.borrow().live, 0);
	assert_eq!(log.borrow().destroyed, 2);
}

#[test]
fn layout_overrides_apply_per_engine() {
	let log = Rc::new(RefCell::new(EngineLog::default()));
	let mut view = view_with(&log);

	let tuned = LayoutConfig {
		repulsion: 9000.0,
		..LayoutConfig::barnes_hut()
	};
	view.set_layout(EngineKind::VisNetwork, tuned.clone()).unwrap();
	let bad = LayoutConfig {
		damping: 2.0,
		..LayoutConfig::cose()
	};
	assert!(view.set_layout(EngineKind::Cytoscape, bad).is_err());

	view.render("graph", scenario(), EngineKind::VisNetwork).unwrap();
	assert_eq!(log.borrow().last_layout.as_ref(), Some(&tuned));

	view.render("graph", scenario(), EngineKind::Cytoscape).unwrap();
	assert_eq!(log.borrow().last_layout.as_ref(), Some(&LayoutConfig::cose()));
}

#[test]
fn json_layout_patches_build_on_current_layout() {
	let log = Rc::new(RefCell::new(EngineLog::default()));
	let mut view = view_with(&log);
	let kind = EngineKind::VisNetwork;

	for patch in [
		serde_json::json!({ "repulsion": 9000.0 }),
		serde_json::json!({ "damping": 0.2 }),
	] {
		let layout = view.layout(kind).merged(patch).unwrap();
		view.set_layout(kind, layout).unwrap();
	}
	assert!(matches!(
		view.layout(kind).merged(serde_json::json!(5)),
		Err(RenderError::InvalidLayout(_))
	));

	view.render("graph", scenario(), kind).unwrap();
	let used = log.borrow().last_layout.clone().unwrap();
	assert_eq!(used.repulsion, 9000.0);
	assert_eq!(used.damping, 0.2);
	assert_eq!(used.spring_constant, LayoutConfig::barnes_hut().spring_constant);
}

#[test]
fn registering_same_kind_replaces_engine() {
	let log = Rc::new(RefCell::new(EngineLog::default()));
	let mut view = view_with(&log);
	view.register(Box::new(FakeEngine::new(EngineKind::Cytoscape, &log)));
	assert_eq!(view.engine_kinds().count(), 2);
}
