use std::collections::HashMap;

use log::{debug, error, info};

use super::engine::{EngineKind, HostDocument, MountRequest, RenderEngine, ViewHandle};
use super::error::RenderError;
use super::layout::{InteractionConfig, LayoutConfig};
use super::style::StyleRules;
use super::types::GraphDataset;

/// Caller-owned graph view controller.
///
/// Holds the registered engines, the style and layout configuration, and at
/// most one live [`ViewHandle`]. Each successful [`GraphView::render`]
/// replaces the held view; dropping the controller tears it down.
pub struct GraphView<D: HostDocument> {
	document: D,
	engines: Vec<Box<dyn RenderEngine<D::Container>>>,
	styles: StyleRules,
	layouts: HashMap<EngineKind, LayoutConfig>,
	interaction: InteractionConfig,
	current: Option<Box<dyn ViewHandle>>,
}

impl<D: HostDocument> GraphView<D> {
	/// A controller with no engines, default styles and per-engine presets.
	pub fn new(document: D) -> Self {
		Self {
			document,
			engines: Vec::new(),
			styles: StyleRules::default(),
			layouts: EngineKind::ALL
				.into_iter()
				.map(|kind| (kind, LayoutConfig::for_engine(kind)))
				.collect(),
			interaction: InteractionConfig::default(),
			current: None,
		}
	}

	/// Register an engine, replacing any engine of the same kind.
	pub fn register(&mut self, engine: Box<dyn RenderEngine<D::Container>>) {
		let kind = engine.kind();
		self.engines.retain(|e| e.kind() != kind);
		self.engines.push(engine);
	}

	/// Builder form of [`GraphView::register`].
	pub fn with_engine(mut self, engine: impl RenderEngine<D::Container> + 'static) -> Self {
		self.register(Box::new(engine));
		self
	}

	/// Replace the style table.
	pub fn with_styles(mut self, styles: StyleRules) -> Self {
		self.styles = styles;
		self
	}

	/// Replace the interaction settings.
	pub fn with_interaction(mut self, interaction: InteractionConfig) -> Self {
		self.interaction = interaction;
		self
	}

	/// Current style table.
	pub fn styles(&self) -> &StyleRules {
		&self.styles
	}

	/// Layout the next render with `kind` will use.
	pub fn layout(&self, kind: EngineKind) -> &LayoutConfig {
		&self.layouts[&kind]
	}

	/// Override the layout used for `kind`. Takes effect on the next render.
	pub fn set_layout(&mut self, kind: EngineKind, layout: LayoutConfig) -> Result<(), RenderError> {
		layout.validate()?;
		self.layouts.insert(kind, layout);
		Ok(())
	}

	/// Registered engines, in registration order.
	pub fn engine_kinds(&self) -> impl Iterator<Item = EngineKind> + '_ {
		self.engines.iter().map(|e| e.kind())
	}

	/// Whether a view is live.
	pub fn is_mounted(&self) -> bool {
		self.current.is_some()
	}

	/// Engine of the live view, if any.
	pub fn engine(&self) -> Option<EngineKind> {
		self.current.as_ref().map(|h| h.engine())
	}

	/// Render `dataset` into the container `container_id` with `choice`.
	///
	/// A missing container or unavailable engine aborts before the live view
	/// is touched. Otherwise the live view is destroyed first and the new one
	/// stored only if the engine constructs it.
	pub fn render(
		&mut self,
		container_id: &str,
		dataset: GraphDataset,
		choice: EngineKind,
	) -> Result<(), RenderError> {
		let Some(container) = self.document.resolve(container_id) else {
			error!("Graph container not found: {}", container_id);
			return Err(RenderError::ContainerNotFound {
				id: container_id.to_string(),
			});
		};

		let Some(engine) = self
			.engines
			.iter()
			.find(|e| e.kind() == choice)
			.filter(|e| e.is_available())
		else {
			error!("Rendering engine {} is not loaded", choice);
			return Err(RenderError::EngineUnavailable { engine: choice });
		};

		release(&mut self.current);

		debug!(
			"Mounting {} nodes, {} edges into #{} with {}",
			dataset.nodes.len(),
			dataset.edges.len(),
			container_id,
			choice
		);
		let handle = engine.mount(
			&container,
			MountRequest {
				dataset: &dataset,
				styles: &self.styles,
				layout: &self.layouts[&choice],
				interaction: &self.interaction,
			},
		)?;
		info!("Graph view mounted in #{} ({})", container_id, choice);
		self.current = Some(handle);
		Ok(())
	}

	/// Destroy the live view, if any.
	pub fn teardown(&mut self) {
		release(&mut self.current);
	}
}

impl<D: HostDocument> Drop for GraphView<D> {
	fn drop(&mut self) {
		release(&mut self.current);
	}
}

fn release(slot: &mut Option<Box<dyn ViewHandle>>) {
	if let Some(handle) = slot.take() {
		debug!("Destroying {} view", handle.engine());
		handle.destroy();
	}
}
