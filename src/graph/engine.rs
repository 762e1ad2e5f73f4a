//! Capability seams between the adapter and concrete rendering engines.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::error::RenderError;
use super::layout::{InteractionConfig, LayoutConfig};
use super::style::StyleRules;
use super::types::GraphDataset;

/// Which backend draws the graph.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EngineKind {
	/// Constraint-based force layout (cytoscape.js, `cose`).
	Cytoscape,
	/// Physics-simulation network (vis-network, Barnes-Hut).
	VisNetwork,
	/// In-process force simulation drawn on a canvas.
	#[default]
	Canvas,
}

impl EngineKind {
	/// Every engine, in registration order.
	pub const ALL: [EngineKind; 3] = [
		EngineKind::Cytoscape,
		EngineKind::VisNetwork,
		EngineKind::Canvas,
	];

	/// Canonical name, as accepted by `parse`.
	pub fn as_str(self) -> &'static str {
		match self {
			EngineKind::Cytoscape => "cytoscape",
			EngineKind::VisNetwork => "vis-network",
			EngineKind::Canvas => "canvas",
		}
	}
}

impl fmt::Display for EngineKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// An engine name that matched no [`EngineKind`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown rendering engine: {0:?}")]
pub struct ParseEngineKindError(pub String);

impl FromStr for EngineKind {
	type Err = ParseEngineKindError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s.trim().to_ascii_lowercase().as_str() {
			"cytoscape" | "cy" | "cose" => Ok(EngineKind::Cytoscape),
			"vis-network" | "vis" | "network" => Ok(EngineKind::VisNetwork),
			"canvas" | "force-graph" => Ok(EngineKind::Canvas),
			_ => Err(ParseEngineKindError(s.to_string())),
		}
	}
}

/// Resolves mount points by id.
pub trait HostDocument {
	/// Element type engines mount into.
	type Container;

	/// The container with id `container_id`, if present.
	fn resolve(&self, container_id: &str) -> Option<Self::Container>;
}

/// Everything an engine needs to translate and mount one dataset.
#[derive(Clone, Copy, Debug)]
pub struct MountRequest<'a> {
	/// Graph to draw.
	pub dataset: &'a GraphDataset,
	/// Classification styles.
	pub styles: &'a StyleRules,
	/// Layout for this engine.
	pub layout: &'a LayoutConfig,
	/// Pointer and zoom behaviour.
	pub interaction: &'a InteractionConfig,
}

/// A graph-drawing backend able to mount into containers of type `C`.
pub trait RenderEngine<C> {
	/// Identifies the engine in a [`super::GraphView`] registry.
	fn kind(&self) -> EngineKind;

	/// Whether the backing library is loaded and usable right now.
	fn is_available(&self) -> bool;

	/// Translate the dataset into the engine's schema and mount it.
	///
	/// On error nothing may remain mounted in `container`.
	fn mount(
		&self,
		container: &C,
		request: MountRequest<'_>,
	) -> Result<Box<dyn ViewHandle>, RenderError>;
}

/// A live engine instance. Destroying it releases listeners, animation loops
/// and any DOM it created.
pub trait ViewHandle {
	/// Engine that created the view.
	fn engine(&self) -> EngineKind;

	/// Tear the view down. Consumes the handle so it cannot be reused.
	fn destroy(self: Box<Self>);
}
