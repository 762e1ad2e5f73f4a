//! Named layout and interaction parameters.
//!
//! Values are engine-neutral names; each engine maps them onto its own option
//! vocabulary. Presets carry the tuning each engine was calibrated with, and
//! host pages may override any subset through JSON.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::engine::EngineKind;
use super::error::RenderError;

/// Force layout parameters, named independently of any engine.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
	/// Node-node repulsion magnitude (always positive).
	pub repulsion: f64,
	/// Rest length of an edge spring.
	pub ideal_edge_length: f64,
	/// Edge spring stiffness / elasticity.
	pub spring_constant: f64,
	/// Pull towards the centre of the view.
	pub gravity: f64,
	/// Fraction of velocity lost per step, in `[0, 1]`.
	pub damping: f64,
	/// Temperature multiplier per iteration for annealing layouts, in `(0, 1]`.
	pub cooling_factor: f64,
	/// Starting temperature for annealing layouts.
	pub initial_temperature: f64,
	/// Annealing stops below this temperature.
	pub min_temperature: f64,
	/// Iteration cap (stabilization / simulated annealing steps).
	pub iterations: u32,
	/// Fixed seed for reproducible placement. `None` lets the engine choose.
	pub random_seed: Option<u32>,
	/// Overlap avoidance strength, in `[0, 1]`.
	pub avoid_overlap: f64,
	/// Extra spacing applied between overlapping nodes by annealing layouts.
	pub node_overlap: f64,
	/// Gap between disconnected components.
	pub component_spacing: f64,
	/// Viewport padding in pixels when fitting.
	pub padding: f64,
	/// Fit the viewport to the graph once laid out.
	pub fit: bool,
}

impl LayoutConfig {
	/// Compound spring embedder tuning (cytoscape `cose`).
	pub fn cose() -> Self {
		Self {
			repulsion: 400_000.0,
			ideal_edge_length: 100.0,
			spring_constant: 100.0,
			gravity: 80.0,
			damping: 0.1,
			cooling_factor: 0.95,
			initial_temperature: 200.0,
			min_temperature: 1.0,
			iterations: 1000,
			random_seed: None,
			avoid_overlap: 0.0,
			node_overlap: 20.0,
			component_spacing: 100.0,
			padding: 30.0,
			fit: true,
		}
	}

	/// Barnes-Hut physics tuning (vis-network).
	pub fn barnes_hut() -> Self {
		Self {
			repulsion: 4000.0,
			ideal_edge_length: 150.0,
			spring_constant: 0.04,
			gravity: 0.15,
			damping: 0.1,
			cooling_factor: 1.0,
			initial_temperature: 0.0,
			min_temperature: 0.0,
			iterations: 1500,
			random_seed: Some(42),
			avoid_overlap: 0.2,
			node_overlap: 0.0,
			component_spacing: 100.0,
			padding: 30.0,
			fit: true,
		}
	}

	/// In-process canvas simulation tuning.
	pub fn canvas() -> Self {
		Self {
			repulsion: 150.0,
			ideal_edge_length: 100.0,
			spring_constant: 0.05,
			gravity: 0.0,
			damping: 0.1,
			cooling_factor: 1.0,
			initial_temperature: 0.0,
			min_temperature: 0.0,
			iterations: 300,
			random_seed: Some(42),
			avoid_overlap: 0.0,
			node_overlap: 0.0,
			component_spacing: 100.0,
			padding: 30.0,
			fit: true,
		}
	}

	/// The preset `kind` is tuned for.
	pub fn for_engine(kind: EngineKind) -> Self {
		match kind {
			EngineKind::Cytoscape => Self::cose(),
			EngineKind::VisNetwork => Self::barnes_hut(),
			EngineKind::Canvas => Self::canvas(),
		}
	}

	/// A copy with the fields of the JSON object `patch` applied on top.
	///
	/// Fields absent from `patch` keep their current value. Anything other
	/// than an object, unknown fields and mistyped values are rejected.
	pub fn merged(&self, patch: Value) -> Result<LayoutConfig, RenderError> {
		let Value::Object(patch) = patch else {
			return Err(RenderError::InvalidLayout(format!(
				"layout overrides must be an object, got {patch}"
			)));
		};
		let mut value = serde_json::to_value(self)?;
		let Value::Object(base) = &mut value else {
			return Err(RenderError::Serialization(
				"layout did not serialize to an object".into(),
			));
		};
		for (key, field) in patch {
			if !base.contains_key(&key) {
				return Err(RenderError::InvalidLayout(format!("unknown field {key:?}")));
			}
			base.insert(key, field);
		}
		let merged: LayoutConfig = serde_json::from_value(value)
			.map_err(|e| RenderError::InvalidLayout(e.to_string()))?;
		merged.validate()?;
		Ok(merged)
	}

	/// Check every value is finite and within its range.
	pub fn validate(&self) -> Result<(), RenderError> {
		let fields = [
			("repulsion", self.repulsion),
			("ideal_edge_length", self.ideal_edge_length),
			("spring_constant", self.spring_constant),
			("gravity", self.gravity),
			("damping", self.damping),
			("cooling_factor", self.cooling_factor),
			("initial_temperature", self.initial_temperature),
			("min_temperature", self.min_temperature),
			("avoid_overlap", self.avoid_overlap),
			("node_overlap", self.node_overlap),
			("component_spacing", self.component_spacing),
			("padding", self.padding),
		];
		for (name, value) in fields {
			if !value.is_finite() {
				return Err(RenderError::InvalidLayout(format!("{name} must be finite")));
			}
			if value < 0.0 {
				return Err(RenderError::InvalidLayout(format!(
					"{name} must not be negative, got {value}"
				)));
			}
		}
		if self.ideal_edge_length == 0.0 {
			return Err(RenderError::InvalidLayout(
				"ideal_edge_length must be positive".into(),
			));
		}
		if self.damping > 1.0 {
			return Err(RenderError::InvalidLayout(format!(
				"damping must be within [0, 1], got {}",
				self.damping
			)));
		}
		if self.cooling_factor == 0.0 || self.cooling_factor > 1.0 {
			return Err(RenderError::InvalidLayout(format!(
				"cooling_factor must be within (0, 1], got {}",
				self.cooling_factor
			)));
		}
		if self.avoid_overlap > 1.0 {
			return Err(RenderError::InvalidLayout(format!(
				"avoid_overlap must be within [0, 1], got {}",
				self.avoid_overlap
			)));
		}
		if self.min_temperature > self.initial_temperature {
			return Err(RenderError::InvalidLayout(
				"min_temperature exceeds initial_temperature".into(),
			));
		}
		Ok(())
	}
}

impl Default for LayoutConfig {
	fn default() -> Self {
		Self::barnes_hut()
	}
}

/// Pointer, tooltip and zoom behaviour shared by every engine.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InteractionConfig {
	/// Highlight nodes under the pointer.
	pub hover: bool,
	/// Delay before a tooltip shows.
	pub tooltip_delay_ms: u32,
	/// Skip drawing edges while the view is dragged.
	pub hide_edges_on_drag: bool,
	/// Show on-screen pan and zoom buttons where the engine has them.
	pub navigation_buttons: bool,
	/// Smallest zoom factor.
	pub zoom_min: f64,
	/// Largest zoom factor.
	pub zoom_max: f64,
}

impl Default for InteractionConfig {
	fn default() -> Self {
		Self {
			hover: true,
			tooltip_delay_ms: 200,
			hide_edges_on_drag: true,
			navigation_buttons: true,
			zoom_min: 0.1,
			zoom_max: 10.0,
		}
	}
}
