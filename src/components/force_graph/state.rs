use std::collections::{HashMap, HashSet};
use std::f64::consts::PI;

use force_graph::{DefaultNodeIdx, EdgeData, ForceGraph, NodeData, SimulationParameters};

use crate::graph::{
	Classification, EngineKind, GraphDataset, InteractionConfig, LayoutConfig, RenderError,
	StyleRules, VisualStyle,
};

/// Canvas units per style size unit.
pub const SIZE_SCALE: f64 = 0.5;
/// Extra pick tolerance around a node, in world units.
pub const HIT_SLOP: f64 = 4.0;
/// Ticks simulated before the first frame, whatever the iteration cap.
pub const MAX_WARMUP_TICKS: u32 = 300;
pub const TICK: f32 = 0.016;

const FORCE_MAX: f32 = 100.0;
const NODE_SPEED: f32 = 3000.0;
const NODE_MASS: f32 = 10.0;

#[derive(Clone, Debug, Default)]
pub struct NodeInfo {
	pub label: String,
	pub group: Classification,
}

#[derive(Clone, Debug, Default)]
pub struct ViewTransform {
	pub x: f64,
	pub y: f64,
	pub k: f64,
}

#[derive(Clone, Debug, Default)]
pub struct DragState {
	pub active: bool,
	pub node_idx: Option<DefaultNodeIdx>,
	pub start_x: f64,
	pub start_y: f64,
	pub node_start_x: f32,
	pub node_start_y: f32,
}

#[derive(Clone, Debug, Default)]
pub struct PanState {
	pub active: bool,
	pub start_x: f64,
	pub start_y: f64,
	pub transform_start_x: f64,
	pub transform_start_y: f64,
}

#[derive(Clone, Debug, Default)]
pub struct HoverState {
	pub node: Option<DefaultNodeIdx>,
	pub neighbors: HashSet<DefaultNodeIdx>,
	pub highlight_t: f64,
	pub prev_node: Option<DefaultNodeIdx>,
	pub prev_neighbors: HashSet<DefaultNodeIdx>,
	delay_t: f64,
}

pub struct ForceGraphState {
	pub graph: ForceGraph<NodeInfo, ()>,
	pub styles: StyleRules,
	pub transform: ViewTransform,
	pub drag: DragState,
	pub pan: PanState,
	pub hover: HoverState,
	pub width: f64,
	pub height: f64,
	pub animation_running: bool,
	pub flow_time: f64,
	hover_enabled: bool,
	zoom_range: (f64, f64),
	gravity: f32,
	edges: Vec<(DefaultNodeIdx, DefaultNodeIdx)>,
}

/// Deterministic jitter in `[0, 1)` for a seed/salt pair.
fn seeded_unit(seed: u32, salt: usize) -> f64 {
	let x = ((seed as u64 + salt as u64 + 1) * 9301 + 49297) % 233280;
	(x as f64) / 233280.0
}

impl ForceGraphState {
	/// Build the simulation, rejecting duplicate node ids and edges whose
	/// endpoints are not in the dataset.
	pub fn new(
		data: &GraphDataset,
		styles: &StyleRules,
		layout: &LayoutConfig,
		interaction: &InteractionConfig,
		width: f64,
		height: f64,
	) -> Result<Self, RenderError> {
		let mut graph = ForceGraph::new(SimulationParameters {
			force_charge: layout.repulsion as f32,
			force_spring: layout.spring_constant as f32,
			force_max: FORCE_MAX,
			node_speed: NODE_SPEED,
			damping_factor: (1.0 - layout.damping) as f32,
		});
		let mut id_to_idx = HashMap::new();
		let mut edges = Vec::new();
		let radius = layout.ideal_edge_length;

		for (i, node) in data.nodes.iter().enumerate() {
			if id_to_idx.contains_key(&node.id) {
				return Err(RenderError::construction(
					EngineKind::Canvas,
					format!("duplicate node id {:?}", node.id),
				));
			}
			let angle = (i as f64) * 2.0 * PI / data.nodes.len() as f64;
			let jitter = layout
				.random_seed
				.map(|seed| 0.5 + seeded_unit(seed, i))
				.unwrap_or(1.0);
			let (x, y) = (
				(radius * jitter * angle.cos()) as f32,
				(radius * jitter * angle.sin()) as f32,
			);

			let idx = graph.add_node(NodeData {
				x,
				y,
				mass: NODE_MASS,
				is_anchor: false,
				user_data: NodeInfo {
					label: node.label.clone(),
					group: node.group,
				},
			});
			id_to_idx.insert(node.id.clone(), idx);
		}

		for (i, link) in data.edges.iter().enumerate() {
			let endpoint = |id: &String| {
				id_to_idx.get(id).copied().ok_or_else(|| {
					RenderError::construction(
						EngineKind::Canvas,
						format!("edge {} references unknown node {:?}", i, id),
					)
				})
			};
			let (src, tgt) = (endpoint(&link.source)?, endpoint(&link.target)?);
			graph.add_edge(src, tgt, EdgeData::default());
			edges.push((src, tgt));
		}

		Ok(Self {
			graph,
			styles: styles.clone(),
			edges,
			transform: ViewTransform {
				x: width / 2.0,
				y: height / 2.0,
				k: 1.0,
			},
			drag: DragState::default(),
			pan: PanState::default(),
			hover: HoverState::default(),
			width,
			height,
			animation_running: true,
			flow_time: 0.0,
			hover_enabled: interaction.hover,
			zoom_range: (interaction.zoom_min, interaction.zoom_max),
			gravity: layout.gravity as f32,
		})
	}

	pub fn node_count(&self) -> usize {
		let mut count = 0;
		self.graph.visit_nodes(|_| count += 1);
		count
	}

	pub fn edge_count(&self) -> usize {
		self.edges.len()
	}

	pub fn style(&self, info: &NodeInfo) -> &VisualStyle {
		self.styles.style_for(info.group)
	}

	pub fn radius(&self, info: &NodeInfo) -> f64 {
		self.style(info).size * SIZE_SCALE
	}

	/// Run the simulation ahead of the first frame.
	pub fn warm_up(&mut self, iterations: u32) {
		for _ in 0..iterations.min(MAX_WARMUP_TICKS) {
			self.step(TICK);
		}
	}

	pub fn screen_to_graph(&self, sx: f64, sy: f64) -> (f64, f64) {
		(
			(sx - self.transform.x) / self.transform.k,
			(sy - self.transform.y) / self.transform.k,
		)
	}

	pub fn node_at_position(&self, sx: f64, sy: f64) -> Option<DefaultNodeIdx> {
		let (gx, gy) = self.screen_to_graph(sx, sy);
		let mut found = None;
		self.graph.visit_nodes(|node| {
			let (dx, dy) = (node.x() as f64 - gx, node.y() as f64 - gy);
			// pick radius is in world space so it scales with zoom like nodes
			if (dx * dx + dy * dy).sqrt() < self.radius(&node.data.user_data) + HIT_SLOP {
				found = Some(node.index());
			}
		});
		found
	}

	pub fn pointer_down(&mut self, x: f64, y: f64) {
		if let Some(idx) = self.node_at_position(x, y) {
			self.drag.active = true;
			self.drag.node_idx = Some(idx);
			self.drag.start_x = x;
			self.drag.start_y = y;
			let mut start = (0.0, 0.0);
			self.graph.visit_nodes(|node| {
				if node.index() == idx {
					start = (node.x(), node.y());
				}
			});
			(self.drag.node_start_x, self.drag.node_start_y) = start;
		} else {
			self.pan.active = true;
			self.pan.start_x = x;
			self.pan.start_y = y;
			self.pan.transform_start_x = self.transform.x;
			self.pan.transform_start_y = self.transform.y;
		}
	}

	pub fn pointer_move(&mut self, x: f64, y: f64) {
		if !self.drag.active && self.hover_enabled {
			let hovered = self.node_at_position(x, y);
			self.set_hover(hovered);
		}

		if self.drag.active {
			if let Some(idx) = self.drag.node_idx {
				let (dx, dy) = (
					(x - self.drag.start_x) / self.transform.k,
					(y - self.drag.start_y) / self.transform.k,
				);
				let (nx, ny) = (
					self.drag.node_start_x + dx as f32,
					self.drag.node_start_y + dy as f32,
				);
				self.graph.visit_nodes_mut(|node| {
					if node.index() == idx {
						node.data.x = nx;
						node.data.y = ny;
						node.data.is_anchor = true;
					}
				});
			}
		} else if self.pan.active {
			self.transform.x = self.pan.transform_start_x + (x - self.pan.start_x);
			self.transform.y = self.pan.transform_start_y + (y - self.pan.start_y);
		}
	}

	/// Release a drag or pan. A dragged node stays pinned where it was dropped.
	pub fn pointer_up(&mut self) {
		self.drag.active = false;
		self.drag.node_idx = None;
		self.pan.active = false;
	}

	pub fn pointer_leave(&mut self) {
		self.pointer_up();
		self.set_hover(None);
	}

	/// Zoom about the screen point `(x, y)`; positive `delta_y` zooms out.
	pub fn zoom_at(&mut self, x: f64, y: f64, delta_y: f64) {
		let factor = if delta_y > 0.0 { 0.9 } else { 1.1 };
		let (min, max) = self.zoom_range;
		let new_k = (self.transform.k * factor).clamp(min, max);
		let ratio = new_k / self.transform.k;
		self.transform.x = x - (x - self.transform.x) * ratio;
		self.transform.y = y - (y - self.transform.y) * ratio;
		self.transform.k = new_k;
	}

	pub fn set_hover(&mut self, node: Option<DefaultNodeIdx>) {
		if self.hover.node == node {
			return;
		}
		let was_hovering = self.hover.node.is_some();

		// keep the previous highlight around so it can fade out
		if was_hovering && node.is_none() {
			self.hover.prev_node = self.hover.node.take();
			self.hover.prev_neighbors = std::mem::take(&mut self.hover.neighbors);
		} else {
			self.hover.prev_node = None;
			self.hover.prev_neighbors.clear();
		}

		self.hover.node = node;
		self.hover.neighbors.clear();

		if let Some(idx) = node {
			if !was_hovering {
				self.hover.delay_t = 0.0;
			}
			for &(src, tgt) in &self.edges {
				if src == idx {
					self.hover.neighbors.insert(tgt);
				} else if tgt == idx {
					self.hover.neighbors.insert(src);
				}
			}
		}
	}

	pub fn is_highlighted(&self, idx: DefaultNodeIdx) -> bool {
		self.hover.node == Some(idx)
			|| self.hover.neighbors.contains(&idx)
			|| self.hover.prev_node == Some(idx)
			|| self.hover.prev_neighbors.contains(&idx)
	}

	pub fn is_hovered(&self, idx: DefaultNodeIdx) -> bool {
		self.hover.node == Some(idx) || self.hover.prev_node == Some(idx)
	}

	pub fn has_active_highlight(&self) -> bool {
		self.hover.node.is_some() || self.hover.prev_node.is_some()
	}

	fn step(&mut self, dt: f32) {
		self.graph.update(dt);
		if self.gravity > 0.0 {
			let pull = (self.gravity * dt).min(1.0);
			self.graph.visit_nodes_mut(|node| {
				if !node.data.is_anchor {
					node.data.x -= node.data.x * pull;
					node.data.y -= node.data.y * pull;
				}
			});
		}
	}

	pub fn tick(&mut self, dt: f32) {
		self.step(dt);
		self.flow_time += dt as f64;

		let (target, delay, speed) = if self.hover.node.is_some() {
			(1.0, 0.08, 1.8)
		} else {
			(0.0, 0.0, 1.26)
		};

		if self.hover.node.is_some() {
			self.hover.delay_t = (self.hover.delay_t + dt as f64).min(delay);
			if self.hover.delay_t >= delay {
				self.hover.highlight_t += (target - self.hover.highlight_t) * speed * dt as f64;
			}
		} else {
			self.hover.highlight_t += (target - self.hover.highlight_t) * speed * dt as f64;
			if self.hover.highlight_t < 0.01 {
				self.hover.highlight_t = 0.0;
				self.hover.prev_node = None;
				self.hover.prev_neighbors.clear();
			}
		}
	}

	pub fn resize(&mut self, width: f64, height: f64) {
		self.transform.x += (width - self.width) / 2.0;
		self.transform.y += (height - self.height) / 2.0;
		self.width = width;
		self.height = height;
	}
}
