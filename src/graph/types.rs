use std::fmt;

use serde::{Deserialize, Serialize};

/// Classification tag carried on a node's `group` attribute.
///
/// Parsing is total: any tag outside the known set maps to
/// [`Classification::Unclassified`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Classification {
	/// Grouping node that technologies hang off.
	Category,
	/// A technology.
	Technology,
	/// The technology currently in focus.
	TechnologyHighlighted,
	/// A book.
	Book,
	/// A book linked to the technology in focus.
	BookHighlighted,
	/// Missing or unknown tag.
	#[default]
	Unclassified,
}

impl Classification {
	/// Every tag that has a dedicated style rule.
	pub const CLASSIFIED: [Classification; 5] = [
		Classification::Category,
		Classification::Technology,
		Classification::TechnologyHighlighted,
		Classification::Book,
		Classification::BookHighlighted,
	];

	/// The wire tag; empty for [`Classification::Unclassified`].
	pub fn as_str(self) -> &'static str {
		match self {
			Classification::Category => "Category",
			Classification::Technology => "Technology",
			Classification::TechnologyHighlighted => "TechnologyHighlighted",
			Classification::Book => "Book",
			Classification::BookHighlighted => "BookHighlighted",
			Classification::Unclassified => "",
		}
	}

	/// Whether the tag has a dedicated style rule.
	pub fn is_classified(self) -> bool {
		self != Classification::Unclassified
	}
}

impl From<&str> for Classification {
	fn from(tag: &str) -> Self {
		match tag {
			"Category" => Classification::Category,
			"Technology" => Classification::Technology,
			"TechnologyHighlighted" => Classification::TechnologyHighlighted,
			"Book" => Classification::Book,
			"BookHighlighted" => Classification::BookHighlighted,
			_ => Classification::Unclassified,
		}
	}
}

impl From<String> for Classification {
	fn from(tag: String) -> Self {
		Classification::from(tag.as_str())
	}
}

impl From<Classification> for String {
	fn from(group: Classification) -> Self {
		group.as_str().to_string()
	}
}

impl fmt::Display for Classification {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Classification::Unclassified => f.write_str("(unclassified)"),
			other => f.write_str(other.as_str()),
		}
	}
}

/// One vertex of the input graph.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NodeSpec {
	/// Unique within a dataset.
	pub id: String,
	/// Display text.
	#[serde(default)]
	pub label: String,
	/// Classification tag; missing tags read as unclassified.
	#[serde(default)]
	pub group: Classification,
}

impl NodeSpec {
	/// A node with the given id, label and group.
	pub fn new(id: impl Into<String>, label: impl Into<String>, group: Classification) -> Self {
		Self {
			id: id.into(),
			label: label.into(),
			group,
		}
	}
}

/// A connection between two node ids. Direction is decided by the engine's
/// edge style, not by the data.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EdgeSpec {
	/// Optional explicit id.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub id: Option<String>,
	/// Source node id (`from` is accepted too).
	#[serde(alias = "from")]
	pub source: String,
	/// Target node id (`to` is accepted too).
	#[serde(alias = "to")]
	pub target: String,
}

impl EdgeSpec {
	/// An edge without an explicit id.
	pub fn new(source: impl Into<String>, target: impl Into<String>) -> Self {
		Self {
			id: None,
			source: source.into(),
			target: target.into(),
		}
	}

	/// The explicit id, or one derived from the edge's position and endpoints.
	pub fn id_or_derived(&self, index: usize) -> String {
		self.id
			.clone()
			.unwrap_or_else(|| format!("e{}_{}_{}", index, self.source, self.target))
	}
}

/// Nodes and edges handed to a render call.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct GraphDataset {
	/// Vertices.
	#[serde(default)]
	pub nodes: Vec<NodeSpec>,
	/// Connections between node ids.
	#[serde(default)]
	pub edges: Vec<EdgeSpec>,
}

impl GraphDataset {
	/// A dataset from its parts.
	pub fn new(nodes: Vec<NodeSpec>, edges: Vec<EdgeSpec>) -> Self {
		Self { nodes, edges }
	}

	/// No nodes and no edges.
	pub fn is_empty(&self) -> bool {
		self.nodes.is_empty() && self.edges.is_empty()
	}
}
