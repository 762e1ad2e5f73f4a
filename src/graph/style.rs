//! Classification → visual treatment.
//!
//! A single [`StyleRules`] table feeds every engine; engines only differ in how
//! they express it (selector stylesheet, inline node attributes, canvas draw
//! calls).

use serde::{Deserialize, Serialize};

use super::types::Classification;

/// Outline a node is drawn with.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeShape {
	/// Rhombus, used for categories.
	Diamond,
	/// Circle.
	Dot,
	/// Rounded rectangle.
	Box,
}

/// Label typography. Labels are outlined so they stay legible over edges.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FontStyle {
	/// Font size in pixels.
	pub size: f64,
	/// Fill colour of the glyphs.
	pub color: String,
	/// Outline width in pixels; `0` disables the outline.
	pub stroke_width: f64,
	/// Outline colour.
	pub stroke_color: String,
	/// Bold weight.
	#[serde(default)]
	pub bold: bool,
}

impl FontStyle {
	fn outlined(size: f64, stroke_width: f64) -> Self {
		Self {
			size,
			color: "#ffffff".into(),
			stroke_width,
			stroke_color: "#000000".into(),
			bold: false,
		}
	}
}

/// Resolved look of one classification.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct VisualStyle {
	/// Node outline.
	pub shape: NodeShape,
	/// Radius-like size unit; engines that size by diameter double it.
	pub size: f64,
	/// Background colour.
	pub fill: String,
	/// Border colour.
	pub border: String,
	/// Border width in pixels.
	pub border_width: f64,
	/// Label typography.
	pub font: FontStyle,
	/// Drop shadow under the node.
	#[serde(default)]
	pub shadow: bool,
	/// Drawn with a thicker, contrasting border and raised above other nodes.
	#[serde(default)]
	pub emphasized: bool,
}

/// Look shared by every edge.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EdgeStyle {
	/// Line width in pixels.
	pub width: f64,
	/// Line colour.
	pub color: String,
	/// Line colour while selected or hovered.
	pub highlight: String,
	/// Draw an arrowhead at the target end.
	pub arrows: bool,
	/// Curved rather than straight lines.
	pub smooth: bool,
}

impl Default for EdgeStyle {
	fn default() -> Self {
		Self {
			width: 2.0,
			color: "#848484".into(),
			highlight: "#c8c8c8".into(),
			arrows: false,
			smooth: true,
		}
	}
}

/// Classification → style table. Missing fields in JSON keep their defaults.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StyleRules {
	/// [`Classification::Category`] nodes.
	pub category: VisualStyle,
	/// [`Classification::Technology`] nodes.
	pub technology: VisualStyle,
	/// [`Classification::TechnologyHighlighted`] nodes.
	pub technology_highlighted: VisualStyle,
	/// [`Classification::Book`] nodes.
	pub book: VisualStyle,
	/// [`Classification::BookHighlighted`] nodes.
	pub book_highlighted: VisualStyle,
	/// Applied to unclassified nodes and as the base every engine starts from.
	pub unclassified: VisualStyle,
	/// Every edge.
	pub edge: EdgeStyle,
}

impl StyleRules {
	/// Style for `group`; unclassified nodes get the default style.
	pub fn style_for(&self, group: Classification) -> &VisualStyle {
		match group {
			Classification::Category => &self.category,
			Classification::Technology => &self.technology,
			Classification::TechnologyHighlighted => &self.technology_highlighted,
			Classification::Book => &self.book,
			Classification::BookHighlighted => &self.book_highlighted,
			Classification::Unclassified => &self.unclassified,
		}
	}

	/// Classified rules in a stable order, for engines that emit one rule per group.
	pub fn rules(&self) -> impl Iterator<Item = (Classification, &VisualStyle)> {
		Classification::CLASSIFIED
			.into_iter()
			.map(move |group| (group, self.style_for(group)))
	}
}

impl Default for StyleRules {
	fn default() -> Self {
		Self {
			category: VisualStyle {
				shape: NodeShape::Diamond,
				size: 30.0,
				fill: "#4a90e2".into(),
				border: "#2171b5".into(),
				border_width: 3.0,
				font: FontStyle {
					bold: true,
					..FontStyle::outlined(16.0, 2.0)
				},
				shadow: true,
				emphasized: false,
			},
			technology: VisualStyle {
				shape: NodeShape::Dot,
				size: 20.0,
				fill: "#7b68ee".into(),
				border: "#5a4fcf".into(),
				border_width: 2.0,
				font: FontStyle::outlined(12.0, 1.0),
				shadow: true,
				emphasized: false,
			},
			technology_highlighted: VisualStyle {
				shape: NodeShape::Dot,
				size: 25.0,
				fill: "#ff6b6b".into(),
				border: "#e55454".into(),
				border_width: 3.0,
				font: FontStyle::outlined(13.0, 2.0),
				shadow: true,
				emphasized: true,
			},
			book: VisualStyle {
				shape: NodeShape::Box,
				size: 15.0,
				fill: "#ffa726".into(),
				border: "#ef6c00".into(),
				border_width: 2.0,
				font: FontStyle::outlined(10.0, 1.0),
				shadow: true,
				emphasized: false,
			},
			book_highlighted: VisualStyle {
				shape: NodeShape::Box,
				size: 18.0,
				fill: "#66bb6a".into(),
				border: "#4caf50".into(),
				border_width: 3.0,
				font: FontStyle::outlined(11.0, 2.0),
				shadow: true,
				emphasized: true,
			},
			unclassified: VisualStyle {
				shape: NodeShape::Dot,
				size: 16.0,
				fill: "#666666".into(),
				border: "#4d4d4d".into(),
				border_width: 2.0,
				font: FontStyle::outlined(14.0, 0.0),
				shadow: true,
				emphasized: false,
			},
			edge: EdgeStyle::default(),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn style_table_matches_classifications() {
		let rules = StyleRules::default();
		// (group, shape, size, fill, border, border width, font size, stroke width, bold)
		let expect = [
			(Classification::Category, NodeShape::Diamond, 30.0, "#4a90e2", "#2171b5", 3.0, 16.0, 2.0, true),
			(Classification::Technology, NodeShape::Dot, 20.0, "#7b68ee", "#5a4fcf", 2.0, 12.0, 1.0, false),
			(Classification::TechnologyHighlighted, NodeShape::Dot, 25.0, "#ff6b6b", "#e55454", 3.0, 13.0, 2.0, false),
			(Classification::Book, NodeShape::Box, 15.0, "#ffa726", "#ef6c00", 2.0, 10.0, 1.0, false),
			(Classification::BookHighlighted, NodeShape::Box, 18.0, "#66bb6a", "#4caf50", 3.0, 11.0, 2.0, false),
			(Classification::Unclassified, NodeShape::Dot, 16.0, "#666666", "#4d4d4d", 2.0, 14.0, 0.0, false),
		];
		for (group, shape, size, fill, border, border_width, font_size, stroke, bold) in expect {
			let style = rules.style_for(group);
			assert_eq!(style.shape, shape, "{group}");
			assert_eq!(style.size, size, "{group}");
			assert_eq!(style.fill, fill, "{group}");
			assert_eq!(style.border, border, "{group}");
			assert_eq!(style.border_width, border_width, "{group}");
			assert_eq!(style.font.size, font_size, "{group}");
			assert_eq!(style.font.stroke_width, stroke, "{group}");
			assert_eq!(style.font.bold, bold, "{group}");
			assert_eq!(style.font.color, "#ffffff", "{group}");
			assert_eq!(style.font.stroke_color, "#000000", "{group}");
		}
	}

	#[test]
	fn relative_sizes_follow_importance() {
		let rules = StyleRules::default();
		let size = |g| rules.style_for(g).size;
		assert!(size(Classification::Category) > size(Classification::TechnologyHighlighted));
		assert!(size(Classification::TechnologyHighlighted) > size(Classification::Technology));
		assert!(size(Classification::BookHighlighted) > size(Classification::Book));
		assert!(rules.category.font.bold);
	}

	#[test]
	fn highlighted_groups_are_emphasized() {
		let rules = StyleRules::default();
		let emphasized: Vec<_> = rules
			.rules()
			.filter(|(_, style)| style.emphasized)
			.map(|(group, _)| group)
			.collect();
		assert_eq!(
			emphasized,
			vec![Classification::TechnologyHighlighted, Classification::BookHighlighted]
		);
	}

	#[test]
	fn partial_override_keeps_defaults() {
		let rules: StyleRules = serde_json::from_str(r##"{"edge": {
			"width": 1.5, "color": "#555", "highlight": "#999", "arrows": true, "smooth": false
		}}"##)
		.unwrap();
		assert!(rules.edge.arrows);
		assert_eq!(rules.edge.color, "#555");
		assert_eq!(rules.category, StyleRules::default().category);
	}
}
