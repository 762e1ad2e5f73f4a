//! Engine-independent graph view adapter: dataset model, style rules, layout
//! configuration and the controller that owns the live view.

mod engine;
mod error;
mod layout;
mod style;
mod types;
mod view;

pub use engine::{
	EngineKind, HostDocument, MountRequest, ParseEngineKindError, RenderEngine, ViewHandle,
};
pub use error::RenderError;
pub use layout::{InteractionConfig, LayoutConfig};
pub use style::{EdgeStyle, FontStyle, NodeShape, StyleRules, VisualStyle};
pub use types::{Classification, EdgeSpec, GraphDataset, NodeSpec};
pub use view::GraphView;
