pub mod force_graph;
mod graph_view;

pub use graph_view::TechGraphView;
