//! In-process canvas engine driven by the `force_graph` simulation.

mod engine;
mod render;
mod state;

pub use engine::CanvasEngine;
