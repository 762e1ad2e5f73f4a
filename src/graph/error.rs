use thiserror::Error;

use super::engine::EngineKind;

/// Failure of a single render call. All variants are terminal for that call;
/// callers retry by rendering again.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RenderError {
	/// The mount point id did not resolve to an element.
	#[error("graph container not found: {id}")]
	ContainerNotFound {
		/// The id that was looked up.
		id: String,
	},

	/// The engine's library is not loaded or not registered.
	#[error("rendering engine {engine} is not available")]
	EngineUnavailable {
		/// The engine that was requested.
		engine: EngineKind,
	},

	/// The engine refused the dataset or options.
	#[error("rendering engine {engine} failed to construct the view: {message}")]
	EngineConstruction {
		/// The engine that failed.
		engine: EngineKind,
		/// What the engine reported.
		message: String,
	},

	/// A layout override failed validation.
	#[error("invalid layout configuration: {0}")]
	InvalidLayout(String),

	/// Converting the dataset or options for the engine failed.
	#[error("serialization error: {0}")]
	Serialization(String),
}

impl RenderError {
	/// Shorthand for [`RenderError::EngineConstruction`].
	pub fn construction(engine: EngineKind, message: impl Into<String>) -> Self {
		RenderError::EngineConstruction {
			engine,
			message: message.into(),
		}
	}
}

impl From<serde_json::Error> for RenderError {
	fn from(err: serde_json::Error) -> Self {
		RenderError::Serialization(err.to_string())
	}
}
