//! Error types for the blueprint engine.

use thiserror::Error;

/// Errors surfaced by the engine and the render session.
#[derive(Error, Debug)]
pub enum BlueprintError {
    /// An editor addressed a parameter that does not exist.
    #[error("parameter index {index} out of range (store holds {len})")]
    ParameterIndex { index: usize, len: usize },

    /// Generated geometry has no usable height to fit into the viewport.
    #[error("degenerate geometry: bounds height {height} cannot be fitted")]
    DegenerateGeometry { height: f64 },

    /// A viewport dimension or fit factor that would produce no usable scale.
    #[error("invalid layout: {field} = {value} (must be finite and positive)")]
    InvalidLayout { field: &'static str, value: f64 },

    /// The session's drawing surface has been torn down.
    #[error("render session is disposed")]
    Disposed,

    #[error("config error: {0}")]
    Config(#[from] ConfigError),
}

/// Failures while loading a [`crate::BlueprintConfig`].
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid config: {field} = {value} (must be finite and positive)")]
    Invalid { field: &'static str, value: f64 },
}

/// Failures reported by an [`crate::AnalysisProvider`].
#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("no credentials configured for the analysis provider")]
    MissingCredentials,

    #[error("request failed: {0}")]
    Request(String),

    #[error("provider returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("provider returned an empty response")]
    EmptyResponse,

    #[error("could not decode analysis: {0}")]
    Decode(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, BlueprintError>;
