//! Error types for caller-supplied data
//!
//! The solver math itself never fails; only JSON, geometry, colors and
//! configuration coming from the editor can be rejected.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    /// JSON payload could not be parsed
    #[error("invalid {context} json: {source}")]
    Json {
        context: &'static str,
        #[source]
        source: serde_json::Error,
    },

    /// A position/rotation/scale array without finite-able x, y, z
    #[error("vector needs at least 3 components, got {len}")]
    MalformedVector { len: usize },

    /// Color string that is not `#rrggbb`
    #[error("invalid color {0:?}, expected #rrggbb")]
    InvalidColor(String),

    /// Custom geometry whose vertex buffer doesn't match its stride
    #[error("custom geometry for {id:?}: {len} floats is not a multiple of stride {stride}")]
    InvalidGeometry { id: String, len: usize, stride: usize },

    /// Solver configuration that would make the math undefined
    #[error("invalid solver configuration: {0}")]
    InvalidConfig(String),
}

impl EngineError {
    pub fn json(context: &'static str, source: serde_json::Error) -> Self {
        EngineError::Json { context, source }
    }
}

pub type Result<T> = std::result::Result<T, EngineError>;
