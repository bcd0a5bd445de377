/// Error type shared by model loading and label parsing
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    #[error("edge {edge} references vertex {index}, but the model has {vertex_count} vertices")]
    EdgeOutOfRange {
        edge: usize,
        index: usize,
        vertex_count: usize,
    },

    #[error("line {line}: vertex reference {reference} out of range ({vertex_count} vertices)")]
    VertexReference {
        line: usize,
        reference: i64,
        vertex_count: usize,
    },

    #[error("model has no vertices")]
    EmptyModel,

    #[error("line {line}: {message}")]
    Parse { line: usize, message: String },

    #[error("unknown axis `{0}` (expected x, y or z)")]
    UnknownAxis(String),

    #[error("unknown projection plane `{0}` (expected Oxy, Oxz or Oyz)")]
    UnknownPlane(String),
}

pub type Result<T> = std::result::Result<T, Error>;
