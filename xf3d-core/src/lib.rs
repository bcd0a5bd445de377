/// XF3D Core Library - Affine transform teaching model
///
/// This library provides the toolkit-independent part of the demo: the
/// reference wireframe, homogeneous transformation matrices, planar
/// projections and the key-to-command dispatcher.

pub mod error;
pub mod geometry;
pub mod obj;
pub mod projection;
pub mod scene;
pub mod transform;

// Re-export commonly used types
pub use error::{Error, Result};
pub use geometry::{Edge, Wireframe};
pub use projection::{project, Bounds2, Camera, Plane};
pub use scene::{command_for, dispatch, Command, Key, Scene, Steps};
pub use transform::{format_matrix, Axis, TransformState};
