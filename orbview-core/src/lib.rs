//! orbview core library - sphere geometry, transforms and viewer state
//!
//! This library holds everything the viewer computes without touching a
//! window or a GPU: UV sphere generation, the rotation/projection matrices,
//! keyboard mapping and the handler the window adapters drive.

pub mod input;
pub mod material;
pub mod mesh;
pub mod projection;
pub mod transform;
pub mod viewer;

// Re-export commonly used types
pub use input::{Key, KeyAction, ESCAPE_CODE};
pub use material::BrickMaterial;
pub use mesh::{MeshError, SphereMesh};
pub use projection::Frustum;
pub use transform::{RotationState, Transform, TransformSet};
pub use viewer::{Control, Viewer, ViewerConfig, ViewerHandler};
