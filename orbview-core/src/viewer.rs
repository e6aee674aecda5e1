//! Viewer state and the event handler interface window adapters drive
use crate::input::{Key, KeyAction};
use crate::material::BrickMaterial;
use crate::mesh::{MeshError, SphereMesh};
use crate::projection::Frustum;
use crate::transform::{RotationState, TransformSet};

/// Startup parameters. These are fixed; nothing reads them from the
/// command line or a file.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewerConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
    pub levels: u32,
    pub slices: u32,
    pub radius: f32,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            title: "Assignment".to_string(),
            width: 750,
            height: 750,
            levels: 32,
            slices: 32,
            radius: 1.0,
        }
    }
}

/// What the adapter should do after dispatching an event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Continue,
    Redraw,
    Exit,
}

/// Callbacks a window/event adapter invokes on the dispatch thread
pub trait ViewerHandler {
    fn on_resize(&mut self, width: u32, height: u32) -> Control;
    fn on_redraw(&mut self) -> Control;
    fn on_key(&mut self, key: Key) -> Control;
}

/// Everything the render loop owns: the mesh, the rotation angles and the
/// matrices derived from them.
#[derive(Debug, Clone)]
pub struct Viewer {
    mesh: SphereMesh,
    material: BrickMaterial,
    rotation: RotationState,
    frustum: Frustum,
    transforms: TransformSet,
}

impl Viewer {
    pub fn new(config: &ViewerConfig) -> Result<Self, MeshError> {
        let mesh = SphereMesh::uv_sphere(config.levels, config.slices, config.radius)?;
        tracing::debug!(
            vertices = mesh.vertex_count(),
            triangles = mesh.triangle_count(),
            "generated sphere mesh"
        );

        let rotation = RotationState::zero();
        let frustum = Frustum::for_viewport(config.width, config.height);
        Ok(Self {
            transforms: TransformSet::derive(&rotation, &frustum),
            mesh,
            material: BrickMaterial::classic(),
            rotation,
            frustum,
        })
    }

    pub fn mesh(&self) -> &SphereMesh {
        &self.mesh
    }

    pub fn material(&self) -> &BrickMaterial {
        &self.material
    }

    pub fn rotation(&self) -> &RotationState {
        &self.rotation
    }

    pub fn frustum(&self) -> &Frustum {
        &self.frustum
    }

    /// Matrices computed by the most recent redraw
    pub fn transforms(&self) -> &TransformSet {
        &self.transforms
    }
}

impl ViewerHandler for Viewer {
    fn on_resize(&mut self, width: u32, height: u32) -> Control {
        self.frustum = Frustum::for_viewport(width, height);
        tracing::debug!(width, height, "viewport resized");
        Control::Redraw
    }

    fn on_redraw(&mut self) -> Control {
        self.transforms = TransformSet::derive(&self.rotation, &self.frustum);
        Control::Continue
    }

    fn on_key(&mut self, key: Key) -> Control {
        match KeyAction::for_key(key) {
            Some(KeyAction::Exit) => Control::Exit,
            Some(KeyAction::Rotate { dx, dy, dz }) => {
                self.rotation.rotate(dx, dy, dz);
                tracing::trace!(angles = ?self.rotation.angles(), "rotated");
                Control::Redraw
            }
            None => Control::Redraw,
        }
    }
}
