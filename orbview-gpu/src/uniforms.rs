//! Uniform block shared by `example.vx` and `example.ft`.

use nalgebra::{Matrix3, Matrix4};
use orbview_core::{BrickMaterial, TransformSet};

/// Maps OpenGL clip depth `[-w, w]` to the `[0, w]` range wgpu expects.
#[rustfmt::skip]
pub fn clip_depth_correction() -> Matrix4<f32> {
    Matrix4::new(
        1.0, 0.0, 0.0, 0.0,
        0.0, 1.0, 0.0, 0.0,
        0.0, 0.0, 0.5, 0.5,
        0.0, 0.0, 0.0, 1.0,
    )
}

/// Per-frame uniforms, laid out to match the WGSL `Uniforms` struct.
///
/// Matrices are column-major; each `mat3x3` column is padded to 16 bytes.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct ShaderUniforms {
    pub modelview_projection_matrix: [[f32; 4]; 4],
    pub normal_matrix: [[f32; 4]; 3],
    pub brick_color: [f32; 3],
    pub brick_size: f32,
    pub mortar_color: [f32; 3],
    pub _pad0: f32,
    pub brick_pct: [f32; 2],
    pub _pad1: [f32; 2],
}

impl ShaderUniforms {
    pub fn new(transforms: &TransformSet, material: &BrickMaterial) -> Self {
        let mvp = clip_depth_correction() * transforms.model_view_projection();
        Self {
            modelview_projection_matrix: mat4_columns(&mvp),
            normal_matrix: mat3_columns(&transforms.normal),
            brick_color: material.brick_color.into(),
            brick_size: material.brick_size,
            mortar_color: material.mortar_color.into(),
            _pad0: 0.0,
            brick_pct: material.brick_pct.into(),
            _pad1: [0.0; 2],
        }
    }
}

fn mat4_columns(m: &Matrix4<f32>) -> [[f32; 4]; 4] {
    let mut out = [[0.0; 4]; 4];
    for (c, column) in out.iter_mut().enumerate() {
        for (r, value) in column.iter_mut().enumerate() {
            *value = m[(r, c)];
        }
    }
    out
}

fn mat3_columns(m: &Matrix3<f32>) -> [[f32; 4]; 3] {
    let mut out = [[0.0; 4]; 3];
    for (c, column) in out.iter_mut().enumerate() {
        for r in 0..3 {
            column[r] = m[(r, c)];
        }
    }
    out
}
