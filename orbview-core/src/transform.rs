//! Rotation state and the per-frame model-view / normal matrices
use nalgebra::{Matrix3, Matrix4, Vector3};
use std::f32::consts::PI;

use crate::projection::Frustum;

/// Angle added or removed by a single key press (radians)
pub const ROTATION_STEP: f32 = PI / 20.0;

/// Distance the camera is pulled back along the view axis
pub const CAMERA_DISTANCE: f32 = 5.0;

/// Accumulated rotation around three axes (in radians).
///
/// Angles are never clamped or wrapped; they grow for as long as keys are
/// pressed in one direction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RotationState {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl RotationState {
    pub fn zero() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            z: 0.0,
        }
    }

    /// Rotate by delta amounts (in radians)
    pub fn rotate(&mut self, dx: f32, dy: f32, dz: f32) {
        self.x += dx;
        self.y += dy;
        self.z += dz;
    }

    /// Angles as `[pitch, yaw, roll]`
    pub fn angles(&self) -> [f32; 3] {
        [self.x, self.y, self.z]
    }
}

impl Default for RotationState {
    fn default() -> Self {
        Self::zero()
    }
}

/// Transform builder for 3D transformations
pub struct Transform;

impl Transform {
    /// Rotation about X, then Y, then Z applied to the object
    pub fn rotation_matrix(rotation: &RotationState) -> Matrix4<f32> {
        let rx = Matrix4::new_rotation(Vector3::new(rotation.x, 0.0, 0.0));
        let ry = Matrix4::new_rotation(Vector3::new(0.0, rotation.y, 0.0));
        let rz = Matrix4::new_rotation(Vector3::new(0.0, 0.0, rotation.z));

        rx * ry * rz
    }

    /// Create a translation matrix
    pub fn translation_matrix(x: f32, y: f32, z: f32) -> Matrix4<f32> {
        Matrix4::new_translation(&Vector3::new(x, y, z))
    }

    /// `translate(0, 0, -distance) * Rx * Ry * Rz`
    pub fn model_view(rotation: &RotationState, distance: f32) -> Matrix4<f32> {
        Self::translation_matrix(0.0, 0.0, -distance) * Self::rotation_matrix(rotation)
    }

    /// Inverse-transpose of the upper-left 3x3 block of `model_view`.
    ///
    /// Falls back to the block itself when it is singular, which a rigid
    /// rotation never is.
    pub fn normal_matrix(model_view: &Matrix4<f32>) -> Matrix3<f32> {
        let linear: Matrix3<f32> = model_view.fixed_view::<3, 3>(0, 0).into_owned();
        linear
            .try_inverse()
            .map(|inverse| inverse.transpose())
            .unwrap_or(linear)
    }
}

/// Every matrix the shader needs for one frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransformSet {
    pub model_view: Matrix4<f32>,
    pub projection: Matrix4<f32>,
    pub normal: Matrix3<f32>,
}

impl TransformSet {
    pub fn identity() -> Self {
        Self {
            model_view: Matrix4::identity(),
            projection: Matrix4::identity(),
            normal: Matrix3::identity(),
        }
    }

    /// Derive the full set from the current rotation and viewport frustum
    pub fn derive(rotation: &RotationState, frustum: &Frustum) -> Self {
        let model_view = Transform::model_view(rotation, CAMERA_DISTANCE);
        Self {
            model_view,
            projection: frustum.matrix(),
            normal: Transform::normal_matrix(&model_view),
        }
    }

    pub fn model_view_projection(&self) -> Matrix4<f32> {
        self.projection * self.model_view
    }
}

impl Default for TransformSet {
    fn default() -> Self {
        Self::identity()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::Point3;

    #[test]
    fn test_rotation_state() {
        let mut state = RotationState::zero();
        assert_eq!(state.x, 0.0);
        assert_eq!(state.y, 0.0);
        assert_eq!(state.z, 0.0);

        state.rotate(0.1, 0.2, 0.3);
        assert!((state.x - 0.1).abs() < 1e-6);
        assert!((state.y - 0.2).abs() < 1e-6);
        assert!((state.z - 0.3).abs() < 1e-6);
    }

    #[test]
    fn test_angles_are_unbounded() {
        let mut state = RotationState::zero();
        for _ in 0..100 {
            state.rotate(ROTATION_STEP, 0.0, 0.0);
        }
        assert!((state.x - 5.0 * PI).abs() < 1e-3);
    }

    #[test]
    fn test_identity_rotation() {
        let rotation = RotationState::zero();
        let matrix = Transform::rotation_matrix(&rotation);
        assert!((matrix - Matrix4::identity()).norm() < 1e-6);
    }

    #[test]
    fn test_model_view_pulls_back_camera() {
        let mv = Transform::model_view(&RotationState::zero(), CAMERA_DISTANCE);
        let origin = mv.transform_point(&Point3::origin());
        assert!((origin - Point3::new(0.0, 0.0, -5.0)).norm() < 1e-6);
    }

    #[test]
    fn test_rotation_order_is_x_then_y_then_z() {
        let rotation = RotationState { x: 0.3, y: -0.7, z: 1.1 };
        let expected = Matrix4::from_axis_angle(&Vector3::x_axis(), 0.3)
            * Matrix4::from_axis_angle(&Vector3::y_axis(), -0.7)
            * Matrix4::from_axis_angle(&Vector3::z_axis(), 1.1);
        assert!((Transform::rotation_matrix(&rotation) - expected).norm() < 1e-5);
    }

    #[test]
    fn test_quarter_turn_about_x() {
        let rotation = RotationState { x: PI / 2.0, y: 0.0, z: 0.0 };
        let mv = Transform::model_view(&rotation, 0.0);
        let top = mv.transform_point(&Point3::new(0.0, 1.0, 0.0));
        assert!((top - Point3::new(0.0, 0.0, 1.0)).norm() < 1e-6);
    }

    #[test]
    fn test_normal_matrix_of_rigid_transform_is_rotation() {
        let rotation = RotationState { x: 0.4, y: 1.2, z: -0.8 };
        let mv = Transform::model_view(&rotation, CAMERA_DISTANCE);
        let normal = Transform::normal_matrix(&mv);
        let linear = mv.fixed_view::<3, 3>(0, 0).into_owned();
        assert!((normal - linear).norm() < 1e-5);
    }

    #[test]
    fn test_normal_matrix_handles_scale() {
        let mv = Matrix4::new_nonuniform_scaling(&Vector3::new(2.0, 4.0, 0.5));
        let normal = Transform::normal_matrix(&mv);
        let expected = Matrix3::from_diagonal(&Vector3::new(0.5, 0.25, 2.0));
        assert!((normal - expected).norm() < 1e-6);
    }

    #[test]
    fn test_derive_is_idempotent() {
        let rotation = RotationState { x: 0.9, y: -0.2, z: 3.0 };
        let frustum = Frustum::for_viewport(1024, 768);
        let first = TransformSet::derive(&rotation, &frustum);
        let second = TransformSet::derive(&rotation, &frustum);
        assert_eq!(first, second);
        assert_eq!(first.model_view_projection(), second.model_view_projection());
    }
}
