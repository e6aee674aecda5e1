//! Perspective frustum derived from the viewport
use nalgebra::Matrix4;

/// Near clipping plane distance
pub const NEAR_PLANE: f32 = 2.0;

/// Far clipping plane distance
pub const FAR_PLANE: f32 = 20.0;

/// Symmetric perspective frustum in eye space.
///
/// The vertical extent is fixed at `[-1, 1]` on the near plane and the
/// horizontal extent grows with the viewport width, so a sphere stays round
/// when the window is stretched.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frustum {
    pub left: f32,
    pub right: f32,
    pub bottom: f32,
    pub top: f32,
    pub near: f32,
    pub far: f32,
}

impl Frustum {
    pub fn new(left: f32, right: f32, bottom: f32, top: f32, near: f32, far: f32) -> Self {
        Self {
            left,
            right,
            bottom,
            top,
            near,
            far,
        }
    }

    /// Frustum for a `width` x `height` viewport.
    ///
    /// Zero dimensions are treated as one pixel so a minimised window does
    /// not produce an infinite extent.
    pub fn for_viewport(width: u32, height: u32) -> Self {
        let aspect = height.max(1) as f32 / width.max(1) as f32;
        let half_width = 1.0 / aspect;
        Self::new(-half_width, half_width, -1.0, 1.0, NEAR_PLANE, FAR_PLANE)
    }

    pub fn half_width(&self) -> f32 {
        (self.right - self.left) / 2.0
    }

    pub fn half_height(&self) -> f32 {
        (self.top - self.bottom) / 2.0
    }

    /// OpenGL style perspective matrix, mapping eye-space depth to clip z in
    /// `[-w, w]`.
    #[rustfmt::skip]
    pub fn matrix(&self) -> Matrix4<f32> {
        let Self {
            left: l,
            right: r,
            bottom: b,
            top: t,
            near: n,
            far: f,
        } = *self;

        Matrix4::new(
            2.0 * n / (r - l), 0.0, (r + l) / (r - l), 0.0,
            0.0, 2.0 * n / (t - b), (t + b) / (t - b), 0.0,
            0.0, 0.0, -(f + n) / (f - n), -2.0 * f * n / (f - n),
            0.0, 0.0, -1.0, 0.0,
        )
    }
}

impl Default for Frustum {
    fn default() -> Self {
        Self::for_viewport(1, 1)
    }
}
