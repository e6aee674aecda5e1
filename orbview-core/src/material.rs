//! Fixed brick pattern parameters shared by every renderer
use nalgebra::{Vector2, Vector3};

/// Brick and mortar colours and proportions.
///
/// The GPU fragment stage and the terminal rasterizer both evaluate
/// [`BrickMaterial::is_brick`] on the object-space `xy` of a surface point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BrickMaterial {
    pub brick_size: f32,
    pub brick_color: Vector3<f32>,
    pub mortar_color: Vector3<f32>,
    pub brick_pct: Vector2<f32>,
}

impl BrickMaterial {
    pub fn classic() -> Self {
        Self {
            brick_size: 0.1,
            brick_color: Vector3::new(0.8, 0.0, 0.0),
            mortar_color: Vector3::new(0.4, 0.4, 0.4),
            brick_pct: Vector2::new(0.9, 0.9),
        }
    }

    /// Whether `position` falls on a brick rather than on mortar.
    ///
    /// Every other row is offset by half a brick.
    pub fn is_brick(&self, position: Vector2<f32>) -> bool {
        let mut cell = position / self.brick_size;
        if (cell.y * 0.5).rem_euclid(1.0) > 0.5 {
            cell.x += 0.5;
        }
        let x = cell.x.rem_euclid(1.0);
        let y = cell.y.rem_euclid(1.0);
        x < self.brick_pct.x && y < self.brick_pct.y
    }

    pub fn color_at(&self, position: Vector2<f32>) -> Vector3<f32> {
        if self.is_brick(position) {
            self.brick_color
        } else {
            self.mortar_color
        }
    }
}

impl Default for BrickMaterial {
    fn default() -> Self {
        Self::classic()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classic_constants() {
        let m = BrickMaterial::classic();
        assert_eq!(m.brick_size, 0.1);
        assert_eq!(m.brick_color, Vector3::new(0.8, 0.0, 0.0));
        assert_eq!(m.mortar_color, Vector3::new(0.4, 0.4, 0.4));
        assert_eq!(m.brick_pct, Vector2::new(0.9, 0.9));
    }

    #[test]
    fn test_brick_interior_and_mortar_gap() {
        let m = BrickMaterial::classic();
        // Middle of the first brick
        assert!(m.is_brick(Vector2::new(0.045, 0.045)));
        // Inside the vertical mortar joint at the end of the brick
        assert!(!m.is_brick(Vector2::new(0.095, 0.045)));
        // Inside the horizontal mortar joint
        assert!(!m.is_brick(Vector2::new(0.045, 0.095)));
    }

    #[test]
    fn test_alternate_rows_are_offset() {
        let m = BrickMaterial::classic();
        // Row two is shifted by half a brick, so the joint moves to x = 0.045
        assert!(!m.is_brick(Vector2::new(0.045, 0.145)));
        assert!(m.is_brick(Vector2::new(0.095, 0.145)));
    }

    #[test]
    fn test_negative_coordinates_tile() {
        let m = BrickMaterial::classic();
        assert_eq!(
            m.is_brick(Vector2::new(-0.155, -0.355)),
            m.is_brick(Vector2::new(-0.155 + 0.1, -0.355 + 0.2))
        );
    }

    #[test]
    fn test_color_at() {
        let m = BrickMaterial::classic();
        assert_eq!(m.color_at(Vector2::new(0.045, 0.045)), m.brick_color);
        assert_eq!(m.color_at(Vector2::new(0.045, 0.095)), m.mortar_color);
    }
}
