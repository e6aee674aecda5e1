//! Procedural UV sphere geometry
use nalgebra::{Point3, Vector2, Vector3};
use std::f32::consts::PI;

/// Rejected sphere parameters
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum MeshError {
    #[error("sphere needs at least 2 latitude levels, got {0}")]
    TooFewLevels(u32),

    #[error("sphere needs at least 2 longitude slices, got {0}")]
    TooFewSlices(u32),

    #[error("sphere radius must be finite and positive, got {0}")]
    InvalidRadius(f32),

    #[error("{levels}x{slices} sphere has more vertices than 32-bit indices can address")]
    TooManyVertices { levels: u32, slices: u32 },
}

/// Indexed triangle mesh with parallel vertex attribute arrays.
///
/// `positions`, `normals` and `texcoords` always have the same length and are
/// addressed by the vertex ids stored in `indices`, three per triangle.
#[derive(Debug, Clone, PartialEq)]
pub struct SphereMesh {
    positions: Vec<Point3<f32>>,
    normals: Vec<Vector3<f32>>,
    texcoords: Vec<Vector2<f32>>,
    indices: Vec<u32>,
}

impl SphereMesh {
    /// Build a UV sphere centred at the origin with the poles on the Y axis.
    ///
    /// `levels` is the number of latitude bands and `slices` the number of
    /// vertices per interior ring. Triangles are wound counter-clockwise when
    /// seen from outside the sphere and the seam is closed by wrapping
    /// longitude indices modulo `slices`.
    pub fn uv_sphere(levels: u32, slices: u32, radius: f32) -> Result<Self, MeshError> {
        if levels < 2 {
            return Err(MeshError::TooFewLevels(levels));
        }
        if slices < 2 {
            return Err(MeshError::TooFewSlices(slices));
        }
        if !radius.is_finite() || radius <= 0.0 {
            return Err(MeshError::InvalidRadius(radius));
        }
        if 2 + (levels as u64 - 1) * slices as u64 > u32::MAX as u64 {
            return Err(MeshError::TooManyVertices { levels, slices });
        }

        let vertex_count = Self::expected_vertex_count(levels, slices);
        let mut mesh = Self {
            positions: Vec::with_capacity(vertex_count),
            normals: Vec::with_capacity(vertex_count),
            texcoords: Vec::with_capacity(vertex_count),
            indices: Vec::with_capacity(Self::expected_index_count(levels, slices)),
        };

        mesh.push_vertex(Vector3::y(), radius, Vector2::new(0.5, 0.0));

        let seam = (slices - 1) as f32;
        for i in 1..levels {
            let theta = PI * i as f32 / levels as f32;
            for j in 0..slices {
                let phi = 2.0 * PI * j as f32 / seam;
                let dir = Vector3::new(theta.sin() * phi.cos(), theta.cos(), theta.sin() * phi.sin());
                let uv = Vector2::new(j as f32 / seam, i as f32 / levels as f32);
                mesh.push_vertex(dir, radius, uv);
            }
        }

        mesh.push_vertex(-Vector3::y(), radius, Vector2::new(0.5, 1.0));

        mesh.build_indices(levels, slices);
        Ok(mesh)
    }

    /// Number of vertices a sphere of this resolution has.
    pub fn expected_vertex_count(levels: u32, slices: u32) -> usize {
        2 + (levels as usize - 1) * slices as usize
    }

    /// Number of indices a sphere of this resolution has.
    pub fn expected_index_count(levels: u32, slices: u32) -> usize {
        6 * slices as usize * (levels as usize - 1)
    }

    fn push_vertex(&mut self, dir: Vector3<f32>, radius: f32, uv: Vector2<f32>) {
        self.positions.push(Point3::from(dir * radius));
        self.normals.push(dir);
        self.texcoords.push(uv);
    }

    fn build_indices(&mut self, levels: u32, slices: u32) {
        let ring = |r: u32, j: u32| 1 + r * slices + j % slices;
        let south = 1 + (levels - 1) * slices;

        // Top cap
        for j in 0..slices {
            self.push_triangle(ring(0, j), 0, ring(0, j + 1));
        }

        // Bands between interior rings
        for r in 0..levels - 2 {
            for j in 0..slices {
                self.push_triangle(ring(r, j), ring(r, j + 1), ring(r + 1, j));
                self.push_triangle(ring(r + 1, j), ring(r, j + 1), ring(r + 1, j + 1));
            }
        }

        // Bottom cap
        let last = levels - 2;
        for j in 0..slices {
            self.push_triangle(south, ring(last, j), ring(last, j + 1));
        }
    }

    fn push_triangle(&mut self, a: u32, b: u32, c: u32) {
        self.indices.extend_from_slice(&[a, b, c]);
    }

    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    pub fn positions(&self) -> &[Point3<f32>] {
        &self.positions
    }

    pub fn normals(&self) -> &[Vector3<f32>] {
        &self.normals
    }

    pub fn texcoords(&self) -> &[Vector2<f32>] {
        &self.texcoords
    }

    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    /// Iterate over triangles as vertex id triplets
    pub fn triangles(&self) -> impl Iterator<Item = [u32; 3]> + '_ {
        self.indices.chunks_exact(3).map(|t| [t[0], t[1], t[2]])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RESOLUTIONS: &[(u32, u32)] = &[(2, 2), (2, 3), (3, 4), (8, 12), (32, 32)];

    #[test]
    fn test_vertex_and_index_counts() {
        for &(levels, slices) in RESOLUTIONS {
            let mesh = SphereMesh::uv_sphere(levels, slices, 1.0).unwrap();
            let expected = 2 + (levels as usize - 1) * slices as usize;
            assert_eq!(mesh.vertex_count(), expected);
            assert_eq!(mesh.normals().len(), expected);
            assert_eq!(mesh.texcoords().len(), expected);
            assert_eq!(mesh.indices().len(), 6 * slices as usize * (levels as usize - 1));
            assert_eq!(mesh.indices().len() % 3, 0);
        }
    }

    #[test]
    fn test_normals_are_unit_length() {
        let mesh = SphereMesh::uv_sphere(16, 24, 2.5).unwrap();
        for n in mesh.normals() {
            assert!((n.norm() - 1.0).abs() < 1e-5, "normal {n:?} is not unit");
        }
    }

    #[test]
    fn test_positions_lie_on_sphere() {
        let radius = 3.75;
        let mesh = SphereMesh::uv_sphere(10, 7, radius).unwrap();
        for p in mesh.positions() {
            assert!((p.coords.norm() - radius).abs() < 1e-4);
        }
    }

    #[test]
    fn test_indices_in_range_and_distinct() {
        for &(levels, slices) in RESOLUTIONS {
            let mesh = SphereMesh::uv_sphere(levels, slices, 1.0).unwrap();
            let count = mesh.vertex_count() as u32;
            for [a, b, c] in mesh.triangles() {
                assert!(a < count && b < count && c < count);
                assert!(a != b && b != c && a != c, "degenerate triangle {a} {b} {c}");
            }
        }
    }

    #[test]
    fn test_poles() {
        let mesh = SphereMesh::uv_sphere(6, 8, 2.0).unwrap();
        let last = mesh.vertex_count() - 1;

        assert_eq!(mesh.positions()[0], Point3::new(0.0, 2.0, 0.0));
        assert_eq!(mesh.normals()[0], Vector3::new(0.0, 1.0, 0.0));
        assert_eq!(mesh.texcoords()[0], Vector2::new(0.5, 0.0));

        assert_eq!(mesh.positions()[last], Point3::new(0.0, -2.0, 0.0));
        assert_eq!(mesh.normals()[last], Vector3::new(0.0, -1.0, 0.0));
        assert_eq!(mesh.texcoords()[last], Vector2::new(0.5, 1.0));
    }

    #[test]
    fn test_texcoords_cover_unit_square() {
        let mesh = SphereMesh::uv_sphere(4, 5, 1.0).unwrap();
        // First interior ring starts at u = 0 and ends at u = 1
        assert!((mesh.texcoords()[1].x - 0.0).abs() < 1e-6);
        assert!((mesh.texcoords()[5].x - 1.0).abs() < 1e-6);
        assert!((mesh.texcoords()[1].y - 0.25).abs() < 1e-6);
        for uv in mesh.texcoords() {
            assert!((0.0..=1.0).contains(&uv.x) && (0.0..=1.0).contains(&uv.y));
        }
    }

    #[test]
    fn test_top_cap_winding() {
        let mesh = SphereMesh::uv_sphere(4, 6, 1.0).unwrap();
        let first: Vec<u32> = mesh.triangles().take(1).flatten().collect();
        assert_eq!(first, vec![1, 0, 2]);

        // Last cap triangle wraps back to the start of the ring
        let wrap = mesh.triangles().nth(5).unwrap();
        assert_eq!(wrap, [6, 0, 1]);
    }

    #[test]
    fn test_triangles_face_outward() {
        for &(levels, slices) in &[(8, 12), (32, 32), (3, 5)] {
            let mesh = SphereMesh::uv_sphere(levels, slices, 1.0).unwrap();
            let p = mesh.positions();

            let mut outward = 0;
            let mut seam = 0;
            for [a, b, c] in mesh.triangles() {
                let (a, b, c) = (p[a as usize], p[b as usize], p[c as usize]);
                let normal = (b - a).cross(&(c - a));
                // The last column of every ring sits on top of the first one
                if normal.norm() < 1e-5 {
                    seam += 1;
                    continue;
                }
                let centroid = (a.coords + b.coords + c.coords) / 3.0;
                assert!(
                    normal.dot(&centroid) > 0.0,
                    "{levels}x{slices}: triangle at {centroid:?} faces inward"
                );
                outward += 1;
            }

            assert_eq!(seam, 2 * (levels as usize - 1));
            assert_eq!(outward + seam, mesh.triangle_count());
        }
    }

    #[test]
    fn test_deterministic() {
        let a = SphereMesh::uv_sphere(12, 9, 1.5).unwrap();
        let b = SphereMesh::uv_sphere(12, 9, 1.5).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_invalid_parameters() {
        assert_eq!(SphereMesh::uv_sphere(1, 8, 1.0), Err(MeshError::TooFewLevels(1)));
        assert_eq!(SphereMesh::uv_sphere(8, 1, 1.0), Err(MeshError::TooFewSlices(1)));
        assert_eq!(SphereMesh::uv_sphere(8, 8, 0.0), Err(MeshError::InvalidRadius(0.0)));
        assert_eq!(SphereMesh::uv_sphere(8, 8, -1.0), Err(MeshError::InvalidRadius(-1.0)));
        assert!(matches!(
            SphereMesh::uv_sphere(8, 8, f32::NAN),
            Err(MeshError::InvalidRadius(_))
        ));
    }

    #[test]
    fn test_resolution_beyond_u32_indices() {
        assert_eq!(
            SphereMesh::uv_sphere(u32::MAX, 3, 1.0),
            Err(MeshError::TooManyVertices { levels: u32::MAX, slices: 3 })
        );
        assert_eq!(
            SphereMesh::uv_sphere(65_537, 65_537, 1.0),
            Err(MeshError::TooManyVertices { levels: 65_537, slices: 65_537 })
        );
    }

    #[test]
    fn test_error_display() {
        let err = MeshError::TooFewSlices(0);
        assert_eq!(err.to_string(), "sphere needs at least 2 longitude slices, got 0");
    }
}
