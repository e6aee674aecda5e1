//! ASCII rasterizer for terminal rendering
use crossterm::{
    cursor,
    style::{Color, Print, ResetColor, SetForegroundColor},
    QueueableCommand,
};
use nalgebra::{Point2, Vector2, Vector3, Vector4};
use std::io::Write;
use orbview_core::{BrickMaterial, SphereMesh, TransformSet};

/// Character luminosity ramp for shading (darkest to lightest)
const LUMINOSITY_RAMP: &[char] = &[' ', '.', ':', '-', '=', '+', '*', '#', '%', '@'];

/// Eye-space light direction, same as the GPU vertex stage
const LIGHT_DIRECTION: [f32; 3] = [0.3, 0.5, 1.0];
const AMBIENT: f32 = 0.25;

/// A vertex after projection: screen position, NDC depth and the object-space
/// `xy` the brick pattern is evaluated on
#[derive(Debug, Clone, Copy)]
struct ScreenVertex {
    x: f32,
    y: f32,
    depth: f32,
    pattern: Point2<f32>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Cell {
    glyph: char,
    color: Color,
}

impl Cell {
    const BLANK: Cell = Cell {
        glyph: ' ',
        color: Color::Reset,
    };
}

/// ASCII renderer that converts the sphere to terminal characters
pub struct AsciiRenderer {
    width: usize,
    height: usize,
    depth_buffer: Vec<f32>,
    cells: Vec<Cell>,
}

impl AsciiRenderer {
    pub fn new(width: usize, height: usize) -> Self {
        let size = width * height;
        Self {
            width,
            height,
            depth_buffer: vec![f32::INFINITY; size],
            cells: vec![Cell::BLANK; size],
        }
    }

    pub fn resize(&mut self, width: usize, height: usize) {
        *self = Self::new(width, height);
    }

    pub fn size(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    pub fn clear(&mut self) {
        self.depth_buffer.fill(f32::INFINITY);
        self.cells.fill(Cell::BLANK);
    }

    /// Glyph at column `x`, row `y`
    pub fn glyph_at(&self, x: usize, y: usize) -> Option<char> {
        (x < self.width && y < self.height).then(|| self.cells[y * self.width + x].glyph)
    }

    pub fn render_mesh(
        &mut self,
        mesh: &SphereMesh,
        transforms: &TransformSet,
        material: &BrickMaterial,
    ) {
        let mvp = transforms.model_view_projection();
        let projected: Vec<Option<ScreenVertex>> = mesh
            .positions()
            .iter()
            .map(|p| self.project(&(mvp * p.to_homogeneous()), Point2::new(p.x, p.y)))
            .collect();

        let light = Vector3::from(LIGHT_DIRECTION).normalize();
        for [a, b, c] in mesh.triangles() {
            let (a, b, c) = (a as usize, b as usize, c as usize);
            let (Some(va), Some(vb), Some(vc)) = (projected[a], projected[b], projected[c]) else {
                continue; // Triangle crosses the camera plane
            };

            let normal = mesh.normals()[a] + mesh.normals()[b] + mesh.normals()[c];
            let eye_normal = (transforms.normal * normal).normalize();
            let brightness = AMBIENT + (1.0 - AMBIENT) * eye_normal.dot(&light).max(0.0);

            self.rasterize_triangle([va, vb, vc], brightness, material);
        }
    }

    fn project(&self, clip: &Vector4<f32>, pattern: Point2<f32>) -> Option<ScreenVertex> {
        // Prevent division by near-zero or negative w
        if clip.w < 1e-6 {
            return None;
        }

        let ndc = clip.xyz() / clip.w;
        Some(ScreenVertex {
            x: (ndc.x + 1.0) * 0.5 * self.width as f32,
            y: (1.0 - ndc.y) * 0.5 * self.height as f32,
            depth: ndc.z,
            pattern,
        })
    }

    fn rasterize_triangle(&mut self, v: [ScreenVertex; 3], brightness: f32, material: &BrickMaterial) {
        if self.width == 0 || self.height == 0 {
            return;
        }
        let [v0, v1, v2] = v;

        // Bounding box
        let min_x = v0.x.min(v1.x).min(v2.x).floor() as i32;
        let max_x = v0.x.max(v1.x).max(v2.x).ceil() as i32;
        let min_y = v0.y.min(v1.y).min(v2.y).floor() as i32;
        let max_y = v0.y.max(v1.y).max(v2.y).ceil() as i32;

        // Clip to screen bounds
        let min_x = min_x.max(0);
        let max_x = max_x.min(self.width as i32 - 1);
        let min_y = min_y.max(0);
        let max_y = max_y.min(self.height as i32 - 1);

        let ramp_index = (brightness * (LUMINOSITY_RAMP.len() - 1) as f32) as usize;
        let glyph = LUMINOSITY_RAMP[ramp_index.min(LUMINOSITY_RAMP.len() - 1)];

        for y in min_y..=max_y {
            for x in min_x..=max_x {
                let p = (x as f32 + 0.5, y as f32 + 0.5);
                let Some((w0, w1, w2)) = barycentric((v0.x, v0.y), (v1.x, v1.y), (v2.x, v2.y), p)
                else {
                    continue;
                };
                if w0 < 0.0 || w1 < 0.0 || w2 < 0.0 {
                    continue;
                }

                let depth = w0 * v0.depth + w1 * v1.depth + w2 * v2.depth;
                let idx = y as usize * self.width + x as usize;
                if depth >= self.depth_buffer[idx] {
                    continue;
                }

                let pattern: Vector2<f32> =
                    v0.pattern.coords * w0 + v1.pattern.coords * w1 + v2.pattern.coords * w2;
                let rgb = material.color_at(pattern) * brightness * 255.0;

                self.depth_buffer[idx] = depth;
                self.cells[idx] = Cell {
                    glyph,
                    color: Color::Rgb {
                        r: rgb.x.clamp(0.0, 255.0) as u8,
                        g: rgb.y.clamp(0.0, 255.0) as u8,
                        b: rgb.z.clamp(0.0, 255.0) as u8,
                    },
                };
            }
        }
    }

    pub fn draw<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        for y in 0..self.height {
            writer.queue(cursor::MoveTo(0, y as u16))?;
            for cell in &self.cells[y * self.width..(y + 1) * self.width] {
                writer.queue(SetForegroundColor(cell.color))?;
                writer.queue(Print(cell.glyph))?;
            }
        }
        writer.queue(ResetColor)?;
        Ok(())
    }
}

/// Calculate barycentric coordinates for a point in a triangle
fn barycentric(
    v0: (f32, f32),
    v1: (f32, f32),
    v2: (f32, f32),
    p: (f32, f32),
) -> Option<(f32, f32, f32)> {
    let denom = (v1.1 - v2.1) * (v0.0 - v2.0) + (v2.0 - v1.0) * (v0.1 - v2.1);

    if denom.abs() < 1e-6 {
        return None;
    }

    let w0 = ((v1.1 - v2.1) * (p.0 - v2.0) + (v2.0 - v1.0) * (p.1 - v2.1)) / denom;
    let w1 = ((v2.1 - v0.1) * (p.0 - v2.0) + (v0.0 - v2.0) * (p.1 - v2.1)) / denom;
    let w2 = 1.0 - w0 - w1;

    Some((w0, w1, w2))
}
