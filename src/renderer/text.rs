use glam::Vec2;

use crate::geometry::Rect;

use super::atlas::UvRect;

// ── Quad ─────────────────────────────────────────────────────────────────────

/// One textured rectangle: where to draw (`dest`, label-local pixels) and
/// which part of the atlas to sample (`uv`).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Quad {
    pub uv: UvRect,
    pub dest: Rect,
}

impl Quad {
    pub fn translate(&self, dx: i32, dy: i32) -> Self {
        Self { uv: self.uv, dest: self.dest.translate(dx, dy) }
    }
}

// ── Vertex ───────────────────────────────────────────────────────────────────

/// A single vertex produced by [`quads_to_mesh`].
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vertex {
    /// Screen-space position in pixels.
    pub position: [f32; 2],
    /// Normalised atlas texture coordinates in `[0, 1]`.
    pub tex_coords: [f32; 2],
    /// Tint multiplied with the sampled texel.
    pub color: [f32; 4],
}

impl Vertex {
    const ATTRIBS: [wgpu::VertexAttribute; 3] = wgpu::vertex_attr_array![
        0 => Float32x2,  // position
        1 => Float32x2,  // tex_coords
        2 => Float32x4,  // color
    ];

    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRIBS,
        }
    }
}

// ── quads_to_mesh ────────────────────────────────────────────────────────────

/// Convert `quads` into a flat vertex + index buffer.
///
/// # Layout
/// Each quad produces **4 vertices** and **6 indices**
/// (two counter-clockwise triangles, Y-axis pointing down):
///
/// ```text
/// 0──1
/// │ /│
/// 2──3
/// triangles: (0,1,2) and (1,3,2)
/// ```
///
/// `origin` is added to every destination rectangle, moving label-local
/// coordinates to screen pixels.  Empty rectangles are skipped.
pub fn quads_to_mesh(quads: &[Quad], origin: Vec2, color: [f32; 4]) -> (Vec<Vertex>, Vec<u32>) {
    let mut vertices: Vec<Vertex> = Vec::with_capacity(quads.len() * 4);
    let mut indices: Vec<u32> = Vec::with_capacity(quads.len() * 6);

    for quad in quads {
        if quad.dest.is_empty() {
            continue;
        }

        let x0 = origin.x + quad.dest.x1 as f32;
        let y0 = origin.y + quad.dest.y1 as f32;
        let x1 = origin.x + quad.dest.x2 as f32;
        let y1 = origin.y + quad.dest.y2 as f32;
        let UvRect { u1, v1, u2, v2 } = quad.uv;

        let base = vertices.len() as u32;

        // Four corners in reading order: top-left, top-right, bottom-left, bottom-right.
        vertices.push(Vertex { position: [x0, y0], tex_coords: [u1, v1], color });
        vertices.push(Vertex { position: [x1, y0], tex_coords: [u2, v1], color });
        vertices.push(Vertex { position: [x0, y1], tex_coords: [u1, v2], color });
        vertices.push(Vertex { position: [x1, y1], tex_coords: [u2, v2], color });

        // Two CCW triangles (Y-down): TL-TR-BL, TR-BR-BL.
        indices.extend_from_slice(&[base, base + 1, base + 2, base + 1, base + 3, base + 2]);
    }

    (vertices, indices)
}
