use glam::Vec2;

use numlabel::geometry::Rect;
use numlabel::renderer::atlas::UvRect;
use numlabel::renderer::text::{Quad, Vertex, quads_to_mesh};

const WHITE: [f32; 4] = [1.0, 1.0, 1.0, 1.0];

fn quad(x: i32, w: i32) -> Quad {
    Quad {
        uv: UvRect { u1: 0.0, v1: 0.25, u2: 0.5, v2: 0.75 },
        dest: Rect::new(x, 0, x + w, 10),
    }
}

#[test]
fn vertex_is_tightly_packed() {
    assert_eq!(std::mem::size_of::<Vertex>(), 32);
    assert_eq!(Vertex::layout().array_stride, 32);
    assert_eq!(Vertex::layout().attributes.len(), 3);
}

#[test]
fn each_quad_gives_four_vertices_and_six_indices() {
    let (verts, idx) = quads_to_mesh(&[quad(0, 5), quad(5, 5)], Vec2::ZERO, WHITE);
    assert_eq!(verts.len(), 8);
    assert_eq!(idx, vec![0, 1, 2, 1, 3, 2, 4, 5, 6, 5, 7, 6]);
}

#[test]
fn corners_carry_positions_and_uvs() {
    let (verts, _) = quads_to_mesh(&[quad(2, 6)], Vec2::new(100.0, 20.0), WHITE);
    let pos: Vec<[f32; 2]> = verts.iter().map(|v| v.position).collect();
    let uv: Vec<[f32; 2]> = verts.iter().map(|v| v.tex_coords).collect();
    assert_eq!(pos, vec![[102.0, 20.0], [108.0, 20.0], [102.0, 30.0], [108.0, 30.0]]);
    assert_eq!(uv, vec![[0.0, 0.25], [0.5, 0.25], [0.0, 0.75], [0.5, 0.75]]);
}

#[test]
fn color_is_applied_to_every_vertex() {
    let tint = [0.2, 0.4, 0.6, 0.8];
    let (verts, _) = quads_to_mesh(&[quad(0, 1)], Vec2::ZERO, tint);
    assert!(verts.iter().all(|v| v.color == tint));
}

#[test]
fn empty_rectangles_are_skipped() {
    let (verts, idx) = quads_to_mesh(&[quad(0, 0), quad(0, 4)], Vec2::ZERO, WHITE);
    assert_eq!(verts.len(), 4);
    assert_eq!(idx, vec![0, 1, 2, 1, 3, 2]);
}

#[test]
fn no_quads_no_mesh() {
    let (verts, idx) = quads_to_mesh(&[], Vec2::ZERO, WHITE);
    assert!(verts.is_empty() && idx.is_empty());
}

#[test]
fn translated_quad_keeps_its_uv() {
    let q = quad(0, 4).translate(10, -3);
    assert_eq!(q.dest, Rect::new(10, -3, 14, 7));
    assert_eq!(q.uv, quad(0, 4).uv);
}
