use numlabel::error::UploadError;
use numlabel::geometry::Rect;
use numlabel::renderer::atlas::{AtlasBuilder, UvRect};
use numlabel::renderer::raster::SegmentRasterizer;
use numlabel::renderer::text::Quad;
use numlabel::renderer::texture::{TextureData, TextureUploader};
use numlabel::ui::{CornerLayout, Widget};
use numlabel::AtlasConfig;

/// Widget with a fixed natural size that paints one quad covering itself.
#[derive(Debug)]
struct Block {
    w: i32,
    h: i32,
    dirty: bool,
}

impl Block {
    fn new(w: i32, h: i32) -> Self {
        Self { w, h, dirty: false }
    }
}

impl Widget for Block {
    fn preferred_size(&self) -> (i32, i32) {
        (self.w, self.h)
    }

    fn draw(&self) -> Vec<Quad> {
        vec![Quad { uv: UvRect::default(), dest: Rect::new(0, 0, self.w, self.h) }]
    }

    fn needs_relayout(&self) -> bool {
        self.dirty
    }

    fn take_relayout(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }
}

struct NullUploader;

impl TextureUploader for NullUploader {
    type Texture = ();

    fn upload(&mut self, _data: &TextureData<'_>) -> Result<(), UploadError> {
        Ok(())
    }
}

const SCREEN: Rect = Rect::from_origin_size(0, 0, 400, 300);

// ── Children ─────────────────────────────────────────────────────────────────

#[test]
fn empty_layout_draws_nothing() {
    let mut layout: CornerLayout<Block> = CornerLayout::new();
    layout.allocate(SCREEN);
    assert!(layout.child_box().is_none());
    assert!(layout.draw().is_empty());
    assert_eq!(layout.children().count(), 0);
    assert_eq!(layout.allocation(), SCREEN);
}

#[test]
fn second_child_is_refused() {
    let mut layout = CornerLayout::new();
    assert!(layout.add(Block::new(10, 10)).is_ok());
    let rejected = layout.add(Block::new(20, 20)).unwrap_err();
    assert_eq!(rejected.preferred_size(), (20, 20));
    assert_eq!(layout.child().map(Block::preferred_size), Some((10, 10)));
    assert_eq!(layout.children().count(), 1);
}

#[test]
fn remove_hands_back_the_child() {
    let mut layout = CornerLayout::new();
    layout.add(Block::new(10, 10)).unwrap();
    layout.allocate(SCREEN);

    let child = layout.remove().unwrap();
    assert_eq!(child.preferred_size(), (10, 10));
    assert!(layout.remove().is_none());
    assert!(layout.needs_relayout());

    layout.allocate(SCREEN);
    assert!(layout.child_box().is_none());
    assert!(layout.add(Block::new(5, 5)).is_ok());
}

// ── Placement ────────────────────────────────────────────────────────────────

#[test]
fn child_is_pinned_top_right_at_natural_size() {
    let mut layout = CornerLayout::new();
    layout.add(Block::new(52, 43)).unwrap();
    layout.allocate(SCREEN);
    assert_eq!(layout.child_box(), Some(Rect::new(348, 0, 400, 43)));
}

#[test]
fn placement_is_relative_to_the_container() {
    let mut layout = CornerLayout::new();
    layout.add(Block::new(30, 10)).unwrap();
    layout.allocate(Rect::from_origin_size(100, 50, 200, 80));
    assert_eq!(layout.child_box(), Some(Rect::new(170, 0, 200, 10)));
}

#[test]
fn oversized_child_overflows_to_the_left() {
    let mut layout = CornerLayout::new();
    layout.add(Block::new(120, 10)).unwrap();
    layout.allocate(Rect::from_origin_size(0, 0, 100, 100));
    assert_eq!(layout.child_box(), Some(Rect::new(-20, 0, 100, 10)));
}

#[test]
fn draw_moves_child_quads_into_place() {
    let mut layout = CornerLayout::new();
    layout.add(Block::new(52, 43)).unwrap();
    layout.allocate(SCREEN);
    let quads = layout.draw();
    assert_eq!(quads.len(), 1);
    assert_eq!(quads[0].dest, Rect::new(348, 0, 400, 43));
}

// ── Relayout ─────────────────────────────────────────────────────────────────

#[test]
fn adding_requests_relayout_and_allocate_clears_it() {
    let mut layout = CornerLayout::new();
    assert!(!layout.needs_relayout());
    layout.add(Block::new(1, 1)).unwrap();
    assert!(layout.needs_relayout());
    layout.allocate(SCREEN);
    assert!(!layout.needs_relayout());
}

#[test]
fn child_relayout_propagates_and_is_consumed() {
    let mut layout = CornerLayout::new();
    layout.add(Block::new(1, 1)).unwrap();
    layout.allocate(SCREEN);

    layout.child_mut().unwrap().dirty = true;
    assert!(layout.needs_relayout());
    layout.allocate(SCREEN);
    assert!(!layout.needs_relayout());
    assert!(!layout.child().unwrap().dirty);
}

// ── With a real label ────────────────────────────────────────────────────────

#[test]
fn label_grows_leftwards_as_digits_are_added() {
    let config = AtlasConfig::default();
    let rasterizer = SegmentRasterizer::new(config.font_size);
    let atlas = AtlasBuilder::new(config).build(&rasterizer, &mut NullUploader).unwrap();

    let mut layout = CornerLayout::new();
    layout.add(atlas.label()).unwrap();
    layout.allocate(SCREEN);
    let one_digit = layout.child_box().unwrap();
    assert_eq!(one_digit.x2, 400);

    assert!(layout.child_mut().unwrap().set_value(1000));
    assert!(layout.needs_relayout());
    layout.allocate(layout.allocation());

    let four_digits = layout.child_box().unwrap();
    assert_eq!(four_digits.x2, 400);
    assert_eq!(four_digits.width(), 4 * one_digit.width());
    assert!(!layout.needs_relayout());

    // Same value again: nothing to do.
    assert!(!layout.child_mut().unwrap().set_value(1000));
    assert!(!layout.needs_relayout());
}
