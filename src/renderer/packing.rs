use crate::geometry::Rect;

// ── Slot ─────────────────────────────────────────────────────────────────────

/// One glyph's reserved region inside the atlas canvas, in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Slot {
    /// Top-left pixel coordinate inside the atlas.
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl Slot {
    pub fn right(&self) -> u32 { self.x + self.width }
    pub fn bottom(&self) -> u32 { self.y + self.height }

    pub fn rect(&self) -> Rect {
        Rect::from_origin_size(self.x as i32, self.y as i32, self.width as i32, self.height as i32)
    }
}

// ── ShelfPacker ──────────────────────────────────────────────────────────────

/// Incremental shelf packer: rectangles go left to right in rows, and a row
/// is as tall as the tallest rectangle placed on it.
///
/// Placement order is preserved (no sorting), so the same input always
/// produces the same layout.  The packer never refuses a rectangle; callers
/// check [`ShelfPacker::fits`] once everything has been placed.
#[derive(Clone, Debug)]
pub struct ShelfPacker {
    size: u32,
    cur_x: u32,
    cur_y: u32,
    row_h: u32,
    used_w: u32,
}

impl ShelfPacker {
    /// Packer for a square canvas with side length `size`.
    pub fn new(size: u32) -> Self {
        Self { size, cur_x: 0, cur_y: 0, row_h: 0, used_w: 0 }
    }

    pub fn place(&mut self, width: u32, height: u32) -> Slot {
        // A rectangle wider than the canvas still opens a new shelf and is
        // placed at x = 0; the overflow shows up in `extent`.
        if self.cur_x > 0 && self.cur_x + width > self.size {
            self.cur_y += self.row_h;
            self.cur_x = 0;
            self.row_h = 0;
        }

        let slot = Slot { x: self.cur_x, y: self.cur_y, width, height };
        self.cur_x += width;
        self.row_h = self.row_h.max(height);
        self.used_w = self.used_w.max(self.cur_x);
        slot
    }

    /// `(width, height)` of the bounding box of everything placed so far.
    pub fn extent(&self) -> (u32, u32) {
        (self.used_w, self.cur_y + self.row_h)
    }

    pub fn fits(&self) -> bool {
        let (w, h) = self.extent();
        w <= self.size && h <= self.size
    }
}

// ── pack ─────────────────────────────────────────────────────────────────────

/// Pure shelf packing of `items` (`(width, height)` pairs) onto a square
/// canvas of side `size`.
///
/// Returns the slots in input order and the used `(width, height)` extent.
pub fn pack(items: &[(u32, u32)], size: u32) -> (Vec<Slot>, u32, u32) {
    let mut packer = ShelfPacker::new(size);
    let slots = items.iter().map(|&(w, h)| packer.place(w, h)).collect();
    let (used_w, used_h) = packer.extent();
    (slots, used_w, used_h)
}

// ── Tests ──────────────────────────────────────────────────────────────────────
