// =============================================================================
// GEOMETRY.RS: Integer rectangles and the little vector math the rasterizer
// needs.
//
// - Rect: label-local destination boxes and layout allocations
// - distance_to_segment: coverage for stroked outlines
// =============================================================================

/// Axis-aligned rectangle with inclusive `(x1, y1)` and exclusive `(x2, y2)`.
///
/// Y grows downwards, matching pixel rows in the atlas and screen space.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Rect {
    pub x1: i32,
    pub y1: i32,
    pub x2: i32,
    pub y2: i32,
}

impl Rect {
    pub const fn new(x1: i32, y1: i32, x2: i32, y2: i32) -> Self {
        Self { x1, y1, x2, y2 }
    }

    /// Rectangle of `width × height` with its top-left corner at `(x, y)`.
    pub const fn from_origin_size(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self { x1: x, y1: y, x2: x + width, y2: y + height }
    }

    #[inline]
    pub fn width(&self) -> i32 {
        self.x2 - self.x1
    }

    #[inline]
    pub fn height(&self) -> i32 {
        self.y2 - self.y1
    }

    pub fn is_empty(&self) -> bool {
        self.width() <= 0 || self.height() <= 0
    }

    /// Move the rectangle by `(dx, dy)` without changing its size.
    pub fn translate(&self, dx: i32, dy: i32) -> Self {
        Self { x1: self.x1 + dx, y1: self.y1 + dy, x2: self.x2 + dx, y2: self.y2 + dy }
    }

    /// `true` when the interiors intersect. Touching edges do not overlap.
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.x1 < other.x2 && other.x1 < self.x2 && self.y1 < other.y2 && other.y1 < self.y2
    }

    pub fn contains(&self, other: &Rect) -> bool {
        other.x1 >= self.x1 && other.y1 >= self.y1 && other.x2 <= self.x2 && other.y2 <= self.y2
    }
}

// =============================================================================
// POINT / SEGMENT DISTANCE
// =============================================================================

/// Euclidean distance from point `p` to the segment `a`–`b`.
///
/// Degenerate segments (`a == b`) measure the distance to that single point.
pub fn distance_to_segment(p: [f32; 2], a: [f32; 2], b: [f32; 2]) -> f32 {
    let (abx, aby) = (b[0] - a[0], b[1] - a[1]);
    let (apx, apy) = (p[0] - a[0], p[1] - a[1]);
    let len_sq = abx * abx + aby * aby;

    let t = if len_sq > 0.0 {
        ((apx * abx + apy * aby) / len_sq).clamp(0.0, 1.0)
    } else {
        0.0
    };

    let dx = apx - abx * t;
    let dy = apy - aby * t;
    (dx * dx + dy * dy).sqrt()
}
