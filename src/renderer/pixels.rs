// ── Pixel formats ─────────────────────────────────────────────────────────────
//
// Rasterization happens on a premultiplied ARGB32 surface: every pixel is one
// native `u32` word `A << 24 | R << 16 | G << 8 | B`, stored little-endian
// (bytes `B, G, R, A`).  Textures want straight RGBA8888 (bytes `R, G, B, A`),
// so the finished canvas is converted in place by `unpremultiply`.

pub const BYTES_PER_PIXEL: usize = 4;

// ── Channel math ──────────────────────────────────────────────────────────────

/// Scale a straight channel by alpha, rounding to nearest.
#[inline]
pub fn premultiply_channel(c: u8, a: u8) -> u8 {
    ((c as u32 * a as u32 + 127) / 255) as u8
}

/// Undo premultiplication with exact integer division.
///
/// `a` must be non-zero; callers handle the fully transparent case.
#[inline]
pub fn unpremultiply_channel(c: u8, a: u8) -> u8 {
    (c as u32 * 255 / a as u32).min(255) as u8
}

/// Premultiply a straight `[r, g, b, a]` colour into an ARGB32 word.
pub fn premultiply(rgba: [u8; 4]) -> u32 {
    let [r, g, b, a] = rgba;
    u32::from_be_bytes([
        a,
        premultiply_channel(r, a),
        premultiply_channel(g, a),
        premultiply_channel(b, a),
    ])
}

/// Unpack an ARGB32 word into straight `[r, g, b, a]`.
///
/// A zero alpha carries no recoverable colour and always yields `[0, 0, 0, 0]`.
pub fn unpremultiply(argb: u32) -> [u8; 4] {
    let [a, r, g, b] = argb.to_be_bytes();
    if a == 0 {
        return [0, 0, 0, 0];
    }
    [
        unpremultiply_channel(r, a),
        unpremultiply_channel(g, a),
        unpremultiply_channel(b, a),
        a,
    ]
}

// ── unpremultiply_in_place ────────────────────────────────────────────────────

/// Convert a premultiplied ARGB32 buffer to straight RGBA8888, row by row.
///
/// `stride` is the distance between rows in bytes and may exceed
/// `width * 4`; the bytes past the end of each row are left untouched.
/// A stride shorter than one row is widened to `width * 4` (tightly packed
/// rows), the same as [`Surface::with_stride`].  Rows missing from a short
/// buffer are skipped rather than read out of bounds.
pub fn unpremultiply_in_place(data: &mut [u8], width: usize, height: usize, stride: usize) {
    let row_bytes = width * BYTES_PER_PIXEL;
    let stride = stride.max(row_bytes).max(1);

    for row in data.chunks_mut(stride).take(height) {
        let end = row_bytes.min(row.len());
        for px in row[..end].chunks_exact_mut(BYTES_PER_PIXEL) {
            let word = u32::from_le_bytes([px[0], px[1], px[2], px[3]]);
            px.copy_from_slice(&unpremultiply(word));
        }
    }
}

// ── Surface ───────────────────────────────────────────────────────────────────

/// Premultiplied ARGB32 canvas that rasterization backends draw into.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Surface {
    width: u32,
    height: u32,
    stride: usize,
    data: Vec<u8>,
}

impl Surface {
    /// Rows are padded to a 16-byte boundary, like an image surface whose
    /// scanlines are aligned for SIMD access.
    pub fn new(width: u32, height: u32) -> Self {
        let stride = (width as usize * BYTES_PER_PIXEL).next_multiple_of(16);
        Self::with_stride(width, height, stride)
    }

    /// A surface with an explicit row stride in bytes.  Strides shorter than
    /// a row are widened to exactly one row.
    pub fn with_stride(width: u32, height: u32, stride: usize) -> Self {
        let stride = stride.max(width as usize * BYTES_PER_PIXEL);
        Self { width, height, stride, data: vec![0; stride * height as usize] }
    }

    pub fn width(&self) -> u32 { self.width }
    pub fn height(&self) -> u32 { self.height }
    pub fn stride(&self) -> usize { self.stride }
    pub fn data(&self) -> &[u8] { &self.data }

    /// The premultiplied ARGB32 word at `(x, y)`, or `None` outside the surface.
    pub fn pixel(&self, x: u32, y: u32) -> Option<u32> {
        let i = self.offset(x as i32, y as i32)?;
        Some(u32::from_le_bytes([
            self.data[i],
            self.data[i + 1],
            self.data[i + 2],
            self.data[i + 3],
        ]))
    }

    pub fn set_pixel(&mut self, x: u32, y: u32, argb: u32) {
        if let Some(i) = self.offset(x as i32, y as i32) {
            self.data[i..i + BYTES_PER_PIXEL].copy_from_slice(&argb.to_le_bytes());
        }
    }

    /// Composite an opaque straight `color` at `coverage` over the pixel at
    /// `(x, y)` with the premultiplied "over" operator.  Coordinates outside
    /// the surface are clipped.
    pub fn blend(&mut self, x: i32, y: i32, color: [u8; 3], coverage: u8) {
        if coverage == 0 {
            return;
        }
        let Some(i) = self.offset(x, y) else { return };

        let src = premultiply([color[0], color[1], color[2], coverage]).to_le_bytes();
        let inv = 255 - coverage as u32;
        for c in 0..BYTES_PER_PIXEL {
            let dst = self.data[i + c] as u32;
            self.data[i + c] = (src[c] as u32 + (dst * inv + 127) / 255).min(255) as u8;
        }
    }

    /// Consume the surface, converting it to straight RGBA8888 in place.
    /// Returns `(bytes, stride)`.
    pub fn into_straight_rgba(mut self) -> (Vec<u8>, usize) {
        unpremultiply_in_place(&mut self.data, self.width as usize, self.height as usize, self.stride);
        (self.data, self.stride)
    }

    fn offset(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x as u32 >= self.width || y as u32 >= self.height {
            return None;
        }
        Some(y as usize * self.stride + x as usize * BYTES_PER_PIXEL)
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_surface_pads_rows_to_16_bytes() {
        let s = Surface::new(3, 2);
        assert_eq!(s.stride(), 16);
        assert_eq!(s.data().len(), 32);
    }

    #[test]
    fn short_stride_is_widened_to_row() {
        let s = Surface::with_stride(4, 1, 3);
        assert_eq!(s.stride(), 16);
    }

    #[test]
    fn blend_full_coverage_replaces_pixel() {
        let mut s = Surface::new(1, 1);
        s.blend(0, 0, [10, 20, 30], 255);
        s.blend(0, 0, [200, 100, 50], 255);
        assert_eq!(s.pixel(0, 0), Some(0xFF_C8_64_32));
    }

    #[test]
    fn blend_outside_surface_is_clipped() {
        let mut s = Surface::new(2, 2);
        s.blend(-1, 0, [255, 255, 255], 255);
        s.blend(0, 2, [255, 255, 255], 255);
        assert!(s.data().iter().all(|&b| b == 0));
    }

    #[test]
    fn blend_half_coverage_over_transparent_is_premultiplied() {
        let mut s = Surface::new(1, 1);
        s.blend(0, 0, [255, 0, 0], 128);
        let [a, r, g, b] = s.pixel(0, 0).unwrap().to_be_bytes();
        assert_eq!((a, r, g, b), (128, 128, 0, 0));
    }
}
