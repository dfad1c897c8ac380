use crate::error::RasterError;
use crate::geometry::distance_to_segment;

use super::pixels::Surface;

// ── GlyphExtents / GlyphStyle ────────────────────────────────────────────────

/// Ink metrics of one glyph in pixels, relative to its pen origin on the
/// baseline.  Y grows downwards, so `y_bearing` is negative for ink that sits
/// above the baseline.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GlyphExtents {
    pub width: f32,
    pub height: f32,
    /// Horizontal distance from this pen origin to the next one.
    pub advance: f32,
    /// Distance from the pen origin to the left edge of the ink.
    pub x_bearing: f32,
    /// Distance from the pen origin to the top edge of the ink.
    pub y_bearing: f32,
}

/// How a glyph is painted: a stroked outline first, then the fill on top.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GlyphStyle {
    pub stroke_width: f32,
    pub outline: [u8; 3],
    pub fill: [u8; 3],
}

// ── Rasterizer ───────────────────────────────────────────────────────────────

/// Glyph measurement and drawing backend used by the atlas builder.
///
/// Implementations hold no drawing state between calls; everything a call
/// needs is passed in.
pub trait Rasterizer {
    fn measure(&self, ch: char) -> Result<GlyphExtents, RasterError>;

    /// Stroke then fill `ch` into `surface` with its pen origin at `origin`
    /// (pixel coordinates, baseline-left).
    fn stroke_and_fill(
        &self,
        surface: &mut Surface,
        ch: char,
        origin: [f32; 2],
        style: &GlyphStyle,
    ) -> Result<(), RasterError>;
}

// ── SegmentRasterizer ────────────────────────────────────────────────────────

type Strokes = &'static [&'static [[f32; 2]]];

// Digit outlines as polylines in em units, x right and y up from the baseline.
const ZERO:  Strokes = &[&[[0.10, 0.0], [0.50, 0.0], [0.50, 0.70], [0.10, 0.70], [0.10, 0.0]]];
const ONE:   Strokes = &[&[[0.18, 0.56], [0.30, 0.70], [0.30, 0.0]]];
const TWO:   Strokes = &[&[[0.10, 0.70], [0.50, 0.70], [0.50, 0.35], [0.10, 0.35], [0.10, 0.0], [0.50, 0.0]]];
const THREE: Strokes = &[
    &[[0.10, 0.70], [0.50, 0.70], [0.50, 0.0], [0.10, 0.0]],
    &[[0.18, 0.35], [0.50, 0.35]],
];
const FOUR:  Strokes = &[
    &[[0.10, 0.70], [0.10, 0.30], [0.50, 0.30]],
    &[[0.42, 0.52], [0.42, 0.0]],
];
const FIVE:  Strokes = &[&[[0.50, 0.70], [0.10, 0.70], [0.10, 0.38], [0.50, 0.38], [0.50, 0.0], [0.10, 0.0]]];
const SIX:   Strokes = &[&[[0.50, 0.70], [0.10, 0.70], [0.10, 0.0], [0.50, 0.0], [0.50, 0.35], [0.10, 0.35]]];
const SEVEN: Strokes = &[&[[0.10, 0.70], [0.50, 0.70], [0.22, 0.0]]];
const EIGHT: Strokes = &[
    &[[0.10, 0.0], [0.50, 0.0], [0.50, 0.70], [0.10, 0.70], [0.10, 0.0]],
    &[[0.10, 0.36], [0.50, 0.36]],
];
const NINE:  Strokes = &[&[[0.50, 0.35], [0.10, 0.35], [0.10, 0.70], [0.50, 0.70], [0.50, 0.0], [0.10, 0.0]]];

fn digit_strokes(ch: char) -> Option<Strokes> {
    Some(match ch {
        '0' => ZERO,
        '1' => ONE,
        '2' => TWO,
        '3' => THREE,
        '4' => FOUR,
        '5' => FIVE,
        '6' => SIX,
        '7' => SEVEN,
        '8' => EIGHT,
        '9' => NINE,
        _ => return None,
    })
}

/// Font-free backend that draws the digits `0`–`9` as a stroke font.
///
/// Each stroke is an anti-aliased capsule.  Ink extents include the stroke
/// weight but not the outline, the same way a text backend reports path ink.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SegmentRasterizer {
    font_size: f32,
}

impl SegmentRasterizer {
    /// Thickness of a digit stroke in em.
    const WEIGHT: f32 = 0.09;
    const ADVANCE: f32 = 0.6;

    pub fn new(font_size: f32) -> Self {
        Self { font_size }
    }
}

impl Rasterizer for SegmentRasterizer {
    fn measure(&self, ch: char) -> Result<GlyphExtents, RasterError> {
        let strokes = digit_strokes(ch).ok_or_else(|| RasterError::unsupported(ch))?;
        let (mut min_x, mut min_y) = (f32::MAX, f32::MAX);
        let (mut max_x, mut max_y) = (f32::MIN, f32::MIN);
        for p in strokes.iter().flat_map(|line| line.iter()) {
            min_x = min_x.min(p[0]);
            max_x = max_x.max(p[0]);
            min_y = min_y.min(p[1]);
            max_y = max_y.max(p[1]);
        }

        let r = Self::WEIGHT * 0.5;
        let s = self.font_size;
        Ok(GlyphExtents {
            width:     (max_x - min_x + 2.0 * r) * s,
            height:    (max_y - min_y + 2.0 * r) * s,
            advance:   Self::ADVANCE * s,
            x_bearing: (min_x - r) * s,
            y_bearing: -(max_y + r) * s,
        })
    }

    fn stroke_and_fill(
        &self,
        surface: &mut Surface,
        ch: char,
        origin: [f32; 2],
        style: &GlyphStyle,
    ) -> Result<(), RasterError> {
        let strokes = digit_strokes(ch).ok_or_else(|| RasterError::unsupported(ch))?;
        let s = self.font_size;
        let to_px = |p: [f32; 2]| [origin[0] + p[0] * s, origin[1] - p[1] * s];

        let segments: Vec<([f32; 2], [f32; 2])> = strokes
            .iter()
            .flat_map(|line| line.windows(2))
            .map(|w| (to_px(w[0]), to_px(w[1])))
            .collect();

        let fill_radius = Self::WEIGHT * 0.5 * s;
        if style.stroke_width > 0.0 {
            paint_capsules(surface, &segments, fill_radius + style.stroke_width * 0.5, style.outline);
        }
        paint_capsules(surface, &segments, fill_radius, style.fill);
        Ok(())
    }
}

/// Paint the union of capsules of `radius` around `segments`, with one pixel
/// of anti-aliasing at the edge.
fn paint_capsules(surface: &mut Surface, segments: &[([f32; 2], [f32; 2])], radius: f32, color: [u8; 3]) {
    if segments.is_empty() {
        return;
    }

    let pad = radius + 1.0;
    let (mut x0, mut y0, mut x1, mut y1) = (f32::MAX, f32::MAX, f32::MIN, f32::MIN);
    for (a, b) in segments {
        x0 = x0.min(a[0].min(b[0]) - pad);
        y0 = y0.min(a[1].min(b[1]) - pad);
        x1 = x1.max(a[0].max(b[0]) + pad);
        y1 = y1.max(a[1].max(b[1]) + pad);
    }

    let x_start = (x0.floor() as i32).max(0);
    let y_start = (y0.floor() as i32).max(0);
    let x_end = (x1.ceil() as i32).min(surface.width() as i32);
    let y_end = (y1.ceil() as i32).min(surface.height() as i32);

    for y in y_start..y_end {
        for x in x_start..x_end {
            let center = [x as f32 + 0.5, y as f32 + 0.5];
            let d = segments
                .iter()
                .map(|(a, b)| distance_to_segment(center, *a, *b))
                .fold(f32::MAX, f32::min);
            let coverage = (radius + 0.5 - d).clamp(0.0, 1.0);
            surface.blend(x, y, color, (coverage * 255.0).round() as u8);
        }
    }
}

// ── FontdueRasterizer ────────────────────────────────────────────────────────

/// Backend for real TTF/OTF fonts.
///
/// fontdue only produces coverage masks, so the outline is the mask dilated
/// by half the stroke width.
pub struct FontdueRasterizer {
    font: fontdue::Font,
    font_size: f32,
}

impl FontdueRasterizer {
    pub fn from_bytes(bytes: &[u8], font_size: f32) -> Result<Self, RasterError> {
        let font = fontdue::Font::from_bytes(bytes, fontdue::FontSettings::default())
            .map_err(|e| RasterError(format!("failed to parse font: {e}")))?;
        Ok(Self { font, font_size })
    }

    fn ensure_glyph(&self, ch: char) -> Result<(), RasterError> {
        if self.font.lookup_glyph_index(ch) == 0 {
            return Err(RasterError::unsupported(ch));
        }
        Ok(())
    }
}

impl Rasterizer for FontdueRasterizer {
    fn measure(&self, ch: char) -> Result<GlyphExtents, RasterError> {
        self.ensure_glyph(ch)?;
        let m = self.font.metrics(ch, self.font_size);
        Ok(GlyphExtents {
            width:     m.width as f32,
            height:    m.height as f32,
            advance:   m.advance_width,
            x_bearing: m.xmin as f32,
            // fontdue's ymin is the offset of the bitmap bottom above the baseline.
            y_bearing: -(m.ymin as f32 + m.height as f32),
        })
    }

    fn stroke_and_fill(
        &self,
        surface: &mut Surface,
        ch: char,
        origin: [f32; 2],
        style: &GlyphStyle,
    ) -> Result<(), RasterError> {
        self.ensure_glyph(ch)?;
        let (m, coverage) = self.font.rasterize(ch, self.font_size);
        let (w, h) = (m.width as i32, m.height as i32);
        let left = (origin[0] + m.xmin as f32).round() as i32;
        let top = (origin[1] - (m.ymin + h) as f32).round() as i32;

        let at = |x: i32, y: i32| -> u8 {
            if x < 0 || y < 0 || x >= w || y >= h {
                0
            } else {
                coverage[(y * w + x) as usize]
            }
        };

        if style.stroke_width > 0.0 {
            let r = style.stroke_width * 0.5;
            let ri = r.ceil() as i32;
            for y in -ri..h + ri {
                for x in -ri..w + ri {
                    let mut dilated = 0u8;
                    for dy in -ri..=ri {
                        for dx in -ri..=ri {
                            if ((dx * dx + dy * dy) as f32) <= r * r {
                                dilated = dilated.max(at(x + dx, y + dy));
                            }
                        }
                    }
                    surface.blend(left + x, top + y, style.outline, dilated);
                }
            }
        }

        for y in 0..h {
            for x in 0..w {
                surface.blend(left + x, top + y, style.fill, at(x, y));
            }
        }
        Ok(())
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────────
