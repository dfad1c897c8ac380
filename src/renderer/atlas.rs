use std::path::Path;
use std::rc::Rc;

use image::{Rgba, RgbaImage};

use crate::config::AtlasConfig;
use crate::error::AtlasError;
use crate::ui::label::NumberLabel;

use super::packing::{ShelfPacker, Slot};
use super::pixels::{BYTES_PER_PIXEL, Surface};
use super::raster::{GlyphExtents, Rasterizer};
use super::texture::{PixelFormat, TextureData, TextureHandle, TextureUploader};

/// The character set a numeric label needs, in packing order.
pub const DIGITS: [char; 10] = ['0', '1', '2', '3', '4', '5', '6', '7', '8', '9'];

// ── UvRect / GlyphMetrics ────────────────────────────────────────────────────

/// Normalised texture coordinates of a glyph's packed region, in `[0, 1]`.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct UvRect {
    pub u1: f32,
    pub v1: f32,
    pub u2: f32,
    pub v2: f32,
}

/// Layout metrics for one glyph in the atlas.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GlyphMetrics {
    /// Pixel width of the ink box plus padding (also the packed slot width).
    pub width: i32,
    /// Pixel height of the ink box plus padding.
    pub height: i32,
    /// How far to move the cursor after drawing this glyph.
    pub advance: i32,
    /// Ascent: distance from the baseline up to the top of the ink.
    pub y_offset: i32,
    pub uv: UvRect,
}

// ── GlyphTable ───────────────────────────────────────────────────────────────

/// Immutable metrics for every character packed into one atlas.
#[derive(Clone, Debug, PartialEq)]
pub struct GlyphTable {
    /// Sorted by character.
    glyphs: Vec<(char, GlyphMetrics)>,
    max_ascent: i32,
}

impl GlyphTable {
    pub fn glyph(&self, ch: char) -> Option<&GlyphMetrics> {
        self.glyphs
            .binary_search_by_key(&ch, |&(c, _)| c)
            .ok()
            .map(|i| &self.glyphs[i].1)
    }

    /// Largest ascent over the whole set, plus half the padding.  Every glyph
    /// is drawn `max_ascent - y_offset` below the label top so that all of
    /// them share one baseline.
    pub fn max_ascent(&self) -> i32 {
        self.max_ascent
    }

    pub fn len(&self) -> usize {
        self.glyphs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.glyphs.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (char, &GlyphMetrics)> {
        self.glyphs.iter().map(|(c, m)| (*c, m))
    }
}

// ── AtlasBitmap ──────────────────────────────────────────────────────────────

/// The finished square atlas canvas, straight-alpha RGBA8888.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AtlasBitmap {
    size: u32,
    stride: usize,
    data: Vec<u8>,
}

impl AtlasBitmap {
    fn from_surface(surface: Surface) -> Self {
        let size = surface.width();
        let (data, stride) = surface.into_straight_rgba();
        Self { size, stride, data }
    }

    pub fn size(&self) -> u32 { self.size }

    /// Bytes between rows; may exceed `size * 4`.
    pub fn stride(&self) -> usize { self.stride }

    pub fn bytes(&self) -> &[u8] { &self.data }

    /// Straight `[r, g, b, a]` at `(x, y)`, or `None` outside the canvas.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.size || y >= self.size {
            return None;
        }
        let i = y as usize * self.stride + x as usize * BYTES_PER_PIXEL;
        Some([self.data[i], self.data[i + 1], self.data[i + 2], self.data[i + 3]])
    }

    pub fn texture_data(&self) -> TextureData<'_> {
        TextureData {
            width: self.size,
            height: self.size,
            row_length: (self.stride / BYTES_PER_PIXEL) as u32,
            format: PixelFormat::Rgba8888,
            bytes: &self.data,
        }
    }

    /// Tightly packed copy of the canvas, for inspection or saving.
    pub fn to_image(&self) -> RgbaImage {
        RgbaImage::from_fn(self.size, self.size, |x, y| {
            Rgba(self.pixel(x, y).unwrap_or([0; 4]))
        })
    }

    pub fn save_png(&self, path: impl AsRef<Path>) -> image::ImageResult<()> {
        self.to_image().save_with_format(path, image::ImageFormat::Png)
    }
}

// ── DigitAtlas ───────────────────────────────────────────────────────────────

/// Output of a build: shared glyph metrics plus the uploaded texture.
///
/// Labels made from the atlas share both.  The texture stays alive until
/// the atlas and every label built from it are dropped.
pub struct DigitAtlas<T> {
    glyphs: Rc<GlyphTable>,
    texture: TextureHandle<T>,
}

impl<T> DigitAtlas<T> {
    pub fn new(glyphs: GlyphTable, texture: TextureHandle<T>) -> Self {
        Self { glyphs: Rc::new(glyphs), texture }
    }

    pub fn glyphs(&self) -> &Rc<GlyphTable> {
        &self.glyphs
    }

    pub fn texture(&self) -> &TextureHandle<T> {
        &self.texture
    }

    /// A new label showing `0`, sharing this atlas's metrics and texture.
    pub fn label(&self) -> NumberLabel<T> {
        NumberLabel::new(Rc::clone(&self.glyphs), self.texture.clone())
    }
}

// ── AtlasBuilder ─────────────────────────────────────────────────────────────

/// Rasterizes a fixed character set into one packed atlas.
#[derive(Clone, Debug)]
pub struct AtlasBuilder {
    config: AtlasConfig,
    charset: Vec<char>,
}

impl AtlasBuilder {
    /// A builder for the digits `0`–`9`.
    pub fn new(config: AtlasConfig) -> Self {
        Self { config, charset: DIGITS.to_vec() }
    }

    /// Replace the character set.  Packing order is ascending by character;
    /// duplicates are ignored.
    pub fn with_charset(mut self, charset: &[char]) -> Self {
        self.charset = charset.to_vec();
        self.charset.sort_unstable();
        self.charset.dedup();
        self
    }

    /// Measure, pack and draw every glyph, then convert the canvas to
    /// straight alpha.
    ///
    /// Fails when the backend fails or when the packed glyphs do not fit on
    /// the canvas.
    pub fn rasterize<R: Rasterizer + ?Sized>(
        &self,
        rasterizer: &R,
    ) -> Result<(AtlasBitmap, GlyphTable), AtlasError> {
        self.config.validate()?;

        let size = self.config.texture_size;
        let padding = self.config.padding;
        let half_pad = (padding / 2) as f32;

        // ── 1. Measure and pack ───────────────────────────────────────────
        let mut packer = ShelfPacker::new(size);
        let mut placed: Vec<(char, GlyphExtents, Slot)> = Vec::with_capacity(self.charset.len());
        let mut glyphs = Vec::with_capacity(self.charset.len());
        let mut max_ascent = 0;

        for &ch in &self.charset {
            let ext = rasterizer
                .measure(ch)
                .map_err(|e| AtlasError::Rasterization { ch, reason: e.to_string() })?;

            // Truncate towards zero like the integer metrics of a text backend.
            // Empty ink still takes at least a one-pixel slot.
            let width = ((ext.width + padding as f32) as i32).max(1);
            let height = ((ext.height + padding as f32) as i32).max(1);
            let y_offset = (-ext.y_bearing) as i32;
            max_ascent = max_ascent.max(y_offset);

            let slot = packer.place(width as u32, height as u32);
            glyphs.push((ch, GlyphMetrics {
                width,
                height,
                advance: ext.advance as i32 + self.config.advance_extra,
                y_offset,
                uv: uv_rect(&slot, size),
            }));
            placed.push((ch, ext, slot));
        }

        if !packer.fits() {
            let (needed_width, needed_height) = packer.extent();
            return Err(AtlasError::CanvasOverflow { needed_width, needed_height, size });
        }

        // ── 2. Draw outline + fill at each slot ───────────────────────────
        let style = self.config.glyph_style();
        let mut surface = Surface::new(size, size);
        for (ch, ext, slot) in &placed {
            let origin = [
                slot.x as f32 - ext.x_bearing + half_pad,
                slot.y as f32 - ext.y_bearing + half_pad,
            ];
            rasterizer
                .stroke_and_fill(&mut surface, *ch, origin, &style)
                .map_err(|e| AtlasError::Rasterization { ch: *ch, reason: e.to_string() })?;
        }

        // ── 3. Premultiplied ARGB32 → straight RGBA8888 ───────────────────
        let bitmap = AtlasBitmap::from_surface(surface);
        let table = GlyphTable { glyphs, max_ascent: max_ascent + (padding / 2) as i32 };
        Ok((bitmap, table))
    }

    /// Rasterize and upload.  The CPU bitmap is dropped right after the
    /// upload.  An upload failure is not an error: the atlas gets an invalid
    /// texture handle, and labels built from it draw nothing.
    pub fn build<R, U>(&self, rasterizer: &R, uploader: &mut U) -> Result<DigitAtlas<U::Texture>, AtlasError>
    where
        R: Rasterizer + ?Sized,
        U: TextureUploader + ?Sized,
    {
        let (bitmap, glyphs) = self.rasterize(rasterizer)?;

        let texture = match uploader.upload(&bitmap.texture_data()) {
            Ok(texture) => TextureHandle::new(texture),
            Err(e) => {
                log::warn!("digit atlas upload failed, labels will not paint: {e}");
                TextureHandle::invalid()
            }
        };
        drop(bitmap);

        log::info!(
            "built {}x{} digit atlas with {} glyphs (max ascent {})",
            self.config.texture_size,
            self.config.texture_size,
            glyphs.len(),
            glyphs.max_ascent()
        );

        Ok(DigitAtlas::new(glyphs, texture))
    }
}

fn uv_rect(slot: &Slot, size: u32) -> UvRect {
    let s = size as f32;
    UvRect {
        u1: slot.x as f32 / s,
        v1: slot.y as f32 / s,
        u2: slot.right() as f32 / s,
        v2: slot.bottom() as f32 / s,
    }
}
