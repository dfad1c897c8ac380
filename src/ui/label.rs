use std::fmt;
use std::rc::Rc;

use crate::geometry::Rect;
use crate::renderer::atlas::GlyphTable;
use crate::renderer::text::Quad;
use crate::renderer::texture::TextureHandle;

use super::Widget;

/// Maximum number of digits a label displays.
pub const DIGIT_CAPACITY: usize = 15;

// ── DigitString ──────────────────────────────────────────────────────────────

/// Fixed-capacity ASCII digit sequence.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct DigitString {
    buf: [u8; DIGIT_CAPACITY],
    len: usize,
}

impl DigitString {
    pub const fn empty() -> Self {
        Self { buf: [0; DIGIT_CAPACITY], len: 0 }
    }

    /// Format `value` in decimal and keep only the digits.
    ///
    /// The sign is dropped, so `-5` becomes `"5"`.  Anything past
    /// [`DIGIT_CAPACITY`] digits is cut off, keeping the leading digits.
    pub fn from_value(value: i64) -> Self {
        let mut out = Self::empty();
        let formatted = value.to_string();
        for b in formatted.bytes().filter(u8::is_ascii_digit).take(DIGIT_CAPACITY) {
            out.buf[out.len] = b;
            out.len += 1;
        }
        out
    }

    pub fn as_str(&self) -> &str {
        // Only ASCII digits are ever stored.
        std::str::from_utf8(&self.buf[..self.len]).unwrap_or_default()
    }

    pub fn chars(&self) -> impl Iterator<Item = char> + '_ {
        self.buf[..self.len].iter().map(|&b| b as char)
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

impl fmt::Display for DigitString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Debug for DigitString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.as_str())
    }
}

// ── NumberLabel ──────────────────────────────────────────────────────────────

/// Displays an integer using the glyphs of a digit atlas.
///
/// The digit string is only rebuilt when `set_value` receives a different
/// value; a rebuild raises the relayout flag, which the owning layout
/// consumes with `take_relayout`.
pub struct NumberLabel<T> {
    glyphs: Rc<GlyphTable>,
    texture: TextureHandle<T>,
    value: i64,
    digits: DigitString,
    needs_relayout: bool,
}

impl<T> NumberLabel<T> {
    /// Usually created through [`crate::renderer::atlas::DigitAtlas::label`].
    pub fn new(glyphs: Rc<GlyphTable>, texture: TextureHandle<T>) -> Self {
        Self {
            glyphs,
            texture,
            value: 0,
            digits: DigitString::from_value(0),
            needs_relayout: false,
        }
    }

    /// Change the displayed value.  Returns `true` if a relayout was
    /// requested, which only happens when the value actually changed.
    pub fn set_value(&mut self, value: i64) -> bool {
        if self.value == value {
            return false;
        }
        self.value = value;
        self.digits = DigitString::from_value(value);
        self.needs_relayout = true;
        true
    }

    /// The last value passed to `set_value`, not the (possibly truncated)
    /// digits on screen.
    pub fn value(&self) -> i64 {
        self.value
    }

    pub fn digits(&self) -> &DigitString {
        &self.digits
    }

    pub fn needs_relayout(&self) -> bool {
        self.needs_relayout
    }

    /// Clear the relayout flag, returning its previous state.
    pub fn take_relayout(&mut self) -> bool {
        std::mem::take(&mut self.needs_relayout)
    }

    pub fn texture(&self) -> &TextureHandle<T> {
        &self.texture
    }

    /// Sum of the advances of all displayed digits.
    pub fn preferred_width(&self) -> i32 {
        self.digits
            .chars()
            .filter_map(|ch| self.glyphs.glyph(ch))
            .map(|g| g.advance)
            .sum()
    }

    /// Height needed so every digit fits once aligned on the shared baseline.
    pub fn preferred_height(&self) -> i32 {
        let max_ascent = self.glyphs.max_ascent();
        self.digits
            .chars()
            .filter_map(|ch| self.glyphs.glyph(ch))
            .map(|g| g.height + max_ascent - g.y_offset)
            .max()
            .unwrap_or(0)
    }

    /// One quad per digit, left to right, in label-local coordinates.
    ///
    /// Returns nothing when the atlas texture failed to upload.
    pub fn draw(&self) -> Vec<Quad> {
        if !self.texture.is_valid() {
            return Vec::new();
        }

        let max_ascent = self.glyphs.max_ascent();
        let mut quads = Vec::with_capacity(self.digits.len());
        let mut cursor = 0;

        for ch in self.digits.chars() {
            let Some(glyph) = self.glyphs.glyph(ch) else {
                continue;
            };
            let top = max_ascent - glyph.y_offset;
            quads.push(Quad {
                uv: glyph.uv,
                dest: Rect::new(cursor, top, cursor + glyph.width, top + glyph.height),
            });
            cursor += glyph.advance;
        }

        quads
    }
}

impl<T> Widget for NumberLabel<T> {
    fn preferred_size(&self) -> (i32, i32) {
        (self.preferred_width(), self.preferred_height())
    }

    fn draw(&self) -> Vec<Quad> {
        NumberLabel::draw(self)
    }

    fn needs_relayout(&self) -> bool {
        self.needs_relayout
    }

    fn take_relayout(&mut self) -> bool {
        NumberLabel::take_relayout(self)
    }
}

impl<T> fmt::Debug for NumberLabel<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NumberLabel")
            .field("value", &self.value)
            .field("digits", &self.digits)
            .field("texture", &self.texture)
            .finish()
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────────
