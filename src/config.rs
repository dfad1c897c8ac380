use serde::Deserialize;

use crate::error::{AtlasError, ConfigError};
use crate::renderer::raster::GlyphStyle;

/// Largest accepted canvas side, the common `max_texture_dimension_2d` of
/// desktop GPUs.
pub const MAX_TEXTURE_SIZE: u32 = 16384;

// ── AtlasConfig ───────────────────────────────────────────────────────────────

/// Parameters for building a digit atlas.
///
/// Every field has a default, so a JSON descriptor only needs to list the
/// values it overrides:
///
/// ```json
/// { "font_size": 32.0, "fill_color": [1.0, 0.8, 0.1] }
/// ```
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AtlasConfig {
    /// Side length of the square atlas canvas in pixels.
    pub texture_size: u32,
    /// Font size handed to the rasterization backend, in pixels.
    pub font_size: f32,
    /// Margin added to each glyph's ink box; half of it lands on each side.
    pub padding: u32,
    /// Width of the outline stroke in pixels.
    pub stroke_width: f32,
    /// Extra spacing added to every glyph advance.
    pub advance_extra: i32,
    /// Straight RGB colour of the outline, each channel in `[0, 1]`.
    pub outline_color: [f32; 3],
    /// Straight RGB colour of the glyph interior, each channel in `[0, 1]`.
    pub fill_color: [f32; 3],
}

impl Default for AtlasConfig {
    fn default() -> Self {
        Self {
            texture_size:  256,
            font_size:     40.0,
            padding:       8,
            stroke_width:  4.0,
            advance_extra: 2,
            outline_color: [0.0, 0.0, 0.0],
            fill_color:    [0.4, 0.4, 0.8],
        }
    }
}

impl AtlasConfig {
    /// Deserialise and validate a config from JSON.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), AtlasError> {
        if self.texture_size == 0 || self.texture_size > MAX_TEXTURE_SIZE {
            return Err(AtlasError::Config(format!(
                "texture_size must be in 1..={MAX_TEXTURE_SIZE}, got {}",
                self.texture_size
            )));
        }
        if !self.font_size.is_finite() || self.font_size <= 0.0 {
            return Err(AtlasError::Config(format!(
                "font_size must be a positive number, got {}",
                self.font_size
            )));
        }
        if !self.stroke_width.is_finite() || self.stroke_width < 0.0 {
            return Err(AtlasError::Config(format!(
                "stroke_width must be zero or positive, got {}",
                self.stroke_width
            )));
        }
        Ok(())
    }

    /// The stroke/fill parameters passed to the rasterization backend.
    pub fn glyph_style(&self) -> GlyphStyle {
        GlyphStyle {
            stroke_width: self.stroke_width,
            outline: to_rgb8(self.outline_color),
            fill:    to_rgb8(self.fill_color),
        }
    }
}

fn to_rgb8(color: [f32; 3]) -> [u8; 3] {
    color.map(|c| (c.clamp(0.0, 1.0) * 255.0).round() as u8)
}

// ── Tests ──────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn colors_are_quantised_to_bytes() {
        assert_eq!(to_rgb8([0.0, 1.0, 0.4]), [0, 255, 102]);
    }

    #[test]
    fn out_of_range_colors_are_clamped() {
        assert_eq!(to_rgb8([-1.0, 2.0, 0.5]), [0, 255, 128]);
    }
}
