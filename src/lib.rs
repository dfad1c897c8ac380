//! Numeric labels drawn from a pre-rasterized digit atlas.
//!
//! An [`AtlasBuilder`] measures the glyphs `0`–`9`, shelf-packs them onto one
//! square canvas, strokes and fills each glyph, converts the result to
//! straight-alpha RGBA and uploads it once.  A [`NumberLabel`] then renders any
//! integer as a row of textured quads from that shared atlas, and a
//! [`CornerLayout`] pins a label to the top-right corner of a region.

pub mod config;
pub mod error;
pub mod geometry;
pub mod renderer;
pub mod ui;

pub use config::AtlasConfig;
pub use error::{AtlasError, ConfigError, RasterError, RenderError, UploadError};
pub use geometry::Rect;
pub use renderer::atlas::{AtlasBitmap, AtlasBuilder, DigitAtlas, GlyphMetrics, GlyphTable, UvRect};
pub use renderer::raster::{FontdueRasterizer, Rasterizer, SegmentRasterizer};
pub use renderer::texture::{TextureHandle, TextureUploader};
pub use ui::{CornerLayout, NumberLabel, Widget};
