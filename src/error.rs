use thiserror::Error;

// ── Atlas construction ───────────────────────────────────────────────────────

/// Reasons an atlas build can be aborted.
///
/// A failed texture upload is not among them: it degrades to an invalid
/// texture handle instead (see [`crate::renderer::texture::TextureHandle`]).
#[derive(Debug, Error)]
pub enum AtlasError {
    /// The rasterization backend could not measure or draw a glyph.
    #[error("failed to rasterize glyph {ch:?}: {reason}")]
    Rasterization { ch: char, reason: String },

    /// The packed glyphs do not fit on the square canvas.
    #[error(
        "packed glyphs need {needed_width}x{needed_height} px but the atlas canvas is {size}x{size}"
    )]
    CanvasOverflow {
        needed_width: u32,
        needed_height: u32,
        size: u32,
    },

    #[error("invalid atlas configuration: {0}")]
    Config(String),
}

/// Error reported by a rasterization backend.
#[derive(Debug, Error)]
#[error("{0}")]
pub struct RasterError(pub String);

impl RasterError {
    pub fn unsupported(ch: char) -> Self {
        Self(format!("no outline for {ch:?}"))
    }
}

// ── Texture upload ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum UploadError {
    #[error("texture {width}x{height} exceeds the device limit of {limit} px")]
    TooLarge { width: u32, height: u32, limit: u32 },

    #[error("invalid pixel layout: {0}")]
    InvalidLayout(String),

    #[error("texture upload failed: {0}")]
    Backend(String),
}

// ── Configuration ────────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("malformed atlas config: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Invalid(#[from] AtlasError),
}

// ── Renderer setup ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("failed to create surface: {0}")]
    Surface(#[from] wgpu::CreateSurfaceError),

    #[error("no suitable GPU adapter found: {0}")]
    Adapter(#[from] wgpu::RequestAdapterError),

    #[error("failed to create device: {0}")]
    Device(#[from] wgpu::RequestDeviceError),
}
