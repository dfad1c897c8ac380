use std::fmt;
use std::rc::Rc;

use crate::error::UploadError;

use super::pixels::BYTES_PER_PIXEL;

// ── TextureData ──────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PixelFormat {
    /// Straight-alpha RGBA, one byte per channel.
    Rgba8888,
}

/// A CPU pixel buffer ready to be uploaded.
#[derive(Clone, Copy, Debug)]
pub struct TextureData<'a> {
    pub width: u32,
    pub height: u32,
    /// Distance between rows, in pixels.  At least `width`.
    pub row_length: u32,
    pub format: PixelFormat,
    pub bytes: &'a [u8],
}

impl TextureData<'_> {
    pub fn bytes_per_row(&self) -> u32 {
        self.row_length * BYTES_PER_PIXEL as u32
    }

    /// Reject layouts an uploader could not read without going out of bounds.
    pub fn validate(&self) -> Result<(), UploadError> {
        if self.width == 0 || self.height == 0 {
            return Err(UploadError::InvalidLayout(format!(
                "empty texture {}x{}",
                self.width, self.height
            )));
        }
        if self.row_length < self.width {
            return Err(UploadError::InvalidLayout(format!(
                "row length {} is shorter than width {}",
                self.row_length, self.width
            )));
        }
        let needed = self.bytes_per_row() as usize * self.height as usize;
        if self.bytes.len() < needed {
            return Err(UploadError::InvalidLayout(format!(
                "{} bytes supplied, {needed} required",
                self.bytes.len()
            )));
        }
        Ok(())
    }
}

// ── TextureUploader ──────────────────────────────────────────────────────────

/// Turns a pixel buffer into a GPU texture.
pub trait TextureUploader {
    type Texture;

    fn upload(&mut self, data: &TextureData<'_>) -> Result<Self::Texture, UploadError>;
}

// ── TextureHandle ────────────────────────────────────────────────────────────

struct TextureSlot<T> {
    texture: T,
}

impl<T> Drop for TextureSlot<T> {
    fn drop(&mut self) {
        log::debug!("releasing atlas texture");
    }
}

/// Shared, reference-counted handle to an uploaded texture.
///
/// Every clone is one reference.  The texture is released when the last
/// clone is dropped.  A handle can also be *invalid* (the upload failed); an
/// invalid handle owns nothing and [`TextureHandle::get`] returns `None`.
pub struct TextureHandle<T> {
    slot: Option<Rc<TextureSlot<T>>>,
}

impl<T> TextureHandle<T> {
    pub fn new(texture: T) -> Self {
        Self { slot: Some(Rc::new(TextureSlot { texture })) }
    }

    pub fn invalid() -> Self {
        Self { slot: None }
    }

    pub fn is_valid(&self) -> bool {
        self.slot.is_some()
    }

    pub fn get(&self) -> Option<&T> {
        self.slot.as_deref().map(|slot| &slot.texture)
    }

    /// Number of live handles sharing this texture; 0 for an invalid handle.
    pub fn ref_count(&self) -> usize {
        self.slot.as_ref().map_or(0, Rc::strong_count)
    }
}

impl<T> Clone for TextureHandle<T> {
    fn clone(&self) -> Self {
        Self { slot: self.slot.clone() }
    }
}

impl<T> fmt::Debug for TextureHandle<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TextureHandle")
            .field("valid", &self.is_valid())
            .field("refs", &self.ref_count())
            .finish()
    }
}

// ── WgpuUploader ─────────────────────────────────────────────────────────────

/// A texture living on the GPU, with the view and sampler needed to bind it.
pub struct GpuTexture {
    pub texture: wgpu::Texture,
    pub texture_view: wgpu::TextureView,
    pub sampler: wgpu::Sampler,
}

pub struct WgpuUploader<'a> {
    device: &'a wgpu::Device,
    queue: &'a wgpu::Queue,
}

impl<'a> WgpuUploader<'a> {
    pub fn new(device: &'a wgpu::Device, queue: &'a wgpu::Queue) -> Self {
        Self { device, queue }
    }
}

impl TextureUploader for WgpuUploader<'_> {
    type Texture = GpuTexture;

    fn upload(&mut self, data: &TextureData<'_>) -> Result<GpuTexture, UploadError> {
        data.validate()?;

        let limit = self.device.limits().max_texture_dimension_2d;
        if data.width > limit || data.height > limit {
            return Err(UploadError::TooLarge { width: data.width, height: data.height, limit });
        }

        let size = wgpu::Extent3d {
            width: data.width,
            height: data.height,
            depth_or_array_layers: 1,
        };

        let texture = self.device.create_texture(&wgpu::TextureDescriptor {
            label: Some("digit_atlas"),
            size,
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: match data.format {
                PixelFormat::Rgba8888 => wgpu::TextureFormat::Rgba8UnormSrgb,
            },
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });

        // write_texture honours bytes_per_row, so padded rows upload as-is.
        self.queue.write_texture(
            wgpu::TexelCopyTextureInfo {
                texture: &texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            data.bytes,
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(data.bytes_per_row()),
                rows_per_image: Some(data.height),
            },
            size,
        );

        let texture_view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        let sampler = self.device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("digit_atlas_sampler"),
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            ..Default::default()
        });

        Ok(GpuTexture { texture, texture_view, sampler })
    }
}
