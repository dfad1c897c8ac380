pub mod atlas;
pub mod packing;
pub mod pipeline;
pub mod pixels;
pub mod raster;
pub mod text;
pub mod texture;

use std::sync::Arc;

use wgpu::util::DeviceExt;
use winit::dpi::PhysicalSize;
use winit::window::Window;

use crate::error::{AtlasError, RenderError};
use atlas::{AtlasBuilder, DigitAtlas};
use pipeline::{QuadPipeline, create_quad_pipeline, orthographic_projection};
use raster::Rasterizer;
use text::Vertex;
use texture::{GpuTexture, TextureHandle, WgpuUploader};

/// Background the label overlay is drawn on.
const CLEAR_COLOR: wgpu::Color = wgpu::Color { r: 0.12, g: 0.13, b: 0.15, a: 1.0 };

pub struct Renderer {
    pub window: Arc<Window>,
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    quad_pipeline: QuadPipeline,
    /// Screen-space orthographic projection, rewritten on resize.
    projection_buffer: wgpu::Buffer,
    projection_bind_group: wgpu::BindGroup,
}

impl Renderer {
    pub async fn new(window: Arc<Window>) -> Result<Self, RenderError> {
        let size = window.inner_size();

        let instance = wgpu::Instance::default();
        let surface = instance.create_surface(Arc::clone(&window))?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                compatible_surface: Some(&surface),
                ..Default::default()
            })
            .await?;

        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor::default())
            .await?;

        let caps = surface.get_capabilities(&adapter);
        let format = caps.formats[0];

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: wgpu::PresentMode::AutoVsync,
            alpha_mode: caps.alpha_modes[0],
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let quad_pipeline = create_quad_pipeline(&device, format);

        let proj = orthographic_projection(config.width as f32, config.height as f32);
        let projection_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("projection_buffer"),
            contents: bytemuck::cast_slice(&proj),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let projection_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("projection_bg"),
            layout: &quad_pipeline.projection_bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: projection_buffer.as_entire_binding(),
            }],
        });

        log::info!(
            "renderer ready: {}x{} surface, format {:?}",
            config.width,
            config.height,
            format
        );

        Ok(Self {
            window,
            surface,
            device,
            queue,
            config,
            quad_pipeline,
            projection_buffer,
            projection_bind_group,
        })
    }

    /// Build a digit atlas and upload it to this renderer's device.
    pub fn build_atlas<R: Rasterizer + ?Sized>(
        &self,
        builder: &AtlasBuilder,
        rasterizer: &R,
    ) -> Result<DigitAtlas<GpuTexture>, AtlasError> {
        let mut uploader = WgpuUploader::new(&self.device, &self.queue);
        builder.build(rasterizer, &mut uploader)
    }

    pub fn size(&self) -> (u32, u32) {
        (self.config.width, self.config.height)
    }

    pub fn resize(&mut self, new_size: PhysicalSize<u32>) {
        if new_size.width == 0 || new_size.height == 0 {
            return;
        }
        self.config.width = new_size.width;
        self.config.height = new_size.height;
        self.surface.configure(&self.device, &self.config);

        let proj = orthographic_projection(new_size.width as f32, new_size.height as f32);
        self.queue
            .write_buffer(&self.projection_buffer, 0, bytemuck::cast_slice(&proj));
    }

    /// Clear the frame and draw one indexed mesh sampled from `texture`.
    ///
    /// An invalid texture handle only clears.
    pub fn render(
        &mut self,
        texture: &TextureHandle<GpuTexture>,
        vertices: &[Vertex],
        indices: &[u32],
    ) -> Result<(), wgpu::SurfaceError> {
        let frame = self.surface.get_current_texture()?;
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor { label: None });

        {
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("label_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    depth_slice: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(CLEAR_COLOR),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
                multiview_mask: None,
            });

            if let Some(gpu) = texture.get().filter(|_| !indices.is_empty()) {
                let atlas_bind_group = self.device.create_bind_group(&wgpu::BindGroupDescriptor {
                    label: Some("atlas_bg"),
                    layout: &self.quad_pipeline.atlas_bind_group_layout,
                    entries: &[
                        wgpu::BindGroupEntry {
                            binding: 0,
                            resource: wgpu::BindingResource::TextureView(&gpu.texture_view),
                        },
                        wgpu::BindGroupEntry {
                            binding: 1,
                            resource: wgpu::BindingResource::Sampler(&gpu.sampler),
                        },
                    ],
                });
                let vbuf = self.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                    label: Some("label_vertex_buffer"),
                    contents: bytemuck::cast_slice(vertices),
                    usage: wgpu::BufferUsages::VERTEX,
                });
                let ibuf = self.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                    label: Some("label_index_buffer"),
                    contents: bytemuck::cast_slice(indices),
                    usage: wgpu::BufferUsages::INDEX,
                });

                pass.set_pipeline(&self.quad_pipeline.render_pipeline);
                pass.set_bind_group(0, &self.projection_bind_group, &[]);
                pass.set_bind_group(1, &atlas_bind_group, &[]);
                pass.set_vertex_buffer(0, vbuf.slice(..));
                pass.set_index_buffer(ibuf.slice(..), wgpu::IndexFormat::Uint32);
                pass.draw_indexed(0..indices.len() as u32, 0, 0..1);
            }
        }

        self.queue.submit(std::iter::once(encoder.finish()));
        frame.present();
        Ok(())
    }
}
