// Counter demo: a NumberLabel pinned to the top-right corner of the window,
// counting up from zero.
//
//   numlabel [--config atlas.json] [--font digits.ttf] [--dump atlas.png]
//
// Space resets the counter, Up/Down change the step, Escape quits.  With
// --dump the atlas is written to a PNG and no window is opened.

use std::error::Error;
use std::sync::Arc;
use std::time::Instant;

use glam::Vec2;
use winit::application::ApplicationHandler;
use winit::event::{ElementState, KeyEvent, WindowEvent};
use winit::event_loop::{ActiveEventLoop, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{Window, WindowId};

use numlabel::geometry::Rect;
use numlabel::renderer::Renderer;
use numlabel::renderer::texture::GpuTexture;
use numlabel::renderer::text::quads_to_mesh;
use numlabel::{
    AtlasBuilder, AtlasConfig, CornerLayout, FontdueRasterizer, NumberLabel, Rasterizer,
    SegmentRasterizer,
};

const WINDOW_W: u32 = 640;
const WINDOW_H: u32 = 360;
/// Seconds between counter increments.
const TICK: f32 = 0.05;
const LABEL_TINT: [f32; 4] = [1.0, 1.0, 1.0, 1.0];

// ── Command line ─────────────────────────────────────────────────────────────

#[derive(Default)]
struct Args {
    config: Option<String>,
    font: Option<String>,
    dump: Option<String>,
}

impl Args {
    fn parse() -> Result<Self, String> {
        let mut args = Args::default();
        let mut it = std::env::args().skip(1);
        while let Some(arg) = it.next() {
            let slot = match arg.as_str() {
                "--config" => &mut args.config,
                "--font" => &mut args.font,
                "--dump" => &mut args.dump,
                other => return Err(format!("unknown argument {other:?}")),
            };
            *slot = Some(it.next().ok_or_else(|| format!("{arg} needs a value"))?);
        }
        Ok(args)
    }
}

fn load_config(path: Option<&str>) -> Result<AtlasConfig, Box<dyn Error>> {
    let Some(path) = path else {
        return Ok(AtlasConfig::default());
    };
    let json = std::fs::read_to_string(path)?;
    let config = AtlasConfig::from_json(&json)?;
    log::info!("loaded atlas config from {path}");
    Ok(config)
}

fn load_rasterizer(font: Option<&str>, font_size: f32) -> Result<Box<dyn Rasterizer>, Box<dyn Error>> {
    match font {
        Some(path) => {
            let bytes = std::fs::read(path)?;
            log::info!("rasterizing digits from {path}");
            Ok(Box::new(FontdueRasterizer::from_bytes(&bytes, font_size)?))
        }
        None => Ok(Box::new(SegmentRasterizer::new(font_size))),
    }
}

// ── App (winit ApplicationHandler) ──────────────────────────────────────────

struct Scene {
    renderer: Renderer,
    layout: CornerLayout<NumberLabel<GpuTexture>>,
}

struct App {
    builder: AtlasBuilder,
    rasterizer: Box<dyn Rasterizer>,
    scene: Option<Scene>,
    counter: i64,
    step: i64,
    last_instant: Option<Instant>,
    accumulator: f32,
}

impl App {
    fn new(builder: AtlasBuilder, rasterizer: Box<dyn Rasterizer>) -> Self {
        Self {
            builder,
            rasterizer,
            scene: None,
            counter: 0,
            step: 1,
            last_instant: None,
            accumulator: 0.0,
        }
    }

    fn create_scene(&self, event_loop: &ActiveEventLoop) -> Result<Scene, Box<dyn Error>> {
        let window = Arc::new(
            event_loop.create_window(
                Window::default_attributes()
                    .with_title("numlabel")
                    .with_inner_size(winit::dpi::PhysicalSize::new(WINDOW_W, WINDOW_H)),
            )?,
        );
        let renderer = pollster::block_on(Renderer::new(window))?;
        let atlas = renderer.build_atlas(&self.builder, self.rasterizer.as_ref())?;

        let mut layout = CornerLayout::new();
        layout
            .add(atlas.label())
            .map_err(|_| "corner layout already has a child")?;
        let (w, h) = renderer.size();
        layout.allocate(Rect::from_origin_size(0, 0, w as i32, h as i32));

        Ok(Scene { renderer, layout })
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.scene.is_some() {
            return;
        }
        match self.create_scene(event_loop) {
            Ok(scene) => self.scene = Some(scene),
            Err(e) => {
                log::error!("failed to start: {e}");
                event_loop.exit();
            }
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(scene) = self.scene.as_ref() {
            scene.renderer.window.request_redraw();
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        let Some(scene) = self.scene.as_mut() else { return };

        match event {
            WindowEvent::CloseRequested => event_loop.exit(),

            WindowEvent::Resized(size) => {
                scene.renderer.resize(size);
                let (w, h) = scene.renderer.size();
                scene.layout.allocate(Rect::from_origin_size(0, 0, w as i32, h as i32));
            }

            WindowEvent::KeyboardInput {
                event: KeyEvent { physical_key: PhysicalKey::Code(key), state: ElementState::Pressed, .. },
                ..
            } => match key {
                KeyCode::Escape => event_loop.exit(),
                KeyCode::Space => self.counter = 0,
                KeyCode::ArrowUp => self.step = self.step.saturating_mul(10),
                KeyCode::ArrowDown => self.step = (self.step / 10).max(1),
                _ => {}
            },

            WindowEvent::RedrawRequested => {
                let now = Instant::now();
                let elapsed = match self.last_instant {
                    Some(prev) => now.duration_since(prev).as_secs_f32().min(0.25),
                    None => 0.0,
                };
                self.last_instant = Some(now);
                self.accumulator += elapsed;
                while self.accumulator >= TICK {
                    self.counter = self.counter.saturating_add(self.step);
                    self.accumulator -= TICK;
                }

                if let Some(label) = scene.layout.child_mut() {
                    label.set_value(self.counter);
                }
                if scene.layout.needs_relayout() {
                    let allocation = scene.layout.allocation();
                    scene.layout.allocate(allocation);
                }

                let (vertices, indices) = quads_to_mesh(&scene.layout.draw(), Vec2::ZERO, LABEL_TINT);
                let texture = match scene.layout.child() {
                    Some(label) => label.texture().clone(),
                    None => return,
                };

                match scene.renderer.render(&texture, &vertices, &indices) {
                    Ok(()) => {}
                    Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                        let size = scene.renderer.window.inner_size();
                        scene.renderer.resize(size);
                    }
                    Err(wgpu::SurfaceError::OutOfMemory) => {
                        log::error!("surface out of memory");
                        event_loop.exit();
                    }
                    Err(e) => log::warn!("dropped frame: {e}"),
                }
            }

            _ => {}
        }
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse()?;
    let config = load_config(args.config.as_deref())?;
    let rasterizer = load_rasterizer(args.font.as_deref(), config.font_size)?;
    let builder = AtlasBuilder::new(config);

    if let Some(path) = args.dump.as_deref() {
        let (bitmap, glyphs) = builder.rasterize(rasterizer.as_ref())?;
        bitmap.save_png(path)?;
        log::info!("wrote {}px atlas with {} glyphs to {path}", bitmap.size(), glyphs.len());
        return Ok(());
    }

    let event_loop = EventLoop::new()?;
    let mut app = App::new(builder, rasterizer);
    event_loop.run_app(&mut app)?;
    Ok(())
}
