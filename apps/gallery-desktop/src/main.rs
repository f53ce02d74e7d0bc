mod hud;

use anyhow::{Context, Result, anyhow};
use clap::Parser;
use gallery_assets::{LoadedTextures, TextureManifest};
use gallery_common::config::{WINDOW_HEIGHT, WINDOW_TITLE, WINDOW_WIDTH, aspect_ratio};
use gallery_input::{InputSampler, Key, RawInput};
use gallery_kernel::Walkthrough;
use gallery_render::{FrameView, RoomMesh};
use gallery_render_wgpu::GalleryRenderer;
use hud::{Hud, HudStats};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;
use tracing_subscriber::EnvFilter;
use winit::application::ApplicationHandler;
use winit::dpi::PhysicalSize;
use winit::event::{DeviceEvent, ElementState, KeyEvent, MouseScrollDelta, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{CursorGrabMode, Window, WindowId};

#[derive(Parser)]
#[command(name = "gallery-desktop", about = "Walk through the art gallery")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Directory holding the gallery textures
    #[arg(long, default_value = "./assets")]
    assets: PathBuf,

    /// Show the camera overlay at startup
    #[arg(long)]
    hud: bool,
}

/// Pixel scroll is converted to wheel "lines" at this rate.
const PIXELS_PER_SCROLL_LINE: f64 = 10.0;

fn map_key(code: KeyCode) -> Option<Key> {
    match code {
        KeyCode::KeyW => Some(Key::W),
        KeyCode::KeyS => Some(Key::S),
        KeyCode::KeyA => Some(Key::A),
        KeyCode::KeyD => Some(Key::D),
        KeyCode::Escape => Some(Key::Escape),
        _ => None,
    }
}

/// Everything the frame loop owns that is not a GPU handle.
struct AppState {
    walkthrough: Walkthrough,
    sampler: InputSampler,
    raw: RawInput,
    started: Instant,
    show_hud: bool,
    fps: f32,
}

impl AppState {
    fn new(show_hud: bool) -> Self {
        Self {
            walkthrough: Walkthrough::default(),
            sampler: InputSampler::new(),
            raw: RawInput::with_origin(WINDOW_WIDTH as f64 / 2.0, WINDOW_HEIGHT as f64 / 2.0),
            started: Instant::now(),
            show_hud,
            fps: 0.0,
        }
    }

    fn handle_key(&mut self, code: KeyCode, pressed: bool) {
        if let Some(key) = map_key(code) {
            if pressed {
                self.raw.press(key);
            } else {
                self.raw.release(key);
            }
        }

        if pressed && code == KeyCode::F1 {
            self.show_hud = !self.show_hud;
        }
    }

    /// Sample input and advance the camera. Returns false once the user
    /// asked to leave.
    fn update(&mut self) -> bool {
        let now = self.started.elapsed().as_secs_f64();
        let sample = self.sampler.sample(&mut self.raw, now);
        if sample.exit_requested {
            return false;
        }
        self.walkthrough.step(&sample);

        if sample.delta_time > 0.0 {
            let instant = 1.0 / sample.delta_time;
            self.fps = if self.fps == 0.0 {
                instant
            } else {
                self.fps * 0.9 + instant * 0.1
            };
        }
        true
    }

    fn frame_view(&self) -> FrameView {
        FrameView::from_camera(self.walkthrough.camera(), aspect_ratio())
    }

    fn hud_stats(&self) -> HudStats {
        let camera = self.walkthrough.camera();
        HudStats {
            position: camera.position(),
            yaw: camera.yaw(),
            pitch: camera.pitch(),
            zoom: camera.zoom(),
            fps: self.fps,
        }
    }
}

/// Window and GPU handles, created once the event loop is running.
struct Gpu {
    window: Arc<Window>,
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    renderer: GalleryRenderer,
    hud: Hud,
}

struct GpuApp {
    state: AppState,
    /// Decoded images, dropped once they are on the GPU.
    textures: Option<LoadedTextures>,
    gpu: Option<Gpu>,
    fatal: Option<anyhow::Error>,
}

impl GpuApp {
    fn new(state: AppState, textures: LoadedTextures) -> Self {
        Self {
            state,
            textures: Some(textures),
            gpu: None,
            fatal: None,
        }
    }

    fn take_textures(&mut self) -> Result<LoadedTextures> {
        self.textures
            .take()
            .ok_or_else(|| anyhow!("textures were already uploaded"))
    }

    fn init_gpu(&mut self, event_loop: &ActiveEventLoop) -> Result<Gpu> {
        let attrs = Window::default_attributes()
            .with_title(WINDOW_TITLE)
            .with_inner_size(PhysicalSize::new(WINDOW_WIDTH, WINDOW_HEIGHT));
        let window = Arc::new(
            event_loop
                .create_window(attrs)
                .context("failed to create window")?,
        );

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });

        let surface = instance
            .create_surface(window.clone())
            .context("failed to create surface")?;

        let adapter = pollster::block_on(instance.request_adapter(&wgpu::RequestAdapterOptions {
            power_preference: wgpu::PowerPreference::HighPerformance,
            compatible_surface: Some(&surface),
            force_fallback_adapter: false,
        }))
        .ok_or_else(|| anyhow!("no compatible GPU adapter"))?;

        let (device, queue) = pollster::block_on(adapter.request_device(
            &wgpu::DeviceDescriptor {
                label: Some("gallery_device"),
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::default(),
                memory_hints: Default::default(),
            },
            None,
        ))
        .context("failed to create device")?;

        let size = window.inner_size();
        let surface_caps = surface.get_capabilities(&adapter);
        let surface_format = surface_caps
            .formats
            .iter()
            .find(|f| f.is_srgb())
            .or_else(|| surface_caps.formats.first())
            .copied()
            .ok_or_else(|| anyhow!("surface reports no formats"))?;
        let alpha_mode = surface_caps
            .alpha_modes
            .first()
            .copied()
            .unwrap_or(wgpu::CompositeAlphaMode::Auto);

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: wgpu::PresentMode::AutoVsync,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let textures = self.take_textures()?;
        let renderer = GalleryRenderer::new(
            &device,
            &queue,
            surface_format,
            config.width,
            config.height,
            &RoomMesh::gallery(),
            &textures,
        )?;
        let hud = Hud::new(&window, &device, surface_format);

        capture_cursor(&window);

        tracing::info!(
            "GPU initialized with {} backend",
            adapter.get_info().backend.to_str()
        );

        Ok(Gpu {
            window,
            surface,
            device,
            queue,
            config,
            renderer,
            hud,
        })
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        if !self.state.update() {
            tracing::info!("exit requested");
            event_loop.exit();
            return;
        }

        let Some(gpu) = &mut self.gpu else {
            return;
        };

        let output = match gpu.surface.get_current_texture() {
            Ok(t) => t,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                gpu.surface.configure(&gpu.device, &gpu.config);
                return;
            }
            Err(e) => {
                tracing::error!("surface error: {e}");
                return;
            }
        };

        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        gpu.renderer
            .render(&gpu.device, &gpu.queue, &view, &self.state.frame_view());

        if self.state.show_hud {
            gpu.hud.draw(
                &gpu.window,
                &gpu.device,
                &gpu.queue,
                &view,
                [gpu.config.width, gpu.config.height],
                &self.state.hud_stats(),
            );
        }

        output.present();
        gpu.window.request_redraw();
    }
}

/// Hide the pointer and keep it in the window so mouse motion is unbounded.
fn capture_cursor(window: &Window) {
    let grabbed = window
        .set_cursor_grab(CursorGrabMode::Locked)
        .or_else(|_| window.set_cursor_grab(CursorGrabMode::Confined));
    if let Err(e) = grabbed {
        tracing::warn!("could not capture cursor: {e}");
    }
    window.set_cursor_visible(false);
}

impl ApplicationHandler for GpuApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.gpu.is_some() {
            return;
        }

        match self.init_gpu(event_loop) {
            Ok(gpu) => self.gpu = Some(gpu),
            Err(e) => {
                tracing::error!("initialization failed: {e:#}");
                self.fatal = Some(e);
                event_loop.exit();
            }
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        if let Some(gpu) = &mut self.gpu {
            gpu.hud.on_window_event(&gpu.window, &event);
        }

        match event {
            WindowEvent::CloseRequested => {
                self.state.raw.request_close();
                event_loop.exit();
            }
            WindowEvent::Resized(new_size) => {
                if let Some(gpu) = &mut self.gpu {
                    gpu.config.width = new_size.width.max(1);
                    gpu.config.height = new_size.height.max(1);
                    gpu.surface.configure(&gpu.device, &gpu.config);
                    gpu.renderer
                        .resize(&gpu.device, gpu.config.width, gpu.config.height);
                }
            }
            WindowEvent::Focused(focused) => {
                if !focused {
                    self.state.raw.release_all();
                } else if let Some(gpu) = &self.gpu {
                    capture_cursor(&gpu.window);
                }
            }
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(code),
                        state: key_state,
                        repeat: false,
                        ..
                    },
                ..
            } => {
                self.state
                    .handle_key(code, key_state == ElementState::Pressed);
            }
            WindowEvent::MouseWheel { delta, .. } => {
                let dy = match delta {
                    MouseScrollDelta::LineDelta(_, y) => y as f64,
                    MouseScrollDelta::PixelDelta(pos) => pos.y / PIXELS_PER_SCROLL_LINE,
                };
                self.state.raw.add_scroll(dy);
            }
            WindowEvent::RedrawRequested => self.redraw(event_loop),
            _ => {}
        }
    }

    fn device_event(
        &mut self,
        _event_loop: &ActiveEventLoop,
        _device_id: winit::event::DeviceId,
        event: DeviceEvent,
    ) {
        if let DeviceEvent::MouseMotion { delta } = event {
            self.state.raw.move_cursor_by(delta.0, delta.1);
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(gpu) = &self.gpu {
            gpu.window.request_redraw();
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    tracing::info!("gallery-desktop starting");

    let textures = TextureManifest::room(&cli.assets)
        .load()
        .with_context(|| format!("failed to load textures from {}", cli.assets.display()))?;

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = GpuApp::new(AppState::new(cli.hud), textures);
    event_loop.run_app(&mut app)?;

    if let Some(e) = app.fatal.take() {
        return Err(e);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use gallery_common::config::CAMERA_START;

    #[test]
    fn movement_keys_map() {
        assert_eq!(map_key(KeyCode::KeyW), Some(Key::W));
        assert_eq!(map_key(KeyCode::KeyD), Some(Key::D));
        assert_eq!(map_key(KeyCode::Escape), Some(Key::Escape));
        assert_eq!(map_key(KeyCode::KeyQ), None);
    }

    #[test]
    fn first_update_only_clamps() {
        let mut state = AppState::new(false);
        state.raw.move_cursor_by(300.0, 300.0);
        assert!(state.update());
        let camera = state.walkthrough.camera();
        assert_eq!(camera.yaw(), -90.0);
        assert_eq!(camera.pitch(), 0.0);
        assert_eq!(camera.position().z, 4.5);
        assert_eq!(camera.position().x, CAMERA_START.x);
    }

    #[test]
    fn escape_stops_the_loop() {
        let mut state = AppState::new(false);
        state.handle_key(KeyCode::Escape, true);
        assert!(!state.update());
    }

    #[test]
    fn f1_toggles_hud() {
        let mut state = AppState::new(false);
        state.handle_key(KeyCode::F1, true);
        assert!(state.show_hud);
        state.handle_key(KeyCode::F1, false);
        assert!(state.show_hud);
        state.handle_key(KeyCode::F1, true);
        assert!(!state.show_hud);
    }

    #[test]
    fn textures_are_handed_over_once() {
        let mut app = GpuApp::new(AppState::new(false), LoadedTextures::default());
        assert!(app.take_textures().is_ok());
        assert!(app.textures.is_none());
        assert!(app.take_textures().is_err());
    }

    #[test]
    fn scroll_reaches_camera() {
        let mut state = AppState::new(false);
        state.raw.add_scroll(10.0);
        assert!(state.update());
        assert_eq!(state.walkthrough.camera().zoom(), 35.0);
        assert_eq!(state.frame_view().zoom, 35.0);
    }
}
