mod bindings;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use egui::Context as EguiContext;
use freelook_camera::Camera;
use freelook_common::{MeshKind, SandboxConfig};
use freelook_input::{InputEvent, InputState, VirtualPointer};
use freelook_render::{FrameTransforms, RenderView, model_rotation};
use freelook_render_wgpu::{MeshData, SandboxRenderer, TextureImage};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;
use tracing_subscriber::EnvFilter;
use winit::application::ApplicationHandler;
use winit::dpi::PhysicalSize;
use winit::event::{DeviceEvent, ElementState, KeyEvent, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{CursorGrabMode, Fullscreen, Window, WindowId};

#[derive(Parser)]
#[command(name = "freelook-desktop", about = "Free-look camera sandbox")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// JSON configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Texture image applied to the mesh (overrides the config)
    #[arg(long)]
    texture: Option<PathBuf>,

    /// Mesh to display (overrides the config)
    #[arg(long, value_enum)]
    mesh: Option<MeshArg>,

    /// Force a window even if the config asks for fullscreen
    #[arg(long)]
    windowed: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum MeshArg {
    Triangle,
    Cube,
}

impl From<MeshArg> for MeshKind {
    fn from(arg: MeshArg) -> Self {
        match arg {
            MeshArg::Triangle => MeshKind::Triangle,
            MeshArg::Cube => MeshKind::Cube,
        }
    }
}

/// Application state. Owns the camera; input handlers borrow it mutably.
struct AppState {
    config: SandboxConfig,
    camera: Camera,
    input: InputState,
    pointer: VirtualPointer,
    aspect: f32,
    show_overlay: bool,
    cursor_captured: bool,
    started: Instant,
    last_frame: Instant,
}

impl AppState {
    fn new(config: SandboxConfig) -> Self {
        let camera = Camera::from_settings(&config.camera);
        let aspect = config.window.width as f32 / config.window.height.max(1) as f32;
        let now = Instant::now();
        Self {
            config,
            camera,
            input: InputState::new(),
            pointer: VirtualPointer::default(),
            aspect,
            show_overlay: false,
            cursor_captured: false,
            started: now,
            last_frame: now,
        }
    }

    /// Apply this frame's input and build its transforms.
    fn update(&mut self) -> FrameTransforms {
        let now = Instant::now();
        let dt = (now - self.last_frame).as_secs_f32().min(0.1);
        self.last_frame = now;

        self.input.apply(&mut self.camera, dt);

        let view = RenderView::from_camera(&self.camera, self.aspect);
        let model = model_rotation(
            self.started.elapsed().as_secs_f32(),
            self.config.spin_degrees_per_second,
        );
        FrameTransforms::new(&view, model)
    }

    fn handle_key(&mut self, event_loop: &ActiveEventLoop, key: KeyCode, pressed: bool) {
        if let Some(direction) = bindings::direction_for_key(key) {
            self.input.push(InputEvent::Key { direction, pressed });
            return;
        }

        if !pressed {
            return;
        }

        match key {
            KeyCode::Escape => {
                tracing::info!("escape pressed, exiting");
                event_loop.exit();
            }
            KeyCode::F1 => {
                self.show_overlay = !self.show_overlay;
            }
            _ => {}
        }
    }

    fn draw_ui(&self, ctx: &EguiContext) {
        if !self.show_overlay {
            return;
        }

        let cam = &self.camera;
        egui::Window::new("Camera")
            .default_pos([12.0, 12.0])
            .resizable(false)
            .show(ctx, |ui| {
                let p = cam.position();
                let f = cam.front();
                ui.label(format!("Position: ({:.2}, {:.2}, {:.2})", p.x, p.y, p.z));
                ui.label(format!("Front: ({:.3}, {:.3}, {:.3})", f.x, f.y, f.z));
                ui.label(format!("Yaw: {:.1}  Pitch: {:.1}", cam.yaw(), cam.pitch()));
                ui.label(bindings::held_label(self.input.held()));
                ui.label(format!(
                    "FOV: {:.1} [{:.1}, {:.1}]",
                    cam.fov(),
                    cam.min_fov(),
                    cam.max_fov()
                ));
                ui.separator();
                ui.small("F1: Overlay | WASD: Move | Mouse: Look | Wheel: Zoom | Esc: Quit");
            });
    }
}

/// Window and GPU objects, created once the event loop is running.
struct Gpu {
    window: Arc<Window>,
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    renderer: SandboxRenderer,
    egui_winit: egui_winit::State,
    egui_renderer: egui_wgpu::Renderer,
}

struct GpuApp {
    state: AppState,
    windowed: bool,
    gpu: Option<Gpu>,
    egui_ctx: EguiContext,
}

impl GpuApp {
    fn new(config: SandboxConfig, windowed: bool) -> Self {
        Self {
            state: AppState::new(config),
            windowed,
            gpu: None,
            egui_ctx: EguiContext::default(),
        }
    }

    fn init_gpu(&self, event_loop: &ActiveEventLoop) -> Result<Gpu> {
        let settings = &self.state.config.window;
        let mut attrs = Window::default_attributes()
            .with_title(settings.title.clone())
            .with_inner_size(PhysicalSize::new(settings.width, settings.height));
        if settings.fullscreen && !self.windowed {
            attrs = attrs.with_fullscreen(Some(Fullscreen::Borderless(None)));
        }
        let window = Arc::new(event_loop.create_window(attrs).context("create window")?);

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });

        let surface = instance
            .create_surface(window.clone())
            .context("create surface")?;

        let adapter = pollster::block_on(instance.request_adapter(&wgpu::RequestAdapterOptions {
            power_preference: wgpu::PowerPreference::HighPerformance,
            compatible_surface: Some(&surface),
            force_fallback_adapter: false,
        }))
        .context("find adapter")?;

        let (device, queue) = pollster::block_on(adapter.request_device(
            &wgpu::DeviceDescriptor {
                label: Some("freelook_device"),
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::default(),
                memory_hints: Default::default(),
            },
            None,
        ))
        .context("create device")?;

        let size = window.inner_size();
        let surface_caps = surface.get_capabilities(&adapter);
        let surface_format = surface_caps
            .formats
            .iter()
            .find(|f| f.is_srgb())
            .or_else(|| surface_caps.formats.first())
            .copied()
            .context("surface reports no formats")?;

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: if settings.vsync {
                wgpu::PresentMode::AutoVsync
            } else {
                wgpu::PresentMode::AutoNoVsync
            },
            alpha_mode: surface_caps.alpha_modes[0],
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let mesh = MeshData::for_kind(self.state.config.mesh);
        let image = TextureImage::load_or_checkerboard(self.state.config.texture.as_deref());
        let renderer = SandboxRenderer::new(
            &device,
            &queue,
            surface_format,
            config.width,
            config.height,
            &mesh,
            &image,
            settings.clear_color,
        );

        let egui_winit = egui_winit::State::new(
            self.egui_ctx.clone(),
            egui::ViewportId::ROOT,
            &window,
            Some(window.scale_factor() as f32),
            None,
            None,
        );
        let egui_renderer = egui_wgpu::Renderer::new(&device, surface_format, None, 1, false);

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
            egui_winit,
            egui_renderer,
        })
    }

    /// Hide the cursor and keep it inside the window, like a disabled cursor.
    fn capture_cursor(&mut self, capture: bool) {
        let Some(gpu) = &self.gpu else {
            return;
        };
        if capture {
            let grabbed = gpu
                .window
                .set_cursor_grab(CursorGrabMode::Locked)
                .or_else(|_| gpu.window.set_cursor_grab(CursorGrabMode::Confined));
            if let Err(e) = grabbed {
                tracing::warn!("cursor grab unavailable: {e}");
            }
        } else if let Err(e) = gpu.window.set_cursor_grab(CursorGrabMode::None) {
            tracing::warn!("failed to release cursor: {e}");
        }
        gpu.window.set_cursor_visible(!capture);
        self.state.cursor_captured = capture;
    }

    fn resize(&mut self, new_size: PhysicalSize<u32>) {
        let Some(gpu) = &mut self.gpu else {
            return;
        };
        gpu.config.width = new_size.width.max(1);
        gpu.config.height = new_size.height.max(1);
        gpu.surface.configure(&gpu.device, &gpu.config);
        gpu.renderer
            .resize(&gpu.device, gpu.config.width, gpu.config.height);
        self.state.aspect = gpu.config.width as f32 / gpu.config.height as f32;
    }

    fn redraw(&mut self) {
        let frame = self.state.update();

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

        gpu.renderer.render(&gpu.device, &gpu.queue, &view, &frame);

        let raw_input = gpu.egui_winit.take_egui_input(&gpu.window);
        let state = &self.state;
        let full_output = self.egui_ctx.run(raw_input, |ctx| {
            state.draw_ui(ctx);
        });

        gpu.egui_winit
            .handle_platform_output(&gpu.window, full_output.platform_output);

        let paint_jobs = self
            .egui_ctx
            .tessellate(full_output.shapes, full_output.pixels_per_point);

        let screen_descriptor = egui_wgpu::ScreenDescriptor {
            size_in_pixels: [gpu.config.width, gpu.config.height],
            pixels_per_point: full_output.pixels_per_point,
        };

        for (id, image_delta) in &full_output.textures_delta.set {
            gpu.egui_renderer
                .update_texture(&gpu.device, &gpu.queue, *id, image_delta);
        }
        let mut encoder = gpu
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("egui_encoder"),
            });
        gpu.egui_renderer.update_buffers(
            &gpu.device,
            &gpu.queue,
            &mut encoder,
            &paint_jobs,
            &screen_descriptor,
        );
        {
            let mut pass = encoder
                .begin_render_pass(&wgpu::RenderPassDescriptor {
                    label: Some("egui_pass"),
                    color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                        view: &view,
                        resolve_target: None,
                        ops: wgpu::Operations {
                            load: wgpu::LoadOp::Load,
                            store: wgpu::StoreOp::Store,
                        },
                    })],
                    depth_stencil_attachment: None,
                    ..Default::default()
                })
                .forget_lifetime();
            gpu.egui_renderer
                .render(&mut pass, &paint_jobs, &screen_descriptor);
        }
        gpu.queue.submit(std::iter::once(encoder.finish()));
        for id in &full_output.textures_delta.free {
            gpu.egui_renderer.free_texture(id);
        }

        output.present();
        gpu.window.request_redraw();
    }
}

impl ApplicationHandler for GpuApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.gpu.is_some() {
            return;
        }

        match self.init_gpu(event_loop) {
            Ok(gpu) => {
                let size = gpu.window.inner_size();
                self.gpu = Some(gpu);
                self.resize(size);
                self.capture_cursor(true);
            }
            Err(e) => {
                tracing::error!("failed to initialize: {e:#}");
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
            if bindings::routes_to_overlay(&event, self.state.cursor_captured) {
                let response = gpu.egui_winit.on_window_event(&gpu.window, &event);
                if response.consumed {
                    return;
                }
            }
        }

        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }
            WindowEvent::Resized(new_size) => {
                self.resize(new_size);
            }
            WindowEvent::Focused(focused) => {
                if !focused {
                    self.state.input.release_all();
                }
                self.capture_cursor(focused);
            }
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(key),
                        state: key_state,
                        ..
                    },
                ..
            } => {
                self.state
                    .handle_key(event_loop, key, key_state == ElementState::Pressed);
            }
            WindowEvent::MouseWheel { delta, .. } => {
                self.state.input.push(InputEvent::Scrolled {
                    delta_y: bindings::scroll_lines(delta),
                });
            }
            WindowEvent::RedrawRequested => {
                self.redraw();
            }
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
            if self.state.cursor_captured {
                let pos = self.state.pointer.advance(delta.0, delta.1);
                self.state.input.push(InputEvent::PointerMoved {
                    x: pos.x as f32,
                    y: pos.y as f32,
                });
                if let Some(shift) = self.state.pointer.recenter() {
                    self.state.input.push(InputEvent::PointerRebased {
                        dx: shift.x as f32,
                        dy: shift.y as f32,
                    });
                }
            }
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

    let mut config = SandboxConfig::load_or_default(cli.config.as_deref())
        .context("failed to load configuration")?;
    if let Some(texture) = cli.texture {
        config.texture = Some(texture);
    }
    if let Some(mesh) = cli.mesh {
        config.mesh = mesh.into();
    }

    tracing::info!("freelook-desktop starting");

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = GpuApp::new(config, cli.windowed);
    event_loop.run_app(&mut app)?;

    Ok(())
}
