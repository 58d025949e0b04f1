//! Native application: winit window, Vello rendering, timer-driven redraws.

use kurbo::{Point, Size, Vec2};
use sparkle_core::canvas::Canvas;
use sparkle_core::config::CanvasConfig;
use sparkle_core::input::{EventResponse, InputEvent};
use sparkle_render::{RenderContext, RenderResult, Renderer, RendererError, VelloRenderer};
use std::sync::Arc;
use std::time::{Duration, Instant};
use vello::util::RenderSurface;
use vello::wgpu::PresentMode;
use vello::{AaConfig, RenderParams, RendererOptions};
use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::{ElementState, MouseButton, MouseScrollDelta, StartCause, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{Key, NamedKey};
use winit::window::{Window, WindowId};

use crate::AppError;

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
    pub canvas: CanvasConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            title: "Sparkle".to_string(),
            width: 800,
            height: 600,
            canvas: CanvasConfig::default(),
        }
    }
}

/// Runtime state for the application.
struct AppState {
    // Windowing
    window: Arc<Window>,
    surface: RenderSurface<'static>,

    // Rendering
    vello_renderer: vello::Renderer,
    scene_renderer: VelloRenderer,
    /// Texture blitter for RGBA->surface format conversion
    texture_blitter: vello::wgpu::util::TextureBlitter,

    // State
    canvas: Canvas,
    /// Last known pointer position in surface pixels.
    cursor: Point,
    /// When the idle sparkle redraw fires next.
    next_tick: Instant,
}

/// Main application struct.
pub struct App {
    config: AppConfig,
    state: Option<AppState>,
    render_cx: Option<vello::util::RenderContext>,
}

impl App {
    /// Create a new application with custom configuration.
    pub fn with_config(config: AppConfig) -> Self {
        Self {
            config,
            state: None,
            render_cx: None,
        }
    }

    /// Run the application until the window closes.
    pub fn run(mut self) -> Result<(), AppError> {
        let event_loop = EventLoop::new()?;
        event_loop.run_app(&mut self)?;
        Ok(())
    }

    fn interval(&self) -> Duration {
        Duration::from_millis(u64::from(self.config.canvas.redraw_interval_ms))
    }

    /// Create the window surface and GPU renderer.
    fn init(&mut self, event_loop: &ActiveEventLoop) -> Result<(), AppError> {
        let window_attrs = Window::default_attributes()
            .with_title(&self.config.title)
            .with_inner_size(LogicalSize::new(self.config.width, self.config.height));
        let window = Arc::new(
            event_loop
                .create_window(window_attrs)
                .map_err(|e| AppError::Renderer(init_failed(e)))?,
        );

        let size = window.inner_size();
        let (width, height) = if size.width == 0 || size.height == 0 {
            (self.config.width, self.config.height)
        } else {
            (size.width, size.height)
        };
        log::info!("Surface size: {}x{}", width, height);

        let render_cx = self
            .render_cx
            .get_or_insert_with(vello::util::RenderContext::new);
        let surface: RenderSurface<'static> = pollster::block_on(render_cx.create_surface(
            window.clone(),
            width,
            height,
            PresentMode::AutoVsync,
        ))
        .map_err(init_failed)?;

        let device = &render_cx.devices[surface.dev_id].device;
        let vello_renderer =
            vello::Renderer::new(device, RendererOptions::default()).map_err(init_failed)?;
        // Vello renders to Rgba8Unorm; the surface may be Bgra8Unorm.
        let texture_blitter = vello::wgpu::util::TextureBlitter::new(device, surface.config.format);

        let seed = crate::seed_from_clock();
        self.state = Some(AppState {
            window: window.clone(),
            surface,
            vello_renderer,
            scene_renderer: VelloRenderer::new(seed.rotate_left(32)),
            texture_blitter,
            canvas: Canvas::seeded(self.config.canvas.clone(), seed),
            cursor: Point::ZERO,
            next_tick: Instant::now() + self.interval(),
        });

        log::info!("Sparkle initialized - {}x{}", width, height);
        window.request_redraw();
        Ok(())
    }

    /// Translate a window event into a canvas event, if it is one.
    fn translate(state: &mut AppState, event: &WindowEvent) -> Vec<InputEvent> {
        match event {
            WindowEvent::CursorMoved { position, .. } => {
                state.cursor = Point::new(position.x, position.y);
                vec![InputEvent::Move {
                    position: state.cursor,
                }]
            }
            WindowEvent::MouseInput {
                state: button_state,
                button: MouseButton::Left,
                ..
            } => match button_state {
                ElementState::Pressed => vec![InputEvent::Press {
                    position: state.cursor,
                }],
                // Browser order: mouseup, then click.
                ElementState::Released => vec![
                    InputEvent::Release,
                    InputEvent::Click {
                        position: state.cursor,
                    },
                ],
            },
            WindowEvent::MouseWheel { delta, .. } => vec![InputEvent::Scroll {
                delta: scroll_delta(*delta),
            }],
            WindowEvent::KeyboardInput { event, .. } if event.state == ElementState::Pressed => {
                key_name(&event.logical_key)
                    .map(InputEvent::Key)
                    .into_iter()
                    .collect()
            }
            _ => Vec::new(),
        }
    }

    /// Paint the canvas into the window surface.
    fn render(&mut self) -> RenderResult<()> {
        let (Some(state), Some(render_cx)) = (self.state.as_mut(), self.render_cx.as_ref()) else {
            return Ok(());
        };

        let width = state.surface.config.width;
        let height = state.surface.config.height;

        let viewport = Size::new(f64::from(width), f64::from(height));
        let ctx = RenderContext::new(&state.canvas, viewport);
        state.scene_renderer.build_scene(&ctx)?;
        let base_color = state.scene_renderer.background_color(&ctx);
        let scene = state.scene_renderer.take_scene();

        let device_handle = &render_cx.devices[state.surface.dev_id];
        let device = &device_handle.device;
        let queue = &device_handle.queue;

        let surface_texture = state
            .surface
            .surface
            .get_current_texture()
            .map_err(|e| RendererError::Surface(format!("no surface texture: {:?}", e)))?;

        let params = RenderParams {
            base_color,
            width,
            height,
            antialiasing_method: AaConfig::Area,
        };

        // Vello's compute shaders need a StorageBinding texture, which WebGPU
        // only allows for Rgba8Unorm; blit to the surface afterwards.
        let render_texture = device.create_texture(&vello::wgpu::TextureDescriptor {
            label: Some("vello render texture"),
            size: vello::wgpu::Extent3d {
                width,
                height,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: vello::wgpu::TextureDimension::D2,
            format: vello::wgpu::TextureFormat::Rgba8Unorm,
            usage: vello::wgpu::TextureUsages::STORAGE_BINDING
                | vello::wgpu::TextureUsages::COPY_SRC
                | vello::wgpu::TextureUsages::TEXTURE_BINDING,
            view_formats: &[],
        });
        let render_texture_view =
            render_texture.create_view(&vello::wgpu::TextureViewDescriptor::default());

        state
            .vello_renderer
            .render_to_texture(device, queue, &scene, &render_texture_view, &params)
            .map_err(|e| RendererError::RenderFailed(format!("{:?}", e)))?;

        let surface_view = surface_texture
            .texture
            .create_view(&vello::wgpu::TextureViewDescriptor::default());
        let mut blit_encoder =
            device.create_command_encoder(&vello::wgpu::CommandEncoderDescriptor {
                label: Some("blit encoder"),
            });
        state
            .texture_blitter
            .copy(device, &mut blit_encoder, &render_texture_view, &surface_view);
        queue.submit(std::iter::once(blit_encoder.finish()));

        surface_texture.present();
        Ok(())
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.state.is_some() {
            return;
        }
        log::info!("Creating window...");
        if let Err(e) = self.init(event_loop) {
            log::error!("Failed to initialize: {}", e);
            event_loop.exit();
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        let Some(state) = &mut self.state else {
            return;
        };

        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }

            WindowEvent::Resized(size) => {
                if size.width == 0 || size.height == 0 {
                    return;
                }
                if let Some(render_cx) = self.render_cx.as_mut() {
                    render_cx.resize_surface(&mut state.surface, size.width, size.height);
                }
                state.window.request_redraw();
            }

            WindowEvent::RedrawRequested => {
                if let Err(e) = self.render() {
                    log::warn!("Frame dropped: {}", e);
                }
            }

            event => {
                let mut response = EventResponse::NONE;
                for input in Self::translate(state, &event) {
                    response.redraw |= state.canvas.handle_event(input).redraw;
                }
                if response.redraw {
                    state.window.request_redraw();
                }
            }
        }
    }

    fn new_events(&mut self, _event_loop: &ActiveEventLoop, cause: StartCause) {
        if !matches!(cause, StartCause::ResumeTimeReached { .. }) {
            return;
        }
        let interval = self.interval();
        if let Some(state) = &mut self.state {
            state.next_tick = Instant::now() + interval;
            state.window.request_redraw();
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        if let Some(state) = &self.state {
            event_loop.set_control_flow(ControlFlow::WaitUntil(state.next_tick));
        }
    }
}

fn init_failed(e: impl std::fmt::Debug) -> RendererError {
    RendererError::InitFailed(format!("{:?}", e))
}

/// Convert a winit wheel delta to DOM convention (negative y = scroll up).
fn scroll_delta(delta: MouseScrollDelta) -> Vec2 {
    match delta {
        MouseScrollDelta::LineDelta(x, y) => Vec2::new(-f64::from(x), -f64::from(y)),
        MouseScrollDelta::PixelDelta(pos) => Vec2::new(-pos.x, -pos.y),
    }
}

/// DOM-style name of a logical key (`"Delete"`, `"a"`).
fn key_name(key: &Key) -> Option<String> {
    let name = match key {
        Key::Character(text) => return Some(text.to_string()),
        Key::Named(NamedKey::Delete) => "Delete",
        Key::Named(NamedKey::Backspace) => "Backspace",
        Key::Named(NamedKey::Escape) => "Escape",
        Key::Named(NamedKey::Enter) => "Enter",
        Key::Named(NamedKey::Tab) => "Tab",
        Key::Named(NamedKey::Space) => " ",
        _ => return None,
    };
    Some(name.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use winit::dpi::PhysicalPosition;

    #[test]
    fn test_scroll_up_is_negative() {
        assert!(scroll_delta(MouseScrollDelta::LineDelta(0.0, 1.0)).y < 0.0);
        let pixels = MouseScrollDelta::PixelDelta(PhysicalPosition::new(0.0, -40.0));
        assert!(scroll_delta(pixels).y > 0.0);
    }

    #[test]
    fn test_key_names() {
        assert_eq!(key_name(&Key::Named(NamedKey::Delete)).as_deref(), Some("Delete"));
        assert_eq!(key_name(&Key::Named(NamedKey::Backspace)).as_deref(), Some("Backspace"));
        assert_eq!(key_name(&Key::Character("x".into())).as_deref(), Some("x"));
        assert_eq!(key_name(&Key::Named(NamedKey::Space)).as_deref(), Some(" "));
        assert_eq!(key_name(&Key::Named(NamedKey::F1)), None);
    }

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.title, "Sparkle");
        assert!(config.canvas.validate().is_ok());
    }
}
