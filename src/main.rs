use std::sync::Arc;
use std::time::Instant;

use anyhow::{anyhow, Context, Result};
use glam::{Vec2, Vec3};
use log::{info, warn};
use pollster::block_on;
use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::{DeviceEvent, DeviceId, ElementState, KeyEvent, MouseScrollDelta, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{KeyCode as WinitKey, PhysicalKey};
use winit::window::{CursorGrabMode, Window, WindowId};

use restaurant_scene::{
    AppConfig, AppState, FrameRecorder, KeyCode, MeshKind, NamedKey, Renderer, ShaderSources,
    MAX_POINT_LIGHTS,
};

/// Pixels of touchpad scroll treated as one wheel notch.
const PIXELS_PER_LINE: f32 = 20.0;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    if let Err(err) = run() {
        eprintln!("Error: {err:?}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let config = AppConfig::from_env().context(restaurant_scene::config::USAGE)?;
    if config.summary_only {
        print_summary(&config);
        return Ok(());
    }

    info!("loading shaders from {}", config.shader_dir.display());
    let shaders = ShaderSources::load(&config.shader_dir).context("failed to load shaders")?;

    let event_loop = EventLoop::new().context("failed to initialize event loop")?;
    event_loop.set_control_flow(ControlFlow::Poll);
    let mut viewer = Viewer::new(config, shaders);
    event_loop
        .run_app(&mut viewer)
        .context("event loop terminated abnormally")?;

    match viewer.error.take() {
        Some(err) => Err(err),
        None => Ok(()),
    }
}

/// Composes one frame without a window and prints what it uploaded.
fn print_summary(config: &AppConfig) {
    let state = AppState::restaurant(config.camera_position);
    let mut frame = FrameRecorder::new();
    state.render(&mut frame, config.aspect());

    let per_mesh: Vec<String> = MeshKind::ALL
        .iter()
        .map(|&mesh| format!("{} {}", frame.draw_count(mesh), mesh.label()))
        .collect();
    println!(
        "Composed frame with {} draw calls ({})",
        frame.draws().len(),
        per_mesh.join(", ")
    );

    let uniforms = frame.uniforms();
    let vec3 = |name: &str| fmt_vec3(uniforms.vec3(name).unwrap_or(Vec3::ZERO));
    println!(
        "dirLight direction={} ambient={} diffuse={} specular={}",
        vec3("dirLight.direction"),
        vec3("dirLight.ambient"),
        vec3("dirLight.diffuse"),
        vec3("dirLight.specular")
    );
    for light in state.lights.points.iter().filter(|l| l.slot() < MAX_POINT_LIGHTS) {
        let names = light.names();
        let float = |name: &str| uniforms.float(name).unwrap_or_default();
        println!(
            "pointLights[{}] position={} ambient={} diffuse={} specular={} attenuation=({:.3}, {:.3}, {:.3})",
            light.slot(),
            vec3(names.position.as_str()),
            vec3(names.ambient.as_str()),
            vec3(names.diffuse.as_str()),
            vec3(names.specular.as_str()),
            float(names.constant.as_str()),
            float(names.linear.as_str()),
            float(names.quadratic.as_str())
        );
    }
}

fn fmt_vec3(v: Vec3) -> String {
    format!("({:.2}, {:.2}, {:.2})", v.x, v.y, v.z)
}

/// Event loop handler owning the window, renderer and application state.
struct Viewer {
    config: AppConfig,
    shaders: ShaderSources,
    state: AppState,
    renderer: Option<Renderer>,
    frame: FrameRecorder,
    /// Accumulated raw mouse motion, unaffected by the cursor grab.
    cursor: Vec2,
    last_frame: Option<Instant>,
    error: Option<anyhow::Error>,
}

impl Viewer {
    fn new(config: AppConfig, shaders: ShaderSources) -> Self {
        let state = AppState::restaurant(config.camera_position);
        Self {
            config,
            shaders,
            state,
            renderer: None,
            frame: FrameRecorder::new(),
            cursor: Vec2::ZERO,
            last_frame: None,
            error: None,
        }
    }

    fn create_renderer(&self, event_loop: &ActiveEventLoop) -> Result<Renderer> {
        let attributes = Window::default_attributes()
            .with_title(&self.config.title)
            .with_inner_size(LogicalSize::new(self.config.width, self.config.height));
        let window = Arc::new(
            event_loop
                .create_window(attributes)
                .context("failed to create window")?,
        );

        if let Err(err) = window
            .set_cursor_grab(CursorGrabMode::Confined)
            .or_else(|_| window.set_cursor_grab(CursorGrabMode::Locked))
        {
            warn!("cursor grab unavailable: {err}");
        }
        window.set_cursor_visible(false);

        let size = window.inner_size();
        info!("opened {}x{} window", size.width, size.height);
        block_on(Renderer::new(window, &self.shaders))
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, err: anyhow::Error) {
        self.error = Some(err);
        event_loop.exit();
    }

    fn handle_keyboard(&mut self, event: &KeyEvent) {
        let PhysicalKey::Code(code) = event.physical_key else {
            return;
        };
        let Some(key) = map_keycode(code) else {
            return;
        };
        match event.state {
            ElementState::Pressed if !event.repeat => self.state.handle_key_pressed(key),
            ElementState::Pressed => {}
            ElementState::Released => self.state.handle_key_released(key),
        }
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        let now = Instant::now();
        let delta_time = self
            .last_frame
            .replace(now)
            .map(|last| now.duration_since(last).as_secs_f32())
            .unwrap_or(0.0);
        self.state.update(delta_time);

        let Some(renderer) = self.renderer.as_mut() else {
            return;
        };
        self.frame.clear();
        self.state.render(&mut self.frame, renderer.aspect());

        if let Err(err) = renderer.render(&self.frame) {
            match err {
                wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated => {
                    let size = renderer.window().inner_size();
                    renderer.resize(size);
                }
                wgpu::SurfaceError::OutOfMemory => {
                    self.error = Some(anyhow!("GPU is out of memory"));
                    event_loop.exit();
                }
                wgpu::SurfaceError::Timeout => {
                    warn!("surface timeout; retrying next frame");
                }
                wgpu::SurfaceError::Other => {
                    warn!("surface error; retrying next frame");
                }
            }
        }
    }
}

impl ApplicationHandler for Viewer {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.renderer.is_some() {
            return;
        }
        match self.create_renderer(event_loop) {
            Ok(renderer) => self.renderer = Some(renderer),
            Err(err) => self.fail(event_loop, err),
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, window_id: WindowId, event: WindowEvent) {
        if self.renderer.as_ref().map(Renderer::window_id) != Some(window_id) {
            return;
        }
        match event {
            WindowEvent::CloseRequested => event_loop.exit(),
            WindowEvent::Resized(size) => {
                if let Some(renderer) = self.renderer.as_mut() {
                    renderer.resize(size);
                }
            }
            WindowEvent::Focused(_) => self.state.reset_input(),
            WindowEvent::KeyboardInput { event, .. } => self.handle_keyboard(&event),
            WindowEvent::MouseWheel { delta, .. } => {
                let y = match delta {
                    MouseScrollDelta::LineDelta(_, y) => y,
                    MouseScrollDelta::PixelDelta(position) => position.y as f32 / PIXELS_PER_LINE,
                };
                self.state.handle_scroll(y);
            }
            WindowEvent::RedrawRequested => self.redraw(event_loop),
            _ => {}
        }
    }

    fn device_event(&mut self, _event_loop: &ActiveEventLoop, _device_id: DeviceId, event: DeviceEvent) {
        if let DeviceEvent::MouseMotion { delta: (dx, dy) } = event {
            self.cursor += Vec2::new(dx as f32, dy as f32);
            self.state.handle_cursor(self.cursor);
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        if self.state.close_requested() {
            event_loop.exit();
            return;
        }
        if let Some(renderer) = &self.renderer {
            renderer.window().request_redraw();
        }
    }
}

fn map_keycode(code: WinitKey) -> Option<KeyCode> {
    use WinitKey as Key;
    Some(match code {
        Key::Space => KeyCode::Named(NamedKey::Space),
        Key::Enter => KeyCode::Named(NamedKey::Enter),
        Key::Tab => KeyCode::Named(NamedKey::Tab),
        Key::ArrowLeft => KeyCode::Named(NamedKey::Left),
        Key::ArrowRight => KeyCode::Named(NamedKey::Right),
        Key::ArrowUp => KeyCode::Named(NamedKey::Up),
        Key::ArrowDown => KeyCode::Named(NamedKey::Down),
        Key::Escape => KeyCode::Named(NamedKey::Escape),
        Key::ShiftLeft => KeyCode::Named(NamedKey::LeftShift),
        Key::ShiftRight => KeyCode::Named(NamedKey::RightShift),
        Key::ControlLeft => KeyCode::Named(NamedKey::LeftCtrl),
        Key::ControlRight => KeyCode::Named(NamedKey::RightCtrl),
        Key::Digit0 => KeyCode::Digit(0),
        Key::Digit1 => KeyCode::Digit(1),
        Key::Digit2 => KeyCode::Digit(2),
        Key::Digit3 => KeyCode::Digit(3),
        Key::Digit4 => KeyCode::Digit(4),
        Key::Digit5 => KeyCode::Digit(5),
        Key::Digit6 => KeyCode::Digit(6),
        Key::Digit7 => KeyCode::Digit(7),
        Key::Digit8 => KeyCode::Digit(8),
        Key::Digit9 => KeyCode::Digit(9),
        Key::KeyA => KeyCode::Character('A'),
        Key::KeyB => KeyCode::Character('B'),
        Key::KeyC => KeyCode::Character('C'),
        Key::KeyD => KeyCode::Character('D'),
        Key::KeyE => KeyCode::Character('E'),
        Key::KeyF => KeyCode::Character('F'),
        Key::KeyG => KeyCode::Character('G'),
        Key::KeyH => KeyCode::Character('H'),
        Key::KeyI => KeyCode::Character('I'),
        Key::KeyJ => KeyCode::Character('J'),
        Key::KeyK => KeyCode::Character('K'),
        Key::KeyL => KeyCode::Character('L'),
        Key::KeyM => KeyCode::Character('M'),
        Key::KeyN => KeyCode::Character('N'),
        Key::KeyO => KeyCode::Character('O'),
        Key::KeyP => KeyCode::Character('P'),
        Key::KeyQ => KeyCode::Character('Q'),
        Key::KeyR => KeyCode::Character('R'),
        Key::KeyS => KeyCode::Character('S'),
        Key::KeyT => KeyCode::Character('T'),
        Key::KeyU => KeyCode::Character('U'),
        Key::KeyV => KeyCode::Character('V'),
        Key::KeyW => KeyCode::Character('W'),
        Key::KeyX => KeyCode::Character('X'),
        Key::KeyY => KeyCode::Character('Y'),
        Key::KeyZ => KeyCode::Character('Z'),
        _ => return None,
    })
}
