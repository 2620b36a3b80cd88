use glam::{Vec2, Vec3};
use log::{debug, info};

use crate::camera::Camera;
use crate::frame::Canvas;
use crate::input::{Action, InputState, KeyBindings, KeyCode, MouseTracker};
use crate::light::LightRig;
use crate::scene::{compose_restaurant, CeilingFan};

/// Everything the main loop mutates between frames.
///
/// Window-system callbacks forward into the `handle_*` methods; the loop
/// then calls [`AppState::update`] and [`AppState::render`] once per frame.
#[derive(Debug, Clone)]
pub struct AppState {
    pub camera: Camera,
    pub lights: LightRig,
    pub fan: CeilingFan,
    bindings: KeyBindings,
    input: InputState,
    mouse: MouseTracker,
    close_requested: bool,
}

impl AppState {
    pub fn new(camera: Camera, lights: LightRig, bindings: KeyBindings) -> Self {
        Self {
            camera,
            lights,
            fan: CeilingFan::default(),
            bindings,
            input: InputState::new(),
            mouse: MouseTracker::new(),
            close_requested: false,
        }
    }

    /// The restaurant scene viewed from `camera_position`.
    pub fn restaurant(camera_position: Vec3) -> Self {
        Self::new(
            Camera::new(camera_position),
            LightRig::restaurant(),
            KeyBindings::default(),
        )
    }

    pub fn close_requested(&self) -> bool {
        self.close_requested
    }

    /// Handles a key going down. Bound actions fire only on the press edge,
    /// so key repeat does not retrigger them.
    pub fn handle_key_pressed(&mut self, key: KeyCode) {
        if !self.input.set_key_down(key) {
            return;
        }
        if let Some(action) = self.bindings.action(key) {
            self.apply(action);
        }
    }

    pub fn handle_key_released(&mut self, key: KeyCode) {
        self.input.set_key_up(key);
    }

    /// Feeds an absolute cursor position into the look controls.
    pub fn handle_cursor(&mut self, position: Vec2) {
        let offset = self.mouse.offset(position);
        self.camera.process_mouse_movement(offset.x, offset.y);
    }

    pub fn handle_scroll(&mut self, y_offset: f32) {
        self.camera.process_mouse_scroll(y_offset);
    }

    /// Called when the window regains focus or the cursor is re-captured.
    pub fn reset_input(&mut self) {
        self.mouse.reset();
        self.input.clear();
    }

    pub fn apply(&mut self, action: Action) {
        match action {
            Action::Close => {
                info!("close requested");
                self.close_requested = true;
            }
            Action::DirectionalLight(on) => self.lights.set_directional(on),
            Action::PointLights(on) => self.lights.set_point_lights(on),
            Action::Component(component, on) => self.lights.set_component(component, on),
            Action::CeilingFan(on) => {
                debug!("ceiling fan {}", if on { "started" } else { "stopped" });
                self.fan.set_running(on);
            }
        }
    }

    /// Applies held movement keys and advances the fan by `delta_time`
    /// seconds.
    pub fn update(&mut self, delta_time: f32) {
        let movements: Vec<_> = self
            .input
            .pressed()
            .filter_map(|key| self.bindings.movement(key))
            .collect();
        for movement in movements {
            self.camera.process_keyboard(movement, delta_time);
        }
        self.fan.advance(delta_time);
    }

    /// Uploads camera and light uniforms, then composes the scene.
    pub fn render(&self, canvas: &mut impl Canvas, aspect: f32) {
        canvas.set_vec3("viewPos", self.camera.position);
        self.lights.upload(canvas);
        canvas.set_mat4("projection", self.camera.projection_matrix(aspect));
        canvas.set_mat4("view", self.camera.view_matrix());
        compose_restaurant(canvas, &self.lights, self.fan.angle());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frame::FrameRecorder;
    use crate::input::NamedKey;

    fn app() -> AppState {
        AppState::restaurant(Vec3::new(0.0, 3.0, 10.0))
    }

    #[test]
    fn fan_keys_start_and_stop_rotation() {
        let mut app = app();
        app.update(0.5);
        assert_eq!(app.fan.angle(), 0.0);

        app.handle_key_pressed(KeyCode::letter('J'));
        app.update(0.1);
        assert!((app.fan.angle() - 70.0).abs() < 1e-3);

        app.handle_key_pressed(KeyCode::letter('K'));
        app.update(0.1);
        assert!((app.fan.angle() - 70.0).abs() < 1e-3);
    }

    #[test]
    fn held_movement_key_moves_every_frame() {
        let mut app = app();
        app.handle_key_pressed(KeyCode::letter('W'));
        app.update(0.2);
        app.update(0.2);
        assert!((app.camera.position - Vec3::new(0.0, 3.0, 9.0)).length() < 1e-5);
        app.handle_key_released(KeyCode::letter('W'));
        app.update(0.2);
        assert!((app.camera.position.z - 9.0).abs() < 1e-5);
    }

    #[test]
    fn repeated_press_does_not_retrigger_action() {
        let mut app = app();
        app.handle_key_pressed(KeyCode::letter('V'));
        app.lights.set_point_lights(true);
        // auto-repeat while still held
        app.handle_key_pressed(KeyCode::letter('V'));
        assert!(app.lights.points.iter().all(|l| l.toggles().on));
    }

    #[test]
    fn escape_requests_close() {
        let mut app = app();
        assert!(!app.close_requested());
        app.handle_key_pressed(KeyCode::Named(NamedKey::Escape));
        assert!(app.close_requested());
    }

    #[test]
    fn first_cursor_sample_after_reset_keeps_orientation() {
        let mut app = app();
        let (yaw, pitch) = (app.camera.yaw(), app.camera.pitch());
        app.handle_cursor(Vec2::new(1234.0, -987.0));
        assert_eq!((app.camera.yaw(), app.camera.pitch()), (yaw, pitch));

        app.handle_cursor(Vec2::new(1244.0, -997.0));
        assert!((app.camera.yaw() - (yaw + 1.0)).abs() < 1e-5);
        assert!((app.camera.pitch() - 1.0).abs() < 1e-5);

        app.reset_input();
        let (yaw, pitch) = (app.camera.yaw(), app.camera.pitch());
        app.handle_cursor(Vec2::new(0.0, 0.0));
        assert_eq!((app.camera.yaw(), app.camera.pitch()), (yaw, pitch));
    }

    #[test]
    fn render_uploads_camera_before_drawing() {
        let app = app();
        let mut frame = FrameRecorder::new();
        app.render(&mut frame, 1000.0 / 800.0);
        let uniforms = frame.uniforms();
        assert_eq!(uniforms.vec3("viewPos"), Some(Vec3::new(0.0, 3.0, 10.0)));
        assert_eq!(uniforms.mat4("view"), Some(app.camera.view_matrix()));
        assert_eq!(frame.draws().len(), 162);
    }
}
