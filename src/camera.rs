use std::ops::RangeInclusive;

use glam::{Mat4, Vec3};
use log::warn;

/// Directions accepted by [`Camera::process_keyboard`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CameraMovement {
    Forward,
    Backward,
    Left,
    Right,
    Up,
    Down,
}

/// Tunables for a fly camera. Angles are in degrees.
#[derive(Debug, Clone, PartialEq)]
pub struct CameraSettings {
    pub yaw: f32,
    pub pitch: f32,
    pub movement_speed: f32,
    pub mouse_sensitivity: f32,
    pub zoom: f32,
    pub zoom_range: RangeInclusive<f32>,
    pub pitch_limit: f32,
    pub z_near: f32,
    pub z_far: f32,
}

impl Default for CameraSettings {
    fn default() -> Self {
        Self {
            yaw: -90.0,
            pitch: 0.0,
            movement_speed: 2.5,
            mouse_sensitivity: 0.1,
            zoom: 45.0,
            zoom_range: 1.0..=45.0,
            pitch_limit: 89.0,
            z_near: 0.1,
            z_far: 100.0,
        }
    }
}

impl CameraSettings {
    fn normalized(mut self) -> Self {
        let defaults = Self::default();

        let limit = self.pitch_limit.abs();
        let limit = if limit.is_finite() { limit } else { defaults.pitch_limit };
        if limit != self.pitch_limit {
            warn!("pitch limit {} replaced by {limit}", self.pitch_limit);
            self.pitch_limit = limit;
        }

        let (start, end) = (*self.zoom_range.start(), *self.zoom_range.end());
        let range = if start.is_finite() && end.is_finite() {
            start.min(end)..=start.max(end)
        } else {
            defaults.zoom_range
        };
        if range != self.zoom_range {
            warn!("zoom range {:?} replaced by {range:?}", self.zoom_range);
            self.zoom_range = range;
        }
        self
    }
}

/// Fly camera driven by yaw/pitch angles.
///
/// `front`, `right` and `up` are derived from the angles and the world up
/// axis every time the orientation changes, so they always form a
/// right-handed orthonormal basis.
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    pub position: Vec3,
    front: Vec3,
    up: Vec3,
    right: Vec3,
    world_up: Vec3,
    yaw: f32,
    pitch: f32,
    zoom: f32,
    settings: CameraSettings,
}

impl Camera {
    pub fn new(position: Vec3) -> Self {
        Self::with_settings(position, CameraSettings::default())
    }

    /// Builds a camera from `settings`. A negative pitch limit is taken by
    /// magnitude and a reversed zoom range is swapped; non-finite bounds
    /// fall back to the defaults.
    pub fn with_settings(position: Vec3, settings: CameraSettings) -> Self {
        let settings = settings.normalized();
        let mut camera = Self {
            position,
            front: Vec3::NEG_Z,
            up: Vec3::Y,
            right: Vec3::X,
            world_up: Vec3::Y,
            yaw: settings.yaw,
            pitch: settings.pitch.clamp(-settings.pitch_limit, settings.pitch_limit),
            zoom: settings
                .zoom
                .clamp(*settings.zoom_range.start(), *settings.zoom_range.end()),
            settings,
        };
        camera.update_vectors();
        camera
    }

    pub fn front(&self) -> Vec3 {
        self.front
    }

    pub fn up(&self) -> Vec3 {
        self.up
    }

    pub fn right(&self) -> Vec3 {
        self.right
    }

    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    /// Vertical field of view in degrees.
    pub fn zoom(&self) -> f32 {
        self.zoom
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.position + self.front, self.up)
    }

    pub fn projection_matrix(&self, aspect: f32) -> Mat4 {
        Mat4::perspective_rh(
            self.zoom.to_radians(),
            aspect.max(0.01),
            self.settings.z_near,
            self.settings.z_far,
        )
    }

    /// Moves along the camera basis; there is no collision with the scene.
    pub fn process_keyboard(&mut self, direction: CameraMovement, delta_time: f32) {
        let velocity = self.settings.movement_speed * delta_time;
        let step = match direction {
            CameraMovement::Forward => self.front,
            CameraMovement::Backward => -self.front,
            CameraMovement::Left => -self.right,
            CameraMovement::Right => self.right,
            CameraMovement::Up => self.world_up,
            CameraMovement::Down => -self.world_up,
        };
        self.position += step * velocity;
    }

    pub fn process_mouse_movement(&mut self, x_offset: f32, y_offset: f32) {
        let limit = self.settings.pitch_limit;
        self.yaw += x_offset * self.settings.mouse_sensitivity;
        self.pitch = (self.pitch + y_offset * self.settings.mouse_sensitivity).clamp(-limit, limit);
        self.update_vectors();
    }

    pub fn process_mouse_scroll(&mut self, y_offset: f32) {
        let range = &self.settings.zoom_range;
        self.zoom = (self.zoom - y_offset).clamp(*range.start(), *range.end());
    }

    fn update_vectors(&mut self) {
        let (yaw, pitch) = (self.yaw.to_radians(), self.pitch.to_radians());
        self.front = Vec3::new(yaw.cos() * pitch.cos(), pitch.sin(), yaw.sin() * pitch.cos())
            .normalize();
        self.right = self.front.cross(self.world_up).normalize();
        self.up = self.right.cross(self.front).normalize();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_basis(camera: &Camera) {
        let (f, r, u) = (camera.front(), camera.right(), camera.up());
        for v in [f, r, u] {
            assert!((v.length() - 1.0).abs() < 1e-4);
        }
        assert!(f.dot(r).abs() < 1e-4);
        assert!(f.dot(u).abs() < 1e-4);
        assert!(r.dot(u).abs() < 1e-4);
        // right x up points backwards (towards -front) in a right-handed basis
        assert!((r.cross(u) + f).length() < 1e-4);
    }

    #[test]
    fn default_orientation_looks_down_negative_z() {
        let camera = Camera::new(Vec3::new(0.0, 3.0, 10.0));
        assert!((camera.front() - Vec3::NEG_Z).length() < 1e-6);
        assert!((camera.right() - Vec3::X).length() < 1e-6);
        assert!((camera.up() - Vec3::Y).length() < 1e-6);
        assert_eq!(camera.zoom(), 45.0);
    }

    #[test]
    fn pitch_never_leaves_limits() {
        let mut camera = Camera::new(Vec3::ZERO);
        let offsets = [500.0, -3.0, 10_000.0, -20_000.0, 7.5, 890.0, -1.0, -900.0];
        for (i, y) in offsets.iter().cycle().take(64).enumerate() {
            camera.process_mouse_movement(i as f32 * 13.0, *y);
            assert!(camera.pitch() <= 89.0 && camera.pitch() >= -89.0);
            assert_basis(&camera);
        }
    }

    #[test]
    fn zoom_never_leaves_range() {
        let mut camera = Camera::new(Vec3::ZERO);
        for y in [3.0, 100.0, -7.0, -200.0, 0.5, 44.0, -1.0, 12.0] {
            camera.process_mouse_scroll(y);
            assert!((1.0..=45.0).contains(&camera.zoom()));
        }
        camera.process_mouse_scroll(-1000.0);
        assert_eq!(camera.zoom(), 45.0);
        camera.process_mouse_scroll(1000.0);
        assert_eq!(camera.zoom(), 1.0);
    }

    #[test]
    fn keyboard_moves_along_basis_scaled_by_time() {
        let mut camera = Camera::new(Vec3::ZERO);
        camera.process_keyboard(CameraMovement::Forward, 2.0);
        assert!((camera.position - Vec3::new(0.0, 0.0, -5.0)).length() < 1e-5);
        camera.process_keyboard(CameraMovement::Right, 0.4);
        assert!((camera.position - Vec3::new(1.0, 0.0, -5.0)).length() < 1e-5);
        camera.process_keyboard(CameraMovement::Up, 1.0);
        camera.process_keyboard(CameraMovement::Down, 0.2);
        assert!((camera.position.y - 2.0).abs() < 1e-5);
    }

    #[test]
    fn vertical_movement_ignores_pitch() {
        let mut camera = Camera::new(Vec3::ZERO);
        camera.process_mouse_movement(0.0, 450.0);
        camera.process_keyboard(CameraMovement::Up, 1.0);
        assert!((camera.position - Vec3::new(0.0, 2.5, 0.0)).length() < 1e-5);
    }

    #[test]
    fn inverted_limits_are_normalized() {
        let settings = CameraSettings {
            pitch: 120.0,
            zoom: 90.0,
            zoom_range: 60.0..=10.0,
            pitch_limit: -45.0,
            ..CameraSettings::default()
        };
        let mut camera = Camera::with_settings(Vec3::ZERO, settings);
        assert_eq!(camera.pitch(), 45.0);
        assert_eq!(camera.zoom(), 60.0);

        camera.process_mouse_movement(0.0, -10_000.0);
        assert_eq!(camera.pitch(), -45.0);
        camera.process_mouse_scroll(500.0);
        assert_eq!(camera.zoom(), 10.0);
    }

    #[test]
    fn non_finite_limits_fall_back_to_defaults() {
        let settings = CameraSettings {
            zoom_range: f32::NAN..=45.0,
            pitch_limit: f32::INFINITY,
            ..CameraSettings::default()
        };
        let mut camera = Camera::with_settings(Vec3::ZERO, settings);
        camera.process_mouse_movement(0.0, 5_000.0);
        assert_eq!(camera.pitch(), 89.0);
        camera.process_mouse_scroll(100.0);
        assert_eq!(camera.zoom(), 1.0);
    }

    #[test]
    fn projection_uses_zoom_as_field_of_view() {
        let mut camera = Camera::new(Vec3::ZERO);
        camera.process_mouse_scroll(15.0);
        let expected = Mat4::perspective_rh(30f32.to_radians(), 1.25, 0.1, 100.0);
        assert!(camera.projection_matrix(1.25).abs_diff_eq(expected, 1e-6));
    }
}
