use std::collections::{HashMap, HashSet};

use glam::Vec2;

use crate::camera::CameraMovement;
use crate::light::LightComponent;

/// Identifier for a physical keyboard key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    Named(NamedKey),
    Character(char),
    Digit(u8),
}

impl KeyCode {
    /// Letter key; lowercase input is folded to uppercase.
    pub fn letter(ch: char) -> Self {
        Self::Character(ch.to_ascii_uppercase())
    }
}

/// Non-printable keys the scene reacts to or that users commonly hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NamedKey {
    Space,
    Enter,
    Tab,
    Left,
    Right,
    Up,
    Down,
    Escape,
    LeftShift,
    RightShift,
    LeftCtrl,
    RightCtrl,
}

/// Edge-triggered commands bound to key presses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Close,
    DirectionalLight(bool),
    PointLights(bool),
    Component(LightComponent, bool),
    CeilingFan(bool),
}

/// Maps keys to held movement and to pressed actions.
#[derive(Debug, Clone, PartialEq)]
pub struct KeyBindings {
    movement: HashMap<KeyCode, CameraMovement>,
    actions: HashMap<KeyCode, Action>,
}

impl KeyBindings {
    pub fn empty() -> Self {
        Self {
            movement: HashMap::new(),
            actions: HashMap::new(),
        }
    }

    pub fn bind_movement(&mut self, key: KeyCode, movement: CameraMovement) -> &mut Self {
        self.movement.insert(key, movement);
        self
    }

    pub fn bind_action(&mut self, key: KeyCode, action: Action) -> &mut Self {
        self.actions.insert(key, action);
        self
    }

    pub fn movement(&self, key: KeyCode) -> Option<CameraMovement> {
        self.movement.get(&key).copied()
    }

    pub fn action(&self, key: KeyCode) -> Option<Action> {
        self.actions.get(&key).copied()
    }
}

impl Default for KeyBindings {
    fn default() -> Self {
        use CameraMovement::*;
        use LightComponent::*;

        let mut bindings = Self::empty();
        bindings
            .bind_movement(KeyCode::letter('W'), Forward)
            .bind_movement(KeyCode::letter('S'), Backward)
            .bind_movement(KeyCode::letter('A'), Left)
            .bind_movement(KeyCode::letter('D'), Right)
            .bind_movement(KeyCode::letter('Q'), Up)
            .bind_movement(KeyCode::letter('E'), Down)
            .bind_action(KeyCode::Named(NamedKey::Escape), Action::Close)
            .bind_action(KeyCode::letter('B'), Action::DirectionalLight(true))
            .bind_action(KeyCode::letter('N'), Action::DirectionalLight(false))
            .bind_action(KeyCode::letter('C'), Action::PointLights(true))
            .bind_action(KeyCode::letter('V'), Action::PointLights(false))
            .bind_action(KeyCode::Digit(1), Action::Component(Ambient, true))
            .bind_action(KeyCode::Digit(2), Action::Component(Ambient, false))
            .bind_action(KeyCode::Digit(3), Action::Component(Diffuse, true))
            .bind_action(KeyCode::Digit(4), Action::Component(Diffuse, false))
            .bind_action(KeyCode::Digit(5), Action::Component(Specular, true))
            .bind_action(KeyCode::Digit(6), Action::Component(Specular, false))
            .bind_action(KeyCode::letter('J'), Action::CeilingFan(true))
            .bind_action(KeyCode::letter('K'), Action::CeilingFan(false));
        bindings
    }
}

/// Keys currently held down.
#[derive(Debug, Default, Clone)]
pub struct InputState {
    keys: HashSet<KeyCode>,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a press; returns `true` only on the up-to-down edge.
    pub fn set_key_down(&mut self, key: KeyCode) -> bool {
        self.keys.insert(key)
    }

    pub fn set_key_up(&mut self, key: KeyCode) {
        self.keys.remove(&key);
    }

    pub fn is_key_down(&self, key: KeyCode) -> bool {
        self.keys.contains(&key)
    }

    pub fn pressed(&self) -> impl Iterator<Item = KeyCode> + '_ {
        self.keys.iter().copied()
    }

    /// Forgets held keys, e.g. when the window loses focus and release
    /// events will not arrive.
    pub fn clear(&mut self) {
        self.keys.clear();
    }
}

/// Turns absolute cursor positions into look offsets.
///
/// The first sample after creation or [`MouseTracker::reset`] only seeds the
/// previous position, so the camera does not jump to wherever the cursor
/// happened to be.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct MouseTracker {
    last: Option<Vec2>,
}

impl MouseTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `(x_offset, y_offset)` with y reversed, since window
    /// coordinates grow downwards.
    pub fn offset(&mut self, position: Vec2) -> Vec2 {
        let last = self.last.replace(position).unwrap_or(position);
        Vec2::new(position.x - last.x, last.y - position.y)
    }

    pub fn reset(&mut self) {
        self.last = None;
    }
}
