//! Directional and point lights with per-component toggles.
//!
//! Lights never skip an upload: a disabled component writes the zero vector
//! so the shader's additive lighting sum is unaffected. The overall on/off
//! flag dominates the component toggles.

use glam::Vec3;
use log::{debug, warn};

use crate::shader::{PointLightNames, UniformSink, MAX_POINT_LIGHTS};

/// Ambient, diffuse and specular colors of a light.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LightColors {
    pub ambient: Vec3,
    pub diffuse: Vec3,
    pub specular: Vec3,
}

impl LightColors {
    pub const BLACK: Self = Self {
        ambient: Vec3::ZERO,
        diffuse: Vec3::ZERO,
        specular: Vec3::ZERO,
    };

    pub fn new(ambient: Vec3, diffuse: Vec3, specular: Vec3) -> Self {
        Self {
            ambient,
            diffuse,
            specular,
        }
    }
}

/// Independent switches for a light and each of its components.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LightToggles {
    pub on: bool,
    pub ambient: bool,
    pub diffuse: bool,
    pub specular: bool,
}

impl Default for LightToggles {
    fn default() -> Self {
        Self {
            on: true,
            ambient: true,
            diffuse: true,
            specular: true,
        }
    }
}

impl LightToggles {
    /// Colors the shader should receive for the stored `colors`.
    pub fn effective(&self, colors: &LightColors) -> LightColors {
        if !self.on {
            return LightColors::BLACK;
        }
        let pick = |enabled: bool, color: Vec3| if enabled { color } else { Vec3::ZERO };
        LightColors {
            ambient: pick(self.ambient, colors.ambient),
            diffuse: pick(self.diffuse, colors.diffuse),
            specular: pick(self.specular, colors.specular),
        }
    }
}

/// Toggle setters shared by both light kinds.
macro_rules! impl_toggle_setters {
    ($ty:ty) => {
        impl $ty {
            pub fn turn_on(&mut self) {
                self.toggles.on = true;
            }

            pub fn turn_off(&mut self) {
                self.toggles.on = false;
            }

            pub fn turn_ambient_on(&mut self) {
                self.toggles.ambient = true;
            }

            pub fn turn_ambient_off(&mut self) {
                self.toggles.ambient = false;
            }

            pub fn turn_diffuse_on(&mut self) {
                self.toggles.diffuse = true;
            }

            pub fn turn_diffuse_off(&mut self) {
                self.toggles.diffuse = false;
            }

            pub fn turn_specular_on(&mut self) {
                self.toggles.specular = true;
            }

            pub fn turn_specular_off(&mut self) {
                self.toggles.specular = false;
            }

            pub fn toggles(&self) -> LightToggles {
                self.toggles
            }

            pub fn colors(&self) -> LightColors {
                self.colors
            }

            /// Colors after applying the toggles.
            pub fn effective_colors(&self) -> LightColors {
                self.toggles.effective(&self.colors)
            }
        }
    };
}

/// Sun-like light with a fixed uniform namespace (`dirLight.*`).
#[derive(Debug, Clone, PartialEq)]
pub struct DirectionalLight {
    /// Not normalized here; the shader normalizes.
    pub direction: Vec3,
    colors: LightColors,
    toggles: LightToggles,
}

impl DirectionalLight {
    pub fn new(direction: Vec3, colors: LightColors) -> Self {
        Self {
            direction,
            colors,
            toggles: LightToggles::default(),
        }
    }

    pub fn upload(&self, sink: &mut impl UniformSink) {
        let colors = self.effective_colors();
        sink.set_vec3("dirLight.direction", self.direction);
        sink.set_vec3("dirLight.ambient", colors.ambient);
        sink.set_vec3("dirLight.diffuse", colors.diffuse);
        sink.set_vec3("dirLight.specular", colors.specular);
    }
}

impl_toggle_setters!(DirectionalLight);

/// Distance falloff `1 / (constant + linear·d + quadratic·d²)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Attenuation {
    pub constant: f32,
    pub linear: f32,
    pub quadratic: f32,
}

impl Attenuation {
    /// Smallest constant term accepted; keeps the falloff finite at d = 0.
    pub const MIN_CONSTANT: f32 = 1e-3;

    pub fn new(constant: f32, linear: f32, quadratic: f32) -> Self {
        let clamped = constant.max(Self::MIN_CONSTANT);
        if clamped != constant {
            warn!("attenuation constant {constant} raised to {clamped}");
        }
        Self {
            constant: clamped,
            linear,
            quadratic,
        }
    }
}

/// Omnidirectional light occupying one `pointLights[slot]` entry.
#[derive(Debug, Clone, PartialEq)]
pub struct PointLight {
    pub position: Vec3,
    pub attenuation: Attenuation,
    colors: LightColors,
    toggles: LightToggles,
    slot: usize,
    names: PointLightNames,
}

impl PointLight {
    pub fn new(slot: usize, position: Vec3, colors: LightColors, attenuation: Attenuation) -> Self {
        if slot >= MAX_POINT_LIGHTS {
            warn!("point light slot {slot} exceeds the {MAX_POINT_LIGHTS} slots the shader declares");
        }
        Self {
            position,
            attenuation,
            colors,
            toggles: LightToggles::default(),
            slot,
            names: PointLightNames::for_slot(slot),
        }
    }

    pub fn slot(&self) -> usize {
        self.slot
    }

    pub fn names(&self) -> &PointLightNames {
        &self.names
    }

    pub fn upload(&self, sink: &mut impl UniformSink) {
        let colors = self.effective_colors();
        sink.set_vec3(&self.names.position, self.position);
        sink.set_vec3(&self.names.ambient, colors.ambient);
        sink.set_vec3(&self.names.diffuse, colors.diffuse);
        sink.set_vec3(&self.names.specular, colors.specular);
        sink.set_float(&self.names.constant, self.attenuation.constant);
        sink.set_float(&self.names.linear, self.attenuation.linear);
        sink.set_float(&self.names.quadratic, self.attenuation.quadratic);
    }
}

impl_toggle_setters!(PointLight);

/// A lighting component that can be switched across every light at once.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LightComponent {
    Ambient,
    Diffuse,
    Specular,
}

/// The scene's lights and the global switches over them.
#[derive(Debug, Clone, PartialEq)]
pub struct LightRig {
    pub directional: DirectionalLight,
    pub points: Vec<PointLight>,
}

impl LightRig {
    pub fn new(directional: DirectionalLight, points: Vec<PointLight>) -> Self {
        Self {
            directional,
            points,
        }
    }

    /// Sun from above plus pink, white and blue point lights.
    pub fn restaurant() -> Self {
        let directional = DirectionalLight::new(
            Vec3::new(-0.2, -1.0, -0.3),
            LightColors::new(Vec3::splat(0.3), Vec3::splat(0.5), Vec3::splat(0.5)),
        );
        let points = vec![
            PointLight::new(
                0,
                Vec3::new(4.0, 5.0, -4.0),
                LightColors::new(
                    Vec3::new(0.6, 0.3, 0.6),
                    Vec3::new(1.0, 0.5, 1.0),
                    Vec3::new(1.0, 0.5, 1.0),
                ),
                Attenuation::new(1.0, 0.09, 0.032),
            ),
            PointLight::new(
                1,
                Vec3::new(-4.0, 5.0, -4.0),
                LightColors::new(Vec3::splat(0.6), Vec3::ONE, Vec3::ONE),
                Attenuation::new(1.0, 0.09, 0.032),
            ),
            PointLight::new(
                2,
                Vec3::new(0.0, 4.0, 3.0),
                LightColors::new(
                    Vec3::new(0.0, 0.0, 0.9),
                    Vec3::new(0.0, 0.0, 2.0),
                    Vec3::new(0.5, 0.5, 1.0),
                ),
                Attenuation::new(1.0, 0.07, 0.017),
            ),
        ];
        Self::new(directional, points)
    }

    pub fn set_directional(&mut self, on: bool) {
        debug!("directional light {}", on_off(on));
        if on {
            self.directional.turn_on();
        } else {
            self.directional.turn_off();
        }
    }

    pub fn set_point_lights(&mut self, on: bool) {
        debug!("point lights {}", on_off(on));
        for light in &mut self.points {
            if on {
                light.turn_on();
            } else {
                light.turn_off();
            }
        }
    }

    /// Switches one component on the directional light and every point light.
    pub fn set_component(&mut self, component: LightComponent, on: bool) {
        debug!("{component:?} lighting {}", on_off(on));
        self.directional.toggles.set(component, on);
        for light in &mut self.points {
            light.toggles.set(component, on);
        }
    }

    pub fn upload(&self, sink: &mut impl UniformSink) {
        self.directional.upload(sink);
        for light in &self.points {
            light.upload(sink);
        }
    }
}

impl LightToggles {
    fn set(&mut self, component: LightComponent, on: bool) {
        match component {
            LightComponent::Ambient => self.ambient = on,
            LightComponent::Diffuse => self.diffuse = on,
            LightComponent::Specular => self.specular = on,
        }
    }
}

fn on_off(on: bool) -> &'static str {
    if on {
        "on"
    } else {
        "off"
    }
}
