//! A walkable 3D restaurant rendered with a Phong lighting model.
//!
//! Everything up to the GPU boundary is plain data: the camera, the light
//! rig and the scene composer write named uniforms and draw calls into a
//! [`Canvas`]. [`FrameRecorder`] captures a frame on the CPU so it can be
//! inspected in tests or replayed by the wgpu [`Renderer`].

pub mod app;
pub mod camera;
pub mod config;
pub mod frame;
pub mod input;
pub mod light;
pub mod mesh;
pub mod render;
pub mod scene;
pub mod shader;
pub mod transform;

pub use app::AppState;
pub use camera::{Camera, CameraMovement, CameraSettings};
pub use config::{AppConfig, ConfigError};
pub use frame::{Canvas, DrawCommand, FrameRecorder};
pub use input::{Action, InputState, KeyBindings, KeyCode, MouseTracker, NamedKey};
pub use light::{
    Attenuation, DirectionalLight, LightColors, LightComponent, LightRig, LightToggles, PointLight,
};
pub use mesh::{MeshData, MeshKind};
pub use render::Renderer;
pub use scene::{compose_restaurant, CeilingFan, Material};
pub use shader::{ShaderError, ShaderSources, ShaderUniforms, UniformSink, MAX_POINT_LIGHTS};
pub use transform::Transform;
