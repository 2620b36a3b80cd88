use glam::{Mat4, Vec3};

use crate::mesh::MeshKind;
use crate::shader::{GlobalUniform, ObjectUniform, ShaderUniforms, UniformSink};

/// Destination of a frame's uniform writes and draw calls.
pub trait Canvas: UniformSink {
    /// Draws `mesh` with the uniforms written so far.
    fn draw_mesh(&mut self, mesh: MeshKind);
}

/// One recorded draw: the mesh and the per-object block it was drawn with.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawCommand {
    pub mesh: MeshKind,
    pub object: ObjectUniform,
}

impl DrawCommand {
    pub fn model(&self) -> Mat4 {
        self.object.model()
    }

    /// World-space position of the mesh origin.
    pub fn origin(&self) -> Vec3 {
        self.model().transform_point3(Vec3::ZERO)
    }

    pub fn diffuse(&self) -> Vec3 {
        let [r, g, b, _] = self.object.diffuse;
        Vec3::new(r, g, b)
    }
}

/// CPU-side recording of a frame, consumed by the renderer.
#[derive(Debug, Clone, Default)]
pub struct FrameRecorder {
    uniforms: ShaderUniforms,
    draws: Vec<DrawCommand>,
}

impl FrameRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drops the recorded draws; uniform values persist like GPU state.
    pub fn clear(&mut self) {
        self.draws.clear();
    }

    pub fn globals(&self) -> &GlobalUniform {
        &self.uniforms.globals
    }

    pub fn uniforms(&self) -> &ShaderUniforms {
        &self.uniforms
    }

    pub fn draws(&self) -> &[DrawCommand] {
        &self.draws
    }

    pub fn draw_count(&self, mesh: MeshKind) -> usize {
        self.draws.iter().filter(|draw| draw.mesh == mesh).count()
    }
}

impl UniformSink for FrameRecorder {
    fn set_float(&mut self, name: &str, value: f32) {
        self.uniforms.set_float(name, value);
    }

    fn set_vec3(&mut self, name: &str, value: Vec3) {
        self.uniforms.set_vec3(name, value);
    }

    fn set_mat4(&mut self, name: &str, value: Mat4) {
        self.uniforms.set_mat4(name, value);
    }
}

impl Canvas for FrameRecorder {
    fn draw_mesh(&mut self, mesh: MeshKind) {
        self.draws.push(DrawCommand {
            mesh,
            object: self.uniforms.object,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn draws_snapshot_the_current_object_block() {
        let mut frame = FrameRecorder::new();
        frame.set_mat4("model", Mat4::from_translation(Vec3::X));
        frame.set_vec3("material.diffuse", Vec3::new(1.0, 0.0, 0.0));
        frame.draw_mesh(MeshKind::Cube);
        frame.set_mat4("model", Mat4::from_translation(Vec3::Y));
        frame.draw_mesh(MeshKind::Sphere);

        let draws = frame.draws();
        assert_eq!(draws.len(), 2);
        assert_eq!(draws[0].origin(), Vec3::X);
        assert_eq!(draws[1].origin(), Vec3::Y);
        assert_eq!(draws[1].diffuse(), Vec3::new(1.0, 0.0, 0.0));
        assert_eq!(frame.draw_count(MeshKind::Sphere), 1);
    }

    #[test]
    fn clear_keeps_uniform_state() {
        let mut frame = FrameRecorder::new();
        frame.set_vec3("viewPos", Vec3::ONE);
        frame.draw_mesh(MeshKind::Cube);
        frame.clear();
        assert!(frame.draws().is_empty());
        assert_eq!(frame.uniforms().vec3("viewPos"), Some(Vec3::ONE));
    }
}
