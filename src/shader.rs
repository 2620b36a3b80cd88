//! Shader sources and the named-uniform contract of the Phong program.
//!
//! The GPU program itself lives in the renderer; this module owns the parts
//! that do not need a device: reading the two source files, mapping uniform
//! names onto the uniform blocks, and the blocks' byte layout.

use std::fs;
use std::path::{Path, PathBuf};

use bytemuck::{Pod, Zeroable};
use glam::{Mat3, Mat4, Vec3};
use log::debug;
use thiserror::Error;

/// Number of point-light slots declared by the fragment shader.
pub const MAX_POINT_LIGHTS: usize = 3;

pub const VERTEX_SHADER_FILE: &str = "phong.vert.wgsl";
pub const FRAGMENT_SHADER_FILE: &str = "phong.frag.wgsl";

#[derive(Debug, Error)]
pub enum ShaderError {
    #[error("failed to read {stage} shader {}", path.display())]
    Read {
        stage: ShaderStage,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("{stage} shader {} is empty", path.display())]
    Empty { stage: ShaderStage, path: PathBuf },
    #[error("failed to compile {stage} shader: {message}")]
    Compile { stage: ShaderStage, message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShaderStage {
    Vertex,
    Fragment,
}

impl std::fmt::Display for ShaderStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            ShaderStage::Vertex => "vertex",
            ShaderStage::Fragment => "fragment",
        })
    }
}

/// Vertex and fragment source text of the lighting program.
#[derive(Debug, Clone, PartialEq)]
pub struct ShaderSources {
    pub vertex: String,
    pub fragment: String,
}

impl ShaderSources {
    /// Reads `phong.vert.wgsl` and `phong.frag.wgsl` from `dir`.
    pub fn load(dir: &Path) -> Result<Self, ShaderError> {
        Self::from_files(
            &dir.join(VERTEX_SHADER_FILE),
            &dir.join(FRAGMENT_SHADER_FILE),
        )
    }

    pub fn from_files(vertex: &Path, fragment: &Path) -> Result<Self, ShaderError> {
        Ok(Self {
            vertex: read_stage(ShaderStage::Vertex, vertex)?,
            fragment: read_stage(ShaderStage::Fragment, fragment)?,
        })
    }
}

fn read_stage(stage: ShaderStage, path: &Path) -> Result<String, ShaderError> {
    let source = fs::read_to_string(path).map_err(|source| ShaderError::Read {
        stage,
        path: path.to_path_buf(),
        source,
    })?;
    if source.trim().is_empty() {
        return Err(ShaderError::Empty {
            stage,
            path: path.to_path_buf(),
        });
    }
    Ok(source)
}

/// Typed uniform writes keyed by name.
///
/// Writes are idempotent and order-independent; the last value written to a
/// name before a draw is the one the draw sees.
pub trait UniformSink {
    fn set_float(&mut self, name: &str, value: f32);
    fn set_vec3(&mut self, name: &str, value: Vec3);
    fn set_mat4(&mut self, name: &str, value: Mat4);
}

/// A resolved uniform name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UniformPath {
    ViewPos,
    Projection,
    View,
    Model,
    Material(MaterialField),
    DirLight(LightField),
    PointLight(usize, LightField),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MaterialField {
    Ambient,
    Diffuse,
    Specular,
    Shininess,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LightField {
    Direction,
    Position,
    Ambient,
    Diffuse,
    Specular,
    Constant,
    Linear,
    Quadratic,
}

impl LightField {
    fn parse(name: &str) -> Option<Self> {
        Some(match name {
            "direction" => Self::Direction,
            "position" => Self::Position,
            "ambient" => Self::Ambient,
            "diffuse" => Self::Diffuse,
            "specular" => Self::Specular,
            "constant" => Self::Constant,
            "linear" => Self::Linear,
            "quadratic" => Self::Quadratic,
            _ => return None,
        })
    }
}

impl UniformPath {
    /// Resolves a uniform name such as `material.diffuse` or
    /// `pointLights[2].position`. Returns `None` for names the program
    /// does not declare.
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "viewPos" => return Some(Self::ViewPos),
            "projection" => return Some(Self::Projection),
            "view" => return Some(Self::View),
            "model" => return Some(Self::Model),
            _ => {}
        }
        let (block, field) = name.split_once('.')?;
        if block == "material" {
            let field = match field {
                "ambient" => MaterialField::Ambient,
                "diffuse" => MaterialField::Diffuse,
                "specular" => MaterialField::Specular,
                "shininess" => MaterialField::Shininess,
                _ => return None,
            };
            return Some(Self::Material(field));
        }
        if block == "dirLight" {
            return match LightField::parse(field)? {
                field @ (LightField::Direction
                | LightField::Ambient
                | LightField::Diffuse
                | LightField::Specular) => Some(Self::DirLight(field)),
                _ => None,
            };
        }
        let index = block
            .strip_prefix("pointLights[")?
            .strip_suffix(']')?
            .parse::<usize>()
            .ok()?;
        if index >= MAX_POINT_LIGHTS {
            return None;
        }
        match LightField::parse(field)? {
            LightField::Direction => None,
            field => Some(Self::PointLight(index, field)),
        }
    }
}

/// Cached uniform names of one point-light slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PointLightNames {
    pub position: String,
    pub ambient: String,
    pub diffuse: String,
    pub specular: String,
    pub constant: String,
    pub linear: String,
    pub quadratic: String,
}

impl PointLightNames {
    pub fn for_slot(slot: usize) -> Self {
        let field = |name: &str| format!("pointLights[{slot}].{name}");
        Self {
            position: field("position"),
            ambient: field("ambient"),
            diffuse: field("diffuse"),
            specular: field("specular"),
            constant: field("constant"),
            linear: field("linear"),
            quadratic: field("quadratic"),
        }
    }
}

#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct DirLightUniform {
    pub direction: [f32; 4],
    pub ambient: [f32; 4],
    pub diffuse: [f32; 4],
    pub specular: [f32; 4],
}

#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct PointLightUniform {
    pub position: [f32; 4],
    pub ambient: [f32; 4],
    pub diffuse: [f32; 4],
    pub specular: [f32; 4],
    /// constant, linear, quadratic, unused
    pub attenuation: [f32; 4],
}

/// Per-frame block bound at group 0.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct GlobalUniform {
    pub projection: [[f32; 4]; 4],
    pub view: [[f32; 4]; 4],
    pub view_pos: [f32; 4],
    pub dir_light: DirLightUniform,
    pub point_lights: [PointLightUniform; MAX_POINT_LIGHTS],
}

impl Default for GlobalUniform {
    fn default() -> Self {
        let mut uniform = Self::zeroed();
        uniform.projection = Mat4::IDENTITY.to_cols_array_2d();
        uniform.view = Mat4::IDENTITY.to_cols_array_2d();
        for light in &mut uniform.point_lights {
            light.attenuation[0] = 1.0;
        }
        uniform
    }
}

/// Per-draw block bound at group 1.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct ObjectUniform {
    pub model: [[f32; 4]; 4],
    pub normal: [[f32; 4]; 3],
    pub ambient: [f32; 4],
    pub diffuse: [f32; 4],
    /// rgb specular, shininess in w
    pub specular: [f32; 4],
}

impl ObjectUniform {
    pub fn model(&self) -> Mat4 {
        Mat4::from_cols_array_2d(&self.model)
    }
}

impl Default for ObjectUniform {
    fn default() -> Self {
        let mut uniform = Self::zeroed();
        uniform.model = Mat4::IDENTITY.to_cols_array_2d();
        uniform.normal = mat3_to_3x4(Mat3::IDENTITY);
        uniform
    }
}

/// CPU mirror of both uniform blocks, addressed by uniform name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ShaderUniforms {
    pub globals: GlobalUniform,
    pub object: ObjectUniform,
}

impl ShaderUniforms {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads back a vector uniform, e.g. to inspect what a light uploaded.
    pub fn vec3(&self, name: &str) -> Option<Vec3> {
        let slot = match UniformPath::parse(name)? {
            UniformPath::ViewPos => &self.globals.view_pos,
            UniformPath::Material(MaterialField::Ambient) => &self.object.ambient,
            UniformPath::Material(MaterialField::Diffuse) => &self.object.diffuse,
            UniformPath::Material(MaterialField::Specular) => &self.object.specular,
            UniformPath::DirLight(field) => dir_light_vec(&self.globals.dir_light, field)?,
            UniformPath::PointLight(index, field) => {
                point_light_vec(&self.globals.point_lights[index], field)?
            }
            _ => return None,
        };
        Some(Vec3::new(slot[0], slot[1], slot[2]))
    }

    /// Reads back a scalar uniform.
    pub fn float(&self, name: &str) -> Option<f32> {
        match UniformPath::parse(name)? {
            UniformPath::Material(MaterialField::Shininess) => Some(self.object.specular[3]),
            UniformPath::PointLight(index, field) => {
                let attenuation = &self.globals.point_lights[index].attenuation;
                match field {
                    LightField::Constant => Some(attenuation[0]),
                    LightField::Linear => Some(attenuation[1]),
                    LightField::Quadratic => Some(attenuation[2]),
                    _ => None,
                }
            }
            _ => None,
        }
    }

    /// Reads back a matrix uniform.
    pub fn mat4(&self, name: &str) -> Option<Mat4> {
        let columns = match UniformPath::parse(name)? {
            UniformPath::Projection => &self.globals.projection,
            UniformPath::View => &self.globals.view,
            UniformPath::Model => &self.object.model,
            _ => return None,
        };
        Some(Mat4::from_cols_array_2d(columns))
    }
}

impl UniformSink for ShaderUniforms {
    fn set_float(&mut self, name: &str, value: f32) {
        let slot = match UniformPath::parse(name) {
            Some(UniformPath::Material(MaterialField::Shininess)) => &mut self.object.specular[3],
            Some(UniformPath::PointLight(index, field)) => {
                let attenuation = &mut self.globals.point_lights[index].attenuation;
                match field {
                    LightField::Constant => &mut attenuation[0],
                    LightField::Linear => &mut attenuation[1],
                    LightField::Quadratic => &mut attenuation[2],
                    _ => return ignored(name, "float"),
                }
            }
            _ => return ignored(name, "float"),
        };
        *slot = value;
    }

    fn set_vec3(&mut self, name: &str, value: Vec3) {
        let slot = match UniformPath::parse(name) {
            Some(UniformPath::ViewPos) => &mut self.globals.view_pos,
            Some(UniformPath::Material(MaterialField::Ambient)) => &mut self.object.ambient,
            Some(UniformPath::Material(MaterialField::Diffuse)) => &mut self.object.diffuse,
            Some(UniformPath::Material(MaterialField::Specular)) => &mut self.object.specular,
            Some(UniformPath::DirLight(field)) => {
                match dir_light_vec_mut(&mut self.globals.dir_light, field) {
                    Some(slot) => slot,
                    None => return ignored(name, "vec3"),
                }
            }
            Some(UniformPath::PointLight(index, field)) => {
                match point_light_vec_mut(&mut self.globals.point_lights[index], field) {
                    Some(slot) => slot,
                    None => return ignored(name, "vec3"),
                }
            }
            _ => return ignored(name, "vec3"),
        };
        // w of material.specular holds the shininess
        slot[..3].copy_from_slice(&value.to_array());
    }

    fn set_mat4(&mut self, name: &str, value: Mat4) {
        match UniformPath::parse(name) {
            Some(UniformPath::Projection) => self.globals.projection = value.to_cols_array_2d(),
            Some(UniformPath::View) => self.globals.view = value.to_cols_array_2d(),
            Some(UniformPath::Model) => {
                self.object.model = value.to_cols_array_2d();
                let normal = Mat3::from_mat4(value).inverse().transpose();
                self.object.normal = mat3_to_3x4(normal);
            }
            _ => ignored(name, "mat4"),
        }
    }
}

fn ignored(name: &str, kind: &str) {
    debug!("ignoring {kind} write to inactive uniform {name}");
}

fn dir_light_vec(light: &DirLightUniform, field: LightField) -> Option<&[f32; 4]> {
    match field {
        LightField::Direction => Some(&light.direction),
        LightField::Ambient => Some(&light.ambient),
        LightField::Diffuse => Some(&light.diffuse),
        LightField::Specular => Some(&light.specular),
        _ => None,
    }
}

fn dir_light_vec_mut(light: &mut DirLightUniform, field: LightField) -> Option<&mut [f32; 4]> {
    match field {
        LightField::Direction => Some(&mut light.direction),
        LightField::Ambient => Some(&mut light.ambient),
        LightField::Diffuse => Some(&mut light.diffuse),
        LightField::Specular => Some(&mut light.specular),
        _ => None,
    }
}

fn point_light_vec(light: &PointLightUniform, field: LightField) -> Option<&[f32; 4]> {
    match field {
        LightField::Position => Some(&light.position),
        LightField::Ambient => Some(&light.ambient),
        LightField::Diffuse => Some(&light.diffuse),
        LightField::Specular => Some(&light.specular),
        _ => None,
    }
}

fn point_light_vec_mut(light: &mut PointLightUniform, field: LightField) -> Option<&mut [f32; 4]> {
    match field {
        LightField::Position => Some(&mut light.position),
        LightField::Ambient => Some(&mut light.ambient),
        LightField::Diffuse => Some(&mut light.diffuse),
        LightField::Specular => Some(&mut light.specular),
        _ => None,
    }
}

pub(crate) fn mat3_to_3x4(matrix: Mat3) -> [[f32; 4]; 3] {
    let cols = matrix.to_cols_array();
    [
        [cols[0], cols[1], cols[2], 0.0],
        [cols[3], cols[4], cols[5], 0.0],
        [cols[6], cols[7], cols[8], 0.0],
    ]
}
