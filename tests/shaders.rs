use std::mem::size_of;
use std::path::Path;

use restaurant_scene::shader::{
    DirLightUniform, GlobalUniform, ObjectUniform, PointLightUniform,
};
use restaurant_scene::ShaderSources;
use wgpu::naga::{self, front::wgsl, valid};

fn shipped_shaders() -> ShaderSources {
    let dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("shaders");
    ShaderSources::load(&dir).expect("shader files present")
}

fn compile(label: &str, source: &str) -> naga::Module {
    let module = wgsl::parse_str(source)
        .unwrap_or_else(|err| panic!("{label} does not parse:\n{}", err.emit_to_string(source)));
    valid::Validator::new(valid::ValidationFlags::all(), valid::Capabilities::empty())
        .validate(&module)
        .unwrap_or_else(|err| panic!("{label} does not validate: {err:?}"));
    module
}

/// Byte size and member count of the named WGSL struct.
fn struct_layout(module: &naga::Module, name: &str) -> (u32, usize) {
    let ty = module
        .types
        .iter()
        .map(|(_, ty)| ty)
        .find(|ty| ty.name.as_deref() == Some(name))
        .unwrap_or_else(|| panic!("struct {name} not declared"));
    match &ty.inner {
        naga::TypeInner::Struct { members, span } => (*span, members.len()),
        other => panic!("{name} is not a struct: {other:?}"),
    }
}

fn assert_blocks_match(module: &naga::Module) {
    assert_eq!(
        struct_layout(module, "Globals"),
        (size_of::<GlobalUniform>() as u32, 5)
    );
    assert_eq!(size_of::<GlobalUniform>(), 448);
    assert_eq!(
        struct_layout(module, "Object"),
        (size_of::<ObjectUniform>() as u32, 5)
    );
    assert_eq!(size_of::<ObjectUniform>(), 160);
    assert_eq!(
        struct_layout(module, "DirLight"),
        (size_of::<DirLightUniform>() as u32, 4)
    );
    assert_eq!(
        struct_layout(module, "PointLight"),
        (size_of::<PointLightUniform>() as u32, 5)
    );
}

#[test]
fn vertex_shader_matches_uniform_blocks() {
    let sources = shipped_shaders();
    let module = compile("phong.vert.wgsl", &sources.vertex);
    assert!(module.entry_points.iter().any(|entry| entry.name == "vs_main"));
    assert_blocks_match(&module);
}

#[test]
fn fragment_shader_matches_uniform_blocks() {
    let sources = shipped_shaders();
    let module = compile("phong.frag.wgsl", &sources.fragment);
    assert!(module.entry_points.iter().any(|entry| entry.name == "fs_main"));
    assert_blocks_match(&module);
}
