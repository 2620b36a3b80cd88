use glam::{Mat4, Vec3};
use restaurant_scene::{
    AppState, Camera, FrameRecorder, KeyCode, LightComponent, LightRig, MeshKind, UniformSink,
};

fn render(app: &AppState) -> FrameRecorder {
    let mut frame = FrameRecorder::new();
    app.render(&mut frame, 1000.0 / 800.0);
    frame
}

fn point_light_vec3(frame: &FrameRecorder, slot: usize, field: &str) -> Vec3 {
    frame
        .uniforms()
        .vec3(&format!("pointLights[{slot}].{field}"))
        .expect("point light uniform")
}

#[test]
fn default_camera_looks_one_unit_down_negative_z() {
    let camera = Camera::new(Vec3::new(0.0, 3.0, 10.0));
    let expected = Mat4::look_at_rh(
        Vec3::new(0.0, 3.0, 10.0),
        Vec3::new(0.0, 3.0, 9.0),
        Vec3::Y,
    );
    assert!(camera.view_matrix().abs_diff_eq(expected, 1e-5));
}

#[test]
fn diffuse_key_blanks_every_diffuse_uniform() {
    let mut app = AppState::restaurant(Vec3::new(0.0, 3.0, 10.0));
    app.handle_key_pressed(KeyCode::Digit(4));
    let frame = render(&app);

    assert_eq!(frame.uniforms().vec3("dirLight.diffuse"), Some(Vec3::ZERO));
    for slot in 0..3 {
        assert_eq!(point_light_vec3(&frame, slot, "diffuse"), Vec3::ZERO);
        assert_ne!(point_light_vec3(&frame, slot, "ambient"), Vec3::ZERO);
    }

    app.handle_key_released(KeyCode::Digit(4));
    app.handle_key_pressed(KeyCode::Digit(3));
    let frame = render(&app);
    assert_eq!(point_light_vec3(&frame, 1, "diffuse"), Vec3::ONE);
}

#[test]
fn point_lights_off_keeps_positions_and_markers() {
    let mut app = AppState::restaurant(Vec3::new(0.0, 3.0, 10.0));
    app.handle_key_pressed(KeyCode::letter('v'));
    let frame = render(&app);

    for slot in 0..3 {
        for field in ["ambient", "diffuse", "specular"] {
            assert_eq!(point_light_vec3(&frame, slot, field), Vec3::ZERO);
        }
    }
    assert_eq!(
        point_light_vec3(&frame, 0, "position"),
        Vec3::new(4.0, 5.0, -4.0)
    );
    // markers still drawn in their stored colors
    assert_eq!(frame.draws()[5].diffuse(), Vec3::new(1.0, 0.5, 1.0));
    assert_eq!(frame.draw_count(MeshKind::Sphere), 5);
}

#[test]
fn directional_light_toggle_leaves_point_lights_alone() {
    let mut rig = LightRig::restaurant();
    rig.set_directional(false);
    rig.set_component(LightComponent::Specular, false);

    let mut frame = FrameRecorder::new();
    rig.upload(&mut frame);
    assert_eq!(frame.uniforms().vec3("dirLight.ambient"), Some(Vec3::ZERO));
    assert_eq!(
        frame.uniforms().vec3("dirLight.direction"),
        Some(Vec3::new(-0.2, -1.0, -0.3))
    );
    assert_eq!(point_light_vec3(&frame, 1, "ambient"), Vec3::splat(0.6));
    assert_eq!(point_light_vec3(&frame, 1, "specular"), Vec3::ZERO);

    rig.set_directional(true);
    rig.upload(&mut frame);
    assert_eq!(frame.uniforms().vec3("dirLight.diffuse"), Some(Vec3::splat(0.5)));
    assert_eq!(frame.uniforms().vec3("dirLight.specular"), Some(Vec3::ZERO));
}

#[test]
fn unknown_uniform_names_are_ignored() {
    let mut frame = FrameRecorder::new();
    frame.set_vec3("pointLights[7].diffuse", Vec3::ONE);
    frame.set_float("material.colour", 3.0);
    assert_eq!(frame.uniforms(), FrameRecorder::new().uniforms());
}
